use super::atom::Atom;
use super::builder::StructureBuilder;
use super::ids::ResidueId;
use super::residue::ResidueKind;
use super::structure::Structure;
use nalgebra::Point3;

/// One atom record: chain, residue number, residue name, atom name, position.
pub(crate) type AtomSpec<'a> = (&'a str, isize, &'a str, &'a str, [f64; 3]);

/// Builds a single-model structure from atom records given in file order.
pub(crate) fn structure_from(atoms: &[AtomSpec]) -> Structure {
    let mut builder = StructureBuilder::new("fixture");
    for (serial, &(chain, number, res_name, atom_name, [x, y, z])) in atoms.iter().enumerate() {
        builder.start_chain(chain);
        builder
            .start_residue(number, None, res_name, ResidueKind::classify(res_name, false))
            .unwrap();
        let element: String = atom_name
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(String::from)
            .unwrap_or_default();
        builder
            .add_atom(
                Atom::new(serial + 1, atom_name, ResidueId::default(), Point3::new(x, y, z))
                    .with_element(&element),
            )
            .unwrap();
    }
    builder.build()
}
