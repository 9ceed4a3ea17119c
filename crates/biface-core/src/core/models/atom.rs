use super::ids::ResidueId;
use crate::core::utils::identifiers;
use nalgebra::Point3;

/// Represents an atom of a macromolecular structure.
///
/// Atoms keep the crystallographic annotations (alternative location, occupancy,
/// temperature factor) so that the checking stages can make decisions on them.
/// Alternative conformations of the same atom are stored as separate atoms sharing a
/// name and differing in [`Atom::alt_loc`].
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number from the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "CA", "N", "OG1").
    pub name: String,
    /// Element symbol, empty when the source file did not provide one.
    pub element: String,
    /// Alternative location indicator, `None` for atoms with a single conformation.
    pub alt_loc: Option<char>,
    /// Crystallographic occupancy in the range `[0, 1]`.
    pub occupancy: f64,
    /// Temperature factor.
    pub b_factor: f64,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
}

impl Atom {
    /// Creates a new `Atom` with full occupancy, no alternative location and no
    /// element information.
    ///
    /// # Arguments
    ///
    /// * `serial` - The serial number of the atom.
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(serial: usize, name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.to_string(),
            element: String::new(),
            alt_loc: None,
            occupancy: 1.0,
            b_factor: 0.0,
            position,
            residue_id,
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.trim().to_string();
        self
    }

    pub fn with_alt_loc(mut self, alt_loc: Option<char>, occupancy: f64) -> Self {
        self.alt_loc = alt_loc;
        self.occupancy = occupancy;
        self
    }

    pub fn is_hydrogen(&self) -> bool {
        identifiers::is_hydrogen(&self.name, &self.element)
    }
}
