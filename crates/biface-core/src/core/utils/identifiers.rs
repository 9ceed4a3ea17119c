use phf::{Set, phf_set};

static AMINO_ACID_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "HID", "HIE", "HIP", "HSD", "HSE", "HSP", "CYX", "CYM", "ASH", "GLH", "LYN",
    "MSE", "SEC", "PYL",
};

static NUCLEOTIDE_NAMES: Set<&'static str> = phf_set! {
    "A", "C", "G", "U", "T", "I", "DA", "DC", "DG", "DT", "DU", "DI",
};

static WATER_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "D2O", "TIP", "TIP3", "TIP4", "SOL", "SPC",
};

static METAL_NAMES: Set<&'static str> = phf_set! {
    "LI", "NA", "K", "RB", "CS", "MG", "CA", "SR", "BA", "MN", "FE", "FE2", "CO", "3CO",
    "NI", "3NI", "CU", "CU1", "CU3", "ZN", "CD", "HG", "PT", "AU", "AG", "PB", "AL",
    "GA", "IN", "TL", "CR", "V", "MO", "W", "OS", "IR", "RU", "RH", "PD", "SB", "LA",
    "CE", "PR", "SM", "EU", "GD", "TB", "YB", "LU", "U1",
};

pub fn is_amino_acid(residue_name: &str) -> bool {
    AMINO_ACID_NAMES.contains(residue_name.trim())
}

pub fn is_nucleotide(residue_name: &str) -> bool {
    NUCLEOTIDE_NAMES.contains(residue_name.trim())
}

pub fn is_polymer_residue(residue_name: &str) -> bool {
    is_amino_acid(residue_name) || is_nucleotide(residue_name)
}

pub fn is_water(residue_name: &str) -> bool {
    WATER_NAMES.contains(residue_name.trim())
}

pub fn is_metal_ion(residue_name: &str) -> bool {
    METAL_NAMES.contains(residue_name.trim())
}

/// Returns `true` for hydrogen or deuterium, judged by element symbol when one is
/// available and by the atom name otherwise.
pub fn is_hydrogen(atom_name: &str, element: &str) -> bool {
    let element = element.trim();
    if !element.is_empty() {
        return element.eq_ignore_ascii_case("H") || element.eq_ignore_ascii_case("D");
    }
    let first_alpha = atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase());
    matches!(first_alpha, Some('H') | Some('D'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_amino_acid_recognizes_standard_and_protonation_variants() {
        assert!(is_amino_acid("ALA"));
        assert!(is_amino_acid("HIE"));
        assert!(is_amino_acid(" CYX "));
        assert!(!is_amino_acid("HOH"));
        assert!(!is_amino_acid("NAG"));
    }

    #[test]
    fn is_polymer_residue_includes_nucleotides() {
        assert!(is_polymer_residue("DA"));
        assert!(is_polymer_residue("GLY"));
        assert!(!is_polymer_residue("ZN"));
    }

    #[test]
    fn is_water_recognizes_common_aliases() {
        assert!(is_water("HOH"));
        assert!(is_water("WAT"));
        assert!(is_water("DOD"));
        assert!(!is_water("SER"));
    }

    #[test]
    fn is_metal_ion_recognizes_ions_but_not_ligands() {
        assert!(is_metal_ion("ZN"));
        assert!(is_metal_ion("MG"));
        assert!(is_metal_ion("NA"));
        assert!(!is_metal_ion("NAG"));
        assert!(!is_metal_ion("HEM"));
    }

    #[test]
    fn is_hydrogen_prefers_element_symbol() {
        assert!(is_hydrogen("HA", "H"));
        assert!(is_hydrogen("D1", "D"));
        assert!(!is_hydrogen("HG", "HG"));
        assert!(!is_hydrogen("CA", "C"));
    }

    #[test]
    fn is_hydrogen_falls_back_to_atom_name() {
        assert!(is_hydrogen("HB2", ""));
        assert!(is_hydrogen("1HG1", ""));
        assert!(!is_hydrogen("CB", ""));
        assert!(!is_hydrogen("", ""));
    }
}
