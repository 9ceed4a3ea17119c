use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Factor converting a Lennard-Jones sigma into the van der Waals radius.
const SIGMA_TO_RVDW: f64 = 0.5612;

#[derive(Debug, Clone, PartialEq)]
pub struct AtomParams {
    pub atom_type: String,
    pub charge: f64,
}

/// One row of a vdW parameter file.
///
/// `mass` and `fsrf` are carried for completeness of the file format; the interaction
/// energy uses only `eps` and `rvdw`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomType {
    pub id: String,
    pub eps: f64,
    pub sig: f64,
    pub mass: f64,
    /// Solvation surface factor. No solvation term is computed from it.
    pub fsrf: f64,
    pub rvdw: f64,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Parse error in '{path}' on line {line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },
}

fn read_file(path: &Path) -> Result<String, ParamLoadError> {
    std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Yields `(line number, fields)` for every data line, skipping blanks and `#` comments.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.starts_with('#') && !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line.split_whitespace().collect()))
}

fn parse_f64(path: &str, line: usize, column: &str, value: &str) -> Result<f64, ParamLoadError> {
    value.parse().map_err(|_| ParamLoadError::Parse {
        path: path.to_string(),
        line,
        message: format!("invalid {} '{}'", column, value),
    })
}

fn require_fields(path: &str, line: usize, fields: &[&str], n: usize) -> Result<(), ParamLoadError> {
    if fields.len() < n {
        return Err(ParamLoadError::Parse {
            path: path.to_string(),
            line,
            message: format!("expected {} columns, found {}", n, fields.len()),
        });
    }
    Ok(())
}

/// Atom types and partial charges per residue atom, keyed by `RES:ATOM`.
#[derive(Debug, Clone, Default)]
pub struct ResidueLibrary {
    entries: HashMap<String, AtomParams>,
}

impl ResidueLibrary {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = read_file(path)?;
        let library = Self::parse(&content, &path.to_string_lossy())?;
        debug!(path = %path.display(), entries = library.len(), "Loaded residue library");
        Ok(library)
    }

    /// Parses library text with whitespace-separated `RES ATOM TYPE CHARGE` columns.
    pub fn parse(content: &str, source: &str) -> Result<Self, ParamLoadError> {
        let mut entries = HashMap::new();
        for (line, fields) in data_lines(content) {
            require_fields(source, line, &fields, 4)?;
            let charge = parse_f64(source, line, "charge", fields[3])?;
            entries.insert(
                Self::key(fields[0], fields[1]),
                AtomParams {
                    atom_type: fields[2].to_string(),
                    charge,
                },
            );
        }
        Ok(Self { entries })
    }

    fn key(residue_name: &str, atom_name: &str) -> String {
        format!("{}:{}", residue_name, atom_name)
    }

    /// Looks up the parameters of one residue atom, warning when it is not listed.
    pub fn get_params(&self, residue_name: &str, atom_name: &str) -> Option<&AtomParams> {
        let key = Self::key(residue_name, atom_name);
        let params = self.entries.get(&key);
        if params.is_none() {
            warn!(atom = %key, "Atom not found in residue library");
        }
        params
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Van der Waals parameters per atom type.
#[derive(Debug, Clone, Default)]
pub struct VdwParamSet {
    types: HashMap<String, AtomType>,
}

impl VdwParamSet {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = read_file(path)?;
        let set = Self::parse(&content, &path.to_string_lossy())?;
        debug!(path = %path.display(), types = set.len(), "Loaded van der Waals parameters");
        Ok(set)
    }

    /// Parses parameter text with whitespace-separated `TYPE EPS SIG MASS FSRF` columns.
    pub fn parse(content: &str, source: &str) -> Result<Self, ParamLoadError> {
        let mut types = HashMap::new();
        for (line, fields) in data_lines(content) {
            require_fields(source, line, &fields, 5)?;
            let sig = parse_f64(source, line, "sigma", fields[2])?;
            let atom_type = AtomType {
                id: fields[0].to_string(),
                eps: parse_f64(source, line, "epsilon", fields[1])?,
                sig,
                mass: parse_f64(source, line, "mass", fields[3])?,
                fsrf: parse_f64(source, line, "fsrf", fields[4])?,
                rvdw: sig * SIGMA_TO_RVDW,
            };
            types.insert(atom_type.id.clone(), atom_type);
        }
        Ok(Self { types })
    }

    pub fn get(&self, atom_type: &str) -> Option<&AtomType> {
        self.types.get(atom_type)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
