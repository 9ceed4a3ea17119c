use biface::engine::checking::{
    AltLocSelection, ChainSelection, CheckStage, ModelSelection, RemovalSelection,
};
use biface::engine::config::Dielectric;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Unknown checking stage '{0}'. Expected one of: models, chains, altloc, metals, ligands, hydrogens, water, getss, clashes."
    )]
    UnknownStage(String),

    #[error("Stage '{stage}' does not take an option (got '{value}').")]
    UnexpectedOption { stage: String, value: String },

    #[error("Invalid option '{value}' for stage '{stage}'. {hint}")]
    InvalidOption {
        stage: String,
        value: String,
        hint: &'static str,
    },

    #[error(
        "Invalid dielectric '{0}'. Expected 'mehler-solmajer', a number or 'constant=<number>'."
    )]
    InvalidDielectric(String),
}

/// Cutoffs used when `getss` or `clashes` are given without an explicit value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageCutoffs {
    pub disulfide: f64,
    pub clash: f64,
}

/// Parses a stage specification of the form `name` or `name=option`.
pub fn parse_stage(spec: &str, cutoffs: StageCutoffs) -> Result<CheckStage, ParseError> {
    let (name, option) = match spec.split_once('=') {
        Some((name, option)) => (name.trim(), Some(option.trim())),
        None => (spec.trim(), None),
    };
    let stage = name.to_ascii_lowercase();

    let invalid = |value: &str, hint: &'static str| ParseError::InvalidOption {
        stage: stage.clone(),
        value: value.to_string(),
        hint,
    };

    match stage.as_str() {
        "models" => {
            let selection = match option.map(str::to_ascii_lowercase).as_deref() {
                None | Some("first") => ModelSelection::First,
                Some("all") | Some("keep") => ModelSelection::Keep,
                Some(value) => value
                    .parse::<usize>()
                    .map(ModelSelection::Select)
                    .map_err(|_| invalid(value, "Expected 'first', 'all' or a model number."))?,
            };
            Ok(CheckStage::Models(selection))
        }
        "chains" => {
            let selection = match option {
                None => ChainSelection::All,
                Some(value) if value.eq_ignore_ascii_case("all") => ChainSelection::All,
                Some(value) => {
                    let ids = split_list(value);
                    if ids.is_empty() {
                        return Err(invalid(value, "Expected 'all' or a list of chain ids."));
                    }
                    ChainSelection::Ids(ids)
                }
            };
            Ok(CheckStage::Chains(selection))
        }
        "altloc" => {
            let selection = match option {
                None => AltLocSelection::Occupancy,
                Some(value) if value.eq_ignore_ascii_case("occupancy") => {
                    AltLocSelection::Occupancy
                }
                Some(value) => {
                    let mut chars = value.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) if c.is_ascii_alphanumeric() => {
                            AltLocSelection::Id(c.to_ascii_uppercase())
                        }
                        _ => {
                            return Err(invalid(
                                value,
                                "Expected 'occupancy' or a single alternative location id.",
                            ));
                        }
                    }
                }
            };
            Ok(CheckStage::AltLoc(selection))
        }
        "metals" => Ok(CheckStage::Metals(parse_removal(option, &invalid)?)),
        "ligands" => Ok(CheckStage::Ligands(parse_removal(option, &invalid)?)),
        "hydrogens" | "water" => {
            if let Some(value) = option {
                return Err(ParseError::UnexpectedOption {
                    stage: stage.clone(),
                    value: value.to_string(),
                });
            }
            Ok(if name.eq_ignore_ascii_case("water") {
                CheckStage::Water
            } else {
                CheckStage::Hydrogens
            })
        }
        "getss" | "disulfides" => Ok(CheckStage::Disulfides {
            cutoff: parse_cutoff(option, cutoffs.disulfide, &invalid)?,
        }),
        "clashes" => Ok(CheckStage::Clashes {
            cutoff: parse_cutoff(option, cutoffs.clash, &invalid)?,
        }),
        _ => Err(ParseError::UnknownStage(name.to_string())),
    }
}

fn parse_removal(
    option: Option<&str>,
    invalid: &dyn Fn(&str, &'static str) -> ParseError,
) -> Result<RemovalSelection, ParseError> {
    match option {
        None => Ok(RemovalSelection::All),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(RemovalSelection::All),
        Some(value) if value.eq_ignore_ascii_case("keep") || value.eq_ignore_ascii_case("none") => {
            Ok(RemovalSelection::Keep)
        }
        Some(value) => {
            let names: Vec<String> = split_list(value)
                .into_iter()
                .map(|name| name.to_ascii_uppercase())
                .collect();
            if names.is_empty() {
                return Err(invalid(value, "Expected 'all', 'keep' or a list of residue names."));
            }
            Ok(RemovalSelection::Names(names))
        }
    }
}

fn parse_cutoff(
    option: Option<&str>,
    default: f64,
    invalid: &dyn Fn(&str, &'static str) -> ParseError,
) -> Result<f64, ParseError> {
    match option {
        None => Ok(default),
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| invalid(value, "Expected a distance in Angstroms.")),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `mehler-solmajer` (or `distance`), a bare number or `constant=<number>`.
pub fn parse_dielectric(value: &str) -> Result<Dielectric, ParseError> {
    let trimmed = value.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if matches!(lowered.as_str(), "mehler-solmajer" | "mehler_solmajer" | "distance") {
        return Ok(Dielectric::MehlerSolmajer);
    }
    let number = lowered
        .strip_prefix("constant=")
        .or_else(|| lowered.strip_prefix("constant:"))
        .unwrap_or(&lowered);
    number
        .trim()
        .parse::<f64>()
        .map(Dielectric::Constant)
        .map_err(|_| ParseError::InvalidDielectric(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUTOFFS: StageCutoffs = StageCutoffs {
        disulfide: 2.5,
        clash: 1.0,
    };

    #[test]
    fn parses_model_selections() {
        assert_eq!(
            parse_stage("models", CUTOFFS),
            Ok(CheckStage::Models(ModelSelection::First))
        );
        assert_eq!(
            parse_stage("models=ALL", CUTOFFS),
            Ok(CheckStage::Models(ModelSelection::Keep))
        );
        assert_eq!(
            parse_stage("models=3", CUTOFFS),
            Ok(CheckStage::Models(ModelSelection::Select(3)))
        );
        assert!(matches!(
            parse_stage("models=last", CUTOFFS),
            Err(ParseError::InvalidOption { .. })
        ));
    }

    #[test]
    fn parses_chain_lists() {
        assert_eq!(
            parse_stage("chains=A, E", CUTOFFS),
            Ok(CheckStage::Chains(ChainSelection::Ids(vec![
                "A".to_string(),
                "E".to_string()
            ])))
        );
        assert_eq!(
            parse_stage("chains", CUTOFFS),
            Ok(CheckStage::Chains(ChainSelection::All))
        );
        assert!(parse_stage("chains=,", CUTOFFS).is_err());
    }

    #[test]
    fn parses_altloc_selections() {
        assert_eq!(
            parse_stage("altloc=occupancy", CUTOFFS),
            Ok(CheckStage::AltLoc(AltLocSelection::Occupancy))
        );
        assert_eq!(
            parse_stage("altloc=b", CUTOFFS),
            Ok(CheckStage::AltLoc(AltLocSelection::Id('B')))
        );
        assert!(parse_stage("altloc=AB", CUTOFFS).is_err());
    }

    #[test]
    fn parses_removal_selections() {
        assert_eq!(
            parse_stage("metals", CUTOFFS),
            Ok(CheckStage::Metals(RemovalSelection::All))
        );
        assert_eq!(
            parse_stage("ligands=keep", CUTOFFS),
            Ok(CheckStage::Ligands(RemovalSelection::Keep))
        );
        assert_eq!(
            parse_stage("ligands=nag,so4", CUTOFFS),
            Ok(CheckStage::Ligands(RemovalSelection::Names(vec![
                "NAG".to_string(),
                "SO4".to_string()
            ])))
        );
    }

    #[test]
    fn flag_stages_reject_options() {
        assert_eq!(parse_stage("Water", CUTOFFS), Ok(CheckStage::Water));
        assert_eq!(parse_stage("hydrogens", CUTOFFS), Ok(CheckStage::Hydrogens));
        assert_eq!(
            parse_stage("water=all", CUTOFFS),
            Err(ParseError::UnexpectedOption {
                stage: "water".to_string(),
                value: "all".to_string()
            })
        );
    }

    #[test]
    fn contact_stages_fall_back_to_default_cutoffs() {
        assert_eq!(
            parse_stage("getss", CUTOFFS),
            Ok(CheckStage::Disulfides { cutoff: 2.5 })
        );
        assert_eq!(
            parse_stage("clashes=0.8", CUTOFFS),
            Ok(CheckStage::Clashes { cutoff: 0.8 })
        );
        assert!(parse_stage("clashes=close", CUTOFFS).is_err());
    }

    #[test]
    fn rejects_unknown_stages() {
        assert_eq!(
            parse_stage("amide", CUTOFFS),
            Err(ParseError::UnknownStage("amide".to_string()))
        );
    }

    #[test]
    fn parses_dielectric_models() {
        assert_eq!(
            parse_dielectric("Mehler-Solmajer"),
            Ok(Dielectric::MehlerSolmajer)
        );
        assert_eq!(parse_dielectric("4"), Ok(Dielectric::Constant(4.0)));
        assert_eq!(
            parse_dielectric("constant=80"),
            Ok(Dielectric::Constant(80.0))
        );
        assert_eq!(
            parse_dielectric("vacuum"),
            Err(ParseError::InvalidDielectric("vacuum".to_string()))
        );
    }
}
