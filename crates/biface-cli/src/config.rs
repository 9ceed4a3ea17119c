//! Layered configuration: built-in defaults, an optional TOML file, `-S key=value`
//! settings and command-line flags, in increasing order of precedence.

mod builder;
mod defaults;
mod file;

pub use builder::{build_check_config, build_energy_config, build_interface_config};
