pub mod check;
pub mod energy;
pub mod interface;

use crate::utils::progress::CliProgressHandler;

pub(crate) fn progress_handler(quiet: bool) -> CliProgressHandler {
    if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    }
}
