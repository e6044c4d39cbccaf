mod board;
mod settings;

pub use board::*;
pub use settings::*;

use server_fn::ServerFnError;

/// Message text for the error dialog.
pub(crate) fn error_text(err: ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(msg) => msg,
        other => other.to_string(),
    }
}
