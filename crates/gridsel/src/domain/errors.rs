//! Domain-specific errors.

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("invalid selection directive '{0}', expected 'all', 'none' or a list of indices")]
    InvalidDirective(String),
    #[error("invalid row index '{token}'")]
    InvalidIndex {
        token: String,
        #[source]
        source: ParseIntError,
    },
    #[error("unknown row action '{0}'")]
    UnknownRowAction(String),
}
