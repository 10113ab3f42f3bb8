use thiserror::Error;

use crate::gateway::GatewayError;

pub mod login;
pub mod recovery;
pub mod register;

/// Everything a flow can fail with. Validation variants are raised before
/// any network call; the screens decide which of these collapse into one
/// generic message and which stay distinguishable.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("required fields are blank")]
    MissingFields,
    #[error("malformed e-mail address")]
    MalformedEmail,
    #[error("no account matches the given credentials")]
    WrongCredentials,
    #[error("no group with the given name")]
    GroupNotFound,
    #[error("no student with the given e-mail in the group")]
    StudentNotFound,
    #[error("step not allowed in the current recovery state")]
    StateMismatch,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
