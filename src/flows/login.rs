use log::{error, info};

use super::FlowError;
use crate::gateway::TableGateway;
use crate::models::record_model::Aluno;
use crate::validation::validate_email;

/// A single credential check. There is no session to create: success hands
/// back the matched row and the caller decides where to navigate.
pub async fn login<G: TableGateway>(
    gateway: &G,
    email: &str,
    senha: &str,
) -> Result<Aluno, FlowError> {
    if email.is_empty() || senha.is_empty() {
        return Err(FlowError::MissingFields);
    }
    if !validate_email(email) {
        return Err(FlowError::MalformedEmail);
    }

    info!("Checking credentials for {}", email);
    match gateway.student_by_credentials(email, senha).await {
        Ok(Some(aluno)) => Ok(aluno),
        Ok(None) => Err(FlowError::WrongCredentials),
        Err(err) => {
            error!("Credential lookup failed: {}", err);
            Err(err.into())
        }
    }
}
