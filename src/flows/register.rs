use log::{error, info};

use super::FlowError;
use crate::gateway::TableGateway;
use crate::models::record_model::NovoAluno;
use crate::validation::validate_email;

/// Every new account lands in this group; the registration form never asks
/// for one.
pub const DEFAULT_GRUPO_ID: i64 = 1;

/// Inserts a new account. Neither the e-mail nor the group reference is
/// checked for uniqueness or existence, so re-registering an address
/// silently creates a second row.
pub async fn register<G: TableGateway>(
    gateway: &G,
    nome: &str,
    email: &str,
    senha: &str,
) -> Result<(), FlowError> {
    if nome.is_empty() || email.is_empty() || senha.is_empty() {
        return Err(FlowError::MissingFields);
    }
    if !validate_email(email) {
        return Err(FlowError::MalformedEmail);
    }

    let novo = NovoAluno {
        nome: nome.to_owned(),
        email: email.to_owned(),
        senha: senha.to_owned(),
        grupo_id: DEFAULT_GRUPO_ID,
    };
    info!("Registering {} into grupo {}", email, DEFAULT_GRUPO_ID);
    gateway.insert_student(&novo).await.map_err(|err| {
        error!("Registration insert failed: {}", err);
        FlowError::from(err)
    })
}
