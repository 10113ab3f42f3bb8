use log::{error, info};

use super::FlowError;
use crate::gateway::TableGateway;

/// Where the flow currently stands. Transitions only move forward; the only
/// way back from `Verified` is to drop the flow and start over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryState {
    Idle,
    Verified { email: String, grupo_id: i64 },
    Completed,
}

/// Two-phase password recovery: confirm the student exists in the named
/// group, then overwrite the password. Each screen invocation owns one
/// instance; leaving the screen discards it along with any progress.
pub struct RecoveryFlow {
    state: RecoveryState,
}

impl RecoveryFlow {
    pub fn new() -> Self {
        RecoveryFlow {
            state: RecoveryState::Idle,
        }
    }

    pub fn state(&self) -> &RecoveryState {
        &self.state
    }

    /// Idle -> Verified. Resolves the group by exact name first, then looks
    /// for the student inside it, so a missing group is reported even when
    /// the e-mail itself exists elsewhere. Failure keeps the flow in Idle.
    pub async fn verify<G: TableGateway>(
        &mut self,
        gateway: &G,
        email: &str,
        group_name: &str,
    ) -> Result<(), FlowError> {
        if self.state != RecoveryState::Idle {
            return Err(FlowError::StateMismatch);
        }
        // presence only; the e-mail shape is not re-checked at this step
        if email.is_empty() || group_name.is_empty() {
            return Err(FlowError::MissingFields);
        }

        info!("Verifying {} against grupo \"{}\"", email, group_name);
        let grupo = match gateway.group_by_name(group_name).await {
            Ok(Some(grupo)) => grupo,
            Ok(None) => return Err(FlowError::GroupNotFound),
            Err(err) => {
                error!("Group lookup failed: {}", err);
                return Err(err.into());
            }
        };
        let aluno = match gateway.student_in_group(email, grupo.id).await {
            Ok(Some(aluno)) => aluno,
            Ok(None) => return Err(FlowError::StudentNotFound),
            Err(err) => {
                error!("Student lookup failed: {}", err);
                return Err(err.into());
            }
        };

        self.state = RecoveryState::Verified {
            email: aluno.email,
            grupo_id: grupo.id,
        };
        Ok(())
    }

    /// Verified -> Completed. The update filters on the e-mail alone, not
    /// the group the verify step checked; every row sharing the address is
    /// rewritten. Failure keeps the flow in Verified so the user can retry.
    pub async fn reset<G: TableGateway>(
        &mut self,
        gateway: &G,
        nova_senha: &str,
    ) -> Result<usize, FlowError> {
        let email = match &self.state {
            RecoveryState::Verified { email, .. } => email.clone(),
            _ => return Err(FlowError::StateMismatch),
        };
        if nova_senha.is_empty() {
            return Err(FlowError::MissingFields);
        }

        match gateway.update_password(&email, nova_senha).await {
            Ok(updated) => {
                info!("Updated senha on {} row(s) for {}", updated, email);
                self.state = RecoveryState::Completed;
                Ok(updated)
            }
            Err(err) => {
                error!("Password update failed: {}", err);
                Err(err.into())
            }
        }
    }
}
