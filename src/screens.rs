use std::time::Duration;

use futures::future;
use log::error;
use tokio::time::sleep;

use crate::flows::recovery::RecoveryFlow;
use crate::flows::{login, register, FlowError};
use crate::gateway::{GatewayError, TableGateway};

/// How long a success message stays on screen before the app "navigates"
/// back to the login view.
pub const RETURN_TO_LOGIN_DELAY: Duration = Duration::from_secs(2);

/// Mismatch and in-band query failure share one generic wording; the login
/// screen never tells an unknown address apart from a wrong password.
/// Only a failure to reach the service at all reads differently.
pub fn login_message(err: &FlowError) -> &'static str {
    match err {
        FlowError::MissingFields => "Preencha todos os campos.",
        FlowError::MalformedEmail => "E-mail inválido.",
        FlowError::Gateway(GatewayError::Transport { .. }) => {
            "Erro ao fazer login. Tente novamente."
        }
        _ => "Erro ao fazer login. Verifique suas credenciais.",
    }
}

pub fn register_message(err: &FlowError) -> &'static str {
    match err {
        FlowError::MissingFields => "Preencha todos os campos.",
        FlowError::MalformedEmail => "E-mail inválido.",
        _ => "Erro ao registrar. Tente novamente.",
    }
}

/// Unlike login, the recovery screen distinguishes the two lookups so the
/// user knows which of the two inputs to fix.
pub fn verify_message(err: &FlowError) -> &'static str {
    match err {
        FlowError::MissingFields => "Por favor, preencha todos os campos.",
        FlowError::GroupNotFound => "Grupo não encontrado.",
        FlowError::StudentNotFound => "Aluno não encontrado no grupo especificado.",
        _ => "Ocorreu um erro. Por favor, tente novamente.",
    }
}

pub fn reset_message(err: &FlowError) -> &'static str {
    match err {
        FlowError::MissingFields => "Por favor, insira a nova senha.",
        _ => "Erro ao atualizar a senha. Por favor, tente novamente.",
    }
}

pub async fn login_screen<G: TableGateway>(gateway: &G, email: &str, senha: &str) -> bool {
    match login::login(gateway, email, senha).await {
        Ok(_) => home_screen(gateway).await,
        Err(err) => {
            println!("{}", login_message(&err));
            false
        }
    }
}

pub async fn register_screen<G: TableGateway>(
    gateway: &G,
    nome: &str,
    email: &str,
    senha: &str,
) -> bool {
    match register::register(gateway, nome, email, senha).await {
        Ok(()) => {
            println!("Registro feito com sucesso!");
            sleep(RETURN_TO_LOGIN_DELAY).await;
            true
        }
        Err(err) => {
            println!("{}", register_message(&err));
            false
        }
    }
}

/// Runs both phases of the recovery machine in one invocation; a verify
/// failure stops before the reset is ever attempted.
pub async fn recovery_screen<G: TableGateway>(
    gateway: &G,
    email: &str,
    grupo: &str,
    nova_senha: &str,
) -> bool {
    let mut flow = RecoveryFlow::new();
    if let Err(err) = flow.verify(gateway, email, grupo).await {
        println!("{}", verify_message(&err));
        return false;
    }
    println!("Verificação bem-sucedida. Você pode redefinir sua senha agora.");
    match flow.reset(gateway, nova_senha).await {
        Ok(_) => {
            println!("Senha atualizada com sucesso!");
            sleep(RETURN_TO_LOGIN_DELAY).await;
            true
        }
        Err(err) => {
            println!("{}", reset_message(&err));
            false
        }
    }
}

pub async fn home_screen<G: TableGateway>(gateway: &G) -> bool {
    let grupos = match gateway.groups().await {
        Ok(grupos) => grupos,
        Err(err) => {
            error!("Failed to load grupos: {}", err);
            return false;
        }
    };
    println!("Grupos");
    for grupo in &grupos {
        println!("{} - {}", grupo.id, grupo.nome);
    }
    true
}

pub async fn details_screen<G: TableGateway>(gateway: &G, grupo_id: i64) -> bool {
    // the heading needs the group name; the list screen had the whole row
    // in hand, here it comes from the same select-all
    let grupos = match gateway.groups().await {
        Ok(grupos) => grupos,
        Err(err) => {
            error!("Failed to load grupos: {}", err);
            return false;
        }
    };
    let Some(grupo) = grupos.into_iter().find(|g| g.id == grupo_id) else {
        error!("No grupo with id {}", grupo_id);
        return false;
    };

    let (alunos, avaliacoes) = future::join(
        gateway.students_in_group(grupo_id),
        gateway.evaluations_in_group(grupo_id),
    )
    .await;
    let (alunos, avaliacoes) = match (alunos, avaliacoes) {
        (Ok(alunos), Ok(avaliacoes)) => (alunos, avaliacoes),
        (Err(err), _) | (_, Err(err)) => {
            error!("Failed to load details for grupo {}: {}", grupo_id, err);
            return false;
        }
    };

    println!("Detalhes do Grupo: {}", grupo.nome);
    println!("Alunos:");
    for aluno in &alunos {
        println!("{}", aluno.nome);
    }
    println!("Avaliações:");
    for avaliacao in &avaliacoes {
        println!("{}", avaliacao.nome);
    }
    true
}
