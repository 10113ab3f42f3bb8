//! Module with row models matching the remote service's tables
use serde::{Deserialize, Serialize};

/// An `alunos` row. The service stores `senha` as plaintext and compares
/// it byte for byte; nothing on either side hashes it.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Aluno {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub grupo_id: i64,
}

/// An `alunos` row about to be inserted; the service assigns the id.
#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NovoAluno {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub grupo_id: i64,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Grupo {
    pub id: i64,
    pub nome: String,
}

#[derive(Deserialize, Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Avaliacao {
    pub id: i64,
    pub nome: String,
    pub grupo_id: i64,
}
