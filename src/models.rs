use std::path::PathBuf;

use clap::{command, Parser, Subcommand};
use serde::Deserialize;

pub mod record_model;

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Path to config.json, that contains the connection parameters for the remote service.
/// 2. The screen to run, one subcommand per screen of the app.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[command(subcommand)]
    pub screen: Screen,
}

/// One variant per screen. Each runs a single flow against the remote
/// service and exits; there is no persisted session between invocations.
#[derive(Subcommand, Debug)]
pub enum Screen {
    /// Check credentials and, on success, show the group list
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        senha: String,
    },
    /// Create a new account
    Registrar {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        senha: String,
    },
    /// Recover a forgotten password: verify identity, then set a new one
    Recuperar {
        #[arg(long)]
        email: String,
        #[arg(long, value_name = "NOME")]
        grupo: String,
        #[arg(long, value_name = "SENHA")]
        nova_senha: String,
    },
    /// List all groups
    Grupos,
    /// Show the students and evaluations of one group
    Detalhes {
        #[arg(long)]
        grupo_id: i64,
    },
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Base URL of the remote tabular service
/// 2. API key, sent as both the apikey header and the bearer token
#[derive(Deserialize)]
pub struct Config {
    pub service_url: String,
    pub service_key: String,
}
