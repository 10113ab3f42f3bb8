use clap::Parser;
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use log::info;

use turmas::gateway::RestGateway;
use turmas::models::{Args, Config, Screen};
use turmas::screens;

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let config: Config = Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("TURMAS_"))
        .extract()
        .unwrap();
    info!(
        "Read config.json from {}",
        std::path::absolute(&args.config_json_path)
            .unwrap()
            .display()
    );
    let gateway = RestGateway::new(
        reqwest::Client::new(),
        &config.service_url,
        &config.service_key,
    );

    /* Run the requested screen */
    let ok = match args.screen {
        Screen::Login { email, senha } => screens::login_screen(&gateway, &email, &senha).await,
        Screen::Registrar { nome, email, senha } => {
            screens::register_screen(&gateway, &nome, &email, &senha).await
        }
        Screen::Recuperar {
            email,
            grupo,
            nova_senha,
        } => screens::recovery_screen(&gateway, &email, &grupo, &nova_senha).await,
        Screen::Grupos => screens::home_screen(&gateway).await,
        Screen::Detalhes { grupo_id } => screens::details_screen(&gateway, grupo_id).await,
    };

    if !ok {
        std::process::exit(1);
    }
}
