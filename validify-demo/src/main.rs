mod config;
mod paths;
mod session;

use std::env;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use log::{SetLoggerError, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;
use validify::{FormController, FormError};

use crate::config::ConfigError;

#[derive(Debug, Error)]
enum DemoError {
    #[error("cannot create log file: {0}")]
    LogFile(#[from] io::Error),
    #[error("cannot install logger: {0}")]
    Logger(#[from] SetLoggerError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("cannot bind form: {0}")]
    Form(#[from] FormError),
}

async fn run() -> Result<(), DemoError> {
    let log_file = File::create("validify-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let config_path = env::args_os().nth(1).map(PathBuf::from);
    let config = config::load(config_path.as_deref())?;

    let mut form = FormController::scan(
        session::signup_document(),
        "signup",
        Arc::new(session::registry()),
        config,
    )?;
    info!("Scanned {} field(s)", form.fields().len());

    session::run(&mut form, session::script()).await;

    println!("final state:");
    session::report(&form);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
    }
}
