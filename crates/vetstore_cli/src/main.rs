//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load `StoreConfig`, start logging and open the configured store.
//! - Print a short deterministic summary of the store contents.

use std::process::ExitCode;
use vetstore_core::db::open_configured;
use vetstore_core::{
    init_logging_from_config, CrudRepository, SqliteVeterinarianRepository, StoreConfig,
    VeterinarianListQuery,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("vetstore: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("vetstore_core ping={}", vetstore_core::ping());
    println!("vetstore_core version={}", vetstore_core::core_version());

    let config = StoreConfig::load()?;
    init_logging_from_config(&config)?;

    let conn = open_configured(&config)?;
    let repo = SqliteVeterinarianRepository::try_new(&conn)?;

    println!("veterinarians count={}", repo.count()?);
    for vet in repo.find_all(&VeterinarianListQuery::default())? {
        println!("{}\t{}\t{}", vet.id, vet.name, vet.email);
    }
    Ok(())
}
