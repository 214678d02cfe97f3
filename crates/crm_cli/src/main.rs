//! CLI smoke entry point.
//!
//! Opens the data source named by `CRM_DATASOURCE_URL` (an in-memory
//! database when unset) and prints one line per manager.

use crm_core::{
    open_data_source, ConfigError, DataSourceConfig, ManagerRepository, SqliteManagerRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("crm_core version={}", crm_core::core_version());

    if let Ok(log_dir) = std::env::var("CRM_LOG_DIR") {
        if let Err(err) = crm_core::init_logging(crm_core::default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match DataSourceConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingVar(_)) => DataSourceConfig::in_memory(),
    };

    let conn = open_data_source(&config)?;
    let repo = SqliteManagerRepository::try_new(&conn)?;
    let managers = repo.find_all()?;

    println!("managers={}", managers.len());
    for manager in managers {
        println!(
            "manager id={} label={} clients={} clients_ordered={}",
            manager.id,
            manager.label,
            manager.clients.len(),
            manager.clients_ordered.len()
        );
    }
    Ok(())
}
