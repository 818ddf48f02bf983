//! Inventory smoke check.
//!
//! # Responsibility
//! - Open (or create) `inventory.db` next to this executable.
//! - Print the resolved paths and record count for quick local checks.

use inventory_core::config::{default_db_path, default_log_dir};
use inventory_core::{
    core_version, default_log_level, init_logging, open_db, ItemRepository, SqliteItemRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match default_log_dir() {
        Ok(log_dir) => {
            if let Err(err) = init_logging(default_log_level(), &log_dir) {
                eprintln!("logging disabled: {err}");
            }
        }
        Err(err) => eprintln!("logging disabled: cannot resolve executable path: {err}"),
    }

    let db_path = match default_db_path() {
        Ok(path) => path,
        Err(err) => {
            eprintln!("cannot resolve database path: {err}");
            return ExitCode::FAILURE;
        }
    };

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("{} ({err})", err.status_message());
            return ExitCode::FAILURE;
        }
    };

    let repo = SqliteItemRepository::new(&conn);
    match repo.count() {
        Ok(count) => {
            println!("inventory_core version={}", core_version());
            println!("inventory db_path={} items={count}", db_path.display());
            log::info!("event=cli_status module=cli status=ok items={count}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} ({err})", err.status_message());
            ExitCode::FAILURE
        }
    }
}
