// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use spendwise::{cli, commands, config::Config, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    dotenvy::dotenv().ok();

    let cfg = Config::from_env();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = match &cfg.db_path {
        Some(p) => p.clone(),
        None => db::default_db_path()?,
    };
    let conn = db::open_or_init(&db_path)?;
    let mut ledger = db::load_ledger(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            db::save_transactions(&conn, ledger.transactions())?;
            db::save_exchange(&conn, ledger.exchange())?;
            println!("Data store ready at {}", db_path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, &mut ledger, sub)?,
        Some(("rate", sub)) => commands::fx::handle(&conn, &mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&conn, &ledger, &cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
