//! Student credential operator CLI — `scred` command.
//!
//! Exposes the credential lifecycle to operators: list status, rotate a
//! PIN, test a login, provision the fleet, and summarize credential
//! health. The store location comes from `REGISTRY_STORE_PATH` /
//! `REGISTRY_DB`, overridable per invocation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use student_credentials::{
    summarize, AuthOutcome, CredentialManager, Database, Provisioner, StoreConfig,
};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// scred — operate the student credential registry.
#[derive(Parser, Debug)]
#[command(
    name = "scred",
    about = "Student credential registry operator tool",
    version
)]
struct Cli {
    /// Store root directory (overrides REGISTRY_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Database name (overrides REGISTRY_DB)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every active student with credential status
    ListStatus,

    /// Replace a student's PIN
    Rotate {
        /// Academic ID of the student
        academic_id: String,
        /// New PIN value
        new_pin: String,
    },

    /// Test a student's PIN without changing anything but the audit trail
    Authenticate {
        /// Academic ID of the student
        academic_id: String,
        /// PIN to verify
        pin: String,
    },

    /// Ensure every active student has a login record with the default PIN
    Provision {
        /// PIN applied to every record
        #[arg(long, default_value = "12345")]
        pin: String,
        /// Role stamped on newly created records
        #[arg(long, default_value = "student")]
        role: String,
    },

    /// Fleet-wide credential health summary for a known candidate PIN
    Summarize {
        /// Candidate PIN to check stored hashes against
        candidate_pin: String,
    },
}

// ── Config resolution ─────────────────────────────────────────────────────────

fn resolve_config(cli: &Cli) -> Result<StoreConfig> {
    let mut config = match &cli.store {
        Some(path) => StoreConfig::new(path, student_credentials::config::DEFAULT_DB_NAME),
        None => StoreConfig::from_env().context("store location not configured")?,
    };
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    Ok(config)
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    log::debug!(
        "opening store at {} (database {})",
        config.path.display(),
        config.database
    );
    let db = Database::open(&config)?;

    match cli.command {
        Commands::ListStatus => {
            let manager = CredentialManager::new(&db)?;
            let rows = manager.list_with_status()?;
            println!("{} active students", rows.len());
            for row in rows {
                let marker = if row.has_credential { "yes" } else { "no " };
                println!(
                    "  [login: {}] {}  {}  {}",
                    marker,
                    row.academic_id,
                    row.name,
                    row.email.as_deref().unwrap_or("-")
                );
            }
        }

        Commands::Rotate {
            academic_id,
            new_pin,
        } => {
            let manager = CredentialManager::new(&db)?;
            let name = manager
                .rotate(&academic_id, &new_pin)
                .with_context(|| format!("failed to rotate PIN for {academic_id}"))?;
            println!("PIN updated for {name} (ID: {academic_id})");
        }

        Commands::Authenticate { academic_id, pin } => {
            let manager = CredentialManager::new(&db)?;
            match manager
                .authenticate(&academic_id, &pin)
                .with_context(|| format!("failed to verify login for {academic_id}"))?
            {
                AuthOutcome::Authenticated { name } => {
                    println!("login successful for {name} (ID: {academic_id})");
                }
                AuthOutcome::Rejected { name } => {
                    println!("invalid PIN for {name} (ID: {academic_id})");
                    std::process::exit(1);
                }
            }
        }

        Commands::Provision { pin, role } => {
            let provisioner = Provisioner::new(&db)?;
            let summary = provisioner.provision_all(&pin, &role)?;
            println!(
                "provisioned {} students ({} created, {} updated)",
                summary.total(),
                summary.created,
                summary.updated
            );
        }

        Commands::Summarize { candidate_pin } => {
            let manager = CredentialManager::new(&db)?;
            let report = summarize(manager.students(), manager.logins(), &candidate_pin)?;
            println!("total students:       {}", report.total);
            println!("with credential:      {}", report.with_credential);
            println!("verifiable with PIN:  {}", report.verifiable_with_known_pin);
            if !report.orphaned_credentials.is_empty() {
                println!(
                    "orphaned credentials: {}",
                    report.orphaned_credentials.join(", ")
                );
            }
        }
    }

    Ok(())
}
