//! Emergency Binder CLI
//!
//! Command-line access to a file-backed binder:
//! - Listing, searching and editing contacts, medications, pets, insurance
//!   policies and notes
//! - Exporting dated JSON backups and importing them (legacy shapes included)
//! - Checking a backup file without touching the binder

use anyhow::{Context, Result};
use binder_migrate::SchemaShape;
use binder_schema::EntityKind;
use binder_storage::{Binder, FileStore, PersistenceGateway, StorageConfig, Theme};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

mod entry;
mod render;

use entry::{EditedEntry, NewEntry};

#[derive(Parser, Debug)]
#[command(name = "binder")]
#[command(author, version, about = "Emergency Binder: household emergency records")]
struct Cli {
    /// Data directory (overrides BINDER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show everything in the binder
    Show {
        /// Print the JSON document instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Add an entry
    Add {
        #[command(subcommand)]
        entry: NewEntry,
    },

    /// Edit an entry. Flags not given keep their current value.
    Edit {
        #[command(subcommand)]
        entry: EditedEntry,
    },

    /// Remove an entry
    Remove {
        kind: KindArg,
        id: String,
    },

    /// Search every entry (case-insensitive)
    Search { query: String },

    /// Write a dated JSON backup
    Export {
        /// Output path, or `-` for stdout (default: emergency-binder-<date>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace the binder with a backup file
    Import { input: PathBuf },

    /// Check a backup file without importing it
    Check { input: PathBuf },

    /// Set or clear the background image
    Background {
        #[command(subcommand)]
        command: BackgroundCommands,
    },

    /// Print or set the theme preference
    Theme { theme: Option<Theme> },
}

#[derive(Subcommand, Debug)]
enum BackgroundCommands {
    /// Use an image URL or data URI
    Set { value: String },
    /// Remove the background image
    Clear,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Contact,
    Medication,
    Pet,
    Insurance,
    Note,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Contact => EntityKind::Contact,
            KindArg::Medication => EntityKind::Medication,
            KindArg::Pet => EntityKind::Pet,
            KindArg::Insurance => EntityKind::InsurancePolicy,
            KindArg::Note => EntityKind::Note,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = StorageConfig::from_env().context("invalid binder configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    run(cli.command, &config)
}

fn open(config: &StorageConfig) -> Binder<FileStore> {
    tracing::debug!(data_dir = %config.data_dir.display(), "opening binder");
    Binder::open(PersistenceGateway::from_config(config.open_store(), config))
}

fn run(command: Commands, config: &StorageConfig) -> Result<()> {
    let mut binder = open(config);

    match command {
        Commands::Show { json } => {
            if json {
                println!("{}", binder.gateway().export_text(binder.document()));
            } else {
                render::document(binder.document());
            }
        }
        Commands::Add { entry: new } => {
            let id = match new {
                NewEntry::Contact(args) => entry::add(&mut binder, args)?,
                NewEntry::Medication(args) => entry::add(&mut binder, args)?,
                NewEntry::Pet(args) => entry::add(&mut binder, args)?,
                NewEntry::Insurance(args) => entry::add(&mut binder, args)?,
                NewEntry::Note(args) => entry::add(&mut binder, args)?,
            };
            println!("{} {}", "added".green().bold(), id);
        }
        Commands::Edit { entry: edited } => {
            let id = match edited {
                EditedEntry::Contact { id, fields } => {
                    entry::edit(&mut binder, &id, fields)?;
                    id
                }
                EditedEntry::Medication { id, fields } => {
                    entry::edit(&mut binder, &id, fields)?;
                    id
                }
                EditedEntry::Pet { id, fields } => {
                    entry::edit(&mut binder, &id, fields)?;
                    id
                }
                EditedEntry::Insurance { id, fields } => {
                    entry::edit(&mut binder, &id, fields)?;
                    id
                }
                EditedEntry::Note { id, fields } => {
                    entry::edit(&mut binder, &id, fields)?;
                    id
                }
            };
            println!("{} {}", "updated".green().bold(), id);
        }
        Commands::Remove { kind, id } => {
            binder.remove(kind.into(), &id.as_str().into())?;
            println!("{} {}", "removed".green().bold(), id);
        }
        Commands::Search { query } => {
            render::hits(&query, &binder.search(&query));
        }
        Commands::Export { out } => {
            let export = binder.export_today();
            match out {
                Some(path) if path.as_os_str() == "-" => println!("{}", export.contents),
                other => {
                    let path = other.unwrap_or_else(|| PathBuf::from(&export.file_name));
                    fs::write(&path, &export.contents)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
                }
            }
        }
        Commands::Import { input } => {
            let text = read(&input)?;
            let report = binder.import_text(&text)?;
            if let SchemaShape::Legacy { .. } = report.shape() {
                eprintln!("{} upgraded a legacy backup", "info:".yellow().bold());
            }
            println!(
                "{} {}",
                "imported".green().bold(),
                input.display().to_string().bold()
            );
        }
        Commands::Check { input } => check(&input)?,
        Commands::Background { command } => match command {
            BackgroundCommands::Set { value } => {
                binder.set_background_image(Some(value));
                println!("{} background image", "set".green().bold());
            }
            BackgroundCommands::Clear => {
                binder.set_background_image(None);
                println!("{} background image", "cleared".green().bold());
            }
        },
        Commands::Theme { theme } => match theme {
            Some(theme) => {
                binder.gateway().save_theme(theme);
                println!("{} {}", "theme".green().bold(), theme);
            }
            None => {
                let theme = binder.gateway().load_theme().unwrap_or(Theme::Light);
                println!("{theme}");
            }
        },
    }

    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn check(input: &Path) -> Result<()> {
    let text = read(input)?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;
    let (doc, report) = binder_migrate::normalize(raw)
        .with_context(|| format!("{} is not a binder backup", input.display()))?;

    println!("{} {}", "ok".green().bold(), input.display().to_string().bold());
    match report.shape() {
        SchemaShape::Canonical => println!("  {} current shape", "→".cyan()),
        SchemaShape::Legacy {
            string_notes,
            vet_contact_pets,
        } => {
            println!("  {} legacy shape", "→".yellow());
            if string_notes {
                println!("    notes stored as a single string");
            }
            if vet_contact_pets > 0 {
                println!("    {vet_contact_pets} pet(s) with a combined vetContact");
            }
        }
    }
    if report.repaired() {
        println!(
            "  {} {} id(s) reassigned, {} malformed element(s) skipped",
            "→".yellow(),
            report.ids_assigned,
            report.elements_skipped
        );
    }
    for kind in EntityKind::ALL {
        println!("  {:<18} {}", kind.collection_key(), doc.len_of(kind));
    }
    Ok(())
}
