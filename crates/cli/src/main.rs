use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use ward_core::constants::DEFAULT_ADMISSIONS_FILE;
use ward_core::{normalize, BoardConfig, WardBoardService};

#[derive(Parser)]
#[command(name = "ward")]
#[command(about = "Ward bed board CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SourceArgs {
    /// Admissions export (.json, .yaml or .yml)
    #[arg(long, default_value = DEFAULT_ADMISSIONS_FILE)]
    admissions: PathBuf,
    /// Only include admissions for this ward code
    #[arg(long)]
    ward: Option<String>,
    /// Layout YAML (defaults to config/layout.yaml or the built-in layout)
    #[arg(long)]
    layout: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the canonical form of bed codes
    Normalize {
        /// Raw bed codes
        codes: Vec<String>,
    },
    /// List valid beds from the layout
    Beds {
        /// Layout YAML (defaults to config/layout.yaml or the built-in layout)
        #[arg(long)]
        layout: Option<PathBuf>,
    },
    /// Assemble a board and print it as JSON
    Board {
        #[command(flatten)]
        source: SourceArgs,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print admissions that could not be placed on a bed
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn service(args: SourceArgs) -> Result<WardBoardService, Box<dyn std::error::Error>> {
    let cfg = BoardConfig::new(args.admissions, args.ward, args.layout)?;
    let (layout, _) = cfg.load_layout()?;
    let source = cfg.admission_source()?;
    Ok(WardBoardService::new(Arc::new(layout), Arc::new(source)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Normalize { codes }) => {
            for code in codes {
                match normalize(&code) {
                    Some(id) => println!("{code:?} -> {id}"),
                    None => println!("{code:?} -> (no bed)"),
                }
            }
        }
        Some(Commands::Beds { layout }) => {
            let cfg = BoardConfig::new(DEFAULT_ADMISSIONS_FILE.into(), None, layout)?;
            let (layout, _) = cfg.load_layout()?;
            for zone in layout.zones() {
                let rooms: Vec<&str> = zone.rooms.iter().map(|b| b.as_str()).collect();
                println!("{} ({}): {}", zone.id, zone.title, rooms.join(", "));
            }
            println!("{} beds", layout.all_beds().len());
        }
        Some(Commands::Board { source, pretty }) => {
            let board = service(source)?.board()?;
            let json = if pretty {
                serde_json::to_string_pretty(&board)?
            } else {
                serde_json::to_string(&board)?
            };
            println!("{json}");
        }
        Some(Commands::Check { source }) => {
            let result = service(source)?.reconcile()?;
            println!(
                "{} placed, {} waiting",
                result.occupied.len(),
                result.waiting.len()
            );
            for waiting in &result.waiting {
                println!(
                    "AN: {}, Name: {}, Reason: {:?}, Bed: {}",
                    waiting.record.an.as_deref().unwrap_or("-"),
                    waiting.record.patient_name.as_deref().unwrap_or("-"),
                    waiting.reason,
                    waiting.bed_code.as_ref().map_or("-", |b| b.as_str())
                );
            }
        }
        None => {
            println!("Use 'ward --help' for commands");
        }
    }

    Ok(())
}
