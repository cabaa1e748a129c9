mod display;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser, Subcommand};
use nakaz_core::intake::parse_date;
use nakaz_core::service::{article_info, calculate_request};
use nakaz_core::{CalculateRequest, intake};
use nakaz_store::ReferenceStore;

/// Legacy sentencing calculator
#[derive(Parser, Debug)]
#[command(name = "nakaz")]
#[command(version)]
struct Cli {
    /// Tab-separated sanctions reference file
    #[arg(long, env = "REFERENCE_FILE_PATH", global = true)]
    reference: Option<PathBuf>,

    /// Fail when the reference loads with no records
    #[arg(long, global = true)]
    require_reference: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show where the reference was read from and how many records it holds
    Status,
    /// Re-read the reference file and report the record count
    Reload,
    /// Calculate punishments for a JSON request (`-` reads stdin)
    Calculate {
        input: String,
        /// Calculation date, `YYYY-MM-DD` or `DDMMYYYY`; defaults to today
        #[arg(long)]
        calc_date: Option<String>,
        /// Print the wire response instead of the card
        #[arg(long)]
        json: bool,
    },
    /// Summarise the latest version of an article, e.g. "ст. 188 ч.3"
    Article { query: String },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("nakaz v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let store = ReferenceStore::new(cli.reference);
    if cli.require_reference && store.count() == 0 {
        let status = store.status();
        bail!("reference {} holds no records", status.file_path);
    }

    match command {
        Commands::Status => {
            store.snapshot();
            display::print_status(&store.status())?;
        }
        Commands::Reload => {
            let count = store.reload().context("reloading reference")?;
            println!("reloaded {count} records");
        }
        Commands::Calculate {
            input,
            calc_date,
            json,
        } => {
            let text = if input == "-" {
                std::io::read_to_string(std::io::stdin()).context("reading request from stdin")?
            } else {
                std::fs::read_to_string(&input).with_context(|| format!("reading {input}"))?
            };
            let mut request = CalculateRequest::from_json(&text).context("parsing request")?;

            let today = match parse_date("calc_date", calc_date.as_deref())? {
                Some(date) => date,
                None => chrono::Local::now().date_naive(),
            };
            if calc_date.is_some() {
                request.calc_date = calc_date;
            }

            let response = calculate_request(&store, &request, today)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                let code = intake::resolve_article_code(&request.crime);
                display::print_calculation_card(&code, &response)?;
            }
        }
        Commands::Article { query } => match article_info(&store, &query) {
            Some(info) => display::print_article_card(&info)?,
            None => bail!("no article found for {query:?}"),
        },
    }

    Ok(())
}
