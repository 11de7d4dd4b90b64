use anyhow::{Context, Result};
use chrono::Timelike;
use clap::{Parser, Subcommand};
use musiquiz_tools::catalog::run_song_index;
use musiquiz_tools::labels::{reference_table, MINUTES_PER_DAY, REFERENCE_VERSION};
use musiquiz_tools::scan::LoftyReader;
use musiquiz_tools::{CatalogConfig, CatalogPipeline, ListingConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "musiquiz")]
#[command(about = "Build scripts for the Musiquiz collections site", long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan collection folders and update data.json
    Catalog {
        /// Audio root (one sub-folder per collection)
        #[arg(short = 'r', long, default_value = ".")]
        root: String,

        /// Catalog file (default: <root>/data.json)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Add new audio files to the flat songs.json index
    Songs {
        /// Audio root
        #[arg(short = 'r', long, default_value = ".")]
        root: String,

        /// Index file (default: <root>/songs.json)
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Regenerate the index.html directory listing
    Listing {
        /// Directory to list
        #[arg(short = 'r', long, default_value = ".")]
        root: String,

        /// Page to write (default: <root>/index.html)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the minute label for a time of day (default: now)
    Label {
        /// Time as HH:MM
        time: Option<String>,

        /// Print the whole table instead
        #[arg(long, conflicts_with = "time")]
        all: bool,
    },
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn parse_time(text: &str) -> Result<(u32, u32)> {
    let (hour, minute) = text
        .split_once(':')
        .with_context(|| format!("Expected HH:MM, got {:?}", text))?;
    let hour = hour
        .trim()
        .parse()
        .with_context(|| format!("Invalid hour in {:?}", text))?;
    let minute = minute
        .trim()
        .parse()
        .with_context(|| format!("Invalid minute in {:?}", text))?;
    Ok((hour, minute))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Catalog { root, output } => {
            let mut config = CatalogConfig::new(expand(&root));
            if let Some(output) = output {
                config = config.with_catalog_path(expand(&output));
            }
            CatalogPipeline::new(config, LoftyReader::new()).run()?;
        }

        Command::Songs { root, output } => {
            let mut config = CatalogConfig::new(expand(&root));
            if let Some(output) = output {
                config = config.with_song_index_path(expand(&output));
            }
            run_song_index(&config, &LoftyReader::new())?;
        }

        Command::Listing {
            root,
            output,
            title,
        } => {
            let mut config = ListingConfig::new(expand(&root));
            if let Some(output) = output {
                config = config.with_output(expand(&output));
            }
            if let Some(title) = title {
                config = config.with_title(title);
            }
            musiquiz_tools::listing::write_listing(&config)?;
        }

        Command::Label { time, all } => {
            let table = reference_table();
            log::debug!("Label vocabulary version {}", REFERENCE_VERSION);

            if all {
                log::info!(
                    "{} label(s) shared by several minutes",
                    table.collisions().len()
                );
                for index in 0..MINUTES_PER_DAY {
                    println!("{:02}:{:02}\t{}", index / 60, index % 60, table.label(index)?);
                }
                return Ok(());
            }

            let (hour, minute) = match time {
                Some(text) => parse_time(&text)?,
                None => {
                    let now = chrono::Local::now();
                    (now.hour(), now.minute())
                }
            };
            println!("{}", table.lookup(hour, minute)?);
        }
    }

    Ok(())
}
