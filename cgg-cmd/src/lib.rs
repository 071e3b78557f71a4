//! Command implementations for the graphghan CLI.
//!
//! Each subcommand reads a contribution export (`date,count` CSV or a JSON
//! object keyed by ISO date), builds the stacked pattern for the requested
//! years, and writes or prints one of the export artifacts.

use clap::Subcommand;
use std::path::PathBuf;

pub mod generate;
pub mod input;

#[derive(Subcommand)]
pub enum Command {
    /// Write the materials and instructions document for a pattern
    Pattern {
        /// Contribution counts (.json object or date,count CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Years to include, comma separated (e.g. 2023,2024)
        #[arg(short, long, value_delimiter = ',', required = true)]
        years: Vec<i32>,

        /// Account name used in the title and filename
        #[arg(short, long)]
        username: String,

        /// Yarn palette: light, dark or spooky (unknown values use light)
        #[arg(short, long, default_value = "light")]
        theme: String,

        /// Directory the instructions file is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Also write the composed pattern as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Print the symbolic grid transcript
    Transcript {
        /// Contribution counts (.json object or date,count CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Years to include, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        years: Vec<i32>,
    },

    /// Print square counts and the finished-size estimate
    Stats {
        /// Contribution counts (.json object or date,count CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Years to include, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        years: Vec<i32>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Pattern {
            input,
            years,
            username,
            theme,
            output_dir,
            json,
        } => {
            let request = generate::PatternRequest {
                input,
                years,
                username,
                theme,
                output_dir,
                json,
            };
            let written = generate::run_pattern(&request).await?;
            println!("{}", written.display());
            Ok(())
        }
        Command::Transcript { input, years } => {
            print!("{}", generate::run_transcript(&input, &years).await?);
            Ok(())
        }
        Command::Stats { input, years } => {
            for line in generate::run_stats(&input, &years).await? {
                println!("{line}");
            }
            Ok(())
        }
    }
}
