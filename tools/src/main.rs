mod cmu;
mod mrc;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Convert a pronouncing dictionary to `spelling<TAB>tok tok ...` lines.
#[derive(Parser)]
#[command(name = "convert_dict", version)]
struct Args {
    #[command(subcommand)]
    source: Source,

    /// Write here instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Source {
    /// CMU Pronouncing Dictionary (cmudict), read as Latin-1
    Cmu { input: PathBuf },
    /// MRC Psycholinguistic Database dictionary file
    Mrc { input: PathBuf },
}

/// One converted dictionary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub spelling: String,
    pub consonants: Vec<String>,
}

/// Write entries with at least one consonant; returns how many were written.
pub fn write_entries<I, W>(entries: I, out: &mut W) -> Result<usize>
where
    I: IntoIterator<Item = Entry>,
    W: Write,
{
    let mut written = 0;
    for entry in entries {
        if entry.consonants.is_empty() {
            continue;
        }
        writeln!(out, "{}\t{}", entry.spelling, entry.consonants.join(" "))?;
        written += 1;
    }
    Ok(written)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut out: BufWriter<Box<dyn Write>> = match &args.output {
        Some(path) => BufWriter::new(Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => BufWriter::new(Box::new(io::stdout().lock())),
    };

    let (input, written) = match &args.source {
        Source::Cmu { input } => (input, write_entries(cmu::read_file(input)?, &mut out)?),
        Source::Mrc { input } => (input, write_entries(mrc::read_file(input)?, &mut out)?),
    };
    out.flush()?;

    info!(input = %input.display(), written, "conversion finished");
    Ok(())
}
