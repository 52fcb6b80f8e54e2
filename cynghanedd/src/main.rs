use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use cynghanedd::{
    build_index, format_segmentation, AppConfig, DictionaryFormat, DictionarySource, IpaConsonants,
    Repl, Target,
};
use cynghanedd_core::{expand, segment, SkeletonIndex};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cynghanedd", version, about = "Find word sequences matching a consonant skeleton")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Dictionary file to load, in addition to those in the config (repeatable)
    #[arg(long = "dict", global = true)]
    dicts: Vec<PathBuf>,

    /// Line format of the `--dict` files
    #[arg(long, value_enum, global = true, default_value_t = DictionaryFormat::Tokens)]
    format: DictionaryFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Choose words one at a time (default)
    Repl,
    /// Print every segmentation of the target
    Search {
        #[command(flatten)]
        target: TargetArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print word sequences matching the target
    Expand {
        #[command(flatten)]
        target: TargetArgs,
        /// Maximum sequences to print [default: expansion_limit from config]
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the skeleton of the target
    Skeleton {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TargetArgs {
    /// Space-separated consonant tokens, e.g. "k t"
    #[arg(long)]
    tokens: Option<String>,
    /// Dictionary words, e.g. "his cat"
    #[arg(long)]
    words: Option<String>,
    /// IPA transcription, e.g. "/kæt/"
    #[arg(long)]
    ipa: Option<String>,
}

impl TargetArgs {
    fn into_target(self) -> Target {
        match (self.tokens, self.words, self.ipa) {
            (Some(tokens), _, _) => Target::Tokens(tokens),
            (_, Some(words), _) => Target::Words(words),
            (_, _, Some(ipa)) => Target::Ipa(ipa),
            (None, None, None) => Target::Tokens(String::new()),
        }
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_index(cfg: &AppConfig) -> Result<SkeletonIndex> {
    if cfg.dictionaries.is_empty() {
        bail!("no dictionaries given; pass --dict FILE or list them in the config file");
    }
    build_index(&cfg.dictionaries)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    cfg.dictionaries
        .extend(cli.dicts.iter().map(|path| DictionarySource::new(path, cli.format)));
    init_logging(&cfg.log_filter);

    let analyzer = IpaConsonants::new();
    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            let index = load_index(&cfg)?;
            let prompts = io::stdin().is_terminal();
            Repl::new(&index, cfg.base(), io::stdin().lock(), io::stdout().lock())
                .with_prompts(prompts)
                .run()?;
        }
        Command::Search { target, json } => {
            let index = load_index(&cfg)?;
            let skeleton = target.into_target().resolve(&index, &analyzer)?;
            let segmentations = segment(&index, &skeleton);
            if json {
                println!("{}", serde_json::to_string_pretty(&segmentations)?);
            } else if segmentations.is_empty() {
                println!("no solutions");
            } else {
                for segmentation in &segmentations {
                    println!("{}", format_segmentation(segmentation));
                }
            }
        }
        Command::Expand { target, limit } => {
            let index = load_index(&cfg)?;
            let skeleton = target.into_target().resolve(&index, &analyzer)?;
            let segmentations = segment(&index, &skeleton);
            let limit = limit.unwrap_or(cfg.base().expansion_limit);
            for words in expand(&index, &segmentations).take(limit) {
                println!("{}", words.join(" "));
            }
        }
        Command::Skeleton { target } => {
            let target = target.into_target();
            let index = match target {
                Target::Words(_) => load_index(&cfg)?,
                _ => SkeletonIndex::new(),
            };
            println!("{}", target.resolve(&index, &analyzer)?);
        }
    }
    Ok(())
}
