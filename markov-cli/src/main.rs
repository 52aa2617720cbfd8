//! `markov`: generate random text from a word-level Markov chain.
//!
//! Reads text from files (`-f`) or stdin, builds a chain of order `-n`
//! and prints generated text.
//!
//! ```text
//! $ markov -n 2 -f alice.txt looking_glass.txt
//! $ cat alice.txt | markov -n 3
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};
use rand::SeedableRng;
use rand::rngs::StdRng;

use markov_core::io::{read_each, read_sources, read_stdin};
use markov_core::model::walk_input::{StartSeed, WalkInput};
use markov_core::{Chain, Walker};

#[derive(Parser, Debug)]
#[command(name = "markov", version, about = "Random text from word-level Markov chains")]
struct Args {
    /// Length of the n-gram (words per key)
    #[arg(short, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    n: u64,

    /// Input text files, read in order and concatenated. Reads stdin when absent
    #[arg(short, long = "files", value_name = "file.txt", num_args = 1..)]
    f: Option<Vec<String>>,

    /// Treat each file as an independent text (built in parallel, then merged)
    #[arg(long, requires = "f")]
    separate: bool,

    /// Start policy: 'capitalized', 'random' or 'custom:<tokens>'
    #[arg(long, default_value = "capitalized")]
    start: String,

    /// Maximum number of words per generated text
    #[arg(long, conflicts_with = "unbounded")]
    max_tokens: Option<usize>,

    /// Walk until a final key is reached, however long it takes
    #[arg(long)]
    unbounded: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Number of texts to generate, one per line
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Builds the chain from the selected input sources.
fn load_chain(args: &Args, n: usize) -> Result<Chain> {
    let chain = match &args.f {
        Some(paths) if args.separate => {
            let texts = read_each(paths).context("failed to read input files")?;
            Chain::build_parallel(&texts, n)?
        }
        Some(paths) => {
            let text = read_sources(paths).context("failed to read input files")?;
            Chain::from_text(&text, n)?
        }
        None => {
            let text = read_stdin().context("failed to read stdin")?;
            Chain::from_text(&text, n)?
        }
    };
    debug!("chain of order {}: {} keys, {} transitions", n, chain.len(), chain.successor_count());
    Ok(chain)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let n = usize::try_from(args.n).context("n-gram length too large")?;
    let chain = load_chain(&args, n)?;

    let mut input = WalkInput::new(StartSeed::parse(&args.start)?);
    if args.unbounded {
        input.set_max_tokens(None)?;
    } else if let Some(max) = args.max_tokens {
        input.set_max_tokens(Some(max))?;
    }

    let walker = Walker::new(&chain).context("not enough input to build a model")?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    for _ in 0..args.count {
        println!("{}", walker.generate(&input, &mut rng)?);
    }

    Ok(())
}
