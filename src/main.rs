//! sigcorr command-line interface
//!
//! # Commands
//!
//! - `matched-pairs`: correlate a signature corpus and print the best partner of every column
//! - `count-good`: score a pair list against the permutation in a secret key
//! - `verify-permutation`: check a recovered permutation against a secret key

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sigcorr::algorithms::{
    count_good_pairs, verify_u_uv_permutation, FoldPath, Normalization, ReducerConfig,
    DEFAULT_CHUNK_SIZE,
};
use sigcorr::params::{Pqsigrm613, RecordLayout, SchemeParams};
use sigcorr::pipeline::{matched_pairs, MatchedPairsOptions};
use sigcorr::utils::{
    read_corpus, read_pairs, read_permutation, read_secret_permutation, write_pairs,
};

/// Statistical analysis of code-based signature corpora
#[derive(Parser, Debug)]
#[command(name = "sigcorr")]
#[command(version)]
#[command(about = "Pearson correlation and matched pairs of signature error vectors")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Correlate a corpus and print one `i partner` line per column
    MatchedPairs(MatchedPairsArgs),
    /// Count recovered pairs that are true pairs of the secret key
    CountGood {
        /// Secret key file
        secret_key: PathBuf,
        /// Pair list written by `matched-pairs`
        pairs: PathBuf,
        /// Code length L
        #[arg(long, default_value_t = <Pqsigrm613 as SchemeParams>::CODE_N)]
        code_len: usize,
    },
    /// Check that a recovered permutation exposes the (U | U+V) structure
    VerifyPermutation {
        /// Secret key file
        secret_key: PathBuf,
        /// Permutation file, little-endian u16
        permutation: PathBuf,
        /// Code length L
        #[arg(long, default_value_t = <Pqsigrm613 as SchemeParams>::CODE_N)]
        code_len: usize,
    },
}

/// Record layout of the corpus file
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutKind {
    /// [counter][message][signature]
    Counter,
    /// [message][signature]
    Plain,
    /// Counterless stride, error field read past a counter
    Legacy,
}

/// Scaling of pair covariances into coefficients
#[derive(Clone, Copy, Debug, ValueEnum)]
enum NormalizationKind {
    /// Pearson coefficient of the spin columns, within [-1, 1]
    Textbook,
    /// Covariance over sqrt((n - mX^2)(n - mY^2)), as the collector tools print it
    Legacy,
}

impl From<NormalizationKind> for Normalization {
    fn from(kind: NormalizationKind) -> Self {
        match kind {
            NormalizationKind::Textbook => Normalization::Textbook,
            NormalizationKind::Legacy => Normalization::Legacy,
        }
    }
}

#[derive(clap::Args, Debug)]
struct MatchedPairsArgs {
    /// Signature corpus file
    sigs: PathBuf,

    /// Message length in bytes
    #[arg(long, default_value_t = <Pqsigrm613 as SchemeParams>::MLEN)]
    mlen: usize,

    /// Signature length in bytes
    #[arg(long, default_value_t = <Pqsigrm613 as SchemeParams>::CRYPTO_BYTES)]
    crypto_bytes: usize,

    /// Code length L, the width of the error vector in bits
    #[arg(long, default_value_t = <Pqsigrm613 as SchemeParams>::CODE_N)]
    code_len: usize,

    /// Record layout
    #[arg(long, value_enum, default_value_t = LayoutKind::Counter)]
    layout: LayoutKind,

    /// Explicit record stride in bytes, overriding --layout
    #[arg(long, requires = "offset")]
    stride: Option<usize>,

    /// Explicit error-vector offset in bytes, overriding --layout
    #[arg(long, requires = "stride")]
    offset: Option<usize>,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Samples claimed by a worker at a time
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Write NaN for zero-variance columns instead of failing
    #[arg(long)]
    allow_degenerate: bool,

    /// Scaling applied to pair covariances before matching
    #[arg(long, value_enum, default_value_t = NormalizationKind::Textbook)]
    normalization: NormalizationKind,

    /// Permutation file applied to every sample first
    #[arg(long)]
    permutation: Option<PathBuf>,

    /// Fold path to start from, such as `U` or `UV`; may be repeated
    #[arg(long = "fold")]
    folds: Vec<FoldPath>,

    /// U-steps added to every fold path
    #[arg(long, default_value_t = 0)]
    extra_u: usize,

    /// V-steps added to every fold path
    #[arg(long, default_value_t = 0)]
    extra_v: usize,

    /// Write the pair list here instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl MatchedPairsArgs {
    fn layout(&self) -> sigcorr::api::Result<RecordLayout> {
        match (self.stride, self.offset) {
            (Some(stride), Some(offset)) => RecordLayout::custom(stride, offset, self.code_len),
            _ => match self.layout {
                LayoutKind::Counter => {
                    RecordLayout::with_counter(self.mlen, self.crypto_bytes, self.code_len)
                }
                LayoutKind::Plain => {
                    RecordLayout::without_counter(self.mlen, self.crypto_bytes, self.code_len)
                }
                LayoutKind::Legacy => {
                    RecordLayout::legacy(self.mlen, self.crypto_bytes, self.code_len)
                }
            },
        }
    }
}

fn run_matched_pairs(args: MatchedPairsArgs) -> Result<()> {
    let layout = args.layout().context("invalid record layout")?;
    let samples = read_corpus(&args.sigs, layout)
        .with_context(|| format!("failed to load corpus {}", args.sigs.display()))?;

    let mut reducer = ReducerConfig::default().with_chunk_size(args.chunk_size);
    if let Some(threads) = args.threads {
        reducer = reducer.with_workers(threads);
    }

    let permutation = match &args.permutation {
        Some(path) => Some(
            read_permutation(path, args.code_len)
                .with_context(|| format!("failed to load permutation {}", path.display()))?,
        ),
        None => None,
    };

    let options = MatchedPairsOptions {
        reducer,
        allow_degenerate: args.allow_degenerate,
        normalization: args.normalization.into(),
        permutation,
        start_paths: args.folds,
        extra_u: args.extra_u,
        extra_v: args.extra_v,
    };
    let mapping = match matched_pairs(samples, &options) {
        Ok(mapping) => mapping,
        Err(e) if e.is_statistical() => {
            return Err(anyhow::Error::new(e)
                .context("corpus has zero-variance columns; rerun with --allow-degenerate"))
        }
        Err(e) => return Err(e.into()),
    };
    info!(involution = mapping.is_involution(), "partner mapping checked");

    match &args.output {
        Some(path) => write_pairs(path, &mapping)?,
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            out.write_all(mapping.lines().as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::MatchedPairs(args) => run_matched_pairs(args)?,
        Commands::CountGood {
            secret_key,
            pairs,
            code_len,
        } => {
            let secret = read_secret_permutation(&secret_key, code_len)
                .with_context(|| format!("failed to load secret key {}", secret_key.display()))?;
            let recovered = read_pairs(&pairs)?;
            println!("{}", count_good_pairs(&recovered, &secret));
        }
        Commands::VerifyPermutation {
            secret_key,
            permutation,
            code_len,
        } => {
            let secret = read_secret_permutation(&secret_key, code_len)
                .with_context(|| format!("failed to load secret key {}", secret_key.display()))?;
            let recovered = read_permutation(&permutation, code_len)?;
            println!("{}", verify_u_uv_permutation(&secret, &recovered)?);
        }
    }
    Ok(())
}
