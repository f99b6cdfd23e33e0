//! Command-line front end: train matrices from a labeled corpus, or decode a
//! request file against previously saved matrices.
//!
//! ```text
//! hmm-tool train --corpus dataset1.in --output sol-1-1.txt
//! hmm-tool decode --input input.txt --output sol-2.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hmm_dp::io::requests::{DecodeRequests, ReportPolicy};
use hmm_dp::io::{corpus, matrices, requests};
use hmm_dp::{
    estimate, DecoderBuilder, LogProbability, Model, PathScore, Probability, StartDistribution,
};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "hmm-tool")]
#[command(about = "Supervised HMM training and Viterbi decoding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate A and B from a labeled corpus and save them
    Train {
        /// Corpus file: sequence count, then state/observation line pairs
        #[arg(short, long)]
        corpus: PathBuf,

        /// Where to write the matrices
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode every test case in a request file
    Decode {
        /// Request file: dataset number, case count, then count/observation pairs
        #[arg(short, long)]
        input: PathBuf,

        /// Matrices file; defaults to `sol-1-<dataset>.txt` next to the input
        #[arg(short, long)]
        matrices: Option<PathBuf>,

        /// Where to write one result line per case
        #[arg(short, long, default_value = "sol-2.txt")]
        output: PathBuf,

        /// Decode in log space instead of plain probabilities
        #[arg(long)]
        log_space: bool,

        /// Decode out-of-range observations as zero likelihood instead of dropping them
        #[arg(long)]
        keep_out_of_range: bool,

        /// Report a leading state 0 instead of treating it as a start marker
        #[arg(long)]
        keep_start: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => bail!("unknown log level `{other}`"),
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;

    match cli.command {
        Commands::Train { corpus, output } => train(&corpus, &output),
        Commands::Decode {
            input,
            matrices,
            output,
            log_space,
            keep_out_of_range,
            keep_start,
        } => {
            let policy = ReportPolicy {
                drop_out_of_range: !keep_out_of_range,
                drop_leading_start: !keep_start,
            };
            decode(&input, matrices.as_deref(), &output, log_space, policy)
        }
    }
}

fn train(corpus_path: &Path, output: &Path) -> Result<()> {
    let corpus = corpus::read_corpus(corpus_path)
        .with_context(|| format!("reading corpus {}", corpus_path.display()))?;
    info!(sequences = corpus.len(), "loaded corpus");

    let model = estimate(&corpus);
    info!(states = ?model.states().labels(), "state labels");
    info!(observables = ?model.observables().labels(), "observable labels");
    info!(
        "transition matrix {}x{}, emission matrix {}x{}",
        model.n_states(),
        model.n_states(),
        model.n_states(),
        model.n_observables()
    );
    for s in (0..model.n_states()).filter(|&s| model.is_transition_dead_end(s)) {
        warn!(state = s, "state has no outgoing transitions; its row of A is all zero");
    }

    matrices::save_matrices(&model, output)
        .with_context(|| format!("writing matrices to {}", output.display()))?;
    info!(path = %output.display(), "matrices saved");
    Ok(())
}

fn decode(
    input: &Path,
    matrices_path: Option<&Path>,
    output: &Path,
    log_space: bool,
    policy: ReportPolicy,
) -> Result<()> {
    let batch = requests::read_requests(input)
        .with_context(|| format!("reading requests {}", input.display()))?;
    info!(
        dataset = batch.dataset,
        cases = batch.declared_cases,
        "loaded requests"
    );
    if batch.is_truncated() {
        warn!(
            read = batch.cases.len(),
            declared = batch.declared_cases,
            "request file is missing test cases"
        );
    }

    let matrices_path = match matrices_path {
        Some(p) => p.to_path_buf(),
        None => default_matrices_path(input, batch.dataset),
    };
    let model = matrices::load_matrices(&matrices_path)
        .with_context(|| format!("loading matrices {}", matrices_path.display()))?;
    info!(
        path = %matrices_path.display(),
        states = model.n_states(),
        observables = model.n_observables(),
        "loaded model"
    );

    let lines = if log_space {
        answer::<LogProbability>(&model, &batch, policy)?
    } else {
        answer::<Probability>(&model, &batch, policy)?
    };

    let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
    fs::write(output, text).with_context(|| format!("writing results to {}", output.display()))?;
    for (i, line) in lines.iter().enumerate() {
        info!("test case {}: {}", i + 1, line);
    }
    info!(path = %output.display(), "results written");
    Ok(())
}

fn answer<S: PathScore>(
    model: &Model,
    batch: &DecodeRequests,
    policy: ReportPolicy,
) -> Result<Vec<String>> {
    let decoder = DecoderBuilder::new(model)
        .start(StartDistribution::TransitionRow(0))
        .build::<S>()?;
    Ok(requests::answer_requests(&decoder, batch, policy)?)
}

fn default_matrices_path(input: &Path, dataset: u32) -> PathBuf {
    let name = format!("sol-1-{dataset}.txt");
    match input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
