use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Method;

/// Morpho shape-descriptor classifier.
#[derive(Parser)]
#[command(
    name = "morpho",
    version,
    about = "Classify shape-descriptor feature files with k-NN or k-means"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to an optional TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Shuffle-split the dataset once, train, and report on the test side.
    Run(RunArgs),
    /// k-fold cross-validation.
    CrossValidate(CrossValidateArgs),
    /// Cluster the whole dataset for each k in a range and tabulate the scores.
    Sweep(SweepArgs),
}

/// Arguments shared by every subcommand.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Directory containing the feature files.
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Feature file extension: .E34, .F0, .GFD or .SA.
    #[arg(short, long)]
    pub extension: String,

    /// Classification method.
    #[arg(short, long, value_enum)]
    pub method: Option<Method>,

    /// Number of neighbours (k-NN) or clusters (k-means).
    #[arg(short)]
    pub k: Option<usize>,

    /// Minkowski order of the distance.
    #[arg(short)]
    pub p: Option<f64>,

    /// Feature scaling: none, normalize or standardize.
    #[arg(long)]
    pub preprocessing: Option<String>,

    /// RNG seed; drawn from the OS when unset.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Confusion-matrix width; defaults to the largest class label seen.
    #[arg(long)]
    pub classes: Option<usize>,

    /// k-means iteration cap.
    #[arg(long = "max-iterations")]
    pub max_iterations: Option<usize>,
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Fraction of samples used for training.
    #[arg(short, long)]
    pub fraction: Option<f64>,

    /// Experiment title for the report.
    #[arg(short, long)]
    pub title: Option<String>,

    /// Write the text report to this path.
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Write the JSON summary to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Arguments for the `cross-validate` subcommand.
#[derive(clap::Args)]
pub struct CrossValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of folds.
    #[arg(long)]
    pub folds: Option<usize>,

    /// Keep file-name order instead of shuffling before folding.
    #[arg(long = "no-shuffle")]
    pub no_shuffle: bool,

    /// Write the JSON summary to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Arguments for the `sweep` subcommand.
#[derive(clap::Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Inclusive cluster-count range, as `MIN-MAX` or a single `K`.
    #[arg(long = "k-range")]
    pub k_range: String,

    /// Write the `k,Silhouette Score,WCSS,BCSS` table to this path.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
