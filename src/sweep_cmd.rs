//! Sweep command: k-means scores over a range of k.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use morpho_evaluate::{render_sweep_csv, sweep_k, write_sweep_csv};
use morpho_io::read_dataset;

use crate::cli::SweepArgs;
use crate::config::MorphoConfig;
use crate::convert;

/// Cluster the full dataset for every k in the range.
pub fn run(args: SweepArgs, mut config: MorphoConfig) -> Result<()> {
    let _cmd = info_span!("sweep").entered();

    // 1. Merge CLI overrides
    config.apply_common(&args.common);

    // 2. Build configs
    let kind = convert::parse_feature_kind(&args.common.extension)?;
    let preprocessing = convert::parse_preprocessing(&config.run.preprocessing)?;
    let ks = convert::parse_k_range(&args.k_range)?;
    let base = convert::build_kmeans_config(&config.kmeans, *ks.start())?;
    let mut rng = convert::build_rng(config.run.seed);

    // 3. Read and scale features
    let dir = &args.common.dir;
    info!(dir = %dir.display(), %kind, "reading dataset");
    let mut dataset = read_dataset(dir, kind)
        .with_context(|| format!("failed to read {kind} files from {}", dir.display()))?;
    preprocessing
        .apply(dataset.samples_mut())
        .with_context(|| format!("{preprocessing} failed"))?;

    // 4. Sweep
    let points = sweep_k(dataset.samples(), ks, &base, &mut rng).context("k sweep failed")?;

    // 5. Report
    print!("{}", render_sweep_csv(&points));
    if let Some(path) = args.csv {
        write_sweep_csv(&path, &points)
            .with_context(|| format!("failed to write sweep table: {}", path.display()))?;
        info!(path = %path.display(), "sweep table written");
    }

    Ok(())
}
