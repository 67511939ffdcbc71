//! Run command: one shuffle-split, one model, one report.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, info_span};

use morpho_evaluate::{
    RunSummary, render_clusters, render_report, run_kmeans, run_knn, write_json, write_report,
};
use morpho_io::read_dataset;

use crate::cli::RunArgs;
use crate::config::{Method, MorphoConfig};
use crate::convert;

/// Run the single-pass classification pipeline.
pub fn run(args: RunArgs, mut config: MorphoConfig) -> Result<()> {
    let _cmd = info_span!("run").entered();

    // 1. Merge CLI overrides
    config.apply_common(&args.common);
    if let Some(fraction) = args.fraction {
        config.run.training_fraction = fraction;
    }
    let report_path = args.report.or(config.report.path);
    let json_path = args.json.or(config.report.json);

    // 2. Build configs
    let kind = convert::parse_feature_kind(&args.common.extension)?;
    let preprocessing = convert::parse_preprocessing(&config.run.preprocessing)?;
    let eval_cfg = convert::build_evaluate_config(&config.run)?;
    let mut rng = convert::build_rng(config.run.seed);

    // 3. Read and scale features
    let dir = &args.common.dir;
    info!(dir = %dir.display(), %kind, "reading dataset");
    let mut dataset = read_dataset(dir, kind)
        .with_context(|| format!("failed to read {kind} files from {}", dir.display()))?;
    preprocessing
        .apply(dataset.samples_mut())
        .with_context(|| format!("{preprocessing} failed"))?;

    let class_count = eval_cfg.resolve_class_count(dataset.class_count());
    let method = config.run.method;
    let title = args
        .title
        .or(config.report.title)
        .unwrap_or_else(|| format!("{} {kind}", method.as_str()));
    let generated = Utc::now();

    // 4. Train, predict, tally
    let (text, summary) = match method {
        Method::Knn => {
            let n_train =
                (dataset.len() as f64 * eval_cfg.training_fraction()).floor() as usize;
            let knn_cfg = convert::build_knn_config(&config.knn, n_train)?;
            info!(k = knn_cfg.k(), p = knn_cfg.p(), class_count, "running k-NN");
            let outcome =
                run_knn(&dataset, &eval_cfg, &knn_cfg, &mut rng).context("k-NN run failed")?;
            (
                render_report(&title, generated, &outcome.confusion, None),
                RunSummary::from_knn(&title, generated, &outcome),
            )
        }
        Method::KMeans => {
            let kmeans_cfg = convert::build_kmeans_config(&config.kmeans, class_count)?;
            info!(k = kmeans_cfg.k(), p = kmeans_cfg.p(), class_count, "running k-means");
            let outcome = run_kmeans(&dataset, &eval_cfg, &kmeans_cfg, &mut rng)
                .context("k-means run failed")?;
            let mut text =
                render_report(&title, generated, &outcome.confusion, Some(&outcome.scores));
            text.push_str(&render_clusters(&outcome.clusters));
            (text, RunSummary::from_kmeans(&title, generated, &outcome))
        }
    };

    // 5. Report
    print!("{text}");
    if let Some(path) = report_path {
        write_report(&path, &text)
            .with_context(|| format!("failed to write report: {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    if let Some(path) = json_path {
        write_json(&path, &summary)
            .with_context(|| format!("failed to write JSON summary: {}", path.display()))?;
        info!(path = %path.display(), "JSON summary written");
    }

    Ok(())
}
