//! Cross-validate command: k folds, one pooled report.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, info_span};

use morpho_evaluate::{
    CrossValidationSummary, KMeansModel, KnnModel, cross_validate, render_report, write_json,
    write_report,
};
use morpho_io::read_dataset;
use morpho_split::shuffle;

use crate::cli::CrossValidateArgs;
use crate::config::{Method, MorphoConfig};
use crate::convert;

/// Run k-fold cross-validation.
pub fn run(args: CrossValidateArgs, mut config: MorphoConfig) -> Result<()> {
    let _cmd = info_span!("cross_validate").entered();

    // 1. Merge CLI overrides
    config.apply_common(&args.common);
    if let Some(folds) = args.folds {
        config.cross_validation.folds = folds;
    }
    if args.no_shuffle {
        config.cross_validation.shuffle = false;
    }
    let json_path = args.json.or(config.report.json);

    // 2. Build configs
    let kind = convert::parse_feature_kind(&args.common.extension)?;
    let preprocessing = convert::parse_preprocessing(&config.run.preprocessing)?;
    let eval_cfg =
        convert::build_cross_validation_config(&config.run, &config.cross_validation)?;
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

    let mut samples = dataset.into_samples();
    if eval_cfg.shuffle_folds() {
        shuffle(&mut samples, &mut rng);
    }

    // 4. Per-fold evaluation
    let folds = eval_cfg.folds();
    let method = config.run.method;
    let matrices = match method {
        Method::Knn => {
            let n_train = samples.len() - samples.len() / folds;
            let knn_cfg = convert::build_knn_config(&config.knn, n_train)?;
            info!(k = knn_cfg.k(), p = knn_cfg.p(), folds, "cross-validating k-NN");
            let mut model = KnnModel::new(knn_cfg, class_count);
            cross_validate(&samples, folds, &mut model)
        }
        Method::KMeans => {
            let kmeans_cfg = convert::build_kmeans_config(&config.kmeans, class_count)?;
            info!(k = kmeans_cfg.k(), p = kmeans_cfg.p(), folds, "cross-validating k-means");
            let mut model = KMeansModel::new(kmeans_cfg, class_count, rng);
            cross_validate(&samples, folds, &mut model)
        }
    }
    .context("cross-validation failed")?;
    let summary = CrossValidationSummary::from_matrices(&matrices)
        .context("failed to summarize folds")?;

    // 5. Report
    for fold in &summary.folds {
        println!(
            "Fold {}: n = {}, Accuracy = {:.2}%, Precision = {:.2}, Recall = {:.2}, F1 Score = {:.2}",
            fold.fold + 1,
            fold.n_test,
            fold.accuracy * 100.0,
            fold.precision,
            fold.recall,
            fold.f1
        );
    }
    println!(
        "Mean: Accuracy = {:.2}%, Precision = {:.2}, Recall = {:.2}, F1 Score = {:.2}\n",
        summary.mean_accuracy * 100.0,
        summary.mean_precision,
        summary.mean_recall,
        summary.mean_f1
    );

    let title = config
        .report
        .title
        .unwrap_or_else(|| format!("{} {kind} {folds}-fold", method.as_str()));
    let text = render_report(&title, Utc::now(), &summary.pooled, None);
    print!("{text}");

    if let Some(path) = config.report.path {
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
