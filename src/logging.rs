use tracing_subscriber::EnvFilter;

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &[
    "morpho",
    "morpho_data",
    "morpho_evaluate",
    "morpho_io",
    "morpho_kmeans",
    "morpho_knn",
    "morpho_preprocess",
    "morpho_split",
    "morpho_stats",
];

/// Level name for a `-v` count: none warn, `-v` info, `-vv` debug, more trace.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Default filter directive covering every workspace crate at one level.
fn default_directive(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing from the CLI verbosity; `RUST_LOG` wins when set.
///
/// Logs go to stderr so that reports printed on stdout stay clean.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn test_directive_names_every_crate() {
        let directive = default_directive(1);
        assert!(directive.starts_with("morpho=info,"));
        assert_eq!(directive.split(',').count(), CRATE_TARGETS.len());
        assert!(directive.contains("morpho_kmeans=info"));
    }
}
