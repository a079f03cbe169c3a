use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Targets that log at the chosen level when `RUST_LOG` is unset: the library and the binary.
const OWN_TARGETS: [&str; 2] = ["krs_validator", "krs_check"];

fn default_directives(verbose: bool) -> String {
    let (own, others) = if verbose { ("debug", "info") } else { ("info", "warn") };
    let mut directives = vec![others.to_string()];
    directives.extend(OWN_TARGETS.iter().map(|target| format!("{}={}", target, own)));
    directives.join(",")
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Compact human-readable lines. Logs go to stderr so stdout only carries the report.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for runs whose logs are collected by another tool.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(false),
            "warn,krs_validator=info,krs_check=info"
        );
        assert_eq!(
            default_directives(true),
            "info,krs_validator=debug,krs_check=debug"
        );
        assert!(EnvFilter::try_new(default_directives(true)).is_ok());
    }
}
