//! Logging setup

use crate::cli::GlobalOptions;
use tracing_subscriber::EnvFilter;

/// Logging settings taken from the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    pub verbose: bool,
}

impl LogConfig {
    pub fn from_options(options: &GlobalOptions) -> Self {
        Self {
            verbose: options.verbose,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

/// Install the global subscriber. Output goes to stderr so stdout stays
/// clean for command results.
pub fn init(config: LogConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug() {
        let options = GlobalOptions {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(LogConfig::from_options(&options).default_directive(), "debug");
        assert_eq!(LogConfig::default().default_directive(), "info");
    }
}
