use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> &'static str {
  if verbose {
    "explorer=debug,warn"
  } else {
    "warn"
  }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init(verbose: bool) {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

  let installed = tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter)
    .try_init();

  if installed.is_err() {
    tracing::debug!("tracing subscriber already installed");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_verbose_enables_debug_for_this_crate() {
    assert_eq!(default_directive(false), "warn");
    assert!(default_directive(true).starts_with("explorer=debug"));
  }
}
