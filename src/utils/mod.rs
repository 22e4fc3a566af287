pub mod templates;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Levels applied on top of `RUST_LOG` for the workspace crates.
const DEFAULT_DIRECTIVES: [&str; 2] = ["invitation_studio=info", "invitation_core=info"];

/// Initializes the global tracing subscriber; logs go to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        fmt()
            .with_env_filter(default_filter())
            .with_writer(std::io::stderr)
            .init();
    });
}

fn default_filter() -> EnvFilter {
    DEFAULT_DIRECTIVES
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(EnvFilter::from_default_env(), EnvFilter::add_directive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_events_are_enabled_by_default() {
        let rendered = default_filter().to_string();
        for directive in DEFAULT_DIRECTIVES {
            assert!(rendered.contains(directive), "{directive} missing from {rendered}");
        }
    }
}
