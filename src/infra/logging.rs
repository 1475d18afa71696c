//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Installs a formatting subscriber filtered by `RUST_LOG`.
/// Calling it again (e.g. from tests) is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_valid_and_quiets_sqlx() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        let rendered = filter.to_string().to_lowercase();
        assert!(rendered.contains("sqlx=warn"));
        assert!(rendered.contains("tower_http=info"));
    }
}
