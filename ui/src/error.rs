use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while attaching a feature to the live page.
///
/// These only come from the host; the controllers themselves cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("no global `window`")]
    NoWindow,

    #[error("no `document` on window")]
    NoDocument,

    #[error("failed to listen for `{event}`: {reason}")]
    Listen { event: &'static str, reason: String },

    #[error("media query `{query}` unsupported: {reason}")]
    MediaQuery { query: String, reason: String },
}
