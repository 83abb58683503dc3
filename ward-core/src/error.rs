use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream is rate limited or returned a non-JSON body. The audit
    /// route answers this with its fixed fallback payload instead of an
    /// error status.
    #[error("upstream degraded: {0}")]
    Degraded(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
}
