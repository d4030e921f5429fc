use thiserror::Error;

#[derive(Debug, Error)]
/// Errors from the narrative text-generation collaborator.
///
/// These never escape the analyzer: every variant is absorbed into the
/// heuristic-fallback assessment.
pub enum NarrativeError {
    /// The provider call itself failed (network, auth, timeout, refusal).
    #[error("narrative provider call failed: {message}")]
    ProviderFailed {
        /// Error message.
        message: String,
    },
}
