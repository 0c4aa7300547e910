/// Words in an upstream error message that mark a transport failure rather than an API answer.
const NETWORK_VOCABULARY: [&str; 10] = [
    "timeout",
    "connection",
    "refused",
    "unreachable",
    "reset",
    "dns",
    "socket",
    "ssl",
    "certificate",
    "host",
];

/// Classification of a failed player lookup.
///
/// Only `Api` failures are reported as check failures; `Connection` failures are listed as
/// connection issues. Neither ever counts as a not-found strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    /// Transport-level failure (timeout, DNS, TLS, connection reset).
    Connection,
    /// Any other error returned by the upstream API.
    Api,
}

impl FetchFailureKind {
    /// Classify an upstream error message by matching it against network vocabulary.
    ///
    /// Matching is case-insensitive.
    pub fn classify(message: &str) -> Self {
        let message = message.to_lowercase();

        if NETWORK_VOCABULARY
            .iter()
            .any(|word| message.contains(word))
        {
            Self::Connection
        } else {
            Self::Api
        }
    }
}
