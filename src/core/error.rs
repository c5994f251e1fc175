use thiserror::Error;

/// The one way a storage operation fails: the underlying capability
/// rejected it. Carries the backend identity so the panel can log which
/// list went stale.
#[derive(Debug, Error)]
#[error("storage backend `{backend}` unavailable")]
pub struct BackendUnavailable {
    backend: &'static str,
    #[source]
    source: anyhow::Error,
}

impl BackendUnavailable {
    pub fn new(backend: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self {
            backend,
            source: source.into(),
        }
    }

    /// Identity of the backend that rejected the operation.
    pub fn backend(&self) -> &'static str {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_backend_identity_and_source() {
        let err = BackendUnavailable::new("kv-local", anyhow::anyhow!("disk on fire"));
        assert_eq!(err.backend(), "kv-local");
        assert_eq!(err.to_string(), "storage backend `kv-local` unavailable");

        let source = std::error::Error::source(&err).expect("source is attached");
        assert_eq!(source.to_string(), "disk on fire");
    }
}
