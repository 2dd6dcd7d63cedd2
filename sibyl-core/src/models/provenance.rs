use serde::{Deserialize, Serialize};

/// Why a provider engine degraded to its local fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum FallbackReason {
    /// No credential was configured, so the remote path was never tried.
    NoCredential,
    /// The remote call was attempted and failed.
    ProviderError(String),
    /// Generation was asked to answer with no context passages.
    EmptyContext,
}

/// Tagged degradation mode of a provider result.
///
/// Modeled as data rather than a thrown-and-caught exception so callers and
/// tests can assert on the mode directly. This is the only retained signal
/// that the system is operating degraded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Provenance {
    /// The remote provider produced this result.
    Live { model: String },
    /// A deterministic local fallback produced this result.
    Fallback { model: String, reason: FallbackReason },
}

impl Provenance {
    /// Whether this result came from a fallback path.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The model identifier that produced the result.
    pub fn model(&self) -> &str {
        match self {
            Self::Live { model } => model,
            Self::Fallback { model, .. } => model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_tagged() {
        let p = Provenance::Fallback {
            model: "fallback-local".to_string(),
            reason: FallbackReason::NoCredential,
        };
        assert!(p.is_fallback());
        assert_eq!(p.model(), "fallback-local");
    }

    #[test]
    fn live_is_not_fallback() {
        let p = Provenance::Live {
            model: "text-embedding-3-small".to_string(),
        };
        assert!(!p.is_fallback());
    }

    #[test]
    fn reason_serializes_with_detail() {
        let r = FallbackReason::ProviderError("HTTP 503".to_string());
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("provider_error"));
        assert!(json.contains("HTTP 503"));
    }
}
