//! Error types for the two fallible collaborators.
//!
//! Both errors are recovered locally: a denied location falls back to a fixed
//! coordinate and a failed geometry fetch falls back to synthetic buildings.

use thiserror::Error;

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PadelError {
    /// Location access was refused or no location service is available.
    #[error("location permission denied")]
    PermissionDenied,

    /// The remote geometry query failed or returned a malformed payload.
    #[error("geometry fetch failed: {0}")]
    DataFetchFailed(String),
}

impl PadelError {
    /// Non-blocking notice shown to the user when this error is recovered.
    pub fn user_notice(&self) -> &'static str {
        match self {
            PadelError::PermissionDenied => {
                "Location permission is required to show your position on the map. Defaulting to Central London."
            }
            PadelError::DataFetchFailed(_) => {
                "Failed to load real data. Showing demo city outline."
            }
        }
    }
}

impl From<serde_json::Error> for PadelError {
    fn from(e: serde_json::Error) -> Self {
        PadelError::DataFetchFailed(format!("malformed payload: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_json_maps_to_fetch_failure() {
        let err: PadelError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, PadelError::DataFetchFailed(_)));
        assert!(err.to_string().starts_with("geometry fetch failed"));
    }

    #[test]
    fn test_notices_differ_per_kind() {
        assert_ne!(
            PadelError::PermissionDenied.user_notice(),
            PadelError::DataFetchFailed(String::new()).user_notice()
        );
    }
}
