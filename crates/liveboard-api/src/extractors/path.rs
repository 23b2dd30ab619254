//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use liveboard_core::Snowflake;
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Extract path parameters, reporting failures as API errors
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(SnowflakePath(inner))
    }
}

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with event_id
#[derive(Debug, serde::Deserialize)]
pub struct EventPath {
    pub event_id: String,
}

impl EventPath {
    /// Parse event_id as Snowflake
    pub fn event_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.event_id, "event_id")
    }
}

/// Path parameters with event_id and record_id
#[derive(Debug, serde::Deserialize)]
pub struct RecordPath {
    pub event_id: String,
    pub record_id: String,
}

impl RecordPath {
    /// Parse event_id as Snowflake
    pub fn event_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.event_id, "event_id")
    }

    /// Parse record_id as Snowflake
    pub fn record_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.record_id, "record_id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_path_parsing() {
        let path = RecordPath {
            event_id: "42".to_string(),
            record_id: "not-a-number".to_string(),
        };
        assert_eq!(path.event_id().unwrap(), Snowflake::new(42));
        assert!(matches!(path.record_id(), Err(ApiError::InvalidPath(_))));
    }
}
