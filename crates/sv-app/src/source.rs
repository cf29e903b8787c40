//! Seams to the stand's external services.
//!
//! Implementations own transport, retries and timeouts. All sources are
//! shared across worker threads, hence the `Send + Sync` bounds.

use serde_json::Value;
use sv_core::Timestamp;
use sv_series::Signal;

use crate::command::ActuatorCommand;
use crate::error::SourceError;

/// One attribute history request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub service_path: String,
    pub entity_id: String,
    pub attribute: String,
    pub from: Timestamp,
}

/// Time-series store.
pub trait HistorySource: Send + Sync {
    fn fetch(&self, query: &HistoryQuery) -> Result<Signal, SourceError>;
}

/// Context broker reads.
pub trait EntitySource: Send + Sync {
    /// All entities under `service_path` in key-value form (`{"id": ..., attr: value}`).
    fn list_entities(&self, service_path: &str) -> Result<Vec<Value>, SourceError>;

    /// Attributes of one entity, as `{attr: value}` or `{attr: {"value": value}}`.
    fn entity_attributes(
        &self,
        entity_id: &str,
        entity_type: &str,
        service_path: &str,
    ) -> Result<Value, SourceError>;
}

/// Context broker writes.
pub trait CommandSink: Send + Sync {
    fn post_command(&self, command: &ActuatorCommand) -> Result<(), SourceError>;
}

/// Token issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in_s: i64,
}

/// Identity provider.
pub trait TokenProvider {
    fn fetch_token(&self) -> Result<IssuedToken, SourceError>;
}
