//! Shared application service layer for standview.
//!
//! This crate sits between the stand's external services (broker,
//! time-series store, identity provider) and any front end. Collaborators
//! are reached through the traits in [`source`]; the services turn their
//! raw answers into the shapes the dashboard plots.

pub mod command;
pub mod config_service;
pub mod current_service;
pub mod dump_source;
pub mod error;
pub mod history_service;
pub mod source;
pub mod switch_service;
pub mod token;

// Re-export key types for convenience
pub use command::{ActuatorCommand, SwitchLock, send_command};
pub use config_service::{load_config, validate_config};
pub use current_service::{active_system, current_values, relay_readout};
pub use dump_source::{HistoryDump, RelayDump};
pub use error::{AppError, AppResult, SourceError};
pub use history_service::{FetchStatus, ParamHistory, fetch_history};
pub use source::{CommandSink, EntitySource, HistoryQuery, HistorySource, IssuedToken, TokenProvider};
pub use switch_service::{SwitchHistory, switch_history, switch_history_from};
pub use token::{TokenCache, with_token_retry};
