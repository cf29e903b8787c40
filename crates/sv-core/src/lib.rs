//! sv-core: shared foundation for standview.
//!
//! Contains:
//! - label (the three control-system labels)
//! - time (timestamps, parsing, and the boundary time step)
//! - numeric (null placeholder + display rounding)
//! - error (shared error types)

pub mod error;
pub mod label;
pub mod numeric;
pub mod time;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use label::SystemLabel;
pub use numeric::*;
pub use time::*;
