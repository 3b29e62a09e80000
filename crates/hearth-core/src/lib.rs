//! # hearth-core - Core Domain Types
//!
//! Foundation crate for the hearth state store. Provides domain types, error
//! handling, logging setup and a small ring buffer.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Hearth`], [`HearthUpdates`] - A household and a partial update to it
//! - [`User`], [`Avatar`] - The signed-in profile and selectable avatars
//! - [`Credentials`], [`AuthToken`] - Login input and output
//!
//! ### Error Handling (`error`)
//! - [`ServiceError`] - Backend failure carried as data in failure actions
//! - [`Error`] - Infrastructure error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use hearth_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod ring_buffer;
pub mod types;

/// Prelude for common imports used throughout the hearth crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt, ServiceError};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt, ServiceError};
pub use ring_buffer::RingBuffer;
pub use types::{
    AuthToken, Avatar, Credentials, Hearth, HearthId, HearthUpdates, User, UserId,
};
