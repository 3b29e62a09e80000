//! Backend collaborators used by effects
//!
//! Effects never talk to the network themselves; they call one of these
//! traits. A real client (HTTP, mobile bridge, ...) implements them outside
//! this crate. [`InMemoryBackend`] implements all of them and follows the same
//! rules as the server.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐
//! │   Effects   │────▶│  Service traits  │
//! └─────────────┘     └────────┬─────────┘
//!                              │
//!                 ┌────────────┴────────────┐
//!                 │                         │
//!          ┌──────▼──────┐          ┌───────▼───────┐
//!          │ HTTP client │          │InMemoryBackend│
//!          │ (external)  │          │ (tests, demo) │
//!          └─────────────┘          └───────────────┘
//! ```
//!
//! Each trait is declared once as `Local*` and `trait_variant` generates the
//! `Send` variant that effects require.

mod auth_service;
mod avatar_service;
mod hearth_service;
mod memory;

pub use auth_service::{AuthService, LocalAuthService};
pub use avatar_service::{AvatarService, LocalAvatarService};
pub use hearth_service::{HearthService, LocalHearthService};
pub use memory::{InMemoryBackend, DEFAULT_HEARTH_IMAGE, DEFAULT_HEARTH_NAME};
