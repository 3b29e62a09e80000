//! Hearth State
//!
//! Client-side state store for the hearth app: typed actions, pure reducers,
//! memoized selectors and async effects around one [`Store`].
//!
//! This crate re-exports the workspace crates and hosts the headless runner.

pub mod headless;

pub use hearth_core as core;
pub use hearth_store as store;

pub use hearth_core::{Error, Result, ServiceError};
pub use hearth_store::{
    standard_effects, Action, ActionKind, AppState, InMemoryBackend, Selection, Selector,
    Settings, Store,
};
pub use headless::run_headless;
