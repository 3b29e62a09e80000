//! hearth-store - Client-side state container for the hearth app
//!
//! Unidirectional data flow in the Redux/TEA style:
//!
//! ```text
//! dispatch(Action) ──▶ reducer ──▶ new AppState ──▶ subscribers / selectors
//!        ▲                                   │
//!        └──── outcome Action ◀── effect ◀───┘ (intents only)
//! ```
//!
//! - [`Action`] - closed catalog of everything that can happen
//! - [`reducer`] - pure `(state, action) -> state` per slice
//! - [`selectors`] - memoized projections of the tree
//! - [`effects`] - async reactions that call [`services`] and report back
//! - [`Store`] - owns the tree, serializes dispatch, routes effects

pub mod action;
pub mod config;
pub mod effects;
pub mod reducer;
pub mod selectors;
pub mod services;
pub mod state;
pub mod store;

pub use action::{Action, ActionKind};
pub use config::{load_settings, Settings};
pub use effects::{standard_effects, Effect, EffectFuture};
pub use selectors::{create_selector, Selector};
pub use services::{AuthService, AvatarService, HearthService, InMemoryBackend};
pub use state::{AppState, AuthState, AuthStatus, HearthsState, UserState};
pub use store::{ActionRecord, Selection, Store, SubscriptionId};
