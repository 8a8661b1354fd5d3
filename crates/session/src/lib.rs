//! `figforge-session` — host boundary and session-scoped orchestration.
//!
//! The host runtime delivers a catalog snapshot and a display name; this
//! crate owns the single-writer pipeline that turns user taps into outfit
//! events and serves the derived look from a read-model snapshot.

pub mod controller;
pub mod projection;
pub mod providers;

pub use controller::{CustomizerSession, DEFAULT_DISPLAY_NAME, SessionError};
pub use projection::{ProjectionError, SelectionProjection};
pub use providers::{
    CatalogError, CatalogProvider, IdentityProvider, InMemoryCatalogProvider, StaticIdentity,
    UnavailableCatalog,
};
