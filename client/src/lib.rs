//! Headless client engine for browsing a remote employee directory.
//!
//! The engine keeps a multi-dimensional view state (free-text search, filter
//! dimension, sort column, page number) consistent between user intents, an
//! address-bar-encoded representation, and the remote fetch that state
//! parametrizes. Rendering and the authentication handshake are external
//! collaborators: callers hand in an [`domain::AuthContext`] and consume the
//! ordered records the controller exposes.

pub mod domain;
pub mod outbound;

pub use domain::DashboardController;
