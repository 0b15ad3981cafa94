//! Client library for the JobFinder job-board backend.
//!
//! The pieces mirror the layering of the product: an HTTP adapter
//! ([`api::ApiClient`]) that attaches bearer tokens and runs the single
//! refresh-and-retry cycle, a file-backed [`session::SessionStore`] holding
//! the token pair across invocations, an [`auth::AuthContext`] owning the
//! session lifecycle, and per-screen [`views`] that fetch through the
//! [`api::JobBoard`] port and render text.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod session;
pub mod types;
pub mod utils;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, JobBoard};
pub use auth::{AuthContext, AuthSnapshot};
pub use config::ClientConfig;
pub use error::ApiError;
pub use session::{Session, SessionStore};
