//! MailChimp bridge server
//!
//! A backend proxy that mirrors MailChimp lists and members into a local
//! SQLite store. CRUD endpoints serve reads from the mirror and forward
//! writes to the MailChimp API, reconciling the remote identifiers that
//! MailChimp assigns.

pub mod api;
pub mod core;
pub mod db;
pub mod mailchimp;
pub mod services;
pub mod utils;

pub use crate::core::{Config, Server, ServerState};
