//! `statuspage-core`: turn a GitHub repository's issues and labels into a
//! static status page published on its `gh-pages` branch.
//!
//! Labels coloured `171717` name systems; three fixed colours name
//! severities. Open issues carrying both set the status of their systems,
//! and every qualifying issue becomes an incident on the page.

pub mod assets;
pub mod config;
pub mod error;
pub mod github;
pub mod incident;
pub mod label;
pub mod models;
pub mod page;
pub mod publish;
pub mod render;
pub mod repo;
pub mod status;
pub mod types;

pub use error::{Result, StatusPageError};
