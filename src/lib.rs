//! Library forms
//!
//! Duplicate validation and save gating for the book and member forms of
//! the library management system. Each form checks its identifying fields
//! against the server's duplicate endpoints while the user types, and keeps
//! the save button disabled while any field is a known duplicate.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod view;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::{FormController, Services};
