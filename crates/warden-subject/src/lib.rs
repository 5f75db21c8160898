//! # warden-subject
//!
//! In-memory subjects for warden, configured in code or from TOML fixtures.
//!
//! ## Overview
//!
//! [`StaticSubject`] implements [`Subject`](warden_core::traits::Subject)
//! over a fixed authentication state, principal list, role set and
//! permission set. Hosts use it for service accounts and previews; tests use
//! it wherever a real security framework would be overkill.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use warden_subject::StaticSubject;
//!
//! let subject = StaticSubject::from_file(Path::new("fixtures/editor.toml"))?;
//! ```

pub mod config;
pub mod subject;

pub use config::{AuthenticationState, SubjectConfig};
pub use subject::StaticSubject;

// ── Tests ─────────────────────────────────────────────────────────────────────
