//! # warden-core
//!
//! Authorization queries over the identity making the current request.
//!
//! This crate provides:
//! - The two boundary traits (`Subject`, `SubjectLookup`)
//! - `AuthorizationQueries`, which answers role, permission and
//!   authentication-state questions through an injected lookup
//! - Two lookups: `FixedSubjectLookup` and the thread-bound
//!   `ThreadSubjectLookup`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warden_core::{AuthorizationQueries, FixedSubjectLookup};
//!
//! let queries = AuthorizationQueries::new(FixedSubjectLookup::new(subject));
//! if queries.has_any_roles(&["admin", "editor"])? {
//!     // ...
//! }
//! ```

pub mod context;
pub mod queries;
pub mod traits;

pub use context::{FixedSubjectLookup, SubjectGuard, ThreadSubjectLookup};
pub use queries::AuthorizationQueries;
pub use traits::{Subject, SubjectLookup};

// ── Tests ─────────────────────────────────────────────────────────────────────
