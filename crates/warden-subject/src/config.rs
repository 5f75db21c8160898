//! Subject fixture schema.
//!
//! A `SubjectConfig` is deserialized from TOML and describes one identity:
//! how it got its principals, which roles and permissions it holds, and
//! whether it is running as somebody else.
//!
//! ```toml
//! state = "authenticated"
//! principals = ["jsmith"]
//! roles = ["admin", "editor"]
//! permissions = ["file:read", "printer:print,query"]
//! run_as = ["jdoe"]
//! ```

use serde::{Deserialize, Serialize};

/// How a subject came by its principals.
///
/// Expressed as a kebab-case string in TOML:
/// ```toml
/// state = "guest"
/// state = "remembered"
/// state = "authenticated"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthenticationState {
    /// No principals at all.
    #[default]
    Guest,
    /// Principals restored by remember-me, without a fresh login.
    Remembered,
    /// Principals established by an explicit login this session.
    Authenticated,
}

/// The top-level structure deserialized from a subject fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectConfig {
    #[serde(default)]
    pub state: AuthenticationState,

    /// The subject's own principals, primary first. Must be empty for a
    /// guest and non-empty otherwise.
    #[serde(default)]
    pub principals: Vec<String>,

    /// Role names held by the subject. Matched exactly.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Permission expressions held by the subject. Matched exactly.
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Principals of an identity the subject is currently running as.
    ///
    /// When present, `principals()` reports these and the subject's own
    /// principals become the previous principals.
    #[serde(default)]
    pub run_as: Option<Vec<String>>,
}
