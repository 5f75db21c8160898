//! The expression-language function table.
//!
//! Templates refer to authorization functions by camelCase name. `FunctionName`
//! is the closed set of those names and knows which ones take an argument.

use std::fmt;
use std::str::FromStr;

use warden_contracts::error::WardenError;

/// One of the fourteen authorization functions exposed to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    HasAllRoles,
    HasAnyRoles,
    HasRole,
    IsAuthenticated,
    IsGuest,
    IsPermitted,
    IsPermittedAll,
    IsPermittedAny,
    IsRemembered,
    IsRunAs,
    IsUser,
    LacksPermission,
    LacksRole,
    NotAuthenticated,
}

impl FunctionName {
    /// Every function, in alphabetical order of its expression name.
    pub const ALL: [FunctionName; 14] = [
        FunctionName::HasAllRoles,
        FunctionName::HasAnyRoles,
        FunctionName::HasRole,
        FunctionName::IsAuthenticated,
        FunctionName::IsGuest,
        FunctionName::IsPermitted,
        FunctionName::IsPermittedAll,
        FunctionName::IsPermittedAny,
        FunctionName::IsRemembered,
        FunctionName::IsRunAs,
        FunctionName::IsUser,
        FunctionName::LacksPermission,
        FunctionName::LacksRole,
        FunctionName::NotAuthenticated,
    ];

    /// The name templates use for this function.
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionName::HasAllRoles => "hasAllRoles",
            FunctionName::HasAnyRoles => "hasAnyRoles",
            FunctionName::HasRole => "hasRole",
            FunctionName::IsAuthenticated => "isAuthenticated",
            FunctionName::IsGuest => "isGuest",
            FunctionName::IsPermitted => "isPermitted",
            FunctionName::IsPermittedAll => "isPermittedAll",
            FunctionName::IsPermittedAny => "isPermittedAny",
            FunctionName::IsRemembered => "isRemembered",
            FunctionName::IsRunAs => "isRunAs",
            FunctionName::IsUser => "isUser",
            FunctionName::LacksPermission => "lacksPermission",
            FunctionName::LacksRole => "lacksRole",
            FunctionName::NotAuthenticated => "notAuthenticated",
        }
    }

    /// True for functions that take a role name or permission argument.
    pub fn takes_argument(self) -> bool {
        self.takes_list()
            || matches!(
                self,
                FunctionName::HasRole
                    | FunctionName::IsPermitted
                    | FunctionName::LacksPermission
                    | FunctionName::LacksRole
            )
    }

    /// True for functions whose argument is a list of tokens.
    pub fn takes_list(self) -> bool {
        matches!(
            self,
            FunctionName::HasAllRoles
                | FunctionName::HasAnyRoles
                | FunctionName::IsPermittedAll
                | FunctionName::IsPermittedAny
        )
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionName {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionName::ALL
            .into_iter()
            .find(|function| function.as_str() == s)
            .ok_or_else(|| WardenError::UnknownFunction { name: s.to_string() })
    }
}
