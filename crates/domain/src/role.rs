// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The role an identity holds in the exit-pass workflow.
///
/// The role set is open: a staff role string the workflow does not know about
/// parses to `Other` and carries no lifecycle permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// A hostel resident who submits pass requests.
    Student,
    /// Hostel porter: forwards requests, records checkout and checkin.
    Porter,
    /// Security staff: same gate duties as a porter.
    Security,
    /// Chief Security Officer.
    Cso,
    /// Delegate of the Chief Security Officer.
    AssistantCso,
    /// Dean of Student Affairs or an equivalent senior authority.
    Dsa,
    /// Any other role name.
    Other(String),
}

impl Role {
    /// Parses a role name, ignoring case and separators.
    ///
    /// Accepts the names used by the staff directory (`porter`, `CSO`,
    /// `Assistant CSO`, `Security`, `DSA`) as well as `student`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "student" => Self::Student,
            "porter" => Self::Porter,
            "security" => Self::Security,
            "cso" => Self::Cso,
            "assistantcso" => Self::AssistantCso,
            "dsa" => Self::Dsa,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    /// Returns the canonical display name of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Student => "student",
            Self::Porter => "porter",
            Self::Security => "security",
            Self::Cso => "CSO",
            Self::AssistantCso => "Assistant CSO",
            Self::Dsa => "DSA",
            Self::Other(name) => name,
        }
    }

    /// Returns true for every role other than `Student`.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        !matches!(self, Self::Student)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
