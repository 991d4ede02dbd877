// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity lookup.
//!
//! The service never verifies credentials. It receives an actor id from the
//! caller's session and asks an [`IdentityProvider`] for the role and hostel
//! behind it.

use exit_pass_domain::{ActorId, ActorIdentity, DomainError, HostelId, Role};
use serde::Deserialize;
use std::collections::HashMap;

/// Resolves actor ids to identities.
pub trait IdentityProvider: Send + Sync {
    /// Returns the identity for `actor_id`, or `None` if it is unknown.
    fn resolve(&self, actor_id: &str) -> Option<ActorIdentity>;
}

/// One user record as found in a directory file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryEntry {
    /// The user's id.
    pub id: String,
    /// The user's role name, as stored in the user directory.
    pub role: String,
    /// The hostel the user belongs to, if any.
    #[serde(default)]
    pub hostel: Option<String>,
}

impl DirectoryEntry {
    /// Converts the entry into an identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyIdentifier` if the id is blank.
    pub fn to_identity(&self) -> Result<ActorIdentity, DomainError> {
        let id: ActorId = ActorId::new(&self.id)?;
        let hostel_id: Option<HostelId> = self
            .hostel
            .as_deref()
            .map(str::trim)
            .filter(|hostel| !hostel.is_empty())
            .map(HostelId::new);
        Ok(ActorIdentity::new(id, Role::parse(&self.role), hostel_id))
    }
}

/// A fixed, in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    identities: HashMap<String, ActorIdentity>,
}

impl StaticDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a directory from directory-file entries.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry has a blank id.
    pub fn from_entries(entries: &[DirectoryEntry]) -> Result<Self, DomainError> {
        let mut directory: Self = Self::new();
        for entry in entries {
            directory.insert(entry.to_identity()?);
        }
        Ok(directory)
    }

    /// Adds or replaces an identity.
    pub fn insert(&mut self, identity: ActorIdentity) {
        self.identities
            .insert(identity.id.value().to_string(), identity);
    }

    /// Adds an identity, builder style.
    #[must_use]
    pub fn with(mut self, identity: ActorIdentity) -> Self {
        self.insert(identity);
        self
    }

    /// Returns the number of known identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Returns true if the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl IdentityProvider for StaticDirectory {
    fn resolve(&self, actor_id: &str) -> Option<ActorIdentity> {
        self.identities.get(actor_id.trim()).cloned()
    }
}
