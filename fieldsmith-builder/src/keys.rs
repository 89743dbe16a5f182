//! Deterministic identifier derivation.
//!
//! Every entity gets a *raw key* built from its name and the raw key of its
//! parent. The raw key is hashed and truncated so identifiers stay short no
//! matter how deep the declaration nests. A session remembers every issued
//! identifier and refuses to hand out the same one twice.

use std::{collections::HashSet, fmt};

use fieldsmith_core::{Value, sanitize_name};
use sha2::{Digest, Sha256};

use crate::{BuildError, Result};

/// Default number of hex characters kept from the hash.
///
/// Matches the length of the keys the host runtime generates itself.
pub const DEFAULT_KEY_WIDTH: usize = 13;

/// Separator between a parent's raw key and a child's name.
pub const KEY_DELIMITER: &str = "__";

const MAX_KEY_WIDTH: usize = 64;

/// The kind of entity an identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Group,
    Field,
    Layout,
}

impl KeyKind {
    /// The identifier prefix the host runtime expects for this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Group => "group_",
            Self::Field => "field_",
            Self::Layout => "layout_",
        }
    }
}

/// A short, session-unique identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    /// The identifier with its kind prefix, e.g. `field_cfecd52182969`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the identifier as an owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Identifier> for Value {
    fn from(id: Identifier) -> Self {
        Value::Str(id.0)
    }
}

/// Issues identifiers for one build session.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    width: usize,
    issued: HashSet<String>,
}

impl KeyGenerator {
    /// Create a generator with the default hash width.
    pub fn new() -> Self {
        Self::with_width(DEFAULT_KEY_WIDTH)
    }

    /// Create a generator keeping `width` hex characters of each hash (clamped to 1..=64).
    pub fn with_width(width: usize) -> Self {
        Self {
            width: width.clamp(1, MAX_KEY_WIDTH),
            issued: HashSet::new(),
        }
    }

    /// Number of hex characters kept from each hash.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    /// Hash a raw key to its truncated hex digest. Pure.
    pub fn hash(&self, raw_key: &str) -> String {
        let mut digest = hex::encode(Sha256::digest(raw_key.as_bytes()));
        digest.truncate(self.width);
        digest
    }

    /// Issue the identifier for a derived raw key.
    pub fn issue(&mut self, kind: KeyKind, raw_key: &str) -> Result<Identifier> {
        let identifier = format!("{}{}", kind.prefix(), self.hash(raw_key));
        self.claim(identifier, raw_key)
    }

    /// Claim a caller-supplied key verbatim.
    ///
    /// The kind's prefix is added unless the key already carries it.
    pub fn reserve(&mut self, kind: KeyKind, explicit: &str) -> Result<Identifier> {
        let identifier = if explicit.starts_with(kind.prefix()) {
            explicit.to_string()
        } else {
            format!("{}{}", kind.prefix(), explicit)
        };
        self.claim(identifier, explicit)
    }

    /// Resolve an entity's identifier and the raw key its children derive from.
    ///
    /// An explicit key wins over derivation; its raw key is the key without prefix.
    pub fn assign(
        &mut self,
        kind: KeyKind,
        explicit: Option<&str>,
        derive: impl FnOnce() -> String,
    ) -> Result<(Identifier, String)> {
        match explicit {
            Some(explicit) => {
                let identifier = self.reserve(kind, explicit)?;
                let raw_key = identifier
                    .as_str()
                    .strip_prefix(kind.prefix())
                    .unwrap_or(explicit)
                    .to_string();
                Ok((identifier, raw_key))
            }
            None => {
                let raw_key = derive();
                Ok((self.issue(kind, &raw_key)?, raw_key))
            }
        }
    }

    /// Raw key of a field group.
    pub fn group_raw_key(name: &str) -> String {
        sanitize_name(name)
    }

    /// Raw key of a top-level field.
    pub fn field_raw_key(group_raw_key: &str, name: &str) -> String {
        sanitize_name(&format!("{group_raw_key}{KEY_DELIMITER}{name}"))
    }

    /// Raw key of a layout or sub-field under its parent.
    pub fn child_raw_key(parent_raw_key: &str, name: &str) -> String {
        format!("{parent_raw_key}{KEY_DELIMITER}{}", sanitize_name(name))
    }

    fn claim(&mut self, identifier: String, raw_key: &str) -> Result<Identifier> {
        if !self.issued.insert(identifier.clone()) {
            return Err(BuildError::DuplicateIdentifier {
                identifier,
                raw_key: raw_key.to_string(),
            });
        }
        Ok(Identifier(identifier))
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}
