//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`FieldId`] - Opaque unique field identifier
//! - [`FieldKind`] - Type tag of a field (string, number, nested)
//! - [`Fingerprint`] - Structural hash of a forest for change detection
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs. Field *names*
//! are deliberately not a validated type: the editor accepts names verbatim,
//! duplicates included, and reflects them in the serialized preview.
//!
//! # Examples
//!
//! ```
//! use trellis::core::types::{FieldId, FieldKind};
//!
//! // Ids are generated, never constructed from arbitrary strings
//! let id = FieldId::generate();
//! assert_eq!(id.as_str().len(), 36);
//!
//! // Round-tripping a displayed id is allowed
//! let same = FieldId::parse(id.as_str()).unwrap();
//! assert_eq!(id, same);
//!
//! // Kinds form a closed set
//! assert_eq!("nested".parse::<FieldKind>().unwrap(), FieldKind::Nested);
//! assert!("boolean".parse::<FieldKind>().is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid field id: {0}")]
    InvalidFieldId(String),

    #[error("invalid field kind '{0}', must be one of: string, number, nested")]
    InvalidKind(String),
}

/// An opaque unique field identifier.
///
/// Ids are assigned when a field is created, are immutable, and are never
/// reused for the lifetime of a forest. They are backed by v4 UUIDs and
/// normalized to the lowercase hyphenated form.
///
/// # Example
///
/// ```
/// use trellis::core::types::FieldId;
///
/// let id = FieldId::generate();
///
/// // Abbreviated form for display
/// assert_eq!(id.short(8).len(), 8);
///
/// // Parsing accepts any case, normalizes to lowercase
/// let parsed = FieldId::parse(&id.as_str().to_uppercase()).unwrap();
/// assert_eq!(parsed, id);
///
/// // Arbitrary strings are rejected
/// assert!(FieldId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldId(String);

impl FieldId {
    /// Generate a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an id from its displayed form.
    ///
    /// The id is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidFieldId` if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let uuid =
            Uuid::parse_str(s).map_err(|_| TypeError::InvalidFieldId(s.to_string()))?;
        Ok(Self(uuid.to_string()))
    }

    /// Get an abbreviated form of the id.
    ///
    /// Returns the first `len` characters. If `len` exceeds the id length,
    /// returns the full id.
    ///
    /// # Example
    ///
    /// ```
    /// use trellis::core::types::FieldId;
    ///
    /// let id = FieldId::parse("3f2a91c4-0000-4000-8000-000000000000").unwrap();
    /// assert_eq!(id.short(8), "3f2a91c4");
    /// ```
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FieldId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FieldId> for String {
    fn from(id: FieldId) -> Self {
        id.0
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The type tag of a field.
///
/// This is a closed set: a field is a string, a number, or a nested
/// container of further fields. Only `Nested` fields own children.
///
/// # Example
///
/// ```
/// use trellis::core::types::FieldKind;
///
/// assert_eq!(FieldKind::String.to_string(), "string");
/// assert_eq!("Number".parse::<FieldKind>().unwrap(), FieldKind::Number);
/// assert!(FieldKind::Nested.is_nested());
/// assert!(!FieldKind::String.is_nested());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Scalar string field; serializes as `""`
    String,
    /// Scalar numeric field; serializes as `0`
    Number,
    /// Container field; owns an ordered children list
    Nested,
}

impl FieldKind {
    /// Kind names accepted by [`FromStr`](std::str::FromStr).
    pub const VALID_KINDS: &'static [&'static str] = &["string", "number", "nested"];

    /// Whether fields of this kind own a children list.
    pub fn is_nested(self) -> bool {
        matches!(self, FieldKind::Nested)
    }

    /// Get the kind name as a string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Nested => "nested",
        }
    }
}

impl std::str::FromStr for FieldKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(FieldKind::String),
            "number" => Ok(FieldKind::Number),
            "nested" => Ok(FieldKind::Nested),
            _ => Err(TypeError::InvalidKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stable hash over a forest's structural state.
///
/// Two forests with identical structure (names, kinds, and nesting, in
/// order) produce identical fingerprints. The forest feeds its canonical
/// byte encoding through [`Fingerprint::compute`]; the walk order is part of
/// the structure, so the encoding is not sorted.
///
/// # Example
///
/// ```
/// use trellis::core::types::Fingerprint;
///
/// let fp1 = Fingerprint::compute(b"field1\x00string\n");
/// let fp2 = Fingerprint::compute(b"field1\x00string\n");
/// assert_eq!(fp1, fp2);
///
/// let other = Fingerprint::compute(b"field1\x00number\n");
/// assert_ne!(fp1, other);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint over a canonical byte encoding.
    pub fn compute(data: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data.as_ref());
        let result = hasher.finalize();
        Self(hex::encode(result))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
