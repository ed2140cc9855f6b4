//! core::forest
//!
//! Schema forest representation and operations.
//!
//! # Architecture
//!
//! The forest is arena-indexed: every field lives in a flat map keyed by its
//! [`FieldId`], and ordering is carried by id lists (the root list, and one
//! children list per nested field). Mutations edit the arena in place; there
//! is no copy-on-write rebuild.
//!
//! # Invariants
//!
//! - Ids are unique for the lifetime of the forest and never reused
//! - A field has a children list if and only if its kind is `nested`
//! - Every field appears in exactly one sibling list; the forest is acyclic
//! - Sibling insertion order is preserved and is the serialization order
//!
//! Mutating operations validate before touching the arena: an operation
//! either fully applies or returns an error leaving the forest unchanged.

use std::collections::{HashMap, VecDeque};

use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{FieldId, FieldKind, Fingerprint};

/// Errors from forest operations.
///
/// All four mutating operations use this taxonomy uniformly: `NotFound` for a
/// target id absent from the searched scope, `InvalidParent` for a parent
/// argument that does not exist or names a non-nested field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForestError {
    #[error("no field with id {0} in the targeted scope")]
    NotFound(FieldId),

    #[error("field {0} cannot hold children (missing or not nested)")]
    InvalidParent(FieldId),
}

/// A single field in the schema forest.
///
/// Fields are created through [`SchemaForest::add_field`] and only mutated
/// through forest operations, which is what upholds the arena invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    id: FieldId,
    name: String,
    kind: FieldKind,
    /// Present exactly when `kind` is `nested`.
    children: Option<Vec<FieldId>>,
}

impl Field {
    /// The field's unique id.
    pub fn id(&self) -> &FieldId {
        &self.id
    }

    /// The field's display name. Names need not be unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's type tag.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The ordered children ids, if this field is nested.
    pub fn children(&self) -> Option<&[FieldId]> {
        self.children.as_deref()
    }
}

/// An ordered forest of named, typed fields.
///
/// # Example
///
/// ```
/// use trellis::core::forest::SchemaForest;
/// use trellis::core::types::FieldKind;
///
/// // A new forest starts with the default root field
/// let mut forest = SchemaForest::new();
/// let field1 = forest.roots()[0].clone();
/// assert_eq!(forest.get(&field1).unwrap().name(), "field1");
///
/// // Nest a field under it
/// forest.retype_field(&field1, FieldKind::Nested).unwrap();
/// let child = forest.add_field(Some(&field1)).unwrap();
/// forest.rename_field(&child, "street").unwrap();
///
/// let preview = forest.serialize();
/// assert_eq!(preview["field1"]["street"], "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaForest {
    /// All fields, keyed by id.
    nodes: HashMap<FieldId, Field>,
    /// Root-level field ids, in insertion order.
    roots: Vec<FieldId>,
}

impl SchemaForest {
    /// Name given to every newly added field.
    pub const DEFAULT_FIELD_NAME: &'static str = "newField";

    /// Name of the field a new forest is seeded with.
    pub const DEFAULT_ROOT_NAME: &'static str = "field1";

    /// Create a forest with the default seed field (`field1`, a string).
    pub fn new() -> Self {
        let mut forest = Self::empty();
        let id = FieldId::generate();
        forest.nodes.insert(
            id.clone(),
            Field {
                id: id.clone(),
                name: Self::DEFAULT_ROOT_NAME.to_string(),
                kind: FieldKind::String,
                children: None,
            },
        );
        forest.roots.push(id);
        forest
    }

    /// Create a forest with no fields at all.
    pub fn empty() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
        }
    }

    /// Number of fields in the forest, at all depths.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest has no fields.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a field with this id exists anywhere in the forest.
    pub fn contains(&self, id: &FieldId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a field by id, anywhere in the forest.
    pub fn get(&self, id: &FieldId) -> Option<&Field> {
        self.nodes.get(id)
    }

    /// Root-level field ids, in insertion order.
    pub fn roots(&self) -> &[FieldId] {
        &self.roots
    }

    /// Iterate over all fields in arbitrary order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.nodes.values()
    }

    /// Find the parent of a field.
    ///
    /// Returns `None` for root-level fields (and for ids not in the forest).
    pub fn parent_of(&self, id: &FieldId) -> Option<&FieldId> {
        self.nodes
            .values()
            .find(|field| {
                field
                    .children
                    .as_ref()
                    .map_or(false, |children| children.contains(id))
            })
            .map(|field| &field.id)
    }

    /// All descendants of a field (children, grandchildren, etc.),
    /// breadth-first.
    pub fn descendants(&self, id: &FieldId) -> Vec<FieldId> {
        let mut result = Vec::new();
        let mut queue = VecDeque::new();

        if let Some(children) = self.get(id).and_then(Field::children) {
            queue.extend(children.iter().cloned());
        }

        while let Some(current) = queue.pop_front() {
            if let Some(children) = self.get(&current).and_then(Field::children) {
                queue.extend(children.iter().cloned());
            }
            result.push(current);
        }

        result
    }

    /// Walk the whole forest depth-first in sibling insertion order,
    /// yielding each field with its nesting depth (roots are depth 0).
    pub fn depth_first(&self) -> Vec<(usize, &Field)> {
        let mut result = Vec::new();
        self.walk(&self.roots, 0, &mut result);
        result
    }

    fn walk<'a>(&'a self, ids: &'a [FieldId], depth: usize, out: &mut Vec<(usize, &'a Field)>) {
        for field in ids.iter().filter_map(|id| self.nodes.get(id)) {
            out.push((depth, field));
            if let Some(children) = &field.children {
                self.walk(children, depth + 1, out);
            }
        }
    }

    /// Create a new field and append it to a sibling list.
    ///
    /// The field starts as `newField`, a string, with a freshly generated id.
    /// With no `parent` it is appended to the root list; with a `parent` it is
    /// appended to that field's children.
    ///
    /// # Errors
    ///
    /// Returns `ForestError::InvalidParent` if `parent` names a field that
    /// does not exist or is not nested. The forest is unchanged on error.
    pub fn add_field(&mut self, parent: Option<&FieldId>) -> Result<FieldId, ForestError> {
        let id = FieldId::generate();

        match parent {
            Some(parent_id) => {
                let parent_field = self
                    .nodes
                    .get_mut(parent_id)
                    .ok_or_else(|| ForestError::InvalidParent(parent_id.clone()))?;
                let children = parent_field
                    .children
                    .as_mut()
                    .ok_or_else(|| ForestError::InvalidParent(parent_id.clone()))?;
                children.push(id.clone());
            }
            None => self.roots.push(id.clone()),
        }

        self.nodes.insert(
            id.clone(),
            Field {
                id: id.clone(),
                name: Self::DEFAULT_FIELD_NAME.to_string(),
                kind: FieldKind::String,
                children: None,
            },
        );
        Ok(id)
    }

    /// Set a field's name.
    ///
    /// The name is taken verbatim; duplicate names among siblings are
    /// permitted and resolved at serialization time (later wins).
    ///
    /// # Errors
    ///
    /// Returns `ForestError::NotFound` if the id is not in the forest.
    pub fn rename_field(
        &mut self,
        id: &FieldId,
        name: impl Into<String>,
    ) -> Result<(), ForestError> {
        let field = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ForestError::NotFound(id.clone()))?;
        field.name = name.into();
        Ok(())
    }

    /// Change a field's kind.
    ///
    /// Retyping to the kind the field already has is a no-op. Retyping to
    /// `nested` initializes an empty children list. Retyping away from
    /// `nested` destroys the field's entire descendant subtree in the same
    /// operation; the descendants are not recoverable.
    ///
    /// # Errors
    ///
    /// Returns `ForestError::NotFound` if the id is not in the forest.
    pub fn retype_field(&mut self, id: &FieldId, kind: FieldKind) -> Result<(), ForestError> {
        let field = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| ForestError::NotFound(id.clone()))?;
        if field.kind == kind {
            return Ok(());
        }

        let orphaned = field.children.take();
        field.kind = kind;
        if kind.is_nested() {
            field.children = Some(Vec::new());
        }

        if let Some(children) = orphaned {
            for child in children {
                self.remove_subtree(&child);
            }
        }
        Ok(())
    }

    /// Remove a field (and everything beneath it) from a sibling list.
    ///
    /// With no `parent` the field is removed from the root list; with a
    /// `parent` it is removed from that field's children. The parent's kind
    /// and remaining children are untouched: deleting the last child of a
    /// nested field leaves it nested with an empty children list.
    ///
    /// # Errors
    ///
    /// Returns `ForestError::InvalidParent` if `parent` names a field that
    /// does not exist or is not nested, and `ForestError::NotFound` if the id
    /// is not present in the targeted sibling list. The forest is unchanged
    /// on error.
    pub fn delete_field(
        &mut self,
        id: &FieldId,
        parent: Option<&FieldId>,
    ) -> Result<(), ForestError> {
        match parent {
            Some(parent_id) => {
                let parent_field = self
                    .nodes
                    .get_mut(parent_id)
                    .ok_or_else(|| ForestError::InvalidParent(parent_id.clone()))?;
                let children = parent_field
                    .children
                    .as_mut()
                    .ok_or_else(|| ForestError::InvalidParent(parent_id.clone()))?;
                let position = children
                    .iter()
                    .position(|child| child == id)
                    .ok_or_else(|| ForestError::NotFound(id.clone()))?;
                children.remove(position);
            }
            None => {
                let position = self
                    .roots
                    .iter()
                    .position(|root| root == id)
                    .ok_or_else(|| ForestError::NotFound(id.clone()))?;
                self.roots.remove(position);
            }
        }

        self.remove_subtree(id);
        Ok(())
    }

    /// Remove a field and all its descendants from the arena. The sibling
    /// list entry must already be gone.
    fn remove_subtree(&mut self, id: &FieldId) {
        if let Some(field) = self.nodes.remove(id) {
            if let Some(children) = field.children {
                for child in &children {
                    self.remove_subtree(child);
                }
            }
        }
    }

    /// Serialize the forest to a plain key/value structure.
    ///
    /// The walk is depth-first and order-preserving: nested fields become
    /// recursively serialized objects, numbers become `0`, strings become
    /// `""`. When two siblings share a name, the later one in insertion order
    /// overwrites the earlier one's value (the key keeps its first position).
    /// That collision policy is intentional: names are the output keys, and
    /// duplicates are permitted in the forest.
    pub fn serialize(&self) -> Value {
        Value::Object(self.serialize_siblings(&self.roots))
    }

    fn serialize_siblings(&self, ids: &[FieldId]) -> Map<String, Value> {
        let mut object = Map::new();
        for field in ids.iter().filter_map(|id| self.nodes.get(id)) {
            let value = match field.kind {
                FieldKind::Nested => {
                    Value::Object(self.serialize_siblings(field.children.as_deref().unwrap_or(&[])))
                }
                FieldKind::Number => Value::from(0),
                FieldKind::String => Value::from(""),
            };
            object.insert(field.name.clone(), value);
        }
        object
    }

    /// Compute a fingerprint over the forest's structural state.
    ///
    /// The encoding covers names, kinds, and nesting in walk order, but not
    /// ids: two forests that would serialize and display identically get the
    /// same fingerprint, even across processes. Ids are process-local, so
    /// including them would make the fingerprint unreproducible from a
    /// script.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut encoding = Vec::new();
        for (depth, field) in self.depth_first() {
            encoding.extend_from_slice(depth.to_string().as_bytes());
            encoding.push(0);
            encoding.extend_from_slice(field.name.as_bytes());
            encoding.push(0);
            encoding.extend_from_slice(field.kind.as_str().as_bytes());
            encoding.push(b'\n');
        }
        Fingerprint::compute(encoding)
    }
}

impl Default for SchemaForest {
    /// Equivalent to [`SchemaForest::new`]: the documented lifecycle starts
    /// every forest with the `field1` seed field.
    fn default() -> Self {
        Self::new()
    }
}
