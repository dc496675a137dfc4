//! Identity-constraint definitions (xs:unique, xs:key, xs:keyref)
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#cIdentity-constraint_Definitions

use crate::namespaces::QName;

use super::ComponentId;

/// Type of identity constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityConstraintKind {
    /// xs:unique - values must be unique, but fields can be missing
    Unique,
    /// xs:key - values must be unique AND all fields must be present
    Key,
    /// xs:keyref - references a key or unique constraint
    Keyref,
}

/// Identity-constraint definition component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConstraint {
    /// Constraint name
    pub name: QName,
    /// Kind of constraint
    pub category: IdentityConstraintKind,
    /// XPath of the selector
    pub selector: String,
    /// XPaths of the fields
    pub fields: Vec<String>,
    /// Key or unique constraint referenced by a keyref
    pub referenced_key: Option<ComponentId>,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl IdentityConstraint {
    /// Create a new identity constraint
    pub fn new(name: QName, category: IdentityConstraintKind, selector: impl Into<String>) -> Self {
        Self {
            name,
            category,
            selector: selector.into(),
            fields: Vec::new(),
            referenced_key: None,
            annotations: Vec::new(),
        }
    }

    /// Create a key constraint
    pub fn key(name: QName, selector: impl Into<String>) -> Self {
        Self::new(name, IdentityConstraintKind::Key, selector)
    }

    /// Create a unique constraint
    pub fn unique(name: QName, selector: impl Into<String>) -> Self {
        Self::new(name, IdentityConstraintKind::Unique, selector)
    }

    /// Create a keyref constraint referring to `key`
    pub fn keyref(name: QName, selector: impl Into<String>, key: ComponentId) -> Self {
        let mut constraint = Self::new(name, IdentityConstraintKind::Keyref, selector);
        constraint.referenced_key = Some(key);
        constraint
    }

    /// Add a field XPath
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Check if this is a keyref
    pub fn is_keyref(&self) -> bool {
        self.category == IdentityConstraintKind::Keyref
    }
}
