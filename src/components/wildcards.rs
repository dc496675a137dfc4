//! Element and attribute wildcards (xs:any, xs:anyAttribute)
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Wildcards

use super::ComponentId;

/// Namespace constraint of a wildcard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamespaceConstraint {
    /// `##any`
    #[default]
    Any,
    /// Any namespace except the listed ones (None = no namespace)
    Not(Vec<Option<String>>),
    /// Only the listed namespaces (None = no namespace)
    Enumeration(Vec<Option<String>>),
}

impl NamespaceConstraint {
    /// Check whether `namespace` is allowed by this constraint
    pub fn allows(&self, namespace: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Not(excluded) => !excluded.iter().any(|ns| ns.as_deref() == namespace),
            Self::Enumeration(allowed) => allowed.iter().any(|ns| ns.as_deref() == namespace),
        }
    }
}

/// processContents mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessContents {
    /// Must validate
    #[default]
    Strict,
    /// Validate if possible
    Lax,
    /// Skip validation
    Skip,
}

/// Wildcard component
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Wildcard {
    /// Namespace constraint
    pub namespace_constraint: NamespaceConstraint,
    /// Process contents mode
    pub process_contents: ProcessContents,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl Wildcard {
    /// Create a `##any` strict wildcard
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace constraint
    pub fn with_namespaces(mut self, constraint: NamespaceConstraint) -> Self {
        self.namespace_constraint = constraint;
        self
    }

    /// Set the process contents mode
    pub fn with_process_contents(mut self, mode: ProcessContents) -> Self {
        self.process_contents = mode;
        self
    }
}
