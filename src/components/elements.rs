//! Element declarations
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#cElement_Declarations

use crate::namespaces::QName;

use super::{ComponentId, Scope};

/// Element declaration component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDeclaration {
    /// Element name
    pub name: QName,
    /// Type definition (named or anonymous)
    pub type_definition: Option<ComponentId>,
    /// Global, or local to an enclosing definition
    pub scope: Scope,
    /// Heads of the substitution groups this element belongs to
    pub substitution_group_affiliations: Vec<ComponentId>,
    /// Identity constraints declared on this element
    pub identity_constraints: Vec<ComponentId>,
    /// Whether the element is nillable
    pub nillable: bool,
    /// Whether the element is abstract
    pub is_abstract: bool,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl ElementDeclaration {
    /// Create a new global element declaration
    pub fn new(name: QName) -> Self {
        Self {
            name,
            type_definition: None,
            scope: Scope::Global,
            substitution_group_affiliations: Vec::new(),
            identity_constraints: Vec::new(),
            nillable: false,
            is_abstract: false,
            annotations: Vec::new(),
        }
    }

    /// Set the type definition
    pub fn with_type(mut self, type_definition: ComponentId) -> Self {
        self.type_definition = Some(type_definition);
        self
    }

    /// Make this a local declaration inside `parent`
    pub fn local_to(mut self, parent: ComponentId) -> Self {
        self.scope = Scope::Local(Some(parent));
        self
    }

    /// Add a substitution group head
    pub fn with_substitution_group(mut self, head: ComponentId) -> Self {
        self.substitution_group_affiliations.push(head);
        self
    }

    /// Add an identity constraint
    pub fn with_identity_constraint(mut self, constraint: ComponentId) -> Self {
        self.identity_constraints.push(constraint);
        self
    }

    /// Mark as abstract
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Mark as nillable
    pub fn with_nillable(mut self, nillable: bool) -> Self {
        self.nillable = nillable;
        self
    }

    /// The enclosing definition of a local declaration
    pub fn enclosing_definition(&self) -> Option<ComponentId> {
        self.scope.parent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let ty = ComponentId::from_index(1);
        let parent = ComponentId::from_index(2);
        let elem = ElementDeclaration::new(QName::local("street"))
            .with_type(ty)
            .local_to(parent)
            .with_nillable(true);

        assert_eq!(elem.type_definition, Some(ty));
        assert!(!elem.scope.is_global());
        assert_eq!(elem.enclosing_definition(), Some(parent));
        assert!(elem.nillable);
        assert!(!elem.is_abstract);
    }
}
