//! Attribute declarations, attribute uses and attribute group definitions
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#cAttribute_Declarations

use crate::namespaces::QName;

use super::{ComponentId, Scope};

/// Attribute declaration component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDeclaration {
    /// Attribute name
    pub name: QName,
    /// Simple type definition
    pub type_definition: Option<ComponentId>,
    /// Global, or local to an enclosing definition
    pub scope: Scope,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl AttributeDeclaration {
    /// Create a new global attribute declaration
    pub fn new(name: QName) -> Self {
        Self {
            name,
            type_definition: None,
            scope: Scope::Global,
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
}

/// Attribute use: binds an attribute declaration into a complex type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeUse {
    /// The declaration being used
    pub attribute_declaration: ComponentId,
    /// Whether `use="required"`
    pub required: bool,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl AttributeUse {
    /// Create an optional attribute use
    pub fn new(attribute_declaration: ComponentId) -> Self {
        Self {
            attribute_declaration,
            required: false,
            annotations: Vec::new(),
        }
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Attribute group definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGroupDefinition {
    /// Group name
    pub name: QName,
    /// Attribute uses
    pub attribute_uses: Vec<ComponentId>,
    /// Attribute wildcard (`xs:anyAttribute`)
    pub attribute_wildcard: Option<ComponentId>,
    /// Attribute groups referenced from this group
    pub attribute_groups: Vec<ComponentId>,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl AttributeGroupDefinition {
    /// Create an empty attribute group
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attribute_uses: Vec::new(),
            attribute_wildcard: None,
            attribute_groups: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Add an attribute use
    pub fn with_attribute_use(mut self, attribute_use: ComponentId) -> Self {
        self.attribute_uses.push(attribute_use);
        self
    }

    /// Set the attribute wildcard
    pub fn with_wildcard(mut self, wildcard: ComponentId) -> Self {
        self.attribute_wildcard = Some(wildcard);
        self
    }

    /// Add a referenced attribute group
    pub fn with_attribute_group(mut self, group: ComponentId) -> Self {
        self.attribute_groups.push(group);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_use() {
        let decl = ComponentId::from_index(0);
        let attr_use = AttributeUse::new(decl).required();
        assert!(attr_use.required);
        assert_eq!(attr_use.attribute_declaration, decl);
    }

    #[test]
    fn test_attribute_group_builder() {
        let group = AttributeGroupDefinition::new(QName::local("common"))
            .with_attribute_use(ComponentId::from_index(1))
            .with_attribute_use(ComponentId::from_index(2))
            .with_wildcard(ComponentId::from_index(3));
        assert_eq!(group.attribute_uses.len(), 2);
        assert_eq!(group.attribute_wildcard, Some(ComponentId::from_index(3)));
    }
}
