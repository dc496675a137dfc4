//! Simple and complex type definitions
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Complex_Type_Definitions

use std::fmt;

use crate::namespaces::QName;

use super::ComponentId;

/// Variety of a simple type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimpleVariety {
    /// Atomic type
    #[default]
    Atomic,
    /// List type
    List,
    /// Union type
    Union,
}

/// Simple type definition component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTypeDefinition {
    /// Type name (None for anonymous types)
    pub name: Option<QName>,
    /// Atomic, list or union; absent only for `anySimpleType`
    pub variety: Option<SimpleVariety>,
    /// Base type definition
    pub base_type: Option<ComponentId>,
    /// Primitive type of an atomic type
    pub primitive_type: Option<ComponentId>,
    /// Item type of a list type
    pub item_type: Option<ComponentId>,
    /// Member types of a union type
    pub member_types: Vec<ComponentId>,
    /// Constraining facets
    pub facets: Vec<ComponentId>,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl SimpleTypeDefinition {
    /// Create a named atomic type
    pub fn new(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Self::anonymous()
        }
    }

    /// Create an anonymous atomic type
    pub fn anonymous() -> Self {
        Self {
            name: None,
            variety: Some(SimpleVariety::Atomic),
            base_type: None,
            primitive_type: None,
            item_type: None,
            member_types: Vec::new(),
            facets: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Set the base type
    pub fn with_base(mut self, base: ComponentId) -> Self {
        self.base_type = Some(base);
        self
    }

    /// Set the primitive type
    pub fn with_primitive(mut self, primitive: ComponentId) -> Self {
        self.primitive_type = Some(primitive);
        self
    }

    /// Turn into a list type of `item`
    pub fn list_of(mut self, item: ComponentId) -> Self {
        self.variety = Some(SimpleVariety::List);
        self.item_type = Some(item);
        self
    }

    /// Turn into a union of `members`
    pub fn union_of(mut self, members: impl IntoIterator<Item = ComponentId>) -> Self {
        self.variety = Some(SimpleVariety::Union);
        self.member_types = members.into_iter().collect();
        self
    }

    /// Add a constraining facet
    pub fn with_facet(mut self, facet: ComponentId) -> Self {
        self.facets.push(facet);
        self
    }

    /// Check if this is a list type
    pub fn is_list(&self) -> bool {
        self.variety == Some(SimpleVariety::List)
    }

    /// Check if this is a union type
    pub fn is_union(&self) -> bool {
        self.variety == Some(SimpleVariety::Union)
    }

    /// Check if this is an atomic type
    pub fn is_atomic(&self) -> bool {
        self.variety == Some(SimpleVariety::Atomic)
    }
}

/// Derivation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DerivationMethod {
    /// Derived by extension
    Extension,
    /// Derived by restriction
    #[default]
    Restriction,
}

impl fmt::Display for DerivationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extension => write!(f, "extension"),
            Self::Restriction => write!(f, "restriction"),
        }
    }
}

/// Content type of a complex type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// No content
    #[default]
    Empty,
    /// Simple content with its simple type definition
    Simple(ComponentId),
    /// Element-only content with its particle
    ElementOnly(ComponentId),
    /// Mixed content with its particle
    Mixed(ComponentId),
}

impl ContentType {
    /// The content particle, if the content is element-only or mixed
    pub fn particle(&self) -> Option<ComponentId> {
        match self {
            Self::ElementOnly(p) | Self::Mixed(p) => Some(*p),
            _ => None,
        }
    }

    /// The simple type of simple content
    pub fn simple_type(&self) -> Option<ComponentId> {
        match self {
            Self::Simple(t) => Some(*t),
            _ => None,
        }
    }
}

/// Complex type definition component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexTypeDefinition {
    /// Type name (None for anonymous types)
    pub name: Option<QName>,
    /// Base type definition
    pub base_type: Option<ComponentId>,
    /// Derivation method
    pub derivation: DerivationMethod,
    /// Content type
    pub content: ContentType,
    /// Attribute uses
    pub attribute_uses: Vec<ComponentId>,
    /// Attribute wildcard
    pub attribute_wildcard: Option<ComponentId>,
    /// Attribute groups referenced by the definition
    pub attribute_groups: Vec<ComponentId>,
    /// Whether the type is abstract
    pub is_abstract: bool,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl ComplexTypeDefinition {
    /// Create a named complex type with empty content
    pub fn new(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Self::anonymous()
        }
    }

    /// Create an anonymous complex type with empty content
    pub fn anonymous() -> Self {
        Self {
            name: None,
            base_type: None,
            derivation: DerivationMethod::Restriction,
            content: ContentType::Empty,
            attribute_uses: Vec::new(),
            attribute_wildcard: None,
            attribute_groups: Vec::new(),
            is_abstract: false,
            annotations: Vec::new(),
        }
    }

    /// Set the base type and derivation method
    pub fn derived_from(mut self, base: ComponentId, derivation: DerivationMethod) -> Self {
        self.base_type = Some(base);
        self.derivation = derivation;
        self
    }

    /// Set the content type
    pub fn with_content(mut self, content: ContentType) -> Self {
        self.content = content;
        self
    }

    /// Add an attribute use
    pub fn with_attribute_use(mut self, attribute_use: ComponentId) -> Self {
        self.attribute_uses.push(attribute_use);
        self
    }

    /// Set the attribute wildcard
    pub fn with_attribute_wildcard(mut self, wildcard: ComponentId) -> Self {
        self.attribute_wildcard = Some(wildcard);
        self
    }

    /// Add a referenced attribute group
    pub fn with_attribute_group(mut self, group: ComponentId) -> Self {
        self.attribute_groups.push(group);
        self
    }
}
