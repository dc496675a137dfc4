//! Compiled schema component graph
//!
//! Components live in an arena owned by [`SchemaGraph`] and refer to each
//! other through copyable [`ComponentId`]s, so cyclic structures (recursive
//! content models, `anyType` being its own base) need no shared ownership.
//! Component identity is the id, never the name.
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#components

use std::fmt;

use crate::namespaces::QName;

pub mod attributes;
pub mod builtins;
pub mod elements;
pub mod facets;
pub mod graph;
pub mod groups;
pub mod identities;
pub mod types;
pub mod wildcards;

pub use attributes::{AttributeDeclaration, AttributeGroupDefinition, AttributeUse};
pub use elements::ElementDeclaration;
pub use facets::{Facet, FacetKind};
pub use graph::{GlobalKind, GlobalMaps, SchemaGraph};
pub use groups::{Compositor, ModelGroup, ModelGroupDefinition, Occurs, Particle};
pub use identities::{IdentityConstraint, IdentityConstraintKind};
pub use types::{
    ComplexTypeDefinition, ContentType, DerivationMethod, SimpleTypeDefinition, SimpleVariety,
};
pub use wildcards::{NamespaceConstraint, ProcessContents, Wildcard};

/// Identity of a component inside one [`SchemaGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u32);

impl ComponentId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Arena index of this component
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a declaration is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Top-level declaration
    #[default]
    Global,
    /// Declared inside a complex type, attribute group or model group definition
    Local(Option<ComponentId>),
}

impl Scope {
    /// Check if this is the global scope
    pub fn is_global(&self) -> bool {
        matches!(self, Scope::Global)
    }

    /// The enclosing component of a local declaration
    pub fn parent(&self) -> Option<ComponentId> {
        match self {
            Scope::Global => None,
            Scope::Local(parent) => *parent,
        }
    }
}

/// Kind discriminant of a [`Component`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Element declaration
    Element,
    /// Attribute declaration
    Attribute,
    /// Simple type definition
    SimpleType,
    /// Complex type definition
    ComplexType,
    /// Attribute use
    AttributeUse,
    /// Attribute group definition
    AttributeGroup,
    /// Model group (sequence, choice, all)
    ModelGroup,
    /// Named model group definition
    ModelGroupDefinition,
    /// Particle
    Particle,
    /// Element or attribute wildcard
    Wildcard,
    /// Identity constraint definition
    IdentityConstraint,
    /// Notation declaration
    Notation,
    /// Constraining facet
    Facet,
    /// Annotation
    Annotation,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Element => "element declaration",
            Self::Attribute => "attribute declaration",
            Self::SimpleType => "simple type definition",
            Self::ComplexType => "complex type definition",
            Self::AttributeUse => "attribute use",
            Self::AttributeGroup => "attribute group definition",
            Self::ModelGroup => "model group",
            Self::ModelGroupDefinition => "model group definition",
            Self::Particle => "particle",
            Self::Wildcard => "wildcard",
            Self::IdentityConstraint => "identity-constraint definition",
            Self::Notation => "notation declaration",
            Self::Facet => "facet",
            Self::Annotation => "annotation",
        };
        write!(f, "{}", s)
    }
}

/// Annotation component
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Contents of `xs:appinfo` children
    pub application_information: Vec<String>,
    /// Contents of `xs:documentation` children
    pub user_information: Vec<String>,
}

impl Annotation {
    /// Create an empty annotation
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a documentation entry
    pub fn with_documentation(mut self, text: impl Into<String>) -> Self {
        self.user_information.push(text.into());
        self
    }

    /// Add an appinfo entry
    pub fn with_appinfo(mut self, text: impl Into<String>) -> Self {
        self.application_information.push(text.into());
        self
    }
}

/// Notation declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotationDeclaration {
    /// Notation name
    pub name: QName,
    /// Public identifier
    pub public: Option<String>,
    /// System identifier
    pub system: Option<String>,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl NotationDeclaration {
    /// Create a new notation
    pub fn new(name: QName) -> Self {
        Self {
            name,
            public: None,
            system: None,
            annotations: Vec::new(),
        }
    }

    /// Set the public identifier
    pub fn with_public(mut self, public: impl Into<String>) -> Self {
        self.public = Some(public.into());
        self
    }

    /// Set the system identifier
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A schema component
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Element declaration
    Element(ElementDeclaration),
    /// Attribute declaration
    Attribute(AttributeDeclaration),
    /// Simple type definition
    SimpleType(SimpleTypeDefinition),
    /// Complex type definition
    ComplexType(ComplexTypeDefinition),
    /// Attribute use
    AttributeUse(AttributeUse),
    /// Attribute group definition
    AttributeGroup(AttributeGroupDefinition),
    /// Model group
    ModelGroup(ModelGroup),
    /// Model group definition
    ModelGroupDefinition(ModelGroupDefinition),
    /// Particle
    Particle(Particle),
    /// Wildcard
    Wildcard(Wildcard),
    /// Identity constraint
    IdentityConstraint(IdentityConstraint),
    /// Notation declaration
    Notation(NotationDeclaration),
    /// Constraining facet
    Facet(Facet),
    /// Annotation
    Annotation(Annotation),
}

impl Component {
    /// Get the kind discriminant
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Element(_) => ComponentKind::Element,
            Self::Attribute(_) => ComponentKind::Attribute,
            Self::SimpleType(_) => ComponentKind::SimpleType,
            Self::ComplexType(_) => ComponentKind::ComplexType,
            Self::AttributeUse(_) => ComponentKind::AttributeUse,
            Self::AttributeGroup(_) => ComponentKind::AttributeGroup,
            Self::ModelGroup(_) => ComponentKind::ModelGroup,
            Self::ModelGroupDefinition(_) => ComponentKind::ModelGroupDefinition,
            Self::Particle(_) => ComponentKind::Particle,
            Self::Wildcard(_) => ComponentKind::Wildcard,
            Self::IdentityConstraint(_) => ComponentKind::IdentityConstraint,
            Self::Notation(_) => ComponentKind::Notation,
            Self::Facet(_) => ComponentKind::Facet,
            Self::Annotation(_) => ComponentKind::Annotation,
        }
    }

    /// Get the qualified name, for components that have one
    pub fn name(&self) -> Option<&QName> {
        match self {
            Self::Element(e) => Some(&e.name),
            Self::Attribute(a) => Some(&a.name),
            Self::SimpleType(t) => t.name.as_ref(),
            Self::ComplexType(t) => t.name.as_ref(),
            Self::AttributeGroup(g) => Some(&g.name),
            Self::ModelGroupDefinition(g) => Some(&g.name),
            Self::IdentityConstraint(c) => Some(&c.name),
            Self::Notation(n) => Some(&n.name),
            Self::AttributeUse(_)
            | Self::ModelGroup(_)
            | Self::Particle(_)
            | Self::Wildcard(_)
            | Self::Facet(_)
            | Self::Annotation(_) => None,
        }
    }

    /// Get the target namespace of a named component
    pub fn namespace(&self) -> Option<&str> {
        self.name().and_then(|n| n.namespace.as_deref())
    }

    /// Identity of unnamed components that are told apart by their variety
    pub fn variety(&self) -> Option<&'static str> {
        match self {
            Self::ModelGroup(g) => Some(g.compositor.as_str()),
            Self::Facet(f) => Some(f.kind.as_str()),
            _ => None,
        }
    }

    /// Check if this is a simple or complex type definition
    pub fn is_type_definition(&self) -> bool {
        matches!(self, Self::SimpleType(_) | Self::ComplexType(_))
    }

    /// Check if this is an element or attribute declaration
    pub fn is_declaration(&self) -> bool {
        matches!(self, Self::Element(_) | Self::Attribute(_))
    }

    /// Type definition of an element or attribute declaration
    pub fn type_definition(&self) -> Option<ComponentId> {
        match self {
            Self::Element(e) => e.type_definition,
            Self::Attribute(a) => a.type_definition,
            _ => None,
        }
    }

    /// Annotations attached to this component
    pub fn annotations(&self) -> &[ComponentId] {
        match self {
            Self::Element(e) => &e.annotations,
            Self::Attribute(a) => &a.annotations,
            Self::SimpleType(t) => &t.annotations,
            Self::ComplexType(t) => &t.annotations,
            Self::AttributeUse(u) => &u.annotations,
            Self::AttributeGroup(g) => &g.annotations,
            Self::ModelGroup(g) => &g.annotations,
            Self::ModelGroupDefinition(g) => &g.annotations,
            Self::Particle(p) => &p.annotations,
            Self::Wildcard(w) => &w.annotations,
            Self::IdentityConstraint(c) => &c.annotations,
            Self::Notation(n) => &n.annotations,
            Self::Facet(f) => &f.annotations,
            Self::Annotation(_) => &[],
        }
    }

    /// Mutable access to the annotation list
    ///
    /// Annotations cannot carry annotations, so this is `None` for them.
    pub fn annotations_mut(&mut self) -> Option<&mut Vec<ComponentId>> {
        match self {
            Self::Element(e) => Some(&mut e.annotations),
            Self::Attribute(a) => Some(&mut a.annotations),
            Self::SimpleType(t) => Some(&mut t.annotations),
            Self::ComplexType(t) => Some(&mut t.annotations),
            Self::AttributeUse(u) => Some(&mut u.annotations),
            Self::AttributeGroup(g) => Some(&mut g.annotations),
            Self::ModelGroup(g) => Some(&mut g.annotations),
            Self::ModelGroupDefinition(g) => Some(&mut g.annotations),
            Self::Particle(p) => Some(&mut p.annotations),
            Self::Wildcard(w) => Some(&mut w.annotations),
            Self::IdentityConstraint(c) => Some(&mut c.annotations),
            Self::Notation(n) => Some(&mut n.annotations),
            Self::Facet(f) => Some(&mut f.annotations),
            Self::Annotation(_) => None,
        }
    }

    /// Every component id this component refers to, in property order
    pub fn references(&self) -> Vec<ComponentId> {
        let mut refs = Vec::new();
        match self {
            Self::Element(e) => {
                refs.extend(e.type_definition);
                refs.extend(e.scope.parent());
                refs.extend(&e.substitution_group_affiliations);
                refs.extend(&e.identity_constraints);
            }
            Self::Attribute(a) => {
                refs.extend(a.type_definition);
                refs.extend(a.scope.parent());
            }
            Self::SimpleType(t) => {
                refs.extend(t.base_type);
                refs.extend(t.primitive_type);
                refs.extend(t.item_type);
                refs.extend(&t.member_types);
                refs.extend(&t.facets);
            }
            Self::ComplexType(t) => {
                refs.extend(t.base_type);
                refs.extend(t.content.simple_type());
                refs.extend(t.content.particle());
                refs.extend(&t.attribute_uses);
                refs.extend(t.attribute_wildcard);
                refs.extend(&t.attribute_groups);
            }
            Self::AttributeUse(u) => refs.push(u.attribute_declaration),
            Self::AttributeGroup(g) => {
                refs.extend(&g.attribute_uses);
                refs.extend(g.attribute_wildcard);
                refs.extend(&g.attribute_groups);
            }
            Self::ModelGroup(g) => refs.extend(&g.particles),
            Self::ModelGroupDefinition(g) => refs.push(g.model_group),
            Self::Particle(p) => refs.push(p.term),
            Self::IdentityConstraint(c) => refs.extend(c.referenced_key),
            Self::Wildcard(_) | Self::Notation(_) | Self::Facet(_) | Self::Annotation(_) => {}
        }
        refs.extend(self.annotations());
        refs
    }
}

macro_rules! impl_from_component {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(value: $ty) -> Self {
                    Component::$variant(value)
                }
            }
        )*
    };
}

impl_from_component!(
    Element(ElementDeclaration),
    Attribute(AttributeDeclaration),
    SimpleType(SimpleTypeDefinition),
    ComplexType(ComplexTypeDefinition),
    AttributeUse(AttributeUse),
    AttributeGroup(AttributeGroupDefinition),
    ModelGroup(ModelGroup),
    ModelGroupDefinition(ModelGroupDefinition),
    Particle(Particle),
    Wildcard(Wildcard),
    IdentityConstraint(IdentityConstraint),
    Notation(NotationDeclaration),
    Facet(Facet),
    Annotation(Annotation),
);
