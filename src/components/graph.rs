//! The schema component graph
//!
//! [`SchemaGraph`] owns every component of a compiled schema and keeps the
//! global symbol tables (types, elements, attributes, groups, ...) in
//! registration order. The designator resolver only reads from it.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::names::validate_ncname;
use crate::namespaces::QName;

use super::{Component, ComponentId, ComponentKind};

/// Global symbol spaces of a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKind {
    /// Global element declarations
    Element,
    /// Global attribute declarations
    Attribute,
    /// Named simple and complex type definitions
    Type,
    /// Attribute group definitions
    AttributeGroup,
    /// Model group definitions
    Group,
    /// Notation declarations
    Notation,
    /// Identity-constraint definitions
    IdentityConstraint,
}

impl GlobalKind {
    /// All symbol spaces, in enumeration order
    pub const ALL: [GlobalKind; 7] = [
        Self::Element,
        Self::Attribute,
        Self::Type,
        Self::AttributeGroup,
        Self::Group,
        Self::Notation,
        Self::IdentityConstraint,
    ];

    /// Check whether a component of `kind` belongs in this symbol space
    pub fn accepts(&self, kind: ComponentKind) -> bool {
        match self {
            Self::Element => kind == ComponentKind::Element,
            Self::Attribute => kind == ComponentKind::Attribute,
            Self::Type => matches!(kind, ComponentKind::SimpleType | ComponentKind::ComplexType),
            Self::AttributeGroup => kind == ComponentKind::AttributeGroup,
            Self::Group => kind == ComponentKind::ModelGroupDefinition,
            Self::Notation => kind == ComponentKind::Notation,
            Self::IdentityConstraint => kind == ComponentKind::IdentityConstraint,
        }
    }
}

/// Component map - maps QNames to global components, in registration order
pub type ComponentMap = IndexMap<QName, ComponentId>;

/// The global symbol tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalMaps {
    /// Global element declarations
    pub elements: ComponentMap,
    /// Global attribute declarations
    pub attributes: ComponentMap,
    /// Named type definitions
    pub types: ComponentMap,
    /// Attribute group definitions
    pub attribute_groups: ComponentMap,
    /// Model group definitions
    pub groups: ComponentMap,
    /// Notation declarations
    pub notations: ComponentMap,
    /// Identity-constraint definitions
    pub identity_constraints: ComponentMap,
}

impl GlobalMaps {
    /// Get the table of one symbol space
    pub fn table(&self, kind: GlobalKind) -> &ComponentMap {
        match kind {
            GlobalKind::Element => &self.elements,
            GlobalKind::Attribute => &self.attributes,
            GlobalKind::Type => &self.types,
            GlobalKind::AttributeGroup => &self.attribute_groups,
            GlobalKind::Group => &self.groups,
            GlobalKind::Notation => &self.notations,
            GlobalKind::IdentityConstraint => &self.identity_constraints,
        }
    }

    fn table_mut(&mut self, kind: GlobalKind) -> &mut ComponentMap {
        match kind {
            GlobalKind::Element => &mut self.elements,
            GlobalKind::Attribute => &mut self.attributes,
            GlobalKind::Type => &mut self.types,
            GlobalKind::AttributeGroup => &mut self.attribute_groups,
            GlobalKind::Group => &mut self.groups,
            GlobalKind::Notation => &mut self.notations,
            GlobalKind::IdentityConstraint => &mut self.identity_constraints,
        }
    }

    /// Total number of global components
    pub fn total(&self) -> usize {
        GlobalKind::ALL.iter().map(|k| self.table(*k).len()).sum()
    }
}

/// A compiled schema: component arena plus global tables
#[derive(Debug, Clone, Default)]
pub struct SchemaGraph {
    components: Vec<Component>,
    global_maps: GlobalMaps,
    annotations: Vec<ComponentId>,
    target_namespace: Option<String>,
}

impl SchemaGraph {
    /// Create an empty schema graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target namespace
    pub fn with_target_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.target_namespace = Some(namespace.into());
        self
    }

    /// Get the target namespace
    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    /// Add a component to the arena and return its id
    pub fn add(&mut self, component: impl Into<Component>) -> ComponentId {
        let id = ComponentId::from_index(self.components.len());
        self.components.push(component.into());
        id
    }

    /// Add a component and register it in the `kind` symbol space
    pub fn add_global(
        &mut self,
        kind: GlobalKind,
        component: impl Into<Component>,
    ) -> Result<ComponentId> {
        let id = self.add(component);
        if let Err(e) = self.register_global(kind, id) {
            self.components.pop();
            return Err(e);
        }
        Ok(id)
    }

    /// Register an already added component in a symbol space
    pub fn register_global(&mut self, kind: GlobalKind, id: ComponentId) -> Result<()> {
        let component = self.component(id)?;
        if !kind.accepts(component.kind()) {
            return Err(Error::Schema(format!(
                "a {} cannot be registered as a global {:?}",
                component.kind(),
                kind
            )));
        }
        let name = component
            .name()
            .cloned()
            .ok_or_else(|| Error::Schema(format!("global {} must have a name", component.kind())))?;
        validate_ncname(&name.local_name)?;

        let table = self.global_maps.table_mut(kind);
        if table.contains_key(&name) {
            return Err(Error::Schema(format!(
                "duplicate global {:?} '{}'",
                kind, name
            )));
        }
        table.insert(name, id);
        Ok(())
    }

    /// Get a component by id
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.index())
    }

    /// Get a mutable component by id
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id.index())
    }

    /// Get a component by id, failing on ids from another graph
    pub fn component(&self, id: ComponentId) -> Result<&Component> {
        self.get(id)
            .ok_or_else(|| Error::Internal(format!("dangling component id {}", id)))
    }

    /// Attach `annotation` to `target`
    pub fn annotate(&mut self, target: ComponentId, annotation: ComponentId) -> Result<()> {
        if self.component(annotation)?.kind() != ComponentKind::Annotation {
            return Err(Error::Schema(format!("{} is not an annotation", annotation)));
        }
        let component = self
            .get_mut(target)
            .ok_or_else(|| Error::Internal(format!("dangling component id {}", target)))?;
        match component.annotations_mut() {
            Some(list) => {
                list.push(annotation);
                Ok(())
            }
            None => Err(Error::Schema("annotations cannot be annotated".to_string())),
        }
    }

    /// Attach a schema-level annotation
    pub fn add_schema_annotation(&mut self, annotation: ComponentId) -> Result<()> {
        if self.component(annotation)?.kind() != ComponentKind::Annotation {
            return Err(Error::Schema(format!("{} is not an annotation", annotation)));
        }
        self.annotations.push(annotation);
        Ok(())
    }

    /// Schema-level annotations
    pub fn schema_annotations(&self) -> &[ComponentId] {
        &self.annotations
    }

    /// The global symbol tables
    pub fn global_maps(&self) -> &GlobalMaps {
        &self.global_maps
    }

    /// Global components of one symbol space, in registration order
    pub fn globals(&self, kind: GlobalKind) -> impl Iterator<Item = ComponentId> + '_ {
        self.global_maps.table(kind).values().copied()
    }

    /// Every global component, symbol space by symbol space
    pub fn all_globals(&self) -> impl Iterator<Item = ComponentId> + '_ {
        GlobalKind::ALL.into_iter().flat_map(move |k| self.globals(k))
    }

    /// Look up a global component by name
    pub fn global(&self, kind: GlobalKind, name: &QName) -> Option<ComponentId> {
        self.global_maps.table(kind).get(name).copied()
    }

    /// Number of components in the arena
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over all components with their ids
    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId::from_index(i), c))
    }

    /// Check that every reference points into this graph at a component of
    /// the kind the property requires
    pub fn validate(&self) -> Result<()> {
        for (id, component) in self.iter() {
            for target in component.references() {
                self.component(target).map_err(|_| {
                    Error::Schema(format!(
                        "{} {} refers to missing component {}",
                        component.kind(),
                        id,
                        target
                    ))
                })?;
            }
            self.validate_kinds(id, component)?;
        }
        for annotation in &self.annotations {
            self.component(*annotation)?;
        }
        Ok(())
    }

    fn validate_kinds(&self, id: ComponentId, component: &Component) -> Result<()> {
        let is_type = |k: ComponentKind| {
            matches!(k, ComponentKind::SimpleType | ComponentKind::ComplexType)
        };
        let is_simple = |k: ComponentKind| k == ComponentKind::SimpleType;
        let is = |expected: ComponentKind| move |k: ComponentKind| k == expected;

        match component {
            Component::Element(e) => {
                if let Some(t) = e.type_definition {
                    self.expect_kind(id, component, t, is_type)?;
                }
                for head in &e.substitution_group_affiliations {
                    self.expect_kind(id, component, *head, is(ComponentKind::Element))?;
                }
                for c in &e.identity_constraints {
                    self.expect_kind(id, component, *c, is(ComponentKind::IdentityConstraint))?;
                }
            }
            Component::Attribute(a) => {
                if let Some(t) = a.type_definition {
                    self.expect_kind(id, component, t, is_simple)?;
                }
            }
            Component::SimpleType(t) => {
                for member in t.item_type.iter().chain(&t.member_types).chain(&t.primitive_type) {
                    self.expect_kind(id, component, *member, is_simple)?;
                }
                for f in &t.facets {
                    self.expect_kind(id, component, *f, is(ComponentKind::Facet))?;
                }
            }
            Component::ComplexType(t) => {
                if let Some(p) = t.content.particle() {
                    self.expect_kind(id, component, p, is(ComponentKind::Particle))?;
                }
                if let Some(s) = t.content.simple_type() {
                    self.expect_kind(id, component, s, is_simple)?;
                }
                for u in &t.attribute_uses {
                    self.expect_kind(id, component, *u, is(ComponentKind::AttributeUse))?;
                }
            }
            Component::AttributeUse(u) => {
                self.expect_kind(id, component, u.attribute_declaration, is(ComponentKind::Attribute))?;
            }
            Component::ModelGroup(g) => {
                for p in &g.particles {
                    self.expect_kind(id, component, *p, is(ComponentKind::Particle))?;
                }
            }
            Component::ModelGroupDefinition(g) => {
                self.expect_kind(id, component, g.model_group, is(ComponentKind::ModelGroup))?;
            }
            Component::Particle(p) => {
                self.expect_kind(id, component, p.term, |k| {
                    matches!(
                        k,
                        ComponentKind::Element | ComponentKind::ModelGroup | ComponentKind::Wildcard
                    )
                })?;
            }
            _ => {}
        }
        for a in component.annotations() {
            self.expect_kind(id, component, *a, is(ComponentKind::Annotation))?;
        }
        Ok(())
    }

    fn expect_kind(
        &self,
        owner_id: ComponentId,
        owner: &Component,
        target: ComponentId,
        accepts: impl Fn(ComponentKind) -> bool,
    ) -> Result<()> {
        let kind = self.component(target)?.kind();
        if accepts(kind) {
            Ok(())
        } else {
            Err(Error::Schema(format!(
                "{} {} cannot refer to {} {}",
                owner.kind(),
                owner_id,
                kind,
                target
            )))
        }
    }
}
