//! Designator resolution against a [`SchemaGraph`]
//!
//! A designator is evaluated step by step over a working set of components.
//! Each step navigates one axis from every component in the set, keeps the
//! candidates that pass the name test, and optionally narrows the result to
//! a single position. Element and attribute declarations stand in for their
//! type definitions on every axis except `specialComponent`, so
//! `/p:purchaseOrder/shipTo` needs no explicit `type::` step.
//!
//! Results are de-duplicated by component identity and keep the order in
//! which components were first reached.

use indexmap::IndexSet;

use crate::components::{Component, ComponentId, GlobalKind, SchemaGraph};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::namespaces::NamespaceLookup;

use super::axis::Axis;
use super::parser::ScdParser;
use super::step::{format_steps, NameTest, Step};

type WorkingSet = IndexSet<ComponentId>;

/// Resolves designators to components of one schema
///
/// The resolver holds no per-call state; one instance can serve any number
/// of resolutions, including nested ones.
#[derive(Debug, Clone)]
pub struct Resolver<'g> {
    schema: &'g SchemaGraph,
    parser: ScdParser,
    limits: Limits,
}

impl<'g> Resolver<'g> {
    /// Create a resolver with default limits
    pub fn new(schema: &'g SchemaGraph) -> Self {
        Self::with_limits(schema, Limits::default())
    }

    /// Create a resolver with custom limits
    pub fn with_limits(schema: &'g SchemaGraph, limits: Limits) -> Self {
        Self {
            schema,
            parser: ScdParser::with_limits(limits.clone()),
            limits,
        }
    }

    /// The schema this resolver navigates
    pub fn schema(&self) -> &'g SchemaGraph {
        self.schema
    }

    /// Resolve an absolute designator in `xmlns(...)xscd(...)` form
    pub fn resolve(&self, scd: &str) -> Result<Vec<ComponentId>> {
        let steps = self.parser.parse_relative_scd(scd, false)?;
        self.evaluate(&steps, None)
    }

    /// Resolve an absolute raw SCP
    pub fn resolve_scp(
        &self,
        scp: &str,
        ns: Option<&dyn NamespaceLookup>,
    ) -> Result<Vec<ComponentId>> {
        let steps = self.parser.parse_scp(scp, ns, false)?;
        self.evaluate(&steps, None)
    }

    /// Resolve a relative raw SCP starting at `start`
    pub fn resolve_incomplete_scp(
        &self,
        scp: &str,
        ns: Option<&dyn NamespaceLookup>,
        start: ComponentId,
    ) -> Result<Vec<ComponentId>> {
        let steps = self.parser.parse_scp(scp, ns, true)?;
        self.evaluate(&steps, Some(start))
    }

    /// Resolve a relative designator in `xmlns(...)xscd(...)` form starting at `start`
    pub fn resolve_incomplete_scd(&self, scd: &str, start: ComponentId) -> Result<Vec<ComponentId>> {
        let steps = self.parser.parse_relative_scd(scd, true)?;
        self.evaluate(&steps, Some(start))
    }

    /// Evaluate a parsed step list
    ///
    /// Without `start` the first step is evaluated against the global tables
    /// of the schema; with `start` every step navigates from `{start}`.
    pub fn evaluate(&self, steps: &[Step], start: Option<ComponentId>) -> Result<Vec<ComponentId>> {
        if steps.is_empty() {
            return Err(Error::Internal("empty step list".to_string()));
        }
        if steps.len() == 1 && steps[0].is_schema_step() {
            return Err(Error::Unsupported("schema step".to_string()));
        }
        self.limits.check_steps(steps.len())?;
        log::debug!("evaluating {}", format_steps(steps));

        let (mut working, rest) = match start {
            Some(id) => {
                self.schema.component(id)?;
                (WorkingSet::from([id]), steps)
            }
            None => (self.first_step(&steps[0])?, &steps[1..]),
        };

        for step in rest {
            working = self.next_step(step, working)?;
        }
        Ok(working.into_iter().collect())
    }

    /// First step of an absolute designator, navigating from the schema
    fn first_step(&self, step: &Step) -> Result<WorkingSet> {
        check_supported(step)?;

        let candidates: Vec<ComponentId> = if let Some(kind) = step.axis.global_kind() {
            self.schema.globals(kind).collect()
        } else {
            match step.axis {
                Axis::Component | Axis::SpecialComponent => {
                    let seed = self
                        .schema
                        .all_globals()
                        .chain(self.schema.schema_annotations().iter().copied());
                    self.descendants(seed, true)?
                }
                Axis::Annotation => self.schema.schema_annotations().to_vec(),
                Axis::CurrentComponent | Axis::NoAxis => {
                    return Err(Error::Unsupported("schema step".to_string()))
                }
                // the schema has no facets, particles, base type, ...
                _ => Vec::new(),
            }
        };

        let selected = self.select(step, candidates, false)?;
        log::debug!("step {} from schema: {} component(s)", step, selected.len());
        Ok(selected)
    }

    fn next_step(&self, step: &Step, working: WorkingSet) -> Result<WorkingSet> {
        check_supported(step)?;
        if step.is_schema_step() {
            return Err(Error::Unsupported("schema step".to_string()));
        }

        let size_in = working.len();
        let working = if step.axis == Axis::SpecialComponent {
            working
        } else {
            self.elide(working)?
        };

        let selected = match step.axis {
            Axis::CurrentComponent => self.select(step, working.into_iter().collect(), true)?,
            Axis::Component => {
                let candidates = self.descendants(working.iter().copied(), false)?;
                self.select(step, candidates, false)?
            }
            Axis::SpecialComponent => {
                let candidates = self.descendants(working.iter().copied(), true)?;
                self.select(step, candidates, false)?
            }
            axis => {
                let mut candidates = Vec::new();
                for id in &working {
                    candidates.extend(self.navigate(axis, *id)?);
                }
                self.select(step, candidates, false)?
            }
        };

        log::debug!(
            "step {}: {} -> {} component(s)",
            step,
            size_in,
            selected.len()
        );
        Ok(selected)
    }

    /// Add the type definition of every element and attribute declaration
    fn elide(&self, mut working: WorkingSet) -> Result<WorkingSet> {
        let mut types = Vec::new();
        for id in &working {
            let component = self.schema.component(*id)?;
            if component.is_declaration() {
                types.extend(component.type_definition());
            }
        }
        working.extend(types);
        self.limits.check_result_size(working.len())?;
        Ok(working)
    }

    /// Apply the name test, de-duplicate, then apply the predicate
    ///
    /// The result size limit applies to what the predicate keeps.
    fn select(
        &self,
        step: &Step,
        candidates: Vec<ComponentId>,
        ignore_name_test: bool,
    ) -> Result<WorkingSet> {
        let mut admitted = WorkingSet::new();
        for id in candidates {
            if admitted.contains(&id) {
                continue;
            }
            let component = self.schema.component(id)?;
            if ignore_name_test || name_test_admits(step.name_test.as_ref(), component) {
                admitted.insert(id);
            }
        }

        let kept = match step.predicate {
            0 => admitted,
            n => match admitted.get_index(n as usize - 1) {
                Some(id) => WorkingSet::from([*id]),
                None => {
                    return Err(Error::InvalidPredicate(format!(
                        "[{}] on step {} but only {} component(s) matched",
                        n,
                        step,
                        admitted.len()
                    )))
                }
            },
        };
        self.limits.check_result_size(kept.len())?;
        Ok(kept)
    }

    /// Components reached from `id` along `axis`
    fn navigate(&self, axis: Axis, id: ComponentId) -> Result<Vec<ComponentId>> {
        let component = self.schema.component(id)?;
        let found = match axis {
            Axis::SchemaElement => self.content_terms_of_kind(id, |c| matches!(c, Component::Element(_)))?,
            Axis::Any => self.content_terms_of_kind(id, |c| matches!(c, Component::Wildcard(_)))?,
            Axis::SchemaAttribute => match component {
                Component::AttributeUse(u) => vec![u.attribute_declaration],
                _ => self.declarations_of(&self.attribute_uses_of(component)?)?,
            },
            Axis::Type => match component {
                Component::Element(_) | Component::Attribute(_) => {
                    component.type_definition().into_iter().collect()
                }
                Component::AttributeUse(u) => self
                    .schema
                    .component(u.attribute_declaration)?
                    .type_definition()
                    .into_iter()
                    .collect(),
                Component::ComplexType(t) => t.content.simple_type().into_iter().collect(),
                _ => Vec::new(),
            },
            Axis::AttributeGroup => match component {
                Component::ComplexType(t) => t.attribute_groups.clone(),
                Component::AttributeGroup(g) => g.attribute_groups.clone(),
                _ => Vec::new(),
            },
            Axis::Group => self.group_definitions_in(id, component)?,
            Axis::IdentityConstraint => match component {
                Component::Element(e) => e.identity_constraints.clone(),
                _ => Vec::new(),
            },
            Axis::Notation => Vec::new(),
            Axis::Model => self.model_groups_of(component)?,
            Axis::AnyAttribute => match component {
                Component::ComplexType(t) => t.attribute_wildcard.into_iter().collect(),
                Component::AttributeGroup(g) => g.attribute_wildcard.into_iter().collect(),
                _ => Vec::new(),
            },
            Axis::Facet => match component {
                Component::SimpleType(t) => t.facets.clone(),
                _ => Vec::new(),
            },
            Axis::Scope => match component {
                Component::Element(e) => e.scope.parent().into_iter().collect(),
                Component::Attribute(a) => a.scope.parent().into_iter().collect(),
                _ => Vec::new(),
            },
            Axis::SubstitutionGroup => match component {
                Component::Element(e) => e.substitution_group_affiliations.clone(),
                _ => Vec::new(),
            },
            Axis::BaseType => match component {
                Component::SimpleType(t) => t.base_type.into_iter().collect(),
                Component::ComplexType(t) => t.base_type.into_iter().collect(),
                _ => Vec::new(),
            },
            Axis::ItemType => match component {
                Component::SimpleType(t) => t.item_type.into_iter().collect(),
                _ => Vec::new(),
            },
            Axis::MemberType => match component {
                Component::SimpleType(t) => t.member_types.clone(),
                _ => Vec::new(),
            },
            Axis::PrimitiveType => match component {
                Component::SimpleType(t) => t.primitive_type.into_iter().collect(),
                _ => Vec::new(),
            },
            Axis::Key => match component {
                Component::IdentityConstraint(c) => c.referenced_key.into_iter().collect(),
                _ => Vec::new(),
            },
            Axis::Annotation => component.annotations().to_vec(),
            Axis::AttributeUse => self.attribute_uses_of(component)?,
            Axis::Particle => self.particles_of(component)?,
            Axis::Assertion
            | Axis::Alternative
            | Axis::Context
            | Axis::ExtensionAxis
            | Axis::Unknown => return Err(Error::Unsupported(format!("axis {}", axis))),
            Axis::Component | Axis::SpecialComponent | Axis::CurrentComponent | Axis::NoAxis => {
                return Err(Error::Internal(format!(
                    "axis {} is not a single-component navigation",
                    axis
                )))
            }
        };
        Ok(found)
    }

    /// Attribute uses of a complex type or attribute group, followed by those
    /// of its attribute group references, transitively
    fn attribute_uses_of(&self, component: &Component) -> Result<Vec<ComponentId>> {
        let mut uses = WorkingSet::new();
        let mut visited = WorkingSet::new();
        let groups = match component {
            Component::ComplexType(t) => {
                uses.extend(t.attribute_uses.iter().copied());
                &t.attribute_groups
            }
            Component::AttributeGroup(g) => {
                uses.extend(g.attribute_uses.iter().copied());
                &g.attribute_groups
            }
            _ => return Ok(Vec::new()),
        };

        let mut pending: Vec<ComponentId> = groups.iter().rev().copied().collect();
        while let Some(group_id) = pending.pop() {
            // cyclic references contribute once
            if !visited.insert(group_id) {
                continue;
            }
            if let Component::AttributeGroup(g) = self.schema.component(group_id)? {
                uses.extend(g.attribute_uses.iter().copied());
                pending.extend(g.attribute_groups.iter().rev().copied());
            }
        }
        Ok(uses.into_iter().collect())
    }

    fn declarations_of(&self, uses: &[ComponentId]) -> Result<Vec<ComponentId>> {
        let mut decls = Vec::with_capacity(uses.len());
        for id in uses {
            if let Component::AttributeUse(u) = self.schema.component(*id)? {
                decls.push(u.attribute_declaration);
            }
        }
        Ok(decls)
    }

    /// Terms of the content model of `id`, model groups included, in
    /// document order
    fn content_terms(&self, id: ComponentId) -> Result<WorkingSet> {
        let root = match self.schema.component(id)? {
            Component::ComplexType(t) => t.content.particle(),
            Component::ModelGroupDefinition(g) => Some(g.model_group),
            Component::Particle(_) | Component::ModelGroup(_) => Some(id),
            _ => None,
        };
        let mut terms = WorkingSet::new();
        if let Some(root) = root {
            self.collect_terms(root, &mut terms)?;
        }
        Ok(terms)
    }

    fn collect_terms(&self, id: ComponentId, terms: &mut WorkingSet) -> Result<()> {
        match self.schema.component(id)? {
            Component::Particle(p) => self.collect_terms(p.term, terms)?,
            Component::ModelGroup(g) => {
                // recursive group references stop at the second visit
                if terms.insert(id) {
                    for particle in &g.particles {
                        self.collect_terms(*particle, terms)?;
                    }
                }
            }
            Component::Element(_) | Component::Wildcard(_) => {
                terms.insert(id);
            }
            _ => {}
        }
        Ok(())
    }

    fn content_terms_of_kind(
        &self,
        id: ComponentId,
        keep: impl Fn(&Component) -> bool,
    ) -> Result<Vec<ComponentId>> {
        let mut found = Vec::new();
        for term in self.content_terms(id)? {
            if keep(self.schema.component(term)?) {
                found.push(term);
            }
        }
        Ok(found)
    }

    /// Global model group definitions whose group occurs in the content of `id`
    fn group_definitions_in(&self, id: ComponentId, component: &Component) -> Result<Vec<ComponentId>> {
        let mut groups = self.content_terms(id)?;
        if let Component::ModelGroupDefinition(g) = component {
            groups.shift_remove(&g.model_group);
        }
        if groups.is_empty() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for def_id in self.schema.globals(GlobalKind::Group) {
            if let Component::ModelGroupDefinition(def) = self.schema.component(def_id)? {
                if groups.contains(&def.model_group) {
                    found.push(def_id);
                }
            }
        }
        Ok(found)
    }

    fn model_groups_of(&self, component: &Component) -> Result<Vec<ComponentId>> {
        let particle_group = |particle: ComponentId| -> Result<Option<ComponentId>> {
            match self.schema.component(particle)? {
                Component::Particle(p) => match self.schema.component(p.term)? {
                    Component::ModelGroup(_) => Ok(Some(p.term)),
                    _ => Ok(None),
                },
                _ => Ok(None),
            }
        };

        Ok(match component {
            Component::ComplexType(t) => match t.content.particle() {
                Some(particle) => particle_group(particle)?.into_iter().collect(),
                None => Vec::new(),
            },
            Component::ModelGroupDefinition(g) => vec![g.model_group],
            Component::Particle(p) => match self.schema.component(p.term)? {
                Component::ModelGroup(_) => vec![p.term],
                _ => Vec::new(),
            },
            Component::ModelGroup(g) => {
                let mut nested = Vec::new();
                for particle in &g.particles {
                    nested.extend(particle_group(*particle)?);
                }
                nested
            }
            _ => Vec::new(),
        })
    }

    fn particles_of(&self, component: &Component) -> Result<Vec<ComponentId>> {
        let group_particles = |group: ComponentId| -> Result<Vec<ComponentId>> {
            match self.schema.component(group)? {
                Component::ModelGroup(g) => Ok(g.particles.clone()),
                _ => Ok(Vec::new()),
            }
        };

        match component {
            Component::ComplexType(t) => Ok(t.content.particle().into_iter().collect()),
            Component::ModelGroup(g) => Ok(g.particles.clone()),
            Component::ModelGroupDefinition(g) => group_particles(g.model_group),
            Component::Particle(p) => group_particles(p.term),
            _ => Ok(Vec::new()),
        }
    }

    /// Components owned by `id`: anonymous types, local declarations,
    /// particles, facets, wildcards and annotations
    fn children_of(&self, id: ComponentId) -> Result<Vec<ComponentId>> {
        let mut children = Vec::new();
        match self.schema.component(id)? {
            Component::Element(e) => {
                children.extend(self.anonymous(e.type_definition)?);
                children.extend(&e.identity_constraints);
            }
            Component::Attribute(a) => children.extend(self.anonymous(a.type_definition)?),
            Component::SimpleType(t) => {
                children.extend(self.anonymous(t.item_type)?);
                for member in &t.member_types {
                    children.extend(self.anonymous(Some(*member))?);
                }
                children.extend(&t.facets);
            }
            Component::ComplexType(t) => {
                children.extend(self.anonymous(t.content.simple_type())?);
                children.extend(t.content.particle());
                children.extend(&t.attribute_uses);
                children.extend(t.attribute_wildcard);
            }
            Component::AttributeUse(u) => {
                children.extend(self.local_declaration(u.attribute_declaration)?);
            }
            Component::AttributeGroup(g) => {
                children.extend(&g.attribute_uses);
                children.extend(g.attribute_wildcard);
            }
            Component::ModelGroup(g) => children.extend(&g.particles),
            Component::ModelGroupDefinition(g) => children.push(g.model_group),
            Component::Particle(p) => match self.schema.component(p.term)? {
                Component::Element(_) => children.extend(self.local_declaration(p.term)?),
                _ => children.push(p.term),
            },
            Component::Wildcard(_)
            | Component::IdentityConstraint(_)
            | Component::Notation(_)
            | Component::Facet(_)
            | Component::Annotation(_) => {}
        }
        children.extend(self.schema.component(id)?.annotations());
        Ok(children)
    }

    /// `id` if it names an unnamed type definition
    fn anonymous(&self, id: Option<ComponentId>) -> Result<Option<ComponentId>> {
        match id {
            Some(id) => {
                let component = self.schema.component(id)?;
                Ok((component.is_type_definition() && component.name().is_none()).then_some(id))
            }
            None => Ok(None),
        }
    }

    /// `id` if it is a local element or attribute declaration
    fn local_declaration(&self, id: ComponentId) -> Result<Option<ComponentId>> {
        let local = match self.schema.component(id)? {
            Component::Element(e) => !e.scope.is_global(),
            Component::Attribute(a) => !a.scope.is_global(),
            _ => false,
        };
        Ok(local.then_some(id))
    }

    /// Transitive closure of [`Self::children_of`] over `seed`
    fn descendants(
        &self,
        seed: impl IntoIterator<Item = ComponentId>,
        include_seed: bool,
    ) -> Result<Vec<ComponentId>> {
        let seed: Vec<ComponentId> = seed.into_iter().collect();
        let mut found = WorkingSet::new();
        if include_seed {
            found.extend(seed.iter().copied());
        }

        let mut pending = seed;
        while !pending.is_empty() {
            let mut next = Vec::new();
            for id in pending {
                for child in self.children_of(id)? {
                    if found.insert(child) {
                        next.push(child);
                    }
                }
            }
            self.limits.check_result_size(found.len())?;
            pending = next;
        }
        Ok(found.into_iter().collect())
    }
}

fn check_supported(step: &Step) -> Result<()> {
    if step.axis.is_supported() {
        Ok(())
    } else {
        Err(Error::Unsupported(format!("axis {} is not supported", step.axis)))
    }
}

/// Check whether `component` passes `test`; a missing test admits everything
fn name_test_admits(test: Option<&NameTest>, component: &Component) -> bool {
    match test {
        None | Some(NameTest::Wildcard) => true,
        Some(NameTest::Zero) => component.is_type_definition() && component.name().is_none(),
        Some(NameTest::Qualified { uri, local }) => match component.name() {
            Some(name) => name.namespace.as_deref() == uri.as_deref() && name.local_name == *local,
            None => component.variety() == Some(local.as_str()),
        },
    }
}
