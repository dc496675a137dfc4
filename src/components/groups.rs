//! Model groups, model group definitions and particles
//!
//! This module implements the content model components:
//! - xs:sequence, xs:choice, xs:all model groups
//! - named model group definitions (xs:group)
//! - particles binding a term to its occurrence range
//!
//! Reference: https://www.w3.org/TR/xmlschema11-1/#Model_Groups

use std::fmt;

use crate::namespaces::QName;

use super::ComponentId;

/// Model group compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compositor {
    /// Ordered sequence of particles
    #[default]
    Sequence,
    /// One of multiple alternatives
    Choice,
    /// Unordered set of particles
    All,
}

impl Compositor {
    /// Parse from element tag name
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sequence" | "{http://www.w3.org/2001/XMLSchema}sequence" => Some(Self::Sequence),
            "choice" | "{http://www.w3.org/2001/XMLSchema}choice" => Some(Self::Choice),
            "all" | "{http://www.w3.org/2001/XMLSchema}all" => Some(Self::All),
            _ => None,
        }
    }

    /// The compositor keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Choice => "choice",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occurrence bounds for a particle (minOccurs, maxOccurs)
/// None for max means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    /// Minimum number of occurrences (default 1)
    pub min: u32,
    /// Maximum number of occurrences (None = unbounded, default 1)
    pub max: Option<u32>,
}

impl Occurs {
    /// Create new occurrence bounds
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Default occurrence (1, 1)
    pub fn once() -> Self {
        Self { min: 1, max: Some(1) }
    }

    /// Optional occurrence (0, 1)
    pub fn optional() -> Self {
        Self { min: 0, max: Some(1) }
    }

    /// Zero or more (0, unbounded)
    pub fn zero_or_more() -> Self {
        Self { min: 0, max: None }
    }
}

impl Default for Occurs {
    fn default() -> Self {
        Self::once()
    }
}

/// Model group component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGroup {
    /// Compositor
    pub compositor: Compositor,
    /// Particles, in document order
    pub particles: Vec<ComponentId>,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl ModelGroup {
    /// Create an empty model group
    pub fn new(compositor: Compositor) -> Self {
        Self {
            compositor,
            particles: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Add a particle
    pub fn with_particle(mut self, particle: ComponentId) -> Self {
        self.particles.push(particle);
        self
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Check if the group has no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Named model group definition (xs:group)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGroupDefinition {
    /// Group name
    pub name: QName,
    /// The model group
    pub model_group: ComponentId,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl ModelGroupDefinition {
    /// Create a new group definition
    pub fn new(name: QName, model_group: ComponentId) -> Self {
        Self {
            name,
            model_group,
            annotations: Vec::new(),
        }
    }
}

/// Particle component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Particle {
    /// Occurrence range
    pub occurs: Occurs,
    /// Element declaration, model group or wildcard
    pub term: ComponentId,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl Particle {
    /// Create a particle occurring exactly once
    pub fn new(term: ComponentId) -> Self {
        Self {
            occurs: Occurs::once(),
            term,
            annotations: Vec::new(),
        }
    }

    /// Set the occurrence range
    pub fn with_occurs(mut self, occurs: Occurs) -> Self {
        self.occurs = occurs;
        self
    }
}
