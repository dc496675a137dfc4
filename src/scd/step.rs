//! Designator steps and name tests

use std::fmt;

use serde::{Deserialize, Serialize};

use super::axis::Axis;

/// Name test of a step
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NameTest {
    /// `*`: any component
    Wildcard,
    /// `0`: only type definitions without a name
    Zero,
    /// A resolved qualified name; `uri == None` means no namespace
    Qualified {
        /// Namespace URI
        uri: Option<String>,
        /// Local name
        local: String,
    },
}

impl NameTest {
    /// Qualified name test in `uri`
    pub fn qualified(uri: Option<impl Into<String>>, local: impl Into<String>) -> Self {
        NameTest::Qualified {
            uri: uri.map(Into::into),
            local: local.into(),
        }
    }

    /// Qualified name test in no namespace
    pub fn local(local: impl Into<String>) -> Self {
        NameTest::Qualified {
            uri: None,
            local: local.into(),
        }
    }
}

impl fmt::Display for NameTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameTest::Wildcard => f.write_str("*"),
            NameTest::Zero => f.write_str("0"),
            NameTest::Qualified {
                uri: Some(uri),
                local,
            } => write!(f, "{{{}}}{}", uri, local),
            NameTest::Qualified { uri: None, local } => f.write_str(local),
        }
    }
}

/// One step of a parsed designator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    /// Relationship followed by this step
    pub axis: Axis,
    /// Filter on the components reached; absent only for the root step
    pub name_test: Option<NameTest>,
    /// 1-based position filter; 0 means none
    pub predicate: u32,
}

impl Step {
    /// Create a step without a predicate
    pub fn new(axis: Axis, name_test: NameTest) -> Self {
        Self {
            axis,
            name_test: Some(name_test),
            predicate: 0,
        }
    }

    /// The bare `/` step addressing the schema itself
    pub fn schema() -> Self {
        Self {
            axis: Axis::NoAxis,
            name_test: None,
            predicate: 0,
        }
    }

    /// The `//` step
    pub fn descendant() -> Self {
        Self::new(Axis::SpecialComponent, NameTest::Wildcard)
    }

    /// Set the positional predicate
    pub fn with_predicate(mut self, predicate: u32) -> Self {
        self.predicate = predicate;
        self
    }

    /// Check if this is the bare `/` step
    pub fn is_schema_step(&self) -> bool {
        self.axis == Axis::NoAxis
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_schema_step() {
            return f.write_str("/");
        }
        match &self.name_test {
            Some(test) => write!(f, "{}::{}", self.axis, test)?,
            None => write!(f, "{}::*", self.axis)?,
        }
        if self.predicate > 0 {
            write!(f, "[{}]", self.predicate)?;
        }
        Ok(())
    }
}

/// Render a step list as a path, e.g. `/type::{urn:po}USAddress/facet::*`
pub fn format_steps(steps: &[Step]) -> String {
    if steps.len() == 1 && steps[0].is_schema_step() {
        return "/".to_string();
    }
    steps.iter().map(|s| format!("/{}", s)).collect()
}
