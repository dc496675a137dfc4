//! XSD constraining facets
//!
//! Facets are unnamed; a designator tells them apart by their kind
//! (`facet::maxLength`).

use std::fmt;

use super::ComponentId;

/// Kind of constraining facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetKind {
    /// xs:enumeration
    Enumeration,
    /// xs:pattern
    Pattern,
    /// xs:length
    Length,
    /// xs:minLength
    MinLength,
    /// xs:maxLength
    MaxLength,
    /// xs:whiteSpace
    WhiteSpace,
    /// xs:minInclusive
    MinInclusive,
    /// xs:maxInclusive
    MaxInclusive,
    /// xs:minExclusive
    MinExclusive,
    /// xs:maxExclusive
    MaxExclusive,
    /// xs:totalDigits
    TotalDigits,
    /// xs:fractionDigits
    FractionDigits,
}

impl FacetKind {
    /// All facet kinds, in declaration order
    pub const ALL: [FacetKind; 12] = [
        Self::Enumeration,
        Self::Pattern,
        Self::Length,
        Self::MinLength,
        Self::MaxLength,
        Self::WhiteSpace,
        Self::MinInclusive,
        Self::MaxInclusive,
        Self::MinExclusive,
        Self::MaxExclusive,
        Self::TotalDigits,
        Self::FractionDigits,
    ];

    /// The facet element's local name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enumeration => "enumeration",
            Self::Pattern => "pattern",
            Self::Length => "length",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::WhiteSpace => "whiteSpace",
            Self::MinInclusive => "minInclusive",
            Self::MaxInclusive => "maxInclusive",
            Self::MinExclusive => "minExclusive",
            Self::MaxExclusive => "maxExclusive",
            Self::TotalDigits => "totalDigits",
            Self::FractionDigits => "fractionDigits",
        }
    }

    /// Parse from a facet element's local name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    /// Enumeration and pattern may carry several values
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, Self::Enumeration | Self::Pattern)
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraining facet component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    /// Facet kind
    pub kind: FacetKind,
    /// Lexical values; one for single-valued facets
    pub values: Vec<String>,
    /// Whether the facet is fixed
    pub fixed: bool,
    /// Annotations
    pub annotations: Vec<ComponentId>,
}

impl Facet {
    /// Create a facet with one value
    pub fn new(kind: FacetKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            values: vec![value.into()],
            fixed: false,
            annotations: Vec::new(),
        }
    }

    /// Create a multi-valued facet (enumeration, pattern)
    pub fn multi(kind: FacetKind, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            kind,
            values: values.into_iter().map(Into::into).collect(),
            fixed: false,
            annotations: Vec::new(),
        }
    }

    /// Mark as fixed
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Check if this facet may carry several values
    pub fn is_multi_valued(&self) -> bool {
        self.kind.is_multi_valued()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_kind_names_round_trip() {
        for kind in FacetKind::ALL {
            assert_eq!(FacetKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(FacetKind::from_name("assertion"), None);
    }

    #[test]
    fn test_multi_valued_facets() {
        let e = Facet::multi(FacetKind::Enumeration, ["a", "b", "c"]);
        assert!(e.is_multi_valued());
        assert_eq!(e.values.len(), 3);

        let m = Facet::new(FacetKind::MaxLength, "10").fixed();
        assert!(!m.is_multi_valued());
        assert!(m.fixed);
    }
}
