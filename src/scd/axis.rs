//! Schema component axes
//!
//! Each axis names one relationship between schema components. The keyword
//! table is the single source of truth for both directions of the
//! keyword/axis mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::GlobalKind;

/// Navigation relationship of a designator step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    /// `schemaAttribute::` (abbreviated `@`)
    SchemaAttribute,
    /// `schemaElement::` (the default axis)
    SchemaElement,
    /// `type::` (abbreviated `~`)
    Type,
    /// `attributeGroup::`
    AttributeGroup,
    /// `group::`
    Group,
    /// `identityConstraint::`
    IdentityConstraint,
    /// `assertion::`
    Assertion,
    /// `alternative::`
    Alternative,
    /// `notation::`
    Notation,
    /// `model::`
    Model,
    /// `anyAttribute::`
    AnyAttribute,
    /// `any::`
    Any,
    /// `facet::`
    Facet,
    /// `scope::`
    Scope,
    /// `context::`
    Context,
    /// `substitutionGroup::`
    SubstitutionGroup,
    /// `baseType::`
    BaseType,
    /// `itemType::`
    ItemType,
    /// `memberType::`
    MemberType,
    /// `primitiveType::`
    PrimitiveType,
    /// `key::`
    Key,
    /// `annotation::`
    Annotation,
    /// `component::`
    Component,
    /// `currentComponent::` (abbreviated `.`)
    CurrentComponent,
    /// `attributeUse::`
    AttributeUse,
    /// `particle::`
    Particle,
    /// `extensionAxis::`
    ExtensionAxis,
    /// `specialComponent::` (abbreviated `//`)
    SpecialComponent,
    /// The bare root step `/`
    NoAxis,
    /// Unrecognized axis keyword
    Unknown,
}

/// Axes with a keyword, in tag order
const NAMED_AXES: [(Axis, &str); 28] = [
    (Axis::SchemaAttribute, "schemaAttribute"),
    (Axis::SchemaElement, "schemaElement"),
    (Axis::Type, "type"),
    (Axis::AttributeGroup, "attributeGroup"),
    (Axis::Group, "group"),
    (Axis::IdentityConstraint, "identityConstraint"),
    (Axis::Assertion, "assertion"),
    (Axis::Alternative, "alternative"),
    (Axis::Notation, "notation"),
    (Axis::Model, "model"),
    (Axis::AnyAttribute, "anyAttribute"),
    (Axis::Any, "any"),
    (Axis::Facet, "facet"),
    (Axis::Scope, "scope"),
    (Axis::Context, "context"),
    (Axis::SubstitutionGroup, "substitutionGroup"),
    (Axis::BaseType, "baseType"),
    (Axis::ItemType, "itemType"),
    (Axis::MemberType, "memberType"),
    (Axis::PrimitiveType, "primitiveType"),
    (Axis::Key, "key"),
    (Axis::Annotation, "annotation"),
    (Axis::Component, "component"),
    (Axis::CurrentComponent, "currentComponent"),
    (Axis::AttributeUse, "attributeUse"),
    (Axis::Particle, "particle"),
    (Axis::ExtensionAxis, "extensionAxis"),
    (Axis::SpecialComponent, "specialComponent"),
];

impl Axis {
    /// Parse an axis keyword; unrecognized keywords map to [`Axis::Unknown`]
    pub fn from_name(name: &str) -> Self {
        NAMED_AXES
            .iter()
            .find(|(_, keyword)| *keyword == name)
            .map(|(axis, _)| *axis)
            .unwrap_or(Axis::Unknown)
    }

    /// The axis keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::NoAxis => "noAxis",
            Axis::Unknown => "unknown",
            named => NAMED_AXES[named.tag()].1,
        }
    }

    /// Position in the keyword table; sentinels come after the named axes
    pub fn tag(&self) -> usize {
        *self as usize
    }

    /// Every axis that has a keyword
    pub fn named() -> impl Iterator<Item = Axis> {
        NAMED_AXES.iter().map(|(axis, _)| *axis)
    }

    /// Axes naming schema features the component graph does not expose
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            Axis::Assertion
                | Axis::Alternative
                | Axis::Context
                | Axis::ExtensionAxis
                | Axis::Unknown
        )
    }

    /// The global table a first step on this axis enumerates
    pub fn global_kind(&self) -> Option<GlobalKind> {
        match self {
            Axis::SchemaElement => Some(GlobalKind::Element),
            Axis::SchemaAttribute => Some(GlobalKind::Attribute),
            Axis::Type => Some(GlobalKind::Type),
            Axis::AttributeGroup => Some(GlobalKind::AttributeGroup),
            Axis::Group => Some(GlobalKind::Group),
            Axis::Notation => Some(GlobalKind::Notation),
            Axis::IdentityConstraint => Some(GlobalKind::IdentityConstraint),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword of `axis`
pub fn axis_to_string(axis: Axis) -> &'static str {
    axis.as_str()
}

/// Axis named by `name`, or [`Axis::Unknown`]
pub fn string_to_axis(name: &str) -> Axis {
    Axis::from_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_axis_round_trip() {
        for axis in Axis::named() {
            assert_eq!(string_to_axis(axis_to_string(axis)), axis);
        }
        assert_eq!(Axis::named().count(), 28);
    }

    #[test]
    fn test_tag_matches_table_position() {
        for (i, axis) in Axis::named().enumerate() {
            assert_eq!(axis.tag(), i);
        }
        assert_eq!(Axis::NoAxis.tag(), 28);
    }

    #[test]
    fn test_unknown_axis() {
        assert_eq!(Axis::from_name("child"), Axis::Unknown);
        assert_eq!(Axis::from_name(""), Axis::Unknown);
        assert_eq!(Axis::from_name("Type"), Axis::Unknown);
        // sentinels have no keyword
        assert_eq!(Axis::from_name("noAxis"), Axis::Unknown);
    }

    #[test]
    fn test_unsupported_axes() {
        for axis in [Axis::Assertion, Axis::Alternative, Axis::Context, Axis::ExtensionAxis] {
            assert!(!axis.is_supported(), "{}", axis);
        }
        assert!(Axis::Facet.is_supported());
        assert!(Axis::SpecialComponent.is_supported());
    }

    #[test]
    fn test_global_kind() {
        assert_eq!(Axis::Type.global_kind(), Some(GlobalKind::Type));
        assert_eq!(Axis::Group.global_kind(), Some(GlobalKind::Group));
        assert_eq!(Axis::Facet.global_kind(), None);
    }

    #[test]
    fn test_serde_uses_keyword() {
        let json = serde_json::to_string(&Axis::SubstitutionGroup).unwrap();
        assert_eq!(json, "\"substitutionGroup\"");
        let axis: Axis = serde_json::from_str("\"anyAttribute\"").unwrap();
        assert_eq!(axis, Axis::AnyAttribute);
    }

    proptest! {
        #[test]
        fn prop_from_name_is_injective(name in "[a-zA-Z]{0,20}") {
            let axis = Axis::from_name(&name);
            if axis != Axis::Unknown {
                prop_assert_eq!(axis.as_str(), name.as_str());
            }
        }
    }
}
