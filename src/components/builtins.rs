//! XSD built-in types
//!
//! Registers `anyType`, `anySimpleType` and the primitive datatypes in the
//! XSD namespace, so designators such as `/type::xs:string` resolve against
//! a graph the way they do against a real compiled schema.

use crate::error::Result;
use crate::namespaces::QName;
use crate::XSD_NAMESPACE;

use super::{
    ComplexTypeDefinition, Component, ComponentId, ContentType, DerivationMethod, GlobalKind,
    SchemaGraph, SimpleTypeDefinition,
};

/// XSD anyType name
pub const XSD_ANY_TYPE: &str = "anyType";
/// XSD anySimpleType name
pub const XSD_ANY_SIMPLE_TYPE: &str = "anySimpleType";
/// XSD anyAtomicType name
pub const XSD_ANY_ATOMIC_TYPE: &str = "anyAtomicType";

/// The primitive datatypes, in the order of XML Schema Part 2
pub const PRIMITIVE_TYPES: [&str; 19] = [
    "string",
    "boolean",
    "decimal",
    "float",
    "double",
    "duration",
    "dateTime",
    "time",
    "date",
    "gYearMonth",
    "gYear",
    "gMonthDay",
    "gDay",
    "gMonth",
    "hexBinary",
    "base64Binary",
    "anyURI",
    "QName",
    "NOTATION",
];

/// Ids of the registered built-in types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinTypes {
    /// xs:anyType
    pub any_type: ComponentId,
    /// xs:anySimpleType
    pub any_simple_type: ComponentId,
    /// xs:anyAtomicType
    pub any_atomic_type: ComponentId,
    /// The primitive types, in [`PRIMITIVE_TYPES`] order
    pub primitives: Vec<ComponentId>,
}

impl BuiltinTypes {
    /// Get a primitive type by local name
    pub fn primitive(&self, name: &str) -> Option<ComponentId> {
        PRIMITIVE_TYPES
            .iter()
            .position(|p| *p == name)
            .and_then(|i| self.primitives.get(i).copied())
    }
}

fn xsd_name(local: &str) -> QName {
    QName::namespaced(XSD_NAMESPACE, local)
}

/// Add the built-in types to `graph` and register them as global types
pub fn register_builtin_types(graph: &mut SchemaGraph) -> Result<BuiltinTypes> {
    // anyType is its own base type
    let any_type = graph.add_global(
        GlobalKind::Type,
        ComplexTypeDefinition::new(xsd_name(XSD_ANY_TYPE)),
    )?;
    if let Some(Component::ComplexType(t)) = graph.get_mut(any_type) {
        t.base_type = Some(any_type);
        t.derivation = DerivationMethod::Restriction;
        t.content = ContentType::Empty;
    }

    let mut any_simple = SimpleTypeDefinition::new(xsd_name(XSD_ANY_SIMPLE_TYPE)).with_base(any_type);
    any_simple.variety = None;
    let any_simple_type = graph.add_global(GlobalKind::Type, any_simple)?;

    let any_atomic_type = graph.add_global(
        GlobalKind::Type,
        SimpleTypeDefinition::new(xsd_name(XSD_ANY_ATOMIC_TYPE)).with_base(any_simple_type),
    )?;

    let mut primitives = Vec::with_capacity(PRIMITIVE_TYPES.len());
    for name in PRIMITIVE_TYPES {
        let id = graph.add_global(
            GlobalKind::Type,
            SimpleTypeDefinition::new(xsd_name(name)).with_base(any_atomic_type),
        )?;
        if let Some(Component::SimpleType(t)) = graph.get_mut(id) {
            t.primitive_type = Some(id);
        }
        primitives.push(id);
    }

    Ok(BuiltinTypes {
        any_type,
        any_simple_type,
        any_atomic_type,
        primitives,
    })
}

impl SchemaGraph {
    /// Create a graph that already holds the built-in types
    pub fn with_builtin_types() -> Result<(Self, BuiltinTypes)> {
        let mut graph = Self::new();
        let builtins = register_builtin_types(&mut graph)?;
        Ok((graph, builtins))
    }
}
