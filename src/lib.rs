//! # xmlschema-scd
//!
//! Schema Component Designators (SCD) for compiled XML Schema component
//! graphs.
//!
//! A designator such as `xmlns(p=http://example.com/schema/po)xscd(/type::p:USAddress)`
//! is parsed into a list of [`Step`]s and resolved against a [`SchemaGraph`]
//! to the components it addresses.
//!
//! ## Example
//!
//! ```rust
//! use xmlschema_scd::components::{GlobalKind, SimpleTypeDefinition};
//! use xmlschema_scd::{QName, Resolver, SchemaGraph};
//!
//! let mut schema = SchemaGraph::new();
//! let sku = schema
//!     .add_global(GlobalKind::Type, SimpleTypeDefinition::new(QName::namespaced("urn:po", "SKU")))
//!     .unwrap();
//!
//! let resolver = Resolver::new(&schema);
//! let found = resolver.resolve("xmlns(p=urn:po)xscd(/type::p:SKU)").unwrap();
//! assert_eq!(found, vec![sku]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Utilities
pub mod names;
pub mod namespaces;

// Compiled schema components
pub mod components;

// Designators
pub mod scd;

// Re-exports for convenience
pub use components::{Component, ComponentId, SchemaGraph};
pub use error::{Error, ParseError, Result};
pub use limits::Limits;
pub use namespaces::{NamespaceContext, NamespaceLookup, QName};
pub use scd::{parse_relative_scd, parse_scp, Axis, NameTest, Resolver, ScdParser, Step};

/// Version of the xmlschema-scd library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// XSD namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
