//! Schema Component Designators
//!
//! An SCD addresses components of a compiled schema with a path, e.g.
//! `xmlns(p=http://example.com/schema/po)xscd(/type::p:USAddress/@country)`.
//!
//! Reference: https://www.w3.org/TR/xmlschema-ref/

pub mod axis;
pub mod parser;
pub mod resolver;
pub mod step;

pub use axis::{axis_to_string, string_to_axis, Axis};
pub use parser::{parse_relative_scd, parse_scp, ScdParser};
pub use resolver::Resolver;
pub use step::{format_steps, NameTest, Step};
