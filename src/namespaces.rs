//! XML namespace handling
//!
//! Qualified names for schema components and the prefix bindings used to
//! resolve name tests inside designators.

use std::collections::HashMap;
use std::fmt;

use crate::XML_NAMESPACE;

/// XML Namespace URI
pub type NamespaceUri = String;

/// Namespace prefix
pub type Prefix = String;

/// Qualified name (QName) - combination of namespace and local name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<NamespaceUri>,
    /// Local name
    pub local_name: String,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
        }
    }
}

/// Clark notation: `{namespace}local`, or the bare local name
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Prefix lookup used while parsing name tests
///
/// The parser only ever asks for the URI bound to a non-empty prefix; the
/// empty prefix always means "no namespace" and is never looked up.
pub trait NamespaceLookup {
    /// Get the namespace URI bound to `prefix`
    fn get_uri(&self, prefix: &str) -> Option<&str>;
}

/// Namespace context for resolving prefixes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: HashMap<Prefix, NamespaceUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self {
            prefixes: HashMap::new(),
        }
    }

    /// Context with the `xml` prefix pre-bound, as every XPointer context has
    pub fn with_xml_prefix() -> Self {
        let mut ctx = Self::new();
        ctx.declare_prefix("xml", XML_NAMESPACE);
        ctx
    }

    /// Bind `prefix` to `uri`, replacing any earlier binding
    pub fn declare_prefix(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), uri.into());
    }

    /// Builder form of [`declare_prefix`](Self::declare_prefix)
    pub fn with_prefix(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.declare_prefix(prefix, uri);
        self
    }

    /// Number of bound prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check whether no prefix is bound
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl NamespaceLookup for NamespaceContext {
    fn get_uri(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(|s| s.as_str())
    }
}

impl NamespaceLookup for HashMap<String, String> {
    fn get_uri(&self, prefix: &str) -> Option<&str> {
        self.get(prefix).map(|s| s.as_str())
    }
}
