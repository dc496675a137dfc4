//! Schema Component Designator parser
//!
//! Two entry points:
//! - [`ScdParser::parse_scp`] parses a raw path (`/type::p:USAddress/@country`)
//!   against a caller-supplied namespace context;
//! - [`ScdParser::parse_relative_scd`] parses the wrapped pointer form
//!   `xmlns(p=uri)xscd(/path)`, building its own namespace context from the
//!   `xmlns(...)` parts.
//!
//! The scanner is character driven: the first character of each step body
//! decides its shape.

use crate::error::{Error, ParseError, Result};
use crate::limits::Limits;
use crate::names::{is_ncname_char, is_ncname_start_char, is_xml_whitespace};
use crate::namespaces::{NamespaceContext, NamespaceLookup};

use super::axis::Axis;
use super::step::{NameTest, Step};

/// Character scanner over one designator text
struct Scanner<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        let matches = expected
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c));
        if matches {
            self.pos += expected.chars().count();
        }
        matches
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, is_xml_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        ParseError::new(message)
            .with_position(self.pos)
            .with_expression(self.text)
            .into()
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.peek() {
            Some(c) => self.error(format!("expected {} but found '{}'", expected, c)),
            None => self.error(format!("expected {} but reached the end", expected)),
        }
    }

    fn read_ncname(&mut self) -> Result<String> {
        match self.peek() {
            Some(c) if is_ncname_start_char(c) => {}
            _ => return Err(self.unexpected("a name")),
        }
        let start = self.pos;
        while self.peek().map_or(false, is_ncname_char) {
            self.pos += 1;
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// `NCName (':' NCName)?`, leaving a following `::` unconsumed
    fn read_qname(&mut self) -> Result<(Option<String>, String)> {
        let first = self.read_ncname()?;
        if self.peek() == Some(':') && self.peek_at(1) != Some(':') {
            self.pos += 1;
            let local = self.read_ncname()?;
            Ok((Some(first), local))
        } else {
            Ok((None, first))
        }
    }

    /// Scheme data up to (not including) the closing parenthesis of the
    /// pointer part, with `^` escapes removed
    fn read_scheme_data(&mut self) -> Result<String> {
        let mut data = String::new();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => {
                    return Err(self.error(if depth > 0 {
                        "unbalanced '(' in scheme data"
                    } else {
                        "unterminated pointer part, missing ')'"
                    }))
                }
                Some('^') => {
                    self.pos += 1;
                    match self.peek() {
                        Some(c @ ('(' | ')' | '^')) => {
                            self.pos += 1;
                            data.push(c);
                        }
                        _ => return Err(self.error("'^' must escape '(', ')' or '^'")),
                    }
                }
                Some('(') => {
                    depth += 1;
                    self.pos += 1;
                    data.push('(');
                }
                Some(')') if depth == 0 => return Ok(data),
                Some(')') => {
                    depth -= 1;
                    self.pos += 1;
                    data.push(')');
                }
                Some(c) => {
                    self.pos += 1;
                    data.push(c);
                }
            }
        }
    }
}

/// Parser for Schema Component Designators
#[derive(Debug, Clone, Default)]
pub struct ScdParser {
    limits: Limits,
}

impl ScdParser {
    /// Create a parser with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom limits
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    /// Get the limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Parse a raw SCP
    ///
    /// `"/"` parses to the single [`Step::schema`] step. With `is_relative`
    /// the path must not start with `/`; a leading `./` is dropped and every
    /// other path is read as if it started with `/`.
    ///
    /// `ns` is only consulted for prefixed name tests; passing `None` and
    /// then using a prefix is a contract violation reported as
    /// [`Error::Internal`].
    pub fn parse_scp(
        &self,
        text: &str,
        ns: Option<&dyn NamespaceLookup>,
        is_relative: bool,
    ) -> Result<Vec<Step>> {
        self.limits.check_expression_length(text.chars().count())?;

        let body = if is_relative {
            if let Some(rest) = text.strip_prefix("./") {
                format!("/{}", rest)
            } else if text.starts_with('/') {
                return Err(ParseError::new("a relative designator must not start with '/'")
                    .with_position(0)
                    .with_expression(text)
                    .into());
            } else {
                format!("/{}", text)
            }
        } else if text == "/" {
            return Ok(vec![Step::schema()]);
        } else {
            text.to_string()
        };

        let mut scanner = Scanner::new(&body);
        if scanner.at_end() {
            return Err(scanner.error("empty designator"));
        }

        let mut steps = Vec::new();
        while !scanner.at_end() {
            scanner.expect('/')?;
            match scanner.peek() {
                // trailing '/'
                None => break,
                Some('/') => {
                    scanner.pos += 1;
                    if scanner.at_end() {
                        return Err(scanner.error("'//' must be followed by a step"));
                    }
                    steps.push(Step::descendant());
                }
                Some(_) => {}
            }
            let step = parse_step(&mut scanner, ns)?;
            log::trace!("parsed step {}", step);
            steps.push(step);
            self.limits.check_steps(steps.len())?;
        }

        if steps.is_empty() {
            return Err(scanner.error("designator has no steps"));
        }
        Ok(steps)
    }

    /// Parse the wrapped form `xmlns(prefix=uri)* xscd(scp)`
    ///
    /// The `xmlns(...)` bindings only apply to this designator. With
    /// `is_incomplete` the `xscd(...)` body is parsed as a relative SCP.
    pub fn parse_relative_scd(&self, text: &str, is_incomplete: bool) -> Result<Vec<Step>> {
        self.limits.check_expression_length(text.chars().count())?;

        let mut ctx = NamespaceContext::with_xml_prefix();
        let mut scanner = Scanner::new(text);
        loop {
            scanner.skip_whitespace();
            if scanner.eat_str("xmlns(") {
                let prefix = scanner.read_ncname()?;
                scanner.skip_whitespace();
                scanner.expect('=')?;
                scanner.skip_whitespace();
                let uri = scanner.read_scheme_data()?;
                scanner.expect(')')?;
                log::trace!("xmlns binding {} = {}", prefix, uri);
                ctx.declare_prefix(prefix, uri);
            } else if scanner.eat_str("xscd(") {
                let body = scanner.read_scheme_data()?;
                scanner.expect(')')?;
                scanner.skip_whitespace();
                if !scanner.at_end() {
                    return Err(scanner.error("unexpected content after the xscd() pointer part"));
                }
                return self.parse_scp(&body, Some(&ctx), is_incomplete);
            } else if scanner.at_end() {
                return Err(scanner.error("missing xscd() pointer part"));
            } else {
                return Err(scanner.unexpected("'xmlns(' or 'xscd('"));
            }
        }
    }
}

/// Parse one step body, positioned just after its leading `/`
fn parse_step(scanner: &mut Scanner<'_>, ns: Option<&dyn NamespaceLookup>) -> Result<Step> {
    let (axis, name_test) = match scanner.peek() {
        Some('@') => {
            scanner.pos += 1;
            (Axis::SchemaAttribute, parse_name_test(scanner, ns)?)
        }
        Some('~') => {
            scanner.pos += 1;
            (Axis::Type, parse_name_test(scanner, ns)?)
        }
        Some('.') => {
            scanner.pos += 1;
            (Axis::CurrentComponent, NameTest::Wildcard)
        }
        Some('0') => {
            scanner.pos += 1;
            (Axis::SchemaElement, NameTest::Zero)
        }
        Some('*') => {
            scanner.pos += 1;
            (Axis::SchemaElement, NameTest::Wildcard)
        }
        Some(c) if is_ncname_start_char(c) => {
            let start = scanner.pos;
            let (prefix, local) = scanner.read_qname()?;
            if scanner.eat_str("::") {
                if let Some(prefix) = prefix {
                    return Err(Error::Unsupported(format!(
                        "extension axis '{}:{}'",
                        prefix, local
                    )));
                }
                let axis = Axis::from_name(&local);
                if axis == Axis::Unknown {
                    return Err(ParseError::new(format!("unknown axis '{}'", local))
                        .with_position(start)
                        .with_expression(scanner.text)
                        .into());
                }
                (axis, parse_name_test(scanner, ns)?)
            } else if scanner.peek() == Some('(') {
                let name = match prefix {
                    Some(prefix) => format!("{}:{}", prefix, local),
                    None => local,
                };
                return Err(Error::Unsupported(format!("extension accessor '{}()'", name)));
            } else {
                (Axis::SchemaElement, resolve_name(prefix, local, ns)?)
            }
        }
        _ => return Err(scanner.unexpected("a step")),
    };

    let predicate = if scanner.eat('[') {
        parse_predicate(scanner)?
    } else {
        0
    };

    match scanner.peek() {
        None | Some('/') => Ok(Step {
            axis,
            name_test: Some(name_test),
            predicate,
        }),
        Some(c) => Err(scanner.error(format!("unexpected character '{}' after step", c))),
    }
}

/// `'*' | '0' | NCName (':' NCName)?`
fn parse_name_test(scanner: &mut Scanner<'_>, ns: Option<&dyn NamespaceLookup>) -> Result<NameTest> {
    if scanner.eat('*') {
        return Ok(NameTest::Wildcard);
    }
    if scanner.eat('0') {
        return Ok(NameTest::Zero);
    }
    match scanner.peek() {
        Some(c) if is_ncname_start_char(c) => {
            let (prefix, local) = scanner.read_qname()?;
            resolve_name(prefix, local, ns)
        }
        _ => Err(scanner.unexpected("a name test")),
    }
}

fn resolve_name(
    prefix: Option<String>,
    local: String,
    ns: Option<&dyn NamespaceLookup>,
) -> Result<NameTest> {
    let Some(prefix) = prefix else {
        return Ok(NameTest::Qualified { uri: None, local });
    };
    let ns = ns.ok_or_else(|| {
        Error::Internal(format!(
            "no namespace context to resolve prefix '{}'",
            prefix
        ))
    })?;
    match ns.get_uri(&prefix) {
        Some(uri) => Ok(NameTest::Qualified {
            uri: Some(uri.to_string()),
            local,
        }),
        None => Err(Error::UndeclaredPrefix(prefix)),
    }
}

/// Positive integer and closing `]`, the `[` already consumed
fn parse_predicate(scanner: &mut Scanner<'_>) -> Result<u32> {
    let start = scanner.pos;
    while scanner.peek().map_or(false, |c| c.is_ascii_digit()) {
        scanner.pos += 1;
    }
    if scanner.pos == start {
        return Err(scanner.unexpected("a positive integer predicate"));
    }
    let digits: String = scanner.chars[start..scanner.pos].iter().collect();
    scanner.expect(']')?;

    let value: u32 = digits
        .parse()
        .map_err(|_| Error::InvalidPredicate(format!("[{}] is too large", digits)))?;
    if value == 0 {
        return Err(Error::InvalidPredicate(
            "[0]: positions start at 1".to_string(),
        ));
    }
    Ok(value)
}

/// Parse a raw SCP with default limits
pub fn parse_scp(
    text: &str,
    ns: Option<&dyn NamespaceLookup>,
    is_relative: bool,
) -> Result<Vec<Step>> {
    ScdParser::new().parse_scp(text, ns, is_relative)
}

/// Parse a wrapped `xmlns(...)*xscd(...)` designator with default limits
pub fn parse_relative_scd(text: &str, is_incomplete: bool) -> Result<Vec<Step>> {
    ScdParser::new().parse_relative_scd(text, is_incomplete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PO: &str = "http://example.com/schema/po";

    fn po_context() -> NamespaceContext {
        NamespaceContext::new().with_prefix("p", PO)
    }

    fn scp(text: &str) -> Result<Vec<Step>> {
        let ctx = po_context();
        parse_scp(text, Some(&ctx), false)
    }

    #[test]
    fn test_root_step() {
        assert_eq!(scp("/").unwrap(), vec![Step::schema()]);
    }

    #[test]
    fn test_abbreviations() {
        let steps = scp("/@p:country/~p:USAddress/./0/*").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::new(Axis::SchemaAttribute, NameTest::qualified(Some(PO), "country")),
                Step::new(Axis::Type, NameTest::qualified(Some(PO), "USAddress")),
                Step::new(Axis::CurrentComponent, NameTest::Wildcard),
                Step::new(Axis::SchemaElement, NameTest::Zero),
                Step::new(Axis::SchemaElement, NameTest::Wildcard),
            ]
        );
    }

    #[test]
    fn test_explicit_axes() {
        let steps = scp("/type::p:USAddress/facet::maxLength/annotation::*[2]").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::new(Axis::Type, NameTest::qualified(Some(PO), "USAddress")),
                Step::new(Axis::Facet, NameTest::local("maxLength")),
                Step::new(Axis::Annotation, NameTest::Wildcard).with_predicate(2),
            ]
        );
    }

    #[test]
    fn test_default_axis_is_schema_element() {
        let steps = scp("/p:purchaseOrder/shipTo[1]").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::new(Axis::SchemaElement, NameTest::qualified(Some(PO), "purchaseOrder")),
                Step::new(Axis::SchemaElement, NameTest::local("shipTo")).with_predicate(1),
            ]
        );
    }

    #[test]
    fn test_descendant_steps() {
        let steps = scp("//schemaElement::foo").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::descendant(),
                Step::new(Axis::SchemaElement, NameTest::local("foo")),
            ]
        );

        let steps = scp("/type::*//0").unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1], Step::descendant());
        assert_eq!(steps[2].name_test, Some(NameTest::Zero));
    }

    #[test]
    fn test_trailing_slash() {
        assert_eq!(scp("/type::*/").unwrap(), scp("/type::*").unwrap());
        assert!(scp("/type::*//").unwrap_err().is_grammar());
        assert!(scp("//").unwrap_err().is_grammar());
    }

    #[test]
    fn test_grammar_errors() {
        for bad in ["", "type::*", "/type::", "/type::*x", "/#", "/@", "/~/", "/a[", "/a[x]", "/a[1", "/.."] {
            let err = scp(bad).unwrap_err();
            assert!(err.is_grammar(), "{:?} gave {:?}", bad, err);
        }
    }

    #[test]
    fn test_unknown_axis() {
        let err = scp("/child::a").unwrap_err();
        match err {
            Error::Grammar(e) => {
                assert!(e.message.contains("unknown axis 'child'"));
                assert_eq!(e.position, Some(1));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_extension_constructs_unsupported() {
        assert!(scp("/p:ext::a").unwrap_err().is_unsupported());
        assert!(scp("/p:fn()").unwrap_err().is_unsupported());
        assert!(scp("/fn(x)").unwrap_err().is_unsupported());
    }

    #[test]
    fn test_invalid_predicates() {
        assert!(matches!(scp("/a[0]"), Err(Error::InvalidPredicate(_))));
        assert!(matches!(scp("/a[99999999999]"), Err(Error::InvalidPredicate(_))));
        assert_eq!(scp("/a[007]").unwrap()[0].predicate, 7);
    }

    #[test]
    fn test_prefix_resolution() {
        assert!(matches!(scp("/q:a"), Err(Error::UndeclaredPrefix(p)) if p == "q"));
        assert!(matches!(
            parse_scp("/p:a", None, false),
            Err(Error::Internal(_))
        ));
        // no prefix needs no context
        let steps = parse_scp("/a", None, false).unwrap();
        assert_eq!(steps[0].name_test, Some(NameTest::local("a")));
    }

    #[test]
    fn test_relative_paths() {
        let ctx = po_context();
        let rel = |t: &str| parse_scp(t, Some(&ctx), true);

        assert_eq!(rel("@p:country").unwrap(), scp("/@p:country").unwrap());
        assert_eq!(rel("./facet::*").unwrap(), scp("/facet::*").unwrap());
        assert_eq!(rel(".//foo").unwrap(), scp("//foo").unwrap());
        assert_eq!(rel(".").unwrap(), vec![Step::new(Axis::CurrentComponent, NameTest::Wildcard)]);
        assert!(rel("/type::*").unwrap_err().is_grammar());
        assert!(rel("/").unwrap_err().is_grammar());
        assert!(rel("./").unwrap_err().is_grammar());
    }

    #[test]
    fn test_relative_scd() {
        let steps =
            parse_relative_scd("xmlns(p=http://example.com/schema/po)xscd(/type::p:USAddress)", false)
                .unwrap();
        assert_eq!(
            steps,
            vec![Step::new(Axis::Type, NameTest::qualified(Some(PO), "USAddress"))]
        );
    }

    #[test]
    fn test_relative_scd_multiple_bindings_and_whitespace() {
        let steps = parse_relative_scd(
            "xmlns(a = urn:a) xmlns(b=urn:b)\n xscd(/a:x/b:y)",
            false,
        )
        .unwrap();
        assert_eq!(steps[0].name_test, Some(NameTest::qualified(Some("urn:a"), "x")));
        assert_eq!(steps[1].name_test, Some(NameTest::qualified(Some("urn:b"), "y")));
    }

    #[test]
    fn test_relative_scd_xml_prefix() {
        let steps = parse_relative_scd("xscd(/@xml:lang)", false).unwrap();
        assert_eq!(
            steps[0].name_test,
            Some(NameTest::qualified(Some(crate::XML_NAMESPACE), "lang"))
        );
    }

    #[test]
    fn test_relative_scd_incomplete() {
        let steps = parse_relative_scd("xmlns(p=urn:p)xscd(facet::p:x)", true).unwrap();
        assert_eq!(steps, vec![Step::new(Axis::Facet, NameTest::qualified(Some("urn:p"), "x"))]);
    }

    #[test]
    fn test_scheme_data_escapes() {
        let steps = parse_relative_scd("xmlns(p=urn:a^(b^)c^^d(e))xscd(/p:x)", false).unwrap();
        assert_eq!(
            steps[0].name_test,
            Some(NameTest::qualified(Some("urn:a(b)c^d(e)"), "x"))
        );
    }

    #[test]
    fn test_scheme_data_errors() {
        for bad in [
            "xmlns(p=urn:a^b)xscd(/p:x)",
            "xmlns(p=urn:(a)xscd(/p:x)",
            "xmlns(p=urn:a",
            "xmlns(=urn:a)xscd(/x)",
            "xmlns(p urn:a)xscd(/x)",
        ] {
            assert!(parse_relative_scd(bad, false).unwrap_err().is_grammar(), "{}", bad);
        }
    }

    #[test]
    fn test_missing_or_foreign_pointer_parts() {
        assert!(parse_relative_scd("xmlns(p=urn:a)", false).unwrap_err().is_grammar());
        assert!(parse_relative_scd("", false).unwrap_err().is_grammar());
        assert!(parse_relative_scd("element(/1)", false).unwrap_err().is_grammar());
        assert!(parse_relative_scd("xscd(/a)junk", false).unwrap_err().is_grammar());
        assert!(parse_relative_scd("/type::*", false).unwrap_err().is_grammar());
    }

    #[test]
    fn test_bindings_are_private_to_the_call() {
        parse_relative_scd("xmlns(p=urn:a)xscd(/p:x)", false).unwrap();
        assert!(matches!(
            parse_relative_scd("xscd(/p:x)", false),
            Err(Error::UndeclaredPrefix(_))
        ));
    }

    #[test]
    fn test_limits() {
        let parser = ScdParser::with_limits(Limits {
            max_steps: 2,
            max_expression_length: 20,
            ..Limits::default()
        });
        assert!(parser.parse_scp("/a/b", None, false).is_ok());
        assert!(matches!(
            parser.parse_scp("/a/b/c", None, false),
            Err(Error::LimitExceeded(_))
        ));
        assert!(matches!(
            parser.parse_scp("/aaaaaaaaaaaaaaaaaaaaaaaa", None, false),
            Err(Error::LimitExceeded(_))
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_parser_never_panics(text in "\\PC{0,40}") {
                let ctx = po_context();
                let _ = parse_scp(&text, Some(&ctx), false);
                let _ = parse_scp(&text, Some(&ctx), true);
                let _ = parse_relative_scd(&text, false);
            }

            #[test]
            fn prop_predicate_round_trips(n in 1u32..=u32::MAX) {
                let steps = parse_scp(&format!("/type::*[{}]", n), None, false).unwrap();
                prop_assert_eq!(steps[0].predicate, n);
            }
        }
    }
}
