use crate::paths::{Cardinality, PropertyPath};
use oxiri::{Iri, IriParseError};
use rdf_paths_model::vocab::rdf;
use rdf_paths_model::NamedNode;
use rustc_hash::FxHashMap;
use std::str::FromStr;

/// An error raised while parsing the textual form of a property path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid property path at position {position}: {message}")]
pub struct PathSyntaxError {
    position: usize,
    message: String,
}

impl PathSyntaxError {
    fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }

    /// The byte offset in the input at which the error was detected.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Parses property paths written in SPARQL syntax.
///
/// Besides the SPARQL 1.1 operators, the parser accepts the `{n}`, `{n,}`, `{,m}` and `{n,m}`
/// cardinality forms. Cardinalities that have a dedicated operator are normalized, for example
/// `{1,}` becomes `+` and `{0,1}` becomes `?`.
///
/// ```
/// use rdf_paths_logical::paths::{PathParser, PropertyPath};
///
/// let parser = PathParser::new().with_prefix("ex", "http://example.com/")?;
/// let path = parser.parse("ex:knows+/ex:name")?;
/// assert_eq!(path.to_string(), "<http://example.com/knows>+/<http://example.com/name>");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathParser {
    prefixes: FxHashMap<String, String>,
    base_iri: Option<Iri<String>>,
}

impl PathParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a prefix that can be used in prefixed names (`prefix:local`).
    pub fn with_prefix(
        mut self,
        prefix: impl Into<String>,
        iri: impl Into<String>,
    ) -> Result<Self, IriParseError> {
        let iri = Iri::parse(iri.into())?;
        self.prefixes.insert(prefix.into(), iri.into_inner());
        Ok(self)
    }

    /// Sets the IRI against which relative IRIs are resolved.
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, IriParseError> {
        self.base_iri = Some(Iri::parse(base_iri.into())?);
        Ok(self)
    }

    pub fn parse(&self, input: &str) -> Result<PropertyPath, PathSyntaxError> {
        let mut state = ParserState {
            parser: self,
            input,
            position: 0,
        };
        let path = state.parse_alternative()?;
        state.skip_whitespace();
        match state.peek() {
            None => Ok(path),
            Some(c) => Err(state.error(format!("unexpected character '{c}'"))),
        }
    }
}

impl FromStr for PropertyPath {
    type Err = PathSyntaxError;

    /// Parses a path that only uses full IRIs and the `a` keyword.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        PathParser::new().parse(input)
    }
}

struct ParserState<'input> {
    parser: &'input PathParser,
    input: &'input str,
    position: usize,
}

impl<'input> ParserState<'input> {
    /// `PathAlternative ::= PathSequence ( '|' PathSequence )*`
    fn parse_alternative(&mut self) -> Result<PropertyPath, PathSyntaxError> {
        let mut path = self.parse_sequence()?;
        while self.consume('|') {
            path = PropertyPath::alternative(path, self.parse_sequence()?);
        }
        Ok(path)
    }

    /// `PathSequence ::= PathEltOrInverse ( '/' PathEltOrInverse )*`
    fn parse_sequence(&mut self) -> Result<PropertyPath, PathSyntaxError> {
        let mut path = self.parse_element_or_inverse()?;
        while self.consume('/') {
            path = PropertyPath::sequence(path, self.parse_element_or_inverse()?);
        }
        Ok(path)
    }

    /// `PathEltOrInverse ::= PathElt | '^' PathElt`
    fn parse_element_or_inverse(&mut self) -> Result<PropertyPath, PathSyntaxError> {
        if self.consume('^') {
            Ok(PropertyPath::inverse(self.parse_element()?))
        } else {
            self.parse_element()
        }
    }

    /// `PathElt ::= PathPrimary PathMod?`
    fn parse_element(&mut self) -> Result<PropertyPath, PathSyntaxError> {
        let primary = self.parse_primary()?;
        self.skip_whitespace();
        let cardinality = match self.peek() {
            Some('*') => {
                self.advance();
                Cardinality::ZeroOrMore
            }
            Some('+') => {
                self.advance();
                Cardinality::OneOrMore
            }
            Some('?') => {
                self.advance();
                Cardinality::ZeroOrOne
            }
            Some('{') => self.parse_cardinality()?,
            _ => return Ok(primary),
        };
        Ok(PropertyPath::with_cardinality(primary, cardinality))
    }

    /// `PathPrimary ::= iri | 'a' | '!' PathNegatedPropertySet | '(' Path ')'`
    fn parse_primary(&mut self) -> Result<PropertyPath, PathSyntaxError> {
        self.skip_whitespace();
        match self.peek() {
            Some('(') => {
                self.advance();
                let path = self.parse_alternative()?;
                self.expect(')')?;
                Ok(path)
            }
            Some('!') => {
                self.advance();
                self.parse_negated_set()
            }
            Some(_) => Ok(PropertyPath::Property(self.parse_predicate()?)),
            None => Err(self.error("expected a path")),
        }
    }

    fn parse_negated_set(&mut self) -> Result<PropertyPath, PathSyntaxError> {
        let mut forward = Vec::new();
        let mut inverse = Vec::new();

        self.skip_whitespace();
        if self.consume('(') {
            let start = self.position;
            if self.consume(')') {
                return Err(PathSyntaxError::new(
                    start,
                    "a negated property set must not be empty",
                ));
            }
            loop {
                self.parse_negated_member(&mut forward, &mut inverse)?;
                if self.consume(')') {
                    break;
                }
                self.expect('|')?;
            }
        } else {
            self.parse_negated_member(&mut forward, &mut inverse)?;
        }

        Ok(PropertyPath::negated_set(forward, inverse))
    }

    /// `PathOneInPropertySet ::= iri | 'a' | '^' ( iri | 'a' )`
    fn parse_negated_member(
        &mut self,
        forward: &mut Vec<NamedNode>,
        inverse: &mut Vec<NamedNode>,
    ) -> Result<(), PathSyntaxError> {
        if self.consume('^') {
            self.skip_whitespace();
            inverse.push(self.parse_predicate()?);
        } else {
            forward.push(self.parse_predicate()?);
        }
        Ok(())
    }

    /// Parses `{n}`, `{n,}`, `{,m}` and `{n,m}`.
    fn parse_cardinality(&mut self) -> Result<Cardinality, PathSyntaxError> {
        let start = self.position;
        self.expect('{')?;

        let min = self.parse_integer()?;
        if self.consume('}') {
            return match min {
                Some(n) => Ok(Cardinality::Fixed(n)),
                None => Err(PathSyntaxError::new(start, "expected a cardinality")),
            };
        }

        self.expect(',')?;
        let max = self.parse_integer()?;
        self.expect('}')?;

        match (min, max) {
            (Some(0), None) => Ok(Cardinality::ZeroOrMore),
            (Some(1), None) => Ok(Cardinality::OneOrMore),
            (Some(n), None) => Ok(Cardinality::NOrMore(n)),
            (None, Some(0)) => Err(PathSyntaxError::new(
                start,
                "the maximum cardinality must be greater than zero",
            )),
            (None | Some(0), Some(1)) => Ok(Cardinality::ZeroOrOne),
            (None, Some(m)) => Ok(Cardinality::ZeroToN(m)),
            (Some(n), Some(m)) if m < n => Err(PathSyntaxError::new(
                start,
                format!("the maximum cardinality {m} is smaller than the minimum cardinality {n}"),
            )),
            (Some(n), Some(m)) if n == m => Ok(Cardinality::Fixed(n)),
            (Some(n), Some(m)) => Ok(Cardinality::NToM(n, m)),
            (None, None) => Err(PathSyntaxError::new(start, "expected a cardinality")),
        }
    }

    fn parse_integer(&mut self) -> Result<Option<u32>, PathSyntaxError> {
        self.skip_whitespace();
        let start = self.position;
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Ok(None);
        }
        digits
            .parse()
            .map(Some)
            .map_err(|_| PathSyntaxError::new(start, format!("the cardinality {digits} is too large")))
    }

    /// Parses an IRI, a prefixed name or the `a` keyword.
    fn parse_predicate(&mut self) -> Result<NamedNode, PathSyntaxError> {
        self.skip_whitespace();
        let start = self.position;
        if self.consume('<') {
            let iri = self.take_while(|c| c != '>');
            self.expect('>')?;
            return self.resolve_iri(start, iri);
        }

        let name = self.take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '%'));
        if name.is_empty() {
            return Err(self.error("expected an IRI, a prefixed name or 'a'"));
        }
        if name == "a" {
            return Ok(rdf::TYPE.into_owned());
        }
        if name.ends_with('.') {
            return Err(PathSyntaxError::new(start, format!("invalid prefixed name '{name}'")));
        }

        let Some((prefix, local)) = name.split_once(':') else {
            return Err(PathSyntaxError::new(start, format!("invalid prefixed name '{name}'")));
        };
        let Some(namespace) = self.parser.prefixes.get(prefix) else {
            return Err(PathSyntaxError::new(start, format!("the prefix '{prefix}' is not declared")));
        };
        NamedNode::new(format!("{namespace}{local}"))
            .map_err(|e| PathSyntaxError::new(start, format!("invalid IRI: {e}")))
    }

    fn resolve_iri(&self, start: usize, iri: &str) -> Result<NamedNode, PathSyntaxError> {
        let resolved = match &self.parser.base_iri {
            Some(base_iri) => base_iri.resolve(iri).map(Iri::into_inner),
            None => Iri::parse(iri.to_owned()).map(Iri::into_inner),
        };
        resolved
            .map(NamedNode::new_unchecked)
            .map_err(|e| PathSyntaxError::new(start, format!("invalid IRI <{iri}>: {e}")))
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.position += c.len_utf8();
        }
    }

    /// Consumes `expected` (after optional whitespace) if it is the next character.
    fn consume(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PathSyntaxError> {
        if self.consume(expected) {
            return Ok(());
        }
        match self.peek() {
            Some(c) => Err(self.error(format!("expected '{expected}' but found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}' but the input ended"))),
        }
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'input str {
        let start = self.position;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
        &self.input[start..self.position]
    }

    fn error(&self, message: impl Into<String>) -> PathSyntaxError {
        PathSyntaxError::new(self.position, message)
    }
}
