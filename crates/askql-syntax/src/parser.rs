//! Recursive-descent parser for ask query strings.
//!
//! ```text
//! query      = disjunct ("OR" disjunct)*
//! disjunct   = condition+
//! condition  = "[[" body "]]" | "<q>" query "</q>"
//! body       = chain "::" values modifiers
//!            | "Category:" names modifiers
//!            | "Concept:" names
//!            | namespace ":+"
//!            | "+"
//!            | values
//! values     = value ("||" value)*
//! value      = "+" | "<q>" query "</q>" | comparator? literal
//! modifiers  = ("|" "+depth=" number)*
//! ```
//!
//! Literals are typed by the datatype of the property they restrict. Values
//! outside a property restriction are pages.

use std::ops::Range;

use askql_core::namespace;
use askql_core::store::{DatatypeRegistry, QueryParseError, QueryParser};
use askql_core::{
    ClassDescription, Comparator, DataItem, DataItemType, Description, PageRef, PropertyRef,
};

use crate::error::{ParseError, ParseErrorKind, Result};
use crate::lexer::{Token, TokenKind, lex};

const DEFAULT_RECURSION_LIMIT: u32 = 64;

/// Comparator prefixes, longest first.
const COMPARATORS: &[(&str, Comparator)] = &[
    ("!~~", Comparator::PrimNotLike),
    ("!~", Comparator::NotLike),
    ("~~", Comparator::PrimLike),
    ("~", Comparator::Like),
    ("<<", Comparator::Lt),
    (">>", Comparator::Gt),
    ("<=", Comparator::Le),
    (">=", Comparator::Ge),
    ("≤", Comparator::Le),
    ("≥", Comparator::Ge),
    ("<", Comparator::Le),
    (">", Comparator::Ge),
    ("!", Comparator::Ne),
];

/// Parses ask query strings, typing literals through a datatype registry.
#[derive(Clone, Copy)]
pub struct AskParser<'a> {
    datatypes: &'a dyn DatatypeRegistry,
    recursion_limit: u32,
}

impl<'a> AskParser<'a> {
    pub fn new(datatypes: &'a dyn DatatypeRegistry) -> Self {
        Self {
            datatypes,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Maximum `<q>` nesting depth.
    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse_query(&self, source: &str) -> Result<Description> {
        let mut parser = Parser {
            source,
            tokens: lex(source),
            pos: 0,
            depth: 0,
            limit: self.recursion_limit,
            datatypes: self.datatypes,
        };
        parser.query(None)
    }
}

impl QueryParser for AskParser<'_> {
    fn parse(&self, text: &str) -> std::result::Result<Description, QueryParseError> {
        self.parse_query(text).map_err(Into::into)
    }
}

/// Consecutive literal tokens read back as one source slice.
struct Run<'src> {
    text: &'src str,
    span: Range<usize>,
}

struct Parser<'p, 'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    limit: u32,
    datatypes: &'p dyn DatatypeRegistry,
}

impl<'src> Parser<'_, 'src> {
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    /// Span of the current token, or an empty span at end of input.
    fn here(&self) -> Range<usize> {
        match self.current() {
            Some(token) => token.span.clone(),
            None => self.source.len()..self.source.len(),
        }
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn text(&self, span: &Range<usize>) -> &'src str {
        &self.source[span.clone()]
    }

    fn unexpected(&self, token: &Token) -> ParseError {
        let raw = self.text(&token.span);
        let text = raw.trim();
        let start = token.span.start + (raw.len() - raw.trim_start().len());
        ParseError::new(
            ParseErrorKind::Unexpected(text.to_string()),
            start..start + text.len(),
        )
    }

    fn unexpected_here(&self) -> ParseError {
        match self.current() {
            Some(token) => self.unexpected(token),
            None => ParseError::new(ParseErrorKind::Expected("more input"), self.here()),
        }
    }

    fn run(&mut self) -> Run<'src> {
        let start = self.here().start;
        let mut end = start;
        while let Some(token) = self.current() {
            if !token.kind.is_literal() {
                break;
            }
            end = token.span.end;
            self.pos += 1;
        }
        Run {
            text: &self.source[start..end],
            span: start..end,
        }
    }

    fn query(&mut self, terminator: Option<TokenKind>) -> Result<Description> {
        let start = self.here();
        let mut disjuncts = Vec::new();
        let mut current = Vec::new();

        while let Some(kind) = self.peek() {
            if Some(kind) == terminator {
                break;
            }
            match kind {
                TokenKind::ConditionOpen => current.push(self.condition()?),
                TokenKind::SubqueryOpen => current.push(self.subquery()?),
                TokenKind::Text => {
                    let Some(token) = self.bump() else { break };
                    let text = self.text(&token.span).trim();
                    if text.is_empty() {
                        continue;
                    }
                    if text != "OR" || current.is_empty() {
                        return Err(self.unexpected(&token));
                    }
                    disjuncts.push(conjoin(std::mem::take(&mut current)));
                }
                _ => return Err(self.unexpected_here()),
            }
        }

        if current.is_empty() {
            let kind = if disjuncts.is_empty() {
                ParseErrorKind::EmptyQuery
            } else {
                ParseErrorKind::Expected("a condition after `OR`")
            };
            let span = if disjuncts.is_empty() { start } else { self.here() };
            return Err(ParseError::new(kind, span));
        }
        disjuncts.push(conjoin(current));
        Ok(disjoin(disjuncts))
    }

    fn subquery(&mut self) -> Result<Description> {
        let open = self.here();
        self.bump();
        self.depth += 1;
        if self.depth > self.limit {
            return Err(ParseError::new(ParseErrorKind::TooDeep(self.limit), open));
        }

        let inner = self.query(Some(TokenKind::SubqueryClose))?;
        if !self.at(TokenKind::SubqueryClose) {
            return Err(ParseError::new(ParseErrorKind::UnclosedSubquery, open));
        }
        self.bump();
        self.depth -= 1;
        Ok(inner)
    }

    fn condition(&mut self) -> Result<Description> {
        let open = self.here();
        self.bump();

        let head = self.run();
        let description = if self.at(TokenKind::DoubleColon) {
            self.bump();
            self.property_condition(head)?
        } else {
            self.plain_condition(head)?
        };

        match self.peek() {
            Some(TokenKind::ConditionClose) => {
                self.bump();
                Ok(description)
            }
            Some(_) => Err(self.unexpected_here()),
            None => Err(ParseError::new(ParseErrorKind::UnclosedCondition, open)),
        }
    }

    /// `[[A.-B::values]]`: each chain link restricts the pages the next one
    /// starts from.
    fn property_condition(&mut self, head: Run<'src>) -> Result<Description> {
        let chain = property_chain(&head)?;
        let Some(last) = chain.last() else {
            return Err(ParseError::new(
                ParseErrorKind::Expected("a property name"),
                head.span,
            ));
        };
        let ty = if last.inverse {
            DataItemType::Page
        } else {
            self.datatypes.datatype_of(last)
        };

        let values = self.values(Some(last), ty)?;
        self.reject_modifiers()?;

        let inner = disjoin(values);
        Ok(chain
            .into_iter()
            .rev()
            .fold(inner, |inner, property| Description::some_property(property, inner)))
    }

    fn plain_condition(&mut self, head: Run<'src>) -> Result<Description> {
        let text = head.text.trim();
        if text.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::Expected("a condition"),
                head.span,
            ));
        }
        if text == "+" {
            return Ok(Description::thing());
        }

        if let Some(rest) = text.strip_prefix(':') {
            if rest.trim() == "+" {
                return Ok(Description::namespace(namespace::MAIN));
            }
            let first = Run {
                text: rest,
                span: head.span,
            };
            return self.page_values(first);
        }

        let Some((prefix, rest)) = text.split_once(':') else {
            return self.page_values(head);
        };
        let text_start = head.span.start + (head.text.len() - head.text.trim_start().len());
        let rest_start = text_start + prefix.len() + 1;
        let rest_span = rest_start..rest_start + rest.len();
        let namespace = namespace::by_name(prefix);
        let names_all = rest.trim() == "+";

        match namespace {
            Some(ns) if names_all => {
                self.reject_modifiers()?;
                Ok(Description::namespace(ns))
            }
            Some(namespace::CATEGORY) => {
                let names = self.names(rest, rest_span)?;
                let mut class = ClassDescription::new(names.into_iter().map(PageRef::category));
                if let Some(depth) = self.depth_modifier()? {
                    class = class.with_depth(depth);
                }
                Ok(Description::Class(class))
            }
            Some(namespace::CONCEPT) => {
                let names = self.names(rest, rest_span)?;
                self.reject_modifiers()?;
                Ok(disjoin(names.into_iter().map(Description::concept).collect()))
            }
            _ => self.page_values(head),
        }
    }

    /// Titles separated by `||`, the first one already read.
    fn names(&mut self, first: &'src str, span: Range<usize>) -> Result<Vec<&'src str>> {
        let mut names = vec![non_empty(first, span)?];
        while self.at(TokenKind::DoublePipe) {
            self.bump();
            let run = self.run();
            names.push(non_empty(run.text, run.span)?);
        }
        Ok(names)
    }

    fn page_values(&mut self, first: Run<'src>) -> Result<Description> {
        let mut values = vec![self.value(first, None, DataItemType::Page)?];
        if self.at(TokenKind::DoublePipe) {
            self.bump();
            values.extend(self.values(None, DataItemType::Page)?);
        }
        self.reject_modifiers()?;
        Ok(disjoin(values))
    }

    fn values(
        &mut self,
        property: Option<&PropertyRef>,
        ty: DataItemType,
    ) -> Result<Vec<Description>> {
        let mut values = Vec::new();
        loop {
            if self.at(TokenKind::SubqueryOpen) {
                values.push(self.subquery()?);
            } else {
                let run = self.run();
                values.push(self.value(run, property, ty)?);
            }
            if !self.at(TokenKind::DoublePipe) {
                return Ok(values);
            }
            self.bump();
        }
    }

    fn value(
        &self,
        run: Run<'src>,
        property: Option<&PropertyRef>,
        ty: DataItemType,
    ) -> Result<Description> {
        let text = run.text.trim();
        if text.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyValue, run.span));
        }
        if text == "+" {
            return Ok(Description::thing());
        }

        let (comparator, literal) = split_comparator(text);
        let literal = literal.trim();
        if literal.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyValue, run.span));
        }
        let literal = typed_literal(literal, comparator, ty)
            .map_err(|kind| ParseError::new(kind, run.span))?;
        Ok(Description::value(property.cloned(), comparator, literal))
    }

    /// `|+depth=N` modifiers; the last one wins.
    fn depth_modifier(&mut self) -> Result<Option<u32>> {
        let mut depth = None;
        while self.at(TokenKind::Pipe) {
            self.bump();
            let run = self.run();
            let text = run.text.trim();
            let Some(value) = text.strip_prefix("+depth=") else {
                return Err(ParseError::new(
                    ParseErrorKind::UnsupportedModifier(text.to_string()),
                    run.span,
                ));
            };
            let value = value.trim();
            let parsed = value.parse::<u32>().map_err(|_| {
                ParseError::new(ParseErrorKind::InvalidNumber(value.to_string()), run.span.clone())
            })?;
            depth = Some(parsed);
        }
        Ok(depth)
    }

    fn reject_modifiers(&mut self) -> Result<()> {
        if !self.at(TokenKind::Pipe) {
            return Ok(());
        }
        self.bump();
        let run = self.run();
        Err(ParseError::new(
            ParseErrorKind::UnsupportedModifier(run.text.trim().to_string()),
            run.span,
        ))
    }
}

fn property_chain(head: &Run<'_>) -> Result<Vec<PropertyRef>> {
    let mut chain = Vec::new();
    for link in head.text.split('.') {
        let link = link.trim();
        let (inverse, name) = match link.strip_prefix('-') {
            Some(name) => (true, name.trim()),
            None => (false, link),
        };
        if name.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::Expected("a property name"),
                head.span.clone(),
            ));
        }
        let property = PropertyRef::new(name);
        chain.push(if inverse { property.inverted() } else { property });
    }
    Ok(chain)
}

fn non_empty(text: &str, span: Range<usize>) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyValue, span));
    }
    Ok(text)
}

fn split_comparator(text: &str) -> (Comparator, &str) {
    COMPARATORS
        .iter()
        .find_map(|(prefix, comparator)| {
            text.strip_prefix(prefix).map(|rest| (*comparator, rest))
        })
        .unwrap_or((Comparator::Eq, text))
}

fn typed_literal(
    text: &str,
    comparator: Comparator,
    ty: DataItemType,
) -> std::result::Result<DataItem, ParseErrorKind> {
    match ty {
        DataItemType::Page => Ok(DataItem::Page(PageRef::parse_prefixed(text))),
        // Patterns over numbers compare against the sort key text.
        DataItemType::Number if comparator.is_like() => Ok(DataItem::Text(text.to_string())),
        DataItemType::Number => text
            .replace(',', "")
            .parse::<f64>()
            .map(DataItem::Number)
            .map_err(|_| ParseErrorKind::InvalidNumber(text.to_string())),
        DataItemType::Text => Ok(DataItem::Text(text.to_string())),
        DataItemType::Uri => Ok(DataItem::Uri(text.to_string())),
        DataItemType::Boolean => match text.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(DataItem::Boolean(true)),
            "false" | "no" | "0" => Ok(DataItem::Boolean(false)),
            _ => Err(ParseErrorKind::InvalidBoolean(text.to_string())),
        },
    }
}

fn conjoin(mut children: Vec<Description>) -> Description {
    if children.len() == 1 {
        return children.remove(0);
    }
    Description::and(children)
}

fn disjoin(mut children: Vec<Description>) -> Description {
    if children.len() == 1 {
        return children.remove(0);
    }
    Description::or(children)
}
