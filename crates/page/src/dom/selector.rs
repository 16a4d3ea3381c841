//! A small CSS selector engine.
//!
//! Supports what the storefront markup contract needs: type, universal, `#id`,
//! `.class`, attribute presence and `=`, `^=`, `$=`, `*=` conditions,
//! descendant and child combinators, and comma-separated selector lists.

use std::iter::Peekable;
use std::str::Chars;

use shopfront_core::NodeId;

use super::Document;
use crate::error::{PageError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists { name: String },
    Equals { name: String, value: String },
    StartsWith { name: String, value: String },
    EndsWith { name: String, value: String },
    Contains { name: String, value: String },
}

impl AttrCondition {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        match self {
            Self::Exists { name } => doc.has_attribute(node, name),
            Self::Equals { name, value } => doc.get_attribute(node, name).as_deref() == Some(value.as_str()),
            Self::StartsWith { name, value } => doc
                .get_attribute(node, name)
                .is_some_and(|v| !value.is_empty() && v.starts_with(value.as_str())),
            Self::EndsWith { name, value } => doc
                .get_attribute(node, name)
                .is_some_and(|v| !value.is_empty() && v.ends_with(value.as_str())),
            Self::Contains { name, value } => doc
                .get_attribute(node, name)
                .is_some_and(|v| !value.is_empty() && v.contains(value.as_str())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

impl Compound {
    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(element) = doc.element(node) else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|tag| tag != element.tag()) {
            return false;
        }
        if self.id.is_some() && element.id() != self.id.as_deref() {
            return false;
        }
        self.classes.iter().all(|class| element.has_class(class))
            && self.attrs.iter().all(|attr| attr.matches(doc, node))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    compound: Compound,
    // Relation to the part on the left.
    combinator: Option<Combinator>,
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Vec<Part>>,
}

impl Selector {
    /// Parse a selector list.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidSelector` for empty input or unsupported
    /// syntax.
    pub fn parse(source: &str) -> Result<Self> {
        let mut parser = Parser {
            source,
            chars: source.chars().peekable(),
        };
        let alternatives = parser.parse_list()?;
        Ok(Self {
            source: source.to_owned(),
            alternatives,
        })
    }

    /// Selector matching any element with `class`.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidSelector` if `class` is not an identifier.
    pub fn class(class: &str) -> Result<Self> {
        Self::parse(&format!(".{class}"))
    }

    /// Selector matching any element carrying attribute `name`.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidSelector` if `name` is not an identifier.
    pub fn attribute(name: &str) -> Result<Self> {
        Self::parse(&format!("[{name}]"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` if `node` is an element matching any alternative.
    #[must_use]
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives
            .iter()
            .any(|parts| matches_chain(doc, node, parts))
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Selector {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn matches_chain(doc: &Document, node: NodeId, parts: &[Part]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return true;
    };
    if !last.compound.matches(doc, node) {
        return false;
    }
    match last.combinator {
        None => true,
        Some(Combinator::Child) => doc
            .parent(node)
            .is_some_and(|parent| matches_chain(doc, parent, rest)),
        Some(Combinator::Descendant) => {
            let mut current = doc.parent(node);
            while let Some(ancestor) = current {
                if matches_chain(doc, ancestor, rest) {
                    return true;
                }
                current = doc.parent(ancestor);
            }
            false
        }
    }
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

struct Parser<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn error(&self) -> PageError {
        PageError::InvalidSelector(self.source.to_owned())
    }

    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {
            skipped = true;
        }
        skipped
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.chars.next_if_eq(&expected).is_some() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn parse_list(&mut self) -> Result<Vec<Vec<Part>>> {
        let mut list = vec![self.parse_complex()?];
        while self.chars.next_if_eq(&',').is_some() {
            list.push(self.parse_complex()?);
        }
        if self.chars.peek().is_some() {
            return Err(self.error());
        }
        Ok(list)
    }

    fn parse_complex(&mut self) -> Result<Vec<Part>> {
        self.skip_whitespace();
        let mut parts = vec![Part {
            compound: self.parse_compound()?,
            combinator: None,
        }];
        loop {
            let had_whitespace = self.skip_whitespace();
            match self.chars.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.chars.next();
                    self.skip_whitespace();
                    parts.push(Part {
                        compound: self.parse_compound()?,
                        combinator: Some(Combinator::Child),
                    });
                }
                Some(_) if had_whitespace => parts.push(Part {
                    compound: self.parse_compound()?,
                    combinator: Some(Combinator::Descendant),
                }),
                Some(_) => return Err(self.error()),
            }
        }
        Ok(parts)
    }

    fn parse_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();
        let mut any = false;

        if self.chars.next_if_eq(&'*').is_some() {
            any = true;
        } else if self.chars.peek().copied().is_some_and(is_ident_char) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
            any = true;
        }

        loop {
            match self.chars.peek() {
                Some('#') => {
                    self.chars.next();
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.chars.next();
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.chars.next();
                    compound.attrs.push(self.attr()?);
                }
                _ => break,
            }
            any = true;
        }

        if any { Ok(compound) } else { Err(self.error()) }
    }

    fn ident(&mut self) -> Result<String> {
        let mut ident = String::new();
        while let Some(c) = self.chars.next_if(|c| is_ident_char(*c)) {
            ident.push(c);
        }
        if ident.is_empty() {
            return Err(self.error());
        }
        Ok(ident)
    }

    fn attr(&mut self) -> Result<AttrCondition> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let operator = match self.chars.next() {
            Some(']') => return Ok(AttrCondition::Exists { name }),
            Some('=') => '=',
            Some(op @ ('^' | '$' | '*')) => {
                self.expect('=')?;
                op
            }
            _ => return Err(self.error()),
        };

        self.skip_whitespace();
        let value = self.attr_value()?;
        self.skip_whitespace();
        self.expect(']')?;

        Ok(match operator {
            '^' => AttrCondition::StartsWith { name, value },
            '$' => AttrCondition::EndsWith { name, value },
            '*' => AttrCondition::Contains { name, value },
            _ => AttrCondition::Equals { name, value },
        })
    }

    fn attr_value(&mut self) -> Result<String> {
        let Some(quote) = self.chars.next_if(|c| *c == '"' || *c == '\'') else {
            return self.ident();
        };
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => return Err(self.error()),
            }
        }
    }
}
