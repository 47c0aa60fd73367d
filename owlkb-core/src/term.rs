//! RDF terms and their canonical string encoding
//!
//! Binding tables carry terms as strings. The canonical encoding is:
//! - resource: the IRI text, unbracketed (`http://example.org/Ron`)
//! - plain literal: `"lexical"`
//! - language-tagged literal: `"lexical"@en`
//! - typed literal: `"lexical"^^<http://www.w3.org/2001/XMLSchema#double>`
//!
//! Two terms are equal iff their canonical encodings are equal. `Term::parse`
//! inverts `Term::to_canonical` for every term, including lexical values that
//! themselves contain quotes.

use owlkb_vocab::xsd;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::prefix::PrefixMap;

/// An IRI (cheap to clone)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(iri: impl AsRef<str>) -> Self {
        Iri(Arc::from(iri.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Iri::new(s)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A literal value with optional datatype or language tag
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    lexical: Arc<str>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    datatype: Option<Iri>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    lang: Option<Arc<str>>,
}

impl Literal {
    /// Plain literal (no datatype, no language)
    pub fn plain(lexical: impl AsRef<str>) -> Self {
        Self {
            lexical: Arc::from(lexical.as_ref()),
            datatype: None,
            lang: None,
        }
    }

    /// Typed literal
    pub fn typed(lexical: impl AsRef<str>, datatype: impl Into<Iri>) -> Self {
        Self {
            lexical: Arc::from(lexical.as_ref()),
            datatype: Some(datatype.into()),
            lang: None,
        }
    }

    /// Language-tagged literal
    pub fn lang(lexical: impl AsRef<str>, tag: impl AsRef<str>) -> Self {
        Self {
            lexical: Arc::from(lexical.as_ref()),
            datatype: None,
            lang: Some(Arc::from(tag.as_ref())),
        }
    }

    /// `xsd:string` literal
    pub fn string(value: impl AsRef<str>) -> Self {
        Self::typed(value, xsd::STRING)
    }

    /// `xsd:double` literal using the shortest round-tripping representation
    pub fn double(value: f64) -> Self {
        Self::typed(value.to_string(), xsd::DOUBLE)
    }

    /// `xsd:integer` literal
    pub fn integer(value: i64) -> Self {
        Self::typed(value.to_string(), xsd::INTEGER)
    }

    /// `xsd:boolean` literal
    pub fn boolean(value: bool) -> Self {
        Self::typed(if value { "true" } else { "false" }, xsd::BOOLEAN)
    }

    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    pub fn datatype(&self) -> Option<&Iri> {
        self.datatype.as_ref()
    }

    pub fn language(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// True if the datatype is one of the XSD numeric types
    pub fn is_numeric(&self) -> bool {
        self.datatype
            .as_ref()
            .is_some_and(|dt| xsd::is_numeric_datatype(dt.as_str()))
    }

    /// True for plain, language-tagged, and string-like typed literals
    pub fn is_string_like(&self) -> bool {
        match &self.datatype {
            None => true,
            Some(dt) => xsd::is_string_like(dt.as_str()),
        }
    }

    /// Numeric value, for numeric-typed literals only
    pub fn as_f64(&self) -> Option<f64> {
        if !self.is_numeric() {
            return None;
        }
        let lexical = self.lexical.trim();
        match lexical {
            "INF" | "+INF" => Some(f64::INFINITY),
            "-INF" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            _ => lexical.parse::<f64>().ok(),
        }
    }

    /// Canonical encoding (see module docs)
    pub fn to_canonical(&self) -> String {
        match (&self.datatype, &self.lang) {
            (_, Some(lang)) => format!("\"{}\"@{}", self.lexical, lang),
            (Some(dt), None) => format!("\"{}\"^^<{}>", self.lexical, dt),
            (None, None) => format!("\"{}\"", self.lexical),
        }
    }

    /// Display form with the datatype abbreviated, e.g. `"2"^^xsd:double`
    pub fn display_with(&self, prefixes: &PrefixMap) -> String {
        match (&self.datatype, &self.lang) {
            (_, Some(lang)) => format!("\"{}\"@{}", self.lexical, lang),
            (Some(dt), None) => {
                format!("\"{}\"^^{}", self.lexical, prefixes.abbreviate(dt.as_str()))
            }
            (None, None) => format!("\"{}\"", self.lexical),
        }
    }
}

/// An RDF term: resource or literal
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    Resource(Iri),
    Literal(Literal),
}

impl Term {
    pub fn resource(iri: impl AsRef<str>) -> Self {
        Term::Resource(Iri::new(iri))
    }

    /// Decode a canonical term string
    pub fn parse(encoded: &str) -> Result<Term> {
        let Some(rest) = encoded.strip_prefix('"') else {
            if encoded.is_empty() {
                return Err(Error::invalid_term("empty term"));
            }
            return Ok(Term::Resource(Iri::new(encoded)));
        };

        let close = rest
            .rfind('"')
            .ok_or_else(|| Error::invalid_term(format!("unterminated literal: {}", encoded)))?;
        let lexical = &rest[..close];
        let suffix = &rest[close + 1..];

        if suffix.is_empty() {
            return Ok(Term::Literal(Literal::plain(lexical)));
        }
        if let Some(tag) = suffix.strip_prefix('@') {
            if tag.is_empty() {
                return Err(Error::invalid_term(format!("empty language tag: {}", encoded)));
            }
            return Ok(Term::Literal(Literal::lang(lexical, tag)));
        }
        if let Some(dt) = suffix
            .strip_prefix("^^<")
            .and_then(|s| s.strip_suffix('>'))
        {
            if dt.is_empty() {
                return Err(Error::invalid_term(format!("empty datatype: {}", encoded)));
            }
            return Ok(Term::Literal(Literal::typed(lexical, dt)));
        }
        Err(Error::invalid_term(format!(
            "unexpected literal suffix '{}' in {}",
            suffix, encoded
        )))
    }

    /// Canonical encoding (see module docs)
    pub fn to_canonical(&self) -> String {
        match self {
            Term::Resource(iri) => iri.to_string(),
            Term::Literal(lit) => lit.to_canonical(),
        }
    }

    /// IRI text for resources, lexical value for literals
    pub fn lexical_form(&self) -> &str {
        match self {
            Term::Resource(iri) => iri.as_str(),
            Term::Literal(lit) => lit.lexical(),
        }
    }

    pub fn as_resource(&self) -> Option<&Iri> {
        match self {
            Term::Resource(iri) => Some(iri),
            Term::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(lit) => Some(lit),
            Term::Resource(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Resource(iri)
    }
}

impl From<Literal> for Term {
    fn from(lit: Literal) -> Self {
        Term::Literal(lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_forms() {
        assert_eq!(Term::resource("http://ex.org/a").to_canonical(), "http://ex.org/a");
        assert_eq!(Term::from(Literal::plain("hi")).to_canonical(), "\"hi\"");
        assert_eq!(Term::from(Literal::lang("hi", "en")).to_canonical(), "\"hi\"@en");
        assert_eq!(
            Term::from(Literal::double(2.5)).to_canonical(),
            "\"2.5\"^^<http://www.w3.org/2001/XMLSchema#double>"
        );
    }

    #[test]
    fn test_parse_inverts_encoding_with_embedded_quotes() {
        let tricky = [
            Term::from(Literal::plain("say \"hi\"")),
            Term::from(Literal::lang("a\"@fr", "en-GB")),
            Term::from(Literal::typed("\"", xsd::STRING)),
            Term::resource("ex:indiv2"),
        ];
        for term in tricky {
            assert_eq!(Term::parse(&term.to_canonical()).unwrap(), term);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Term::parse("").is_err());
        assert!(Term::parse("\"open").is_err());
        assert!(Term::parse("\"x\"@").is_err());
        assert!(Term::parse("\"x\"^^xsd:double").is_err());
    }

    #[test]
    fn test_numeric_value_requires_numeric_datatype() {
        assert_eq!(Literal::typed("-2.24", xsd::DOUBLE).as_f64(), Some(-2.24));
        assert_eq!(Literal::typed("16", xsd::INTEGER).as_f64(), Some(16.0));
        assert_eq!(Literal::plain("16").as_f64(), None);
        assert_eq!(Literal::typed("abc", xsd::DECIMAL).as_f64(), None);
    }

    #[test]
    fn test_display_abbreviates_datatype() {
        let lit = Literal::typed("2", xsd::DOUBLE);
        assert_eq!(lit.display_with(&PrefixMap::standard()), "\"2\"^^xsd:double");
    }
}
