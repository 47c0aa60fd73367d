//! Prefix registry for abbreviated IRIs
//!
//! A `PrefixMap` is an explicit value owned by the caller. Rule printing,
//! logging and tests thread one through instead of consulting shared state.

use owlkb_vocab::prefixes::STANDARD;
use std::borrow::Cow;
use std::sync::Arc;

/// Ordered set of `(prefix, namespace)` bindings
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixMap {
    entries: Vec<(Arc<str>, Arc<str>)>,
}

impl PrefixMap {
    /// Create an empty prefix map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a prefix map with the standard rdf/rdfs/xsd/owl/swrlb/swrlx prefixes
    pub fn standard() -> Self {
        let mut map = Self::new();
        for (prefix, ns) in STANDARD {
            map.insert(prefix, ns);
        }
        map
    }

    /// Add (or rebind) a prefix, builder style
    pub fn with_prefix(mut self, prefix: &str, namespace: &str) -> Self {
        self.insert(prefix, namespace);
        self
    }

    /// Add (or rebind) a prefix
    pub fn insert(&mut self, prefix: &str, namespace: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| p.as_ref() == prefix) {
            entry.1 = Arc::from(namespace);
        } else {
            self.entries.push((Arc::from(prefix), Arc::from(namespace)));
        }
    }

    /// Namespace bound to a prefix
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p.as_ref() == prefix)
            .map(|(_, ns)| ns.as_ref())
    }

    /// Abbreviate an IRI as `prefix:local` using the longest matching namespace.
    ///
    /// Returns the IRI unchanged when no namespace matches.
    pub fn abbreviate<'a>(&self, iri: &'a str) -> Cow<'a, str> {
        let best = self
            .entries
            .iter()
            .filter(|(_, ns)| !ns.is_empty() && iri.starts_with(ns.as_ref()))
            .max_by_key(|(_, ns)| ns.len());

        match best {
            Some((prefix, ns)) => Cow::Owned(format!("{}:{}", prefix, &iri[ns.len()..])),
            None => Cow::Borrowed(iri),
        }
    }

    /// Expand a `prefix:local` name. Returns `None` for unknown prefixes.
    pub fn expand(&self, curie: &str) -> Option<String> {
        let (prefix, local) = curie.split_once(':')?;
        self.namespace(prefix).map(|ns| format!("{}{}", ns, local))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owlkb_vocab::{swrlb, xsd};

    #[test]
    fn test_standard_abbreviation() {
        let map = PrefixMap::standard();
        assert_eq!(map.abbreviate(swrlb::ADD), "swrlb:add");
        assert_eq!(map.abbreviate(xsd::DOUBLE), "xsd:double");
        assert_eq!(map.abbreviate("urn:x:y"), "urn:x:y");
    }

    #[test]
    fn test_longest_namespace_wins() {
        let map = PrefixMap::new()
            .with_prefix("ex", "http://example.org/")
            .with_prefix("exw", "http://example.org/wizards/");
        assert_eq!(map.abbreviate("http://example.org/wizards/Ron"), "exw:Ron");
        assert_eq!(map.abbreviate("http://example.org/Hogwarts"), "ex:Hogwarts");
    }

    #[test]
    fn test_rebind_and_expand() {
        let mut map = PrefixMap::new().with_prefix("ex", "http://a.org/");
        map.insert("ex", "http://b.org/");
        assert_eq!(map.len(), 1);
        assert_eq!(map.expand("ex:x").as_deref(), Some("http://b.org/x"));
        assert_eq!(map.expand("nope:x"), None);
    }
}
