//! Axioms - the statements stored in an ontology
//!
//! Only the assertion-level shapes the rule engine reads and produces are
//! modelled, plus entity declarations. Every axiom has a structural
//! fingerprint used to detect that an inference restates explicit knowledge.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::term::{Iri, Literal, Term};

/// Axiom category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxiomKind {
    Declaration,
    ClassAssertion,
    ObjectPropertyAssertion,
    NegativeObjectPropertyAssertion,
    DataPropertyAssertion,
    NegativeDataPropertyAssertion,
    SameIndividual,
    DifferentIndividuals,
    AnnotationAssertion,
}

impl AxiomKind {
    /// All assertion categories (everything except declarations)
    pub const ASSERTIONS: [AxiomKind; 8] = [
        AxiomKind::ClassAssertion,
        AxiomKind::ObjectPropertyAssertion,
        AxiomKind::NegativeObjectPropertyAssertion,
        AxiomKind::DataPropertyAssertion,
        AxiomKind::NegativeDataPropertyAssertion,
        AxiomKind::SameIndividual,
        AxiomKind::DifferentIndividuals,
        AxiomKind::AnnotationAssertion,
    ];
}

impl fmt::Display for AxiomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Kind of a declared entity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Class,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
    Datatype,
}

/// A logical statement
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axiom {
    Declaration {
        kind: EntityKind,
        entity: Iri,
    },
    ClassAssertion {
        class: Iri,
        individual: Iri,
    },
    ObjectPropertyAssertion {
        property: Iri,
        subject: Iri,
        object: Iri,
    },
    NegativeObjectPropertyAssertion {
        property: Iri,
        subject: Iri,
        object: Iri,
    },
    DataPropertyAssertion {
        property: Iri,
        subject: Iri,
        value: Literal,
    },
    NegativeDataPropertyAssertion {
        property: Iri,
        subject: Iri,
        value: Literal,
    },
    SameIndividual {
        left: Iri,
        right: Iri,
    },
    DifferentIndividuals {
        left: Iri,
        right: Iri,
    },
    AnnotationAssertion {
        property: Iri,
        subject: Iri,
        value: Term,
    },
}

impl Axiom {
    pub fn kind(&self) -> AxiomKind {
        match self {
            Axiom::Declaration { .. } => AxiomKind::Declaration,
            Axiom::ClassAssertion { .. } => AxiomKind::ClassAssertion,
            Axiom::ObjectPropertyAssertion { .. } => AxiomKind::ObjectPropertyAssertion,
            Axiom::NegativeObjectPropertyAssertion { .. } => {
                AxiomKind::NegativeObjectPropertyAssertion
            }
            Axiom::DataPropertyAssertion { .. } => AxiomKind::DataPropertyAssertion,
            Axiom::NegativeDataPropertyAssertion { .. } => AxiomKind::NegativeDataPropertyAssertion,
            Axiom::SameIndividual { .. } => AxiomKind::SameIndividual,
            Axiom::DifferentIndividuals { .. } => AxiomKind::DifferentIndividuals,
            Axiom::AnnotationAssertion { .. } => AxiomKind::AnnotationAssertion,
        }
    }

    /// The property IRI for property-bearing axioms
    pub fn property(&self) -> Option<&Iri> {
        match self {
            Axiom::ObjectPropertyAssertion { property, .. }
            | Axiom::NegativeObjectPropertyAssertion { property, .. }
            | Axiom::DataPropertyAssertion { property, .. }
            | Axiom::NegativeDataPropertyAssertion { property, .. }
            | Axiom::AnnotationAssertion { property, .. } => Some(property),
            _ => None,
        }
    }

    /// Canonical structural serialization.
    ///
    /// SameIndividual and DifferentIndividuals are symmetric, so their
    /// individuals are ordered before serialization.
    pub fn fingerprint(&self) -> String {
        match self {
            Axiom::Declaration { kind, entity } => format!("Declaration({:?} <{}>)", kind, entity),
            Axiom::ClassAssertion { class, individual } => {
                format!("ClassAssertion(<{}> <{}>)", class, individual)
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => format!(
                "ObjectPropertyAssertion(<{}> <{}> <{}>)",
                property, subject, object
            ),
            Axiom::NegativeObjectPropertyAssertion {
                property,
                subject,
                object,
            } => format!(
                "NegativeObjectPropertyAssertion(<{}> <{}> <{}>)",
                property, subject, object
            ),
            Axiom::DataPropertyAssertion {
                property,
                subject,
                value,
            } => format!(
                "DataPropertyAssertion(<{}> <{}> {})",
                property,
                subject,
                value.to_canonical()
            ),
            Axiom::NegativeDataPropertyAssertion {
                property,
                subject,
                value,
            } => format!(
                "NegativeDataPropertyAssertion(<{}> <{}> {})",
                property,
                subject,
                value.to_canonical()
            ),
            Axiom::SameIndividual { left, right } => {
                let (a, b) = ordered(left, right);
                format!("SameIndividual(<{}> <{}>)", a, b)
            }
            Axiom::DifferentIndividuals { left, right } => {
                let (a, b) = ordered(left, right);
                format!("DifferentIndividuals(<{}> <{}>)", a, b)
            }
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                let value = match value {
                    Term::Resource(iri) => format!("<{}>", iri),
                    Term::Literal(lit) => lit.to_canonical(),
                };
                format!("AnnotationAssertion(<{}> <{}> {})", property, subject, value)
            }
        }
    }
}

fn ordered<'a>(a: &'a Iri, b: &'a Iri) -> (&'a Iri, &'a Iri) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

/// An axiom as stored in an ontology, tagged with its origin
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxiomEntry {
    pub axiom: Axiom,
    /// True if the axiom was derived by reasoning rather than asserted
    pub is_inference: bool,
}

impl AxiomEntry {
    pub fn asserted(axiom: Axiom) -> Self {
        Self {
            axiom,
            is_inference: false,
        }
    }

    pub fn inferred(axiom: Axiom) -> Self {
        Self {
            axiom,
            is_inference: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_individual_fingerprint_is_symmetric() {
        let ab = Axiom::SameIndividual {
            left: Iri::new("ex:a"),
            right: Iri::new("ex:b"),
        };
        let ba = Axiom::SameIndividual {
            left: Iri::new("ex:b"),
            right: Iri::new("ex:a"),
        };
        assert_eq!(ab.fingerprint(), ba.fingerprint());
        assert_eq!(ab.fingerprint(), "SameIndividual(<ex:a> <ex:b>)");
    }

    #[test]
    fn test_object_assertion_is_directional() {
        let ab = Axiom::ObjectPropertyAssertion {
            property: Iri::new("ex:knows"),
            subject: Iri::new("ex:a"),
            object: Iri::new("ex:b"),
        };
        let ba = Axiom::ObjectPropertyAssertion {
            property: Iri::new("ex:knows"),
            subject: Iri::new("ex:b"),
            object: Iri::new("ex:a"),
        };
        assert_ne!(ab.fingerprint(), ba.fingerprint());
        assert_eq!(ab.kind(), AxiomKind::ObjectPropertyAssertion);
        assert_eq!(ab.property().map(Iri::as_str), Some("ex:knows"));
    }

    #[test]
    fn test_annotation_fingerprint_distinguishes_resource_from_literal() {
        let res = Axiom::AnnotationAssertion {
            property: Iri::new("ex:seeAlso"),
            subject: Iri::new("ex:a"),
            value: Term::resource("ex:b"),
        };
        let lit = Axiom::AnnotationAssertion {
            property: Iri::new("ex:seeAlso"),
            subject: Iri::new("ex:a"),
            value: Term::Literal(Literal::plain("ex:b")),
        };
        assert_ne!(res.fingerprint(), lit.fingerprint());
    }
}
