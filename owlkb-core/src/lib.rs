//! # owlkb core
//!
//! Knowledge-base primitives consumed and produced by the SWRL rule engine.
//!
//! This crate provides:
//! - RDF terms ([`Iri`], [`Literal`], [`Term`]) with a canonical string encoding
//! - A caller-owned prefix registry ([`PrefixMap`]) for abbreviated IRIs
//! - Assertion-level axioms ([`Axiom`]) with structural fingerprints
//! - An indexed in-memory [`Ontology`] store

pub mod axiom;
pub mod error;
pub mod ontology;
pub mod prefix;
pub mod term;

pub use axiom::{Axiom, AxiomEntry, AxiomKind, EntityKind};
pub use error::{Error, Result};
pub use ontology::Ontology;
pub use prefix::PrefixMap;
pub use term::{Iri, Literal, Term};
