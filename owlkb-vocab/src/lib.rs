//! RDF Vocabulary Constants for owlkb
//!
//! This crate provides a centralized location for the IRIs used by the
//! ontology store and the SWRL rule engine.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `owl` - OWL vocabulary (http://www.w3.org/2002/07/owl#)
//! - `swrlb` - Standard SWRL built-ins (http://www.w3.org/2003/11/swrlb#)
//! - `swrlx` - Engine-specific built-in extensions
//! - `prefixes` - Default prefix table used for abbreviated IRIs

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:PlainLiteral IRI
    pub const PLAIN_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// RDFS namespace
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:comment IRI
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

    /// rdfs:Literal IRI
    pub const LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:short IRI
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";

    /// xsd:byte IRI
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";

    /// xsd:unsignedLong IRI
    pub const UNSIGNED_LONG: &str = "http://www.w3.org/2001/XMLSchema#unsignedLong";

    /// xsd:unsignedInt IRI
    pub const UNSIGNED_INT: &str = "http://www.w3.org/2001/XMLSchema#unsignedInt";

    /// xsd:unsignedShort IRI
    pub const UNSIGNED_SHORT: &str = "http://www.w3.org/2001/XMLSchema#unsignedShort";

    /// xsd:unsignedByte IRI
    pub const UNSIGNED_BYTE: &str = "http://www.w3.org/2001/XMLSchema#unsignedByte";

    /// xsd:nonNegativeInteger IRI
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";

    /// xsd:positiveInteger IRI
    pub const POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#positiveInteger";

    /// xsd:nonPositiveInteger IRI
    pub const NON_POSITIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonPositiveInteger";

    /// xsd:negativeInteger IRI
    pub const NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#negativeInteger";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    /// xsd:normalizedString IRI
    pub const NORMALIZED_STRING: &str = "http://www.w3.org/2001/XMLSchema#normalizedString";

    /// xsd:token IRI
    pub const TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";

    /// xsd:language IRI
    pub const LANGUAGE: &str = "http://www.w3.org/2001/XMLSchema#language";

    /// Check if a datatype IRI is a numeric type
    #[inline]
    pub fn is_numeric_datatype(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            INTEGER
                | LONG
                | INT
                | SHORT
                | BYTE
                | UNSIGNED_LONG
                | UNSIGNED_INT
                | UNSIGNED_SHORT
                | UNSIGNED_BYTE
                | NON_NEGATIVE_INTEGER
                | POSITIVE_INTEGER
                | NON_POSITIVE_INTEGER
                | NEGATIVE_INTEGER
                | DECIMAL
                | FLOAT
                | DOUBLE
        )
    }

    /// Check if a datatype IRI is a string-like type
    ///
    /// String-like literals compare against each other (and against plain
    /// literals and resources) by lexical form.
    #[inline]
    pub fn is_string_like(datatype_iri: &str) -> bool {
        matches!(
            datatype_iri,
            STRING | NORMALIZED_STRING | TOKEN | LANGUAGE | ANY_URI
        )
    }
}

/// OWL vocabulary constants
pub mod owl {
    /// OWL namespace
    pub const NS: &str = "http://www.w3.org/2002/07/owl#";

    /// owl:sameAs IRI
    pub const SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";

    /// owl:differentFrom IRI
    pub const DIFFERENT_FROM: &str = "http://www.w3.org/2002/07/owl#differentFrom";

    /// owl:Thing IRI
    pub const THING: &str = "http://www.w3.org/2002/07/owl#Thing";
}

/// Standard SWRL built-in IRIs (the `swrlb:` namespace)
pub mod swrlb {
    /// SWRL built-in namespace
    pub const NS: &str = "http://www.w3.org/2003/11/swrlb#";

    // ========================================================================
    // Comparison
    // ========================================================================

    /// swrlb:equal IRI
    pub const EQUAL: &str = "http://www.w3.org/2003/11/swrlb#equal";

    /// swrlb:notEqual IRI
    pub const NOT_EQUAL: &str = "http://www.w3.org/2003/11/swrlb#notEqual";

    /// swrlb:lessThan IRI
    pub const LESS_THAN: &str = "http://www.w3.org/2003/11/swrlb#lessThan";

    /// swrlb:lessThanOrEqual IRI
    pub const LESS_THAN_OR_EQUAL: &str = "http://www.w3.org/2003/11/swrlb#lessThanOrEqual";

    /// swrlb:greaterThan IRI
    pub const GREATER_THAN: &str = "http://www.w3.org/2003/11/swrlb#greaterThan";

    /// swrlb:greaterThanOrEqual IRI
    pub const GREATER_THAN_OR_EQUAL: &str = "http://www.w3.org/2003/11/swrlb#greaterThanOrEqual";

    // ========================================================================
    // Math
    // ========================================================================

    /// swrlb:add IRI
    pub const ADD: &str = "http://www.w3.org/2003/11/swrlb#add";

    /// swrlb:subtract IRI
    pub const SUBTRACT: &str = "http://www.w3.org/2003/11/swrlb#subtract";

    /// swrlb:multiply IRI
    pub const MULTIPLY: &str = "http://www.w3.org/2003/11/swrlb#multiply";

    /// swrlb:divide IRI
    pub const DIVIDE: &str = "http://www.w3.org/2003/11/swrlb#divide";

    /// swrlb:abs IRI
    pub const ABS: &str = "http://www.w3.org/2003/11/swrlb#abs";

    /// swrlb:floor IRI
    pub const FLOOR: &str = "http://www.w3.org/2003/11/swrlb#floor";

    /// swrlb:ceiling IRI
    pub const CEILING: &str = "http://www.w3.org/2003/11/swrlb#ceiling";

    /// swrlb:round IRI
    pub const ROUND: &str = "http://www.w3.org/2003/11/swrlb#round";

    /// swrlb:roundHalfToEven IRI
    pub const ROUND_HALF_TO_EVEN: &str = "http://www.w3.org/2003/11/swrlb#roundHalfToEven";

    /// swrlb:sin IRI
    pub const SIN: &str = "http://www.w3.org/2003/11/swrlb#sin";

    /// swrlb:cos IRI
    pub const COS: &str = "http://www.w3.org/2003/11/swrlb#cos";

    /// swrlb:tan IRI
    pub const TAN: &str = "http://www.w3.org/2003/11/swrlb#tan";

    /// swrlb:pow IRI
    pub const POW: &str = "http://www.w3.org/2003/11/swrlb#pow";

    // ========================================================================
    // Strings
    // ========================================================================

    /// swrlb:contains IRI
    pub const CONTAINS: &str = "http://www.w3.org/2003/11/swrlb#contains";

    /// swrlb:containsIgnoreCase IRI
    pub const CONTAINS_IGNORE_CASE: &str = "http://www.w3.org/2003/11/swrlb#containsIgnoreCase";

    /// swrlb:startsWith IRI
    pub const STARTS_WITH: &str = "http://www.w3.org/2003/11/swrlb#startsWith";

    /// swrlb:endsWith IRI
    pub const ENDS_WITH: &str = "http://www.w3.org/2003/11/swrlb#endsWith";

    /// swrlb:matches IRI
    pub const MATCHES: &str = "http://www.w3.org/2003/11/swrlb#matches";
}

/// Engine-specific built-in extensions (the `swrlx:` namespace)
///
/// These share the shape of the standard built-ins but are not part of the
/// SWRL submission.
pub mod swrlx {
    /// Extension namespace
    pub const NS: &str = "http://owlkb.dev/ns/swrlx#";

    /// swrlx:langMatches IRI
    pub const LANG_MATCHES: &str = "http://owlkb.dev/ns/swrlx#langMatches";
}

/// Default prefix table used for abbreviated IRIs
pub mod prefixes {
    /// `(prefix, namespace)` pairs known to every prefix registry
    pub const STANDARD: &[(&str, &str)] = &[
        ("rdf", super::rdf::NS),
        ("rdfs", super::rdfs::NS),
        ("xsd", super::xsd::NS),
        ("owl", super::owl::NS),
        ("swrlb", super::swrlb::NS),
        ("swrlx", super::swrlx::NS),
    ];
}
