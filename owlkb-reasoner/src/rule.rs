//! Rules and rule sets
//!
//! A rule is immutable after construction. Applying it evaluates the
//! antecedent to a binding table and instantiates the consequent against that
//! table; every inference is stamped with the rule's canonical text
//! (`antecedent -> consequent`).

use hashbrown::HashMap;
use owlkb_core::{AxiomKind, Iri, Ontology, PrefixMap};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::antecedent::Antecedent;
use crate::atom::{Atom, EvalContext, STANDARD_PREFIXES};
use crate::consequent::Consequent;
use crate::error::{ReasonerError, Result};
use crate::inference::Inference;

/// An antecedent/consequent rule
#[derive(Clone, Debug)]
pub struct Rule {
    id: Iri,
    description: String,
    antecedent: Antecedent,
    consequent: Consequent,
    /// Canonical text, computed once
    text: Arc<str>,
}

impl Rule {
    pub fn new(
        id: impl Into<Iri>,
        description: impl Into<String>,
        antecedent: Antecedent,
        consequent: Consequent,
    ) -> Result<Self> {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(ReasonerError::MissingRuleId);
        }
        let text = Arc::from(format!("{} -> {}", antecedent, consequent));
        Ok(Self {
            id,
            description: description.into(),
            antecedent,
            consequent,
            text,
        })
    }

    /// Start building a rule from optional parts
    pub fn builder(id: impl Into<Iri>) -> RuleBuilder {
        RuleBuilder {
            id: Some(id.into()),
            ..RuleBuilder::default()
        }
    }

    pub fn id(&self) -> &Iri {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    /// Canonical text (`antecedent -> consequent`) with standard prefixes
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    /// Evaluate the rule in a shared context
    pub fn apply(&self, ctx: &EvalContext<'_>) -> Result<Vec<Inference>> {
        let table = self.antecedent.evaluate(ctx)?;
        let inferences = self
            .consequent
            .evaluate(&table, ctx)
            .into_iter()
            .map(|inference| Inference::new(Arc::clone(&self.text), inference.axiom))
            .collect();
        Ok(inferences)
    }

    /// Evaluate the rule directly against an ontology, without a class index
    pub fn apply_to_ontology(&self, ontology: &Ontology) -> Result<Vec<Inference>> {
        self.apply(&EvalContext::new(ontology))
    }

    /// Evaluate on the blocking pool so the caller's task is never stalled
    pub async fn apply_async(
        self: Arc<Self>,
        ontology: Arc<Ontology>,
    ) -> Result<Vec<Inference>> {
        tokio::task::spawn_blocking(move || self.apply_to_ontology(&ontology))
            .await
            .map_err(|e| ReasonerError::task_join(e.to_string()))?
    }

    pub fn to_string_with(&self, prefixes: &PrefixMap) -> String {
        format!(
            "{} -> {}",
            self.antecedent.to_string_with(prefixes),
            self.consequent.to_string_with(prefixes)
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builder for rules assembled from optional parts (e.g. by a loader)
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<Iri>,
    description: String,
    antecedent: Option<Vec<Atom>>,
    consequent: Option<Vec<Atom>>,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<Iri>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn antecedent(mut self, atoms: Vec<Atom>) -> Self {
        self.antecedent = Some(atoms);
        self
    }

    pub fn consequent(mut self, atoms: Vec<Atom>) -> Self {
        self.consequent = Some(atoms);
        self
    }

    pub fn build(self) -> Result<Rule> {
        let id = self.id.ok_or(ReasonerError::MissingRuleId)?;
        let antecedent = self
            .antecedent
            .ok_or_else(|| ReasonerError::MissingAntecedent(id.to_string()))?;
        let consequent = self
            .consequent
            .ok_or_else(|| ReasonerError::MissingConsequent(id.to_string()))?;
        Rule::new(
            id,
            self.description,
            Antecedent::new(antecedent),
            Consequent::new(consequent)?,
        )
    }
}

/// Rules in insertion order, unique by identifier
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Arc<Rule>>,
    by_id: HashMap<Iri, usize>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, replacing any rule with the same identifier in place
    pub fn add(&mut self, rule: Rule) {
        let rule = Arc::new(rule);
        match self.by_id.get(rule.id()) {
            Some(&pos) => self.rules[pos] = rule,
            None => {
                self.by_id.insert(rule.id().clone(), self.rules.len());
                self.rules.push(rule);
            }
        }
    }

    /// Builder-style `add`
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add(rule);
        self
    }

    pub fn get(&self, id: &Iri) -> Option<&Arc<Rule>> {
        self.by_id.get(id).map(|&pos| &self.rules[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Axiom categories the consequents can produce, in stable order
    pub fn produced_kinds(&self) -> BTreeSet<AxiomKind> {
        self.rules
            .iter()
            .flat_map(|rule| rule.consequent().produced_kinds())
            .collect()
    }

    /// Classes referenced by antecedent class atoms across all rules
    pub fn referenced_classes(&self) -> Vec<&Iri> {
        let mut classes: Vec<&Iri> = Vec::new();
        for rule in &self.rules {
            for class in rule.antecedent().referenced_classes() {
                if !classes.contains(&class) {
                    classes.push(class);
                }
            }
        }
        classes
    }

    /// Hash of rule identifiers and texts, for cache keys
    pub fn fingerprint_hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut h = DefaultHasher::new();
        for rule in &self.rules {
            rule.id().hash(&mut h);
            rule.text().hash(&mut h);
        }
        h.finish()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.add(rule);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Argument;
    use owlkb_core::Axiom;

    fn person_rule(id: &str) -> Rule {
        Rule::builder(id)
            .description("wizards are people")
            .antecedent(vec![Atom::class("ex:Wizard", Argument::variable("W"))])
            .consequent(vec![Atom::class("ex:Person", Argument::variable("W"))])
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_all_parts() {
        assert!(matches!(
            RuleBuilder::new().build(),
            Err(ReasonerError::MissingRuleId)
        ));
        assert!(matches!(
            Rule::builder("ex:r").consequent(vec![]).build(),
            Err(ReasonerError::MissingAntecedent(_))
        ));
        assert!(matches!(
            Rule::builder("ex:r").antecedent(vec![]).build(),
            Err(ReasonerError::MissingConsequent(_))
        ));
        assert!(matches!(
            Rule::new("  ", "", Antecedent::default(), Consequent::default()),
            Err(ReasonerError::MissingRuleId)
        ));
    }

    #[test]
    fn test_apply_stamps_rule_text() {
        let mut ont = Ontology::new("ex:o");
        ont.add_axiom(Axiom::ClassAssertion {
            class: Iri::new("ex:Wizard"),
            individual: Iri::new("ex:Ron"),
        });
        let rule = person_rule("ex:r1");
        assert_eq!(rule.to_string(), "ex:Wizard(?W) -> ex:Person(?W)");

        let out = rule.apply_to_ontology(&ont).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].provenance.as_ref(), "ex:Wizard(?W) -> ex:Person(?W)");
    }

    #[test]
    fn test_rule_set_replaces_by_id() {
        let mut set = RuleSet::new();
        set.add(person_rule("ex:r1"));
        set.add(person_rule("ex:r2"));
        let before = set.fingerprint_hash();

        let replacement = Rule::builder("ex:r1")
            .antecedent(vec![Atom::class("ex:Witch", Argument::variable("W"))])
            .consequent(vec![Atom::class("ex:Person", Argument::variable("W"))])
            .build()
            .unwrap();
        set.add(replacement);

        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next().unwrap().id().as_str(), "ex:r1");
        assert!(set
            .get(&Iri::new("ex:r1"))
            .unwrap()
            .text()
            .starts_with("ex:Witch"));
        assert_ne!(before, set.fingerprint_hash());
        assert_eq!(set.referenced_classes().len(), 2);
        assert_eq!(
            set.produced_kinds().into_iter().collect::<Vec<_>>(),
            vec![AxiomKind::ClassAssertion]
        );
    }

    #[tokio::test]
    async fn test_apply_async() {
        let mut ont = Ontology::new("ex:o");
        ont.add_axiom(Axiom::ClassAssertion {
            class: Iri::new("ex:Wizard"),
            individual: Iri::new("ex:Harry"),
        });
        let rule = Arc::new(person_rule("ex:r1"));
        let out = rule.apply_async(Arc::new(ont)).await.unwrap();
        assert_eq!(out.len(), 1);
    }
}
