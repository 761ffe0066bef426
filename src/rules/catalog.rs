//! The standard rule catalog
//!
//! Built once by [`RuleCatalog::standard`] and then shared read-only. Rule
//! names are lower case; several names may share one rule.

use std::rc::Rc;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::RuleError;
use crate::logic::Proposition;
use crate::proof::Number;

use super::equivalence::EquivalenceRule;
use super::inference::InferenceRule;
use super::step::Step;

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Inference(InferenceRule),
    Equivalence(EquivalenceRule),
}

impl Rule {
    pub fn is_equivalence(&self) -> bool {
        matches!(self, Rule::Equivalence(_))
    }

    /// Validate a step citing this rule under `name`
    pub fn justify(
        &self,
        name: &str,
        number: Number,
        proposition: Proposition,
        dependencies: Vec<Rc<Step>>,
    ) -> Result<Step, RuleError> {
        match self {
            Rule::Inference(rule) => rule.justify(name, number, proposition, dependencies),
            Rule::Equivalence(rule) => rule.justify(name, number, proposition, dependencies),
        }
    }
}

/// Lookup table from lower-case rule name to rule
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: IndexMap<String, Arc<Rule>>,
}

impl RuleCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` under `name`, replacing any previous entry
    pub fn insert(&mut self, name: &str, rule: Rule) {
        self.rules.insert(name.to_string(), Arc::new(rule));
    }

    /// Make `alias` refer to the rule already registered as `target`.
    ///
    /// Returns false if `target` is unknown.
    pub fn alias(&mut self, alias: &str, target: &str) -> bool {
        match self.rules.get(target).cloned() {
            Some(rule) => {
                self.rules.insert(alias.to_string(), rule);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    /// Lookup restricted to equivalence rules
    pub fn get_equivalence(&self, name: &str) -> Option<&EquivalenceRule> {
        match self.get(name) {
            Some(Rule::Equivalence(rule)) => Some(rule),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names and rules in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule.as_ref()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// The standard propositional catalog
    pub fn standard() -> Self {
        use Proposition as P;

        let mut catalog = RuleCatalog::new();

        // Inference rules
        let a = P::meta("A");
        let b = P::meta("B");
        let c = P::meta("C");
        let inference = |antecedents: Vec<P>, consequents: Vec<P>| {
            Rule::Inference(InferenceRule::new(antecedents, consequents))
        };

        catalog.insert(
            "excluded middle",
            inference(vec![], vec![P::or(a.clone(), P::not(a.clone()))]),
        );
        catalog.insert(
            "modus ponens",
            inference(vec![a.clone(), P::implies(a.clone(), b.clone())], vec![b.clone()]),
        );
        catalog.insert(
            "intro and",
            inference(vec![a.clone(), b.clone()], vec![P::and(a.clone(), b.clone())]),
        );
        catalog.insert(
            "elim and",
            inference(vec![P::and(a.clone(), b.clone())], vec![a.clone(), b.clone()]),
        );
        catalog.insert(
            "intro or",
            inference(
                vec![a.clone()],
                vec![P::or(a.clone(), b.clone()), P::or(b.clone(), a.clone())],
            ),
        );
        catalog.insert(
            "elim or",
            inference(vec![P::or(a.clone(), b.clone()), P::not(a.clone())], vec![b.clone()]),
        );
        catalog.insert(
            "proof by cases",
            inference(
                vec![
                    P::or(a.clone(), b.clone()),
                    P::implies(a.clone(), c.clone()),
                    P::implies(b, c.clone()),
                ],
                vec![c],
            ),
        );

        // Definitions and laws of propositional equivalence
        let p = P::meta("p");
        let q = P::meta("q");
        let r = P::meta("r");
        let not = |x: &P| P::not(x.clone());
        let and = |x: &P, y: &P| P::and(x.clone(), y.clone());
        let or = |x: &P, y: &P| P::or(x.clone(), y.clone());
        let implies = |x: &P, y: &P| P::implies(x.clone(), y.clone());
        let equivalence = |pairs: Vec<(P, P)>| Rule::Equivalence(EquivalenceRule::new(pairs));

        catalog.insert(
            "definition of xor",
            equivalence(vec![
                (
                    P::xor(p.clone(), q.clone()),
                    or(&and(&p, &not(&q)), &and(&not(&p), &q)),
                ),
                (
                    P::xor(p.clone(), q.clone()),
                    and(&or(&p, &q), &or(&not(&p), &not(&q))),
                ),
            ]),
        );
        catalog.insert(
            "definition of biconditional",
            equivalence(vec![(
                P::biconditional(p.clone(), q.clone()),
                and(&implies(&p, &q), &implies(&q, &p)),
            )]),
        );
        catalog.insert(
            "identity",
            equivalence(vec![
                (and(&p, &P::True), p.clone()),
                (or(&p, &P::False), p.clone()),
            ]),
        );
        catalog.insert(
            "domination",
            equivalence(vec![
                (or(&p, &P::True), P::True),
                (and(&p, &P::False), P::False),
            ]),
        );
        catalog.insert(
            "idempotency",
            equivalence(vec![(or(&p, &p), p.clone()), (and(&p, &p), p.clone())]),
        );
        catalog.insert(
            "commutativity",
            equivalence(vec![(or(&p, &q), or(&q, &p)), (and(&p, &q), and(&q, &p))]),
        );
        catalog.insert(
            "associativity",
            equivalence(vec![
                (or(&or(&p, &q), &r), or(&p, &or(&q, &r))),
                (and(&and(&p, &q), &r), and(&p, &and(&q, &r))),
            ]),
        );
        catalog.insert(
            "distributivity",
            equivalence(vec![
                (and(&p, &or(&q, &r)), or(&and(&p, &q), &and(&p, &r))),
                (or(&p, &and(&q, &r)), and(&or(&p, &q), &or(&p, &r))),
            ]),
        );
        catalog.insert(
            "negation",
            equivalence(vec![
                (or(&p, &not(&p)), P::True),
                (and(&p, &not(&p)), P::False),
            ]),
        );
        catalog.insert(
            "demorgan's law",
            equivalence(vec![
                (not(&or(&p, &q)), and(&not(&p), &not(&q))),
                (not(&and(&p, &q)), or(&not(&p), &not(&q))),
            ]),
        );
        catalog.insert(
            "double negation",
            equivalence(vec![(not(&not(&p)), p.clone())]),
        );
        catalog.insert(
            "law of implication",
            equivalence(vec![(implies(&p, &q), or(&not(&p), &q))]),
        );
        catalog.insert(
            "contrapositive",
            equivalence(vec![(implies(&p, &q), implies(&not(&q), &not(&p)))]),
        );

        // Boolean algebra names
        let x = P::meta("X");
        let y = P::meta("Y");
        let z = P::meta("Z");
        catalog.alias("complementarity", "negation");
        catalog.alias("null", "domination");
        catalog.alias("involution", "double negation");
        catalog.insert(
            "uniting",
            equivalence(vec![
                (or(&and(&x, &y), &and(&x, &not(&y))), x.clone()),
                (and(&or(&x, &y), &or(&x, &not(&y))), x.clone()),
            ]),
        );
        catalog.insert(
            "absorption",
            equivalence(vec![
                (or(&x, &and(&x, &y)), x.clone()),
                (and(&x, &or(&x, &y)), x.clone()),
                (and(&or(&x, &not(&y)), &y), and(&x, &y)),
                (or(&and(&x, &not(&y)), &y), or(&x, &y)),
            ]),
        );
        catalog.insert(
            "consensus",
            equivalence(vec![
                (
                    or(&or(&and(&x, &y), &and(&y, &z)), &and(&not(&x), &z)),
                    or(&and(&x, &y), &and(&not(&x), &z)),
                ),
                (
                    and(&and(&or(&x, &y), &or(&y, &z)), &or(&not(&x), &z)),
                    and(&or(&x, &y), &or(&not(&x), &z)),
                ),
            ]),
        );
        catalog.insert(
            "factoring",
            equivalence(vec![
                (
                    and(&or(&x, &y), &or(&not(&x), &z)),
                    or(&and(&x, &y), &and(&not(&x), &z)),
                ),
                (
                    or(&and(&x, &y), &and(&not(&x), &z)),
                    and(&or(&x, &y), &or(&not(&x), &z)),
                ),
            ]),
        );

        catalog
    }
}
