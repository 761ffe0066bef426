//! Equivalence rules
//!
//! An equivalence rule is a set of axioms `lhs ↔ rhs` over meta variables.
//! A rewrite `d ≡ c` is justified when the two trees agree everywhere except
//! at sub-expressions where one axiom relates the two sides.

use std::rc::Rc;

use crate::error::RuleError;
use crate::logic::{unifiable, Proposition};
use crate::proof::Number;

use super::step::{Step, StepKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceRule {
    axioms: Vec<Proposition>,
}

impl EquivalenceRule {
    /// Build from `(lhs, rhs)` pairs
    pub fn new(pairs: impl IntoIterator<Item = (Proposition, Proposition)>) -> Self {
        EquivalenceRule {
            axioms: pairs
                .into_iter()
                .map(|(lhs, rhs)| Proposition::biconditional(lhs, rhs))
                .collect(),
        }
    }

    pub fn axioms(&self) -> &[Proposition] {
        &self.axioms
    }

    /// Whether some axiom relates `lhs` and `rhs`, read in either direction
    fn relates(&self, lhs: &Proposition, rhs: &Proposition) -> bool {
        let forward = Proposition::biconditional(lhs.clone(), rhs.clone());
        let backward = Proposition::biconditional(rhs.clone(), lhs.clone());
        self.axioms
            .iter()
            .any(|axiom| unifiable(axiom, &forward) || unifiable(axiom, &backward))
    }

    /// Congruence match of `from` against `to`.
    ///
    /// Each node pair is accepted if it matches structurally with accepted
    /// children, or if an axiom relates the two nodes outright.
    pub fn matches(&self, from: &Proposition, to: &Proposition) -> bool {
        let structural = match (from, to) {
            (Proposition::True, Proposition::True) | (Proposition::False, Proposition::False) => {
                true
            }
            (Proposition::Atomic(a), Proposition::Atomic(b)) => a == b,
            (Proposition::Unary(op_a, arg_a), Proposition::Unary(op_b, arg_b)) => {
                op_a == op_b && self.matches(arg_a, arg_b)
            }
            (Proposition::Binary(op_a, l_a, r_a), Proposition::Binary(op_b, l_b, r_b)) => {
                op_a == op_b && self.matches(l_a, l_b) && self.matches(r_a, r_b)
            }
            _ => false,
        };
        structural || self.relates(from, to)
    }

    /// Validate and build an equivalence step
    pub fn justify(
        &self,
        name: &str,
        number: Number,
        proposition: Proposition,
        dependencies: Vec<Rc<Step>>,
    ) -> Result<Step, RuleError> {
        Step::check_arity(1, &dependencies)?;
        if !self.matches(dependencies[0].proposition(), &proposition) {
            return Err(RuleError::EquivalenceMismatch);
        }
        Ok(Step::derived(
            StepKind::Equivalence,
            number,
            proposition,
            name,
            dependencies,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(name: &str) -> Proposition {
        Proposition::meta(name)
    }

    fn atom(name: &str) -> Proposition {
        Proposition::atomic(name)
    }

    fn idempotency() -> EquivalenceRule {
        let p = meta("p");
        EquivalenceRule::new([
            (Proposition::or(p.clone(), p.clone()), p.clone()),
            (Proposition::and(p.clone(), p.clone()), p),
        ])
    }

    fn identity() -> EquivalenceRule {
        let p = meta("p");
        EquivalenceRule::new([
            (Proposition::and(p.clone(), Proposition::True), p.clone()),
            (Proposition::or(p.clone(), Proposition::False), p),
        ])
    }

    #[test]
    fn test_match_at_root() {
        let rule = idempotency();
        let p = atom("p");
        assert!(rule.matches(&Proposition::or(p.clone(), p.clone()), &p));
        assert!(rule.matches(&p, &Proposition::and(p.clone(), p.clone())));
    }

    #[test]
    fn test_match_nested() {
        let rule = idempotency();
        let (p, q) = (atom("p"), atom("q"));
        let from = Proposition::and(p.clone(), Proposition::or(q.clone(), q.clone()));
        let to = Proposition::and(p.clone(), q.clone());
        assert!(rule.matches(&from, &to));

        let deep = Proposition::not(Proposition::implies(from, atom("r")));
        let deep_to = Proposition::not(Proposition::implies(to, atom("r")));
        assert!(rule.matches(&deep, &deep_to));
    }

    #[test]
    fn test_match_several_sites() {
        let rule = idempotency();
        let (p, q) = (atom("p"), atom("q"));
        let from = Proposition::or(
            Proposition::and(p.clone(), p.clone()),
            Proposition::or(q.clone(), q.clone()),
        );
        assert!(rule.matches(&from, &Proposition::or(p, q)));
    }

    #[test]
    fn test_identical_trees_match() {
        let rule = identity();
        let prop = Proposition::xor(atom("p"), Proposition::not(atom("q")));
        assert!(rule.matches(&prop, &prop));
    }

    #[test]
    fn test_identity_rejects_wrong_literal() {
        let rule = identity();
        let p = atom("p");
        assert!(rule.matches(&Proposition::and(p.clone(), Proposition::True), &p));
        assert!(!rule.matches(&Proposition::and(p.clone(), Proposition::False), &p));
        assert!(!rule.matches(&p, &Proposition::and(p.clone(), Proposition::False)));
    }

    #[test]
    fn test_mismatched_atoms() {
        let rule = idempotency();
        assert!(!rule.matches(&atom("p"), &atom("q")));
        assert!(!rule.matches(
            &Proposition::or(atom("p"), atom("q")),
            &atom("p")
        ));
    }

    #[test]
    fn test_justify_arity() {
        let rule = identity();
        let err = rule
            .justify("identity", Number::from_slice(&[1]), atom("p"), Vec::new())
            .unwrap_err();
        assert_eq!(err, RuleError::InvalidDependencies { expected: 1, actual: 0 });
    }
}
