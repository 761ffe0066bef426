//! Inference rules
//!
//! An inference rule lists antecedent templates and the consequent templates
//! it accepts. A step `d1, ..., dk ⊢ c` is justified when, for some ordering
//! of the dependencies and some consequent, the template implication
//! `(T∧a1∧...∧ak) → consequent` unifies with `(T∧d1∧...∧dk) → c`.

use std::rc::Rc;

use crate::error::RuleError;
use crate::logic::{unifiable, Proposition};
use crate::proof::Number;

use super::step::{Step, StepKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRule {
    antecedents: Vec<Proposition>,
    consequents: Vec<Proposition>,
}

impl InferenceRule {
    pub fn new(antecedents: Vec<Proposition>, consequents: Vec<Proposition>) -> Self {
        InferenceRule {
            antecedents,
            consequents,
        }
    }

    /// Number of dependencies the rule takes
    pub fn arity(&self) -> usize {
        self.antecedents.len()
    }

    pub fn antecedents(&self) -> &[Proposition] {
        &self.antecedents
    }

    pub fn consequents(&self) -> &[Proposition] {
        &self.consequents
    }

    /// Whether `conclusion` follows from `premises` in some order
    pub fn matches(&self, premises: &[&Proposition], conclusion: &Proposition) -> bool {
        if premises.len() != self.arity() {
            return false;
        }
        let antecedents = Proposition::conjunction(&self.antecedents);
        let templates: Vec<Proposition> = self
            .consequents
            .iter()
            .map(|c| Proposition::implies(antecedents.clone(), c.clone()))
            .collect();

        let mut order = premises.to_vec();
        find_permutation(&mut order, 0, &mut |perm| {
            let target = Proposition::implies(
                Proposition::conjunction(perm.iter().copied()),
                conclusion.clone(),
            );
            templates.iter().any(|t| unifiable(t, &target))
        })
    }

    /// Validate and build an inference step
    pub fn justify(
        &self,
        name: &str,
        number: Number,
        proposition: Proposition,
        dependencies: Vec<Rc<Step>>,
    ) -> Result<Step, RuleError> {
        Step::check_arity(self.arity(), &dependencies)?;
        let premises: Vec<&Proposition> = dependencies.iter().map(|s| s.proposition()).collect();
        if !self.matches(&premises, &proposition) {
            return Err(RuleError::InferenceMismatch);
        }
        Ok(Step::derived(
            StepKind::Inference,
            number,
            proposition,
            name,
            dependencies,
        ))
    }
}

/// Try `accept` on every ordering of `items[start..]`, stopping at the first hit.
///
/// `items` is restored to its original order before returning.
fn find_permutation<T>(items: &mut [T], start: usize, accept: &mut impl FnMut(&[T]) -> bool) -> bool {
    if start >= items.len() {
        return accept(items);
    }
    for i in start..items.len() {
        items.swap(start, i);
        let found = find_permutation(items, start + 1, accept);
        items.swap(start, i);
        if found {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a() -> Proposition {
        Proposition::meta("A")
    }

    fn b() -> Proposition {
        Proposition::meta("B")
    }

    fn p() -> Proposition {
        Proposition::atomic("p")
    }

    fn q() -> Proposition {
        Proposition::atomic("q")
    }

    fn intro_and() -> InferenceRule {
        InferenceRule::new(vec![a(), b()], vec![Proposition::and(a(), b())])
    }

    fn modus_ponens() -> InferenceRule {
        InferenceRule::new(vec![a(), Proposition::implies(a(), b())], vec![b()])
    }

    #[test]
    fn test_permutation_count() {
        let mut items = vec![1, 2, 3];
        let mut seen = Vec::new();
        let found = find_permutation(&mut items, 0, &mut |perm: &[i32]| {
            seen.push(perm.to_vec());
            false
        });
        assert!(!found);
        assert_eq!(seen.len(), 6);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_intro_and_either_order() {
        let rule = intro_and();
        let (p, q) = (p(), q());
        let pq = Proposition::and(p.clone(), q.clone());
        assert!(rule.matches(&[&p, &q], &pq));
        assert!(rule.matches(&[&q, &p], &pq));
        assert!(!rule.matches(&[&p, &p], &pq));
    }

    #[test]
    fn test_modus_ponens_either_order() {
        let rule = modus_ponens();
        let (p, q) = (p(), q());
        let pq = Proposition::implies(p.clone(), q.clone());
        assert!(rule.matches(&[&p, &pq], &q));
        assert!(rule.matches(&[&pq, &p], &q));
        assert!(!rule.matches(&[&q, &pq], &q));
    }

    #[test]
    fn test_multiple_consequents() {
        let rule = InferenceRule::new(
            vec![a()],
            vec![Proposition::or(a(), b()), Proposition::or(b(), a())],
        );
        let p = p();
        assert!(rule.matches(&[&p], &Proposition::or(p.clone(), q())));
        assert!(rule.matches(&[&p], &Proposition::or(q(), p.clone())));
        assert!(!rule.matches(&[&p], &Proposition::and(p.clone(), q())));
    }

    #[test]
    fn test_no_antecedents() {
        let rule = InferenceRule::new(vec![], vec![Proposition::or(a(), Proposition::not(a()))]);
        assert!(rule.matches(&[], &Proposition::or(p(), Proposition::not(p()))));
        assert!(!rule.matches(&[], &Proposition::or(p(), Proposition::not(q()))));
    }

    #[test]
    fn test_justify_arity() {
        let rule = intro_and();
        let err = rule
            .justify("intro and", Number::from_slice(&[1]), p(), Vec::new())
            .unwrap_err();
        assert_eq!(err, RuleError::InvalidDependencies { expected: 2, actual: 0 });
    }
}
