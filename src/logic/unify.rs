//! One-way unification of rule templates against propositions
//!
//! Only the rule side may contain meta variables. Matching is a single
//! deterministic structural descent; any search over alternatives (dependency
//! permutations, sub-expression positions) happens in the callers.

use std::collections::HashMap;

use super::proposition::Proposition;

/// A mapping from meta variable names to the propositions they matched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: HashMap<String, Proposition>,
}

impl Substitution {
    /// Create an empty substitution
    pub fn new() -> Self {
        Substitution {
            bindings: HashMap::new(),
        }
    }

    /// Create a substitution with a single binding
    pub fn singleton(meta: &str, prop: Proposition) -> Self {
        let mut s = Substitution::new();
        s.bindings.insert(meta.to_string(), prop);
        s
    }

    /// Look up a meta variable
    pub fn get(&self, meta: &str) -> Option<&Proposition> {
        self.bindings.get(meta)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Union of two substitutions.
    ///
    /// Fails when a meta variable is bound to different propositions.
    pub fn merge(mut self, other: Substitution) -> Option<Substitution> {
        for (meta, prop) in other.bindings {
            match self.bindings.get(&meta) {
                Some(existing) if *existing != prop => return None,
                Some(_) => {}
                None => {
                    self.bindings.insert(meta, prop);
                }
            }
        }
        Some(self)
    }
}

/// Result of unifying a rule template with a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyResult {
    /// The template matches with the given bindings
    Success(Substitution),
    /// The template does not match
    Failure,
}

impl UnifyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UnifyResult::Success(_))
    }

    pub fn substitution(self) -> Option<Substitution> {
        match self {
            UnifyResult::Success(s) => Some(s),
            UnifyResult::Failure => None,
        }
    }
}

impl From<Option<Substitution>> for UnifyResult {
    fn from(result: Option<Substitution>) -> Self {
        match result {
            Some(s) => UnifyResult::Success(s),
            None => UnifyResult::Failure,
        }
    }
}

/// Unify a rule template with a target proposition
///
/// A meta variable matches any sub-proposition; repeated occurrences of the
/// same meta variable must match structurally equal sub-propositions.
pub fn unify(rule: &Proposition, target: &Proposition) -> UnifyResult {
    unify_terms(rule, target).into()
}

/// Check if a rule template matches a target (without keeping the bindings)
pub fn unifiable(rule: &Proposition, target: &Proposition) -> bool {
    unify_terms(rule, target).is_some()
}

fn unify_terms(rule: &Proposition, target: &Proposition) -> Option<Substitution> {
    match (rule, target) {
        (Proposition::Meta(name), _) => Some(Substitution::singleton(name, target.clone())),
        (Proposition::True, Proposition::True) | (Proposition::False, Proposition::False) => {
            Some(Substitution::new())
        }
        (Proposition::Atomic(a), Proposition::Atomic(b)) if a == b => Some(Substitution::new()),
        (Proposition::Unary(op1, arg1), Proposition::Unary(op2, arg2)) if op1 == op2 => {
            unify_terms(arg1, arg2)
        }
        (Proposition::Binary(op1, l1, r1), Proposition::Binary(op2, l2, r2)) if op1 == op2 => {
            let lhs = unify_terms(l1, l2)?;
            let rhs = unify_terms(r1, r2)?;
            lhs.merge(rhs)
        }
        _ => None,
    }
}
