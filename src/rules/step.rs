//! Validated proof steps
//!
//! A [`Step`] is one accepted line of a proof. It owns its proposition and
//! shares its dependencies, which are always earlier steps, so a conclusion
//! step is the root of an acyclic graph.

use std::rc::Rc;

use crate::error::RuleError;
use crate::logic::Proposition;
use crate::proof::{Declarations, Number};

/// Rule name that opens a sub-proof
pub const ASSUMPTION: &str = "assumption";
/// Rule name for a declared premise
pub const GIVEN: &str = "given";
/// Rule name that closes a sub-proof
pub const DIRECT_PROOF_RULE: &str = "direct proof rule";

/// How a step was justified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Assumption,
    Given,
    DirectProofRule,
    Inference,
    Equivalence,
}

/// A validated proof node
#[derive(Debug)]
pub struct Step {
    number: Number,
    proposition: Proposition,
    kind: StepKind,
    rule: String,
    dependencies: Vec<Rc<Step>>,
}

fn expect_dependencies(expected: usize, actual: usize) -> Result<(), RuleError> {
    if expected == actual {
        Ok(())
    } else {
        Err(RuleError::InvalidDependencies { expected, actual })
    }
}

impl Step {
    /// Open a sub-proof; an assumption cites nothing.
    pub fn assumption(
        number: Number,
        proposition: Proposition,
        cited: &[Rc<Step>],
    ) -> Result<Step, RuleError> {
        expect_dependencies(0, cited.len())?;
        Ok(Step {
            number,
            proposition,
            kind: StepKind::Assumption,
            rule: ASSUMPTION.to_string(),
            dependencies: Vec::new(),
        })
    }

    /// A premise; valid only if `proposition` is one of the declared givens.
    pub fn given(
        number: Number,
        proposition: Proposition,
        cited: &[Rc<Step>],
        declarations: &Declarations,
    ) -> Result<Step, RuleError> {
        expect_dependencies(0, cited.len())?;
        if !declarations.is_given(&proposition) {
            return Err(RuleError::NotGiven);
        }
        Ok(Step {
            number,
            proposition,
            kind: StepKind::Given,
            rule: GIVEN.to_string(),
            dependencies: Vec::new(),
        })
    }

    /// Close a sub-proof with `assumption → conclusion`.
    ///
    /// The two dependencies come from the bracket structure, so the line
    /// itself must cite nothing.
    pub fn direct_proof_rule(
        number: Number,
        proposition: Proposition,
        cited: &[Rc<Step>],
        assumption: Rc<Step>,
        conclusion: Rc<Step>,
    ) -> Result<Step, RuleError> {
        expect_dependencies(0, cited.len())?;
        let expected = Proposition::implies(
            assumption.proposition.clone(),
            conclusion.proposition.clone(),
        );
        if proposition != expected {
            return Err(RuleError::DirectProofRule);
        }
        Ok(Step {
            number,
            proposition,
            kind: StepKind::DirectProofRule,
            rule: DIRECT_PROOF_RULE.to_string(),
            dependencies: vec![assumption, conclusion],
        })
    }

    /// A step already validated by an inference or equivalence rule
    pub(crate) fn derived(
        kind: StepKind,
        number: Number,
        proposition: Proposition,
        rule: &str,
        dependencies: Vec<Rc<Step>>,
    ) -> Step {
        Step {
            number,
            proposition,
            kind,
            rule: rule.to_string(),
            dependencies,
        }
    }

    pub(crate) fn check_arity(expected: usize, cited: &[Rc<Step>]) -> Result<(), RuleError> {
        expect_dependencies(expected, cited.len())
    }

    /// Number in the checked source
    pub fn number(&self) -> &Number {
        &self.number
    }

    pub fn proposition(&self) -> &Proposition {
        &self.proposition
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Lower-case name of the justifying rule
    pub fn rule_name(&self) -> &str {
        &self.rule
    }

    /// Steps this one depends on; for a Direct Proof Rule the assumption
    /// and the conclusion of its sub-proof, in that order.
    pub fn dependencies(&self) -> &[Rc<Step>] {
        &self.dependencies
    }

    /// The number this step takes when it follows a line numbered `prev`
    pub fn number_after(&self, prev: &Number) -> Number {
        match self.kind {
            StepKind::Assumption => prev.increase_level(),
            StepKind::DirectProofRule => prev.decrease_level(),
            _ => prev.next(),
        }
    }
}
