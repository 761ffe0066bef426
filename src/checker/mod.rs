//! Format checker
//!
//! Consumes the lines of a [`Proof`] in order and turns them into a graph of
//! validated [`Step`]s. The line numbering decides what each line may be:
//!
//! - one level deeper than the previous line: an assumption opening a
//!   sub-proof, numbered `prev.increase_level()`
//! - one level shallower: a Direct Proof Rule closing the innermost
//!   sub-proof, numbered `prev.decrease_level()`
//! - same depth: an ordinary step, numbered `prev.next()`
//!
//! The first violation aborts the check.

use std::rc::Rc;

use fnv::FnvHashMap;
use tracing::{debug, trace};

use crate::error::{CheckError, FormatError};
use crate::logic::Proposition;
use crate::proof::{Declarations, Line, Number, Proof};
use crate::rules::{RuleCatalog, Step, ASSUMPTION, DIRECT_PROOF_RULE, GIVEN};

/// What a line must be, given its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineType {
    Assumption,
    Normal,
    DirectProofRule,
}

/// Single-pass checking state for one proof
pub struct FormatChecker<'a> {
    catalog: &'a RuleCatalog,
    declarations: &'a Declarations,
    equivalence: bool,
    steps: FnvHashMap<Number, Rc<Step>>,
    assumptions: Vec<Rc<Step>>,
    number: Number,
    last: Option<Rc<Step>>,
}

impl<'a> FormatChecker<'a> {
    pub fn new(catalog: &'a RuleCatalog, declarations: &'a Declarations, equivalence: bool) -> Self {
        FormatChecker {
            catalog,
            declarations,
            equivalence,
            steps: FnvHashMap::default(),
            assumptions: Vec::new(),
            number: Number::zero(),
            last: None,
        }
    }

    /// Check one line and record its step
    pub fn feed(&mut self, line: &Line) -> Result<Rc<Step>, CheckError> {
        let format_error = |kind| CheckError::format(&line.number, &line.proposition, kind);

        if let Some(name) = line
            .proposition
            .find_undeclared(&|name: &str| self.declarations.is_declared(name))
        {
            return Err(format_error(FormatError::UndefinedAtomic(name.to_string())));
        }

        let line_type = self.check_number(line)?;

        let mut cited = Vec::with_capacity(line.rule.refs.len());
        for reference in &line.rule.refs {
            let step = self
                .steps
                .get(reference)
                .ok_or_else(|| format_error(FormatError::MissingReference(reference.clone())))?;
            if !line.number.has_access(reference) {
                return Err(format_error(FormatError::InaccessibleReference(
                    reference.clone(),
                )));
            }
            cited.push(Rc::clone(step));
        }

        let rule_name = line.rule.normalized_name();
        let rule_error = |kind| CheckError::rule(&line.number, &line.proposition, kind);
        let number = line.number.clone();
        let proposition = line.proposition.clone();

        let step = match line_type {
            LineType::Assumption => {
                if self.equivalence {
                    return Err(format_error(FormatError::SubproofInEquivalence));
                }
                if rule_name != ASSUMPTION {
                    return Err(format_error(FormatError::MissingAssumption));
                }
                let step = Rc::new(Step::assumption(number, proposition, &cited).map_err(rule_error)?);
                self.assumptions.push(Rc::clone(&step));
                step
            }
            LineType::DirectProofRule => {
                if self.equivalence {
                    return Err(format_error(FormatError::SubproofInEquivalence));
                }
                if rule_name != DIRECT_PROOF_RULE {
                    return Err(format_error(FormatError::MissingDirectProofRule));
                }
                let assumption = self
                    .assumptions
                    .pop()
                    .ok_or_else(|| format_error(FormatError::MissingAssumption))?;
                let conclusion = self
                    .last
                    .clone()
                    .ok_or_else(|| format_error(FormatError::MissingAssumption))?;
                Rc::new(
                    Step::direct_proof_rule(number, proposition, &cited, assumption, conclusion)
                        .map_err(rule_error)?,
                )
            }
            LineType::Normal if rule_name == GIVEN => Rc::new(
                Step::given(number, proposition, &cited, self.declarations).map_err(rule_error)?,
            ),
            LineType::Normal => {
                let rule = self
                    .catalog
                    .get(&rule_name)
                    .ok_or_else(|| format_error(FormatError::UnknownRule(line.rule.name.clone())))?;
                if self.equivalence && !rule.is_equivalence() {
                    return Err(format_error(FormatError::NotAnEquivalenceRule(
                        line.rule.name.clone(),
                    )));
                }
                Rc::new(
                    rule.justify(&rule_name, number, proposition, cited)
                        .map_err(rule_error)?,
                )
            }
        };

        trace!("accepted line {} [{}]", line.number, rule_name);
        self.steps.insert(line.number.clone(), Rc::clone(&step));
        self.last = Some(Rc::clone(&step));
        Ok(step)
    }

    /// Position check: derive the expected number from the previous one
    fn check_number(&mut self, line: &Line) -> Result<LineType, CheckError> {
        let prev = &self.number;
        let (expected, line_type) = if line.number.levels() < prev.levels() {
            (prev.decrease_level(), LineType::DirectProofRule)
        } else if line.number.levels() > prev.levels() {
            (prev.increase_level(), LineType::Assumption)
        } else {
            (prev.next(), LineType::Normal)
        };
        if line.number != expected {
            return Err(CheckError::format(
                &line.number,
                &line.proposition,
                FormatError::IncorrectLineNumber { expected },
            ));
        }
        self.number = expected;
        Ok(line_type)
    }

    /// Close the check and return the conclusion step
    pub fn finish(self) -> Result<Rc<Step>, CheckError> {
        let last = match self.last {
            Some(last) => last,
            None => {
                return Err(CheckError::format(
                    &Number::zero(),
                    &Proposition::True,
                    FormatError::EmptyProof,
                ))
            }
        };
        if !self.assumptions.is_empty() {
            return Err(CheckError::format(
                last.number(),
                last.proposition(),
                FormatError::UnclosedSubproof,
            ));
        }
        Ok(last)
    }
}

/// Check a whole proof and return its conclusion step
pub fn check(proof: &Proof, catalog: &RuleCatalog) -> Result<Rc<Step>, CheckError> {
    let mut checker = FormatChecker::new(catalog, &proof.declarations, proof.equivalence);
    for line in &proof.lines {
        checker.feed(line)?;
    }
    let conclusion = checker.finish()?;
    debug!(
        lines = proof.lines.len(),
        "proof checked, concluding {}",
        conclusion.proposition()
    );
    Ok(conclusion)
}
