//! Proof steps and the rules that justify them
//!
//! - [`step`] - validated proof nodes
//! - [`inference`] - rules with antecedents and consequents
//! - [`equivalence`] - rewrite rules applied at any depth
//! - [`catalog`] - the standard named rule table

pub mod catalog;
pub mod equivalence;
pub mod inference;
pub mod step;

pub use catalog::{Rule, RuleCatalog};
pub use equivalence::EquivalenceRule;
pub use inference::InferenceRule;
pub use step::{Step, StepKind, ASSUMPTION, DIRECT_PROOF_RULE, GIVEN};
