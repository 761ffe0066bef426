//! proofc - propositional logic proof compiler
//!
//! Checks hand-written natural deduction and equivalence proofs line by
//! line, drops every line the conclusion does not depend on, renumbers what
//! is left, and renders the result as text, LaTeX or JSON.
//!
//! # Architecture
//!
//! - [`logic`] - propositions and rule-template unification
//! - [`proof`] - line numbers, declarations, and the parsed proof model
//! - [`rules`] - validated steps and the standard rule catalog
//! - [`checker`] - the scoping and justification state machine
//! - [`optimizer`] - dependency-ordered compaction and renumbering
//! - [`parser`] - the `.proof` source format
//! - [`render`] - text, LaTeX and JSON output
//! - [`compiler`] - the parse, check, optimize, render pipeline
//!
//! # Example
//!
//! ```rust,ignore
//! use proofc::{Compiler, OutputFormat};
//!
//! let source = "\
//! Let p be a proposition
//! Let q be a proposition
//! Given p
//! Given q
//! proof.
//! 1. p [Given]
//! 2. q [Given]
//! 3. p∧q [Intro And: 1, 2]
//! ";
//!
//! let compiler = Compiler::default();
//! let compiled = compiler.compile_str(source)?;
//! println!("{}", compiler.render(&compiled, OutputFormat::Text)?);
//! ```

pub mod checker;
pub mod compiler;
pub mod config;
pub mod error;
pub mod logic;
pub mod optimizer;
pub mod parser;
pub mod proof;
pub mod render;
pub mod rules;

#[cfg(test)]
mod proptest;

pub use checker::{check, FormatChecker};
pub use compiler::{CompiledProof, Compiler};
pub use config::{ConfigError, LogLevel, OutputFormat, ProofcConfig};
pub use error::{CheckError, ErrorCode, FormatError, ProofcError, ProofcResult, RuleError};
pub use logic::{unify, BinaryOp, Proposition, Substitution, UnaryOp, UnifyResult};
pub use optimizer::{optimize, Optimizer};
pub use parser::{parse_proof, parse_proposition, ParseError};
pub use proof::{Declarations, Line, Number, Proof, RuleRef};
pub use render::RenderOptions;
pub use rules::{Rule, RuleCatalog, Step, StepKind};
