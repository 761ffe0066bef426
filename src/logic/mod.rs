//! Propositional logic core
//!
//! - [`Proposition`] - immutable expression tree
//! - [`unify`] - template matching with meta variables

pub mod proposition;
pub mod unify;

pub use proposition::{BinaryOp, Proposition, UnaryOp};
pub use unify::{unifiable, unify, Substitution, UnifyResult};
