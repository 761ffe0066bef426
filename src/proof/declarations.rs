//! Proof declarations: atomic variables and given premises

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::logic::Proposition;

/// The declared atomic names and the given propositions of a proof.
///
/// Built up by merging while the source is read, then frozen and shared
/// read-only by everything that inspects the proof.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    atomics: IndexSet<String>,
    givens: IndexSet<Proposition>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declarations with a single atomic name
    pub fn atomic(name: impl Into<String>) -> Self {
        let mut decls = Self::new();
        decls.atomics.insert(name.into());
        decls
    }

    /// Declarations with a single given proposition
    pub fn given(prop: Proposition) -> Self {
        let mut decls = Self::new();
        decls.givens.insert(prop);
        decls
    }

    /// Convenience constructor from lists of names and givens
    pub fn from_parts<S: Into<String>>(
        atomics: impl IntoIterator<Item = S>,
        givens: impl IntoIterator<Item = Proposition>,
    ) -> Self {
        Declarations {
            atomics: atomics.into_iter().map(Into::into).collect(),
            givens: givens.into_iter().collect(),
        }
    }

    /// Union with another set of declarations; earlier entries keep their position.
    pub fn merge(mut self, other: Declarations) -> Self {
        self.atomics.extend(other.atomics);
        self.givens.extend(other.givens);
        self
    }

    /// Finish construction; the result is immutable and cheap to share.
    pub fn freeze(self) -> Arc<Declarations> {
        Arc::new(self)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.atomics.contains(name)
    }

    pub fn is_given(&self, prop: &Proposition) -> bool {
        self.givens.contains(prop)
    }
}

impl fmt::Display for Declarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.atomics {
            writeln!(f, "Let {} be a proposition", name)?;
        }
        for prop in &self.givens {
            writeln!(f, "Given {}", prop)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let decls = Declarations::atomic("p")
            .merge(Declarations::atomic("q"))
            .merge(Declarations::given(Proposition::atomic("p")))
            .merge(Declarations::atomic("p"));

        assert!(decls.is_declared("p"));
        assert!(decls.is_declared("q"));
        assert!(!decls.is_declared("r"));
        assert!(decls.is_given(&Proposition::atomic("p")));
        assert!(!decls.is_given(&Proposition::atomic("q")));
        assert_eq!(decls.atomics.len(), 2);
    }

    #[test]
    fn test_merge_is_associative() {
        let a = Declarations::atomic("p");
        let b = Declarations::given(Proposition::atomic("p"));
        let c = Declarations::atomic("q");

        let left = a.clone().merge(b.clone()).merge(c.clone());
        let right = a.merge(b.merge(c));
        assert_eq!(left, right);
    }

    #[test]
    fn test_display() {
        let decls = Declarations::from_parts(
            ["p", "q"],
            [Proposition::atomic("p"), Proposition::atomic("q")],
        );
        assert_eq!(
            decls.to_string(),
            "Let p be a proposition\nLet q be a proposition\nGiven p\nGiven q\n"
        );
    }

    #[test]
    fn test_freeze_shares() {
        let frozen = Declarations::atomic("p").freeze();
        let shared = Arc::clone(&frozen);
        assert!(shared.is_declared("p"));
        assert_eq!(Arc::strong_count(&frozen), 2);
    }
}
