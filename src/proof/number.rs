//! Hierarchical line numbers
//!
//! A line number is a dotted path of positive integers such as `3` or
//! `2.1.4`. Each extra component is one level of sub-proof nesting. The
//! checker derives the only acceptable number for every line from the number
//! of the line before it, and the optimizer replays the same algebra to
//! renumber a compacted proof.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A hierarchical line address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number {
    components: Vec<u32>,
}

impl Number {
    /// The position before the first line of a proof
    pub fn zero() -> Self {
        Number { components: vec![0] }
    }

    /// Create a number from its components; returns `None` for an empty path.
    pub fn new(components: Vec<u32>) -> Option<Self> {
        if components.is_empty() {
            None
        } else {
            Some(Number { components })
        }
    }

    /// Create a number from a slice literal; panics on an empty slice.
    #[cfg(test)]
    pub(crate) fn from_slice(components: &[u32]) -> Self {
        assert!(!components.is_empty(), "line numbers have at least one component");
        Number {
            components: components.to_vec(),
        }
    }

    /// Nesting depth (number of components)
    pub fn levels(&self) -> usize {
        self.components.len()
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }

    fn last_component(&self) -> u32 {
        // components is never empty
        self.components[self.components.len() - 1]
    }

    /// The next sibling: increment the last component
    pub fn next(&self) -> Number {
        let mut components = self.components.clone();
        let last = components.len() - 1;
        components[last] += 1;
        Number { components }
    }

    /// Open a sub-proof: reserve the next sibling slot for the closing line
    /// and descend into it, e.g. `2` becomes `3.1`
    pub fn increase_level(&self) -> Number {
        let mut next = self.next();
        next.components.push(1);
        next
    }

    /// Close a sub-proof: return to the reserved slot, e.g. `3.4` becomes `3`.
    ///
    /// A single-component number has no enclosing level and is returned as is.
    pub fn decrease_level(&self) -> Number {
        if self.components.len() == 1 {
            return self.clone();
        }
        Number {
            components: self.components[..self.components.len() - 1].to_vec(),
        }
    }

    /// Whether a line numbered `self` may cite the line numbered `that`.
    ///
    /// `that` must live in the same scope as `self` or in an enclosing one,
    /// and must come strictly earlier at its own depth.
    pub fn has_access(&self, that: &Number) -> bool {
        if self.levels() < that.levels() {
            return false;
        }
        let last = that.levels() - 1;
        if self.components[..last] != that.components[..last] {
            return false;
        }
        that.last_component() < self.components[last]
    }
}

impl Ord for Number {
    /// Path order where a number sorts after its own deeper continuations,
    /// so a sub-proof's lines precede the line that closes it.
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.components.iter().zip(other.components.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        other.components.len().cmp(&self.components.len())
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(components: &[u32]) -> Number {
        Number::from_slice(components)
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Number::new(vec![]).is_none());
        assert_eq!(Number::new(vec![1, 2]), Some(n(&[1, 2])));
    }

    #[test]
    fn test_next() {
        assert_eq!(Number::zero().next(), n(&[1]));
        assert_eq!(n(&[2, 3]).next(), n(&[2, 4]));
    }

    #[test]
    fn test_increase_level() {
        assert_eq!(Number::zero().increase_level(), n(&[1, 1]));
        assert_eq!(n(&[2]).increase_level(), n(&[3, 1]));
        assert_eq!(n(&[3, 2]).increase_level(), n(&[3, 3, 1]));
    }

    #[test]
    fn test_decrease_level() {
        assert_eq!(n(&[3, 4]).decrease_level(), n(&[3]));
        assert_eq!(n(&[3, 3, 1]).decrease_level(), n(&[3, 3]));
    }

    #[test]
    fn test_scope_round_trip() {
        let open = n(&[2]).increase_level();
        let inner = open.next().next();
        assert_eq!(inner.decrease_level(), n(&[3]));
    }

    #[test]
    fn test_order_siblings() {
        assert!(n(&[1]) < n(&[2]));
        assert!(n(&[1, 2]) < n(&[1, 3]));
        assert!(n(&[1, 9]) < n(&[2, 1]));
    }

    #[test]
    fn test_order_parent_after_children() {
        assert!(n(&[1, 1]) < n(&[1]));
        assert!(n(&[1, 5, 2]) < n(&[1, 5]));
        assert!(n(&[1]) < n(&[2, 1]));
        assert_eq!(n(&[1, 2]).cmp(&n(&[1, 2])), Ordering::Equal);
    }

    #[test]
    fn test_order_follows_checker_sequence() {
        let seq = [
            n(&[1]),
            n(&[2, 1]),
            n(&[2, 2]),
            n(&[2, 3, 1]),
            n(&[2, 3]),
            n(&[2]),
            n(&[3]),
        ];
        for pair in seq.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_has_access_same_scope() {
        assert!(n(&[3]).has_access(&n(&[1])));
        assert!(!n(&[1]).has_access(&n(&[3])));
        assert!(!n(&[2]).has_access(&n(&[2])));
    }

    #[test]
    fn test_has_access_enclosing_scope() {
        assert!(n(&[2, 2]).has_access(&n(&[1])));
        assert!(n(&[2, 2]).has_access(&n(&[2, 1])));
        assert!(n(&[2, 3, 1]).has_access(&n(&[2, 1])));
        // the reserved slot of the enclosing sub-proof is not yet written
        assert!(!n(&[2, 2]).has_access(&n(&[2])));
    }

    #[test]
    fn test_has_access_rejects_closed_scope() {
        assert!(!n(&[3]).has_access(&n(&[2, 1])));
        assert!(!n(&[3, 1]).has_access(&n(&[2, 1])));
        assert!(!n(&[2, 4, 1]).has_access(&n(&[2, 3, 1])));
    }

    #[test]
    fn test_display() {
        assert_eq!(n(&[1]).to_string(), "1");
        assert_eq!(n(&[2, 3, 1]).to_string(), "2.3.1");
        assert_eq!(Number::zero().to_string(), "0");
    }
}
