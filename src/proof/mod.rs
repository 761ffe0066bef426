//! Proof source model
//!
//! These are the values exchanged with the outside world: the parser
//! produces a [`Proof`], the checker consumes its [`Line`]s, and the
//! optimizer hands a fresh list of [`Line`]s to the renderers.

pub mod declarations;
pub mod number;

use std::fmt;
use std::sync::Arc;

pub use declarations::Declarations;
pub use number::Number;

use crate::logic::Proposition;

/// A cited rule together with the lines it is applied to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleRef {
    pub name: String,
    pub refs: Vec<Number>,
}

impl RuleRef {
    pub fn new(name: impl Into<String>, refs: Vec<Number>) -> Self {
        RuleRef {
            name: name.into(),
            refs,
        }
    }

    /// A rule citation without references
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Lower-cased rule name with runs of whitespace collapsed
    pub fn normalized_name(&self) -> String {
        normalize_rule_name(&self.name)
    }

    /// References in ascending line order
    pub fn sorted_refs(&self) -> Vec<&Number> {
        let mut refs: Vec<&Number> = self.refs.iter().collect();
        refs.sort();
        refs
    }
}

/// Lower-case a rule name and collapse its whitespace
pub fn normalize_rule_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        let refs = self.sorted_refs();
        if !refs.is_empty() {
            write!(f, ": ")?;
            for (i, r) in refs.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", r)?;
            }
        }
        Ok(())
    }
}

/// One justified assertion of a proof
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    pub number: Number,
    pub proposition: Proposition,
    pub rule: RuleRef,
}

impl Line {
    pub fn new(number: Number, proposition: Proposition, rule: RuleRef) -> Self {
        Line {
            number,
            proposition,
            rule,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} [{}]", self.number, self.proposition, self.rule)
    }
}

/// A parsed proof: mode, declarations, and lines in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    /// Equivalence proofs may only cite equivalence rules and givens
    pub equivalence: bool,
    pub declarations: Arc<Declarations>,
    pub lines: Vec<Line>,
}

impl Proof {
    pub fn new(equivalence: bool, declarations: Arc<Declarations>, lines: Vec<Line>) -> Self {
        Proof {
            equivalence,
            declarations,
            lines,
        }
    }

    /// The same declarations and mode with a different body
    pub fn with_lines(&self, lines: Vec<Line>) -> Self {
        Proof {
            equivalence: self.equivalence,
            declarations: Arc::clone(&self.declarations),
            lines,
        }
    }

    pub fn header(&self) -> &'static str {
        if self.equivalence {
            "equivalence."
        } else {
            "proof."
        }
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.declarations)?;
        writeln!(f, "{}", self.header())?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
