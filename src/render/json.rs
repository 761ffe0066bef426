//! Nested JSON for MathJax front ends
//!
//! The document is a list of entries. A line is
//! `{"number", "prop", "rule"}` with LaTeX in the last two fields; a
//! sub-proof is `{"subproof": [...]}` and precedes its direct proof rule line.

use serde::Serialize;

use super::{boundary, latex, Boundary};
use crate::proof::{Line, Proof};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Line {
        number: String,
        prop: String,
        rule: String,
    },
    Subproof {
        subproof: Vec<Entry>,
    },
}

impl Entry {
    fn line(line: &Line) -> Self {
        Entry::Line {
            number: line.number.to_string(),
            prop: latex::proposition(&line.proposition),
            rule: latex::rule(&line.rule),
        }
    }
}

/// Group lines into nested sub-proof entries
pub fn entries(lines: &[Line]) -> Vec<Entry> {
    let mut stack: Vec<Vec<Entry>> = Vec::new();
    let mut current = Vec::new();
    for line in lines {
        match boundary(line) {
            Boundary::Opens => stack.push(std::mem::take(&mut current)),
            Boundary::Closes => {
                if let Some(parent) = stack.pop() {
                    let subproof = std::mem::replace(&mut current, parent);
                    current.push(Entry::Subproof { subproof });
                }
            }
            Boundary::Inside => {}
        }
        current.push(Entry::line(line));
    }
    current
}

pub fn render(proof: &Proof) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&entries(&proof.lines))
}
