//! Canonical text form

use std::fmt::Write;

use super::title_case;
use crate::proof::{Line, Proof, RuleRef};

/// Declarations, header and lines, one statement per line
pub fn render(proof: &Proof) -> String {
    let mut out = proof.declarations.to_string();
    out.push_str(proof.header());
    out.push('\n');
    for line in &proof.lines {
        let _ = writeln!(out, "{}", render_line(line));
    }
    out
}

pub fn render_line(line: &Line) -> String {
    let rule = RuleRef::new(title_case(&line.rule.name), line.rule.refs.clone());
    format!("{}. {} [{}]", line.number, line.proposition, rule)
}
