//! LaTeX output
//!
//! Ordinary proofs become a `proof` environment holding a three column
//! `tabular`; every sub-proof is a nested `tabular` inside a `\multicolumn`
//! cell, opened on its assumption and closed just before its direct proof
//! rule line. Equivalence proofs become a single `\equiv` chain.

use super::{boundary, title_case, Boundary};
use crate::logic::proposition::needs_parens;
use crate::logic::{BinaryOp, Proposition, UnaryOp};
use crate::proof::{Line, Proof, RuleRef};
use crate::rules::GIVEN;

/// Standalone article around a rendered proof
pub fn document(body: &str) -> String {
    format!(
        "\\documentclass{{article}}\n\\usepackage{{amsmath, amsthm}}\n\\begin{{document}}\n{}\\end{{document}}\n",
        body
    )
}

pub fn render(proof: &Proof) -> String {
    if proof.equivalence {
        render_chain(&proof.lines)
    } else {
        render_lines(&proof.lines)
    }
}

/// Nested tabular layout of a natural deduction proof
pub fn render_lines(lines: &[Line]) -> String {
    let mut w = Writer::default();
    w.begin("proof", None);
    w.add("\\hfill\\par");
    w.brk();
    w.begin("tabular", Some("rll"));
    w.brk();
    for line in lines {
        match boundary(line) {
            Boundary::Opens => {
                w.add("\\multicolumn{3}{l}{\\quad");
                w.begin("tabular", Some("rll"));
                w.brk();
            }
            Boundary::Closes => {
                w.end("tabular");
                w.add("} \\\\");
                w.brk();
            }
            Boundary::Inside => {}
        }
        w.add(&format!(
            "{}. & \\( {} \\) & [ {} ] \\\\",
            line.number,
            proposition(&line.proposition),
            rule(&line.rule)
        ));
        w.brk();
    }
    w.end("tabular");
    w.add("\\par");
    w.brk();
    w.end("proof");
    w.brk();
    w.finish()
}

/// `\equiv` chain of an equivalence proof
pub fn render_chain(lines: &[Line]) -> String {
    let mut w = Writer::default();
    w.begin("tabular", Some("r@{\\hskip0.5\\tabcolsep}ll"));
    w.brk();
    for line in lines {
        if line.rule.normalized_name() == GIVEN {
            w.add(&format!("\\( {} \\)", proposition(&line.proposition)));
        } else {
            w.add(&format!(
                "& \\( \\equiv {} \\) & [ {} ] \\\\",
                proposition(&line.proposition),
                title_case(&line.rule.name)
            ));
        }
        w.brk();
    }
    w.end("tabular");
    w.add("\\par");
    w.brk();
    w.finish()
}

/// Math-mode rendering of a proposition
pub fn proposition(prop: &Proposition) -> String {
    match prop {
        Proposition::True => "\\mathsf{T}".to_string(),
        Proposition::False => "\\mathsf{F}".to_string(),
        Proposition::Atomic(name) | Proposition::Meta(name) => name.clone(),
        Proposition::Unary(op, arg) => {
            let arg = if matches!(**arg, Proposition::Binary(..)) {
                format!("({})", proposition(arg))
            } else {
                proposition(arg)
            };
            format!("{} {}", unary(*op), arg)
        }
        Proposition::Binary(op, lhs, rhs) => format!(
            "{} {} {}",
            operand(*op, lhs, false),
            binary(*op),
            operand(*op, rhs, true)
        ),
    }
}

fn operand(parent: BinaryOp, child: &Proposition, right: bool) -> String {
    if needs_parens(parent, child, right) {
        format!("({})", proposition(child))
    } else {
        proposition(child)
    }
}

fn unary(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Not => "\\neg",
    }
}

fn binary(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::And => "\\land",
        BinaryOp::Or => "\\lor",
        BinaryOp::Xor => "\\oplus",
        BinaryOp::Implies => "\\to",
        BinaryOp::Biconditional => "\\leftrightarrow",
    }
}

/// Display name of a rule, with connectives typeset where it names one
pub fn rule_name(rule: &RuleRef) -> String {
    match rule.normalized_name().as_str() {
        "intro and" => "Intro \\(\\land\\)".to_string(),
        "intro or" => "Intro \\(\\lor\\)".to_string(),
        "elim and" => "Elim \\(\\land\\)".to_string(),
        "elim or" => "Elim \\(\\lor\\)".to_string(),
        "definition of xor" => "Definition of \\(\\oplus\\)".to_string(),
        "definition of biconditional" => "Definition of \\(\\leftrightarrow\\)".to_string(),
        other => title_case(other),
    }
}

/// Rule name followed by its sorted references
pub fn rule(rule: &RuleRef) -> String {
    RuleRef::new(rule_name(rule), rule.refs.clone()).to_string()
}

/// Indenting line writer; tokens on one line are joined with a space
#[derive(Debug, Default)]
struct Writer {
    out: String,
    indent: usize,
    mid_line: bool,
}

impl Writer {
    fn add(&mut self, s: &str) {
        if self.mid_line {
            self.out.push(' ');
        } else {
            self.out.push_str(&"    ".repeat(self.indent));
        }
        self.out.push_str(s);
        self.mid_line = true;
    }

    fn brk(&mut self) {
        self.out.push('\n');
        self.mid_line = false;
    }

    fn begin(&mut self, env: &str, arg: Option<&str>) {
        match arg {
            Some(arg) => self.add(&format!("\\begin{{{}}}{{{}}}", env, arg)),
            None => self.add(&format!("\\begin{{{}}}", env)),
        }
        self.indent += 1;
    }

    fn end(&mut self, env: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.add(&format!("\\end{{{}}}", env));
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_proof, parse_proposition};

    fn tex(source: &str) -> String {
        proposition(&parse_proposition(source).unwrap())
    }

    #[test]
    fn test_proposition() {
        assert_eq!(tex("p∧q"), "p \\land q");
        assert_eq!(tex("¬(p∨q)"), "\\neg (p \\lor q)");
        assert_eq!(tex("¬¬p"), "\\neg \\neg p");
        assert_eq!(tex("(p→q)→r"), "(p \\to q) \\to r");
        assert_eq!(tex("p∨q∧r"), "p \\lor q \\land r");
        assert_eq!(tex("(p∨q)∧r"), "(p \\lor q) \\land r");
        assert_eq!(tex("T⊕F"), "\\mathsf{T} \\oplus \\mathsf{F}");
        assert_eq!(tex("p↔q"), "p \\leftrightarrow q");
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(rule(&RuleRef::new("intro and", vec![])), "Intro \\(\\land\\)");
        assert_eq!(
            rule_name(&RuleRef::bare("Definition of Biconditional")),
            "Definition of \\(\\leftrightarrow\\)"
        );
        assert_eq!(rule_name(&RuleRef::bare("modus ponens")), "Modus Ponens");
    }

    #[test]
    fn test_render_nested() {
        let proof = parse_proof(
            "Let p be a proposition\nproof.\n1.1. p [Assumption]\n1. p→p [Direct Proof Rule]\n",
        )
        .unwrap();
        let expected = "\
\\begin{proof} \\hfill\\par
    \\begin{tabular}{rll}
        \\multicolumn{3}{l}{\\quad \\begin{tabular}{rll}
            1.1. & \\( p \\) & [ Assumption ] \\\\
        \\end{tabular} } \\\\
        1. & \\( p \\to p \\) & [ Direct Proof Rule ] \\\\
    \\end{tabular} \\par
\\end{proof}
";
        assert_eq!(render(&proof), expected);
    }

    #[test]
    fn test_render_refs() {
        let proof = parse_proof(
            "Let p be a proposition\nLet q be a proposition\nGiven p\nGiven q\nproof.\n\
             1. p [Given]\n2. q [Given]\n3. p∧q [Intro And: 2, 1]\n",
        )
        .unwrap();
        let out = render(&proof);
        assert!(out.contains("        3. & \\( p \\land q \\) & [ Intro \\(\\land\\): 1, 2 ] \\\\\n"));
    }

    #[test]
    fn test_render_chain() {
        let proof = parse_proof(
            "Let p be a proposition\nGiven p∧p\nequivalence.\n1. p∧p [Given]\n2. p [Idempotency: 1]\n",
        )
        .unwrap();
        let expected = "\
\\begin{tabular}{r@{\\hskip0.5\\tabcolsep}ll}
    \\( p \\land p \\)
    & \\( \\equiv p \\) & [ Idempotency ] \\\\
\\end{tabular} \\par
";
        assert_eq!(render(&proof), expected);
    }

    #[test]
    fn test_document() {
        let doc = document("BODY\n");
        assert!(doc.starts_with("\\documentclass{article}\n\\usepackage{amsmath, amsthm}\n\\begin{document}\nBODY\n"));
        assert!(doc.ends_with("\\end{document}\n"));
    }
}
