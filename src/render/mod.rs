//! Output generation for checked proofs
//!
//! - [`text`] - canonical source form, accepted by the parser
//! - [`latex`] - `proof`/`tabular` environments, or an `\equiv` chain
//! - [`json`] - nested line objects for MathJax front ends

pub mod json;
pub mod latex;
pub mod text;

use crate::config::OutputFormat;
use crate::error::ProofcResult;
use crate::proof::Line;
use crate::proof::Proof;
use crate::rules::{ASSUMPTION, DIRECT_PROOF_RULE};

/// Renderer switches that do not change the proof itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Wrap LaTeX output in a standalone article
    pub latex_document: bool,
}

/// Render `proof` in the requested format
pub fn render(proof: &Proof, format: OutputFormat, options: &RenderOptions) -> ProofcResult<String> {
    let output = match format {
        OutputFormat::Text => text::render(proof),
        OutputFormat::Latex if options.latex_document => latex::document(&latex::render(proof)),
        OutputFormat::Latex => latex::render(proof),
        OutputFormat::Json => json::render(proof)?,
    };
    Ok(output)
}

/// How a line affects sub-proof nesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    Opens,
    Closes,
    Inside,
}

pub(crate) fn boundary(line: &Line) -> Boundary {
    match line.rule.normalized_name().as_str() {
        ASSUMPTION => Boundary::Opens,
        DIRECT_PROOF_RULE => Boundary::Closes,
        _ => Boundary::Inside,
    }
}

/// Capitalize each word of a rule name, leaving "of" alone
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let word = word.to_lowercase();
            if word == "of" {
                return word;
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
