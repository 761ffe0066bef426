//! Compilation pipeline
//!
//! A [`Compiler`] owns the rule catalog and the active configuration, and
//! turns proof source into checked, compacted output:
//!
//! ```text
//! source --parse--> Proof --check--> conclusion --optimize--> Proof --render--> String
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::checker::check;
use crate::config::{OutputFormat, ProofcConfig};
use crate::error::{ProofcError, ProofcResult};
use crate::optimizer::optimize;
use crate::parser::parse_proof;
use crate::proof::Proof;
use crate::render::{self, RenderOptions};
use crate::rules::RuleCatalog;

/// A proof that passed the checker, ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProof {
    /// Output body: compacted, or the source lines when optimization is off
    pub proof: Proof,
    /// Number of lines in the source proof
    pub source_lines: usize,
}

impl CompiledProof {
    /// Lines the optimizer removed
    pub fn pruned(&self) -> usize {
        self.source_lines.saturating_sub(self.proof.lines.len())
    }
}

pub struct Compiler {
    catalog: RuleCatalog,
    config: ProofcConfig,
}

impl Compiler {
    pub fn new(config: ProofcConfig) -> Self {
        Self::with_catalog(RuleCatalog::standard(), config)
    }

    pub fn with_catalog(catalog: RuleCatalog, config: ProofcConfig) -> Self {
        Compiler { catalog, config }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ProofcConfig {
        &self.config
    }

    /// Parse, check and (unless disabled) compact a proof
    pub fn compile_str(&self, source: &str) -> ProofcResult<CompiledProof> {
        let mut proof = parse_proof(source)?;
        if self.config.checker.equivalence_rules_only {
            proof.equivalence = true;
        }

        let conclusion = check(&proof, &self.catalog)?;
        debug!("conclusion: {} {}", conclusion.number(), conclusion.proposition());

        let source_lines = proof.lines.len();
        let proof = if self.config.checker.optimize {
            let lines = optimize(&conclusion)?;
            let compacted = proof.with_lines(lines);
            debug!(
                pruned = source_lines.saturating_sub(compacted.lines.len()),
                "optimized proof"
            );
            compacted
        } else {
            proof
        };

        Ok(CompiledProof {
            proof,
            source_lines,
        })
    }

    /// Read and compile one proof file
    pub fn compile_file(&self, path: &Path) -> ProofcResult<CompiledProof> {
        info!("compiling '{}'...", path.display());
        let source = fs::read_to_string(path)
            .map_err(|e| ProofcError::from(e).at(path.display().to_string()))?;
        let compiled = self
            .compile_str(&source)
            .map_err(|e| e.at(path.display().to_string()))?;
        info!("'{}' compilation complete", path.display());
        Ok(compiled)
    }

    pub fn render(&self, compiled: &CompiledProof, format: OutputFormat) -> ProofcResult<String> {
        let options = RenderOptions {
            latex_document: self.config.output.latex_document,
        };
        render::render(&compiled.proof, format, &options)
    }

    /// Where the output for `input` goes: the input's stem with the
    /// format's extension, in the configured directory or beside the input
    pub fn output_path(&self, input: &Path, format: OutputFormat) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "proof".into());
        let mut name = PathBuf::from(stem);
        name.set_extension(format.extension());

        match &self.config.output.directory {
            Some(dir) => Path::new(dir).join(name),
            None => input.with_file_name(name),
        }
    }

    /// Compile `input`, render it, and write the result next to it
    pub fn compile_to_file(&self, input: &Path, format: OutputFormat) -> ProofcResult<PathBuf> {
        let compiled = self.compile_file(input)?;
        let output = self.render(&compiled, format)?;
        let path = self.output_path(input, format);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ProofcError::from(e).at(parent.display().to_string()))?;
        }
        fs::write(&path, output).map_err(|e| ProofcError::from(e).at(path.display().to_string()))?;
        info!("wrote '{}'", path.display());
        Ok(path)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(ProofcConfig::default())
    }
}
