//! Structured error handling for proofc
//!
//! Two layers:
//!
//! - Typed errors raised by the core: [`CheckError`] wraps a
//!   [`FormatError`] (the proof is laid out wrongly) or a [`RuleError`] (a
//!   cited rule does not justify the line). Both carry the offending line
//!   number and proposition.
//! - [`ProofcError`], a serializable error with an [`ErrorCode`], optional
//!   context and hint, used at the tool boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use proofc::error::{ProofcError, ErrorCode};
//!
//! fn load(path: &str) -> Result<String, ProofcError> {
//!     std::fs::read_to_string(path)
//!         .map_err(|e| ProofcError::from(e).with_context("file", path))
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::logic::Proposition;
use crate::parser::ParseError;
use crate::proof::Number;

// ============================================================================
// Core check errors
// ============================================================================

/// Violations of the numbering, scoping, and citation format
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("undefined atomic proposition: '{0}'")]
    UndefinedAtomic(String),

    #[error("incorrect line number")]
    IncorrectLineNumber { expected: Number },

    #[error("referred line '{0}' does not exist")]
    MissingReference(Number),

    #[error("cannot refer to line '{0}'")]
    InaccessibleReference(Number),

    #[error("sub-proofs must start with an assumption")]
    MissingAssumption,

    #[error("sub-proofs must be followed by a Direct Proof Rule")]
    MissingDirectProofRule,

    #[error("referred rule '{0}' does not exist")]
    UnknownRule(String),

    #[error("rule '{0}' is not an equivalence rule")]
    NotAnEquivalenceRule(String),

    #[error("sub-proofs are not allowed in an equivalence proof")]
    SubproofInEquivalence,

    #[error("proof ends in a sub-proof")]
    UnclosedSubproof,

    #[error("proof is empty")]
    EmptyProof,
}

/// A cited rule does not justify the line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("expect {expected} dependencies but got {actual}")]
    InvalidDependencies { expected: usize, actual: usize },

    #[error("invalid use of Direct Proof Rule")]
    DirectProofRule,

    #[error("proposition is not given")]
    NotGiven,

    #[error("inference rule does not match")]
    InferenceMismatch,

    #[error("equivalence rule does not match")]
    EquivalenceMismatch,
}

/// The first violation found while checking a proof
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("at line {number}: {kind}")]
    Format {
        number: Number,
        proposition: Proposition,
        kind: FormatError,
    },

    #[error("at line {number} [{proposition}]: {kind}")]
    Rule {
        number: Number,
        proposition: Proposition,
        kind: RuleError,
    },
}

impl CheckError {
    pub fn format(number: &Number, proposition: &Proposition, kind: FormatError) -> Self {
        CheckError::Format {
            number: number.clone(),
            proposition: proposition.clone(),
            kind,
        }
    }

    pub fn rule(number: &Number, proposition: &Proposition, kind: RuleError) -> Self {
        CheckError::Rule {
            number: number.clone(),
            proposition: proposition.clone(),
            kind,
        }
    }

    pub fn number(&self) -> &Number {
        match self {
            CheckError::Format { number, .. } | CheckError::Rule { number, .. } => number,
        }
    }

    pub fn proposition(&self) -> &Proposition {
        match self {
            CheckError::Format { proposition, .. } | CheckError::Rule { proposition, .. } => {
                proposition
            }
        }
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Parse errors (1xxx)
    InvalidSyntax = 1001,
    UnexpectedEof = 1002,

    // Format errors (2xxx)
    UndefinedAtomic = 2001,
    IncorrectLineNumber = 2002,
    MissingReference = 2003,
    InaccessibleReference = 2004,
    SubproofMisuse = 2005,
    UnknownRule = 2006,
    UnclosedSubproof = 2007,
    EmptyProof = 2008,

    // Rule errors (3xxx)
    InvalidDependencies = 3001,
    DirectProofRuleMismatch = 3002,
    NotGiven = 3003,
    InferenceMismatch = 3004,
    EquivalenceMismatch = 3005,

    // I/O errors (4xxx)
    IoError = 4000,
    FileNotFound = 4001,
    FileAccessDenied = 4002,
    InvalidJson = 4003,

    // Config errors (7xxx)
    ConfigError = 7000,
    InvalidConfigSyntax = 7001,
    InvalidConfigValue = 7002,

    // Internal errors (9xxx)
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSyntax => "Invalid proof syntax",
            ErrorCode::UnexpectedEof => "Unexpected end of input",

            ErrorCode::UndefinedAtomic => "Undefined atomic proposition",
            ErrorCode::IncorrectLineNumber => "Incorrect line number",
            ErrorCode::MissingReference => "Referred line does not exist",
            ErrorCode::InaccessibleReference => "Referred line is not accessible",
            ErrorCode::SubproofMisuse => "Sub-proof misuse",
            ErrorCode::UnknownRule => "Unknown rule",
            ErrorCode::UnclosedSubproof => "Proof ends in a sub-proof",
            ErrorCode::EmptyProof => "Proof is empty",

            ErrorCode::InvalidDependencies => "Wrong number of dependencies",
            ErrorCode::DirectProofRuleMismatch => "Invalid use of Direct Proof Rule",
            ErrorCode::NotGiven => "Proposition is not given",
            ErrorCode::InferenceMismatch => "Inference rule does not match",
            ErrorCode::EquivalenceMismatch => "Equivalence rule does not match",

            ErrorCode::IoError => "I/O error",
            ErrorCode::FileNotFound => "File not found",
            ErrorCode::FileAccessDenied => "File access denied",
            ErrorCode::InvalidJson => "Invalid JSON",

            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
            ErrorCode::InvalidConfigValue => "Invalid configuration value",

            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Human-facing error category, as printed by the command-line tool
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "Parser Error",
            2 => "Format Error",
            3 => "Rule Error",
            4 => "IO Error",
            7 => "Config Error",
            _ => "Internal Error",
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self.code() / 1000 {
            1 => 2,
            2 | 3 => 1,
            4 => 3,
            7 => 4,
            _ => 70,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl From<&FormatError> for ErrorCode {
    fn from(err: &FormatError) -> Self {
        match err {
            FormatError::UndefinedAtomic(_) => ErrorCode::UndefinedAtomic,
            FormatError::IncorrectLineNumber { .. } => ErrorCode::IncorrectLineNumber,
            FormatError::MissingReference(_) => ErrorCode::MissingReference,
            FormatError::InaccessibleReference(_) => ErrorCode::InaccessibleReference,
            FormatError::MissingAssumption
            | FormatError::MissingDirectProofRule
            | FormatError::SubproofInEquivalence => ErrorCode::SubproofMisuse,
            FormatError::UnknownRule(_) | FormatError::NotAnEquivalenceRule(_) => {
                ErrorCode::UnknownRule
            }
            FormatError::UnclosedSubproof => ErrorCode::UnclosedSubproof,
            FormatError::EmptyProof => ErrorCode::EmptyProof,
        }
    }
}

impl From<&RuleError> for ErrorCode {
    fn from(err: &RuleError) -> Self {
        match err {
            RuleError::InvalidDependencies { .. } => ErrorCode::InvalidDependencies,
            RuleError::DirectProofRule => ErrorCode::DirectProofRuleMismatch,
            RuleError::NotGiven => ErrorCode::NotGiven,
            RuleError::InferenceMismatch => ErrorCode::InferenceMismatch,
            RuleError::EquivalenceMismatch => ErrorCode::EquivalenceMismatch,
        }
    }
}

// ============================================================================
// Error Context
// ============================================================================

/// Additional context information for an error
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Key-value pairs of context information
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, String>,
    /// Source location (file, or file:line)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The tool-level error type for proofc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofcError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ProofcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            hint: None,
        }
    }

    /// A broken invariant inside proofc rather than a problem with the input
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add context to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.fields.insert(key.into(), value.into());
        self
    }

    /// Add source location
    pub fn at(mut self, location: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::new);
        ctx.location = Some(location.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn category(&self) -> &'static str {
        self.code.category()
    }

    pub fn exit_code(&self) -> i32 {
        self.code.exit_code()
    }

    /// Get a context field
    pub fn field(&self, key: &str) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.fields.get(key))
            .map(String::as_str)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":"INTERNAL_ERROR","message":"{}"}}"#, self.message)
        })
    }
}

impl fmt::Display for ProofcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(loc) = self.context.as_ref().and_then(|c| c.location.as_ref()) {
            write!(f, " (in {})", loc)?;
        }

        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for ProofcError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<CheckError> for ProofcError {
    fn from(err: CheckError) -> Self {
        let code = match &err {
            CheckError::Format { kind, .. } => ErrorCode::from(kind),
            CheckError::Rule { kind, .. } => ErrorCode::from(kind),
        };
        let hint = match &err {
            CheckError::Format {
                kind: FormatError::UnknownRule(_),
                ..
            } => Some("run `proofc --list-rules` to see the available rules".to_string()),
            CheckError::Format {
                kind: FormatError::IncorrectLineNumber { expected },
                ..
            } => Some(format!("the line at this position should be numbered {}", expected)),
            _ => None,
        };
        let mut out = ProofcError::new(code, err.to_string())
            .with_context("line", err.number().to_string())
            .with_context("proposition", err.proposition().to_string());
        if let Some(hint) = hint {
            out = out.with_hint(hint);
        }
        out
    }
}

impl From<ParseError> for ProofcError {
    fn from(err: ParseError) -> Self {
        match &err {
            ParseError::Syntax { line, column, .. } => {
                ProofcError::new(ErrorCode::InvalidSyntax, err.to_string())
                    .with_context("line", line.to_string())
                    .with_context("column", column.to_string())
            }
            ParseError::UnexpectedEof => ProofcError::new(ErrorCode::UnexpectedEof, err.to_string()),
        }
    }
}

impl From<ConfigError> for ProofcError {
    fn from(err: ConfigError) -> Self {
        let code = match &err {
            ConfigError::ParseError(..) => ErrorCode::InvalidConfigSyntax,
            ConfigError::InvalidValue(..) => ErrorCode::InvalidConfigValue,
            _ => ErrorCode::ConfigError,
        };
        ProofcError::new(code, err.to_string())
    }
}

impl From<std::io::Error> for ProofcError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        let code = match err.kind() {
            ErrorKind::NotFound => ErrorCode::FileNotFound,
            ErrorKind::PermissionDenied => ErrorCode::FileAccessDenied,
            _ => ErrorCode::IoError,
        };
        ProofcError::new(code, err.to_string())
    }
}

impl From<serde_json::Error> for ProofcError {
    fn from(err: serde_json::Error) -> Self {
        ProofcError::new(ErrorCode::InvalidJson, err.to_string())
    }
}

/// A Result type using ProofcError
pub type ProofcResult<T> = Result<T, ProofcError>;

// ============================================================================
// Tests
// ============================================================================
