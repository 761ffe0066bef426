//! Proof source parser
//!
//! Parses the line-oriented `.proof` format:
//!
//! ```text
//! Let p be a proposition      # declarations
//! Given p
//! proof.                      # or `equivalence.`
//! 1. p [Given]
//! 2.1. q [Assumption]
//! 2.2. p∧q [Intro And: 1, 2.1]
//! 2. q→p∧q [Direct Proof Rule]
//! ```
//!
//! Comments start with `#` or `//` and run to the end of the line.
//! Connectives may be written as Unicode symbols, ASCII, or LaTeX commands.
//!
//! The proposition grammar, loosest binding first:
//!
//! ```text
//! proposition := disjunction (("→" | "↔") disjunction)?
//! disjunction := exclusive ("∨" exclusive)*
//! exclusive   := conjunction ("⊕" conjunction)*
//! conjunction := atom ("∧" atom)*
//! atom        := "¬" atom | "(" proposition ")" | "T" | "F" | identifier
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, map_opt, map_res, opt, value, verify},
    error::{Error, ErrorKind},
    multi::{fold_many0, many1, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::logic::{BinaryOp, Proposition};
use crate::proof::{Declarations, Line, Number, Proof, RuleRef};

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unexpected end of input: missing 'proof.' or 'equivalence.' header")]
    UnexpectedEof,
}

// ============================================================================
// Lexical pieces
// ============================================================================

fn not_op(input: &str) -> IResult<&str, &str> {
    preceded(
        space0,
        alt((tag("¬"), tag("~"), tag("!"), tag("\\neg"), tag("\\lnot"))),
    )(input)
}

fn and_op(input: &str) -> IResult<&str, &str> {
    preceded(space0, alt((tag("∧"), tag("&"), tag("\\land"), tag("\\wedge"))))(input)
}

fn or_op(input: &str) -> IResult<&str, &str> {
    preceded(space0, alt((tag("∨"), tag("|"), tag("\\lor"), tag("\\vee"))))(input)
}

fn xor_op(input: &str) -> IResult<&str, &str> {
    preceded(space0, alt((tag("⊕"), tag("^"), tag("\\oplus"))))(input)
}

fn implies_op(input: &str) -> IResult<&str, &str> {
    preceded(
        space0,
        alt((tag("→"), tag("->"), tag("=>"), tag("\\to"), tag("\\implies"))),
    )(input)
}

fn iff_op(input: &str) -> IResult<&str, &str> {
    preceded(
        space0,
        alt((
            tag("↔"),
            tag("<->"),
            tag("<=>"),
            tag("\\leftrightarrow"),
            tag("\\iff"),
        )),
    )(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    verify(
        take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '\''),
        |s: &str| !s.starts_with(|c: char| c.is_ascii_digit()),
    )(input)
}

fn component(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

/// A line label: `1.` or `2.3.1.`
fn line_number(input: &str) -> IResult<&str, Number> {
    map_opt(
        terminated(separated_list1(char('.'), component), char('.')),
        Number::new,
    )(input)
}

/// A cited line: `1` or `2.3.1`
fn reference(input: &str) -> IResult<&str, Number> {
    map_opt(separated_list1(char('.'), component), Number::new)(input)
}

// ============================================================================
// Propositions
// ============================================================================

/// Deepest accepted nesting of parentheses and negations
const MAX_NESTING: usize = 128;

const NESTED_TOO_DEEPLY: &str = "proposition is nested too deeply";

fn atom(input: &str, depth: usize) -> IResult<&str, Proposition> {
    if depth > MAX_NESTING {
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    preceded(
        space0,
        alt((
            map(preceded(not_op, |i| atom(i, depth + 1)), Proposition::not),
            delimited(
                char('('),
                |i| implication(i, depth + 1),
                preceded(space0, char(')')),
            ),
            map(identifier, |name| match name {
                "T" => Proposition::True,
                "F" => Proposition::False,
                _ => Proposition::atomic(name),
            }),
        )),
    )(input)
}

fn conjunction(input: &str, depth: usize) -> IResult<&str, Proposition> {
    let (input, first) = atom(input, depth)?;
    fold_many0(
        preceded(and_op, |i| atom(i, depth)),
        move || first.clone(),
        Proposition::and,
    )(input)
}

fn exclusive(input: &str, depth: usize) -> IResult<&str, Proposition> {
    let (input, first) = conjunction(input, depth)?;
    fold_many0(
        preceded(xor_op, |i| conjunction(i, depth)),
        move || first.clone(),
        Proposition::xor,
    )(input)
}

fn disjunction(input: &str, depth: usize) -> IResult<&str, Proposition> {
    let (input, first) = exclusive(input, depth)?;
    fold_many0(
        preceded(or_op, |i| exclusive(i, depth)),
        move || first.clone(),
        Proposition::or,
    )(input)
}

/// `→` and `↔` take exactly two operands.
fn implication(input: &str, depth: usize) -> IResult<&str, Proposition> {
    let (input, lhs) = disjunction(input, depth)?;
    let (input, tail) = opt(pair(
        alt((
            value(BinaryOp::Implies, implies_op),
            value(BinaryOp::Biconditional, iff_op),
        )),
        |i| disjunction(i, depth),
    ))(input)?;
    let prop = match tail {
        Some((op, rhs)) => Proposition::binary(op, lhs, rhs),
        None => lhs,
    };
    Ok((input, prop))
}

/// A full proposition
fn proposition(input: &str) -> IResult<&str, Proposition> {
    implication(input, 0)
}

/// Whether a nom error came from the nesting limit
fn too_deep(err: &nom::Err<Error<&str>>) -> bool {
    matches!(err, nom::Err::Failure(e) if e.code == ErrorKind::TooLarge)
}

// ============================================================================
// Rule references
// ============================================================================

fn rule_word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '\'' || c == '-' || c == '_')(input)
}

fn rule_operator(input: &str) -> IResult<&str, &str> {
    alt((
        and_op,
        or_op,
        xor_op,
        not_op,
        implies_op,
        iff_op,
    ))(input)
}

/// Spell out a connective used in a rule name, e.g. `Intro ∧`
fn spell_operator(op: &str) -> &str {
    match op {
        "∧" | "&" | "\\land" | "\\wedge" => "and",
        "∨" | "|" | "\\lor" | "\\vee" => "or",
        other => other,
    }
}

fn rule_name(input: &str) -> IResult<&str, String> {
    let (input, words) = many1(preceded(space0, rule_word))(input)?;
    let (input, op) = opt(rule_operator)(input)?;
    let mut name = words.join(" ");
    if let Some(op) = op {
        name.push(' ');
        name.push_str(spell_operator(op));
    }
    Ok((input, name))
}

/// `[Rule Name]` or `[Rule Name: 1, 2.1]`
fn rule_ref(input: &str) -> IResult<&str, RuleRef> {
    let (input, _) = preceded(space0, char('['))(input)?;
    let (input, name) = rule_name(input)?;
    let (input, refs) = opt(preceded(
        preceded(space0, char(':')),
        separated_list1(preceded(space0, char(',')), preceded(space0, reference)),
    ))(input)?;
    let (input, _) = preceded(space0, char(']'))(input)?;
    Ok((input, RuleRef::new(name, refs.unwrap_or_default())))
}

// ============================================================================
// Declarations and headers
// ============================================================================

fn let_declaration(input: &str) -> IResult<&str, &str> {
    let (input, (_, _, name, _, _, _, _, _, _)) = tuple((
        tag("Let"),
        space1,
        identifier,
        space1,
        tag("be"),
        space1,
        tag("a"),
        space1,
        tag("proposition"),
    ))(input)?;
    Ok((input, name))
}

fn given_declaration(input: &str) -> IResult<&str, Proposition> {
    preceded(pair(tag("Given"), space1), proposition)(input)
}

/// `proof.` or `equivalence.`; true for an equivalence proof
fn header(input: &str) -> IResult<&str, bool> {
    terminated(
        alt((
            value(false, tag_no_case("proof")),
            value(true, tag_no_case("equivalence")),
        )),
        char('.'),
    )(input)
}

// ============================================================================
// Document parser
// ============================================================================

/// Strip a trailing `#` or `//` comment
fn strip_comment(line: &str) -> &str {
    let hash = line.find('#');
    let slashes = line.find("//");
    let cut = match (hash, slashes) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    match cut {
        Some(at) => &line[..at],
        None => line,
    }
}

/// 1-based character column of `rest` within `line`
fn column(line: &str, rest: &str) -> usize {
    let consumed = line.len().saturating_sub(rest.len());
    line[..consumed].chars().count() + 1
}

/// Stateful parser for one proof document
#[derive(Debug, Default)]
pub struct ProofParser {
    declarations: Declarations,
    lines: Vec<Line>,
    equivalence: Option<bool>,
    line: usize,
}

impl ProofParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn syntax(&self, text: &str, rest: &str, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            line: self.line,
            column: column(text, rest),
            message: message.into(),
        }
    }

    /// Parse a whole document into a proof
    pub fn parse_document(mut self, input: &str) -> Result<Proof, ParseError> {
        for (index, raw) in input.lines().enumerate() {
            self.line = index + 1;
            let text = strip_comment(raw);
            if text.trim().is_empty() {
                continue;
            }
            if self.equivalence.is_some() {
                self.parse_proof_line(text)?;
            } else {
                self.parse_declaration_line(text)?;
            }
        }

        let equivalence = self.equivalence.ok_or(ParseError::UnexpectedEof)?;
        Ok(Proof::new(
            equivalence,
            self.declarations.freeze(),
            self.lines,
        ))
    }

    fn parse_declaration_line(&mut self, text: &str) -> Result<(), ParseError> {
        let start = text.trim_start();

        if let Ok((_, equivalence)) = all_consuming(terminated(header, space0))(start) {
            self.equivalence = Some(equivalence);
            return Ok(());
        }
        if start.starts_with("Let") {
            let (_, name) = all_consuming(terminated(let_declaration, space0))(start).map_err(
                |e| self.nom_error(text, e, "expected 'Let <name> be a proposition'"),
            )?;
            let declarations = std::mem::take(&mut self.declarations);
            self.declarations = declarations.merge(Declarations::atomic(name));
            return Ok(());
        }
        if start.starts_with("Given") {
            let (_, prop) = all_consuming(terminated(given_declaration, space0))(start)
                .map_err(|e| self.nom_error(text, e, "expected 'Given <proposition>'"))?;
            let declarations = std::mem::take(&mut self.declarations);
            self.declarations = declarations.merge(Declarations::given(prop));
            return Ok(());
        }
        Err(self.syntax(
            text,
            start,
            "expected a declaration or a 'proof.' / 'equivalence.' header",
        ))
    }

    fn parse_proof_line(&mut self, text: &str) -> Result<(), ParseError> {
        let (rest, number) = preceded(space0, line_number)(text)
            .map_err(|e| self.nom_error(text, e, "expected a line number such as '1.' or '2.1.'"))?;
        let (rest, prop) =
            proposition(rest).map_err(|e| self.nom_error(text, e, "expected a proposition"))?;
        let (rest, rule) = rule_ref(rest).map_err(|e| {
            if implies_op(rest).is_ok() || iff_op(rest).is_ok() {
                self.nom_error(text, e, "'→' and '↔' do not chain; add parentheses")
            } else {
                self.nom_error(text, e, "expected a rule reference such as '[Intro And: 1, 2]'")
            }
        })?;
        let rest = rest.trim_start();
        if !rest.is_empty() {
            return Err(self.syntax(text, rest, "unexpected input after the rule reference"));
        }
        self.lines.push(Line::new(number, prop, rule));
        Ok(())
    }

    fn nom_error(&self, text: &str, err: nom::Err<Error<&str>>, message: &str) -> ParseError {
        let message = if too_deep(&err) { NESTED_TOO_DEEPLY } else { message };
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => self.syntax(text, e.input, message),
            nom::Err::Incomplete(_) => self.syntax(text, "", message),
        }
    }
}

/// Parse a proof document
pub fn parse_proof(input: &str) -> Result<Proof, ParseError> {
    ProofParser::new().parse_document(input)
}

/// Parse a single proposition
pub fn parse_proposition(input: &str) -> Result<Proposition, ParseError> {
    all_consuming(terminated(proposition, space0))(input)
        .map(|(_, prop)| prop)
        .map_err(|err| {
            let rest = match &err {
                nom::Err::Error(e) | nom::Err::Failure(e) => e.input,
                nom::Err::Incomplete(_) => "",
            };
            let message = if too_deep(&err) { NESTED_TOO_DEEPLY } else { "invalid proposition" };
            ParseError::Syntax {
                line: 1,
                column: column(input, rest),
                message: message.to_string(),
            }
        })
}

// ============================================================================
// Tests
// ============================================================================
