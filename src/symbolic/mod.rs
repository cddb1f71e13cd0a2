//! Small symbolic algebra engine: parse an expression string, differentiate
//! with respect to a named variable, simplify, print, and evaluate.

pub mod expr;
pub mod parser;

pub use expr::{EvalError, Expr, Func};
pub use parser::{parse, ParseError};

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses `expression` and returns its simplified first derivative with
/// respect to `variable`. A blank variable defaults to `x`.
pub fn differentiate(expression: &str, variable: &str) -> Result<Expr, ParseError> {
    let var = variable.trim();
    let var = if var.is_empty() { "x" } else { var };
    if !is_identifier(var) {
        return Err(ParseError::InvalidVariable(var.to_string()));
    }
    let expr = parse(expression)?;
    Ok(expr.diff(var).simplify())
}
