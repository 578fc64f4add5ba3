use arch::op::Op;

use crate::error::Error;

// ----------------------------------------------------------------------------
// Statement

/// One parsed source line: optional label, mnemonic, optional operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub label: Option<char>,
    pub op: Op,
    pub operand: Option<Operand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Literal(u32),
    Symbol(char),
}

impl Stmt {
    /// Valid lines can have the following shapes, tried in order:
    ///   L OPC OPRD
    ///   L OPC
    ///   OPC OPRD
    ///   OPC
    /// A label is a single letter; a mnemonic is three characters.
    pub fn parse(raw: &str) -> Result<Stmt, Error> {
        let words: Vec<&str> = raw.split_whitespace().collect();

        let (label, op, operand) = match words.as_slice() {
            [label, op, operand] if label.len() == 1 => (Some(*label), *op, Some(*operand)),
            [label, op] if label.len() == 1 => (Some(*label), *op, None),
            [op, operand] if op.len() == 3 => (None, *op, Some(*operand)),
            [op] if op.len() == 3 => (None, *op, None),
            _ => return Err(Error::MalformedLine(raw.trim().to_string())),
        };

        let label = match label {
            Some(s) => Some(parse_label(s)?),
            None => None,
        };
        let op = Op::parse(op).map_err(|_| Error::UnknownMnemonic(op.to_string()))?;
        let operand = match operand {
            Some(s) => Some(parse_operand(s)?),
            None => None,
        };

        if !op.has_operand() && operand.is_some() {
            return Err(Error::UnexpectedOperand(op));
        }
        if op.has_operand() && operand.is_none() {
            return Err(Error::MissingOperand(op));
        }

        Ok(Stmt { label, op, operand })
    }
}

fn parse_label(s: &str) -> Result<char, Error> {
    match s.chars().next() {
        Some(c) if c.is_alphabetic() => Ok(c),
        _ => Err(Error::InvalidLabel(s.to_string())),
    }
}

/// An operand is a decimal literal or a single-letter symbol reference.
fn parse_operand(s: &str) -> Result<Operand, Error> {
    let mut chars = s.chars();
    if let Some(head) = chars.next() {
        if head.is_alphabetic() {
            return match chars.next() {
                None => Ok(Operand::Symbol(head)),
                Some(_) => Err(Error::InvalidOperandLiteral(s.to_string())),
            };
        }
    }
    s.parse::<u32>()
        .map(Operand::Literal)
        .map_err(|_| Error::InvalidOperandLiteral(s.to_string()))
}
