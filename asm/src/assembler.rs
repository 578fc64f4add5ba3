use arch::machine::Machine;

use crate::error::Error;
use crate::image::Image;
use crate::parser::{Operand, Stmt};
use crate::symbol::Symbols;

// ----------------------------------------------------------------------------
// Assembler

/// Single-pass assembler. Owns the location counter, the symbol table and
/// the memory image for exactly one run.
pub struct Assembler {
    image: Image,
    symbols: Symbols,
    lc: u16,
    listing: Vec<Entry>,
}

/// One assembled source line, kept for the listing dump.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: String,
    pub line_no: usize,
    pub raw: String,
    pub at: u16,
    pub len: u16,
}

/// A finished run: the image with its occupied length, and the symbol table.
pub struct Program {
    pub image: Image,
    pub symbols: Symbols,
    pub listing: Vec<Entry>,
    pub end: u16,
}

impl Assembler {
    pub fn new(machine: Machine) -> Self {
        Assembler {
            image: Image::new(machine),
            symbols: Symbols::new(),
            lc: 0,
            listing: vec![],
        }
    }

    /// Assemble one source line at the current location counter. The label,
    /// if any, is defined at the address of its own instruction.
    pub fn line(&mut self, path: &str, idx: usize, raw: &str) -> Result<(), Error> {
        let stmt = Stmt::parse(raw)?;

        if let Some(label) = stmt.label {
            self.symbols.define(label, self.lc, &mut self.image)?;
        }

        let operand = match stmt.operand {
            None => None,
            Some(Operand::Literal(value)) => Some(self.image.check_operand(value)?),
            Some(Operand::Symbol(name)) => Some(self.symbols.reference(name, self.lc)),
        };

        let len = self.image.encode(self.lc, stmt.op, operand)?;
        self.listing.push(Entry {
            path: path.to_string(),
            line_no: idx + 1,
            raw: raw.to_string(),
            at: self.lc,
            len,
        });
        self.lc += len;
        Ok(())
    }

    /// End of input: every referenced symbol must have been defined.
    pub fn finish(self) -> Result<Program, Error> {
        self.symbols.check_resolved()?;
        Ok(Program {
            image: self.image,
            symbols: self.symbols,
            listing: self.listing,
            end: self.lc,
        })
    }
}
