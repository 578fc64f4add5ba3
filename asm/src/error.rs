use arch::op::Op;
use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot parse line: `{0}`")]
    MalformedLine(String),

    #[error("Label must be a single letter: `{0}`")]
    InvalidLabel(String),

    #[error("Label `{0}` is doubly defined")]
    DuplicateLabel(char),

    #[error("Unknown mnemonic: `{0}`")]
    UnknownMnemonic(String),

    #[error("`{0}` does not take an operand")]
    UnexpectedOperand(Op),

    #[error("`{0}` requires an operand")]
    MissingOperand(Op),

    #[error("Cannot parse operand `{0}` as a number or label")]
    InvalidOperandLiteral(String),

    #[error("Operand {value} exceeds the {bits}-bit field maximum of {max}")]
    OperandOverflow { value: u32, bits: u32, max: u16 },

    #[error("Program exceeds the {words}-word memory")]
    CapacityExceeded { words: usize },

    #[error("Label `{0}` is referenced but never defined")]
    UnresolvedSymbol(char),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line in {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// Print the error with its file location and the offending source line.
    pub fn print_diag(&self, file: &str, line_no: usize, raw: &str) {
        cprintln!("<red,bold>error</>: {}", self);
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_no);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_no, raw);
        cprintln!("      <blue>|</>");
    }

    /// Print the error alone, for failures with no source location.
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self);
    }
}
