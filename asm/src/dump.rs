use arch::machine::Layout;
use color_print::{cformat, cprintln};

use crate::assembler::Program;
use crate::symbol::Status;

// ----------------------------------------------------------------------------
// Listing

/// Print the per-line listing. Word values are read back from the final
/// image, so forward references show their patched addresses.
pub fn print_listing(prog: &Program) {
    println!();
    let mut current_file = "";
    for entry in &prog.listing {
        if entry.path != current_file {
            let rule = "+------+------+-------------------+------------------------+";
            println!("{}", rule);
            println!("| {:<55} |", entry.path);
            println!("{}", rule);
            current_file = &entry.path;
        }
        println!(
            "| {:>4} | {} | {:<17} | {}",
            entry.line_no,
            cformat!("<green>{:0>4}</>", entry.at),
            format_words(prog, entry.at, entry.len),
            entry.raw.trim_end(),
        );
    }
}

/// Binary rendering of the words of one instruction, fields separated the
/// way the layout separates them.
fn format_words(prog: &Program, at: u16, len: u16) -> String {
    let machine = prog.image.machine();
    match machine.layout {
        Layout::Split => (at..at + len)
            .map(|a| format!("{:0w$b}", prog.image.word(a), w = machine.bits as usize))
            .collect::<Vec<_>>()
            .join(" "),
        Layout::Packed { operand_bits } => {
            let word = prog.image.word(at);
            format!(
                "{:0ow$b} {:0rw$b}",
                word >> operand_bits,
                word & machine.operand_max(),
                ow = (machine.bits - operand_bits) as usize,
                rw = operand_bits as usize,
            )
        }
    }
}

// ----------------------------------------------------------------------------
// Symbol table

pub fn print_symbols(prog: &Program) {
    println!("\nSymbol table:");
    for (name, sym) in prog.symbols.iter() {
        let status = match sym.status {
            Status::Defined => cformat!("<green>D</>"),
            Status::Undefined => cformat!("<red>U</>"),
        };
        cprintln!(" {}  <green>{:>4}</>  {}", name, sym.value, status);
    }
}

// ----------------------------------------------------------------------------
// Memory image

/// Walk the occupied image, decoding each instruction back to its mnemonic.
pub fn print_image(prog: &Program) {
    println!("\nAssembled object:");
    let mut at = 0;
    while at < prog.end {
        let (op, operand) = prog.image.decode(at);
        let len = prog.image.machine().inst_words(op);
        let operand = match operand {
            Some(value) => cformat!("<yellow>{}</>", value),
            None => String::new(),
        };
        cprintln!(
            " <green>{:>4}</>  {:<17}  {} {}",
            at,
            format_words(prog, at, len),
            op.cformat(),
            operand,
        );
        at += len;
    }
}
