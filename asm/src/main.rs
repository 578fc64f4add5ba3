mod assembler;
mod dump;
mod error;
mod image;
mod parser;
mod symbol;

use arch::machine::Machine;

use crate::assembler::Assembler;
use crate::error::Error;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files
    #[clap(default_value = "main.mx")]
    input: Vec<String>,

    /// Output file
    #[clap(short, long, default_value = "main.mx.bin")]
    output: String,

    /// Machine configuration
    #[clap(short, long, value_enum, default_value = "mx8")]
    machine: MachineKind,

    /// Dump listing, symbol table and assembled object
    #[clap(short, long)]
    dump: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum MachineKind {
    /// 256 words of 8 bits, opcode and operand in separate words
    Mx8,
    /// 1024 words of 16 bits, opcode and operand packed into one word
    Mx16,
}

impl MachineKind {
    fn machine(self) -> Machine {
        match self {
            MachineKind::Mx8 => Machine::MX8,
            MachineKind::Mx16 => Machine::MX16,
        }
    }
}

fn main() {
    use clap::Parser;
    use std::io::BufRead;

    let args: Args = Args::parse();
    println!("MX Assembler");

    println!("1. Read Files");
    let mut files: Vec<(String, Vec<String>)> = vec![];
    for path in &args.input {
        println!("  < {}", path);
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(err) => {
                Error::FileOpen(path.clone(), err).print();
                std::process::exit(1);
            }
        };
        let mut lines = vec![];
        for line in std::io::BufReader::new(file).lines() {
            match line {
                Ok(line) => lines.push(line),
                Err(err) => {
                    Error::FileRead(path.clone(), err).print();
                    std::process::exit(1);
                }
            }
        }
        files.push((path.clone(), lines));
    }

    println!("2. Assemble");
    let mut asm = Assembler::new(args.machine.machine());
    for (path, lines) in &files {
        for (idx, raw) in lines.iter().enumerate() {
            if let Err(err) = asm.line(path, idx, raw) {
                err.print_diag(path, idx + 1, raw);
                std::process::exit(1);
            }
        }
    }
    let prog = match asm.finish() {
        Ok(prog) => prog,
        Err(err) => {
            err.print();
            std::process::exit(1);
        }
    };

    println!("3. Write Binary");
    println!("  > {}", args.output);
    if let Err(err) = std::fs::write(&args.output, prog.image.to_bytes(prog.end)) {
        Error::FileWrite(args.output.clone(), err).print();
        std::process::exit(1);
    }

    if args.dump {
        dump::print_listing(&prog);
        dump::print_symbols(&prog);
        dump::print_image(&prog);
    }
}
