use color_print::cformat;
use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The MX instruction set. Discriminants are the opcode values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    FromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum Op {
    #[default]
    HLT = 0,
    LOD = 1,
    STO = 2,
    ADD = 3,
    BZE = 4,
    BNE = 5,
    BRA = 6,
    INP = 7,
    OUT = 8,
    CLA = 9,
}

impl Op {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    /// Whether the instruction carries an operand field.
    pub fn has_operand(&self) -> bool {
        use Op::*;
        match self {
            LOD | STO | ADD | BZE | BNE | BRA => true,
            HLT | INP | OUT | CLA => false,
        }
    }

    pub fn code(&self) -> u8 {
        (*self).into()
    }
}

impl Op {
    pub fn cformat(&self) -> String {
        cformat!("<red>{:<4}</>", self)
    }
}
