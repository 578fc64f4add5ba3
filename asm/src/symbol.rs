use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::Error;
use crate::image::Image;

// ----------------------------------------------------------------------------
// Symbol table

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Defined,
    Undefined,
}

/// One label. While `Undefined`, `value` heads the chain of forward-reference
/// sites threaded through the image's operand fields; once `Defined` it holds
/// the resolved address.
#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    pub value: u16,
    pub status: Status,
    // A site at address 0 cannot be threaded through the chain (0 terminates
    // it), so it is remembered here instead.
    ref_at_zero: bool,
}

pub struct Symbols(IndexMap<char, Symbol>);

impl Symbols {
    pub fn new() -> Self {
        Symbols(IndexMap::new())
    }

    /// Define `name` at address `at`, patching any forward references
    /// recorded so far. A label may be defined only once.
    pub fn define(&mut self, name: char, at: u16, image: &mut Image) -> Result<(), Error> {
        match self.0.entry(name) {
            Entry::Vacant(entry) => {
                entry.insert(Symbol {
                    value: at,
                    status: Status::Defined,
                    ref_at_zero: false,
                });
                Ok(())
            }
            Entry::Occupied(mut entry) => {
                let sym = entry.get_mut();
                if sym.status == Status::Defined {
                    return Err(Error::DuplicateLabel(name));
                }
                let head = sym.value;
                let patch_zero = sym.ref_at_zero;
                sym.value = at;
                sym.status = Status::Defined;
                patch_chain(image, head, at);
                if patch_zero {
                    image.patch_operand(0, at);
                }
                Ok(())
            }
        }
    }

    /// Record a reference to `name` from the instruction at `at`.
    ///
    /// Returns the value to store in that instruction's operand field: the
    /// resolved address if the symbol is already defined, otherwise the
    /// previous chain head (0 for the first reference).
    pub fn reference(&mut self, name: char, at: u16) -> u16 {
        match self.0.entry(name) {
            Entry::Occupied(mut entry) => {
                let sym = entry.get_mut();
                match sym.status {
                    Status::Defined => sym.value,
                    Status::Undefined => {
                        let prev = sym.value;
                        sym.value = at;
                        prev
                    }
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(Symbol {
                    value: at,
                    status: Status::Undefined,
                    ref_at_zero: at == 0,
                });
                0
            }
        }
    }

    /// Fails on the first symbol still undefined at end of assembly.
    pub fn check_resolved(&self) -> Result<(), Error> {
        match self.0.iter().find(|(_, sym)| sym.status == Status::Undefined) {
            Some((name, _)) => Err(Error::UnresolvedSymbol(*name)),
            None => Ok(()),
        }
    }

    pub fn get(&self, name: char) -> Option<&Symbol> {
        self.0.get(&name)
    }

    /// Symbols in first-mention order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Symbol)> {
        self.0.iter().map(|(name, sym)| (*name, sym))
    }
}

/// Walk the forward-reference chain headed at `head`, writing `resolved` into
/// each site's operand field. While unresolved, each site's operand field
/// holds the address of the next site; 0 ends the chain.
pub fn patch_chain(image: &mut Image, head: u16, resolved: u16) {
    let mut at = head;
    while at != 0 {
        let next = image.operand_at(at);
        image.patch_operand(at, resolved);
        at = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::machine::Machine;
    use arch::op::Op;

    #[test]
    fn test_patch_chain() {
        // Three sites referencing the same symbol, threaded 6 -> 4 -> 2 -> end.
        let mut image = Image::new(Machine::MX8);
        image.encode(2, Op::LOD, Some(0)).unwrap();
        image.encode(4, Op::ADD, Some(2)).unwrap();
        image.encode(6, Op::BZE, Some(4)).unwrap();
        patch_chain(&mut image, 6, 9);
        assert_eq!(image.decode(2), (Op::LOD, Some(9)));
        assert_eq!(image.decode(4), (Op::ADD, Some(9)));
        assert_eq!(image.decode(6), (Op::BZE, Some(9)));
    }

    #[test]
    fn test_forward_chain() {
        let mut image = Image::new(Machine::MX8);
        let mut symbols = Symbols::new();

        image.encode(2, Op::LOD, Some(symbols.reference('X', 2))).unwrap();
        image.encode(4, Op::BNE, Some(symbols.reference('X', 4))).unwrap();
        assert_eq!(image.operand_at(2), 0);
        assert_eq!(image.operand_at(4), 2);

        symbols.define('X', 8, &mut image).unwrap();
        assert_eq!(image.operand_at(2), 8);
        assert_eq!(image.operand_at(4), 8);
        assert_eq!(image.decode(2).0, Op::LOD);
        assert_eq!(image.decode(4).0, Op::BNE);

        let sym = symbols.get('X').unwrap();
        assert_eq!(sym.value, 8);
        assert_eq!(sym.status, Status::Defined);
    }

    #[test]
    fn test_forward_chain_packed_keeps_opcodes() {
        let mut image = Image::new(Machine::MX16);
        let mut symbols = Symbols::new();

        image.encode(1, Op::LOD, Some(symbols.reference('L', 1))).unwrap();
        image.encode(2, Op::STO, Some(symbols.reference('L', 2))).unwrap();
        symbols.define('L', 3, &mut image).unwrap();

        assert_eq!(image.decode(1), (Op::LOD, Some(3)));
        assert_eq!(image.decode(2), (Op::STO, Some(3)));
    }

    #[test]
    fn test_reference_at_address_zero() {
        let mut image = Image::new(Machine::MX8);
        let mut symbols = Symbols::new();

        image.encode(0, Op::LOD, Some(symbols.reference('B', 0))).unwrap();
        symbols.define('B', 4, &mut image).unwrap();
        assert_eq!(image.operand_at(0), 4);
        assert_eq!(image.decode(0).0, Op::LOD);
    }

    #[test]
    fn test_backward_reference_leaves_chain_alone() {
        let mut image = Image::new(Machine::MX8);
        let mut symbols = Symbols::new();

        symbols.define('A', 0, &mut image).unwrap();
        assert_eq!(symbols.reference('A', 2), 0);
        assert_eq!(symbols.reference('A', 4), 0);
        assert_eq!(symbols.get('A').unwrap().value, 0);
    }

    #[test]
    fn test_duplicate_definition() {
        let mut image = Image::new(Machine::MX8);
        let mut symbols = Symbols::new();

        symbols.define('A', 2, &mut image).unwrap();
        assert!(matches!(
            symbols.define('A', 6, &mut image),
            Err(Error::DuplicateLabel('A'))
        ));
        assert_eq!(symbols.get('A').unwrap().value, 2);
    }

    #[test]
    fn test_check_resolved() {
        let mut image = Image::new(Machine::MX8);
        let mut symbols = Symbols::new();

        symbols.reference('U', 2);
        assert!(matches!(
            symbols.check_resolved(),
            Err(Error::UnresolvedSymbol('U'))
        ));
        symbols.define('U', 4, &mut image).unwrap();
        assert!(symbols.check_resolved().is_ok());
    }
}
