use super::{Address, Inst, Opcode, Operand};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Instruction buffer capacity. Compiling past it is fatal.
pub const CODE_MAX: usize = 500;

/// ## Compiled program
///
/// Append-only instruction store. Forward jumps are emitted with an
/// empty operand through `emit_hole` and resolved exactly once through
/// the `Patch` handle that call returns.

#[derive(Debug, Default)]
pub struct Code {
    insts: Vec<Inst>,
}

/// Handle to a placeholder jump operand. Deliberately neither `Copy`
/// nor `Clone`: `Code::patch` consumes it, so a slot cannot be
/// resolved twice, and `#[must_use]` flags a slot never resolved.
#[must_use = "an unresolved jump placeholder leaves the program broken"]
#[derive(Debug)]
pub struct Patch(Address);

impl Code {
    pub fn new() -> Code {
        Code::default()
    }

    pub fn len(&self) -> usize {
        self.insts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insts.is_empty()
    }

    pub fn get(&self, addr: Address) -> Option<&Inst> {
        self.insts.get(addr)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Inst> {
        self.insts.iter()
    }

    pub fn emit(&mut self, op: Opcode, level: usize, a: Operand) -> Result<Address> {
        if self.insts.len() >= CODE_MAX {
            return Err(error!(ProgramTooLong));
        }
        self.insts.push(Inst { op, level, a });
        Ok(self.insts.len() - 1)
    }

    /// Emit a jump whose target is not known yet.
    pub fn emit_hole(&mut self, op: Opcode) -> Result<Patch> {
        debug_assert!(matches!(op, Opcode::Jmp | Opcode::Jpc));
        Ok(Patch(self.emit(op, 0, Operand::None)?))
    }

    /// Resolve a placeholder jump. Consumes the handle.
    pub fn patch(&mut self, patch: Patch, target: Address) {
        let inst = &mut self.insts[patch.0];
        debug_assert!(matches!(inst.a, Operand::None));
        inst.a = Operand::Number(target as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_returns_addresses_in_order() {
        let mut code = Code::new();
        let a = code.emit(Opcode::Int, 0, Operand::Number(3)).unwrap();
        let b = code.emit(Opcode::Lit, 0, Operand::Number(7)).unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(code.len(), 2);
    }

    #[test]
    fn test_hole_starts_empty_and_patches_once() {
        let mut code = Code::new();
        let hole = code.emit_hole(Opcode::Jpc).unwrap();
        assert_eq!(code.get(0).unwrap().a, Operand::None);
        code.patch(hole, 9);
        assert_eq!(code.get(0).unwrap().a, Operand::Number(9));
    }

    #[test]
    fn test_capacity_is_exact() {
        let mut code = Code::new();
        for _ in 0..CODE_MAX {
            code.emit(Opcode::Int, 0, Operand::Number(0)).unwrap();
        }
        assert_eq!(code.len(), CODE_MAX);
        let error = code.emit(Opcode::Int, 0, Operand::Number(0)).unwrap_err();
        assert_eq!(error.code(), 250);
    }
}
