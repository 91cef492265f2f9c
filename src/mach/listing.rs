use super::{Address, Code};

/// ## Object-code listing
///
/// Renders a code range as one `address opcode level operand` line
/// per instruction, the way the compiler's trace output has always
/// looked. Rendering is a pure function of the buffer, so listing the
/// same program twice yields identical text.

pub struct Listing<'a> {
    code: &'a Code,
    start: Address,
}

impl<'a> Listing<'a> {
    pub fn new(code: &'a Code) -> Listing<'a> {
        Listing { code, start: 0 }
    }

    /// Trace only the instructions from `start` on, like a per-block
    /// listing during compilation.
    pub fn from(code: &'a Code, start: Address) -> Listing<'a> {
        Listing { code, start }
    }
}

impl<'a> std::fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (addr, inst) in self.code.iter().enumerate().skip(self.start) {
            writeln!(f, "{} {}", addr, inst)?;
        }
        Ok(())
    }
}
