use super::opcode::Op;
use super::Address;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Instruction buffer limit; appending past this is a
/// `CapacityExceeded` error rather than unbounded growth.
pub const MAX_OPS: usize = 65535;

/// ## Bytecode buffer
///
/// The flat, append-only instruction sequence for a session. Each
/// compiled unit lands at the tail and is terminated by `End`; in an
/// interactive session earlier units stay in place so their label
/// addresses remain valid.
#[derive(Default)]
pub struct Program {
    ops: Vec<Op>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn len(&self) -> Address {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: Op) -> Result<()> {
        if self.ops.len() >= MAX_OPS {
            return Err(error!(CapacityExceeded; "PROGRAM TOO LARGE"));
        }
        self.ops.push(op);
        Ok(())
    }

    pub fn get(&self, addr: Address) -> Option<&Op> {
        self.ops.get(addr)
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// The instructions of the unit compiled since `from`; the
    /// relocation pass rewrites its pending targets in place.
    pub fn tail_mut(&mut self, from: Address) -> &mut [Op] {
        &mut self.ops[from..]
    }

    /// Roll a failed unit back out of the buffer.
    pub fn truncate(&mut self, len: Address) {
        self.ops.truncate(len);
    }
}
