use c0vm_isa::{Opcode, Trap, TrapKind};

use crate::interpreter::Step;
use crate::machine::Machine;

/// `ATHROW` pops a pointer to a C-string and raises a *user* trap
/// carrying it.
pub(crate) fn athrow(m: &mut Machine, _pc: usize) -> Result<Step, Trap> {
    let ptr = m.pop().as_ptr();
    let message = m.read_c_string(ptr)?;
    Err(Trap::with_message(TrapKind::User, message))
}

/// `ASSERT` pops `cond` then `msg_ptr` (the reverse of push
/// order); a zero condition raises an *assertion* trap carrying the
/// message.
pub(crate) fn assert(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let cond = m.pop().as_int();
    let ptr = m.pop().as_ptr();
    if cond == 0 {
        let message = m.read_c_string(ptr)?;
        return Err(Trap::with_message(TrapKind::Assertion, message));
    }
    Ok(Step::Next(pc + Opcode::assert.instruction_len()))
}
