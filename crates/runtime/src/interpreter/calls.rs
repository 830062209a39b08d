use c0vm_isa::{Opcode, Trap};

use crate::interpreter::Step;
use crate::machine::Machine;

/// `INVOKESTATIC hi lo`: the resume address is the byte after this
/// instruction's immediates, not the call site itself.
pub(crate) fn invokestatic(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let index = m.u16_at(pc + 1) as usize;
    let resume_pc = pc + Opcode::invokestatic.instruction_len();
    m.invoke(index, resume_pc);
    Ok(Step::Next(0))
}

pub(crate) fn invokenative(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let index = m.u16_at(pc + 1) as usize;
    m.invoke_native(index)?;
    Ok(Step::Next(pc + Opcode::invokenative.instruction_len()))
}
