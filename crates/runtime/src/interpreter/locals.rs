use c0vm_isa::{Opcode, Trap};

use crate::interpreter::Step;
use crate::machine::Machine;

pub(crate) fn vload(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let index = m.u8_at(pc + 1) as usize;
    let value = m.local_get(index);
    m.push(value);
    Ok(Step::Next(pc + Opcode::vload.instruction_len()))
}

pub(crate) fn vstore(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let index = m.u8_at(pc + 1) as usize;
    let value = m.pop();
    m.local_set(index, value);
    Ok(Step::Next(pc + Opcode::vstore.instruction_len()))
}
