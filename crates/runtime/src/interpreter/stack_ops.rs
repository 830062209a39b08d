use c0vm_isa::{Opcode, Trap};

use crate::interpreter::Step;
use crate::machine::Machine;

pub(crate) fn pop(machine: &mut Machine, pc: usize) -> Result<Step, Trap> {
    machine.pop();
    Ok(Step::Next(pc + Opcode::pop.instruction_len()))
}

pub(crate) fn dup(machine: &mut Machine, pc: usize) -> Result<Step, Trap> {
    machine.dup();
    Ok(Step::Next(pc + Opcode::dup.instruction_len()))
}

pub(crate) fn swap(machine: &mut Machine, pc: usize) -> Result<Step, Trap> {
    machine.swap();
    Ok(Step::Next(pc + Opcode::swap.instruction_len()))
}
