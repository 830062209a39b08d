use c0vm_isa::{val_equal, Opcode, Trap};

use crate::interpreter::Step;
use crate::machine::Machine;

pub(crate) fn nop(_m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    Ok(Step::Next(pc + Opcode::nop.instruction_len()))
}

pub(crate) fn return_(m: &mut Machine, _pc: usize) -> Result<Step, Trap> {
    Ok(m.do_return())
}

/// every branch family member shares the same displacement semantics
///: taken jumps to `pc_of_opcode + sign_extend16(imm)`; not
/// taken advances past the 3-byte instruction.
fn branch(machine: &mut Machine, pc: usize, taken: bool) -> Step {
    if taken {
        let displacement = machine.i16_at(pc + 1) as i32;
        Step::Next((pc as i32 + displacement) as usize)
    } else {
        Step::Next(pc + Opcode::goto_.instruction_len())
    }
}

pub(crate) fn if_cmpeq(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let y = m.pop();
    let x = m.pop();
    Ok(branch(m, pc, val_equal(x, y)))
}

pub(crate) fn if_cmpne(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let y = m.pop();
    let x = m.pop();
    Ok(branch(m, pc, !val_equal(x, y)))
}

fn int_cmp(m: &mut Machine, pc: usize, cmp: impl Fn(i32, i32) -> bool) -> Step {
    let y = m.pop().as_int();
    let x = m.pop().as_int();
    branch(m, pc, cmp(x, y))
}

pub(crate) fn if_icmplt(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    Ok(int_cmp(m, pc, |x, y| x < y))
}

pub(crate) fn if_icmple(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    Ok(int_cmp(m, pc, |x, y| x <= y))
}

pub(crate) fn if_icmpgt(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    Ok(int_cmp(m, pc, |x, y| x > y))
}

pub(crate) fn if_icmpge(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    Ok(int_cmp(m, pc, |x, y| x >= y))
}

pub(crate) fn goto_(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    Ok(branch(m, pc, true))
}
