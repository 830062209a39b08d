use c0vm_isa::{Opcode, Ptr, Trap, Value};

use crate::interpreter::Step;
use crate::machine::Machine;

pub(crate) fn bipush(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let value = m.i8_at(pc + 1) as i32;
    m.push(Value::Int(value));
    Ok(Step::Next(pc + Opcode::bipush.instruction_len()))
}

pub(crate) fn ildc(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let index = m.u16_at(pc + 1) as usize;
    let value = m.image().int_pool[index];
    m.push(Value::Int(value));
    Ok(Step::Next(pc + Opcode::ildc.instruction_len()))
}

pub(crate) fn aldc(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let offset = m.u16_at(pc + 1) as u32;
    m.push(Value::Ptr(Ptr::Str(offset)));
    Ok(Step::Next(pc + Opcode::aldc.instruction_len()))
}

pub(crate) fn aconst_null(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    m.push(Value::Ptr(Ptr::Null));
    Ok(Step::Next(pc + Opcode::aconst_null.instruction_len()))
}
