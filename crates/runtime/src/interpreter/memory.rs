use c0vm_isa::{Opcode, Trap, Value};

use crate::interpreter::Step;
use crate::machine::Machine;

pub(crate) fn new(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let size = m.u8_at(pc + 1);
    let ptr = m.new_cell(size);
    m.push(Value::Ptr(ptr));
    Ok(Step::Next(pc + Opcode::new.instruction_len()))
}

pub(crate) fn newarray(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let elt_size = m.u8_at(pc + 1);
    let count = m.pop().as_int();
    let ptr = m.new_array(count, elt_size)?;
    m.push(Value::Ptr(ptr));
    Ok(Step::Next(pc + Opcode::newarray.instruction_len()))
}

pub(crate) fn imload(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let ptr = m.pop().as_ptr();
    let value = m.load_i32(ptr)?;
    m.push(Value::Int(value));
    Ok(Step::Next(pc + Opcode::imload.instruction_len()))
}

pub(crate) fn imstore(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let value = m.pop().as_int();
    let ptr = m.pop().as_ptr();
    m.store_i32(ptr, value)?;
    Ok(Step::Next(pc + Opcode::imstore.instruction_len()))
}

pub(crate) fn amload(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let ptr = m.pop().as_ptr();
    let value = m.load_ptr(ptr)?;
    m.push(Value::Ptr(value));
    Ok(Step::Next(pc + Opcode::amload.instruction_len()))
}

pub(crate) fn amstore(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let value = m.pop().as_ptr();
    let ptr = m.pop().as_ptr();
    m.store_ptr(ptr, value)?;
    Ok(Step::Next(pc + Opcode::amstore.instruction_len()))
}

pub(crate) fn cmload(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let ptr = m.pop().as_ptr();
    let byte = m.load_u8(ptr)?;
    m.push(Value::Int(byte as i32));
    Ok(Step::Next(pc + Opcode::cmload.instruction_len()))
}

/// `CMSTORE` masks with `0x7F`, discarding bit 7 along with the higher
/// bits: the source language's character type is 7-bit ASCII.
pub(crate) fn cmstore(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let value = m.pop().as_int();
    let ptr = m.pop().as_ptr();
    m.store_u8(ptr, (value & 0x7f) as u8)?;
    Ok(Step::Next(pc + Opcode::cmstore.instruction_len()))
}

pub(crate) fn aaddf(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let field_offset = m.u8_at(pc + 1);
    let ptr = m.pop().as_ptr();
    let moved = m.add_field_offset(ptr, field_offset)?;
    m.push(Value::Ptr(moved));
    Ok(Step::Next(pc + Opcode::aaddf.instruction_len()))
}

pub(crate) fn arraylength(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let ptr = m.pop().as_ptr();
    let len = m.array_length(ptr)?;
    m.push(Value::Int(len));
    Ok(Step::Next(pc + Opcode::arraylength.instruction_len()))
}

pub(crate) fn aadds(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    let index = m.pop().as_int();
    let ptr = m.pop().as_ptr();
    let elem = m.array_element(ptr, index)?;
    m.push(Value::Ptr(elem));
    Ok(Step::Next(pc + Opcode::aadds.instruction_len()))
}
