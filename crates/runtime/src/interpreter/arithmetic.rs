use c0vm_isa::{Opcode, Trap, TrapKind, Value};

use crate::interpreter::Step;
use crate::machine::Machine;

/// pops `y` then `x` (the reverse of push order), applies `f`,
/// pushes the result, and advances past the one-byte instruction.
fn binary(
    machine: &mut Machine,
    pc: usize,
    f: impl FnOnce(i32, i32) -> Result<i32, Trap>,
) -> Result<Step, Trap> {
    let y = machine.pop().as_int();
    let x = machine.pop().as_int();
    let result = f(x, y)?;
    machine.push(Value::Int(result));
    Ok(Step::Next(pc + 1))
}

pub(crate) fn iadd(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| Ok(x.wrapping_add(y)))
}

pub(crate) fn isub(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| Ok(x.wrapping_sub(y)))
}

pub(crate) fn imul(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| Ok(x.wrapping_mul(y)))
}

pub(crate) fn iand(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| Ok(x & y))
}

pub(crate) fn ior(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| Ok(x | y))
}

pub(crate) fn ixor(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| Ok(x ^ y))
}

pub(crate) fn idiv(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| {
        if y == 0 {
            return Err(Trap::with_message(TrapKind::Arithmetic, "division by zero"));
        }
        if x == i32::MIN && y == -1 {
            return Err(Trap::with_message(
                TrapKind::Arithmetic,
                "i32::MIN / -1 overflows",
            ));
        }
        Ok(x.wrapping_div(y))
    })
}

pub(crate) fn irem(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| {
        if y == 0 {
            return Err(Trap::with_message(TrapKind::Arithmetic, "modulo by zero"));
        }
        if x == i32::MIN && y == -1 {
            return Err(Trap::with_message(
                TrapKind::Arithmetic,
                "i32::MIN % -1 overflows",
            ));
        }
        Ok(x.wrapping_rem(y))
    })
}

pub(crate) fn ishl(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| {
        if !(0..32).contains(&y) {
            return Err(Trap::with_message(
                TrapKind::Arithmetic,
                format!("shift amount {} out of range [0, 31]", y),
            ));
        }
        Ok(x << y)
    })
}

pub(crate) fn ishr(m: &mut Machine, pc: usize) -> Result<Step, Trap> {
    binary(m, pc, |x, y| {
        if !(0..32).contains(&y) {
            return Err(Trap::with_message(
                TrapKind::Arithmetic,
                format!("shift amount {} out of range [0, 31]", y),
            ));
        }
        Ok(x >> y)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use c0vm_image::{CodeWriter, ImageBuilder};
    use pretty_assertions::assert_eq;

    fn run_one(op: Opcode, lhs: i32, rhs: i32) -> Result<i32, Trap> {
        let mut code = CodeWriter::new();
        code.op_i8(Opcode::bipush, lhs as i8);
        code.op_i8(Opcode::bipush, rhs as i8);
        code.op(op);
        code.op(Opcode::return_);
        let mut builder = ImageBuilder::new();
        builder.add_function(0, 0, code.finish());
        let image = builder.build();
        let natives = c0vm_natives::NativeTable::new();
        crate::machine::Machine::new(&image, &natives).run()
    }

    #[test]
    fn wrapping_add_matches_two_complement_modular_arithmetic() {
        assert_eq!(run_one(Opcode::iadd, 100, 27), Ok(127));
    }

    #[test]
    fn shift_out_of_range_traps_arithmetic() {
        let err = run_one(Opcode::ishl, 1, 32).unwrap_err();
        assert_eq!(err.kind, TrapKind::Arithmetic);
        let err = run_one(Opcode::ishr, 1, -1).unwrap_err();
        assert_eq!(err.kind, TrapKind::Arithmetic);
    }

    #[test]
    fn remainder_sign_follows_the_dividend() {
        assert_eq!(run_one(Opcode::irem, -7, 2), Ok(-1));
    }
}
