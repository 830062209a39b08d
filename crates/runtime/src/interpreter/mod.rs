// the dispatch table: a `static` array of function pointers indexed
// directly by opcode byte, populated once from `init_handlers`, split
// into one submodule per semantic family (stack shuffle, arithmetic,
// constants, locals, assertions, control flow, calls, memory).

mod arithmetic;
mod assertions;
mod calls;
mod constants;
mod control_flow;
mod locals;
mod memory;
mod stack_ops;

use c0vm_isa::{Opcode, Trap, MAX_OPCODE_NUMBER};

use crate::machine::Machine;

/// what a handler tells the loop to do next. every handler
/// returns `Next`; only the outermost `RETURN` can produce `Exit`.
pub(crate) enum Step {
    Next(usize),
    Exit(i32),
}

type Handler = fn(&mut Machine, usize) -> Result<Step, Trap>;

fn unreachable_handler(_machine: &mut Machine, _pc: usize) -> Result<Step, Trap> {
    unreachable!("dispatch table entry for an opcode the loop never calls directly")
}

static mut HANDLERS: [Handler; MAX_OPCODE_NUMBER] = [unreachable_handler; MAX_OPCODE_NUMBER];

/// populates the dispatch table. idempotent and safe to call once per
/// process from `Machine::new`: guarded by a one-entry sentinel check
/// so a second call is a cheap no-op.
pub(crate) fn init_handlers() {
    let handlers = unsafe { &mut HANDLERS };

    if handlers[Opcode::nop as usize] == control_flow::nop {
        return;
    }

    // stack shuffle
    handlers[Opcode::pop as usize] = stack_ops::pop;
    handlers[Opcode::dup as usize] = stack_ops::dup;
    handlers[Opcode::swap as usize] = stack_ops::swap;

    // integer arithmetic
    handlers[Opcode::iadd as usize] = arithmetic::iadd;
    handlers[Opcode::isub as usize] = arithmetic::isub;
    handlers[Opcode::imul as usize] = arithmetic::imul;
    handlers[Opcode::idiv as usize] = arithmetic::idiv;
    handlers[Opcode::irem as usize] = arithmetic::irem;
    handlers[Opcode::iand as usize] = arithmetic::iand;
    handlers[Opcode::ior as usize] = arithmetic::ior;
    handlers[Opcode::ixor as usize] = arithmetic::ixor;
    handlers[Opcode::ishl as usize] = arithmetic::ishl;
    handlers[Opcode::ishr as usize] = arithmetic::ishr;

    // constants
    handlers[Opcode::bipush as usize] = constants::bipush;
    handlers[Opcode::ildc as usize] = constants::ildc;
    handlers[Opcode::aldc as usize] = constants::aldc;
    handlers[Opcode::aconst_null as usize] = constants::aconst_null;

    // locals
    handlers[Opcode::vload as usize] = locals::vload;
    handlers[Opcode::vstore as usize] = locals::vstore;

    // assertions
    handlers[Opcode::athrow as usize] = assertions::athrow;
    handlers[Opcode::assert as usize] = assertions::assert;

    // control flow
    handlers[Opcode::nop as usize] = control_flow::nop;
    handlers[Opcode::return_ as usize] = control_flow::return_;
    handlers[Opcode::if_cmpeq as usize] = control_flow::if_cmpeq;
    handlers[Opcode::if_cmpne as usize] = control_flow::if_cmpne;
    handlers[Opcode::if_icmplt as usize] = control_flow::if_icmplt;
    handlers[Opcode::if_icmple as usize] = control_flow::if_icmple;
    handlers[Opcode::if_icmpgt as usize] = control_flow::if_icmpgt;
    handlers[Opcode::if_icmpge as usize] = control_flow::if_icmpge;
    handlers[Opcode::goto_ as usize] = control_flow::goto_;

    // calls
    handlers[Opcode::invokestatic as usize] = calls::invokestatic;
    handlers[Opcode::invokenative as usize] = calls::invokenative;

    // memory
    handlers[Opcode::new as usize] = memory::new;
    handlers[Opcode::newarray as usize] = memory::newarray;
    handlers[Opcode::imload as usize] = memory::imload;
    handlers[Opcode::imstore as usize] = memory::imstore;
    handlers[Opcode::amload as usize] = memory::amload;
    handlers[Opcode::amstore as usize] = memory::amstore;
    handlers[Opcode::cmload as usize] = memory::cmload;
    handlers[Opcode::cmstore as usize] = memory::cmstore;
    handlers[Opcode::aaddf as usize] = memory::aaddf;
    handlers[Opcode::arraylength as usize] = memory::arraylength;
    handlers[Opcode::aadds as usize] = memory::aadds;
}

pub(crate) fn handler_for(opcode: Opcode) -> Handler {
    unsafe { HANDLERS[opcode as usize] }
}
