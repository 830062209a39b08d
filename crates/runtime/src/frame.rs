use c0vm_isa::Value;

use crate::stack::Stack;

/// a suspended activation record. pushed
/// onto the call stack by `INVOKESTATIC`, popped and restored by
/// `RETURN`. the currently executing frame's fields live directly on
/// `Machine` rather than wrapped in one of these; a `Frame` only exists
/// while its function is waiting on a callee.
pub struct Frame<'img> {
    pub stack: Stack,
    pub locals: Vec<Value>,
    pub code: &'img [u8],
    /// the byte offset to resume at: the byte after `INVOKESTATIC`'s
    /// immediates, not the call site itself.
    pub resume_pc: usize,
}
