use c0vm_isa::Opcode;

use crate::pools::{FunctionEntry, NativeEntry, ProgramImage};

/// an in-Rust assembler for one function body: one-byte immediates as
/// written, two-byte immediates big-endian. this is
/// not a source-to-bytecode compiler — it only encodes raw
/// opcodes a caller already chose.
pub struct CodeWriter {
    buffer: Vec<u8>,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// the address the next byte written will land at.
    pub fn here(&self) -> usize {
        self.buffer.len()
    }

    /// a zero-operand instruction. returns the address of the opcode byte.
    pub fn op(&mut self, op: Opcode) -> usize {
        let addr = self.here();
        self.buffer.push(op as u8);
        addr
    }

    /// an instruction with a one-byte unsigned immediate (local index,
    /// byte size, field offset).
    pub fn op_u8(&mut self, op: Opcode, imm: u8) -> usize {
        let addr = self.op(op);
        self.buffer.push(imm);
        addr
    }

    /// `BIPUSH`'s signed-byte immediate.
    pub fn op_i8(&mut self, op: Opcode, imm: i8) -> usize {
        let addr = self.op(op);
        self.buffer.push(imm as u8);
        addr
    }

    /// an instruction with a two-byte big-endian unsigned immediate (a
    /// pool index).
    pub fn op_u16(&mut self, op: Opcode, imm: u16) -> usize {
        let addr = self.op(op);
        self.buffer.extend_from_slice(&imm.to_be_bytes());
        addr
    }

    /// a branch instruction with its displacement left as a placeholder;
    /// returns the address of the opcode byte so the displacement can be
    /// patched once the target address is known (`patch_branch_to` /
    /// `patch_branch_to_here`).
    pub fn branch(&mut self, op: Opcode) -> usize {
        let addr = self.op(op);
        self.buffer.extend_from_slice(&0i16.to_be_bytes());
        addr
    }

    /// patch a previously emitted branch so it targets the current
    /// position (a forward jump).
    pub fn patch_branch_to_here(&mut self, opcode_addr: usize) {
        let here = self.here();
        self.patch_branch_to(opcode_addr, here);
    }

    /// patch a previously emitted branch so it targets an arbitrary
    /// instruction address. the displacement is measured from the
    /// address of the branch opcode itself.
    pub fn patch_branch_to(&mut self, opcode_addr: usize, target_addr: usize) {
        let displacement = target_addr as i64 - opcode_addr as i64;
        let displacement16 = displacement as i16;
        let bytes = displacement16.to_be_bytes();
        self.buffer[opcode_addr + 1] = bytes[0];
        self.buffer[opcode_addr + 2] = bytes[1];
    }

    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }
}

/// accumulates the four pools into a `ProgramImage`.
#[derive(Default)]
pub struct ImageBuilder {
    image: ProgramImage,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_int(&mut self, value: i32) -> u16 {
        let index = self.image.int_pool.len() as u16;
        self.image.int_pool.push(value);
        index
    }

    /// appends a NUL-terminated C-string to the string pool and returns
    /// its starting offset, suitable for `ALDC`.
    pub fn add_string(&mut self, s: &str) -> u16 {
        let offset = self.image.string_pool.len() as u16;
        self.image.string_pool.extend_from_slice(s.as_bytes());
        self.image.string_pool.push(0);
        offset
    }

    pub fn add_function(&mut self, num_args: u16, num_vars: u16, code: Vec<u8>) -> u16 {
        let index = self.image.function_pool.len() as u16;
        self.image.function_pool.push(FunctionEntry {
            num_args,
            num_vars,
            code,
        });
        index
    }

    pub fn add_native(&mut self, num_args: u16, function_table_index: u16) -> u16 {
        let index = self.image.native_pool.len() as u16;
        self.image.native_pool.push(NativeEntry {
            num_args,
            function_table_index,
        });
        index
    }

    pub fn build(self) -> ProgramImage {
        self.image
    }
}
