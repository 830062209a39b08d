/// a function as seen by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntry {
    pub num_args: u16,
    pub num_vars: u16,
    pub code: Vec<u8>,
}

/// a native as seen by the core. the
/// `function_table_index` is looked up in the host-supplied
/// `natives::NativeTable` at call time; it is not resolved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeEntry {
    pub num_args: u16,
    pub function_table_index: u16,
}

/// the read-only view the core requires of a parsed binary.
/// everything here is immutable for the lifetime of `execute`.
#[derive(Debug, Clone, Default)]
pub struct ProgramImage {
    pub int_pool: Vec<i32>,
    pub string_pool: Vec<u8>,
    pub function_pool: Vec<FunctionEntry>,
    pub native_pool: Vec<NativeEntry>,
}

impl ProgramImage {
    /// function 0 is always the entry function.
    pub const ENTRY_FUNCTION_INDEX: usize = 0;

    pub fn entry_function(&self) -> &FunctionEntry {
        &self.function_pool[Self::ENTRY_FUNCTION_INDEX]
    }
}
