use c0vm_isa::{Trap, Value};

/// a host-provided function: takes the popped argument vector (in the same
/// left-to-right order `INVOKESTATIC` would place them in locals) and
/// returns one value. natives are leaves: they never call back
/// into bytecode, and they may raise a trap of their own.
pub type NativeFn = Box<dyn Fn(&[Value]) -> Result<Value, Trap> + Send + Sync>;

/// the fixed lookup from `function_table_index` to a native function.
#[derive(Default)]
pub struct NativeTable {
    functions: Vec<NativeFn>,
}

impl NativeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// registers a function and returns the `function_table_index` it was
    /// assigned; callers building a program image are expected to assign
    /// `native_pool` entries the matching index.
    pub fn register(
        &mut self,
        f: impl Fn(&[Value]) -> Result<Value, Trap> + Send + Sync + 'static,
    ) -> u16 {
        let index = self.functions.len() as u16;
        self.functions.push(Box::new(f));
        index
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// an out-of-range `function_table_index` means the image's
    /// `native_pool` names a slot the host never registered: a mismatch
    /// between the compiled program and the embedding host, not one of
    /// the five user-observable traps, so we assert rather than return
    /// a `Result`.
    pub fn call(&self, function_table_index: u16, args: &[Value]) -> Result<Value, Trap> {
        let f = self
            .functions
            .get(function_table_index as usize)
            .unwrap_or_else(|| {
                panic!(
                    "native function_table_index {} is not registered with this host",
                    function_table_index
                )
            });
        f(args)
    }
}
