mod frame;
mod heap;
mod interpreter;
mod machine;
mod stack;

pub use c0vm_isa::{Trap, TrapKind};

use c0vm_image::ProgramImage;
use c0vm_natives::NativeTable;

/// runs a program image's entry function (function 0) with an empty
/// operand stack and zero-initialised locals, and returns the integer
/// popped at the outermost `RETURN`.
pub fn execute(image: &ProgramImage, natives: &NativeTable) -> Result<i32, Trap> {
    machine::Machine::new(image, natives).run()
}
