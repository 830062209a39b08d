pub mod stdlib;
pub mod table;

pub use table::{NativeFn, NativeTable};
