pub mod builder;
pub mod container;
pub mod pools;

pub use builder::{CodeWriter, ImageBuilder};
pub use container::{read_container, write_container, ContainerError};
pub use pools::{FunctionEntry, NativeEntry, ProgramImage};
