use std::fmt::{self, Display};
use std::io::{self, Write};

use crate::pools::{FunctionEntry, NativeEntry, ProgramImage};

const MAGIC: &[u8; 4] = b"C0VM";
const VERSION: u16 = 1;

/// failures loading a container file. distinct from `c0vm_isa::Trap`: a
/// truncated or malformed file is a problem with the file, caught before
/// `execute` ever runs, not one of the five runtime traps.
#[derive(Debug)]
pub enum ContainerError {
    Io(io::Error),
    BadMagic,
    UnsupportedVersion(u16),
    Truncated,
}

impl From<io::Error> for ContainerError {
    fn from(err: io::Error) -> Self {
        ContainerError::Io(err)
    }
}

impl Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::Io(err) => write!(f, "I/O error reading container: {}", err),
            ContainerError::BadMagic => write!(f, "not a C0VM container (bad magic bytes)"),
            ContainerError::UnsupportedVersion(v) => {
                write!(f, "unsupported container version: {}", v)
            }
            ContainerError::Truncated => write!(f, "container is truncated"),
        }
    }
}

impl std::error::Error for ContainerError {}

/// serialises a program image to the on-disk container format: a fixed
/// header followed by the four flat pools, each length-prefixed, all
/// multi-byte integers big-endian.
pub fn write_container<W: Write>(image: &ProgramImage, mut out: W) -> io::Result<()> {
    out.write_all(MAGIC)?;
    out.write_all(&VERSION.to_be_bytes())?;
    out.write_all(&(ProgramImage::ENTRY_FUNCTION_INDEX as u16).to_be_bytes())?;

    out.write_all(&(image.int_pool.len() as u16).to_be_bytes())?;
    for value in &image.int_pool {
        out.write_all(&value.to_be_bytes())?;
    }

    out.write_all(&(image.string_pool.len() as u32).to_be_bytes())?;
    out.write_all(&image.string_pool)?;

    out.write_all(&(image.function_pool.len() as u16).to_be_bytes())?;
    for function in &image.function_pool {
        out.write_all(&function.num_args.to_be_bytes())?;
        out.write_all(&function.num_vars.to_be_bytes())?;
        out.write_all(&(function.code.len() as u32).to_be_bytes())?;
        out.write_all(&function.code)?;
    }

    out.write_all(&(image.native_pool.len() as u16).to_be_bytes())?;
    for native in &image.native_pool {
        out.write_all(&native.num_args.to_be_bytes())?;
        out.write_all(&native.function_table_index.to_be_bytes())?;
    }

    Ok(())
}

/// a cursor over an in-memory byte slice, used instead of `std::io::Read`
/// because `crates/cli` hands this a memory-mapped file and we'd rather
/// not copy it first.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ContainerError> {
        let end = self.pos.checked_add(len).ok_or(ContainerError::Truncated)?;
        let slice = self.data.get(self.pos..end).ok_or(ContainerError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn u16(&mut self) -> Result<u16, ContainerError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn u32(&mut self) -> Result<u32, ContainerError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn i32(&mut self) -> Result<i32, ContainerError> {
        Ok(self.u32()? as i32)
    }
}

/// parses a program image out of a byte buffer.
pub fn read_container(data: &[u8]) -> Result<ProgramImage, ContainerError> {
    let mut reader = Reader::new(data);

    if reader.take(4)? != MAGIC {
        return Err(ContainerError::BadMagic);
    }
    let version = reader.u16()?;
    if version != VERSION {
        return Err(ContainerError::UnsupportedVersion(version));
    }
    let _entry_index = reader.u16()?;

    let int_count = reader.u16()? as usize;
    let mut int_pool = Vec::with_capacity(int_count);
    for _ in 0..int_count {
        int_pool.push(reader.i32()?);
    }

    let string_len = reader.u32()? as usize;
    let string_pool = reader.take(string_len)?.to_vec();

    let function_count = reader.u16()? as usize;
    let mut function_pool = Vec::with_capacity(function_count);
    for _ in 0..function_count {
        let num_args = reader.u16()?;
        let num_vars = reader.u16()?;
        let code_len = reader.u32()? as usize;
        let code = reader.take(code_len)?.to_vec();
        function_pool.push(FunctionEntry {
            num_args,
            num_vars,
            code,
        });
    }

    let native_count = reader.u16()? as usize;
    let mut native_pool = Vec::with_capacity(native_count);
    for _ in 0..native_count {
        let num_args = reader.u16()?;
        let function_table_index = reader.u16()?;
        native_pool.push(NativeEntry {
            num_args,
            function_table_index,
        });
    }

    Ok(ProgramImage {
        int_pool,
        string_pool,
        function_pool,
        native_pool,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ImageBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_a_small_image() {
        let mut builder = ImageBuilder::new();
        builder.add_int(42);
        builder.add_string("oops");
        builder.add_function(0, 2, vec![0x00, 0x01]);
        builder.add_native(1, 7);
        let image = builder.build();

        let mut bytes = Vec::new();
        write_container(&image, &mut bytes).unwrap();

        let loaded = read_container(&bytes).unwrap();
        assert_eq!(loaded.int_pool, image.int_pool);
        assert_eq!(loaded.string_pool, image.string_pool);
        assert_eq!(loaded.function_pool, image.function_pool);
        assert_eq!(loaded.native_pool, image.native_pool);
    }

    #[test]
    fn rejects_bad_magic() {
        let bytes = vec![0u8; 16];
        assert!(matches!(
            read_container(&bytes),
            Err(ContainerError::BadMagic)
        ));
    }

    #[test]
    fn rejects_truncated_data() {
        let mut bytes = MAGIC.to_vec();
        bytes.extend_from_slice(&VERSION.to_be_bytes());
        assert!(matches!(
            read_container(&bytes),
            Err(ContainerError::Truncated)
        ));
    }
}
