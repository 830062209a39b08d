/// one allocation in the heap arena: byte buffers addressed by opaque
/// handles rather than raw addresses. a
/// `HeapRef` names one of these by index plus a byte offset into its
/// buffer; `AADDF`/`AADDS` only ever move the offset, never fabricate a
/// new handle.
enum HeapObject {
    /// a `NEW`-allocated struct-like cell: a flat zeroed byte buffer.
    /// field offsets are baked into the bytecode and applied blindly.
    Cell(Vec<u8>),
    /// a `NEWARRAY`-allocated array: a header (`count`, `elt_size`) plus
    /// its own zeroed element buffer.
    Array {
        count: i32,
        elt_size: i32,
        elems: Vec<u8>,
    },
}

/// the heap arena. cells and arrays live here until process exit; the
/// core never traces or frees them.
#[derive(Default)]
pub struct Heap {
    objects: Vec<HeapObject>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// `NEW s`: allocate and zero `s` bytes, return the handle for the
    /// fresh cell at offset 0.
    pub fn allocate_cell(&mut self, size: u8) -> u32 {
        let handle = self.objects.len() as u32;
        self.objects.push(HeapObject::Cell(vec![0u8; size as usize]));
        handle
    }

    /// `NEWARRAY s` after the caller has checked `count >= 0`: allocate
    /// the header and `count * elt_size` zeroed element bytes.
    pub fn allocate_array(&mut self, count: i32, elt_size: u8) -> u32 {
        let handle = self.objects.len() as u32;
        let total = count as usize * elt_size as usize;
        self.objects.push(HeapObject::Array {
            count,
            elt_size: elt_size as i32,
            elems: vec![0u8; total],
        });
        handle
    }

    /// the `count` field of the array at `handle` (`ARRAYLENGTH`,
    /// `AADDS` bounds check). panics if `handle` names a cell: that
    /// pairing can only arise from malformed bytecode.
    pub fn array_count(&self, handle: u32) -> i32 {
        match &self.objects[handle as usize] {
            HeapObject::Array { count, .. } => *count,
            HeapObject::Cell(_) => {
                unreachable!("ARRAYLENGTH/AADDS on a handle that names a struct cell")
            }
        }
    }

    /// the `elt_size` field of the array at `handle` (`AADDS`).
    pub fn array_elt_size(&self, handle: u32) -> i32 {
        match &self.objects[handle as usize] {
            HeapObject::Array { elt_size, .. } => *elt_size,
            HeapObject::Cell(_) => unreachable!("AADDS on a handle that names a struct cell"),
        }
    }

    fn buffer(&self, handle: u32) -> &[u8] {
        match &self.objects[handle as usize] {
            HeapObject::Cell(bytes) => bytes,
            HeapObject::Array { elems, .. } => elems,
        }
    }

    fn buffer_mut(&mut self, handle: u32) -> &mut [u8] {
        match &mut self.objects[handle as usize] {
            HeapObject::Cell(bytes) => bytes,
            HeapObject::Array { elems, .. } => elems,
        }
    }

    pub fn read_i32(&self, handle: u32, offset: i32) -> i32 {
        let o = offset as usize;
        i32::from_ne_bytes(self.buffer(handle)[o..o + 4].try_into().unwrap())
    }

    pub fn write_i32(&mut self, handle: u32, offset: i32, value: i32) {
        let o = offset as usize;
        self.buffer_mut(handle)[o..o + 4].copy_from_slice(&value.to_ne_bytes());
    }

    pub fn read_u8(&self, handle: u32, offset: i32) -> u8 {
        self.buffer(handle)[offset as usize]
    }

    pub fn write_u8(&mut self, handle: u32, offset: i32, value: u8) {
        self.buffer_mut(handle)[offset as usize] = value;
    }

    /// the fixed-width encoding used for `AMLOAD`/`AMSTORE`: a pointer
    /// stored inside a heap cell's byte buffer.
    pub fn read_ptr_bytes(&self, handle: u32, offset: i32) -> [u8; PTR_WIDTH] {
        let o = offset as usize;
        self.buffer(handle)[o..o + PTR_WIDTH].try_into().unwrap()
    }

    pub fn write_ptr_bytes(&mut self, handle: u32, offset: i32, bytes: [u8; PTR_WIDTH]) {
        let o = offset as usize;
        self.buffer_mut(handle)[o..o + PTR_WIDTH].copy_from_slice(&bytes);
    }
}

/// width of a pointer once it is stored inside a heap cell's byte
/// buffer (`AMLOAD`/`AMSTORE`): one tag byte, a 16-bit handle, a 32-bit
/// offset, and one pad byte. the 16-bit handle caps this arena at 65536
/// live allocations, which this teaching machine accepts as a limit
/// rather than widening the on-heap pointer representation.
pub const PTR_WIDTH: usize = 8;

const TAG_NULL: u8 = 0;
const TAG_HEAP: u8 = 1;
const TAG_STR: u8 = 2;

pub fn encode_ptr(ptr: c0vm_isa::Ptr) -> [u8; PTR_WIDTH] {
    use c0vm_isa::Ptr;
    let mut bytes = [0u8; PTR_WIDTH];
    match ptr {
        Ptr::Null => bytes[0] = TAG_NULL,
        Ptr::Heap(r) => {
            bytes[0] = TAG_HEAP;
            bytes[1..3].copy_from_slice(&(r.handle as u16).to_ne_bytes());
            bytes[3..7].copy_from_slice(&r.offset.to_ne_bytes());
        }
        Ptr::Str(offset) => {
            bytes[0] = TAG_STR;
            bytes[3..7].copy_from_slice(&(offset as i32).to_ne_bytes());
        }
    }
    bytes
}

pub fn decode_ptr(bytes: [u8; PTR_WIDTH]) -> c0vm_isa::Ptr {
    use c0vm_isa::{HeapRef, Ptr};
    match bytes[0] {
        TAG_NULL => Ptr::Null,
        TAG_HEAP => {
            let handle = u16::from_ne_bytes([bytes[1], bytes[2]]) as u32;
            let offset = i32::from_ne_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]);
            Ptr::Heap(HeapRef { handle, offset })
        }
        TAG_STR => {
            let offset = i32::from_ne_bytes([bytes[3], bytes[4], bytes[5], bytes[6]]) as u32;
            Ptr::Str(offset)
        }
        other => unreachable!("corrupt on-heap pointer tag byte {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c0vm_isa::{HeapRef, Ptr};
    use pretty_assertions::assert_eq;

    #[test]
    fn cell_round_trips_an_int() {
        let mut heap = Heap::new();
        let handle = heap.allocate_cell(8);
        heap.write_i32(handle, 0, -17);
        assert_eq!(heap.read_i32(handle, 0), -17);
    }

    #[test]
    fn array_elements_start_zeroed_and_are_independently_addressable() {
        let mut heap = Heap::new();
        let handle = heap.allocate_array(3, 4);
        assert_eq!(heap.array_count(handle), 3);
        assert_eq!(heap.read_i32(handle, 4), 0);
        heap.write_i32(handle, 4, 99);
        assert_eq!(heap.read_i32(handle, 0), 0);
        assert_eq!(heap.read_i32(handle, 4), 99);
        assert_eq!(heap.read_i32(handle, 8), 0);
    }

    #[test]
    fn pointer_encoding_round_trips_through_a_cell() {
        let mut heap = Heap::new();
        let handle = heap.allocate_cell(PTR_WIDTH as u8);
        let ptr = Ptr::Heap(HeapRef {
            handle: 3,
            offset: 12,
        });
        heap.write_ptr_bytes(handle, 0, encode_ptr(ptr));
        assert_eq!(decode_ptr(heap.read_ptr_bytes(handle, 0)), ptr);

        heap.write_ptr_bytes(handle, 0, encode_ptr(Ptr::Null));
        assert_eq!(decode_ptr(heap.read_ptr_bytes(handle, 0)), Ptr::Null);

        heap.write_ptr_bytes(handle, 0, encode_ptr(Ptr::Str(40)));
        assert_eq!(decode_ptr(heap.read_ptr_bytes(handle, 0)), Ptr::Str(40));
    }
}
