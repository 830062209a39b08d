use c0vm_image::{read_container, write_container, CodeWriter, ImageBuilder};
use c0vm_isa::Opcode;
use pretty_assertions::assert_eq;

/// builds a "return 42" program entirely through the public builder
/// API, serialises it, and reloads it.
#[test]
fn builds_serialises_and_reloads_return_42() {
    let mut code = CodeWriter::new();
    code.op_i8(Opcode::bipush, 42);
    code.op(Opcode::return_);

    let mut builder = ImageBuilder::new();
    builder.add_function(0, 0, code.finish());
    let image = builder.build();

    let mut bytes = Vec::new();
    write_container(&image, &mut bytes).unwrap();

    let loaded = read_container(&bytes).unwrap();
    assert_eq!(loaded.function_pool.len(), 1);
    let entry = loaded.entry_function();
    assert_eq!(entry.num_args, 0);
    assert_eq!(entry.num_vars, 0);
    assert_eq!(entry.code, vec![Opcode::bipush as u8, 42, Opcode::return_ as u8]);
}
