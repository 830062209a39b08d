// driver binary: memory-maps a container file, loads it, and runs it.
// no configuration beyond the path argument, and no argument-parsing
// crate — a single positional path doesn't need one.

use std::env;
use std::fs::File;
use std::process::ExitCode;

use c0vm_image::read_container;
use c0vm_natives::stdlib::standard_table;

fn main() -> ExitCode {
    let mut args = env::args();
    let program_name = args.next().unwrap_or_else(|| "c0vm".to_string());

    let path = match args.next() {
        Some(path) => path,
        None => {
            eprintln!("usage: {} <program.c0vm>", program_name);
            return ExitCode::from(64);
        }
    };

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{}: cannot open '{}': {}", program_name, path, err);
            return ExitCode::from(64);
        }
    };

    // SAFETY: the mapped file is treated as read-only for the entire
    // run; nothing else in this process writes to it concurrently.
    let mapped = match unsafe { memmap2::Mmap::map(&file) } {
        Ok(mapped) => mapped,
        Err(err) => {
            eprintln!("{}: cannot map '{}': {}", program_name, path, err);
            return ExitCode::from(64);
        }
    };

    let image = match read_container(&mapped[..]) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("{}: '{}': {}", program_name, path, err);
            return ExitCode::from(64);
        }
    };

    let natives = standard_table();

    match c0vm_runtime::execute(&image, &natives) {
        // the OS truncates an `ExitCode`/exit status to one byte, the
        // same way a native `exit(3)` would; a program whose entry
        // function returns outside `0..=255` only gets that low byte
        // observed by its caller.
        Ok(result) => ExitCode::from(result as u8),
        Err(trap) => {
            eprintln!("{}", trap);
            ExitCode::from(trap.kind.exit_code() as u8)
        }
    }
}
