#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    let Some((selector, payload)) = data.split_first() else {
        return;
    };

    let suffix = match selector % 4 {
        0 => ".toml",
        1 => ".json",
        2 => ".txt",
        _ => "",
    };

    let payload = payload.get(..1_000_000).unwrap_or(payload);

    let Ok(mut file) = tempfile::Builder::new().suffix(suffix).tempfile() else {
        return;
    };
    if file.write_all(payload).is_err() {
        return;
    }

    let result = pulse::fuzzing::load_request_file_input(file.path());
    if result.is_ok() {
        debug_assert!(suffix != ".txt");
    }
});
