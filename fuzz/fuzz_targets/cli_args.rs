#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut args = vec!["pulse"];
        args.extend(input.split_whitespace().take(64));
        let _ = pulse::fuzzing::parse_args_input(&args);
    }
});
