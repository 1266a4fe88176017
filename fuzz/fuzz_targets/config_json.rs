#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1_000_000 {
        return;
    }
    if let Ok(size) = pulse::fuzzing::parse_request_json_input(data) {
        debug_assert!(size >= 3);
    }
});
