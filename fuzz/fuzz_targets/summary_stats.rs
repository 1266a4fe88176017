#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((flags, rest)) = data.split_first() else {
        return;
    };
    let mut values: Vec<f64> = rest
        .chunks_exact(4)
        .take(4096)
        .map(|chunk| f64::from(i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
        .collect();
    let count = values.len();
    let summary = pulse::fuzzing::summarize_values_input(&mut values, flags & 1 == 1);
    debug_assert!(summary.removed <= count);
    if count > 0 {
        debug_assert!(summary.min <= summary.mean && summary.mean <= summary.max);
    }
});
