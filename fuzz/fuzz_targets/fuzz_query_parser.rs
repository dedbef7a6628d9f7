#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Fuzz the query parser with arbitrary strings
    // This should not panic on malformed filters or unterminated quotes
    let _ = docdex::query::parse_query(data);
});
