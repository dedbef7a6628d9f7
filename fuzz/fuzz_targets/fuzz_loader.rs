#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Fuzz the search index loader with arbitrary source text
    // Normalization and parsing must fail cleanly, never panic
    let _ = docdex::index::loader::normalize_source(data);
    if let Ok(records) = docdex::index::parse_search_index(data) {
        let _ = docdex::DocIndex::load(records);
    }
});
