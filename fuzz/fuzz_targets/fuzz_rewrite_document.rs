#![no_main]

use libfuzzer_sys::fuzz_target;
use ncma_linker::rewrite::Document;

fuzz_target!(|data: &[u8]| {
    // Any input must either be rejected or rewritten, never panic
    let Ok(mut doc) = Document::from_slice(data) else {
        return;
    };
    let count = doc.len();
    if doc.rewrite_links().is_err() {
        return;
    }

    // The encoded output must parse back with the same record count
    let bytes = doc.to_vec().expect("rewritten document must encode");
    let reparsed = Document::from_slice(&bytes).expect("encoded output must parse");
    assert_eq!(reparsed.len(), count);
});
