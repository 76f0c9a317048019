#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let patterns = jarpatch::filter::tokenize_patterns(&text);
    // Compilation may reject a pattern but must never panic; matching on a
    // successfully built filter must never panic either.
    if let Ok(filter) = jarpatch::filter::EntryFilter::new(&patterns, &patterns) {
        let _ = filter.includes(&text);
        let _ = filter.includes("META-INF/MANIFEST.MF");
        let _ = filter.includes("lib/inner.jar");
    }
});
