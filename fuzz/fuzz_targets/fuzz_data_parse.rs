// Copyright (c) 2026 VectorSync
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Data parsing, then signature verification on whatever parsed, must
    // never panic regardless of how malformed the wire bytes are.
    if let Ok(parsed) = vectorsync::codec::parse_data(data) {
        let _ = vectorsync::codec::data::verify_signature(&parsed, None);
    }
});
