// Copyright (c) 2026 VectorSync
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = vectorsync::codec::parse_interest_name(data);
    let _ = vectorsync::codec::parse_interest_lifetime_ms(data);
});
