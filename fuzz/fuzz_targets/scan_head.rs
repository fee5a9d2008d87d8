#![no_main]
use http_reqmsg::limits::{scan_head, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_uri_length: 64,
        max_header_size: 256,
    };
    scan_head(data, &limits).ok();
});
