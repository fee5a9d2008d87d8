#![no_main]
use http_reqmsg::decoder::{decode_content_length, decode_request_head};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(Some((_, head))) = decode_request_head(data) {
        decode_content_length(&head.headers).ok();
    }
});
