#![no_main]
use http_reqmsg::cache_control::CacheControl;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        CacheControl::parse(s);
    }
});
