#![no_main]
use libfuzzer_sys::fuzz_target;
use session_seal::cookie::decode_token;
use session_seal::SessionCodec;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = std::str::from_utf8(data) else {
        return;
    };
    if let Some(token) = decode_token(value) {
        if let Ok(codec) = SessionCodec::with_defaults(b"fuzz-secret") {
            let _ = codec.open(&token);
        }
    }
});
