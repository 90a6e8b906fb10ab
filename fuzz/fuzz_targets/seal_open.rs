#![no_main]
use libfuzzer_sys::fuzz_target;
use session_seal::SessionCodec;

fuzz_target!(|data: &[u8]| {
    // Sealing then opening must return the original payload.
    if let Ok(codec) = SessionCodec::with_defaults(b"fuzz-secret") {
        let token = codec.seal(data);
        assert_eq!(
            codec.open(&token).as_deref(),
            Some(data),
            "seal/open roundtrip mismatch"
        );
    }
});
