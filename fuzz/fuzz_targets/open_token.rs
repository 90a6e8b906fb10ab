#![no_main]
use libfuzzer_sys::fuzz_target;
use session_seal::types::{CodecConfig, TagEncoding};
use session_seal::SessionCodec;

fuzz_target!(|data: &[u8]| {
    // Must never panic, and anything that opens must be exactly what seal produces.
    for encoding in [TagEncoding::Raw, TagEncoding::Hex] {
        let config = CodecConfig::default().with_tag_encoding(encoding);
        if let Ok(codec) = SessionCodec::new(b"fuzz-secret", &config) {
            if let Some(payload) = codec.open(data) {
                assert_eq!(codec.seal(&payload), data);
            }
        }
    }
});
