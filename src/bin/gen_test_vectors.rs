//! Generates test vectors for session token regression testing.
//! Run with: cargo run --bin gen_test_vectors > testdata/v0_vectors.json

use session_seal::cookie::encode_token;
use session_seal::types::{Algorithm, CodecConfig, TagEncoding};
use session_seal::SessionCodec;

struct Case {
    name: &'static str,
    algorithm: Algorithm,
    tag_encoding: TagEncoding,
    secret: Vec<u8>,
    payload: Vec<u8>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cases = vec![
        // Vector 1: default algorithm, the canonical example
        Case {
            name: "sha512_user42",
            algorithm: Algorithm::HmacSha512,
            tag_encoding: TagEncoding::Raw,
            secret: b"k".to_vec(),
            payload: b"user=42".to_vec(),
        },
        // Vector 2: empty payload, token is the bare tag
        Case {
            name: "sha512_empty_payload",
            algorithm: Algorithm::HmacSha512,
            tag_encoding: TagEncoding::Raw,
            secret: b"k".to_vec(),
            payload: Vec::new(),
        },
        Case {
            name: "sha256_cart",
            algorithm: Algorithm::HmacSha256,
            tag_encoding: TagEncoding::Raw,
            secret: b"session-secret-0001".to_vec(),
            payload: b"cart=3;theme=dark".to_vec(),
        },
        Case {
            name: "sha384_binary",
            algorithm: Algorithm::HmacSha384,
            tag_encoding: TagEncoding::Raw,
            secret: (0u8..32).collect(),
            payload: vec![0x00, 0xff, 0x01, 0xfe, 0x02, 0xfd],
        },
        // Vector 5: hex tags, 128 trailing characters for SHA-512
        Case {
            name: "sha512_hex_tag",
            algorithm: Algorithm::HmacSha512,
            tag_encoding: TagEncoding::Hex,
            secret: b"YOUR_SECRET_STRING".to_vec(),
            payload: b"user|s:5:\"alice\";".to_vec(),
        },
        Case {
            name: "sha256_hex_tag",
            algorithm: Algorithm::HmacSha256,
            tag_encoding: TagEncoding::Hex,
            secret: b"k".to_vec(),
            payload: b"user=42".to_vec(),
        },
    ];

    let mut vectors: Vec<serde_json::Value> = Vec::new();
    for case in cases {
        let config = CodecConfig::new(case.algorithm).with_tag_encoding(case.tag_encoding);
        let codec = SessionCodec::new(&case.secret, &config)?;
        let token = codec.seal(&case.payload);
        vectors.push(serde_json::json!({
            "name": case.name,
            "algorithm": case.algorithm,
            "tag_encoding": case.tag_encoding,
            "secret_hex": hex::encode(&case.secret),
            "payload_hex": hex::encode(&case.payload),
            "tag_hex": hex::encode(codec.tag(&case.payload)),
            "token_len": token.len(),
            "cookie": encode_token(&token),
        }));
    }

    let output = serde_json::json!({
        "version": 0,
        "vectors": vectors,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
