use std::io::{self, Read as _};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use session_seal::config::SessionConfig;
use session_seal::cookie::{decode_token, encode_token};
use session_seal::keys::{generate_secret, read_secret_file, DEFAULT_SECRET_LEN};
use session_seal::types::{Algorithm, CodecConfig, TagEncoding};
use session_seal::SessionCodec;

#[derive(Parser)]
#[command(name = "session-seal", about = "HMAC-sealed client-side session cookies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CodecArgs {
    /// TOML config file. Flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Secret key file (raw bytes, or hex with --hex-key).
    #[arg(short, long)]
    key: Option<PathBuf>,

    /// Interpret the key file as hex-encoded.
    #[arg(long, default_value_t = false)]
    hex_key: bool,

    /// Keyed hash: "sha256", "sha384" or "sha512".
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Tag layout: "raw" or "hex".
    #[arg(long)]
    tag_encoding: Option<TagEncoding>,

    /// Expected tag length in bytes (checked against the algorithm).
    #[arg(long)]
    tag_length: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Seal a payload and print the cookie value.
    /// Reads the payload from --payload or stdin.
    Seal {
        #[command(flatten)]
        codec: CodecArgs,

        /// Session payload. If omitted, reads from stdin.
        #[arg(short, long)]
        payload: Option<String>,
    },

    /// Verify a cookie value and print its payload.
    /// Exits non-zero if the token is rejected.
    Open {
        #[command(flatten)]
        codec: CodecArgs,

        /// Cookie value (base64). If omitted, reads from stdin.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Show a cookie value's payload and tag as JSON without verifying it.
    Inspect {
        /// Keyed hash the token was sealed with.
        #[arg(short, long, default_value = "sha512")]
        algorithm: Algorithm,

        /// Tag layout: "raw" or "hex".
        #[arg(long, default_value = "raw")]
        tag_encoding: TagEncoding,

        /// Cookie value (base64). If omitted, reads from stdin.
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Generate a random secret and print it as hex.
    GenerateSecret {
        /// Secret length in bytes.
        #[arg(short, long, default_value_t = DEFAULT_SECRET_LEN)]
        length: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Seal { codec, payload } => cmd_seal(&codec, payload),
        Command::Open { codec, token } => cmd_open(&codec, token),
        Command::Inspect {
            algorithm,
            tag_encoding,
            token,
        } => cmd_inspect(algorithm, tag_encoding, token),
        Command::GenerateSecret { length } => cmd_generate_secret(length),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn cmd_seal(args: &CodecArgs, payload: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let codec = build_codec(args)?;
    let payload = match payload {
        Some(p) => p,
        None => read_stdin()?.trim_end_matches(['\r', '\n']).to_string(),
    };
    let token = codec.seal(payload.as_bytes());
    println!("{}", encode_token(&token));
    Ok(())
}

fn cmd_open(args: &CodecArgs, token: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let codec = build_codec(args)?;
    let value = read_input(token)?;
    let payload = decode_token(&value)
        .and_then(|token| codec.open(&token))
        .ok_or("session token rejected")?;
    println!("{}", String::from_utf8_lossy(&payload));
    Ok(())
}

fn cmd_inspect(
    algorithm: Algorithm,
    tag_encoding: TagEncoding,
    token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_input(token)?;
    let token = decode_token(&value).ok_or("could not decode token as base64")?;

    // Inspection never verifies, so any placeholder key will do.
    let config = CodecConfig::new(algorithm).with_tag_encoding(tag_encoding);
    let codec = SessionCodec::new(b"inspect", &config)?;
    let (payload, tag) = codec.split_token(&token).ok_or_else(|| {
        format!(
            "token is {} bytes, shorter than the {}-byte {algorithm} tag",
            token.len(),
            codec.tag_len()
        )
    })?;

    let output = serde_json::json!({
        "algorithm": algorithm,
        "tag_encoding": tag_encoding,
        "payload": String::from_utf8_lossy(payload),
        "payload_hex": hex::encode(payload),
        "tag_hex": hex::encode(tag),
        "payload_bytes": payload.len(),
        "total_bytes": token.len(),
        "verified": false,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_generate_secret(length: usize) -> Result<(), Box<dyn std::error::Error>> {
    let secret = generate_secret(length)?;
    println!("{}", secret.to_hex().as_str());
    Ok(())
}

/// Merge the config file (if any) with command-line overrides and build a codec.
fn build_codec(args: &CodecArgs) -> Result<SessionCodec, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(tag_encoding) = args.tag_encoding {
        config.tag_encoding = tag_encoding;
    }
    if args.tag_length.is_some() {
        config.tag_length = args.tag_length;
    }

    let secret = match &args.key {
        Some(path) => read_secret_file(path, args.hex_key)?,
        None => config.load_secret()?,
    };
    Ok(SessionCodec::new(secret.as_bytes(), &config.codec_config())?)
}

/// Read a token from a CLI argument or stdin, trimming surrounding whitespace.
fn read_input(arg: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match arg {
        Some(s) => Ok(s.trim().to_string()),
        None => Ok(read_stdin()?.trim().to_string()),
    }
}

fn read_stdin() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
