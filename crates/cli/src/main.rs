// Copyright 2025 Irreducible Inc.

//! Hashes a hex-encoded message with BLAKE2 and prints the hex digest.
//!
//! ```text
//! $ blake2-hash 616263
//! 508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982
//! ```

use anyhow::{Context, Result};
use blake2_hash::{Blake2, Blake2bVariant, Blake2sVariant, HashConfig, Variant};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
	/// BLAKE2b, 64-bit words.
	B,
	/// BLAKE2s, 32-bit words.
	S,
}

#[derive(Debug, Parser)]
#[command(about = "Hash a hex-encoded message with BLAKE2")]
struct Args {
	/// The message to hash, hex encoded.
	message: String,
	#[arg(short, long, value_enum, default_value_t = VariantArg::S)]
	variant: VariantArg,
	/// Digest size in bytes. Defaults to the maximum of the variant.
	#[arg(short, long)]
	digest_size: Option<usize>,
	/// Hex-encoded key for keyed hashing.
	#[arg(short, long, default_value = "")]
	key: String,
	/// Hex-encoded salt.
	#[arg(long, default_value = "")]
	salt: String,
	/// Hex-encoded personalization string.
	#[arg(long, default_value = "")]
	personal: String,
	#[arg(long, default_value_t = 1)]
	fanout: u8,
	#[arg(long, default_value_t = 1)]
	depth: u8,
	#[arg(long, default_value_t = 0)]
	leaf_size: u32,
	#[arg(long, default_value_t = 0)]
	node_offset: u64,
	#[arg(long, default_value_t = 0)]
	node_depth: u8,
	#[arg(long, default_value_t = 0)]
	inner_size: u8,
	/// Marks the hashed node as the last of its level in tree mode.
	#[arg(long)]
	last_node: bool,
}

fn decode_hex(name: &str, value: &str) -> Result<Vec<u8>> {
	hex::decode(value).with_context(|| format!("{name} is not valid hex: {value:?}"))
}

fn hash_message<V: Variant>(args: &Args) -> Result<String> {
	let mut config = HashConfig::<V>::new()
		.key(decode_hex("key", &args.key)?)
		.salt(decode_hex("salt", &args.salt)?)
		.personal(decode_hex("personal", &args.personal)?)
		.fanout(args.fanout)
		.depth(args.depth)
		.leaf_size(args.leaf_size)
		.node_offset(args.node_offset)
		.node_depth(args.node_depth)
		.inner_size(args.inner_size)
		.last_node(args.last_node);
	if let Some(digest_size) = args.digest_size {
		config = config.digest_size(digest_size);
	}

	let message = decode_hex("message", &args.message)?;
	debug!(variant = V::NAME, message_len = message.len(), ?config, "hashing message");

	let mut hasher = Blake2::<V>::with_data(&config, &message)
		.with_context(|| format!("invalid {} configuration", V::NAME))?;
	Ok(hasher.finalize().to_hex())
}

fn run(args: &Args) -> Result<String> {
	match args.variant {
		VariantArg::B => hash_message::<Blake2bVariant>(args),
		VariantArg::S => hash_message::<Blake2sVariant>(args),
	}
}

fn init_tracing() {
	let _ = tracing_subscriber::registry()
		.with(fmt::layer().with_writer(std::io::stderr))
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.try_init();
}

fn main() -> Result<()> {
	init_tracing();

	let args = Args::parse();
	println!("{}", run(&args)?);
	Ok(())
}
