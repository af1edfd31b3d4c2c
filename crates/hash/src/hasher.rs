// Copyright 2025 Irreducible Inc.

//! Streaming BLAKE2 hasher.

use std::{cmp::min, fmt};

use tracing::trace;

use crate::{
	compress::{compress, compress_last, counter_words, write_chaining_value},
	error::{ConfigError, StateError},
	params::{HashConfig, ParameterBlock},
	variant::{Blake2bVariant, Blake2sVariant, Variant, Word},
};

/// Largest digest any variant produces.
const MAX_DIGEST_BYTES: usize = 64;

/// A finished BLAKE2 digest of between 1 and 64 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blake2Digest {
	bytes: [u8; MAX_DIGEST_BYTES],
	len: usize,
}

impl Blake2Digest {
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes[..self.len]
	}

	pub fn len(&self) -> usize {
		self.len
	}

	/// Always `false`: a digest holds at least one byte.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn to_hex(&self) -> String {
		hex::encode(self.as_bytes())
	}
}

impl AsRef<[u8]> for Blake2Digest {
	fn as_ref(&self) -> &[u8] {
		self.as_bytes()
	}
}

impl fmt::LowerHex for Blake2Digest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl fmt::Display for Blake2Digest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::LowerHex::fmt(self, f)
	}
}

impl fmt::Debug for Blake2Digest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Blake2Digest({self:x})")
	}
}

/// Incremental BLAKE2 hasher.
///
/// The hasher starts out ready to absorb input with [`Blake2::update`]. The first call to
/// [`Blake2::finalize`] pads and compresses the last block and moves the hasher into its
/// terminal state; later calls return the same digest and `update` is rejected.
///
/// One full block is always held back in the buffer until more input arrives, because the last
/// block of the message must be compressed with the last-block flag set.
#[derive(Clone)]
pub struct Blake2<V: Variant> {
	h: [V::Word; 8],
	/// Total number of bytes absorbed, key block included.
	count: u128,
	buffer: V::Block,
	/// Invariant: `buffer_len <= V::BLOCK_BYTES`.
	buffer_len: usize,
	digest_size: usize,
	last_node: bool,
	digest: Option<Blake2Digest>,
}

pub type Blake2b = Blake2<Blake2bVariant>;
pub type Blake2s = Blake2<Blake2sVariant>;

impl<V: Variant> Blake2<V> {
	/// Creates a hasher for a validated configuration.
	///
	/// A non-empty key is padded to a full block and absorbed before any message data.
	pub fn new(config: &HashConfig<V>) -> Result<Self, ConfigError> {
		let params = config.build()?;
		Ok(Self::from_params(config, &params))
	}

	fn from_params(config: &HashConfig<V>, params: &ParameterBlock<V>) -> Self {
		let mut hasher = Self {
			h: params.initial_chaining_value(),
			count: 0,
			buffer: V::ZERO_BLOCK,
			buffer_len: 0,
			digest_size: config.get_digest_size(),
			last_node: config.is_last_node(),
			digest: None,
		};

		let key = config.get_key();
		if !key.is_empty() {
			let mut key_block = V::ZERO_BLOCK;
			key_block.as_mut()[..key.len()].copy_from_slice(key);
			hasher.absorb(key_block.as_ref());
		}

		trace!(
			variant = V::NAME,
			digest_size = hasher.digest_size,
			keyed = !key.is_empty(),
			last_node = hasher.last_node,
			?params,
			"created BLAKE2 hasher"
		);

		hasher
	}

	/// Creates a hasher and absorbs `data` right after the key block.
	pub fn with_data(config: &HashConfig<V>, data: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
		let mut hasher = Self::new(config)?;
		hasher.absorb(data.as_ref());
		Ok(hasher)
	}

	pub fn digest_size(&self) -> usize {
		self.digest_size
	}

	pub fn is_finalized(&self) -> bool {
		self.digest.is_some()
	}

	/// Total number of bytes absorbed so far, including the padded key block.
	pub fn count(&self) -> u128 {
		self.count + self.buffer_len as u128
	}

	pub fn update(&mut self, data: impl AsRef<[u8]>) -> Result<(), StateError> {
		if self.is_finalized() {
			return Err(StateError::AlreadyFinalized);
		}
		self.absorb(data.as_ref());
		Ok(())
	}

	/// Like [`Blake2::update`], but consumes and returns the hasher for chaining.
	pub fn chain_update(mut self, data: impl AsRef<[u8]>) -> Result<Self, StateError> {
		self.update(data)?;
		Ok(self)
	}

	/// Finishes the hash and returns the digest.
	///
	/// Only the first call does any work; subsequent calls return the cached digest.
	pub fn finalize(&mut self) -> Blake2Digest {
		if let Some(digest) = self.digest {
			return digest;
		}

		self.count = self.count.wrapping_add(self.buffer_len as u128);
		let data = &self.buffer.as_ref()[..self.buffer_len];
		self.h = compress_last::<V>(&self.h, data, self.count, self.last_node);
		self.buffer = V::ZERO_BLOCK;
		self.buffer_len = 0;

		let mut full = [0u8; MAX_DIGEST_BYTES];
		write_chaining_value::<V>(&self.h, &mut full);
		let mut bytes = [0u8; MAX_DIGEST_BYTES];
		bytes[..self.digest_size].copy_from_slice(&full[..self.digest_size]);
		let digest = Blake2Digest {
			bytes,
			len: self.digest_size,
		};

		trace!(variant = V::NAME, count = self.count, "finalized BLAKE2 hasher");

		self.digest = Some(digest);
		digest
	}

	fn compress_block(&mut self, block: &[u8]) {
		self.count = self.count.wrapping_add(V::BLOCK_BYTES as u128);
		self.h = compress::<V>(&self.h, block, counter_words::<V>(self.count), [V::Word::ZERO; 2]);
	}

	fn absorb(&mut self, mut data: &[u8]) {
		while !data.is_empty() {
			// A full buffer is only compressed once there is more input behind it.
			if self.buffer_len == V::BLOCK_BYTES {
				let block = self.buffer;
				self.compress_block(block.as_ref());
				self.buffer_len = 0;
			}

			// Compress whole blocks straight from the input, keeping at least one byte back.
			if self.buffer_len == 0 {
				while data.len() > V::BLOCK_BYTES {
					let (block, rest) = data.split_at(V::BLOCK_BYTES);
					self.compress_block(block);
					data = rest;
				}
			}

			let take = min(V::BLOCK_BYTES - self.buffer_len, data.len());
			self.buffer.as_mut()[self.buffer_len..self.buffer_len + take]
				.copy_from_slice(&data[..take]);
			self.buffer_len += take;
			data = &data[take..];
		}
	}
}

impl<V: Variant> Default for Blake2<V> {
	fn default() -> Self {
		let config = HashConfig::default();
		Self::from_params(&config, &config.build_unchecked())
	}
}

impl<V: Variant> fmt::Debug for Blake2<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Blake2")
			.field("variant", &V::NAME)
			.field("digest_size", &self.digest_size)
			.field("count", &self.count())
			.field("finalized", &self.is_finalized())
			.finish_non_exhaustive()
	}
}

/// Computes the 64-byte BLAKE2b digest of `data`.
pub fn blake2b(data: impl AsRef<[u8]>) -> Blake2Digest {
	let mut hasher = Blake2b::default();
	hasher.absorb(data.as_ref());
	hasher.finalize()
}

/// Computes the 32-byte BLAKE2s digest of `data`.
pub fn blake2s(data: impl AsRef<[u8]>) -> Blake2Digest {
	let mut hasher = Blake2s::default();
	hasher.absorb(data.as_ref());
	hasher.finalize()
}
