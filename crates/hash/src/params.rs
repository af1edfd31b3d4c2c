// Copyright 2025 Irreducible Inc.

//! Hash configuration and its serialization into the BLAKE2 parameter block.

use std::{fmt, marker::PhantomData};

use crate::{
	error::ConfigError,
	hasher::Blake2,
	variant::{words_from_le, Blake2bVariant, Blake2sVariant, Variant},
};

/// Configuration of a BLAKE2 hash instance.
///
/// The configuration is a plain builder; nothing is validated until it is turned into a
/// [`ParameterBlock`] or a [`Blake2`] hasher. Defaults correspond to sequential, unkeyed hashing
/// with the variant's maximum digest size.
#[derive(Clone, PartialEq, Eq)]
pub struct HashConfig<V: Variant> {
	digest_size: usize,
	key: Vec<u8>,
	salt: Vec<u8>,
	personal: Vec<u8>,
	fanout: u8,
	depth: u8,
	leaf_size: u32,
	node_offset: u64,
	node_depth: u8,
	inner_size: u8,
	last_node: bool,
	_marker: PhantomData<V>,
}

pub type Blake2bConfig = HashConfig<Blake2bVariant>;
pub type Blake2sConfig = HashConfig<Blake2sVariant>;

impl<V: Variant> Default for HashConfig<V> {
	fn default() -> Self {
		Self {
			digest_size: V::OUT_BYTES,
			key: Vec::new(),
			salt: Vec::new(),
			personal: Vec::new(),
			fanout: 1,
			depth: 1,
			leaf_size: 0,
			node_offset: 0,
			node_depth: 0,
			inner_size: 0,
			last_node: false,
			_marker: PhantomData,
		}
	}
}

impl<V: Variant> HashConfig<V> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn digest_size(mut self, digest_size: usize) -> Self {
		self.digest_size = digest_size;
		self
	}

	pub fn key(mut self, key: impl AsRef<[u8]>) -> Self {
		self.key = key.as_ref().to_vec();
		self
	}

	pub fn salt(mut self, salt: impl AsRef<[u8]>) -> Self {
		self.salt = salt.as_ref().to_vec();
		self
	}

	pub fn personal(mut self, personal: impl AsRef<[u8]>) -> Self {
		self.personal = personal.as_ref().to_vec();
		self
	}

	pub fn fanout(mut self, fanout: u8) -> Self {
		self.fanout = fanout;
		self
	}

	pub fn depth(mut self, depth: u8) -> Self {
		self.depth = depth;
		self
	}

	pub fn leaf_size(mut self, leaf_size: u32) -> Self {
		self.leaf_size = leaf_size;
		self
	}

	pub fn node_offset(mut self, node_offset: u64) -> Self {
		self.node_offset = node_offset;
		self
	}

	pub fn node_depth(mut self, node_depth: u8) -> Self {
		self.node_depth = node_depth;
		self
	}

	pub fn inner_size(mut self, inner_size: u8) -> Self {
		self.inner_size = inner_size;
		self
	}

	/// Marks the hashed node as the last one of its level in tree mode.
	pub fn last_node(mut self, last_node: bool) -> Self {
		self.last_node = last_node;
		self
	}

	pub fn get_digest_size(&self) -> usize {
		self.digest_size
	}

	pub fn get_key(&self) -> &[u8] {
		&self.key
	}

	pub fn is_last_node(&self) -> bool {
		self.last_node
	}

	/// Checks every field against the bounds of the variant.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.digest_size == 0 || self.digest_size > V::OUT_BYTES {
			return Err(ConfigError::InvalidDigestSize {
				size: self.digest_size,
				max: V::OUT_BYTES,
			});
		}
		if self.key.len() > V::KEY_BYTES {
			return Err(ConfigError::KeyTooLong {
				len: self.key.len(),
				max: V::KEY_BYTES,
			});
		}
		if self.salt.len() > V::SALT_BYTES {
			return Err(ConfigError::SaltTooLong {
				len: self.salt.len(),
				max: V::SALT_BYTES,
			});
		}
		if self.personal.len() > V::PERSONAL_BYTES {
			return Err(ConfigError::PersonalizationTooLong {
				len: self.personal.len(),
				max: V::PERSONAL_BYTES,
			});
		}
		if self.node_offset > V::MAX_NODE_OFFSET {
			return Err(ConfigError::NodeOffsetTooLarge {
				offset: self.node_offset,
				max: V::MAX_NODE_OFFSET,
			});
		}
		Ok(())
	}

	/// Validates the configuration and serializes it into a parameter block.
	pub fn build(&self) -> Result<ParameterBlock<V>, ConfigError> {
		self.validate()?;
		Ok(self.build_unchecked())
	}

	/// Serializes the configuration without validating it first.
	///
	/// Callers must only pass configurations that are known to be within bounds, such as the
	/// default one.
	pub(crate) fn build_unchecked(&self) -> ParameterBlock<V> {
		let mut bytes = V::ZERO_PARAMS;
		write_param_bytes::<V>(self, bytes.as_mut());
		ParameterBlock { bytes }
	}

	/// Validates the configuration and constructs a hasher from it.
	pub fn to_hasher(&self) -> Result<Blake2<V>, ConfigError> {
		Blake2::new(self)
	}
}

impl<V: Variant> fmt::Debug for HashConfig<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HashConfig")
			.field("variant", &V::NAME)
			.field("digest_size", &self.digest_size)
			.field("key_length", &self.key.len())
			.field("salt", &self.salt)
			.field("personal", &self.personal)
			.field("fanout", &self.fanout)
			.field("depth", &self.depth)
			.field("leaf_size", &self.leaf_size)
			.field("node_offset", &self.node_offset)
			.field("node_depth", &self.node_depth)
			.field("inner_size", &self.inner_size)
			.field("last_node", &self.last_node)
			.finish()
	}
}

/// Writes the little-endian parameter block layout into a zeroed `out`.
///
/// | offset     | field                        |
/// |------------|------------------------------|
/// | 0          | digest size                  |
/// | 1          | key length                   |
/// | 2          | fanout                       |
/// | 3          | depth                        |
/// | 4..8       | leaf size                    |
/// | 8..8+N     | node offset (N bytes)        |
/// | 8+N        | node depth                   |
/// | 9+N        | inner size                   |
/// | ..         | reserved, zero               |
/// | P-S-R..P-R | salt, zero padded            |
/// | P-R..P     | personalization, zero padded |
///
/// `N`, `P`, `S` and `R` are the node offset width, parameter block size, salt size and
/// personalization size of the variant.
fn write_param_bytes<V: Variant>(config: &HashConfig<V>, out: &mut [u8]) {
	let node_offset_end = 8 + V::NODE_OFFSET_BYTES;
	let personal_start = V::PARAM_BYTES - V::PERSONAL_BYTES;
	let salt_start = personal_start - V::SALT_BYTES;

	// Lengths are bounded by `validate`, so the casts cannot truncate.
	out[0] = config.digest_size as u8;
	out[1] = config.key.len() as u8;
	out[2] = config.fanout;
	out[3] = config.depth;
	out[4..8].copy_from_slice(&config.leaf_size.to_le_bytes());
	out[8..node_offset_end]
		.copy_from_slice(&config.node_offset.to_le_bytes()[..V::NODE_OFFSET_BYTES]);
	out[node_offset_end] = config.node_depth;
	out[node_offset_end + 1] = config.inner_size;
	out[salt_start..salt_start + config.salt.len()].copy_from_slice(&config.salt);
	out[personal_start..personal_start + config.personal.len()].copy_from_slice(&config.personal);
}

/// The serialized parameter block of a validated [`HashConfig`].
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ParameterBlock<V: Variant> {
	bytes: V::ParamBytes,
}

impl<V: Variant> ParameterBlock<V> {
	pub fn as_bytes(&self) -> &[u8] {
		self.bytes.as_ref()
	}

	/// The parameter block read as eight little-endian words.
	pub fn words(&self) -> [V::Word; 8] {
		words_from_le(self.bytes.as_ref())
	}

	/// The chaining value a hasher starts from: the IV XORed with the parameter words.
	pub fn initial_chaining_value(&self) -> [V::Word; 8] {
		let words = self.words();
		std::array::from_fn(|i| V::IV[i] ^ words[i])
	}
}

impl<V: Variant> fmt::Debug for ParameterBlock<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ParameterBlock")
			.field(&hex::encode(self.as_bytes()))
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use hex_literal::hex;

	use super::*;

	#[test]
	fn test_default_blake2b_block() {
		let block = Blake2bConfig::new().build().unwrap();
		let mut expected = [0u8; 64];
		expected[..4].copy_from_slice(&[64, 0, 1, 1]);
		assert_eq!(block.as_bytes(), &expected[..]);
		assert_eq!(block.words()[0], 0x0101_0040);
		assert!(block.words()[1..].iter().all(|&w| w == 0));
	}

	#[test]
	fn test_default_blake2s_block() {
		let block = Blake2sConfig::new().build().unwrap();
		assert_eq!(block.words(), [0x0101_0020, 0, 0, 0, 0, 0, 0, 0]);
		assert_eq!(block.initial_chaining_value()[0], 0x6a09e667 ^ 0x0101_0020);
	}

	#[test]
	fn test_blake2b_full_layout() {
		let block = Blake2bConfig::new()
			.digest_size(32)
			.key([0xaa; 5])
			.fanout(2)
			.depth(3)
			.leaf_size(0x0403_0201)
			.node_offset(0x0c0b_0a09_0807_0605)
			.node_depth(7)
			.inner_size(32)
			.salt(b"salt")
			.personal(b"personalization!")
			.build()
			.unwrap();

		let expected = hex!(
			"20 05 02 03 01020304 05060708090a0b0c 07 20 0000000000000000000000000000"
			"73616c74000000000000000000000000"
			"706572736f6e616c697a6174696f6e21"
		);
		assert_eq!(block.as_bytes(), &expected[..]);
	}

	#[test]
	fn test_blake2s_full_layout() {
		let block = Blake2sConfig::new()
			.digest_size(16)
			.key([0xaa; 32])
			.fanout(4)
			.depth(2)
			.leaf_size(4096)
			.node_offset(0x0605_0403_0201)
			.node_depth(1)
			.inner_size(16)
			.salt(b"sodium")
			.personal(b"persona!")
			.build()
			.unwrap();

		let expected = hex!(
			"10 20 04 02 00100000 010203040506 01 10"
			"736f6469756d0000"
			"706572736f6e6121"
		);
		assert_eq!(block.as_bytes(), &expected[..]);
	}

	#[test]
	fn test_words_are_little_endian() {
		let block = Blake2sConfig::new()
			.leaf_size(0xdead_beef)
			.build()
			.unwrap();
		assert_eq!(block.words()[1], 0xdead_beef);

		let block = Blake2bConfig::new()
			.leaf_size(0xdead_beef)
			.build()
			.unwrap();
		assert_eq!(block.words()[0], 0xdead_beef_0101_0040);
	}

	#[test]
	fn test_digest_size_bounds() {
		assert!(Blake2bConfig::new().digest_size(1).build().is_ok());
		assert!(Blake2bConfig::new().digest_size(64).build().is_ok());
		assert!(Blake2sConfig::new().digest_size(32).build().is_ok());

		assert_matches!(
			Blake2bConfig::new().digest_size(0).build(),
			Err(ConfigError::InvalidDigestSize { size: 0, max: 64 })
		);
		assert_matches!(
			Blake2bConfig::new().digest_size(65).build(),
			Err(ConfigError::InvalidDigestSize { size: 65, max: 64 })
		);
		assert_matches!(
			Blake2sConfig::new().digest_size(33).build(),
			Err(ConfigError::InvalidDigestSize { size: 33, max: 32 })
		);
	}

	#[test]
	fn test_length_bounds() {
		assert!(Blake2sConfig::new().key([0; 32]).build().is_ok());
		assert_matches!(
			Blake2sConfig::new().key([0; 33]).build(),
			Err(ConfigError::KeyTooLong { len: 33, max: 32 })
		);
		assert_matches!(
			Blake2bConfig::new().key([0; 65]).build(),
			Err(ConfigError::KeyTooLong { len: 65, max: 64 })
		);
		assert_matches!(
			Blake2sConfig::new().salt([0; 9]).build(),
			Err(ConfigError::SaltTooLong { len: 9, max: 8 })
		);
		assert_matches!(
			Blake2bConfig::new().personal([0; 17]).build(),
			Err(ConfigError::PersonalizationTooLong { len: 17, max: 16 })
		);
	}

	#[test]
	fn test_node_offset_bounds() {
		assert!(Blake2bConfig::new().node_offset(u64::MAX).build().is_ok());
		assert!(Blake2sConfig::new().node_offset((1 << 48) - 1).build().is_ok());
		assert_matches!(
			Blake2sConfig::new().node_offset(1 << 48).build(),
			Err(ConfigError::NodeOffsetTooLarge { offset, .. }) if offset == 1 << 48
		);
	}

	#[test]
	fn test_debug_hides_key() {
		let config = Blake2sConfig::new().key(b"hunter2");
		let debug = format!("{config:?}");
		assert!(debug.contains("key_length: 7"));
		assert!(!debug.contains("104, 117"));
	}
}
