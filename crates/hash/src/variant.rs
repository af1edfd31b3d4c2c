// Copyright 2025 Irreducible Inc.

//! Static descriptors for the two BLAKE2 word widths.

use std::{
	fmt::Debug,
	ops::{BitXor, BitXorAssign},
};

use digest::{
	generic_array::ArrayLength,
	typenum::{U128, U32, U64},
};

/// A machine word the BLAKE2 mixing network operates on.
pub trait Word:
	Copy + Eq + Debug + Default + BitXor<Output = Self> + BitXorAssign + Send + Sync + 'static
{
	const BITS: u32;
	const BYTES: usize;
	const ZERO: Self;
	const MAX: Self;

	fn wrapping_add(self, rhs: Self) -> Self;
	fn rotate_right(self, n: u32) -> Self;

	/// Reads a word from exactly `Self::BYTES` little-endian bytes.
	fn from_le_slice(bytes: &[u8]) -> Self;

	/// Writes the word into exactly `Self::BYTES` bytes, little-endian.
	fn write_le(self, out: &mut [u8]);

	/// Returns the low `Self::BITS` bits of `value`.
	fn truncate_u128(value: u128) -> Self;
}

macro_rules! impl_word {
	($t:ty) => {
		impl Word for $t {
			const BITS: u32 = <$t>::BITS;
			const BYTES: usize = std::mem::size_of::<$t>();
			const ZERO: Self = 0;
			const MAX: Self = <$t>::MAX;

			#[inline(always)]
			fn wrapping_add(self, rhs: Self) -> Self {
				<$t>::wrapping_add(self, rhs)
			}

			#[inline(always)]
			fn rotate_right(self, n: u32) -> Self {
				<$t>::rotate_right(self, n)
			}

			#[inline(always)]
			fn from_le_slice(bytes: &[u8]) -> Self {
				let mut buf = [0u8; std::mem::size_of::<$t>()];
				buf.copy_from_slice(bytes);
				<$t>::from_le_bytes(buf)
			}

			#[inline(always)]
			fn write_le(self, out: &mut [u8]) {
				out.copy_from_slice(&self.to_le_bytes());
			}

			#[inline(always)]
			fn truncate_u128(value: u128) -> Self {
				value as $t
			}
		}
	};
}

impl_word!(u32);
impl_word!(u64);

/// Reads `N` consecutive little-endian words from the front of `bytes`.
#[inline]
pub fn words_from_le<W: Word, const N: usize>(bytes: &[u8]) -> [W; N] {
	std::array::from_fn(|i| W::from_le_slice(&bytes[i * W::BYTES..(i + 1) * W::BYTES]))
}

/// Message word schedule.
///
/// Twelve rows are stored so that BLAKE2b can index by round directly. Rows 10 and 11 repeat
/// rows 0 and 1; BLAKE2s only reads the first ten.
pub const SIGMA: [[usize; 16]; 12] = [
	[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
	[14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
	[11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
	[7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
	[9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
	[2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
	[12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
	[13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
	[6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
	[10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
	[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
	[14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

/// Compile-time description of one BLAKE2 instantiation.
///
/// Implementors are zero-sized markers; every property is an associated constant, so the
/// descriptor tables are shared read-only between all hasher instances.
pub trait Variant: Copy + Debug + Default + Send + Sync + 'static {
	type Word: Word;

	/// One message block, `BLOCK_BYTES` long.
	type Block: AsRef<[u8]> + AsMut<[u8]> + Copy + Eq + Debug + Send + Sync;

	/// The serialized parameter block, eight words long.
	type ParamBytes: AsRef<[u8]> + AsMut<[u8]> + Copy + Eq + Debug + Send + Sync;

	/// Block size as a type-level integer, for the `digest` trait adapter.
	type BlockSize: ArrayLength<u8> + 'static;

	/// Maximum output size as a type-level integer, for the `digest` trait adapter.
	type OutputSize: ArrayLength<u8> + 'static;

	const NAME: &'static str;
	const ROUNDS: usize;
	const BLOCK_BYTES: usize;
	const OUT_BYTES: usize;
	const KEY_BYTES: usize;
	const SALT_BYTES: usize;
	const PERSONAL_BYTES: usize;

	/// Width of the node offset field in the parameter block.
	const NODE_OFFSET_BYTES: usize;

	/// Rotation amounts `R1..R4` of the mixing function.
	const ROTATIONS: [u32; 4];
	const IV: [Self::Word; 8];

	const ZERO_BLOCK: Self::Block;
	const ZERO_PARAMS: Self::ParamBytes;

	/// Size of the serialized parameter block.
	const PARAM_BYTES: usize = 8 * <Self::Word as Word>::BYTES;

	/// Largest node offset representable in `NODE_OFFSET_BYTES`.
	const MAX_NODE_OFFSET: u64 = if Self::NODE_OFFSET_BYTES >= 8 {
		u64::MAX
	} else {
		(1u64 << (8 * Self::NODE_OFFSET_BYTES)) - 1
	};
}

/// BLAKE2b: 64-bit words, 12 rounds, digests of up to 64 bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Blake2bVariant;

impl Variant for Blake2bVariant {
	type Word = u64;
	type Block = [u8; 128];
	type ParamBytes = [u8; 64];
	type BlockSize = U128;
	type OutputSize = U64;

	const NAME: &'static str = "BLAKE2b";
	const ROUNDS: usize = 12;
	const BLOCK_BYTES: usize = 128;
	const OUT_BYTES: usize = 64;
	const KEY_BYTES: usize = 64;
	const SALT_BYTES: usize = 16;
	const PERSONAL_BYTES: usize = 16;
	const NODE_OFFSET_BYTES: usize = 8;
	const ROTATIONS: [u32; 4] = [32, 24, 16, 63];
	const IV: [u64; 8] = [
		0x6a09e667f3bcc908,
		0xbb67ae8584caa73b,
		0x3c6ef372fe94f82b,
		0xa54ff53a5f1d36f1,
		0x510e527fade682d1,
		0x9b05688c2b3e6c1f,
		0x1f83d9abfb41bd6b,
		0x5be0cd19137e2179,
	];
	const ZERO_BLOCK: [u8; 128] = [0; 128];
	const ZERO_PARAMS: [u8; 64] = [0; 64];
}

/// BLAKE2s: 32-bit words, 10 rounds, digests of up to 32 bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Blake2sVariant;

impl Variant for Blake2sVariant {
	type Word = u32;
	type Block = [u8; 64];
	type ParamBytes = [u8; 32];
	type BlockSize = U64;
	type OutputSize = U32;

	const NAME: &'static str = "BLAKE2s";
	const ROUNDS: usize = 10;
	const BLOCK_BYTES: usize = 64;
	const OUT_BYTES: usize = 32;
	const KEY_BYTES: usize = 32;
	const SALT_BYTES: usize = 8;
	const PERSONAL_BYTES: usize = 8;
	const NODE_OFFSET_BYTES: usize = 6;
	const ROTATIONS: [u32; 4] = [16, 12, 8, 7];
	const IV: [u32; 8] = [
		0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
		0x5be0cd19,
	];
	const ZERO_BLOCK: [u8; 64] = [0; 64];
	const ZERO_PARAMS: [u8; 32] = [0; 32];
}
