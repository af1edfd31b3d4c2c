// Copyright (c) 2020-2025 The RustCrypto Project Developers
// Copyright 2025 Irreducible Inc.

// Implementation is adapted from <https://github.com/RustCrypto/hashes>, with some modifications.

//! [`digest`] trait implementations for the default (unkeyed, sequential) BLAKE2 instances.

use core::fmt;

use digest::{
	block_buffer::Lazy,
	core_api::{
		AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, CoreWrapper,
		CtVariableCoreWrapper, OutputSizeUser, TruncSide, UpdateCore, VariableOutputCore,
	},
	typenum::{IsLess, Le, NonZero, U16, U256, U32, U64},
	HashMarker, InvalidOutputSize, Output,
};

use crate::{
	compress::{compress, compress_last, counter_words, write_chaining_value},
	params::HashConfig,
	variant::{Blake2bVariant, Blake2sVariant, Variant, Word},
};

/// Lowest-level core hasher state of BLAKE2, generic over the output size.
#[derive(Clone)]
pub struct Blake2VarCore<V: Variant> {
	h: [V::Word; 8],
	count: u128,
}

pub type Blake2bCore<OutSize> = CtVariableCoreWrapper<Blake2VarCore<Blake2bVariant>, OutSize>;
pub type Blake2sCore<OutSize> = CtVariableCoreWrapper<Blake2VarCore<Blake2sVariant>, OutSize>;

/// BLAKE2b-512 hasher state.
pub type Blake2b512 = CoreWrapper<Blake2bCore<U64>>;
/// BLAKE2b-256 hasher state.
pub type Blake2b256 = CoreWrapper<Blake2bCore<U32>>;
/// BLAKE2s-256 hasher state.
pub type Blake2s256 = CoreWrapper<Blake2sCore<U32>>;
/// BLAKE2s-128 hasher state.
pub type Blake2s128 = CoreWrapper<Blake2sCore<U16>>;

impl<V: Variant> HashMarker for Blake2VarCore<V> {}

impl<V: Variant> BlockSizeUser for Blake2VarCore<V> {
	type BlockSize = V::BlockSize;
}

impl<V: Variant> BufferKindUser for Blake2VarCore<V> {
	// The lazy buffer never hands over the final block before finalization.
	type BufferKind = Lazy;
}

impl<V: Variant> UpdateCore for Blake2VarCore<V> {
	#[inline]
	fn update_blocks(&mut self, blocks: &[Block<Self>]) {
		for block in blocks {
			self.count = self.count.wrapping_add(V::BLOCK_BYTES as u128);
			let flags = [V::Word::ZERO; 2];
			self.h = compress::<V>(&self.h, block.as_slice(), counter_words::<V>(self.count), flags);
		}
	}
}

impl<V: Variant> OutputSizeUser for Blake2VarCore<V> {
	type OutputSize = V::OutputSize;
}

impl<V: Variant> VariableOutputCore for Blake2VarCore<V>
where
	V::BlockSize: IsLess<U256>,
	Le<V::BlockSize, U256>: NonZero,
{
	const TRUNC_SIDE: TruncSide = TruncSide::Left;

	#[inline]
	fn new(output_size: usize) -> Result<Self, InvalidOutputSize> {
		let params = HashConfig::<V>::new()
			.digest_size(output_size)
			.build()
			.map_err(|_| InvalidOutputSize)?;
		Ok(Self {
			h: params.initial_chaining_value(),
			count: 0,
		})
	}

	#[inline]
	fn finalize_variable_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
		let data = buffer.get_data();
		self.count = self.count.wrapping_add(data.len() as u128);
		self.h = compress_last::<V>(&self.h, data, self.count, false);
		write_chaining_value::<V>(&self.h, out);
	}
}

impl<V: Variant> AlgorithmName for Blake2VarCore<V> {
	#[inline]
	fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(V::NAME)
	}
}

impl<V: Variant> fmt::Debug for Blake2VarCore<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}VarCore {{ ... }}", V::NAME)
	}
}
