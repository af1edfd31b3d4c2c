// Copyright 2025 Irreducible Inc.

//! The BLAKE2 compression function, generic over the word width.

use crate::variant::{words_from_le, Variant, Word, SIGMA};

/// Indices into the working vector mixed by each G invocation of a round: four columns, then
/// four diagonals.
const MIX_SCHEDULE: [[usize; 4]; 8] = [
	[0, 4, 8, 12],
	[1, 5, 9, 13],
	[2, 6, 10, 14],
	[3, 7, 11, 15],
	[0, 5, 10, 15],
	[1, 6, 11, 12],
	[2, 7, 8, 13],
	[3, 4, 9, 14],
];

#[inline(always)]
fn g<V: Variant>(v: &mut [V::Word; 16], [a, b, c, d]: [usize; 4], x: V::Word, y: V::Word) {
	let [r1, r2, r3, r4] = V::ROTATIONS;
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
	v[d] = (v[d] ^ v[a]).rotate_right(r1);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(r2);
	v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
	v[d] = (v[d] ^ v[a]).rotate_right(r3);
	v[c] = v[c].wrapping_add(v[d]);
	v[b] = (v[b] ^ v[c]).rotate_right(r4);
}

/// Compresses one message block into the chaining value `h`.
///
/// `block` must be exactly `V::BLOCK_BYTES` long. `counter` holds the low and high words of the
/// total byte count including this block, and `flags` the last-block and last-node flags, each
/// either zero or all ones.
pub fn compress<V: Variant>(
	h: &[V::Word; 8],
	block: &[u8],
	counter: [V::Word; 2],
	flags: [V::Word; 2],
) -> [V::Word; 8] {
	debug_assert_eq!(block.len(), V::BLOCK_BYTES);

	let m: [V::Word; 16] = words_from_le(block);

	let mut v = [V::Word::ZERO; 16];
	v[..8].copy_from_slice(h);
	v[8..].copy_from_slice(&V::IV);
	v[12] ^= counter[0];
	v[13] ^= counter[1];
	v[14] ^= flags[0];
	v[15] ^= flags[1];

	for sigma in &SIGMA[..V::ROUNDS] {
		for (i, &quad) in MIX_SCHEDULE.iter().enumerate() {
			g::<V>(&mut v, quad, m[sigma[2 * i]], m[sigma[2 * i + 1]]);
		}
	}

	std::array::from_fn(|i| h[i] ^ v[i] ^ v[i + 8])
}

/// Splits the total byte count into the low and high counter words.
pub fn counter_words<V: Variant>(count: u128) -> [V::Word; 2] {
	[
		V::Word::truncate_u128(count),
		V::Word::truncate_u128(count >> <V::Word as Word>::BITS),
	]
}

/// Zero-pads the trailing `data` of a message and compresses it as the last block.
///
/// `count` is the total byte count including `data`. The last-node flag is set only when
/// `last_node` is true.
pub fn compress_last<V: Variant>(
	h: &[V::Word; 8],
	data: &[u8],
	count: u128,
	last_node: bool,
) -> [V::Word; 8] {
	let mut block = V::ZERO_BLOCK;
	block.as_mut()[..data.len()].copy_from_slice(data);
	let flags = [
		V::Word::MAX,
		if last_node {
			V::Word::MAX
		} else {
			V::Word::ZERO
		},
	];
	compress::<V>(h, block.as_ref(), counter_words::<V>(count), flags)
}

/// Serializes the chaining value little-endian into `out`, stopping at whichever ends first.
pub fn write_chaining_value<V: Variant>(h: &[V::Word; 8], out: &mut [u8]) {
	for (word, chunk) in h.iter().zip(out.chunks_exact_mut(<V::Word as Word>::BYTES)) {
		word.write_le(chunk);
	}
}
