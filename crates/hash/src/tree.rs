// Copyright 2025 Irreducible Inc.

//! Binary hash trees built from BLAKE2 tree-mode nodes.
//!
//! Every node is an ordinary BLAKE2 hash whose parameter block records its place in the tree:
//! fanout 2, the tree depth, the leaf size, the offset of the node within its level, the node
//! depth (0 for leaves) and the inner digest size. The last node of each level, the root
//! included, is hashed with the last-node flag. A parent with a single child hashes that child's
//! digest alone.

use tracing::trace;

use crate::{
	error::TreeError,
	hasher::{Blake2, Blake2Digest},
	params::HashConfig,
	variant::{Blake2bVariant, Blake2sVariant, Variant},
};

/// Shape and key shared by every node of a binary BLAKE2 tree.
#[derive(Debug, Clone)]
pub struct BinaryTree<V: Variant> {
	config: HashConfig<V>,
	depth: u8,
	leaf_size: u32,
}

pub type Blake2bTree = BinaryTree<Blake2bVariant>;
pub type Blake2sTree = BinaryTree<Blake2sVariant>;

impl<V: Variant> BinaryTree<V> {
	/// Creates a tree of at most `depth` levels over leaves of at most `leaf_size` bytes.
	///
	/// `digest_size` is both the size of the root digest and of every inner digest.
	pub fn new(depth: u8, leaf_size: u32, digest_size: usize) -> Result<Self, TreeError> {
		if leaf_size == 0 {
			return Err(TreeError::ZeroLeafSize);
		}
		let config = HashConfig::new()
			.digest_size(digest_size)
			.fanout(2)
			.depth(depth)
			.leaf_size(leaf_size)
			.inner_size(digest_size as u8);
		config.validate()?;
		Ok(Self {
			config,
			depth,
			leaf_size,
		})
	}

	/// Keys every node of the tree.
	pub fn with_key(mut self, key: impl AsRef<[u8]>) -> Result<Self, TreeError> {
		self.config = self.config.key(key);
		self.config.validate()?;
		Ok(self)
	}

	fn node(&self, node_offset: u64, node_depth: u8, last_node: bool) -> HashConfig<V> {
		self.config
			.clone()
			.node_offset(node_offset)
			.node_depth(node_depth)
			.last_node(last_node)
	}

	/// Hashes the leaf at `node_offset`.
	pub fn hash_leaf(
		&self,
		node_offset: u64,
		data: &[u8],
		last_node: bool,
	) -> Result<Blake2Digest, TreeError> {
		let max = self.leaf_size as usize;
		if data.len() > max {
			return Err(TreeError::LeafTooLong {
				len: data.len(),
				max,
			});
		}
		Ok(Blake2::with_data(&self.node(node_offset, 0, last_node), data)?.finalize())
	}

	/// Hashes the concatenated digests of `children` into their parent at `node_depth`.
	pub fn hash_parent(
		&self,
		node_offset: u64,
		node_depth: u8,
		children: &[Blake2Digest],
		last_node: bool,
	) -> Result<Blake2Digest, TreeError> {
		let data: Vec<u8> = children
			.iter()
			.flat_map(|child| child.as_bytes())
			.copied()
			.collect();
		Ok(Blake2::with_data(&self.node(node_offset, node_depth, last_node), data)?.finalize())
	}

	/// Hashes `data` split into leaves of `leaf_size` bytes and returns the root digest.
	///
	/// Empty data is hashed as a single empty leaf, which is then also the root.
	pub fn hash(&self, data: &[u8]) -> Result<Blake2Digest, TreeError> {
		let leaf_size = self.leaf_size as usize;
		let leaves = data.len().div_ceil(leaf_size).max(1);
		let levels = 1 + leaves.next_power_of_two().trailing_zeros() as usize;
		if levels > self.depth as usize {
			return Err(TreeError::TreeTooDeep {
				leaves,
				levels,
				depth: self.depth,
			});
		}

		let mut level = if data.is_empty() {
			vec![self.hash_leaf(0, data, true)?]
		} else {
			data.chunks(leaf_size)
				.enumerate()
				.map(|(i, leaf)| self.hash_leaf(i as u64, leaf, i + 1 == leaves))
				.collect::<Result<Vec<_>, _>>()?
		};

		let mut node_depth = 0;
		while level.len() > 1 {
			node_depth += 1;
			let parents = level.len().div_ceil(2);
			level = level
				.chunks(2)
				.enumerate()
				.map(|(i, children)| {
					self.hash_parent(i as u64, node_depth, children, i + 1 == parents)
				})
				.collect::<Result<Vec<_>, _>>()?;
		}

		trace!(variant = V::NAME, leaves, levels, "hashed BLAKE2 tree");
		Ok(level[0])
	}
}
