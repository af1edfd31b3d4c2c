// Copyright 2025 Irreducible Inc.

/// Error raised when a [`HashConfig`](crate::HashConfig) field is outside the bounds of its
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	#[error("digest size {size} is out of range 1..={max}")]
	InvalidDigestSize { size: usize, max: usize },
	#[error("key is {len} bytes long, at most {max} are allowed")]
	KeyTooLong { len: usize, max: usize },
	#[error("salt is {len} bytes long, at most {max} are allowed")]
	SaltTooLong { len: usize, max: usize },
	#[error("personalization is {len} bytes long, at most {max} are allowed")]
	PersonalizationTooLong { len: usize, max: usize },
	#[error("node offset {offset} does not fit the parameter block (max {max})")]
	NodeOffsetTooLarge { offset: u64, max: u64 },
}

/// Error raised when a hasher is used in a state that does not permit the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
	#[error("the hasher has already been finalized")]
	AlreadyFinalized,
}

/// Error raised when data does not fit the shape of a [`BinaryTree`](crate::BinaryTree).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
	#[error("leaf size must be nonzero")]
	ZeroLeafSize,
	#[error("leaf is {len} bytes long, at most {max} are allowed")]
	LeafTooLong { len: usize, max: usize },
	#[error("{leaves} leaves need {levels} levels but the tree depth is {depth}")]
	TreeTooDeep {
		leaves: usize,
		levels: usize,
		depth: u8,
	},
	#[error("invalid node configuration: {0}")]
	Config(#[from] ConfigError),
}
