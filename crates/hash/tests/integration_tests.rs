// Copyright 2025 Irreducible Inc.

use blake2_hash::{
	blake2b, blake2s, Blake2b, Blake2bConfig, Blake2s, Blake2sConfig, ConfigError, StateError,
};
use hex_literal::hex;

#[test]
fn test_empty_input() {
	let expected = hex!(
		"786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419"
		"d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
	);
	assert_eq!(blake2b(b"").as_bytes(), expected);

	let expected = hex!("69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9");
	assert_eq!(blake2s(b"").as_bytes(), expected);

	let hasher = Blake2b::new(&Blake2bConfig::new().digest_size(32));
	let expected = hex!("0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8");
	assert_eq!(hasher.unwrap().finalize().as_bytes(), expected);
}

#[test]
fn test_abc() {
	let expected = hex!(
		"ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1"
		"7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
	);
	assert_eq!(blake2b(b"abc").as_bytes(), expected);

	let expected = hex!("508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982");
	assert_eq!(blake2s(b"abc").as_bytes(), expected);
}

#[test]
fn test_simple_sentence() {
	let mut hasher = Blake2b::default();
	hasher
		.update("The quick brown fox jumps over the lazy dog".as_bytes())
		.unwrap();
	let expected = hex!(
		"a8add4bdddfd93e4877d2746e62817b116364a1fa7bc148d95090bc7333b3673"
		"f82401cf7aa2e4cb1ecd90296e3f14cb5413f8ed77be73045b13914cdcd6a918"
	);
	assert_eq!(hasher.finalize().as_bytes(), expected);

	let mut hasher = Blake2s::default();
	hasher.update("The quick brown fox jumps".as_bytes()).unwrap();
	hasher.update(" over the lazy dog".as_bytes()).unwrap();
	assert_eq!(
		hasher.finalize().to_hex(),
		"606beeec743ccbeff6cbcdf5d5302aa855c256c29b88c8ed331ea1a6bf3c8812"
	);
}

// First entries of the keyed known-answer tests published with the reference implementation:
// key = 00 01 02 .., message empty.
#[test]
fn test_keyed_known_answers() {
	let key: Vec<u8> = (0..64).collect();
	let digest = Blake2b::new(&Blake2bConfig::new().key(&key))
		.unwrap()
		.finalize();
	let expected = hex!(
		"10ebb67700b1868efb4417987acf4690ae9d972fb7a590c2f02871799aaa4786"
		"b5e996e8f0f4eb981fc214b005f42d2ff4233499391653df7aefcbc13fc51568"
	);
	assert_eq!(digest.as_bytes(), expected);

	let digest = Blake2s::new(&Blake2sConfig::new().key(&key[..32]))
		.unwrap()
		.finalize();
	let expected = hex!("48a8997da407876b3d79c0d92325ad3b89cbb754d86ab71aee047ad345fd2c49");
	assert_eq!(digest.as_bytes(), expected);
}

#[test]
fn test_block_multiples() {
	// Lengths around one and two blocks must all be distinct and independent of chunking.
	for len in [0usize, 128, 256, 129, 257] {
		let data = vec![0x5a; len];
		let one_shot = blake2b(&data);

		let mut hasher = Blake2b::default();
		for byte in &data {
			hasher.update([*byte]).unwrap();
		}
		assert_eq!(hasher.finalize(), one_shot, "len {len}");
	}

	let digests: Vec<_> = [0usize, 64, 128, 65, 129]
		.into_iter()
		.map(|len| blake2s(vec![0x5a; len]))
		.collect();
	for (i, a) in digests.iter().enumerate() {
		for b in &digests[i + 1..] {
			assert_ne!(a, b);
		}
	}
}

#[test]
fn test_errors() {
	assert_eq!(
		Blake2s::new(&Blake2sConfig::new().digest_size(0)).unwrap_err(),
		ConfigError::InvalidDigestSize { size: 0, max: 32 }
	);
	assert_eq!(
		Blake2b::new(&Blake2bConfig::new().key([0u8; 65])).unwrap_err(),
		ConfigError::KeyTooLong { len: 65, max: 64 }
	);

	let mut hasher = Blake2s::default();
	let digest = hasher.finalize();
	assert_eq!(hasher.update(b"late"), Err(StateError::AlreadyFinalized));
	assert_eq!(hasher.finalize(), digest);
}
