// Copyright 2025 Irreducible Inc.

use blake2_hash::{Blake2b, Blake2b512, Blake2bConfig, Blake2s, Blake2s256};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use digest::Digest;
use rand::{thread_rng, RngCore};

const N: usize = 1 << 16;

fn random_input() -> Vec<u8> {
	let mut data = vec![0u8; N];
	thread_rng().fill_bytes(&mut data);
	data
}

fn bench_blake2b(c: &mut Criterion) {
	let mut group = c.benchmark_group("BLAKE2b");
	let data = random_input();
	group.throughput(Throughput::Bytes(N as u64));

	group.bench_function("Blake2b", |bench| {
		bench.iter(|| {
			let mut hasher = Blake2b::default();
			hasher.update(&data).unwrap();
			hasher.finalize()
		})
	});

	let keyed = Blake2bConfig::new().key(b"benchmark key").digest_size(32);
	group.bench_function("Blake2b keyed", |bench| {
		bench.iter(|| Blake2b::with_data(&keyed, &data).unwrap().finalize())
	});

	group.bench_function("Blake2b512 Digest", |bench| {
		bench.iter(|| <Blake2b512 as Digest>::digest(&data))
	});

	group.bench_function("Blake2b512-RustCrypto", |bench| {
		bench.iter(|| <blake2::Blake2b512 as blake2::Digest>::digest(&data))
	});

	group.finish()
}

fn bench_blake2s(c: &mut Criterion) {
	let mut group = c.benchmark_group("BLAKE2s");
	let data = random_input();
	group.throughput(Throughput::Bytes(N as u64));

	group.bench_function("Blake2s", |bench| {
		bench.iter(|| {
			let mut hasher = Blake2s::default();
			hasher.update(&data).unwrap();
			hasher.finalize()
		})
	});

	group.bench_function("Blake2s256 Digest", |bench| {
		bench.iter(|| <Blake2s256 as Digest>::digest(&data))
	});

	group.bench_function("Blake2s256-RustCrypto", |bench| {
		bench.iter(|| <blake2::Blake2s256 as blake2::Digest>::digest(&data))
	});

	group.finish()
}

criterion_group!(hash, bench_blake2b, bench_blake2s);
criterion_main!(hash);
