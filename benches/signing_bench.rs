// Signing, hashing, and selection benchmarks for the transaction core.
//
// Covers secp256k1 keypair generation, recoverable signing and
// verification of a digest, whole-transaction signing, serialization,
// and selector sorting at various candidate-set sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use vela_core::crypto::{sha256, verify_signed_hash, Address, Hash256, VelaKeypair};
use vela_core::transaction::{sign_inputs, sort_transactions, Transaction};

fn signed_tx(seed: u8, hours: u64) -> Transaction {
    let keypair = VelaKeypair::generate();
    let destination = Address::from_public_key(&keypair.public_key());
    let mut tx = Transaction::new();
    tx.push_input(Hash256([seed; 32]));
    tx.push_output(destination, 1_000_000, hours);
    tx.update_header();
    sign_inputs(&mut tx, &[keypair]);
    tx
}

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("secp256k1/keypair_generate", |b| {
        b.iter(VelaKeypair::generate);
    });
}

fn bench_sign_hash(c: &mut Criterion) {
    let keypair = VelaKeypair::generate();
    let digest = sha256(b"spend 1 vela; one input, one output");

    c.bench_function("secp256k1/sign_hash", |b| {
        b.iter(|| keypair.sign_hash(&digest));
    });
}

fn bench_verify_signed_hash(c: &mut Criterion) {
    let keypair = VelaKeypair::generate();
    let digest = sha256(b"spend 1 vela; one input, one output");
    let signature = keypair.sign_hash(&digest);

    c.bench_function("secp256k1/verify_signed_hash", |b| {
        b.iter(|| verify_signed_hash(&signature, &digest).unwrap());
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    c.bench_function("transaction/sign_inputs", |b| {
        let keypair = VelaKeypair::generate();
        let destination = Address::from_public_key(&keypair.public_key());
        b.iter(|| {
            let mut tx = Transaction::new();
            tx.push_input(Hash256([1u8; 32]));
            tx.push_output(destination, 1_000_000, 0);
            tx.update_header();
            sign_inputs(&mut tx, std::slice::from_ref(&keypair));
            tx
        });
    });
}

fn bench_serialize_and_hash(c: &mut Criterion) {
    let tx = signed_tx(3, 42);
    c.bench_function("transaction/size_and_hash", |b| {
        b.iter(|| tx.size_and_hash());
    });
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/sort");

    for size in [10usize, 100, 500] {
        let txns: Vec<Transaction> = (0..size)
            .map(|i| signed_tx((i % 251) as u8, i as u64 + 1))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txns, |b, txns| {
            b.iter(|| {
                sort_transactions(txns.clone(), |tx| {
                    Ok::<u64, ()>(tx.outputs[0].hours)
                })
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_sign_hash,
    bench_verify_signed_hash,
    bench_sign_transaction,
    bench_serialize_and_hash,
    bench_sort,
);
criterion_main!(benches);
