//! Micro-benchmarks for the similarity metric and the full respond path.
//! Run locally with `cargo bench --bench matching` — not in CI.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use tanya::{
    similarity, Availability, Book, ChatEngine, Intent, IntentSet, MemoryCatalog,
    MemoryIntentStore, Responder,
};

fn bench_similarity(c: &mut Criterion) {
    c.bench_function("similarity/short", |b| {
        b.iter(|| similarity(black_box("psikolog"), black_box("psikologi")))
    });
    c.bench_function("similarity/title", |b| {
        b.iter(|| {
            similarity(
                black_box("pemrograman python tingkat lanjut untuk analisis data"),
                black_box("pemrograman python dasar"),
            )
        })
    });
}

fn bench_respond(c: &mut Criterion) {
    let intents = IntentSet::new(
        (0..50)
            .map(|i| Intent {
                tag: format!("faq-{i}"),
                patterns: vec![format!("pertanyaan nomor {i}"), format!("faq {i}")],
                responses: vec![format!("jawaban {i}")],
            })
            .collect(),
    );
    let books = (0..200)
        .map(|i| Book {
            title: format!("Buku Contoh Nomor {i}"),
            subject: Some(format!("subjek-{}", i % 10)),
            availability: Availability::Available,
            location: format!("R{}", i % 20),
        })
        .collect();
    let engine = ChatEngine::new(
        Arc::new(MemoryIntentStore::new(intents)),
        Arc::new(MemoryCatalog::new(books)),
    );

    c.bench_function("respond/faq_hit", |b| {
        b.iter(|| engine.respond(black_box("pertanyaan nomor 25")))
    });
    c.bench_function("respond/title_hit", |b| {
        b.iter(|| engine.respond(black_box("buku contoh nomor 150")))
    });
    c.bench_function("respond/miss", |b| {
        b.iter(|| engine.respond(black_box("tidak ada yang cocok sama sekali")))
    });
}

criterion_group!(benches, bench_similarity, bench_respond);
criterion_main!(benches);
