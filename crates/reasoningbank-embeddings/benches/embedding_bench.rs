use criterion::{black_box, criterion_group, criterion_main, Criterion};

use reasoningbank_core::traits::IEmbeddingProvider;
use reasoningbank_embeddings::HashedTfEmbedder;

fn bench_embed(c: &mut Criterion) {
    let embedder = HashedTfEmbedder::new(384);
    let text = "When the handler receives a nil user, return 404 before touching the session. \
                Dereferencing user.Session panics under load."
        .repeat(4);
    c.bench_function("hashed_tf_embed_query", |b| {
        b.iter(|| embedder.embed_query(black_box(&text)))
    });
}

criterion_group!(benches, bench_embed);
criterion_main!(benches);
