use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use flashdeck_core::memory::MemoryStore;
use flashdeck_core::session::{ReviewSession, ReviewState};
use flashdeck_core::model::Card;

fn make_cards(n: i64) -> Vec<Card> {
    (0..n)
        .map(|i| Card {
            id: i,
            category_id: 1,
            question: format!("question {i}"),
            answer: format!("answer {i}"),
            review_score: (i * 7 % 11) as u32,
        })
        .collect()
}

fn seeded_store(n: i64) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    for card in make_cards(n) {
        store.seed_card(1, &card.question, &card.answer, card.review_score);
    }
    store
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("working_set");

    for n in [100, 1_000, 10_000] {
        let cards = make_cards(n);
        group.bench_function(format!("from_cards n={n}"), |b| {
            b.iter(|| ReviewState::from_cards(black_box(cards.clone())))
        });
    }

    group.finish();
}

fn bench_outcomes(c: &mut Criterion) {
    let mut group = c.benchmark_group("outcomes");
    let store = seeded_store(1_000);

    group.bench_function("incorrect lap n=1000", |b| {
        b.iter(|| {
            let mut session = ReviewSession::new(store.clone());
            session.load(1).unwrap();
            for _ in 0..1_000 {
                session.mark_incorrect().unwrap();
            }
            black_box(session.remaining())
        })
    });

    group.bench_function("retire all n=1000", |b| {
        b.iter(|| {
            let mut session = ReviewSession::new(store.clone());
            session.load(1).unwrap();
            while !session.is_complete() {
                session.mark_correct().unwrap();
            }
            black_box(session.stats().reviewed())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_sort, bench_outcomes);
criterion_main!(benches);
