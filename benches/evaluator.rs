use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_rs::cards::{parse_cards, Card};
use holdem_rs::deck::Deck;
use holdem_rs::evaluator::{evaluate_cards, evaluate_five, evaluate_seven};

fn five(s: &str) -> [Card; 5] {
    let cards = parse_cards(s).unwrap();
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

fn seven(s: &str) -> [Card; 7] {
    let cards = parse_cards(s).unwrap();
    [cards[0], cards[1], cards[2], cards[3], cards[4], cards[5], cards[6]]
}

fn bench_evaluate_five(c: &mut Criterion) {
    let mut g = c.benchmark_group("evaluate_five");
    for (name, hand) in [("high_card", "Ah Kd 7s 5c 2d"), ("royal_flush", "As Ks Qs Js Ts")] {
        let cards = five(hand);
        g.bench_with_input(BenchmarkId::new(name, hand), &cards, |b, input| {
            b.iter(|| evaluate_five(black_box(input)))
        });
    }
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    // the royal flush is found first, so this is the shortest walk down the chain
    let top = seven("As Ah Ks Qs Js Ts 9s");
    let bottom = seven("Ah Kd 9s 7c 5d 3h 2c");
    let mut g = c.benchmark_group("evaluate_seven");
    g.bench_function("royal_flush", |b| b.iter(|| evaluate_seven(black_box(&top))));
    g.bench_function("high_card", |b| b.iter(|| evaluate_seven(black_box(&bottom))));
    g.finish();
}

fn bench_random_deals(c: &mut Criterion) {
    let hands: Vec<Vec<Card>> = (0..256)
        .map(|seed| {
            let mut deck = Deck::standard();
            deck.shuffle_seeded(seed);
            deck.draw_n(7).unwrap()
        })
        .collect();
    c.bench_function("evaluate_cards/256_random_sevens", |b| {
        b.iter(|| {
            for h in &hands {
                black_box(evaluate_cards(black_box(h)).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_evaluate_five, bench_evaluate_seven, bench_random_deals);
criterion_main!(benches);
