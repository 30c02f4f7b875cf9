use holdem_rs::cards::Card;
use holdem_rs::deck::{Deck, DeckError, DECK_SIZE};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Deal {
    One,
    Many(usize),
    Hole(usize),
    Flop,
    Turn,
    River,
}

fn any_deal() -> impl Strategy<Value = Deal> {
    prop_oneof![
        Just(Deal::One),
        (0usize..12).prop_map(Deal::Many),
        (1usize..10).prop_map(Deal::Hole),
        Just(Deal::Flop),
        Just(Deal::Turn),
        Just(Deal::River),
    ]
}

fn apply(deck: &mut Deck, deal: &Deal) -> Result<usize, DeckError> {
    match *deal {
        Deal::One => deck.draw().map(|_| 1),
        Deal::Many(n) => deck.draw_n(n).map(|v| v.len()),
        Deal::Hole(seats) => deck.deal_hole(seats).map(|h| h.len() * 2),
        Deal::Flop => deck.deal_flop().map(|f| f.len()),
        Deal::Turn => deck.deal_turn().map(|_| 1),
        Deal::River => deck.deal_river().map(|_| 1),
    }
}

fn assert_partition(deck: &Deck) -> Result<(), TestCaseError> {
    let all: Vec<Card> = deck.dealt().iter().chain(deck.remaining()).copied().collect();
    let unique: HashSet<Card> = all.iter().copied().collect();
    prop_assert_eq!(all.len(), DECK_SIZE);
    prop_assert_eq!(unique.len(), DECK_SIZE);
    Ok(())
}

proptest! {
    #[test]
    fn dealt_and_remaining_partition_the_deck(seed in any::<u64>(), deals in prop::collection::vec(any_deal(), 0..40)) {
        let mut deck = Deck::standard();
        deck.shuffle_seeded(seed);
        for deal in &deals {
            let before = deck.remaining_count();
            match apply(&mut deck, deal) {
                Ok(n) => prop_assert_eq!(deck.remaining_count(), before - n),
                Err(DeckError::Exhausted { requested, remaining }) => {
                    prop_assert!(requested > remaining);
                    prop_assert_eq!(deck.remaining_count(), before);
                }
                Err(e) => prop_assert!(false, "unexpected error {e}"),
            }
            assert_partition(&deck)?;
        }
    }

    #[test]
    fn seeded_shuffles_replay(seed in any::<u64>()) {
        let mut a = Deck::standard();
        let mut b = Deck::standard();
        a.shuffle_seeded(seed);
        b.shuffle_seeded(seed);
        prop_assert_eq!(a.remaining(), b.remaining());
        assert_partition(&a)?;
    }
}

#[test]
fn hole_cards_never_overlap_across_players() {
    let mut deck = Deck::standard();
    deck.shuffle_seeded(99);
    let holes = deck.deal_hole(23).unwrap();
    let mut seen = HashSet::new();
    for h in &holes {
        assert!(seen.insert(h.first()));
        assert!(seen.insert(h.second()));
    }
    assert_eq!(deck.remaining_count(), 6);
    // a full board still fits
    deck.deal_flop().unwrap();
    deck.deal_turn().unwrap();
    deck.deal_river().unwrap();
    assert!(matches!(deck.draw_n(2), Err(DeckError::Exhausted { requested: 2, remaining: 1 })));
}

#[test]
fn exhausted_deck_reports_instead_of_panicking() {
    let mut deck = Deck::standard();
    deck.draw_n(DECK_SIZE).unwrap();
    assert!(deck.is_empty());
    assert_eq!(deck.draw(), Err(DeckError::Exhausted { requested: 1, remaining: 0 }));
    assert!(matches!(deck.deal_flop(), Err(DeckError::Exhausted { requested: 3, remaining: 0 })));
}
