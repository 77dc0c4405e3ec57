use hand_history::cards::{Card, Rank, Suit};
use proptest::prelude::*;
use std::str::FromStr;

prop_compose! {
    fn any_rank()(v in 2u8..=14u8) -> Rank {
        match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            _ => Rank::Ace,
        }
    }
}

fn any_suit() -> impl Strategy<Value = Suit> {
    prop_oneof![Just(Suit::Clubs), Just(Suit::Diamonds), Just(Suit::Hearts), Just(Suit::Spades),]
}

fn any_card() -> impl Strategy<Value = Card> {
    (any_rank(), any_suit()).prop_map(|(r, s)| Card::new(r, s))
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in any_rank(), b in any_rank()) {
        prop_assert_eq!(Rank::distance(a, b), Rank::distance(b, a));
    }

    #[test]
    fn distance_to_self_is_zero(a in any_rank()) {
        prop_assert_eq!(Rank::distance(a, a), 0);
    }

    #[test]
    fn card_ordering_is_transitive(a in any_card(), b in any_card(), c in any_card()) {
        if a < b && b < c {
            prop_assert!(a < c);
        }
    }

    #[test]
    fn equal_ranks_compare_by_suit(r in any_rank(), s1 in any_suit(), s2 in any_suit()) {
        let a = Card::new(r, s1);
        let b = Card::new(r, s2);
        prop_assert_eq!(a.cmp(&b), s1.cmp(&s2));
    }

    #[test]
    fn display_round_trips(card in any_card()) {
        let text = card.to_string();
        prop_assert_eq!(Card::from_str(&text).unwrap(), card);
    }
}
