use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Card ranks from Two (low) to Ace (high).
///
/// Ordering follows the canonical deal sequence 2,3,...,K,A regardless of how
/// a rank is written in a hand history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

/// Face cards: J, Q, K.
pub const FACE_RANKS: [Rank; 3] = [Rank::Jack, Rank::Queen, Rank::King];

/// Broadway cards: T through A.
pub const BROADWAY_RANKS: [Rank; 5] =
    [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace];

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Distance between two ranks in the canonical sequence.
    ///
    /// Symmetric, and zero for equal ranks. Adjacent ranks are 1 apart, so a
    /// 5 next to a 6 gives 1 and a 5 next to a 9 gives 4.
    ///
    /// ```
    /// use hand_history::cards::Rank;
    ///
    /// assert_eq!(Rank::distance(Rank::Five, Rank::Six), 1);
    /// assert_eq!(Rank::distance(Rank::Ace, Rank::Two), 12);
    /// assert_eq!(Rank::distance(Rank::King, Rank::King), 0);
    /// ```
    pub fn distance(first: Rank, second: Rank) -> u8 {
        // index in ALL, not the printed face value
        let a = first as u8 - Rank::Two as u8;
        let b = second as u8 - Rank::Two as u8;
        a.abs_diff(b)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.chars().count() == 1 {
            return Rank::try_from(t.chars().next().unwrap());
        }
        Err(RankParseError::Invalid(s.to_string()))
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(RankParseError::Invalid(c.to_string())),
        }
    }
}

/// Four suits; order has no hand-strength meaning but is fixed for ordering:
/// C < D < H < S.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn to_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.chars().count() == 1 {
            return Suit::try_from(t.chars().next().unwrap());
        }
        match t.to_ascii_lowercase().as_str() {
            "clubs" => Ok(Suit::Clubs),
            "diamonds" => Ok(Suit::Diamonds),
            "hearts" => Ok(Suit::Hearts),
            "spades" => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            'c' | '♣' => Ok(Suit::Clubs),
            'd' | '♦' => Ok(Suit::Diamonds),
            'h' | '♥' => Ok(Suit::Hearts),
            's' | '♠' => Ok(Suit::Spades),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

/// A playing card: rank + suit.
///
/// Ordering is by rank first, suit as the tie-breaker.
///
/// ```
/// use hand_history::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// assert!(card.is_broadway());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }
    pub const fn suit(self) -> Suit {
        self.suit
    }

    pub const fn to_tuple(self) -> (Rank, Suit) {
        (self.rank, self.suit)
    }

    /// J, Q or K.
    pub fn is_face(self) -> bool {
        FACE_RANKS.contains(&self.rank)
    }

    /// T, J, Q, K or A.
    pub fn is_broadway(self) -> bool {
        BROADWAY_RANKS.contains(&self.rank)
    }

    /// A uniformly random card, independent of the [`DECK`] table.
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let rank = *Rank::ALL.choose(rng).unwrap();
        let suit = *Suit::ALL.choose(rng).unwrap();
        Card::new(rank, suit)
    }
}

/// The full 52-card deck, built once for the whole process.
///
/// Rank-major Cartesian product of [`Rank::ALL`] and [`Suit::ALL`]; read-only
/// after initialization, so it can be shared freely between threads.
pub static DECK: Lazy<[Card; 52]> = Lazy::new(|| {
    let mut cards = [Card::new(Rank::Two, Suit::Clubs); 52];
    let mut i = 0;
    for &rank in &Rank::ALL {
        for &suit in &Suit::ALL {
            cards[i] = Card::new(rank, suit);
            i += 1;
        }
    }
    cards
});

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("card code must be two characters, got '{0}'")]
    InvalidFormat(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Exactly two characters: rank code then suit code, e.g. `"As"` or `"th"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(u), None) => {
                let rank = Rank::try_from(r)?;
                let suit = Suit::try_from(u)?;
                Ok(Card::new(rank, suit))
            }
            _ => Err(CardParseError::InvalidFormat(s.to_string())),
        }
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use hand_history::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd Tc").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[1], Card::new(Rank::King, Suit::Diamonds));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rank_display_and_from_str() {
        assert_eq!(Rank::Ace.to_string(), "A");
        assert_eq!(Rank::from_str("T").unwrap(), Rank::Ten);
        assert_eq!(Rank::from_str("q").unwrap(), Rank::Queen);
        assert!(Rank::from_str("10").is_err());
        assert!(Rank::from_str("1").is_err());
    }

    #[test]
    fn rank_distance_uses_canonical_sequence() {
        assert_eq!(Rank::distance(Rank::Five, Rank::Six), 1);
        assert_eq!(Rank::distance(Rank::Six, Rank::Five), 1);
        assert_eq!(Rank::distance(Rank::Two, Rank::Ace), 12);
        assert_eq!(Rank::distance(Rank::Jack, Rank::Jack), 0);
    }

    #[test]
    fn suit_display_and_from_str() {
        assert_eq!(Suit::Spades.to_string(), "s");
        assert_eq!(Suit::from_str("s").unwrap(), Suit::Spades);
        assert_eq!(Suit::from_str("Hearts").unwrap(), Suit::Hearts);
        assert_eq!(Suit::try_from('♦').unwrap(), Suit::Diamonds);
        assert!(Suit::from_str("x").is_err());
    }

    #[test]
    fn suit_order_is_fixed() {
        assert!(Suit::Clubs < Suit::Diamonds);
        assert!(Suit::Diamonds < Suit::Hearts);
        assert!(Suit::Hearts < Suit::Spades);
    }

    #[test]
    fn card_round_trips_with_uppercased_rank() {
        for code in ["As", "kd", "tH", "2c"] {
            let card = Card::from_str(code).unwrap();
            let mut expect = String::new();
            expect.push(code.chars().next().unwrap().to_ascii_uppercase());
            expect.push(code.chars().nth(1).unwrap().to_ascii_lowercase());
            assert_eq!(card.to_string(), expect);
        }
    }

    #[test]
    fn card_rejects_wrong_lengths() {
        assert!(matches!(Card::from_str(""), Err(CardParseError::InvalidFormat(_))));
        assert!(matches!(Card::from_str("A"), Err(CardParseError::InvalidFormat(_))));
        assert!(matches!(Card::from_str("10d"), Err(CardParseError::InvalidFormat(_))));
        assert!(matches!(Card::from_str("Xs"), Err(CardParseError::Rank(_))));
        assert!(matches!(Card::from_str("Ax"), Err(CardParseError::Suit(_))));
    }

    #[test]
    fn ordering_is_rank_then_suit() {
        let as_ = Card::new(Rank::Ace, Suit::Spades);
        let ah = Card::new(Rank::Ace, Suit::Hearts);
        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert!(as_ > ah);
        assert!(ah > kd);
    }

    #[test]
    fn face_and_broadway_predicates() {
        assert!(Card::new(Rank::Jack, Suit::Clubs).is_face());
        assert!(!Card::new(Rank::Ten, Suit::Clubs).is_face());
        assert!(Card::new(Rank::Ten, Suit::Clubs).is_broadway());
        assert!(!Card::new(Rank::Nine, Suit::Clubs).is_broadway());
    }

    #[test]
    fn deck_has_52_unique_cards() {
        let unique: HashSet<Card> = DECK.iter().copied().collect();
        assert_eq!(DECK.len(), 52);
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn random_card_is_well_formed() {
        for _ in 0..32 {
            let card = Card::random();
            assert!(DECK.contains(&card));
        }
    }

    #[test]
    fn parse_many_cards() {
        let xs = parse_cards("As, Kd Tc").unwrap();
        assert_eq!(xs.len(), 3);
        assert_eq!(xs[0], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(xs[1], Card::new(Rank::King, Suit::Diamonds));
        assert_eq!(xs[2], Card::new(Rank::Ten, Suit::Clubs));
    }
}
