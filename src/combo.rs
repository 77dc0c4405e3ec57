use crate::cards::{parse_cards, Card};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ComboError {
    #[error("duplicate cards in combo")]
    Duplicate,
    #[error("expected exactly two cards, got {0}")]
    CardCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private hole cards.
///
/// The pair is unordered: construction normalizes the higher card to the
/// first slot, so `"AhKs"` and `"KsAh"` compare equal and hash alike.
///
/// ```
/// use hand_history::combo::Combo;
///
/// let a: Combo = "KsAh".parse().unwrap();
/// let b: Combo = "Ah Ks".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "AhKs");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Combo(Card, Card);

impl Combo {
    pub fn try_new(a: Card, b: Card) -> Result<Self, ComboError> {
        if a == b {
            return Err(ComboError::Duplicate);
        }
        if a >= b {
            Ok(Self(a, b))
        } else {
            Ok(Self(b, a))
        }
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, ComboError> {
        if slice.len() != 2 {
            return Err(ComboError::CardCount(slice.len()));
        }
        Self::try_new(slice[0], slice[1])
    }

    /// The higher card.
    pub fn first(&self) -> Card {
        self.0
    }

    /// The lower card.
    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    /// Both cards share a rank.
    pub fn is_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }

    /// Both cards share a suit.
    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl FromStr for Combo {
    type Err = ComboError;

    /// Accepts `"AhKs"` as well as separated forms like `"Ah Ks"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.len() == 4 && t.is_char_boundary(2) && !t.contains(char::is_whitespace) {
            let a = t[..2].parse().map_err(|e: crate::cards::CardParseError| {
                ComboError::CardParse(e.to_string())
            })?;
            let b = t[2..].parse().map_err(|e: crate::cards::CardParseError| {
                ComboError::CardParse(e.to_string())
            })?;
            return Self::try_new(a, b);
        }
        let cards = parse_cards(t).map_err(|e| ComboError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn combo_is_order_insensitive() {
        let a = Card::new(Rank::Ace, Suit::Hearts);
        let k = Card::new(Rank::King, Suit::Spades);
        assert_eq!(Combo::try_new(a, k).unwrap(), Combo::try_new(k, a).unwrap());
    }

    #[test]
    fn combo_rejects_duplicates() {
        let a = Card::new(Rank::Ace, Suit::Hearts);
        assert!(matches!(Combo::try_new(a, a), Err(ComboError::Duplicate)));
    }

    #[test]
    fn combo_parses_both_forms() {
        let packed: Combo = "KsAh".parse().unwrap();
        let spaced: Combo = "Ah Ks".parse().unwrap();
        assert_eq!(packed, spaced);
        assert_eq!(packed.first(), Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(packed.to_string(), "AhKs");
    }

    #[test]
    fn pair_and_suited_predicates() {
        let pair: Combo = "AhAd".parse().unwrap();
        assert!(pair.is_pair());
        assert!(!pair.is_suited());

        let suited: Combo = "Ah7h".parse().unwrap();
        assert!(suited.is_suited());
        assert!(!suited.is_pair());
    }

    #[test]
    fn combo_rejects_bad_counts() {
        assert!(matches!("Ah".parse::<Combo>(), Err(ComboError::CardCount(1))));
        assert!(matches!("Ah Ks Qd".parse::<Combo>(), Err(ComboError::CardCount(3))));
    }
}
