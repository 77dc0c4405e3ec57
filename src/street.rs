use crate::cards::{Card, Rank};
use crate::constants::ActionKind;

/// One betting round of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StreetId {
    Preflop,
    Flop,
    Turn,
    River,
}

impl StreetId {
    /// Section-marker text used by splittable hand-history formats.
    pub const fn marker(self) -> &'static str {
        match self {
            StreetId::Preflop => "HOLE CARDS",
            StreetId::Flop => "FLOP",
            StreetId::Turn => "TURN",
            StreetId::River => "RIVER",
        }
    }
}

/// A single observed actor event, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    pub name: String,
    pub kind: ActionKind,
    pub amount: Option<u64>,
}

impl PlayerAction {
    pub fn new(name: impl Into<String>, kind: ActionKind, amount: Option<u64>) -> Self {
        Self { name: name.into(), kind, amount }
    }
}

/// Pot and head-count reported on a street line, e.g.
/// `(Total Pot: 560, 2 Players)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreetStats {
    pub pot: u64,
    pub num_players: u32,
}

/// Board-texture flags computed over all unordered pairs of a street's cards.
///
/// ```
/// use hand_history::cards::parse_cards;
/// use hand_history::street::Texture;
///
/// let texture = Texture::detect(&parse_cards("2h 7h Kh").unwrap());
/// assert!(texture.is_monotone);
/// assert!(!texture.is_rainbow);
/// assert!(texture.has_flushdraw);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texture {
    /// No two cards share a suit.
    pub is_rainbow: bool,
    /// Every pair of cards shares a suit.
    pub is_monotone: bool,
    /// Every pair of cards shares a rank.
    pub is_triplet: bool,
    /// Some pair of cards shares a rank.
    pub has_pair: bool,
    /// Some pair of cards shares a suit.
    pub has_flushdraw: bool,
    /// Some pair of cards sits within 3 ranks of each other.
    pub has_straightdraw: bool,
    /// Some pair of cards sits within 4 ranks of each other.
    pub has_gutshot: bool,
}

impl Texture {
    /// Detect texture from the cards dealt on a street.
    ///
    /// All properties quantify over unordered pairs, so a 3-card flop checks
    /// 3 pairs. Single-card streets have no pairs: the `is_*` properties are
    /// vacuously true there, which is why turn/river cards are kept at the
    /// hand level rather than analyzed.
    pub fn detect(cards: &[Card]) -> Self {
        let mut texture = Texture {
            is_rainbow: true,
            is_monotone: true,
            is_triplet: true,
            ..Texture::default()
        };
        for (i, first) in cards.iter().enumerate() {
            for second in &cards[i + 1..] {
                let same_suit = first.suit() == second.suit();
                let same_rank = first.rank() == second.rank();
                let diff = Rank::distance(first.rank(), second.rank());

                texture.is_rainbow &= !same_suit;
                texture.is_monotone &= same_suit;
                texture.is_triplet &= same_rank;
                texture.has_pair |= same_rank;
                texture.has_flushdraw |= same_suit;
                texture.has_straightdraw |= (1..=3).contains(&diff);
                texture.has_gutshot |= (1..=4).contains(&diff);
            }
        }
        texture
    }
}

/// A multi-card betting round: its dealt cards, parsed actions and pot.
///
/// Cards and actions are immutable once constructed, so the texture is
/// computed eagerly and never goes stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Street {
    cards: Vec<Card>,
    actions: Option<Vec<PlayerAction>>,
    texture: Texture,
    pub pot: Option<u64>,
}

impl Street {
    /// `actions` stays `None` for a street that was dealt but saw no actor
    /// events, keeping "no actions" distinct from "street never reached"
    /// (the latter has no `Street` at all).
    pub fn new(cards: Vec<Card>, actions: Option<Vec<PlayerAction>>) -> Self {
        let actions = actions.filter(|a| !a.is_empty());
        let texture = Texture::detect(&cards);
        Self { cards, actions, texture, pot: None }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn actions(&self) -> Option<&[PlayerAction]> {
        self.actions.as_deref()
    }

    pub fn texture(&self) -> Texture {
        self.texture
    }

    /// Distinct actor names in first-appearance order, or `None` when the
    /// street saw no actions.
    pub fn players(&self) -> Option<Vec<&str>> {
        let actions = self.actions.as_ref()?;
        let mut names: Vec<&str> = Vec::new();
        for action in actions {
            if !names.contains(&action.name.as_str()) {
                names.push(&action.name);
            }
        }
        Some(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn street(cards: &str, actions: Option<Vec<PlayerAction>>) -> Street {
        Street::new(parse_cards(cards).unwrap(), actions)
    }

    #[test]
    fn monotone_flop_is_not_rainbow() {
        let t = Texture::detect(&parse_cards("2h 7h Kh").unwrap());
        assert!(t.is_monotone);
        assert!(!t.is_rainbow);
        assert!(t.has_flushdraw);
    }

    #[test]
    fn rainbow_flop_has_no_flushdraw() {
        let t = Texture::detect(&parse_cards("2h 7s Kd").unwrap());
        assert!(t.is_rainbow);
        assert!(!t.is_monotone);
        assert!(!t.has_flushdraw);
    }

    #[test]
    fn two_tone_flop_is_neither() {
        let t = Texture::detect(&parse_cards("2h 7h Kd").unwrap());
        assert!(!t.is_rainbow);
        assert!(!t.is_monotone);
        assert!(t.has_flushdraw);
    }

    #[test]
    fn paired_and_tripled_boards() {
        let paired = Texture::detect(&parse_cards("8h 8s Kd").unwrap());
        assert!(paired.has_pair);
        assert!(!paired.is_triplet);

        let trips = Texture::detect(&parse_cards("8h 8s 8d").unwrap());
        assert!(trips.has_pair);
        assert!(trips.is_triplet);
    }

    #[test]
    fn adjacent_ranks_make_straight_and_gutshot_draws() {
        let t = Texture::detect(&parse_cards("5h 6s Kd").unwrap());
        assert!(t.has_straightdraw);
        assert!(t.has_gutshot);
    }

    #[test]
    fn four_gap_is_gutshot_only() {
        // 5 and 9 are 4 apart: too wide for an open-ender, close enough
        // for a gutshot.
        let t = Texture::detect(&parse_cards("5h 9s Kd").unwrap());
        assert!(!t.has_straightdraw);
        assert!(t.has_gutshot);
    }

    #[test]
    fn disconnected_board_draws_nothing() {
        let t = Texture::detect(&parse_cards("2h 7s Kd").unwrap());
        assert!(!t.has_straightdraw);
        assert!(!t.has_gutshot);
        assert!(!t.has_pair);
    }

    #[test]
    fn players_keeps_first_appearance_order() {
        let actions = vec![
            PlayerAction::new("bogdan", ActionKind::Bet, Some(60)),
            PlayerAction::new("alice", ActionKind::Call, Some(60)),
            PlayerAction::new("bogdan", ActionKind::Check, None),
        ];
        let s = street("5h 6s Kd", Some(actions));
        assert_eq!(s.players().unwrap(), vec!["bogdan", "alice"]);
    }

    #[test]
    fn no_actions_is_a_distinct_sentinel() {
        let s = street("5h 6s Kd", None);
        assert!(s.actions().is_none());
        assert!(s.players().is_none());

        // an empty action list collapses to the same sentinel
        let s = street("5h 6s Kd", Some(Vec::new()));
        assert!(s.players().is_none());
    }
}
