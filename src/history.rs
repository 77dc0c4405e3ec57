use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Utc};
use regex::Regex;

use crate::cards::{Card, CardParseError};
use crate::combo::{Combo, ComboError};
use crate::constants::{Currency, Game, GameType, Limit, UnknownValue};
use crate::section::Sections;
use crate::street::{Street, StreetId, StreetStats};

/// A seated participant in the hand.
///
/// Seat tables are pre-filled with placeholders and overwritten as real seats
/// are discovered; the hero's combo is patched in later, when the hole-cards
/// line is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub stack: u64,
    /// 1-based seat number.
    pub seat: u8,
    pub combo: Option<Combo>,
}

impl Player {
    pub fn new(name: impl Into<String>, stack: u64, seat: u8) -> Self {
        Self { name: name.into(), stack, seat, combo: None }
    }

    /// Placeholder for a seat no one occupies.
    pub fn empty_seat(seat: u8) -> Self {
        Self { name: format!("Empty Seat {seat}"), stack: 0, seat, combo: None }
    }
}

/// Pipeline stage names, used to pinpoint where a parse failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Stage {
    Header,
    Table,
    Players,
    Button,
    Hero,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Pot,
    Board,
    Winners,
    Extra,
}

impl Stage {
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Header => "header",
            Stage::Table => "table",
            Stage::Players => "players",
            Stage::Button => "button",
            Stage::Hero => "hero",
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
            Stage::Pot => "pot",
            Stage::Board => "board",
            Stage::Winners => "winners",
            Stage::Extra => "extra",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hard parse failure for one hand.
///
/// Street-absence is never reported through this type: stages that cannot
/// find their section marker record the street as absent and move on. What
/// does surface here is document corruption (grammar mismatches, missing
/// boundaries, an unseated hero), after which the partial record must not be
/// treated as valid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },
    #[error("stage {stage}: malformed line at fragment {index}: '{line}'")]
    MalformedLine { stage: Stage, index: usize, line: String },
    #[error("stage {stage}: expected section not found")]
    SectionNotFound { stage: Stage },
    #[error("hero '{0}' does not match any parsed seat")]
    HeroNotFound(String),
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error(transparent)]
    Combo(#[from] ComboError),
    #[error(transparent)]
    Unknown(#[from] UnknownValue),
    #[error("invalid date: {0}")]
    Date(#[from] chrono::ParseError),
}

/// Capability interface a poker room's format plugs into the pipeline.
///
/// The pipeline owns the stage order and the shared record; adapters own the
/// text grammars. Every stage receives the full fragment list and the
/// in-progress record, and may rely only on fragments it can justify from the
/// recorded boundaries plus whatever earlier stages put into the record.
pub trait RoomAdapter {
    /// Delimiter used to split the raw text into sections.
    fn split_pattern(&self) -> &Regex;

    /// Extract ident, stakes, date, table and game metadata from the header
    /// region.
    fn parse_header(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;

    fn parse_table(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_players(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_button(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_hero(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_preflop(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_flop(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;

    /// Turn and river: single-card streets keyed by their section marker.
    fn parse_street(
        &self,
        street: StreetId,
        sections: &Sections,
        hand: &mut HandHistory,
    ) -> Result<(), ParseError>;

    fn parse_showdown(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_pot(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_board(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_winners(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
    fn parse_extra(&self, sections: &Sections, hand: &mut HandHistory)
        -> Result<(), ParseError>;
}

/// Parse a room-local timestamp and convert it to UTC.
///
/// `format` is the room's `strftime`-style format string; `tz` is the room's
/// fixed UTC offset.
pub fn parse_date(
    text: &str,
    format: &str,
    tz: FixedOffset,
) -> Result<DateTime<Utc>, chrono::ParseError> {
    let local = NaiveDateTime::parse_from_str(text, format)?;
    let utc = local - Duration::seconds(i64::from(tz.local_minus_utc()));
    Ok(DateTime::from_naive_utc_and_offset(utc, Utc))
}

/// The structured record of a single parsed hand.
///
/// Lifecycle: construct from raw text, optionally [`parse_header`] for a
/// cheap metadata-only scan, then [`parse`] runs the full stage sequence
/// exactly once. The split-fragment buffer built for parsing is retained
/// between the two calls and released when the full parse finishes.
///
/// [`parse_header`]: HandHistory::parse_header
/// [`parse`]: HandHistory::parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandHistory {
    raw: String,
    header_parsed: bool,
    parsed: bool,
    sections: Option<Sections>,

    // header
    pub ident: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub sb: Option<u64>,
    pub bb: Option<u64>,
    pub limit: Option<Limit>,
    pub game: Option<Game>,
    pub game_type: Option<GameType>,
    pub currency: Option<Currency>,
    pub buyin: Option<u64>,
    pub table_name: Option<String>,
    pub tournament_ident: Option<String>,

    // body
    pub max_players: Option<u8>,
    pub players: Vec<Player>,
    pub button_seat: Option<u8>,
    pub hero_seat: Option<u8>,
    pub preflop_actions: Option<Vec<String>>,
    pub flop: Option<Street>,
    pub turn: Option<Card>,
    pub turn_actions: Option<Vec<String>>,
    pub turn_stats: Option<StreetStats>,
    pub river: Option<Card>,
    pub river_actions: Option<Vec<String>>,
    pub river_stats: Option<StreetStats>,
    pub show_down: bool,
    pub total_pot: Option<u64>,
    pub rake: Option<u64>,
    pub winners: BTreeSet<String>,
    /// Room-specific auxiliary facts with no typed slot, e.g. the raw
    /// tournament name.
    pub extra: BTreeMap<String, String>,
}

impl HandHistory {
    pub fn new(hand_text: &str) -> Self {
        Self { raw: hand_text.trim().to_string(), ..Self::default() }
    }

    /// Convenience form reading the whole blob from a file.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::new(&std::fs::read_to_string(path)?))
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn header_parsed(&self) -> bool {
        self.header_parsed
    }

    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Parse only the header region: ident, date, stakes, game metadata.
    ///
    /// Idempotent: once the header is parsed, further calls return without
    /// touching the record.
    pub fn parse_header(&mut self, room: &dyn RoomAdapter) -> Result<(), ParseError> {
        if self.header_parsed {
            return Ok(());
        }
        let sections = match self.sections.take() {
            Some(sections) => sections,
            None => Sections::split(&self.raw, room.split_pattern()),
        };
        let result = room.parse_header(&sections, self);
        // keep the buffer for the body parse
        self.sections = Some(sections);
        result?;
        self.header_parsed = true;
        Ok(())
    }

    /// Run the full stage sequence over the hand body.
    ///
    /// Parses the header first when that has not happened yet. On success the
    /// fragment buffer is released and the record is final; calling `parse`
    /// again is a no-op. On error, partial results are not guaranteed
    /// consistent and the record must be discarded.
    pub fn parse(&mut self, room: &dyn RoomAdapter) -> Result<(), ParseError> {
        if self.parsed {
            return Ok(());
        }
        self.parse_header(room)?;

        let sections = match self.sections.take() {
            Some(sections) => sections,
            None => Sections::split(&self.raw, room.split_pattern()),
        };

        room.parse_table(&sections, self)?;
        room.parse_players(&sections, self)?;
        room.parse_button(&sections, self)?;
        room.parse_hero(&sections, self)?;
        room.parse_preflop(&sections, self)?;
        room.parse_flop(&sections, self)?;
        room.parse_street(StreetId::Turn, &sections, self)?;
        room.parse_street(StreetId::River, &sections, self)?;
        room.parse_showdown(&sections, self)?;
        room.parse_pot(&sections, self)?;
        room.parse_board(&sections, self)?;
        room.parse_winners(&sections, self)?;
        room.parse_extra(&sections, self)?;

        // sections was taken above; dropping it here bounds memory
        self.parsed = true;
        Ok(())
    }

    /// The player on the button, resolved against the live seat table so
    /// later enrichment (hero combo) is visible through it.
    pub fn button(&self) -> Option<&Player> {
        self.player_at_seat(self.button_seat?)
    }

    /// The player whose perspective the history records.
    pub fn hero(&self) -> Option<&Player> {
        self.player_at_seat(self.hero_seat?)
    }

    pub fn player_at_seat(&self, seat: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    /// 0-based index into `players` for a name, if seated.
    pub fn seat_index_of(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    /// The community cards: flop + turn + river in document order.
    ///
    /// A card is only included when all earlier positions are present, so the
    /// board never has gaps; `None` when no flop was dealt.
    pub fn board(&self) -> Option<Vec<Card>> {
        let flop = self.flop.as_ref()?;
        let mut board = flop.cards().to_vec();
        if let Some(turn) = self.turn {
            board.push(turn);
            if let Some(river) = self.river {
                board.push(river);
            }
        }
        Some(board)
    }

    /// Per-street pot/head-count record, keyed by street. Only streets whose
    /// format reports a streetline carry stats.
    pub fn street_stats(&self, street: StreetId) -> Option<StreetStats> {
        match street {
            StreetId::Turn => self.turn_stats,
            StreetId::River => self.river_stats,
            StreetId::Preflop | StreetId::Flop => None,
        }
    }

    /// Raw action lines for a street, keyed by street.
    pub fn street_actions(&self, street: StreetId) -> Option<&[String]> {
        match street {
            StreetId::Preflop => self.preflop_actions.as_deref(),
            StreetId::Turn => self.turn_actions.as_deref(),
            StreetId::River => self.river_actions.as_deref(),
            StreetId::Flop => None,
        }
    }
}

impl fmt::Display for HandHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ident {
            Some(ident) => write!(f, "<HandHistory: #{ident}>"),
            None => write!(f, "<HandHistory: unparsed>"),
        }
    }
}
