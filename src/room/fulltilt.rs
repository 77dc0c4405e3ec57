//! Full Tilt Poker tournament hand histories.
//!
//! The format splits cleanly on `*** NAME ***` marker fences and newlines;
//! everything else is line-oriented. Stakes and stacks are integral
//! tournament chips.

use chrono::FixedOffset;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cards::parse_cards;
use crate::combo::Combo;
use crate::constants::{ActionKind, Currency, GameType};
use crate::history::{parse_date, HandHistory, ParseError, Player, RoomAdapter, Stage};
use crate::section::Sections;
use crate::street::{PlayerAction, Street, StreetId, StreetStats};

const DATE_FORMAT: &str = "%H:%M:%S ET - %Y/%m/%d";

static SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" ?\*\*\* ?\n?|\n").unwrap());

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^Full\ Tilt\ Poker\                                     # room tag
        Game\ \#(?P<ident>\d+):\                                # hand ident
        (?P<tournament_name>                                    # tournament name
            \$?(?P<buyin>\d*)?                                  # buy-in, when present,
                                                                # is part of the name
        .*)\ \((?P<tournament_ident>\d+)\),\                    # tournament number
        Table\ (?P<table_name>\d+)\ -\                          # table name
        (?P<limit>NL|PL|FL|No\ Limit|Pot\ Limit|Fix\ Limit)\ (?P<game>.*?)\ -\   # game
        (?P<sb>\d+)/(?P<bb>\d+)\ -\ .*                          # blinds
        \[(?P<date>.*)\]$                                       # date in ET
        ",
    )
    .unwrap()
});

static SEAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Seat (\d+): (.*) \(([\d,]+)\)$").unwrap());
static BUTTON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^The button is in seat #(\d+)$").unwrap());
static HERO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Dealt to (?P<hero_name>.*) \[(..) (..)\]$").unwrap());
static STREET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\] \(Total Pot: (\d+), (\d+) Players").unwrap());
static CARDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[([^\]]*)\]").unwrap());
static POT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Total pot (\d+) .*\| Rake (\d+)$").unwrap());
static WINNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Seat (?P<seat>\d+): (?P<name>.*?) .*collected \((\d+)\)").unwrap());
static SHOWDOWN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Seat (\d+): (.*) showed .* and won").unwrap());
static BOARD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Board: \[([^\]]*)\]$").unwrap());

/// Chip amounts come comma-grouped, e.g. `1,530`.
fn chips(text: &str, stage: Stage, index: usize) -> Result<u64, ParseError> {
    let stripped: String = text.chars().filter(|&c| c != ',').collect();
    stripped.parse().map_err(|_| ParseError::MalformedLine {
        stage,
        index,
        line: text.to_string(),
    })
}

fn malformed(stage: Stage, index: usize, line: &str) -> ParseError {
    ParseError::MalformedLine { stage, index, line: line.to_string() }
}

/// Full Tilt Poker format adapter. Stateless; all grammars are compiled once.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTilt;

impl FullTilt {
    pub fn new() -> Self {
        Self
    }

    /// Parse one action line of a dealt street.
    fn action_line(line: &str, stage: Stage, index: usize) -> Result<PlayerAction, ParseError> {
        if let Some(rest) = line.strip_prefix("Uncalled bet of ") {
            let (amount, name) = rest
                .split_once(" returned to ")
                .ok_or_else(|| malformed(stage, index, line))?;
            let amount = chips(amount, stage, index)?;
            return Ok(PlayerAction::new(name, ActionKind::Return, Some(amount)));
        }
        if line.contains("raises to") {
            let (name, rest) =
                line.split_once(' ').ok_or_else(|| malformed(stage, index, line))?;
            let amount = rest
                .rsplit_once("to ")
                .map(|(_, amount)| amount)
                .ok_or_else(|| malformed(stage, index, line))?;
            let amount = chips(amount, stage, index)?;
            return Ok(PlayerAction::new(name, ActionKind::Raise, Some(amount)));
        }
        if line.contains("wins the pot") {
            let (name, _) = line.split_once(' ').ok_or_else(|| malformed(stage, index, line))?;
            let open = line.find('(').ok_or_else(|| malformed(stage, index, line))?;
            let close = line.rfind(')').ok_or_else(|| malformed(stage, index, line))?;
            let amount = chips(&line[open + 1..close], stage, index)?;
            return Ok(PlayerAction::new(name, ActionKind::Win, Some(amount)));
        }
        if line.contains("mucks") {
            let (name, _) = line.split_once(' ').ok_or_else(|| malformed(stage, index, line))?;
            return Ok(PlayerAction::new(name, ActionKind::Muck, None));
        }
        if line.contains("seconds left to act") {
            let (name, _) = line.split_once(' ').ok_or_else(|| malformed(stage, index, line))?;
            return Ok(PlayerAction::new(name, ActionKind::Think, None));
        }
        // generic "<name> <verb> [<amount>]" line
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| malformed(stage, index, line))?;
        let verb = words.next().ok_or_else(|| malformed(stage, index, line))?;
        let kind: ActionKind = verb.parse()?;
        let amount = match words.next() {
            Some(amount) => Some(chips(amount, stage, index)?),
            None => None,
        };
        Ok(PlayerAction::new(name, kind, amount))
    }

    /// Winner extraction for a hand that ended uncontested: summary seat
    /// lines of the form `Seat N: name ... collected (amount)`.
    pub fn collected_winner(line: &str) -> Option<String> {
        if !line.contains("collected") {
            return None;
        }
        WINNER_RE.captures(line).map(|caps| caps["name"].to_string())
    }

    /// Winner extraction at showdown: summary seat lines of the form
    /// `Seat N: name showed [...] and won (...)`.
    pub fn showdown_winner(line: &str) -> Option<String> {
        if !line.contains("won") {
            return None;
        }
        SHOWDOWN_RE.captures(line).map(|caps| caps[2].to_string())
    }

    /// ET with no DST adjustment.
    fn timezone() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    /// `(Total Pot: N, M Players)` streetline stats.
    fn street_stats(line: &str, stage: Stage, index: usize) -> Result<StreetStats, ParseError> {
        let caps = STREET_RE.captures(line).ok_or_else(|| malformed(stage, index, line))?;
        let pot = chips(&caps[2], stage, index)?;
        let num_players =
            caps[3].parse().map_err(|_| malformed(stage, index, line))?;
        Ok(StreetStats { pot, num_players })
    }
}

impl RoomAdapter for FullTilt {
    fn split_pattern(&self) -> &Regex {
        &SPLIT_RE
    }

    fn parse_header(
        &self,
        sections: &Sections,
        hand: &mut HandHistory,
    ) -> Result<(), ParseError> {
        let line = sections
            .fragment(0)
            .ok_or_else(|| ParseError::MalformedHeader { reason: "empty document".into() })?;
        let caps = HEADER_RE
            .captures(line)
            .ok_or_else(|| ParseError::MalformedHeader { reason: line.to_string() })?;

        hand.ident = Some(caps["ident"].to_string());
        hand.sb = Some(chips(&caps["sb"], Stage::Header, 0)?);
        hand.bb = Some(chips(&caps["bb"], Stage::Header, 0)?);
        hand.date = Some(parse_date(&caps["date"], DATE_FORMAT, Self::timezone())?);

        let tournament_name = caps["tournament_name"].to_string();
        hand.game_type = Some(if tournament_name.contains("Sit & Go") {
            GameType::SitAndGo
        } else {
            GameType::Tournament
        });
        hand.currency = tournament_name.contains('$').then_some(Currency::Usd);
        hand.tournament_ident = Some(caps["tournament_ident"].to_string());
        hand.table_name = Some(caps["table_name"].to_string());
        hand.limit = Some(caps["limit"].parse()?);
        hand.game = Some(caps["game"].parse()?);
        hand.buyin = match caps.name("buyin").map(|m| m.as_str()) {
            Some("") | None => None,
            Some(digits) => Some(chips(digits, Stage::Header, 0)?),
        };
        hand.extra.insert("tournament_name".to_string(), tournament_name);
        Ok(())
    }

    fn parse_table(&self, _sections: &Sections, _hand: &mut HandHistory) -> Result<(), ParseError> {
        // table name already captured by the header grammar
        Ok(())
    }

    fn parse_players(
        &self,
        sections: &Sections,
        hand: &mut HandHistory,
    ) -> Result<(), ParseError> {
        // the format carries no max-player count, so seed all 9 seats
        let mut players: Vec<Player> = (1..=9).map(Player::empty_seat).collect();
        let mut last_seat = None;
        for (index, line) in sections.fragments().iter().enumerate().skip(1) {
            let Some(caps) = SEAT_RE.captures(line) else {
                break;
            };
            let seat: u8 =
                caps[1].parse().map_err(|_| malformed(Stage::Players, index, line))?;
            if seat == 0 || seat > 9 {
                return Err(malformed(Stage::Players, index, line));
            }
            players[usize::from(seat) - 1] = Player {
                name: caps[2].to_string(),
                stack: chips(&caps[3], Stage::Players, index)?,
                seat,
                combo: None,
            };
            last_seat = Some(seat);
        }
        let last_seat = last_seat.ok_or_else(|| ParseError::SectionNotFound {
            stage: Stage::Players,
        })?;
        players.truncate(usize::from(last_seat));
        hand.max_players = Some(last_seat);
        hand.players = players;
        Ok(())
    }

    fn parse_button(
        &self,
        sections: &Sections,
        hand: &mut HandHistory,
    ) -> Result<(), ParseError> {
        // one fragment before the first boundary
        let boundary = sections
            .first_boundary()
            .filter(|&b| b > 0)
            .ok_or(ParseError::SectionNotFound { stage: Stage::Button })?;
        let index = boundary - 1;
        let line = sections
            .fragment(index)
            .ok_or(ParseError::SectionNotFound { stage: Stage::Button })?;
        let caps = BUTTON_RE.captures(line).ok_or_else(|| malformed(Stage::Button, index, line))?;
        let seat = caps[1].parse().map_err(|_| malformed(Stage::Button, index, line))?;
        hand.button_seat = Some(seat);
        Ok(())
    }

    fn parse_hero(&self, sections: &Sections, hand: &mut HandHistory) -> Result<(), ParseError> {
        let boundary = sections
            .first_boundary()
            .ok_or(ParseError::SectionNotFound { stage: Stage::Hero })?;
        let index = boundary + 2;
        let line = sections
            .fragment(index)
            .ok_or(ParseError::SectionNotFound { stage: Stage::Hero })?;
        let caps = HERO_RE.captures(line).ok_or_else(|| malformed(Stage::Hero, index, line))?;
        let name = &caps["hero_name"];
        let combo: Combo = format!("{}{}", &caps[2], &caps[3]).parse()?;

        let seat_index = hand
            .seat_index_of(name)
            .ok_or_else(|| ParseError::HeroNotFound(name.to_string()))?;
        hand.players[seat_index].combo = Some(combo);
        // the button resolves by seat, so it sees this enrichment too
        hand.hero_seat = Some(hand.players[seat_index].seat);
        Ok(())
    }

    fn parse_preflop(
        &self,
        sections: &Sections,
        hand: &mut HandHistory,
    ) -> Result<(), ParseError> {
        let boundaries = sections.boundaries();
        let (Some(&first), Some(&second)) = (boundaries.first(), boundaries.get(1)) else {
            return Err(ParseError::SectionNotFound { stage: Stage::Preflop });
        };
        // skip the boundary, the HOLE CARDS marker and the hero line
        let start = first + 3;
        let lines = sections
            .fragments()
            .get(start..second)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        hand.preflop_actions = Some(lines);
        Ok(())
    }

    fn parse_flop(&self, sections: &Sections, hand: &mut HandHistory) -> Result<(), ParseError> {
        let Some(start) = sections.position(StreetId::Flop.marker()) else {
            hand.flop = None;
            return Ok(());
        };
        let stop = sections
            .next_boundary_after(start)
            .ok_or(ParseError::SectionNotFound { stage: Stage::Flop })?;

        let board_index = start + 1;
        let board_line = sections
            .fragment(board_index)
            .ok_or(ParseError::SectionNotFound { stage: Stage::Flop })?;
        let caps = CARDS_RE
            .captures(board_line)
            .ok_or_else(|| malformed(Stage::Flop, board_index, board_line))?;
        let cards = parse_cards(&caps[1])?;

        let mut actions = Vec::new();
        for index in board_index + 1..stop {
            let line = sections
                .fragment(index)
                .ok_or(ParseError::SectionNotFound { stage: Stage::Flop })?;
            actions.push(Self::action_line(line, Stage::Flop, index)?);
        }
        let pot = actions
            .iter()
            .find(|action| action.kind == ActionKind::Win)
            .and_then(|action| action.amount);

        let mut flop = Street::new(cards, Some(actions));
        flop.pot = pot;
        hand.flop = Some(flop);
        Ok(())
    }

    fn parse_street(
        &self,
        street: StreetId,
        sections: &Sections,
        hand: &mut HandHistory,
    ) -> Result<(), ParseError> {
        let stage = match street {
            StreetId::Turn => Stage::Turn,
            StreetId::River => Stage::River,
            StreetId::Preflop | StreetId::Flop => return Ok(()),
        };
        let (actions, stats) = match sections.position(street.marker()) {
            None => (None, None),
            Some(marker) => {
                let start = marker + 1;
                let line = sections
                    .fragment(start)
                    .ok_or(ParseError::SectionNotFound { stage })?;
                let stats = Self::street_stats(line, stage, start)?;
                let stop = sections
                    .next_boundary_after(start)
                    .ok_or(ParseError::SectionNotFound { stage })?;
                let lines = sections.fragments()[start + 1..stop].to_vec();
                (if lines.is_empty() { None } else { Some(lines) }, Some(stats))
            }
        };
        match street {
            StreetId::Turn => {
                hand.turn_actions = actions;
                hand.turn_stats = stats;
            }
            StreetId::River => {
                hand.river_actions = actions;
                hand.river_stats = stats;
            }
            StreetId::Preflop | StreetId::Flop => unreachable!(),
        }
        Ok(())
    }

    fn parse_showdown(
        &self,
        sections: &Sections,
        hand: &mut HandHistory,
    ) -> Result<(), ParseError> {
        hand.show_down = sections.position("SHOW DOWN").is_some();
        Ok(())
    }

    fn parse_pot(&self, sections: &Sections, hand: &mut HandHistory) -> Result<(), ParseError> {
        let boundary = sections
            .last_boundary()
            .ok_or(ParseError::SectionNotFound { stage: Stage::Pot })?;
        // the SUMMARY marker sits right after the boundary
        let index = boundary + 2;
        let line = sections
            .fragment(index)
            .ok_or(ParseError::SectionNotFound { stage: Stage::Pot })?;
        let stripped: String = line.chars().filter(|&c| c != ',').collect();
        let caps =
            POT_RE.captures(&stripped).ok_or_else(|| malformed(Stage::Pot, index, line))?;
        hand.total_pot = Some(chips(&caps[1], Stage::Pot, index)?);
        hand.rake = Some(chips(&caps[2], Stage::Pot, index)?);
        Ok(())
    }

    fn parse_board(&self, sections: &Sections, hand: &mut HandHistory) -> Result<(), ParseError> {
        let boundary = sections
            .last_boundary()
            .ok_or(ParseError::SectionNotFound { stage: Stage::Board })?;
        let index = boundary + 3;
        let Some(line) = sections.fragment(index) else {
            return Ok(());
        };
        let Some(caps) = BOARD_RE.captures(line) else {
            // hands folded out preflop have no Board line
            return Ok(());
        };
        let cards = parse_cards(&caps[1])?;
        hand.turn = cards.get(3).copied();
        hand.river = cards.get(4).copied();
        Ok(())
    }

    fn parse_winners(
        &self,
        sections: &Sections,
        hand: &mut HandHistory,
    ) -> Result<(), ParseError> {
        let boundary = sections
            .last_boundary()
            .ok_or(ParseError::SectionNotFound { stage: Stage::Winners })?;
        // seat results start after the total-pot line
        for line in sections.fragments().iter().skip(boundary + 3) {
            let winner = if hand.show_down {
                Self::showdown_winner(line)
            } else {
                Self::collected_winner(line)
            };
            if let Some(winner) = winner {
                hand.winners.insert(winner);
            }
        }
        Ok(())
    }

    fn parse_extra(&self, _sections: &Sections, _hand: &mut HandHistory) -> Result<(), ParseError> {
        // tournament name is recorded during header parse; per-street stats
        // are typed fields filled by their own stages
        Ok(())
    }
}
