//! Vocabulary shared by room adapters: betting structure, game variant,
//! session kind, currency and per-line action kinds. The parse pipeline
//! stores these verbatim; only adapters produce them.

use std::fmt;
use std::str::FromStr;

/// A code outside one of the fixed vocabulary sets.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {what}: '{value}'")]
pub struct UnknownValue {
    pub what: &'static str,
    pub value: String,
}

impl UnknownValue {
    fn new(what: &'static str, value: &str) -> Self {
        Self { what, value: value.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Limit {
    NoLimit,
    PotLimit,
    FixedLimit,
}

impl Limit {
    pub const fn token(self) -> &'static str {
        match self {
            Limit::NoLimit => "NL",
            Limit::PotLimit => "PL",
            Limit::FixedLimit => "FL",
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Limit {
    type Err = UnknownValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "NL" | "No Limit" => Ok(Limit::NoLimit),
            "PL" | "Pot Limit" => Ok(Limit::PotLimit),
            "FL" | "Fix Limit" | "Fixed Limit" => Ok(Limit::FixedLimit),
            other => Err(UnknownValue::new("limit", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Game {
    Holdem,
    Omaha,
    OmahaHiLo,
    Stud,
    Razz,
}

impl Game {
    pub const fn token(self) -> &'static str {
        match self {
            Game::Holdem => "Hold'em",
            Game::Omaha => "Omaha",
            Game::OmahaHiLo => "Omaha Hi/Lo",
            Game::Stud => "Stud",
            Game::Razz => "Razz",
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Game {
    type Err = UnknownValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Hold'em" | "Holdem" => Ok(Game::Holdem),
            "Omaha" => Ok(Game::Omaha),
            "Omaha Hi/Lo" | "Omaha H/L" => Ok(Game::OmahaHiLo),
            "Stud" | "7 Card Stud" => Ok(Game::Stud),
            "Razz" => Ok(Game::Razz),
            other => Err(UnknownValue::new("game", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum GameType {
    Cash,
    Tournament,
    SitAndGo,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            GameType::Cash => "CASH",
            GameType::Tournament => "TOUR",
            GameType::SitAndGo => "SNG",
        };
        f.write_str(token)
    }
}

impl FromStr for GameType {
    type Err = UnknownValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "CASH" | "RING" => Ok(GameType::Cash),
            "TOUR" => Ok(GameType::Tournament),
            "SNG" => Ok(GameType::SitAndGo),
            other => Err(UnknownValue::new("game type", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub const fn symbol(self) -> char {
        match self {
            Currency::Usd => '$',
            Currency::Eur => '€',
            Currency::Gbp => '£',
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        };
        f.write_str(token)
    }
}

impl FromStr for Currency {
    type Err = UnknownValue;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "USD" | "$" => Ok(Currency::Usd),
            "EUR" | "€" => Ok(Currency::Eur),
            "GBP" | "£" => Ok(Currency::Gbp),
            other => Err(UnknownValue::new("currency", other)),
        }
    }
}

/// One observed actor event on a street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ActionKind {
    Bet,
    Raise,
    Check,
    Fold,
    Call,
    /// Uncalled bet returned to its owner.
    Return,
    Win,
    Show,
    Muck,
    /// Think-timer notice ("N seconds left to act").
    Think,
}

impl ActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::Bet => "bets",
            ActionKind::Raise => "raises",
            ActionKind::Check => "checks",
            ActionKind::Fold => "folds",
            ActionKind::Call => "calls",
            ActionKind::Return => "returns",
            ActionKind::Win => "wins",
            ActionKind::Show => "shows",
            ActionKind::Muck => "mucks",
            ActionKind::Think => "thinks",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActionKind {
    type Err = UnknownValue;

    /// Parses the verb as it appears in hand-history lines, e.g. `"bets"`,
    /// `"checks"`, `"folds"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bet" | "bets" => Ok(ActionKind::Bet),
            "raise" | "raises" => Ok(ActionKind::Raise),
            "check" | "checks" => Ok(ActionKind::Check),
            "fold" | "folds" => Ok(ActionKind::Fold),
            "call" | "calls" => Ok(ActionKind::Call),
            "return" | "returned" => Ok(ActionKind::Return),
            "win" | "wins" => Ok(ActionKind::Win),
            "show" | "shows" => Ok(ActionKind::Show),
            "muck" | "mucks" => Ok(ActionKind::Muck),
            "think" => Ok(ActionKind::Think),
            other => Err(UnknownValue::new("action", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_accepts_long_and_short_tokens() {
        assert_eq!("NL".parse::<Limit>().unwrap(), Limit::NoLimit);
        assert_eq!("No Limit".parse::<Limit>().unwrap(), Limit::NoLimit);
        assert_eq!("Pot Limit".parse::<Limit>().unwrap(), Limit::PotLimit);
        assert!("XX".parse::<Limit>().is_err());
    }

    #[test]
    fn unknown_values_carry_context() {
        let err = "Badugi".parse::<Game>().unwrap_err();
        assert_eq!(err.what, "game");
        assert_eq!(err.value, "Badugi");
    }

    #[test]
    fn action_kind_parses_line_verbs() {
        assert_eq!("folds".parse::<ActionKind>().unwrap(), ActionKind::Fold);
        assert_eq!("raises".parse::<ActionKind>().unwrap(), ActionKind::Raise);
        assert_eq!("checks".parse::<ActionKind>().unwrap(), ActionKind::Check);
        assert!("straddles".parse::<ActionKind>().is_err());
    }
}
