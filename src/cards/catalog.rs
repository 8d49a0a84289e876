//! Power card catalog.
//!
//! The seven card types are a closed set, so the catalog is an enum with
//! per-type properties rather than a registry populated at runtime.
//!
//! | Type | Category | Kind | Supply |
//! |---|---|---|---|
//! | BOOST | utility | persistent | 4 |
//! | STEAL | offensive | instant | 3 |
//! | SHIELD | defensive | persistent | 3 |
//! | COUNTER | defensive | persistent | 2 |
//! | PRECISION | special | instant | 3 |
//! | CHALLENGE | special | instant | 3 |
//! | RESURRECT | utility | instant | 2 |

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Power card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerCardType {
    Boost,
    Steal,
    Shield,
    Counter,
    Precision,
    Challenge,
    Resurrect,
}

/// Broad role of a card, used for presentation and grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCategory {
    Offensive,
    Defensive,
    Special,
    Utility,
}

/// How a card's effect plays out once invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Resolves immediately; the card is spent.
    Instant,
    /// Stays in play until a later event consumes it.
    Persistent,
}

impl PowerCardType {
    /// Every type, in catalog order.
    pub const ALL: [PowerCardType; 7] = [
        PowerCardType::Boost,
        PowerCardType::Steal,
        PowerCardType::Shield,
        PowerCardType::Counter,
        PowerCardType::Precision,
        PowerCardType::Challenge,
        PowerCardType::Resurrect,
    ];

    #[must_use]
    pub const fn category(self) -> CardCategory {
        match self {
            PowerCardType::Steal => CardCategory::Offensive,
            PowerCardType::Shield | PowerCardType::Counter => CardCategory::Defensive,
            PowerCardType::Precision | PowerCardType::Challenge => CardCategory::Special,
            PowerCardType::Boost | PowerCardType::Resurrect => CardCategory::Utility,
        }
    }

    #[must_use]
    pub const fn effect_kind(self) -> EffectKind {
        match self {
            PowerCardType::Boost | PowerCardType::Shield | PowerCardType::Counter => {
                EffectKind::Persistent
            }
            PowerCardType::Steal
            | PowerCardType::Precision
            | PowerCardType::Challenge
            | PowerCardType::Resurrect => EffectKind::Instant,
        }
    }

    /// Copies of this card in one game's deck.
    #[must_use]
    pub const fn supply(self) -> u32 {
        match self {
            PowerCardType::Boost => 4,
            PowerCardType::Steal
            | PowerCardType::Shield
            | PowerCardType::Precision
            | PowerCardType::Challenge => 3,
            PowerCardType::Counter | PowerCardType::Resurrect => 2,
        }
    }

    /// Upper-case name, as printed on physical cards.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PowerCardType::Boost => "BOOST",
            PowerCardType::Steal => "STEAL",
            PowerCardType::Shield => "SHIELD",
            PowerCardType::Counter => "COUNTER",
            PowerCardType::Precision => "PRECISION",
            PowerCardType::Challenge => "CHALLENGE",
            PowerCardType::Resurrect => "RESURRECT",
        }
    }
}

impl std::fmt::Display for PowerCardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned code that names no power card.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized power card code {0:?}")]
pub struct UnknownCardCode(pub String);

impl FromStr for PowerCardType {
    type Err = UnknownCardCode;

    /// Parse a scanned card code: a type name, case-insensitive, optionally
    /// prefixed with `POWER:`.
    ///
    /// ```
    /// use trivia_engine::cards::PowerCardType;
    ///
    /// assert_eq!("power:steal".parse(), Ok(PowerCardType::Steal));
    /// assert_eq!("SHIELD".parse(), Ok(PowerCardType::Shield));
    /// assert!("JOKER".parse::<PowerCardType>().is_err());
    /// ```
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let trimmed = code.trim();
        let name = match trimmed.split_once(':') {
            Some((prefix, rest)) if prefix.eq_ignore_ascii_case("power") => rest,
            _ => trimmed,
        };
        PowerCardType::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCardCode(code.to_string()))
    }
}

/// Performance presented by a CHALLENGE card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// Finish the lyric line.
    LyricsCompletion,
    /// Sing the chorus.
    Singing,
    /// Imitate the artist.
    Imitation,
}

impl ChallengeKind {
    pub const ALL: [ChallengeKind; 3] = [
        ChallengeKind::LyricsCompletion,
        ChallengeKind::Singing,
        ChallengeKind::Imitation,
    ];
}

/// Remaining deck supply per card type for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSupply {
    remaining: FxHashMap<PowerCardType, u32>,
}

impl Default for CardSupply {
    fn default() -> Self {
        Self {
            remaining: PowerCardType::ALL
                .into_iter()
                .map(|kind| (kind, kind.supply()))
                .collect(),
        }
    }
}

impl CardSupply {
    /// Full deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn remaining(&self, kind: PowerCardType) -> u32 {
        self.remaining.get(&kind).copied().unwrap_or(0)
    }

    /// Types with at least one copy left, in catalog order.
    #[must_use]
    pub fn obtainable(&self) -> Vec<PowerCardType> {
        PowerCardType::ALL
            .into_iter()
            .filter(|kind| self.remaining(*kind) > 0)
            .collect()
    }

    /// Take one copy. Returns false when none are left.
    pub fn take(&mut self, kind: PowerCardType) -> bool {
        match self.remaining.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }
}
