//! Season model and comfort-driven eligibility filtering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::error::EngineError;
use crate::types::{lookup_alias, normalize_key, ComfortProfile, Garment, WeatherSnapshot};

/// Meteorological season. The four concrete seasons form a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
    Other,
}

const CYCLE: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            12 | 1 | 2 => Season::Winter,
            _ => Season::Other,
        }
    }

    pub fn from_datetime(at: OffsetDateTime) -> Self {
        Self::from_month(u8::from(at.month()).into())
    }

    fn cycle_index(self) -> Option<usize> {
        CYCLE.iter().position(|s| *s == self)
    }

    /// Steps between two seasons around the cycle (0, 1 or 2).
    ///
    /// `None` when either side is [`Season::Other`].
    pub fn distance(self, other: Season) -> Option<u8> {
        let a = self.cycle_index()?;
        let b = other.cycle_index()?;
        let forward = a.abs_diff(b);
        let steps = forward.min(CYCLE.len() - forward);
        u8::try_from(steps).ok()
    }

    /// Seasons one step away, in cycle order.
    pub fn adjacent(self) -> Vec<Season> {
        self.at_distance(1)
    }

    /// Seasons two steps away. On a four-season cycle both directions meet.
    pub fn second_adjacent(self) -> Vec<Season> {
        self.at_distance(2)
    }

    fn at_distance(self, steps: u8) -> Vec<Season> {
        CYCLE
            .iter()
            .copied()
            .filter(|s| self.distance(*s) == Some(steps))
            .collect()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
            Season::Other => "other",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy)]
enum SeasonToken {
    One(Season),
    All,
}

const SEASON_ALIASES: &[(&str, SeasonToken)] = &[
    ("spring", SeasonToken::One(Season::Spring)),
    ("summer", SeasonToken::One(Season::Summer)),
    ("autumn", SeasonToken::One(Season::Autumn)),
    ("fall", SeasonToken::One(Season::Autumn)),
    ("winter", SeasonToken::One(Season::Winter)),
    ("other", SeasonToken::One(Season::Other)),
    ("etc", SeasonToken::One(Season::Other)),
    ("all", SeasonToken::All),
    ("all-season", SeasonToken::All),
    ("allseason", SeasonToken::All),
    ("four-season", SeasonToken::All),
    ("year-round", SeasonToken::All),
];

/// Parsed season tags of a garment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonTags {
    seasons: Vec<Season>,
    all: bool,
}

impl SeasonTags {
    /// Parse a tag string such as "spring/autumn" or "All Season".
    ///
    /// Unknown tokens are recorded as [`Season::Other`].
    pub fn parse(raw: &str) -> Self {
        let mut tags = Self::default();
        let whole = normalize_key(raw);
        if matches!(
            lookup_alias(SEASON_ALIASES, &whole),
            Some(SeasonToken::All)
        ) {
            tags.all = true;
            return tags;
        }
        for token in raw
            .split(|c: char| matches!(c, '/' | ',' | '|' | ';') || c.is_whitespace())
            .filter(|t| !t.trim().is_empty())
        {
            match lookup_alias(SEASON_ALIASES, token) {
                Some(SeasonToken::All) => tags.all = true,
                Some(SeasonToken::One(season)) => tags.insert(season),
                None => tags.insert(Season::Other),
            }
        }
        tags
    }

    fn insert(&mut self, season: Season) {
        if !self.seasons.contains(&season) {
            self.seasons.push(season);
        }
    }

    pub fn is_all_season(&self) -> bool {
        self.all
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn contains(&self, season: Season) -> bool {
        self.all || self.seasons.contains(&season)
    }

    /// No concrete season was declared.
    pub fn is_neutral(&self) -> bool {
        !self.all && self.seasons.iter().all(|s| *s == Season::Other)
    }

    /// Whether any tagged season lies within `reach` steps of `current`.
    pub fn reaches(&self, current: Season, reach: u8) -> bool {
        self.all
            || self
                .seasons
                .iter()
                .filter_map(|s| s.distance(current))
                .any(|steps| steps <= reach)
    }
}

/// What to do with garments whose season tags name no concrete season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownSeasonPolicy {
    /// Treat untagged garments as matching every season.
    #[default]
    FailOpen,
    /// Exclude untagged garments.
    FailClosed,
}

impl FromStr for UnknownSeasonPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "fail-open" | "open" => Ok(Self::FailOpen),
            "fail-closed" | "closed" => Ok(Self::FailClosed),
            other => Err(EngineError::invalid_config(
                "unknown_season_policy",
                format!("expected fail_open or fail_closed, got {other:?}"),
            )),
        }
    }
}

/// Decides which garments may be worn in the forecast season.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeasonFilter {
    policy: UnknownSeasonPolicy,
}

impl SeasonFilter {
    pub fn new(policy: UnknownSeasonPolicy) -> Self {
        Self { policy }
    }

    /// Whether `garment` may be worn in `current`, allowing `reach` steps of slack.
    pub fn admits(&self, garment: &Garment, current: Season, reach: u8) -> bool {
        if current == Season::Other {
            return true;
        }
        let tags = SeasonTags::parse(&garment.season);
        if tags.is_neutral() {
            return self.policy == UnknownSeasonPolicy::FailOpen;
        }
        tags.reaches(current, reach)
    }

    /// Keep the garments admissible for the forecast and comfort profile.
    pub fn filter(
        &self,
        garments: Vec<Garment>,
        weather: &WeatherSnapshot,
        comfort: &ComfortProfile,
    ) -> Vec<Garment> {
        let current = weather.season();
        let reach = comfort.season_reach();
        let before = garments.len();
        let admitted: Vec<Garment> = garments
            .into_iter()
            .filter(|g| self.admits(g, current, reach))
            .collect();
        debug!(
            target: "outfitter::season",
            season = %current,
            reach,
            before,
            after = admitted.len(),
            "Filtered wardrobe by season"
        );
        admitted
    }
}
