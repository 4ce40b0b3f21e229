//! Core data types shared across the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::attributes::Attributes;
use crate::error::EngineError;
use crate::season::Season;

/// Lowest comfort sensitivity: the user tolerates garments two seasons away.
pub const SENSITIVITY_MIN: i32 = 1;
/// Highest comfort sensitivity: only exact season matches are worn.
pub const SENSITIVITY_MAX: i32 = 5;

/// Precipitation probability (percent) at which a forecast counts as wet.
const WET_PROBABILITY: u8 = 60;

/// Normalise free-form attribute text for alias lookup.
///
/// Lowercases, trims, and folds `_` and spaces into `-`.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Resolve `raw` against a static alias table.
pub(crate) fn lookup_alias<T: Copy>(table: &[(&str, T)], raw: &str) -> Option<T> {
    let key = normalize_key(raw);
    if key.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, value)| *value)
}

/// Identity of a garment in the wardrobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GarmentId(pub Uuid);

impl GarmentId {
    /// Generate a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GarmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GarmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Identity of the wardrobe owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub Uuid);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Primary slot a garment occupies in an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Category {
    Top,
    Bottom,
    Outer,
    Dress,
    Shoes,
    Accessory,
    Bag,
    Hat,
    Scarf,
    Underwear,
    Other,
}

const CATEGORY_ALIASES: &[(&str, Category)] = &[
    ("top", Category::Top),
    ("tops", Category::Top),
    ("upper", Category::Top),
    ("bottom", Category::Bottom),
    ("bottoms", Category::Bottom),
    ("pants", Category::Bottom),
    ("outer", Category::Outer),
    ("outerwear", Category::Outer),
    ("dress", Category::Dress),
    ("dresses", Category::Dress),
    ("one-piece", Category::Dress),
    ("onepiece", Category::Dress),
    ("shoes", Category::Shoes),
    ("shoe", Category::Shoes),
    ("footwear", Category::Shoes),
    ("accessory", Category::Accessory),
    ("accessories", Category::Accessory),
    ("jewelry", Category::Accessory),
    ("bag", Category::Bag),
    ("bags", Category::Bag),
    ("hat", Category::Hat),
    ("hats", Category::Hat),
    ("cap", Category::Hat),
    ("scarf", Category::Scarf),
    ("scarves", Category::Scarf),
    ("muffler", Category::Scarf),
    ("underwear", Category::Underwear),
    ("innerwear", Category::Underwear),
    ("other", Category::Other),
    ("etc", Category::Other),
];

impl Category {
    /// Every category, in layer order.
    pub const ALL: [Category; 11] = [
        Category::Outer,
        Category::Dress,
        Category::Top,
        Category::Bottom,
        Category::Shoes,
        Category::Accessory,
        Category::Bag,
        Category::Hat,
        Category::Scarf,
        Category::Underwear,
        Category::Other,
    ];

    /// Canonical lowercase key.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Outer => "outer",
            Category::Dress => "dress",
            Category::Shoes => "shoes",
            Category::Accessory => "accessory",
            Category::Bag => "bag",
            Category::Hat => "hat",
            Category::Scarf => "scarf",
            Category::Underwear => "underwear",
            Category::Other => "other",
        }
    }

    /// Top, bottom, outer, dress and shoes: at most one of each per outfit.
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Category::Top | Category::Bottom | Category::Outer | Category::Dress | Category::Shoes
        )
    }

    /// Categories that may repeat in an outfit, up to a small cap.
    pub fn is_accessory_like(self) -> bool {
        matches!(
            self,
            Category::Accessory | Category::Bag | Category::Hat | Category::Scarf
        )
    }

    /// Whether the engine ever places this category in an outfit.
    pub fn is_recommendable(self) -> bool {
        self.is_structural() || self.is_accessory_like()
    }

    /// Outside-in layer position used to orient directional color pairs.
    pub fn layer_rank(self) -> u8 {
        match self {
            Category::Outer => 0,
            Category::Dress => 1,
            Category::Top => 2,
            Category::Bottom => 3,
            Category::Shoes => 4,
            Category::Accessory | Category::Bag | Category::Hat | Category::Scarf => 5,
            Category::Underwear | Category::Other => 6,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_alias(CATEGORY_ALIASES, s).ok_or_else(|| EngineError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A wardrobe item with its declared, unparsed attributes.
///
/// Owned by the wardrobe collaborator and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    pub id: GarmentId,
    pub owner: OwnerId,
    pub category: Category,
    /// Category-specific sub-type, e.g. "padding" for outerwear or "jeans" for bottoms.
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub style: String,
    /// Season tags such as "spring/autumn" or "all-season".
    #[serde(default)]
    pub season: String,
}

/// A garment paired with its weather score and resolved compatibility attributes.
///
/// Lives only for the duration of one recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredGarment {
    pub garment: Garment,
    /// Standalone weather suitability, already clamped to the scorer's range.
    pub score: f64,
    pub attributes: Attributes,
}

impl ScoredGarment {
    pub fn id(&self) -> GarmentId {
        self.garment.id
    }

    pub fn category(&self) -> Category {
        self.garment.category
    }
}

/// Cloud cover reported by the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyStatus {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Overcast,
}

impl FromStr for SkyStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALIASES: &[(&str, SkyStatus)] = &[
            ("clear", SkyStatus::Clear),
            ("sunny", SkyStatus::Clear),
            ("partly-cloudy", SkyStatus::PartlyCloudy),
            ("mostly-clear", SkyStatus::PartlyCloudy),
            ("cloudy", SkyStatus::Cloudy),
            ("mostly-cloudy", SkyStatus::Cloudy),
            ("overcast", SkyStatus::Overcast),
        ];
        lookup_alias(ALIASES, s).ok_or_else(|| EngineError::InvalidWeather {
            field: "sky",
            value: s.to_string(),
        })
    }
}

/// Kind of precipitation in the forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecipitationType {
    #[default]
    None,
    Rain,
    RainSnow,
    Snow,
    Shower,
}

impl FromStr for PrecipitationType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALIASES: &[(&str, PrecipitationType)] = &[
            ("none", PrecipitationType::None),
            ("dry", PrecipitationType::None),
            ("rain", PrecipitationType::Rain),
            ("rain-snow", PrecipitationType::RainSnow),
            ("sleet", PrecipitationType::RainSnow),
            ("snow", PrecipitationType::Snow),
            ("shower", PrecipitationType::Shower),
            ("showers", PrecipitationType::Shower),
        ];
        lookup_alias(ALIASES, s).ok_or_else(|| EngineError::InvalidWeather {
            field: "precipitation",
            value: s.to_string(),
        })
    }
}

/// Resolved forecast for the recommendation window. Temperatures in °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub sky: SkyStatus,
    pub precipitation: PrecipitationType,
    /// Expected precipitation in millimetres.
    #[serde(default)]
    pub precipitation_amount: f64,
    /// Chance of precipitation, 0-100.
    #[serde(default)]
    pub precipitation_probability: u8,
    pub temperature: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub forecast_at: OffsetDateTime,
}

impl WeatherSnapshot {
    /// Precipitation is falling or likely enough to dress for it.
    pub fn is_wet(&self) -> bool {
        self.precipitation != PrecipitationType::None
            || self.precipitation_probability >= WET_PROBABILITY
    }

    pub fn is_snowy(&self) -> bool {
        matches!(
            self.precipitation,
            PrecipitationType::Snow | PrecipitationType::RainSnow
        )
    }

    /// Spread between the daily high and low.
    pub fn daily_range(&self) -> f64 {
        (self.temperature_max - self.temperature_min).max(0.0)
    }

    /// Season of the forecast timestamp.
    pub fn season(&self) -> Season {
        Season::from_datetime(self.forecast_at)
    }
}

/// How strictly the user wants garments matched to the current season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComfortProfile {
    pub sensitivity: i32,
}

impl ComfortProfile {
    pub fn new(sensitivity: i32) -> Self {
        Self { sensitivity }
    }

    /// Number of season steps away from the forecast season a garment may be.
    ///
    /// Values outside the sensitivity range fall back to exact matching.
    pub fn season_reach(&self) -> u8 {
        match self.sensitivity {
            SENSITIVITY_MAX => 0,
            SENSITIVITY_MIN => 2,
            s if s > SENSITIVITY_MIN && s < SENSITIVITY_MAX => 1,
            _ => 0,
        }
    }
}

impl Default for ComfortProfile {
    fn default() -> Self {
        Self { sensitivity: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_aliases_resolve() {
        assert_eq!("Outerwear".parse::<Category>().unwrap(), Category::Outer);
        assert_eq!(" one piece ".parse::<Category>().unwrap(), Category::Dress);
        assert_eq!("SHOES".parse::<Category>().unwrap(), Category::Shoes);
    }

    #[test]
    fn unknown_category_is_a_hard_error() {
        let err = "spacesuit".parse::<Category>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownCategory(ref raw) if raw == "spacesuit"));
    }

    #[test]
    fn category_deserializes_through_aliases() {
        let category: Category = serde_json::from_str("\"outerwear\"").unwrap();
        assert_eq!(category, Category::Outer);
        assert!(serde_json::from_str::<Category>("\"cape\"").is_err());
        assert_eq!(serde_json::to_string(&Category::Dress).unwrap(), "\"dress\"");
    }

    #[test]
    fn structural_and_accessory_sets_are_disjoint() {
        for category in Category::ALL {
            assert!(!(category.is_structural() && category.is_accessory_like()));
        }
        assert!(!Category::Underwear.is_recommendable());
        assert!(!Category::Other.is_recommendable());
    }

    #[test]
    fn season_reach_follows_sensitivity_band() {
        assert_eq!(ComfortProfile::new(SENSITIVITY_MAX).season_reach(), 0);
        assert_eq!(ComfortProfile::new(3).season_reach(), 1);
        assert_eq!(ComfortProfile::new(2).season_reach(), 1);
        assert_eq!(ComfortProfile::new(4).season_reach(), 1);
        assert_eq!(ComfortProfile::new(SENSITIVITY_MIN).season_reach(), 2);
        assert_eq!(ComfortProfile::new(0).season_reach(), 0);
        assert_eq!(ComfortProfile::new(42).season_reach(), 0);
    }

    #[test]
    fn garment_id_parses_and_rejects() {
        let id = GarmentId::random();
        assert_eq!(id.to_string().parse::<GarmentId>().unwrap(), id);
        assert!("not-a-uuid".parse::<GarmentId>().is_err());
    }

    #[test]
    fn random_garment_ids_are_distinct() {
        assert_ne!(GarmentId::random(), GarmentId::random());
    }

    #[test]
    fn weather_parsing_accepts_aliases() {
        assert_eq!("sunny".parse::<SkyStatus>().unwrap(), SkyStatus::Clear);
        assert_eq!(
            "sleet".parse::<PrecipitationType>().unwrap(),
            PrecipitationType::RainSnow
        );
        assert!("hail-of-frogs".parse::<PrecipitationType>().is_err());
    }
}
