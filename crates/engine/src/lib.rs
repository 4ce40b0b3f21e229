//! Weather-aware outfit recommendations.
//!
//! This crate provides:
//! - Season eligibility filtering driven by a user's comfort sensitivity
//! - Standalone weather-suitability scoring for single garments
//! - A static garment compatibility model (style, material, tone, color, type pairs)
//! - Incremental outfit assembly with diminishing-returns normalisation
//! - Outfit selection by exhaustive search, an LLM-assisted path, or a random fallback
//!
//! The entry point is [`Recommender::recommend`].

pub mod attributes;
pub mod compat;
pub mod config;
mod error;
pub mod outfit;
pub mod recommend;
pub mod season;
pub mod select;
pub mod types;
pub mod wardrobe;
pub mod weather;

#[cfg(test)]
pub(crate) mod test_support;

pub use attributes::{
    Attributes, BottomKind, Color, GarmentKind, Material, MaterialFamily, OuterKind, ShoesKind,
    Style, Tone, TopKind,
};
pub use compat::{
    color_bonus, materials_compatible, score_pair, style_harmony, tones_harmonize,
    type_pair_adjustment, PairScore,
};
pub use config::{EngineConfig, SelectionStrategy};
pub use error::EngineError;
pub use outfit::CandidateOutfit;
pub use recommend::{Outfit, OutfitSource, Recommender};
pub use season::{Season, SeasonFilter, SeasonTags, UnknownSeasonPolicy};
pub use select::{
    best_outfit, parse_selection, random_outfit, top_candidates, CandidatePool, LlmSelector,
    OutfitRules, PromptContext, SearchOutcome, SelectionParseError,
};
pub use types::{
    Category, ComfortProfile, Garment, GarmentId, OwnerId, PrecipitationType, ScoredGarment,
    SkyStatus, WeatherSnapshot, SENSITIVITY_MAX, SENSITIVITY_MIN,
};
pub use wardrobe::{InMemoryWardrobe, JsonFileWardrobe, WardrobeError, WardrobeSource};
pub use weather::{ItemScorer, WeatherSuitability};
