//! Standalone weather-suitability scoring for single garments.
//!
//! Each attribute contributes a small delta against the forecast; the deltas
//! are summed onto a neutral baseline and clamped, so no single garment can
//! dominate an outfit however extreme its mismatch.

use crate::attributes::{
    Attributes, BottomKind, GarmentKind, Material, OuterKind, ShoesKind, TopKind,
};
use crate::config::EngineConfig;
use crate::types::{Garment, ScoredGarment, WeatherSnapshot};

/// Signed suitability of an attribute for a forecast.
pub trait WeatherSuitability {
    fn weather_delta(&self, weather: &WeatherSnapshot) -> f64;
}

fn within(t: f64, low: f64, high: f64) -> bool {
    t >= low && t < high
}

impl WeatherSuitability for OuterKind {
    fn weather_delta(&self, weather: &WeatherSnapshot) -> f64 {
        let t = weather.temperature;
        match self {
            OuterKind::Padding => {
                if t < 0.0 {
                    0.6
                } else if t < 5.0 {
                    0.4
                } else if t < 10.0 {
                    0.0
                } else if t < 20.0 {
                    -0.6
                } else {
                    -1.0
                }
            }
            OuterKind::Coat => {
                if t < 5.0 {
                    0.4
                } else if t < 12.0 {
                    0.3
                } else if t < 17.0 {
                    0.0
                } else {
                    -0.6
                }
            }
            OuterKind::Jacket => {
                if within(t, 8.0, 18.0) {
                    0.3
                } else if t < 3.0 || t >= 24.0 {
                    -0.4
                } else {
                    0.0
                }
            }
            OuterKind::Cardigan => {
                let base = if within(t, 12.0, 22.0) {
                    0.3
                } else if t >= 26.0 || t < 5.0 {
                    -0.4
                } else {
                    0.0
                };
                // easy to shed on days with a wide swing
                if weather.daily_range() >= 10.0 {
                    base + 0.1
                } else {
                    base
                }
            }
            OuterKind::Windbreaker => {
                let base = if within(t, 12.0, 20.0) { 0.2 } else { 0.0 };
                if weather.is_wet() {
                    base + 0.2
                } else {
                    base
                }
            }
            OuterKind::Blazer => {
                if within(t, 12.0, 22.0) {
                    0.2
                } else if t >= 27.0 || t < 5.0 {
                    -0.4
                } else {
                    0.0
                }
            }
            OuterKind::Vest => {
                if within(t, 8.0, 16.0) {
                    0.2
                } else {
                    0.0
                }
            }
        }
    }
}

impl WeatherSuitability for TopKind {
    fn weather_delta(&self, weather: &WeatherSnapshot) -> f64 {
        let t = weather.temperature;
        match self {
            TopKind::TShirt => {
                if t >= 23.0 {
                    0.4
                } else if t >= 17.0 {
                    0.1
                } else if t < 12.0 {
                    -0.4
                } else {
                    0.0
                }
            }
            TopKind::Sleeveless => {
                if t >= 27.0 {
                    0.5
                } else if t < 20.0 {
                    -0.6
                } else {
                    0.0
                }
            }
            TopKind::LongSleeve => {
                if within(t, 12.0, 22.0) {
                    0.3
                } else if t >= 27.0 {
                    -0.3
                } else {
                    0.0
                }
            }
            TopKind::Shirt => {
                if within(t, 15.0, 25.0) {
                    0.2
                } else {
                    0.0
                }
            }
            TopKind::Knit => {
                if t < 12.0 {
                    0.4
                } else if t >= 20.0 {
                    -0.5
                } else {
                    0.0
                }
            }
            TopKind::Hoodie | TopKind::Sweatshirt => {
                if within(t, 8.0, 18.0) {
                    0.3
                } else if t >= 23.0 {
                    -0.4
                } else {
                    0.0
                }
            }
        }
    }
}

impl WeatherSuitability for BottomKind {
    fn weather_delta(&self, weather: &WeatherSnapshot) -> f64 {
        let t = weather.temperature;
        match self {
            BottomKind::Shorts => {
                if t >= 25.0 {
                    0.5
                } else if t < 18.0 {
                    -0.6
                } else {
                    0.0
                }
            }
            BottomKind::Skirt => {
                let base = if t >= 18.0 { 0.2 } else { 0.0 };
                if weather.is_wet() {
                    base - 0.1
                } else {
                    base
                }
            }
            BottomKind::Jeans => {
                if within(t, 5.0, 22.0) {
                    0.2
                } else if t >= 28.0 {
                    -0.2
                } else {
                    0.0
                }
            }
            BottomKind::Slacks => {
                if within(t, 10.0, 26.0) {
                    0.2
                } else {
                    0.0
                }
            }
            BottomKind::Jogger => {
                if within(t, 8.0, 20.0) {
                    0.2
                } else {
                    0.0
                }
            }
            BottomKind::Leggings => {
                if t < 12.0 {
                    0.3
                } else if t >= 25.0 {
                    -0.3
                } else {
                    0.0
                }
            }
        }
    }
}

impl WeatherSuitability for ShoesKind {
    fn weather_delta(&self, weather: &WeatherSnapshot) -> f64 {
        let t = weather.temperature;
        let wet = weather.is_wet();
        match self {
            ShoesKind::RainBoots => {
                if wet {
                    0.6
                } else {
                    -0.4
                }
            }
            ShoesKind::Boots => {
                let mut delta = if t < 8.0 {
                    0.4
                } else if t >= 22.0 {
                    -0.4
                } else {
                    0.0
                };
                if weather.is_snowy() {
                    delta += 0.3;
                }
                delta
            }
            ShoesKind::Sandals => {
                let mut delta = if t >= 24.0 {
                    0.5
                } else if t < 18.0 {
                    -0.7
                } else {
                    0.0
                };
                if wet {
                    delta -= 0.4;
                }
                delta
            }
            ShoesKind::Sneakers => {
                if weather.is_snowy() {
                    -0.3
                } else if wet {
                    -0.2
                } else {
                    0.1
                }
            }
            ShoesKind::Loafers => {
                let delta = if within(t, 10.0, 24.0) { 0.2 } else { 0.0 };
                if wet {
                    delta - 0.2
                } else {
                    delta
                }
            }
            ShoesKind::Heels => {
                if wet {
                    -0.3
                } else {
                    0.0
                }
            }
        }
    }
}

impl WeatherSuitability for GarmentKind {
    fn weather_delta(&self, weather: &WeatherSnapshot) -> f64 {
        match self {
            GarmentKind::Outer(kind) => kind.weather_delta(weather),
            GarmentKind::Top(kind) => kind.weather_delta(weather),
            GarmentKind::Bottom(kind) => kind.weather_delta(weather),
            GarmentKind::Shoes(kind) => kind.weather_delta(weather),
        }
    }
}

impl WeatherSuitability for Material {
    fn weather_delta(&self, weather: &WeatherSnapshot) -> f64 {
        let t = weather.temperature;
        let wet = weather.is_wet();
        match self {
            Material::Linen => {
                if t >= 24.0 {
                    0.3
                } else if t < 15.0 {
                    -0.3
                } else {
                    0.0
                }
            }
            Material::Wool | Material::Cashmere => {
                if t < 10.0 {
                    0.3
                } else if t >= 22.0 {
                    -0.4
                } else {
                    0.0
                }
            }
            Material::Down => {
                if t < 5.0 {
                    0.4
                } else if t >= 15.0 {
                    -0.6
                } else {
                    0.0
                }
            }
            Material::Fleece => {
                if t < 10.0 {
                    0.2
                } else if t >= 20.0 {
                    -0.3
                } else {
                    0.0
                }
            }
            Material::Leather | Material::Corduroy | Material::Tweed if wet => -0.3,
            Material::Silk => {
                let delta = if t >= 18.0 { 0.1 } else { 0.0 };
                if wet {
                    delta - 0.2
                } else {
                    delta
                }
            }
            Material::Nylon | Material::Polyester if wet => 0.2,
            Material::Denim if t >= 28.0 => -0.2,
            _ => 0.0,
        }
    }
}

/// Scores single garments against a forecast within a `[floor, ceiling]` band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemScorer {
    floor: f64,
    ceiling: f64,
}

impl ItemScorer {
    pub fn new(floor: f64, ceiling: f64) -> Self {
        Self { floor, ceiling }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.score_floor, config.score_ceiling)
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Neutral starting score: the midpoint of the band.
    pub fn baseline(&self) -> f64 {
        (self.floor + self.ceiling) / 2.0
    }

    /// Sum `deltas` onto the baseline and clamp into the band.
    pub fn combine(&self, deltas: impl IntoIterator<Item = f64>) -> f64 {
        let sum: f64 = deltas.into_iter().sum();
        let raw = if sum.is_nan() {
            self.baseline()
        } else {
            self.baseline() + sum
        };
        raw.clamp(self.floor, self.ceiling)
    }

    /// Weather deltas for every attribute the garment declares.
    pub fn deltas(attributes: &Attributes, weather: &WeatherSnapshot) -> Vec<f64> {
        let mut deltas = Vec::with_capacity(2);
        if let Some(kind) = attributes.kind {
            deltas.push(kind.weather_delta(weather));
        }
        if attributes.material != Material::Other {
            deltas.push(attributes.material.weather_delta(weather));
        }
        deltas
    }

    pub fn score(&self, garment: Garment, weather: &WeatherSnapshot) -> ScoredGarment {
        let attributes = Attributes::resolve(&garment);
        let score = self.combine(Self::deltas(&attributes, weather));
        ScoredGarment {
            garment,
            score,
            attributes,
        }
    }
}

impl Default for ItemScorer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}
