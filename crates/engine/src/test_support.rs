//! Test fixtures for the engine's unit tests.

use time::{Date, Month};
use uuid::Uuid;

use crate::attributes::Attributes;
use crate::types::{
    Category, Garment, GarmentId, OwnerId, PrecipitationType, ScoredGarment, SkyStatus,
    WeatherSnapshot,
};

pub(crate) const OWNER: OwnerId = OwnerId(Uuid::from_u128(0xA11CE));

/// Garment with the given attributes and an all-season tag.
pub(crate) fn garment(
    category: Category,
    kind: &str,
    color: &str,
    material: &str,
    style: &str,
) -> Garment {
    Garment {
        id: GarmentId::random(),
        owner: OWNER,
        category,
        kind: kind.into(),
        color: color.into(),
        material: material.into(),
        style: style.into(),
        season: "all-season".into(),
    }
}

pub(crate) fn garment_in_season(category: Category, season: &str) -> Garment {
    Garment {
        season: season.into(),
        ..garment(category, "", "white", "cotton", "casual")
    }
}

/// Scored garment with a fixed weather score.
pub(crate) fn scored(
    category: Category,
    kind: &str,
    color: &str,
    material: &str,
    style: &str,
    score: f64,
) -> ScoredGarment {
    let garment = garment(category, kind, color, material, style);
    let attributes = Attributes::resolve(&garment);
    ScoredGarment {
        garment,
        score,
        attributes,
    }
}

/// Dry, clear weather on the given day at the given temperature.
pub(crate) fn weather_on(year: i32, month: u32, day: u32, temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        sky: SkyStatus::Clear,
        precipitation: PrecipitationType::None,
        precipitation_amount: 0.0,
        precipitation_probability: 0,
        temperature,
        temperature_min: temperature - 4.0,
        temperature_max: temperature + 4.0,
        forecast_at: Month::try_from(month as u8)
            .and_then(|m| Date::from_calendar_date(year, m, day as u8))
            .and_then(|d| d.with_hms(9, 0, 0))
            .expect("valid fixture date")
            .assume_utc(),
    }
}

pub(crate) fn weather(temperature: f64) -> WeatherSnapshot {
    weather_on(2026, 10, 16, temperature)
}

pub(crate) fn rainy(temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        sky: SkyStatus::Overcast,
        precipitation: PrecipitationType::Rain,
        precipitation_amount: 12.0,
        precipitation_probability: 90,
        ..weather(temperature)
    }
}
