//! Shared test utilities for outfitter crates.
//!
//! Garment and weather builders, a scripted completion gateway, a temporary
//! wardrobe directory, and guards for tests that touch environment variables.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex, MutexGuard};

use async_trait::async_trait;
use outfitter_engine::{
    Category, Garment, GarmentId, OwnerId, PrecipitationType, SkyStatus, WeatherSnapshot,
};
use outfitter_llm::{CompletionGateway, GatewayError};
use time::{Date, Month};
use uuid::Uuid;

/// Owner used by fixtures unless a test needs a second wardrobe.
pub const OWNER: OwnerId = OwnerId(Uuid::from_u128(0x0_07F1_7E55));

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = outfitter_test_utils::set_env_var("OUTFITTER_TOP_K", Some("4"));
/// // OUTFITTER_TOP_K is "4" until _guard drops
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Builder for wardrobe garments. Defaults to an all-season item owned by [`OWNER`].
#[derive(Debug, Clone)]
pub struct GarmentBuilder {
    garment: Garment,
}

impl GarmentBuilder {
    pub fn new(category: Category) -> Self {
        Self {
            garment: Garment {
                id: GarmentId::random(),
                owner: OWNER,
                category,
                kind: String::new(),
                color: String::new(),
                material: String::new(),
                style: String::new(),
                season: "all-season".into(),
            },
        }
    }

    pub fn owner(mut self, owner: OwnerId) -> Self {
        self.garment.owner = owner;
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.garment.kind = kind.into();
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.garment.color = color.into();
        self
    }

    pub fn material(mut self, material: &str) -> Self {
        self.garment.material = material.into();
        self
    }

    pub fn style(mut self, style: &str) -> Self {
        self.garment.style = style.into();
        self
    }

    pub fn season(mut self, season: &str) -> Self {
        self.garment.season = season.into();
        self
    }

    pub fn build(self) -> Garment {
        self.garment
    }
}

/// Shorthand for `GarmentBuilder::new(category)`.
pub fn garment(category: Category) -> GarmentBuilder {
    GarmentBuilder::new(category)
}

/// Dry, clear weather at 09:00 UTC on the given day.
pub fn weather_on(year: i32, month: u8, day: u8, temperature: f64) -> WeatherSnapshot {
    let forecast_at = Month::try_from(month)
        .and_then(|m| Date::from_calendar_date(year, m, day))
        .and_then(|d| d.with_hms(9, 0, 0))
        .expect("valid fixture date")
        .assume_utc();
    WeatherSnapshot {
        sky: SkyStatus::Clear,
        precipitation: PrecipitationType::None,
        precipitation_amount: 0.0,
        precipitation_probability: 0,
        temperature,
        temperature_min: temperature - 4.0,
        temperature_max: temperature + 4.0,
        forecast_at,
    }
}

/// Dry, clear mid-October weather.
pub fn weather(temperature: f64) -> WeatherSnapshot {
    weather_on(2026, 10, 16, temperature)
}

pub fn rainy(temperature: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        sky: SkyStatus::Overcast,
        precipitation: PrecipitationType::Rain,
        precipitation_amount: 12.0,
        precipitation_probability: 90,
        ..weather(temperature)
    }
}

/// Completion gateway that replays canned responses and records prompts.
///
/// Replies are consumed in order; once exhausted, every call fails.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose first call returns `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new().then_reply(text)
    }

    /// A gateway whose first call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new().then_fail(message)
    }

    pub fn then_reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    fn push(&self, reply: Result<String, String>) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl CompletionGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(prompt.to_string());
        let next = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(GatewayError::Status {
                status: 500,
                message,
            }),
            None => Err(GatewayError::EmptyCompletion),
        }
    }
}

/// Temporary directory holding wardrobe and config files.
///
/// The tempdir is removed when this struct is dropped.
pub struct WardrobeFixture {
    pub tempdir: tempfile::TempDir,
}

impl WardrobeFixture {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            tempdir: tempfile::tempdir()?,
        })
    }

    pub fn home_path(&self) -> &std::path::Path {
        self.tempdir.path()
    }

    /// Create an RAII guard that sets HOME to this fixture's temp directory.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(self.home_path().to_str().unwrap()))
    }

    /// Write `garments` as `wardrobe.json` and return its path.
    pub fn write_wardrobe(&self, garments: &[Garment]) -> std::io::Result<PathBuf> {
        let path = self.tempdir.path().join("wardrobe.json");
        let json = serde_json::to_string_pretty(garments)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Write `~/.outfitter/config.toml` inside the fixture home.
    pub fn write_home_config(&self, toml: &str) -> std::io::Result<PathBuf> {
        let dir = self.tempdir.path().join(".outfitter");
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("config.toml");
        std::fs::write(&path, toml)?;
        Ok(path)
    }
}
