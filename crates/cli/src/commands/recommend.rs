use std::sync::Arc;

use anyhow::{bail, Context, Result};
use outfitter_engine::{
    ComfortProfile, EngineConfig, JsonFileWardrobe, Outfit, Recommender, SelectionStrategy,
    WeatherSnapshot,
};
use outfitter_llm::{AnthropicGateway, CompletionGateway};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use time::OffsetDateTime;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::cli::{OutputFormat, RecommendArgs};

/// Handle the `recommend` command.
pub(crate) fn handle_recommend_command(args: RecommendArgs) -> Result<()> {
    let mut config =
        EngineConfig::load(args.config.as_deref()).context("loading engine configuration")?;
    if args.llm {
        config.strategy = SelectionStrategy::LlmAssisted;
    }

    let weather = args.weather(OffsetDateTime::now_utc());
    check_weather(&weather)?;
    let comfort = ComfortProfile::new(args.sensitivity);

    let mut recommender = Recommender::new(
        Arc::new(JsonFileWardrobe::new(&args.wardrobe)),
        config.clone(),
    )?;
    if config.strategy == SelectionStrategy::LlmAssisted {
        if let Some(gateway) = llm_gateway() {
            recommender = recommender.with_gateway(gateway);
        }
    }
    debug!(target: "outfitter::cli", ?recommender, "Recommender ready");

    let rt = Runtime::new()?;
    let outfit = rt.block_on(async {
        match args.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                recommender
                    .recommend_with_rng(args.owner, &weather, &comfort, &mut rng)
                    .await
            }
            None => recommender.recommend(args.owner, &weather, &comfort).await,
        }
    })?;

    print!("{}", render(outfit.as_ref(), args.format)?);
    Ok(())
}

fn llm_gateway() -> Option<Arc<dyn CompletionGateway>> {
    match AnthropicGateway::from_env() {
        Ok(gateway) => Some(Arc::new(gateway)),
        Err(err) => {
            warn!(
                target: "outfitter::cli",
                error = %err,
                "LLM gateway unavailable; using rule-based search"
            );
            None
        }
    }
}

fn check_weather(weather: &WeatherSnapshot) -> Result<()> {
    let temps = [
        weather.temperature,
        weather.temperature_min,
        weather.temperature_max,
    ];
    if temps.iter().any(|t| !t.is_finite()) {
        bail!("temperatures must be finite numbers");
    }
    if weather.temperature_min > weather.temperature_max {
        bail!(
            "--temp-min ({}) is above --temp-max ({})",
            weather.temperature_min,
            weather.temperature_max
        );
    }
    if !weather.precipitation_amount.is_finite() || weather.precipitation_amount < 0.0 {
        bail!("--precip-amount must be a non-negative number");
    }
    Ok(())
}

fn render(outfit: Option<&Outfit>, format: OutputFormat) -> Result<String> {
    if format.is_json() {
        let doc = json!({ "recommendation": outfit });
        return Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?));
    }
    let Some(outfit) = outfit else {
        return Ok("No recommendation: the wardrobe has nothing wearable.\n".to_string());
    };
    let mut out = String::new();
    for id in &outfit.garment_ids {
        out.push_str(&format!("{id}\n"));
    }
    let score = outfit
        .score
        .map(|s| format!("{s:.3}"))
        .unwrap_or_else(|| "n/a".to_string());
    out.push_str(&format!("source: {:?}, score: {score}\n", outfit.source));
    Ok(out)
}
