//! The recommendation entry point.

use std::sync::Arc;

use outfitter_llm::CompletionGateway;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, SelectionStrategy};
use crate::error::EngineError;
use crate::outfit::CandidateOutfit;
use crate::season::SeasonFilter;
use crate::select::{
    best_outfit, random_outfit, top_candidates, LlmSelector, OutfitRules, PromptContext,
};
use crate::types::{ComfortProfile, Garment, GarmentId, OwnerId, ScoredGarment, WeatherSnapshot};
use crate::wardrobe::WardrobeSource;
use crate::weather::ItemScorer;

/// Which path produced an outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutfitSource {
    RuleBased,
    Llm,
    RandomFallback,
}

/// A recommended outfit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outfit {
    /// Garments in the order they are layered into the outfit.
    pub garment_ids: Vec<GarmentId>,
    pub source: OutfitSource,
    /// Normalised outfit score; absent for random fallbacks.
    pub score: Option<f64>,
}

impl Outfit {
    fn scored(outfit: &CandidateOutfit<'_>, source: OutfitSource) -> Self {
        Self {
            garment_ids: outfit.garment_ids(),
            source,
            score: Some(outfit.normalized_score()),
        }
    }

    fn unscored(garments: &[&Garment]) -> Self {
        Self {
            garment_ids: garments.iter().map(|g| g.id).collect(),
            source: OutfitSource::RandomFallback,
            score: None,
        }
    }
}

/// Stateless outfit recommender.
///
/// Holds only read-only collaborators and configuration, so one instance can
/// serve concurrent requests.
pub struct Recommender {
    wardrobe: Arc<dyn WardrobeSource>,
    gateway: Option<Arc<dyn CompletionGateway>>,
    config: EngineConfig,
    filter: SeasonFilter,
    scorer: ItemScorer,
    rules: OutfitRules,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("gateway", &self.gateway.as_ref().map(|g| g.name().to_string()))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Recommender {
    /// Fails with [`EngineError::InvalidConfig`] when `config` is out of range.
    pub fn new(
        wardrobe: Arc<dyn WardrobeSource>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            wardrobe,
            gateway: None,
            filter: SeasonFilter::new(config.unknown_season_policy),
            scorer: ItemScorer::from_config(&config),
            rules: OutfitRules::from_config(&config),
            config,
        })
    }

    /// Gateway used when the strategy is [`SelectionStrategy::LlmAssisted`].
    pub fn with_gateway(mut self, gateway: Arc<dyn CompletionGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommend an outfit for `owner`.
    ///
    /// `Ok(None)` means the wardrobe holds nothing wearable. Errors are
    /// limited to wardrobe failures.
    pub async fn recommend(
        &self,
        owner: OwnerId,
        weather: &WeatherSnapshot,
        comfort: &ComfortProfile,
    ) -> Result<Option<Outfit>, EngineError> {
        let mut rng = StdRng::from_entropy();
        self.recommend_with_rng(owner, weather, comfort, &mut rng)
            .await
    }

    /// [`recommend`](Self::recommend) with caller-supplied randomness.
    pub async fn recommend_with_rng<R: Rng + Send>(
        &self,
        owner: OwnerId,
        weather: &WeatherSnapshot,
        comfort: &ComfortProfile,
        rng: &mut R,
    ) -> Result<Option<Outfit>, EngineError> {
        let wardrobe = self.wardrobe.list_garments(owner).await?;
        if wardrobe.is_empty() {
            info!(target: "outfitter::recommend", %owner, "Wardrobe is empty; no recommendation");
            return Ok(None);
        }

        let eligible = self.filter.filter(wardrobe.clone(), weather, comfort);
        let scored: Vec<ScoredGarment> = eligible
            .iter()
            .cloned()
            .map(|g| self.scorer.score(g, weather))
            .collect();
        debug!(
            target: "outfitter::recommend",
            wardrobe = wardrobe.len(),
            eligible = scored.len(),
            "Scored eligible garments"
        );

        if self.config.strategy == SelectionStrategy::LlmAssisted {
            if let Some(outfit) = self.llm_outfit(owner, weather, comfort, &scored, rng).await {
                return Ok(Some(report(outfit)));
            }
        }

        let pool = top_candidates(scored, self.config.top_k_per_category);
        if let Some(outcome) = best_outfit(&pool, &self.rules) {
            return Ok(Some(report(Outfit::scored(
                &outcome.outfit,
                OutfitSource::RuleBased,
            ))));
        }

        let mut picked = random_outfit(&eligible, &self.rules, rng);
        if picked.is_empty() {
            debug!(
                target: "outfitter::recommend",
                "Nothing usable after season filtering; falling back to the whole wardrobe"
            );
            picked = random_outfit(&wardrobe, &self.rules, rng);
        }
        if picked.is_empty() {
            info!(
                target: "outfitter::recommend",
                %owner,
                "No wearable garments; no recommendation"
            );
            return Ok(None);
        }
        Ok(Some(report(Outfit::unscored(&picked))))
    }

    async fn llm_outfit<R: Rng + Send>(
        &self,
        owner: OwnerId,
        weather: &WeatherSnapshot,
        comfort: &ComfortProfile,
        scored: &[ScoredGarment],
        rng: &mut R,
    ) -> Option<Outfit> {
        let Some(gateway) = &self.gateway else {
            warn!(
                target: "outfitter::recommend",
                "LLM-assisted strategy configured without a gateway; using rule-based search"
            );
            return None;
        };
        let selector = LlmSelector::new(
            Arc::clone(gateway),
            self.rules,
            self.config.llm_sample_size,
        );
        let sample = selector.sample_candidates(scored, rng);
        let ctx = PromptContext {
            owner,
            profile: comfort,
            weather,
        };
        let picked = selector.select(&ctx, &sample).await;

        let categories: Vec<_> = picked.iter().map(|g| g.category()).collect();
        if !OutfitRules::has_base(&categories) {
            debug!(
                target: "outfitter::recommend",
                picked = picked.len(),
                "LLM selection has no base; falling through"
            );
            return None;
        }
        let outfit = CandidateOutfit::from_items(picked);
        Some(Outfit::scored(&outfit, OutfitSource::Llm))
    }
}

fn report(outfit: Outfit) -> Outfit {
    info!(
        target: "outfitter::recommend",
        source = ?outfit.source,
        items = outfit.garment_ids.len(),
        score = ?outfit.score,
        "Recommended outfit"
    );
    outfit
}
