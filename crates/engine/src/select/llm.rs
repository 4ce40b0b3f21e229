//! LLM-assisted outfit selection.
//!
//! The model sees a random sample of scored candidates and answers with a
//! JSON id list. Every failure on this path (gateway error, prose without
//! JSON, ids outside the sample) degrades to an empty selection so the caller
//! can fall through to rule-based search.

use std::collections::HashMap;
use std::sync::Arc;

use outfitter_llm::CompletionGateway;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::rules::OutfitRules;
use crate::types::{ComfortProfile, GarmentId, OwnerId, ScoredGarment, WeatherSnapshot};

const SELECTION_PROMPT: &str = r#"You are a personal stylist choosing one outfit for today from the wardrobe below.

Wearer:
{profile}

Weather:
{weather}

Candidate garments (one JSON object per line):
{garments}

Rules:
1. Pick at most one garment from each of: outer, dress, top, bottom, shoes.
2. Include either a dress, or one top together with one bottom. A dress replaces both.
3. Accessory, bag, hat and scarf items may appear at most {max_accessories} times in total.
4. Use at most {max_items} garments.
5. Only use ids from the candidate list.

Respond with ONLY a JSON object of the form {"ids": ["<garment id>", ...]}.
Do not include any explanation before or after the JSON."#;

/// Request facts shown to the model alongside the candidates.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub owner: OwnerId,
    pub profile: &'a ComfortProfile,
    pub weather: &'a WeatherSnapshot,
}

/// Why a model response could not be read as an id list.
#[derive(Debug, Error)]
pub enum SelectionParseError {
    #[error("response contains no JSON object or array")]
    NoJson,

    #[error("malformed JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response JSON has no \"ids\" array")]
    MissingIds,
}

/// Asks a completion gateway to pick an outfit.
#[derive(Clone)]
pub struct LlmSelector {
    gateway: Arc<dyn CompletionGateway>,
    rules: OutfitRules,
    sample_size: usize,
}

impl std::fmt::Debug for LlmSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSelector")
            .field("gateway", &self.gateway.name())
            .field("rules", &self.rules)
            .field("sample_size", &self.sample_size)
            .finish()
    }
}

impl LlmSelector {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        rules: OutfitRules,
        sample_size: usize,
    ) -> Self {
        Self {
            gateway,
            rules,
            sample_size,
        }
    }

    /// Random subset of at most `sample_size` candidates, in layer order.
    pub fn sample_candidates<'a, R: Rng + ?Sized>(
        &self,
        pool: &'a [ScoredGarment],
        rng: &mut R,
    ) -> Vec<&'a ScoredGarment> {
        let mut sample: Vec<&ScoredGarment> = pool.choose_multiple(rng, self.sample_size).collect();
        sample.sort_by_key(|g| (g.category().layer_rank(), g.id()));
        sample
    }

    pub fn build_prompt(&self, ctx: &PromptContext<'_>, sample: &[&ScoredGarment]) -> String {
        let profile = json!({
            "owner": ctx.owner.to_string(),
            "season_sensitivity": ctx.profile.sensitivity,
            "sensitivity_scale": "1 = relaxed about season, 5 = strict",
        });
        let weather = json!({
            "season": ctx.weather.season().to_string(),
            "sky": ctx.weather.sky,
            "precipitation": ctx.weather.precipitation,
            "precipitation_mm": ctx.weather.precipitation_amount,
            "precipitation_probability": ctx.weather.precipitation_probability,
            "temperature_c": ctx.weather.temperature,
            "temperature_min_c": ctx.weather.temperature_min,
            "temperature_max_c": ctx.weather.temperature_max,
        });
        let garments = sample
            .iter()
            .map(|g| {
                json!({
                    "id": g.id().to_string(),
                    "category": g.category().as_str(),
                    "type": g.garment.kind,
                    "color": g.garment.color,
                    "material": g.garment.material,
                    "style": g.garment.style,
                    "season": g.garment.season,
                    "weather_fit": (g.score * 100.0).round() / 100.0,
                })
                .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n");

        SELECTION_PROMPT
            .replace("{profile}", &pretty(&profile))
            .replace("{weather}", &pretty(&weather))
            .replace("{garments}", &garments)
            .replace("{max_items}", &self.rules.max_items.to_string())
            .replace("{max_accessories}", &self.rules.max_accessories.to_string())
    }

    /// Ask the model to choose from `sample`.
    ///
    /// Returns the chosen garments in the model's order, restricted to the
    /// sample and trimmed to the composition rules. Empty on any failure.
    pub async fn select<'a>(
        &self,
        ctx: &PromptContext<'_>,
        sample: &[&'a ScoredGarment],
    ) -> Vec<&'a ScoredGarment> {
        if sample.is_empty() {
            return Vec::new();
        }
        let prompt = self.build_prompt(ctx, sample);
        let text = match self.gateway.complete(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    target: "outfitter::llm",
                    gateway = self.gateway.name(),
                    error = %err,
                    "Completion failed; LLM selection is empty"
                );
                return Vec::new();
            }
        };
        let ids = match parse_selection(&text) {
            Ok(ids) => ids,
            Err(err) => {
                warn!(
                    target: "outfitter::llm",
                    gateway = self.gateway.name(),
                    error = %err,
                    "Unreadable model response; LLM selection is empty"
                );
                return Vec::new();
            }
        };

        let by_id: HashMap<GarmentId, &'a ScoredGarment> =
            sample.iter().map(|g| (g.id(), *g)).collect();
        let resolved: Vec<&'a ScoredGarment> =
            ids.iter().filter_map(|id| by_id.get(id).copied()).collect();
        let picked = self.rules.sanitize(resolved, |g| g.category());
        debug!(
            target: "outfitter::llm",
            returned = ids.len(),
            kept = picked.len(),
            "Resolved model selection"
        );
        picked
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Extract garment ids from raw model text.
///
/// Accepts `{"ids": [...]}` or a bare array, optionally inside a code fence
/// or surrounded by prose. Entries that are not well-formed ids are skipped;
/// duplicates keep their first position.
pub fn parse_selection(text: &str) -> Result<Vec<GarmentId>, SelectionParseError> {
    let body = strip_code_fence(text);
    let value = first_json_value(body)?;
    let entries = match &value {
        Value::Object(map) => map
            .get("ids")
            .and_then(Value::as_array)
            .ok_or(SelectionParseError::MissingIds)?,
        Value::Array(items) => items,
        _ => return Err(SelectionParseError::MissingIds),
    };

    let mut ids = Vec::with_capacity(entries.len());
    for id in entries
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|s| s.parse::<GarmentId>().ok())
    {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Contents of the first fenced block, or the trimmed text when unfenced.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let after = &trimmed[start + 3..];
    let tag_len = after
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after.len());
    let body = &after[tag_len..];
    let end = body.find("```").unwrap_or(body.len());
    body[..end].trim()
}

/// First balanced `{...}` or `[...]` span that parses as JSON.
///
/// Unbalanced or unparseable openers are skipped and the scan resumes one
/// byte later.
fn first_json_value(text: &str) -> Result<Value, SelectionParseError> {
    let mut first_error = None;
    let mut offset = 0;
    while let Some(rel) = text[offset..].find(['{', '[']) {
        let start = offset + rel;
        if let Some(len) = balanced_end(&text[start..]) {
            match serde_json::from_str(&text[start..start + len]) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        offset = start + 1;
    }
    Err(first_error.map_or(SelectionParseError::NoJson, SelectionParseError::Json))
}

/// Byte length of the bracketed span starting at `text[0]`, honouring strings.
fn balanced_end(text: &str) -> Option<usize> {
    let mut stack = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => stack.push('}'),
            '[' => stack.push(']'),
            '}' | ']' => {
                if stack.pop() != Some(c) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{scored, weather, OWNER};
    use crate::types::Category;
    use async_trait::async_trait;
    use outfitter_llm::GatewayError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;

    const VALID: &str = "6f1c1c1e-8d5c-4b8e-9a57-2f0e3c7d9a10";

    /// Gateway returning a canned reply and recording the prompt.
    struct Canned {
        reply: Result<String, ()>,
        prompts: Mutex<Vec<String>>,
    }

    impl Canned {
        fn ok(text: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.into()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionGateway for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|_| GatewayError::EmptyCompletion)
        }
    }

    fn selector(gateway: Arc<Canned>) -> LlmSelector {
        LlmSelector::new(gateway, OutfitRules::default(), 30)
    }

    #[test]
    fn drops_entries_that_are_not_ids() {
        let ids = parse_selection(&format!(r#"{{"ids": ["{VALID}", "not-a-uuid", 42]}}"#)).unwrap();
        assert_eq!(ids, vec![VALID.parse().unwrap()]);
    }

    #[test]
    fn accepts_fenced_json_with_language_tag() {
        let text = format!("Here you go:\n```json\n{{\"ids\": [\"{VALID}\"]}}\n```\nEnjoy!");
        assert_eq!(parse_selection(&text).unwrap().len(), 1);
    }

    #[test]
    fn finds_json_inside_prose() {
        let payload = format!(r#"{{"ids": ["{VALID}", "{VALID}"], "why": "a }} b"}}"#);
        let text = format!("I picked [a calm look]: {payload} done");
        assert_eq!(parse_selection(&text).unwrap().len(), 1);
    }

    #[test]
    fn skips_unclosed_bracket_before_the_payload() {
        let text = format!(r#"My picks [casual look: {{"ids": ["{VALID}"]}}"#);
        let ids = parse_selection(&text).unwrap();
        assert_eq!(ids, vec![VALID.parse().unwrap()]);
    }

    #[test]
    fn accepts_bare_array() {
        let text = format!(r#"["{VALID}"]"#);
        assert_eq!(parse_selection(&text).unwrap().len(), 1);
    }

    #[test]
    fn reports_missing_json_and_missing_ids() {
        assert!(matches!(
            parse_selection("I could not decide."),
            Err(SelectionParseError::NoJson)
        ));
        assert!(matches!(
            parse_selection(r#"{"outfit": []}"#),
            Err(SelectionParseError::MissingIds)
        ));
        assert!(matches!(
            parse_selection(r#"{"ids": [1, 2"#),
            Err(SelectionParseError::NoJson)
        ));
    }

    #[test]
    fn balanced_end_skips_brackets_in_strings() {
        assert_eq!(balanced_end(r#"{"a": "]}"} tail"#), Some(11));
        assert_eq!(balanced_end("[1, {2]"), None);
    }

    #[test]
    fn sample_is_bounded_and_seeded() {
        let pool: Vec<_> = (0..40)
            .map(|_| scored(Category::Top, "", "white", "cotton", "casual", 1.0))
            .collect();
        let gateway = Canned::ok("{}");
        let selector = LlmSelector::new(gateway, OutfitRules::default(), 12);
        let a = selector.sample_candidates(&pool, &mut StdRng::seed_from_u64(9));
        let b = selector.sample_candidates(&pool, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.len(), 12);
        let ids = |s: &[&ScoredGarment]| s.iter().map(|g| g.id()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn prompt_lists_candidates_and_caps() {
        let top = scored(Category::Top, "shirt", "white", "cotton", "formal", 1.23);
        let gateway = Canned::ok("{}");
        let selector = selector(gateway);
        let forecast = weather(14.0);
        let profile = ComfortProfile::new(4);
        let ctx = PromptContext {
            owner: OWNER,
            profile: &profile,
            weather: &forecast,
        };
        let prompt = selector.build_prompt(&ctx, &[&top]);
        assert!(prompt.contains(&top.id().to_string()));
        assert!(prompt.contains("\"season\": \"autumn\""));
        assert!(prompt.contains("at most 2 times"));
        assert!(prompt.contains("at most 6 garments"));
        assert!(!prompt.contains("{garments}"));
    }

    #[tokio::test]
    async fn select_resolves_ids_within_the_sample() {
        let top = scored(Category::Top, "", "white", "cotton", "casual", 1.0);
        let bottom = scored(Category::Bottom, "", "navy", "denim", "casual", 1.0);
        let second_top = scored(Category::Top, "", "black", "cotton", "casual", 1.0);
        let reply = format!(
            r#"{{"ids": ["{}", "{}", "{}", "{VALID}"]}}"#,
            top.id(),
            second_top.id(),
            bottom.id()
        );
        let gateway = Canned::ok(reply);
        let selector = selector(gateway.clone());
        let forecast = weather(18.0);
        let profile = ComfortProfile::default();
        let ctx = PromptContext {
            owner: OWNER,
            profile: &profile,
            weather: &forecast,
        };

        let picked = selector.select(&ctx, &[&top, &bottom, &second_top]).await;

        let ids: Vec<_> = picked.iter().map(|g| g.id()).collect();
        assert_eq!(ids, vec![top.id(), bottom.id()]);
        assert_eq!(gateway.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn gateway_failure_yields_empty_selection() {
        let top = scored(Category::Top, "", "white", "cotton", "casual", 1.0);
        let selector = selector(Canned::failing());
        let forecast = weather(18.0);
        let profile = ComfortProfile::default();
        let ctx = PromptContext {
            owner: OWNER,
            profile: &profile,
            weather: &forecast,
        };
        assert!(selector.select(&ctx, &[&top]).await.is_empty());
    }

    #[tokio::test]
    async fn prose_reply_yields_empty_selection() {
        let top = scored(Category::Top, "", "white", "cotton", "casual", 1.0);
        let selector = selector(Canned::ok("Sorry, I cannot help with that."));
        let forecast = weather(18.0);
        let profile = ComfortProfile::default();
        let ctx = PromptContext {
            owner: OWNER,
            profile: &profile,
            weather: &forecast,
        };
        assert!(selector.select(&ctx, &[&top]).await.is_empty());
    }

    #[tokio::test]
    async fn empty_sample_skips_the_gateway() {
        let gateway = Canned::ok("{}");
        let selector = selector(gateway.clone());
        let forecast = weather(18.0);
        let profile = ComfortProfile::default();
        let ctx = PromptContext {
            owner: OWNER,
            profile: &profile,
            weather: &forecast,
        };
        assert!(selector.select(&ctx, &[]).await.is_empty());
        assert!(gateway.prompts.lock().unwrap().is_empty());
    }
}
