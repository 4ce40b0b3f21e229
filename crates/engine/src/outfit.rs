//! Incremental outfit assembly and normalisation.

use crate::attributes::{Material, Style, Tone};
use crate::compat::score_pair;
use crate::types::{Category, GarmentId, ScoredGarment};

/// Bonus when a new item continues a run of identically-toned items.
pub const MONOCHROME_STREAK_BONUS: f64 = 0.3;

const NORMALIZATION_EXPONENT: f64 = 1.2;
const SIZE_BONUS_WEIGHT: f64 = 1.5;
const DRESS_BONUS: f64 = 1.0;
const DRESS_LAYER_BONUS: f64 = 0.5;
const SEPARATES_OUTER_BONUS: f64 = 0.3;
const SEPARATES_SHOES_BONUS: f64 = 0.3;
const SEPARATES_ACCESSORY_BONUS: f64 = 0.2;
const COMPLETENESS_MIN_ITEMS: usize = 5;
const COMPLETENESS_CAP_ITEMS: usize = 7;
const COMPLETENESS_WEIGHT: f64 = 0.2;
const STYLE_CONSISTENCY_BONUS: f64 = 0.8;

/// An append-only set of garments being scored as one outfit.
///
/// The cumulative score only ever grows by the delta computed in [`add`];
/// prior pairs are never re-scored.
///
/// [`add`]: CandidateOutfit::add
#[derive(Debug, Clone, Default)]
pub struct CandidateOutfit<'a> {
    items: Vec<&'a ScoredGarment>,
    harmony_total: f64,
    pairing_total: f64,
    streak_total: f64,
    tones: Vec<Tone>,
    materials: Vec<Material>,
    styles: Vec<Style>,
}

impl<'a> CandidateOutfit<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an outfit by adding `items` in order.
    pub fn from_items(items: impl IntoIterator<Item = &'a ScoredGarment>) -> Self {
        let mut outfit = Self::new();
        for item in items {
            outfit.add(item);
        }
        outfit
    }

    /// Append `item` and return the score delta it contributed.
    pub fn add(&mut self, item: &'a ScoredGarment) -> f64 {
        let mut harmony = 0.0;
        let mut pairing = 0.0;
        for prior in &self.items {
            let pair = score_pair(&prior.attributes, &item.attributes);
            harmony += pair.harmony();
            pairing += pair.pairing;
        }

        let streak = if self.tone_streak() {
            MONOCHROME_STREAK_BONUS
        } else {
            0.0
        };

        self.harmony_total += harmony;
        self.pairing_total += pairing;
        self.streak_total += streak;
        self.tones.push(item.attributes.tone);
        self.materials.push(item.attributes.material);
        self.styles.push(item.attributes.style);
        self.items.push(item);

        harmony + pairing + streak
    }

    /// Two or more prior items, all with the same tone.
    fn tone_streak(&self) -> bool {
        match self.tones.split_first() {
            Some((first, rest)) if !rest.is_empty() => rest.iter().all(|t| t == first),
            _ => false,
        }
    }

    pub fn items(&self) -> &[&'a ScoredGarment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Running cumulative score.
    pub fn total(&self) -> f64 {
        self.harmony_total + self.pairing_total + self.streak_total
    }

    /// Style, material, tone and color contributions across all pairs.
    pub fn harmony_total(&self) -> f64 {
        self.harmony_total
    }

    /// Sub-type pair adjustments, each applicable pair counted once.
    pub fn pairing_total(&self) -> f64 {
        self.pairing_total
    }

    pub fn streak_total(&self) -> f64 {
        self.streak_total
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn contains_category(&self, category: Category) -> bool {
        self.items.iter().any(|g| g.category() == category)
    }

    pub fn count_category(&self, category: Category) -> usize {
        self.items.iter().filter(|g| g.category() == category).count()
    }

    pub fn accessory_count(&self) -> usize {
        self.items
            .iter()
            .filter(|g| g.category().is_accessory_like())
            .count()
    }

    pub fn garment_ids(&self) -> Vec<GarmentId> {
        self.items.iter().map(|g| g.id()).collect()
    }

    /// Sum of the standalone weather scores of every item.
    pub fn weather_total(&self) -> f64 {
        self.items.iter().map(|g| g.score).sum()
    }

    /// Size-normalised score plus composition bonuses. Pure.
    pub fn normalized_score(&self) -> f64 {
        let n = self.items.len();
        if n == 0 {
            return 0.0;
        }
        let count = n as f64;
        let normalized = self.total() / count.powf(NORMALIZATION_EXPONENT);
        let mut score = normalized + (count + 1.0).ln() * SIZE_BONUS_WEIGHT;

        let has_outer = self.contains_category(Category::Outer);
        let has_shoes = self.contains_category(Category::Shoes);

        if self.contains_category(Category::Dress) {
            score += DRESS_BONUS;
            if has_outer {
                score += DRESS_LAYER_BONUS;
            }
            if has_shoes {
                score += DRESS_LAYER_BONUS;
            }
        }

        if self.contains_category(Category::Top) && self.contains_category(Category::Bottom) {
            if has_outer {
                score += SEPARATES_OUTER_BONUS;
            }
            if has_shoes {
                score += SEPARATES_SHOES_BONUS;
            }
            if self.accessory_count() > 0 {
                score += SEPARATES_ACCESSORY_BONUS;
            }
        }

        if n >= COMPLETENESS_MIN_ITEMS {
            score += COMPLETENESS_WEIGHT * n.min(COMPLETENESS_CAP_ITEMS) as f64;
        }

        if self.single_style().is_some() {
            score += STYLE_CONSISTENCY_BONUS;
        }

        score
    }

    /// The shared style when two or more items all declare the same, known style.
    fn single_style(&self) -> Option<Style> {
        let (first, rest) = self.styles.split_first()?;
        if rest.is_empty() || *first == Style::Other {
            return None;
        }
        rest.iter().all(|s| s == first).then_some(*first)
    }
}
