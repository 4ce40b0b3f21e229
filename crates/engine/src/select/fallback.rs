use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::rules::OutfitRules;
use crate::types::{Category, Garment};

/// Best-effort outfit with no compatibility guarantees.
///
/// Picks a dress or a top and bottom (even odds when both are possible). With
/// only half of the separates it keeps whichever exists, and with no dress,
/// top or bottom at all it falls back to an outer layer. Then shoes when
/// available, then one or two accessory-like extras. Never fails; the result
/// is empty only when nothing in `garments` is wearable.
pub fn random_outfit<'a, R: Rng + ?Sized>(
    garments: &'a [Garment],
    rules: &OutfitRules,
    rng: &mut R,
) -> Vec<&'a Garment> {
    let of = move |category: Category| -> Vec<&'a Garment> {
        garments.iter().filter(|g| g.category == category).collect()
    };
    let dresses = of(Category::Dress);
    let tops = of(Category::Top);
    let bottoms = of(Category::Bottom);
    let outers = of(Category::Outer);
    let shoes = of(Category::Shoes);
    let extras: Vec<&Garment> = garments
        .iter()
        .filter(|g| g.category.is_accessory_like())
        .collect();

    let mut picked: Vec<&Garment> = Vec::new();
    let separates = !tops.is_empty() && !bottoms.is_empty();
    let wear_dress = !dresses.is_empty() && (!separates || rng.gen_bool(0.5));

    if wear_dress {
        picked.extend(dresses.choose(rng).copied());
    } else {
        picked.extend(tops.choose(rng).copied());
        picked.extend(bottoms.choose(rng).copied());
    }
    if picked.is_empty() {
        picked.extend(outers.choose(rng).copied());
    }
    picked.extend(shoes.choose(rng).copied());

    if !extras.is_empty() {
        let wanted = rng.gen_range(1..=2usize).min(extras.len());
        picked.extend(extras.choose_multiple(rng, wanted).copied());
    }

    let outfit = rules.sanitize(picked, |g| g.category);
    debug!(
        target: "outfitter::fallback",
        pool = garments.len(),
        picked = outfit.len(),
        dress = wear_dress,
        "Random fallback outfit"
    );
    outfit
}
