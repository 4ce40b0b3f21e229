use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use crate::types::{Category, ScoredGarment};

/// Best-scoring garments per category, best first.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    by_category: BTreeMap<Category, Vec<ScoredGarment>>,
}

/// Higher weather score first; ties by ascending id.
fn by_score_then_id(a: &ScoredGarment, b: &ScoredGarment) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.id().cmp(&b.id()))
}

/// Keep the `k` best-scoring garments of every recommendable category.
pub fn top_candidates(scored: Vec<ScoredGarment>, k: usize) -> CandidatePool {
    let mut by_category: BTreeMap<Category, Vec<ScoredGarment>> = BTreeMap::new();
    for item in scored {
        if item.category().is_recommendable() {
            by_category.entry(item.category()).or_default().push(item);
        }
    }
    for items in by_category.values_mut() {
        items.sort_by(by_score_then_id);
        items.truncate(k);
    }

    let pool = CandidatePool { by_category };
    debug!(
        target: "outfitter::candidates",
        k,
        categories = pool.by_category.len(),
        candidates = pool.len(),
        "Selected top candidates"
    );
    pool
}

impl CandidatePool {
    pub fn get(&self, category: Category) -> &[ScoredGarment] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Accessory-like candidates across all such categories, best first.
    pub fn accessories(&self) -> Vec<&ScoredGarment> {
        let mut items: Vec<&ScoredGarment> = self
            .by_category
            .iter()
            .filter(|(c, _)| c.is_accessory_like())
            .flat_map(|(_, items)| items.iter())
            .collect();
        items.sort_by(|a, b| by_score_then_id(a, b));
        items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredGarment> {
        self.by_category.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
