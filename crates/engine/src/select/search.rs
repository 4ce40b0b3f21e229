use std::cmp::Ordering;

use tracing::debug;

use super::candidates::CandidatePool;
use super::rules::OutfitRules;
use crate::outfit::CandidateOutfit;
use crate::types::{Category, ScoredGarment};

/// Single-item slots, in the order items are added to an outfit.
const SLOTS: [Category; 5] = [
    Category::Outer,
    Category::Dress,
    Category::Top,
    Category::Bottom,
    Category::Shoes,
];

/// Winner of an exhaustive search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub outfit: CandidateOutfit<'a>,
    pub score: f64,
    /// Complete outfits scored during the search.
    pub evaluated: usize,
}

/// Enumerate every admissible outfit in `pool` and return the best one.
///
/// Ties on normalised score go to the higher summed weather score, then to
/// the lexicographically smaller id list. Returns `None` when no combination
/// has a base.
pub fn best_outfit<'a>(pool: &'a CandidatePool, rules: &OutfitRules) -> Option<SearchOutcome<'a>> {
    let mut search = Search {
        pool,
        rules,
        accessories: pool.accessories(),
        chosen: Vec::new(),
        categories: Vec::new(),
        best: None,
        evaluated: 0,
    };
    search.fill_slot(0);

    let evaluated = search.evaluated;
    debug!(
        target: "outfitter::search",
        evaluated,
        found = search.best.is_some(),
        "Combination search finished"
    );
    search.best.map(|mut best| {
        best.evaluated = evaluated;
        best
    })
}

struct Search<'p, 'a> {
    pool: &'a CandidatePool,
    rules: &'p OutfitRules,
    accessories: Vec<&'a ScoredGarment>,
    chosen: Vec<&'a ScoredGarment>,
    categories: Vec<Category>,
    best: Option<SearchOutcome<'a>>,
    evaluated: usize,
}

impl<'a> Search<'_, 'a> {
    fn push(&mut self, item: &'a ScoredGarment) {
        self.categories.push(item.category());
        self.chosen.push(item);
    }

    fn pop(&mut self) {
        self.categories.pop();
        self.chosen.pop();
    }

    fn fill_slot(&mut self, index: usize) {
        let Some(&category) = SLOTS.get(index) else {
            // Accessories never supply a base, so base-less branches end here.
            if OutfitRules::has_base(&self.categories) {
                self.add_accessories(0);
            }
            return;
        };

        self.fill_slot(index + 1);
        if !self.rules.can_add(&self.categories, category) {
            return;
        }
        let pool = self.pool;
        for item in pool.get(category) {
            self.push(item);
            self.fill_slot(index + 1);
            self.pop();
        }
    }

    fn add_accessories(&mut self, start: usize) {
        self.evaluate();
        for i in start..self.accessories.len() {
            let item = self.accessories[i];
            if self.rules.can_add(&self.categories, item.category()) {
                self.push(item);
                self.add_accessories(i + 1);
                self.pop();
            }
        }
    }

    fn evaluate(&mut self) {
        self.evaluated += 1;
        let outfit = CandidateOutfit::from_items(self.chosen.iter().copied());
        let score = outfit.normalized_score();
        let better = match &self.best {
            None => true,
            Some(best) => beats(score, &outfit, best.score, &best.outfit),
        };
        if better {
            self.best = Some(SearchOutcome {
                outfit,
                score,
                evaluated: 0,
            });
        }
    }
}

fn beats(
    score: f64,
    outfit: &CandidateOutfit<'_>,
    best_score: f64,
    best: &CandidateOutfit<'_>,
) -> bool {
    score
        .total_cmp(&best_score)
        .then_with(|| outfit.weather_total().total_cmp(&best.weather_total()))
        .then_with(|| best.garment_ids().cmp(&outfit.garment_ids()))
        == Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::candidates::top_candidates;
    use crate::test_support::scored;

    #[test]
    fn prefers_harmonious_combination() {
        let pool = top_candidates(
            vec![
                scored(Category::Top, "shirt", "white", "cotton", "formal", 1.0),
                scored(Category::Top, "hoodie", "red", "fleece", "sporty", 1.0),
                scored(Category::Bottom, "slacks", "navy", "wool", "formal", 1.0),
            ],
            3,
        );
        let outcome = best_outfit(&pool, &OutfitRules::default()).unwrap();
        let styles: Vec<_> = outcome
            .outfit
            .items()
            .iter()
            .map(|g| g.garment.style.as_str())
            .collect();
        assert_eq!(styles, vec!["formal", "formal"]);
    }

    #[test]
    fn no_base_means_no_outcome() {
        let pool = top_candidates(
            vec![
                scored(Category::Shoes, "sneakers", "white", "leather", "casual", 1.0),
                scored(Category::Hat, "", "black", "wool", "casual", 1.0),
                scored(Category::Top, "", "white", "cotton", "casual", 1.0),
            ],
            3,
        );
        assert!(best_outfit(&pool, &OutfitRules::default()).is_none());
    }

    #[test]
    fn counts_only_complete_outfits() {
        let pool = top_candidates(
            vec![
                scored(Category::Top, "", "white", "cotton", "casual", 1.0),
                scored(Category::Bottom, "", "black", "cotton", "casual", 1.0),
                scored(Category::Shoes, "", "white", "leather", "casual", 1.0),
            ],
            3,
        );
        let outcome = best_outfit(&pool, &OutfitRules::default()).unwrap();
        // {top, bottom} and {top, bottom, shoes}
        assert_eq!(outcome.evaluated, 2);
    }

    #[test]
    fn dress_and_separates_compete() {
        let pool = top_candidates(
            vec![
                scored(Category::Dress, "", "beige", "linen", "romantic", 1.7),
                scored(Category::Shoes, "", "ivory", "leather", "romantic", 1.5),
                scored(Category::Top, "", "red", "leather", "sporty", 0.3),
                scored(Category::Bottom, "", "green", "linen", "formal", 0.3),
            ],
            3,
        );
        let outcome = best_outfit(&pool, &OutfitRules::default()).unwrap();
        assert!(outcome.outfit.contains_category(Category::Dress));
        assert!(!outcome.outfit.contains_category(Category::Top));
    }

    #[test]
    fn search_is_deterministic() {
        let items = vec![
            scored(Category::Top, "", "white", "cotton", "casual", 1.0),
            scored(Category::Top, "", "white", "cotton", "casual", 1.0),
            scored(Category::Bottom, "", "black", "cotton", "casual", 1.0),
            scored(Category::Bottom, "", "black", "cotton", "casual", 1.0),
        ];
        let pool = top_candidates(items, 3);
        let first = best_outfit(&pool, &OutfitRules::default()).unwrap();
        let second = best_outfit(&pool, &OutfitRules::default()).unwrap();
        assert_eq!(first.outfit.garment_ids(), second.outfit.garment_ids());

        let smallest_top = pool.get(Category::Top).iter().map(|g| g.id()).min().unwrap();
        assert_eq!(first.outfit.garment_ids()[0], smallest_top);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        const CATEGORIES: [Category; 9] = [
            Category::Outer,
            Category::Dress,
            Category::Top,
            Category::Bottom,
            Category::Shoes,
            Category::Hat,
            Category::Bag,
            Category::Scarf,
            Category::Underwear,
        ];
        const COLORS: [&str; 5] = ["white", "navy", "red", "green", "beige"];
        const STYLES: [&str; 4] = ["casual", "formal", "street", "romantic"];

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(48))]

            #[test]
            fn winner_is_always_admissible(
                specs in prop::collection::vec(
                    (0..9usize, 0..5usize, 0..4usize, 0.2..1.8f64),
                    0..14,
                ),
                max_accessories in 0..3usize,
            ) {
                let items: Vec<_> = specs
                    .into_iter()
                    .map(|(c, col, s, score)| {
                        scored(CATEGORIES[c], "", COLORS[col], "cotton", STYLES[s], score)
                    })
                    .collect();
                let rules = OutfitRules::new(6, max_accessories);
                let pool = top_candidates(items, 2);
                if let Some(outcome) = best_outfit(&pool, &rules) {
                    let categories: Vec<_> =
                        outcome.outfit.items().iter().map(|g| g.category()).collect();
                    prop_assert!(rules.admits(&categories));
                    prop_assert!(categories.len() <= 6);
                    prop_assert_eq!(outcome.score, outcome.outfit.normalized_score());
                }
            }
        }
    }
}
