use std::collections::HashMap;
use std::sync::LazyLock;

use super::unordered;
use crate::attributes::{BottomKind, GarmentKind, OuterKind, ShoesKind, TopKind};

/// Sub-type pairs across structural categories that clash (negative) or
/// pair unusually well (small positive).
static TYPE_PAIRS: LazyLock<HashMap<(GarmentKind, GarmentKind), f64>> = LazyLock::new(|| {
    use GarmentKind::{Bottom, Outer, Shoes, Top};

    [
        // outer vs top
        (Outer(OuterKind::Padding), Top(TopKind::Sleeveless), -1.5),
        (Outer(OuterKind::Padding), Top(TopKind::TShirt), -0.5),
        (Outer(OuterKind::Coat), Top(TopKind::Hoodie), -0.5),
        (Outer(OuterKind::Blazer), Top(TopKind::Hoodie), -1.0),
        (Outer(OuterKind::Blazer), Top(TopKind::Shirt), 0.3),
        (Outer(OuterKind::Cardigan), Top(TopKind::Knit), -0.6),
        (Outer(OuterKind::Vest), Top(TopKind::Sleeveless), -0.8),
        // outer vs bottom
        (Outer(OuterKind::Padding), Bottom(BottomKind::Shorts), -1.5),
        (Outer(OuterKind::Coat), Bottom(BottomKind::Shorts), -1.2),
        (Outer(OuterKind::Blazer), Bottom(BottomKind::Jogger), -1.0),
        (Outer(OuterKind::Blazer), Bottom(BottomKind::Slacks), 0.3),
        (Outer(OuterKind::Windbreaker), Bottom(BottomKind::Jogger), 0.2),
        // outer vs shoes
        (Outer(OuterKind::Padding), Shoes(ShoesKind::Sandals), -2.0),
        (Outer(OuterKind::Coat), Shoes(ShoesKind::Sandals), -1.5),
        (Outer(OuterKind::Blazer), Shoes(ShoesKind::Sneakers), 0.2),
        // top vs bottom
        (Top(TopKind::Knit), Bottom(BottomKind::Shorts), -0.8),
        (Top(TopKind::Hoodie), Bottom(BottomKind::Slacks), -0.6),
        (Top(TopKind::Shirt), Bottom(BottomKind::Slacks), 0.3),
        (Top(TopKind::Sleeveless), Bottom(BottomKind::Leggings), -0.4),
        // top vs shoes
        (Top(TopKind::Hoodie), Shoes(ShoesKind::Heels), -0.8),
        (Top(TopKind::Sleeveless), Shoes(ShoesKind::Boots), -0.6),
        // bottom vs shoes
        (Bottom(BottomKind::Shorts), Shoes(ShoesKind::Boots), -1.0),
        (Bottom(BottomKind::Slacks), Shoes(ShoesKind::Sandals), -0.8),
        (Bottom(BottomKind::Jogger), Shoes(ShoesKind::Loafers), -0.8),
        (Bottom(BottomKind::Jogger), Shoes(ShoesKind::Heels), -1.2),
        (Bottom(BottomKind::Skirt), Shoes(ShoesKind::Sneakers), 0.2),
        (Bottom(BottomKind::Slacks), Shoes(ShoesKind::Loafers), 0.3),
    ]
    .into_iter()
    .map(|(a, b, value)| (unordered(a, b), value))
    .collect()
});

/// Adjustment for wearing two sub-types together. Argument order is irrelevant.
pub fn type_pair_adjustment(a: GarmentKind, b: GarmentKind) -> f64 {
    TYPE_PAIRS.get(&unordered(a, b)).copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_argument_order() {
        let padding = GarmentKind::Outer(OuterKind::Padding);
        let sandals = GarmentKind::Shoes(ShoesKind::Sandals);
        assert_eq!(type_pair_adjustment(padding, sandals), -2.0);
        assert_eq!(type_pair_adjustment(sandals, padding), -2.0);
    }

    #[test]
    fn some_pairs_are_rewarded() {
        let shirt = GarmentKind::Top(TopKind::Shirt);
        let slacks = GarmentKind::Bottom(BottomKind::Slacks);
        assert!(type_pair_adjustment(slacks, shirt) > 0.0);
    }

    #[test]
    fn undeclared_pairs_are_neutral() {
        let tee = GarmentKind::Top(TopKind::TShirt);
        let jeans = GarmentKind::Bottom(BottomKind::Jeans);
        assert_eq!(type_pair_adjustment(tee, jeans), 0.0);
    }
}
