//! Static garment compatibility model.
//!
//! All tables are immutable after first use and safe to read from any
//! number of concurrent recommendations. Every lookup is total: pairs the
//! tables do not mention score neutral.

mod color;
mod material;
mod pairing;
mod style;

pub use color::{color_bonus, tones_harmonize, SAME_COLOR_PENALTY};
pub use material::materials_compatible;
pub use pairing::type_pair_adjustment;
pub use style::style_harmony;

use serde::Serialize;

use crate::attributes::Attributes;

/// Pair delta for two materials that wear well together.
pub const MATERIAL_MATCH_BONUS: f64 = 0.5;
/// Pair delta for two materials that clash.
pub const MATERIAL_CLASH_PENALTY: f64 = -1.0;
/// Pair delta for harmonious color tones.
pub const TONE_HARMONY_BONUS: f64 = 0.4;
/// Pair delta for a warm/cool tone clash.
pub const TONE_CLASH_PENALTY: f64 = -0.8;

/// Order a pair so lookups ignore argument order.
pub(crate) fn unordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Breakdown of the compatibility between two garments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PairScore {
    pub style: f64,
    pub material: f64,
    pub tone: f64,
    pub color: f64,
    /// Explicit sub-type pair adjustment, tracked apart from harmony.
    pub pairing: f64,
}

impl PairScore {
    /// Style, material, tone and color contributions.
    pub fn harmony(&self) -> f64 {
        self.style + self.material + self.tone + self.color
    }

    pub fn total(&self) -> f64 {
        self.harmony() + self.pairing
    }
}

/// Score two garments against each other.
///
/// Symmetric in its arguments. The directional color table is oriented by
/// layer rank rather than by argument order, so the outer piece's color is
/// always looked up first.
pub fn score_pair(a: &Attributes, b: &Attributes) -> PairScore {
    let material = if materials_compatible(a.material, b.material) {
        MATERIAL_MATCH_BONUS
    } else {
        MATERIAL_CLASH_PENALTY
    };
    let tone = if tones_harmonize(a.tone, b.tone) {
        TONE_HARMONY_BONUS
    } else {
        TONE_CLASH_PENALTY
    };
    let rank_a = a.category.layer_rank();
    let rank_b = b.category.layer_rank();
    let color = match rank_a.cmp(&rank_b) {
        std::cmp::Ordering::Less => color_bonus(a.color, b.color),
        std::cmp::Ordering::Greater => color_bonus(b.color, a.color),
        std::cmp::Ordering::Equal => {
            (color_bonus(a.color, b.color) + color_bonus(b.color, a.color)) / 2.0
        }
    };
    let pairing = match (a.kind, b.kind) {
        (Some(x), Some(y)) => type_pair_adjustment(x, y),
        _ => 0.0,
    };

    PairScore {
        style: style_harmony(a.style, b.style),
        material,
        tone,
        color,
        pairing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{BottomKind, Color, GarmentKind, Material, OuterKind, Style, TopKind};
    use crate::types::Category;

    fn attrs(category: Category, kind: Option<GarmentKind>, color: Color) -> Attributes {
        Attributes {
            category,
            kind,
            color,
            tone: color.tone(),
            material: Material::Cotton,
            style: Style::Casual,
        }
    }

    #[test]
    fn pair_score_is_symmetric() {
        let top = attrs(
            Category::Top,
            Some(GarmentKind::Top(TopKind::Sleeveless)),
            Color::White,
        );
        let outer = attrs(
            Category::Outer,
            Some(GarmentKind::Outer(OuterKind::Padding)),
            Color::Navy,
        );
        assert_eq!(score_pair(&top, &outer), score_pair(&outer, &top));
    }

    #[test]
    fn color_direction_follows_layer_rank() {
        let top = attrs(Category::Top, None, Color::White);
        let bottom = attrs(Category::Bottom, None, Color::Navy);
        let score = score_pair(&bottom, &top);
        assert_eq!(score.color, color_bonus(Color::White, Color::Navy));
    }

    #[test]
    fn pairing_is_tracked_apart_from_harmony() {
        let outer = attrs(
            Category::Outer,
            Some(GarmentKind::Outer(OuterKind::Padding)),
            Color::Black,
        );
        let bottom = attrs(
            Category::Bottom,
            Some(GarmentKind::Bottom(BottomKind::Shorts)),
            Color::Black,
        );
        let score = score_pair(&outer, &bottom);
        assert!(score.pairing < 0.0);
        assert!((score.total() - (score.harmony() + score.pairing)).abs() < 1e-12);
    }

    #[test]
    fn unordered_sorts_pairs() {
        assert_eq!(unordered(3, 1), (1, 3));
        assert_eq!(unordered(1, 3), (1, 3));
    }
}
