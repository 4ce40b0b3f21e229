use std::collections::HashMap;
use std::sync::LazyLock;

use crate::attributes::{Color, Tone};

/// Applied when two garments share the same named color.
pub const SAME_COLOR_PENALTY: f64 = -0.3;

/// Directional bonus table keyed by (outer layer color, inner layer color).
///
/// Intentionally asymmetric: white over navy is not the same look as navy over white.
static COLOR_BONUS: LazyLock<HashMap<(Color, Color), f64>> = LazyLock::new(|| {
    use Color::*;
    HashMap::from([
        ((White, Navy), 0.6),
        ((Navy, White), 0.4),
        ((White, Beige), 0.4),
        ((Beige, White), 0.3),
        ((White, Black), 0.4),
        ((Black, White), 0.5),
        ((White, Blue), 0.5),
        ((Blue, White), 0.3),
        ((Ivory, Brown), 0.5),
        ((Beige, Brown), 0.5),
        ((Brown, Beige), 0.3),
        ((Navy, Beige), 0.5),
        ((Beige, Navy), 0.4),
        ((Gray, Black), 0.3),
        ((Black, Gray), 0.3),
        ((Gray, Navy), 0.3),
        ((SkyBlue, Beige), 0.4),
        ((Black, Red), 0.3),
        ((Khaki, White), 0.3),
        ((Navy, Khaki), 0.4),
        ((Burgundy, Gray), 0.4),
        ((Pink, Gray), 0.3),
        ((Green, Beige), 0.3),
        ((Red, Green), -0.8),
        ((Green, Red), -0.6),
        ((Orange, Purple), -0.6),
        ((Purple, Orange), -0.5),
        ((Red, Pink), -0.4),
        ((Pink, Red), -0.5),
        ((Red, Orange), -0.4),
        ((Yellow, Purple), -0.4),
        ((Brown, Black), -0.3),
        ((Black, Brown), -0.2),
        ((Navy, Black), -0.2),
    ])
});

/// Warm against cool is the only disharmonious tone pairing.
pub fn tones_harmonize(a: Tone, b: Tone) -> bool {
    a == b || a == Tone::Neutral || b == Tone::Neutral
}

/// Directional bonus for wearing `first` over `second`.
pub fn color_bonus(first: Color, second: Color) -> f64 {
    if first == second {
        return if first == Color::Other {
            0.0
        } else {
            SAME_COLOR_PENALTY
        };
    }
    COLOR_BONUS.get(&(first, second)).copied().unwrap_or(0.0)
}
