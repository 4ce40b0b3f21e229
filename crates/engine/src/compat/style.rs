use std::collections::HashMap;
use std::sync::LazyLock;

use super::unordered;
use crate::attributes::Style;

const IDENTICAL: f64 = 2.5;
const RELATED: f64 = 1.0;
const OPPOSED: f64 = -1.5;

static STYLE_PAIRS: LazyLock<HashMap<(Style, Style), f64>> = LazyLock::new(|| {
    let related = [
        (Style::Casual, Style::Street),
        (Style::Casual, Style::Sporty),
        (Style::Street, Style::Sporty),
        (Style::Minimal, Style::Formal),
        (Style::Minimal, Style::Casual),
        (Style::Vintage, Style::Romantic),
    ];
    let opposed = [
        (Style::Formal, Style::Sporty),
        (Style::Formal, Style::Street),
        (Style::Romantic, Style::Sporty),
    ];
    related
        .into_iter()
        .map(|(a, b)| (unordered(a, b), RELATED))
        .chain(opposed.into_iter().map(|(a, b)| (unordered(a, b), OPPOSED)))
        .collect()
});

/// Harmony between two styles. Symmetric; `Other` is neutral against everything.
pub fn style_harmony(a: Style, b: Style) -> f64 {
    if a == Style::Other || b == Style::Other {
        return 0.0;
    }
    if a == b {
        return IDENTICAL;
    }
    STYLE_PAIRS.get(&unordered(a, b)).copied().unwrap_or(0.0)
}
