use crate::config::EngineConfig;
use crate::types::Category;

/// Category composition constraints for a returned outfit.
///
/// - at most one item per structural category
/// - accessory-like items share one combined cap
/// - a dress excludes a top and a bottom
/// - the outfit never exceeds `max_items`
///
/// A *complete* outfit also has a base: a dress, or a top with a bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutfitRules {
    pub max_items: usize,
    pub max_accessories: usize,
}

impl Default for OutfitRules {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl OutfitRules {
    pub fn new(max_items: usize, max_accessories: usize) -> Self {
        Self {
            max_items,
            max_accessories,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_items, config.max_accessories)
    }

    /// Whether `category` may join an outfit that already holds `current`.
    pub fn can_add(&self, current: &[Category], category: Category) -> bool {
        if !category.is_recommendable() || current.len() >= self.max_items {
            return false;
        }
        if category.is_accessory_like() {
            let accessories = current.iter().filter(|c| c.is_accessory_like()).count();
            return accessories < self.max_accessories;
        }
        if current.contains(&category) {
            return false;
        }
        match category {
            Category::Dress => !current
                .iter()
                .any(|c| matches!(c, Category::Top | Category::Bottom)),
            Category::Top | Category::Bottom => !current.contains(&Category::Dress),
            _ => true,
        }
    }

    pub fn has_base(categories: &[Category]) -> bool {
        categories.contains(&Category::Dress)
            || (categories.contains(&Category::Top) && categories.contains(&Category::Bottom))
    }

    /// Whether `categories`, taken in order, form a complete admissible outfit.
    pub fn admits(&self, categories: &[Category]) -> bool {
        let mut seen = Vec::with_capacity(categories.len());
        for &category in categories {
            if !self.can_add(&seen, category) {
                return false;
            }
            seen.push(category);
        }
        Self::has_base(&seen)
    }

    /// Keep, in order, each item that can still be added.
    ///
    /// The result satisfies every cap but may lack a base.
    pub fn sanitize<T>(
        &self,
        items: impl IntoIterator<Item = T>,
        category_of: impl Fn(&T) -> Category,
    ) -> Vec<T> {
        let mut categories = Vec::new();
        let mut kept = Vec::new();
        for item in items {
            let category = category_of(&item);
            if self.can_add(&categories, category) {
                categories.push(category);
                kept.push(item);
            }
        }
        kept
    }
}
