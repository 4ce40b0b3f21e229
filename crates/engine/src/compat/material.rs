use std::collections::HashSet;
use std::sync::LazyLock;

use super::unordered;
use crate::attributes::Material;

static INCOMPATIBLE: LazyLock<HashSet<(Material, Material)>> = LazyLock::new(|| {
    [
        // structured/heavy against light/breathable
        (Material::Leather, Material::Linen),
        (Material::Leather, Material::Silk),
        (Material::Tweed, Material::Linen),
        (Material::Tweed, Material::Silk),
        (Material::Corduroy, Material::Linen),
        (Material::Corduroy, Material::Silk),
        // insulating fills against summer fabrics
        (Material::Down, Material::Linen),
        (Material::Down, Material::Silk),
        (Material::Fleece, Material::Silk),
        (Material::Fleece, Material::Linen),
    ]
    .into_iter()
    .map(|(a, b)| unordered(a, b))
    .collect()
});

/// Whether two materials can be worn together.
///
/// Same material and same family always pass; only the listed cross-family
/// pairs fail.
pub fn materials_compatible(a: Material, b: Material) -> bool {
    if a == b {
        return true;
    }
    if let (Some(fa), Some(fb)) = (a.family(), b.family()) {
        if fa == fb {
            return true;
        }
    }
    !INCOMPATIBLE.contains(&unordered(a, b))
}
