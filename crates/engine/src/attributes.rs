//! Closed-set garment attributes resolved from declared strings.
//!
//! Every enum here is backed by an explicit alias table. Strings that match
//! no alias resolve to the `Other` variant: an ungraded garment is scored as
//! neutral rather than rejected.

use serde::{Deserialize, Serialize};

use crate::types::{lookup_alias, Category, Garment};

/// Declared style of a garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Casual,
    Formal,
    Street,
    Sporty,
    Minimal,
    Vintage,
    Romantic,
    #[default]
    Other,
}

const STYLE_ALIASES: &[(&str, Style)] = &[
    ("casual", Style::Casual),
    ("daily", Style::Casual),
    ("formal", Style::Formal),
    ("office", Style::Formal),
    ("business", Style::Formal),
    ("street", Style::Street),
    ("streetwear", Style::Street),
    ("sporty", Style::Sporty),
    ("sport", Style::Sporty),
    ("athletic", Style::Sporty),
    ("athleisure", Style::Sporty),
    ("minimal", Style::Minimal),
    ("minimalist", Style::Minimal),
    ("basic", Style::Minimal),
    ("vintage", Style::Vintage),
    ("retro", Style::Vintage),
    ("romantic", Style::Romantic),
    ("feminine", Style::Romantic),
    ("lovely", Style::Romantic),
];

impl Style {
    pub fn parse(raw: &str) -> Self {
        lookup_alias(STYLE_ALIASES, raw).unwrap_or_default()
    }
}

/// Fabric texture families used by the material compatibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialFamily {
    /// Light, breathable natural fibres.
    Light,
    Synthetic,
    /// Warm, insulating fibres and fills.
    Warm,
    /// Structured, heavy fabrics.
    Structured,
}

/// Declared fabric of a garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Cotton,
    Linen,
    Silk,
    Polyester,
    Nylon,
    Spandex,
    Wool,
    Cashmere,
    Fleece,
    Down,
    Denim,
    Leather,
    Corduroy,
    Tweed,
    #[default]
    Other,
}

const MATERIAL_ALIASES: &[(&str, Material)] = &[
    ("cotton", Material::Cotton),
    ("linen", Material::Linen),
    ("silk", Material::Silk),
    ("satin", Material::Silk),
    ("polyester", Material::Polyester),
    ("poly", Material::Polyester),
    ("nylon", Material::Nylon),
    ("spandex", Material::Spandex),
    ("elastane", Material::Spandex),
    ("wool", Material::Wool),
    ("cashmere", Material::Cashmere),
    ("fleece", Material::Fleece),
    ("down", Material::Down),
    ("goose-down", Material::Down),
    ("denim", Material::Denim),
    ("jean", Material::Denim),
    ("leather", Material::Leather),
    ("faux-leather", Material::Leather),
    ("suede", Material::Leather),
    ("corduroy", Material::Corduroy),
    ("tweed", Material::Tweed),
];

impl Material {
    pub fn parse(raw: &str) -> Self {
        lookup_alias(MATERIAL_ALIASES, raw).unwrap_or_default()
    }

    pub fn family(self) -> Option<MaterialFamily> {
        match self {
            Material::Cotton | Material::Linen | Material::Silk => Some(MaterialFamily::Light),
            Material::Polyester | Material::Nylon | Material::Spandex => {
                Some(MaterialFamily::Synthetic)
            }
            Material::Wool | Material::Cashmere | Material::Fleece | Material::Down => {
                Some(MaterialFamily::Warm)
            }
            Material::Denim | Material::Leather | Material::Corduroy | Material::Tweed => {
                Some(MaterialFamily::Structured)
            }
            Material::Other => None,
        }
    }
}

/// Color temperature class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Warm,
    Cool,
}

/// Declared named color of a garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Ivory,
    Black,
    Gray,
    Beige,
    Navy,
    Brown,
    Khaki,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    SkyBlue,
    Pink,
    Purple,
    Burgundy,
    #[default]
    Other,
}

const COLOR_ALIASES: &[(&str, Color)] = &[
    ("white", Color::White),
    ("ivory", Color::Ivory),
    ("cream", Color::Ivory),
    ("black", Color::Black),
    ("gray", Color::Gray),
    ("grey", Color::Gray),
    ("charcoal", Color::Gray),
    ("beige", Color::Beige),
    ("camel", Color::Beige),
    ("navy", Color::Navy),
    ("brown", Color::Brown),
    ("khaki", Color::Khaki),
    ("red", Color::Red),
    ("orange", Color::Orange),
    ("yellow", Color::Yellow),
    ("mustard", Color::Yellow),
    ("green", Color::Green),
    ("olive", Color::Green),
    ("mint", Color::Green),
    ("blue", Color::Blue),
    ("denim", Color::Blue),
    ("sky-blue", Color::SkyBlue),
    ("skyblue", Color::SkyBlue),
    ("light-blue", Color::SkyBlue),
    ("pink", Color::Pink),
    ("purple", Color::Purple),
    ("violet", Color::Purple),
    ("burgundy", Color::Burgundy),
    ("wine", Color::Burgundy),
];

impl Color {
    pub fn parse(raw: &str) -> Self {
        lookup_alias(COLOR_ALIASES, raw).unwrap_or_default()
    }

    /// Unknown colors count as neutral.
    pub fn tone(self) -> Tone {
        match self {
            Color::White
            | Color::Ivory
            | Color::Black
            | Color::Gray
            | Color::Beige
            | Color::Other => Tone::Neutral,
            Color::Brown
            | Color::Khaki
            | Color::Red
            | Color::Orange
            | Color::Yellow
            | Color::Pink
            | Color::Burgundy => Tone::Warm,
            Color::Navy | Color::Green | Color::Blue | Color::SkyBlue | Color::Purple => Tone::Cool,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OuterKind {
    Padding,
    Coat,
    Jacket,
    Cardigan,
    Windbreaker,
    Blazer,
    Vest,
}

const OUTER_ALIASES: &[(&str, OuterKind)] = &[
    ("padding", OuterKind::Padding),
    ("puffer", OuterKind::Padding),
    ("down-jacket", OuterKind::Padding),
    ("coat", OuterKind::Coat),
    ("trench", OuterKind::Coat),
    ("trench-coat", OuterKind::Coat),
    ("jacket", OuterKind::Jacket),
    ("denim-jacket", OuterKind::Jacket),
    ("leather-jacket", OuterKind::Jacket),
    ("bomber", OuterKind::Jacket),
    ("cardigan", OuterKind::Cardigan),
    ("windbreaker", OuterKind::Windbreaker),
    ("anorak", OuterKind::Windbreaker),
    ("blazer", OuterKind::Blazer),
    ("suit-jacket", OuterKind::Blazer),
    ("vest", OuterKind::Vest),
    ("gilet", OuterKind::Vest),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopKind {
    TShirt,
    LongSleeve,
    Shirt,
    Knit,
    Hoodie,
    Sweatshirt,
    Sleeveless,
}

const TOP_ALIASES: &[(&str, TopKind)] = &[
    ("t-shirt", TopKind::TShirt),
    ("tshirt", TopKind::TShirt),
    ("tee", TopKind::TShirt),
    ("short-sleeve", TopKind::TShirt),
    ("long-sleeve", TopKind::LongSleeve),
    ("longsleeve", TopKind::LongSleeve),
    ("shirt", TopKind::Shirt),
    ("blouse", TopKind::Shirt),
    ("knit", TopKind::Knit),
    ("sweater", TopKind::Knit),
    ("knitwear", TopKind::Knit),
    ("hoodie", TopKind::Hoodie),
    ("sweatshirt", TopKind::Sweatshirt),
    ("mtm", TopKind::Sweatshirt),
    ("sleeveless", TopKind::Sleeveless),
    ("tank-top", TopKind::Sleeveless),
    ("camisole", TopKind::Sleeveless),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomKind {
    Jeans,
    Slacks,
    Shorts,
    Skirt,
    Jogger,
    Leggings,
}

const BOTTOM_ALIASES: &[(&str, BottomKind)] = &[
    ("jeans", BottomKind::Jeans),
    ("denim-pants", BottomKind::Jeans),
    ("slacks", BottomKind::Slacks),
    ("trousers", BottomKind::Slacks),
    ("chinos", BottomKind::Slacks),
    ("shorts", BottomKind::Shorts),
    ("short-pants", BottomKind::Shorts),
    ("skirt", BottomKind::Skirt),
    ("mini-skirt", BottomKind::Skirt),
    ("long-skirt", BottomKind::Skirt),
    ("jogger", BottomKind::Jogger),
    ("joggers", BottomKind::Jogger),
    ("sweatpants", BottomKind::Jogger),
    ("track-pants", BottomKind::Jogger),
    ("leggings", BottomKind::Leggings),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoesKind {
    Sneakers,
    Boots,
    Loafers,
    Sandals,
    Heels,
    RainBoots,
}

const SHOES_ALIASES: &[(&str, ShoesKind)] = &[
    ("sneakers", ShoesKind::Sneakers),
    ("sneaker", ShoesKind::Sneakers),
    ("running-shoes", ShoesKind::Sneakers),
    ("boots", ShoesKind::Boots),
    ("boot", ShoesKind::Boots),
    ("ankle-boots", ShoesKind::Boots),
    ("walker", ShoesKind::Boots),
    ("loafers", ShoesKind::Loafers),
    ("loafer", ShoesKind::Loafers),
    ("dress-shoes", ShoesKind::Loafers),
    ("sandals", ShoesKind::Sandals),
    ("sandal", ShoesKind::Sandals),
    ("slippers", ShoesKind::Sandals),
    ("flip-flops", ShoesKind::Sandals),
    ("heels", ShoesKind::Heels),
    ("pumps", ShoesKind::Heels),
    ("rain-boots", ShoesKind::RainBoots),
    ("rainboots", ShoesKind::RainBoots),
    ("wellies", ShoesKind::RainBoots),
];

/// Category-specific sub-type of a structural garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "category", content = "kind")]
pub enum GarmentKind {
    Outer(OuterKind),
    Top(TopKind),
    Bottom(BottomKind),
    Shoes(ShoesKind),
}

impl GarmentKind {
    /// Resolve the declared sub-type for categories that carry one.
    ///
    /// Returns `None` when the category has no sub-types or the string is unknown.
    pub fn resolve(category: Category, raw: &str) -> Option<Self> {
        match category {
            Category::Outer => lookup_alias(OUTER_ALIASES, raw).map(GarmentKind::Outer),
            Category::Top => lookup_alias(TOP_ALIASES, raw).map(GarmentKind::Top),
            Category::Bottom => lookup_alias(BOTTOM_ALIASES, raw).map(GarmentKind::Bottom),
            Category::Shoes => lookup_alias(SHOES_ALIASES, raw).map(GarmentKind::Shoes),
            _ => None,
        }
    }
}

/// Compatibility attributes resolved once per garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub category: Category,
    pub kind: Option<GarmentKind>,
    pub color: Color,
    pub tone: Tone,
    pub material: Material,
    pub style: Style,
}

impl Attributes {
    pub fn resolve(garment: &Garment) -> Self {
        let color = Color::parse(&garment.color);
        Self {
            category: garment.category,
            kind: GarmentKind::resolve(garment.category, &garment.kind),
            color,
            tone: color.tone(),
            material: Material::parse(&garment.material),
            style: Style::parse(&garment.style),
        }
    }
}
