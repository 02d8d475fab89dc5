use crate::layout::model::Palette;
use crate::layout::random::RandomSource;

/// Glyph decoration proposed for a headline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolicDecoration {
    /// Single emoji or symbol.
    pub glyph: String,
    /// Hex color taken from the palette.
    pub color: String,
}

/// Proposes themed glyphs for a piece of text.
pub trait DecorationContentProvider {
    /// Between one and three decorations.
    fn content_for(
        &self,
        text: &str,
        palette: &Palette,
        rng: &mut dyn RandomSource,
    ) -> Vec<SymbolicDecoration>;
}

const FALLBACK_GLYPH: &str = "\u{2728}";

// Product keyword -> related theme keywords. Order matters: themes are collected in
// table order and only the first three survive.
static PRODUCT_KEYWORDS: &[(&str, &[&str])] = &[
    ("amla", &["leaf", "herb", "plant", "nature", "green"]),
    ("neem", &["leaf", "herb", "plant", "nature", "green"]),
    ("shampoo", &["wave", "water", "flow", "clean"]),
    ("conditioner", &["wave", "water", "smooth", "silky"]),
    ("oil", &["drop", "liquid", "shine", "glow"]),
    ("cream", &["swirl", "smooth", "soft", "blend"]),
    ("moisturizer", &["water", "hydrate", "glow", "fresh"]),
    ("sunscreen", &["sun", "shield", "protect", "bright"]),
    ("natural", &["leaf", "herb", "plant", "nature", "green", "organic"]),
    ("organic", &["leaf", "herb", "plant", "nature", "green"]),
    ("herbal", &["leaf", "herb", "plant", "nature", "green"]),
    ("ayurvedic", &["leaf", "herb", "plant", "nature", "ancient"]),
    ("turmeric", &["golden", "warm", "spice", "glow", "yellow"]),
    ("coconut", &["brown", "tropical", "smooth", "natural"]),
    ("honey", &["golden", "sweet", "warm", "natural", "glow"]),
    ("rose", &["pink", "floral", "soft", "elegant"]),
    ("jasmine", &["white", "floral", "soft", "fresh"]),
    ("lavender", &["purple", "floral", "calm", "soothe"]),
    ("aloe", &["green", "cool", "soothe", "hydrate"]),
    ("vitamin", &["bright", "boost", "energy", "glow"]),
    ("collagen", &["smooth", "firm", "elastic", "glow"]),
    ("serum", &["liquid", "drop", "shine", "glow"]),
    ("soap", &["bubble", "clean", "fresh", "wash"]),
    ("sanitizer", &["clean", "shield", "protect", "bright"]),
    ("lotion", &["smooth", "soft", "silky", "glow"]),
    ("body", &["wave", "smooth", "flow", "care"]),
    ("face", &["circle", "round", "glow", "care"]),
    ("hair", &["wave", "flow", "shine", "strong"]),
    ("teeth", &["bright", "shine", "white", "smile"]),
    ("dental", &["bright", "shine", "white", "smile"]),
    ("whitening", &["bright", "shine", "white", "glow"]),
    ("anti", &["shield", "protect", "strong", "care"]),
    ("aging", &["glow", "youth", "smooth", "firm"]),
    ("acne", &["clear", "clean", "bright", "smooth"]),
    ("sensitive", &["soft", "gentle", "calm", "care"]),
    ("luxury", &["premium", "gold", "elegant", "shine"]),
    ("premium", &["gold", "elegant", "shine", "luxury"]),
];

static GLYPHS: &[(&str, &str)] = &[
    ("leaf", "\u{1F343}"),
    ("herb", "\u{1F33F}"),
    ("plant", "\u{1F331}"),
    ("nature", "\u{1F33F}"),
    ("green", "\u{1F343}"),
    ("wave", "\u{3030}"),
    ("water", "\u{1F4A7}"),
    ("flow", "\u{3030}"),
    ("clean", "\u{2728}"),
    ("drop", "\u{1F4A7}"),
    ("liquid", "\u{1F4A7}"),
    ("shine", "\u{2728}"),
    ("glow", "\u{2728}"),
    ("sun", "\u{2600}"),
    ("shield", "\u{1F6E1}"),
    ("protect", "\u{1F6E1}"),
    ("bright", "\u{2728}"),
    ("golden", "\u{2728}"),
    ("warm", "\u{1F525}"),
    ("spice", "\u{2728}"),
    ("yellow", "\u{2728}"),
    ("brown", "\u{2728}"),
    ("tropical", "\u{1F334}"),
    ("smooth", "\u{3030}"),
    ("pink", "\u{1F495}"),
    ("floral", "\u{1F338}"),
    ("soft", "\u{3030}"),
    ("elegant", "\u{2728}"),
    ("white", "\u{25EF}"),
    ("cool", "\u{2744}"),
    ("soothe", "\u{3030}"),
    ("hydrate", "\u{1F4A7}"),
    ("boost", "\u{26A1}"),
    ("energy", "\u{26A1}"),
    ("bubble", "\u{25EF}"),
    ("fresh", "\u{2728}"),
    ("wash", "\u{3030}"),
    ("silky", "\u{3030}"),
    ("care", "\u{2665}"),
    ("circle", "\u{25EF}"),
    ("round", "\u{25EF}"),
    ("strong", "\u{1F4AA}"),
    ("smile", "\u{2728}"),
    ("youth", "\u{2728}"),
    ("firm", "\u{1F4AA}"),
    ("clear", "\u{2728}"),
    ("calm", "\u{3030}"),
    ("gold", "\u{2728}"),
    ("luxury", "\u{2728}"),
    ("premium", "\u{2728}"),
    ("organic", "\u{1F33F}"),
];

/// Glyph for a theme keyword, sparkles when unknown.
pub fn glyph_for(keyword: &str) -> &'static str {
    GLYPHS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map_or(FALLBACK_GLYPH, |(_, g)| *g)
}

/// Theme keywords matched by `text`, deduplicated in discovery order.
pub fn themes_for(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let mut found: Vec<&'static str> = Vec::new();
    for (keyword, related) in PRODUCT_KEYWORDS {
        if !lower.contains(keyword) {
            continue;
        }
        for theme in related.iter().copied().chain(std::iter::once(*keyword)) {
            if !found.contains(&theme) {
                found.push(theme);
            }
        }
    }
    found
}

/// Keyword-table provider: up to three glyphs themed on product words in the text.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordDecorations;

impl DecorationContentProvider for KeywordDecorations {
    fn content_for(
        &self,
        text: &str,
        palette: &Palette,
        rng: &mut dyn RandomSource,
    ) -> Vec<SymbolicDecoration> {
        let colors = [&palette.primary, &palette.secondary, &palette.accent];
        let out: Vec<SymbolicDecoration> = themes_for(text)
            .into_iter()
            .take(3)
            .map(|theme| SymbolicDecoration {
                glyph: glyph_for(theme).to_owned(),
                color: colors[rng.index(colors.len())].clone(),
            })
            .collect();

        if out.is_empty() {
            return vec![SymbolicDecoration {
                glyph: FALLBACK_GLYPH.to_owned(),
                color: palette.primary.clone(),
            }];
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/providers/decorations.rs"]
mod tests;
