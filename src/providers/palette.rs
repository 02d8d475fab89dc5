use crate::assets::color::parse_hex_or;
use crate::foundation::core::Rgba8;
use crate::layout::model::Palette;

/// Default brand color used when no usable color is supplied or sampled.
pub const DEFAULT_PRIMARY: Rgba8 = Rgba8::rgb(0x3b, 0x82, 0xf6);

/// Derives a four-color palette from a seed color.
pub trait PaletteProvider {
    /// Palette whose `primary` is `seed_hex`.
    fn palette_for(&self, seed_hex: &str) -> Palette;
}

/// Lighten/darken derivation: secondary and background are tints, accent is a shade.
#[derive(Clone, Debug, Default)]
pub struct SeedPalette {
    /// Replaces the derived secondary color when set.
    pub secondary_override: Option<String>,
}

impl SeedPalette {
    /// Derivation that keeps a caller-chosen secondary color.
    pub fn with_secondary(secondary: impl Into<String>) -> Self {
        Self {
            secondary_override: Some(secondary.into()),
        }
    }
}

fn lighten(c: u8, amount: f64) -> u8 {
    let c = f64::from(c);
    (c + (255.0 - c) * amount).floor().min(255.0) as u8
}

fn darken(c: u8, amount: f64) -> u8 {
    (f64::from(c) * (1.0 - amount)).floor().max(0.0) as u8
}

fn map_rgb(c: Rgba8, f: impl Fn(u8) -> u8) -> Rgba8 {
    Rgba8::rgb(f(c.r), f(c.g), f(c.b))
}

impl PaletteProvider for SeedPalette {
    fn palette_for(&self, seed_hex: &str) -> Palette {
        let seed = parse_hex_or(seed_hex, DEFAULT_PRIMARY);
        let secondary = self
            .secondary_override
            .clone()
            .unwrap_or_else(|| map_rgb(seed, |c| lighten(c, 0.3)).to_hex());
        Palette {
            primary: seed_hex.to_owned(),
            secondary,
            accent: map_rgb(seed, |c| darken(c, 0.2)).to_hex(),
            background: map_rgb(seed, |c| lighten(c, 0.8)).to_hex(),
        }
    }
}
