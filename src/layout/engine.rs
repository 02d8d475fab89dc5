use crate::layout::model::{
    AdCategory, AdditionalText, AspectRatio, Decoration, DecorationKind, Layout, Palette,
    PlacedBox, TemplateFamily, Texture,
};
use crate::layout::random::RandomSource;
use crate::layout::templates::formula_for;
use crate::providers::decorations::DecorationContentProvider;

/// Opacity given to decorative images.
pub const IMAGE_DECORATION_OPACITY: f64 = 0.85;

const MAX_EMOJI_DECORATIONS: usize = 3;

// (x, y, size) as fractions of (width, height, width).
const IMAGE_SLOTS: [(f64, f64, f64); 4] = [
    (0.08, 0.1, 0.12),
    (0.85, 0.15, 0.15),
    (0.1, 0.75, 0.1),
    (0.82, 0.7, 0.14),
];

/// Inputs for [`generate`].
#[derive(Clone, Copy, Debug)]
pub struct LayoutRequest<'a> {
    pub ratio: AspectRatio,
    /// Pinned template; `None` picks one from the random source.
    pub template: Option<TemplateFamily>,
    pub palette: &'a Palette,
    pub headline: &'a str,
    /// References (paths or data URLs) of decorative images.
    pub decorative_images: &'a [String],
    /// `None` stands for an unrecognized category.
    pub category: Option<AdCategory>,
    pub additional_text: Option<&'a str>,
}

/// Build a fully resolved layout for one ratio.
///
/// Deterministic for a pinned template and a deterministic random source. The random
/// source is consulted for the template pick (when unpinned) and by the decoration
/// content provider for glyph colors.
#[tracing::instrument(skip_all, fields(ratio = %req.ratio))]
pub fn generate(
    req: &LayoutRequest<'_>,
    content: &dyn DecorationContentProvider,
    rng: &mut dyn RandomSource,
) -> Layout {
    let template = match req.template {
        Some(t) => t,
        None => TemplateFamily::pick(rng),
    };
    let canvas = req.ratio.canvas();
    let (w, h) = canvas.size_f64();
    let formula = formula_for(req.ratio, template)(req.palette);

    let additional_text = req
        .additional_text
        .filter(|t| !t.is_empty())
        .map(|text| {
            let mut element = formula.additional.clone();
            element.bounds.draggable = true;
            AdditionalText {
                element,
                text: text.to_owned(),
            }
        });

    let emoji_size = w.min(h) * 0.06;
    let symbols = content.content_for(req.headline, req.palette, rng);
    let emoji = symbols
        .into_iter()
        .take(MAX_EMOJI_DECORATIONS)
        .enumerate()
        .map(|(i, sym)| Decoration {
            kind: DecorationKind::Emoji,
            bounds: PlacedBox::new(
                w * (0.7 + (i % 2) as f64 * 0.15),
                h * (0.15 + (i % 3) as f64 * 0.25),
                emoji_size,
                emoji_size,
            )
            .draggable(),
            color: sym.color,
            rotation: None,
            content: Some(sym.glyph),
            image: None,
            opacity: None,
        });

    let images = req.decorative_images.iter().enumerate().map(|(i, reference)| {
        let (fx, fy, fs) = IMAGE_SLOTS[i % IMAGE_SLOTS.len()];
        Decoration {
            kind: DecorationKind::Image,
            bounds: PlacedBox::new(w * fx, h * fy, w * fs, w * fs).draggable(),
            color: "#FFFFFF".to_owned(),
            rotation: None,
            content: None,
            image: Some(reference.clone()),
            opacity: Some(IMAGE_DECORATION_OPACITY),
        }
    });

    let decorations: Vec<Decoration> = formula
        .accents
        .into_iter()
        .chain(emoji)
        .chain(images)
        .collect();

    tracing::debug!(
        template = %template,
        decorations = decorations.len(),
        additional = additional_text.is_some(),
        "layout generated"
    );

    let mut headline = formula.headline;
    headline.bounds.draggable = true;
    let mut cta = formula.cta;
    cta.bounds.draggable = true;

    Layout {
        ratio: req.ratio,
        width: canvas.width,
        height: canvas.height,
        template,
        background: formula.background,
        background_texture: Texture::for_category(req.category),
        packshot: formula.packshot.draggable(),
        logo: formula.logo.draggable(),
        headline,
        cta,
        additional_text,
        decorations,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
