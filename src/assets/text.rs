use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CreativeError, CreativeResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color carried through Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Measures the rendered advance width of a single line of text.
pub trait TextMeasure {
    /// Width in pixels of `text` set at `size_px`.
    fn measure(&mut self, text: &str, size_px: f32, bold: bool) -> f64;
}

/// Installed families tried, in order, before the generic sans-serif lookup.
const PREFERRED_FAMILIES: &[&str] = &[
    "Inter",
    "Noto Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
    "Helvetica",
];

/// Stateful helper for shaping text with Parley from one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: Option<String>,
    font: Option<vello_cpu::peniko::FontData>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Engine without a font. Text is measured by estimate; drawing it is an error.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family: None,
            font: None,
        }
    }

    /// Engine that shapes and draws with the font in `font_bytes` (TTF/OTF).
    pub fn with_font_bytes(font_bytes: Arc<Vec<u8>>) -> CreativeResult<Self> {
        Self::with_face(font_bytes, 0)
    }

    /// Engine using an installed sans-serif face, or any installed face when none of the
    /// preferred families exist.
    pub fn from_system_fonts() -> CreativeResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let families: Vec<usvg::fontdb::Family<'_>> = PREFERRED_FAMILIES
            .iter()
            .map(|name| usvg::fontdb::Family::Name(*name))
            .chain(std::iter::once(usvg::fontdb::Family::SansSerif))
            .collect();
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight::NORMAL,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|face| face.id))
            .ok_or_else(|| CreativeError::asset("no system font found; pass font bytes instead"))?;
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| CreativeError::asset("system font data is unreadable"))?;

        let engine = Self::with_face(Arc::new(bytes), index)?;
        tracing::debug!(family = engine.family_name(), "using system font");
        Ok(engine)
    }

    fn with_face(font_bytes: Arc<Vec<u8>>, index: u32) -> CreativeResult<Self> {
        let mut engine = Self::new();
        let families = engine
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.as_ref().clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| CreativeError::asset("no font families registered from font bytes"))?;
        let family_name = engine
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CreativeError::asset("registered font family has no name"))?
            .to_string();

        engine.family = Some(family_name);
        engine.font = Some(vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
            index,
        ));
        Ok(engine)
    }

    /// Whether a font is registered, i.e. whether text can be drawn.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Family name of the registered font.
    pub fn family_name(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub(crate) fn font_data(&self) -> Option<&vello_cpu::peniko::FontData> {
        self.font.as_ref()
    }

    /// Shape one unbroken line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        bold: bool,
        brush: TextBrushRgba8,
    ) -> CreativeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CreativeError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family = self
            .family
            .clone()
            .ok_or_else(|| CreativeError::render("no font registered for text layout"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Average advance used when no font is registered, as a fraction of the font size.
const ESTIMATED_ADVANCE_EM: f64 = 0.55;

impl TextMeasure for TextLayoutEngine {
    fn measure(&mut self, text: &str, size_px: f32, bold: bool) -> f64 {
        if self.has_font() {
            match self.layout_line(text, size_px, bold, TextBrushRgba8::default()) {
                Ok(layout) => return f64::from(layout.width()),
                Err(err) => tracing::debug!(%err, "text measurement fell back to estimate"),
            }
        }
        estimate_width(text, size_px, bold)
    }
}

pub(crate) fn estimate_width(text: &str, size_px: f32, bold: bool) -> f64 {
    let em = if bold {
        ESTIMATED_ADVANCE_EM * 1.08
    } else {
        ESTIMATED_ADVANCE_EM
    };
    text.chars().count() as f64 * f64::from(size_px) * em
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
