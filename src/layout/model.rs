use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{Anchor, Canvas, Rect};
use crate::foundation::error::{CreativeError, CreativeResult};

/// One of the supported output formats. Each maps to a fixed canvas size.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum AspectRatio {
    /// 1:1, 1080x1080.
    #[serde(rename = "1:1")]
    Square,
    /// 9:16, 1080x1920.
    #[serde(rename = "9:16")]
    Vertical,
    /// 1.91:1, 1200x628.
    #[serde(rename = "1.91:1")]
    Horizontal,
}

impl AspectRatio {
    /// All ratios in presentation order.
    pub const ALL: [Self; 3] = [Self::Square, Self::Vertical, Self::Horizontal];

    /// Fixed canvas size for this ratio.
    pub const fn canvas(self) -> Canvas {
        match self {
            Self::Square => Canvas {
                width: 1080,
                height: 1080,
            },
            Self::Vertical => Canvas {
                width: 1080,
                height: 1920,
            },
            Self::Horizontal => Canvas {
                width: 1200,
                height: 628,
            },
        }
    }

    /// Ratio label such as `"9:16"`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Vertical => "9:16",
            Self::Horizontal => "1.91:1",
        }
    }

    /// File-name friendly label such as `"9x16"`.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Square => "1x1",
            Self::Vertical => "9x16",
            Self::Horizontal => "1.91x1",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AspectRatio {
    type Err = CreativeError;

    fn from_str(s: &str) -> CreativeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1:1" | "1x1" | "square" => Ok(Self::Square),
            "9:16" | "9x16" | "vertical" | "story" => Ok(Self::Vertical),
            "1.91:1" | "1.91x1" | "horizontal" | "landscape" => Ok(Self::Horizontal),
            other => Err(CreativeError::validation(format!(
                "unknown aspect ratio \"{other}\""
            ))),
        }
    }
}

/// Named family of placement formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateFamily {
    /// Light background, generous margins.
    CleanMinimal,
    /// Primary-colored background, tilted accent blocks.
    BoldDynamic,
    /// Soft background, centered composition.
    PremiumSoft,
}

impl TemplateFamily {
    /// All template families.
    pub const ALL: [Self; 3] = [Self::CleanMinimal, Self::BoldDynamic, Self::PremiumSoft];

    /// Human readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CleanMinimal => "Clean Minimal",
            Self::BoldDynamic => "Bold Dynamic",
            Self::PremiumSoft => "Premium Soft",
        }
    }

    /// Kebab-case identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::CleanMinimal => "clean-minimal",
            Self::BoldDynamic => "bold-dynamic",
            Self::PremiumSoft => "premium-soft",
        }
    }

    /// Uniformly pick a family.
    pub fn pick(rng: &mut dyn crate::layout::random::RandomSource) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateFamily {
    type Err = CreativeError;

    fn from_str(s: &str) -> CreativeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CreativeError::validation(format!("unknown template \"{s}\"")))
    }
}

/// Advertising category. Only affects the background texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdCategory {
    /// Physical product.
    #[default]
    ProductBased,
    /// Service offering.
    ServiceBased,
    /// Brand awareness campaign.
    BrandAwareness,
    /// Lifestyle imagery.
    Lifestyle,
}

impl AdCategory {
    /// Parse a kebab-case label; unknown labels give `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "product-based" => Some(Self::ProductBased),
            "service-based" => Some(Self::ServiceBased),
            "brand-awareness" => Some(Self::BrandAwareness),
            "lifestyle" => Some(Self::Lifestyle),
            _ => None,
        }
    }
}

/// Background pattern painted over the background fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Texture {
    /// Regular grid of small circles.
    #[default]
    Dots,
    /// Horizontal lines.
    Lines,
    /// Vertical and horizontal grid lines.
    Grid,
    /// Per-pixel gray noise.
    Noise,
    /// Sine wave bands.
    Waves,
    /// No pattern.
    None,
}

impl Texture {
    /// Texture used for a category; unrecognized categories get dots.
    pub fn for_category(category: Option<AdCategory>) -> Self {
        match category {
            Some(AdCategory::ProductBased) | None => Self::Dots,
            Some(AdCategory::ServiceBased) => Self::Lines,
            Some(AdCategory::BrandAwareness) => Self::Grid,
            Some(AdCategory::Lifestyle) => Self::Waves,
        }
    }
}

/// Brand palette as hex strings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Brand color.
    pub primary: String,
    /// Lighter companion color.
    pub secondary: String,
    /// Darker contrast color.
    pub accent: String,
    /// Pale background color.
    pub background: String,
}

/// Position and size of an element in canvas pixels.
///
/// Whether `(x, y)` is the center or the top-left corner depends on the element,
/// see [`Layout::anchor_of`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, rename = "isDraggable")]
    pub draggable: bool,
}

impl PlacedBox {
    /// Box with `draggable` unset.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            draggable: false,
        }
    }

    /// Same box marked draggable.
    pub const fn draggable(self) -> Self {
        Self {
            draggable: true,
            ..self
        }
    }

    /// Canvas-space rectangle for the given anchor.
    pub fn rect(&self, anchor: Anchor) -> Rect {
        match anchor {
            Anchor::Center => Rect::new(
                self.x - self.width / 2.0,
                self.y - self.height / 2.0,
                self.x + self.width / 2.0,
                self.y + self.height / 2.0,
            ),
            Anchor::TopLeft => Rect::new(self.x, self.y, self.x + self.width, self.y + self.height),
        }
    }
}

/// A text block: top-left anchored box plus typography.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    #[serde(flatten)]
    pub bounds: PlacedBox,
    pub font_size: f64,
    pub color: String,
}

/// Optional secondary text block carrying its own string.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdditionalText {
    #[serde(flatten)]
    pub element: TextElement,
    pub text: String,
}

/// Decoration kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
    Circle,
    Rectangle,
    Line,
    Emoji,
    Image,
}

impl DecorationKind {
    /// Circle, rectangle or line.
    pub fn is_shape(self) -> bool {
        matches!(self, Self::Circle | Self::Rectangle | Self::Line)
    }
}

/// Non-essential visual accent. `bounds` is center-anchored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    #[serde(rename = "type")]
    pub kind: DecorationKind,
    #[serde(rename = "position")]
    pub bounds: PlacedBox,
    pub color: String,
    /// Degrees, clockwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Glyph for emoji decorations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Image reference (path or data URL) for image decorations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl Decoration {
    /// Plain shape decoration without rotation.
    pub fn shape(kind: DecorationKind, bounds: PlacedBox, color: impl Into<String>) -> Self {
        Self {
            kind,
            bounds,
            color: color.into(),
            rotation: None,
            content: None,
            image: None,
            opacity: None,
        }
    }

    /// Same decoration rotated by `degrees`.
    pub fn rotated(self, degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..self
        }
    }
}

/// Reference to one manipulable element of a layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementRef {
    Packshot,
    Logo,
    Headline,
    Cta,
    AdditionalText,
    /// Index into [`Layout::decorations`].
    Decoration(usize),
}

/// Fully resolved description of one creative variant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub ratio: AspectRatio,
    pub width: u32,
    pub height: u32,
    pub template: TemplateFamily,
    /// Hex color, `linear-gradient(...)` or `radial-gradient(...)`.
    pub background: String,
    pub background_texture: Texture,
    pub packshot: PlacedBox,
    pub logo: PlacedBox,
    pub headline: TextElement,
    pub cta: TextElement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_text: Option<AdditionalText>,
    /// Paint order, back to front.
    pub decorations: Vec<Decoration>,
}

impl Layout {
    /// Canvas size of this layout.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Anchor used by an element kind.
    pub fn anchor_of(element: ElementRef) -> Anchor {
        match element {
            ElementRef::Packshot | ElementRef::Decoration(_) => Anchor::Center,
            ElementRef::Logo
            | ElementRef::Headline
            | ElementRef::Cta
            | ElementRef::AdditionalText => Anchor::TopLeft,
        }
    }

    /// Placed box of an element, if it exists.
    pub fn placed(&self, element: ElementRef) -> Option<&PlacedBox> {
        match element {
            ElementRef::Packshot => Some(&self.packshot),
            ElementRef::Logo => Some(&self.logo),
            ElementRef::Headline => Some(&self.headline.bounds),
            ElementRef::Cta => Some(&self.cta.bounds),
            ElementRef::AdditionalText => self.additional_text.as_ref().map(|t| &t.element.bounds),
            ElementRef::Decoration(i) => self.decorations.get(i).map(|d| &d.bounds),
        }
    }

    pub(crate) fn placed_mut(&mut self, element: ElementRef) -> Option<&mut PlacedBox> {
        match element {
            ElementRef::Packshot => Some(&mut self.packshot),
            ElementRef::Logo => Some(&mut self.logo),
            ElementRef::Headline => Some(&mut self.headline.bounds),
            ElementRef::Cta => Some(&mut self.cta.bounds),
            ElementRef::AdditionalText => self
                .additional_text
                .as_mut()
                .map(|t| &mut t.element.bounds),
            ElementRef::Decoration(i) => self.decorations.get_mut(i).map(|d| &mut d.bounds),
        }
    }

    /// Canvas-space bounds of an element, if it exists.
    pub fn element_rect(&self, element: ElementRef) -> Option<Rect> {
        self.placed(element)
            .map(|b| b.rect(Self::anchor_of(element)))
    }

    /// Elements in hit-test priority order.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef> + '_ {
        let fixed = [
            ElementRef::Packshot,
            ElementRef::Logo,
            ElementRef::Headline,
            ElementRef::Cta,
        ];
        let additional = self
            .additional_text
            .as_ref()
            .map(|_| ElementRef::AdditionalText);
        fixed
            .into_iter()
            .chain(additional)
            .chain((0..self.decorations.len()).map(ElementRef::Decoration))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/model.rs"]
mod tests;
