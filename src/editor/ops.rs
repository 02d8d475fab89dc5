//! Direct-manipulation edits applied to a [`Layout`].

use std::ops::RangeInclusive;

use crate::foundation::core::Vec2;
use crate::layout::model::{Decoration, ElementRef, Layout, PlacedBox};

/// Smallest packshot side reachable by resizing.
pub const MIN_PACKSHOT_PX: f64 = 50.0;
/// Smallest logo side reachable by resizing.
pub const MIN_LOGO_PX: f64 = 30.0;
/// Smallest decoration side reachable by resizing.
pub const MIN_DECORATION_PX: f64 = 20.0;

/// Rotation applied by the rotate buttons.
pub const ROTATE_STEP_BUTTON_DEG: f64 = 15.0;
/// Rotation applied by the arrow keys.
pub const ROTATE_STEP_KEY_DEG: f64 = 5.0;

/// Font size change per step.
pub const FONT_STEP_PX: f64 = 2.0;

/// Resize floor of an element; `None` when it cannot be resized.
pub fn min_size(element: ElementRef) -> Option<f64> {
    match element {
        ElementRef::Packshot => Some(MIN_PACKSHOT_PX),
        ElementRef::Logo => Some(MIN_LOGO_PX),
        ElementRef::Decoration(_) => Some(MIN_DECORATION_PX),
        ElementRef::Headline | ElementRef::Cta | ElementRef::AdditionalText => None,
    }
}

/// Move an element to `start + delta` (canvas pixels).
///
/// Decorations are clamped so their whole box stays on the canvas; other elements may
/// leave it. Returns `false` when the element does not exist.
pub fn move_element(
    layout: &mut Layout,
    element: ElementRef,
    start: &PlacedBox,
    delta: Vec2,
) -> bool {
    let (w, h) = layout.canvas().size_f64();
    let Some(b) = layout.placed_mut(element) else {
        return false;
    };
    let mut x = start.x + delta.x;
    let mut y = start.y + delta.y;
    if let ElementRef::Decoration(_) = element {
        // A box wider than the canvas pins to its half-size.
        x = x.min(w - b.width / 2.0).max(b.width / 2.0);
        y = y.min(h - b.height / 2.0).max(b.height / 2.0);
    }
    b.x = x;
    b.y = y;
    true
}

/// Resize an element to `start size + delta`, floored per axis at [`min_size`].
///
/// The element keeps its anchor point whichever handle was dragged. Returns `false` for
/// elements that cannot be resized or do not exist.
pub fn resize_element(
    layout: &mut Layout,
    element: ElementRef,
    start: &PlacedBox,
    delta: Vec2,
) -> bool {
    let Some(floor) = min_size(element) else {
        return false;
    };
    let Some(b) = layout.placed_mut(element) else {
        return false;
    };
    b.width = (start.width + delta.x).max(floor);
    b.height = (start.height + delta.y).max(floor);
    true
}

/// Remove a decoration; later decorations shift down by one index.
pub fn delete_decoration(layout: &mut Layout, index: usize) -> Option<Decoration> {
    (index < layout.decorations.len()).then(|| layout.decorations.remove(index))
}

/// Add `delta` degrees to a decoration's rotation and return the new rotation.
pub fn rotate_decoration(layout: &mut Layout, index: usize, delta: f64) -> Option<f64> {
    let deco = layout.decorations.get_mut(index)?;
    let rotation = deco.rotation.unwrap_or(0.0) + delta;
    deco.rotation = Some(rotation);
    Some(rotation)
}

/// Text block whose font size can be edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontTarget {
    Headline,
    Cta,
    AdditionalText,
}

impl FontTarget {
    /// Allowed font sizes.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Self::Headline => 14.0..=72.0,
            Self::Cta => 12.0..=48.0,
            Self::AdditionalText => 12.0..=42.0,
        }
    }

    /// Clamp a requested size into [`FontTarget::range`].
    pub fn clamp(self, size: f64) -> f64 {
        let r = self.range();
        size.clamp(*r.start(), *r.end())
    }

    fn font_size_mut(self, layout: &mut Layout) -> Option<&mut f64> {
        match self {
            Self::Headline => Some(&mut layout.headline.font_size),
            Self::Cta => Some(&mut layout.cta.font_size),
            Self::AdditionalText => layout
                .additional_text
                .as_mut()
                .map(|t| &mut t.element.font_size),
        }
    }
}

/// Set a font size, clamped to the target's range. `None` when the target is absent.
pub fn set_font_size(layout: &mut Layout, target: FontTarget, size: f64) -> Option<f64> {
    let slot = target.font_size_mut(layout)?;
    *slot = target.clamp(size);
    Some(*slot)
}

/// Change a font size by `steps` increments of [`FONT_STEP_PX`], clamped.
pub fn step_font_size(layout: &mut Layout, target: FontTarget, steps: i32) -> Option<f64> {
    let slot = target.font_size_mut(layout)?;
    *slot = target.clamp(*slot + f64::from(steps) * FONT_STEP_PX);
    Some(*slot)
}

#[cfg(test)]
#[path = "../../tests/unit/editor/ops.rs"]
mod tests;
