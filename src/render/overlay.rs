//! Hover/selection outlines drawn above the creative, independent of the raster.

use kurbo::Shape as _;

use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::CreativeResult;
use crate::layout::model::{ElementRef, Layout};
use crate::render::backend::FrameRGBA;
use crate::render::surface::{Surface, bezpath_to_cpu, rect_to_cpu};

/// Hover outline color, `#3B82F6`.
pub const HOVER_COLOR: Rgba8 = Rgba8::rgb(0x3b, 0x82, 0xf6);
/// Selection outline color, `#10B981`.
pub const SELECTED_COLOR: Rgba8 = Rgba8::rgb(0x10, 0xb9, 0x81);
/// Side of the square corner markers.
pub const HANDLE_MARKER_PX: f64 = 8.0;
/// Dash and gap length of the outline.
pub const DASH_PX: f64 = 5.0;

/// Emphasis level of an overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayStyle {
    /// Pointer is over the element.
    Hover,
    /// Element is selected.
    Selected,
}

/// Outline, corner markers and optional tint around one element, in canvas space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overlay {
    pub element: ElementRef,
    pub bounds: Rect,
    pub style: OverlayStyle,
}

impl Overlay {
    /// Outline and marker color.
    pub fn color(&self) -> Rgba8 {
        match self.style {
            OverlayStyle::Hover => HOVER_COLOR,
            OverlayStyle::Selected => SELECTED_COLOR,
        }
    }

    /// Outline stroke width.
    pub fn line_width(&self) -> f64 {
        match self.style {
            OverlayStyle::Hover => 2.0,
            OverlayStyle::Selected => 3.0,
        }
    }

    /// Translucent fill over the bounds, selection only.
    pub fn fill(&self) -> Option<Rgba8> {
        match self.style {
            OverlayStyle::Hover => None,
            OverlayStyle::Selected => Some(SELECTED_COLOR.with_opacity(0.2)),
        }
    }

    /// Dashed outline stroke.
    pub(crate) fn outline_stroke(&self) -> vello_cpu::kurbo::Stroke {
        vello_cpu::kurbo::Stroke::new(self.line_width()).with_dashes(0.0, [DASH_PX, DASH_PX])
    }

    /// Square markers centered on the four corners.
    pub fn handle_markers(&self) -> [Rect; 4] {
        let b = self.bounds;
        let half = HANDLE_MARKER_PX / 2.0;
        [
            Point::new(b.x0, b.y0),
            Point::new(b.x1, b.y0),
            Point::new(b.x0, b.y1),
            Point::new(b.x1, b.y1),
        ]
        .map(|p| Rect::new(p.x - half, p.y - half, p.x + half, p.y + half))
    }
}

/// Overlay to show: the selection wins over the hover, which wins over the drag target.
pub fn overlay_for(
    layout: &Layout,
    selection: Option<ElementRef>,
    hovered: Option<ElementRef>,
    drag_target: Option<ElementRef>,
) -> Option<Overlay> {
    let element = selection.or(hovered).or(drag_target)?;
    let bounds = layout.element_rect(element)?;
    let style = if selection == Some(element) {
        OverlayStyle::Selected
    } else {
        OverlayStyle::Hover
    };
    Some(Overlay {
        element,
        bounds,
        style,
    })
}

/// Rasterize an overlay onto a transparent canvas-sized frame.
pub fn render_overlay(overlay: &Overlay, canvas: Canvas) -> CreativeResult<FrameRGBA> {
    let mut surface = Surface::acquire(canvas)?;
    let ctx = &mut surface.ctx;
    let color = overlay.color().to_cpu_color();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    ctx.set_paint(color);
    ctx.set_stroke(overlay.outline_stroke());
    ctx.stroke_path(&bezpath_to_cpu(&overlay.bounds.to_path(0.1)));

    for marker in overlay.handle_markers() {
        ctx.fill_rect(&rect_to_cpu(marker));
    }
    if let Some(tint) = overlay.fill() {
        ctx.set_paint(tint.to_cpu_color());
        ctx.fill_rect(&rect_to_cpu(overlay.bounds));
    }
    Ok(surface.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
