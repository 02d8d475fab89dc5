use crate::editor::hit_test::{ResizeHandle, hit_test};
use crate::editor::input::{Focus, InputEvent, Key};
use crate::editor::ops::{
    ROTATE_STEP_KEY_DEG, delete_decoration, move_element, resize_element, rotate_decoration,
};
use crate::foundation::core::{Canvas, Point};
use crate::layout::model::{ElementRef, Layout, PlacedBox};

/// Viewport configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportOpts {
    /// Tallest the displayed canvas may be, in screen pixels.
    pub max_height: f64,
}

impl Default for ViewportOpts {
    fn default() -> Self {
        Self { max_height: 600.0 }
    }
}

/// Screen pixels per canvas pixel: fit the container width without exceeding
/// `opts.max_height`.
pub fn viewport_scale(container_width: f64, canvas: Canvas, opts: &ViewportOpts) -> f64 {
    let (w, h) = canvas.size_f64();
    if w <= 0.0 || h <= 0.0 {
        return 1.0;
    }
    (container_width / w).min(opts.max_height / h)
}

/// Pointer interaction in progress.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Moving an element. Positions are in canvas space.
    Dragging {
        element: ElementRef,
        start_pointer: Point,
        start_box: PlacedBox,
    },
    /// Resizing an element from a corner.
    Resizing {
        element: ElementRef,
        handle: ResizeHandle,
        start_pointer: Point,
        start_box: PlacedBox,
    },
}

impl DragState {
    /// Element being dragged or resized.
    pub fn target(&self) -> Option<ElementRef> {
        match *self {
            Self::Idle => None,
            Self::Dragging { element, .. } | Self::Resizing { element, .. } => Some(element),
        }
    }
}

/// What an event changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The layout was mutated; its raster is stale.
    pub layout_changed: bool,
    /// Selection, hover or drag target changed; the overlay should be redrawn.
    pub overlay_changed: bool,
}

impl EventOutcome {
    const NONE: Self = Self {
        layout_changed: false,
        overlay_changed: false,
    };
    const OVERLAY: Self = Self {
        layout_changed: false,
        overlay_changed: true,
    };
    const LAYOUT: Self = Self {
        layout_changed: true,
        overlay_changed: true,
    };
}

/// Interaction state for the layout currently shown in the editor.
///
/// The layout itself is passed to [`EditorState::handle`] so the state can be reused
/// across variants.
#[derive(Clone, Debug)]
pub struct EditorState {
    drag: DragState,
    selection: Option<ElementRef>,
    hovered: Option<ElementRef>,
    scale: f64,
    container_width: Option<f64>,
    viewport: ViewportOpts,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(ViewportOpts::default())
    }
}

impl EditorState {
    /// Idle state at scale 1 until a container width is known.
    pub fn new(viewport: ViewportOpts) -> Self {
        Self {
            drag: DragState::Idle,
            selection: None,
            hovered: None,
            scale: 1.0,
            container_width: None,
            viewport,
        }
    }

    /// Drag or resize in progress.
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Selected element.
    pub fn selection(&self) -> Option<ElementRef> {
        self.selection
    }

    /// Element under the pointer while idle.
    pub fn hovered(&self) -> Option<ElementRef> {
        self.hovered
    }

    /// Screen pixels per canvas pixel.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Select an element programmatically, or clear the selection.
    pub fn select(&mut self, element: Option<ElementRef>) {
        self.selection = element;
    }

    /// Drop selection, hover and any drag in progress.
    pub fn reset(&mut self) {
        self.drag = DragState::Idle;
        self.selection = None;
        self.hovered = None;
    }

    /// Recompute the scale for a new canvas size, keeping the last container width.
    pub fn fit_canvas(&mut self, canvas: Canvas) {
        if let Some(width) = self.container_width {
            self.scale = viewport_scale(width, canvas, &self.viewport);
        }
    }

    /// Screen position to canvas position.
    pub fn to_canvas(&self, screen: Point) -> Point {
        if self.scale > 0.0 {
            Point::new(screen.x / self.scale, screen.y / self.scale)
        } else {
            screen
        }
    }

    /// Advance the state machine by one event, mutating `layout` for drags, resizes and
    /// keyboard edits.
    pub fn handle(&mut self, layout: &mut Layout, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::PointerDown(screen) => self.pointer_down(layout, self.to_canvas(screen)),
            InputEvent::PointerMove(screen) => self.pointer_move(layout, self.to_canvas(screen)),
            InputEvent::PointerUp => self.end_drag(),
            InputEvent::PointerLeave => {
                let had_hover = self.hovered.take().is_some();
                let ended = self.end_drag();
                if had_hover || ended.overlay_changed {
                    EventOutcome::OVERLAY
                } else {
                    EventOutcome::NONE
                }
            }
            InputEvent::KeyDown { key, focus } => self.key_down(layout, key, focus),
            InputEvent::ContainerResized { width } => {
                self.container_width = Some(width);
                self.scale = viewport_scale(width, layout.canvas(), &self.viewport);
                EventOutcome::OVERLAY
            }
        }
    }

    fn pointer_down(&mut self, layout: &Layout, p: Point) -> EventOutcome {
        // Pressing on empty canvas keeps the current selection.
        let Some(hit) = hit_test(layout, p) else {
            return EventOutcome::NONE;
        };
        let Some(start_box) = layout.placed(hit.element).copied() else {
            return EventOutcome::NONE;
        };
        self.selection = Some(hit.element);
        self.drag = match hit.handle {
            Some(handle) => DragState::Resizing {
                element: hit.element,
                handle,
                start_pointer: p,
                start_box,
            },
            None => DragState::Dragging {
                element: hit.element,
                start_pointer: p,
                start_box,
            },
        };
        tracing::debug!(element = ?hit.element, handle = ?hit.handle, "pointer down");
        EventOutcome::OVERLAY
    }

    fn pointer_move(&mut self, layout: &mut Layout, p: Point) -> EventOutcome {
        let changed = match self.drag {
            DragState::Idle => {
                let hovered = hit_test(layout, p).map(|h| h.element);
                if hovered == self.hovered {
                    return EventOutcome::NONE;
                }
                self.hovered = hovered;
                return EventOutcome::OVERLAY;
            }
            DragState::Dragging {
                element,
                start_pointer,
                start_box,
            } => move_element(layout, element, &start_box, p - start_pointer),
            DragState::Resizing {
                element,
                start_pointer,
                start_box,
                ..
            } => resize_element(layout, element, &start_box, p - start_pointer),
        };
        if changed {
            EventOutcome::LAYOUT
        } else {
            EventOutcome::NONE
        }
    }

    fn end_drag(&mut self) -> EventOutcome {
        if self.drag == DragState::Idle {
            return EventOutcome::NONE;
        }
        self.drag = DragState::Idle;
        EventOutcome::OVERLAY
    }

    fn key_down(&mut self, layout: &mut Layout, key: Key, focus: Focus) -> EventOutcome {
        if focus == Focus::TextInput {
            return EventOutcome::NONE;
        }
        let Some(selected) = self.selection else {
            return EventOutcome::NONE;
        };
        match key {
            Key::Delete | Key::Backspace => {
                self.selection = None;
                self.drag = DragState::Idle;
                match selected {
                    ElementRef::Decoration(i) if delete_decoration(layout, i).is_some() => {
                        self.hovered = None;
                        EventOutcome::LAYOUT
                    }
                    _ => EventOutcome::OVERLAY,
                }
            }
            Key::ArrowLeft | Key::ArrowRight => {
                let delta = if key == Key::ArrowLeft {
                    -ROTATE_STEP_KEY_DEG
                } else {
                    ROTATE_STEP_KEY_DEG
                };
                match selected {
                    ElementRef::Decoration(i) if rotate_decoration(layout, i, delta).is_some() => {
                        EventOutcome::LAYOUT
                    }
                    _ => EventOutcome::NONE,
                }
            }
            Key::Other => EventOutcome::NONE,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/state.rs"]
mod tests;
