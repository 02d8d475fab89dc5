//! adcanvas generates multi-format ad creatives and lets them be edited by direct manipulation.
//!
//! A creative is described by a [`Layout`]: a fully resolved placement of the packshot, logo,
//! headline, call to action, optional secondary text and decorations on a fixed-size canvas.
//! Layouts come from closed-form template formulas, get composited into pixels on the CPU,
//! and can then be edited through an explicit input-event state machine.
//!
//! # Pipeline overview
//!
//! 1. **Palette**: [`SeedPalette`] derives four colors from a brand color (optionally sampled
//!    from the logo with [`dominant_colors`]).
//! 2. **Layout**: [`generate`] picks a template per [`AspectRatio`] and places every element.
//! 3. **Composite**: [`Compositor::render`] paints background, texture, decorations, images and
//!    text into a premultiplied [`FrameRGBA`].
//! 4. **Edit**: [`EditorSession`] feeds [`InputEvent`]s to the active variant, invalidates its
//!    raster on every change and only keeps renders whose [`RenderTicket`] is current.
//! 5. **Export**: [`export_all`] writes one size-bounded JPEG (or PNG) per variant.
//!
//! Randomness (template picks, glyph colors, noise) flows through [`RandomSource`], so a
//! [`SeededRandom`] makes every step reproducible.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod editor;
mod foundation;
mod layout;
mod providers;
mod render;

pub use crate::foundation::core::{Affine, Anchor, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{CreativeError, CreativeResult};

pub use crate::assets::color::{adjust_brightness, parse_hex};
pub use crate::assets::decode::{
    PreparedImage, decode_data_url, decode_image, encode_data_url, parse_svg,
};
pub use crate::assets::source::{ImageSlot, ImageSource, LoadedImages, load_all};
pub use crate::assets::text::{TextBrushRgba8, TextLayoutEngine, TextMeasure};

pub use crate::layout::engine::{IMAGE_DECORATION_OPACITY, LayoutRequest, generate};
pub use crate::layout::model::{
    AdCategory, AdditionalText, AspectRatio, Decoration, DecorationKind, ElementRef, Layout,
    Palette, PlacedBox, TemplateFamily, TextElement, Texture,
};
pub use crate::layout::random::{FirstChoice, RandomSource, SeededRandom};

pub use crate::providers::background::{
    BackgroundRemover, CornerKeyRemover, LOCAL_THRESHOLD, NoRemoteRemover,
    remove_background_or_fallback,
};
pub use crate::providers::compress::{MIN_QUALITY, QUALITY_STEP, START_QUALITY, compress_to_jpeg};
pub use crate::providers::decorations::{
    DecorationContentProvider, KeywordDecorations, SymbolicDecoration, glyph_for, themes_for,
};
pub use crate::providers::dominant::dominant_colors;
pub use crate::providers::palette::{DEFAULT_PRIMARY, PaletteProvider, SeedPalette};

pub use crate::render::backend::FrameRGBA;
pub use crate::render::compositor::{
    Compositor, CreativeAssets, CreativeText, DEFAULT_IMAGE_CACHE_LIMIT, DEFAULT_IMAGE_TIMEOUT,
    IMAGE_TIMEOUT_ENV, RenderOpts,
};
pub use crate::render::gradient::BackgroundFill;
pub use crate::render::overlay::{Overlay, OverlayStyle, overlay_for, render_overlay};
pub use crate::render::text::{LINE_HEIGHT, wrap_lines};
pub use crate::render::texture::{TextureCanvas, paint_texture};

pub use crate::editor::export::{
    ExportFormat, ExportOpts, export_all, export_file_name, write_frame,
};
pub use crate::editor::hit_test::{HANDLE_HIT_PX, Hit, ResizeHandle, handle_at, hit_test};
pub use crate::editor::input::{Focus, InputEvent, Key};
pub use crate::editor::ops::{
    FONT_STEP_PX, FontTarget, MIN_DECORATION_PX, MIN_LOGO_PX, MIN_PACKSHOT_PX,
    ROTATE_STEP_BUTTON_DEG, ROTATE_STEP_KEY_DEG, delete_decoration, min_size, move_element,
    resize_element, rotate_decoration, set_font_size, step_font_size,
};
pub use crate::editor::session::{EditorSession, GeneratedCreative, RenderTicket, SessionInputs};
pub use crate::editor::state::{DragState, EditorState, EventOutcome, ViewportOpts, viewport_scale};
