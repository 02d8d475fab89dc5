use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use kurbo::Shape as _;

use crate::assets::color::{is_literal_white, parse_hex_or};
use crate::assets::decode::PreparedImage;
use crate::assets::source::{ImageSlot, ImageSource, load_all};
use crate::assets::text::TextLayoutEngine;
use crate::foundation::core::{Affine, Anchor, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::CreativeResult;
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::layout::model::{Decoration, DecorationKind, Layout};
use crate::layout::random::SeededRandom;
use crate::render::backend::FrameRGBA;
use crate::render::gradient::BackgroundFill;
use crate::render::surface::{Surface, affine_to_cpu, bezpath_to_cpu, image_paint, rect_to_cpu};
use crate::render::text::{TextAnchor, draw_line, draw_wrapped};
use crate::render::texture::{TextureCanvas, paint_texture};

/// Environment variable overriding [`RenderOpts::image_timeout`], in milliseconds.
pub const IMAGE_TIMEOUT_ENV: &str = "ADCANVAS_IMAGE_TIMEOUT_MS";

/// Default bound on the image load barrier.
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Alpha applied to shape decorations.
pub const SHAPE_ALPHA: f32 = 0.6;

/// Default opacity of image decorations without an explicit one.
pub const DEFAULT_IMAGE_OPACITY: f64 = 0.85;

/// Default number of decoded images kept between renders.
pub const DEFAULT_IMAGE_CACHE_LIMIT: usize = 32;

const TEXT_FALLBACK: Rgba8 = Rgba8::rgb(0, 0, 0);

/// Compositor options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOpts {
    /// How long to wait for all images to decode before failing the render.
    pub image_timeout: Duration,
    /// Seed for the noise texture; `None` draws from OS entropy.
    pub noise_seed: Option<u64>,
    /// Decoded images kept between renders. Past this, images the current layout does not
    /// use are dropped.
    pub image_cache_limit: usize,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
            noise_seed: None,
            image_cache_limit: DEFAULT_IMAGE_CACHE_LIMIT,
        }
    }
}

impl RenderOpts {
    /// Defaults with [`IMAGE_TIMEOUT_ENV`] applied when set.
    pub fn from_env() -> Self {
        Self::with_timeout_override(std::env::var(IMAGE_TIMEOUT_ENV).ok().as_deref())
    }

    /// Defaults with a raw millisecond override; unparsable values are logged and ignored.
    pub(crate) fn with_timeout_override(raw: Option<&str>) -> Self {
        let mut opts = Self::default();
        if let Some(raw) = raw {
            match raw.trim().parse::<u64>() {
                Ok(ms) => opts.image_timeout = Duration::from_millis(ms),
                Err(err) => {
                    tracing::warn!(value = %raw, %err, "ignoring invalid {IMAGE_TIMEOUT_ENV}")
                }
            }
        }
        opts
    }
}

/// Packshot and logo images for a render.
#[derive(Clone, Debug)]
pub struct CreativeAssets {
    /// Product photo, ideally with its background removed.
    pub packshot: ImageSource,
    /// Brand logo.
    pub logo: ImageSource,
}

/// Copy rendered into the creative.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreativeText {
    /// Main headline, rendered upper-cased.
    pub headline: String,
    /// Call to action label; empty hides the button.
    pub cta: String,
    /// Secondary text. `None` or empty skips it even when the layout has a box for it.
    pub additional_text: Option<String>,
}

#[derive(Clone)]
struct CachedImage {
    width: u32,
    height: u32,
    paint: vello_cpu::Image,
}

/// Turns a [`Layout`] plus assets and copy into pixels.
///
/// Decoded images are cached by source, so re-rendering an edited layout only decodes new
/// images. The cache is bounded by [`RenderOpts::image_cache_limit`].
pub struct Compositor {
    opts: RenderOpts,
    text: TextLayoutEngine,
    rng: SeededRandom,
    images: HashMap<u64, Option<CachedImage>>,
}

impl Compositor {
    /// Compositor drawing text with an installed sans-serif font.
    ///
    /// Fails with [`CreativeError::Asset`](crate::CreativeError::Asset) when no system font
    /// can be found; use [`Compositor::with_font_bytes`] on hosts without fonts.
    pub fn new(opts: RenderOpts) -> CreativeResult<Self> {
        Ok(Self::with_text_engine(
            opts,
            TextLayoutEngine::from_system_fonts()?,
        ))
    }

    /// Compositor drawing text with the given TTF/OTF font.
    pub fn with_font_bytes(opts: RenderOpts, font_bytes: Arc<Vec<u8>>) -> CreativeResult<Self> {
        Ok(Self::with_text_engine(
            opts,
            TextLayoutEngine::with_font_bytes(font_bytes)?,
        ))
    }

    fn with_text_engine(opts: RenderOpts, text: TextLayoutEngine) -> Self {
        let rng = match opts.noise_seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };
        Self {
            opts,
            text,
            rng,
            images: HashMap::new(),
        }
    }

    /// Options in effect.
    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Number of decoded image sources currently cached.
    pub fn cached_images(&self) -> usize {
        self.images.len()
    }

    /// Drop every cached image.
    pub fn clear_image_cache(&mut self) {
        self.images.clear();
    }

    /// Composite a layout back to front.
    ///
    /// Waits for every required image first; a decode failure or an expired
    /// [`RenderOpts::image_timeout`] fails the render without painting anything.
    #[tracing::instrument(skip_all, fields(ratio = %layout.ratio, template = %layout.template))]
    pub fn render(
        &mut self,
        layout: &Layout,
        assets: &CreativeAssets,
        text: &CreativeText,
    ) -> CreativeResult<FrameRGBA> {
        let mut surface = Surface::acquire(layout.canvas())?;
        let slots = self.load_images(layout, assets)?;

        let ctx = &mut surface.ctx;
        let (w, h) = layout.canvas().size_f64();

        let fill = BackgroundFill::parse(&layout.background, w, h);
        self.paint_background(ctx, &fill, layout.width, layout.height)?;
        {
            let mut canvas = CpuCanvas { ctx: &mut *ctx, width: w, height: h };
            paint_texture(
                &mut canvas,
                layout.width,
                layout.height,
                fill.base_color(),
                layout.background_texture,
                matches!(fill, BackgroundFill::Solid(_)),
                &mut self.rng,
            );
        }

        for (i, deco) in layout.decorations.iter().enumerate() {
            let image = slots
                .get(&ImageSlot::Decoration(i))
                .and_then(|key| self.cached(*key));
            self.paint_decoration(ctx, deco, image)?;
        }

        if let Some(img) = slots.get(&ImageSlot::Packshot).and_then(|k| self.cached(*k)) {
            let p = &layout.packshot;
            let (dw, dh) = aspect_fit(p.width, p.height, img.width, img.height);
            let dest = Rect::new(p.x - dw / 2.0, p.y - dh / 2.0, p.x + dw / 2.0, p.y + dh / 2.0);
            fill_image(ctx, &img, dest, Affine::IDENTITY, 1.0);
        }

        if let Some(img) = slots.get(&ImageSlot::Logo).and_then(|k| self.cached(*k)) {
            let l = &layout.logo;
            let (dw, dh) = aspect_fit(l.width, l.height, img.width, img.height);
            fill_image(ctx, &img, Rect::new(l.x, l.y, l.x + dw, l.y + dh), Affine::IDENTITY, 1.0);
        }

        let headline_color = parse_hex_or(&layout.headline.color, TEXT_FALLBACK);
        draw_wrapped(
            ctx,
            &mut self.text,
            &text.headline.to_uppercase(),
            layout.headline.font_size,
            true,
            headline_color,
            Point::new(layout.headline.bounds.x, layout.headline.bounds.y),
            layout.headline.bounds.width,
        )?;

        let copy = text.additional_text.as_deref().filter(|c| !c.is_empty());
        if let (Some(extra), Some(copy)) = (&layout.additional_text, copy) {
            let el = &extra.element;
            draw_wrapped(
                ctx,
                &mut self.text,
                copy,
                el.font_size,
                false,
                parse_hex_or(&el.color, TEXT_FALLBACK),
                Point::new(el.bounds.x, el.bounds.y),
                el.bounds.width,
            )?;
        }

        if !text.cta.is_empty() {
            let cta = &layout.cta;
            let label_color = parse_hex_or(&cta.color, TEXT_FALLBACK);
            let button_color = if is_literal_white(&cta.color) {
                headline_color
            } else {
                label_color
            };
            let b = cta.bounds;
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(button_color.to_cpu_color());
            ctx.fill_rect(&rect_to_cpu(Rect::new(b.x, b.y, b.x + b.width, b.y + b.height)));
            draw_line(
                ctx,
                &mut self.text,
                &text.cta.to_uppercase(),
                cta.font_size as f32,
                true,
                label_color,
                Point::new(b.x + b.width / 2.0, b.y + b.height / 2.0),
                TextAnchor::Center,
                Affine::IDENTITY,
            )?;
        }

        let frame = surface.finish();
        tracing::debug!(width = frame.width, height = frame.height, "creative rendered");
        Ok(frame)
    }

    fn cached(&self, key: u64) -> Option<CachedImage> {
        self.images.get(&key).cloned().flatten()
    }

    /// Resolve every image the layout needs, decoding only sources not seen before.
    fn load_images(
        &mut self,
        layout: &Layout,
        assets: &CreativeAssets,
    ) -> CreativeResult<HashMap<ImageSlot, u64>> {
        let mut wanted: Vec<(ImageSlot, ImageSource)> = vec![
            (ImageSlot::Packshot, assets.packshot.clone()),
            (ImageSlot::Logo, assets.logo.clone()),
        ];
        for (i, deco) in layout.decorations.iter().enumerate() {
            if deco.kind != DecorationKind::Image {
                continue;
            }
            if let Some(reference) = &deco.image {
                wanted.push((ImageSlot::Decoration(i), ImageSource::from_ref(reference)));
            }
        }

        let mut slots = HashMap::with_capacity(wanted.len());
        let mut pending: Vec<(ImageSlot, ImageSource)> = Vec::new();
        let mut pending_keys: HashMap<ImageSlot, u64> = HashMap::new();
        for (slot, source) in wanted {
            let key = source.cache_key();
            slots.insert(slot, key);
            if self.images.contains_key(&key) || pending_keys.values().any(|k| *k == key) {
                continue;
            }
            pending_keys.insert(slot, key);
            pending.push((slot, source));
        }

        if !pending.is_empty() {
            let loaded = load_all(pending, self.opts.image_timeout)?;
            for (slot, key) in pending_keys {
                let entry = loaded.get(slot).and_then(cache_entry);
                if entry.is_none() {
                    tracing::debug!(?slot, "image decoded to zero size, skipping");
                }
                self.images.insert(key, entry);
            }
        }
        if self.images.len() > self.opts.image_cache_limit {
            self.images.retain(|key, _| slots.values().any(|k| k == key));
            tracing::debug!(kept = self.images.len(), "image cache trimmed");
        }
        Ok(slots)
    }

    fn paint_background(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        fill: &BackgroundFill,
        width: u32,
        height: u32,
    ) -> CreativeResult<()> {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match fill.rasterize_premul(width, height) {
            None => ctx.set_paint(fill.base_color().to_cpu_color()),
            Some(bytes) => ctx.set_paint(image_paint(&bytes, width, height)?),
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
        Ok(())
    }

    fn paint_decoration(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        deco: &Decoration,
        image: Option<CachedImage>,
    ) -> CreativeResult<()> {
        let b = deco.bounds;
        let center = Point::new(b.x, b.y);
        let transform = match deco.rotation {
            Some(deg) if deg != 0.0 => {
                Affine::translate(center.to_vec2())
                    * Affine::rotate(deg.to_radians())
                    * Affine::translate(-center.to_vec2())
            }
            _ => Affine::IDENTITY,
        };
        let color = parse_hex_or(&deco.color, TEXT_FALLBACK);

        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match deco.kind {
            DecorationKind::Circle => {
                let path = kurbo::Circle::new(center, b.width / 2.0).to_path(0.1);
                ctx.set_transform(affine_to_cpu(transform));
                ctx.set_paint(color.with_opacity(SHAPE_ALPHA).to_cpu_color());
                ctx.fill_path(&bezpath_to_cpu(&path));
            }
            DecorationKind::Rectangle | DecorationKind::Line => {
                let rect = if deco.kind == DecorationKind::Rectangle {
                    b.rect(Anchor::Center)
                } else {
                    b.rect(Anchor::TopLeft)
                };
                ctx.set_transform(affine_to_cpu(transform));
                ctx.set_paint(color.with_opacity(SHAPE_ALPHA).to_cpu_color());
                ctx.fill_rect(&rect_to_cpu(rect));
            }
            DecorationKind::Emoji => {
                if let Some(glyph) = &deco.content {
                    draw_line(
                        ctx,
                        &mut self.text,
                        glyph,
                        (b.width * 1.2) as f32,
                        false,
                        color,
                        center,
                        TextAnchor::Center,
                        transform,
                    )?;
                }
            }
            DecorationKind::Image => {
                if let Some(img) = image {
                    let opacity = deco.opacity.unwrap_or(DEFAULT_IMAGE_OPACITY);
                    let dest = b.rect(Anchor::Center);
                    fill_image(ctx, &img, dest, transform, opacity as f32);
                }
            }
        }
        Ok(())
    }
}

fn cache_entry(img: &PreparedImage) -> Option<CachedImage> {
    if img.is_empty() {
        return None;
    }
    match image_paint(&img.rgba8_premul, img.width, img.height) {
        Ok(paint) => Some(CachedImage {
            width: img.width,
            height: img.height,
            paint,
        }),
        Err(err) => {
            tracing::warn!(%err, "image too large for the rasterizer, skipping");
            None
        }
    }
}

/// Largest size with the image's aspect ratio that fits inside the box.
pub(crate) fn aspect_fit(box_w: f64, box_h: f64, img_w: u32, img_h: u32) -> (f64, f64) {
    let (iw, ih) = (f64::from(img_w.max(1)), f64::from(img_h.max(1)));
    let s = (box_w / iw).min(box_h / ih);
    (iw * s, ih * s)
}

fn fill_image(
    ctx: &mut vello_cpu::RenderContext,
    img: &CachedImage,
    dest: Rect,
    transform: Affine,
    opacity: f32,
) {
    let iw = f64::from(img.width);
    let ih = f64::from(img.height);
    let placement = transform
        * Affine::translate((dest.x0, dest.y0))
        * Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih);
    ctx.set_transform(affine_to_cpu(placement));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(img.paint.clone());
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

/// [`TextureCanvas`] over a CPU render context.
struct CpuCanvas<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    width: f64,
    height: f64,
}

impl CpuCanvas<'_> {
    fn reset(&mut self, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu_color());
    }
}

impl TextureCanvas for CpuCanvas<'_> {
    fn fill_all(&mut self, color: Rgba8) {
        self.reset(color);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, self.width, self.height));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.reset(color);
        let path = kurbo::Circle::new(center, radius).to_path(0.1);
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.reset(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba8) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        self.reset(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(&path));
    }

    fn draw_pixels(&mut self, mut rgba: Vec<u8>, width: u32, height: u32) {
        premultiply_rgba8_in_place(&mut rgba);
        match image_paint(&rgba, width, height) {
            Ok(paint) => {
                self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                self.ctx
                    .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                self.ctx.set_paint(paint);
                self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(width),
                    f64::from(height),
                ));
            }
            Err(err) => tracing::warn!(%err, "texture pixels rejected"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
