use super::*;
use crate::foundation::error::CreativeError;
use crate::layout::engine::{LayoutRequest, generate};
use crate::layout::model::{AspectRatio, Palette, TemplateFamily, Texture};
use crate::layout::random::FirstChoice;
use crate::providers::decorations::KeywordDecorations;

fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut out = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn palette() -> Palette {
    Palette {
        primary: "#3B82F6".to_owned(),
        secondary: "#75a7f8".to_owned(),
        accent: "#2f68c4".to_owned(),
        background: "#d7e6fd".to_owned(),
    }
}

fn square_layout() -> Layout {
    let palette = palette();
    generate(
        &LayoutRequest {
            ratio: AspectRatio::Square,
            template: Some(TemplateFamily::CleanMinimal),
            palette: &palette,
            headline: "Fresh Shampoo",
            decorative_images: &[],
            category: None,
            additional_text: None,
        },
        &KeywordDecorations,
        &mut FirstChoice,
    )
}

fn assets() -> CreativeAssets {
    CreativeAssets {
        packshot: ImageSource::from(png(4, 4, [255, 0, 0, 255])),
        logo: ImageSource::from(png(2, 2, [0, 0, 255, 255])),
    }
}

fn text() -> CreativeText {
    CreativeText {
        headline: "Fresh Shampoo".to_owned(),
        cta: "Buy now".to_owned(),
        additional_text: None,
    }
}

fn opts() -> RenderOpts {
    RenderOpts {
        image_timeout: Duration::from_secs(30),
        noise_seed: Some(1),
        ..RenderOpts::default()
    }
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}

#[test]
fn renders_canvas_sized_frame_deterministically() {
    let layout = square_layout();
    let mut c = Compositor::new(opts()).unwrap();
    let a = c.render(&layout, &assets(), &text()).unwrap();
    let b = c.render(&layout, &assets(), &text()).unwrap();
    assert_eq!((a.width, a.height), (1080, 1080));
    assert!(a.premultiplied);
    assert_eq!(a, b);
}

#[test]
fn background_texture_and_packshot_are_painted() {
    let layout = square_layout();
    assert_eq!(layout.background_texture, Texture::Dots);
    let frame = Compositor::new(opts()).unwrap()
        .render(&layout, &assets(), &text())
        .unwrap();

    // Between dots, away from every element.
    assert_eq!(frame.pixel(10, 10), Some([0xd7, 0xe6, 0xfd, 255]));
    // Packshot center.
    assert!(close(frame.pixel(540, 432).unwrap(), [255, 0, 0, 255]));
}

#[test]
fn white_cta_button_uses_headline_color() {
    let layout = square_layout();
    assert_eq!(layout.cta.color, "#FFFFFF");
    let frame = Compositor::new(opts()).unwrap()
        .render(&layout, &assets(), &text())
        .unwrap();
    let b = layout.cta.bounds;
    let px = frame
        .pixel((b.x + 5.0) as u32, (b.y + b.height / 2.0) as u32)
        .unwrap();
    assert_eq!(px, [0x2f, 0x68, 0xc4, 255]);
}

#[test]
fn empty_cta_hides_the_button() {
    let layout = square_layout();
    let mut t = text();
    t.cta.clear();
    let frame = Compositor::new(opts()).unwrap().render(&layout, &assets(), &t).unwrap();
    let b = layout.cta.bounds;
    let px = frame
        .pixel((b.x + 5.0) as u32, (b.y + b.height / 2.0) as u32)
        .unwrap();
    assert_ne!(px, [0x2f, 0x68, 0xc4, 255]);
}

#[test]
fn gradient_background_varies_across_canvas() {
    let mut layout = square_layout();
    layout.background = "linear-gradient(90deg, #000000, #ffffff)".to_owned();
    layout.background_texture = Texture::None;
    layout.decorations.clear();
    let frame = Compositor::new(opts()).unwrap()
        .render(&layout, &assets(), &text())
        .unwrap();
    let left = frame.pixel(2, 540).unwrap();
    let right = frame.pixel(1077, 540).unwrap();
    assert!(left[0] < 10);
    assert!(right[0] > 245);
}

#[test]
fn unusable_canvas_is_a_surface_failure() {
    let mut layout = square_layout();
    layout.width = 0;
    let err = Compositor::new(opts()).unwrap()
        .render(&layout, &assets(), &text())
        .unwrap_err();
    assert!(matches!(err, CreativeError::Surface(_)));
    assert!(err.is_render_failure());
}

#[test]
fn unreadable_image_fails_the_render() {
    let layout = square_layout();
    let bad = CreativeAssets {
        packshot: ImageSource::Path("/definitely/not/here.png".into()),
        logo: assets().logo,
    };
    assert!(Compositor::new(opts()).unwrap().render(&layout, &bad, &text()).is_err());
}

#[test]
fn decoded_images_are_cached_across_renders() {
    let mut layout = square_layout();
    let mut c = Compositor::new(opts()).unwrap();
    c.render(&layout, &assets(), &text()).unwrap();
    assert_eq!(c.cached_images(), 2);
    layout.packshot.x += 10.0;
    c.render(&layout, &assets(), &text()).unwrap();
    assert_eq!(c.cached_images(), 2);
}

fn changed_pixels_in(a: &FrameRGBA, b: &FrameRGBA, r: Rect) -> usize {
    let mut n = 0;
    for y in r.y0 as u32..r.y1 as u32 {
        for x in r.x0 as u32..r.x1 as u32 {
            if a.pixel(x, y) != b.pixel(x, y) {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn headline_text_is_painted() {
    let layout = square_layout();
    let mut c = Compositor::new(opts()).unwrap();
    let mut t = text();
    t.headline = "WWWWWW WWWWWW WWWWWW".to_owned();
    let with_text = c.render(&layout, &assets(), &t).unwrap();
    t.headline.clear();
    let without = c.render(&layout, &assets(), &t).unwrap();

    let hb = layout.headline.bounds.rect(Anchor::TopLeft);
    assert!(changed_pixels_in(&with_text, &without, hb) > 100);
}

#[test]
fn cta_label_is_painted_on_the_button() {
    let layout = square_layout();
    let mut c = Compositor::new(opts()).unwrap();
    let mut t = text();
    t.cta = "WWWW".to_owned();
    let labelled = c.render(&layout, &assets(), &t).unwrap();
    t.cta = " ".to_owned();
    let blank = c.render(&layout, &assets(), &t).unwrap();

    let cb = layout.cta.bounds.rect(Anchor::TopLeft);
    assert!(changed_pixels_in(&labelled, &blank, cb) > 20);
}

fn layout_with_additional_text() -> Layout {
    let palette = palette();
    generate(
        &LayoutRequest {
            ratio: AspectRatio::Square,
            template: Some(TemplateFamily::CleanMinimal),
            palette: &palette,
            headline: "Fresh Shampoo",
            decorative_images: &[],
            category: None,
            additional_text: Some("Limited edition"),
        },
        &KeywordDecorations,
        &mut FirstChoice,
    )
}

#[test]
fn additional_text_follows_the_supplied_copy() {
    let layout = layout_with_additional_text();
    assert!(layout.additional_text.is_some());
    let mut c = Compositor::new(opts()).unwrap();

    let mut without_box = layout.clone();
    without_box.additional_text = None;
    let reference = c.render(&without_box, &assets(), &text()).unwrap();

    // Cleared copy paints nothing, even though the layout still carries the old text.
    let cleared = c.render(&layout, &assets(), &text()).unwrap();
    assert_eq!(cleared, reference);
    let mut empty = text();
    empty.additional_text = Some(String::new());
    assert_eq!(c.render(&layout, &assets(), &empty).unwrap(), reference);

    let mut supplied = text();
    supplied.additional_text = Some("Limited edition".to_owned());
    let painted = c.render(&layout, &assets(), &supplied).unwrap();
    let eb = layout.additional_text.as_ref().unwrap().element.bounds.rect(Anchor::TopLeft);
    assert!(changed_pixels_in(&painted, &reference, eb) > 20);
}

#[test]
fn image_cache_is_trimmed_to_the_current_layout() {
    let layout = square_layout();
    let mut c = Compositor::new(RenderOpts {
        image_cache_limit: 2,
        ..opts()
    })
    .unwrap();
    c.render(&layout, &assets(), &text()).unwrap();
    assert_eq!(c.cached_images(), 2);

    let swapped = CreativeAssets {
        packshot: ImageSource::from(png(4, 4, [0, 255, 0, 255])),
        logo: assets().logo,
    };
    c.render(&layout, &swapped, &text()).unwrap();
    assert_eq!(c.cached_images(), 2);

    c.clear_image_cache();
    assert_eq!(c.cached_images(), 0);
}

#[test]
fn image_cache_keeps_sources_under_the_limit() {
    let layout = square_layout();
    let mut c = Compositor::new(opts()).unwrap();
    c.render(&layout, &assets(), &text()).unwrap();
    let swapped = CreativeAssets {
        packshot: ImageSource::from(png(4, 4, [0, 255, 0, 255])),
        logo: assets().logo,
    };
    c.render(&layout, &swapped, &text()).unwrap();
    assert_eq!(c.cached_images(), 3);
}

#[test]
fn aspect_fit_stays_inside_the_box() {
    assert_eq!(aspect_fit(100.0, 100.0, 200, 100), (100.0, 50.0));
    assert_eq!(aspect_fit(100.0, 100.0, 100, 200), (50.0, 100.0));
    assert_eq!(aspect_fit(80.0, 40.0, 10, 10), (40.0, 40.0));
    // Wide box, landscape image: height limits.
    assert_eq!(aspect_fit(500.0, 100.0, 200, 100), (200.0, 100.0));
    // Tall box, landscape image: width limits.
    assert_eq!(aspect_fit(100.0, 500.0, 200, 100), (100.0, 50.0));
}

#[test]
fn landscape_packshot_stays_inside_a_wide_box() {
    let mut layout = square_layout();
    layout.background_texture = Texture::None;
    layout.decorations.clear();
    // Landscape packshot in a wide, short box.
    layout.packshot.width = 500.0;
    layout.packshot.height = 100.0;
    let wide = CreativeAssets {
        packshot: ImageSource::from(png(200, 100, [255, 0, 0, 255])),
        logo: assets().logo,
    };
    let frame = Compositor::new(opts())
        .unwrap()
        .render(&layout, &wide, &text())
        .unwrap();
    let p = &layout.packshot;
    // Inside the box, the image is drawn.
    assert!(close(frame.pixel(p.x as u32, p.y as u32).unwrap(), [255, 0, 0, 255]));
    // Just above the box, the background shows.
    let above = frame.pixel(p.x as u32, (p.y - p.height / 2.0 - 5.0) as u32).unwrap();
    assert_eq!(above, [0xd7, 0xe6, 0xfd, 255]);
}

#[test]
fn timeout_override_parses_millis() {
    let opts = RenderOpts::with_timeout_override(Some(" 250 "));
    assert_eq!(opts.image_timeout, Duration::from_millis(250));
    assert_eq!(
        RenderOpts::with_timeout_override(Some("soon")).image_timeout,
        DEFAULT_IMAGE_TIMEOUT
    );
    assert_eq!(RenderOpts::with_timeout_override(None), RenderOpts::default());
}

#[test]
fn from_env_reads_the_timeout_variable() {
    let expected =
        RenderOpts::with_timeout_override(std::env::var(IMAGE_TIMEOUT_ENV).ok().as_deref());
    assert_eq!(RenderOpts::from_env(), expected);
    assert!(RenderOpts::from_env().noise_seed.is_none());
}
