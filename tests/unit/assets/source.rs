use std::io::Cursor;

use super::*;

fn png_source(w: u32, h: u32) -> ImageSource {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([9, 8, 7, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    ImageSource::from(buf)
}

#[test]
fn refs_map_to_data_urls_or_paths() {
    assert!(matches!(
        ImageSource::from_ref("data:image/png;base64,AAAA"),
        ImageSource::DataUrl(_)
    ));
    assert!(matches!(
        ImageSource::from_ref("assets/logo.png"),
        ImageSource::Path(_)
    ));
}

#[test]
fn barrier_collects_every_slot() {
    let loaded = load_all(
        vec![
            (ImageSlot::Packshot, png_source(4, 2)),
            (ImageSlot::Logo, png_source(1, 1)),
            (ImageSlot::Decoration(3), png_source(2, 2)),
        ],
        Duration::from_secs(10),
    )
    .unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.get(ImageSlot::Packshot).unwrap().width, 4);
    assert_eq!(loaded.get(ImageSlot::Decoration(3)).unwrap().height, 2);
    assert!(loaded.get(ImageSlot::Decoration(0)).is_none());
}

#[test]
fn barrier_is_all_or_nothing() {
    let res = load_all(
        vec![
            (ImageSlot::Packshot, png_source(4, 2)),
            (ImageSlot::Logo, ImageSource::from(b"not an image".to_vec())),
        ],
        Duration::from_secs(10),
    );
    assert!(res.is_err());
}

#[test]
fn missing_file_is_an_asset_error() {
    let err = ImageSource::Path("does/not/exist.png".into())
        .load()
        .unwrap_err();
    assert!(matches!(err, CreativeError::Asset(_)));
}

#[test]
fn empty_barrier_completes_immediately() {
    let loaded = load_all(Vec::new(), Duration::from_millis(0)).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn cache_keys_distinguish_sources() {
    let a = ImageSource::from(vec![1, 2, 3]);
    let b = ImageSource::from(vec![1, 2, 3]);
    let c = ImageSource::DataUrl("data:,x".into());
    assert_eq!(a.cache_key(), b.cache_key());
    assert_ne!(a.cache_key(), c.cache_key());
}

fn tiny_image() -> PreparedImage {
    PreparedImage {
        width: 1,
        height: 1,
        rgba8_premul: Arc::new(vec![0, 0, 0, 255]),
    }
}

type Job = Box<dyn FnOnce() -> CreativeResult<PreparedImage> + Send>;

#[test]
fn slow_load_times_out_with_pending_count() {
    let jobs: Vec<(ImageSlot, Job)> = vec![
        (ImageSlot::Packshot, Box::new(|| Ok(tiny_image()))),
        (
            ImageSlot::Logo,
            Box::new(|| {
                std::thread::sleep(Duration::from_millis(500));
                Ok(tiny_image())
            }),
        ),
    ];
    let Err(err) = join_loads(jobs, Duration::from_millis(50)) else {
        panic!("a load slower than the deadline must fail the barrier");
    };
    assert!(matches!(err, CreativeError::Timeout { millis: 50, pending } if pending >= 1));
    assert!(err.is_render_failure());
}

#[test]
fn loads_within_the_deadline_succeed() {
    let jobs: Vec<(ImageSlot, Job)> = vec![(
        ImageSlot::Logo,
        Box::new(|| {
            std::thread::sleep(Duration::from_millis(5));
            Ok(tiny_image())
        }),
    )];
    let loaded = join_loads(jobs, Duration::from_secs(10)).unwrap();
    assert_eq!(loaded.get(ImageSlot::Logo).map(|i| i.width), Some(1));
}
