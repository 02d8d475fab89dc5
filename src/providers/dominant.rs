use crate::foundation::core::Rgba8;
use crate::providers::palette::DEFAULT_PRIMARY;

const SAMPLE_SIZE: u32 = 50;

/// Most frequent colors of an image, most frequent first.
///
/// The image is downsampled to 50x50; translucent pixels (alpha < 128) and pixels whose
/// mean brightness is outside `[20, 250]` are ignored; channels are quantized to steps
/// of 10. Falls back to a single default blue when nothing qualifies.
pub fn dominant_colors(image: &image::DynamicImage, n: usize) -> Vec<Rgba8> {
    let small = image::imageops::resize(
        &image.to_rgba8(),
        SAMPLE_SIZE,
        SAMPLE_SIZE,
        image::imageops::FilterType::Triangle,
    );

    // (color, count) in first-seen order so ties keep a stable ranking.
    let mut counts: Vec<(Rgba8, u32)> = Vec::new();
    for px in small.pixels() {
        let [r, g, b, a] = px.0;
        if a < 128 {
            continue;
        }
        let brightness = (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0;
        if !(20.0..=250.0).contains(&brightness) {
            continue;
        }
        let key = Rgba8::rgb(quantize(r), quantize(g), quantize(b));
        match counts.iter_mut().find(|(c, _)| *c == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let out: Vec<Rgba8> = counts.into_iter().take(n).map(|(c, _)| c).collect();
    if out.is_empty() {
        tracing::debug!("no qualifying pixels, using default color");
        return vec![DEFAULT_PRIMARY];
    }
    out
}

fn quantize(c: u8) -> u8 {
    ((f64::from(c) / 10.0).round() * 10.0).min(255.0) as u8
}
