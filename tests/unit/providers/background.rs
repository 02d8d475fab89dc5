use super::*;

fn framed_square() -> image::RgbaImage {
    // White frame, red 4x4 center.
    let mut img = image::RgbaImage::from_pixel(8, 8, image::Rgba([250, 250, 250, 255]));
    for y in 2..6 {
        for x in 2..6 {
            img.put_pixel(x, y, image::Rgba([220, 20, 20, 255]));
        }
    }
    img
}

#[test]
fn corner_key_clears_background_and_keeps_subject() {
    let mut img = framed_square();
    key_out_corners(&mut img);
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    assert_eq!(img.get_pixel(7, 3).0[3], 0);
    assert_eq!(img.get_pixel(3, 3).0, [220, 20, 20, 255]);
}

#[test]
fn remover_outputs_png_with_alpha() {
    let png = encode_png(&framed_square()).unwrap();
    let out = CornerKeyRemover.remove_background(&png).unwrap();
    let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (8, 8));
    assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
    assert_eq!(decoded.get_pixel(4, 4).0[3], 255);
}

#[test]
fn failing_primary_falls_back_to_local() {
    let png = encode_png(&framed_square()).unwrap();
    let out = remove_background_or_fallback(&NoRemoteRemover, &png);
    let decoded = image::load_from_memory(&out).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
}

#[test]
fn undecodable_input_is_returned_unchanged() {
    let junk = b"not an image".to_vec();
    assert_eq!(remove_background_or_fallback(&NoRemoteRemover, &junk), junk);
}
