use super::*;

#[test]
fn engine_without_font_estimates_width() {
    let mut engine = TextLayoutEngine::new();
    assert!(!engine.has_font());
    assert!(engine.family_name().is_none());

    let narrow = engine.measure("ab", 20.0, false);
    let wide = engine.measure("abcd", 20.0, false);
    assert!((wide - 2.0 * narrow).abs() < 1e-9);
    assert!(engine.measure("abcd", 20.0, true) > wide);
    assert_eq!(engine.measure("", 20.0, false), 0.0);
}

#[test]
fn layout_without_font_is_a_render_error() {
    let mut engine = TextLayoutEngine::new();
    let Err(err) = engine.layout_line("hi", 12.0, false, TextBrushRgba8::default()) else {
        panic!("layout without a font must fail");
    };
    assert!(matches!(err, CreativeError::Render(_)));
}

#[test]
fn system_font_shapes_real_glyphs() {
    let mut engine = TextLayoutEngine::from_system_fonts().unwrap();
    assert!(engine.has_font());
    assert!(engine.family_name().is_some_and(|f| !f.is_empty()));

    let w = engine.measure("WWWW", 20.0, false);
    let i = engine.measure("iiii", 20.0, false);
    assert!(w > 0.0);
    // Proportional shaping, not the flat estimate.
    assert!(w > i);

    let Ok(layout) = engine.layout_line("hi", 12.0, true, TextBrushRgba8::default()) else {
        panic!("layout with a system font must succeed");
    };
    assert!(layout.width() > 0.0);
}

#[test]
fn invalid_size_is_a_validation_error() {
    let mut engine = TextLayoutEngine::from_system_fonts().unwrap();
    let Err(err) = engine.layout_line("hi", 0.0, false, TextBrushRgba8::default()) else {
        panic!("zero size must fail");
    };
    assert!(matches!(err, CreativeError::Validation(_)));
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let res = TextLayoutEngine::with_font_bytes(Arc::new(b"not a font".to_vec()));
    assert!(res.is_err());
}

#[test]
fn brush_converts_from_color() {
    let brush = TextBrushRgba8::from(Rgba8::rgb(1, 2, 3));
    assert_eq!(
        brush,
        TextBrushRgba8 {
            r: 1,
            g: 2,
            b: 3,
            a: 255
        }
    );
}
