use super::*;

fn sample() -> Layout {
    let text = |y: f64| TextElement {
        bounds: PlacedBox::new(10.0, y, 200.0, 40.0).draggable(),
        font_size: 24.0,
        color: "#000000".to_owned(),
    };
    Layout {
        ratio: AspectRatio::Square,
        width: 1080,
        height: 1080,
        template: TemplateFamily::PremiumSoft,
        background: "#ffffff".to_owned(),
        background_texture: Texture::Grid,
        packshot: PlacedBox::new(540.0, 540.0, 300.0, 200.0).draggable(),
        logo: PlacedBox::new(20.0, 20.0, 100.0, 100.0).draggable(),
        headline: text(700.0),
        cta: text(900.0),
        additional_text: None,
        decorations: vec![
            Decoration::shape(
                DecorationKind::Circle,
                PlacedBox::new(100.0, 100.0, 50.0, 50.0),
                "#ff0000",
            ),
            Decoration::shape(
                DecorationKind::Line,
                PlacedBox::new(100.0, 300.0, 400.0, 3.0),
                "#00ff00",
            )
            .rotated(10.0),
        ],
    }
}

#[test]
fn ratios_map_to_fixed_canvases() {
    assert_eq!(AspectRatio::Square.canvas().size_f64(), (1080.0, 1080.0));
    assert_eq!(AspectRatio::Vertical.canvas().size_f64(), (1080.0, 1920.0));
    assert_eq!(AspectRatio::Horizontal.canvas().size_f64(), (1200.0, 628.0));
    assert_eq!(AspectRatio::Horizontal.to_string(), "1.91:1");
    assert_eq!(AspectRatio::Vertical.slug(), "9x16");
}

#[test]
fn ratio_and_template_parse_from_cli_words() {
    assert_eq!("9:16".parse::<AspectRatio>().unwrap(), AspectRatio::Vertical);
    assert_eq!("Landscape".parse::<AspectRatio>().unwrap(), AspectRatio::Horizontal);
    assert!("4:3".parse::<AspectRatio>().is_err());
    assert_eq!(
        "bold-dynamic".parse::<TemplateFamily>().unwrap(),
        TemplateFamily::BoldDynamic
    );
    assert!("fancy".parse::<TemplateFamily>().is_err());
}

#[test]
fn unknown_category_label_maps_to_dots() {
    assert_eq!(AdCategory::from_label("weird"), None);
    assert_eq!(Texture::for_category(AdCategory::from_label("weird")), Texture::Dots);
    assert_eq!(
        Texture::for_category(AdCategory::from_label("lifestyle")),
        Texture::Waves
    );
    assert_eq!(
        Texture::for_category(Some(AdCategory::ServiceBased)),
        Texture::Lines
    );
}

#[test]
fn anchors_resolve_to_rects() {
    let l = sample();
    assert_eq!(
        l.element_rect(ElementRef::Packshot),
        Some(Rect::new(390.0, 440.0, 690.0, 640.0))
    );
    assert_eq!(
        l.element_rect(ElementRef::Logo),
        Some(Rect::new(20.0, 20.0, 120.0, 120.0))
    );
    assert_eq!(
        l.element_rect(ElementRef::Decoration(0)),
        Some(Rect::new(75.0, 75.0, 125.0, 125.0))
    );
    assert_eq!(l.element_rect(ElementRef::AdditionalText), None);
    assert_eq!(l.element_rect(ElementRef::Decoration(9)), None);
}

#[test]
fn elements_follow_hit_test_order() {
    let mut l = sample();
    let order: Vec<ElementRef> = l.elements().collect();
    assert_eq!(
        order,
        vec![
            ElementRef::Packshot,
            ElementRef::Logo,
            ElementRef::Headline,
            ElementRef::Cta,
            ElementRef::Decoration(0),
            ElementRef::Decoration(1),
        ]
    );

    l.additional_text = Some(AdditionalText {
        element: l.cta.clone(),
        text: "Free shipping".to_owned(),
    });
    assert_eq!(l.elements().nth(4), Some(ElementRef::AdditionalText));
}

#[test]
fn json_uses_camel_case_field_names() {
    let l = sample();
    let json = serde_json::to_value(&l).unwrap();
    assert_eq!(json["ratio"], "1:1");
    assert_eq!(json["template"], "premium-soft");
    assert_eq!(json["backgroundTexture"], "grid");
    assert_eq!(json["packshot"]["isDraggable"], true);
    assert_eq!(json["headline"]["fontSize"], 24.0);
    assert_eq!(json["decorations"][1]["type"], "line");
    assert_eq!(json["decorations"][1]["rotation"], 10.0);
    assert!(json["decorations"][0].get("rotation").is_none());
    assert!(json.get("additionalText").is_none());

    let back: Layout = serde_json::from_value(json).unwrap();
    assert_eq!(back, l);
}
