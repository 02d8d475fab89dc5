use super::*;
use crate::foundation::core::{Anchor, Rect};

fn palette() -> Palette {
    Palette {
        primary: "#3B82F6".to_owned(),
        secondary: "#75a7f8".to_owned(),
        accent: "#2f68c4".to_owned(),
        background: "#d7e6fd".to_owned(),
    }
}

fn inside(r: Rect, w: f64, h: f64) -> bool {
    const EPS: f64 = 1e-6;
    r.x0 >= -EPS && r.y0 >= -EPS && r.x1 <= w + EPS && r.y1 <= h + EPS
}

#[test]
fn main_elements_stay_on_canvas_for_every_pair() {
    let p = palette();
    for ratio in AspectRatio::ALL {
        let (w, h) = ratio.canvas().size_f64();
        for template in TemplateFamily::ALL {
            let f = formula_for(ratio, template)(&p);
            let boxes = [
                ("packshot", f.packshot.rect(Anchor::Center)),
                ("logo", f.logo.rect(Anchor::TopLeft)),
                ("headline", f.headline.bounds.rect(Anchor::TopLeft)),
                ("cta", f.cta.bounds.rect(Anchor::TopLeft)),
                ("additional", f.additional.bounds.rect(Anchor::TopLeft)),
            ];
            for (name, r) in boxes {
                assert!(inside(r, w, h), "{name} out of bounds for {ratio} {template}: {r:?}");
            }
        }
    }
}

#[test]
fn bold_dynamic_paints_primary_with_white_headline() {
    let p = palette();
    for ratio in AspectRatio::ALL {
        let f = formula_for(ratio, TemplateFamily::BoldDynamic)(&p);
        assert_eq!(f.background, p.primary);
        assert_eq!(f.headline.color, "#FFFFFF");
        assert_eq!(f.cta.color, p.background);
    }
}

#[test]
fn light_templates_use_background_and_accent() {
    let p = palette();
    for template in [TemplateFamily::CleanMinimal, TemplateFamily::PremiumSoft] {
        for ratio in AspectRatio::ALL {
            let f = formula_for(ratio, template)(&p);
            assert_eq!(f.background, p.background);
            assert_eq!(f.headline.color, p.accent);
            assert_eq!(f.cta.color, "#FFFFFF");
        }
    }
}

#[test]
fn clean_minimal_square_matches_its_formula() {
    let f = formula_for(AspectRatio::Square, TemplateFamily::CleanMinimal)(&palette());
    let m = 1080.0 * 0.08;
    assert_eq!(f.packshot, PlacedBox::new(540.0, 432.0, 540.0, 540.0));
    assert_eq!(f.logo, PlacedBox::new(m, m, 162.0, 162.0));
    assert_eq!(f.headline.font_size, 42.0);
    assert_eq!(f.cta.bounds.y, 1080.0 * 0.88);
    assert_eq!(f.accents.len(), 1);
    assert_eq!(f.accents[0].kind, DecorationKind::Circle);
}

#[test]
fn accents_are_not_draggable() {
    let p = palette();
    for ratio in AspectRatio::ALL {
        for template in TemplateFamily::ALL {
            let f = formula_for(ratio, template)(&p);
            assert!(!f.accents.is_empty());
            assert!(f.accents.iter().all(|a| !a.bounds.draggable));
        }
    }
}
