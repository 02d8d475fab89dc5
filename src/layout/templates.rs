//! Closed-form placement formulas, one per (ratio, template) pair.

use crate::layout::model::{
    AspectRatio, Decoration, DecorationKind, Palette, PlacedBox, TemplateFamily, TextElement,
};

const WHITE: &str = "#FFFFFF";

/// Output of one placement formula, before decorations from providers are appended.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TemplateFormula {
    pub(crate) background: String,
    pub(crate) packshot: PlacedBox,
    pub(crate) logo: PlacedBox,
    pub(crate) headline: TextElement,
    pub(crate) cta: TextElement,
    /// Box for the optional secondary text; only used when text is supplied.
    pub(crate) additional: TextElement,
    pub(crate) accents: Vec<Decoration>,
}

pub(crate) type FormulaFn = fn(&Palette) -> TemplateFormula;

// Indexed by [ratio][template] in declaration order of both enums.
static FORMULAS: [[FormulaFn; 3]; 3] = [
    [clean_minimal_square, bold_dynamic_square, premium_soft_square],
    [clean_minimal_vertical, bold_dynamic_vertical, premium_soft_vertical],
    [
        clean_minimal_horizontal,
        bold_dynamic_horizontal,
        premium_soft_horizontal,
    ],
];

pub(crate) fn formula_for(ratio: AspectRatio, template: TemplateFamily) -> FormulaFn {
    let r = match ratio {
        AspectRatio::Square => 0,
        AspectRatio::Vertical => 1,
        AspectRatio::Horizontal => 2,
    };
    let t = match template {
        TemplateFamily::CleanMinimal => 0,
        TemplateFamily::BoldDynamic => 1,
        TemplateFamily::PremiumSoft => 2,
    };
    FORMULAS[r][t]
}

fn dims(ratio: AspectRatio) -> (f64, f64) {
    ratio.canvas().size_f64()
}

fn text(x: f64, y: f64, width: f64, height: f64, font_size: f64, color: &str) -> TextElement {
    TextElement {
        bounds: PlacedBox::new(x, y, width, height),
        font_size,
        color: color.to_owned(),
    }
}

fn clean_minimal_square(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Square);
    let m = w * 0.08;
    TemplateFormula {
        background: p.background.clone(),
        packshot: PlacedBox::new(w * 0.5, h * 0.4, w * 0.5, w * 0.5),
        logo: PlacedBox::new(m, m, w * 0.15, w * 0.15),
        headline: text(m, h * 0.75, w - m * 2.0, 80.0, 42.0, &p.accent),
        cta: text(m, h * 0.88, w * 0.35, 50.0, 24.0, WHITE),
        additional: text(m, h * 0.82, w - m * 2.0, 40.0, 22.0, &p.primary),
        accents: vec![Decoration::shape(
            DecorationKind::Circle,
            PlacedBox::new(w * 0.85, h * 0.15, w * 0.2, w * 0.2),
            &p.secondary,
        )],
    }
}

fn clean_minimal_vertical(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Vertical);
    let m = w * 0.08;
    TemplateFormula {
        background: p.background.clone(),
        packshot: PlacedBox::new(w * 0.5, h * 0.35, w * 0.7, w * 0.7),
        logo: PlacedBox::new(m, m, w * 0.2, w * 0.2),
        headline: text(m, h * 0.6, w - m * 2.0, 100.0, 48.0, &p.accent),
        cta: text(m, h * 0.85, w * 0.4, 60.0, 28.0, WHITE),
        additional: text(m, h * 0.72, w - m * 2.0, 50.0, 26.0, &p.primary),
        accents: vec![Decoration::shape(
            DecorationKind::Rectangle,
            PlacedBox::new(w * 0.1, h * 0.75, w * 0.8, 4.0),
            &p.primary,
        )],
    }
}

fn clean_minimal_horizontal(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Horizontal);
    let m = w * 0.08;
    TemplateFormula {
        background: p.background.clone(),
        packshot: PlacedBox::new(w * 0.75, h * 0.5, h * 0.6, h * 0.6),
        logo: PlacedBox::new(m, m, h * 0.15, h * 0.15),
        headline: text(m, h * 0.35, w * 0.45, 70.0, 38.0, &p.accent),
        cta: text(m, h * 0.65, w * 0.25, 50.0, 24.0, WHITE),
        additional: text(m, h * 0.5, w * 0.45, 35.0, 20.0, &p.primary),
        accents: vec![Decoration::shape(
            DecorationKind::Line,
            PlacedBox::new(m, h * 0.58, w * 0.35, 3.0),
            &p.primary,
        )],
    }
}

fn bold_dynamic_square(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Square);
    let m = w * 0.06;
    TemplateFormula {
        background: p.primary.clone(),
        packshot: PlacedBox::new(w * 0.65, h * 0.55, w * 0.55, w * 0.55),
        logo: PlacedBox::new(m, h - m - w * 0.12, w * 0.12, w * 0.12),
        headline: text(m, m + 20.0, w * 0.5, 90.0, 46.0, WHITE),
        cta: text(m, h * 0.45, w * 0.35, 55.0, 26.0, &p.background),
        additional: text(m, m + 120.0, w * 0.5, 50.0, 24.0, WHITE),
        accents: vec![
            Decoration::shape(
                DecorationKind::Rectangle,
                PlacedBox::new(0.0, h * 0.7, w * 0.45, h * 0.3),
                &p.accent,
            )
            .rotated(-10.0),
            Decoration::shape(
                DecorationKind::Circle,
                PlacedBox::new(w * 0.1, h * 0.4, w * 0.15, w * 0.15),
                &p.secondary,
            ),
        ],
    }
}

fn bold_dynamic_vertical(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Vertical);
    let m = w * 0.06;
    TemplateFormula {
        background: p.primary.clone(),
        packshot: PlacedBox::new(w * 0.5, h * 0.6, w * 0.75, w * 0.75),
        logo: PlacedBox::new(w - m - w * 0.18, m, w * 0.18, w * 0.18),
        headline: text(m, h * 0.15, w - m * 2.0, 110.0, 52.0, WHITE),
        cta: text(m, h * 0.88, w * 0.45, 65.0, 30.0, &p.background),
        additional: text(m, h * 0.28, w - m * 2.0, 60.0, 28.0, WHITE),
        accents: vec![
            Decoration::shape(
                DecorationKind::Rectangle,
                PlacedBox::new(w * 0.7, h * 0.3, w * 0.25, h * 0.15),
                &p.secondary,
            )
            .rotated(15.0),
        ],
    }
}

fn bold_dynamic_horizontal(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Horizontal);
    let m = w * 0.06;
    TemplateFormula {
        background: p.primary.clone(),
        packshot: PlacedBox::new(w * 0.7, h * 0.5, h * 0.7, h * 0.7),
        logo: PlacedBox::new(w - m - h * 0.13, m, h * 0.13, h * 0.13),
        headline: text(m, h * 0.25, w * 0.4, 80.0, 42.0, WHITE),
        cta: text(m, h * 0.6, w * 0.28, 55.0, 26.0, &p.background),
        additional: text(m, h * 0.42, w * 0.4, 45.0, 22.0, WHITE),
        accents: vec![Decoration::shape(
            DecorationKind::Circle,
            PlacedBox::new(w * 0.15, h * 0.15, h * 0.2, h * 0.2),
            &p.secondary,
        )],
    }
}

fn premium_soft_square(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Square);
    let m = w * 0.1;
    TemplateFormula {
        background: p.background.clone(),
        packshot: PlacedBox::new(w * 0.5, h * 0.45, w * 0.5, w * 0.5),
        logo: PlacedBox::new(w - m - w * 0.14, m, w * 0.14, w * 0.14),
        headline: text(m, h * 0.72, w - m * 2.0, 75.0, 40.0, &p.accent),
        cta: text(w * 0.5 - w * 0.18, h * 0.9, w * 0.36, 50.0, 24.0, WHITE),
        additional: text(m, h * 0.82, w - m * 2.0, 40.0, 22.0, &p.primary),
        accents: vec![Decoration::shape(
            DecorationKind::Circle,
            PlacedBox::new(w * 0.15, h * 0.2, w * 0.25, w * 0.25),
            &p.secondary,
        )],
    }
}

fn premium_soft_vertical(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Vertical);
    let m = w * 0.1;
    TemplateFormula {
        background: p.background.clone(),
        packshot: PlacedBox::new(w * 0.5, h * 0.4, w * 0.65, w * 0.65),
        logo: PlacedBox::new(w * 0.5 - w * 0.1, m, w * 0.2, w * 0.2),
        headline: text(m, h * 0.65, w - m * 2.0, 95.0, 46.0, &p.accent),
        cta: text(w * 0.5 - w * 0.2, h * 0.88, w * 0.4, 60.0, 28.0, WHITE),
        additional: text(m, h * 0.75, w - m * 2.0, 50.0, 26.0, &p.primary),
        accents: vec![Decoration::shape(
            DecorationKind::Circle,
            PlacedBox::new(w * 0.85, h * 0.25, w * 0.2, w * 0.2),
            &p.secondary,
        )],
    }
}

fn premium_soft_horizontal(p: &Palette) -> TemplateFormula {
    let (w, h) = dims(AspectRatio::Horizontal);
    let m = w * 0.1;
    TemplateFormula {
        background: p.background.clone(),
        packshot: PlacedBox::new(w * 0.28, h * 0.5, h * 0.65, h * 0.65),
        logo: PlacedBox::new(w - m - h * 0.12, h - m - h * 0.12, h * 0.12, h * 0.12),
        headline: text(w * 0.5, h * 0.3, w * 0.42, 75.0, 40.0, &p.accent),
        cta: text(
            w * 0.5 + (w * 0.42 - w * 0.25) / 2.0,
            h * 0.65,
            w * 0.25,
            50.0,
            24.0,
            WHITE,
        ),
        additional: text(w * 0.5, h * 0.47, w * 0.42, 35.0, 20.0, &p.primary),
        accents: vec![Decoration::shape(
            DecorationKind::Rectangle,
            PlacedBox::new(w * 0.52, h * 0.58, w * 0.35, 2.0),
            &p.primary,
        )],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/templates.rs"]
mod tests;
