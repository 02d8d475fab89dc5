//! Background strings: `#RRGGBB`, `linear-gradient(...)` and `radial-gradient(...)`.

use crate::assets::color::{find_hex_colors, parse_hex_or};
use crate::foundation::core::{Point, Rgba8, Vec2};
use crate::foundation::math::lerp_u8;

/// Stops used when a gradient names fewer than two colors.
pub const FALLBACK_STOPS: (Rgba8, Rgba8) =
    (Rgba8::rgb(0x3b, 0x82, 0xf6), Rgba8::rgb(0x1e, 0x40, 0xaf));

/// Angle used when a linear gradient has no `Ndeg` token.
pub const DEFAULT_LINEAR_ANGLE_DEG: f64 = 135.0;

/// Resolved background paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BackgroundFill {
    Solid(Rgba8),
    Linear {
        from: Point,
        to: Point,
        start: Rgba8,
        end: Rgba8,
    },
    Radial {
        center: Point,
        radius: f64,
        start: Rgba8,
        end: Rgba8,
    },
}

impl BackgroundFill {
    /// Resolve a background string for a `width` x `height` canvas.
    ///
    /// Malformed gradients fall back to the default two-color gradient; malformed solid
    /// colors fall back to the first fallback stop.
    pub fn parse(spec: &str, width: f64, height: f64) -> Self {
        let spec = spec.trim();
        let is_linear = spec.starts_with("linear-gradient");
        if !is_linear && !spec.starts_with("radial-gradient") {
            return Self::Solid(parse_hex_or(spec, FALLBACK_STOPS.0));
        }

        let colors = find_hex_colors(spec);
        let (start, end) = match colors.as_slice() {
            [a, b, ..] => (*a, *b),
            _ => {
                tracing::debug!(spec, "gradient has fewer than two colors, using default stops");
                FALLBACK_STOPS
            }
        };

        let center = Point::new(width / 2.0, height / 2.0);
        if is_linear {
            let angle = parse_angle_deg(spec).unwrap_or(DEFAULT_LINEAR_ANGLE_DEG);
            let rad = (angle - 90.0).to_radians();
            let half = Vec2::new(rad.cos() * width / 2.0, rad.sin() * height / 2.0);
            Self::Linear {
                from: center - half,
                to: center + half,
                start,
                end,
            }
        } else {
            Self::Radial {
                center,
                radius: width.max(height) * 0.7,
                start,
                end,
            }
        }
    }

    /// Color that texture overlays are derived from.
    pub fn base_color(&self) -> Rgba8 {
        match *self {
            Self::Solid(c) => c,
            Self::Linear { start, .. } | Self::Radial { start, .. } => start,
        }
    }

    /// Interpolation parameter in `[0, 1]` at a pixel center.
    fn t_at(&self, p: Point) -> f64 {
        match *self {
            Self::Solid(_) => 0.0,
            Self::Linear { from, to, .. } => {
                let d = to - from;
                let len2 = d.hypot2();
                if len2 <= f64::EPSILON {
                    return 0.0;
                }
                ((p - from).dot(d) / len2).clamp(0.0, 1.0)
            }
            Self::Radial { center, radius, .. } => {
                if radius <= f64::EPSILON {
                    return 1.0;
                }
                ((p - center).hypot() / radius).clamp(0.0, 1.0)
            }
        }
    }

    /// Rasterize into premultiplied RGBA8 bytes. `None` for solid fills.
    pub(crate) fn rasterize_premul(&self, width: u32, height: u32) -> Option<Vec<u8>> {
        let (start, end) = match *self {
            Self::Solid(_) => return None,
            Self::Linear { start, end, .. } | Self::Radial { start, end, .. } => (start, end),
        };
        let mut bytes = vec![0u8; (width as usize) * (height as usize) * 4];
        for (i, px) in bytes.chunks_exact_mut(4).enumerate() {
            let x = (i % width as usize) as f64 + 0.5;
            let y = (i / width as usize) as f64 + 0.5;
            let t = self.t_at(Point::new(x, y)) as f32;
            let c = Rgba8 {
                r: lerp_u8(start.r, end.r, t),
                g: lerp_u8(start.g, end.g, t),
                b: lerp_u8(start.b, end.b, t),
                a: lerp_u8(start.a, end.a, t),
            };
            px.copy_from_slice(&c.to_premul_array());
        }
        Some(bytes)
    }
}

fn parse_angle_deg(spec: &str) -> Option<f64> {
    let idx = spec.find("deg")?;
    let digits: String = spec[..idx]
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse::<f64>().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/render/gradient.rs"]
mod tests;
