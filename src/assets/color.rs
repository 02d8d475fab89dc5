use crate::foundation::core::Rgba8;
use crate::foundation::error::{CreativeError, CreativeResult};

/// Parse `#RRGGBB` / `#RRGGBBAA` (case-insensitive, leading `#` optional).
pub fn parse_hex(s: &str) -> CreativeResult<Rgba8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> CreativeResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CreativeError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(CreativeError::validation("hex color must be ascii"));
    }
    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err(CreativeError::validation(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

/// Parse a color, falling back to `fallback` on malformed input.
pub(crate) fn parse_hex_or(s: &str, fallback: Rgba8) -> Rgba8 {
    parse_hex(s).unwrap_or_else(|err| {
        tracing::debug!(color = s, %err, "unparseable color, using fallback");
        fallback
    })
}

/// Offset each RGB channel by `amount`, saturating at `0..=255`.
pub fn adjust_brightness(color: Rgba8, amount: i16) -> Rgba8 {
    let shift = |c: u8| -> u8 { (i16::from(c) + amount).clamp(0, 255) as u8 };
    Rgba8 {
        r: shift(color.r),
        g: shift(color.g),
        b: shift(color.b),
        a: color.a,
    }
}

/// All `#RRGGBB` tokens in a string, in order of appearance.
pub(crate) fn find_hex_colors(s: &str) -> Vec<Rgba8> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#'
            && i + 7 <= bytes.len()
            && bytes[i + 1..i + 7].iter().all(u8::is_ascii_hexdigit)
        {
            if let Ok(c) = parse_hex(&s[i + 1..i + 7]) {
                out.push(c);
            }
            i += 7;
        } else {
            i += 1;
        }
    }
    out
}

/// Whether a color string is literally white, the CTA contrast special case.
pub(crate) fn is_literal_white(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("#ffffff")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
