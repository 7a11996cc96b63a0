//! Color string helpers for color pickers.

/// Coerce a stored color into the `#rrggbb` form a color picker accepts.
///
/// `#rrggbbaa` drops its alpha, `#rgb` and `#rrggbb` pass through, and
/// `rgb()`/`rgba()` are converted. Empty input gives an empty string and
/// anything else gives white.
pub fn to_six_hex(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    if let Some(digits) = input.strip_prefix('#') {
        if digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            match digits.len() {
                8 => return format!("#{}", &digits[..6]),
                3 | 6 => return input.to_string(),
                _ => {}
            }
        }
    }
    if input.starts_with("rgb") {
        if let Some(hex) = rgb_to_hex(input) {
            return hex;
        }
    }
    "#ffffff".to_string()
}

fn rgb_to_hex(input: &str) -> Option<String> {
    let inner = input
        .trim_start_matches("rgba(")
        .trim_start_matches("rgb(")
        .trim_end_matches(')');
    let mut channels = inner.split(',').map(|part| leading_int(part.trim()));
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}

/// Parse the leading decimal digits of a channel, like `255` in `255px`.
fn leading_int(s: &str) -> Option<u8> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let value: u32 = s[..end].parse().ok()?;
    Some(value.min(255) as u8)
}
