use ratatui::style::Color;

/// Parse a theme color string into a ratatui Color
/// Supports:
/// - Named colors: black, red, green, yellow, blue, magenta, cyan, white, gray/grey
/// - Extended named colors: darkgray, lightred, lightgreen, lightyellow, lightblue, lightmagenta, lightcyan
/// - Hex format: #RRGGBB or #RGB (short form)
/// - RGB format: rgb(255,0,0) or rgb(255, 0, 0) (with spaces)
/// Returns Color::White as default for unrecognized colors
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        "lightgray" | "lightgrey" => Color::Gray, // LightGray not available, use Gray
        _ => {
            if s.starts_with('#') {
                if let Some(color) = parse_hex_color(&s) {
                    return color;
                }
            } else if s.starts_with("rgb(") {
                if let Some(color) = parse_rgb_color(&s) {
                    return color;
                }
            }
            Color::White
        }
    }
}

/// Swatch shown next to a clothing item, picked from its free-text color name.
/// Unknown names fall back to indigo.
pub fn swatch_color(color_name: &str) -> Color {
    match color_name.trim().to_lowercase().as_str() {
        "red" => Color::Rgb(255, 59, 48),
        "blue" => Color::Rgb(0, 122, 255),
        "green" => Color::Rgb(52, 199, 89),
        "yellow" => Color::Rgb(255, 204, 0),
        "orange" => Color::Rgb(255, 149, 0),
        "purple" | "violet" => Color::Rgb(175, 82, 222),
        "pink" => Color::Rgb(255, 45, 85),
        "black" => Color::DarkGray,
        "white" => Color::Gray,
        "gray" | "grey" => Color::Rgb(142, 142, 147),
        "brown" => Color::Rgb(162, 132, 94),
        "navy" => Color::Rgb(0, 0, 128),
        "beige" | "tan" | "cream" => Color::Rgb(230, 217, 179),
        "teal" | "turquoise" => Color::Rgb(48, 176, 199),
        "indigo" => Color::Rgb(88, 86, 214),
        "coral" => Color::Rgb(255, 128, 77),
        "maroon" | "burgundy" => Color::Rgb(128, 0, 0),
        "olive" | "khaki" => Color::Rgb(128, 128, 0),
        _ => Color::Rgb(88, 86, 214),
    }
}

/// Parse hex color format (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim_start_matches('#');

    if hex.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Some(Color::Rgb(r, g, b));
        }
    } else if hex.len() == 3 {
        // Short format: #RGB -> #RRGGBB
        let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
        return Some(Color::Rgb((r << 4) | r, (g << 4) | g, (b << 4) | b));
    }

    None
}

/// Parse RGB color format (rgb(r,g,b) or rgb(r, g, b))
fn parse_rgb_color(s: &str) -> Option<Color> {
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;

    let parts: Vec<&str> = content.split(',').map(|s| s.trim()).collect();
    if parts.len() != 3 {
        return None;
    }

    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Relative luminance (WCAG formula), 0.0 is dark and 1.0 is light
fn calculate_luminance(r: u8, g: u8, b: u8) -> f64 {
    let linear = |c: u8| {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b)
}

/// Named colors that render dark in most terminals
/// Gray is typically rendered as light, so it's treated as light
fn is_dark_color(color: Color) -> bool {
    matches!(
        color,
        Color::Black | Color::Blue | Color::Magenta | Color::Red | Color::DarkGray
    )
}

/// Get an appropriate foreground color for text on a given background color
/// Returns black for light backgrounds, white for dark backgrounds
pub fn get_contrast_text_color(background: Color) -> Color {
    let dark = match background {
        Color::Rgb(r, g, b) => calculate_luminance(r, g, b) < 0.5,
        other => is_dark_color(other),
    };
    if dark { Color::White } else { Color::Black }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_theme_colors() {
        assert_eq!(parse_color("Black"), Color::Black);
        assert_eq!(parse_color("#4B0082"), Color::Rgb(0x4B, 0x00, 0x82));
        assert_eq!(parse_color("#fff"), Color::Rgb(255, 255, 255));
        assert_eq!(parse_color("rgb(1, 2, 3)"), Color::Rgb(1, 2, 3));
        assert_eq!(parse_color("not a color"), Color::White);
    }

    #[test]
    fn swatch_matches_common_names_and_falls_back() {
        assert_eq!(swatch_color(" Navy "), Color::Rgb(0, 0, 128));
        assert_eq!(swatch_color("grey"), swatch_color("gray"));
        assert_eq!(swatch_color("burgundy"), swatch_color("maroon"));
        assert_eq!(swatch_color("plaid"), swatch_color("indigo"));
        assert_eq!(swatch_color(""), swatch_color("indigo"));
    }

    #[test]
    fn contrast_text_flips_on_dark_backgrounds() {
        assert_eq!(get_contrast_text_color(Color::Rgb(0x4B, 0x00, 0x82)), Color::White);
        assert_eq!(get_contrast_text_color(Color::Rgb(250, 250, 250)), Color::Black);
        assert_eq!(get_contrast_text_color(Color::Black), Color::White);
        assert_eq!(get_contrast_text_color(Color::Yellow), Color::Black);
    }
}
