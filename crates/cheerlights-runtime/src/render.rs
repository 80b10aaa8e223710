//! Terminal rendering of the document: color sinks as swatches, update
//! sinks as text.

use cheerlights_core::{COLOR_SINK_CLASS, Document, Element, UPDATE_SINK_CLASS};

/// Swatch width in terminal cells.
const SWATCH_WIDTH: usize = 8;

/// CheerLights palette plus the CSS names people commonly tweet.
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("red", (0xFF, 0x00, 0x00)),
    ("green", (0x00, 0x80, 0x00)),
    ("blue", (0x00, 0x00, 0xFF)),
    ("cyan", (0x00, 0xFF, 0xFF)),
    ("white", (0xFF, 0xFF, 0xFF)),
    ("oldlace", (0xFD, 0xF5, 0xE6)),
    ("warmwhite", (0xFD, 0xF5, 0xE6)),
    ("purple", (0x80, 0x00, 0x80)),
    ("magenta", (0xFF, 0x00, 0xFF)),
    ("yellow", (0xFF, 0xFF, 0x00)),
    ("orange", (0xFF, 0xA5, 0x00)),
    ("pink", (0xFF, 0xC0, 0xCB)),
    ("black", (0x00, 0x00, 0x00)),
];

/// Resolve --color flag to bool.
pub fn resolve_color(color: &str) -> bool {
    use std::io::IsTerminal;
    match color {
        "always" => true,
        "never" => false,
        _ => std::io::stdout().is_terminal(),
    }
}

/// Best-effort RGB for a polled color value: a known name, `#rgb` or `#rrggbb`.
///
/// The value itself stays opaque to the poller; this is display only.
pub fn parse_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = value.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| *rgb)
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

fn swatch(value: &str, use_color: bool) -> String {
    match parse_rgb(value) {
        Some((r, g, b)) if use_color => {
            format!("\x1b[48;2;{r};{g};{b}m{}\x1b[0m", " ".repeat(SWATCH_WIDTH))
        }
        _ => format!("[{}]", value.trim()),
    }
}

fn render_element(element: &Element, use_color: bool) -> Option<String> {
    let is_color = element.has_class(COLOR_SINK_CLASS);
    let is_update = element.has_class(UPDATE_SINK_CLASS);
    if !is_color && !is_update {
        return None;
    }

    let mut parts = Vec::with_capacity(2);
    if is_color {
        parts.push(match element.background_color.as_deref() {
            Some(value) => swatch(value, use_color),
            None => "(waiting for first color)".to_string(),
        });
    }
    if is_update && !element.text.is_empty() {
        parts.push(element.text.clone());
    }
    if parts.is_empty() {
        return None;
    }

    Some(format!("{:<8} {}", element.id, parts.join(" ")))
}

/// One line per sink element, in document order.
pub fn render_document(doc: &Document, use_color: bool) -> String {
    doc.elements()
        .iter()
        .filter_map(|e| render_element(e, use_color))
        .collect::<Vec<_>>()
        .join("\n")
}
