//! Category colors
//!
//! Categories are free text; a handful of common ones get a fixed chart color
//! and everything else shares a fallback.

use super::expense::normalize_label;

/// Color for categories without an entry in the palette
pub const FALLBACK_COLOR: &str = "#a78bfa";

const PALETTE: &[(&str, &str)] = &[
    ("ocio", "#60a5fa"),
    ("comida", "#34d399"),
    ("entretenimiento", "#f472b6"),
    ("alojamiento", "#fbbf24"),
    ("transporte", "#22d3ee"),
    ("prestamos", "#fb7185"),
    ("cuidado personal", "#e879f9"),
];

/// Hex color for a category, looked up after normalization
pub fn color_for_category(category: &str) -> &'static str {
    let key = normalize_label(category);
    PALETTE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}
