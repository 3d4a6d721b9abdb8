//! Swatch color resolution for variant rows.

/// Label shown for a variant without a color name.
pub const NO_COLOR_LABEL: &str = "Sin color";

/// Swatch used when neither an explicit hex nor a known name is available.
pub const DEFAULT_COLOR_HEX: &str = "#ffffff";

/// Known color names and their swatches, keyed exactly as authored.
///
/// Known defect: lookups lower-case the variant's color name, so the
/// upper-case `BEIGE` and `MORADO` keys can never match and those colors
/// render with [`DEFAULT_COLOR_HEX`]. The keys are kept as they are so
/// existing swatches do not change.
const COLOR_TABLE: &[(&str, &str)] = &[
    ("blanco", "#ffffff"),
    ("rojo", "#ff0000"),
    ("azul", "#0000ff"),
    ("negro", "#000000"),
    ("amarillo", "#ffff00"),
    ("verde", "#008000"),
    ("BEIGE", "#f5f5dc"),
    ("naranja", "#ffa500"),
    ("MORADO", "#800080"),
];

/// Picks the swatch for a variant: explicit hex, then the name table, then
/// [`DEFAULT_COLOR_HEX`]. Empty strings count as absent.
#[must_use]
pub fn resolve_color_hex(explicit_hex: Option<&str>, color_name: Option<&str>) -> String {
    if let Some(hex) = explicit_hex.filter(|h| !h.is_empty()) {
        return hex.to_string();
    }

    color_name
        .map(str::to_lowercase)
        .and_then(|name| lookup(&name))
        .unwrap_or(DEFAULT_COLOR_HEX)
        .to_string()
}

fn lookup(key: &str) -> Option<&'static str> {
    COLOR_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, hex)| *hex)
}

/// Display name for a variant row.
#[must_use]
pub fn color_label(color_name: Option<&str>) -> String {
    color_name
        .filter(|c| !c.is_empty())
        .unwrap_or(NO_COLOR_LABEL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_hex_wins() {
        assert_eq!(resolve_color_hex(Some("#123456"), Some("rojo")), "#123456");
    }

    #[test]
    fn empty_explicit_hex_falls_through_to_name() {
        assert_eq!(resolve_color_hex(Some(""), Some("rojo")), "#ff0000");
    }

    #[test]
    fn name_lookup_is_lower_cased() {
        assert_eq!(resolve_color_hex(None, Some("ROJO")), "#ff0000");
        assert_eq!(resolve_color_hex(None, Some("Azul")), "#0000ff");
    }

    #[test]
    fn unknown_or_missing_name_uses_default() {
        assert_eq!(resolve_color_hex(None, Some("turquesa")), DEFAULT_COLOR_HEX);
        assert_eq!(resolve_color_hex(None, None), DEFAULT_COLOR_HEX);
    }

    #[test]
    fn upper_case_table_keys_are_unreachable() {
        assert_eq!(resolve_color_hex(None, Some("BEIGE")), DEFAULT_COLOR_HEX);
        assert_eq!(resolve_color_hex(None, Some("morado")), DEFAULT_COLOR_HEX);
    }

    #[test]
    fn missing_or_empty_name_gets_fallback_label() {
        assert_eq!(color_label(None), "Sin color");
        assert_eq!(color_label(Some("")), "Sin color");
        assert_eq!(color_label(Some("rojo")), "rojo");
    }
}
