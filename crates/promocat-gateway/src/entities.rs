//! HTML entity decoding for remote payloads.
//!
//! Product names and descriptions come back with entities such as
//! `Taza t&eacute;rmica` or `Bol&iacute;grafo &amp; estuche`. The decoder
//! walks a whole JSON value and rewrites every string in place, at any depth.
//! Object keys are left alone.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]{1,6}|#[0-9]{1,7}|[A-Za-z][A-Za-z0-9]{1,7});")
        .expect("valid entity regex")
});

/// Decodes entities in every string of `value`, recursively.
pub fn decode_entities_in_place(value: &mut Value) {
    match value {
        Value::String(s) => {
            let decoded = match decode_entities(s) {
                Cow::Owned(decoded) => Some(decoded),
                Cow::Borrowed(_) => None,
            };
            if let Some(decoded) = decoded {
                *s = decoded;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(decode_entities_in_place),
        Value::Object(map) => map.values_mut().for_each(decode_entities_in_place),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Decodes named, decimal and hexadecimal entities in `text`.
///
/// Unknown names and invalid code points are left verbatim.
#[must_use]
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY_RE.replace_all(text, |caps: &Captures<'_>| {
        let body = &caps[1];
        resolve(body).map_or_else(|| caps[0].to_string(), |c| c.to_string())
    })
}

fn resolve(body: &str) -> Option<char> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    named(body)
}

fn named(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "aacute" => 'á',
        "eacute" => 'é',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "Aacute" => 'Á',
        "Eacute" => 'É',
        "Iacute" => 'Í',
        "Oacute" => 'Ó',
        "Uacute" => 'Ú',
        "ntilde" => 'ñ',
        "Ntilde" => 'Ñ',
        "uuml" => 'ü',
        "Uuml" => 'Ü',
        "iexcl" => '¡',
        "iquest" => '¿',
        "ordf" => 'ª',
        "ordm" => 'º',
        "deg" => '°',
        "reg" => '®',
        "copy" => '©',
        "trade" => '™',
        "times" => '×',
        "frac12" => '½',
        "laquo" => '«',
        "raquo" => '»',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "ldquo" => '“',
        "rdquo" => '”',
        "lsquo" => '‘',
        "rsquo" => '’',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_named_entities() {
        assert_eq!(
            decode_entities("Bol&iacute;grafo &amp; estuche"),
            "Bolígrafo & estuche"
        );
        assert_eq!(decode_entities("&iquest;Ni&ntilde;o?"), "¿Niño?");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(decode_entities("Cer&#225;mica"), "Cerámica");
        assert_eq!(decode_entities("Cer&#xE1;mica"), "Cerámica");
        assert_eq!(decode_entities("&#39;11oz&#39;"), "'11oz'");
    }

    #[test]
    fn leaves_unknown_and_invalid_entities_verbatim() {
        assert_eq!(decode_entities("&bogus; &#xD800;"), "&bogus; &#xD800;");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }

    #[test]
    fn borrows_when_nothing_to_decode() {
        assert!(matches!(decode_entities("Taza 11oz"), Cow::Borrowed(_)));
    }

    #[test]
    fn decodes_single_pass_only() {
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
    }

    #[test]
    fn walks_nested_values_but_not_keys() {
        let mut value = json!({
            "nombre&amp;": "T&eacute;rmo",
            "hijos": [
                { "color": "Caf&eacute;", "stock": 3 },
                ["a &lt; b", null, true]
            ]
        });
        decode_entities_in_place(&mut value);
        assert_eq!(
            value,
            json!({
                "nombre&amp;": "Térmo",
                "hijos": [
                    { "color": "Café", "stock": 3 },
                    ["a < b", null, true]
                ]
            })
        );
    }
}
