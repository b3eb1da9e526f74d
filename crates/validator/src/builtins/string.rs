//! String format checks. Subjects must be JSON strings.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use url::Url;

use super::network::is_ip;

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).unwrap());
    };
}

pattern!(INT_STRING, r"^[-+]?(0|[1-9]\d*)$");
pattern!(STRING_NUMBER, r"^[-+]?(\d+\.?\d*|\.\d+)$");
pattern!(NUMBER, r"^\d+$");
pattern!(NUMERIC, r"^[-+]?\d+$");
pattern!(HEXADECIMAL, r"^[0-9a-fA-F]+$");
pattern!(ALPHA, r"^[a-zA-Z]+$");
pattern!(ALPHA_NUM, r"^[a-zA-Z0-9]+$");
pattern!(ALPHA_DASH, r"^[a-zA-Z0-9_-]+$");
pattern!(
    DNS_NAME,
    r"^([a-zA-Z0-9_]([a-zA-Z0-9_-]{0,61}[a-zA-Z0-9])?\.)*[a-zA-Z0-9_]([a-zA-Z0-9_-]{0,61}[a-zA-Z0-9])?\.?$"
);
pattern!(DATA_URI_HEADER, r"^[a-zA-Z]+/[a-zA-Z0-9.+-]+(;[a-zA-Z0-9-]+=[a-zA-Z0-9.-]+)*$");
pattern!(HEX_COLOR, r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$");
pattern!(RGB_COLOR, r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$");
pattern!(MAC, r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$");
pattern!(CN_MOBILE, r"^1\d{10}$");
pattern!(
    EMAIL,
    r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
);
pattern!(UUID, r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$");
pattern!(UUID3, r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-3[0-9a-f]{3}-[0-9a-f]{4}-[0-9a-f]{12}$");
pattern!(UUID4, r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$");
pattern!(UUID5, r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-5[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$");

// ============================================================================
// NUMBERS
// ============================================================================

pub(super) fn is_int_string(s: String) -> bool {
    INT_STRING.is_match(&s)
}

pub(super) fn is_string_number(s: String) -> bool {
    STRING_NUMBER.is_match(&s)
}

pub(super) fn is_number(s: String) -> bool {
    NUMBER.is_match(&s)
}

pub(super) fn is_numeric(s: String) -> bool {
    NUMERIC.is_match(&s)
}

pub(super) fn is_hexadecimal(s: String) -> bool {
    HEXADECIMAL.is_match(&s)
}

pub(super) fn is_latitude(s: String) -> bool {
    s.trim()
        .parse::<f64>()
        .is_ok_and(|lat| (-90.0..=90.0).contains(&lat))
}

pub(super) fn is_longitude(s: String) -> bool {
    s.trim()
        .parse::<f64>()
        .is_ok_and(|lon| (-180.0..=180.0).contains(&lon))
}

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

pub(super) fn has_whitespace(s: String) -> bool {
    s.chars().any(char::is_whitespace)
}

pub(super) fn is_ascii(s: String) -> bool {
    !s.is_empty() && s.is_ascii()
}

pub(super) fn is_printable_ascii(s: String) -> bool {
    !s.is_empty() && s.chars().all(|c| (' '..='~').contains(&c))
}

pub(super) fn is_alpha(s: String) -> bool {
    ALPHA.is_match(&s)
}

pub(super) fn is_alpha_num(s: String) -> bool {
    ALPHA_NUM.is_match(&s)
}

pub(super) fn is_alpha_dash(s: String) -> bool {
    ALPHA_DASH.is_match(&s)
}

pub(super) fn is_multi_byte(s: String) -> bool {
    s.chars().any(|c| c.len_utf8() > 1)
}

// ============================================================================
// ENCODINGS
// ============================================================================

pub(super) fn is_base64(s: String) -> bool {
    !s.is_empty() && STANDARD.decode(s.as_bytes()).is_ok()
}

/// `data:<mime>[;param=value]*;base64,<payload>`
pub(super) fn is_data_uri(s: String) -> bool {
    let Some(rest) = s.strip_prefix("data:") else {
        return false;
    };
    let Some((header, payload)) = rest.split_once(',') else {
        return false;
    };
    let Some(mime) = header.strip_suffix(";base64") else {
        return false;
    };
    DATA_URI_HEADER.is_match(mime) && is_base64(payload.to_owned())
}

pub(super) fn is_json(s: String) -> bool {
    serde_json::from_str::<serde_json::Value>(&s).is_ok()
}

pub(super) fn is_hex_color(s: String) -> bool {
    HEX_COLOR.is_match(&s)
}

pub(super) fn is_rgb_color(s: String) -> bool {
    RGB_COLOR.captures(&s).is_some_and(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .all(|m| m.as_str().parse::<u16>().is_ok_and(|c| c <= 255))
    })
}

pub(super) fn is_mac(s: String) -> bool {
    MAC.is_match(&s)
}

pub(super) fn is_cn_mobile(s: String) -> bool {
    CN_MOBILE.is_match(&s)
}

// ============================================================================
// ISBN
// ============================================================================

fn isbn_chars(s: &str) -> Vec<char> {
    s.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

pub(super) fn is_isbn10(s: String) -> bool {
    let chars = isbn_chars(&s);
    if chars.len() != 10 {
        return false;
    }
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let digit = match (c.to_digit(10), i) {
            (Some(d), _) => d,
            (None, 9) if *c == 'X' || *c == 'x' => 10,
            _ => return false,
        };
        sum += (10 - i as u32) * digit;
    }
    sum % 11 == 0
}

pub(super) fn is_isbn13(s: String) -> bool {
    let chars = isbn_chars(&s);
    if chars.len() != 13 {
        return false;
    }
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }
    sum % 10 == 0
}

// ============================================================================
// NAMES AND ADDRESSES
// ============================================================================

pub(super) fn is_dns_name(s: String) -> bool {
    if s.is_empty() || s.len() > 253 || is_ip(s.clone()) {
        return false;
    }
    DNS_NAME.is_match(&s)
}

pub(super) fn is_email(s: String) -> bool {
    EMAIL.is_match(&s)
}

/// A URL with or without a scheme; `example.com/path` passes.
pub(super) fn is_url(s: String) -> bool {
    if s.is_empty() || s.chars().any(char::is_whitespace) {
        return false;
    }
    let parsed = if s.contains("://") {
        Url::parse(&s)
    } else {
        Url::parse(&format!("http://{s}"))
    };
    parsed.is_ok_and(|url| url.has_host())
}

/// A URL with an explicit scheme and host.
pub(super) fn is_full_url(s: String) -> bool {
    Url::parse(&s).is_ok_and(|url| url.has_host())
}

pub(super) fn is_uuid(s: String) -> bool {
    UUID.is_match(&s)
}

pub(super) fn is_uuid3(s: String) -> bool {
    UUID3.is_match(&s)
}

pub(super) fn is_uuid4(s: String) -> bool {
    UUID4.is_match(&s)
}

pub(super) fn is_uuid5(s: String) -> bool {
    UUID5.is_match(&s)
}
