//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{1,14}$").unwrap()
});

// Calling codes are 1 to 4 digits and never start with 0
static COUNTRY_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9]\d{0,3}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Strip everything but digits from a country calling code ("+61" -> "61")
pub fn normalize_country_code(country_code: &str) -> String {
    country_code.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a country calling code is valid
pub fn is_valid_country_code(country_code: &str) -> bool {
    COUNTRY_CODE_REGEX.is_match(&normalize_country_code(country_code))
}

/// Check if a national number (without country code) has a plausible length
pub fn is_valid_national_number(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let only_formatting = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '.'));
    only_formatting && (4..=14).contains(&digits.len())
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_international_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INTERNATIONAL_PHONE_REGEX.is_match(&normalized)
}

/// Render "+{country_code}{phone}" from the two stored parts
pub fn format_e164(country_code: &str, phone_number: &str) -> String {
    let digits: String = phone_number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("+{}{}", normalize_country_code(country_code), digits)
}

/// Mask a phone number for display (e.g., +61****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
