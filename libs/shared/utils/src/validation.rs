use std::sync::LazyLock;

use regex::Regex;

/// Upper bound for free-text fields (appointment notes, medical history).
pub const MAX_TEXT_LENGTH: usize = 500;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{10,15}$").expect("valid phone regex"));

pub fn validate_name(name: &str) -> Result<(), String> {
    let len = name.trim().chars().count();
    if !(2..=100).contains(&len) {
        return Err("Name must be between 2 and 100 characters".to_string());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email should be valid".to_string());
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), String> {
    if !PHONE_RE.is_match(phone) {
        return Err("Phone number should be valid".to_string());
    }
    Ok(())
}

/// Bounded optional free text; `field` names the offender in the message.
pub fn validate_bounded_text(field: &str, text: Option<&str>) -> Result<(), String> {
    if let Some(text) = text {
        if text.chars().count() > MAX_TEXT_LENGTH {
            return Err(format!("{} cannot exceed {} characters", field, MAX_TEXT_LENGTH));
        }
    }
    Ok(())
}

pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_emails() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("a.b+c@clinic.health").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn phone_allows_optional_plus_and_10_to_15_digits() {
        assert!(validate_phone("+353861234567").is_ok());
        assert!(validate_phone("0861234567").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("phone number").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name("J").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn bounded_text_limit() {
        assert!(validate_bounded_text("Notes", Some(&"x".repeat(500))).is_ok());
        assert!(validate_bounded_text("Notes", Some(&"x".repeat(501))).is_err());
        assert!(validate_bounded_text("Notes", None).is_ok());
    }
}
