//! Personal-information form rules.

use once_cell::sync::Lazy;
use qureplus_common::models::{FieldErrors, NewUser, UserForm};
use regex::Regex;

pub const MIN_AGE: i32 = 1;
pub const MAX_AGE: i32 = 120;
pub const MIN_MOBILE_DIGITS: usize = 10;
pub const MAX_MOBILE_DIGITS: usize = 15;

static MOBILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("static regex"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

/// Validates the raw form and returns the trimmed record, or every field that failed.
pub fn validate_user_form(form: &UserForm) -> Result<NewUser, FieldErrors> {
    let mut errors = FieldErrors::new();

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        errors.insert("full_name", "Full name is required");
    } else if full_name.chars().count() < 2 {
        errors.insert("full_name", "Full name must be at least 2 characters");
    }

    let age = form.age.trim();
    let parsed_age = if age.is_empty() {
        errors.insert("age", "Age is required");
        None
    } else {
        match parse_age(age) {
            Some(value) => Some(value),
            None => {
                errors.insert("age", "Please enter a valid age (1-120)");
                None
            }
        }
    };

    let city = form.city.trim();
    if city.is_empty() {
        errors.insert("city", "City is required");
    } else if city.chars().count() < 2 {
        errors.insert("city", "City must be at least 2 characters");
    }

    let mobile = form.mobile.trim();
    if mobile.is_empty() {
        errors.insert("mobile", "Mobile number is required");
    } else if !is_valid_mobile(mobile) {
        errors.insert("mobile", "Please enter a valid mobile number");
    }

    let email = form.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert("email", "Please enter a valid email address");
    }

    match parsed_age {
        Some(age) if errors.is_empty() => Ok(NewUser {
            full_name: full_name.to_string(),
            age,
            city: city.to_string(),
            mobile: mobile.to_string(),
            email: (!email.is_empty()).then(|| email.to_string()),
        }),
        _ => Err(errors),
    }
}

fn parse_age(raw: &str) -> Option<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
}

/// Optional leading `+`, then digits, spaces, dashes and parentheses only,
/// carrying 10 to 15 digits.
pub fn is_valid_mobile(mobile: &str) -> bool {
    if !MOBILE_CHARS.is_match(mobile) {
        return false;
    }
    let digits = mobile.chars().filter(char::is_ascii_digit).count();
    (MIN_MOBILE_DIGITS..=MAX_MOBILE_DIGITS).contains(&digits)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(age: &str, mobile: &str) -> UserForm {
        UserForm {
            full_name: "Asha Rao".into(),
            age: age.into(),
            city: "Pune".into(),
            mobile: mobile.into(),
            email: String::new(),
        }
    }

    #[test]
    fn age_bounds() {
        for bad in ["0", "121", "abc", "-4", "12.5", ""] {
            let errors = validate_user_form(&form(bad, "9876543210")).unwrap_err();
            assert!(errors.contains("age"), "age {bad:?} should be rejected");
        }
        assert_eq!(validate_user_form(&form("1", "9876543210")).unwrap().age, 1);
        assert_eq!(validate_user_form(&form("120", "9876543210")).unwrap().age, 120);
        assert_eq!(validate_user_form(&form(" 42 ", "9876543210")).unwrap().age, 42);
    }

    #[test]
    fn mobile_patterns() {
        assert!(!is_valid_mobile("12345"));
        assert!(is_valid_mobile("+1 (555) 123-4567"));
        assert!(is_valid_mobile("9876543210"));
        assert!(is_valid_mobile("+44 20 7946 0958"));
        assert!(!is_valid_mobile("1234567890123456"));
        assert!(!is_valid_mobile("98765x43210"));
        assert!(!is_valid_mobile("++919876543210"));
        // Arabic-Indic digit four
        assert!(!is_valid_mobile("98765\u{0664}43210"));

        let errors = validate_user_form(&form("30", "12345")).unwrap_err();
        assert_eq!(errors.get("mobile"), Some("Please enter a valid mobile number"));
    }

    #[test]
    fn email_is_optional_but_checked_when_present() {
        let mut f = form("30", "9876543210");
        assert_eq!(validate_user_form(&f).unwrap().email, None);

        f.email = "  asha@example.com ".into();
        assert_eq!(
            validate_user_form(&f).unwrap().email.as_deref(),
            Some("asha@example.com")
        );

        f.email = "asha@example".into();
        assert!(validate_user_form(&f).unwrap_err().contains("email"));
    }

    #[test]
    fn reports_every_failing_field_and_trims_values() {
        let errors = validate_user_form(&UserForm {
            full_name: " A ".into(),
            age: String::new(),
            city: "".into(),
            mobile: "".into(),
            email: "nope".into(),
        })
        .unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get("full_name"), Some("Full name must be at least 2 characters"));
        assert_eq!(errors.get("age"), Some("Age is required"));
        assert_eq!(errors.get("city"), Some("City is required"));

        let user = validate_user_form(&UserForm {
            full_name: "  Asha Rao  ".into(),
            age: "30".into(),
            city: " Pune ".into(),
            mobile: " 9876543210 ".into(),
            email: String::new(),
        })
        .unwrap();
        assert_eq!(user.full_name, "Asha Rao");
        assert_eq!(user.city, "Pune");
        assert_eq!(user.mobile, "9876543210");
    }
}
