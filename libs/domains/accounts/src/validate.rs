//! Login/password validation.
//!
//! Pure functions producing an ordered list of human-readable error
//! messages. All applicable violations are collected; an empty list
//! signals validity.

pub const LOGIN_NOT_PROVIDED: &str = "login was not provided";
pub const PASSWORD_NOT_PROVIDED: &str = "password was not provided";
pub const PASSWORD_NEEDS_DIGIT: &str = "password must contains at least one numeric character";
pub const PASSWORD_NEEDS_CAPITAL: &str = "password must contains at least one capital letter";

fn is_blank(value: Option<&str>) -> bool {
    match value {
        Some(v) => v.trim().is_empty(),
        None => true,
    }
}

/// Complexity rules for a non-blank password, in order: digit, then
/// capital letter. Both messages may co-occur.
pub fn password_complexity_errors(password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(PASSWORD_NEEDS_DIGIT.to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push(PASSWORD_NEEDS_CAPITAL.to_string());
    }

    errors
}

/// Create-mode validation: login and password are both mandatory.
///
/// Rule order: login presence, then password (presence, then
/// complexity). Violations accumulate; nothing short-circuits.
pub fn validate_create(login: Option<&str>, password: Option<&str>) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(login) {
        errors.push(LOGIN_NOT_PROVIDED.to_string());
    }

    if is_blank(password) {
        errors.push(PASSWORD_NOT_PROVIDED.to_string());
    } else if let Some(password) = password {
        errors.extend(password_complexity_errors(password));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_login_is_reported() {
        let errors = validate_create(None, Some("Qwe1"));
        assert_eq!(errors, vec![LOGIN_NOT_PROVIDED]);

        let errors = validate_create(Some("   "), Some("Qwe1"));
        assert_eq!(errors, vec![LOGIN_NOT_PROVIDED]);
    }

    #[test]
    fn missing_password_is_reported() {
        let errors = validate_create(Some("alex"), None);
        assert_eq!(errors, vec![PASSWORD_NOT_PROVIDED]);

        let errors = validate_create(Some("alex"), Some(""));
        assert_eq!(errors, vec![PASSWORD_NOT_PROVIDED]);
    }

    #[test]
    fn complexity_errors_accumulate_in_order() {
        assert_eq!(
            password_complexity_errors("qwe"),
            vec![PASSWORD_NEEDS_DIGIT, PASSWORD_NEEDS_CAPITAL]
        );
        assert_eq!(
            password_complexity_errors("qweWA"),
            vec![PASSWORD_NEEDS_DIGIT]
        );
        assert_eq!(
            password_complexity_errors("qwe412421"),
            vec![PASSWORD_NEEDS_CAPITAL]
        );
        assert!(password_complexity_errors("9U)Hf(r").is_empty());
    }

    #[test]
    fn all_violations_are_collected_without_short_circuit() {
        let errors = validate_create(None, Some("hcvnnwxfdbvdh"));
        assert_eq!(
            errors,
            vec![LOGIN_NOT_PROVIDED, PASSWORD_NEEDS_DIGIT, PASSWORD_NEEDS_CAPITAL]
        );
    }

    #[test]
    fn valid_payload_produces_no_errors() {
        assert!(validate_create(Some("nikita-bayderin"), Some("9U)Hf(r")).is_empty());
    }
}
