use ecoguard_core::check_credentials;
use ecoguard_core::validation::is_valid_email;

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), String> {
    if !is_valid_email(email) {
        return Err("Enter a valid email address".to_string());
    }
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    Ok(())
}

pub fn validate_registration(
    full_name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    accepted_terms: bool,
) -> Result<(), String> {
    if full_name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    check_credentials(email, password).map_err(|e| e.to_string())?;
    if password != confirm {
        return Err("Passwords do not match".to_string());
    }
    if !accepted_terms {
        return Err("Please accept the terms to continue".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_rules() {
        assert_eq!(
            validate_registration("Ana", "ana@eco.org", "secret1", "secret1", true),
            Ok(())
        );
        assert!(validate_registration(" ", "ana@eco.org", "secret1", "secret1", true).is_err());
        assert_eq!(
            validate_registration("Ana", "ana@eco.org", "short", "short", true),
            Err("Password must be at least 6 characters".to_string())
        );
        assert_eq!(
            validate_registration("Ana", "ana@eco.org", "secret1", "secret2", true),
            Err("Passwords do not match".to_string())
        );
        assert!(validate_registration("Ana", "ana@eco.org", "secret1", "secret1", false).is_err());
    }

    #[test]
    fn test_multibyte_password_counted_in_characters() {
        // Six bytes but three characters: the server would refuse it too.
        assert_eq!(
            validate_registration("Ana", "ana@eco.org", "äöü", "äöü", true),
            Err("Password must be at least 6 characters".to_string())
        );
        assert_eq!(
            validate_registration("Ana", "ana@eco.org", "äöüäöü", "äöüäöü", true),
            Ok(())
        );
    }

    #[test]
    fn test_email_rule_matches_server() {
        assert_eq!(
            validate_registration("Ana", "a@.b.c", "secret1", "secret1", true),
            Err("Enter a valid email address".to_string())
        );
    }

    #[test]
    fn test_sign_in_rules() {
        assert!(validate_sign_in("ana@eco.org", "x").is_ok());
        assert!(validate_sign_in("ana@eco.org", "").is_err());
        assert!(validate_sign_in("nope", "x").is_err());
    }
}
