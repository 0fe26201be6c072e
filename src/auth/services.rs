use lazy_static::lazy_static;
use regex::Regex;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Deterministic avatar derived from the username.
pub(crate) fn avatar_url_for(username: &str) -> String {
    format!("https://api.dicebear.com/9.x/open-peeps/svg?seed={username}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(is_valid_email("baker@example.com"));
    }

    #[test]
    fn rejects_missing_domain() {
        assert!(!is_valid_email("baker@"));
        assert!(!is_valid_email("not-an-email"));
    }

    #[test]
    fn avatar_url_is_seeded_by_username() {
        assert_eq!(
            avatar_url_for("croissant_fan"),
            "https://api.dicebear.com/9.x/open-peeps/svg?seed=croissant_fan"
        );
    }
}
