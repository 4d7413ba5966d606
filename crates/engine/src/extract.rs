//! Email validation and domain extraction for a single customer row.

use crate::error::RecordError;
use crate::model::{CustomerView, RawRecord};
use regex::Regex;
use std::sync::OnceLock;

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
pub const DOMAIN_PATTERN: &str = r"^[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap())
}

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DOMAIN_PATTERN).unwrap())
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn is_valid_domain(domain: &str) -> bool {
    domain_regex().is_match(domain)
}

/// Substring after the single `@`, or `""` when there is not exactly one.
pub fn extract_domain(email: &str) -> &str {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(domain), None) => domain,
        _ => "",
    }
}

/// Validate one row and return its email domain, case preserved.
///
/// # Errors
/// - `MalformedRecord` when the row has fewer than five fields
/// - `InvalidEmail` when the email does not match [`EMAIL_PATTERN`]
/// - `InvalidDomain` when the extracted domain does not match [`DOMAIN_PATTERN`]
pub fn extract(record: &RawRecord) -> Result<String, RecordError> {
    let customer = CustomerView::try_from(record)?;

    if !is_valid_email(customer.email) {
        return Err(RecordError::InvalidEmail {
            line: record.line(),
            email: customer.email.to_string(),
        });
    }

    let domain = extract_domain(customer.email);
    if domain.is_empty() || !is_valid_domain(domain) {
        return Err(RecordError::InvalidDomain {
            line: record.line(),
            domain: domain.to_string(),
        });
    }

    Ok(domain.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str) -> RawRecord {
        RawRecord::from_fields(2, ["Justin", "Hansen", email, "Male", "24.98.247.196"])
    }

    #[test]
    fn test_extract_domain_cases() {
        let cases = [
            ("proper.email@gmail.com", "gmail.com"),
            ("proper.email.gmail.com", ""),
            ("", ""),
            ("two@at@signs.com", ""),
            ("trailing@", ""),
        ];
        for (email, expected) in cases {
            assert_eq!(extract_domain(email), expected, "email: {email:?}");
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("proper.email@gmail.com"));
        assert!(is_valid_email("a+tag_1%x@sub-domain.example.co"));
        assert!(!is_valid_email("proper.email.gmail.com"));
        assert!(!is_valid_email("missing@domain"));
        assert!(!is_valid_email("short@tld.c"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("two@at@gmail.com"));
        assert!(!is_valid_email("space in@gmail.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_domain_validation() {
        assert!(is_valid_domain("gmail.com"));
        assert!(is_valid_domain("mail.example.org"));
        assert!(!is_valid_domain("localhost"));
        assert!(!is_valid_domain("example.c0m"));
        assert!(!is_valid_domain(""));
    }

    #[test]
    fn test_extract_valid_row() {
        assert_eq!(extract(&row("jhansen2@statcounter.com")).unwrap(), "statcounter.com");
    }

    #[test]
    fn test_extract_preserves_case() {
        assert_eq!(extract(&row("Dev@GitHub.com")).unwrap(), "GitHub.com");
        assert_eq!(extract(&row("dev@github.com")).unwrap(), "github.com");
    }

    #[test]
    fn test_extract_rejects_missing_tld() {
        let err = extract(&row("missing@domain")).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidEmail {
                line: 2,
                email: "missing@domain".to_string()
            }
        );
    }

    #[test]
    fn test_extract_rejects_email_without_at() {
        let err = extract(&row("no-at-sign.example.com")).unwrap_err();
        assert!(matches!(err, RecordError::InvalidEmail { .. }));
    }

    #[test]
    fn test_extract_rejects_short_row() {
        let record = RawRecord::from_fields(5, ["Only", "Two"]);
        let err = extract(&record).unwrap_err();
        assert_eq!(err, RecordError::MalformedRecord { line: 5, fields: 2 });
    }
}
