//! Email address checks shared by newsletter signup, checkout and customers.

/// Loose structural check: one `@`, a non-empty local part, and a dotted
/// domain without empty labels. No whitespace anywhere.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Trimmed, lowercased address, or `None` when it is not an email.
#[must_use]
pub fn normalise_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();

    is_valid_email(&email).then_some(email)
}
