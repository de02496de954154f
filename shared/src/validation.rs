use regex::Regex;
use std::sync::LazyLock;

/// Longest address allowed by RFC 5321 forward-path limits
const MAX_EMAIL_LEN: usize = 254;
const MIN_EMAIL_LEN: usize = 3;

/// local-part `@` dot-separated domain labels, at least one dot in the domain
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .unwrap()
});

/// Check whether `email` is a structurally valid address
pub fn is_email_valid(email: &str) -> bool {
    if email.len() < MIN_EMAIL_LEN || email.len() > MAX_EMAIL_LEN {
        return false;
    }
    EMAIL_RE.is_match(email)
}
