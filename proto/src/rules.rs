//! Account field rules shared by the browser and the server

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("email pattern is valid");
}

/// Something before the `@` drawn from letters, digits and `+_.-`, and
/// anything at all after it
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
