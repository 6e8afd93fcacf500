//! Form field validation
//!
//! Field checks with the storefront's exact wording, and the feedback a
//! form shows once the field loses focus.

use std::sync::LazyLock;

use regex::Regex;

pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Phone number must be exactly 10 digits";
pub const UPI_MESSAGE: &str = "Invalid UPI ID format (e.g., username@upi)";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
pub const REQUIRED_MESSAGE: &str = "This field is required";

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PHONE_DIGITS: usize = 10;
const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex should be valid")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex should be valid"));
static UPI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@[A-Za-z0-9_.-]+$").expect("UPI regex should be valid")
});

/// One failed password rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Number,
    Symbol,
}

impl PasswordRule {
    pub fn message(self) -> &'static str {
        match self {
            PasswordRule::MinLength => "Password must be at least 8 characters",
            PasswordRule::Uppercase => "Password must contain at least one uppercase letter",
            PasswordRule::Number => "Password must contain at least one number",
            PasswordRule::Symbol => "Password must contain at least one special character",
        }
    }
}

/// Outcome shown next to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFeedback {
    Valid,
    Invalid(String),
}

impl FieldFeedback {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldFeedback::Valid)
    }
}

/// The kinds of field the CLI can check
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FieldKind {
    Email,
    Phone,
    Password,
    Upi,
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn validate_upi(upi: &str) -> bool {
    UPI_RE.is_match(upi)
}

/// Every rule `password` breaks, in a fixed order
pub fn validate_password(password: &str) -> Vec<PasswordRule> {
    let mut failed = Vec::new();

    if password.chars().count() < PASSWORD_MIN_LEN {
        failed.push(PasswordRule::MinLength);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        failed.push(PasswordRule::Uppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        failed.push(PasswordRule::Number);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        failed.push(PasswordRule::Symbol);
    }

    failed
}

/// Digits only, at most ten of them
pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_DIGITS)
        .collect()
}

/// Feedback for a field of `kind` after it loses focus
///
/// Empty values get no feedback.
pub fn check_field(kind: FieldKind, value: &str) -> Option<FieldFeedback> {
    if value.is_empty() {
        return None;
    }

    let feedback = match kind {
        FieldKind::Email => rule_feedback(validate_email(value), EMAIL_MESSAGE),
        FieldKind::Phone => rule_feedback(validate_phone(value), PHONE_MESSAGE),
        FieldKind::Upi => rule_feedback(validate_upi(value), UPI_MESSAGE),
        FieldKind::Password => {
            let failed = validate_password(value);
            if failed.is_empty() {
                FieldFeedback::Valid
            } else {
                let messages: Vec<&str> = failed.iter().map(|rule| rule.message()).collect();
                FieldFeedback::Invalid(messages.join(". "))
            }
        }
    };
    Some(feedback)
}

/// Feedback for a confirmation field against the original password
pub fn check_confirmation(password: &str, confirmation: &str) -> Option<FieldFeedback> {
    if confirmation.is_empty() {
        return None;
    }
    Some(rule_feedback(
        confirmation == password,
        PASSWORD_MISMATCH_MESSAGE,
    ))
}

/// Required fields must not be blank
pub fn check_required(value: &str) -> FieldFeedback {
    rule_feedback(!value.trim().is_empty(), REQUIRED_MESSAGE)
}

fn rule_feedback(ok: bool, message: &str) -> FieldFeedback {
    if ok {
        FieldFeedback::Valid
    } else {
        FieldFeedback::Invalid(message.to_string())
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;
