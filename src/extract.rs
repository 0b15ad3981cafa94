// src/extract.rs
//! Contact-detail extraction from resume text.
//!
//! Resume `parsed_text` is an unstructured blob; the listing view pulls out
//! email, phone, LinkedIn and GitHub substrings for display. This is a
//! formatting convenience, not a parser: each field is a best-effort first
//! match, and the remainder is the text with those matches removed.

use regex::Regex;
use std::sync::OnceLock;

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
    })
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\+\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}").expect("valid regex")
    })
}

fn linkedin_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"linkedin\.com/in/[a-zA-Z0-9_-]+").expect("valid regex"))
}

fn github_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"github\.com/[a-zA-Z0-9_-]+").expect("valid regex"))
}

/// Contact-like substrings mined from resume text, each optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    /// Input text with the matched substrings removed, trimmed.
    pub remainder: String,
}

impl ContactDetails {
    pub fn from_text(text: &str) -> Self {
        let mut remainder = text.to_string();

        let email = take_first(email_re(), &mut remainder);
        let phone = take_first(phone_re(), &mut remainder);
        let linkedin = take_first(linkedin_re(), &mut remainder);
        let github = take_first(github_re(), &mut remainder);

        Self {
            email,
            phone,
            linkedin,
            github,
            remainder: remainder.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
    }
}

fn take_first(re: &Regex, text: &mut String) -> Option<String> {
    let (range, value) = {
        let matched = re.find(text)?;
        (matched.range(), matched.as_str().to_string())
    };
    text.replace_range(range, "");
    Some(value)
}
