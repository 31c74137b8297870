//! Input validation for assistant queries.
//!
//! Checks are pure and run in a fixed order: blank input, then length, then
//! the off-topic denylist. The denylist is an ordered set of compiled
//! patterns; the first rule that matches decides the rejection.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// The maximum number of characters accepted in a single query.
pub const MAX_QUERY_CHARS: usize = 500;

////////////////////////////////////////////// DenyRule ///////////////////////////////////////////

struct DenyRule {
    pattern: Regex,
    topic: &'static str,
}

impl DenyRule {
    fn new(pattern: &str, topic: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("invalid denylist regex"),
            topic,
        }
    }
}

// Bare greetings are rejected outright; greeting words inside a longer
// question ("hi there, show my budget") pass through.
static DENYLIST: LazyLock<Vec<DenyRule>> = LazyLock::new(|| {
    vec![
        DenyRule::new(r"(?i)^(hi|hello|hey)$", "greeting"),
        DenyRule::new(r"(?i)\bpolitic(s|al|ian)?\b", "politics"),
        DenyRule::new(r"(?i)\belections?\b", "election"),
        DenyRule::new(r"(?i)\bgovernments?\b", "government"),
        DenyRule::new(r"(?i)\bcelebrit(y|ies)\b", "celebrity"),
        DenyRule::new(r"(?i)\bsports?\b", "sports"),
        DenyRule::new(r"(?i)\bweather\b", "weather"),
    ]
});

////////////////////////////////////////////// validate ///////////////////////////////////////////

/// Validates raw user input and returns the trimmed query text.
///
/// Fails with [`Error::EmptyInput`] when the input is blank after trimming,
/// [`Error::TooLong`] when the trimmed text exceeds [`MAX_QUERY_CHARS`]
/// characters, and [`Error::OffTopic`] when a denylist rule matches. Has no
/// side effects.
pub fn validate(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    let length = trimmed.chars().count();
    if length > MAX_QUERY_CHARS {
        return Err(Error::too_long(length));
    }
    for rule in DENYLIST.iter() {
        if rule.pattern.is_match(trimmed) {
            return Err(Error::off_topic(rule.topic));
        }
    }
    Ok(trimmed.to_string())
}

/////////////////////////////////////////////// tests /////////////////////////////////////////////
