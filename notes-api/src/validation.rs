//! Request body rules, checked by the [`crate::extract::Valid`] extractor
//! before a handler runs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Error, Result};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref UPPERCASE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SPECIAL: Regex = Regex::new(r"[[:punct:]]").unwrap();
}

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 16;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Collects every failed rule so the caller sees all messages at once.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn not_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.0.push(format!("{field} should not be empty"));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !EMAIL.is_match(value) {
            self.0.push(format!("{field} must be an email"));
        }
        self
    }

    pub fn password(&mut self, field: &str, value: &str) -> &mut Self {
        let len = value.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
            self.0.push(format!(
                "{field} must contain at least {PASSWORD_MIN_LEN} characters and atmost {PASSWORD_MAX_LEN} characters!"
            ));
        }
        if !(UPPERCASE.is_match(value) && DIGIT.is_match(value) && SPECIAL.is_match(value)) {
            self.0.push(format!(
                "{field} must contain at least one uppercase, one numeric, and one special character!"
            ));
        }
        self
    }

    pub fn finish(&mut self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(std::mem::take(&mut self.0)))
        }
    }
}
