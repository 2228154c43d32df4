//! Session search filters
//!
//! A [`SearchFilters`] value is compiled once per search into a
//! [`SessionFilter`], which is then applied to every stored record. Criteria
//! are AND-combined and an unset (or empty) criterion matches everything.
//!
//! `event` and `contract` both search the serialized `events` payload: a
//! contract id only exists inside event objects, so both look at the same text.

use regex::Regex;

use super::error::{Criterion, StoreError};
use super::models::Session;

/// Optional, independent search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Match against the session error
    pub error: Option<String>,
    /// Match anywhere in the serialized diagnostic events
    pub event: Option<String>,
    /// Match a contract id inside the serialized diagnostic events
    pub contract: Option<String>,
    /// Treat criteria as regular expressions instead of substrings
    pub use_regex: bool,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = Some(contract.into());
        self
    }

    pub fn with_regex(mut self, use_regex: bool) -> Self {
        self.use_regex = use_regex;
        self
    }

    /// True when no criterion is set, i.e. every session matches
    pub fn is_empty(&self) -> bool {
        [&self.error, &self.event, &self.contract]
            .iter()
            .all(|c| c.as_deref().map_or(true, str::is_empty))
    }

    /// Compile every criterion up front so a bad pattern fails before any
    /// record is examined
    pub fn compile(&self) -> Result<SessionFilter, StoreError> {
        Ok(SessionFilter {
            error: Matcher::build(Criterion::Error, self.error.as_deref(), self.use_regex)?,
            event: Matcher::build(Criterion::Event, self.event.as_deref(), self.use_regex)?,
            contract: Matcher::build(
                Criterion::Contract,
                self.contract.as_deref(),
                self.use_regex,
            )?,
        })
    }
}

#[derive(Debug)]
enum Matcher {
    Any,
    Substring(String),
    Pattern(Regex),
}

impl Matcher {
    fn build(criterion: Criterion, raw: Option<&str>, use_regex: bool) -> Result<Self, StoreError> {
        let Some(raw) = raw.filter(|value| !value.is_empty()) else {
            return Ok(Matcher::Any);
        };

        if !use_regex {
            return Ok(Matcher::Substring(raw.to_string()));
        }

        Regex::new(raw)
            .map(Matcher::Pattern)
            .map_err(|source| StoreError::InvalidPattern { criterion, source })
    }

    /// An active criterion never matches an empty field, even when the
    /// pattern itself could match the empty string.
    fn is_match(&self, haystack: &str) -> bool {
        match self {
            Matcher::Any => true,
            _ if haystack.is_empty() => false,
            Matcher::Substring(needle) => haystack.contains(needle.as_str()),
            Matcher::Pattern(regex) => regex.is_match(haystack),
        }
    }
}

/// Compiled predicate over sessions
#[derive(Debug)]
pub struct SessionFilter {
    error: Matcher,
    event: Matcher,
    contract: Matcher,
}

impl SessionFilter {
    pub fn matches(&self, session: &Session) -> bool {
        self.error.is_match(session.error())
            && self.event.is_match(session.events())
            && self.contract.is_match(session.events())
    }
}
