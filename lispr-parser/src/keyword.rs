// lispr-parser - Keyword type
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating tokens written `:name`.
//!
//! A keyword is stored as a string carrying [`KEYWORD_PREFIX`], so it can be
//! used directly as a map key alongside plain strings. The prefix is a
//! character source text does not normally contain. A string that does
//! start with it shares a map slot with the matching keyword and reads
//! back from the map as that keyword.

use std::fmt;
use std::rc::Rc;

/// Sentinel character marking a keyword in its string form.
pub const KEYWORD_PREFIX: char = '\u{29e}';

/// A keyword such as `:foo`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword(Rc<str>);

impl Keyword {
    /// Create a keyword from its bare name (without the leading colon).
    ///
    /// Passing a string that already carries the prefix returns that
    /// keyword unchanged.
    pub fn new(name: &str) -> Self {
        if is_keyword_key(name) {
            Keyword(Rc::from(name))
        } else {
            let mut key = String::with_capacity(name.len() + KEYWORD_PREFIX.len_utf8());
            key.push(KEYWORD_PREFIX);
            key.push_str(name);
            Keyword(Rc::from(key))
        }
    }

    /// Rebuild a keyword from a prefixed map key.
    pub fn from_key(key: &Rc<str>) -> Option<Self> {
        is_keyword_key(key).then(|| Keyword(Rc::clone(key)))
    }

    /// The bare name, without prefix or colon.
    pub fn name(&self) -> &str {
        &self.0[KEYWORD_PREFIX.len_utf8()..]
    }

    /// The prefixed string form, as stored in maps.
    pub fn as_key(&self) -> &Rc<str> {
        &self.0
    }
}

/// True if `s` is the string form of a keyword.
#[inline]
pub fn is_keyword_key(s: &str) -> bool {
    s.starts_with(KEYWORD_PREFIX)
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name())
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword(:{})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_strips_prefix() {
        let kw = Keyword::new("foo");
        assert_eq!(kw.name(), "foo");
        assert!(is_keyword_key(kw.as_key()));
        assert_eq!(kw.to_string(), ":foo");
    }

    #[test]
    fn test_new_is_idempotent() {
        let kw = Keyword::new("foo");
        let again = Keyword::new(kw.as_key());
        assert_eq!(kw, again);
    }

    #[test]
    fn test_from_key() {
        let plain: Rc<str> = Rc::from("foo");
        assert!(Keyword::from_key(&plain).is_none());
        let kw = Keyword::new("foo");
        assert_eq!(Keyword::from_key(kw.as_key()), Some(kw));
    }
}
