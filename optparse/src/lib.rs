//! GNU-getopt-style command-line option parsing.
//!
//! Classifies an argument vector into recognized options and positional
//! arguments, driven by a compact specification:
//! - a short-option string (`"i:vq"` — a letter, `:` marks "takes a value")
//! - a long-option word list (`["input=", "verbose"]` — trailing `=` marks
//!   "takes a value")
//!
//! Short options may carry their value embedded (`-ifile.txt`) or as the
//! following token; long options always take the following token. Options
//! and positionals may interleave anywhere in the vector, GNU-style. Each
//! call to [`parse`] works on local state only and returns an immutable
//! [`ParseResult`], so concurrent calls never interfere.

use std::collections::HashMap;

// ============================================================================
// Result and Error types
// ============================================================================

pub type Result<T> = std::result::Result<T, Error>;

/// A parse failure. Each variant carries the offending token or
/// specification word; the first failure aborts the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid option specification: {0}")]
    InvalidSpecification(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("unrecognized option: {0}")]
    UnrecognizedOption(String),

    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    #[error("option requires a value: {0}")]
    MissingOptionValue(String),

    #[error("option {0} cannot take another option as its value")]
    InvalidOptionValue(String),
}

// ============================================================================
// Criterion — one recognized option
// ============================================================================

/// A recognized option: its identifier (single letter for short options, a
/// word for long options, no dash prefix) and whether it requires a value.
///
/// Short and long criteria are kept in separate lists; the two identifier
/// namespaces never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub name: String,
    pub requires_value: bool,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// Characters allowed in an option token after the dash prefix.
fn is_suffix_char(c: char) -> bool {
    is_word_char(c) || c == '-' || c == '.'
}

// ============================================================================
// Specification parsing
// ============================================================================

/// Parse a short-option specification string such as `"i:vq"`.
///
/// Scans left to right: each word character yields one criterion, with
/// `requires_value` set iff a `:` immediately follows. Anything outside
/// that pattern (a stray `:`, punctuation) yields nothing and is skipped,
/// so this operation cannot fail. An empty string yields an empty list.
pub fn parse_short_spec(spec: &str) -> Vec<Criterion> {
    let mut criteria = Vec::new();
    let mut chars = spec.chars().peekable();
    while let Some(c) = chars.next() {
        if !is_word_char(c) {
            continue;
        }
        let requires_value = chars.peek() == Some(&':');
        if requires_value {
            chars.next();
        }
        criteria.push(Criterion {
            name: c.to_string(),
            requires_value,
        });
    }
    criteria
}

/// Parse a long-option specification list such as `["input=", "verbose"]`.
///
/// A trailing `=` marks the option as requiring a value. Each word must
/// start with a letter, contain only letters, digits, `_` and `-`, be at
/// least two characters long (excluding the `=`), and may not contain
/// consecutive dashes or end in a dash. The first bad word fails the whole
/// list with [`Error::InvalidSpecification`].
pub fn parse_long_spec<S: AsRef<str>>(words: &[S]) -> Result<Vec<Criterion>> {
    words
        .iter()
        .map(|word| parse_long_word(word.as_ref()))
        .collect()
}

fn parse_long_word(word: &str) -> Result<Criterion> {
    let (name, requires_value) = match word.strip_suffix('=') {
        Some(stripped) => (stripped, true),
        None => (word, false),
    };

    let bad = || Error::InvalidSpecification(word.to_string());

    let first = name.chars().next().ok_or_else(bad)?;
    if !first.is_ascii_alphabetic() {
        return Err(bad());
    }
    if name.len() < 2 {
        return Err(bad());
    }
    // Also excludes whitespace and any interior '='.
    if !name.chars().all(|c| is_word_char(c) || c == '-') {
        return Err(bad());
    }
    if name.contains("--") || name.ends_with('-') {
        return Err(bad());
    }

    Ok(Criterion {
        name: name.to_string(),
        requires_value,
    })
}

// ============================================================================
// Token classification
// ============================================================================

/// A successfully classified option token.
#[derive(Debug, PartialEq)]
struct OptionMatch<'a> {
    /// Prefixed key, e.g. `-i` or `--input`.
    key: String,
    criterion: &'a Criterion,
    /// Value embedded in a short token (`-ifile.txt`), if any.
    embedded: Option<String>,
}

/// Split an option-like token into its dash prefix and suffix, enforcing
/// the lexical shape `(--?)([\w\-.]+)` with a letter-initial suffix.
fn split_token(token: &str) -> Result<(&str, &str)> {
    let (prefix, suffix) = match token.strip_prefix("--") {
        Some(rest) => ("--", rest),
        None => match token.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => return Err(Error::InvalidOption(token.to_string())),
        },
    };

    if suffix.is_empty() || !suffix.chars().all(is_suffix_char) {
        return Err(Error::InvalidOption(token.to_string()));
    }
    // chars().all() guarantees ASCII here, so byte indexing below is safe.
    if !suffix.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidOption(token.to_string()));
    }

    Ok((prefix, suffix))
}

/// Classify one option-like token against the criteria.
///
/// Long tokens look up the full suffix in the long namespace. Short tokens
/// of length one look up the suffix in the short namespace. A longer short
/// token is an embedded-value form: its first letter must name a short
/// criterion that requires a value, and the remainder becomes that value;
/// otherwise the token as a whole is unrecognized.
fn classify<'a>(
    token: &str,
    short: &'a [Criterion],
    long: &'a [Criterion],
) -> Result<OptionMatch<'a>> {
    let (prefix, suffix) = split_token(token)?;

    if prefix == "--" {
        let criterion = long
            .iter()
            .find(|c| c.name == suffix)
            .ok_or_else(|| Error::UnrecognizedOption(token.to_string()))?;
        return Ok(OptionMatch {
            key: format!("--{}", suffix),
            criterion,
            embedded: None,
        });
    }

    if suffix.len() > 1 {
        let identifier = &suffix[..1];
        let criterion = short
            .iter()
            .find(|c| c.name == identifier && c.requires_value)
            .ok_or_else(|| Error::UnrecognizedOption(token.to_string()))?;
        return Ok(OptionMatch {
            key: format!("-{}", identifier),
            criterion,
            embedded: Some(suffix[1..].to_string()),
        });
    }

    let criterion = short
        .iter()
        .find(|c| c.name == suffix)
        .ok_or_else(|| Error::UnrecognizedOption(token.to_string()))?;
    Ok(OptionMatch {
        key: format!("-{}", suffix),
        criterion,
        embedded: None,
    })
}

// ============================================================================
// ParseResult
// ============================================================================

/// The outcome of a successful parse: the option mapping and the ordered
/// positional arguments. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    options: HashMap<String, Option<String>>,
    positionals: Vec<String>,
}

impl ParseResult {
    /// Was this option given? `key` is the prefixed form, e.g. `"-v"` or
    /// `"--verbose"`.
    pub fn is_present(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    /// The value recorded for a value-taking option, if the option was
    /// given.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_deref())
    }

    /// The full option mapping, keyed by prefixed form. Entries are `None`
    /// for options that take no value.
    pub fn options(&self) -> &HashMap<String, Option<String>> {
        &self.options
    }

    /// Positional arguments, in original relative order.
    pub fn args(&self) -> &[String] {
        &self.positionals
    }

    /// Decompose into the raw (options, positionals) pair.
    pub fn into_parts(self) -> (HashMap<String, Option<String>>, Vec<String>) {
        (self.options, self.positionals)
    }
}

// ============================================================================
// Parse engine
// ============================================================================

/// Parse `tokens` (the argument vector, excluding the program name) against
/// a short-option specification and a long-option specification.
///
/// Specification errors fail before any token is examined. Tokens are then
/// scanned once, left to right: tokens without a leading dash are
/// positional; option-like tokens are classified and recorded under their
/// prefixed key. An option requiring a value with none embedded consumes
/// the following token — unless there is none ([`Error::MissingOptionValue`])
/// or that token is itself a recognized option
/// ([`Error::InvalidOptionValue`]). An option-like token that is *not* a
/// recognized option may serve as a value. Repeating an option fails with
/// [`Error::DuplicateOption`].
pub fn parse<T, S>(tokens: &[T], short_spec: &str, long_spec: &[S]) -> Result<ParseResult>
where
    T: AsRef<str>,
    S: AsRef<str>,
{
    let short = parse_short_spec(short_spec);
    let long = parse_long_spec(long_spec)?;

    let mut options: HashMap<String, Option<String>> = HashMap::new();
    let mut positionals: Vec<String> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_ref();
        i += 1;

        if !token.starts_with('-') {
            positionals.push(token.to_string());
            continue;
        }

        let matched = classify(token, &short, &long)?;
        if options.contains_key(&matched.key) {
            return Err(Error::DuplicateOption(matched.key));
        }

        let value = if matched.criterion.requires_value {
            match matched.embedded {
                Some(embedded) => Some(embedded),
                None => {
                    // Explicit bounds check: running out of tokens here is a
                    // deliberate error, not an index fault.
                    let next = match tokens.get(i) {
                        Some(next) => next.as_ref(),
                        None => return Err(Error::MissingOptionValue(matched.key)),
                    };
                    if next.starts_with('-') && classify(next, &short, &long).is_ok() {
                        return Err(Error::InvalidOptionValue(matched.key));
                    }
                    i += 1;
                    Some(next.to_string())
                }
            }
        } else {
            None
        };

        options.insert(matched.key, value);
    }

    Ok(ParseResult {
        options,
        positionals,
    })
}

// ============================================================================
// Tests
// ============================================================================
