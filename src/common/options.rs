//! A strict parser for flag-style command tokens.
//!
//! Tokens look like `-X value` or `-X` (a boolean flag).
//! A `--` token splits the primary options from the secondary ones;
//! scanning for flags always stops there.
//!
//! [`OptionTokens`] owns its tokens.
//! Extracted tokens are marked as consumed inside the struct,
//! so the caller's own token list is never modified.
use std::fmt;

use crate::error::ConfigurationError;


/// The separator between primary and secondary options.
pub const SEPARATOR: &str = "--";


/// An ordered list of option tokens, some of which may be consumed.
///
/// # Example
/// ```
/// use minivote::common::options::OptionTokens;
/// let mut tokens = OptionTokens::split("-R MAJ -D -S 3");
/// assert!(tokens.extract_flag('D').unwrap());
/// assert_eq!(tokens.extract_value('R').unwrap().as_deref(), Some("MAJ"));
/// assert_eq!(tokens.extract_value('S').unwrap().as_deref(), Some("3"));
/// assert!(tokens.reject_remaining().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTokens {
    tokens: Vec<Option<String>>,
}


impl OptionTokens {
    /// Construct a new instance of [`OptionTokens`]
    /// from already split tokens.
    /// Empty tokens are treated as consumed.
    pub fn new<I, S>(tokens: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        let tokens = tokens.into_iter()
            .map(Into::into)
            .map(|t: String| if t.is_empty() { None } else { Some(t) })
            .collect();
        Self { tokens }
    }


    /// Split `line` on whitespace. Quoting is not handled.
    pub fn split<S: AsRef<str>>(line: S) -> Self {
        Self::new(line.as_ref().split_whitespace())
    }


    /// Returns `true` if every token has been consumed.
    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(Option::is_none)
    }


    /// Returns the tokens that are not consumed yet, in order.
    pub fn remaining(&self) -> Vec<&str> {
        self.tokens.iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }


    /// Returns the position of `-<flag>` before the first `--`.
    fn find(&self, flag: char) -> Result<Option<usize>, ConfigurationError> {
        for (i, token) in self.tokens.iter().enumerate() {
            let Some(token) = token else { continue; };
            if !token.starts_with('-') || token.chars().count() < 2 {
                continue;
            }
            // Negative numbers are values, not flags.
            if token.parse::<f64>().is_ok() {
                continue;
            }
            if token.chars().count() > 2 {
                return Err(ConfigurationError::MalformedOption(token.clone()));
            }

            let letter = token.chars().nth(1);
            if letter == Some(flag) {
                return Ok(Some(i));
            }
            if letter == Some('-') {
                return Ok(None);
            }
        }
        Ok(None)
    }


    /// Consumes `-<flag>` and returns `true` if it exists.
    ///
    /// Fails with [`ConfigurationError::MalformedOption`]
    /// if a dash token longer than two characters
    /// that is not a number comes before the flag.
    pub fn extract_flag(&mut self, flag: char)
        -> Result<bool, ConfigurationError>
    {
        match self.find(flag)? {
            Some(i) => {
                self.tokens[i] = None;
                Ok(true)
            },
            None => Ok(false),
        }
    }


    /// Consumes `-<flag> value` and returns `value` if the flag exists.
    ///
    /// Fails with [`ConfigurationError::MissingValue`]
    /// if `-<flag>` is the last token.
    pub fn extract_value(&mut self, flag: char)
        -> Result<Option<String>, ConfigurationError>
    {
        let Some(i) = self.find(flag)? else { return Ok(None); };

        let value = self.tokens.get_mut(i + 1)
            .and_then(Option::take)
            .ok_or(ConfigurationError::MissingValue(flag))?;
        self.tokens[i] = None;
        Ok(Some(value))
    }


    /// Consumes every occurrence of `-<flag> value`
    /// and returns the values in order.
    pub fn extract_values(&mut self, flag: char)
        -> Result<Vec<String>, ConfigurationError>
    {
        let mut values = Vec::new();
        while let Some(value) = self.extract_value(flag)? {
            values.push(value);
        }
        Ok(values)
    }


    /// Returns the tokens after the first `--`.
    /// The separator and the returned tokens are consumed.
    pub fn partition_at_separator(&mut self) -> Vec<String> {
        let position = self.tokens.iter()
            .position(|t| t.as_deref() == Some(SEPARATOR));
        let Some(position) = position else { return Vec::new(); };

        self.tokens[position] = None;
        self.tokens[position + 1..].iter_mut()
            .filter_map(Option::take)
            .collect()
    }


    /// Fails with [`ConfigurationError::UnrecognizedOptions`]
    /// if any token is left unconsumed.
    pub fn reject_remaining(&self) -> Result<(), ConfigurationError> {
        let rest = self.remaining();
        if rest.is_empty() {
            return Ok(());
        }
        let rest = rest.into_iter()
            .map(String::from)
            .collect();
        Err(ConfigurationError::UnrecognizedOptions(rest))
    }
}


impl fmt::Display for OptionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join_options(self.remaining()))
    }
}


/// Joins option tokens with a single space,
/// quoting the ones that contain whitespace.
pub fn join_options<I, S>(tokens: I) -> String
    where I: IntoIterator<Item = S>,
          S: AsRef<str>,
{
    tokens.into_iter()
        .map(|t| {
            let t = t.as_ref();
            if t.chars().any(char::is_whitespace) {
                format!("\"{t}\"")
            } else {
                t.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
