//! `${NAME}` substitution for pre-built model paths.
use std::collections::HashMap;
use std::env;

use crate::error::ConfigurationError;


/// A set of variables used to expand `${NAME}` in strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}


impl Environment {
    /// An environment with no variable.
    pub fn empty() -> Self {
        Self::default()
    }


    /// A snapshot of the process environment.
    pub fn system() -> Self {
        Self { vars: env::vars().collect() }
    }


    /// Set `name` to `value`, overriding any previous value.
    pub fn set<K, V>(mut self, name: K, value: V) -> Self
        where K: Into<String>,
              V: Into<String>,
    {
        self.vars.insert(name.into(), value.into());
        self
    }


    /// Returns the value of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }


    /// Returns `true` if `text` contains a `${...}` reference.
    pub fn contains_variables(text: &str) -> bool {
        text.find("${")
            .is_some_and(|start| text[start..].contains('}'))
    }


    /// Replaces every `${NAME}` in `text` by its value.
    ///
    /// Fails with [`ConfigurationError::UnresolvedVariable`]
    /// on the first name that is not set.
    pub fn substitute(&self, text: &str) -> Result<String, ConfigurationError> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            let Some(len) = rest[start + 2..].find('}') else { break; };

            let name = &rest[start + 2..start + 2 + len];
            let value = self.get(name)
                .ok_or_else(|| {
                    ConfigurationError::UnresolvedVariable(name.to_string())
                })?;

            out.push_str(&rest[..start]);
            out.push_str(value);
            rest = &rest[start + 2 + len + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_variables() {
        let env = Environment::empty()
            .set("MODELS", "/srv/models")
            .set("NAME", "stump");
        let path = env.substitute("${MODELS}/${NAME}.json").unwrap();
        assert_eq!(path, "/srv/models/stump.json");
    }

    #[test]
    fn unresolved_variable_fails() {
        let env = Environment::empty();
        assert_eq!(
            env.substitute("${NOPE}/a.json"),
            Err(ConfigurationError::UnresolvedVariable("NOPE".into()))
        );
    }

    #[test]
    fn detects_references() {
        assert!(Environment::contains_variables("a/${B}/c"));
        assert!(!Environment::contains_variables("a/$B/c"));
        assert!(!Environment::contains_variables("a/${B"));
        assert_eq!(Environment::empty().substitute("a/${B").unwrap(), "a/${B");
    }
}
