use anyhow::Result;

use crate::config::Config;

/// Styled, multi-line rendering for the terminal front end.
pub trait DisplayTerminal {
    fn fmt(&self, f: &mut String, config: &Config) -> Result<()>;

    fn fmt_to_string(&self, config: &Config) -> Result<String> {
        let mut s = String::new();
        DisplayTerminal::fmt(self, &mut s, config)?;
        Ok(s)
    }
}
