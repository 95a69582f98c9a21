//! Interactive console for inspecting dictionaries.
//!
//! Each input line is parsed into a [`Command`] and executed against an
//! [`I18n`] store.

mod parser;

pub use parser::{Command, ParseError, parse_command};

use tracing::debug;

use crate::i18n::I18n;

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Print(String),
    Silent,
    Quit,
}

/// Executes console commands against a locale store.
#[derive(Debug, Clone)]
pub struct Console {
    i18n: I18n,
}

impl Console {
    pub fn new(i18n: I18n) -> Self {
        Self { i18n }
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    /// Parse and execute a raw input line.
    pub fn handle_line(&self, line: &str) -> Outcome {
        match parse_command(line) {
            Ok(command) => self.execute(command),
            Err(e) => Outcome::Print(format!("error: {}", e)),
        }
    }

    pub fn execute(&self, command: Command) -> Outcome {
        debug!("Executing {:?}", command);
        match command {
            Command::Translate { key, vars } => Outcome::Print(self.i18n.translate(&key, &vars)),
            Command::ShowLocale => Outcome::Print(self.i18n.current_locale().to_string()),
            Command::SetLocale(locale) => {
                self.i18n.set_locale(locale);
                Outcome::Silent
            }
            Command::ListLocales => {
                let catalog = self.i18n.catalog();
                let current = self.i18n.current_locale();
                let lines: Vec<String> = catalog
                    .locales()
                    .into_iter()
                    .map(|locale| {
                        let marker = if *locale == current { "*" } else { " " };
                        let keys = catalog.get(locale.as_str()).map_or(0, |d| d.len());
                        format!("{} {} ({} keys)", marker, locale, keys)
                    })
                    .collect();

                if lines.is_empty() {
                    Outcome::Print("no dictionaries loaded".to_string())
                } else {
                    Outcome::Print(lines.join("\n"))
                }
            }
            Command::Missing(locale) => {
                let locale = locale.unwrap_or_else(|| self.i18n.current_locale());
                let missing = self.i18n.catalog().missing_keys(locale.as_str());
                if missing.is_empty() {
                    Outcome::Print(format!("'{}' has every key", locale))
                } else {
                    Outcome::Print(format!(
                        "'{}' is missing {} key(s):\n{}",
                        locale,
                        missing.len(),
                        missing.join("\n")
                    ))
                }
            }
            Command::Quit => Outcome::Quit,
            Command::Empty => Outcome::Silent,
        }
    }
}
