//! Console line parser.
//!
//! Supported syntax:
//! - `<key> [name=value ...]` - resolve a key
//! - `:locale [id]`, `:locales`, `:missing [id]`, `:quit` / `:q`
//! - Values may be double-quoted to carry spaces: `name="Bo Li"`

use thiserror::Error;

use crate::i18n::{Locale, Variables};

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Translate { key: String, vars: Variables },
    ShowLocale,
    SetLocale(Locale),
    ListLocales,
    Missing(Option<Locale>),
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command ':{0}'")]
    UnknownCommand(String),

    #[error("expected name=value, got '{0}'")]
    MalformedVariable(String),

    #[error("variable name is empty in '{0}'")]
    EmptyVariableName(String),

    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("':{command}' takes at most {max} argument(s)")]
    TooManyArguments { command: String, max: usize },
}

/// Parse one console line.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let tokens = tokenize(line)?;
    let Some((first, rest)) = tokens.split_first() else {
        return Ok(Command::Empty);
    };

    // A quoted ":x" is still an ordinary key; only bare tokens are commands.
    if let Some(name) = first.strip_prefix(':')
        && line.trim_start().starts_with(':')
    {
        return parse_directive(name, rest);
    }

    let mut vars = Variables::new();
    for token in rest {
        let (name, value) = parse_variable(token)?;
        vars.insert(name, value);
    }

    Ok(Command::Translate {
        key: first.clone(),
        vars,
    })
}

fn parse_directive(name: &str, args: &[String]) -> Result<Command, ParseError> {
    let at_most = |max: usize| {
        if args.len() > max {
            Err(ParseError::TooManyArguments {
                command: name.to_string(),
                max,
            })
        } else {
            Ok(())
        }
    };

    match name {
        "locale" => {
            at_most(1)?;
            Ok(match args.first() {
                Some(id) => Command::SetLocale(Locale::from(id.as_str())),
                None => Command::ShowLocale,
            })
        }
        "locales" => {
            at_most(0)?;
            Ok(Command::ListLocales)
        }
        "missing" => {
            at_most(1)?;
            Ok(Command::Missing(args.first().map(|id| Locale::from(id.as_str()))))
        }
        "quit" | "q" => {
            at_most(0)?;
            Ok(Command::Quit)
        }
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_variable(token: &str) -> Result<(&str, &str), ParseError> {
    let Some((name, value)) = token.split_once('=') else {
        return Err(ParseError::MalformedVariable(token.to_string()));
    };
    if name.is_empty() {
        return Err(ParseError::EmptyVariableName(token.to_string()));
    }
    Ok((name, value))
}

/// Split on whitespace, honouring double quotes and `\"` / `\\` inside them.
fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => current.push(escaped),
                            Some(other) => {
                                current.push('\\');
                                current.push(other);
                            }
                            None => return Err(ParseError::UnterminatedQuote),
                        },
                        Some(other) => current.push(other),
                        None => return Err(ParseError::UnterminatedQuote),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_with_vars() {
        let cmd = parse_command("service.error serviceName=frpc error=\"port in use\"").unwrap();
        assert_eq!(
            cmd,
            Command::Translate {
                key: "service.error".into(),
                vars: Variables::new()
                    .with("serviceName", "frpc")
                    .with("error", "port in use"),
            }
        );
    }

    #[test]
    fn test_parse_value_with_equals() {
        let cmd = parse_command("k url=rtmp://host/live?key=abc").unwrap();
        let Command::Translate { vars, .. } = cmd else {
            panic!("expected translate");
        };
        assert_eq!(vars.get("url"), Some("rtmp://host/live?key=abc"));
    }

    #[test]
    fn test_parse_directives() {
        assert_eq!(parse_command(":locale").unwrap(), Command::ShowLocale);
        assert_eq!(
            parse_command(":locale en").unwrap(),
            Command::SetLocale(Locale::from("en"))
        );
        assert_eq!(parse_command(":locales").unwrap(), Command::ListLocales);
        assert_eq!(parse_command(":missing").unwrap(), Command::Missing(None));
        assert_eq!(
            parse_command(":missing zh").unwrap(),
            Command::Missing(Some(Locale::from("zh")))
        );
        assert_eq!(parse_command(":q").unwrap(), Command::Quit);
        assert_eq!(parse_command("  :quit  ").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_command("").unwrap(), Command::Empty);
        assert_eq!(parse_command("   \t").unwrap(), Command::Empty);
    }

    #[test]
    fn test_quoted_colon_is_a_key() {
        let cmd = parse_command("\":locale\"").unwrap();
        assert!(matches!(cmd, Command::Translate { ref key, .. } if key == ":locale"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command(":frobnicate"),
            Err(ParseError::UnknownCommand("frobnicate".into()))
        );
        assert_eq!(
            parse_command("key novalue"),
            Err(ParseError::MalformedVariable("novalue".into()))
        );
        assert_eq!(
            parse_command("key =x"),
            Err(ParseError::EmptyVariableName("=x".into()))
        );
        assert_eq!(
            parse_command("key name=\"open"),
            Err(ParseError::UnterminatedQuote)
        );
        assert!(matches!(
            parse_command(":locale en zh"),
            Err(ParseError::TooManyArguments { max: 1, .. })
        ));
    }

    #[test]
    fn test_tokenize_escapes() {
        assert_eq!(
            tokenize(r#"a "b \"c\" \\ d" e"#).unwrap(),
            vec!["a", r#"b "c" \ d"#, "e"]
        );
        assert_eq!(tokenize(r#"x="""#).unwrap(), vec!["x="]);
    }
}
