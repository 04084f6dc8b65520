//! Line protocol commands
//!
//! One command per line, tokens separated by whitespace:
//!
//! ```text
//! SET <key> <value>   GET <key>   UNSET <key>   NUMEQUALTO <value>
//! BEGIN   ROLLBACK   COMMIT   END
//! ```
//!
//! Command names match case-insensitively; keys and values are taken
//! verbatim and cannot contain whitespace.

use crate::error::ParseError;

/// A parsed protocol command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Unset { key: String },
    NumEqualTo { value: String },
    Begin,
    Rollback,
    Commit,
    End,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let mut tokens = line.split_ascii_whitespace();
        let name = match tokens.next() {
            Some(name) => name,
            None => return Ok(None),
        };
        let args: Vec<&str> = tokens.collect();

        let command = match name.to_ascii_uppercase().as_str() {
            "SET" => {
                let [key, value] = expect_args::<2>("SET", &args)?;
                Command::Set { key: key.to_string(), value: value.to_string() }
            }
            "GET" => {
                let [key] = expect_args::<1>("GET", &args)?;
                Command::Get { key: key.to_string() }
            }
            "UNSET" => {
                let [key] = expect_args::<1>("UNSET", &args)?;
                Command::Unset { key: key.to_string() }
            }
            "NUMEQUALTO" => {
                let [value] = expect_args::<1>("NUMEQUALTO", &args)?;
                Command::NumEqualTo { value: value.to_string() }
            }
            "BEGIN" => {
                expect_args::<0>("BEGIN", &args)?;
                Command::Begin
            }
            "ROLLBACK" => {
                expect_args::<0>("ROLLBACK", &args)?;
                Command::Rollback
            }
            "COMMIT" => {
                expect_args::<0>("COMMIT", &args)?;
                Command::Commit
            }
            "END" => {
                expect_args::<0>("END", &args)?;
                Command::End
            }
            _ => return Err(ParseError::UnknownCommand(name.to_string())),
        };
        Ok(Some(command))
    }

    /// Canonical upper-case command name.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::Unset { .. } => "UNSET",
            Command::NumEqualTo { .. } => "NUMEQUALTO",
            Command::Begin => "BEGIN",
            Command::Rollback => "ROLLBACK",
            Command::Commit => "COMMIT",
            Command::End => "END",
        }
    }
}

impl std::str::FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)?.ok_or(ParseError::Empty)
    }
}

fn expect_args<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], ParseError> {
    <[&str; N]>::try_from(args).map_err(|_| ParseError::WrongArity {
        command,
        expected: N,
        found: args.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_commands() {
        assert_eq!(
            Command::parse("SET a 10").unwrap(),
            Some(Command::Set { key: "a".into(), value: "10".into() })
        );
        assert_eq!(Command::parse("GET a").unwrap(), Some(Command::Get { key: "a".into() }));
        assert_eq!(Command::parse("UNSET a").unwrap(), Some(Command::Unset { key: "a".into() }));
        assert_eq!(
            Command::parse("NUMEQUALTO 10").unwrap(),
            Some(Command::NumEqualTo { value: "10".into() })
        );
        assert_eq!(Command::parse("BEGIN").unwrap(), Some(Command::Begin));
        assert_eq!(Command::parse("ROLLBACK").unwrap(), Some(Command::Rollback));
        assert_eq!(Command::parse("COMMIT").unwrap(), Some(Command::Commit));
        assert_eq!(Command::parse("END").unwrap(), Some(Command::End));
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t ").unwrap(), None);
    }

    #[test]
    fn test_case_insensitive_names_verbatim_args() {
        assert_eq!(
            Command::parse("  set Foo BAR  ").unwrap(),
            Some(Command::Set { key: "Foo".into(), value: "BAR".into() })
        );
        assert_eq!(Command::parse("NumEqualTo x").unwrap().map(|c| c.name()), Some("NUMEQUALTO"));
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            Command::parse("SET a"),
            Err(ParseError::WrongArity { command: "SET", expected: 2, found: 1 })
        );
        assert_eq!(
            Command::parse("SET a b c"),
            Err(ParseError::WrongArity { command: "SET", expected: 2, found: 3 })
        );
        assert_eq!(
            Command::parse("BEGIN now"),
            Err(ParseError::WrongArity { command: "BEGIN", expected: 0, found: 1 })
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(Command::parse("DROP a"), Err(ParseError::UnknownCommand("DROP".into())));
    }

    #[test]
    fn test_from_str() {
        let cmd: Command = "get k".parse().unwrap();
        assert_eq!(cmd, Command::Get { key: "k".into() });
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
    }
}
