//! Lines typed at the `qu0x` prompt.

use std::str::FromStr;

use qu0x_core::{DICE_COUNT, DieIndex, Expression, ParseExpressionError, Symbol};

/// Text printed by the `help` command.
pub const HELP: &str = "\
commands:
  die N      use die N (1-5)
  + - * / ^  press an operator
  ( ) !      press a parenthesis or factorial
  <expr>     type faces and keys, e.g. 3^(5-2+1)+1
  back       remove the last key
  clear      clear the expression
  submit     submit the expression
  hint       show the closest reachable value
  show       show the puzzle and expression
  stats      show streak and progress
  share      print the share text of a solved day
  quit       leave";

/// Errors that can occur when reading a command line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CommandError {
    /// The line is blank.
    #[display("empty command")]
    Empty,
    /// `die` was given something other than 1-5.
    #[display("no die at position {position:?}")]
    UnknownDie {
        /// The rejected position text.
        position: String,
    },
    /// The line is neither a command nor expression text.
    #[display("{_0}")]
    Expression(#[from] ParseExpressionError),
}

/// A parsed prompt line.
///
/// # Examples
///
/// ```
/// use qu0x_app::Command;
/// use qu0x_core::{BinaryOperator, DieIndex, Symbol};
///
/// assert_eq!("die 2".parse::<Command>(), Ok(Command::Die(DieIndex::new(1))));
/// assert_eq!("^".parse::<Command>(), Ok(Command::Key(Symbol::Operator(BinaryOperator::Pow))));
/// assert_eq!("SUBMIT".parse::<Command>(), Ok(Command::Submit));
/// assert!(matches!("(1+2)!".parse::<Command>(), Ok(Command::Type(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Use the die at an index.
    Die(DieIndex),
    /// Press a single key.
    Key(Symbol),
    /// Type several faces and keys at once.
    Type(Expression),
    /// Remove the last key.
    Back,
    /// Clear the expression.
    Clear,
    /// Submit the expression.
    Submit,
    /// Show the closest reachable value.
    Hint,
    /// Show the puzzle.
    Show,
    /// Show streak and statistics.
    Stats,
    /// Print the share text.
    Share,
    /// Print the command list.
    Help,
    /// Leave the prompt.
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "die" | "d" => {
                let position = words.next().unwrap_or_default();
                let index = position
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=DICE_COUNT).contains(n))
                    .and_then(|n| DieIndex::try_new(n - 1))
                    .ok_or_else(|| CommandError::UnknownDie {
                        position: position.to_owned(),
                    })?;
                Self::Die(index)
            }
            "back" | "b" | "undo" => Self::Back,
            "clear" | "c" => Self::Clear,
            "submit" | "s" | "=" => Self::Submit,
            "hint" => Self::Hint,
            "show" | "p" => Self::Show,
            "stats" => Self::Stats,
            "share" => Self::Share,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => {
                let mut chars = line.chars();
                if let (Some(ch), None) = (chars.next(), chars.next())
                    && let Some(symbol) = Symbol::from_char(ch)
                {
                    Self::Key(symbol)
                } else {
                    Self::Type(line.parse::<Expression>()?)
                }
            }
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use qu0x_core::BinaryOperator;

    use super::*;

    #[test]
    fn test_words() {
        assert_eq!("  back ".parse::<Command>(), Ok(Command::Back));
        assert_eq!("c".parse::<Command>(), Ok(Command::Clear));
        assert_eq!("=".parse::<Command>(), Ok(Command::Submit));
        assert_eq!("Quit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
    }

    #[test]
    fn test_die_positions() {
        assert_eq!("die 1".parse::<Command>(), Ok(Command::Die(DieIndex::new(0))));
        assert_eq!("d 5".parse::<Command>(), Ok(Command::Die(DieIndex::new(4))));
        for bad in ["die", "die 0", "die 6", "die x"] {
            assert!(
                matches!(bad.parse::<Command>(), Err(CommandError::UnknownDie { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_keys_and_text() {
        assert_eq!("!".parse::<Command>(), Ok(Command::Key(Symbol::Bang)));
        assert_eq!(
            "-".parse::<Command>(),
            Ok(Command::Key(Symbol::Operator(BinaryOperator::Sub)))
        );
        assert_eq!("4".parse::<Command>(), Ok(Command::Type("4".parse().unwrap())));
        assert_eq!(
            "3 + 2".parse::<Command>(),
            Ok(Command::Type("3+2".parse().unwrap()))
        );
        assert!(matches!(
            "3+x".parse::<Command>(),
            Err(CommandError::Expression(_))
        ));
    }
}
