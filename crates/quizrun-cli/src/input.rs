//! Parsing of interactive exam commands read from stdin.

use anyhow::{bail, Result};

use quizrun_core::model::letter_to_index;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    /// Jump to a question (0-based).
    Go(usize),
    /// Check options (0-based indices).
    Pick(Vec<usize>),
    /// Uncheck options (0-based indices).
    Unpick(Vec<usize>),
    Reveal,
    Show,
    List,
    Finish,
    New,
    Reset,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

pub const HELP: &str = "\
Commands:
  next, n          go to the next question
  prev, p          go to the previous question
  go N             jump to question N
  pick A [C ...]   select option(s) on the current question
  unpick A [...]   deselect option(s) on the current question
  reveal, r        show or hide the answer for the current question
  show, s          print the current question again
  list, l          list all questions with their status
  finish, f        grade the exam now
  new              start a new exam from the same pool
  reset            discard the current exam
  help, h          show this help
  quit, q          leave quizrun";

pub fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(Command::Nothing);
    };
    let rest: Vec<&str> = parts.collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "go" | "g" => {
            let Some(n) = rest.first() else {
                bail!("usage: go N");
            };
            match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Go(n - 1),
                _ => bail!("'{n}' is not a question number"),
            }
        }
        "pick" => Command::Pick(parse_letters(&rest)?),
        "unpick" => Command::Unpick(parse_letters(&rest)?),
        "reveal" | "r" => Command::Reveal,
        "show" | "s" => Command::Show,
        "list" | "l" => Command::List,
        "finish" | "f" => Command::Finish,
        "new" => Command::New,
        "reset" => Command::Reset,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => bail!("unknown command '{other}' (type 'help')"),
    };
    Ok(command)
}

/// Letters separated by spaces and/or commas: `A C`, `a,c`.
fn parse_letters(args: &[&str]) -> Result<Vec<usize>> {
    let labels: Vec<&str> = args
        .iter()
        .flat_map(|a| a.split(','))
        .filter(|l| !l.is_empty())
        .collect();
    if labels.is_empty() {
        bail!("name at least one option letter, e.g. 'pick A'");
    }
    labels
        .into_iter()
        .map(|label| {
            letter_to_index(label).ok_or_else(|| anyhow::anyhow!("'{label}' is not an option letter"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_commands() {
        assert_eq!(parse_command("n").unwrap(), Command::Next);
        assert_eq!(parse_command("  PREV ").unwrap(), Command::Prev);
        assert_eq!(parse_command("go 3").unwrap(), Command::Go(2));
        assert!(parse_command("go 0").is_err());
        assert!(parse_command("go").is_err());
        assert_eq!(parse_command("").unwrap(), Command::Nothing);
    }

    #[test]
    fn pick_accepts_spaces_and_commas() {
        assert_eq!(parse_command("pick A").unwrap(), Command::Pick(vec![0]));
        assert_eq!(parse_command("pick a, c").unwrap(), Command::Pick(vec![0, 2]));
        assert_eq!(parse_command("unpick B,D").unwrap(), Command::Unpick(vec![1, 3]));
    }

    #[test]
    fn pick_rejects_bad_letters() {
        assert!(parse_command("pick").is_err());
        assert!(parse_command("pick AB").is_err());
        assert!(parse_command("pick 1").is_err());
    }

    #[test]
    fn unknown_command() {
        let err = parse_command("jump 2").unwrap_err();
        assert!(err.to_string().contains("unknown command"));
    }
}
