use jokes_core::{AggregateView, Msg};
use thiserror::Error;

/// One line of user input, with rows and jokes numbered from 1 as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Expand(usize),
    More(usize),
    Top(usize),
    Show { row: usize, joke: usize },
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (h for help)")]
    Unknown(String),
    #[error("`{0}` needs a number, e.g. `{0} 1`")]
    MissingNumber(&'static str),
    #[error("`{0}` is not a positive number")]
    BadNumber(String),
    #[error("there is no row {0}")]
    NoSuchRow(usize),
    #[error("row {row} has no joke {joke}")]
    NoSuchJoke { row: usize, joke: usize },
}

pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let command = match head {
        "e" | "expand" => Command::Expand(number(words.next(), "e")?),
        "m" | "more" => Command::More(number(words.next(), "m")?),
        "t" | "top" => Command::Top(number(words.next(), "t")?),
        "s" | "show" => Command::Show {
            row: number(words.next(), "s")?,
            joke: number(words.next(), "s")?,
        },
        "r" | "refresh" => Command::Refresh,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn number(word: Option<&str>, command: &'static str) -> Result<usize, CommandError> {
    let word = word.ok_or(CommandError::MissingNumber(command))?;
    match word.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CommandError::BadNumber(word.to_string())),
    }
}

/// Resolves display positions against the current view. `Help` and `Quit`
/// are handled by the loop and have no message.
pub fn to_msg(command: Command, view: &AggregateView) -> Result<Option<Msg>, CommandError> {
    let id_at = |row: usize| view.id_at(row).ok_or(CommandError::NoSuchRow(row));
    let msg = match command {
        Command::Expand(row) => Msg::ExpandToggled { id: id_at(row)? },
        Command::More(row) => Msg::LoadMoreRequested { id: id_at(row)? },
        Command::Top(row) => Msg::PinToTop { id: id_at(row)? },
        Command::Show { row, joke } => {
            let id = id_at(row)?;
            let text = view
                .row(id)
                .and_then(|entry| entry.jokes.get(joke.checked_sub(1)?))
                .ok_or(CommandError::NoSuchJoke { row, joke })?;
            Msg::JokeSelected {
                id,
                text: text.clone(),
            }
        }
        Command::Refresh => Msg::RefreshRequested,
        Command::Help | Command::Quit => return Ok(None),
    };
    Ok(Some(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jokes_core::{update, AppState};

    fn view_with(categories: &[&str]) -> AppState {
        let (state, _) = update(AppState::new(), Msg::Mounted);
        let (state, _) = update(
            state,
            Msg::CategoriesLoaded {
                result: Ok(categories.iter().map(|c| c.to_string()).collect()),
            },
        );
        state
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse("  e 2 ").unwrap(), Some(Command::Expand(2)));
        assert_eq!(parse("more 1").unwrap(), Some(Command::More(1)));
        assert_eq!(
            parse("s 1 3").unwrap(),
            Some(Command::Show { row: 1, joke: 3 })
        );
        assert_eq!(parse("q").unwrap(), Some(Command::Quit));
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("t"), Err(CommandError::MissingNumber("t")));
        assert_eq!(parse("e 0"), Err(CommandError::BadNumber("0".into())));
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".into())));
    }

    #[test]
    fn rows_resolve_to_ids_after_reordering() {
        let state = view_with(&["Programming", "Pun"]);
        let (state, _) = update(state, Msg::PinToTop { id: 2 });
        let view = state.view();

        assert_eq!(
            to_msg(Command::Expand(1), &view),
            Ok(Some(Msg::ExpandToggled { id: 2 }))
        );
        assert_eq!(
            to_msg(Command::More(2), &view),
            Ok(Some(Msg::LoadMoreRequested { id: 1 }))
        );
        assert_eq!(
            to_msg(Command::Top(3), &view),
            Err(CommandError::NoSuchRow(3))
        );
        assert_eq!(to_msg(Command::Quit, &view), Ok(None));
    }

    #[test]
    fn show_picks_joke_text() {
        let state = view_with(&["Pun"]);
        let generation = state.list().generation();
        let (state, _) = update(
            state,
            Msg::JokesLoaded {
                id: 1,
                generation,
                result: Ok(vec!["first".into(), "second".into()]),
            },
        );
        let view = state.view();
        assert_eq!(
            to_msg(Command::Show { row: 1, joke: 2 }, &view),
            Ok(Some(Msg::JokeSelected {
                id: 1,
                text: "second".into()
            }))
        );
        assert_eq!(
            to_msg(Command::Show { row: 1, joke: 3 }, &view),
            Err(CommandError::NoSuchJoke { row: 1, joke: 3 })
        );
    }
}
