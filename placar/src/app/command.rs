use super::Route;
use placar_common::{match_state::int_from_str, side::Side};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    Names,
    Scores,
    All,
}

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Stop,
    Zero,
    Score { side: Side, delta: i64 },
    Name { side: Side, text: String },
    Period(String),
    Swap,
    Reset(ResetScope),
    Time { minutes: i64, seconds: i64 },
    AddMinute,
    SubMinute,
    Route(Route),
    Fullscreen,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`, type `help` to list the commands")]
    Unknown(String),
    #[error("`{0}` is missing an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a team, use `a` or `b`")]
    InvalidSide(String),
    #[error("Can't reset `{0}`, use `names`, `scores` or `all`")]
    InvalidResetScope(String),
}

/// Splits off the first word, returning it and the rest with leading whitespace removed
fn next_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim_start()),
        None => (text, ""),
    }
}

fn parse_side(command: &'static str, word: &str) -> Result<Side, CommandError> {
    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::MissingArgument(command)),
        "a" => Ok(Side::A),
        "b" => Ok(Side::B),
        _ => Err(CommandError::InvalidSide(word.to_string())),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (keyword, rest) = next_word(line.trim_end());

        let command = match keyword.to_lowercase().as_str() {
            "" | "show" => Command::Show,
            "start" => Command::Start,
            "pause" => Command::Pause,
            "toggle" | "space" => Command::Toggle,
            "stop" => Command::Stop,
            "zero" | "r" => Command::Zero,
            "1" => Command::Score {
                side: Side::A,
                delta: 1,
            },
            "2" => Command::Score {
                side: Side::B,
                delta: 1,
            },
            "score" => {
                let (side, rest) = next_word(rest);
                let side = parse_side("score", side)?;
                let (delta, _) = next_word(rest);
                if delta.is_empty() {
                    return Err(CommandError::MissingArgument("score"));
                }
                Command::Score {
                    side,
                    delta: int_from_str(delta),
                }
            }
            "name" => {
                let (side, text) = next_word(rest);
                Command::Name {
                    side: parse_side("name", side)?,
                    text: text.to_string(),
                }
            }
            "period" => Command::Period(rest.to_string()),
            "swap" => Command::Swap,
            "reset" => {
                let (scope, _) = next_word(rest);
                let scope = match scope.to_lowercase().as_str() {
                    "" => return Err(CommandError::MissingArgument("reset")),
                    "names" => ResetScope::Names,
                    "scores" => ResetScope::Scores,
                    "all" => ResetScope::All,
                    _ => return Err(CommandError::InvalidResetScope(scope.to_string())),
                };
                Command::Reset(scope)
            }
            "time" => {
                let (minutes, rest) = next_word(rest);
                let (seconds, _) = next_word(rest);
                if minutes.is_empty() {
                    return Err(CommandError::MissingArgument("time"));
                }
                Command::Time {
                    minutes: int_from_str(minutes),
                    seconds: int_from_str(seconds),
                }
            }
            "+min" => Command::AddMinute,
            "-min" => Command::SubMinute,
            "board" => Command::Route(Route::Board),
            "admin" => Command::Route(Route::Admin),
            "route" => Command::Route(Route::from_fragment(rest)),
            "fullscreen" | "f" => Command::Fullscreen,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(keyword.to_string())),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn test_simple_keywords() {
        assert_eq!(parse("start"), Ok(Command::Start));
        assert_eq!(parse("PAUSE"), Ok(Command::Pause));
        assert_eq!(parse("  toggle  "), Ok(Command::Toggle));
        assert_eq!(parse("space"), Ok(Command::Toggle));
        assert_eq!(parse("stop"), Ok(Command::Stop));
        assert_eq!(parse("zero"), Ok(Command::Zero));
        assert_eq!(parse("R"), Ok(Command::Zero));
        assert_eq!(parse("swap"), Ok(Command::Swap));
        assert_eq!(parse("+min"), Ok(Command::AddMinute));
        assert_eq!(parse("-min"), Ok(Command::SubMinute));
        assert_eq!(parse("show"), Ok(Command::Show));
        assert_eq!(parse(""), Ok(Command::Show));
        assert_eq!(parse("help"), Ok(Command::Help));
        assert_eq!(parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_score() {
        assert_eq!(
            parse("1"),
            Ok(Command::Score {
                side: Side::A,
                delta: 1
            })
        );
        assert_eq!(
            parse("2"),
            Ok(Command::Score {
                side: Side::B,
                delta: 1
            })
        );
        assert_eq!(
            parse("score B -3"),
            Ok(Command::Score {
                side: Side::B,
                delta: -3
            })
        );
        assert_eq!(
            parse("score a +2"),
            Ok(Command::Score {
                side: Side::A,
                delta: 2
            })
        );
        assert_eq!(parse("score"), Err(CommandError::MissingArgument("score")));
        assert_eq!(
            parse("score a"),
            Err(CommandError::MissingArgument("score"))
        );
        assert_eq!(
            parse("score c 1"),
            Err(CommandError::InvalidSide("c".to_string()))
        );
        // Non-numeric deltas read as 0
        assert_eq!(
            parse("score a lots"),
            Ok(Command::Score {
                side: Side::A,
                delta: 0
            })
        );
    }

    #[test]
    fn test_name_keeps_the_text() {
        assert_eq!(
            parse("name a   Eagles  FC"),
            Ok(Command::Name {
                side: Side::A,
                text: "Eagles  FC".to_string()
            })
        );
        assert_eq!(
            parse("name b"),
            Ok(Command::Name {
                side: Side::B,
                text: String::new()
            })
        );
        assert_eq!(parse("name"), Err(CommandError::MissingArgument("name")));
    }

    #[test]
    fn test_period() {
        assert_eq!(parse("period 2º"), Ok(Command::Period("2º".to_string())));
        assert_eq!(
            parse("period Half Time"),
            Ok(Command::Period("Half Time".to_string()))
        );
        assert_eq!(parse("period"), Ok(Command::Period(String::new())));
    }

    #[test]
    fn test_reset() {
        assert_eq!(
            parse("reset names"),
            Ok(Command::Reset(ResetScope::Names))
        );
        assert_eq!(
            parse("reset Scores"),
            Ok(Command::Reset(ResetScope::Scores))
        );
        assert_eq!(parse("reset all"), Ok(Command::Reset(ResetScope::All)));
        assert_eq!(parse("reset"), Err(CommandError::MissingArgument("reset")));
        assert_eq!(
            parse("reset timer"),
            Err(CommandError::InvalidResetScope("timer".to_string()))
        );
    }

    #[test]
    fn test_time_is_lenient() {
        assert_eq!(
            parse("time 2 30"),
            Ok(Command::Time {
                minutes: 2,
                seconds: 30
            })
        );
        assert_eq!(
            parse("time 5"),
            Ok(Command::Time {
                minutes: 5,
                seconds: 0
            })
        );
        assert_eq!(
            parse("time 3min 7s"),
            Ok(Command::Time {
                minutes: 3,
                seconds: 7
            })
        );
        assert_eq!(
            parse("time -1 x"),
            Ok(Command::Time {
                minutes: -1,
                seconds: 0
            })
        );
        assert_eq!(parse("time"), Err(CommandError::MissingArgument("time")));
    }

    #[test]
    fn test_routes() {
        assert_eq!(parse("board"), Ok(Command::Route(Route::Board)));
        assert_eq!(parse("admin"), Ok(Command::Route(Route::Admin)));
        assert_eq!(parse("route #admin"), Ok(Command::Route(Route::Admin)));
        assert_eq!(parse("route #board"), Ok(Command::Route(Route::Board)));
        assert_eq!(parse("route whatever"), Ok(Command::Route(Route::Board)));
        assert_eq!(parse("route"), Ok(Command::Route(Route::Board)));
    }

    #[test]
    fn test_fullscreen() {
        assert_eq!(parse("fullscreen"), Ok(Command::Fullscreen));
        assert_eq!(parse("F"), Ok(Command::Fullscreen));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            parse("zoom"),
            Err(CommandError::Unknown("zoom".to_string()))
        );
        assert_eq!(
            parse("\u{FFFD}\u{FFFD}").unwrap_err().to_string(),
            "Unknown command `\u{FFFD}\u{FFFD}`, type `help` to list the commands"
        );
    }
}
