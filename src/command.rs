//! Line parsing for the interactive prompt. A leading `/` marks a command;
//! anything else is text to speak.

use std::ops::RangeInclusive;

use crate::request::{PITCH_RANGE, SPEED_RANGE, VOLUME_RANGE};

#[derive(Debug, PartialEq)]
pub enum Command<'a> {
    Say(&'a str),
    Engines,
    Voices,
    Engine(&'a str),
    Voice(&'a str),
    Speed(f32),
    Pitch(f32),
    Volume(f32),
    Reload,
    Download,
    Status,
    Help,
    Quit,
    Invalid(String),
}

/// `None` for blank lines, which the prompt silently ignores.
pub fn parse(line: &str) -> Option<Command<'_>> {
    let line = line.trim();

    if line.is_empty() {
        return None;
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Say(line));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match (name, arg) {
        ("engines", _) => Command::Engines,
        ("voices", _) => Command::Voices,
        ("engine", "") => Command::Invalid("Usage: /engine <id>".to_string()),
        ("engine", id) => Command::Engine(id),
        ("voice", "") => Command::Invalid("Usage: /voice <id>".to_string()),
        ("voice", id) => Command::Voice(id),
        ("speed", arg) => scale(arg, "speed", &SPEED_RANGE).map_or_else(Command::Invalid, Command::Speed),
        ("pitch", arg) => scale(arg, "pitch", &PITCH_RANGE).map_or_else(Command::Invalid, Command::Pitch),
        ("volume", arg) => scale(arg, "volume", &VOLUME_RANGE).map_or_else(Command::Invalid, Command::Volume),
        ("reload", _) => Command::Reload,
        ("download", _) => Command::Download,
        ("status", _) => Command::Status,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => Command::Invalid(format!("Unknown command: /{name} (try /help)")),
    };

    Some(command)
}

fn scale(arg: &str, name: &str, range: &RangeInclusive<f32>) -> Result<f32, String> {
    let value: f32 = arg
        .parse()
        .map_err(|_| format!("Usage: /{name} <number>"))?;

    if !range.contains(&value) {
        return Err(format!(
            "{name} must be between {} and {}",
            range.start(),
            range.end()
        ));
    }

    Ok(value)
}

#[test]
fn parse_rule_unit_test() {
    assert_eq!(parse(""), None);
    assert_eq!(parse("   \t"), None);

    assert_eq!(parse("hello world"), Some(Command::Say("hello world")));
    assert_eq!(parse("  hello  "), Some(Command::Say("hello")));

    assert_eq!(parse("/engines"), Some(Command::Engines));
    assert_eq!(parse("/voices"), Some(Command::Voices));
    assert_eq!(parse("/engine gtts"), Some(Command::Engine("gtts")));
    assert_eq!(
        parse("/voice en-US-GuyNeural"),
        Some(Command::Voice("en-US-GuyNeural"))
    );
    assert_eq!(parse("/speed 1.5"), Some(Command::Speed(1.5)));
    assert_eq!(parse("/pitch 0.5"), Some(Command::Pitch(0.5)));
    assert_eq!(parse("/volume 0"), Some(Command::Volume(0.0)));
    assert_eq!(parse("/reload"), Some(Command::Reload));
    assert_eq!(parse("/download"), Some(Command::Download));
    assert_eq!(parse("/status"), Some(Command::Status));
    assert_eq!(parse("/help"), Some(Command::Help));
    assert_eq!(parse("/quit"), Some(Command::Quit));
    assert_eq!(parse("/exit"), Some(Command::Quit));

    assert_eq!(
        parse("/engine"),
        Some(Command::Invalid("Usage: /engine <id>".to_string()))
    );
    assert_eq!(
        parse("/speed fast"),
        Some(Command::Invalid("Usage: /speed <number>".to_string()))
    );
    assert_eq!(
        parse("/speed 3"),
        Some(Command::Invalid(
            "speed must be between 0.5 and 2".to_string()
        ))
    );
    assert_eq!(
        parse("/volume -1"),
        Some(Command::Invalid(
            "volume must be between 0 and 2".to_string()
        ))
    );
    assert!(matches!(parse("/nope"), Some(Command::Invalid(_))));
}
