//! Interactive yes/no prompt.
//!
//! `prompt_yes_no` talks to the process console. `prompt_yes_no_with` runs the
//! same loop over any reader and writers, which is what the tests use.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::error::PromptError;

pub const RETRY_MESSAGE: &str = "Please enter a yes/no response.";

/// A parsed yes/no token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Parse `y`, `yes`, `n` or `no` in any case. Anything else is `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "y" | "yes" => Some(Answer::Yes),
            "n" | "no" => Some(Answer::No),
            _ => None,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

impl FromStr for Answer {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Answer::parse(s).ok_or_else(|| PromptError::InvalidDefault(s.to_string()))
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => f.write_str("yes"),
            Answer::No => f.write_str("no"),
        }
    }
}

/// The text shown before each read.
///
/// With a default, trailing whitespace and then trailing colons are stripped
/// and `[default]:` is appended, keeping the default's original spelling.
pub fn display_prompt(prompt: &str, default: Option<&str>) -> String {
    match default {
        Some(default) => format!("{}[{default}]:", prompt.trim_end().trim_end_matches(':')),
        None => prompt.to_string(),
    }
}

/// Ask a yes/no question on the console until a valid answer is given.
pub fn prompt_yes_no(prompt: &str, default: Option<&str>) -> Result<bool, PromptError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    prompt_yes_no_with(
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
        prompt,
        default,
    )
}

/// `prompt_yes_no` over explicit streams: the prompt goes to `output`, the
/// retry message to `errors`.
pub fn prompt_yes_no_with<R, W, E>(
    input: &mut R,
    output: &mut W,
    errors: &mut E,
    prompt: &str,
    default: Option<&str>,
) -> Result<bool, PromptError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let fallback = default.map(str::parse::<Answer>).transpose()?;
    let shown = display_prompt(prompt, default);

    let mut line = String::new();
    loop {
        output.write_all(shown.as_bytes())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(PromptError::InputClosed);
        }
        let choice = strip_line_ending(&line);

        if let Some(answer) = Answer::parse(choice) {
            return Ok(answer.is_yes());
        }
        if choice.is_empty() {
            if let Some(answer) = fallback {
                return Ok(answer.is_yes());
            }
        }

        writeln!(errors, "{RETRY_MESSAGE}")?;
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Session {
        result: Result<bool, PromptError>,
        output: String,
        errors: String,
    }

    fn run(input: &str, prompt: &str, default: Option<&str>) -> Session {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let mut errors = Vec::new();
        let result = prompt_yes_no_with(&mut reader, &mut output, &mut errors, prompt, default);
        Session {
            result,
            output: String::from_utf8(output).unwrap(),
            errors: String::from_utf8(errors).unwrap(),
        }
    }

    #[test]
    fn empty_input_takes_affirmative_default() {
        for default in ["y", "Y", "yes", "YES", "yEs"] {
            let s = run("\n", "Continue?", Some(default));
            assert!(s.result.unwrap(), "default {default}");
            assert!(s.errors.is_empty());
        }
    }

    #[test]
    fn empty_input_takes_negative_default() {
        for default in ["n", "N", "no", "NO", "nO"] {
            let s = run("\n", "Continue?", Some(default));
            assert!(!s.result.unwrap(), "default {default}");
        }
    }

    #[test]
    fn explicit_answer_overrides_default() {
        assert!(!run("no\n", "Continue?", Some("yes")).result.unwrap());
        assert!(run("Y\n", "Continue?", Some("n")).result.unwrap());
    }

    #[test]
    fn empty_input_without_default_reprompts() {
        let s = run("\n\nyes\n", "Continue? ", None);
        assert!(s.result.unwrap());
        assert_eq!(s.errors.matches(RETRY_MESSAGE).count(), 2);
        assert_eq!(s.output, "Continue? Continue? Continue? ");
    }

    #[test]
    fn invalid_input_is_rejected_before_valid_answer() {
        let s = run("maybe\nnope\nN\n", "Proceed: ", Some("y"));
        assert!(!s.result.unwrap());
        assert_eq!(s.errors, format!("{RETRY_MESSAGE}\n{RETRY_MESSAGE}\n"));
    }

    #[test]
    fn whitespace_is_not_trimmed_from_answers() {
        let s = run(" y\ny\n", "Ok?", None);
        assert!(s.result.unwrap());
        assert_eq!(s.errors.matches(RETRY_MESSAGE).count(), 1);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        assert!(run("yes\r\n", "Ok?", None).result.unwrap());
        assert!(run("\r\n", "Ok?", Some("y")).result.unwrap());
    }

    #[test]
    fn final_line_without_newline_is_read() {
        assert!(!run("n", "Ok?", None).result.unwrap());
    }

    #[test]
    fn eof_before_answer_is_input_closed() {
        let s = run("what\n", "Ok?", None);
        assert!(matches!(s.result, Err(PromptError::InputClosed)));
        assert_eq!(s.errors.matches(RETRY_MESSAGE).count(), 1);
    }

    #[test]
    fn invalid_default_fails_before_prompting() {
        let s = run("y\n", "Ok?", Some("sure"));
        assert!(matches!(s.result, Err(PromptError::InvalidDefault(ref d)) if d == "sure"));
        assert!(s.output.is_empty());
    }

    #[test]
    fn empty_default_is_invalid() {
        let s = run("\n", "Ok?", Some(""));
        assert!(matches!(s.result, Err(PromptError::InvalidDefault(_))));
    }

    #[test]
    fn display_prompt_strips_whitespace_then_colons() {
        assert_eq!(display_prompt("Overwrite file: ", Some("Y")), "Overwrite file[Y]:");
        assert_eq!(display_prompt("Overwrite file:: \t", Some("no")), "Overwrite file[no]:");
        assert_eq!(display_prompt("Overwrite file : ", Some("n")), "Overwrite file [n]:");
        assert_eq!(display_prompt("Overwrite file: ", None), "Overwrite file: ");
    }

    #[test]
    fn answer_parses_case_insensitively() {
        assert_eq!("YeS".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!(Answer::parse("N"), Some(Answer::No));
        assert_eq!(Answer::parse("yess"), None);
        assert_eq!(Answer::No.to_string(), "no");
    }
}
