//! Running the external command.
//!
//! The command gets the edited text and the current image as arguments, plus
//! a trailing `1` when it is being asked for a tab completion. Each line it
//! prints becomes one line of [`CommandOutput`].
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// The bell character. An output whose second line starts with it reports an
/// error in the command text and keeps the user editing.
pub const BEL: char = '\u{7}';

/// Lines produced by one run of the external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Output lines, without line terminators. Line 0 often echoes or
    /// completes the typed command.
    pub lines: Vec<String>,
    /// Did the command report a tag error?
    pub tag_error: bool,
}

impl CommandOutput {
    /// Build output from a list of lines, detecting a bell on line 1.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let tag_error = lines.get(1).is_some_and(|l| l.starts_with(BEL));
        Self { lines, tag_error }
    }

    /// Split raw stdout bytes into output lines.
    pub fn parse(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        Self::from_lines(text.lines().map(|l| l.trim_end_matches('\r')))
    }

    /// Did the command print nothing?
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// If line 1 starts with a bell, strip it and return true.
    pub(crate) fn take_bell(&mut self) -> bool {
        if let Some(line) = self.lines.get_mut(1)
            && line.starts_with(BEL)
        {
            line.remove(0);
            return true;
        }
        false
    }
}

/// Something that can run the external command.
pub trait CommandRunner {
    /// Run the command for `text` on `image`. When `tab_probe` is set the
    /// command is asked for a completion of `text` instead.
    fn run(&mut self, text: &str, image: &str, tab_probe: bool) -> Result<CommandOutput>;
}

/// Runs an external program and collects its standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    /// Program name or path.
    program: String,
}

impl ShellCommand {
    /// A runner for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The argument list for one run.
    fn args<'a>(text: &'a str, image: &'a str, tab_probe: bool) -> Vec<&'a str> {
        let mut args = vec![text, image];
        if tab_probe {
            args.push("1");
        }
        args
    }
}

impl CommandRunner for ShellCommand {
    fn run(&mut self, text: &str, image: &str, tab_probe: bool) -> Result<CommandOutput> {
        debug!(program = %self.program, text, image, tab_probe, "running command");
        let out = Command::new(&self.program)
            .args(Self::args(text, image, tab_probe))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| Error::Command(format!("{}: {e}", self.program)))?;
        Ok(CommandOutput::parse(&out.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_output() {
        let o = CommandOutput::parse(b"one\r\ntwo\n\nfour");
        assert_eq!(o.lines, vec!["one", "two", "", "four"]);
        assert!(!o.tag_error);
        assert!(CommandOutput::parse(b"").is_empty());
        assert_eq!(CommandOutput::parse(b"\xffa\n").lines, vec!["\u{fffd}a"]);
    }

    #[test]
    fn bell_on_second_line() {
        let mut o = CommandOutput::from_lines(["tag:x", "\u{7}unknown tags (x)"]);
        assert!(o.tag_error);
        assert!(o.take_bell());
        assert_eq!(o.lines[1], "unknown tags (x)");
        assert!(!o.take_bell());

        let o = CommandOutput::from_lines(["\u{7}x"]);
        assert!(!o.tag_error);
    }

    #[test]
    fn probe_argument() {
        assert_eq!(ShellCommand::args("a", "i.png", false), vec!["a", "i.png"]);
        assert_eq!(ShellCommand::args("", "i.png", true), vec!["", "i.png", "1"]);
    }

    #[test]
    fn missing_program() {
        let mut c = ShellCommand::new("/nonexistent/qview-command");
        assert!(matches!(c.run("x", "y", false), Err(Error::Command(_))));
    }
}
