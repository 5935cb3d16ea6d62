use std::io::{BufRead, Write};

/// Asks the user to approve a destructive action.
pub trait Confirm {
    /// Returns `true` only if the user approved `prompt`.
    fn confirm(
        &mut self,
        prompt: &str,
    ) -> bool;
}

/// Answers every prompt with a fixed value.
///
/// Used for `--yes` runs and when confirmation is turned off in the config.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(
        &mut self,
        prompt: &str,
    ) -> bool {
        tracing::debug!(prompt, answer = self.0, "confirmation answered automatically");
        self.0
    }
}

/// Prompts with `[y/N]` on a terminal-like reader/writer pair.
///
/// Anything other than `y` or `yes` (case-insensitive) declines, including
/// end of input and I/O failures.
pub struct TerminalConfirm<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> TerminalConfirm<'a, R, W> {
    pub fn new(
        input: &'a mut R,
        output: &'a mut W,
    ) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<'_, R, W> {
    fn confirm(
        &mut self,
        prompt: &str,
    ) -> bool {
        if let Err(error) = write!(self.output, "{prompt} [y/N] ").and_then(|_| self.output.flush())
        {
            tracing::warn!(?error, "could not write confirmation prompt");
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(error) => {
                tracing::warn!(?error, "could not read confirmation answer");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
