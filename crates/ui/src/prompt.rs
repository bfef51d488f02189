//! Line-oriented rendering of a [`ConfirmDialog`] for terminals.

use std::io::{self, BufRead, Write};

use crate::dialog::{ConfirmDialog, ConfirmOutcome};

pub fn render<W: Write>(dialog: &ConfirmDialog, out: &mut W) -> io::Result<()> {
    writeln!(out, "== {} ==", dialog.title())?;
    writeln!(out, "{}", dialog.message())?;
    if !dialog.details().is_empty() {
        writeln!(out, "{}", dialog.details())?;
    }
    if let Some(error) = dialog.error_message() {
        writeln!(out, "! {}", error)?;
    }
    Ok(())
}

/// Drive an open dialog from `input` until it closes.
///
/// When the dialog shows an input, one line is read as the value and a second
/// line as the decision. Returns the confirmed value, or `None` on cancel or
/// end of input.
pub fn run<R: BufRead, W: Write>(
    dialog: &mut ConfirmDialog,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<String>> {
    while dialog.is_visible() {
        render(dialog, out)?;

        if dialog.shows_input() {
            let label = if dialog.input_placeholder().is_empty() {
                "Value"
            } else {
                dialog.input_placeholder()
            };
            write!(out, "{}: ", label)?;
            out.flush()?;

            match read_line(input)? {
                Some(value) => dialog.set_input_value(value),
                None => {
                    dialog.cancel();
                    return Ok(None);
                }
            }
        }

        write!(out, "{} / {} [y/N]: ", dialog.confirm_text(), dialog.cancel_text())?;
        out.flush()?;

        let answer = match read_line(input)? {
            Some(answer) => answer,
            None => {
                dialog.cancel();
                return Ok(None);
            }
        };

        if !is_affirmative(&answer, dialog.confirm_text()) {
            dialog.cancel();
            return Ok(None);
        }

        if let ConfirmOutcome::Confirmed(value) = dialog.confirm() {
            return Ok(Some(value));
        }
    }

    Ok(None)
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn is_affirmative(answer: &str, confirm_text: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y")
        || answer.eq_ignore_ascii_case("yes")
        || answer.eq_ignore_ascii_case(confirm_text)
}
