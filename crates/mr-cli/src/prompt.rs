//! Interactive run-mode selection
//!
//! Menus, prompts and retry messages go to stderr so stdout stays clean
//! for the run report.

use anyhow::{bail, Result};
use dialoguer::Input;
use mr_core::{CoreError, RunMode, RunModeRejection};
use std::io::{self, BufRead, IsTerminal, Write};

const INVALID_NUMBER: &str = "Invalid input. Please enter a number.";
const INVALID_OPTION: &str = "Invalid option. Please enter 1 or 2.";

/// Ask the user which run mode to use, re-asking until the answer is valid
pub(crate) fn select_mode() -> Result<RunMode> {
    if io::stdin().is_terminal() {
        select_mode_interactive()
    } else {
        let stdin = io::stdin();
        read_mode(stdin.lock(), io::stderr().lock())
    }
}

fn menu() -> String {
    RunMode::ALL
        .iter()
        .map(|mode| format!("{} - {}", mode.choice(), mode.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn rejection(err: &CoreError) -> &'static str {
    match err {
        CoreError::InvalidRunMode {
            reason: RunModeRejection::NotANumber,
            ..
        } => INVALID_NUMBER,
        _ => INVALID_OPTION,
    }
}

fn select_mode_interactive() -> Result<RunMode> {
    eprintln!("{}", menu());

    let answer: String = Input::new()
        .with_prompt("Enter option")
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            RunMode::from_choice(input)
                .map(|_| ())
                .map_err(|e| rejection(&e))
        })
        .interact_text()?;

    Ok(RunMode::from_choice(&answer)?)
}

/// Line-based prompt loop used when stdin is not a terminal.
///
/// Fails if input ends before a valid choice is read.
pub(crate) fn read_mode<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<RunMode> {
    writeln!(output, "{}", menu())?;

    loop {
        write!(output, "Enter option: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("No run mode selected: input closed");
        }

        match RunMode::from_choice(&line) {
            Ok(mode) => return Ok(mode),
            Err(e) => writeln!(output, "{}", rejection(&e))?,
        }
    }
}
