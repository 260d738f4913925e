//! Interactive title picker.
//!
//! Kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `jm predict` and choose a title" UX

use std::io::{self, BufRead, Write};

use crate::error::AppError;

/// Prompt the user to select one of `titles` on stdin.
///
/// Behavior:
/// - list the titles
/// - accept either a number (from the list) or a typed title (case-insensitive)
/// - `q` cancels
pub fn prompt_for_title(titles: &[String]) -> Result<String, AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    pick_title(titles, &mut stdin.lock(), &mut stdout.lock())
}

fn pick_title<R: BufRead, W: Write>(titles: &[String], input: &mut R, out: &mut W) -> Result<String, AppError> {
    if titles.is_empty() {
        return Err(AppError::new(
            2,
            "No job titles available. Provide one with `jm predict -t <title>`.",
        ));
    }

    let write_err = |e: io::Error| AppError::new(2, format!("Failed to write prompt: {e}"));

    writeln!(out, "Found {} job title(s):", titles.len()).map_err(write_err)?;
    for (idx, title) in titles.iter().enumerate() {
        writeln!(out, "{:>3}) {title}", idx + 1).map_err(write_err)?;
    }

    loop {
        write!(out, "Select a title by number (1-{}) or type one (q to quit): ", titles.len()).map_err(write_err)?;
        out.flush().map_err(write_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a title with `jm predict -t <title>`.",
            ));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }
        if line.is_empty() {
            continue;
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=titles.len()).contains(&choice) {
                return Ok(titles[choice - 1].clone());
            }
            writeln!(out, "Invalid choice: {choice}. Enter a number between 1 and {}.", titles.len())
                .map_err(write_err)?;
            continue;
        }

        match titles.iter().find(|t| t.eq_ignore_ascii_case(line)) {
            Some(title) => return Ok(title.clone()),
            None => {
                writeln!(out, "Unknown title: {line}").map_err(write_err)?;
            }
        }
    }
}
