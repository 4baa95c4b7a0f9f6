//! Collecting the table size and player names from a terminal.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

pub fn prompt_player_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<usize> {
    loop {
        write!(output, "Enter number of players: ")?;
        output.flush()?;
        let line = read_line(input)?;
        match line.trim().parse::<usize>() {
            Ok(count) => return Ok(count),
            Err(_) => writeln!(output, "'{}' is not a number. Try again.", line.trim())?,
        }
    }
}

/// Ask for `count` names one by one; blank answers are asked again.
pub fn prompt_player_names<R: BufRead, W: Write>(
    count: usize,
    input: &mut R,
    output: &mut W,
) -> Result<Vec<String>> {
    writeln!(output, "Please enter {count} player names:")?;
    let mut names = Vec::with_capacity(count);
    for index in 1..=count {
        loop {
            write!(output, "  Player {index} name: ")?;
            output.flush()?;
            let name = read_line(input)?.trim().to_string();
            if !name.is_empty() {
                names.push(name);
                break;
            }
            writeln!(output, "Name cannot be empty. Try again.")?;
        }
    }
    Ok(names)
}

/// Split a comma-separated `--names` value, dropping blanks.
pub fn parse_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from terminal")?;
    if read == 0 {
        bail!(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line)
}
