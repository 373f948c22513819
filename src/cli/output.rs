use std::fmt;

use colored::{ColoredString, Colorize};

pub fn info(message: impl fmt::Display) {
    println!("{}", message);
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green().bold(), message);
}

pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow().bold(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red().bold(), message);
}

pub fn section(title: impl fmt::Display) {
    println!("\n{}", title.to_string().bold());
}

/// Applies a member's palette color by name; unknown colors pass through.
pub fn colorize(text: &str, color: &str) -> ColoredString {
    match color {
        "cyan" => text.cyan(),
        "magenta" => text.magenta(),
        "green" => text.green(),
        "yellow" => text.yellow(),
        "blue" => text.blue(),
        "red" => text.red(),
        _ => text.normal(),
    }
}

/// Renders a plain-text table with padded columns and a header rule.
/// Cells must be uncolored; ANSI codes would break width calculation.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  ").bold());
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .take(columns)
            .map(|(i, cell)| {
                if i == 0 {
                    format!("{:<width$}", cell, width = widths[i])
                } else {
                    format!("{:>width$}", cell, width = widths[i])
                }
            })
            .collect();
        println!("{}", line.join("  "));
    }
}
