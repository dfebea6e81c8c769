//! # Commands Module
//!
//! One function per subcommand, plus the interactive menu.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (output format, prompts)
//! ├── product.rs  ◄─── add, remove, show
//! ├── report.rs   ◄─── list, summary, dashboard, export
//! ├── status.rs   ◄─── database health check
//! └── menu.rs     ◄─── numbered interactive loop
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stockledger list --json                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  lib::execute ── builds InventoryState + AppConfig                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::report::list(&state, &config, format, &mut out)             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  report::row_view(state.products())  ◄── pure, from stockledger-core   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  OutputFormat::Table ──► render::product_table                         │
//! │  OutputFormat::Json  ──► serde_json::to_string_pretty                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands write to any `Write` and read confirmations from any `BufRead`,
//! so tests drive them with in-memory buffers.

pub mod menu;
pub mod product;
pub mod report;
pub mod status;

use serde::Serialize;
use std::io::{BufRead, Write};

use crate::error::CliResult;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Writes `value` as JSON, or the text produced by `text`.
pub fn emit<T, W, F>(out: &mut W, format: OutputFormat, value: &T, text: F) -> CliResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        OutputFormat::Table => writeln!(out, "{}", text())?,
    }
    Ok(())
}

/// Prints `label`, then reads one line.
///
/// Returns `None` at end of input. The trailing newline is stripped.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> CliResult<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

/// Asks a yes/no question. Only `y` or `yes` (any case) confirm;
/// anything else, including end of input, declines.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> CliResult<bool> {
    let answer = prompt(input, out, &format!("{} (y/n): ", question))?;

    Ok(matches!(
        answer.map(|a| a.trim().to_ascii_lowercase()).as_deref(),
        Some("y") | Some("yes")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_strips_newline() {
        let mut input = Cursor::new("Widget\r\nrest\n");
        let mut out = Vec::new();

        let line = prompt(&mut input, &mut out, "Name: ").unwrap();
        assert_eq!(line.as_deref(), Some("Widget"));
        assert_eq!(String::from_utf8(out).unwrap(), "Name: ");
    }

    #[test]
    fn test_prompt_eof() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert_eq!(prompt(&mut input, &mut out, "> ").unwrap(), None);
    }

    #[test]
    fn test_confirm() {
        for (answer, expected) in [
            ("y\n", true),
            ("YES\n", true),
            (" y \n", true),
            ("n\n", false),
            ("\n", false),
            ("maybe\n", false),
            ("", false),
        ] {
            let mut input = Cursor::new(answer);
            let mut out = Vec::new();
            assert_eq!(
                confirm(&mut input, &mut out, "Remove 'Widget'?").unwrap(),
                expected,
                "answer {:?}",
                answer
            );
        }
    }

    #[test]
    fn test_emit_formats() {
        let mut out = Vec::new();
        emit(&mut out, OutputFormat::Json, &vec![1, 2], || "unused".into()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!([1, 2]));

        let mut out = Vec::new();
        emit(&mut out, OutputFormat::Table, &vec![1, 2], || "two items".into()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "two items\n");
    }
}
