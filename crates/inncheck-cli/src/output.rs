//! Human and JSON output
//!
//! Results go to stdout; logs go to stderr. With `--json` every command
//! prints a single `{"ok": true, "data": ...}` document.

use serde::Serialize;

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

/// Print a list, one row per item in human mode
///
/// # Errors
/// JSON serialization failure.
pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

/// Print a single result
///
/// # Errors
/// JSON serialization failure.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    render: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", render(&data));
    }
    Ok(())
}
