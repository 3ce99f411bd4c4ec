//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `splitup_core` linkage.
//! - Print the grid shape for an optional total cell count argument.

use std::process::ExitCode;

fn main() -> ExitCode {
    println!("splitup_core ping={}", splitup_core::ping());
    println!("splitup_core version={}", splitup_core::core_version());

    let Some(raw) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match raw.trim().parse::<u32>() {
        Ok(total) => {
            let dims = splitup_core::dimensions(total);
            println!(
                "splitup_core total={total} rows={} columns={}",
                dims.rows, dims.columns
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("invalid total cell count `{raw}`: {err}");
            ExitCode::FAILURE
        }
    }
}
