//! `notefold classify`: test a filename against the conflict grammar.

use std::process::ExitCode;

use anyhow::Result;

use notefold_core::classify;

use crate::style;

pub fn run(filename: &str, json: bool) -> Result<ExitCode> {
    match classify(filename) {
        Some(descriptor) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&descriptor)?);
            } else {
                println!("{}", style::header(filename));
                println!("  canonical : {}", descriptor.canonical_file_name());
                println!("  date      : {}", descriptor.date_token);
                println!("  time      : {}", descriptor.time_token);
                println!("  device    : {}", descriptor.device_token);
                if let Some(ts) = descriptor.timestamp() {
                    println!("  timestamp : {}", ts.format("%Y-%m-%d %H:%M:%S"));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!(
                "{}",
                style::warn(&format!("'{filename}' is not a sync-conflict artifact"))
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
