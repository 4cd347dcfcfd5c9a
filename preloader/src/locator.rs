// Installed emulator detection
//
// Distribution packages put the emulator on the search path. On non-Windows
// hosts `which` tells us where, and its first output line pre-fills the
// binary field.

use std::io::{self, BufRead};
use std::process::{Command, Stdio};

use crate::error::PreloadError;
use crate::flavor::{Flavor, Platform};

const LOCATOR: &str = "which";

/// First line printed by `which <flavor>`, if any. Always `None` on Windows.
pub fn detect_installed(platform: Platform, flavor: Flavor) -> Result<Option<String>, PreloadError> {
    if platform == Platform::Windows {
        return Ok(None);
    }
    run_locator(LOCATOR, flavor.key()).map_err(PreloadError::LocatorProbeFailed)
}

fn run_locator(program: &str, name: &str) -> io::Result<Option<String>> {
    let output = Command::new(program)
        .arg(name)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;
    first_line(output.stdout.as_slice())
}

fn first_line(mut reader: impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim_end_matches(['\r', '\n']);
    Ok(Some(line.to_string()))
}
