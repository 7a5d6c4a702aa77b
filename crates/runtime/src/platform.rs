//! Process-wide platform switches read by the file manager.

use std::sync::atomic::{AtomicU8, Ordering};

use log::debug;

use crate::config::{CASE_INSENSITIVE_ENV, parse_flag, platform_case_insensitive};

const UNSET: u8 = 0;
const SENSITIVE: u8 = 1;
const INSENSITIVE: u8 = 2;

static CASE_OVERRIDE: AtomicU8 = AtomicU8::new(UNSET);

fn case_insensitive_from_env() -> Option<bool> {
    std::env::var(CASE_INSENSITIVE_ENV)
        .ok()
        .and_then(|v| parse_flag(&v))
}

/// Whether file names should be compared case-insensitively ("case-correct" mode).
///
/// Resolution order: runtime override, `DIRCACHE_CASE_INSENSITIVE`, platform default.
pub fn should_case_correct() -> bool {
    match CASE_OVERRIDE.load(Ordering::Acquire) {
        SENSITIVE => false,
        INSENSITIVE => true,
        _ => case_insensitive_from_env().unwrap_or_else(platform_case_insensitive),
    }
}

/// Override the case-correct flag for the rest of the process.
/// `None` clears the override and falls back to env/platform defaults.
pub fn set_case_correct(value: Option<bool>) {
    let raw = match value {
        Some(true) => INSENSITIVE,
        Some(false) => SENSITIVE,
        None => UNSET,
    };
    debug!("[platform] case-correct override set to {:?}", value);
    CASE_OVERRIDE.store(raw, Ordering::Release);
}

#[cfg(test)]
#[path = "platform_tests.rs"]
mod tests;
