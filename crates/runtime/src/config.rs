use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "dircache";
pub const PROGRAM_LOG_LEVEL: &str = "DIRCACHE_LOG_LEVEL";

/// Overrides the directory the application treats as its base/working directory.
pub const BASE_PATH_ENV: &str = "DIRCACHE_BASE_PATH";

/// `1`/`true` forces case-insensitive file name comparison, `0`/`false` forces
/// case-sensitive comparison. Unset falls back to the platform default.
pub const CASE_INSENSITIVE_ENV: &str = "DIRCACHE_CASE_INSENSITIVE";

/// Upper bound (in bytes, including the historical terminator slot) for cached
/// directory paths and entry names. Longer strings are truncated.
pub const FILE_NAME_MAX: usize = 300;

/// Cache key of the base directory, the only directory that receives
/// incremental maintenance.
pub const BASE_DIR_KEY: &str = ".";

/// Default base directory: `DIRCACHE_BASE_PATH` when set, otherwise the
/// current working directory.
pub fn default_base_path() -> PathBuf {
    if let Some(dir) = std::env::var_os(BASE_PATH_ENV)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Parse a boolean-ish environment value. Unknown values yield `None`.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Whether the host filesystem is usually case-insensitive.
pub const fn platform_case_insensitive() -> bool {
    cfg!(any(target_os = "windows", target_os = "macos"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
