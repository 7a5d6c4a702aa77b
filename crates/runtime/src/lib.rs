mod config;
pub mod logging;
pub mod platform;

pub use config::{
    BASE_DIR_KEY, BASE_PATH_ENV, CASE_INSENSITIVE_ENV, FILE_NAME_MAX, PROGRAM_LOG_LEVEL,
    PROGRAM_NAME, default_base_path, platform_case_insensitive,
};

pub use logging::init;
pub use platform::{set_case_correct, should_case_correct};
