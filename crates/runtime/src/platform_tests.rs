use super::*;
use serial_test::serial;

#[test]
#[serial]
fn override_wins_over_env() {
    unsafe { std::env::set_var(CASE_INSENSITIVE_ENV, "0") };

    set_case_correct(Some(true));
    assert!(should_case_correct());

    set_case_correct(Some(false));
    assert!(!should_case_correct());

    set_case_correct(None);
    unsafe { std::env::remove_var(CASE_INSENSITIVE_ENV) };
}

#[test]
#[serial]
fn env_used_when_no_override() {
    set_case_correct(None);

    let cases: &[(Option<&str>, bool)] = &[
        (Some("1"), true),
        (Some("false"), false),
        (Some("garbage"), platform_case_insensitive()),
        (None, platform_case_insensitive()),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(CASE_INSENSITIVE_ENV, v) },
            None => unsafe { std::env::remove_var(CASE_INSENSITIVE_ENV) },
        }

        assert_eq!(
            should_case_correct(),
            *expected,
            "env {:?} should yield {}",
            value,
            expected
        );
    }

    unsafe { std::env::remove_var(CASE_INSENSITIVE_ENV) };
}
