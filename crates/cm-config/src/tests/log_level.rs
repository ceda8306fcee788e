use crate::LogLevel;

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::eq;
use log::LevelFilter;

#[test]
fn given_known_level_when_from_str_then_parses() {
    assert_that!(*LogLevel::from_str("debug").unwrap(), eq(LevelFilter::Debug));
    assert_that!(*LogLevel::from_str("WARN").unwrap(), eq(LevelFilter::Warn));
    assert_that!(*LogLevel::from_str("off").unwrap(), eq(LevelFilter::Off));
}

#[test]
fn given_unknown_level_when_from_str_then_falls_back_to_info() {
    assert_that!(
        *LogLevel::from_str("verbose").unwrap(),
        eq(LevelFilter::Info)
    );
}

#[test]
fn given_toml_value_when_deserialized_then_parses() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        level: LogLevel,
    }

    let wrapper: Wrapper = toml::from_str("level = \"trace\"").unwrap();
    assert_that!(*wrapper.level, eq(LevelFilter::Trace));
}
