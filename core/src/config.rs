use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use crate::time::{Seconds, DEFAULT_TICKS_PER_BEAT};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Segment {
  pub start_time: Seconds,
  pub tempo: f64,
  pub beats_per_bar: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Timeline {
  pub ticks_per_beat: u32,
  pub segments: Vec<Segment>,
}

impl Default for Timeline {
  fn default() -> Timeline {
    Timeline {
      ticks_per_beat: DEFAULT_TICKS_PER_BEAT,
      segments: Vec::new(),
    }
  }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
  pub timeline: Timeline,
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  #[allow(clippy::should_implement_trait)]
  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}

#[cfg(test)]
mod test {

  use super::{Config, Segment};
  use crate::time::{MusicalPosition, TimeError, TimelineConverter};

  const TIMELINE: &str = r#"
    [timeline]
    ticks_per_beat = 960

    [[timeline.segments]]
    start_time = 0.0
    tempo = 60.0
    beats_per_bar = 4

    [[timeline.segments]]
    start_time = 4.0
    tempo = 60.0
    beats_per_bar = 3
  "#;

  #[test]
  pub fn from_str() {
    let config = Config::from_str(TIMELINE).unwrap();
    assert_eq!(config.timeline.ticks_per_beat, 960);
    assert_eq!(
      config.timeline.segments,
      vec![
        Segment {
          start_time: 0.0,
          tempo: 60.0,
          beats_per_bar: 4,
        },
        Segment {
          start_time: 4.0,
          tempo: 60.0,
          beats_per_bar: 3,
        },
      ]
    );
  }

  #[test]
  pub fn defaults() {
    let config = Config::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.timeline.ticks_per_beat, 1024);
    assert!(config.timeline.segments.is_empty());
  }

  #[test]
  pub fn rejects_incomplete_segments() {
    let content = r#"
      [[timeline.segments]]
      start_time = 0.0
      tempo = 120.0
    "#;
    assert!(Config::from_str(content).is_err());
  }

  #[test]
  pub fn from_missing_file() {
    assert!(Config::from_file("/nonexistent/timeline.toml").is_err());
  }

  #[test]
  pub fn converter_from_config() {
    let config = Config::from_str(TIMELINE).unwrap();
    let converter = TimelineConverter::from_config(&config).unwrap();
    assert_eq!(converter.ticks_per_beat(), 960);
    assert_eq!(converter.time_to_position(5.5), MusicalPosition::new(1, 1, 480));
  }

  #[test]
  pub fn converter_from_invalid_config() {
    let mut config = Config::from_str(TIMELINE).unwrap();
    config.timeline.segments.reverse();
    match TimelineConverter::from_config(&config) {
      Err(TimeError::OutOfOrderSegments { index: 1, .. }) => {}
      other => panic!("unexpected result {:?}", other),
    }
  }
}
