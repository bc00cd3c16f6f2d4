use crate::time::{error::TimeError, Seconds};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Tempo in beats per minute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo(f64);

impl Tempo {
  pub fn new(bpm: f64) -> Tempo {
    Tempo(bpm)
  }

  pub fn get_value(&self) -> f64 {
    self.0
  }

  pub fn is_valid(&self) -> bool {
    self.0.is_finite() && self.0 > 0.0
  }

  pub fn validate(self) -> Result<Tempo, TimeError> {
    if self.is_valid() {
      Ok(self)
    } else {
      Err(TimeError::invalid_configuration(format!(
        "tempo must be a positive number of beats per minute, got {}",
        self.0
      )))
    }
  }

  pub fn seconds_per_beat(&self) -> Seconds {
    SECONDS_PER_MINUTE / self.0
  }

  /// Number of beats elapsed in the given duration
  pub fn beats_in(&self, seconds: Seconds) -> f64 {
    seconds * self.0 / SECONDS_PER_MINUTE
  }

  /// Duration of the given number of beats
  pub fn seconds_for(&self, beats: f64) -> Seconds {
    beats * self.seconds_per_beat()
  }
}

impl From<Tempo> for f64 {
  fn from(item: Tempo) -> Self {
    item.0
  }
}

#[cfg(test)]
mod test {

  use super::Tempo;

  #[test]
  pub fn tempo_new() {
    let tempo = Tempo::new(120.0);
    assert_eq!(tempo.get_value(), 120.0);
    assert_eq!(f64::from(tempo), 120.0);
  }

  #[test]
  pub fn seconds_per_beat() {
    assert_eq!(Tempo::new(120.0).seconds_per_beat(), 0.5);
    assert_eq!(Tempo::new(60.0).seconds_per_beat(), 1.0);
  }

  #[test]
  pub fn beats_in() {
    assert_eq!(Tempo::new(120.0).beats_in(1.5), 3.0);
    assert_eq!(Tempo::new(60.0).beats_in(7.5), 7.5);
  }

  #[test]
  pub fn seconds_for() {
    assert_eq!(Tempo::new(120.0).seconds_for(3.0), 1.5);
    assert_eq!(Tempo::new(90.0).seconds_for(3.0), 2.0);
  }

  #[test]
  pub fn validate() {
    assert!(Tempo::new(120.0).validate().is_ok());
    assert!(Tempo::new(0.0).validate().is_err());
    assert!(Tempo::new(-60.0).validate().is_err());
    assert!(Tempo::new(std::f64::NAN).validate().is_err());
    assert!(Tempo::new(std::f64::INFINITY).validate().is_err());
  }
}
