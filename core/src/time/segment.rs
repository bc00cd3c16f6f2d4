use crate::time::{error::TimeError, Meter, Seconds, Tempo};

/// A region of the timeline with a constant tempo and number of beats per bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoSegment {
  start_time: Seconds,
  tempo: Tempo,
  beats_per_bar: u32,
}

impl TempoSegment {
  pub fn new(start_time: Seconds, tempo: f64, beats_per_bar: u32) -> TempoSegment {
    TempoSegment {
      start_time,
      tempo: Tempo::new(tempo),
      beats_per_bar,
    }
  }

  pub fn get_start_time(&self) -> Seconds {
    self.start_time
  }

  pub fn get_tempo(&self) -> Tempo {
    self.tempo
  }

  pub fn get_beats_per_bar(&self) -> u32 {
    self.beats_per_bar
  }

  pub fn meter(&self, ticks_per_beat: u32) -> Result<Meter, TimeError> {
    Meter::new(self.beats_per_bar, ticks_per_beat)
  }

  pub(crate) fn validate(&self, ticks_per_beat: u32) -> Result<Meter, TimeError> {
    if !self.start_time.is_finite() {
      return Err(TimeError::invalid_configuration(format!(
        "segment start time must be finite, got {}",
        self.start_time
      )));
    }
    self.tempo.validate()?;
    self.meter(ticks_per_beat)
  }
}
