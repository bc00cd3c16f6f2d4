use crate::time::error::TimeError;

/// The (beats per bar, ticks per beat) context needed to interpret a musical position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meter {
  beats_per_bar: u32,
  ticks_per_beat: u32,
}

impl Meter {
  pub fn new(beats_per_bar: u32, ticks_per_beat: u32) -> Result<Meter, TimeError> {
    if beats_per_bar == 0 {
      return Err(TimeError::invalid_configuration(
        "beats per bar must be positive",
      ));
    }
    if ticks_per_beat == 0 {
      return Err(TimeError::invalid_configuration(
        "ticks per beat must be positive",
      ));
    }
    Ok(Meter {
      beats_per_bar,
      ticks_per_beat,
    })
  }

  pub fn get_beats_per_bar(&self) -> u32 {
    self.beats_per_bar
  }

  pub fn get_ticks_per_beat(&self) -> u32 {
    self.ticks_per_beat
  }

  pub fn ticks_per_bar(&self) -> u64 {
    u64::from(self.beats_per_bar) * u64::from(self.ticks_per_beat)
  }
}

#[cfg(test)]
mod test {

  use super::Meter;

  #[test]
  pub fn meter_new() {
    let meter = Meter::new(3, 1024).unwrap();
    assert_eq!(meter.get_beats_per_bar(), 3);
    assert_eq!(meter.get_ticks_per_beat(), 1024);
    assert_eq!(meter.ticks_per_bar(), 3072);
  }

  #[test]
  pub fn meter_rejects_zero() {
    assert!(Meter::new(0, 1024).is_err());
    assert!(Meter::new(4, 0).is_err());
  }
}
