use std::{cmp::Ordering, convert::TryFrom, fmt, str::FromStr};

use crate::time::{error::TimeError, Meter, TicksTime};

/// A Bar:Beat:Tick position in musical time.
///
/// The triple alone is not normalized: carrying ticks into beats and beats into
/// bars depends on the [`Meter`] it is interpreted with, so every arithmetic
/// operation takes one explicitly. Positions should only be combined when they
/// were produced under the same meter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicalPosition {
  bar: u32,
  beat: u32,
  tick: u32,
}

impl MusicalPosition {
  pub fn new(bar: u32, beat: u32, tick: u32) -> MusicalPosition {
    MusicalPosition { bar, beat, tick }
  }

  pub fn zero() -> MusicalPosition {
    MusicalPosition::new(0, 0, 0)
  }

  /// The last tick of the last representable bar
  pub fn max(meter: Meter) -> MusicalPosition {
    MusicalPosition {
      bar: u32::max_value(),
      beat: meter.get_beats_per_bar() - 1,
      tick: meter.get_ticks_per_beat() - 1,
    }
  }

  /// Tick counts beyond the last representable bar saturate to [`MusicalPosition::max`]
  pub fn from_ticks(ticks_time: TicksTime, meter: Meter) -> MusicalPosition {
    let num_ticks = u64::from(ticks_time);
    let ticks_per_beat = u64::from(meter.get_ticks_per_beat());
    let beats_per_bar = u64::from(meter.get_beats_per_bar());
    let total_beats = num_ticks / ticks_per_beat;
    MusicalPosition::normalized(
      total_beats / beats_per_bar,
      total_beats % beats_per_bar,
      num_ticks % ticks_per_beat,
      meter,
    )
  }

  /// `beat` and `tick` must already be below the meter's beats per bar and ticks per beat
  fn normalized(bar: u64, beat: u64, tick: u64, meter: Meter) -> MusicalPosition {
    match u32::try_from(bar) {
      Ok(bar) => MusicalPosition {
        bar,
        beat: beat as u32,
        tick: tick as u32,
      },
      Err(_) => MusicalPosition::max(meter),
    }
  }

  pub fn get_bar(&self) -> u32 {
    self.bar
  }

  pub fn get_beat(&self) -> u32 {
    self.beat
  }

  pub fn get_tick(&self) -> u32 {
    self.tick
  }

  /// Total number of ticks from the origin under the given meter, saturating at `u64::MAX`
  pub fn flatten(&self, meter: Meter) -> TicksTime {
    let ticks = u128::from(self.bar) * u128::from(meter.ticks_per_bar())
      + u128::from(self.beat) * u128::from(meter.get_ticks_per_beat())
      + u128::from(self.tick);
    TicksTime::new(u64::try_from(ticks).unwrap_or_else(|_| u64::max_value()))
  }

  pub fn add(&self, other: MusicalPosition, meter: Meter) -> MusicalPosition {
    let ticks_per_beat = u64::from(meter.get_ticks_per_beat());
    let beats_per_bar = u64::from(meter.get_beats_per_bar());

    let tick = u64::from(self.tick) + u64::from(other.tick);
    let carry_beat = tick / ticks_per_beat;
    let beat = u64::from(self.beat) + u64::from(other.beat) + carry_beat;
    let carry_bar = beat / beats_per_bar;
    let bar = u64::from(self.bar) + u64::from(other.bar) + carry_bar;

    MusicalPosition::normalized(bar, beat % beats_per_bar, tick % ticks_per_beat, meter)
  }

  /// The distance between both positions, regardless of which one comes first
  pub fn difference(&self, other: MusicalPosition, meter: Meter) -> MusicalPosition {
    let ticks = self.flatten(meter);
    let other_ticks = other.flatten(meter);
    let distance = if ticks >= other_ticks {
      ticks - other_ticks
    } else {
      other_ticks - ticks
    };
    MusicalPosition::from_ticks(distance, meter)
  }
}

impl Ord for MusicalPosition {
  fn cmp(&self, other: &MusicalPosition) -> Ordering {
    self
      .bar
      .cmp(&other.bar)
      .then_with(|| self.beat.cmp(&other.beat))
      .then_with(|| self.tick.cmp(&other.tick))
  }
}

impl PartialOrd for MusicalPosition {
  fn partial_cmp(&self, other: &MusicalPosition) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl fmt::Display for MusicalPosition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.bar, self.beat, self.tick)
  }
}

impl FromStr for MusicalPosition {
  type Err = TimeError;

  fn from_str(s: &str) -> Result<MusicalPosition, TimeError> {
    let invalid = || TimeError::InvalidPosition {
      text: s.to_string(),
    };

    let mut fields = s.trim().split(':').map(|field| field.trim().parse::<u32>());
    let mut next_field = || {
      fields
        .next()
        .ok_or_else(invalid)
        .and_then(|field| field.map_err(|_| invalid()))
    };
    let bar = next_field()?;
    let beat = next_field()?;
    let tick = next_field()?;
    if fields.next().is_some() {
      return Err(invalid());
    }

    Ok(MusicalPosition::new(bar, beat, tick))
  }
}
