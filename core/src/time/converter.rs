use log::{debug, trace};

use crate::config::Config;
use crate::time::{
  error::TimeError, Meter, MusicalPosition, Seconds, Tempo, TempoSegment, TicksTime,
  DEFAULT_TICKS_PER_BEAT,
};

/// Fractional ticks closer than this to the next tick are rounded up to it
const TICK_EPSILON: f64 = 1e-6;

/// Converts between elapsed seconds and musical positions across a sequence of
/// tempo segments.
///
/// The musical position at which every segment starts is computed once when the
/// converter is built, after which the converter is read-only and can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct TimelineConverter {
  segments: Vec<TempoSegment>,
  meters: Vec<Meter>,
  segment_offsets: Vec<MusicalPosition>,
  ticks_per_beat: u32,
}

impl TimelineConverter {
  /// Segments must be sorted by start time. An empty list is accepted and maps
  /// every query to the origin.
  pub fn new<T>(segments: T, ticks_per_beat: u32) -> Result<TimelineConverter, TimeError>
  where
    T: Into<Vec<TempoSegment>>,
  {
    let segments = segments.into();
    let meters = validate_segments(&segments, ticks_per_beat)?;
    let segment_offsets = offsets_for(&segments, &meters);

    debug!(
      "Timeline with {} segments at {} ticks per beat, last segment starts at {}",
      segments.len(),
      ticks_per_beat,
      segment_offsets
        .last()
        .map_or_else(|| "-".to_string(), |offset| offset.to_string())
    );

    Ok(TimelineConverter {
      segments,
      meters,
      segment_offsets,
      ticks_per_beat,
    })
  }

  pub fn with_default_resolution<T>(segments: T) -> Result<TimelineConverter, TimeError>
  where
    T: Into<Vec<TempoSegment>>,
  {
    TimelineConverter::new(segments, DEFAULT_TICKS_PER_BEAT)
  }

  pub fn from_config(config: &Config) -> Result<TimelineConverter, TimeError> {
    let timeline = &config.timeline;
    let segments = timeline
      .segments
      .iter()
      .map(|segment| TempoSegment::new(segment.start_time, segment.tempo, segment.beats_per_bar))
      .collect::<Vec<TempoSegment>>();
    TimelineConverter::new(segments, timeline.ticks_per_beat)
  }

  pub fn segments(&self) -> &[TempoSegment] {
    &self.segments
  }

  pub fn segment_offsets(&self) -> &[MusicalPosition] {
    &self.segment_offsets
  }

  pub fn ticks_per_beat(&self) -> u32 {
    self.ticks_per_beat
  }

  pub fn len(&self) -> usize {
    self.segments.len()
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  /// Index of the last segment starting at or before `time`, or the first one
  /// when `time` precedes them all
  pub fn segment_index_for_time(&self, time: Seconds) -> Option<usize> {
    if self.segments.is_empty() {
      return None;
    }
    let count = self
      .segments
      .partition_point(|segment| segment.get_start_time() <= time);
    Some(count.saturating_sub(1))
  }

  /// Index of the last segment starting at or before `position`, or the first
  /// one when `position` precedes them all
  pub fn segment_index_for_position(&self, position: MusicalPosition) -> Option<usize> {
    if self.segment_offsets.is_empty() {
      return None;
    }
    let count = self
      .segment_offsets
      .partition_point(|offset| *offset <= position);
    Some(count.saturating_sub(1))
  }

  /// The segment in force at `time`
  pub fn segment_at(&self, time: Seconds) -> Result<&TempoSegment, TimeError> {
    self
      .segment_index_for_time(time)
      .and_then(|index| self.segments.get(index))
      .ok_or(TimeError::EmptyTimeline)
  }

  /// NaN maps to the origin, times past the last representable bar saturate
  pub fn time_to_position(&self, time: Seconds) -> MusicalPosition {
    if time.is_nan() {
      return MusicalPosition::zero();
    }

    let index = match self.segment_index_for_time(time) {
      Some(index) => index,
      None => return MusicalPosition::zero(),
    };

    let segment = &self.segments[index];
    let meter = self.meters[index];
    let position = if time < segment.get_start_time() {
      debug!(
        "Time {}s precedes the first tempo segment at {}s",
        time,
        segment.get_start_time()
      );
      convert_with_constant_tempo(time, segment.get_tempo(), meter)
    } else {
      segment_position(time, segment, self.segment_offsets[index], meter)
    };

    trace!("{}s -> {} (segment {})", time, position, index);
    position
  }

  pub fn position_to_time(&self, position: MusicalPosition) -> Seconds {
    let index = match self.segment_index_for_position(position) {
      Some(index) => index,
      None => return 0.0,
    };

    let time = segment_time(
      position,
      &self.segments[index],
      self.segment_offsets[index],
      self.meters[index],
    );

    trace!("{} -> {}s (segment {})", position, time, index);
    time
  }
}

/// Converts an elapsed time into a musical position assuming a constant tempo
/// and number of beats per bar for the whole duration.
pub fn constant_tempo_convert(
  time: Seconds,
  tempo: f64,
  beats_per_bar: u32,
  ticks_per_beat: u32,
) -> Result<MusicalPosition, TimeError> {
  let tempo = Tempo::new(tempo).validate()?;
  let meter = Meter::new(beats_per_bar, ticks_per_beat)?;
  Ok(convert_with_constant_tempo(time, tempo, meter))
}

/// Musical positions at which every segment starts, measured from the origin.
///
/// The time between two segment boundaries is converted with the tempo and
/// meter of the earlier segment.
pub fn compute_segment_offsets(
  segments: &[TempoSegment],
  ticks_per_beat: u32,
) -> Result<Vec<MusicalPosition>, TimeError> {
  let meters = validate_segments(segments, ticks_per_beat)?;
  Ok(offsets_for(segments, &meters))
}

/// Absolute musical position of `time`, given the segment in force and the
/// position at which it starts
pub fn position_in_segment(
  time: Seconds,
  segment: &TempoSegment,
  offset: MusicalPosition,
  ticks_per_beat: u32,
) -> Result<MusicalPosition, TimeError> {
  let meter = segment.validate(ticks_per_beat)?;
  Ok(segment_position(time, segment, offset, meter))
}

/// Absolute time of `position`, given the segment in force and the position at
/// which it starts
pub fn time_in_segment(
  position: MusicalPosition,
  segment: &TempoSegment,
  offset: MusicalPosition,
  ticks_per_beat: u32,
) -> Result<Seconds, TimeError> {
  let meter = segment.validate(ticks_per_beat)?;
  Ok(segment_time(position, segment, offset, meter))
}

fn validate_segments(
  segments: &[TempoSegment],
  ticks_per_beat: u32,
) -> Result<Vec<Meter>, TimeError> {
  if ticks_per_beat == 0 {
    return Err(TimeError::invalid_configuration(
      "ticks per beat must be positive",
    ));
  }

  for (index, pair) in segments.windows(2).enumerate() {
    let (previous, next) = (&pair[0], &pair[1]);
    if next.get_start_time() < previous.get_start_time() {
      return Err(TimeError::OutOfOrderSegments {
        index: index + 1,
        start_time: next.get_start_time(),
        previous_start_time: previous.get_start_time(),
      });
    }
  }

  segments
    .iter()
    .map(|segment| segment.validate(ticks_per_beat))
    .collect()
}

fn offsets_for(segments: &[TempoSegment], meters: &[Meter]) -> Vec<MusicalPosition> {
  let mut offsets = Vec::with_capacity(segments.len());

  if let (Some(first), Some(meter)) = (segments.first(), meters.first()) {
    offsets.push(convert_with_constant_tempo(
      first.get_start_time(),
      first.get_tempo(),
      *meter,
    ));
  }

  for (index, pair) in segments.windows(2).enumerate() {
    let (previous, next) = (&pair[0], &pair[1]);
    let meter = meters[index];
    let duration = convert_with_constant_tempo(
      next.get_start_time() - previous.get_start_time(),
      previous.get_tempo(),
      meter,
    );
    let offset = offsets[index].add(duration, meter);
    offsets.push(offset);
  }

  offsets
}

fn convert_with_constant_tempo(time: Seconds, tempo: Tempo, meter: Meter) -> MusicalPosition {
  let exact_ticks = tempo.beats_in(time) * f64::from(meter.get_ticks_per_beat());
  MusicalPosition::from_ticks(TicksTime::new(floor_ticks(exact_ticks)), meter)
}

/// Negative and NaN values saturate to zero
fn floor_ticks(exact_ticks: f64) -> u64 {
  let nearest = exact_ticks.round();
  if (nearest - exact_ticks).abs() < TICK_EPSILON {
    nearest as u64
  } else {
    exact_ticks.floor() as u64
  }
}

fn segment_position(
  time: Seconds,
  segment: &TempoSegment,
  offset: MusicalPosition,
  meter: Meter,
) -> MusicalPosition {
  let elapsed = time - segment.get_start_time();
  let local = convert_with_constant_tempo(elapsed, segment.get_tempo(), meter);
  offset.add(local, meter)
}

fn segment_time(
  position: MusicalPosition,
  segment: &TempoSegment,
  offset: MusicalPosition,
  meter: Meter,
) -> Seconds {
  let delta = position.flatten(meter).delta_from(offset.flatten(meter));
  let beats = delta as f64 / f64::from(meter.get_ticks_per_beat());
  segment.get_start_time() + segment.get_tempo().seconds_for(beats)
}
