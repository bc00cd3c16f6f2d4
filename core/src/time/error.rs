use failure::Fail;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum TimeError {
  #[fail(display = "Invalid timeline configuration: {}", cause)]
  InvalidConfiguration { cause: String },

  #[fail(display = "The timeline has no tempo segments")]
  EmptyTimeline,

  #[fail(
    display = "Tempo segment {} starts at {}s, before the previous segment at {}s",
    index, start_time, previous_start_time
  )]
  OutOfOrderSegments {
    index: usize,
    start_time: f64,
    previous_start_time: f64,
  },

  #[fail(display = "Invalid musical position '{}', expected bar:beat:tick", text)]
  InvalidPosition { text: String },
}

impl TimeError {
  pub(crate) fn invalid_configuration<T>(cause: T) -> TimeError
  where
    T: Into<String>,
  {
    TimeError::InvalidConfiguration {
      cause: cause.into(),
    }
  }
}
