use log::{debug, error, info};

use failure::{Error, Fail};

use rhythm_time_core::{
  config::Config,
  time::{MusicalPosition, Seconds, TimelineConverter},
};

const RHYTHM_TIME_CONFIG: &str = "RHYTHM_TIME_CONFIG";
const DEFAULT_RHYTHM_TIME_CONFIG: &str = "timeline.toml";

const RHYTHM_TIME_LOG_CONFIG: &str = "RHYTHM_TIME_LOG_CONFIG";
const DEFAULT_RHYTHM_TIME_LOG_CONFIG: &str = "log4rs.yaml";

#[derive(Debug, Fail)]
enum MainError {
  #[fail(display = "Failed to init logging: {}", cause)]
  LoggingInit { cause: String },

  #[fail(
    display = "Invalid argument '{}', expected seconds or bar:beat:tick",
    argument
  )]
  InvalidArgument { argument: String },

  #[fail(display = "{} of the conversions failed", count)]
  ConversionsFailed { count: usize },
}

fn main() -> Result<(), Error> {
  init_logging()?;

  let config = init_config()?;

  let converter = init_converter(&config)?;

  let mut failed = 0;
  for argument in std::env::args().skip(1) {
    match convert(&converter, argument.as_str()) {
      Ok(output) => println!("{} -> {}", argument, output),
      Err(err) => {
        error!("{}", err);
        failed += 1;
      }
    }
  }

  if failed > 0 {
    return Err(MainError::ConversionsFailed { count: failed }.into());
  }

  Ok(())
}

fn init_logging() -> Result<(), Error> {
  let log_config_path = std::env::var(RHYTHM_TIME_LOG_CONFIG)
    .unwrap_or_else(|_| DEFAULT_RHYTHM_TIME_LOG_CONFIG.to_string());

  log4rs::init_file(log_config_path.as_str(), Default::default()).map_err(|err| {
    MainError::LoggingInit {
      cause: err.to_string(),
    }
  })?;

  Ok(())
}

fn init_config() -> Result<Config, Error> {
  let config_path =
    std::env::var(RHYTHM_TIME_CONFIG).unwrap_or_else(|_| DEFAULT_RHYTHM_TIME_CONFIG.to_string());

  info!("Loading timeline configuration from {} ...", config_path);
  let config = Config::from_file(config_path.as_str())?;
  debug!("{:#?}", config);

  Ok(config)
}

fn init_converter(config: &Config) -> Result<TimelineConverter, Error> {
  info!("Initialising the timeline converter ...");

  let converter = TimelineConverter::from_config(config)?;
  if converter.is_empty() {
    info!("The timeline has no tempo segments, every conversion resolves to the origin");
  }

  Ok(converter)
}

/// Arguments with a ':' are positions, anything else is a time in seconds
fn convert(converter: &TimelineConverter, argument: &str) -> Result<String, Error> {
  if argument.contains(':') {
    let position = argument.parse::<MusicalPosition>()?;
    Ok(format!("{}s", converter.position_to_time(position)))
  } else {
    let time = argument
      .trim()
      .parse::<Seconds>()
      .map_err(|_| MainError::InvalidArgument {
        argument: argument.to_string(),
      })?;
    Ok(converter.time_to_position(time).to_string())
  }
}
