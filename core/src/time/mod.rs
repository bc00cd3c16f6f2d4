pub mod converter;
pub mod error;
pub mod meter;
pub mod position;
pub mod segment;
pub mod tempo;
pub mod ticks;

pub use self::converter::TimelineConverter;
pub use self::error::TimeError;
pub use self::meter::Meter;
pub use self::position::MusicalPosition;
pub use self::segment::TempoSegment;
pub use self::tempo::Tempo;
pub use self::ticks::TicksTime;

pub type Seconds = f64;

pub const DEFAULT_TICKS_PER_BEAT: u32 = 1024;
