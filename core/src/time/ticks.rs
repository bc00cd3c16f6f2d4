use std::{
  cmp::{min, Ordering},
  ops::Sub,
};

/// An absolute number of ticks from the timeline origin
#[derive(Debug, Eq, Copy, Clone, Hash)]
pub struct TicksTime(u64);

impl TicksTime {
  pub fn new(ticks: u64) -> TicksTime {
    TicksTime(ticks)
  }

  /// Signed distance from `other` to `self`, in ticks
  pub fn delta_from(&self, other: TicksTime) -> i128 {
    i128::from(self.0) - i128::from(other.0)
  }
}

impl Ord for TicksTime {
  fn cmp(&self, other: &TicksTime) -> Ordering {
    self.0.cmp(&other.0)
  }
}

impl PartialOrd for TicksTime {
  fn partial_cmp(&self, other: &TicksTime) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl PartialEq for TicksTime {
  fn eq(&self, other: &TicksTime) -> bool {
    self.0 == other.0
  }
}

impl Sub for TicksTime {
  type Output = TicksTime;
  fn sub(self, rhs: TicksTime) -> Self {
    TicksTime::new(self.0 - min(self.0, rhs.0))
  }
}

impl From<TicksTime> for u64 {
  fn from(item: TicksTime) -> Self {
    item.0
  }
}
