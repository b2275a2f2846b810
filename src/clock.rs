use time::{Date, OffsetDateTime};

/// Source of the current calendar date.
pub trait Clock: Send + Sync {
    fn today(&self) -> Date;
}

/// Wall clock, UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

/// Always reports the same date.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
