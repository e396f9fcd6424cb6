use chrono::{DateTime, Duration, Utc};

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Days in one Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 UTC).
pub const J2000_JD: f64 = 2_451_545.0;

/// Converts wall-clock instants into days since a fixed reference epoch,
/// the only time input the orbital math takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EphemerisClock {
    epoch: DateTime<Utc>,
}

impl EphemerisClock {
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self { epoch }
    }

    /// Clock referred to J2000.0.
    pub fn j2000() -> Self {
        Self::new(j2000_epoch())
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Signed days elapsed from the epoch to `instant` (negative before it).
    pub fn days_since_epoch(&self, instant: DateTime<Utc>) -> f64 {
        let delta = instant - self.epoch;
        // Milliseconds cover ±292 million years; nanoseconds only ±292 years.
        delta.num_milliseconds() as f64 / (1000.0 * SECONDS_PER_DAY)
    }

    /// Days since the epoch at the current wall-clock time.
    pub fn now(&self) -> f64 {
        self.days_since_epoch(Utc::now())
    }

    /// Wall-clock instant `days` after the epoch, to the millisecond.
    /// Saturates at the ends of the representable calendar; NaN maps to the
    /// epoch.
    pub fn instant_at(&self, days: f64) -> DateTime<Utc> {
        // `as` saturates, so ±inf lands on i64::MIN/MAX and fails the try below.
        let ms = (days * SECONDS_PER_DAY * 1000.0).round() as i64;
        Duration::try_milliseconds(ms)
            .and_then(|delta| self.epoch.checked_add_signed(delta))
            .unwrap_or(if days < 0.0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    /// Julian Date of the instant `days` after the epoch.
    pub fn julian_date(&self, days: f64) -> f64 {
        J2000_JD + Self::j2000().days_since_epoch(self.epoch) + days
    }

    /// Julian centuries since J2000.0 of the instant `days` after the epoch.
    pub fn julian_centuries(&self, days: f64) -> f64 {
        (self.julian_date(days) - J2000_JD) / DAYS_PER_JULIAN_CENTURY
    }
}

impl Default for EphemerisClock {
    fn default() -> Self {
        Self::j2000()
    }
}

/// 2000-01-01T12:00:00Z.
pub fn j2000_epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(946_728_000, 0).unwrap_or_default()
}

/// Common simulation speeds in simulated days per real second.
pub mod rates {
    pub const REAL_TIME: f64 = 1.0 / super::SECONDS_PER_DAY;
    pub const HOUR_PER_SECOND: f64 = 1.0 / 24.0;
    pub const DAY_PER_SECOND: f64 = 1.0;
    pub const WEEK_PER_SECOND: f64 = 7.0;
    pub const MONTH_PER_SECOND: f64 = 30.436_875;
    pub const YEAR_PER_SECOND: f64 = 365.25;
}

/// Accelerated simulation time driven by the host's frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    /// Days since the reference epoch.
    days: f64,
    /// Simulated days per real second (negative runs backwards).
    speed: f64,
    paused: bool,
}

impl SimulationClock {
    pub fn new(days: f64, speed: f64) -> Self {
        Self { days, speed, paused: false }
    }

    /// Advance by one frame of `real_dt` seconds. Returns the new day count.
    pub fn advance(&mut self, real_dt: f64) -> f64 {
        if !self.paused {
            self.days += self.speed * real_dt;
        }
        self.days
    }

    pub fn days(&self) -> f64 {
        self.days
    }

    pub fn set_days(&mut self, days: f64) {
        self.days = days;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(0.0, rates::DAY_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn epoch_is_day_zero() {
        let clock = EphemerisClock::j2000();
        assert_eq!(clock.days_since_epoch(j2000_epoch()), 0.0);
        assert_eq!(clock.julian_date(0.0), J2000_JD);
    }

    #[test]
    fn before_epoch_is_negative() {
        let clock = EphemerisClock::j2000();
        let t = Utc.with_ymd_and_hms(1999, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(clock.days_since_epoch(t), -365.0);
    }

    #[test]
    fn known_date_day_count() {
        let clock = EphemerisClock::j2000();
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(clock.days_since_epoch(t), 8765.5);
        assert!((clock.julian_centuries(8765.5) - 8765.5 / 36525.0).abs() < 1e-15);
    }

    #[test]
    fn instant_at_inverts_days_since_epoch() {
        let clock = EphemerisClock::j2000();
        let t = Utc.with_ymd_and_hms(2031, 7, 14, 6, 30, 0).unwrap();
        let days = clock.days_since_epoch(t);
        assert_eq!(clock.instant_at(days), t);
    }

    #[test]
    fn instant_at_saturates_outside_calendar() {
        let clock = EphemerisClock::j2000();
        assert_eq!(clock.instant_at(1.0e8), DateTime::<Utc>::MAX_UTC);
        assert_eq!(clock.instant_at(-1.0e8), DateTime::<Utc>::MIN_UTC);
        assert_eq!(clock.instant_at(f64::INFINITY), DateTime::<Utc>::MAX_UTC);
        assert_eq!(clock.instant_at(f64::NEG_INFINITY), DateTime::<Utc>::MIN_UTC);
        assert_eq!(clock.instant_at(f64::NAN), j2000_epoch());
    }

    #[test]
    fn simulation_clock_far_future_has_a_date() {
        let mut sim = SimulationClock::new(0.0, rates::YEAR_PER_SECOND);
        let days = sim.advance(400_000.0);
        assert_eq!(EphemerisClock::j2000().instant_at(days), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn monotonic() {
        let clock = EphemerisClock::j2000();
        let a = Utc.with_ymd_and_hms(2010, 3, 1, 0, 0, 0).unwrap();
        let b = a + Duration::seconds(1);
        assert!(clock.days_since_epoch(b) > clock.days_since_epoch(a));
    }

    #[test]
    fn custom_epoch_shifts_julian_date() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 2, 12, 0, 0).unwrap();
        let clock = EphemerisClock::new(epoch);
        assert_eq!(clock.julian_date(0.0), J2000_JD + 1.0);
    }

    #[test]
    fn simulation_clock_advances_unless_paused() {
        let mut clock = SimulationClock::new(100.0, rates::WEEK_PER_SECOND);
        assert_eq!(clock.advance(0.5), 103.5);
        clock.toggle_pause();
        assert_eq!(clock.advance(10.0), 103.5);
        clock.toggle_pause();
        clock.set_speed(-rates::DAY_PER_SECOND);
        assert_eq!(clock.advance(2.0), 101.5);
    }
}
