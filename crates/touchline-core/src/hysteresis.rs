//! Two-threshold trigger that turns a noisy scalar stream into alternating crossing events.

use log::debug;

use crate::callback::Callback;

/// Threshold side. Also used as the trigger state: the side whose crossing is armed next.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Crossing {
    /// Value dropped below the lower threshold.
    Lower,
    /// Value rose above the upper threshold.
    Upper,
}

impl Crossing {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }
}

/// Trigger thresholds and the initially armed side.
///
/// `lower < upper` is the caller's responsibility and is not checked. With inverted
/// thresholds the trigger may never fire or may fire on every reading.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ThresholdConfig<T> {
    pub lower: T,
    pub upper: T,
    pub initial: Crossing,
}

impl<T> ThresholdConfig<T> {
    pub const fn new(lower: T, upper: T) -> Self {
        Self {
            lower,
            upper,
            initial: Crossing::Lower,
        }
    }

    pub const fn with_initial(mut self, initial: Crossing) -> Self {
        self.initial = initial;
        self
    }
}

/// Hysteresis trigger over readings of type `T`.
///
/// While [`Crossing::Lower`] is armed, a reading strictly below `lower` invokes `on_lower`
/// and arms [`Crossing::Upper`]; while `Upper` is armed, a reading strictly above `upper`
/// invokes `on_upper` and arms `Lower` again. Readings inside the dead band, or on the side
/// that already fired, do nothing. The same side therefore never fires twice in a row.
pub struct HysteresisTrigger<T, L, U> {
    lower: T,
    upper: T,
    expected: Crossing,
    on_lower: L,
    on_upper: U,
}

impl<T, L, U> HysteresisTrigger<T, L, U>
where
    T: PartialOrd,
    L: Callback,
    U: Callback,
{
    pub fn new(config: ThresholdConfig<T>, on_lower: L, on_upper: U) -> Self {
        Self {
            lower: config.lower,
            upper: config.upper,
            expected: config.initial,
            on_lower,
            on_upper,
        }
    }

    /// Feeds one reading. Returns `true` when a crossing fired.
    pub fn check(&mut self, value: T) -> bool {
        self.check_crossing(value).is_some()
    }

    /// Feeds one reading and reports which side fired, if any.
    pub fn check_crossing(&mut self, value: T) -> Option<Crossing> {
        let fired = match self.expected {
            Crossing::Lower if value < self.lower => {
                self.on_lower.invoke();
                Crossing::Lower
            }
            Crossing::Upper if value > self.upper => {
                self.on_upper.invoke();
                Crossing::Upper
            }
            _ => return None,
        };

        self.expected = fired.opposite();
        debug!(
            "hysteresis: crossed={} armed={}",
            fired.as_str(),
            self.expected.as_str()
        );
        Some(fired)
    }

    /// Side whose crossing fires next.
    pub fn expected(&self) -> Crossing {
        self.expected
    }

    /// Re-arms a side, e.g. after the monitored quantity was changed externally.
    pub fn set_expected(&mut self, expected: Crossing) {
        self.expected = expected;
    }

    pub fn lower_threshold(&self) -> &T {
        &self.lower
    }

    pub fn upper_threshold(&self) -> &T {
        &self.upper
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    struct Counts {
        lower: Cell<u32>,
        upper: Cell<u32>,
    }

    impl Counts {
        fn new() -> Self {
            Self {
                lower: Cell::new(0),
                upper: Cell::new(0),
            }
        }

        fn get(&self) -> (u32, u32) {
            (self.lower.get(), self.upper.get())
        }
    }

    #[test]
    fn fires_alternately_across_the_dead_band() {
        let counts = Counts::new();
        let mut trigger = HysteresisTrigger::new(
            ThresholdConfig::new(10, 20),
            || counts.lower.set(counts.lower.get() + 1),
            || counts.upper.set(counts.upper.get() + 1),
        );

        assert!(trigger.check(5));
        assert_eq!(counts.get(), (1, 0));
        assert_eq!(trigger.expected(), Crossing::Upper);

        assert!(!trigger.check(15));
        assert_eq!(counts.get(), (1, 0));

        assert!(trigger.check(25));
        assert_eq!(counts.get(), (1, 1));
        assert_eq!(trigger.expected(), Crossing::Lower);
    }

    #[test]
    fn chatter_around_one_threshold_fires_once() {
        let counts = Counts::new();
        let mut trigger = HysteresisTrigger::new(
            ThresholdConfig::new(10, 20),
            || counts.lower.set(counts.lower.get() + 1),
            || counts.upper.set(counts.upper.get() + 1),
        );

        for value in [9, 11, 9, 10, 8, 12, 9, 19, 9] {
            trigger.check(value);
        }

        assert_eq!(counts.get(), (1, 0));
    }

    #[test]
    fn boundaries_are_exclusive() {
        let counts = Counts::new();
        let mut trigger = HysteresisTrigger::new(
            ThresholdConfig::new(10, 20),
            || counts.lower.set(counts.lower.get() + 1),
            || counts.upper.set(counts.upper.get() + 1),
        );

        assert!(!trigger.check(10));
        assert!(trigger.check(9));
        assert!(!trigger.check(20));
        assert!(trigger.check(21));
        assert_eq!(counts.get(), (1, 1));
    }

    #[test]
    fn never_fires_the_same_side_twice_in_a_row() {
        let mut trigger = HysteresisTrigger::new(
            ThresholdConfig::new(-3i32, 3),
            crate::Noop,
            crate::Noop,
        );

        // Deterministic pseudo-random walk over [-10, 10].
        let mut state = 0x2545_f491u32;
        let mut last = None;
        let mut fired = 0u32;
        for _ in 0..2_000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let value = (state % 21) as i32 - 10;

            if let Some(crossing) = trigger.check_crossing(value) {
                assert_ne!(Some(crossing), last);
                last = Some(crossing);
                fired += 1;
            }
        }

        assert!(fired > 10);
    }

    #[test]
    fn initial_state_and_resync_are_honoured() {
        let counts = Counts::new();
        let mut trigger = HysteresisTrigger::new(
            ThresholdConfig::new(10, 20).with_initial(Crossing::Upper),
            || counts.lower.set(counts.lower.get() + 1),
            || counts.upper.set(counts.upper.get() + 1),
        );

        assert!(!trigger.check(0));
        assert_eq!(counts.get(), (0, 0));

        trigger.set_expected(Crossing::Lower);
        assert_eq!(trigger.check_crossing(0), Some(Crossing::Lower));
        assert_eq!(trigger.check_crossing(30), Some(Crossing::Upper));
        assert_eq!(counts.get(), (1, 1));
    }

    #[test]
    fn float_readings_and_nan() {
        let counts = Counts::new();
        let mut trigger = HysteresisTrigger::new(
            ThresholdConfig::new(3.3f32, 3.7),
            || counts.lower.set(counts.lower.get() + 1),
            || counts.upper.set(counts.upper.get() + 1),
        );

        assert!(!trigger.check(f32::NAN));
        assert!(trigger.check(3.2));
        assert!(!trigger.check(f32::NAN));
        assert!(trigger.check(4.1));
        assert_eq!(counts.get(), (1, 1));
        assert_eq!(*trigger.lower_threshold(), 3.3);
        assert_eq!(*trigger.upper_threshold(), 3.7);
    }

    #[test]
    fn inverted_thresholds_are_not_corrected() {
        let counts = Counts::new();
        let mut trigger = HysteresisTrigger::new(
            ThresholdConfig::new(20, 10),
            || counts.lower.set(counts.lower.get() + 1),
            || counts.upper.set(counts.upper.get() + 1),
        );

        // Both bands overlap: 15 is below "lower" and above "upper".
        assert!(trigger.check(15));
        assert!(trigger.check(15));
        assert!(trigger.check(15));
        assert_eq!(counts.get(), (2, 1));
    }
}
