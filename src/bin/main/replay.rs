use core::cell::Cell;

use log::{debug, info};
use touchline_core::{
    Callback, Crossing, FixedCalibration, FixedDisplay, Geometry, HysteresisTrigger,
    SharedBroadcast, SharedSlots, Swipe, SwipeClassifier, ThresholdConfig,
};

use crate::trace::{StepInput, Trace};

const OBSERVER_SLOTS: usize = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum ReplayEvent {
    Swipe(Swipe),
    Threshold(Crossing),
}

impl ReplayEvent {
    pub(super) fn kind(self) -> &'static str {
        match self {
            Self::Swipe(_) => "swipe",
            Self::Threshold(_) => "threshold",
        }
    }

    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Swipe(swipe) => swipe.as_str(),
            Self::Threshold(crossing) => crossing.as_str(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct FiredEvent {
    pub(super) line: usize,
    pub(super) event: ReplayEvent,
}

/// Observer invocation counts, one per outcome.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct Tally {
    pub(super) slide_left: u32,
    pub(super) slide_right: u32,
    pub(super) lower: u32,
    pub(super) upper: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct ReplayReport {
    pub(super) events: Vec<FiredEvent>,
    pub(super) tally: Tally,
}

struct Counter {
    label: &'static str,
    hits: Cell<u32>,
}

impl Counter {
    const fn new(label: &'static str) -> Self {
        Self {
            label,
            hits: Cell::new(0),
        }
    }
}

impl Callback for Counter {
    fn invoke(&self) {
        self.hits.set(self.hits.get().saturating_add(1));
        debug!("replay: observer={} hits={}", self.label, self.hits.get());
    }
}

fn observe<'a>(
    slots: &SharedSlots<'a, dyn Callback, OBSERVER_SLOTS>,
    counter: &'a Counter,
) -> Result<(), String> {
    if slots.add_handler(counter) {
        Ok(())
    } else {
        Err(format!(
            "observer registry full, cannot attach `{}`",
            counter.label
        ))
    }
}

/// Feeds every step of `trace` through a swipe classifier and, when configured, a hysteresis
/// trigger. Outcomes fan out through shared registries to per-outcome counters.
pub(super) fn run(trace: &Trace) -> Result<ReplayReport, String> {
    let counters = [
        Counter::new("slide-left"),
        Counter::new("slide-right"),
        Counter::new("lower"),
        Counter::new("upper"),
    ];
    let [left, right, lower, upper] = &counters;
    let left_slots: SharedSlots<'_, dyn Callback, OBSERVER_SLOTS> = SharedSlots::new();
    let right_slots: SharedSlots<'_, dyn Callback, OBSERVER_SLOTS> = SharedSlots::new();
    let lower_slots: SharedSlots<'_, dyn Callback, OBSERVER_SLOTS> = SharedSlots::new();
    let upper_slots: SharedSlots<'_, dyn Callback, OBSERVER_SLOTS> = SharedSlots::new();
    observe(&left_slots, left)?;
    observe(&right_slots, right)?;
    observe(&lower_slots, lower)?;
    observe(&upper_slots, upper)?;

    let geometry = Geometry::new(
        FixedDisplay::new(trace.screen_width),
        FixedCalibration::new(trace.raw_width),
    );
    let mut swipes = SwipeClassifier::new(
        geometry,
        SharedBroadcast(&left_slots),
        SharedBroadcast(&right_slots),
    );
    // Parsing rejects readings without a threshold, so the placeholder is never checked.
    let mut trigger = HysteresisTrigger::new(
        trace.threshold.unwrap_or(ThresholdConfig::new(0, 0)),
        SharedBroadcast(&lower_slots),
        SharedBroadcast(&upper_slots),
    );

    let mut events = Vec::new();
    for step in &trace.steps {
        let fired = match step.input {
            StepInput::Touch(sample) => swipes.respond(&sample).map(ReplayEvent::Swipe),
            StepInput::Reading(value) => trigger.check_crossing(value).map(ReplayEvent::Threshold),
        };
        if let Some(event) = fired {
            info!(
                "replay: line={} {}={}",
                step.line,
                event.kind(),
                event.label()
            );
            events.push(FiredEvent {
                line: step.line,
                event,
            });
        }
    }

    Ok(ReplayReport {
        events,
        tally: Tally {
            slide_left: left.hits.get(),
            slide_right: right.hits.get(),
            lower: lower.hits.get(),
            upper: upper.hits.get(),
        },
    })
}
