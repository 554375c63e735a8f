#![cfg_attr(not(test), no_std)]

//! Input-processing core: turns touch samples and scalar sensor readings into discrete events
//! and fans them out to registered callbacks without allocating.

pub mod callback;
pub mod fanout;
pub mod geometry;
pub mod gesture;
pub mod hysteresis;
pub mod shared;
pub mod slots;

pub use callback::{Callback, Noop, same_callback};
pub use fanout::{Broadcast, SharedBroadcast};
pub use geometry::{
    Calibration, CoordinateSpace, Displacement, DisplayGeometry, FixedCalibration, FixedDisplay,
    Geometry, Point, Side,
};
pub use gesture::{Stroke, Swipe, SwipeClassifier, TouchPhase, TouchSample};
pub use hysteresis::{Crossing, HysteresisTrigger, ThresholdConfig};
pub use shared::SharedSlots;
pub use slots::CallbackSlots;
