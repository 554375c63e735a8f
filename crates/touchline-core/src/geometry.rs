//! Coordinate spaces and the width queries the gesture classifier depends on.

use core::ops::Sub;

/// Touch position, in the units of the sample's [`CoordinateSpace`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Vector between two points.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Displacement {
    pub dx: i32,
    pub dy: i32,
}

impl Displacement {
    /// Squared straight-line length; compared against squared limits to avoid a square root.
    pub fn squared_length(self) -> i64 {
        let dx = i64::from(self.dx);
        let dy = i64::from(self.dy);
        (dx * dx).saturating_add(dy * dy)
    }
}

impl Sub for Point {
    type Output = Displacement;

    fn sub(self, origin: Point) -> Displacement {
        Displacement {
            dx: self.x.saturating_sub(origin.x),
            dy: self.y.saturating_sub(origin.y),
        }
    }
}

/// Units a touch position is expressed in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoordinateSpace {
    /// Raw touch-controller units, before calibration.
    Raw,
    /// Display pixels.
    Screen,
}

/// Half-plane relative to the vertical midline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Display size provider.
pub trait DisplayGeometry {
    /// Display width in pixels.
    fn screen_width(&self) -> u16;
}

/// Touch calibration provider.
pub trait Calibration {
    /// Width of the raw touch-controller coordinate range.
    fn raw_width(&self) -> u16;
}

impl<T: DisplayGeometry + ?Sized> DisplayGeometry for &T {
    fn screen_width(&self) -> u16 {
        (**self).screen_width()
    }
}

impl<T: Calibration + ?Sized> Calibration for &T {
    fn raw_width(&self) -> u16 {
        (**self).raw_width()
    }
}

/// Display with a fixed width.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedDisplay {
    pub width: u16,
}

impl FixedDisplay {
    pub const fn new(width: u16) -> Self {
        Self { width }
    }
}

impl DisplayGeometry for FixedDisplay {
    fn screen_width(&self) -> u16 {
        self.width
    }
}

/// Calibration with a fixed raw width.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedCalibration {
    pub raw_width: u16,
}

impl FixedCalibration {
    pub const fn new(raw_width: u16) -> Self {
        Self { raw_width }
    }
}

impl Calibration for FixedCalibration {
    fn raw_width(&self) -> u16 {
        self.raw_width
    }
}

/// Display and calibration providers bundled for width queries.
///
/// Providers are consulted on every query, so a calibration that changes at runtime is picked
/// up by the next sample. Zero or missing widths are the providers' problem.
#[derive(Clone, Copy, Debug)]
pub struct Geometry<D, C> {
    display: D,
    calibration: C,
}

impl<D, C> Geometry<D, C>
where
    D: DisplayGeometry,
    C: Calibration,
{
    pub const fn new(display: D, calibration: C) -> Self {
        Self {
            display,
            calibration,
        }
    }

    /// Width of the coordinate range positions in `space` are expressed in.
    pub fn active_width(&self, space: CoordinateSpace) -> u16 {
        match space {
            CoordinateSpace::Screen => self.display.screen_width(),
            CoordinateSpace::Raw => self.calibration.raw_width(),
        }
    }

    /// Midline position; `x` values up to and including it are on the left.
    pub fn midline(&self, space: CoordinateSpace) -> i32 {
        i32::from(self.active_width(space) / 2)
    }

    pub fn side_of(&self, point: Point, space: CoordinateSpace) -> Side {
        if point.x <= self.midline(space) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Minimum swipe length: half the active width.
    pub fn swipe_threshold(&self, space: CoordinateSpace) -> i32 {
        self.midline(space)
    }
}
