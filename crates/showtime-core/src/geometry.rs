//! Phase-deformed node geometry shared by hit-testing and drawing.
//!
//! Every node "breathes" with the beat: its body squishes vertically, widens
//! slightly and tilts from side to side. The deformation is a pure function of
//! the beat-phase, so a renderer drawing the node and [`Graph::locate`]
//! testing a pointer against it always agree on where a terminal is.
//!
//! Shapes are expressed relative to the node position, which is the
//! bottom-left corner of the undeformed body. Canvas y grows downward, so the
//! body extends to negative y.
//!
//! [`Graph::locate`]: crate::graph::Graph::locate

use core::f64::consts::PI;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::graph::Direction;

/// Capture radius of a terminal, in canvas units.
pub const TERMINAL_RADIUS: f64 = 10.0;
/// Corner radius renderers use for node bodies.
pub const CORNER_RADIUS: f64 = 10.0;
/// Peak vertical squish at the middle of a beat.
pub const SQUISH_Y: f64 = 5.0;
/// Peak horizontal stretch at the middle of a beat.
pub const SQUISH_X: f64 = 2.0;
/// Peak horizontal tilt of the body edges.
pub const TILT: f64 = 1.0;

/// A position or offset in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component, growing downward.
    pub y: f64,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared euclidean length.
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// The deformed body of a node at one beat-phase, relative to its position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    /// Left edge at the bottom of the body.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Top edge.
    pub top: f64,
    /// Deformed width.
    pub width: f64,
    /// Deformed height.
    pub height: f64,
    /// Horizontal skew: the bottom corners sit this far right of the top ones.
    pub tilt: f64,
}

impl Shape {
    /// Computes the shape of a body of `size` at beat-phase `phase`.
    ///
    /// The squish peaks at every half beat and vanishes on the beat; the tilt
    /// swings through one full period every two beats.
    pub fn at(phase: f64, size: Vec2) -> Self {
        let tilt = TILT * (PI * (phase + 0.5)).sin();
        let squish = (PI * phase).sin().abs();
        let squish2 = squish * squish;

        let bottom = SQUISH_Y * (squish.cbrt() - 1.0);
        let left = -SQUISH_X * squish2 / 2.0;
        let width = size.x + SQUISH_X * squish2;
        let height = size.y - SQUISH_Y * squish2;

        Self {
            left,
            bottom,
            top: bottom - height,
            width,
            height,
            tilt,
        }
    }

    /// Position of terminal `index` of `count` on the side facing `direction`,
    /// relative to the node position.
    ///
    /// Terminals are spread evenly from top to bottom; the horizontal
    /// coordinate follows the tilted edge.
    pub fn terminal(&self, direction: Direction, index: usize, count: usize) -> Vec2 {
        let rel = (index as f64 + 0.5) / count.max(1) as f64;
        let edge = match direction {
            Direction::Input => self.left,
            Direction::Output => self.left + self.width,
        };
        Vec2::new(edge + (1.0 - rel) * self.tilt, self.top + rel * self.height)
    }

    /// Whether `offset` (relative to the node position) lies on the body.
    pub fn contains(&self, offset: Vec2) -> bool {
        offset.x >= self.left
            && offset.x <= self.left + self.width
            && offset.y >= self.top
            && offset.y <= self.bottom
    }
}

/// Whether `point` lies within the capture radius of a terminal at `center`.
pub fn within_terminal(point: Vec2, center: Vec2) -> bool {
    (point - center).length_squared() <= TERMINAL_RADIUS * TERMINAL_RADIUS
}

/// The cubic Bézier a wire is drawn along.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WireCurve {
    /// Output terminal end.
    pub start: Vec2,
    /// First control point.
    pub control_start: Vec2,
    /// Second control point.
    pub control_end: Vec2,
    /// Input terminal end.
    pub end: Vec2,
}

impl WireCurve {
    /// Builds the curve between two terminal positions.
    ///
    /// Control points pull horizontally out of each terminal. The pull grows
    /// with the vertical distance and saturates at 200 units once the ends
    /// are 100 units apart.
    pub fn between(start: Vec2, end: Vec2) -> Self {
        let dy = (end.y - start.y) / 100.0;
        let offset = 200.0 * (dy * dy).min(1.0);
        Self {
            start,
            control_start: Vec2::new(start.x + offset, start.y),
            control_end: Vec2::new(end.x - offset, end.y),
            end,
        }
    }

    /// Point at parameter `t` in [0, 1].
    pub fn point_at(&self, t: f64) -> Vec2 {
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Vec2::new(
            a * self.start.x + b * self.control_start.x + c * self.control_end.x + d * self.end.x,
            a * self.start.y + b * self.control_start.y + c * self.control_end.y + d * self.end.y,
        )
    }

    /// Position of the travelling dot at beat-phase `phase`.
    ///
    /// The dot leaves the output on every beat and reaches the input just
    /// before the next one.
    pub fn dot_at(&self, phase: f64) -> Vec2 {
        self.point_at(phase.rem_euclid(1.0))
    }
}
