//=========================================================================
// Route Geometry
//=========================================================================
//
// Static layout of the bus line: stations placed on an ellipse in
// normalized device coordinates, plus the wiggly path drawn between them.
//
// Architecture:
//   RouteConfig → Route::ellipse() → [Station; n] → PathLine::generate()
//
// Computed once at start-up and never mutated afterwards. The per-frame
// state machine only reads station positions.
//
//=========================================================================

//=== Module Declarations =================================================

mod path;

//=== Public API ==========================================================

pub use path::PathLine;

//=== External Dependencies ===============================================

use std::f32::consts::TAU;
use std::ops::{Add, Mul, Sub};

//=== Vec2 ================================================================

/// 2D point or offset in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector rotated a quarter turn counter-clockwise.
    ///
    /// Returns `ZERO` for a zero-length input.
    pub fn perpendicular(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            return Self::ZERO;
        }
        Self::new(-self.y / len, self.x / len)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

//=== Station =============================================================

/// A stop on the route where the bus dwells and passengers board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub index: usize,
    pub position: Vec2,
}

//=== Route ===============================================================

/// Ordered cyclic sequence of stations.
///
/// Station `i + 1 (mod n)` always follows station `i`.
#[derive(Debug, Clone)]
pub struct Route {
    stations: Vec<Station>,
}

impl Route {
    //--- Construction -----------------------------------------------------

    /// Places `count` stations evenly (by angle) on an axis-aligned ellipse.
    ///
    /// Station 0 sits at angle zero (rightmost point) and the sequence runs
    /// counter-clockwise.
    ///
    /// # Panics
    ///
    /// Panics if `count < 2`. A validated [`crate::config::Config`] never
    /// produces such a value.
    pub fn ellipse(count: usize, center: Vec2, radius_x: f32, radius_y: f32) -> Self {
        assert!(count >= 2, "Route needs at least two stations, got {}", count);

        let stations = (0..count)
            .map(|index| {
                let angle = TAU * index as f32 / count as f32;
                Station {
                    index,
                    position: center + Vec2::new(radius_x * angle.cos(), radius_y * angle.sin()),
                }
            })
            .collect();

        Self { stations }
    }

    //--- Topology ---------------------------------------------------------

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Index of the station following `index`.
    #[inline]
    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.stations.len()
    }

    /// Index of the station preceding `index`.
    #[inline]
    pub fn previous(&self, index: usize) -> usize {
        (index + self.stations.len() - 1) % self.stations.len()
    }

    /// Endpoints of the segment leaving station `index`.
    pub fn segment(&self, index: usize) -> (Vec2, Vec2) {
        (self.position(index), self.position(self.next(index)))
    }

    //--- Queries ----------------------------------------------------------

    /// Position of station `index` (wrapped modulo the station count).
    pub fn position(&self, index: usize) -> Vec2 {
        self.stations[index % self.stations.len()].position
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
