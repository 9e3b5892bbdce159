//=========================================================================
// Path Line
//=========================================================================
//
// Closed polyline drawn under the stations. Each segment gets a handful of
// interior points pushed sideways by a random offset, which gives the
// hand-drawn look. Station points themselves are never displaced.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== Internal Dependencies ===============================================

use super::{Route, Vec2};

//=== PathLine ============================================================

/// Precomputed line strip running through every station and back to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct PathLine {
    points: Vec<Vec2>,
}

impl PathLine {
    /// Builds the wiggly loop for `route`.
    ///
    /// Layout per segment `i → i+1`: station `i`, then `samples` interior
    /// points at evenly spaced fractions of the chord, each displaced along
    /// the chord's normal by a value drawn from `[-amplitude, amplitude]`.
    /// The strip ends on station 0 again.
    ///
    /// The result depends only on the route, the parameters and the RNG
    /// state, so a seeded RNG gives a reproducible line.
    pub fn generate<R: Rng>(route: &Route, samples: usize, amplitude: f32, rng: &mut R) -> Self {
        let mut points = Vec::with_capacity(route.len() * (samples + 1) + 1);
        let amplitude = amplitude.abs();

        for index in 0..route.len() {
            let (from, to) = route.segment(index);
            let normal = (to - from).perpendicular();

            points.push(from);
            for step in 1..=samples {
                let t = step as f32 / (samples + 1) as f32;
                let offset = if amplitude > 0.0 {
                    rng.gen_range(-amplitude..=amplitude)
                } else {
                    0.0
                };
                points.push(from.lerp(to, t) + normal * offset);
            }
        }

        points.push(route.position(0));

        Self { points }
    }

    /// Line strip vertices in draw order.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
