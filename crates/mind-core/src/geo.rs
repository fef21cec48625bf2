//! Planar world position used for throttling and destination intents.
//!
//! The decision core never moves anything itself; it only needs distances
//! (for the off-screen throttle and nearby-agent queries) and a value type to
//! hand the actuator in `set_destination`.

/// A 2-D world position in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Use for comparisons; avoids the `sqrt`.
    #[inline]
    pub fn distance_sq(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// `true` if `other` lies within `radius` metres (inclusive).
    #[inline]
    pub fn within(self, other: Position, radius: f32) -> bool {
        self.distance_sq(other) <= radius * radius
    }

    /// Point `fraction` of the way from `self` towards `other`.
    #[inline]
    pub fn lerp(self, other: Position, fraction: f32) -> Position {
        Position {
            x: self.x + (other.x - self.x) * fraction,
            y: self.y + (other.y - self.y) * fraction,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
