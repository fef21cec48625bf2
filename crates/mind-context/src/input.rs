//! The fixed vocabulary of normalized decision inputs.
//!
//! Every consideration, condition and goal predicate reads its value through
//! an `InputKind`.  Inputs are stored in a dense array inside
//! [`DecisionContext`][crate::DecisionContext], indexed by
//! [`InputKind::index`], so a lookup is a bounds-checked array read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One normalized input in [0, 1].
///
/// Need inputs express *pressure*: 1.0 means the need is as urgent as it
/// gets.  They map 1:1 onto the need names the world's needs store uses
/// (see [`InputKind::need_name`]).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    // ── Needs (read via `Sensors::normalized_need`) ───────────────────────
    Hunger,
    Thirst,
    Fatigue,
    Loneliness,
    Boredom,
    Curiosity,
    Hygiene,

    // ── Derived from needs ────────────────────────────────────────────────
    /// `1 - Fatigue`; what actions spend as `energy_cost`.
    Energy,

    // ── Emotion ───────────────────────────────────────────────────────────
    /// Intensity of the dominant emotion, whatever it is.
    EmotionIntensity,
    /// Intensity of the dominant emotion if it is `Afraid`, else 0.
    Fear,
    /// Intensity of the dominant emotion if it is `Angry`, else 0.
    Aggression,

    // ── Environment ───────────────────────────────────────────────────────
    Sunlight,
    WeatherSeverity,

    // ── Social ────────────────────────────────────────────────────────────
    /// Relationship with the interaction target, rescaled from [-1, 1].
    Affinity,
    /// Number of nearby agents relative to the crowding cap.
    Crowding,
    /// 1.0 if an interaction target was found, else 0.0.
    TargetPresent,
}

impl InputKind {
    pub const COUNT: usize = 16;

    pub const ALL: [InputKind; Self::COUNT] = [
        InputKind::Hunger,
        InputKind::Thirst,
        InputKind::Fatigue,
        InputKind::Loneliness,
        InputKind::Boredom,
        InputKind::Curiosity,
        InputKind::Hygiene,
        InputKind::Energy,
        InputKind::EmotionIntensity,
        InputKind::Fear,
        InputKind::Aggression,
        InputKind::Sunlight,
        InputKind::WeatherSeverity,
        InputKind::Affinity,
        InputKind::Crowding,
        InputKind::TargetPresent,
    ];

    /// Need inputs, in the order they are queried from the sensors.
    pub const NEEDS: [InputKind; 7] = [
        InputKind::Hunger,
        InputKind::Thirst,
        InputKind::Fatigue,
        InputKind::Loneliness,
        InputKind::Boredom,
        InputKind::Curiosity,
        InputKind::Hygiene,
    ];

    /// Dense array index.  Matches the position in [`InputKind::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name of the need in the world's needs store, if this is a need input.
    pub fn need_name(self) -> Option<&'static str> {
        match self {
            InputKind::Hunger     => Some("hunger"),
            InputKind::Thirst     => Some("thirst"),
            InputKind::Fatigue    => Some("fatigue"),
            InputKind::Loneliness => Some("social"),
            InputKind::Boredom    => Some("fun"),
            InputKind::Curiosity  => Some("curiosity"),
            InputKind::Hygiene    => Some("hygiene"),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Hunger           => "hunger",
            InputKind::Thirst           => "thirst",
            InputKind::Fatigue          => "fatigue",
            InputKind::Loneliness       => "loneliness",
            InputKind::Boredom          => "boredom",
            InputKind::Curiosity        => "curiosity",
            InputKind::Hygiene          => "hygiene",
            InputKind::Energy           => "energy",
            InputKind::EmotionIntensity => "emotion_intensity",
            InputKind::Fear             => "fear",
            InputKind::Aggression       => "aggression",
            InputKind::Sunlight         => "sunlight",
            InputKind::WeatherSeverity  => "weather_severity",
            InputKind::Affinity         => "affinity",
            InputKind::Crowding         => "crowding",
            InputKind::TargetPresent    => "target_present",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        InputKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown input kind '{s}'"))
    }
}
