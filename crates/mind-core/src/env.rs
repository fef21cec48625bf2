//! Environment and emotion enums shared by every crate that reads sensors.
//!
//! The world simulation owns weather, daylight and the emotional model; the
//! decision core only sees these coarse labels through the `Environment` and
//! `Sensors` collaborator traits.

/// Current weather as reported by the world simulation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Weather {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Storm,
    Snow,
}

impl Weather {
    /// How hostile the weather is to being outdoors, in [0, 1].
    ///
    /// Feeds the `WeatherSeverity` decision input.
    pub fn severity(self) -> f32 {
        match self {
            Weather::Clear  => 0.0,
            Weather::Cloudy => 0.15,
            Weather::Rain   => 0.5,
            Weather::Snow   => 0.7,
            Weather::Storm  => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Clear  => "clear",
            Weather::Cloudy => "cloudy",
            Weather::Rain   => "rain",
            Weather::Storm  => "storm",
            Weather::Snow   => "snow",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The dominant emotion of an agent, paired with an intensity by the sensor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum EmotionKind {
    #[default]
    Calm,
    Happy,
    Sad,
    Angry,
    Afraid,
    Curious,
}

impl EmotionKind {
    /// `true` for emotions that push an agent away from social contact.
    #[inline]
    pub fn is_negative(self) -> bool {
        matches!(self, EmotionKind::Sad | EmotionKind::Angry | EmotionKind::Afraid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionKind::Calm    => "calm",
            EmotionKind::Happy   => "happy",
            EmotionKind::Sad     => "sad",
            EmotionKind::Angry   => "angry",
            EmotionKind::Afraid  => "afraid",
            EmotionKind::Curious => "curious",
        }
    }
}

impl std::fmt::Display for EmotionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
