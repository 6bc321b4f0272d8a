//! Rainfall condition bands for a predicted amount (mm).

use serde::Serialize;

/// Weather condition derived from a rainfall prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RainfallCondition {
    Clear,
    LightRain,
    ModerateRain,
    HeavyRain,
    VeryHeavyRain,
    ExtremeRain,
}

impl RainfallCondition {
    /// Classify a raw prediction.
    ///
    /// The value is normalized first (see [`normalize_prediction`]); anything
    /// under 0.5 mm counts as clear.
    pub fn classify(prediction: f64) -> Self {
        let value = normalize_prediction(prediction);
        if value < 0.5 {
            RainfallCondition::Clear
        } else if value < 20.0 {
            RainfallCondition::LightRain
        } else if value < 50.0 {
            RainfallCondition::ModerateRain
        } else if value < 100.0 {
            RainfallCondition::HeavyRain
        } else if value < 150.0 {
            RainfallCondition::VeryHeavyRain
        } else {
            RainfallCondition::ExtremeRain
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RainfallCondition::Clear => "Clear",
            RainfallCondition::LightRain => "Light rain",
            RainfallCondition::ModerateRain => "Moderate rain",
            RainfallCondition::HeavyRain => "Heavy rain",
            RainfallCondition::VeryHeavyRain => "Very heavy rain",
            RainfallCondition::ExtremeRain => "Extreme rain",
        }
    }

    /// Weather icon name for the condition.
    pub fn icon(self) -> &'static str {
        match self {
            RainfallCondition::Clear => "clear-day-fill",
            RainfallCondition::LightRain => "overcast-night-rain",
            RainfallCondition::ModerateRain => "cloud-rain-fill",
            RainfallCondition::HeavyRain => "cloud-showers-heavy-fill",
            RainfallCondition::VeryHeavyRain => "cloud-hail-fill",
            RainfallCondition::ExtremeRain => "cloud-showers-heavy-fill",
        }
    }
}

impl std::fmt::Display for RainfallCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Round to two decimals and clamp negative predictions to zero.
///
/// NaN is treated as no rain.
pub fn normalize_prediction(prediction: f64) -> f64 {
    if prediction.is_nan() {
        return 0.0;
    }
    ((prediction * 100.0).round() / 100.0).max(0.0)
}
