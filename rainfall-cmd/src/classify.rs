//! Rainfall condition lookup.

use rainfall_core::condition::{normalize_prediction, RainfallCondition};

/// One output line for a classified value.
pub fn describe(value: f64) -> String {
    let condition = RainfallCondition::classify(value);
    format!(
        "{:>8.2} mm  {:<16} {}",
        normalize_prediction(value),
        condition.label(),
        condition.icon()
    )
}

pub fn run_classify(values: &[f64]) {
    for value in values {
        println!("{}", describe(*value));
    }
}
