//! Reshapes prediction rows into display-ready chart points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{PredictionRecord, RawTimestamp};

/// Label used for a timestamp that cannot be read as a date.
pub const INVALID_DATE: &str = "Invalid Date";

/// An (x, y) pair ready to hand to the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayPoint {
    /// Calendar date label (no time of day).
    pub x: String,
    /// Rainfall; `None` when the row had no usable value.
    pub y: Option<f64>,
}

/// Turns a raw timestamp into a calendar date label.
pub trait DateLabeler {
    fn label(&self, timestamp: Option<&RawTimestamp>) -> String;
}

/// Numeric date layouts for [`ChronoLabeler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `1/2/2024` (en-US short date).
    #[default]
    MonthDayYear,
    /// `2/1/2024` (id-ID, en-GB style).
    DayMonthYear,
    /// `2024-01-02`.
    Iso,
}

impl DateStyle {
    fn format_str(self) -> &'static str {
        match self {
            DateStyle::MonthDayYear => "%-m/%-d/%Y",
            DateStyle::DayMonthYear => "%-d/%-m/%Y",
            DateStyle::Iso => "%Y-%m-%d",
        }
    }

    pub fn format(self, instant: &DateTime<Utc>) -> String {
        instant.format(self.format_str()).to_string()
    }
}

impl std::str::FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mdy" | "month-day-year" | "us" => Ok(DateStyle::MonthDayYear),
            "dmy" | "day-month-year" => Ok(DateStyle::DayMonthYear),
            "iso" => Ok(DateStyle::Iso),
            other => Err(format!("unknown date style '{other}' (expected mdy, dmy or iso)")),
        }
    }
}

/// Host-independent labeler: dates are taken in UTC and formatted with
/// a fixed [`DateStyle`], so output does not depend on the machine's zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoLabeler {
    pub style: DateStyle,
}

impl ChronoLabeler {
    pub fn new(style: DateStyle) -> Self {
        Self { style }
    }
}

impl DateLabeler for ChronoLabeler {
    fn label(&self, timestamp: Option<&RawTimestamp>) -> String {
        timestamp
            .and_then(RawTimestamp::parse)
            .map(|instant| self.style.format(&instant))
            .unwrap_or_else(|| INVALID_DATE.to_string())
    }
}

/// Map rows to display points, one per row, in the server's order.
pub fn transform<L>(records: &[PredictionRecord], labeler: &L) -> Vec<DisplayPoint>
where
    L: DateLabeler + ?Sized,
{
    records
        .iter()
        .map(|record| DisplayPoint {
            x: labeler.label(record.timestamp.as_ref()),
            y: record.curah_hujan,
        })
        .collect()
}

/// Column form of a point series, as a line trace wants it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplaySeries {
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
}

impl DisplaySeries {
    pub fn from_points(points: &[DisplayPoint]) -> Self {
        let (x, y) = points.iter().map(|p| (p.x.clone(), p.y)).unzip();
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
