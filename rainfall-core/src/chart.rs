//! Chart model and the drawing surface that owns it.
//!
//! `ChartState` serializes to the `data`/`layout` pair Plotly's `newPlot`
//! takes. The actual drawing happens behind [`Renderer`] so tests can use
//! a fake instead of a DOM.

use serde::Serialize;

use crate::config::ChartLabels;
use crate::series::{DisplayPoint, DisplaySeries};

/// Plotly trace type used for the rainfall line.
const TRACE_TYPE: &str = "scatter";
const TRACE_MODE: &str = "lines+markers";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

/// One line series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

impl Trace {
    pub fn line(series: DisplaySeries, color: Option<&str>) -> Self {
        Self {
            x: series.x,
            y: series.y,
            kind: TRACE_TYPE.to_string(),
            mode: TRACE_MODE.to_string(),
            marker: color.map(|color| Marker {
                color: color.to_string(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automargin: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

impl ChartLayout {
    /// Axes only. The y-axis auto-margins so long tick labels are not clipped.
    pub fn untitled(labels: &ChartLabels) -> Self {
        Self {
            title: None,
            xaxis: Axis {
                title: labels.x_axis.clone(),
                automargin: None,
            },
            yaxis: Axis {
                title: labels.y_axis.clone(),
                automargin: Some(true),
            },
        }
    }

    pub fn titled(labels: &ChartLabels) -> Self {
        Self {
            title: Some(labels.title.clone()),
            ..Self::untitled(labels)
        }
    }
}

/// Everything currently drawn on the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartState {
    pub data: Vec<Trace>,
    pub layout: ChartLayout,
}

impl ChartState {
    /// One empty line, no title.
    pub fn empty(labels: &ChartLabels) -> Self {
        Self {
            data: vec![Trace::line(DisplaySeries::default(), Some(labels.line_color.as_str()))],
            layout: ChartLayout::untitled(labels),
        }
    }

    /// A single line built from `points`, with the chart title.
    pub fn from_points(points: &[DisplayPoint], labels: &ChartLabels) -> Self {
        Self {
            data: vec![Trace::line(DisplaySeries::from_points(points), None)],
            layout: ChartLayout::titled(labels),
        }
    }

    pub fn data_json(&self) -> String {
        serde_json::to_string(&self.data).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn layout_json(&self) -> String {
        serde_json::to_string(&self.layout).unwrap_or_else(|_| "{}".to_string())
    }

    /// Number of points across all traces.
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }
}

/// Something that can draw a [`ChartState`] into a named target.
pub trait Renderer {
    /// First draw into `target`.
    fn init(&mut self, target: &str, state: &ChartState);

    /// Throw away whatever `target` shows and draw `state` instead.
    fn replace_data(&mut self, target: &str, state: &ChartState);
}

/// The chart's one drawing target and the state last drawn into it.
///
/// Only [`ChartSurface::initialize`] creates one, so a surface is always
/// initialized before anything can redraw it.
#[derive(Debug)]
pub struct ChartSurface<R> {
    renderer: R,
    target: String,
    labels: ChartLabels,
    state: ChartState,
}

impl<R: Renderer> ChartSurface<R> {
    /// Draw the empty chart into `target`.
    pub fn initialize(mut renderer: R, target: impl Into<String>, labels: ChartLabels) -> Self {
        let target = target.into();
        let state = ChartState::empty(&labels);
        renderer.init(&target, &state);
        log::debug!("chart '{}' initialized", target);
        Self {
            renderer,
            target,
            labels,
            state,
        }
    }

    /// Replace the whole chart with one line made of `points`.
    pub fn redraw(&mut self, points: &[DisplayPoint]) {
        self.state = ChartState::from_points(points, &self.labels);
        self.renderer.replace_data(&self.target, &self.state);
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every draw instead of drawing.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRenderer {
        pub inits: Vec<(String, ChartState)>,
        pub replaces: Vec<(String, ChartState)>,
    }

    impl Renderer for RecordingRenderer {
        fn init(&mut self, target: &str, state: &ChartState) {
            self.inits.push((target.to_string(), state.clone()));
        }

        fn replace_data(&mut self, target: &str, state: &ChartState) {
            self.replaces.push((target.to_string(), state.clone()));
        }
    }

    fn point(x: &str, y: f64) -> DisplayPoint {
        DisplayPoint {
            x: x.to_string(),
            y: Some(y),
        }
    }

    #[test]
    fn test_initialize_draws_empty_chart() {
        let surface =
            ChartSurface::initialize(RecordingRenderer::default(), "chart", ChartLabels::default());
        let renderer = surface.renderer();
        assert_eq!(renderer.inits.len(), 1);
        assert!(renderer.replaces.is_empty());

        let (target, state) = &renderer.inits[0];
        assert_eq!(target, "chart");
        assert_eq!(state.point_count(), 0);
        assert_eq!(state.layout.title, None);
        assert_eq!(state.layout.xaxis.title, "Date");
        assert_eq!(state.layout.yaxis.title, "Rainfall");
        assert_eq!(state.layout.yaxis.automargin, Some(true));
        assert_eq!(state.data[0].marker.as_ref().unwrap().color, "blue");
    }

    #[test]
    fn test_redraw_replaces_not_appends() {
        let mut surface =
            ChartSurface::initialize(RecordingRenderer::default(), "chart", ChartLabels::default());
        surface.redraw(&[point("1/1/2024", 1.0), point("1/2/2024", 2.0)]);
        surface.redraw(&[point("1/3/2024", 3.0)]);

        assert_eq!(surface.state().data.len(), 1);
        assert_eq!(surface.state().data[0].x, vec!["1/3/2024"]);
        assert_eq!(surface.state().data[0].y, vec![Some(3.0)]);
        assert_eq!(surface.renderer().replaces.len(), 2);
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let points = [point("1/1/2024", 5.2), point("1/2/2024", 0.0)];
        let mut surface =
            ChartSurface::initialize(RecordingRenderer::default(), "chart", ChartLabels::default());
        surface.redraw(&points);
        let first = surface.state().clone();
        surface.redraw(&points);
        assert_eq!(&first, surface.state());
    }

    #[test]
    fn test_redraw_empty_keeps_title_and_axes() {
        let mut surface =
            ChartSurface::initialize(RecordingRenderer::default(), "chart", ChartLabels::default());
        surface.redraw(&[]);
        let state = surface.state();
        assert_eq!(state.point_count(), 0);
        assert_eq!(state.layout.title.as_deref(), Some("Daily Rainfall Chart"));
        assert_eq!(state.layout.xaxis.title, "Date");
        assert_eq!(state.layout.yaxis.title, "Rainfall");
    }

    #[test]
    fn test_state_json_shape() {
        let state = ChartState::from_points(
            &[DisplayPoint {
                x: "1/1/2024".to_string(),
                y: None,
            }],
            &ChartLabels::default(),
        );
        let data: serde_json::Value = serde_json::from_str(&state.data_json()).unwrap();
        assert_eq!(
            data,
            serde_json::json!([{"x": ["1/1/2024"], "y": [null], "type": "scatter", "mode": "lines+markers"}])
        );
        let layout: serde_json::Value = serde_json::from_str(&state.layout_json()).unwrap();
        assert_eq!(layout["title"], "Daily Rainfall Chart");
        assert_eq!(layout["yaxis"]["automargin"], true);
        assert!(layout["xaxis"].get("automargin").is_none());
    }
}
