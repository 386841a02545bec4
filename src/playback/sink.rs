//! Visual-state capability interface.
//!
//! Playback never owns the bars. It issues calls against a [`BarSink`], which
//! the rendering side implements (terminal chart, test double, anything else).

use serde::{Deserialize, Serialize};

/// Color tags playback can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    /// Untouched bar.
    #[default]
    Idle,
    /// Being compared.
    Compare,
    /// Just swapped.
    Swapped,
    /// Current insertion key.
    Key,
    /// Shifted or written by insertion.
    Shift,
}

/// Capability set playback needs from the rendering side.
///
/// All calls are synchronous and assumed to succeed.
pub trait BarSink {
    /// Set the height of bar `index`.
    fn set_height(&mut self, index: usize, value: u32);

    /// Set the color of bar `index`.
    fn set_color(&mut self, index: usize, color: ColorTag);

    /// Exchange the heights of bars `i` and `j`.
    fn swap_heights(&mut self, i: usize, j: usize);

    /// Current height of bar `index`.
    fn height(&self, index: usize) -> u32;

    /// Number of bars.
    fn bar_count(&self) -> usize;
}

/// One rendered bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bar {
    /// Bar height.
    pub height: u32,
    /// Current color.
    pub color: ColorTag,
}

/// In-memory bar chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChart {
    bars: Vec<Bar>,
}

impl BarChart {
    /// Build a chart with idle bars of the given heights.
    #[must_use]
    pub fn from_values(values: &[u32]) -> Self {
        Self {
            bars: values
                .iter()
                .map(|&height| Bar {
                    height,
                    color: ColorTag::Idle,
                })
                .collect(),
        }
    }

    /// Replace every bar with idle bars of the given heights.
    pub fn reset(&mut self, values: &[u32]) {
        *self = Self::from_values(values);
    }

    /// Set every bar back to idle, keeping heights.
    pub fn clear_colors(&mut self) {
        for bar in &mut self.bars {
            bar.color = ColorTag::Idle;
        }
    }

    /// All bars.
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Heights in order.
    #[must_use]
    pub fn heights(&self) -> Vec<u32> {
        self.bars.iter().map(|bar| bar.height).collect()
    }

    /// Colors in order.
    #[must_use]
    pub fn colors(&self) -> Vec<ColorTag> {
        self.bars.iter().map(|bar| bar.color).collect()
    }

    /// Tallest bar, or 0 for an empty chart.
    #[must_use]
    pub fn max_height(&self) -> u32 {
        self.bars.iter().map(|bar| bar.height).max().unwrap_or(0)
    }

    /// Number of bars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the chart has no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl BarSink for BarChart {
    fn set_height(&mut self, index: usize, value: u32) {
        self.bars[index].height = value;
    }

    fn set_color(&mut self, index: usize, color: ColorTag) {
        self.bars[index].color = color;
    }

    fn swap_heights(&mut self, i: usize, j: usize) {
        let tmp = self.bars[i].height;
        self.bars[i].height = self.bars[j].height;
        self.bars[j].height = tmp;
    }

    fn height(&self, index: usize) -> u32 {
        self.bars[index].height
    }

    fn bar_count(&self) -> usize {
        self.bars.len()
    }
}

/// A sink call, as seen by [`RecordingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCall {
    /// `set_height(index, value)`
    SetHeight(usize, u32),
    /// `set_color(index, color)`
    SetColor(usize, ColorTag),
    /// `swap_heights(i, j)`
    SwapHeights(usize, usize),
}

/// Sink that logs every mutating call and forwards it to a [`BarChart`].
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    chart: BarChart,
    calls: Vec<SinkCall>,
}

impl RecordingSink {
    /// Record calls against a chart built from `values`.
    #[must_use]
    pub fn new(values: &[u32]) -> Self {
        Self {
            chart: BarChart::from_values(values),
            calls: Vec::new(),
        }
    }

    /// Calls seen so far.
    #[must_use]
    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Underlying chart.
    #[must_use]
    pub const fn chart(&self) -> &BarChart {
        &self.chart
    }
}

impl BarSink for RecordingSink {
    fn set_height(&mut self, index: usize, value: u32) {
        self.calls.push(SinkCall::SetHeight(index, value));
        self.chart.set_height(index, value);
    }

    fn set_color(&mut self, index: usize, color: ColorTag) {
        self.calls.push(SinkCall::SetColor(index, color));
        self.chart.set_color(index, color);
    }

    fn swap_heights(&mut self, i: usize, j: usize) {
        self.calls.push(SinkCall::SwapHeights(i, j));
        self.chart.swap_heights(i, j);
    }

    fn height(&self, index: usize) -> u32 {
        self.chart.height(index)
    }

    fn bar_count(&self) -> usize {
        self.chart.bar_count()
    }
}
