// Trend segmentation - up/down colouring for each line segment of a series
use super::series::CanonicalSeries;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendSegment {
    pub from_index: usize,
    pub to_index: usize,
    pub direction: Direction,
}

pub struct TrendSegmenter;

impl TrendSegmenter {
    /// One segment per adjacent pair of points. A flat segment counts as `Up`.
    pub fn segment(series: &CanonicalSeries) -> Vec<TrendSegment> {
        series
            .points()
            .windows(2)
            .enumerate()
            .map(|(i, pair)| TrendSegment {
                from_index: i,
                to_index: i + 1,
                direction: if pair[1].price >= pair[0].price {
                    Direction::Up
                } else {
                    Direction::Down
                },
            })
            .collect()
    }

    /// Direction of the segment starting at `index`.
    ///
    /// The final point has no outgoing segment; it and any index past the end
    /// render as `Up` so the chart always has a colour to draw.
    pub fn direction_at(segments: &[TrendSegment], index: usize) -> Direction {
        segments
            .get(index)
            .map(|s| s.direction)
            .unwrap_or(Direction::Up)
    }
}
