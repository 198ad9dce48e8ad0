use itertools::{Itertools, MinMaxResult};

use crate::error::{VoronoiError, VoronoiResult};
use crate::geometry::{distance, Point};

/// Settings for building a diagram.
///
/// `epsilon` is the tolerance of the sweep: near-ties in the event queue
/// and near-zero ray parameters. The rest only matters for bounded
/// diagrams and places the auxiliary sites, see [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiConfig {
    pub epsilon: f64,
    /// How far out the auxiliary sites sit, in frame diagonals.
    pub spread: f64,
    /// Extra horizontal extent the frame must cover, as (min, max).
    pub x_range: Option<(f64, f64)>,
    /// Extra vertical extent the frame must cover, as (min, max).
    pub y_range: Option<(f64, f64)>,
}

impl Default for VoronoiConfig {
    fn default() -> VoronoiConfig {
        VoronoiConfig {
            epsilon: 1e-10,
            spread: 10.0,
            x_range: None,
            y_range: None,
        }
    }
}

impl VoronoiConfig {
    pub fn new() -> VoronoiConfig {
        VoronoiConfig::default()
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> VoronoiConfig {
        self.epsilon = epsilon;
        self
    }

    pub fn with_spread(mut self, spread: f64) -> VoronoiConfig {
        self.spread = spread;
        self
    }

    pub fn with_x_range(mut self, min: f64, max: f64) -> VoronoiConfig {
        self.x_range = Some((min, max));
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> VoronoiConfig {
        self.y_range = Some((min, max));
        self
    }

    pub fn validate(&self) -> VoronoiResult<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(invalid(format!("epsilon must be positive and finite, got {}", self.epsilon)));
        }

        // Closer in, the auxiliary sites would claim part of the frame.
        if !(self.spread.is_finite() && self.spread >= 1.0) {
            return Err(invalid(format!("spread must be finite and at least 1, got {}", self.spread)));
        }

        for &(axis, range) in &[("x", self.x_range), ("y", self.y_range)] {
            if let Some((min, max)) = range {
                if !(min.is_finite() && max.is_finite()) {
                    return Err(invalid(format!("{} range must be finite, got [{}, {}]", axis, min, max)));
                }
                if min > max {
                    return Err(invalid(format!("{} range is inverted: [{}, {}]", axis, min, max)));
                }
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> VoronoiError {
    VoronoiError::InvalidConfiguration { message }
}

/// The axis-aligned box the auxiliary sites are placed around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub min: Point,
    pub max: Point,
}

impl Frame {
    /// Bounding box of the sites, grown to cover the configured ranges.
    ///
    /// Without sites or ranges on an axis the frame spans [-1, 1] on it. A
    /// flat axis is widened by 0.5 on each side.
    pub fn around(sites: &[Point], config: &VoronoiConfig) -> Frame {
        let (min_x, max_x) = extent(sites.iter().map(|site| site.x), config.x_range);
        let (min_y, max_y) = extent(sites.iter().map(|site| site.y), config.y_range);

        Frame {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    pub fn center(&self) -> Point {
        Point::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
    }

    pub fn diagonal(&self) -> f64 {
        distance(self.min, self.max)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Four sites far enough out that every cell of a site in the frame is
    /// bounded: right, top, left, bottom of the center at `spread`
    /// diagonals.
    pub fn auxiliary_sites(&self, spread: f64) -> [Point; 4] {
        let c = self.center();
        let reach = spread * self.diagonal();

        [
            Point::new(c.x + reach, c.y),
            Point::new(c.x, c.y + reach),
            Point::new(c.x - reach, c.y),
            Point::new(c.x, c.y - reach),
        ]
    }
}

fn extent<I>(values: I, range: Option<(f64, f64)>) -> (f64, f64)
where
    I: Iterator<Item = f64>,
{
    let found = match values.minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    };

    let (min, max) = match (found, range) {
        (Some((min, max)), Some((low, high))) => (min.min(low), max.max(high)),
        (Some(extent), None) | (None, Some(extent)) => extent,
        (None, None) => (-1.0, 1.0),
    };

    if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}
