use bevy_color::Srgba;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    Point,
}

/// A point on the cartesian chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPoint<T> {
    pub value: T,
    pub x: f32,
    pub y: f32,
}

impl<T> GraphPoint<T> {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Running minimum and maximum of one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisStats {
    range: Option<(f32, f32)>,
    count: usize,
}

impl AxisStats {
    fn push(&mut self, value: f32) {
        self.count += 1;
        self.range = Some(match self.range {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    /// Number of finite samples pushed.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn min(&self) -> Option<f32> {
        self.range.map(|(min, _)| min)
    }

    pub fn max(&self) -> Option<f32> {
        self.range.map(|(_, max)| max)
    }
}

/// A data series in the cartesian chart.
#[derive(Debug, Clone)]
pub struct GraphSeries<T> {
    name: String,
    series_type: SeriesType,
    pub color: Srgba,
    pub visible: bool,
    points: Vec<GraphPoint<T>>,
    x_stats: AxisStats,
    y_stats: AxisStats,
}

impl<T> GraphSeries<T> {
    pub(crate) fn new(series_type: SeriesType, name: impl Into<String>, color: Srgba) -> Self {
        Self {
            name: name.into(),
            series_type,
            color,
            visible: true,
            points: Vec::new(),
            x_stats: AxisStats::default(),
            y_stats: AxisStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series_type(&self) -> SeriesType {
        self.series_type
    }

    pub fn points(&self) -> &[GraphPoint<T>] {
        &self.points
    }

    pub fn x_stats(&self) -> &AxisStats {
        &self.x_stats
    }

    pub fn y_stats(&self) -> &AxisStats {
        &self.y_stats
    }

    /// Append a point. Points with a NaN or infinite coordinate are kept but not counted in the stats.
    pub fn add(&mut self, value: T, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.x_stats.push(x);
            self.y_stats.push(y);
        }
        self.points.push(GraphPoint { value, x, y });
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.x_stats = AxisStats::default();
        self.y_stats = AxisStats::default();
    }
}
