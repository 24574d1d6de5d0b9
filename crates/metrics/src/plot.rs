/// A point in plot space: `x` grows rightwards from 0 to the plot width,
/// `y` grows downwards from 0 (top) to the plot height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f32,
    pub y: f32,
}

impl PlotPoint {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Map a history window to polyline coordinates inside a `width × height` box.
///
/// Horizontal spacing is fixed by the configured `capacity`, not by how many
/// samples exist yet, so a filling buffer draws a line that grows from the
/// left edge and only spans the full width once it is full.
///
/// Vertical scale is the largest sample in `samples`, floored at 1 so an
/// all-zero window sits on the baseline instead of dividing by zero.
pub fn map_to_points<I>(samples: I, capacity: usize, width: f32, height: f32) -> Vec<PlotPoint>
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: Clone,
{
    let samples = samples.into_iter();
    let scale_max = samples.clone().fold(1.0_f64, f64::max);
    let step = if capacity > 1 {
        f64::from(width) / (capacity - 1) as f64
    } else {
        0.0
    };
    let height = f64::from(height);

    samples
        .enumerate()
        .map(|(i, sample)| {
            let x = i as f64 * step;
            let y = height - (sample / scale_max) * height;
            PlotPoint::new(x as f32, y as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(points: &[PlotPoint], expected: &[(f32, f32)]) {
        assert_eq!(points.len(), expected.len());
        for (p, &(x, y)) in points.iter().zip(expected) {
            assert!((p.x - x).abs() < 1e-4, "x {} != {x}", p.x);
            assert!((p.y - y).abs() < 1e-4, "y {} != {y}", p.y);
        }
    }

    #[test]
    fn full_buffer_spans_the_box() {
        let points = map_to_points([0.0, 5.0, 10.0], 3, 100.0, 50.0);
        approx(&points, &[(0.0, 50.0), (50.0, 25.0), (100.0, 0.0)]);
    }

    #[test]
    fn partial_buffer_ramps_up() {
        let points = map_to_points([2.0, 4.0], 5, 100.0, 40.0);
        approx(&points, &[(0.0, 20.0), (25.0, 0.0)]);
    }

    #[test]
    fn all_zero_uses_unit_scale() {
        let points = map_to_points([0.0, 0.0, 0.0], 3, 10.0, 10.0);
        approx(&points, &[(0.0, 10.0), (5.0, 10.0), (10.0, 10.0)]);
    }

    #[test]
    fn small_values_are_not_stretched() {
        let points = map_to_points([0.5], 3, 10.0, 10.0);
        approx(&points, &[(0.0, 5.0)]);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(map_to_points(std::iter::empty(), 60, 100.0, 50.0).is_empty());
        assert_eq!(map_to_points([3.0], 60, 100.0, 50.0).len(), 1);
        approx(&map_to_points([3.0, 6.0], 1, 100.0, 50.0), &[(0.0, 25.0), (0.0, 0.0)]);
    }
}
