use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::{mouse, Point, Rectangle, Renderer};
use statdash_metrics::{map_to_points, History, PlotPoint};

/// Canvas program drawing one metric history as a polyline.
///
/// Point placement comes from [`map_to_points`], evaluated against the
/// canvas bounds at draw time.
#[derive(Debug, Clone)]
pub struct Sparkline {
    samples:  Vec<f64>,
    capacity: usize,
    line:     iced::Color,
    fill:     iced::Color,
}

impl Sparkline {
    pub fn new(history: &History, capacity: usize, line: iced::Color) -> Self {
        Self {
            samples: history.values().collect(),
            capacity,
            line,
            fill: iced::Color { a: 0.15, ..line },
        }
    }

    fn points(&self, bounds: Rectangle) -> Vec<PlotPoint> {
        map_to_points(self.samples.iter().copied(), self.capacity, bounds.width, bounds.height)
    }
}

fn to_point(p: &PlotPoint) -> Point {
    Point::new(p.x, p.y)
}

impl<Message> canvas::Program<Message> for Sparkline {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let points = self.points(bounds);

        match points.as_slice() {
            [] => {}
            [only] => frame.fill(&Path::circle(to_point(only), 2.5), self.line),
            [first, rest @ ..] => {
                let line = Path::new(|b| {
                    b.move_to(to_point(first));
                    for p in rest {
                        b.line_to(to_point(p));
                    }
                });

                // Shade the area under the line down to the baseline.
                let last = rest.last().map_or(*first, |p| *p);
                let area = Path::new(|b| {
                    b.move_to(Point::new(first.x, bounds.height));
                    for p in &points {
                        b.line_to(to_point(p));
                    }
                    b.line_to(Point::new(last.x, bounds.height));
                    b.close();
                });

                frame.fill(&area, self.fill);
                frame.stroke(&line, Stroke::default().with_width(2.0).with_color(self.line));
            }
        }

        vec![frame.into_geometry()]
    }
}
