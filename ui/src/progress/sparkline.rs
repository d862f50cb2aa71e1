//! Smoothed sparkline rendering.
//!
//! The geometry is pure: values are laid out into pixel-space points and
//! smoothed into path commands (quadratic curve to the midpoint of each
//! consecutive pair, straight final segment). Drawing goes through the
//! [`Surface`] trait so the same renderer feeds the browser canvas, SVG
//! markup, and the raster snapshot used by the export panel.

use std::fmt::Write as _;

/// Inner padding between the plot and the surface edge, in pixels.
pub const PADDING: f64 = 4.0;

pub const DEFAULT_WIDTH: f64 = 120.0;
pub const DEFAULT_HEIGHT: f64 = 36.0;

/// Solid color with an alpha channel, understood by every surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` string for canvas and SVG attributes.
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
}

/// Minimal 2D drawing contract, shaped after the browser canvas API. Fill
/// and stroke both consume the current path.
pub trait Surface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn close_path(&mut self);
    fn fill_vertical_gradient(&mut self, top: Rgba, bottom: Rgba, y_top: f64, y_bottom: f64);
    fn stroke_line(&mut self, color: Rgba, width: f64);
}

/// Map a value series onto plot coordinates.
///
/// The literal bounds 1 and 0 are always folded into max/min so an
/// all-equal series still spans a sensible range and the baseline stays
/// anchored near zero. A single value becomes a flat two-point segment
/// across the plot width; the naive `index / (n - 1)` mapping would
/// divide by zero there.
pub fn layout_points(values: &[f64], width: f64, height: f64) -> Vec<SparkPoint> {
    if values.is_empty() {
        return Vec::new();
    }

    let max = values.iter().copied().fold(1.0_f64, f64::max);
    let min = values.iter().copied().fold(0.0_f64, f64::min);
    let mut range = max - min;
    if range == 0.0 {
        range = 1.0;
    }

    let plot_width = width - 2.0 * PADDING;
    let plot_height = height - 2.0 * PADDING;
    let y_of = |value: f64| height - PADDING - ((value - min) / range) * plot_height;

    if values.len() == 1 {
        let y = y_of(values[0]);
        return vec![
            SparkPoint { x: PADDING, y },
            SparkPoint {
                x: PADDING + plot_width,
                y,
            },
        ];
    }

    let step = plot_width / (values.len() - 1) as f64;
    values
        .iter()
        .enumerate()
        .map(|(index, value)| SparkPoint {
            x: PADDING + index as f64 * step,
            y: y_of(*value),
        })
        .collect()
}

/// Smooth a polyline into path commands: each interior point becomes the
/// control point of a quadratic curve ending at the midpoint towards its
/// successor, and the final segment runs straight to the last point. The
/// curve passes near every point without overshoot.
pub fn smooth_path(points: &[SparkPoint]) -> Vec<PathCommand> {
    let Some(first) = points.first() else {
        return Vec::new();
    };

    let mut commands = vec![PathCommand::MoveTo {
        x: first.x,
        y: first.y,
    }];

    if points.len() < 2 {
        return commands;
    }

    for window in points.windows(2).skip(1) {
        let (control, next) = (window[0], window[1]);
        commands.push(PathCommand::QuadTo {
            cx: control.x,
            cy: control.y,
            x: (control.x + next.x) / 2.0,
            y: (control.y + next.y) / 2.0,
        });
    }

    let last = points[points.len() - 1];
    commands.push(PathCommand::LineTo { x: last.x, y: last.y });
    commands
}

/// SVG path data (`d` attribute) for a command list.
pub fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match command {
            PathCommand::MoveTo { x, y } => {
                let _ = write!(d, "M {x:.2} {y:.2}");
            }
            PathCommand::LineTo { x, y } => {
                let _ = write!(d, "L {x:.2} {y:.2}");
            }
            PathCommand::QuadTo { cx, cy, x, y } => {
                let _ = write!(d, "Q {cx:.2} {cy:.2} {x:.2} {y:.2}");
            }
        }
    }
    d
}

/// Paint a smoothed sparkline onto `surface`: gradient-filled area under
/// the curve, then a 2px round-cap stroke in the series color. Empty input
/// issues no draw calls, so callers that reuse a surface must pre-clear it.
pub fn render<S: Surface>(surface: &mut S, values: &[f64], color: Rgba, width: f64, height: f64) {
    let points = layout_points(values, width, height);
    if points.is_empty() {
        return;
    }

    let commands = smooth_path(&points);
    let first = points[0];
    let last = points[points.len() - 1];

    surface.begin_path();
    surface.move_to(first.x, height);
    surface.line_to(first.x, first.y);
    replay(surface, &commands[1..]);
    surface.line_to(last.x, height);
    surface.close_path();
    surface.fill_vertical_gradient(color.with_alpha(0.19), color.with_alpha(0.02), 0.0, height);

    surface.begin_path();
    replay(surface, &commands);
    surface.stroke_line(color, 2.0);
}

fn replay<S: Surface>(surface: &mut S, commands: &[PathCommand]) {
    for command in commands {
        match *command {
            PathCommand::MoveTo { x, y } => surface.move_to(x, y),
            PathCommand::LineTo { x, y } => surface.line_to(x, y),
            PathCommand::QuadTo { cx, cy, x, y } => surface.quad_to(cx, cy, x, y),
        }
    }
}

/// Surface that accumulates SVG markup. Used for the export snapshot and
/// for the desktop webview, where no raw canvas handle exists.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    path: String,
    body: String,
    gradients: usize,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            path: String::new(),
            body: String::new(),
            gradients: 0,
        }
    }

    pub fn into_markup(self) -> String {
        format!(
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>{body}</svg>",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }

    /// Inner elements only, for embedding into a larger SVG document.
    pub fn into_body(self) -> String {
        self.body
    }
}

impl Surface for SvgSurface {
    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        let _ = write!(self.path, "M {x:.2} {y:.2}");
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.path, " L {x:.2} {y:.2}");
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let _ = write!(self.path, " Q {cx:.2} {cy:.2} {x:.2} {y:.2}");
    }

    fn close_path(&mut self) {
        self.path.push_str(" Z");
    }

    fn fill_vertical_gradient(&mut self, top: Rgba, bottom: Rgba, y_top: f64, y_bottom: f64) {
        self.gradients += 1;
        let id = format!("spark-fill-{}", self.gradients);
        let _ = write!(
            self.body,
            "<defs><linearGradient id='{id}' gradientUnits='userSpaceOnUse' x1='0' y1='{y_top}' x2='0' y2='{y_bottom}'>\
             <stop offset='0' stop-color='rgb({tr},{tg},{tb})' stop-opacity='{ta}'/>\
             <stop offset='1' stop-color='rgb({br},{bg},{bb})' stop-opacity='{ba}'/>\
             </linearGradient></defs><path d='{d}' fill='url(#{id})'/>",
            tr = top.r,
            tg = top.g,
            tb = top.b,
            ta = top.a,
            br = bottom.r,
            bg = bottom.g,
            bb = bottom.b,
            ba = bottom.a,
            d = self.path,
        );
    }

    fn stroke_line(&mut self, color: Rgba, width: f64) {
        let _ = write!(
            self.body,
            "<path d='{d}' fill='none' stroke='{stroke}' stroke-width='{width}' stroke-linecap='round'/>",
            d = self.path,
            stroke = color.css(),
        );
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

#[cfg(target_arch = "wasm32")]
mod canvas {
    use super::{Rgba, Surface};
    use web_sys::CanvasRenderingContext2d;

    /// Surface over a live browser 2D context.
    pub struct CanvasSurface<'a> {
        ctx: &'a CanvasRenderingContext2d,
    }

    impl<'a> CanvasSurface<'a> {
        pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
            Self { ctx }
        }
    }

    impl Surface for CanvasSurface<'_> {
        fn begin_path(&mut self) {
            self.ctx.begin_path();
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.ctx.move_to(x, y);
        }

        fn line_to(&mut self, x: f64, y: f64) {
            self.ctx.line_to(x, y);
        }

        fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
            self.ctx.quadratic_curve_to(cx, cy, x, y);
        }

        fn close_path(&mut self) {
            self.ctx.close_path();
        }

        fn fill_vertical_gradient(&mut self, top: Rgba, bottom: Rgba, y_top: f64, y_bottom: f64) {
            let gradient = self.ctx.create_linear_gradient(0.0, y_top, 0.0, y_bottom);
            let _ = gradient.add_color_stop(0.0, &top.css());
            let _ = gradient.add_color_stop(1.0, &bottom.css());
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.fill();
        }

        fn stroke_line(&mut self, color: Rgba, width: f64) {
            self.ctx.set_stroke_style_str(&color.css());
            self.ctx.set_line_width(width);
            self.ctx.set_line_cap("round");
            self.ctx.stroke();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use raster::PixmapSurface;

#[cfg(not(target_arch = "wasm32"))]
mod raster {
    use super::{Rgba, Surface};
    use tiny_skia::{
        FillRule, GradientStop, LineCap, LinearGradient, Paint, PathBuilder, Pixmap, Point,
        SpreadMode, Stroke, Transform,
    };

    /// Raster surface for PNG snapshots on native builds.
    pub struct PixmapSurface {
        pixmap: Pixmap,
        builder: PathBuilder,
    }

    impl PixmapSurface {
        pub fn new(width: u32, height: u32) -> Option<Self> {
            Some(Self {
                pixmap: Pixmap::new(width, height)?,
                builder: PathBuilder::new(),
            })
        }

        pub fn fill_background(&mut self, color: Rgba) {
            self.pixmap.fill(to_skia_color(color));
        }

        pub fn encode_png(&self) -> Result<Vec<u8>, String> {
            self.pixmap.encode_png().map_err(|err| err.to_string())
        }

        fn take_path(&mut self) -> Option<tiny_skia::Path> {
            std::mem::replace(&mut self.builder, PathBuilder::new()).finish()
        }
    }

    fn to_skia_color(color: Rgba) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba(
            f32::from(color.r) / 255.0,
            f32::from(color.g) / 255.0,
            f32::from(color.b) / 255.0,
            color.a.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::BLACK)
    }

    impl Surface for PixmapSurface {
        fn begin_path(&mut self) {
            self.builder = PathBuilder::new();
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.builder.move_to(x as f32, y as f32);
        }

        fn line_to(&mut self, x: f64, y: f64) {
            self.builder.line_to(x as f32, y as f32);
        }

        fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
            self.builder.quad_to(cx as f32, cy as f32, x as f32, y as f32);
        }

        fn close_path(&mut self) {
            self.builder.close();
        }

        fn fill_vertical_gradient(&mut self, top: Rgba, bottom: Rgba, y_top: f64, y_bottom: f64) {
            let Some(path) = self.take_path() else {
                return;
            };
            let Some(shader) = LinearGradient::new(
                Point::from_xy(0.0, y_top as f32),
                Point::from_xy(0.0, y_bottom as f32),
                vec![
                    GradientStop::new(0.0, to_skia_color(top)),
                    GradientStop::new(1.0, to_skia_color(bottom)),
                ],
                SpreadMode::Pad,
                Transform::identity(),
            ) else {
                return;
            };

            let mut paint = Paint::default();
            paint.shader = shader;
            paint.anti_alias = true;
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        fn stroke_line(&mut self, color: Rgba, width: f64) {
            let Some(path) = self.take_path() else {
                return;
            };

            let mut paint = Paint::default();
            paint.set_color(to_skia_color(color));
            paint.anti_alias = true;

            let stroke = Stroke {
                width: width as f32,
                line_cap: LineCap::Round,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Begin,
        MoveTo(f64, f64),
        LineTo(f64, f64),
        QuadTo(f64, f64, f64, f64),
        Close,
        Fill,
        Stroke,
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl Surface for RecordingSurface {
        fn begin_path(&mut self) {
            self.calls.push(Call::Begin);
        }
        fn move_to(&mut self, x: f64, y: f64) {
            self.calls.push(Call::MoveTo(x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.calls.push(Call::LineTo(x, y));
        }
        fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
            self.calls.push(Call::QuadTo(cx, cy, x, y));
        }
        fn close_path(&mut self) {
            self.calls.push(Call::Close);
        }
        fn fill_vertical_gradient(&mut self, _: Rgba, _: Rgba, _: f64, _: f64) {
            self.calls.push(Call::Fill);
        }
        fn stroke_line(&mut self, _: Rgba, _: f64) {
            self.calls.push(Call::Stroke);
        }
    }

    const TEAL: Rgba = Rgba::new(20, 184, 166);

    fn drawn_ys(calls: &[Call]) -> Vec<f64> {
        let mut ys = Vec::new();
        for call in calls {
            match call {
                Call::MoveTo(_, y) | Call::LineTo(_, y) => ys.push(*y),
                Call::QuadTo(_, cy, _, y) => {
                    ys.push(*cy);
                    ys.push(*y);
                }
                _ => {}
            }
        }
        ys
    }

    #[test]
    fn empty_series_issues_no_draw_calls() {
        let mut surface = RecordingSurface::default();
        render(&mut surface, &[], TEAL, DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn identical_values_produce_a_flat_line() {
        let points = layout_points(&[1.0, 1.0, 1.0], DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(points.len(), 3);
        let first_y = points[0].y;
        assert!(first_y.is_finite());
        assert!(points.iter().all(|p| (p.y - first_y).abs() < 1e-9));

        // The surface still receives a fill and a stroke pass.
        let mut surface = RecordingSurface::default();
        render(&mut surface, &[1.0, 1.0, 1.0], TEAL, DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert!(surface.calls.contains(&Call::Fill));
        assert!(surface.calls.contains(&Call::Stroke));
        assert!(drawn_ys(&surface.calls).iter().all(|y| y.is_finite()));
    }

    #[test]
    fn single_value_becomes_a_flat_segment() {
        let points = layout_points(&[5.0], DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].y, points[1].y);
        assert!(points[0].x < points[1].x);
        assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));

        let mut surface = RecordingSurface::default();
        render(&mut surface, &[5.0], TEAL, DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert!(surface.calls.contains(&Call::Stroke));
    }

    #[test]
    fn layout_anchors_bounds_at_zero_and_one() {
        // max folds in 1, min folds in 0, so 0.5 sits exactly mid-range.
        let points = layout_points(&[0.5], DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let mid = DEFAULT_HEIGHT - PADDING - 0.5 * (DEFAULT_HEIGHT - 2.0 * PADDING);
        assert!((points[0].y - mid).abs() < 1e-9);
    }

    #[test]
    fn layout_respects_padding() {
        let points = layout_points(&[0.2, 0.9, 0.4], DEFAULT_WIDTH, DEFAULT_HEIGHT);
        assert_eq!(points[0].x, PADDING);
        assert_eq!(points[2].x, DEFAULT_WIDTH - PADDING);
        assert!(points
            .iter()
            .all(|p| p.y >= PADDING - 1e-9 && p.y <= DEFAULT_HEIGHT - PADDING + 1e-9));
    }

    #[test]
    fn smoothing_curves_through_midpoints() {
        let points = vec![
            SparkPoint { x: 0.0, y: 10.0 },
            SparkPoint { x: 10.0, y: 20.0 },
            SparkPoint { x: 20.0, y: 10.0 },
        ];

        let commands = smooth_path(&points);
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo { x: 0.0, y: 10.0 },
                PathCommand::QuadTo {
                    cx: 10.0,
                    cy: 20.0,
                    x: 15.0,
                    y: 15.0
                },
                PathCommand::LineTo { x: 20.0, y: 10.0 },
            ]
        );
    }

    #[test]
    fn two_points_collapse_to_a_straight_segment() {
        let points = vec![
            SparkPoint { x: 0.0, y: 5.0 },
            SparkPoint { x: 8.0, y: 9.0 },
        ];
        let commands = smooth_path(&points);
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo { x: 0.0, y: 5.0 },
                PathCommand::LineTo { x: 8.0, y: 9.0 },
            ]
        );
    }

    #[test]
    fn fill_path_closes_down_to_the_baseline() {
        let mut surface = RecordingSurface::default();
        render(&mut surface, &[0.2, 0.8], TEAL, DEFAULT_WIDTH, DEFAULT_HEIGHT);

        // Fill pass starts at the baseline under the first point.
        assert_eq!(surface.calls[0], Call::Begin);
        assert_eq!(surface.calls[1], Call::MoveTo(PADDING, DEFAULT_HEIGHT));
        let close_at = surface
            .calls
            .iter()
            .position(|c| *c == Call::Close)
            .expect("fill path closes");
        assert_eq!(surface.calls[close_at + 1], Call::Fill);
    }

    #[test]
    fn svg_surface_emits_gradient_and_stroke_paths() {
        let mut surface = SvgSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        render(&mut surface, &[0.3, 0.6, 0.5], TEAL, DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let markup = surface.into_markup();
        assert!(markup.contains("linearGradient"));
        assert!(markup.contains("stroke-linecap='round'"));
        assert!(markup.contains("stroke-width='2'"));
    }

    #[test]
    fn path_data_renders_all_command_kinds() {
        let d = path_data(&[
            PathCommand::MoveTo { x: 1.0, y: 2.0 },
            PathCommand::QuadTo {
                cx: 3.0,
                cy: 4.0,
                x: 5.0,
                y: 6.0,
            },
            PathCommand::LineTo { x: 7.0, y: 8.0 },
        ]);
        assert_eq!(d, "M 1.00 2.00 Q 3.00 4.00 5.00 6.00 L 7.00 8.00");
    }
}
