//! CPU figure target rasterized with `vello_cpu`.
//!
//! A [`Figure`] is a background colour, a list of [`Axes`] and a list of figure-level overlay
//! [`Mark`]s. Axes map data coordinates into a pixel rectangle and clip their marks to it;
//! overlays are drawn last, in pixel coordinates.

use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Canvas, Point, Rect};
use crate::foundation::error::{PlotvidError, PlotvidResult};
use crate::render::target::{FrameRGBA, RenderTarget};

const PATH_TOLERANCE: f64 = 0.1;

/// Scale of one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    /// Evenly spaced values.
    #[default]
    Linear,
    /// Evenly spaced decades; limits must be positive.
    Log,
}

/// Geometry of a mark.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkKind {
    /// Connected line through `points`; non-finite points break the line.
    Polyline {
        /// Vertices in mark coordinates.
        points: Vec<Point>,
        /// Stroke width in pixels.
        width: f64,
    },
    /// A filled disc at each point.
    Scatter {
        /// Centres in mark coordinates.
        points: Vec<Point>,
        /// Disc radius in pixels.
        radius: f64,
    },
    /// Axis-aligned filled rectangle.
    FilledRect {
        /// Corners in mark coordinates.
        rect: Rect,
    },
}

/// A coloured primitive drawn inside axes (data coordinates) or on the figure (pixels).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mark {
    /// Geometry.
    pub kind: MarkKind,
    /// Straight-alpha RGBA8 colour.
    pub color: [u8; 4],
    /// Layer opacity in `[0, 1]`.
    pub opacity: f32,
}

impl Mark {
    /// Line through `points`.
    pub fn polyline(points: impl Into<Vec<Point>>, width: f64, color: [u8; 4]) -> Self {
        Self::opaque(
            MarkKind::Polyline {
                points: points.into(),
                width,
            },
            color,
        )
    }

    /// Discs of `radius` pixels at `points`.
    pub fn scatter(points: impl Into<Vec<Point>>, radius: f64, color: [u8; 4]) -> Self {
        Self::opaque(
            MarkKind::Scatter {
                points: points.into(),
                radius,
            },
            color,
        )
    }

    /// Filled rectangle.
    pub fn filled_rect(rect: Rect, color: [u8; 4]) -> Self {
        Self::opaque(MarkKind::FilledRect { rect }, color)
    }

    /// Same mark with `opacity`, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    fn opaque(kind: MarkKind, color: [u8; 4]) -> Self {
        Self {
            kind,
            color,
            opacity: 1.0,
        }
    }
}

/// A plot area: pixel rectangle, data limits and the marks drawn in it.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    rect: Rect,
    xlim: (f64, f64),
    ylim: (f64, f64),
    xscale: AxisScale,
    yscale: AxisScale,
    background: Option<[u8; 4]>,
    marks: Vec<Mark>,
}

impl Axes {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            xlim: (0.0, 1.0),
            ylim: (0.0, 1.0),
            xscale: AxisScale::Linear,
            yscale: AxisScale::Linear,
            background: None,
            marks: Vec::new(),
        }
    }

    /// Pixel rectangle of the plot area.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Data limits along x.
    pub fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    /// Data limits along y.
    pub fn ylim(&self) -> (f64, f64) {
        self.ylim
    }

    /// Set the x limits. Reversed limits flip the axis.
    pub fn set_xlim(&mut self, lo: f64, hi: f64) -> PlotvidResult<&mut Self> {
        check_limits("x", lo, hi, self.xscale)?;
        self.xlim = (lo, hi);
        Ok(self)
    }

    /// Set the y limits. Reversed limits flip the axis.
    pub fn set_ylim(&mut self, lo: f64, hi: f64) -> PlotvidResult<&mut Self> {
        check_limits("y", lo, hi, self.yscale)?;
        self.ylim = (lo, hi);
        Ok(self)
    }

    /// Set the x scale; the current limits must suit it.
    pub fn set_xscale(&mut self, scale: AxisScale) -> PlotvidResult<&mut Self> {
        check_limits("x", self.xlim.0, self.xlim.1, scale)?;
        self.xscale = scale;
        Ok(self)
    }

    /// Set the y scale; the current limits must suit it.
    pub fn set_yscale(&mut self, scale: AxisScale) -> PlotvidResult<&mut Self> {
        check_limits("y", self.ylim.0, self.ylim.1, scale)?;
        self.yscale = scale;
        Ok(self)
    }

    /// Fill the plot area with `rgba` before drawing marks; `None` leaves it transparent.
    pub fn set_background(&mut self, rgba: Option<[u8; 4]>) -> &mut Self {
        self.background = rgba;
        self
    }

    /// Add a mark in data coordinates.
    pub fn add_mark(&mut self, mark: Mark) -> &mut Self {
        self.marks.push(mark);
        self
    }

    /// Add an opaque line through `points`.
    pub fn plot(
        &mut self,
        points: impl Into<Vec<Point>>,
        width: f64,
        color: [u8; 4],
    ) -> &mut Self {
        self.add_mark(Mark::polyline(points, width, color))
    }

    /// Add opaque discs at `points`.
    pub fn scatter(
        &mut self,
        points: impl Into<Vec<Point>>,
        radius: f64,
        color: [u8; 4],
    ) -> &mut Self {
        self.add_mark(Mark::scatter(points, radius, color))
    }

    /// Marks added so far.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Pixel position of data point `p`, or `None` when it cannot be placed (non-finite, or
    /// non-positive on a log axis).
    pub fn data_to_pixel(&self, p: Point) -> Option<Point> {
        let fx = axis_fraction(p.x, self.xlim, self.xscale)?;
        let fy = axis_fraction(p.y, self.ylim, self.yscale)?;
        Some(Point::new(
            self.rect.x0 + fx * self.rect.width(),
            self.rect.y1 - fy * self.rect.height(),
        ))
    }
}

fn check_limits(axis: &str, lo: f64, hi: f64, scale: AxisScale) -> PlotvidResult<()> {
    if !lo.is_finite() || !hi.is_finite() || lo == hi {
        return Err(PlotvidError::configuration(format!(
            "{axis} limits must be finite and distinct, got ({lo}, {hi})"
        )));
    }
    if scale == AxisScale::Log && (lo <= 0.0 || hi <= 0.0) {
        return Err(PlotvidError::configuration(format!(
            "{axis} limits must be positive on a log axis, got ({lo}, {hi})"
        )));
    }
    Ok(())
}

fn axis_fraction(v: f64, (lo, hi): (f64, f64), scale: AxisScale) -> Option<f64> {
    if !v.is_finite() {
        return None;
    }
    let f = match scale {
        AxisScale::Linear => (v - lo) / (hi - lo),
        AxisScale::Log => {
            if v <= 0.0 {
                return None;
            }
            (v.log10() - lo.log10()) / (hi.log10() - lo.log10())
        }
    };
    Some(f)
}

/// Render target holding axes and overlays over a solid background.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    canvas: Canvas,
    width: u16,
    height: u16,
    background: [u8; 4],
    axes: Vec<Axes>,
    overlays: Vec<Mark>,
}

impl Figure {
    /// Empty figure with an opaque white background.
    pub fn new(canvas: Canvas) -> PlotvidResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PlotvidError::configuration("figure width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PlotvidError::configuration("figure height exceeds u16"))?;
        Ok(Self {
            canvas,
            width,
            height,
            background: [255, 255, 255, 255],
            axes: Vec::new(),
            overlays: Vec::new(),
        })
    }

    /// Same figure with a straight-alpha background colour.
    pub fn with_background(mut self, rgba: [u8; 4]) -> Self {
        self.background = rgba;
        self
    }

    /// Background colour.
    pub fn background(&self) -> [u8; 4] {
        self.background
    }

    /// Add a plot area covering `rect` (pixels) and return it for configuration.
    pub fn add_axes(&mut self, rect: Rect) -> PlotvidResult<&mut Axes> {
        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        );
        let rect = rect.abs();
        if !rect.is_finite() || rect.area() <= 0.0 || bounds.intersect(rect) != rect {
            return Err(PlotvidError::configuration(format!(
                "axes rectangle {rect:?} must be non-empty and inside {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        self.axes.push(Axes::new(rect));
        let last = self.axes.len() - 1;
        Ok(&mut self.axes[last])
    }

    /// Plot areas in drawing order.
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    /// Mutable plot area `index`.
    pub fn axes_mut(&mut self, index: usize) -> Option<&mut Axes> {
        self.axes.get_mut(index)
    }

    /// Add a figure-level mark in pixel coordinates.
    pub fn add_overlay(&mut self, mark: Mark) -> &mut Self {
        self.overlays.push(mark);
        self
    }

    /// Figure-level marks.
    pub fn overlays(&self) -> &[Mark] {
        &self.overlays
    }
}

impl RenderTarget for Figure {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.axes.clear();
        self.overlays.clear();
    }

    fn render(&mut self) -> PlotvidResult<FrameRGBA> {
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let full =
            vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        ctx.set_paint(paint(self.background));
        ctx.fill_rect(&full);

        for axes in &self.axes {
            let clip = bezpath_to_cpu(&axes.rect.to_path(PATH_TOLERANCE));
            ctx.push_clip_layer(&clip);
            if let Some(bg) = axes.background {
                ctx.set_paint(paint(bg));
                ctx.fill_rect(&rect_to_cpu(axes.rect));
            }
            for mark in &axes.marks {
                draw_mark(&mut ctx, mark, |p| axes.data_to_pixel(p));
            }
            ctx.pop_layer();
        }

        for mark in &self.overlays {
            draw_mark(&mut ctx, mark, |p| (p.x.is_finite() && p.y.is_finite()).then_some(p));
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_mark(
    ctx: &mut vello_cpu::RenderContext,
    mark: &Mark,
    to_pixel: impl Fn(Point) -> Option<Point>,
) {
    if mark.opacity.is_nan() || mark.opacity <= 0.0 {
        return;
    }
    let path = mark_fill_path(&mark.kind, to_pixel);
    if path.elements().is_empty() {
        return;
    }
    ctx.set_paint(paint(mark.color));
    let layered = mark.opacity < 1.0;
    if layered {
        ctx.push_opacity_layer(mark.opacity);
    }
    ctx.fill_path(&bezpath_to_cpu(&path));
    if layered {
        ctx.pop_layer();
    }
}

/// Fill outline of `kind` in pixel space.
fn mark_fill_path(kind: &MarkKind, to_pixel: impl Fn(Point) -> Option<Point>) -> BezPath {
    let mut out = BezPath::new();
    match kind {
        MarkKind::Polyline { points, width } => {
            if width.is_nan() || *width <= 0.0 {
                return out;
            }
            let mut line = BezPath::new();
            let mut pen_down = false;
            for &p in points {
                match to_pixel(p) {
                    Some(px) if pen_down => line.line_to(px),
                    Some(px) => {
                        line.move_to(px);
                        pen_down = true;
                    }
                    None => pen_down = false,
                }
            }
            out = kurbo::stroke(
                line,
                &kurbo::Stroke::new(*width),
                &kurbo::StrokeOpts::default(),
                PATH_TOLERANCE,
            );
        }
        MarkKind::Scatter { points, radius } => {
            if radius.is_nan() || *radius <= 0.0 {
                return out;
            }
            for px in points.iter().filter_map(|&p| to_pixel(p)) {
                out.extend(kurbo::Circle::new(px, *radius).path_elements(PATH_TOLERANCE));
            }
        }
        MarkKind::FilledRect { rect } => {
            let corners = (to_pixel(rect.origin()), to_pixel(Point::new(rect.x1, rect.y1)));
            let (Some(a), Some(b)) = corners else {
                return out;
            };
            out = Rect::from_points(a, b).to_path(PATH_TOLERANCE);
        }
    }
    out
}

fn paint(rgba: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/figure.rs"]
mod tests;
