//! An in-memory raster surface.

use crate::data::{Color, Path2D, CURVE_TOLERANCE};
use crate::render::Surface;
use failure::Error;
use lyon::math::{point, Point};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, StrokeOptions,
    StrokeTessellator, StrokeVertex, TessellationError, VertexBuffers,
};

#[derive(Debug, Fail)]
#[fail(display = "tessellation error: {:?}", _0)]
struct TessError(TessellationError);

type Triangles = VertexBuffers<Point, u32>;

/// A straight-alpha RGBA raster with one `f32` color per pixel.
///
/// Paths are tessellated with lyon and every pixel whose centre lies inside a triangle is
/// covered. Each paint operation composites its color once per covered pixel, source-over.
/// There is no anti-aliasing.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    tolerance: f32,
}

impl Canvas {
    /// Creates a transparent canvas.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::CLEAR; width * height],
            tolerance: CURVE_TOLERANCE,
        }
    }

    /// Sets the curve flattening tolerance used for tessellation.
    pub fn with_tolerance(mut self, tolerance: f32) -> Canvas {
        self.tolerance = tolerance;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Sets every pixel to `color`.
    pub fn clear(&mut self, color: Color) {
        for pixel in &mut self.pixels {
            *pixel = color;
        }
    }

    fn composite(&mut self, color: Color, triangles: &Triangles) {
        let mut mask = vec![false; self.pixels.len()];
        let mut covered = 0;
        for triangle in triangles.indices.chunks(3) {
            if let [a, b, c] = *triangle {
                let vertices = &triangles.vertices;
                covered += self.cover(
                    [vertices[a as usize], vertices[b as usize], vertices[c as usize]],
                    &mut mask,
                );
            }
        }
        trace!(
            "{} triangle(s) covering {} pixel(s)",
            triangles.indices.len() / 3,
            covered
        );

        for (pixel, _) in self.pixels.iter_mut().zip(mask).filter(|(_, m)| *m) {
            *pixel = color.over(*pixel);
        }
    }

    /// Marks pixels whose centres lie inside the triangle. Returns the number of newly marked
    /// pixels.
    fn cover(&self, [a, b, c]: [Point; 3], mask: &mut [bool]) -> usize {
        if self.width == 0 || self.height == 0 {
            return 0;
        }
        let min = a.min(b).min(c);
        let max = a.max(b).max(c);
        let x0 = (min.x - 0.5).ceil().max(0.);
        let y0 = (min.y - 0.5).ceil().max(0.);
        let x1 = (max.x - 0.5).floor().min(self.width as f32 - 1.);
        let y1 = (max.y - 0.5).floor().min(self.height as f32 - 1.);
        if !(x0 <= x1 && y0 <= y1) {
            return 0;
        }

        let edge = |from: Point, to: Point, p: Point| {
            (to.x - from.x) * (p.y - from.y) - (to.y - from.y) * (p.x - from.x)
        };

        let mut count = 0;
        for y in y0 as usize..=y1 as usize {
            for x in x0 as usize..=x1 as usize {
                let p = point(x as f32 + 0.5, y as f32 + 0.5);
                let w = [edge(b, c, p), edge(c, a, p), edge(a, b, p)];
                let inside = w.iter().all(|w| *w >= 0.) || w.iter().all(|w| *w <= 0.);
                let index = y * self.width + x;
                if inside && !mask[index] {
                    mask[index] = true;
                    count += 1;
                }
            }
        }
        count
    }
}

impl Surface for Canvas {
    fn stroke(&mut self, color: Color, width: f32, path: &Path2D) -> Result<(), Error> {
        let mut triangles = Triangles::new();
        let options = StrokeOptions::tolerance(self.tolerance).with_line_width(width);
        StrokeTessellator::new()
            .tessellate_path(
                &path.to_lyon(),
                &options,
                &mut BuffersBuilder::new(&mut triangles, |v: StrokeVertex| v.position()),
            )
            .map_err(TessError)?;
        self.composite(color, &triangles);
        Ok(())
    }

    fn fill(&mut self, color: Color, path: &Path2D) -> Result<(), Error> {
        let mut triangles = Triangles::new();
        let options = FillOptions::tolerance(self.tolerance).with_fill_rule(FillRule::NonZero);
        FillTessellator::new()
            .tessellate_path(
                &path.to_lyon(),
                &options,
                &mut BuffersBuilder::new(&mut triangles, |v: FillVertex| v.position()),
            )
            .map_err(TessError)?;
        self.composite(color, &triangles);
        Ok(())
    }
}
