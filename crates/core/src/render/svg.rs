use std::fmt::Write as _;

use super::{Color, DrawingSurface, Point, Rect};

/// Renders a frame into a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    bounds: Rect,
    antialiasing: bool,
    background: Color,
    body: String,
}

impl SvgSurface {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            antialiasing: false,
            background: Color::BLACK,
            body: String::new(),
        }
    }

    /// Produces the SVG document for everything drawn since the last clear.
    pub fn to_document(&self) -> String {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.bounds;
        let rendering = if self.antialiasing {
            "geometricPrecision"
        } else {
            "crispEdges"
        };

        let mut doc = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {width} {height}" width="{width}" height="{height}" shape-rendering="{rendering}">"#
        );
        let _ = writeln!(
            doc,
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}" fill-opacity="{}"/>"#,
            hex(self.background),
            opacity(self.background)
        );
        doc.push_str(&self.body);
        doc.push_str("</svg>\n");
        doc
    }
}

impl DrawingSurface for SvgSurface {
    fn set_antialiasing(&mut self, enabled: bool) {
        self.antialiasing = enabled;
    }

    fn clear(&mut self, color: Color) {
        self.background = color;
        self.body.clear();
    }

    fn draw_line(&mut self, color: Color, thickness: f32, from: Point, to: Point) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{}" stroke-width="{thickness}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            hex(color),
            opacity(color)
        );
    }

    fn fill_circle(&mut self, color: Color, center: Point, diameter: f32) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="{}"/>"#,
            center.x,
            center.y,
            diameter * 0.5,
            hex(color),
            opacity(color)
        );
    }
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

fn opacity(color: Color) -> String {
    format!("{:.3}", color.a as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_primitives_after_background() {
        let mut surface = SvgSurface::new(Rect::from_size(320, 200));
        surface.set_antialiasing(true);
        surface.clear(Color::rgb(0, 0, 16));
        surface.draw_line(
            Color::WHITE.with_alpha(51),
            1.5,
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
        );
        surface.fill_circle(Color::WHITE, Point::new(3.0, 4.0), 3.0);

        let doc = surface.to_document();
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains(r#"shape-rendering="geometricPrecision""#));
        assert!(doc.contains(r##"fill="#000010""##));
        assert!(doc.contains(r#"stroke-opacity="0.200""#));
        assert!(doc.contains(r#"r="1.50""#));

        let line = doc.find("<line").unwrap();
        let circle = doc.find("<circle").unwrap();
        assert!(line < circle);
    }

    #[test]
    fn clear_discards_previous_frame() {
        let mut surface = SvgSurface::new(Rect::from_size(10, 10));
        surface.fill_circle(Color::WHITE, Point::new(1.0, 1.0), 2.0);
        surface.clear(Color::BLACK);

        let doc = surface.to_document();
        assert!(!doc.contains("<circle"));
        assert!(doc.contains(r#"shape-rendering="crispEdges""#));
    }
}
