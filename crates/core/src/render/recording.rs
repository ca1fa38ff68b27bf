use super::{Color, DrawingSurface, Point};

/// A single primitive captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Line {
        color: Color,
        thickness: f32,
        from: Point,
        to: Point,
    },
    Circle {
        color: Color,
        center: Point,
        diameter: f32,
    },
}

/// Surface that remembers the primitives of the most recent frame instead of
/// rasterising them. `clear` starts a new frame.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    antialiasing: bool,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn antialiasing(&self) -> bool {
        self.antialiasing
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle { .. }))
            .count()
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_antialiasing(&mut self, enabled: bool) {
        self.antialiasing = enabled;
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_line(&mut self, color: Color, thickness: f32, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line {
            color,
            thickness,
            from,
            to,
        });
    }

    fn fill_circle(&mut self, color: Color, center: Point, diameter: f32) {
        self.commands.push(DrawCommand::Circle {
            color,
            center,
            diameter,
        });
    }
}
