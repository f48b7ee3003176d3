//! Surface that records draw calls instead of rasterizing them

use super::{Circle, Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
enum DrawCommand {
    Clear,
    Circle(Circle, Paint),
}

/// Keeps every command in order; handy for tests and for inspecting a frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `clear` calls
    pub fn clears(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear))
            .count()
    }

    /// Circles drawn since the most recent clear, i.e. the visible frame
    pub fn circles(&self) -> Vec<(Circle, Paint)> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map_or(0, |i| i + 1);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle(circle, paint) => Some((*circle, *paint)),
                DrawCommand::Clear => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, circle: Circle, paint: Paint) {
        self.commands.push(DrawCommand::Circle(circle, paint));
    }
}
