//! Groups primitives into shapes on `g`/`o` boundaries.

use objcore::Shape;

#[derive(Debug, Default)]
pub struct ShapeBuilder {
    shapes: Vec<Shape>,
    current: Shape,
}

impl ShapeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape receiving primitives right now.
    pub fn current_mut(&mut self) -> &mut Shape {
        &mut self.current
    }

    pub fn current(&self) -> &Shape {
        &self.current
    }

    /// Start a new scope. A pending shape with primitives is flushed under its
    /// old name; an empty one is simply renamed.
    pub fn begin(&mut self, name: String) {
        if !self.current.is_empty() {
            let done = std::mem::replace(&mut self.current, Shape::new(name));
            log::trace!("shape `{}` closed with {} faces", done.name, done.mesh.face_count());
            self.shapes.push(done);
        } else {
            self.current.name = name;
        }
    }

    /// Shapes completed so far (excluding the pending one).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Flush the pending shape if it holds primitives, or if nothing was emitted
    /// yet, so the result always has at least one shape.
    pub fn finish(mut self) -> Vec<Shape> {
        if !self.current.is_empty() || self.shapes.is_empty() {
            self.shapes.push(self.current);
        }
        self.shapes
    }
}
