// Viewport signal: the single source of terminal size for responsive behavior

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    /// Widths strictly below this are narrow
    pub breakpoint: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16, breakpoint: u16) -> Self {
        Self {
            width,
            height,
            breakpoint,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.width < self.breakpoint
    }

    /// Apply a terminal resize. Returns true if the narrow/wide layout flipped.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        let was_narrow = self.is_narrow();
        self.width = width;
        self.height = height;
        was_narrow != self.is_narrow()
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_exclusive() {
        assert!(Viewport::new(99, 40, 100).is_narrow());
        assert!(!Viewport::new(100, 40, 100).is_narrow());
    }

    #[test]
    fn test_resize_reports_layout_flip() {
        let mut viewport = Viewport::new(120, 40, 100);
        assert!(!viewport.resize(110, 30));
        assert!(viewport.resize(80, 30));
        assert!(viewport.is_narrow());
        assert_eq!(viewport.area(), Rect::new(0, 0, 80, 30));
    }
}
