/// Drawable size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Viewport of the given size, clamped to at least 1×1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `width / height`.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Adopt a new size. Returns `false` (and changes nothing) when either
    /// dimension is zero or the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    /// `(width, height)`.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_is_width_over_height() {
        let mut viewport = Viewport::new(800, 600);
        assert!(viewport.resize(1920, 1080));
        assert_eq!(viewport.size(), (1920, 1080));
        assert!((viewport.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn resizing_twice_is_idempotent() {
        let mut once = Viewport::new(800, 600);
        let _ = once.resize(1024, 512);
        let mut twice = Viewport::new(800, 600);
        assert!(twice.resize(1024, 512));
        assert!(!twice.resize(1024, 512));
        assert_eq!(once, twice);
        assert_eq!(once.aspect(), twice.aspect());
    }

    #[test]
    fn zero_sizes_are_ignored() {
        let mut viewport = Viewport::new(640, 480);
        assert!(!viewport.resize(0, 480));
        assert!(!viewport.resize(640, 0));
        assert_eq!(viewport.size(), (640, 480));
        assert_eq!(Viewport::new(0, 0).size(), (1, 1));
    }
}
