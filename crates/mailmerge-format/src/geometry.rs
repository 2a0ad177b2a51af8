/*
 * geometry.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Sizes and uniform scale-to-fit.

/// A width and height in layout points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Scale `natural` uniformly so it fits inside `target_width` x `target_height`.
///
/// The scale factor is `min(target_width / width, target_height / height)`,
/// so the result touches the target on the limiting side and keeps the
/// aspect ratio. Smaller images are scaled up. Field images and watermarks
/// are both sized with this function.
pub fn scale_to_fit(natural: Size, target_width: f64, target_height: f64) -> Size {
    let scale = (target_width / natural.width).min(target_height / natural.height);
    Size {
        width: natural.width * scale,
        height: natural.height * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limited_by_width() {
        let size = scale_to_fit(Size::new(400.0, 200.0), 100.0, 100.0);
        assert_eq!(size, Size::new(100.0, 50.0));
    }

    #[test]
    fn test_limited_by_height() {
        let size = scale_to_fit(Size::new(200.0, 400.0), 100.0, 100.0);
        assert_eq!(size, Size::new(50.0, 100.0));
    }

    #[test]
    fn test_scales_up() {
        let size = scale_to_fit(Size::new(10.0, 5.0), 10000.0, 10000.0);
        assert_eq!(size, Size::new(10000.0, 5000.0));
    }

    #[test]
    fn test_page_sized_watermark() {
        // Roughly A4 portrait in points.
        let size = scale_to_fit(Size::new(300.0, 300.0), 600.0, 842.0);
        assert_eq!(size, Size::new(600.0, 600.0));
    }
}
