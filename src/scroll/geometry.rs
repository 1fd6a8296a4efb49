use crate::foundation::core::ScrollProgress;

/// Measured layout of a scroll container relative to the viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollGeometry {
    /// Container top relative to the viewport top (negative once scrolled past).
    pub container_top: f64,
    /// Full container height.
    pub container_height: f64,
    /// Viewport height.
    pub viewport_height: f64,
}

impl ScrollGeometry {
    /// Build a geometry from components.
    pub fn new(container_top: f64, container_height: f64, viewport_height: f64) -> Self {
        Self {
            container_top,
            container_height,
            viewport_height,
        }
    }

    /// Distance the container scrolls between its top reaching the viewport top and its
    /// bottom reaching the viewport bottom.
    pub fn scroll_range(self) -> f64 {
        self.container_height - self.viewport_height
    }

    /// Progress with start-start / end-end mapping.
    pub fn progress(self) -> ScrollProgress {
        let range = self.scroll_range();
        if range > 0.0 {
            ScrollProgress::new(-self.container_top / range)
        } else if self.container_top <= 0.0 {
            ScrollProgress::END
        } else {
            ScrollProgress::START
        }
    }

    /// Geometry for a container of `container_height` scrolled `scrolled` pixels past its top.
    pub fn scrolled(scrolled: f64, container_height: f64, viewport_height: f64) -> Self {
        Self::new(-scrolled, container_height, viewport_height)
    }
}

/// Progress of an optional container; an unmounted container reports the start.
pub fn progress_of(geometry: Option<ScrollGeometry>) -> ScrollProgress {
    geometry.map_or(ScrollProgress::START, ScrollGeometry::progress)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/geometry.rs"]
mod tests;
