//! Grid snapping and container clamping.
//!
//! All interactive geometry goes through [`snap`] and [`clamp_to_container`],
//! so positions and sizes stay on the 8px grid and inside the canvas.

use kurbo::{Point, Rect, Size};

/// Grid size for snapping (matches the canvas dot grid).
pub const GRID_SIZE: f64 = 8.0;

/// Smallest width or height an item may have.
pub const MIN_SIZE: f64 = 40.0;

/// Container size used when the canvas has not reported its client size yet.
pub const UNBOUNDED: Size = Size::new(f64::INFINITY, f64::INFINITY);

/// Snap a scalar to the nearest grid line.
///
/// Halves round towards positive infinity, so `snap(-4.0)` is `0.0` and
/// `snap(4.0)` is `8.0`.
pub fn snap(n: f64) -> f64 {
    let snapped = (n / GRID_SIZE + 0.5).floor() * GRID_SIZE;
    // Avoid handing out negative zero.
    if snapped == 0.0 { 0.0 } else { snapped }
}

/// Snap a scalar down to the grid line at or below it.
pub fn floor_to_grid(n: f64) -> f64 {
    (n / GRID_SIZE).floor() * GRID_SIZE
}

/// Snap a size to the grid and apply the minimum size floor.
///
/// Snapping happens first, then the floor, so a 36px drag becomes 40px rather
/// than 32px.
pub fn snap_size(width: f64, height: f64) -> Size {
    Size::new(snap(width).max(MIN_SIZE), snap(height).max(MIN_SIZE))
}

/// Clamp a rectangle so it lies inside `[0, container.width] x [0, container.height]`.
///
/// Width and height are floored at [`MIN_SIZE`] before the position clamp.
/// They are also capped to the largest grid multiple that fits the container,
/// unless the container itself is smaller than [`MIN_SIZE`]. The position is
/// then clamped to the last grid line that keeps the far edge inside.
pub fn clamp_to_container(rect: Rect, container: Size) -> Rect {
    let width = fit_extent(rect.width(), container.width);
    let height = fit_extent(rect.height(), container.height);

    let max_x = floor_to_grid(container.width - width).max(0.0);
    let max_y = floor_to_grid(container.height - height).max(0.0);

    let x = rect.x0.min(max_x).max(0.0);
    let y = rect.y0.min(max_y).max(0.0);

    Rect::from_origin_size(Point::new(x, y), Size::new(width, height))
}

fn fit_extent(extent: f64, available: f64) -> f64 {
    let extent = extent.max(MIN_SIZE);
    let cap = floor_to_grid(available);
    if cap >= MIN_SIZE { extent.min(cap) } else { extent }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_on_grid(n: f64) {
        assert!((n % GRID_SIZE).abs() < f64::EPSILON, "{n} is off grid");
    }

    #[test]
    fn test_snap_rounds_to_nearest() {
        assert_eq!(snap(0.0), 0.0);
        assert_eq!(snap(3.0), 0.0);
        assert_eq!(snap(4.0), 8.0);
        assert_eq!(snap(12.0), 16.0);
        assert_eq!(snap(433.0), 432.0);
        assert_eq!(snap(257.0), 256.0);
        assert_eq!(snap(-3.0), 0.0);
        assert_eq!(snap(-4.0), 0.0);
        assert_eq!(snap(-5.0), -8.0);
    }

    #[test]
    fn test_snap_idempotent() {
        let mut n = -200.0;
        while n <= 200.0 {
            let once = snap(n);
            assert_eq!(snap(once), once);
            assert_on_grid(once);
            n += 0.75;
        }
    }

    #[test]
    fn test_snap_never_negative_zero() {
        assert!(snap(-1.0).is_sign_positive());
    }

    #[test]
    fn test_snap_size_floors_after_snapping() {
        let size = snap_size(36.0, 10.0);
        assert_eq!(size.width, 40.0);
        assert_eq!(size.height, 40.0);

        let size = snap_size(45.0, 51.0);
        assert_eq!(size.width, 48.0);
        assert_eq!(size.height, 48.0);
    }

    #[test]
    fn test_clamp_keeps_rect_inside() {
        let container = Size::new(800.0, 600.0);
        let rect = Rect::from_origin_size((780.0, -20.0), (160.0, 56.0));
        let clamped = clamp_to_container(rect, container);

        assert_eq!(clamped.x0, 640.0);
        assert_eq!(clamped.y0, 0.0);
        assert_eq!(clamped.width(), 160.0);
        assert_eq!(clamped.height(), 56.0);
    }

    #[test]
    fn test_clamp_caps_oversized_rect() {
        let container = Size::new(500.0, 300.0);
        let rect = Rect::from_origin_size((24.0, 24.0), (640.0, 320.0));
        let clamped = clamp_to_container(rect, container);

        assert_eq!(clamped.x0, 0.0);
        assert_eq!(clamped.y0, 0.0);
        assert_eq!(clamped.width(), 496.0);
        assert_eq!(clamped.height(), 296.0);
        assert!(clamped.x1 <= 500.0);
        assert!(clamped.y1 <= 300.0);
    }

    #[test]
    fn test_clamp_respects_ragged_container_edge() {
        // 803 is not a grid multiple; the far edge must still fit.
        let container = Size::new(803.0, 603.0);
        let rect = Rect::from_origin_size((800.0, 600.0), (160.0, 56.0));
        let clamped = clamp_to_container(rect, container);

        assert_on_grid(clamped.x0);
        assert_on_grid(clamped.y0);
        assert!(clamped.x1 <= 803.0);
        assert!(clamped.y1 <= 603.0);
    }

    #[test]
    fn test_clamp_degenerate_container() {
        let container = Size::new(24.0, 24.0);
        let rect = Rect::from_origin_size((8.0, 8.0), (16.0, 16.0));
        let clamped = clamp_to_container(rect, container);

        assert_eq!(clamped.x0, 0.0);
        assert_eq!(clamped.y0, 0.0);
        assert_eq!(clamped.width(), MIN_SIZE);
        assert_eq!(clamped.height(), MIN_SIZE);
    }

    #[test]
    fn test_clamp_unbounded_leaves_position() {
        let rect = Rect::from_origin_size((4000.0, 3000.0), (160.0, 56.0));
        let clamped = clamp_to_container(rect, UNBOUNDED);
        assert_eq!(clamped, rect);
    }
}
