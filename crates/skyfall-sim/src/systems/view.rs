//! Camera and player-constraint math for the scrolling view.

use glam::Vec2;

use skyfall_core::types::Rect;

/// Rectangle of `size` centered on `center`.
pub fn view_bounds(center: Vec2, size: Vec2) -> Rect {
    Rect::from_position_size(center - size / 2.0, size)
}

/// View bounds extended upward by `margin`, where enemies are spawned and kept alive.
pub fn battlefield_bounds(view: Rect, margin: f32) -> Rect {
    Rect::new(view.left, view.top - margin, view.width, view.height + margin)
}

/// Scale diagonal input so that moving on both axes is not faster.
pub fn normalize_diagonal(velocity: Vec2) -> Vec2 {
    if velocity.x != 0.0 && velocity.y != 0.0 {
        velocity / std::f32::consts::SQRT_2
    } else {
        velocity
    }
}

/// Player velocity after diagonal correction and scroll compensation.
pub fn adapt_velocity(velocity: Vec2, scroll_speed: f32) -> Vec2 {
    normalize_diagonal(velocity) + Vec2::new(0.0, scroll_speed)
}

/// Clamp `position` inside `view` shrunk by `border` on every side.
pub fn clamp_to_view(position: Vec2, view: Rect, border: f32) -> Vec2 {
    Vec2::new(
        position.x.max(view.left + border).min(view.right() - border),
        position.y.max(view.top + border).min(view.bottom() - border),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_bounds_centered() {
        let view = view_bounds(Vec2::new(512.0, 1616.0), Vec2::new(1024.0, 768.0));
        assert_eq!(view, Rect::new(0.0, 1232.0, 1024.0, 768.0));
    }

    #[test]
    fn test_battlefield_extends_upward() {
        let field = battlefield_bounds(Rect::new(0.0, 1232.0, 1024.0, 768.0), 100.0);
        assert_eq!(field, Rect::new(0.0, 1132.0, 1024.0, 868.0));
        assert_eq!(field.bottom(), 2000.0, "bottom edge unchanged");
    }

    #[test]
    fn test_diagonal_normalized() {
        let v = normalize_diagonal(Vec2::new(200.0, 200.0));
        assert!((v.x - 141.421).abs() < 1e-2);
        assert!((v.y - 141.421).abs() < 1e-2);
    }

    #[test]
    fn test_single_axis_untouched() {
        assert_eq!(normalize_diagonal(Vec2::new(-200.0, 0.0)), Vec2::new(-200.0, 0.0));
        assert_eq!(adapt_velocity(Vec2::ZERO, -50.0), Vec2::new(0.0, -50.0));
    }

    #[test]
    fn test_clamp_to_view() {
        let view = Rect::new(0.0, 1000.0, 1024.0, 768.0);
        assert_eq!(clamp_to_view(Vec2::new(-30.0, 900.0), view, 40.0), Vec2::new(40.0, 1040.0));
        assert_eq!(clamp_to_view(Vec2::new(2000.0, 1800.0), view, 40.0), Vec2::new(984.0, 1728.0));
        assert_eq!(clamp_to_view(Vec2::new(500.0, 1400.0), view, 40.0), Vec2::new(500.0, 1400.0));
    }
}
