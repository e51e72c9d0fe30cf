//! Collision detection and response for axis-aligned geometry
//!
//! Everything in the playfield is either a circle (the ball) or an
//! axis-aligned rectangle (paddle, bricks, power-ups).

use glam::Vec2;

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Closest point of the rectangle to `p`
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.max(self.x).min(self.right()), p.y.max(self.y).min(self.bottom()))
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the rectangle (if hit)
    pub point: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
        }
    }
}

/// Check collision between a circle and a rectangle
///
/// Clamps the centre onto the rectangle and compares the squared distance
/// with the squared radius, so touching counts as a hit.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    let nearest = rect.nearest_point(center);
    if (center - nearest).length_squared() > radius * radius {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        point: nearest,
    }
}

/// Overlap test for two axis-aligned rectangles (edges touching is not overlap)
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Horizontal velocity after a paddle hit
///
/// `offset` runs from -1 at the left edge to +1 at the right edge, so the
/// ball leaves at up to `deflection` px/tick sideways, never above `max_dx`.
pub fn paddle_deflection(ball_x: f32, paddle: &Rect, deflection: f32, max_dx: f32) -> f32 {
    let half = paddle.width / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    let offset = ((ball_x - (paddle.x + half)) / half).clamp(-1.0, 1.0);
    let max_dx = max_dx.abs();
    (offset * deflection).max(-max_dx).min(max_dx)
}

/// Rescale a velocity so its magnitude lies in `[min, max]`, keeping direction
///
/// A zero vector has no direction and is returned unchanged.
pub fn clamp_speed(vel: Vec2, min: f32, max: f32) -> Vec2 {
    let speed = vel.length();
    if speed <= f32::EPSILON {
        return vel;
    }
    let target = speed.max(min.min(max)).min(max);
    if (target - speed).abs() <= f32::EPSILON {
        vel
    } else {
        vel * (target / speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circle_rect_hit_from_above() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        let result = circle_rect_collision(Vec2::new(120.0, 90.0), 12.0, &rect);
        assert!(result.hit);
        assert_eq!(result.point, Vec2::new(120.0, 100.0));
    }

    #[test]
    fn test_circle_rect_corner_miss() {
        // Inside the bounding box of the circle but outside its radius
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        let result = circle_rect_collision(Vec2::new(91.0, 91.0), 12.0, &rect);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_touching_counts() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(circle_rect_collision(Vec2::new(15.0, 5.0), 5.0, &rect).hit);
    }

    #[test]
    fn test_circle_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let result = circle_rect_collision(Vec2::new(50.0, 50.0), 5.0, &rect);
        assert!(result.hit);
        // Nearest point is the centre itself
        assert_eq!(result.point, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(aabb_overlap(&a, &Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!aabb_overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!aabb_overlap(&a, &Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_paddle_deflection() {
        let paddle = Rect::new(100.0, 570.0, 100.0, 15.0);
        assert_eq!(paddle_deflection(150.0, &paddle, 4.0, 8.0), 0.0);
        assert_eq!(paddle_deflection(200.0, &paddle, 4.0, 8.0), 4.0);
        assert_eq!(paddle_deflection(75.0, &paddle, 4.0, 8.0), -4.0);
        assert_eq!(paddle_deflection(200.0, &paddle, 10.0, 8.0), 8.0);
    }

    #[test]
    fn test_paddle_deflection_negative_cap_uses_magnitude() {
        let paddle = Rect::new(100.0, 570.0, 100.0, 15.0);
        assert_eq!(paddle_deflection(200.0, &paddle, 10.0, -8.0), 8.0);
        assert_eq!(paddle_deflection(100.0, &paddle, 10.0, -8.0), -8.0);
    }

    #[test]
    fn test_clamp_speed_caps_and_floors() {
        let fast = clamp_speed(Vec2::new(6.0, 8.0), 5.0, 8.0);
        assert!((fast.length() - 8.0).abs() < 1e-5);
        assert!((fast.x / fast.y - 0.75).abs() < 1e-5);

        let slow = clamp_speed(Vec2::new(0.0, -2.0), 5.0, 8.0);
        assert!((slow - Vec2::new(0.0, -5.0)).length() < 1e-5);

        assert_eq!(clamp_speed(Vec2::ZERO, 5.0, 8.0), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_speed_inverted_bounds() {
        // Cap wins when the floor is above it
        let v = clamp_speed(Vec2::new(0.0, -5.0), 5.0, 3.0);
        assert!((v - Vec2::new(0.0, -3.0)).length() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_clamp_speed_within_bounds(
            dx in -50.0f32..50.0,
            dy in -50.0f32..50.0,
        ) {
            prop_assume!(dx.abs() + dy.abs() > 0.01);
            let v = clamp_speed(Vec2::new(dx, dy), 5.0, 8.0);
            let speed = v.length();
            prop_assert!(speed >= 5.0 - 1e-3 && speed <= 8.0 + 1e-3);
            // Direction preserved
            prop_assert!(v.normalize().dot(Vec2::new(dx, dy).normalize()) > 0.999);
        }
    }
}
