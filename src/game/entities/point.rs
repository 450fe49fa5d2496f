use rand::Rng;

use crate::game::types::{Point, PointId};

/// Generate `count` fresh points with ids `0..count`.
/// `top` and `left` are drawn independently and uniformly inside the board,
/// keeping `margin` percent free on every edge.
pub fn spawn_random_points<R: Rng + ?Sized>(rng: &mut R, count: u32, margin: f64) -> Vec<Point> {
    let low = margin;
    let high = 100.0 - margin;

    (0..count)
        .map(|id: PointId| {
            let top = rng.random_range(low..=high);
            let left = rng.random_range(low..=high);
            Point::new(id, top, left)
        })
        .collect()
}
