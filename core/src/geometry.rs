//! Integer pixel geometry used for movement and proximity checks.

use glam::IVec2;

/// Rounded Euclidean distance between two pixel positions.
#[must_use]
pub fn distance(from: IVec2, to: IVec2) -> i32 {
    let delta = (to - from).as_dvec2();
    delta.length().round() as i32
}

/// Direction in degrees pointing from `from` towards `to`.
///
/// Degrees follow screen coordinates: zero points along increasing x and
/// ninety along increasing y. Coincident points yield zero.
#[must_use]
pub fn heading_towards(from: IVec2, to: IVec2) -> f64 {
    let delta = (to - from).as_dvec2();
    if delta.x == 0.0 && delta.y == 0.0 {
        return 0.0;
    }
    delta.y.atan2(delta.x).to_degrees().rem_euclid(360.0)
}

/// Pixel displacement for one step of `speed` along `direction` degrees.
#[must_use]
pub fn displacement(direction: f64, speed: i32) -> IVec2 {
    let radians = direction.to_radians();
    let speed = f64::from(speed);
    IVec2::new(
        (speed * radians.cos()).round() as i32,
        (speed * radians.sin()).round() as i32,
    )
}

/// Coarse facing used to pick directional sprites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Facing decreasing y.
    Up,
    /// Facing increasing y.
    Down,
    /// Facing decreasing x.
    Left,
    /// Facing increasing x.
    Right,
}

impl Heading {
    /// Vertical facing derived from the sign of `to.y - from.y`.
    #[must_use]
    pub fn vertical(from: IVec2, to: IVec2) -> Self {
        if to.y < from.y {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Four-way facing along the dominant axis between the two points.
    ///
    /// Ties favour the vertical axis.
    #[must_use]
    pub fn four_way(from: IVec2, to: IVec2) -> Self {
        let delta = to - from;
        if delta.x.abs() > delta.y.abs() {
            if delta.x < 0 {
                Self::Left
            } else {
                Self::Right
            }
        } else {
            Self::vertical(from, to)
        }
    }

    /// Sprite name conventionally used for this facing.
    #[must_use]
    pub const fn sprite_name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_rounds_euclidean_length() {
        assert_eq!(distance(IVec2::new(100, 100), IVec2::new(130, 140)), 50);
        assert_eq!(distance(IVec2::new(0, 0), IVec2::new(1, 1)), 1);
        assert_eq!(distance(IVec2::new(5, 5), IVec2::new(5, 5)), 0);
    }

    #[test]
    fn heading_follows_screen_axes() {
        let origin = IVec2::new(10, 10);
        assert!((heading_towards(origin, IVec2::new(20, 10)) - 0.0).abs() < 1e-9);
        assert!((heading_towards(origin, IVec2::new(10, 20)) - 90.0).abs() < 1e-9);
        assert!((heading_towards(origin, IVec2::new(0, 10)) - 180.0).abs() < 1e-9);
        assert!((heading_towards(origin, IVec2::new(10, 0)) - 270.0).abs() < 1e-9);
        assert_eq!(heading_towards(origin, origin), 0.0);
    }

    #[test]
    fn displacement_rounds_each_axis() {
        assert_eq!(displacement(0.0, 5), IVec2::new(5, 0));
        assert_eq!(displacement(90.0, 5), IVec2::new(0, 5));
        assert_eq!(displacement(45.0, 4), IVec2::new(3, 3));
        assert_eq!(displacement(180.0, 0), IVec2::ZERO);
    }

    #[test]
    fn coarse_headings_pick_expected_sprites() {
        let origin = IVec2::new(0, 0);
        assert_eq!(Heading::vertical(origin, IVec2::new(50, -1)), Heading::Up);
        assert_eq!(Heading::vertical(origin, IVec2::new(-50, 0)), Heading::Down);
        assert_eq!(Heading::four_way(origin, IVec2::new(-50, 3)), Heading::Left);
        assert_eq!(Heading::four_way(origin, IVec2::new(50, 3)), Heading::Right);
        assert_eq!(Heading::four_way(origin, IVec2::new(3, 3)), Heading::Down);
        assert_eq!(Heading::Left.sprite_name(), "left");
    }
}
