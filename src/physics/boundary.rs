//! Play-area boundary walls
//!
//! Only left and right walls are built. There is no floor or ceiling: freed
//! parts must be able to fall out of the play area so game logic can clean
//! them up, instead of piling up on a floor.

use glam::Vec2;

use super::engine::{BoxBodyDesc, EngineBody, RapierEngine};
use super::layers::boundary_filter;
use crate::config::{PhysicsConfig, PlayArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

/// Wall geometry in render units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    pub side: WallSide,
    pub center: Vec2,
    pub half_extents: Vec2,
}

/// Thin tall boxes flush with the play area's vertical extent, pushed outward
/// by half their thickness so their inner faces sit on the play-area edges.
pub fn wall_specs(area: &PlayArea, thickness: f32) -> [WallSpec; 2] {
    let half_thickness = thickness / 2.0;
    let half_extents = Vec2::new(half_thickness, area.half_extents.y);
    [
        WallSpec {
            side: WallSide::Left,
            center: Vec2::new(area.left() - half_thickness, area.center.y),
            half_extents,
        },
        WallSpec {
            side: WallSide::Right,
            center: Vec2::new(area.right() + half_thickness, area.center.y),
            half_extents,
        },
    ]
}

/// Create the fixed wall bodies. Called once per world generation.
pub fn build_walls(engine: &mut RapierEngine, config: &PhysicsConfig) -> Vec<EngineBody> {
    wall_specs(&config.play_area, config.wall_thickness)
        .iter()
        .map(|wall| {
            engine.create_box(&BoxBodyDesc {
                position: config.to_sim(wall.center),
                half_extents: config.to_sim(wall.half_extents),
                is_static: true,
                linear_damping: 0.0,
                angular_damping: 0.0,
                material: config.part,
                filter: boundary_filter(),
                user_data: 0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_sit_outside_play_area() {
        let area = PlayArea {
            center: Vec2::new(360.0, 640.0),
            half_extents: Vec2::new(360.0, 640.0),
        };
        let [left, right] = wall_specs(&area, 20.0);

        assert_eq!(left.side, WallSide::Left);
        assert_eq!(left.center, Vec2::new(-10.0, 640.0));
        assert_eq!(right.side, WallSide::Right);
        assert_eq!(right.center, Vec2::new(730.0, 640.0));

        // Inner faces flush with the play-area edges
        assert_eq!(left.center.x + left.half_extents.x, area.left());
        assert_eq!(right.center.x - right.half_extents.x, area.right());
        // Full vertical coverage
        assert_eq!(left.half_extents.y * 2.0, area.height());
    }

    #[test]
    fn test_build_walls_creates_two_fixed_bodies() {
        let config = PhysicsConfig::default();
        let mut engine = RapierEngine::new(Vec2::new(0.0, config.gravity), 8, 3);
        let walls = build_walls(&mut engine, &config);
        assert_eq!(walls.len(), 2);
        for wall in &walls {
            assert_eq!(engine.is_fixed(wall), Some(true));
            assert_eq!(engine.user_data(wall), Some(0));
        }
    }
}
