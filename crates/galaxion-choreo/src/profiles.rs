//! Per-type enemy parameters.

use galaxion_core::enums::EnemyType;

/// Scoring and footprint for an enemy type.
pub struct EnemyProfile {
    /// Points for a kill while parked in formation.
    pub formation_points: u32,
    /// Points for a kill while flying a path (entry, attack run, return).
    pub airborne_points: u32,
    /// Sprite footprint (w, h); the Transform is its top-left corner.
    pub sprite_size: (f32, f32),
    /// Hit box (w, h), centred on the sprite.
    pub hitbox: (f32, f32),
}

/// Get the profile for a given enemy type.
pub fn get_profile(enemy_type: EnemyType) -> EnemyProfile {
    match enemy_type {
        EnemyType::Bee => EnemyProfile {
            formation_points: 50,
            airborne_points: 100,
            sprite_size: (32.0, 32.0),
            hitbox: (22.0, 20.0),
        },
        EnemyType::Butterfly => EnemyProfile {
            formation_points: 80,
            airborne_points: 160,
            sprite_size: (32.0, 32.0),
            hitbox: (24.0, 20.0),
        },
        EnemyType::Boss => EnemyProfile {
            formation_points: 150,
            airborne_points: 400,
            sprite_size: (32.0, 32.0),
            hitbox: (28.0, 26.0),
        },
    }
}

/// Base points for shooting down `enemy_type`.
pub fn points_for(enemy_type: EnemyType, airborne: bool) -> u32 {
    let profile = get_profile(enemy_type);
    if airborne {
        profile.airborne_points
    } else {
        profile.formation_points
    }
}
