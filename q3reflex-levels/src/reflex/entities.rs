//! Converts Quake 3 entities into their Reflex counterparts

use log::warn;

use crate::map::Entity;
use crate::types::Vector3;

/// Classnames Quake 3 uses for places players can spawn.
const SPAWN_CLASSNAMES: [&str; 4] = [
    "info_player_deathmatch",
    "info_player_start",
    "info_player_start2",
    "info_player_coop",
];

/// Reflex spawns face 90 degrees away from quake ones.
const ANGLE_OFFSET: f64 = 90.0;

/// A Reflex `PlayerSpawn`, still in Quake 3 coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSpawn {
    pub position: Vector3,
    /// Yaw, in degrees
    pub angle: f64,
    pub team_a: bool,
    pub team_b: bool,
}

impl PlayerSpawn {
    /// Convert an entity, if it's a player spawn.
    /// Missing or unreadable fields fall back to zero.
    pub fn from_entity(entity: &Entity) -> Option<PlayerSpawn> {
        if !SPAWN_CLASSNAMES.contains(&entity.classname.as_str()) {
            return None;
        }

        let position = entity
            .get_attr("origin")
            .and_then(|origin| parse_origin(entity, origin))
            .unwrap_or_else(Vector3::zeros);

        let angle = entity
            .get_attr("angle")
            .and_then(|angle| parse_field(entity, "angle", angle))
            .unwrap_or(0.0);

        let spawnflags: u32 = entity
            .get_attr("spawnflags")
            .and_then(|flags| parse_field(entity, "spawnflags", flags))
            .unwrap_or(0);

        Some(PlayerSpawn {
            position,
            angle: angle + ANGLE_OFFSET,
            team_a: spawnflags & 1 != 0,
            team_b: spawnflags & 2 != 0,
        })
    }
}

fn parse_field<T: std::str::FromStr>(entity: &Entity, key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(
                "Ignoring unreadable {} `{}` on {}",
                key, value, entity.classname
            );
            None
        }
    }
}

fn parse_origin(entity: &Entity, origin: &str) -> Option<Vector3> {
    let coords: Vec<f64> = origin
        .split_whitespace()
        .map(|c| parse_field(entity, "origin", c))
        .collect::<Option<_>>()?;

    match coords.as_slice() {
        [x, y, z] => Some(Vector3::new(*x, *y, *z)),
        _ => {
            warn!("Ignoring origin `{}` on {}", origin, entity.classname);
            None
        }
    }
}

#[cfg(test)]
fn entity(classname: &str, attrs: &[(&str, &str)]) -> Entity {
    Entity {
        classname: classname.to_string(),
        attributes: attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

#[test]
fn spawn_from_deathmatch_start() {
    let spawn = PlayerSpawn::from_entity(&entity(
        "info_player_deathmatch",
        &[("origin", "-64 128 24"), ("angle", "180"), ("spawnflags", "2")],
    ))
    .unwrap();

    assert_eq!(spawn.position, Vector3::new(-64.0, 128.0, 24.0));
    assert_eq!(spawn.angle, 270.0);
    assert!(!spawn.team_a);
    assert!(spawn.team_b);
}

#[test]
fn spawn_defaults() {
    let spawn = PlayerSpawn::from_entity(&entity(
        "info_player_start",
        &[("origin", "1 2"), ("angle", "north")],
    ))
    .unwrap();

    assert_eq!(spawn.position, Vector3::zeros());
    assert_eq!(spawn.angle, 90.0);
    assert!(!spawn.team_a && !spawn.team_b);
}

#[test]
fn other_entities_ignored() {
    assert_eq!(
        PlayerSpawn::from_entity(&entity("weapon_rocketlauncher", &[("origin", "0 0 0")])),
        None
    );
}
