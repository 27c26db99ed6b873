// Splits the raw unit list into the friendly and enemy views that the
// decision brief reports. Enemies get a reduced view: position, terrain,
// health, nothing else.

use serde::Serialize;

use crate::protocol::{UnitKind, UnitState};

use super::terrain::{terrain_at, to_algebraic, GridError, Terrain};

/// Full status of one friendly unit, serialized into the decision brief.
#[derive(Debug, Clone, Serialize)]
pub struct FriendInfo {
    pub name: String,
    pub target_tile: String,
    pub current_tile: String,
    pub current_terrain: Terrain,
    pub target_terrain: Terrain,
    pub health: i32,
    pub movement_style: &'static str,
}

/// What the commander is allowed to know about a hostile unit.
#[derive(Debug, Clone, Serialize)]
pub struct EnemyInfo {
    pub current_tile: String,
    pub current_terrain: Terrain,
    pub health: i32,
}

#[derive(Debug, Default)]
pub struct ClassifiedUnits {
    pub friend_names: Vec<String>,
    pub friends: Vec<FriendInfo>,
    pub enemies: Vec<EnemyInfo>,
}

/// Classify every unit in input order. Units of a kind we do not recognize
/// are reported as hostile rather than dropped.
pub fn classify(units: &[UnitState]) -> Result<ClassifiedUnits, GridError> {
    let mut out = ClassifiedUnits::default();
    for unit in units {
        match unit.kind {
            UnitKind::Friendly => {
                out.friend_names.push(unit.name.clone());
                out.friends.push(FriendInfo {
                    name: unit.name.clone(),
                    target_tile: to_algebraic(unit.target.x, unit.target.y),
                    current_tile: to_algebraic(unit.location.x, unit.location.y),
                    current_terrain: terrain_at(unit.location.x, unit.location.y)?,
                    target_terrain: terrain_at(unit.target.x, unit.target.y)?,
                    health: unit.health,
                    movement_style: if unit.move_safely { "Safe" } else { "Fast" },
                });
            }
            UnitKind::Enemy | UnitKind::Unknown => {
                out.enemies.push(EnemyInfo {
                    current_tile: to_algebraic(unit.location.x, unit.location.y),
                    current_terrain: terrain_at(unit.location.x, unit.location.y)?,
                    health: unit.health,
                });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::GridPosition;

    fn unit(kind: UnitKind, name: &str, location: (i32, i32), target: (i32, i32)) -> UnitState {
        UnitState {
            id: format!("unit-{name}"),
            kind,
            target: GridPosition {
                x: target.0,
                y: target.1,
            },
            location: GridPosition {
                x: location.0,
                y: location.1,
            },
            health: 80,
            name: name.into(),
            move_safely: true,
        }
    }

    #[test]
    fn test_classify_friendly() {
        let units = vec![unit(UnitKind::Friendly, "BZ", (0, 0), (1, 0))];
        let classified = classify(&units).unwrap();

        assert_eq!(classified.friend_names, vec!["BZ"]);
        assert_eq!(classified.friends.len(), 1);
        assert!(classified.enemies.is_empty());

        let friend = &classified.friends[0];
        assert_eq!(friend.current_tile, "A1");
        assert_eq!(friend.target_tile, "B1");
        assert_eq!(friend.current_terrain, Terrain::Base);
        assert_eq!(friend.target_terrain, Terrain::Ground);
        assert_eq!(friend.movement_style, "Safe");
        assert_eq!(friend.health, 80);
    }

    #[test]
    fn test_classify_enemy_reduced_view() {
        let units = vec![unit(UnitKind::Enemy, "raider", (11, 11), (0, 0))];
        let classified = classify(&units).unwrap();

        assert!(classified.friend_names.is_empty());
        assert_eq!(classified.enemies.len(), 1);
        assert_eq!(classified.enemies[0].current_tile, "L12");
        assert_eq!(classified.enemies[0].current_terrain, Terrain::Ground);
        // The serialized enemy view must not leak name or target.
        let json = serde_json::to_value(&classified.enemies[0]).unwrap();
        assert!(json.get("name").is_none());
        assert!(json.get("target_tile").is_none());
    }

    #[test]
    fn test_unknown_kind_counts_as_enemy() {
        let units = vec![unit(UnitKind::Unknown, "ghost", (3, 3), (3, 3))];
        let classified = classify(&units).unwrap();
        assert!(classified.friends.is_empty());
        assert_eq!(classified.enemies.len(), 1);
    }

    #[test]
    fn test_classify_preserves_input_order() {
        let units = vec![
            unit(UnitKind::Friendly, "AA", (0, 1), (0, 2)),
            unit(UnitKind::Enemy, "e1", (5, 5), (0, 0)),
            unit(UnitKind::Friendly, "BB", (0, 3), (0, 4)),
            unit(UnitKind::Enemy, "e2", (6, 6), (0, 0)),
        ];
        let classified = classify(&units).unwrap();
        assert_eq!(classified.friend_names, vec!["AA", "BB"]);
        assert_eq!(classified.enemies[0].current_tile, "F6");
        assert_eq!(classified.enemies[1].current_tile, "G7");
    }

    #[test]
    fn test_classify_fast_mover() {
        let mut u = unit(UnitKind::Friendly, "CC", (4, 4), (5, 5));
        u.move_safely = false;
        let classified = classify(&[u]).unwrap();
        assert_eq!(classified.friends[0].movement_style, "Fast");
    }

    #[test]
    fn test_out_of_range_unit_is_an_error() {
        let units = vec![unit(UnitKind::Friendly, "ZZ", (0, 0), (12, 12))];
        let err = classify(&units).unwrap_err();
        assert_eq!(err, GridError::OutOfBounds { x: 12, y: 12 });
    }
}
