use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Stable identity of a box within a level, its index in placement order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoxId(pub u16);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityId {
    Player,
    Box(BoxId),
}

/// A pushable, colored box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushBox {
    pub id: BoxId,
    pub color: Color,
    pub position: Coord2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Coord2,
    /// Last successful movement direction, only meaningful to presentation.
    pub facing: Direction,
}

/// Mutable positions of the player and every box.
///
/// Relocation primitives never validate anything; callers check walls and collisions first.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityState {
    player: Player,
    boxes: Vec<PushBox>,
    occupancy: Array2<Option<BoxId>>,
}

impl EntityState {
    pub(crate) fn new(size: Coord2, player: Coord2, placements: &[(Color, Coord2)]) -> Self {
        let mut occupancy: Array2<Option<BoxId>> = Array2::default(size.to_nd_index());
        let boxes = placements
            .iter()
            .enumerate()
            .map(|(index, &(color, position))| {
                let id = BoxId(index as u16);
                occupancy[position.to_nd_index()] = Some(id);
                PushBox {
                    id,
                    color,
                    position,
                }
            })
            .collect();

        Self {
            player: Player {
                position: player,
                facing: Direction::default(),
            },
            boxes,
            occupancy,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn player_position(&self) -> Coord2 {
        self.player.position
    }

    pub fn player_facing(&self) -> Direction {
        self.player.facing
    }

    pub fn boxes(&self) -> &[PushBox] {
        &self.boxes
    }

    pub fn box_by_id(&self, id: BoxId) -> Option<&PushBox> {
        self.boxes.get(usize::from(id.0))
    }

    pub fn box_at(&self, coords: Coord2) -> Option<&PushBox> {
        let id = (*self.occupancy.get(coords.to_nd_index())?)?;
        self.box_by_id(id)
    }

    pub fn is_occupied(&self, coords: Coord2) -> bool {
        self.player.position == coords || self.box_at(coords).is_some()
    }

    pub fn move_entity(&mut self, entity: EntityId, to: Coord2) {
        match entity {
            EntityId::Player => self.player.position = to,
            EntityId::Box(id) => {
                debug_assert!(
                    usize::from(id.0) < self.boxes.len(),
                    "tried to move unknown box {id:?}"
                );
                let Some(pushed) = self.boxes.get_mut(usize::from(id.0)) else {
                    log::error!("Tried to move unknown box {:?}", id);
                    return;
                };
                let from = core::mem::replace(&mut pushed.position, to);
                self.occupancy[from.to_nd_index()] = None;
                self.occupancy[to.to_nd_index()] = Some(id);
            }
        }
    }

    pub(crate) fn set_facing(&mut self, facing: Direction) {
        self.player.facing = facing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> EntityState {
        EntityState::new((5, 3), (0, 1), &[(Color::Blue, (2, 1)), (Color::Red, (3, 1))])
    }

    #[test]
    fn box_at_finds_placed_boxes() {
        let entities = state();

        assert_eq!(entities.box_at((2, 1)).map(|b| b.color), Some(Color::Blue));
        assert_eq!(entities.box_at((3, 1)).map(|b| b.id), Some(BoxId(1)));
        assert_eq!(entities.box_at((1, 1)), None);
        assert_eq!(entities.box_at((9, 9)), None);
        assert_eq!(entities.player_facing(), Direction::Down);
    }

    #[test]
    fn move_entity_updates_occupancy() {
        let mut entities = state();

        entities.move_entity(EntityId::Box(BoxId(0)), (2, 2));
        entities.move_entity(EntityId::Player, (2, 1));

        assert_eq!(entities.box_at((2, 1)), None);
        assert_eq!(entities.box_at((2, 2)).map(|b| b.id), Some(BoxId(0)));
        assert_eq!(entities.player_position(), (2, 1));
        assert!(entities.is_occupied((2, 1)));
        assert!(!entities.is_occupied((0, 1)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unknown box")]
    fn moving_unknown_box_fails_loudly() {
        let mut entities = state();
        entities.move_entity(EntityId::Box(BoxId(7)), (1, 1));
    }
}
