use crate::*;

/// Decides what a move in `direction` would do, without touching any state.
///
/// Probing is done on grid coordinates: the cell next to the player, and for a push the cell
/// right beyond it. Only a single box is ever pushed.
pub fn plan(grid: &Grid, entities: &EntityState, direction: Direction) -> MoveOutcome {
    use MoveOutcome::*;
    use RejectReason::*;

    let from = entities.player_position();
    let Some(target) = grid
        .neighbor(from, direction)
        .filter(|&target| !grid.is_wall(target))
    else {
        return Rejected(Wall);
    };

    let Some(pushed) = entities.box_at(target) else {
        return PlayerMoved { from, to: target };
    };

    let Some(box_target) = grid
        .neighbor(target, direction)
        .filter(|&beyond| !grid.is_wall(beyond) && !entities.is_occupied(beyond))
    else {
        return Rejected(BoxBlocked);
    };

    PlayerAndBoxMoved {
        player_from: from,
        player_to: target,
        box_id: pushed.id,
        box_from: target,
        box_to: box_target,
    }
}

/// Applies the relocations described by an outcome, planned or reversed.
pub fn apply(entities: &mut EntityState, outcome: MoveOutcome) {
    match outcome {
        MoveOutcome::Rejected(_) => {}
        MoveOutcome::PlayerMoved { to, .. } => entities.move_entity(EntityId::Player, to),
        MoveOutcome::PlayerAndBoxMoved {
            player_to,
            box_id,
            box_to,
            ..
        } => {
            entities.move_entity(EntityId::Box(box_id), box_to);
            entities.move_entity(EntityId::Player, player_to);
        }
    }
}

/// Plans and applies a move, refusing outright while another move is still in flight.
pub fn resolve(
    grid: &Grid,
    entities: &mut EntityState,
    direction: Direction,
    in_flight: bool,
) -> MoveOutcome {
    if in_flight {
        return MoveOutcome::Rejected(RejectReason::AlreadyMoving);
    }

    let outcome = plan(grid, entities, direction);
    apply(entities, outcome);
    if outcome.has_update() {
        entities.set_facing(direction);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(text: &str) -> (Grid, EntityState) {
        let level: Level = text.parse().unwrap();
        let entities = level.entity_state();
        (level.into_grid(), entities)
    }

    #[test]
    fn bare_move_into_floor() {
        let (grid, mut entities) = level("#####\n#@  #\n#####");

        let outcome = resolve(&grid, &mut entities, Direction::Right, false);

        assert_eq!(outcome, MoveOutcome::PlayerMoved { from: (1, 1), to: (2, 1) });
        assert_eq!(entities.player_position(), (2, 1));
        assert_eq!(entities.player_facing(), Direction::Right);
    }

    #[test]
    fn wall_rejects_without_changing_facing() {
        let (grid, mut entities) = level("#####\n#@  #\n#####");

        let outcome = resolve(&grid, &mut entities, Direction::Up, false);

        assert_eq!(outcome, MoveOutcome::Rejected(RejectReason::Wall));
        assert_eq!(entities.player_position(), (1, 1));
        assert_eq!(entities.player_facing(), Direction::Down);
    }

    #[test]
    fn grid_edge_behaves_like_a_wall() {
        let (grid, mut entities) = level("@ \n  ");

        assert_eq!(
            resolve(&grid, &mut entities, Direction::Left, false),
            MoveOutcome::Rejected(RejectReason::Wall)
        );
        assert_eq!(
            resolve(&grid, &mut entities, Direction::Up, false),
            MoveOutcome::Rejected(RejectReason::Wall)
        );
        assert_eq!(entities.player_position(), (0, 0));
    }

    #[test]
    fn push_moves_player_and_box_together() {
        let (grid, mut entities) = level("######\n#@B  #\n######");

        let outcome = resolve(&grid, &mut entities, Direction::Right, false);

        assert_eq!(
            outcome,
            MoveOutcome::PlayerAndBoxMoved {
                player_from: (1, 1),
                player_to: (2, 1),
                box_id: BoxId(0),
                box_from: (2, 1),
                box_to: (3, 1),
            }
        );
        assert_eq!(entities.player_position(), (2, 1));
        assert_eq!(entities.box_at((3, 1)).map(|b| b.id), Some(BoxId(0)));
        assert!(entities.box_at((2, 1)).is_none());
    }

    #[test]
    fn push_into_wall_is_blocked() {
        let (grid, mut entities) = level("#####\n#@B##\n#####");
        let before = entities.clone();

        assert_eq!(
            resolve(&grid, &mut entities, Direction::Right, false),
            MoveOutcome::Rejected(RejectReason::BoxBlocked)
        );
        assert_eq!(entities, before);
    }

    #[test]
    fn push_into_another_box_is_blocked() {
        let (grid, mut entities) = level("######\n#@BR #\n######");
        let before = entities.clone();

        assert_eq!(
            resolve(&grid, &mut entities, Direction::Right, false),
            MoveOutcome::Rejected(RejectReason::BoxBlocked)
        );
        assert_eq!(entities, before);
    }

    #[test]
    fn box_cannot_be_pushed_off_the_grid() {
        let (grid, mut entities) = level("@B");

        assert_eq!(
            plan(&grid, &entities, Direction::Right),
            MoveOutcome::Rejected(RejectReason::BoxBlocked)
        );
        assert_eq!(
            resolve(&grid, &mut entities, Direction::Right, false),
            MoveOutcome::Rejected(RejectReason::BoxBlocked)
        );
        assert_eq!(entities.player_position(), (0, 0));
    }

    #[test]
    fn in_flight_move_is_rejected_first() {
        let (grid, mut entities) = level("#####\n#@  #\n#####");

        assert_eq!(
            resolve(&grid, &mut entities, Direction::Right, true),
            MoveOutcome::Rejected(RejectReason::AlreadyMoving)
        );
        assert_eq!(entities.player_position(), (1, 1));
    }
}
