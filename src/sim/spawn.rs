use glam::Vec2;
use hecs::{Entity, World};

use super::components::{Avatar, Billboard, Facing, Placed, Player, Position};
use crate::game::board::Mark;
use crate::world::{Sprite, TextureId};

/// Spawn a player entity facing `facing` (normalized here).
pub fn spawn_player(
    world: &mut World,
    player: Player,
    pos: Vec2,
    facing: Vec2,
    avatar: TextureId,
) -> Entity {
    let facing = facing.try_normalize().unwrap_or(Vec2::NEG_X);
    world.spawn((player, Position(pos), Facing(facing), Avatar(avatar)))
}

/// Decorative billboard; survives every reset.
pub fn spawn_prop(world: &mut World, sprite: Sprite) -> Entity {
    world.spawn((Billboard(sprite),))
}

/// Billboard for a mark placed on the board.
pub fn spawn_mark(world: &mut World, sprite: Sprite) -> Entity {
    world.spawn((Billboard(sprite), Placed))
}

/// Remove every placed mark, leaving props alone. Returns how many went.
pub fn clear_marks(world: &mut World) -> usize {
    let placed: Vec<Entity> = world
        .query::<&Placed>()
        .iter()
        .map(|(e, _)| e)
        .collect();
    for &e in &placed {
        let _ = world.despawn(e);
    }
    placed.len()
}

/// The entity playing `mark`, if spawned.
pub fn find_player(world: &World, mark: Mark) -> Option<Entity> {
    world
        .query::<&Player>()
        .iter()
        .find(|(_, p)| p.mark == mark)
        .map(|(e, _)| e)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(mark: Mark) -> Player {
        Player {
            mark,
            name: mark.default_name().to_string(),
            score: 0,
        }
    }

    #[test]
    fn clear_marks_keeps_props_and_players() {
        let mut world = World::new();
        spawn_player(&mut world, player(Mark::X), Vec2::ONE, Vec2::X, 129);
        spawn_prop(&mut world, Sprite::new(Vec2::new(3.0, 3.0), 134));
        spawn_mark(&mut world, Sprite::new(Vec2::new(3.5, 3.5), 128));
        spawn_mark(&mut world, Sprite::new(Vec2::new(10.5, 3.5), 130));

        assert_eq!(clear_marks(&mut world), 2);
        assert_eq!(world.query::<&Billboard>().iter().count(), 1);
        assert!(find_player(&world, Mark::X).is_some());
        assert_eq!(clear_marks(&mut world), 0);
    }

    #[test]
    fn find_player_by_mark() {
        let mut world = World::new();
        let x = spawn_player(&mut world, player(Mark::X), Vec2::ONE, Vec2::X, 129);
        let o = spawn_player(&mut world, player(Mark::O), Vec2::ONE, Vec2::ZERO, 131);
        assert_eq!(find_player(&world, Mark::X), Some(x));
        assert_eq!(find_player(&world, Mark::O), Some(o));
        // zero facing falls back to looking west
        assert_eq!(world.get::<&Facing>(o).unwrap().0, Vec2::NEG_X);
    }
}
