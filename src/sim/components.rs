use bitflags::bitflags;
use glam::Vec2;

use crate::game::board::Mark;
use crate::world::{Sprite, TextureId};

/// World-space position in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Unit facing vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub Vec2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub mark: Mark,
    pub name: String,
    pub score: u32,
}

/// Sprite texture other players see at this entity's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avatar(pub TextureId);

/// A static billboard in the world (props and placed marks).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard(pub Sprite);

/// Tag for billboards that represent a mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed;

bitflags! {
    /// Edge-triggered actions for one tic.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const PLACE   = 0x01; // E
        const RESET   = 0x02; // Ctrl+R
        const CONFIRM = 0x04; // Enter
        const ERASE   = 0x08; // Backspace
        const QUIT    = 0x10; // Esc
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputCmd {
    pub forward: f32, // –1 … +1
    pub turn: f32,    // –1 … +1  (left / right)
    pub buttons: Buttons,
}
