mod components;
mod spawn;
mod systems;
mod tic;

pub use components::{Avatar, Billboard, Buttons, Facing, InputCmd, Placed, Player, Position};
pub use spawn::{clear_marks, find_player, spawn_mark, spawn_player, spawn_prop};
pub use systems::{MOVE_SPEED, TURN_RATE, player_input, slide_move};
pub use tic::{DT, MAX_CATCHUP, SIM_FPS, TicRunner};
