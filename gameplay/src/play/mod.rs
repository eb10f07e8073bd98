pub mod movement;
pub mod player;
