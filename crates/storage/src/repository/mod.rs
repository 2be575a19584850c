pub mod matches;
pub mod player;
pub mod team;
