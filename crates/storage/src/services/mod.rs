pub mod months;
pub mod roster;
pub mod standings;
