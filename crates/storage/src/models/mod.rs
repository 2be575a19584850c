mod match_record;
mod participant;
mod player;
mod team;
mod team_members;

pub use match_record::MatchRecord;
pub use participant::{Participant, ParticipantKind};
pub use player::Player;
pub use team::Team;
pub use team_members::TeamMembers;
