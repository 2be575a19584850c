use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A newtype that ensures a team's two players are stored in a normalized,
/// consistent order so that the pairs {A, B} and {B, A} are recognised as
/// the same team.
///
/// The smaller UUID always goes into `player_one_id`, which is what the
/// `teams_members_ordered` check constraint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct TeamMembers {
    player_one_id: Uuid,
    player_two_id: Uuid,
}

impl TeamMembers {
    /// Creates a normalized member pair. Input order does not matter.
    ///
    /// # Examples
    ///
    /// ```
    /// use storage::models::TeamMembers;
    /// use uuid::Uuid;
    ///
    /// let a = Uuid::from_u128(1);
    /// let b = Uuid::from_u128(2);
    ///
    /// assert_eq!(TeamMembers::new(a, b), TeamMembers::new(b, a));
    /// ```
    pub fn new(first: Uuid, second: Uuid) -> Self {
        if first <= second {
            Self {
                player_one_id: first,
                player_two_id: second,
            }
        } else {
            Self {
                player_one_id: second,
                player_two_id: first,
            }
        }
    }

    /// A team needs two different players.
    pub fn is_pair(&self) -> bool {
        self.player_one_id != self.player_two_id
    }

    pub fn contains(&self, player_id: Uuid) -> bool {
        self.player_one_id == player_id || self.player_two_id == player_id
    }

    /// True when the two teams have at least one player in common,
    /// which makes a match between them impossible.
    pub fn shares_player_with(&self, other: &TeamMembers) -> bool {
        other.contains(self.player_one_id) || other.contains(self.player_two_id)
    }

    /// Returns both ids as a tuple (player_one_id, player_two_id) for database storage
    pub fn as_database_tuple(&self) -> (Uuid, Uuid) {
        (self.player_one_id, self.player_two_id)
    }
}
