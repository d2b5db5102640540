use crate::Vec2;

/// Identifies an enemy for as long as it is on the field.
///
/// Pooled enemies keep their ID when recycled, so an ID refers to a specific enemy only while
/// that enemy is active.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EnemyId(pub u64);

/// An enemy standing on the field, waiting to be shot.
#[derive(Debug)]
pub struct Enemy {
    id: EnemyId,
    position: Vec2,
    active: bool,
}

impl Enemy {
    pub(crate) fn new(id: EnemyId) -> Self {
        Self {
            id,
            position: Vec2::ZERO,
            active: false,
        }
    }

    /// The identity of this enemy.
    #[must_use]
    pub fn id(&self) -> EnemyId {
        self.id
    }

    /// Where the enemy stands.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the enemy is currently on the field.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn place(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
