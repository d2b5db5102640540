use crate::{EnemyId, Vec2};

/// The world services that clients of the pools query: where the enemies are.
///
/// Physics and scene management live outside the simulation. Anything that knows the positions
/// of the active enemies can stand in for them.
pub trait Arena {
    /// The active enemy nearest to `center` that lies within `radius` of it, if any.
    fn overlap_circle(&self, center: Vec2, radius: f32) -> Option<(EnemyId, Vec2)>;

    /// The position of an enemy, or `None` if it is no longer on the field.
    fn position_of(&self, id: EnemyId) -> Option<Vec2>;
}

/// Finds the nearest of `candidates` within `radius` of `center`.
pub(crate) fn nearest_within(
    candidates: impl IntoIterator<Item = (EnemyId, Vec2)>,
    center: Vec2,
    radius: f32,
) -> Option<(EnemyId, Vec2)> {
    candidates
        .into_iter()
        .map(|(id, position)| (id, position, center.distance(position)))
        .filter(|(_, _, distance)| *distance <= radius)
        .min_by(|(_, _, a), (_, _, b)| a.total_cmp(b))
        .map(|(id, position, _)| (id, position))
}
