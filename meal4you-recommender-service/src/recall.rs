use tracing::debug;

use crate::restriction::RestrictionIndex;
use crate::snapshot::Snapshot;

/// Available meals that contain none of the ingredients forbidden for
/// `user_id`, in ascending id order.
///
/// A single forbidden ingredient disqualifies the whole meal. Meals without
/// ingredients are never forbidden.
pub fn recall(snapshot: &Snapshot, index: &RestrictionIndex, user_id: i32) -> Vec<i32> {
    let mut candidates: Vec<i32> = snapshot
        .meals
        .iter()
        .filter(|m| m.available)
        .map(|m| m.id)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();

    // Empty restriction or ingredient sets fall through to an empty
    // forbidden set, leaving every available meal.
    let restriction_ids = index.restrictions_of(user_id);
    let forbidden_ingredients = index.forbidden_ingredients(&restriction_ids);
    let forbidden_meals = index.meals_containing(&forbidden_ingredients);
    candidates.retain(|id| !forbidden_meals.contains(id));

    debug!(
        user_id,
        restrictions = restriction_ids.len(),
        forbidden_ingredients = forbidden_ingredients.len(),
        forbidden_meals = forbidden_meals.len(),
        candidates = candidates.len(),
        "recalled candidates"
    );
    candidates
}
