use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::IngredientRestriction;
use crate::snapshot::Snapshot;

/// Hash-map lookups over the restriction relations of one snapshot.
///
/// Built once per request. Every grouping keeps the first-seen row order of
/// its source relation and drops duplicate pairs.
pub struct RestrictionIndex<'a> {
    restrictions_by_user: HashMap<i32, Vec<i32>>,
    ingredients_by_restriction: HashMap<i32, Vec<i32>>,
    ingredient_restrictions: &'a [IngredientRestriction],
    meals_by_ingredient: HashMap<i32, Vec<i32>>,
    ingredients_by_meal: HashMap<i32, Vec<i32>>,
    ingredient_names: HashMap<i32, &'a str>,
    restriction_names: HashMap<i32, &'a str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedId {
    pub id: i32,
    pub name: Option<String>,
}

/// Ingredients of a meal and the restrictions those ingredients carry.
#[derive(Clone, Debug, PartialEq)]
pub struct MealRestrictions {
    pub meal_id: i32,
    pub ingredients: Vec<NamedId>,
    pub restrictions: Vec<NamedId>,
}

impl<'a> RestrictionIndex<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            restrictions_by_user: group(
                snapshot
                    .user_restrictions
                    .iter()
                    .map(|r| (r.user_id, r.restriction_id)),
            ),
            ingredients_by_restriction: group(
                snapshot
                    .ingredient_restrictions
                    .iter()
                    .map(|r| (r.restriction_id, r.ingredient_id)),
            ),
            ingredient_restrictions: &snapshot.ingredient_restrictions,
            meals_by_ingredient: group(
                snapshot
                    .meal_ingredients
                    .iter()
                    .map(|i| (i.ingredient_id, i.meal_id)),
            ),
            ingredients_by_meal: group(
                snapshot
                    .meal_ingredients
                    .iter()
                    .map(|i| (i.meal_id, i.ingredient_id)),
            ),
            ingredient_names: snapshot
                .ingredients
                .iter()
                .map(|i| (i.id, i.name.as_str()))
                .collect(),
            restriction_names: snapshot
                .restrictions
                .iter()
                .map(|r| (r.id, r.name.as_str()))
                .collect(),
        }
    }

    /// Restrictions declared by `user_id`. Unknown users have none.
    pub fn restrictions_of(&self, user_id: i32) -> BTreeSet<i32> {
        self.restrictions_by_user
            .get(&user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Ingredients carrying at least one of `restriction_ids`.
    pub fn forbidden_ingredients(&self, restriction_ids: &BTreeSet<i32>) -> BTreeSet<i32> {
        restriction_ids
            .iter()
            .filter_map(|id| self.ingredients_by_restriction.get(id))
            .flatten()
            .copied()
            .collect()
    }

    /// Meals using at least one of `ingredient_ids`.
    pub fn meals_containing(&self, ingredient_ids: &BTreeSet<i32>) -> HashSet<i32> {
        ingredient_ids
            .iter()
            .filter_map(|id| self.meals_by_ingredient.get(id))
            .flatten()
            .copied()
            .collect()
    }

    pub fn meal_restrictions(&self, meal_id: i32) -> MealRestrictions {
        let ingredient_ids = self
            .ingredients_by_meal
            .get(&meal_id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        // Restrictions follow IngredientRestriction row order, not ingredient order.
        let ingredient_set: HashSet<i32> = ingredient_ids.iter().copied().collect();
        let mut restriction_ids: Vec<i32> = Vec::new();
        for row in self.ingredient_restrictions {
            if ingredient_set.contains(&row.ingredient_id)
                && !restriction_ids.contains(&row.restriction_id)
            {
                restriction_ids.push(row.restriction_id);
            }
        }

        MealRestrictions {
            meal_id,
            ingredients: ingredient_ids
                .iter()
                .map(|&id| NamedId {
                    id,
                    name: self.ingredient_names.get(&id).map(|n| n.to_string()),
                })
                .collect(),
            restrictions: restriction_ids
                .into_iter()
                .map(|id| NamedId {
                    id,
                    name: self.restriction_names.get(&id).map(|n| n.to_string()),
                })
                .collect(),
        }
    }
}

fn group(pairs: impl IntoIterator<Item = (i32, i32)>) -> HashMap<i32, Vec<i32>> {
    let mut groups: HashMap<i32, Vec<i32>> = HashMap::new();
    for (key, value) in pairs {
        let values = groups.entry(key).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::{IngredientRestriction, MealIngredient};

    #[test]
    fn test_restrictions_of_unknown_user_is_empty() {
        let snapshot = fixtures::scenario();
        let index = RestrictionIndex::new(&snapshot);

        assert!(index.restrictions_of(4242).is_empty());
        assert_eq!(index.restrictions_of(1000), BTreeSet::from([1]));
    }

    #[test]
    fn test_forbidden_ingredients() {
        let snapshot = fixtures::scenario();
        let index = RestrictionIndex::new(&snapshot);

        assert_eq!(
            index.forbidden_ingredients(&BTreeSet::from([1])),
            BTreeSet::from([105])
        );
        assert!(index.forbidden_ingredients(&BTreeSet::new()).is_empty());
        // Restriction 5 exists but no ingredient carries it.
        assert!(index.forbidden_ingredients(&BTreeSet::from([5])).is_empty());
    }

    #[test]
    fn test_meals_containing() {
        let snapshot = fixtures::scenario();
        let index = RestrictionIndex::new(&snapshot);

        assert_eq!(
            index.meals_containing(&BTreeSet::from([105])),
            HashSet::from([501])
        );
        assert!(index.meals_containing(&BTreeSet::from([999])).is_empty());
    }

    #[test]
    fn test_meal_restrictions_resolves_names_and_dedups() {
        let mut snapshot = fixtures::scenario();
        snapshot.meal_ingredients.push(MealIngredient {
            meal_id: 501,
            ingredient_id: 777,
        });
        snapshot.meal_ingredients.push(MealIngredient {
            meal_id: 501,
            ingredient_id: 105,
        });
        snapshot.ingredient_restrictions.push(IngredientRestriction {
            ingredient_id: 777,
            restriction_id: 1,
        });
        snapshot.ingredient_restrictions.push(IngredientRestriction {
            ingredient_id: 777,
            restriction_id: 9,
        });
        let index = RestrictionIndex::new(&snapshot);

        let result = index.meal_restrictions(501);

        assert_eq!(
            result.ingredients.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![101, 105, 777]
        );
        assert_eq!(result.ingredients[1].name.as_deref(), Some("Milk"));
        assert_eq!(result.ingredients[2].name, None);
        assert_eq!(
            result.restrictions,
            vec![
                NamedId {
                    id: 1,
                    name: Some("Lactose".to_string()),
                },
                NamedId { id: 9, name: None },
            ]
        );
    }

    #[test]
    fn test_meal_restrictions_follow_restriction_row_order() {
        let mut snapshot = fixtures::scenario();
        snapshot.meal_ingredients.push(MealIngredient {
            meal_id: 501,
            ingredient_id: 777,
        });
        // Ingredient 777 comes after 105 in the meal, but its restriction row
        // is listed first.
        snapshot.ingredient_restrictions.insert(
            0,
            IngredientRestriction {
                ingredient_id: 777,
                restriction_id: 9,
            },
        );
        let index = RestrictionIndex::new(&snapshot);

        let result = index.meal_restrictions(501);

        assert_eq!(
            result.ingredients.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![101, 105, 777]
        );
        assert_eq!(
            result.restrictions.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![9, 1]
        );
    }

    #[test]
    fn test_meal_restrictions_of_unknown_meal_is_empty() {
        let snapshot = fixtures::scenario();
        let index = RestrictionIndex::new(&snapshot);

        let result = index.meal_restrictions(9999);

        assert_eq!(result.meal_id, 9999);
        assert!(result.ingredients.is_empty());
        assert!(result.restrictions.is_empty());
    }
}
