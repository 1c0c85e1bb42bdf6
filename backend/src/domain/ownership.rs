//! Ownership gate deciding who may change a recipe.

use super::recipe::Recipe;
use super::user::UserId;

/// The single account exempt from ownership checks.
pub const SUPERUSER_ID: UserId = UserId::from_trusted(1);

/// Whether `actor` may edit or delete `recipe`.
///
/// True for the recipe's owner and for [`SUPERUSER_ID`].
pub fn can_mutate(actor: UserId, recipe: &Recipe) -> bool {
    actor == SUPERUSER_ID || recipe.owner() == actor
}
