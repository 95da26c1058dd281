//! Working-unit selection.

use crate::{has_permission, CurrentUser};
use zion_types::{Permission, UnitId};

/// Units `user` may select.
///
/// Roles granted [`Permission::ViewAllUnits`] may pick any unit in
/// `catalog`, falling back to their own list when the catalog is empty.
/// Everyone else is limited to their assigned units.
#[must_use]
pub fn allowed_units(user: &CurrentUser, catalog: &[UnitId]) -> Vec<UnitId> {
    if has_permission(user.role(), Permission::ViewAllUnits) && !catalog.is_empty() {
        catalog.to_vec()
    } else {
        user.units().to_vec()
    }
}

/// Picks the working unit for `user`.
///
/// A persisted choice is honored only if it is still allowed; otherwise the
/// first allowed unit is used. Returns `None` when no unit is allowed.
///
/// ```
/// use zion_auth::{select_unit, CurrentUser};
/// use zion_types::{Role, UnitId};
///
/// let bishop = CurrentUser::new("b", "Bishop", Role::UnitLeader)
///     .with_units([UnitId::new("harare-1st")]);
/// let stale = UnitId::new("norton");
/// assert_eq!(select_unit(&bishop, Some(&stale), &[]), Some(UnitId::new("harare-1st")));
/// ```
#[must_use]
pub fn select_unit(
    user: &CurrentUser,
    persisted: Option<&UnitId>,
    catalog: &[UnitId],
) -> Option<UnitId> {
    let allowed = allowed_units(user, catalog);
    if let Some(choice) = persisted {
        if allowed.contains(choice) {
            return Some(choice.clone());
        }
        tracing::debug!(user = %user.id(), unit = %choice, "persisted unit no longer allowed");
    }
    allowed.into_iter().next()
}
