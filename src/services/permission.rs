//! Session permission resolution.

use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::SysRole;
use crate::nav::PermissionSet;

/// Resolve the permission codes granted to a user through their enabled
/// roles. This is the single source of the session's [`PermissionSet`]:
/// login embeds it in the response and the permission middleware resolves
/// it per request.
pub async fn permissions_for_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<PermissionSet, DatabaseError> {
    let codes = SysRole::permission_codes_for_user(pool, user_id).await?;
    Ok(PermissionSet::from_codes(codes))
}
