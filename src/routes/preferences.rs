use axum::extract::Path;
use axum::Json;

use crate::models::preferences::{ColumnPreferences, DashboardTable};
use crate::models::session::Session;
use crate::routes::error::AppError;

/// GET /api/v1/preferences/columns/{table} — Default visible columns of a manager table.
pub async fn get_column_preferences(
    session: Session,
    Path(table): Path<String>,
) -> Result<Json<ColumnPreferences>, AppError> {
    if !session.role.is_manager() {
        return Err(AppError::Forbidden("manager tables require the manager role".into()));
    }
    let table: DashboardTable = table
        .parse()
        .map_err(|_| AppError::NotFound(format!("unknown table '{table}'")))?;
    Ok(Json(ColumnPreferences::defaults(table)))
}
