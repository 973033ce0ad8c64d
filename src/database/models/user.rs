use serde::Deserialize;
use sqlx::FromRow;
use std::collections::BTreeSet;

use crate::database::manager::DatabaseError;
use crate::permissions::{PermissionProfile, Role};

/// Permission columns of a `usuarios` row. The allow-lists are stored as JSON text.
#[derive(Debug, Clone, Deserialize, FromRow)]
pub struct UserPermissionRow {
    pub id: String,
    pub role: Option<String>,
    pub ativo: Option<bool>,
    pub paginas_autorizadas: Option<String>,
    pub executantes_autorizados: Option<String>,
}

impl UserPermissionRow {
    pub fn is_active(&self) -> bool {
        self.ativo.unwrap_or(true)
    }

    pub fn into_profile(self) -> Result<PermissionProfile, DatabaseError> {
        Ok(PermissionProfile {
            role: Role::from_db(self.role.as_deref()),
            authorized_pages: parse_list(&self.id, "paginas_autorizadas", self.paginas_autorizadas.as_deref())?,
            authorized_executors: parse_list(&self.id, "executantes_autorizados", self.executantes_autorizados.as_deref())?,
        })
    }
}

fn parse_list(user_id: &str, column: &'static str, raw: Option<&str>) -> Result<BTreeSet<String>, DatabaseError> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(BTreeSet::new()),
        Some(json) => serde_json::from_str::<Vec<String>>(json).map(|v| v.into_iter().collect()).map_err(|e| {
            DatabaseError::CorruptPermissions { user_id: user_id.to_string(), column, reason: e.to_string() }
        }),
    }
}
