//! Back office identity: token verification and roles from the `profiles` table.

pub mod jwt;

pub use jwt::{verify_token, Claims};

use crate::error::AppError;
use crate::sql::qualified_table;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    /// Any other profile role, including none.
    Viewer,
}

impl Role {
    pub fn parse(s: &str) -> Role {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "editor" => Role::Editor,
            _ => Role::Viewer,
        }
    }

    /// May read and write content in the back office.
    pub fn can_edit(self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }

    /// May delete content and run maintenance.
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub role: Option<String>,
}

/// Load the profile row for a user id.
pub async fn load_profile(pool: &PgPool, schema: &str, id: Uuid) -> Result<Option<Profile>, AppError> {
    let sql = format!(
        "SELECT id, full_name, role FROM {} WHERE id = $1",
        qualified_table(schema, "profiles")
    );
    tracing::debug!(sql = %sql, user = %id, "query");
    let profile = sqlx::query_as::<_, Profile>(&sql).bind(id).fetch_optional(pool).await?;
    Ok(profile)
}
