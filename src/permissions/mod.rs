//! Per-user authorization: which dashboard pages a user may open and which
//! executors' rows they may see.

pub mod scope;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use scope::{retain_authorized, scope, scope_with, AnonymousAccess, ExecutorOf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "administrador")]
    Admin,
    #[serde(rename = "gerente")]
    Manager,
    #[serde(rename = "usuario")]
    User,
}

impl Role {
    /// Unknown or missing roles fall back to the least privileged one.
    pub fn from_db(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("administrador") => Role::Admin,
            Some("gerente") => Role::Manager,
            _ => Role::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "administrador",
            Role::Manager => "gerente",
            Role::User => "usuario",
        }
    }
}

/// Dashboard pages gated by `paginas_autorizadas`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    DashboardAgenda,
    DashboardIndicadores,
    GerenciamentoUsuarios,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::DashboardAgenda => "dashboard_agenda",
            Page::DashboardIndicadores => "dashboard_indicadores",
            Page::GerenciamentoUsuarios => "gerenciamento_usuarios",
        }
    }
}

/// A user's role plus the allow-lists loaded from their account.
///
/// An empty `authorized_executors` list means *every* executor for non-admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionProfile {
    pub role: Role,
    #[serde(rename = "paginas_autorizadas")]
    pub authorized_pages: BTreeSet<String>,
    #[serde(rename = "executantes_autorizados")]
    pub authorized_executors: BTreeSet<String>,
}

impl PermissionProfile {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            authorized_pages: BTreeSet::new(),
            authorized_executors: BTreeSet::new(),
        }
    }

    pub fn with_executors<I, S>(mut self, executors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authorized_executors = executors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pages(mut self, pages: &[Page]) -> Self {
        self.authorized_pages = pages.iter().map(|p| p.as_str().to_string()).collect();
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when no executor restriction applies.
    pub fn sees_all_executors(&self) -> bool {
        self.is_admin() || self.authorized_executors.is_empty()
    }
}

pub fn can_access_page(profile: Option<&PermissionProfile>, page: Page) -> bool {
    match profile {
        None => false,
        Some(p) if p.is_admin() => true,
        Some(p) => p.authorized_pages.contains(page.as_str()),
    }
}

pub fn can_view_executor(profile: Option<&PermissionProfile>, executor: Option<&str>) -> bool {
    match (profile, executor) {
        (Some(p), Some(executor)) => p.sees_all_executors() || p.authorized_executors.contains(executor),
        _ => false,
    }
}
