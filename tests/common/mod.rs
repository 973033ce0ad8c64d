#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use agenda_portal_api::agenda::Clock;
use agenda_portal_api::auth::{generate_jwt, Claims};
use agenda_portal_api::database::{MemoryStore, TaskRecord, UserPermissionRow};
use agenda_portal_api::permissions::AnonymousAccess;
use agenda_portal_api::{app, AppState};

pub const SECRET: &str = "integration-secret";

pub const ADMIN: &str = "u-admin";
/// Manager restricted to executor "Ana".
pub const ANA_MANAGER: &str = "u-ana";
/// Plain user with an empty allow-list, i.e. unrestricted.
pub const OPEN_USER: &str = "u-open";
pub const INACTIVE: &str = "u-off";

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture date")
}

pub fn today() -> NaiveDate {
    day("2025-06-10")
}

fn task(
    id: i64,
    deadline: Option<&str>,
    executor: &str,
    status: Option<&str>,
    subtype: &str,
    label: Option<&str>,
    folder: &str,
) -> TaskRecord {
    TaskRecord {
        prazo_fatal_data: deadline.map(day),
        executante: Some(executor.to_string()),
        status: status.map(String::from),
        subtipo: Some(subtype.to_string()),
        etiqueta: label.map(String::from),
        pasta_proc: Some(folder.to_string()),
        compromisso_tarefa: Some("Tarefa".to_string()),
        ..TaskRecord::new(id)
    }
}

fn appointment(task: TaskRecord) -> TaskRecord {
    TaskRecord { compromisso_tarefa: Some("Compromisso".to_string()), ..task }
}

fn starting(start: &str, task: TaskRecord) -> TaskRecord {
    TaskRecord { inicio_data: Some(day(start)), ..task }
}

/// Ten tasks; classification below is relative to 2025-06-10.
///
/// Tasks 1, 5 and 8 are appointments. Tasks 1, 2 and 8 start today, task 5 on 2025-06-02.
pub fn fixtures() -> Vec<TaskRecord> {
    vec![
        starting("2025-06-10", appointment(task(1, Some("2025-06-10"), "Ana", Some("Pendente"), "Audiencia", Some("Alta"), "P-100"))), // critical
        starting("2025-06-10", task(2, Some("2025-06-11"), "Bia", Some("Pendente"), "Prazo", Some("Media"), "P-200")), // attention
        task(3, Some("2025-06-09"), "Ana", Some("Cumprido"), "Prazo", Some("Baixa"), "P-100"), // overdue, before cutoff
        task(4, None, "Ana", Some("Pendente"), "Reuniao", None, "P-300"),
        starting("2025-06-02", appointment(task(5, Some("2025-06-16"), "Caio", Some("Pendente"), "Audiencia", Some("Alta"), "P-400"))), // normal
        task(6, Some("2025-06-12"), "Ana", Some("Pendente"), "Prazo", Some("Media"), "P-100"), // attention
        task(7, Some("2025-06-14"), "Bia", Some("Cancelado"), "Prazo", Some("Baixa"), "P-200"), // upcoming
        starting("2025-06-10", appointment(task(8, Some("2025-06-13"), "Ana", None, "Audiencia", Some("Alta"), "P-300"))), // upcoming
        task(9, Some("2026-01-15"), "Bia", Some("Pendente"), "Prazo", Some("Alta"), "P-200"), // normal
        task(10, Some("2025-12-31"), "Ana", Some("Cumprido"), "Prazo", Some("Media"), "P-100"), // normal
    ]
}

fn user(id: &str, role: &str, executors: Option<&str>, active: bool) -> UserPermissionRow {
    UserPermissionRow {
        id: id.to_string(),
        role: Some(role.to_string()),
        ativo: Some(active),
        paginas_autorizadas: Some(r#"["dashboard_agenda"]"#.to_string()),
        executantes_autorizados: executors.map(String::from),
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(today(), AnonymousAccess::Deny)
    }

    pub fn at(today: NaiveDate) -> Self {
        Self::build(today, AnonymousAccess::Deny)
    }

    pub fn with_anonymous(anonymous: AnonymousAccess) -> Self {
        Self::build(today(), anonymous)
    }

    fn build(today: NaiveDate, anonymous: AnonymousAccess) -> Self {
        let store = Arc::new(MemoryStore::with_tasks(fixtures()));
        for row in [
            user(ADMIN, "administrador", None, true),
            user(ANA_MANAGER, "gerente", Some(r#"["Ana"]"#), true),
            user(OPEN_USER, "usuario", Some("[]"), true),
            user(INACTIVE, "administrador", None, false),
        ] {
            store.insert_user(row).expect("seed user");
        }

        let state = AppState::new(store.clone(), SECRET)
            .with_clock(Clock::Fixed(today))
            .with_anonymous(anonymous);

        Self { router: app(state, None, false), store }
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        let mut request = Request::builder().uri(path);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = request.body(Body::empty())?;

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body from {}", path))?
        };
        Ok((status, body))
    }

    /// `data` of a successful enveloped response.
    pub async fn get_data(&self, path: &str, token: Option<&str>) -> Result<Value> {
        let (status, body) = self.get(path, token).await?;
        anyhow::ensure!(status == StatusCode::OK, "GET {} returned {}: {}", path, status, body);
        anyhow::ensure!(body["success"] == true, "GET {} missing success envelope: {}", path, body);
        Ok(body["data"].clone())
    }
}

pub fn token_for(user_id: &str) -> String {
    let claims = Claims::new(user_id, format!("{}@example.com", user_id), 24);
    generate_jwt(&claims, SECRET).expect("sign test token")
}

/// `id_legalone` values of a `dados` listing, in response order.
pub fn ids(data: &Value) -> Vec<i64> {
    data["dados"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["id_legalone"].as_i64()).collect())
        .unwrap_or_default()
}
