use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const PER_PAGE: usize = 6;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub year: u32,
    pub color: String,
    pub pantone_value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserPage {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub data: Vec<User>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// Employees created through `POST /users`, keyed by their generated id.
pub type Db = Arc<RwLock<HashMap<String, Map<String, Value>>>>;

#[derive(Clone)]
pub struct AppState {
    employees: Db,
    users: Arc<Vec<User>>,
    resources: Arc<Vec<Resource>>,
}

pub fn app() -> Router {
    let state = AppState {
        employees: Arc::new(RwLock::new(HashMap::new())),
        users: Arc::new(seed_users()),
        resources: Arc::new(seed_resources()),
    };
    Router::new()
        .route("/users", get(list_users).post(create_employee))
        .route(
            "/users/{id}",
            get(get_employee)
                .put(replace_employee)
                .patch(patch_employee)
                .delete(delete_employee),
        )
        .route("/unknown/{id}", get(get_resource))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub fn seed_users() -> Vec<User> {
    [
        (1, "George", "Bluth"),
        (2, "Janet", "Weaver"),
        (3, "Emma", "Wong"),
        (4, "Eve", "Holt"),
        (5, "Charles", "Morris"),
        (6, "Tracey", "Ramos"),
        (7, "Michael", "Lawson"),
        (8, "Lindsay", "Ferguson"),
        (9, "Tobias", "Funke"),
        (10, "Byron", "Fields"),
        (11, "George", "Edwards"),
        (12, "Rachel", "Howell"),
    ]
    .into_iter()
    .map(|(id, first, last)| User {
        id,
        email: format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
    })
    .collect()
}

pub fn seed_resources() -> Vec<Resource> {
    [
        (1, "cerulean", 2000, "#98B2D1", "15-4020"),
        (2, "fuchsia rose", 2001, "#C74375", "17-2031"),
        (3, "true red", 2002, "#BF1932", "19-1664"),
        (4, "aqua sky", 2003, "#7BC4C4", "14-4811"),
        (5, "tigerlily", 2004, "#E2583E", "17-1456"),
        (6, "blue turquoise", 2005, "#53B0AE", "15-5217"),
        (7, "sand dollar", 2006, "#DECDBE", "13-1106"),
        (8, "chili pepper", 2007, "#9B1B30", "19-1557"),
        (9, "blue iris", 2008, "#5A5B9F", "18-3943"),
        (10, "mimosa", 2009, "#F0C05A", "14-0848"),
        (11, "turquoise", 2010, "#45B5AA", "15-5519"),
        (12, "honeysuckle", 2011, "#D94F70", "18-2120"),
    ]
    .into_iter()
    .map(|(id, name, year, color, pantone_value)| Resource {
        id,
        name: name.to_string(),
        year,
        color: color.to_string(),
        pantone_value: pantone_value.to_string(),
    })
    .collect()
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn list_users(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Json<UserPage> {
    let page = query.page.unwrap_or(1).max(1);
    let total = state.users.len();
    let data = state
        .users
        .iter()
        .skip(page.saturating_sub(1).saturating_mul(PER_PAGE))
        .take(PER_PAGE)
        .cloned()
        .collect();
    Json(UserPage {
        page,
        per_page: PER_PAGE,
        total,
        total_pages: total.div_ceil(PER_PAGE),
        data,
    })
}

async fn create_employee(
    State(state): State<AppState>,
    Json(mut body): Json<Map<String, Value>>,
) -> (StatusCode, Json<Map<String, Value>>) {
    let id = Uuid::new_v4().to_string();
    body.insert("id".to_string(), Value::String(id.clone()));
    body.insert("createdAt".to_string(), Value::String(timestamp()));
    state.employees.write().await.insert(id, body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let employees = state.employees.read().await;
    employees
        .get(&id)
        .map(|employee| Json(json!({ "data": employee })))
        .ok_or_else(not_found)
}

/// Echo the body plus `updatedAt`, and store the result.
async fn replace_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut body): Json<Map<String, Value>>,
) -> Result<Json<Map<String, Value>>, (StatusCode, Json<Value>)> {
    let mut employees = state.employees.write().await;
    let stored = employees.get_mut(&id).ok_or_else(not_found)?;
    body.insert("updatedAt".to_string(), Value::String(timestamp()));
    *stored = body.clone();
    stored.insert("id".to_string(), Value::String(id));
    Ok(Json(body))
}

/// Echo the partial body plus `updatedAt`, and merge it into the stored record.
async fn patch_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut body): Json<Map<String, Value>>,
) -> Result<Json<Map<String, Value>>, (StatusCode, Json<Value>)> {
    let mut employees = state.employees.write().await;
    let stored = employees.get_mut(&id).ok_or_else(not_found)?;
    body.insert("updatedAt".to_string(), Value::String(timestamp()));
    for (key, value) in &body {
        stored.insert(key.clone(), value.clone());
    }
    Ok(Json(body))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut employees = state.employees.write().await;
    employees
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}

/// Ids that are not numbers are as unknown as numbers past the end.
async fn get_resource(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let id: u64 = id.parse().map_err(|_| not_found())?;
    state
        .resources
        .iter()
        .find(|resource| resource.id == id)
        .map(|resource| Json(json!({ "data": resource })))
        .ok_or_else(not_found)
}

fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({})))
}
