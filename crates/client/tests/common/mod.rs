//! In-process mock profile backend for client integration tests.
//!
//! Implements the REST contract (`GET/POST /profiles`,
//! `PUT/DELETE /profiles/{id}`) over an in-memory store and serves it
//! on an ephemeral port, so the reqwest client under test talks to a
//! real socket.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use parokya_core::{Profile, ProfileId, ProfileInput};

/// Shared in-memory store behind the mock routes.
#[derive(Clone, Default)]
pub struct BackendState {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    next_id: ProfileId,
    profiles: Vec<Profile>,
}

impl BackendState {
    /// Snapshot of the stored collection.
    #[allow(dead_code)]
    pub fn profiles(&self) -> Vec<Profile> {
        self.inner.lock().unwrap().profiles.clone()
    }
}

fn materialize(input: ProfileInput, id: ProfileId) -> Profile {
    let now = Utc::now();
    Profile {
        id,
        first_name: input.first_name,
        last_name: input.last_name,
        suffix: input.suffix,
        birth_date: input.birth_date,
        gender: input.gender,
        marital_status: input.marital_status,
        email: input.email,
        contact_number: input.contact_number,
        address: input.address,
        created_at: now,
        updated_at: now,
    }
}

async fn list_profiles(State(state): State<BackendState>) -> Json<Vec<Profile>> {
    Json(state.inner.lock().unwrap().profiles.clone())
}

async fn create_profile(
    State(state): State<BackendState>,
    Json(input): Json<ProfileInput>,
) -> (StatusCode, Json<Profile>) {
    let mut store = state.inner.lock().unwrap();
    store.next_id += 1;
    let profile = materialize(input, store.next_id);
    store.profiles.push(profile.clone());
    (StatusCode::CREATED, Json(profile))
}

async fn update_profile(
    State(state): State<BackendState>,
    Path(id): Path<ProfileId>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<Profile>, (StatusCode, String)> {
    let mut store = state.inner.lock().unwrap();
    let slot = store
        .profiles
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or((StatusCode::NOT_FOUND, format!("no profile with id {id}")))?;
    let mut replacement = materialize(input, id);
    replacement.created_at = slot.created_at;
    *slot = replacement.clone();
    Ok(Json(replacement))
}

async fn delete_profile(
    State(state): State<BackendState>,
    Path(id): Path<ProfileId>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = state.inner.lock().unwrap();
    let before = store.profiles.len();
    store.profiles.retain(|p| p.id != id);
    if store.profiles.len() == before {
        return Err((StatusCode::NOT_FOUND, format!("no profile with id {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Build the mock router over the given state.
pub fn router(state: BackendState) -> Router {
    Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route(
            "/profiles/{id}",
            axum::routing::put(update_profile).delete(delete_profile),
        )
        .with_state(state)
}

/// Serve the mock backend on an ephemeral port and return its address
/// together with a handle on the store.
pub async fn spawn_backend() -> (SocketAddr, BackendState) {
    let state = BackendState::default();
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind an ephemeral port");
    let addr = listener.local_addr().expect("listener should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend failed");
    });
    (addr, state)
}
