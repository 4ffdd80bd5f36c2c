//! In-process mock profile backend for end-to-end console tests.
//!
//! Same REST contract as the real backend, plus two test hooks: a
//! counter of collection fetches (to assert the cache's
//! one-refetch-per-write behavior) and a switch that makes every write
//! fail with a 500 (to exercise the no-data-loss path).

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use parokya_core::{Profile, ProfileId, ProfileInput};

#[derive(Clone, Default)]
pub struct BackendState {
    inner: Arc<Mutex<StoreInner>>,
    list_hits: Arc<AtomicUsize>,
    fail_writes: Arc<AtomicBool>,
}

#[derive(Default)]
struct StoreInner {
    next_id: ProfileId,
    profiles: Vec<Profile>,
}

impl BackendState {
    /// How many times `GET /profiles` has been served.
    pub fn list_hits(&self) -> usize {
        self.list_hits.load(Ordering::SeqCst)
    }

    /// Make every subsequent write fail with a 500.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn write_allowed(&self) -> Result<(), (StatusCode, String)> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "injected write failure".to_string(),
            ))
        } else {
            Ok(())
        }
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
    state.list_hits.fetch_add(1, Ordering::SeqCst);
    Json(state.inner.lock().unwrap().profiles.clone())
}

async fn create_profile(
    State(state): State<BackendState>,
    Json(input): Json<ProfileInput>,
) -> Result<(StatusCode, Json<Profile>), (StatusCode, String)> {
    state.write_allowed()?;
    let mut store = state.inner.lock().unwrap();
    store.next_id += 1;
    let profile = materialize(input, store.next_id);
    store.profiles.push(profile.clone());
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn update_profile(
    State(state): State<BackendState>,
    Path(id): Path<ProfileId>,
    Json(input): Json<ProfileInput>,
) -> Result<Json<Profile>, (StatusCode, String)> {
    state.write_allowed()?;
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
    state.write_allowed()?;
    let mut store = state.inner.lock().unwrap();
    let before = store.profiles.len();
    store.profiles.retain(|p| p.id != id);
    if store.profiles.len() == before {
        return Err((StatusCode::NOT_FOUND, format!("no profile with id {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Serve the mock backend on an ephemeral port.
pub async fn spawn_backend() -> (SocketAddr, BackendState) {
    let state = BackendState::default();
    let app = Router::new()
        .route("/profiles", get(list_profiles).post(create_profile))
        .route(
            "/profiles/{id}",
            axum::routing::put(update_profile).delete(delete_profile),
        )
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind an ephemeral port");
    let addr = listener.local_addr().expect("listener should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend failed");
    });
    (addr, state)
}
