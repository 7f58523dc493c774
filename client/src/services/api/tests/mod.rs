//! # API Client Tests
//!
//! Shared fixtures for the client tests:
//!
//! - [`RecordingTransport`]: captures requests and replays canned replies
//! - [`spawn_backend`]: an in-memory axum backend on `127.0.0.1:0`, driven
//!   through the real [`ApiClient`]
//!
//! The fake backend treats the bearer token as the caller's user id.


use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use shared::dto::auth::Credentials;
use shared::dto::chat::{NewChat, OutgoingMessage};
use shared::dto::notification::NewNotification;

use super::{ApiClient, ApiServices};
use crate::core::error::{ApiError, Result};
use crate::core::transport::{ApiRequest, Transport};

// region:    --- RecordingTransport

/// Transport double that records every request.
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    replies: Mutex<VecDeque<Result<Value>>>,
    fallback: Value,
}

impl RecordingTransport {
    /// Answer every request with `reply`.
    pub fn replying(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            fallback: reply,
        })
    }

    /// Fail the first request with `error`, then answer `null`.
    pub fn failing(error: ApiError) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::from([Err(error)])),
            fallback: Value::Null,
        })
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was recorded")
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => Ok(self.fallback.clone()),
        }
    }
}

// endregion: --- RecordingTransport

// region:    --- Fake backend

type Rejection = (StatusCode, Json<Value>);
type Reply<T> = std::result::Result<T, Rejection>;

fn reject(status: StatusCode, message: impl Into<String>) -> Rejection {
    let code = status.canonical_reason().unwrap_or("Error").to_uppercase().replace(' ', "_");
    (status, Json(json!({ "message": message.into(), "code": code })))
}

struct StoredChat {
    chat_id: String,
    document_id: String,
    group_name: Option<String>,
    is_group_message: bool,
    members: Vec<String>,
    messages: Vec<Value>,
    archived_by: HashSet<String>,
    muted_by: HashSet<String>,
    read_by: HashSet<String>,
}

impl StoredChat {
    fn view(&self) -> Value {
        let last_message = self
            .messages
            .last()
            .and_then(|m| m["message"].as_str())
            .unwrap_or_default();
        let mut body = json!({
            "_id": self.document_id,
            "chatId": self.chat_id,
            "participants": self.members,
            "isGroupMessage": self.is_group_message,
            "lastMessage": last_message,
        });
        if let Some(name) = &self.group_name {
            body["groupName"] = json!(name);
        }
        body
    }
}

#[derive(Default)]
pub struct BackendState {
    next_id: u64,
    chats: Vec<StoredChat>,
    notifications: Vec<Value>,
}

impl BackendState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn chat_mut(&mut self, chat_id: &str) -> Reply<&mut StoredChat> {
        self.chats
            .iter_mut()
            .find(|c| c.chat_id == chat_id)
            .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Chat not found"))
    }

    fn member_chat_mut(&mut self, chat_id: &str, user: &str) -> Reply<&mut StoredChat> {
        let chat = self.chat_mut(chat_id)?;
        if !chat.members.iter().any(|m| m == user) {
            return Err(reject(StatusCode::FORBIDDEN, "Not a participant of this chat"));
        }
        Ok(chat)
    }
}

type SharedState = Arc<Mutex<BackendState>>;

/// A running fake backend plus clients pointed at it.
pub struct FakeBackend {
    pub api: ApiServices,
    pub base_url: String,
    state: SharedState,
}

impl FakeBackend {
    pub fn is_archived(&self, chat_id: &str, user: &str) -> bool {
        self.with_chat(chat_id, |c| c.archived_by.contains(user))
    }

    pub fn is_muted(&self, chat_id: &str, user: &str) -> bool {
        self.with_chat(chat_id, |c| c.muted_by.contains(user))
    }

    pub fn has_read(&self, chat_id: &str, user: &str) -> bool {
        self.with_chat(chat_id, |c| c.read_by.contains(user))
    }

    fn with_chat<T>(&self, chat_id: &str, f: impl FnOnce(&StoredChat) -> T) -> T {
        let state = self.state.lock().unwrap();
        let chat = state
            .chats
            .iter()
            .find(|c| c.chat_id == chat_id)
            .expect("chat exists in fake backend");
        f(chat)
    }
}

/// Start the fake backend and return clients bound to it.
pub async fn spawn_backend() -> FakeBackend {
    let state = SharedState::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend crashed");
    });

    let base_url = format!("http://{}", addr);
    let client = ApiClient::with_base_url(&base_url).expect("client for fake backend");
    FakeBackend {
        api: ApiServices::new(Arc::new(client)),
        base_url,
        state,
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/chats/create-chat", post(create_chat))
        .route("/chats/user", get(user_chats))
        .route("/chats/{chat_id}", delete(delete_chat))
        .route("/chats/{chat_id}/messages", post(send_message).get(list_messages))
        .route("/chats/{chat_id}/messages/read", patch(mark_read))
        .route("/chats/{chat_id}/messages/{message_id}", delete(delete_message))
        .route("/chats/{chat_id}/{action}", patch(membership))
        .route("/auth/login", post(login))
        .route("/auth/is-valid", get(is_valid))
        .route("/profile/search", get(search_profiles))
        .route("/profile/{user_id}", get(get_profile))
        .route("/profile/{user_id}/upload-image", post(upload_image))
        .route("/notifications", post(create_notification).get(list_notifications))
        .route("/notifications/{id}", get(get_notification).delete(delete_notification))
        .route("/notifications/{id}/read", patch(read_notification))
        .with_state(state)
}

fn caller(headers: &HeaderMap) -> Reply<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or_else(|| reject(StatusCode::UNAUTHORIZED, "Missing bearer token"))
}

#[derive(Deserialize)]
struct WindowParams {
    page: Option<usize>,
    limit: Option<usize>,
}

impl WindowParams {
    fn slice<T: Clone>(&self, items: &[T]) -> (Vec<T>, usize, usize) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).max(1);
        let slice = items.iter().skip((page - 1) * limit).take(limit).cloned().collect();
        (slice, page, limit)
    }
}

async fn create_chat(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply<Json<Value>> {
    let user = caller(&headers)?;
    let new_chat: NewChat = serde_json::from_value(body)
        .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("Invalid chat: {}", e)))?;

    if !new_chat.participants.contains(&user) {
        return Err(reject(StatusCode::BAD_REQUEST, "Creator must be a participant"));
    }
    if !new_chat.is_group_message && new_chat.participants.len() != 2 {
        return Err(reject(StatusCode::BAD_REQUEST, "Direct chats have two participants"));
    }
    if new_chat.is_group_message != new_chat.group_name.is_some() {
        return Err(reject(StatusCode::BAD_REQUEST, "Group name required for group chats"));
    }

    let mut state = state.lock().unwrap();
    let chat_id = state.next_id("chat");
    let document_id = state.next_id("doc");
    let stored = StoredChat {
        chat_id,
        document_id,
        group_name: new_chat.group_name,
        is_group_message: new_chat.is_group_message,
        members: new_chat.participants.iter().cloned().collect(),
        messages: Vec::new(),
        archived_by: HashSet::new(),
        muted_by: HashSet::new(),
        read_by: HashSet::new(),
    };
    let view = stored.view();
    state.chats.push(stored);
    Ok(Json(view))
}

async fn send_message(
    State(state): State<SharedState>,
    Path(chat_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply<Json<Value>> {
    let user = caller(&headers)?;
    let message: OutgoingMessage = serde_json::from_value(body)
        .map_err(|e| reject(StatusCode::BAD_REQUEST, format!("Invalid message: {}", e)))?;
    if message.sender != user {
        return Err(reject(StatusCode::FORBIDDEN, "Sender must be the caller"));
    }

    let mut state = state.lock().unwrap();
    let message_id = state.next_id("msg");
    let chat = state.member_chat_mut(&chat_id, &user)?;
    chat.messages.push(json!({
        "messageId": message_id,
        "message": message.message,
        "sender": message.sender,
    }));
    chat.read_by.clear();
    Ok(Json(json!({ "messageId": message_id })))
}

async fn list_messages(
    State(state): State<SharedState>,
    Path(chat_id): Path<String>,
    Query(window): Query<WindowParams>,
    headers: HeaderMap,
) -> Reply<Json<Value>> {
    let user = caller(&headers)?;
    let mut state = state.lock().unwrap();
    let chat = state.member_chat_mut(&chat_id, &user)?;
    let (messages, page, limit) = window.slice(&chat.messages);
    Ok(Json(json!({
        "messages": messages,
        "total": chat.messages.len(),
        "page": page,
        "limit": limit,
    })))
}

async fn mark_read(
    State(state): State<SharedState>,
    Path(chat_id): Path<String>,
    headers: HeaderMap,
) -> Reply<StatusCode> {
    let user = caller(&headers)?;
    let mut state = state.lock().unwrap();
    state.member_chat_mut(&chat_id, &user)?.read_by.insert(user);
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_message(
    State(state): State<SharedState>,
    Path((chat_id, message_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply<StatusCode> {
    let user = caller(&headers)?;
    let mut state = state.lock().unwrap();
    let chat = state.member_chat_mut(&chat_id, &user)?;
    let index = chat
        .messages
        .iter()
        .position(|m| m["messageId"] == json!(message_id))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Message not found"))?;
    if chat.messages[index]["sender"] != json!(user) {
        return Err(reject(StatusCode::FORBIDDEN, "Only the sender can delete a message"));
    }
    chat.messages.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

async fn membership(
    State(state): State<SharedState>,
    Path((chat_id, action)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply<StatusCode> {
    let user = caller(&headers)?;
    let mut state = state.lock().unwrap();
    let chat = state.member_chat_mut(&chat_id, &user)?;
    match action.as_str() {
        "archive" => {
            chat.archived_by.insert(user);
        }
        "unarchive" => {
            chat.archived_by.remove(&user);
        }
        "mute" => {
            chat.muted_by.insert(user);
        }
        "unmute" => {
            chat.muted_by.remove(&user);
        }
        "leave" => chat.members.retain(|m| *m != user),
        other => return Err(reject(StatusCode::NOT_FOUND, format!("Unknown action {}", other))),
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_chat(
    State(state): State<SharedState>,
    Path(chat_id): Path<String>,
    headers: HeaderMap,
) -> Reply<StatusCode> {
    let user = caller(&headers)?;
    let mut state = state.lock().unwrap();
    state.member_chat_mut(&chat_id, &user)?;
    state.chats.retain(|c| c.chat_id != chat_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn user_chats(
    State(state): State<SharedState>,
    Query(window): Query<WindowParams>,
    headers: HeaderMap,
) -> Reply<Json<Value>> {
    let user = caller(&headers)?;
    let state = state.lock().unwrap();
    let mine: Vec<Value> = state
        .chats
        .iter()
        .filter(|c| c.members.contains(&user))
        .map(StoredChat::view)
        .collect();
    let (chats, page, limit) = window.slice(&mine);
    Ok(Json(json!({ "chats": chats, "total": mine.len(), "page": page, "limit": limit })))
}

async fn login(Json(credentials): Json<Credentials>) -> Reply<Json<Value>> {
    if credentials.password != "Secret123" {
        return Err(reject(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }
    let user = credentials.email.split('@').next().unwrap_or_default().to_string();
    Ok(Json(json!({ "message": "Login successful", "token": user, "id": user })))
}

async fn is_valid(headers: HeaderMap) -> Reply<Json<Value>> {
    let user = caller(&headers)?;
    Ok(Json(json!({ "message": "Token is valid", "id": user })))
}

async fn get_profile(Path(user_id): Path<String>, headers: HeaderMap) -> Reply<Json<Value>> {
    caller(&headers)?;
    if user_id == "ghost" {
        return Err(reject(StatusCode::NOT_FOUND, "Profile not found"));
    }
    Ok(Json(json!({
        "user": user_id,
        "username": format!("{}-name", user_id),
        "gender": "Female",
        "dateOfBirth": "1990-05-01T00:00:00Z",
        "created": "2024-01-01T00:00:00Z",
        "online": true,
    })))
}

async fn search_profiles(
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Reply<Json<Value>> {
    caller(&headers)?;
    Ok(Json(json!({ "message": "Search results", "data": { "query": params } })))
}

async fn upload_image(
    Path(user_id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Reply<Json<Value>> {
    caller(&headers)?;
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| reject(StatusCode::BAD_REQUEST, e.to_string()))?;
        files.push(json!({ "field": name, "fileName": file_name, "size": bytes.len() }));
    }
    Ok(Json(json!({ "message": "Profile image uploaded", "data": { "user": user_id, "files": files } })))
}

async fn create_notification(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<NewNotification>,
) -> Reply<Json<Value>> {
    caller(&headers)?;
    let mut state = state.lock().unwrap();
    let id = state.next_id("note");
    let stored = json!({
        "_id": id,
        "title": body.title,
        "message": body.message,
        "userId": body.user_id,
        "read": false,
        "createdAt": "2024-06-01T08:00:00Z",
    });
    state.notifications.push(stored.clone());
    Ok(Json(stored))
}

async fn list_notifications(
    State(state): State<SharedState>,
    Query(window): Query<WindowParams>,
    headers: HeaderMap,
) -> Reply<Json<Value>> {
    caller(&headers)?;
    let state = state.lock().unwrap();
    let (notifications, page, _) = window.slice(&state.notifications);
    Ok(Json(json!({
        "notifications": notifications,
        "total": state.notifications.len(),
        "page": page,
    })))
}

fn find_notification<'a>(state: &'a mut BackendState, id: &str) -> Reply<&'a mut Value> {
    state
        .notifications
        .iter_mut()
        .find(|n| n["_id"] == json!(id))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Notification not found"))
}

async fn get_notification(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply<Json<Value>> {
    caller(&headers)?;
    let mut state = state.lock().unwrap();
    Ok(Json(find_notification(&mut state, &id)?.clone()))
}

async fn read_notification(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply<Json<Value>> {
    caller(&headers)?;
    let mut state = state.lock().unwrap();
    let notification = find_notification(&mut state, &id)?;
    notification["read"] = json!(true);
    Ok(Json(notification.clone()))
}

async fn delete_notification(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Reply<StatusCode> {
    caller(&headers)?;
    let mut state = state.lock().unwrap();
    find_notification(&mut state, &id)?;
    state.notifications.retain(|n| n["_id"] != json!(id));
    Ok(StatusCode::NO_CONTENT)
}

// endregion: --- Fake backend
