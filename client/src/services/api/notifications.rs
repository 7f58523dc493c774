//! # Notification Endpoints
//!
//! CRUD over `/notifications`.

use std::num::NonZeroU32;
use std::sync::Arc;

use shared::dto::notification::{NewNotification, Notification, NotificationPage};

use crate::core::auth::AuthToken;
use crate::core::error::Result;
use crate::core::transport::{decode, ApiRequest, Transport};

const NOTIFICATIONS: &str = "notifications";

/// Client for the `/notifications` resource.
#[derive(Clone)]
pub struct NotificationClient {
    transport: Arc<dyn Transport>,
}

impl NotificationClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn create_notification(
        &self,
        auth: &AuthToken,
        notification: &NewNotification,
    ) -> Result<Notification> {
        let request = ApiRequest::post([NOTIFICATIONS]).bearer(auth).json(notification)?;
        decode(self.transport.execute(request).await?)
    }

    pub async fn get_all_notifications(
        &self,
        auth: &AuthToken,
        page: NonZeroU32,
    ) -> Result<NotificationPage> {
        let request = ApiRequest::get([NOTIFICATIONS]).query("page", page).bearer(auth);
        decode(self.transport.execute(request).await?)
    }

    pub async fn get_notification_by_id(&self, auth: &AuthToken, id: &str) -> Result<Notification> {
        let request = ApiRequest::get([NOTIFICATIONS, id]).bearer(auth);
        decode(self.transport.execute(request).await?)
    }

    pub async fn mark_as_read(&self, auth: &AuthToken, id: &str) -> Result<Notification> {
        let request = ApiRequest::patch([NOTIFICATIONS, id, "read"]).bearer(auth);
        decode(self.transport.execute(request).await?)
    }

    pub async fn delete_notification(&self, auth: &AuthToken, id: &str) -> Result<()> {
        let request = ApiRequest::delete([NOTIFICATIONS, id]).bearer(auth);
        self.transport.execute(request).await?;
        Ok(())
    }
}
