use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MessageId, UserId};

/// A warble as returned by the create-message endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub id: MessageId,
    pub user_id: UserId,
    pub user_username: String,
    pub user_image_url: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageRequest {
    pub text: String,
}

/// The create-message endpoint wraps its payload in a `data` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessageResponse {
    pub data: MessagePayload,
}
