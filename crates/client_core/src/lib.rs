//! Client-side interaction logic for the warble feed: delegated click
//! routing, the two backend calls, and the document patches they drive.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use dom::{ClickEvent, Document};
use reqwest::Client;
use shared::{
    domain::MessageId,
    protocol::{MessagePayload, NewMessageRequest, NewMessageResponse},
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

pub mod markup;

/// Marker class carried by every message's like control.
pub const MESSAGE_MARKER_CLASS: &str = "msg";
/// Class pair rendering the liked / not-liked appearance; exactly one is
/// present on a well-formed message element.
pub const LIKED_CLASS: &str = "btn-primary";
pub const UNLIKED_CLASS: &str = "btn-secondary";
pub const LIKE_COUNT_ID: &str = "like-count";
pub const NEW_WARBLE_TEXT_ID: &str = "new-warble-text";
pub const NEW_WARBLE_SUBMIT_ID: &str = "new-warble-submit";
pub const MESSAGES_CONTAINER_ID: &str = "messages";
pub const MODAL_CLASS: &str = "modal";
pub const MODAL_VISIBLE_CLASS: &str = "show";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("no `{0}` element in the document")]
    MissingMarker(&'static str),
    #[error("message element has no id attribute")]
    MissingMessageId,
}

/// The seam to the backend: one method per endpoint the feed consumes.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Toggle the like state of a message. The response body carries no
    /// information the client uses; completion is the only signal.
    async fn toggle_like(&self, id: &MessageId) -> Result<()>;

    /// Create a new warble from raw text, returning the stored payload.
    async fn create_message(&self, text: &str) -> Result<MessagePayload>;
}

/// `FeedApi` over HTTP against the warble server.
#[derive(Debug)]
pub struct HttpFeedApi {
    http: Client,
    server_url: String,
}

impl HttpFeedApi {
    pub fn new(server_url: &str) -> Result<Self> {
        let parsed = Url::parse(server_url).context("invalid server url")?;
        Ok(Self {
            http: Client::new(),
            server_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl FeedApi for HttpFeedApi {
    async fn toggle_like(&self, id: &MessageId) -> Result<()> {
        self.http
            .post(format!("{}/messages/{}/like", self.server_url, id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn create_message(&self, text: &str) -> Result<MessagePayload> {
        let response: NewMessageResponse = self
            .http
            .post(format!("{}/messages/new", self.server_url))
            .json(&NewMessageRequest {
                text: text.to_string(),
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.data)
    }
}

enum ClickTarget {
    Message,
    NewMessageSubmit,
    None,
}

/// Binds to the document body and reacts to delegated clicks: likes are
/// toggled optimistically, new warbles are created through the backend
/// and prepended to the messages container.
pub struct FeedController {
    api: Arc<dyn FeedApi>,
    page: Arc<Mutex<Document>>,
}

impl FeedController {
    pub fn new(api: Arc<dyn FeedApi>, page: Arc<Mutex<Document>>) -> Self {
        Self { api, page }
    }

    pub fn page(&self) -> Arc<Mutex<Document>> {
        Arc::clone(&self.page)
    }

    /// Delegated dispatch bound once at the body: clicks bubbling out of
    /// any `msg` element (present or inserted later) go to the like
    /// handler, the compose control goes to the submit handler, anything
    /// else falls through untouched.
    pub async fn dispatch_click(&self, event: &mut ClickEvent) -> Result<()> {
        let target = {
            let page = self.page.lock().await;
            if page
                .closest_with_class(event.target(), MESSAGE_MARKER_CLASS)
                .is_some()
            {
                ClickTarget::Message
            } else if page.attr(event.target(), "id") == Some(NEW_WARBLE_SUBMIT_ID) {
                ClickTarget::NewMessageSubmit
            } else {
                ClickTarget::None
            }
        };

        match target {
            ClickTarget::Message => {
                debug!("click matched message marker");
                self.handle_like_click(event).await
            }
            ClickTarget::NewMessageSubmit => {
                debug!("click matched compose control");
                self.handle_new_message_submit(event).await
            }
            ClickTarget::None => Ok(()),
        }
    }

    /// Toggle a like. The class swap and counter adjustment are applied
    /// before the request completes and stand even if it fails; the
    /// request is awaited for completion only.
    pub async fn handle_like_click(&self, event: &mut ClickEvent) -> Result<()> {
        event.prevent_default();

        let (message, message_id) = {
            let page = self.page.lock().await;
            let message = page
                .closest_with_class(event.target(), MESSAGE_MARKER_CLASS)
                .ok_or(FeedError::MissingMarker(MESSAGE_MARKER_CLASS))?;
            let id = page
                .attr(message, "id")
                .map(MessageId::from)
                .ok_or(FeedError::MissingMessageId)?;
            (message, id)
        };

        let request = self.api.toggle_like(&message_id);

        {
            let mut page = self.page.lock().await;
            page.toggle_class(message, UNLIKED_CLASS);
            let liked = page.toggle_class(message, LIKED_CLASS);
            self.adjust_like_count(&mut page, liked);
        }

        if let Err(err) = request.await {
            warn!(message_id = %message_id, error = %err, "like toggle request failed");
        }
        Ok(())
    }

    /// The counter tracks the toggle just applied: +1 when the element
    /// gained the liked class, -1 otherwise. A page without the counter
    /// skips this step.
    fn adjust_like_count(&self, page: &mut Document, liked: bool) {
        let Some(counter) = page.element_by_id(LIKE_COUNT_ID) else {
            return;
        };
        let count = page.text(counter).trim().parse::<i64>().unwrap_or(0);
        let count = if liked { count + 1 } else { count - 1 };
        page.set_text(counter, count.to_string());
    }

    /// Create a new warble from the compose input. The document is only
    /// touched once the response resolves: prepend the synthesized item,
    /// then clear the input, then dismiss the compose modal. A failed
    /// request propagates and leaves all three undone.
    pub async fn handle_new_message_submit(&self, _event: &mut ClickEvent) -> Result<()> {
        let (input, text) = {
            let page = self.page.lock().await;
            let input = page
                .element_by_id(NEW_WARBLE_TEXT_ID)
                .ok_or(FeedError::MissingMarker(NEW_WARBLE_TEXT_ID))?;
            (input, page.value(input).to_string())
        };

        let message = self.api.create_message(&text).await?;

        let mut page = self.page.lock().await;
        let container = page
            .element_by_id(MESSAGES_CONTAINER_ID)
            .ok_or(FeedError::MissingMarker(MESSAGES_CONTAINER_ID))?;
        page.prepend_child(container, markup::warble_item(&message));
        page.set_value(input, "");
        if let Some(modal) = page.first_by_class(MODAL_CLASS) {
            page.remove_class(modal, MODAL_VISIBLE_CLASS);
        }
        debug!(message_id = %message.id, "prepended new warble");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
