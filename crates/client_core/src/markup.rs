//! Typed synthesis of the markup for a newly created warble.

use dom::Element;
use shared::protocol::MessagePayload;

use crate::{MESSAGE_MARKER_CLASS, UNLIKED_CLASS};

/// Build the list item for a freshly created warble. The like button is
/// the `msg` element of the document contract: it carries the message id
/// and the class pair in unliked state, so delegated like handling picks
/// it up without any re-binding.
pub fn warble_item(message: &MessagePayload) -> Element {
    let profile_href = format!("/users/{}", message.user_id);

    Element::new("li")
        .class("list-group-item")
        .child(
            Element::new("a")
                .class("message-link")
                .attr("href", format!("/messages/{}", message.id)),
        )
        .child(
            Element::new("a").attr("href", profile_href.clone()).child(
                Element::new("img")
                    .class("timeline-image")
                    .attr("src", &message.user_image_url)
                    .attr("alt", ""),
            ),
        )
        .child(
            Element::new("div")
                .class("message-area")
                .child(
                    Element::new("a")
                        .attr("href", profile_href)
                        .text(format!("@{}", message.user_username)),
                )
                .child(
                    Element::new("span")
                        .class("text-muted")
                        .text(message.timestamp.format("%d %B %Y").to_string()),
                )
                .child(Element::new("p").text(&message.text))
                .child(
                    Element::new("button")
                        .id(message.id.as_str())
                        .class("btn")
                        .class("btn-sm")
                        .class(MESSAGE_MARKER_CLASS)
                        .class(UNLIKED_CLASS)
                        .child(Element::new("i").class("fa").class("fa-thumbs-up")),
                ),
        )
}

#[cfg(test)]
#[path = "tests/markup_tests.rs"]
mod tests;
