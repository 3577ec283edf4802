use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    FeedController, HttpFeedApi, LIKE_COUNT_ID, MESSAGES_CONTAINER_ID, MESSAGE_MARKER_CLASS,
    MODAL_CLASS, MODAL_VISIBLE_CLASS, NEW_WARBLE_SUBMIT_ID, NEW_WARBLE_TEXT_ID, UNLIKED_CLASS,
};
use dom::{ClickEvent, Document, Element};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the warble server.
    #[arg(long)]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Toggle a like on a message and print the patched page.
    Like {
        #[arg(long)]
        message_id: String,
        #[arg(long, default_value_t = 0)]
        like_count: i64,
    },
    /// Post a new warble and print the patched page.
    Post {
        #[arg(long)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let api = Arc::new(HttpFeedApi::new(&args.server_url)?);
    let page = Arc::new(Mutex::new(seed_page(&args.command)));
    let controller = FeedController::new(api, Arc::clone(&page));

    let target = {
        let doc = page.lock().await;
        match &args.command {
            Command::Like { message_id, .. } => doc.element_by_id(message_id),
            Command::Post { .. } => doc.element_by_id(NEW_WARBLE_SUBMIT_ID),
        }
        .context("seeded control missing")?
    };

    tracing::info!(server_url = %args.server_url, "dispatching click");
    let mut event = ClickEvent::new(target);
    controller.dispatch_click(&mut event).await?;

    println!("{}", page.lock().await.render());
    Ok(())
}

/// A minimal page satisfying the document contract for the chosen command.
fn seed_page(command: &Command) -> Document {
    let mut doc = Document::new();
    let list = doc.append_child(doc.body(), Element::new("ul").id(MESSAGES_CONTAINER_ID));

    match command {
        Command::Like {
            message_id,
            like_count,
        } => {
            doc.append_child(
                list,
                Element::new("li").class("list-group-item").child(
                    Element::new("button")
                        .id(message_id)
                        .class("btn")
                        .class("btn-sm")
                        .class(MESSAGE_MARKER_CLASS)
                        .class(UNLIKED_CLASS),
                ),
            );
            doc.append_child(
                doc.body(),
                Element::new("span")
                    .id(LIKE_COUNT_ID)
                    .text(like_count.to_string()),
            );
        }
        Command::Post { text } => {
            doc.append_child(
                doc.body(),
                Element::new("input").id(NEW_WARBLE_TEXT_ID).attr("value", text),
            );
            doc.append_child(
                doc.body(),
                Element::new("button").id(NEW_WARBLE_SUBMIT_ID).text("Warble!"),
            );
            doc.append_child(
                doc.body(),
                Element::new("div").class(MODAL_CLASS).class(MODAL_VISIBLE_CLASS),
            );
        }
    }

    doc
}
