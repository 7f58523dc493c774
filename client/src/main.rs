//! # chat-client
//!
//! Small command line front end over the API clients.
//!
//! ```bash
//! CHAT_API_TOKEN=... chat-client chats [page] [limit]
//! CHAT_API_TOKEN=... chat-client messages <chat-id> [page] [limit]
//! ```

use anyhow::{bail, Context};
use chat_client::config::ClientConfig;
use chat_client::{logger, ApiServices, AuthToken};
use shared::dto::chat::{PageWindow, Paginated, DEFAULT_LIMIT, DEFAULT_PAGE};

const USAGE: &str = "usage: chat-client chats [page] [limit]\n       chat-client messages <chat-id> [page] [limit]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env()?;
    config.validate()?;
    let _log_guard = logger::init(&config);

    let token = std::env::var("CHAT_API_TOKEN").context("CHAT_API_TOKEN is not set")?;
    let token = AuthToken::new(token)?;
    let api = ApiServices::from_config(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("chats") => {
            let window = parse_window(args.get(1), args.get(2))?;
            let page = api.chats.get_user_chats(&token, window).await?;
            for chat in &page.chats {
                let members: Vec<&str> = chat.participants.iter().map(String::as_str).collect();
                let title = chat.group_name.as_deref().unwrap_or("direct");
                println!("{}  [{}]  {}  {}", chat.chat_id, title, members.join(", "), chat.last_message);
            }
            print_footer(&page);
        }
        Some("messages") => {
            let Some(chat_id) = args.get(1) else {
                bail!(USAGE);
            };
            let window = parse_window(args.get(2), args.get(3))?;
            let page = api.chats.get_messages(&token, chat_id, window).await?;
            for message in &page.messages {
                println!("{}: {}", message.sender, message.message);
            }
            print_footer(&page);
        }
        Some(other) => bail!("unknown command '{}'\n{}", other, USAGE),
    }

    Ok(())
}

fn parse_window(page: Option<&String>, limit: Option<&String>) -> anyhow::Result<PageWindow> {
    let page = match page {
        Some(raw) => raw.parse().with_context(|| format!("invalid page '{}'", raw))?,
        None => DEFAULT_PAGE,
    };
    let limit = match limit {
        Some(raw) => raw.parse().with_context(|| format!("invalid limit '{}'", raw))?,
        None => DEFAULT_LIMIT,
    };
    PageWindow::try_new(page, limit).map_err(anyhow::Error::msg)
}

fn print_footer(page: &impl Paginated) {
    println!(
        "-- page {} of {} ({} total)",
        page.page(),
        page.total_pages(),
        page.total()
    );
}
