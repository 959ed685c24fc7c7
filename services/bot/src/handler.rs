//! Update handlers of the bot

use common::{CreatedOrder, OrderError, OrderService, models::NewOrder};
use teloxide::{
    dispatching::{HandlerExt, UpdateHandler},
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, WebAppData, WebAppInfo},
    utils::command::BotCommands,
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::payload::parse_product_ids;

const GREETING: &str = "Welcome to Candy Store!";
const APOLOGY: &str = "Sorry, something went wrong while placing your order.";

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Open the store
    Start,
}

/// Keyboard with the buttons that open the web app pages
#[derive(Clone)]
pub struct WebAppMenu(InlineKeyboardMarkup);

impl WebAppMenu {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let base = base_url.trim_end_matches('/');
        let shop = Url::parse(&format!("{}/index.html", base))?;
        let admin = Url::parse(&format!("{}/admin.html", base))?;

        Ok(Self(InlineKeyboardMarkup::new(vec![
            vec![InlineKeyboardButton::web_app(
                "Open store",
                WebAppInfo { url: shop },
            )],
            vec![InlineKeyboardButton::web_app(
                "Admin panel",
                WebAppInfo { url: admin },
            )],
        ])))
    }
}

/// Why a web-app order could not be placed
#[derive(Debug, Error)]
enum PlacementError {
    #[error("Unrecognised order payload: {0:?}")]
    Payload(String),

    #[error("Message has no usable sender")]
    NoSender,

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Dispatch tree of the bot
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(start),
        )
        .branch(Message::filter_web_app_data().endpoint(web_app_data))
}

async fn start(bot: Bot, msg: Message, menu: WebAppMenu) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, GREETING)
        .reply_markup(menu.0)
        .await?;
    Ok(())
}

async fn web_app_data(
    bot: Bot,
    msg: Message,
    data: WebAppData,
    orders: OrderService,
) -> ResponseResult<()> {
    let reply = match place_order(&orders, &msg, &data.data).await {
        Ok(created) => {
            info!(
                "Order {} placed from chat {}",
                created.order.id, msg.chat.id.0
            );
            confirmation(&created)
        }
        Err(e) => {
            warn!("Failed to place order from chat {}: {}", msg.chat.id.0, e);
            APOLOGY.to_string()
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn place_order(
    orders: &OrderService,
    msg: &Message,
    raw: &str,
) -> Result<CreatedOrder, PlacementError> {
    let items = parse_product_ids(raw).ok_or_else(|| PlacementError::Payload(raw.to_string()))?;
    let telegram_id = msg
        .from
        .as_ref()
        .and_then(|user| i64::try_from(user.id.0).ok())
        .ok_or(PlacementError::NoSender)?;

    let created = orders
        .create_order(NewOrder {
            items,
            customer: None,
            user_id: Some(telegram_id),
        })
        .await?;

    Ok(created)
}

fn confirmation(created: &CreatedOrder) -> String {
    let names = created
        .products
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Order #{} placed: {}. Total: {:.2}",
        created.order.id, names, created.order.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::models::{Order, Product};
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str, price: Decimal) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            image: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_confirmation_lists_products_and_total() {
        let created = CreatedOrder {
            order: Order {
                id: 17,
                user_id: Some(42),
                items: vec![1, 2],
                total: Decimal::new(375, 1),
                status: "pending".to_string(),
                created_at: Utc::now(),
                full_name: None,
                address: None,
                phone: None,
            },
            products: vec![
                product(1, "Lollipop", Decimal::new(250, 1)),
                product(2, "Toffee", Decimal::new(125, 1)),
            ],
        };

        assert_eq!(
            confirmation(&created),
            "Order #17 placed: Lollipop, Toffee. Total: 37.50"
        );
    }

    #[test]
    fn test_menu_points_at_web_app_pages() {
        let WebAppMenu(markup) = WebAppMenu::new("https://shop.example.com/").unwrap();
        let urls: Vec<String> = markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                teloxide::types::InlineKeyboardButtonKind::WebApp(info) => {
                    Some(info.url.to_string())
                }
                _ => None,
            })
            .collect();

        assert_eq!(
            urls,
            vec![
                "https://shop.example.com/index.html",
                "https://shop.example.com/admin.html"
            ]
        );
    }

    #[test]
    fn test_menu_rejects_invalid_base_url() {
        assert!(WebAppMenu::new("not a url").is_err());
    }

    #[test]
    fn test_parse_failure_is_reported_as_payload_error() {
        let err = PlacementError::Payload("lollipop".to_string());
        assert_eq!(err.to_string(), "Unrecognised order payload: \"lollipop\"");
    }
}
