use compact_str::CompactString;
use eyre::WrapErr;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use tg_api::{proto::ChatId, request::SendMessageRequest, Validate};
use tg_client::{AsyncSend, AsyncTgClient, ClientConfig};

fn parse_chat_id(raw: &str) -> ChatId {
    match raw.trim().parse::<i64>() {
        Ok(id) => ChatId::Int(id),
        Err(_) => ChatId::Str(CompactString::from(raw.trim())),
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Off)
        .with_module_level("tgsend", LevelFilter::Debug)
        .with_module_level("tg_client", LevelFilter::Debug)
        .with_module_level("tg_api", LevelFilter::Debug)
        .init()
        .wrap_err("logger failure")?;

    let config = ClientConfig::from_env()?;
    let chat_id = dotenv::var("CHAT_ID").wrap_err("no CHAT_ID in env")?;
    let text = dotenv::var("TEXT").unwrap_or_else(|_| "Hello World!".to_string());

    let request = SendMessageRequest::new(parse_chat_id(&chat_id), text).validated()?;
    let message = AsyncTgClient::with_config(config)?
        .scope(request.asend())
        .await?;

    info!(
        "sent message {} to chat {}",
        message.message_id, message.chat.id
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn chat_id_from_env() {
        assert!(parse_chat_id("1234567890") == ChatId::Int(1234567890));
        assert!(parse_chat_id("-1001234567890") == ChatId::Int(-1001234567890));
        assert!(parse_chat_id(" @channel ") == ChatId::Str("@channel".into()));
    }
}
