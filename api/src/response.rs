use compact_str::CompactString;
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{
    basic_types::{ChatIntId, MessageId},
    error::Error,
    proto::Message,
};

#[derive(Debug)]
pub enum CommonResponse<R> {
    Ok(R),
    Err(ErrorResponse),
}

#[allow(clippy::from_over_into)]
impl<R> Into<Result<R, ErrorResponse>> for CommonResponse<R> {
    fn into(self) -> Result<R, ErrorResponse> {
        match self {
            CommonResponse::Ok(response) => Ok(response),
            CommonResponse::Err(error) => Err(error),
        }
    }
}

impl<R> CommonResponse<R> {
    pub fn into_result(self) -> Result<R, ErrorResponse> {
        self.into()
    }
}

/// `ok: false` envelope. Displays the server's description verbatim.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, thiserror::Error)]
#[error("{description}")]
pub struct ErrorResponse {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub description: CompactString,
    pub parameters: Option<ResponseParameters>,
}

impl ErrorResponse {
    pub fn retry_after(&self) -> Option<i64> {
        self.parameters.as_ref().and_then(|p| p.retry_after)
    }

    pub fn migrate_to_chat_id(&self) -> Option<ChatIntId> {
        self.parameters.as_ref().and_then(|p| p.migrate_to_chat_id)
    }
}

/// Describes why a request was unsuccessful.
/// https://core.telegram.org/bots/api#responseparameters
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ResponseParameters {
    pub migrate_to_chat_id: Option<ChatIntId>,
    pub retry_after: Option<i64>,
}

impl<'de, R: Deserialize<'de>> Deserialize<'de> for CommonResponse<R> {
    fn deserialize<D>(deserializer: D) -> Result<CommonResponse<R>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;

        let ok = map
            .remove("ok")
            .ok_or_else(|| de::Error::missing_field("ok"))
            .map(Deserialize::deserialize)?
            .map_err(de::Error::custom)?;
        if ok {
            let result = map
                .remove("result")
                .ok_or_else(|| de::Error::missing_field("result"))
                .map(R::deserialize)?
                .map_err(de::Error::custom)?;
            Ok(CommonResponse::Ok(result))
        } else {
            let rest = Value::Object(map);
            ErrorResponse::deserialize(rest)
                .map(CommonResponse::Err)
                .map_err(de::Error::custom)
        }
    }
}

/// Result of the edit methods: the edited Message, or True for inline messages.
///
/// Narrowed by shape: a JSON boolean is tried first, then a Message.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageOrBool {
    Bool(bool),
    Message(Box<Message>),
}

impl MessageOrBool {
    pub fn message(&self) -> Option<&Message> {
        match self {
            MessageOrBool::Message(message) => Some(message),
            MessageOrBool::Bool(_) => None,
        }
    }

    pub fn into_message(self) -> Option<Message> {
        match self {
            MessageOrBool::Message(message) => Some(*message),
            MessageOrBool::Bool(_) => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MessageIdResponse {
    pub message_id: MessageId,
}

/// Parses an envelope and unwraps it into the operation's result.
pub fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, Error> {
    serde_json::from_slice::<CommonResponse<R>>(body)
        .map_err(Error::Decode)?
        .into_result()
        .map_err(Error::Application)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{Update, User};
    use assert2::{assert, let_assert};
    use serde_json::json;

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn deserialize_response_check() {
        let message = json!({
            "ok": true,
            "result": {
                "message_id": 123,
                "date": 2345,
                "chat": {
                    "id": 1,
                    "type": "group",
                }
            }
        });
        let_assert!(
            Ok(CommonResponse::Ok(sent)) = serde_json::from_value::<CommonResponse<Message>>(message)
        );
        assert!(sent.message_id == 123);

        let message = json!({"ok":true,"result":true,"description":"Webhook was set"});
        let_assert!(Ok(true) = decode::<bool>(&bytes(message)));
    }

    #[test]
    fn message_or_bool_narrowing() {
        let_assert!(
            Ok(MessageOrBool::Bool(true)) =
                decode::<MessageOrBool>(&bytes(json!({"ok": true, "result": true})))
        );

        let edited = json!({
            "ok": true,
            "result": {
                "message_id": 5,
                "date": 1,
                "chat": {"id": 1, "type": "private"},
                "text": "edited"
            }
        });
        let result = decode::<MessageOrBool>(&bytes(edited)).unwrap();
        assert!(result.message().and_then(|m| m.text.as_deref()) == Some("edited"));
        assert!(result.into_message().unwrap().message_id == 5);

        let neither = json!({"ok": true, "result": "yes"});
        let_assert!(Err(Error::Decode(_)) = decode::<MessageOrBool>(&bytes(neither)));
    }

    #[test]
    fn error_envelope_skips_result() {
        let body = json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found",
            "result": {"this": "is never parsed"}
        });
        let_assert!(Err(Error::Application(err)) = decode::<User>(&bytes(body)));
        assert!(err.error_code == 400);
        assert!(err.to_string() == "Bad Request: chat not found");
        assert!(err.retry_after().is_none());
    }

    #[test]
    fn flood_control_retry_hint() {
        let body = json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 17",
            "parameters": {"retry_after": 17}
        });
        let err = decode::<Message>(&bytes(body)).unwrap_err();
        assert!(err.retry_after() == Some(17));

        let body = json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: group chat was upgraded to a supergroup chat",
            "parameters": {"migrate_to_chat_id": -1001234567890_i64}
        });
        let_assert!(Err(Error::Application(err)) = decode::<Message>(&bytes(body)));
        assert!(err.migrate_to_chat_id() == Some(-1001234567890));
    }

    #[test]
    fn malformed_bodies() {
        let_assert!(Err(Error::Decode(_)) = decode::<bool>(b"<html>Bad Gateway</html>"));
        let_assert!(Err(Error::Decode(_)) = decode::<bool>(&bytes(json!({"result": true}))));
        let_assert!(Err(Error::Decode(_)) = decode::<bool>(&bytes(json!({"ok": true}))));
    }

    #[test]
    fn updates_result() {
        let body = json!({
            "ok": true,
            "result": [
                {"update_id": 1, "poll_answer": {
                    "poll_id": "p",
                    "user": {"id": 1, "is_bot": false, "first_name": "A"},
                    "option_ids": [0]
                }},
                {"update_id": 2}
            ]
        });
        let updates = decode::<Vec<Update>>(&bytes(body)).unwrap();
        assert!(updates.len() == 2);
        assert!(updates[1].kind == crate::proto::UpdateKind::Unknown);
    }
}
