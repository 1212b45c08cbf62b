use compact_str::CompactString;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    basic_types::{MessageId, MessageThreadId},
    files::fmt_bytes,
    media::{InputMediaBytes, InputMediaUrl},
    proto::{
        ChatAction, ChatId, InlineKeyboardMarkup, MessageEntity, ParseMode, ReplyMarkup,
        UpdateType,
    },
    validate::{self, Constraint, Validate, ValidationError, MAX_TEXT_LENGTH},
};

/// Use this method to send text messages. On success, the sent Message is returned.
/// https://core.telegram.org/bots/api#sendmessage
#[skip_serializing_none]
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    pub text: CompactString,
    pub parse_mode: Option<ParseMode>,
    pub entities: Option<Vec<MessageEntity>>,
    pub disable_web_page_preview: Option<bool>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessageRequest {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<CompactString>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Use this method to send photos. On success, the sent Message is returned.
///
/// `photo` is a file_id of a photo that exists on the Telegram servers
/// or an HTTP URL for Telegram to get a photo from the Internet.
/// https://core.telegram.org/bots/api#sendphoto
#[skip_serializing_none]
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(deny_unknown_fields)]
pub struct SendUrlPhotoRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    pub photo: CompactString,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub has_spoiler: Option<bool>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
    pub reply_markup: Option<ReplyMarkup>,
}

/// Same as [`SendUrlPhotoRequest`], but the photo is uploaded using multipart/form-data.
/// The photo must be at most 10 MB in size.
#[skip_serializing_none]
#[derive(Clone, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SendBytesPhotoRequest {
    pub chat_id: ChatId,
    #[serde(skip_serializing)]
    #[derivative(Debug(format_with = "fmt_bytes"))]
    pub photo: Vec<u8>,
    /// File name of the uploaded part, `photo` when unset.
    #[serde(skip_serializing)]
    pub filename: Option<CompactString>,
    pub message_thread_id: Option<MessageThreadId>,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub has_spoiler: Option<bool>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
    pub reply_markup: Option<ReplyMarkup>,
}

/// Use this method to send general files. On success, the sent Message is returned.
/// https://core.telegram.org/bots/api#senddocument
#[skip_serializing_none]
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(deny_unknown_fields)]
pub struct SendUrlDocumentRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    pub document: CompactString,
    pub thumbnail: Option<CompactString>,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub disable_content_type_detection: Option<bool>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
    pub reply_markup: Option<ReplyMarkup>,
}

/// Same as [`SendUrlDocumentRequest`], but the document (and its optional thumbnail)
/// is uploaded using multipart/form-data. Bots can currently send files of up to 50 MB in size.
#[skip_serializing_none]
#[derive(Clone, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SendBytesDocumentRequest {
    pub chat_id: ChatId,
    #[serde(skip_serializing)]
    #[derivative(Debug(format_with = "fmt_bytes"))]
    pub document: Vec<u8>,
    /// File name of the uploaded part, `document` when unset.
    #[serde(skip_serializing)]
    pub filename: Option<CompactString>,
    pub message_thread_id: Option<MessageThreadId>,
    /// JPEG thumbnail, less than 200 kB and at most 320 px wide and high.
    #[serde(default, skip_serializing)]
    #[derivative(Debug = "ignore")]
    pub thumbnail: Option<Vec<u8>>,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub disable_content_type_detection: Option<bool>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
    pub reply_markup: Option<ReplyMarkup>,
}

/// Use this method to delete a message, including service messages. Returns True on success.
/// https://core.telegram.org/bots/api#deletemessage
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteMessageRequest {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Use this method to edit text and game messages. On success, if the edited message is not an inline
/// message, the edited Message is returned, otherwise True is returned.
/// https://core.telegram.org/bots/api#editmessagetext
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditMessageTextRequest {
    pub chat_id: Option<ChatId>,
    pub message_id: Option<MessageId>,
    pub inline_message_id: Option<CompactString>,
    pub text: CompactString,
    pub parse_mode: Option<ParseMode>,
    pub entities: Option<Vec<MessageEntity>>,
    pub disable_web_page_preview: Option<bool>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// https://core.telegram.org/bots/api#editmessagereplymarkup
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditMessageReplyMarkupRequest {
    pub chat_id: Option<ChatId>,
    pub message_id: Option<MessageId>,
    pub inline_message_id: Option<CompactString>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// https://core.telegram.org/bots/api#editmessagecaption
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditMessageCaptionRequest {
    pub chat_id: Option<ChatId>,
    pub message_id: Option<MessageId>,
    pub inline_message_id: Option<CompactString>,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Use this method to edit animation, audio, document, photo, or video messages.
/// The new media is referenced by file_id or HTTP URL.
/// https://core.telegram.org/bots/api#editmessagemedia
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditUrlMessageMediaRequest {
    pub chat_id: Option<ChatId>,
    pub message_id: Option<MessageId>,
    pub inline_message_id: Option<CompactString>,
    pub media: InputMediaUrl,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Same as [`EditUrlMessageMediaRequest`] with the new media uploaded as file parts.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditBytesMessageMediaRequest {
    pub chat_id: Option<ChatId>,
    pub message_id: Option<MessageId>,
    pub inline_message_id: Option<CompactString>,
    pub media: InputMediaBytes,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// A simple method for testing your bot's authentication token.
/// https://core.telegram.org/bots/api#getme
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetMeRequest {}

/// https://core.telegram.org/bots/api#getupdates
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetUpdatesRequest {
    pub offset: Option<i64>,
    /// Accepted values are between 1 and 100, defaults to 100 on the server.
    pub limit: Option<i64>,
    pub timeout: Option<i64>,
    pub allowed_updates: Option<Vec<UpdateType>>,
}

/// Use this method to forward messages of any kind. Service messages can't be forwarded.
/// On success, the sent Message is returned.
/// https://core.telegram.org/bots/api#forwardmessage
#[skip_serializing_none]
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(deny_unknown_fields)]
pub struct ForwardMessageRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    pub from_chat_id: ChatId,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub message_id: MessageId,
}

/// Use this method to copy messages of any kind. Service messages and invoice messages can't be copied.
/// The method is analogous to the method forwardMessage, but the copied message doesn't have a link
/// to the original message. Returns the MessageId of the sent message on success.
/// https://core.telegram.org/bots/api#copymessage
#[skip_serializing_none]
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(deny_unknown_fields)]
pub struct CopyMessageRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    pub from_chat_id: ChatId,
    pub message_id: MessageId,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub disable_notification: Option<bool>,
    pub protect_content: Option<bool>,
    pub reply_to_message_id: Option<MessageId>,
    pub allow_sending_without_reply: Option<bool>,
    pub reply_markup: Option<ReplyMarkup>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(deny_unknown_fields)]
pub struct SendChatActionRequest {
    pub chat_id: ChatId,
    pub message_thread_id: Option<MessageThreadId>,
    #[derivative(Default(value = "ChatAction::Typing"))]
    pub action: ChatAction,
}

fn chat_id(field: &str, id: &mut ChatId) -> Result<(), ValidationError> {
    match id {
        ChatId::Int(_) => Ok(()),
        ChatId::Str(username) => validate::not_blank(field, username),
    }
}

/// An edit addresses either an inline message or a message in a chat.
fn edit_target(
    chat: &mut Option<ChatId>,
    message_id: Option<MessageId>,
    inline_message_id: &mut Option<CompactString>,
) -> Result<(), ValidationError> {
    if let Some(id) = chat {
        chat_id("chat_id", id)?;
    }
    validate::trim_opt(inline_message_id);
    let inline = inline_message_id.as_ref().is_some_and(|id| !id.is_empty());
    if inline || (chat.is_some() && message_id.is_some()) {
        return Ok(());
    }
    Err(ValidationError::new(
        "inline_message_id",
        Constraint::Requires("chat_id and message_id when unset"),
    ))
}

impl Validate for SendMessageRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)?;
        validate::text("text", &mut self.text, MAX_TEXT_LENGTH)
    }
}

impl Validate for SendUrlPhotoRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)?;
        validate::not_blank("photo", &mut self.photo)?;
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for SendBytesPhotoRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)?;
        validate::trim_opt(&mut self.filename);
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for SendUrlDocumentRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)?;
        validate::not_blank("document", &mut self.document)?;
        validate::trim_opt(&mut self.thumbnail);
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for SendBytesDocumentRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)?;
        validate::trim_opt(&mut self.filename);
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for DeleteMessageRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)
    }
}

impl Validate for EditMessageTextRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        edit_target(
            &mut self.chat_id,
            self.message_id,
            &mut self.inline_message_id,
        )?;
        validate::text("text", &mut self.text, MAX_TEXT_LENGTH)
    }
}

impl Validate for EditMessageReplyMarkupRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        edit_target(
            &mut self.chat_id,
            self.message_id,
            &mut self.inline_message_id,
        )
    }
}

impl Validate for EditMessageCaptionRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        edit_target(
            &mut self.chat_id,
            self.message_id,
            &mut self.inline_message_id,
        )?;
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for EditUrlMessageMediaRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        edit_target(
            &mut self.chat_id,
            self.message_id,
            &mut self.inline_message_id,
        )?;
        self.media.validate().map_err(|err| err.within("media"))
    }
}

impl Validate for EditBytesMessageMediaRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        edit_target(
            &mut self.chat_id,
            self.message_id,
            &mut self.inline_message_id,
        )?;
        self.media.validate().map_err(|err| err.within("media"))
    }
}

impl Validate for GetMeRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for GetUpdatesRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        match self.limit {
            Some(limit) => validate::range("limit", limit, 1, 100),
            None => Ok(()),
        }
    }
}

impl Validate for ForwardMessageRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)?;
        chat_id("from_chat_id", &mut self.from_chat_id)
    }
}

impl Validate for CopyMessageRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)?;
        chat_id("from_chat_id", &mut self.from_chat_id)?;
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for SendChatActionRequest {
    fn validate(&mut self) -> Result<(), ValidationError> {
        chat_id("chat_id", &mut self.chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        media::{InputMediaBytesDocument, InputMediaUrlPhoto},
        proto::{ForceReply, InlineKeyboardButton},
    };
    use assert2::{assert, let_assert};
    use serde_json::json;

    #[test]
    fn hello_world_message_is_trimmed() {
        let request = SendMessageRequest::new(ChatId::Int(1234567), "  Hello World! ")
            .validated()
            .unwrap();
        assert!(request.text == "Hello World!");
        assert!(
            serde_json::to_value(&*request).unwrap()
                == json!({"chat_id": 1234567, "text": "Hello World!"})
        );
    }

    #[test]
    fn text_bounds() {
        let_assert!(Err(err) = SendMessageRequest::new(ChatId::Int(1), "").validated());
        assert!(err.field == "text");
        assert!(err.constraint == Constraint::MinLength { min: 1, actual: 0 });

        let_assert!(Err(err) = SendMessageRequest::new(ChatId::Int(1), "   ").validated());
        assert!(err.constraint == Constraint::Blank);

        assert!(SendMessageRequest::new(ChatId::Int(1), "a".repeat(4096)).validated().is_ok());
        assert!(SendMessageRequest::new(ChatId::Int(1), "a".repeat(4097)).validated().is_err());
        // astral-plane emoji count as two units each
        assert!(SendMessageRequest::new(ChatId::Int(1), "🎉".repeat(4096)).validated().is_err());
    }

    #[test]
    fn blank_username_chat_id() {
        let_assert!(Err(err) = SendMessageRequest::new("  ", "hi").validated());
        assert!(err.field == "chat_id");
    }

    #[test]
    fn modify_revalidates() {
        let request = SendMessageRequest::new(ChatId::Int(1), "hello").validated().unwrap();
        let_assert!(Err(err) = request.clone().modify(|r| r.text = "".into()));
        assert!(err.field == "text");
        let changed = request.modify(|r| r.text = " bye ".into()).unwrap();
        assert!(changed.text == "bye");
    }

    #[test]
    fn optional_fields_are_omitted_not_null() {
        let request = SendMessageRequest {
            chat_id: ChatId::Str("@channel".into()),
            text: "hi".into(),
            parse_mode: Some(ParseMode::MarkdownV2),
            reply_markup: Some(ForceReply::default().into()),
            ..Default::default()
        };
        let encoded = serde_json::to_value(&request).unwrap();
        assert!(
            encoded
                == json!({
                    "chat_id": "@channel",
                    "text": "hi",
                    "parse_mode": "MarkdownV2",
                    "reply_markup": {"force_reply": true}
                })
        );
        let decoded: SendMessageRequest = serde_json::from_value(encoded).unwrap();
        assert!(decoded == request);
    }

    #[test]
    fn caption_limits() {
        let mut request = SendUrlPhotoRequest {
            chat_id: ChatId::Int(1),
            photo: "https://example.com/cat.jpg".into(),
            caption: Some("x".repeat(1024).into()),
            ..Default::default()
        };
        assert!(request.clone().validated().is_ok());
        request.caption = Some("x".repeat(1025).into());
        let_assert!(Err(err) = request.validated());
        assert!(err.constraint == Constraint::MaxLength { max: 1024, actual: 1025 });

        let copy = CopyMessageRequest {
            chat_id: ChatId::Int(1),
            from_chat_id: ChatId::Int(2),
            message_id: 3,
            caption: Some("".into()),
            ..Default::default()
        };
        assert!(copy.validated().is_ok());
    }

    #[test]
    fn edits_need_a_target() {
        let untargeted = EditMessageTextRequest {
            chat_id: Some(ChatId::Int(1)),
            text: "new".into(),
            ..Default::default()
        };
        let_assert!(Err(err) = untargeted.validated());
        assert!(err.field == "inline_message_id");

        let targeted = EditMessageTextRequest {
            chat_id: Some(ChatId::Int(1)),
            message_id: Some(2),
            text: "new".into(),
            ..Default::default()
        };
        assert!(targeted.validated().is_ok());

        let markup = EditMessageReplyMarkupRequest {
            inline_message_id: Some(" abc ".into()),
            reply_markup: Some(InlineKeyboardMarkup::new([vec![
                InlineKeyboardButton::callback("ok", "ok"),
            ]])),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert!(markup.inline_message_id.as_deref() == Some("abc"));

        let blank_inline = EditMessageCaptionRequest {
            inline_message_id: Some("   ".into()),
            ..Default::default()
        };
        let_assert!(Err(_) = blank_inline.validated());
    }

    #[test]
    fn media_errors_carry_the_field_path() {
        let request = EditUrlMessageMediaRequest {
            chat_id: Some(ChatId::Int(1)),
            message_id: Some(2),
            inline_message_id: None,
            media: InputMediaUrlPhoto {
                media: "file-id".into(),
                caption: Some("x".repeat(2000).into()),
                ..Default::default()
            }
            .into(),
            reply_markup: None,
        };
        let_assert!(Err(err) = request.validated());
        assert!(err.field == "media.caption");

        let request = EditBytesMessageMediaRequest {
            chat_id: None,
            message_id: None,
            inline_message_id: Some("inline".into()),
            media: InputMediaBytesDocument {
                media: "doc.txt".into(),
                thumbnail_content: Some(vec![1]),
                ..Default::default()
            }
            .into(),
            reply_markup: None,
        };
        let_assert!(Err(err) = request.validated());
        assert!(err.field == "media.thumbnail_content");
    }

    #[test]
    fn get_updates_limit() {
        assert!(GetUpdatesRequest::default().validated().is_ok());
        let request = GetUpdatesRequest {
            limit: Some(101),
            ..Default::default()
        };
        let_assert!(Err(err) = request.validated());
        assert!(err.field == "limit");
    }

    #[test]
    fn unknown_top_level_fields_are_rejected_by_serde() {
        let value = json!({"chat_id": 1, "message_id": 2, "chat": 3});
        assert!(serde_json::from_value::<DeleteMessageRequest>(value).is_err());
        assert!(serde_json::to_value(GetMeRequest {}).unwrap() == json!({}));
    }

    #[test]
    fn forwarded_copied_and_url_documents() {
        let forward = ForwardMessageRequest {
            chat_id: ChatId::Int(1),
            message_thread_id: None,
            from_chat_id: ChatId::Str("  ".into()),
            disable_notification: None,
            protect_content: None,
            message_id: 3,
        };
        let_assert!(Err(err) = forward.validated());
        assert!(err.field == "from_chat_id");
        assert!(err.constraint == Constraint::Blank);

        let document = SendUrlDocumentRequest {
            chat_id: ChatId::Str(" @channel ".into()),
            document: " https://example.com/report.pdf ".into(),
            thumbnail: Some(" thumb-file-id ".into()),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert!(
            serde_json::to_value(&*document).unwrap()
                == json!({
                    "chat_id": "@channel",
                    "document": "https://example.com/report.pdf",
                    "thumbnail": "thumb-file-id"
                })
        );

        let blank = SendUrlDocumentRequest {
            chat_id: ChatId::Int(1),
            document: "\n".into(),
            ..Default::default()
        };
        let_assert!(Err(err) = blank.validated());
        assert!(err.field == "document");
    }

    #[test]
    fn caption_edit_and_chat_action() {
        let edit = EditMessageCaptionRequest {
            inline_message_id: Some("inline".into()),
            caption: Some("x".repeat(1025).into()),
            ..Default::default()
        };
        let_assert!(Err(err) = edit.validated());
        assert!(err.field == "caption");

        let action = SendChatActionRequest {
            chat_id: ChatId::Int(1),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert!(serde_json::to_value(&*action).unwrap() == json!({"chat_id": 1, "action": "typing"}));
    }

    #[test]
    fn bytes_are_kept_out_of_json_and_debug() {
        let request = SendBytesPhotoRequest {
            chat_id: ChatId::Int(1),
            photo: vec![7; 2048],
            filename: Some("cat.jpg".into()),
            ..Default::default()
        };
        let encoded = serde_json::to_value(&request).unwrap();
        assert!(encoded == json!({"chat_id": 1}));
        assert!(format!("{request:?}").contains("<2048 bytes>"));
    }
}
