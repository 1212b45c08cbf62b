use derive_more::Display;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::Error,
    files::{attach_name, attach_reference, MultipartForm},
    params::ToParams,
    request::{
        CopyMessageRequest, DeleteMessageRequest, EditBytesMessageMediaRequest,
        EditMessageCaptionRequest, EditMessageReplyMarkupRequest, EditMessageTextRequest,
        EditUrlMessageMediaRequest, ForwardMessageRequest, GetMeRequest, GetUpdatesRequest,
        SendBytesDocumentRequest, SendBytesPhotoRequest, SendChatActionRequest,
        SendMessageRequest, SendUrlDocumentRequest, SendUrlPhotoRequest,
    },
};

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Encoding {
    #[display(fmt = "json")]
    Json,
    #[display(fmt = "multipart")]
    Multipart,
}

/// Encoded request body, ready for a transport.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Json(Vec<u8>),
    Multipart(MultipartForm),
}

impl Body {
    pub fn encoding(&self) -> Encoding {
        match self {
            Body::Json(_) => Encoding::Json,
            Body::Multipart(_) => Encoding::Multipart,
        }
    }
}

/// Wire encoding of a request. Fixed per request type.
pub trait Payload {
    const ENCODING: Encoding;

    fn encode(&self) -> Result<Body, Error>;
}

pub fn json_body<T: Serialize>(value: &T) -> Result<Body, Error> {
    serde_json::to_vec(value)
        .map(Body::Json)
        .map_err(Error::Encode)
}

macro_rules! json_payload {
    ($($request:ty),* $(,)?) => {
        $(
            impl Payload for $request {
                const ENCODING: Encoding = Encoding::Json;

                fn encode(&self) -> Result<Body, Error> {
                    json_body(self)
                }
            }
        )*
    };
}

json_payload!(
    SendMessageRequest,
    SendUrlPhotoRequest,
    SendUrlDocumentRequest,
    DeleteMessageRequest,
    EditMessageTextRequest,
    EditMessageReplyMarkupRequest,
    EditMessageCaptionRequest,
    EditUrlMessageMediaRequest,
    GetMeRequest,
    GetUpdatesRequest,
    ForwardMessageRequest,
    CopyMessageRequest,
    SendChatActionRequest,
);

impl Payload for SendBytesPhotoRequest {
    const ENCODING: Encoding = Encoding::Multipart;

    fn encode(&self) -> Result<Body, Error> {
        let mut form = MultipartForm::from_params(self.to_params()?);
        let file_name = self.filename.as_deref().unwrap_or("photo");
        form.file("photo", file_name, self.photo.as_slice());
        Ok(Body::Multipart(form))
    }
}

impl Payload for SendBytesDocumentRequest {
    const ENCODING: Encoding = Encoding::Multipart;

    fn encode(&self) -> Result<Body, Error> {
        let mut form = MultipartForm::from_params(self.to_params()?);
        let file_name = self.filename.as_deref().unwrap_or("document");
        form.file("document", file_name, self.document.as_slice());
        if let Some(thumbnail) = &self.thumbnail {
            form.text("thumbnail", attach_reference("thumbnail"));
            form.file("thumbnail", "thumbnail", thumbnail.as_slice());
        }
        Ok(Body::Multipart(form))
    }
}

impl Payload for EditBytesMessageMediaRequest {
    const ENCODING: Encoding = Encoding::Multipart;

    fn encode(&self) -> Result<Body, Error> {
        let mut params = self.to_params()?;
        let Some(Value::Object(descriptor)) = params.get_mut("media") else {
            return Err(Error::Encode(serde::ser::Error::custom(
                "media descriptor is not an object",
            )));
        };

        let media = self.media.media_name();
        descriptor.insert("media".into(), attach_reference(media).as_str().into());
        let mut uploads = vec![(attach_name(media), self.media.media_content())];

        if let Some((thumbnail, content)) = self.media.thumbnail_upload() {
            descriptor.insert(
                "thumbnail".into(),
                attach_reference(thumbnail).as_str().into(),
            );
            uploads.push((attach_name(thumbnail), content));
        }

        let mut form = MultipartForm::from_params(params);
        for (name, content) in uploads {
            form.file(name, name, content);
        }
        Ok(Body::Multipart(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        media::{InputMediaBytesDocument, InputMediaBytesPhoto, InputMediaUrlPhoto},
        proto::{
            ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageEntity, MessageEntityType,
        },
    };
    use assert2::{assert, let_assert};
    use serde_json::json;

    fn form(body: Body) -> MultipartForm {
        let_assert!(Body::Multipart(form) = body);
        form
    }

    fn field_json(form: &MultipartForm, name: &str) -> Value {
        serde_json::from_str(form.field(name).unwrap()).unwrap()
    }

    #[test]
    fn json_requests_encode_to_one_object() {
        let request = SendMessageRequest::new(ChatId::Int(1234567), "Hello World!");
        assert!(SendMessageRequest::ENCODING == Encoding::Json);
        let_assert!(Body::Json(bytes) = request.encode().unwrap());
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(value == json!({"chat_id": 1234567, "text": "Hello World!"}));
    }

    #[test]
    fn url_media_edit_stays_json() {
        let request = EditUrlMessageMediaRequest {
            chat_id: Some(ChatId::Int(1)),
            message_id: Some(2),
            inline_message_id: None,
            media: InputMediaUrlPhoto {
                media: "https://example.com/cat.jpg".into(),
                ..Default::default()
            }
            .into(),
            reply_markup: None,
        };
        let_assert!(Body::Json(bytes) = request.encode().unwrap());
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            value["media"] == json!({"type": "photo", "media": "https://example.com/cat.jpg"})
        );
    }

    #[test]
    fn bytes_photo_is_a_named_file_part() {
        let request = SendBytesPhotoRequest {
            chat_id: ChatId::Int(1234567),
            photo: b"\xff\xd8\xff\xe0".to_vec(),
            filename: Some("cat.jpg".into()),
            caption: Some("a cat".into()),
            caption_entities: Some(vec![MessageEntity::new(MessageEntityType::Bold, 2, 3)]),
            reply_markup: Some(
                InlineKeyboardMarkup::new([vec![InlineKeyboardButton::callback("like", "1")]])
                    .into(),
            ),
            ..Default::default()
        };
        let body = request.encode().unwrap();
        assert!(body.encoding() == Encoding::Multipart);
        let form = form(body);

        assert!(form.field("chat_id") == Some("1234567"));
        assert!(form.field("caption") == Some("a cat"));
        assert!(form.field("photo").is_none());
        assert!(form.field("filename").is_none());
        assert!(
            field_json(&form, "caption_entities")
                == json!([{"type": "bold", "offset": 2, "length": 3}])
        );
        assert!(
            field_json(&form, "reply_markup")
                == json!({"inline_keyboard": [[{"text": "like", "callback_data": "1"}]]})
        );

        let_assert!([part] = form.files.as_slice());
        assert!(part.name == "photo");
        assert!(part.file_name == "cat.jpg");
        assert!(part.content == b"\xff\xd8\xff\xe0");
    }

    #[test]
    fn bytes_document_defaults_and_thumbnail() {
        let request = SendBytesDocumentRequest {
            chat_id: ChatId::Int(1),
            document: b"hello".to_vec(),
            thumbnail: Some(vec![1, 2, 3]),
            ..Default::default()
        };
        let form = form(request.encode().unwrap());
        assert!(form.file_part("document").unwrap().file_name == "document");
        assert!(form.field("thumbnail") == Some("attach://thumbnail"));
        assert!(form.file_part("thumbnail").unwrap().content == [1, 2, 3]);
        assert!(form.fields.iter().all(|(_, value)| !value.contains("hello")));
    }

    #[test]
    fn media_edit_prefixes_bare_names() {
        let request = EditBytesMessageMediaRequest {
            chat_id: Some(ChatId::Int(1)),
            message_id: Some(2),
            inline_message_id: None,
            media: InputMediaBytesPhoto {
                media: "photo.jpg".into(),
                media_content: vec![9, 9],
                caption: Some("new".into()),
                ..Default::default()
            }
            .into(),
            reply_markup: None,
        };
        let form = form(request.encode().unwrap());
        assert!(
            field_json(&form, "media")
                == json!({"type": "photo", "media": "attach://photo.jpg", "caption": "new"})
        );
        assert!(form.field("message_id") == Some("2"));
        let_assert!([part] = form.files.as_slice());
        assert!(part.name == "photo.jpg");
        assert!(part.content == [9, 9]);
    }

    #[test]
    fn media_edit_keeps_existing_scheme() {
        let request = EditBytesMessageMediaRequest {
            chat_id: None,
            message_id: None,
            inline_message_id: Some("inline".into()),
            media: InputMediaBytesPhoto {
                media: "attach://photo.jpg".into(),
                media_content: vec![1],
                ..Default::default()
            }
            .into(),
            reply_markup: None,
        };
        let form = form(request.encode().unwrap());
        assert!(field_json(&form, "media")["media"] == "attach://photo.jpg");
        assert!(form.file_part("photo.jpg").is_some());
    }

    #[test]
    fn media_edit_uploads_thumbnail_separately() {
        let request = EditBytesMessageMediaRequest {
            chat_id: Some(ChatId::Int(1)),
            message_id: Some(2),
            inline_message_id: None,
            media: InputMediaBytesDocument {
                media: "report.pdf".into(),
                media_content: b"%PDF".to_vec(),
                thumbnail: Some("thumb.jpg".into()),
                thumbnail_content: Some(b"JPEG".to_vec()),
                ..Default::default()
            }
            .into(),
            reply_markup: None,
        };
        let form = form(request.encode().unwrap());
        let descriptor = field_json(&form, "media");
        assert!(
            descriptor
                == json!({
                    "type": "document",
                    "media": "attach://report.pdf",
                    "thumbnail": "attach://thumb.jpg"
                })
        );
        assert!(form.files.len() == 2);
        assert!(form.file_part("report.pdf").unwrap().content == b"%PDF");
        assert!(form.file_part("thumb.jpg").unwrap().content == b"JPEG");
        assert!(form.fields.iter().all(|(_, value)| !value.contains("JPEG")));
    }

    #[test]
    fn thumbnail_name_without_bytes_is_passed_through() {
        let request = EditBytesMessageMediaRequest {
            chat_id: Some(ChatId::Int(1)),
            message_id: Some(2),
            inline_message_id: None,
            media: InputMediaBytesDocument {
                media: "report.pdf".into(),
                media_content: b"%PDF".to_vec(),
                thumbnail: Some("file-id-of-thumb".into()),
                ..Default::default()
            }
            .into(),
            reply_markup: None,
        };
        let form = form(request.encode().unwrap());
        assert!(field_json(&form, "media")["thumbnail"] == "file-id-of-thumb");
        assert!(form.files.len() == 1);
    }
}
