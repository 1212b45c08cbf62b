use compact_str::CompactString;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    files::{attach_name, fmt_bytes},
    proto::{MessageEntity, ParseMode},
    validate::{self, Constraint, Validate, ValidationError},
};

/// Photo referenced by file_id or HTTP URL.
/// https://core.telegram.org/bots/api#inputmediaphoto
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputMediaUrlPhoto {
    pub media: CompactString,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub has_spoiler: Option<bool>,
}

/// Document referenced by file_id or HTTP URL.
/// https://core.telegram.org/bots/api#inputmediadocument
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputMediaUrlDocument {
    pub media: CompactString,
    pub thumbnail: Option<CompactString>,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub disable_content_type_detection: Option<bool>,
}

/// Photo uploaded together with the request. `media` names the file part.
#[skip_serializing_none]
#[derive(Clone, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Debug, Default)]
pub struct InputMediaBytesPhoto {
    pub media: CompactString,
    #[serde(skip_serializing)]
    #[derivative(Debug(format_with = "fmt_bytes"))]
    pub media_content: Vec<u8>,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub has_spoiler: Option<bool>,
}

/// Document uploaded together with the request.
/// `media` names the document part, `thumbnail` names the thumbnail part.
#[skip_serializing_none]
#[derive(Clone, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Debug, Default)]
pub struct InputMediaBytesDocument {
    pub media: CompactString,
    #[serde(skip_serializing)]
    #[derivative(Debug(format_with = "fmt_bytes"))]
    pub media_content: Vec<u8>,
    pub thumbnail: Option<CompactString>,
    #[serde(default, skip_serializing)]
    #[derivative(Debug(format_with = "fmt_opt_bytes"))]
    pub thumbnail_content: Option<Vec<u8>>,
    pub caption: Option<CompactString>,
    pub parse_mode: Option<ParseMode>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub disable_content_type_detection: Option<bool>,
}

fn fmt_opt_bytes(bytes: &Option<Vec<u8>>, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match bytes {
        Some(bytes) => fmt_bytes(bytes, f),
        None => f.write_str("None"),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputMediaUrl {
    Photo(InputMediaUrlPhoto),
    Document(InputMediaUrlDocument),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputMediaBytes {
    Photo(InputMediaBytesPhoto),
    Document(InputMediaBytesDocument),
}

impl InputMediaBytes {
    pub fn media_name(&self) -> &str {
        match self {
            InputMediaBytes::Photo(photo) => &photo.media,
            InputMediaBytes::Document(document) => &document.media,
        }
    }

    pub fn media_content(&self) -> &[u8] {
        match self {
            InputMediaBytes::Photo(photo) => &photo.media_content,
            InputMediaBytes::Document(document) => &document.media_content,
        }
    }

    /// Thumbnail to upload as its own part. Present only when both the name and the bytes are set.
    pub fn thumbnail_upload(&self) -> Option<(&str, &[u8])> {
        match self {
            InputMediaBytes::Photo(_) => None,
            InputMediaBytes::Document(document) => document
                .thumbnail
                .as_deref()
                .zip(document.thumbnail_content.as_deref()),
        }
    }
}

impl From<InputMediaUrlPhoto> for InputMediaUrl {
    fn from(media: InputMediaUrlPhoto) -> Self {
        InputMediaUrl::Photo(media)
    }
}

impl From<InputMediaUrlDocument> for InputMediaUrl {
    fn from(media: InputMediaUrlDocument) -> Self {
        InputMediaUrl::Document(media)
    }
}

impl From<InputMediaBytesPhoto> for InputMediaBytes {
    fn from(media: InputMediaBytesPhoto) -> Self {
        InputMediaBytes::Photo(media)
    }
}

impl From<InputMediaBytesDocument> for InputMediaBytes {
    fn from(media: InputMediaBytesDocument) -> Self {
        InputMediaBytes::Document(media)
    }
}

impl Validate for InputMediaUrlPhoto {
    fn validate(&mut self) -> Result<(), ValidationError> {
        validate::not_blank("media", &mut self.media)?;
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for InputMediaUrlDocument {
    fn validate(&mut self) -> Result<(), ValidationError> {
        validate::not_blank("media", &mut self.media)?;
        validate::trim_opt(&mut self.thumbnail);
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for InputMediaBytesPhoto {
    fn validate(&mut self) -> Result<(), ValidationError> {
        validate::not_blank("media", &mut self.media)?;
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for InputMediaBytesDocument {
    fn validate(&mut self) -> Result<(), ValidationError> {
        validate::not_blank("media", &mut self.media)?;
        match (&mut self.thumbnail, &self.thumbnail_content) {
            (Some(name), Some(_)) => {
                validate::not_blank("thumbnail", name)?;
                if attach_name(name) == attach_name(&self.media) {
                    return Err(ValidationError::new(
                        "thumbnail",
                        Constraint::Requires("a name distinct from media"),
                    ));
                }
            }
            (None, Some(_)) => {
                return Err(ValidationError::new(
                    "thumbnail_content",
                    Constraint::Requires("thumbnail"),
                ))
            }
            (thumbnail, None) => validate::trim_opt(thumbnail),
        }
        validate::caption("caption", &mut self.caption)
    }
}

impl Validate for InputMediaUrl {
    fn validate(&mut self) -> Result<(), ValidationError> {
        match self {
            InputMediaUrl::Photo(media) => media.validate(),
            InputMediaUrl::Document(media) => media.validate(),
        }
    }
}

impl Validate for InputMediaBytes {
    fn validate(&mut self) -> Result<(), ValidationError> {
        match self {
            InputMediaBytes::Photo(media) => media.validate(),
            InputMediaBytes::Document(media) => media.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, let_assert};
    use serde_json::json;

    #[test]
    fn tagged_serialization_skips_bytes() {
        let media = InputMediaBytes::from(InputMediaBytesDocument {
            media: "report.pdf".into(),
            media_content: b"%PDF-1.7".to_vec(),
            thumbnail: Some("thumb.jpg".into()),
            thumbnail_content: Some(vec![0xff, 0xd8]),
            ..Default::default()
        });
        let encoded = serde_json::to_value(&media).unwrap();
        assert!(
            encoded
                == json!({
                    "type": "document",
                    "media": "report.pdf",
                    "thumbnail": "thumb.jpg"
                })
        );
    }

    #[test]
    fn thumbnail_upload_needs_both_parts() {
        let mut document = InputMediaBytesDocument {
            media: "report.pdf".into(),
            media_content: vec![1],
            thumbnail: Some("thumb.jpg".into()),
            ..Default::default()
        };
        let media = InputMediaBytes::from(document.clone());
        assert!(media.thumbnail_upload().is_none());

        document.thumbnail_content = Some(vec![2, 3]);
        let media = InputMediaBytes::from(document);
        assert!(media.thumbnail_upload() == Some(("thumb.jpg", &[2u8, 3][..])));
        assert!(media.media_content() == [1]);
    }

    #[test]
    fn thumbnail_bytes_without_name_are_rejected() {
        let document = InputMediaBytesDocument {
            media: "report.pdf".into(),
            thumbnail_content: Some(vec![2, 3]),
            ..Default::default()
        };
        let_assert!(Err(err) = InputMediaBytes::from(document).validated());
        assert!(err.field == "thumbnail_content");
        assert!(err.constraint == Constraint::Requires("thumbnail"));
    }

    #[test]
    fn thumbnail_part_name_must_differ_from_media() {
        let document = InputMediaBytesDocument {
            media: "a.jpg".into(),
            media_content: vec![1, 2, 3],
            thumbnail: Some("attach://a.jpg".into()),
            thumbnail_content: Some(vec![4, 5]),
            ..Default::default()
        };
        let_assert!(Err(err) = InputMediaBytes::from(document.clone()).validated());
        assert!(err.field == "thumbnail");
        assert!(err.constraint == Constraint::Requires("a name distinct from media"));

        // a file id shared with the media name uploads nothing, so it is fine
        let by_id = InputMediaBytesDocument {
            thumbnail_content: None,
            ..document.clone()
        };
        assert!(by_id.validated().is_ok());

        let distinct = InputMediaBytesDocument {
            thumbnail: Some("a-thumb.jpg".into()),
            ..document
        };
        assert!(distinct.validated().is_ok());
    }

    #[test]
    fn media_caption_and_name_are_checked() {
        let photo = InputMediaUrlPhoto {
            media: "  https://example.com/cat.jpg ".into(),
            caption: Some(" cat ".into()),
            ..Default::default()
        };
        let_assert!(Ok(photo) = InputMediaUrl::from(photo).validated());
        let_assert!(InputMediaUrl::Photo(photo) = photo.into_inner());
        assert!(photo.media == "https://example.com/cat.jpg");
        assert!(photo.caption.as_deref() == Some("cat"));

        let blank = InputMediaBytesPhoto {
            media: "   ".into(),
            ..Default::default()
        };
        let_assert!(Err(err) = blank.validated());
        assert!(err.constraint == Constraint::Blank);

        let long = InputMediaUrlDocument {
            media: "file-id".into(),
            caption: Some("x".repeat(1025).into()),
            ..Default::default()
        };
        let_assert!(Err(err) = long.validated());
        assert!(err.field == "caption");
    }

    #[test]
    fn debug_output_hides_payload_bytes() {
        let photo = InputMediaBytesPhoto {
            media: "cat.jpg".into(),
            media_content: vec![0; 4096],
            ..Default::default()
        };
        let debug = format!("{photo:?}");
        assert!(debug.contains("<4096 bytes>"));
    }
}
