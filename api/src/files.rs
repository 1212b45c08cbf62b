use compact_str::{format_compact, CompactString};
use std::fmt;

use crate::params::{form_value, Params};

pub const ATTACH_SCHEME: &str = "attach://";

/// `attach://<name>` for a bare name, the reference unchanged when it already carries the scheme.
pub fn attach_reference(name: &str) -> CompactString {
    if name.starts_with(ATTACH_SCHEME) {
        CompactString::from(name)
    } else {
        format_compact!("{ATTACH_SCHEME}{name}")
    }
}

/// Part name a reference points at.
pub fn attach_name(reference: &str) -> &str {
    reference.strip_prefix(ATTACH_SCHEME).unwrap_or(reference)
}

#[allow(clippy::ptr_arg)]
pub(crate) fn fmt_bytes(bytes: &Vec<u8>, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "<{} bytes>", bytes.len())
}

#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: CompactString,
    pub file_name: CompactString,
    pub content: Vec<u8>,
}

impl fmt::Debug for FilePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePart")
            .field("name", &self.name)
            .field("file_name", &self.file_name)
            .field("content", &format_args!("<{} bytes>", self.content.len()))
            .finish()
    }
}

/// Transport-neutral multipart body: text fields in insertion order, then file parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(CompactString, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartForm {
    /// One text field per set parameter. Nested values are carried as their JSON text.
    pub fn from_params(params: Params) -> Self {
        let mut form = Self::default();
        for (name, value) in &params {
            if let Some(value) = form_value(value) {
                form.text(name.as_str(), value);
            }
        }
        form
    }

    pub fn text(&mut self, name: impl Into<CompactString>, value: impl Into<String>) -> &mut Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(
        &mut self,
        name: impl Into<CompactString>,
        file_name: impl Into<CompactString>,
        content: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.files.push(FilePart {
            name: name.into(),
            file_name: file_name.into(),
            content: content.into(),
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn file_part(&self, name: &str) -> Option<&FilePart> {
        self.files.iter().find(|part| part.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;
    use serde_json::json;

    #[test]
    fn attach_scheme_is_prefixed_once() {
        assert!(attach_reference("photo.jpg") == "attach://photo.jpg");
        assert!(attach_reference("attach://photo.jpg") == "attach://photo.jpg");
        assert!(attach_name("attach://photo.jpg") == "photo.jpg");
        assert!(attach_name("photo.jpg") == "photo.jpg");
    }

    #[test]
    fn form_from_params() {
        let params = json!({
            "chat_id": 1234567,
            "caption": "hello",
            "has_spoiler": true,
            "message_thread_id": null,
            "caption_entities": [{"type": "bold", "offset": 0, "length": 5}]
        });
        let serde_json::Value::Object(params) = params else {
            unreachable!()
        };
        let mut form = MultipartForm::from_params(params);
        form.file("photo", "cat.jpg", b"\x89PNG".to_vec());

        assert!(form.field("chat_id") == Some("1234567"));
        assert!(form.field("caption") == Some("hello"));
        assert!(form.field("has_spoiler") == Some("true"));
        assert!(form.field("message_thread_id").is_none());
        assert!(
            form.field("caption_entities")
                == Some(r#"[{"length":5,"offset":0,"type":"bold"}]"#)
        );
        let part = form.file_part("photo").unwrap();
        assert!(part.file_name == "cat.jpg");
        assert!(format!("{part:?}").contains("<4 bytes>"));
    }
}
