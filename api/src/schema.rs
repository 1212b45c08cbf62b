//! Runtime view of the outbound schemas.
//!
//! Objects take their field names from serde, references between schemas are
//! declared by name and bound in a second pass, so cyclic graphs (a chat pinning
//! a message that lives in that chat) need no particular declaration order.
//! The resolved registry checks caller-supplied JSON for keys the target
//! schema does not declare, at any depth.

use compact_str::{format_compact, CompactString};
use log::debug;
use serde::{de::DeserializeOwned, Deserialize};
use serde_aux::serde_introspection::serde_introspect;
use serde_json::Value;
use std::{collections::HashMap, sync::OnceLock};

use crate::{
    endpoints::Request,
    error::Error,
    media::{
        InputMediaBytesDocument, InputMediaBytesPhoto, InputMediaUrlDocument, InputMediaUrlPhoto,
    },
    proto::{
        Chat, Document, ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
        KeyboardButtonPollType, LoginUrl, Message, MessageEntity, PhotoSize, ReplyKeyboardMarkup,
        ReplyKeyboardRemove, User, WebAppInfo,
    },
    request::{
        CopyMessageRequest, DeleteMessageRequest, EditBytesMessageMediaRequest,
        EditMessageCaptionRequest, EditMessageReplyMarkupRequest, EditMessageTextRequest,
        EditUrlMessageMediaRequest, ForwardMessageRequest, GetMeRequest, GetUpdatesRequest,
        SendBytesDocumentRequest, SendBytesPhotoRequest, SendChatActionRequest,
        SendMessageRequest, SendUrlDocumentRequest, SendUrlPhotoRequest,
    },
    validate::{Constraint, Validated, ValidationError},
};

/// A schema references a name nothing declares.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("schema `{schema}` field `{field}` refers to undeclared schema `{target}`")]
pub struct SchemaResolutionError {
    pub schema: CompactString,
    pub field: CompactString,
    pub target: CompactString,
}

/// What a field holds, as far as key checking is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link<T> {
    /// Scalars and raw JSON maps. Not inspected.
    Scalar,
    Object(T),
    List(T),
    /// List of lists, the layout of keyboards.
    Grid(T),
}

impl<T> Link<T> {
    fn target(&self) -> Option<&T> {
        match self {
            Link::Scalar => None,
            Link::Object(t) | Link::List(t) | Link::Grid(t) => Some(t),
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Link<U> {
        match self {
            Link::Scalar => Link::Scalar,
            Link::Object(t) => Link::Object(f(t)),
            Link::List(t) => Link::List(f(t)),
            Link::Grid(t) => Link::Grid(f(t)),
        }
    }
}

#[derive(Debug)]
enum Schema<T> {
    Object {
        fields: Vec<(&'static str, Link<T>)>,
    },
    /// Untagged union, arms tried in order.
    OneOf(Vec<T>),
    Tagged {
        tag: &'static str,
        arms: Vec<(&'static str, T)>,
    },
}

/// Declaration of an object schema.
#[derive(Debug)]
pub struct Object {
    name: &'static str,
    fields: Vec<(&'static str, Link<&'static str>)>,
}

impl Object {
    pub fn of<'de, T: Deserialize<'de>>(name: &'static str) -> Self {
        Self {
            name,
            fields: serde_introspect::<T>()
                .iter()
                .map(|field| (*field, Link::Scalar))
                .collect(),
        }
    }

    pub fn link(mut self, field: &'static str, link: Link<&'static str>) -> Self {
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = link,
            None => self.fields.push((field, link)),
        }
        self
    }

    pub fn field(self, field: &'static str, target: &'static str) -> Self {
        self.link(field, Link::Object(target))
    }

    pub fn list(self, field: &'static str, target: &'static str) -> Self {
        self.link(field, Link::List(target))
    }

    pub fn grid(self, field: &'static str, target: &'static str) -> Self {
        self.link(field, Link::Grid(target))
    }

    /// Accepts a key serde does not report, such as the tag of an internally tagged enum.
    pub fn extra(self, field: &'static str) -> Self {
        self.link(field, Link::Scalar)
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    names: Vec<&'static str>,
    schemas: Vec<Schema<&'static str>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(mut self, name: &'static str, schema: Schema<&'static str>) -> Self {
        self.names.push(name);
        self.schemas.push(schema);
        self
    }

    pub fn object(self, object: Object) -> Self {
        let Object { name, fields } = object;
        self.declare(name, Schema::Object { fields })
    }

    pub fn one_of(self, name: &'static str, arms: &[&'static str]) -> Self {
        self.declare(name, Schema::OneOf(arms.to_vec()))
    }

    pub fn tagged(
        self,
        name: &'static str,
        tag: &'static str,
        arms: &[(&'static str, &'static str)],
    ) -> Self {
        self.declare(
            name,
            Schema::Tagged {
                tag,
                arms: arms.to_vec(),
            },
        )
    }

    /// Binds every reference to its declaration. Fails on the first dangling one.
    pub fn resolve(self) -> Result<Registry, SchemaResolutionError> {
        let index: HashMap<&'static str, usize> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| (*name, i))
            .collect();

        let bind = |schema: &str, field: &str, target: &str| {
            index
                .get(target)
                .copied()
                .ok_or_else(|| SchemaResolutionError {
                    schema: schema.into(),
                    field: field.into(),
                    target: target.into(),
                })
        };

        let mut schemas = Vec::with_capacity(self.schemas.len());
        for (name, schema) in self.names.iter().copied().zip(self.schemas) {
            let resolved = match schema {
                Schema::Object { fields } => {
                    let mut bound = Vec::with_capacity(fields.len());
                    for (field, link) in fields {
                        if let Some(target) = link.target() {
                            bind(name, field, *target)?;
                        }
                        bound.push((field, link.map(|target| index[target])));
                    }
                    Schema::Object { fields: bound }
                }
                Schema::OneOf(arms) => Schema::OneOf(
                    arms.into_iter()
                        .map(|arm| bind(name, arm, arm))
                        .collect::<Result<_, _>>()?,
                ),
                Schema::Tagged { tag, arms } => Schema::Tagged {
                    tag,
                    arms: arms
                        .into_iter()
                        .map(|(value, arm)| bind(name, value, arm).map(|i| (value, i)))
                        .collect::<Result<_, _>>()?,
                },
            };
            schemas.push(resolved);
        }

        debug!("schema registry resolved, {} schemas", schemas.len());
        Ok(Registry {
            names: self.names,
            index,
            schemas,
        })
    }
}

#[derive(Debug)]
pub struct Registry {
    names: Vec<&'static str>,
    index: HashMap<&'static str, usize>,
    schemas: Vec<Schema<usize>>,
}

fn join(path: &str, key: &str) -> CompactString {
    if path.is_empty() {
        key.into()
    } else {
        format_compact!("{path}.{key}")
    }
}

fn depth(path: &str) -> usize {
    path.chars().filter(|c| matches!(c, '.' | '[')).count()
}

impl Registry {
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Rejects keys `name` does not declare, reporting the full path of the first one.
    pub fn check(&self, name: &str, value: &Value) -> Result<(), Error> {
        let Some(&schema) = self.index.get(name) else {
            return Err(SchemaResolutionError {
                schema: name.into(),
                field: CompactString::default(),
                target: name.into(),
            }
            .into());
        };
        Ok(self.check_at(schema, value, "")?)
    }

    fn check_at(&self, schema: usize, value: &Value, path: &str) -> Result<(), ValidationError> {
        match &self.schemas[schema] {
            Schema::Object { fields } => {
                let Value::Object(map) = value else {
                    return Err(ValidationError::new(path, Constraint::Shape("an object")));
                };
                for (key, value) in map {
                    let here = join(path, key);
                    let Some((_, link)) = fields.iter().find(|(field, _)| field == key) else {
                        return Err(ValidationError::new(here, Constraint::UnknownField));
                    };
                    if !value.is_null() {
                        self.check_link(*link, value, &here)?;
                    }
                }
                Ok(())
            }
            Schema::OneOf(arms) => {
                let mut errors = Vec::with_capacity(arms.len());
                for arm in arms {
                    match self.check_at(*arm, value, path) {
                        Ok(()) => return Ok(()),
                        Err(err) => errors.push(err),
                    }
                }
                let deepest = errors.iter().map(|err| depth(&err.field)).max();
                let shallowest = errors.iter().map(|err| depth(&err.field)).min();
                match errors.into_iter().max_by_key(|err| depth(&err.field)) {
                    // one arm got further than the others: report what stopped it
                    Some(err) if deepest != shallowest => Err(err),
                    _ => {
                        let names = arms
                            .iter()
                            .map(|arm| self.names[*arm])
                            .collect::<Vec<_>>()
                            .join(", ");
                        Err(ValidationError::new(
                            path,
                            Constraint::NoMatchingArm(names.into()),
                        ))
                    }
                }
            }
            Schema::Tagged { tag, arms } => {
                let here = join(path, tag);
                let Some(kind) = value.get(*tag).and_then(Value::as_str) else {
                    return Err(ValidationError::new(here, Constraint::Shape("a string tag")));
                };
                let Some((_, arm)) = arms.iter().find(|(value, _)| *value == kind) else {
                    let known = arms
                        .iter()
                        .map(|(value, _)| *value)
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(ValidationError::new(
                        here,
                        Constraint::NoMatchingArm(known.into()),
                    ));
                };
                self.check_at(*arm, value, path)
            }
        }
    }

    fn check_link(&self, link: Link<usize>, value: &Value, path: &str) -> Result<(), ValidationError> {
        match link {
            Link::Scalar => Ok(()),
            Link::Object(schema) => self.check_at(schema, value, path),
            Link::List(schema) => {
                let Value::Array(items) = value else {
                    return Err(ValidationError::new(path, Constraint::Shape("an array")));
                };
                for (i, item) in items.iter().enumerate() {
                    self.check_at(schema, item, &format_compact!("{path}[{i}]"))?;
                }
                Ok(())
            }
            Link::Grid(schema) => {
                let Value::Array(rows) = value else {
                    return Err(ValidationError::new(path, Constraint::Shape("an array of arrays")));
                };
                for (i, row) in rows.iter().enumerate() {
                    self.check_link(Link::List(schema), row, &format_compact!("{path}[{i}]"))?;
                }
                Ok(())
            }
        }
    }
}

fn with_markup(object: Object, markup: &'static str) -> Object {
    object.field("reply_markup", markup)
}

fn media_object(object: Object) -> Object {
    object.extra("type").list("caption_entities", "MessageEntity")
}

/// Every outbound schema, plus the core inbound entities.
pub fn default_registry() -> RegistryBuilder {
    let entities = |object: Object| object.list("entities", "MessageEntity");
    let caption_entities = |object: Object| object.list("caption_entities", "MessageEntity");

    RegistryBuilder::new()
        // keyboards
        .one_of(
            "ReplyMarkup",
            &[
                "InlineKeyboardMarkup",
                "ReplyKeyboardMarkup",
                "ReplyKeyboardRemove",
                "ForceReply",
            ],
        )
        .object(
            Object::of::<InlineKeyboardMarkup>("InlineKeyboardMarkup")
                .grid("inline_keyboard", "InlineKeyboardButton"),
        )
        .object(
            Object::of::<InlineKeyboardButton>("InlineKeyboardButton")
                .field("web_app", "WebAppInfo")
                .field("login_url", "LoginUrl"),
        )
        .object(
            Object::of::<ReplyKeyboardMarkup>("ReplyKeyboardMarkup")
                .grid("keyboard", "KeyboardButton"),
        )
        .object(
            Object::of::<KeyboardButton>("KeyboardButton")
                .field("request_poll", "KeyboardButtonPollType")
                .field("web_app", "WebAppInfo"),
        )
        .object(Object::of::<KeyboardButtonPollType>("KeyboardButtonPollType"))
        .object(Object::of::<ReplyKeyboardRemove>("ReplyKeyboardRemove"))
        .object(Object::of::<ForceReply>("ForceReply"))
        .object(Object::of::<WebAppInfo>("WebAppInfo"))
        .object(Object::of::<LoginUrl>("LoginUrl"))
        .object(Object::of::<MessageEntity>("MessageEntity").field("user", "User"))
        .object(Object::of::<User>("User"))
        // media
        .tagged(
            "InputMediaUrl",
            "type",
            &[
                ("photo", "InputMediaUrlPhoto"),
                ("document", "InputMediaUrlDocument"),
            ],
        )
        .tagged(
            "InputMediaBytes",
            "type",
            &[
                ("photo", "InputMediaBytesPhoto"),
                ("document", "InputMediaBytesDocument"),
            ],
        )
        .object(media_object(Object::of::<InputMediaUrlPhoto>("InputMediaUrlPhoto")))
        .object(media_object(Object::of::<InputMediaUrlDocument>("InputMediaUrlDocument")))
        .object(media_object(Object::of::<InputMediaBytesPhoto>("InputMediaBytesPhoto")))
        .object(media_object(Object::of::<InputMediaBytesDocument>("InputMediaBytesDocument")))
        // requests
        .object(with_markup(
            entities(Object::of::<SendMessageRequest>("SendMessageRequest")),
            "ReplyMarkup",
        ))
        .object(with_markup(
            caption_entities(Object::of::<SendUrlPhotoRequest>("SendUrlPhotoRequest")),
            "ReplyMarkup",
        ))
        .object(with_markup(
            caption_entities(Object::of::<SendBytesPhotoRequest>("SendBytesPhotoRequest")),
            "ReplyMarkup",
        ))
        .object(with_markup(
            caption_entities(Object::of::<SendUrlDocumentRequest>("SendUrlDocumentRequest")),
            "ReplyMarkup",
        ))
        .object(with_markup(
            caption_entities(Object::of::<SendBytesDocumentRequest>("SendBytesDocumentRequest")),
            "ReplyMarkup",
        ))
        .object(Object::of::<DeleteMessageRequest>("DeleteMessageRequest"))
        .object(with_markup(
            entities(Object::of::<EditMessageTextRequest>("EditMessageTextRequest")),
            "InlineKeyboardMarkup",
        ))
        .object(with_markup(
            Object::of::<EditMessageReplyMarkupRequest>("EditMessageReplyMarkupRequest"),
            "InlineKeyboardMarkup",
        ))
        .object(with_markup(
            caption_entities(Object::of::<EditMessageCaptionRequest>("EditMessageCaptionRequest")),
            "InlineKeyboardMarkup",
        ))
        .object(with_markup(
            Object::of::<EditUrlMessageMediaRequest>("EditUrlMessageMediaRequest")
                .field("media", "InputMediaUrl"),
            "InlineKeyboardMarkup",
        ))
        .object(with_markup(
            Object::of::<EditBytesMessageMediaRequest>("EditBytesMessageMediaRequest")
                .field("media", "InputMediaBytes"),
            "InlineKeyboardMarkup",
        ))
        .object(Object::of::<GetMeRequest>("GetMeRequest"))
        .object(Object::of::<GetUpdatesRequest>("GetUpdatesRequest"))
        .object(Object::of::<ForwardMessageRequest>("ForwardMessageRequest"))
        .object(with_markup(
            caption_entities(Object::of::<CopyMessageRequest>("CopyMessageRequest")),
            "ReplyMarkup",
        ))
        .object(Object::of::<SendChatActionRequest>("SendChatActionRequest"))
        // inbound core, chat and message refer to each other
        .object(
            Object::of::<Message>("Message")
                .field("from", "User")
                .field("sender_chat", "Chat")
                .field("chat", "Chat")
                .field("forward_from", "User")
                .field("forward_from_chat", "Chat")
                .field("reply_to_message", "Message")
                .field("via_bot", "User")
                .field("pinned_message", "Message")
                .field("document", "Document")
                .list("photo", "PhotoSize")
                .list("new_chat_members", "User")
                .field("left_chat_member", "User")
                .list("new_chat_photo", "PhotoSize")
                .list("entities", "MessageEntity")
                .list("caption_entities", "MessageEntity")
                .field("reply_markup", "InlineKeyboardMarkup"),
        )
        .object(Object::of::<Chat>("Chat").field("pinned_message", "Message"))
        .object(Object::of::<Document>("Document").field("thumbnail", "PhotoSize"))
        .object(Object::of::<PhotoSize>("PhotoSize"))
}

static REGISTRY: OnceLock<Result<Registry, SchemaResolutionError>> = OnceLock::new();

/// The process-wide registry, resolved on first use.
pub fn registry() -> Result<&'static Registry, SchemaResolutionError> {
    REGISTRY
        .get_or_init(|| default_registry().resolve())
        .as_ref()
        .map_err(Clone::clone)
}

impl<R: Request + DeserializeOwned> Validated<R> {
    /// Builds a request from caller JSON: unknown keys at any depth are rejected,
    /// then the request is deserialized and validated.
    pub fn from_json(value: Value) -> Result<Self, Error> {
        registry()?.check(R::NAME, &value)?;
        let request: R = serde_json::from_value(value).map_err(|err| {
            ValidationError::new(R::NAME, Constraint::Malformed(format_compact!("{err}")))
        })?;
        Ok(request.validated()?)
    }
}
