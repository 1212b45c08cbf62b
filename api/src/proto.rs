use chrono::{DateTime, TimeZone, Utc};
use compact_str::CompactString;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

use crate::basic_types::{
    ChatIntId, Date, MessageId, MessageThreadId, RawObject, UpdateId, UserId,
};

#[derive(Debug, Copy, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UpdateType {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatJoinRequest,
}

/// This object represents an incoming update.
/// At most one of the optional payloads can be present in any given update.
/// https://core.telegram.org/bots/api#update
#[derive(Clone, Debug, PartialEq)]
pub struct Update {
    pub id: UpdateId,
    pub kind: UpdateKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    InlineQuery(InlineQuery),
    ChosenInlineResult(ChosenInlineResult),
    CallbackQuery(CallbackQuery),
    ShippingQuery(ShippingQuery),
    PreCheckoutQuery(PreCheckoutQuery),
    Poll(Poll),
    PollAnswer(PollAnswer),
    MyChatMember(ChatMemberUpdated),
    ChatMember(ChatMemberUpdated),
    ChatJoinRequest(ChatJoinRequest),
    /// The update carries a payload kind this binding does not model.
    Unknown,
}

impl UpdateKind {
    fn from_entry(key: &str, value: Value) -> Option<serde_json::Result<UpdateKind>> {
        let kind = match key {
            "message" => serde_json::from_value(value).map(UpdateKind::Message),
            "edited_message" => serde_json::from_value(value).map(UpdateKind::EditedMessage),
            "channel_post" => serde_json::from_value(value).map(UpdateKind::ChannelPost),
            "edited_channel_post" => {
                serde_json::from_value(value).map(UpdateKind::EditedChannelPost)
            }
            "inline_query" => serde_json::from_value(value).map(UpdateKind::InlineQuery),
            "chosen_inline_result" => {
                serde_json::from_value(value).map(UpdateKind::ChosenInlineResult)
            }
            "callback_query" => serde_json::from_value(value).map(UpdateKind::CallbackQuery),
            "shipping_query" => serde_json::from_value(value).map(UpdateKind::ShippingQuery),
            "pre_checkout_query" => {
                serde_json::from_value(value).map(UpdateKind::PreCheckoutQuery)
            }
            "poll" => serde_json::from_value(value).map(UpdateKind::Poll),
            "poll_answer" => serde_json::from_value(value).map(UpdateKind::PollAnswer),
            "my_chat_member" => serde_json::from_value(value).map(UpdateKind::MyChatMember),
            "chat_member" => serde_json::from_value(value).map(UpdateKind::ChatMember),
            "chat_join_request" => serde_json::from_value(value).map(UpdateKind::ChatJoinRequest),
            _ => return None,
        };
        Some(kind)
    }

    pub fn update_type(&self) -> Option<UpdateType> {
        let update_type = match self {
            UpdateKind::Message(_) => UpdateType::Message,
            UpdateKind::EditedMessage(_) => UpdateType::EditedMessage,
            UpdateKind::ChannelPost(_) => UpdateType::ChannelPost,
            UpdateKind::EditedChannelPost(_) => UpdateType::EditedChannelPost,
            UpdateKind::InlineQuery(_) => UpdateType::InlineQuery,
            UpdateKind::ChosenInlineResult(_) => UpdateType::ChosenInlineResult,
            UpdateKind::CallbackQuery(_) => UpdateType::CallbackQuery,
            UpdateKind::ShippingQuery(_) => UpdateType::ShippingQuery,
            UpdateKind::PreCheckoutQuery(_) => UpdateType::PreCheckoutQuery,
            UpdateKind::Poll(_) => UpdateType::Poll,
            UpdateKind::PollAnswer(_) => UpdateType::PollAnswer,
            UpdateKind::MyChatMember(_) => UpdateType::MyChatMember,
            UpdateKind::ChatMember(_) => UpdateType::ChatMember,
            UpdateKind::ChatJoinRequest(_) => UpdateType::ChatJoinRequest,
            UpdateKind::Unknown => return None,
        };
        Some(update_type)
    }
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D>(deserializer: D) -> Result<Update, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;

        let id: UpdateId = map
            .remove("update_id")
            .ok_or_else(|| de::Error::missing_field("update_id"))
            .map(Deserialize::deserialize)?
            .map_err(de::Error::custom)?;

        let mut kind = None;
        for (key, value) in map {
            let Some(parsed) = UpdateKind::from_entry(&key, value) else {
                continue;
            };
            if kind.is_some() {
                return Err(de::Error::custom(format!(
                    "update {id} carries more than one payload, extra one is `{key}`"
                )));
            }
            kind = Some(parsed.map_err(de::Error::custom)?);
        }

        Ok(Update {
            id,
            kind: kind.unwrap_or(UpdateKind::Unknown),
        })
    }
}

/// This object represents an incoming inline query.
/// https://core.telegram.org/bots/api#inlinequery
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct InlineQuery {
    pub id: CompactString,
    pub from: User,
    pub query: CompactString,
    pub offset: CompactString,
    pub chat_type: Option<ChatType>,
    pub location: Option<Location>,
}

/// Represents a result of an inline query that was chosen by the user and sent to their chat partner.
/// https://core.telegram.org/bots/api#choseninlineresult
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: CompactString,
    pub from: User,
    pub location: Option<Location>,
    pub inline_message_id: Option<CompactString>,
    pub query: Option<CompactString>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CallbackQuery {
    pub id: CompactString,
    pub from: User,
    pub message: Option<Message>,
    pub inline_message_id: Option<CompactString>,
    pub chat_instance: Option<CompactString>,
    pub data: Option<CompactString>,
    pub game_short_name: Option<CompactString>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShippingQuery {
    pub id: CompactString,
    pub from: User,
    pub invoice_payload: CompactString,
    pub shipping_address: ShippingAddress,
}

/// This object represents a shipping address.
/// https://core.telegram.org/bots/api#shippingaddress
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShippingAddress {
    pub country_code: CompactString,
    pub state: CompactString,
    pub city: CompactString,
    pub street_line1: CompactString,
    pub street_line2: CompactString,
    pub post_code: CompactString,
}

/// This object contains information about an incoming pre-checkout query.
/// https://core.telegram.org/bots/api#precheckoutquery
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: CompactString,
    pub from: User,
    pub currency: CompactString,
    pub total_amount: i64,
    pub invoice_payload: CompactString,
    pub shipping_option_id: Option<CompactString>,
    pub order_info: Option<OrderInfo>,
}

/// This object represents information about an order.
/// https://core.telegram.org/bots/api#orderinfo
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OrderInfo {
    pub name: Option<CompactString>,
    pub phone_number: Option<CompactString>,
    pub email: Option<CompactString>,
    pub shipping_address: Option<ShippingAddress>,
}

/// This object contains basic information about an invoice.
/// https://core.telegram.org/bots/api#invoice
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Invoice {
    pub title: CompactString,
    pub description: CompactString,
    pub start_parameter: CompactString,
    pub currency: CompactString,
    pub total_amount: i64,
}

/// This object contains basic information about a successful payment.
/// https://core.telegram.org/bots/api#successfulpayment
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SuccessfulPayment {
    pub currency: CompactString,
    pub total_amount: i64,
    pub invoice_payload: CompactString,
    pub shipping_option_id: Option<CompactString>,
    pub order_info: Option<OrderInfo>,
    pub telegram_payment_charge_id: Option<CompactString>,
    pub provider_payment_charge_id: Option<CompactString>,
}

/// This object contains information about a poll.
/// https://core.telegram.org/bots/api#poll
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Poll {
    pub id: CompactString,
    pub question: CompactString,
    pub options: Vec<PollOption>,
    pub total_voter_count: i64,
    pub is_closed: bool,
    pub is_anonymous: bool,
    #[serde(rename = "type")]
    pub poll_type: PollType,
    pub allows_multiple_answers: bool,
    pub correct_option_id: Option<i32>,
    pub explanation: Option<CompactString>,
    pub explanation_entities: Option<Vec<MessageEntity>>,
    pub open_period: Option<i64>,
    pub close_date: Option<Date>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PollOption {
    pub text: CompactString,
    pub voter_count: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollType {
    Quiz,
    Regular,
}

/// This object represents an answer of a user in a non-anonymous poll.
/// https://core.telegram.org/bots/api#pollanswer
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PollAnswer {
    pub poll_id: CompactString,
    pub user: User,
    pub option_ids: Vec<i32>,
}

/// This object represents a point on the map.
/// https://core.telegram.org/bots/api#location
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
    pub horizontal_accuracy: Option<f64>,
    pub live_period: Option<i64>,
    pub heading: Option<i32>,
    pub proximity_alert_radius: Option<i32>,
}

/// This object represents changes in the status of a [chat member](https://core.telegram.org/bots/api#chatmember).
/// https://core.telegram.org/bots/api#chatmemberupdated
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
    pub from: User,
    pub date: Date,
    pub old_chat_member: ChatMember,
    pub new_chat_member: ChatMember,
    pub invite_link: Option<ChatInviteLink>,
    pub via_chat_folder_invite_link: Option<bool>,
}

/// This object contains information about one member of a chat.
///
/// There is no separate discriminant on the wire, so the arms are tried in
/// declaration order and the first one that fits wins:
/// owner, administrator, member, restricted, left, banned.
/// Each arm only fits when its `status` literal matches, so the order matters
/// only for the error message when nothing fits.
/// https://core.telegram.org/bots/api#chatmember
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChatMember {
    ChatMemberOwner(ChatMemberOwner),
    ChatMemberAdministrator(ChatMemberAdministrator),
    ChatMemberMember(ChatMemberMember),
    ChatMemberRestricted(ChatMemberRestricted),
    ChatMemberLeft(ChatMemberLeft),
    ChatMemberBanned(ChatMemberBanned),
}

impl ChatMember {
    pub fn user(&self) -> &User {
        match self {
            ChatMember::ChatMemberOwner(member) => &member.user,
            ChatMember::ChatMemberAdministrator(member) => &member.user,
            ChatMember::ChatMemberMember(member) => &member.user,
            ChatMember::ChatMemberRestricted(member) => &member.user,
            ChatMember::ChatMemberLeft(member) => &member.user,
            ChatMember::ChatMemberBanned(member) => &member.user,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ChatMember::ChatMemberOwner(_) => "creator",
            ChatMember::ChatMemberAdministrator(_) => "administrator",
            ChatMember::ChatMemberMember(_) => "member",
            ChatMember::ChatMemberRestricted(_) => "restricted",
            ChatMember::ChatMemberLeft(_) => "left",
            ChatMember::ChatMemberBanned(_) => "kicked",
        }
    }
}

/// Single-value `status` field, so a shape only matches its own status.
macro_rules! member_status {
    ($name:ident, $wire:literal) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
        enum $name {
            #[serde(rename = $wire)]
            Status,
        }
    };
}

member_status!(OwnerStatus, "creator");
member_status!(AdministratorStatus, "administrator");
member_status!(MemberStatus, "member");
member_status!(RestrictedStatus, "restricted");
member_status!(LeftStatus, "left");
member_status!(BannedStatus, "kicked");

/// Represents a [chat member](https://core.telegram.org/bots/api#chatmember) that owns the chat and has all administrator privileges.
/// https://core.telegram.org/bots/api#chatmemberowner
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMemberOwner {
    #[serde(rename = "status")]
    _status: OwnerStatus,
    pub user: User,
    pub is_anonymous: bool,
    pub custom_title: Option<CompactString>,
}

/// Represents a [chat member](https://core.telegram.org/bots/api#chatmember) that has some additional privileges.
/// https://core.telegram.org/bots/api#chatmemberadministrator
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMemberAdministrator {
    #[serde(rename = "status")]
    _status: AdministratorStatus,
    pub user: User,
    pub can_be_edited: bool,
    pub is_anonymous: bool,
    pub can_manage_chat: bool,
    pub can_delete_messages: bool,
    pub can_manage_video_chats: bool,
    pub can_restrict_members: bool,
    pub can_promote_members: bool,
    pub can_change_info: bool,
    pub can_invite_users: bool,
    pub can_post_messages: Option<bool>,
    pub can_edit_messages: Option<bool>,
    pub can_pin_messages: Option<bool>,
    pub can_manage_topics: Option<bool>,
    pub custom_title: Option<CompactString>,
}

/// https://core.telegram.org/bots/api#chatmembermember
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMemberMember {
    #[serde(rename = "status")]
    _status: MemberStatus,
    pub user: User,
}

/// Represents a [chat member](https://core.telegram.org/bots/api#chatmember) that is under certain restrictions in the chat. Supergroups only.
/// https://core.telegram.org/bots/api#chatmemberrestricted
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMemberRestricted {
    #[serde(rename = "status")]
    _status: RestrictedStatus,
    pub user: User,
    pub is_member: bool,
    pub can_send_messages: bool,
    pub can_send_audios: bool,
    pub can_send_documents: bool,
    pub can_send_photos: bool,
    pub can_send_videos: bool,
    pub can_send_video_notes: bool,
    pub can_send_voice_notes: bool,
    pub can_send_polls: bool,
    pub can_send_other_messages: bool,
    pub can_add_web_page_previews: bool,
    pub can_change_info: bool,
    pub can_invite_users: bool,
    pub can_pin_messages: bool,
    pub can_manage_topics: bool,
    pub until_date: Date,
}

/// https://core.telegram.org/bots/api#chatmemberleft
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMemberLeft {
    #[serde(rename = "status")]
    _status: LeftStatus,
    pub user: User,
}

/// Represents a [chat member](https://core.telegram.org/bots/api#chatmember) that was banned in the chat and can't return to the chat or view chat messages.
/// https://core.telegram.org/bots/api#chatmemberbanned
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMemberBanned {
    #[serde(rename = "status")]
    _status: BannedStatus,
    pub user: User,
    pub until_date: Date,
}

/// Represents an invite link for a chat.
/// https://core.telegram.org/bots/api#chatinvitelink
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatInviteLink {
    pub invite_link: CompactString,
    pub creator: User,
    pub creates_join_request: bool,
    pub is_primary: bool,
    pub is_revoked: bool,
    pub name: Option<CompactString>,
    pub expire_date: Option<Date>,
    pub member_limit: Option<i32>,
    pub pending_join_request_count: Option<i32>,
}

/// Represents a join request sent to a chat.
/// https://core.telegram.org/bots/api#chatjoinrequest
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatJoinRequest {
    pub chat: Chat,
    pub from: User,
    pub user_chat_id: i64,
    pub date: Date,
    pub bio: Option<CompactString>,
    pub invite_link: Option<ChatInviteLink>,
}

/// Target chat: a numeric id, or `@channelusername` for public channels.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ChatId {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    Int(ChatIntId),
    Str(CompactString),
}

impl ChatId {
    pub fn as_int(&self) -> Option<ChatIntId> {
        match self {
            ChatId::Int(id) => Some(*id),
            ChatId::Str(_) => None,
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<CompactString> for ChatId {
    fn from(id: CompactString) -> Self {
        Self::Str(id)
    }
}

impl From<&str> for ChatId {
    fn from(id: &str) -> Self {
        Self::Str(id.into())
    }
}

impl Default for ChatId {
    fn default() -> Self {
        ChatId::Int(0)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
    MarkdownV2,
}

/// Additional interface options attached to a sent message.
///
/// Built from whichever concrete keyboard the caller supplies. When parsed,
/// the arms are tried in this order and the first one that fits wins:
/// inline keyboard, reply keyboard, keyboard removal, force reply.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ReplyMarkup {
    InlineKeyboardMarkup(InlineKeyboardMarkup),
    ReplyKeyboardMarkup(ReplyKeyboardMarkup),
    ReplyKeyboardRemove(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(markup: InlineKeyboardMarkup) -> Self {
        ReplyMarkup::InlineKeyboardMarkup(markup)
    }
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(markup: ReplyKeyboardMarkup) -> Self {
        ReplyMarkup::ReplyKeyboardMarkup(markup)
    }
}

impl From<ReplyKeyboardRemove> for ReplyMarkup {
    fn from(markup: ReplyKeyboardRemove) -> Self {
        ReplyMarkup::ReplyKeyboardRemove(markup)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(markup: ForceReply) -> Self {
        ReplyMarkup::ForceReply(markup)
    }
}

/// This object represents a [custom keyboard](https://core.telegram.org/bots/features#keyboards)
/// with reply options (see [Introduction to bots](https://core.telegram.org/bots/features#keyboards) for details and examples).
/// https://core.telegram.org/bots/api#replykeyboardmarkup
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub is_persistent: Option<bool>,
    pub resize_keyboard: Option<bool>,
    pub one_time_keyboard: Option<bool>,
    pub input_field_placeholder: Option<CompactString>,
    pub selective: Option<bool>,
}

/// This object represents one button of the reply keyboard.
/// The optional fields `web_app`, `request_user`, `request_chat`, `request_contact`,
/// `request_location`, and `request_poll` are mutually exclusive.
/// https://core.telegram.org/bots/api#keyboardbutton
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct KeyboardButton {
    pub text: CompactString,
    pub request_user: Option<RawObject>,
    pub request_chat: Option<RawObject>,
    pub request_contact: Option<bool>,
    pub request_location: Option<bool>,
    pub request_poll: Option<KeyboardButtonPollType>,
    pub web_app: Option<WebAppInfo>,
}

impl KeyboardButton {
    pub fn new(text: impl Into<CompactString>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// https://core.telegram.org/bots/api#keyboardbuttonpolltype
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct KeyboardButtonPollType {
    #[serde(default, rename = "type")]
    pub poll_type: Option<PollType>,
}

/// Describes a [Web App](https://core.telegram.org/bots/webapps).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WebAppInfo {
    pub url: CompactString,
}

/// Upon receiving a message with this object,
/// Telegram clients will remove the current custom keyboard and display the default letter-keyboard.
/// https://core.telegram.org/bots/api#replykeyboardremove
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ReplyKeyboardRemove {
    pub remove_keyboard: bool,
    pub selective: Option<bool>,
}

impl Default for ReplyKeyboardRemove {
    fn default() -> Self {
        Self {
            remove_keyboard: true,
            selective: None,
        }
    }
}

/// Upon receiving a message with this object,
/// Telegram clients will display a reply interface to the user
/// (act as if the user has selected the bot's message and tapped 'Reply').
/// https://core.telegram.org/bots/api#forcereply
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ForceReply {
    pub force_reply: bool,
    pub input_field_placeholder: Option<CompactString>,
    pub selective: Option<bool>,
}

impl Default for ForceReply {
    fn default() -> Self {
        Self {
            force_reply: true,
            input_field_placeholder: None,
            selective: None,
        }
    }
}

/// This object represents an [inline keyboard](https://core.telegram.org/bots/features#inline-keyboards)
/// that appears right next to the message it belongs to.
/// https://core.telegram.org/bots/api#inlinekeyboardmarkup
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: impl IntoIterator<Item = Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows.into_iter().collect(),
        }
    }
}

/// This object represents one button of an inline keyboard.
/// You **must** use exactly one of the optional fields.
/// https://core.telegram.org/bots/api#inlinekeyboardbutton
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct InlineKeyboardButton {
    pub text: CompactString,
    pub url: Option<CompactString>,
    pub callback_data: Option<CompactString>,
    pub web_app: Option<WebAppInfo>,
    pub login_url: Option<LoginUrl>,
    pub switch_inline_query: Option<CompactString>,
    pub switch_inline_query_current_chat: Option<CompactString>,
    pub switch_inline_query_chosen_chat: Option<RawObject>,
    pub callback_game: Option<RawObject>,
    pub pay: Option<bool>,
}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<CompactString>, data: impl Into<CompactString>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
            ..Default::default()
        }
    }

    pub fn url(text: impl Into<CompactString>, url: impl Into<CompactString>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// This object represents a parameter of the inline keyboard button used to automatically authorize a user.
/// https://core.telegram.org/bots/api#loginurl
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LoginUrl {
    pub url: CompactString,
    pub forward_text: Option<CompactString>,
    pub bot_username: Option<CompactString>,
    pub request_write_access: Option<bool>,
}

/// This object represents a Telegram user or bot.
/// https://core.telegram.org/bots/api#user
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: CompactString,
    pub last_name: Option<CompactString>,
    pub username: Option<CompactString>,
    pub language_code: Option<CompactString>,
    pub is_premium: Option<bool>,
    pub added_to_attachment_menu: Option<bool>,
    pub can_join_groups: Option<bool>,
    pub can_read_all_group_messages: Option<bool>,
    pub supports_inline_queries: Option<bool>,
}

impl User {
    pub fn full_name(&self) -> CompactString {
        let mut name = self.first_name.clone();
        if let Some(s) = self.last_name.as_ref().filter(|s| !s.is_empty()) {
            name.push(' ');
            name.push_str(s);
        }
        name
    }

    pub fn full_name_with_username(&self) -> CompactString {
        let mut name = self.full_name();
        if let Some(s) = &self.username {
            name.push_str(" @");
            name.push_str(s);
        }
        name
    }
}

/// Kinds the server adds later are kept as `Other`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    Sender,
    #[default]
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(untagged)]
    Other(CompactString),
}

/// This object represents a chat.
/// https://core.telegram.org/bots/api#chat
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Chat {
    pub id: ChatIntId,
    #[serde(default, rename = "type")]
    pub chat_type: ChatType,
    pub title: Option<CompactString>,
    pub username: Option<CompactString>,
    pub first_name: Option<CompactString>,
    pub last_name: Option<CompactString>,
    pub is_forum: Option<bool>,
    pub photo: Option<RawObject>,
    pub active_usernames: Option<Vec<CompactString>>,
    pub emoji_status_custom_emoji_id: Option<CompactString>,
    pub bio: Option<CompactString>,
    pub has_private_forwards: Option<bool>,
    pub has_restricted_voice_and_video_messages: Option<bool>,
    pub join_to_send_messages: Option<bool>,
    pub join_by_request: Option<bool>,
    pub description: Option<CompactString>,
    pub invite_link: Option<CompactString>,
    pub pinned_message: Option<Box<Message>>,
    pub permissions: Option<RawObject>,
    pub slow_mode_delay: Option<i64>,
    pub message_auto_delete_time: Option<i64>,
    pub has_aggressive_anti_spam_enabled: Option<bool>,
    pub has_hidden_members: Option<bool>,
    pub has_protected_content: Option<bool>,
    pub sticker_set_name: Option<CompactString>,
    pub can_set_sticker_set: Option<bool>,
    pub linked_chat_id: Option<i64>,
    pub location: Option<RawObject>,
}

impl Chat {
    pub fn title_with_full_name(&self) -> Option<CompactString> {
        let parts = [
            &self.title,
            &self.first_name,
            &self.username,
            &self.last_name,
        ];
        let mut name: Option<CompactString> = None;
        for part in parts.into_iter().flatten() {
            match &mut name {
                Some(n) => {
                    n.push(' ');
                    n.push_str(part);
                }
                None => name = Some(part.clone()),
            }
        }
        name
    }
}

/// This object represents one special entity in a text message. For example, hashtags, usernames, URLs, etc.
/// https://core.telegram.org/bots/api#messageentity
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub entity_type: MessageEntityType,
    pub offset: i64,
    pub length: i64,
    pub url: Option<CompactString>,
    pub user: Option<User>,
    pub language: Option<CompactString>,
    pub custom_emoji_id: Option<CompactString>,
}

impl MessageEntity {
    pub fn new(entity_type: MessageEntityType, offset: i64, length: i64) -> Self {
        Self {
            entity_type,
            offset,
            length,
            url: None,
            user: None,
            language: None,
            custom_emoji_id: None,
        }
    }
}

/// Type of the entity. Kinds the binding does not know yet are kept verbatim in `Other`.
/// https://core.telegram.org/bots/api#messageentity
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityType {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    TextLink,
    TextMention,
    CustomEmoji,
    #[serde(untagged)]
    Other(CompactString),
}

/// This object represents one size of a photo
/// or a [file](https://core.telegram.org/bots/api#document) /
/// [sticker](https://core.telegram.org/bots/api#sticker) thumbnail.
/// https://core.telegram.org/bots/api#photosize
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PhotoSize {
    pub file_id: CompactString,
    pub file_unique_id: CompactString,
    pub width: i32,
    pub height: i32,
    pub file_size: Option<i64>,
}

/// This object represents a general file (as opposed to photos, voice messages and audio files).
/// https://core.telegram.org/bots/api#document
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Document {
    pub file_id: CompactString,
    pub file_unique_id: CompactString,
    pub thumbnail: Option<PhotoSize>,
    pub file_name: Option<CompactString>,
    pub mime_type: Option<CompactString>,
    pub file_size: Option<i64>,
}

/// This object represents a message.
///
/// The content-kind fields (`text`, `document`, `photo`, ...) normally hold at
/// most one value per message. That is not enforced here, see [`Message::content_kinds`].
/// https://core.telegram.org/bots/api#message
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Message {
    pub message_id: MessageId,
    pub message_thread_id: Option<MessageThreadId>,
    pub from: Option<User>,
    pub sender_chat: Option<Chat>,
    pub date: Date,
    pub chat: Chat,
    pub forward_from: Option<User>,
    pub forward_from_chat: Option<Chat>,
    pub forward_from_message_id: Option<MessageId>,
    pub forward_signature: Option<CompactString>,
    pub forward_sender_name: Option<CompactString>,
    pub forward_date: Option<Date>,
    pub is_topic_message: Option<bool>,
    pub is_automatic_forward: Option<bool>,
    pub reply_to_message: Option<Box<Message>>,
    pub via_bot: Option<User>,
    pub edit_date: Option<Date>,
    pub has_protected_content: Option<bool>,
    pub media_group_id: Option<CompactString>,
    pub author_signature: Option<CompactString>,
    pub text: Option<CompactString>,
    pub entities: Option<Vec<MessageEntity>>,
    pub animation: Option<RawObject>,
    pub audio: Option<RawObject>,
    pub document: Option<Document>,
    pub photo: Option<Vec<PhotoSize>>,
    pub sticker: Option<RawObject>,
    pub video: Option<RawObject>,
    pub video_note: Option<RawObject>,
    pub voice: Option<RawObject>,
    pub caption: Option<CompactString>,
    pub caption_entities: Option<Vec<MessageEntity>>,
    pub has_media_spoiler: Option<bool>,
    pub contact: Option<RawObject>,
    pub dice: Option<RawObject>,
    pub game: Option<RawObject>,
    pub poll: Option<Poll>,
    pub venue: Option<RawObject>,
    pub location: Option<Location>,
    pub new_chat_members: Option<Vec<User>>,
    pub left_chat_member: Option<User>,
    pub new_chat_title: Option<CompactString>,
    pub new_chat_photo: Option<Vec<PhotoSize>>,
    pub delete_chat_photo: Option<bool>,
    pub group_chat_created: Option<bool>,
    pub supergroup_chat_created: Option<bool>,
    pub channel_chat_created: Option<bool>,
    pub message_auto_delete_timer_changed: Option<RawObject>,
    pub migrate_to_chat_id: Option<ChatIntId>,
    pub migrate_from_chat_id: Option<ChatIntId>,
    pub pinned_message: Option<Box<Message>>,
    pub invoice: Option<Invoice>,
    pub successful_payment: Option<SuccessfulPayment>,
    pub user_shared: Option<RawObject>,
    pub chat_shared: Option<RawObject>,
    pub connected_website: Option<CompactString>,
    pub write_access_allowed: Option<RawObject>,
    pub passport_data: Option<RawObject>,
    pub proximity_alert_triggered: Option<RawObject>,
    pub forum_topic_created: Option<RawObject>,
    pub forum_topic_edited: Option<RawObject>,
    pub forum_topic_closed: Option<RawObject>,
    pub forum_topic_reopened: Option<RawObject>,
    pub general_forum_topic_hidden: Option<RawObject>,
    pub general_forum_topic_unhidden: Option<RawObject>,
    pub video_chat_scheduled: Option<RawObject>,
    pub video_chat_started: Option<RawObject>,
    pub video_chat_ended: Option<RawObject>,
    pub video_chat_participants_invited: Option<RawObject>,
    pub web_app_data: Option<RawObject>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl Message {
    pub fn entity_of(&self, entity: MessageEntityType) -> Option<&MessageEntity> {
        self.entities
            .iter()
            .flatten()
            .find(|msg_entity| msg_entity.entity_type == entity)
    }

    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.date, 0).single()
    }

    /// Names of the populated content-kind fields, in declaration order.
    pub fn content_kinds(&self) -> Vec<&'static str> {
        let kinds = [
            ("text", self.text.is_some()),
            ("animation", self.animation.is_some()),
            ("audio", self.audio.is_some()),
            ("document", self.document.is_some()),
            ("photo", self.photo.is_some()),
            ("sticker", self.sticker.is_some()),
            ("video", self.video.is_some()),
            ("video_note", self.video_note.is_some()),
            ("voice", self.voice.is_some()),
            ("contact", self.contact.is_some()),
            ("dice", self.dice.is_some()),
            ("game", self.game.is_some()),
            ("poll", self.poll.is_some()),
            ("venue", self.venue.is_some()),
            ("location", self.location.is_some()),
        ];
        kinds
            .into_iter()
            .filter_map(|(name, present)| present.then_some(name))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}
