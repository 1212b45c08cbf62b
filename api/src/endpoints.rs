use http::Method;
use serde::de::DeserializeOwned;

use crate::{
    encoding::Payload,
    proto::{Message, Update, User},
    request::{
        CopyMessageRequest, DeleteMessageRequest, EditBytesMessageMediaRequest,
        EditMessageCaptionRequest, EditMessageReplyMarkupRequest, EditMessageTextRequest,
        EditUrlMessageMediaRequest, ForwardMessageRequest, GetMeRequest, GetUpdatesRequest,
        SendBytesDocumentRequest, SendBytesPhotoRequest, SendChatActionRequest,
        SendMessageRequest, SendUrlDocumentRequest, SendUrlPhotoRequest,
    },
    response::{MessageIdResponse, MessageOrBool},
    validate::Validate,
};

pub trait Endpoint {
    type Request;
    type Response: DeserializeOwned;

    const METHOD: Method;
    const PATH: &'static str;
}

/// A request type bound to the one endpoint it calls.
pub trait Request: Validate + Payload {
    type Endpoint: Endpoint<Request = Self>;

    /// Schema name of the request in [`crate::schema::registry`].
    const NAME: &'static str;
}

pub type ResponseOf<R> = <<R as Request>::Endpoint as Endpoint>::Response;

macro_rules! endpoints {
    ($($endpoint:ident: $request:ident => $response:ty, $path:literal;)*) => {
        $(
            pub struct $endpoint;

            impl Endpoint for $endpoint {
                type Request = $request;
                type Response = $response;

                const METHOD: Method = Method::POST;
                const PATH: &'static str = $path;
            }

            impl Request for $request {
                type Endpoint = $endpoint;

                const NAME: &'static str = stringify!($request);
            }
        )*
    };
}

endpoints! {
    SendMessage: SendMessageRequest => Message, "sendMessage";
    SendUrlPhoto: SendUrlPhotoRequest => Message, "sendPhoto";
    SendBytesPhoto: SendBytesPhotoRequest => Message, "sendPhoto";
    SendUrlDocument: SendUrlDocumentRequest => Message, "sendDocument";
    SendBytesDocument: SendBytesDocumentRequest => Message, "sendDocument";
    DeleteMessage: DeleteMessageRequest => bool, "deleteMessage";
    EditMessageText: EditMessageTextRequest => MessageOrBool, "editMessageText";
    EditMessageReplyMarkup: EditMessageReplyMarkupRequest => MessageOrBool, "editMessageReplyMarkup";
    EditMessageCaption: EditMessageCaptionRequest => MessageOrBool, "editMessageCaption";
    EditUrlMessageMedia: EditUrlMessageMediaRequest => MessageOrBool, "editMessageMedia";
    EditBytesMessageMedia: EditBytesMessageMediaRequest => MessageOrBool, "editMessageMedia";
    GetMe: GetMeRequest => User, "getMe";
    GetUpdates: GetUpdatesRequest => Vec<Update>, "getUpdates";
    ForwardMessage: ForwardMessageRequest => Message, "forwardMessage";
    CopyMessage: CopyMessageRequest => MessageIdResponse, "copyMessage";
    SendChatAction: SendChatActionRequest => bool, "sendChatAction";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Encoding;
    use assert2::assert;

    fn route<R: Request>() -> (&'static str, Encoding) {
        (<R::Endpoint as Endpoint>::PATH, R::ENCODING)
    }

    #[test]
    fn byte_and_url_variants_share_a_method() {
        assert!(route::<SendUrlPhotoRequest>() == ("sendPhoto", Encoding::Json));
        assert!(route::<SendBytesPhotoRequest>() == ("sendPhoto", Encoding::Multipart));
        assert!(route::<SendBytesDocumentRequest>() == ("sendDocument", Encoding::Multipart));
        assert!(route::<EditUrlMessageMediaRequest>() == ("editMessageMedia", Encoding::Json));
        assert!(
            route::<EditBytesMessageMediaRequest>() == ("editMessageMedia", Encoding::Multipart)
        );
        assert!(SendMessage::METHOD == Method::POST);
        assert!(<GetMeRequest as Request>::NAME == "GetMeRequest");
    }
}
