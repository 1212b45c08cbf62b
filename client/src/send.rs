use async_trait::async_trait;
use tg_api::{
    endpoints::{Request, ResponseOf},
    Error, Validated,
};

use crate::context::{AsyncTgClient, SyncTgClient};

/// Sends through the [`SyncTgClient`] entered on this thread.
pub trait SyncSend {
    type Response;

    fn send(&self) -> Result<Self::Response, Error>;
}

impl<R: Request> SyncSend for Validated<R> {
    type Response = ResponseOf<R>;

    fn send(&self) -> Result<ResponseOf<R>, Error> {
        SyncTgClient::current()?.send(self)
    }
}

/// Sends through the [`AsyncTgClient`] of the enclosing scope.
#[async_trait]
pub trait AsyncSend {
    type Response;

    async fn asend(&self) -> Result<Self::Response, Error>;
}

#[async_trait]
impl<R> AsyncSend for Validated<R>
where
    R: Request + Sync,
    ResponseOf<R>: Send,
{
    type Response = ResponseOf<R>;

    async fn asend(&self) -> Result<ResponseOf<R>, Error> {
        AsyncTgClient::current()?.send(self).await
    }
}
