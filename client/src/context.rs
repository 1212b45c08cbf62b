use log::{debug, info};
use std::{cell::RefCell, fmt, future::Future, marker::PhantomData, sync::Arc};
use tg_api::{
    encoding::Payload,
    endpoints::{Endpoint, Request, ResponseOf},
    response::decode,
    schema, Error, Validated,
};

use crate::{
    config::ClientConfig,
    transport::{raise_for_status, AsyncTransport, BlockingHttp, Http, Transport},
};

thread_local! {
    static SYNC_CLIENT: RefCell<Option<Arc<SyncTgClient>>> = RefCell::new(None);
}

tokio::task_local! {
    static ASYNC_CLIENT: Arc<AsyncTgClient>;
}

/// Blocking client, bound to the current thread by [`SyncTgClient::enter`].
pub struct SyncTgClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl SyncTgClient {
    /// Default configuration for `token`, entered right away.
    pub fn setup(token: &str) -> Result<SyncClientGuard, Error> {
        Self::with_config(ClientConfig::new(token))?.enter()
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let transport = BlockingHttp::new(config.timeout)?;
        Self::with_transport(config, transport)
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, Error> {
        config.validate()?;
        schema::registry()?;
        Ok(Self {
            config,
            transport: Box::new(transport),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Binds the client to this thread until the guard is dropped.
    pub fn enter(self) -> Result<SyncClientGuard, Error> {
        SYNC_CLIENT.with(|current| {
            let mut current = current.borrow_mut();
            if current.is_some() {
                return Err(Error::configuration(
                    "a SyncTgClient is already entered on this thread",
                ));
            }
            *current = Some(Arc::new(self));
            debug!("sync client entered");
            Ok(SyncClientGuard {
                _thread_bound: PhantomData,
            })
        })
    }

    pub fn current() -> Result<Arc<SyncTgClient>, Error> {
        SYNC_CLIENT
            .with(|current| current.borrow().clone())
            .ok_or_else(|| Error::configuration("no SyncTgClient entered on this thread"))
    }

    pub fn send<R: Request>(&self, request: &Validated<R>) -> Result<ResponseOf<R>, Error> {
        let path = <R::Endpoint as Endpoint>::PATH;
        let body = request.encode()?;
        info!("{} ({})", path, body.encoding());

        let url = self.config.method_url(path);
        let response = self
            .transport
            .execute(<R::Endpoint as Endpoint>::METHOD, &url, body)?;
        decode(&raise_for_status(response)?.body)
    }
}

impl fmt::Debug for SyncTgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncTgClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Releases the thread binding on drop, also on early return and unwinding.
#[derive(Debug)]
#[must_use = "the client is released as soon as the guard is dropped"]
pub struct SyncClientGuard {
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for SyncClientGuard {
    fn drop(&mut self) {
        // thread-locals may already be gone during thread teardown
        let _ = SYNC_CLIENT.try_with(|current| current.borrow_mut().take());
        debug!("sync client released");
    }
}

/// Async client, visible to everything awaited inside [`AsyncTgClient::scope`].
pub struct AsyncTgClient {
    config: ClientConfig,
    transport: Box<dyn AsyncTransport>,
}

impl AsyncTgClient {
    /// Default configuration for `token`. Bind it with [`AsyncTgClient::scope`].
    pub fn setup(token: &str) -> Result<Self, Error> {
        Self::with_config(ClientConfig::new(token))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let transport = Http::new(config.timeout)?;
        Self::with_transport(config, transport)
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: impl AsyncTransport + 'static,
    ) -> Result<Self, Error> {
        config.validate()?;
        schema::registry()?;
        Ok(Self {
            config,
            transport: Box::new(transport),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs `fut` with this client current. A nested scope shadows the outer one.
    pub async fn scope<F: Future>(self, fut: F) -> F::Output {
        ASYNC_CLIENT.scope(Arc::new(self), fut).await
    }

    pub fn current() -> Result<Arc<AsyncTgClient>, Error> {
        ASYNC_CLIENT
            .try_with(Arc::clone)
            .map_err(|_| Error::configuration("no AsyncTgClient in scope"))
    }

    pub async fn send<R: Request + Sync>(
        &self,
        request: &Validated<R>,
    ) -> Result<ResponseOf<R>, Error> {
        let path = <R::Endpoint as Endpoint>::PATH;
        let body = request.encode()?;
        info!("{} ({})", path, body.encoding());

        let url = self.config.method_url(path);
        let response = self
            .transport
            .execute(<R::Endpoint as Endpoint>::METHOD, &url, body)
            .await?;
        decode(&raise_for_status(response)?.body)
    }
}

impl fmt::Debug for AsyncTgClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncTgClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
