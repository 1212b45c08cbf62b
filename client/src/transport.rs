use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use std::time::Duration;
use tg_api::{encoding::Body, files::MultipartForm, Error};

const APPLICATION_JSON: &str = "application/json";

/// Status and body as they came off the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Non-2xx responses never reach the envelope parser.
pub fn raise_for_status(response: RawResponse) -> Result<RawResponse, Error> {
    if response.is_success() {
        return Ok(response);
    }
    let body = String::from_utf8_lossy(&response.body).into_owned();
    warn!("telegram answered with status {}", response.status);
    Err(Error::HttpStatus {
        status: response.status,
        body,
    })
}

pub trait Transport: Send + Sync {
    fn execute(&self, method: Method, url: &str, body: Body) -> Result<RawResponse, Error>;
}

#[async_trait]
pub trait AsyncTransport: Send + Sync {
    async fn execute(&self, method: Method, url: &str, body: Body) -> Result<RawResponse, Error>;
}

// the url embeds the bot token
fn transport_error(err: reqwest::Error) -> Error {
    Error::transport(err.without_url())
}

pub struct BlockingHttp {
    client: reqwest::blocking::Client,
}

impl BlockingHttp {
    pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;
        Ok(Self { client })
    }
}

fn blocking_form(form: MultipartForm) -> reqwest::blocking::multipart::Form {
    use reqwest::blocking::multipart::{Form, Part};

    let mut multipart = Form::new();
    for (name, value) in form.fields {
        multipart = multipart.text(name.to_string(), value);
    }
    for file in form.files {
        let part = Part::bytes(file.content).file_name(file.file_name.to_string());
        multipart = multipart.part(file.name.to_string(), part);
    }
    multipart
}

impl Transport for BlockingHttp {
    fn execute(&self, method: Method, url: &str, body: Body) -> Result<RawResponse, Error> {
        let request = self.client.request(method, url).header(ACCEPT, APPLICATION_JSON);
        let request = match body {
            Body::Json(bytes) => request.header(CONTENT_TYPE, APPLICATION_JSON).body(bytes),
            Body::Multipart(form) => request.multipart(blocking_form(form)),
        };

        let response = request.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(transport_error)?.to_vec();
        debug!("status {}, {} bytes", status, body.len());
        Ok(RawResponse { status, body })
    }
}

pub struct Http {
    client: reqwest::Client,
}

impl Http {
    pub fn new(timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;
        Ok(Self { client })
    }
}

fn async_form(form: MultipartForm) -> reqwest::multipart::Form {
    use reqwest::multipart::{Form, Part};

    let mut multipart = Form::new();
    for (name, value) in form.fields {
        multipart = multipart.text(name.to_string(), value);
    }
    for file in form.files {
        let part = Part::bytes(file.content).file_name(file.file_name.to_string());
        multipart = multipart.part(file.name.to_string(), part);
    }
    multipart
}

#[async_trait]
impl AsyncTransport for Http {
    async fn execute(&self, method: Method, url: &str, body: Body) -> Result<RawResponse, Error> {
        let request = self.client.request(method, url).header(ACCEPT, APPLICATION_JSON);
        let request = match body {
            Body::Json(bytes) => request.header(CONTENT_TYPE, APPLICATION_JSON).body(bytes),
            Body::Multipart(form) => request.multipart(async_form(form)),
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();
        debug!("status {}, {} bytes", status, body.len());
        Ok(RawResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, let_assert};

    #[test]
    fn statuses() {
        let ok = RawResponse {
            status: 200,
            body: b"{}".to_vec(),
        };
        assert!(raise_for_status(ok.clone()).unwrap() == ok);

        let bad_gateway = RawResponse {
            status: 502,
            body: b"<html>Bad Gateway</html>".to_vec(),
        };
        let_assert!(Err(Error::HttpStatus { status, body }) = raise_for_status(bad_gateway));
        assert!(status == 502);
        assert!(body == "<html>Bad Gateway</html>");

        let redirect = RawResponse {
            status: 302,
            body: Vec::new(),
        };
        let_assert!(Err(Error::HttpStatus { status: 302, .. }) = raise_for_status(redirect));
    }

    #[test]
    fn forms_keep_every_part() {
        let mut form = MultipartForm::default();
        form.text("chat_id", "1").file("photo", "cat.jpg", vec![1, 2]);
        // boundary is random, so only check construction succeeds
        assert!(!async_form(form.clone()).boundary().is_empty());
        assert!(!blocking_form(form).boundary().is_empty());
    }
}
