//! Platform-abstracted HTTP client with Send-safe futures.
//!
//! On WASM, `reqwest::Response` is not `Send` because it wraps JS values, so:
//! - On **native**: reqwest is used directly (futures are Send)
//! - On **WASM**: the request runs on the JS thread via `wasm_bindgen_futures::spawn_local`
//!   and the result comes back through a `flume` channel (which is Send-safe)
//!
//! This lets commands return `Pin<Box<dyn Future<Output = ()> + Send>>` on all platforms.

use thiserror::Error;

/// A simplified HTTP response that contains only Send-safe data.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP error: {message}")]
pub struct HttpError {
    pub message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

/// A GET request under construction.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Send the request and return a Send-safe future.
    pub async fn send(self) -> HttpResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            execute(self.url).await
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.send_wasm().await
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_wasm(self) -> HttpResult<Response> {
        let (tx, rx) = flume::bounded::<HttpResult<Response>>(1);
        let url = self.url;

        // spawn_local does not require Send, the channel hands the result back
        wasm_bindgen_futures::spawn_local(async move {
            let result = execute(url).await;
            // receiver gone means the caller was dropped
            let _ignored = tx.send_async(result).await;
        });

        rx.recv_async()
            .await
            .map_err(|_disconnected| HttpError::new("Request cancelled"))?
    }
}

async fn execute(url: String) -> HttpResult<Response> {
    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .map_err(|e| HttpError::new(e.to_string()))?;

    // Read the status before the body consumes the response
    let status = response.status().as_u16();

    let body = response
        .bytes()
        .await
        .map_err(|e| HttpError::new(e.to_string()))?
        .to_vec();

    Ok(Response { status, body })
}

/// HTTP client with Send-safe futures on all platforms.
///
/// ```ignore
/// let response = Client::get("https://randomuser.me/api/?results=100").send().await?;
/// if response.is_success() {
///     let body: RandomUserResponse = response.json()?;
/// }
/// ```
pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }
}
