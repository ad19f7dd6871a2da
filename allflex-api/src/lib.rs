/*!
 * A rust library for interacting with the Allflex Order API.
 *
 * The API accepts purchase orders, reports order status, and hands out the
 * orders that are pending processing. Every request and response body is XML.
 *
 * Example:
 *
 * ```no_run
 * use allflex_api::{Allflex, OrderStatus, OrderStatusDocument};
 *
 * async fn mark_shipped() {
 *     // Initialize the Allflex client.
 *     let allflex = Allflex::new_from_env().unwrap();
 *
 *     // Pull the orders waiting to be processed.
 *     let document = allflex.retrieve_orders().await.unwrap();
 *
 *     for order in document.order_headers {
 *         if let Some(ws_order_id) = order.ws_order_id {
 *             let status = OrderStatusDocument::new(ws_order_id, &order.po, OrderStatus::Shipped);
 *             allflex.post_status(&status).await.unwrap();
 *         }
 *     }
 * }
 * ```
 */
use std::{env, fmt, sync::Arc};

use reqwest::{header, Client, Method, Request, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

pub mod status;
pub mod types;

pub use crate::status::{OrderStatus, UnknownStatus};
pub use crate::types::*;

/// Sandbox endpoint for the Allflex API.
pub const TEST_ENDPOINT: &str = "http://testapi.allflexusa.com/";

const XML: &str = "application/xml";

/// Which set of routes the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiScope {
    #[default]
    Customer,
    Admin,
}

impl ApiScope {
    fn status_path(&self) -> &'static str {
        match self {
            ApiScope::Customer => "api/orders/status",
            ApiScope::Admin => "api/admin/orders/status",
        }
    }

    fn process_path(&self) -> &'static str {
        match self {
            ApiScope::Customer => "api/orders/process",
            ApiScope::Admin => "api/admin/orders/process",
        }
    }
}

/// Entrypoint for interacting with the Allflex API.
pub struct Allflex {
    key: SecretString,
    endpoint: Url,
    scope: ApiScope,

    client: Arc<Client>,
}

impl Allflex {
    /// Create a new Allflex client struct. It takes the API key and the base
    /// URL of the API. As long as the function is given a valid API key your
    /// requests will work.
    pub fn new<K, U>(key: K, url: U) -> Result<Self, AllflexError>
    where
        K: ToString,
        U: AsRef<str>,
    {
        let key = key.to_string();
        header::HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|_| AllflexError::MalformedAPIKey)?;

        Ok(Self {
            key: SecretString::new(key),
            endpoint: Url::parse(url.as_ref()).map(with_trailing_slash)?,
            scope: ApiScope::default(),

            client: Arc::new(Client::builder().build()?),
        })
    }

    /// Create a new Allflex client struct from the `ALLFLEX_API_KEY` and
    /// `ALLFLEX_API_URL` environment variables.
    pub fn new_from_env() -> Result<Self, AllflexError> {
        let key = env::var("ALLFLEX_API_KEY").map_err(|_| AllflexError::MissingEnv("ALLFLEX_API_KEY"))?;
        let url = env::var("ALLFLEX_API_URL").map_err(|_| AllflexError::MissingEnv("ALLFLEX_API_URL"))?;

        Allflex::new(key, url)
    }

    /// Override the base URL requests are sent to.
    pub fn base_url(mut self, url: Url) -> Self {
        self.endpoint = with_trailing_slash(url);
        self
    }

    /// Talk to the admin routes.
    pub fn admin(mut self) -> Self {
        self.scope = ApiScope::Admin;
        self
    }

    pub fn scope(&self) -> ApiScope {
        self.scope
    }

    /// The status route for one order. The id is pushed as a single encoded
    /// path segment.
    fn status_url(&self, scope: ApiScope, ws_order_id: &str) -> Result<Url, AllflexError> {
        if ws_order_id.trim().is_empty() {
            return Err(AllflexError::MissingWsOrderId);
        }

        let mut url = self.endpoint.join(scope.status_path())?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(ws_order_id);

        Ok(url)
    }

    fn request(&self, method: Method, url: Url, body: Option<(String, &'static str)>) -> Result<Request, AllflexError> {

        let bt = format!("Bearer {}", self.key.expose_secret());
        let bearer = header::HeaderValue::from_str(&bt).map_err(|_| AllflexError::MalformedAPIKey)?;

        // Set the default headers.
        let mut headers = header::HeaderMap::new();
        headers.append(header::AUTHORIZATION, bearer);
        headers.append(header::ACCEPT, header::HeaderValue::from_static(XML));

        let mut rb = self.client.request(method, url).headers(headers);

        if let Some((body, content_type)) = body {
            rb = rb.header(header::CONTENT_TYPE, content_type).body(body);
        }

        Ok(rb.build()?)
    }

    /// Send the request and hand back the response text, or an API error
    /// describing what we were trying to do.
    async fn execute<C>(&self, request: Request, context: C) -> Result<String, AllflexError>
    where
        C: FnOnce() -> String,
    {
        let url = request.url().clone();
        log::debug!("{} {}", request.method(), url);

        let resp = self.client.execute(request).await?;
        let status_code = resp.status();
        let body = resp.text().await?;

        if !status_code.is_success() {
            return Err(AllflexError::Api(APIError {
                status_code,
                url,
                context: context(),
                body,
            }));
        }

        Ok(body)
    }

    /// Post the status of an order.
    pub async fn post_status(&self, status: &OrderStatusDocument) -> Result<(), AllflexError> {
        let url = self.status_url(self.scope, &status.ws_order_id)?;
        let request = self.request(Method::POST, url, Some((status.to_xml()?, XML)))?;

        self.execute(request, || {
            format!(
                "There was an issue with sending the status for the API for order {}, with API id {}",
                status.order_id, status.ws_order_id
            )
        })
        .await?;

        Ok(())
    }

    /// Get the status of an order.
    pub async fn get_order_status(&self, ws_order_id: &str) -> Result<OrderStatusDocument, AllflexError> {
        let url = self.status_url(ApiScope::Customer, ws_order_id)?;
        let request = self.request(Method::GET, url, None)?;

        let body = self
            .execute(request, || {
                format!(
                    "There was an issue with pulling the order status for {} from the API for processing",
                    ws_order_id
                )
            })
            .await?;

        OrderStatusDocument::from_xml(&body)
    }

    /// Post a purchase order. The order the API echoes back carries its
    /// assigned WS order id.
    pub async fn post_order(&self, order: &OrderHeader) -> Result<OrderHeader, AllflexError> {
        let url = self.endpoint.join("api/orders")?;
        let request = self.request(Method::POST, url, Some((order.to_xml()?, "text/xml")))?;

        let body = self
            .execute(request, || {
                format!(
                    "There was an issue saving the purchase order {} to the Allflex Order API",
                    order.po
                )
            })
            .await?;

        let mut document = Document::from_xml(&body)?;
        if document.order_headers.len() != 1 {
            return Err(AllflexError::UnexpectedOrderCount {
                po: order.po.clone(),
                count: document.order_headers.len(),
            });
        }

        Ok(document.order_headers.remove(0))
    }

    /// Retrieve the orders waiting to be processed.
    pub async fn retrieve_orders(&self) -> Result<Document, AllflexError> {
        let url = self.endpoint.join(self.scope.process_path())?;
        let request = self.request(Method::GET, url, None)?;

        let body = self
            .execute(request, || {
                "There was an issue with pulling orders from the API for processing".to_string()
            })
            .await?;

        let mut document = Document::from_xml(&body)?;
        document.prune_empty_user_defined_fields();

        log::info!("retrieved {} orders from the Allflex API", document.order_headers.len());

        Ok(document)
    }

    /// Set the status on the document and send it. Returns `false` without
    /// sending anything when the document has no WS order id.
    pub async fn set_api_status(
        &self,
        order_status: &mut OrderStatusDocument,
        status: OrderStatus,
    ) -> Result<bool, AllflexError> {
        order_status.status = status;

        if order_status.ws_order_id.trim().is_empty() {
            log::warn!(
                "not sending status {} for Allflex order {}: it has no API id",
                status,
                order_status.order_id
            );
            return Ok(false);
        }

        self.post_status(order_status).await?;

        log::info!(
            "status of {} sent to the API for {}, Allflex order {}",
            status,
            order_status.ws_order_id,
            order_status.order_id
        );

        Ok(true)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// A non-success response from the API.
#[derive(Debug)]
pub struct APIError {
    pub status_code: StatusCode,
    pub url: Url,
    pub context: String,
    pub body: String,
}

impl fmt::Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Bad response from {}: {}\n{}\n{}",
            self.url, self.status_code, self.context, self.body
        )
    }
}

// This is important for other errors to wrap this one.
impl std::error::Error for APIError {}

/// Error type returned by our library.
#[derive(Debug, Error)]
pub enum AllflexError {
    #[error("{0}")]
    Api(APIError),
    #[error("Request to the Allflex API failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Invalid Allflex API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("API key can not be sent as a bearer token")]
    MalformedAPIKey,
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),
    #[error("Failed to read or write an Allflex XML document: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("An API order id is required")]
    MissingWsOrderId,
    /// Lets callers decoding status strings use `?` in functions returning
    /// this error.
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),
    #[error("Expected the API to return purchase order {po}, but it returned {count} orders")]
    UnexpectedOrderCount { po: String, count: usize },
    #[error("Failed to save orders: {0}")]
    Io(#[from] std::io::Error),
}
