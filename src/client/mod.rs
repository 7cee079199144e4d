//! Client layer: HTTP plumbing, status mapping, and the endpoint facade.

mod account;
mod contacts;
mod error;
mod messages;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::domain::{AddressBookId, Login, Password, ValidationError};

pub use error::{ApiError, EsputnikError, HttpStatusError};

const DEFAULT_BASE_URL: &str = "https://esputnik.com/api/";
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const APPLICATION_JSON: &str = "application/json";

const ENV_LOGIN: &str = "ESPUTNIK_LOGIN";
const ENV_PASSWORD: &str = "ESPUTNIK_PASSWORD";
const ENV_BASE_URL: &str = "ESPUTNIK_BASE_URL";
const ENV_ADDRESS_BOOK_ID: &str = "ESPUTNIK_ADDRESS_BOOK_ID";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    body: Option<Value>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    headers: HeaderMap,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
    auth: Auth,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, request.url)
                .basic_auth(self.auth.login.as_str(), Some(self.auth.password.expose()));
            if let Some(body) = request.body.as_ref() {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        })
    }
}

#[derive(Debug, Clone)]
/// HTTP basic credentials sent with every request.
pub struct Auth {
    login: Login,
    password: Password,
}

impl Auth {
    /// Create credentials and validate that both parts are non-empty.
    pub fn basic(
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
        })
    }

    pub fn login(&self) -> &Login {
        &self.login
    }
}

/// Decoded result of one successful call.
///
/// Status and headers are scoped to the call that produced them; the client keeps no
/// record of previous responses.
#[derive(Debug, Clone)]
pub(crate) struct ApiResponse {
    pub(crate) status: u16,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Value,
    /// Undecoded body text, for fields whose exact JSON token matters.
    pub(crate) text: String,
}

/// Map a raw response onto the error taxonomy and decode a successful body.
///
/// An empty successful body decodes to `null`.
fn classify_response(response: HttpResponse) -> Result<ApiResponse, EsputnikError> {
    if !(200..=299).contains(&response.status) {
        let err = HttpStatusError::new(response.status, response.body);
        return Err(match ApiError::from_status(err) {
            Ok(api) => EsputnikError::Api(api),
            Err(status) => EsputnikError::HttpStatus(status),
        });
    }

    let body = if response.body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&response.body).map_err(|err| EsputnikError::Parse(Box::new(err)))?
    };

    Ok(ApiResponse {
        status: response.status,
        headers: response.headers,
        body,
        text: response.body,
    })
}

/// Turn a typed `404` into `None`; every other error is returned unchanged.
fn found<T>(result: Result<T, EsputnikError>) -> Result<Option<T>, EsputnikError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => {
            tracing::debug!("resource not found");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Outcome of an update/delete: `false` on `404` or a falsy body, `true` otherwise.
fn acknowledged(result: Result<ApiResponse, EsputnikError>) -> Result<bool, EsputnikError> {
    Ok(found(result)?.is_some_and(|response| crate::transport::is_truthy(&response.body)))
}

fn parse_error(err: crate::transport::TransportError) -> EsputnikError {
    EsputnikError::Parse(Box::new(err))
}

#[derive(Debug, Clone)]
/// Builder for [`EsputnikClient`].
///
/// Use this when you need to customize the base URL, timeouts, user-agent, or the
/// default address book.
pub struct EsputnikClientBuilder {
    auth: Auth,
    base_url: String,
    connect_timeout: Duration,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    default_address_book_id: Option<AddressBookId>,
}

impl EsputnikClientBuilder {
    /// Create a builder with the default base URL and a 2 second connect timeout.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: None,
            user_agent: None,
            default_address_book_id: None,
        }
    }

    /// Override the API base URL (endpoint paths such as `v1/contact` are joined onto it).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Maximum time to wait while establishing a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Address book used for contacts that do not name one.
    pub fn default_address_book_id(mut self, id: AddressBookId) -> Self {
        self.default_address_book_id = Some(id);
        self
    }

    /// Build an [`EsputnikClient`].
    pub fn build(self) -> Result<EsputnikClient, EsputnikError> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| EsputnikError::Transport(Box::new(err)))?;

        Ok(EsputnikClient {
            base_url,
            default_address_book_id: self.default_address_book_id,
            http: Arc::new(ReqwestTransport {
                client,
                auth: self.auth,
            }),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ValidationError> {
    let mut normalized = raw.trim().to_owned();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|_| ValidationError::InvalidUrl {
        input: raw.to_owned(),
    })
}

#[derive(Clone)]
/// High-level client for the marketing API.
///
/// Holds only immutable configuration, so one instance can be cloned and shared between
/// tasks. Each method performs exactly one HTTP request.
pub struct EsputnikClient {
    base_url: Url,
    default_address_book_id: Option<AddressBookId>,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for EsputnikClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsputnikClient")
            .field("base_url", &self.base_url.as_str())
            .field("default_address_book_id", &self.default_address_book_id)
            .finish_non_exhaustive()
    }
}

impl EsputnikClient {
    /// Create a client for the default base URL.
    ///
    /// For more customization, use [`EsputnikClient::builder`].
    pub fn new(auth: Auth) -> Result<Self, EsputnikError> {
        Self::builder(auth).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> EsputnikClientBuilder {
        EsputnikClientBuilder::new(auth)
    }

    /// Create a client from `ESPUTNIK_LOGIN` and `ESPUTNIK_PASSWORD`, plus the optional
    /// `ESPUTNIK_BASE_URL` and `ESPUTNIK_ADDRESS_BOOK_ID`.
    pub fn from_env() -> Result<Self, EsputnikError> {
        Self::builder_from_vars(|key| std::env::var(key).ok())?.build()
    }

    fn builder_from_vars(
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<EsputnikClientBuilder, EsputnikError> {
        let login = var(ENV_LOGIN)
            .ok_or_else(|| EsputnikError::Config(format!("{ENV_LOGIN} is not set")))?;
        let password = var(ENV_PASSWORD)
            .ok_or_else(|| EsputnikError::Config(format!("{ENV_PASSWORD} is not set")))?;

        let mut builder = Self::builder(Auth::basic(login, password)?);
        if let Some(base_url) = var(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(raw) = var(ENV_ADDRESS_BOOK_ID) {
            let id = raw.trim().parse::<u64>().map_err(|_| {
                EsputnikError::Config(format!("{ENV_ADDRESS_BOOK_ID} is not a number: {raw}"))
            })?;
            builder = builder.default_address_book_id(AddressBookId::new(id));
        }
        Ok(builder)
    }

    /// Address book injected into contacts that do not name one.
    pub fn default_address_book_id(&self) -> Option<AddressBookId> {
        self.default_address_book_id
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<ApiResponse, EsputnikError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|_| ValidationError::InvalidUrl {
                input: path.to_owned(),
            })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        tracing::debug!(%method, %url, "sending request");
        let response = self
            .http
            .send(HttpRequest { method, url, body })
            .await
            .map_err(EsputnikError::Transport)?;
        tracing::debug!(status = response.status, "received response");

        classify_response(response)
    }

    async fn get(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<ApiResponse, EsputnikError> {
        self.call(Method::GET, path, query, None).await
    }
}
