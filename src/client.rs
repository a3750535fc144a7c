use http::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Method, StatusCode};
use reqwest::Client as ReqwestClient;
use tracing::{debug, info};
use url::Url;

use crate::request::PreparedParameters;
use crate::{
    ActiveUser, ClientOptions, Credentials, Error, HttpRequest, HttpResponse, OAuthParameters,
    RequestOptions, Result, Signer, TokenPair, TokenReader, TokenResponse, Transport, ACCESS_TOKEN_PATH,
    AUTHORIZE_PATH, OAUTH_CALLBACK_CONFIRMED_KEY, OAUTH_TOKEN_KEY, REQUEST_TOKEN_PATH,
};
use crate::token_reader::{parse_form_response, token_from_fields};

/// Turns any [`Transport`] into an OAuth 1.0a [`Client`].
pub trait OAuthClientProvider: Transport + Sized {
    fn oauth1(self, options: ClientOptions) -> Client<Self> {
        Client::with_transport(options, self)
    }
}

impl<T> OAuthClientProvider for T where T: Transport {}

/// Client for the three-legged OAuth flow and signed API calls.
///
/// The flow runs `get_request_token` → (user authorizes) → `get_access_token`
/// and every step rewrites the stored token pair. Those steps take
/// `&mut self`, so one client drives one flow at a time; run concurrent flows
/// on separate clients.
#[derive(Debug)]
pub struct Client<T = ReqwestClient> {
    transport: T,
    base_url: String,
    credentials: Credentials,
    callback: Option<String>,
    verifier: Option<String>,
    authorization_url: Option<String>,
    active_user: Option<ActiveUser>,
}

impl Client<ReqwestClient> {
    /// Constructs a new `Client`.
    ///
    /// This method calls reqwest::Client::new() internally.
    pub fn new(options: ClientOptions) -> Self {
        Client::with_transport(options, ReqwestClient::new())
    }
}

impl<T> Client<T>
where
    T: Transport,
{
    /// Constructs a new `Client` on top of the given transport.
    pub fn with_transport(options: ClientOptions, transport: T) -> Self {
        let (credentials, callback, base_url) = options.into_parts();
        Client {
            transport,
            base_url,
            credentials,
            callback,
            verifier: None,
            authorization_url: None,
            active_user: None,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The token pair requests are currently signed with.
    pub fn token_pair(&self) -> Option<TokenPair> {
        self.credentials.token_pair()
    }

    /// Set once `get_access_token` succeeded.
    pub fn active_user(&self) -> Option<&ActiveUser> {
        self.active_user.as_ref()
    }

    /// Page the user has to visit to authorize the pending request token.
    ///
    /// Set by `get_request_token`, cleared once the access token is obtained.
    pub fn authorization_url(&self) -> Option<&str> {
        self.authorization_url.as_deref()
    }

    /// First leg: obtain a request token and return the authorization URL.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Configuration`] when no callback was configured,
    /// before any request is sent.
    pub async fn get_request_token(&mut self) -> Result<String> {
        let callback = match self.callback {
            Some(ref callback) => callback.clone(),
            None => {
                return Err(Error::Configuration(
                    "oauth_callback is required to request a token",
                ))
            }
        };

        debug!("requesting a request token");
        let response = self.post(REQUEST_TOKEN_PATH, RequestOptions::new()).await?;
        let response = ensure_ok(response)?;

        // a rejected callback may come without any token
        let fields = parse_form_response(response.text());
        if fields.get(OAUTH_CALLBACK_CONFIRMED_KEY).map(String::as_str) == Some("false") {
            return Err(Error::CallbackRejected(callback));
        }
        let token = token_from_fields(fields, response.text())?;

        self.credentials.set_token_pair(token.token_pair());
        let url = format!(
            "{}{}?{}={}",
            self.base_url, AUTHORIZE_PATH, OAUTH_TOKEN_KEY, token.oauth_token
        );
        self.authorization_url = Some(url.clone());
        Ok(url)
    }

    /// Last leg: redeem `request_token` and `verifier` for an access token.
    ///
    /// On success the access token replaces the request token, the callback
    /// and verifier are cleared and [`Client::active_user`] is populated.
    /// On failure only the verifier is dropped; the request token stays
    /// stored so the exchange can be retried with a new verifier.
    pub async fn get_access_token(
        &mut self,
        request_token: &str,
        verifier: &str,
    ) -> Result<TokenPair> {
        self.credentials.set_token(request_token.to_string());
        self.verifier = Some(verifier.to_string());

        debug!("exchanging request token for an access token");
        let token = match self.redeem_verifier().await {
            Ok(token) => token,
            Err(err) => {
                self.verifier = None;
                return Err(err);
            }
        };

        let pair = token.token_pair();
        self.credentials.set_token_pair(pair.clone());
        self.callback = None;
        self.verifier = None;
        self.authorization_url = None;
        self.active_user = token.active_user();

        if let Some(ref user) = self.active_user {
            info!(user_id = %user.id, screen_name = %user.screen_name, "access token obtained");
        }
        Ok(pair)
    }

    async fn redeem_verifier(&self) -> Result<TokenResponse> {
        let response = self.post(ACCESS_TOKEN_PATH, RequestOptions::new()).await?;
        ensure_ok(response)?.parse_oauth_token()
    }

    /// Same as [`Client::get_access_token`], using the stored request token.
    ///
    /// This is the `oob` (PIN) flow, where the user only hands back a verifier.
    pub async fn get_access_token_from_stored(&mut self, verifier: &str) -> Result<TokenPair> {
        let request_token = match self.credentials.current_token() {
            Some(token) => token.to_string(),
            None => {
                return Err(Error::Configuration(
                    "a request token is required before exchanging a verifier",
                ))
            }
        };
        self.get_access_token(&request_token, verifier).await
    }

    /// Convenience method to make a signed `GET` request to an API path.
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::GET, path, options).await
    }

    /// Convenience method to make a signed `POST` request to an API path.
    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<HttpResponse> {
        self.request(Method::POST, path, options).await
    }

    /// Streaming endpoints are not supported.
    pub fn stream(&self) -> Result<HttpResponse> {
        Err(Error::NotImplemented("stream"))
    }

    /// Signs and sends a request to `path`, relative to the base URL.
    ///
    /// Query and body parameters are signed together, along with any query
    /// already present in `path`. Every occurrence of a repeated key is signed.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse> {
        let prepared = options.into_parts()?;
        let full_url = format!("{}{}", self.base_url, path);

        let mut signing_url = Url::parse(&full_url)?;
        let mut params: Vec<(String, String)> = signing_url.query_pairs().into_owned().collect();
        params.extend(prepared.signature_parameters());
        signing_url.set_query(None);

        let authorization = Signer::new(&self.credentials, self.oauth_parameters())
            .generate_signature(&method, signing_url, &params, method == Method::GET)?;

        let request = build_request(method, full_url, &prepared, &authorization)?;
        debug!(method = %request.method, url = %request.url, "sending signed request");
        self.transport.request(request).await
    }

    fn oauth_parameters(&self) -> OAuthParameters<'_> {
        let mut parameters = OAuthParameters::new();
        if let Some(ref callback) = self.callback {
            parameters = parameters.callback(callback.as_str());
        }
        if let Some(ref verifier) = self.verifier {
            parameters = parameters.verifier(verifier.as_str());
        }
        parameters
    }
}

fn build_request(
    method: Method,
    url: String,
    prepared: &PreparedParameters,
    authorization: &str,
) -> Result<HttpRequest> {
    let url = match prepared.query_string() {
        Some(query) if url.contains('?') => format!("{}&{}", url, query),
        Some(query) => format!("{}?{}", url, query),
        None => url,
    };

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(&prepared.content_type)?);
    let mut authorization = HeaderValue::from_str(authorization)?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    Ok(HttpRequest {
        method,
        url,
        headers,
        body: prepared.form_body()?,
    })
}

fn ensure_ok(response: HttpResponse) -> Result<HttpResponse> {
    if response.status() == StatusCode::OK {
        Ok(response)
    } else {
        debug!(status = %response.status(), "token endpoint refused the request");
        Err(Error::Authorization {
            status: response.status(),
            body: response.into_text(),
        })
    }
}
