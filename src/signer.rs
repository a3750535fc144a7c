use std::borrow::Cow;

use http::Method;
use oauth1_request::signer::Signer as OAuthSigner;
use oauth1_request::{HmacSha1, Options};
use tracing::debug;
use url::Url;

use crate::{SecretsProvider, SignError, SignResult, OAUTH_KEY_PREFIX};

/// Computes the `Authorization` header value for one request.
///
/// With a bearer token the result is `Bearer <token>`; otherwise an
/// HMAC-SHA1 OAuth 1.0a signature is computed over `params`, which must hold
/// every query and body parameter of the request (raw, not percent-encoded).
pub fn authorization<T, K, V>(
    method: &Method,
    url: Url,
    secrets: &T,
    params: &[(K, V)],
) -> SignResult<String>
where
    T: SecretsProvider,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let is_url_query = *method == Method::GET;
    Signer::new(secrets, OAuthParameters::new()).generate_signature(method, url, params, is_url_query)
}

#[derive(Debug, Clone)]
pub struct Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    secrets: &'a TSecretsProvider,
    parameters: OAuthParameters<'a>,
}

impl<'a, TSecretsProvider> Signer<'a, TSecretsProvider>
where
    TSecretsProvider: SecretsProvider,
{
    pub fn new(secrets: &'a TSecretsProvider, parameters: OAuthParameters<'a>) -> Self {
        Signer {
            secrets,
            parameters,
        }
    }

    pub fn generate_signature<K, V>(
        self,
        method: &Method,
        url: Url,
        payload: &[(K, V)],
        is_url_query: bool,
    ) -> SignResult<String>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if let Some(bearer_token) = self.secrets.get_bearer_token() {
            debug!("bearer token configured, skipping OAuth signature");
            return Ok(format!("Bearer {}", bearer_token));
        }

        let (consumer_key, consumer_secret) = self.secrets.get_consumer_key_pair();
        let consumer_key = consumer_key.ok_or(SignError::MissingConsumerKey)?;
        let consumer_secret = consumer_secret.ok_or(SignError::MissingConsumerSecret)?;
        let (token, token_secret) = self.secrets.get_token_option_pair();
        let options = self.parameters.build_options(token);

        // protocol parameters only come from the options above
        let mut sorted_query: Vec<(&str, &str)> = payload
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_ref()))
            .filter(|(k, _)| !k.starts_with(OAUTH_KEY_PREFIX))
            .collect();
        sorted_query.sort();

        // oauth1-request expects parameters in order, so the oauth_* block
        // goes in between the keys sorting before and after "oauth_"
        let split = sorted_query.partition_point(|(k, _)| *k < OAUTH_KEY_PREFIX);
        let (query_before_oauth, query_after_oauth) = sorted_query.split_at(split);

        debug!(
            %method,
            url = %url,
            parameters = sorted_query.len(),
            "generating OAuth signature"
        );

        let sig_method = self.parameters.signature_method.clone();
        let mut signer = if is_url_query {
            OAuthSigner::with_signature_method(
                sig_method,
                method.as_str(),
                url,
                consumer_secret,
                token_secret,
            )
        } else {
            OAuthSigner::form_with_signature_method(
                sig_method,
                method.as_str(),
                url,
                consumer_secret,
                token_secret,
            )
        };

        for &(key, value) in query_before_oauth {
            signer.parameter(key, value);
        }
        let mut signer = signer.oauth_parameters(consumer_key, &options);
        for &(key, value) in query_after_oauth {
            signer.parameter(key, value);
        }

        Ok(signer.finish().authorization)
    }
}

/// The `oauth_*` protocol parameters that are not derived from credentials.
///
/// Nonce and timestamp are generated per request unless set here.
#[derive(Debug, Clone)]
pub struct OAuthParameters<'a> {
    callback: Option<Cow<'a, str>>,
    nonce: Option<Cow<'a, str>>,
    signature_method: HmacSha1,
    timestamp: Option<u64>,
    verifier: Option<Cow<'a, str>>,
    version: bool,
}

impl<'a> Default for OAuthParameters<'a> {
    fn default() -> Self {
        OAuthParameters {
            callback: None,
            nonce: None,
            signature_method: HmacSha1,
            timestamp: None,
            verifier: None,
            version: true,
        }
    }
}

impl<'a> OAuthParameters<'a> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn callback<T>(self, callback: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            callback: Some(callback.into()),
            ..self
        }
    }

    /// set the oauth_nonce value
    pub fn nonce<T>(self, nonce: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            nonce: Some(nonce.into()),
            ..self
        }
    }

    /// set the oauth_timestamp value
    pub fn timestamp<T>(self, timestamp: T) -> Self
    where
        T: Into<u64>,
    {
        OAuthParameters {
            timestamp: Some(timestamp.into()),
            ..self
        }
    }

    /// set the oauth_verifier value
    pub fn verifier<T>(self, verifier: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        OAuthParameters {
            verifier: Some(verifier.into()),
            ..self
        }
    }

    /// set the oauth_version value (boolean)
    ///
    /// # Note
    /// Defaults to `true`, which sends `oauth_version="1.0"`.
    /// With `false` the parameter is left out, which the protocol allows.
    pub fn version<T>(self, version: T) -> Self
    where
        T: Into<bool>,
    {
        OAuthParameters {
            version: version.into(),
            ..self
        }
    }

    fn build_options<'s>(&'s self, token: Option<&'s str>) -> Options<'s> {
        let mut opt = Options::new();

        // NOTE: items must be added by alphabetical order

        if let Some(ref callback) = self.callback {
            opt.callback(callback.as_ref());
        }
        if let Some(ref nonce) = self.nonce {
            opt.nonce(nonce.as_ref());
        }
        if let Some(timestamp) = self.timestamp {
            opt.timestamp(timestamp);
        }
        if let Some(token) = token {
            opt.token(token);
        }
        if let Some(ref verifier) = self.verifier {
            opt.verifier(verifier.as_ref());
        }
        opt.version(self.version);

        opt
    }
}
