use std::fmt;

use serde::Deserialize;

use crate::secrets::redact;
use crate::{Credentials, DEFAULT_BASE_URL};

/// Construction options for a [`Client`](crate::Client).
///
/// Every field is optional; the flow being run decides what is required
/// (`oauth_callback` for the request-token leg, consumer credentials for any
/// signed call). Deserializes from camelCase keys.
#[derive(Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientOptions {
    pub bearer_token: Option<String>,
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_token_secret: Option<String>,
    pub oauth_callback: Option<String>,
    /// API root, defaults to `https://api.twitter.com`.
    pub base_url: Option<String>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn consumer<TKey, TSecret>(self, consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        ClientOptions {
            consumer_key: Some(consumer_key.into()),
            consumer_secret: Some(consumer_secret.into()),
            ..self
        }
    }

    pub fn access_token<TKey, TSecret>(self, access_token: TKey, access_token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        ClientOptions {
            access_token: Some(access_token.into()),
            access_token_secret: Some(access_token_secret.into()),
            ..self
        }
    }

    pub fn bearer_token<T: Into<String>>(self, bearer_token: T) -> Self {
        ClientOptions {
            bearer_token: Some(bearer_token.into()),
            ..self
        }
    }

    pub fn oauth_callback<T: Into<String>>(self, oauth_callback: T) -> Self {
        ClientOptions {
            oauth_callback: Some(oauth_callback.into()),
            ..self
        }
    }

    pub fn base_url<T: Into<String>>(self, base_url: T) -> Self {
        ClientOptions {
            base_url: Some(base_url.into()),
            ..self
        }
    }

    pub(crate) fn into_parts(self) -> (Credentials, Option<String>, String) {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let credentials = Credentials::from_parts(
            self.consumer_key,
            self.consumer_secret,
            self.bearer_token,
            self.access_token,
            self.access_token_secret,
        );
        (credentials, self.oauth_callback, base_url)
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("bearer_token", &redact(&self.bearer_token))
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("access_token", &self.access_token)
            .field("access_token_secret", &redact(&self.access_token_secret))
            .field("oauth_callback", &self.oauth_callback)
            .field("base_url", &self.base_url)
            .finish()
    }
}
