use std::fmt;

use serde::{Deserialize, Serialize};

const REDACTED: &str = "[REDACTED]";

/// Source of the credentials used to build an `Authorization` header.
pub trait SecretsProvider {
    fn get_consumer_key_pair(&self) -> (Option<&str>, Option<&str>);

    fn get_token_option_pair(&self) -> (Option<&str>, Option<&str>);

    /// When present, the bearer token replaces the OAuth signature entirely.
    fn get_bearer_token(&self) -> Option<&str> {
        None
    }
}

/// Consumer credentials plus whichever token pair the client currently holds.
///
/// The token pair starts as whatever was configured, is replaced by the
/// request token after the first leg and by the access token after the last.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: Option<String>,
    consumer_secret: Option<String>,
    bearer_token: Option<String>,
    token: Option<String>,
    token_secret: Option<String>,
}

impl Credentials {
    pub fn new<TKey, TSecret>(consumer_key: TKey, consumer_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Credentials {
            consumer_key: Some(consumer_key.into()),
            consumer_secret: Some(consumer_secret.into()),
            ..Default::default()
        }
    }

    /// Credentials carrying only an app-scoped bearer token.
    pub fn bearer<T>(bearer_token: T) -> Self
    where
        T: Into<String>,
    {
        Credentials {
            bearer_token: Some(bearer_token.into()),
            ..Default::default()
        }
    }

    pub fn token<TKey, TSecret>(self, token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        Credentials {
            token: Some(token.into()),
            token_secret: Some(token_secret.into()),
            ..self
        }
    }

    pub fn with_bearer_token<T>(self, bearer_token: T) -> Self
    where
        T: Into<String>,
    {
        Credentials {
            bearer_token: Some(bearer_token.into()),
            ..self
        }
    }

    pub(crate) fn from_parts(
        consumer_key: Option<String>,
        consumer_secret: Option<String>,
        bearer_token: Option<String>,
        token: Option<String>,
        token_secret: Option<String>,
    ) -> Self {
        Credentials {
            consumer_key,
            consumer_secret,
            bearer_token,
            token,
            token_secret,
        }
    }

    /// Current token pair, if both halves are known.
    pub fn token_pair(&self) -> Option<TokenPair> {
        match (&self.token, &self.token_secret) {
            (Some(token), Some(token_secret)) => Some(TokenPair {
                token: token.clone(),
                token_secret: token_secret.clone(),
            }),
            _ => None,
        }
    }

    pub(crate) fn current_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn set_token_pair(&mut self, pair: TokenPair) {
        self.token = Some(pair.token);
        self.token_secret = Some(pair.token_secret);
    }
}

impl SecretsProvider for Credentials {
    fn get_consumer_key_pair(&self) -> (Option<&str>, Option<&str>) {
        (
            self.consumer_key.as_deref(),
            self.consumer_secret.as_deref(),
        )
    }

    fn get_token_option_pair(&self) -> (Option<&str>, Option<&str>) {
        (self.token.as_deref(), self.token_secret.as_deref())
    }

    fn get_bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("bearer_token", &redact(&self.bearer_token))
            .field("token", &self.token)
            .field("token_secret", &redact(&self.token_secret))
            .finish()
    }
}

/// A request-scoped or access-scoped token with its secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub token_secret: String,
}

impl TokenPair {
    pub fn new<TKey, TSecret>(token: TKey, token_secret: TSecret) -> Self
    where
        TKey: Into<String>,
        TSecret: Into<String>,
    {
        TokenPair {
            token: token.into(),
            token_secret: token_secret.into(),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("token", &self.token)
            .field("token_secret", &REDACTED)
            .finish()
    }
}

pub(crate) fn redact(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| REDACTED)
}

#[cfg(test)]
mod tests {
    use super::*;

    static CONSUMER_KEY: &str = "<CONSUMER_KEY>";
    static CONSUMER_SECRET: &str = "<CONSUMER_SECRET>";
    static TOKEN: &str = "<ACCESS_TOKEN>";
    static TOKEN_SECRET: &str = "<ACCESS_TOKEN_SECRET>";

    #[test]
    fn credentials_builder() {
        let secrets = Credentials::new(CONSUMER_KEY, CONSUMER_SECRET);
        assert_eq!(
            secrets.get_consumer_key_pair(),
            (Some(CONSUMER_KEY), Some(CONSUMER_SECRET))
        );
        assert_eq!(secrets.get_token_option_pair(), (None, None));
        assert!(secrets.token_pair().is_none());

        let secrets = secrets.token(TOKEN, TOKEN_SECRET);
        assert_eq!(
            secrets.get_token_option_pair(),
            (Some(TOKEN), Some(TOKEN_SECRET))
        );
        assert_eq!(secrets.token_pair(), Some(TokenPair::new(TOKEN, TOKEN_SECRET)));
    }

    #[test]
    fn bearer_only() {
        let secrets = Credentials::bearer("AAAA");
        assert_eq!(secrets.get_bearer_token(), Some("AAAA"));
        assert_eq!(secrets.get_consumer_key_pair(), (None, None));
    }

    #[test]
    fn debug_hides_secrets() {
        let secrets = Credentials::new(CONSUMER_KEY, CONSUMER_SECRET)
            .token(TOKEN, TOKEN_SECRET)
            .with_bearer_token("AAAA");
        let printed = format!("{:?}", secrets);
        assert!(printed.contains(CONSUMER_KEY));
        assert!(printed.contains(TOKEN));
        assert!(!printed.contains(CONSUMER_SECRET));
        assert!(!printed.contains(TOKEN_SECRET));
        assert!(!printed.contains("AAAA"));

        let printed = format!("{:?}", TokenPair::new(TOKEN, TOKEN_SECRET));
        assert!(!printed.contains(TOKEN_SECRET));
    }

    #[test]
    fn set_token_keeps_secret() {
        let mut secrets = Credentials::new(CONSUMER_KEY, CONSUMER_SECRET).token("req", "req-secret");
        secrets.set_token("other".to_string());
        assert_eq!(
            secrets.get_token_option_pair(),
            (Some("other"), Some("req-secret"))
        );
        secrets.set_token_pair(TokenPair::new("acc", "acc-secret"));
        assert_eq!(secrets.current_token(), Some("acc"));
    }
}
