use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    HttpResponse, Result, TokenPair, TokenReaderError, TokenReaderResult, OAUTH_TOKEN_KEY,
    OAUTH_TOKEN_SECRET_KEY, SCREEN_NAME_KEY, USER_ID_KEY,
};

/// Represents response of token acquisition.
#[derive(Debug)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents
    pub remain: HashMap<String, String>,
}

impl TokenResponse {
    pub fn token_pair(&self) -> TokenPair {
        TokenPair::new(self.oauth_token.as_str(), self.oauth_token_secret.as_str())
    }

    /// The user who authorized the access token, when the response names one.
    pub fn active_user(&self) -> Option<ActiveUser> {
        match (self.remain.get(USER_ID_KEY), self.remain.get(SCREEN_NAME_KEY)) {
            (Some(id), Some(screen_name)) => Some(ActiveUser {
                id: id.clone(),
                screen_name: screen_name.clone(),
            }),
            _ => None,
        }
    }
}

/// The account behind an access token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveUser {
    pub id: String,
    pub screen_name: String,
}

/// Add parse_oauth_token feature to a transport response.
// this trait is sealed
pub trait TokenReader: private::Sealed {
    fn parse_oauth_token(&self) -> Result<TokenResponse>;
}

impl TokenReader for HttpResponse {
    fn parse_oauth_token(&self) -> Result<TokenResponse> {
        Ok(read_oauth_token(self.text())?)
    }
}

/// Splits a `key=value&key=value` body into a map.
///
/// Values are taken verbatim: no percent-decoding, anything after a second
/// `=` is dropped, a missing value reads as empty and the last duplicate wins.
pub fn parse_form_response(text: &str) -> HashMap<String, String> {
    let params = text.split('&');
    let mut map = HashMap::new();
    for param in params {
        let mut parts = param.split('=');
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
    }
    trace!(fields = map.len(), "parsed form response");
    map
}

fn read_oauth_token(text: &str) -> TokenReaderResult<TokenResponse> {
    token_from_fields(parse_form_response(text), text)
}

/// Takes the token pair out of an already parsed response body.
pub(crate) fn token_from_fields(
    mut destructured: HashMap<String, String>,
    text: &str,
) -> TokenReaderResult<TokenResponse> {
    let oauth_token = destructured.remove(OAUTH_TOKEN_KEY);
    let oauth_token_secret = destructured.remove(OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => Ok(TokenResponse {
            oauth_token: t,
            oauth_token_secret: s,
            remain: destructured,
        }),
        (None, _) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_KEY,
            text.to_string(),
        )),
        (_, _) => Err(TokenReaderError::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            text.to_string(),
        )),
    }
}

mod private {
    use crate::HttpResponse;

    pub trait Sealed {}
    impl Sealed for HttpResponse {}
}

#[cfg(test)]
mod test {
    use http::StatusCode;

    use super::*;

    #[test]
    fn parse_response_typical() {
        let resp_str_sample = "oauth_token=Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik&oauth_token_secret=Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM&oauth_callback_confirmed=true";
        let parsed = read_oauth_token(resp_str_sample).unwrap();
        assert_eq!(
            parsed.oauth_token,
            "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik"
        );
        assert_eq!(
            parsed.oauth_token_secret,
            "Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM"
        );
        assert_eq!(parsed.remain.len(), 1);
        let oauth_callback_confirmed = parsed.remain.get("oauth_callback_confirmed").unwrap();
        assert_eq!(oauth_callback_confirmed, "true");
    }

    #[test]
    fn parse_response_edge() {
        let resp_str_sample = "oauth_token==&oauth_token_secret=&keyonly=&keyonly2&=&&";
        let parsed = read_oauth_token(resp_str_sample).unwrap();
        assert_eq!(parsed.oauth_token, "");
        assert_eq!(parsed.oauth_token_secret, "");
        assert_eq!(parsed.remain.len(), 3);
        assert_eq!(parsed.remain.get("keyonly").unwrap(), "");
        assert_eq!(parsed.remain.get("keyonly2").unwrap(), "");
        assert_eq!(parsed.remain.get("").unwrap(), "");
    }

    #[test]
    fn parse_keeps_escapes_and_last_duplicate() {
        let parsed = parse_form_response("a=1&name=John%20Doe&a=2&b=x=y");
        assert_eq!(parsed.get("a").unwrap(), "2");
        assert_eq!(parsed.get("name").unwrap(), "John%20Doe");
        assert_eq!(parsed.get("b").unwrap(), "x");
    }

    #[test]
    fn parse_then_join_restores_pairs() {
        let body = "oauth_token=t2&oauth_token_secret=s2&user_id=1&screen_name=bob";
        let parsed = parse_form_response(body);

        let mut joined = parsed
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>();
        joined.sort();
        let mut expected = body.split('&').collect::<Vec<_>>();
        expected.sort();
        assert_eq!(joined, expected);
    }

    #[test]
    fn parse_minimal() {
        let resp_str_sample = "oauth_token&oauth_token_secret";
        let parsed = read_oauth_token(resp_str_sample).unwrap();
        assert_eq!(parsed.oauth_token, "");
        assert_eq!(parsed.oauth_token_secret, "");
        assert_eq!(parsed.remain.len(), 0);
    }

    #[test]
    fn parse_token_notfound() {
        let resp_str_sample = "oauth_token_secret=";
        let parsed = read_oauth_token(resp_str_sample);
        match parsed {
            Err(TokenReaderError::TokenKeyNotFound(key, resp_str)) => {
                assert_eq!(key, OAUTH_TOKEN_KEY);
                assert_eq!(resp_str, resp_str_sample)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn parse_token_secret_notfound() {
        let resp_str_sample = "oauth_token=";
        let parsed = read_oauth_token(resp_str_sample);
        match parsed {
            Err(TokenReaderError::TokenKeyNotFound(key, resp_str)) => {
                assert_eq!(key, OAUTH_TOKEN_SECRET_KEY);
                assert_eq!(resp_str, resp_str_sample)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn active_user_from_access_token_response() {
        let response = HttpResponse::new(
            StatusCode::OK,
            "oauth_token=t2&oauth_token_secret=s2&user_id=1&screen_name=bob",
        );
        let parsed = response.parse_oauth_token().unwrap();
        assert_eq!(parsed.token_pair(), TokenPair::new("t2", "s2"));
        assert_eq!(
            parsed.active_user(),
            Some(ActiveUser {
                id: "1".to_string(),
                screen_name: "bob".to_string(),
            })
        );

        let parsed = read_oauth_token("oauth_token=t&oauth_token_secret=s").unwrap();
        assert_eq!(parsed.active_user(), None);
    }
}
