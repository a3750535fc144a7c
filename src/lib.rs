/*!
twitter-oauth1: three-legged OAuth 1.0a for the Twitter REST API.

# Overview

This library runs the OAuth 1.0a authorization dance against Twitter
(request token → user authorization → access token) and signs every
subsequent API call, using [oauth1-request](https://crates.io/crates/oauth1-request)
for the HMAC-SHA1 signature and [reqwest](https://crates.io/crates/reqwest)
as the default transport. Any other HTTP client can be plugged in through
the [`Transport`] trait.

# How to use

## Basic usecase 1 - Acquiring OAuth token & secret

```rust,no_run
use std::io;
use twitter_oauth1::{Client, ClientOptions};

# async fn run() -> twitter_oauth1::Result<()> {
let options = ClientOptions::new()
    .consumer("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
    .oauth_callback("oob");
let mut client = Client::new(options);

// step 1: acquire request token & token secret
let url = client.get_request_token().await?;
println!("please access to: {}", url);

// step 2. acquire user pin
println!("input pin: ");
let mut user_input = String::new();
io::stdin().read_line(&mut user_input).unwrap();
let pin = user_input.trim();

// step 3. acquire access token
let tokens = client.get_access_token_from_stored(pin).await?;
println!("your token is: {}", tokens.token);
println!("signed in as: {:?}", client.active_user());
# Ok(())
# }
```

## Basic usecase 2 - calling the API

```rust,no_run
use twitter_oauth1::{Client, ClientOptions, RequestOptions};

# async fn run() -> twitter_oauth1::Result<()> {
let client = Client::new(
    ClientOptions::new()
        .consumer("[CONSUMER_KEY]", "[CONSUMER_SECRET]")
        .access_token("[ACCESS_TOKEN]", "[TOKEN_SECRET]"),
);

let timeline = client
    .get(
        "/1.1/statuses/home_timeline.json",
        RequestOptions::new().query(&[("count", "5")]),
    )
    .await?
    .json::<serde_json::Value>()?;

client
    .post(
        "/1.1/statuses/update.json",
        RequestOptions::new().form(&[("status", "Hello, Twitter!")]),
    )
    .await?;
# Ok(())
# }
```

# Logging

Diagnostics go through [tracing](https://crates.io/crates/tracing). Secrets,
verifiers, signatures and the `Authorization` header are never recorded.
*/
mod client;
mod config;
mod error;
mod request;
mod secrets;
mod signer;
mod token_reader;
mod transport;

// exposed to external program
pub use client::{Client, OAuthClientProvider};
pub use config::ClientOptions;
pub use error::{Error, Result, SignError, SignResult, TokenReaderError, TokenReaderResult};
pub use request::RequestOptions;
pub use secrets::{Credentials, SecretsProvider, TokenPair};
pub use signer::{authorization, OAuthParameters, Signer};
pub use token_reader::{parse_form_response, ActiveUser, TokenReader, TokenResponse};
pub use transport::{HttpRequest, HttpResponse, Transport};

// exposed constant variables
/// Root of the Twitter API.
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com";
/// Content type sent when the caller does not override it.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
/// Represents `oauth_callback_confirmed`.
pub const OAUTH_CALLBACK_CONFIRMED_KEY: &str = "oauth_callback_confirmed";
/// Represents `user_id` in the access token response.
pub const USER_ID_KEY: &str = "user_id";
/// Represents `screen_name` in the access token response.
pub const SCREEN_NAME_KEY: &str = "screen_name";

// crate-private constant variables
pub(crate) const OAUTH_KEY_PREFIX: &str = "oauth_";
pub(crate) const REQUEST_TOKEN_PATH: &str = "/oauth/request_token";
pub(crate) const ACCESS_TOKEN_PATH: &str = "/oauth/access_token";
pub(crate) const AUTHORIZE_PATH: &str = "/oauth/authorize";
