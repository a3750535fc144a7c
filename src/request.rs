use serde::Serialize;
use url::form_urlencoded;

use crate::{Error, Result, DEFAULT_CONTENT_TYPE};

/// Query, body and content type of one `get`/`post` call.
///
/// Serialization failures are kept until the request is sent, so the
/// builder methods can be chained.
#[derive(Debug, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    body: Vec<(String, String)>,
    content_type: Option<String>,
    error: Option<Error>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add query parameters.
    ///
    /// This method appends and does not overwrite.
    /// Calling `.query(&[("foo", "a"), ("foo", "b")])` gives `"foo=a&foo=b"`.
    ///
    /// # Note
    /// Values go on the URL exactly as given, without percent-encoding.
    /// Only the signature sees them encoded.
    pub fn query<T: Serialize + ?Sized>(mut self, query: &T) -> Self {
        match to_pairs(query) {
            Ok(mut pairs) => self.query.append(&mut pairs),
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// Add form body parameters.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Self {
        match to_pairs(form) {
            Ok(mut pairs) => self.body.append(&mut pairs),
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// Override the default `application/x-www-form-urlencoded` content type.
    pub fn content_type<T: Into<String>>(self, content_type: T) -> Self {
        RequestOptions {
            content_type: Some(content_type.into()),
            ..self
        }
    }

    pub(crate) fn into_parts(self) -> Result<PreparedParameters> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(PreparedParameters {
            query: self.query,
            body: self.body,
            content_type: self
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        })
    }
}

pub(crate) struct PreparedParameters {
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Vec<(String, String)>,
    pub(crate) content_type: String,
}

impl PreparedParameters {
    /// Every parameter that goes into the signature. Repeated keys are all
    /// kept, since each occurrence is sent.
    pub(crate) fn signature_parameters(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .chain(self.body.iter())
            .cloned()
            .collect()
    }

    /// `key=value&...` without any encoding.
    pub(crate) fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }
        let joined = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        Some(joined)
    }

    pub(crate) fn form_body(&self) -> Result<Option<String>> {
        if self.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_urlencoded::to_string(&self.body)?))
    }
}

fn to_pairs<T: Serialize + ?Sized>(value: &T) -> Result<Vec<(String, String)>> {
    let encoded = serde_urlencoded::to_string(value)?;
    Ok(form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .collect())
}
