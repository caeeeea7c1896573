use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::convert::Infallible;

/// ForwardedCookie Extractor Result
///
/// The browser's raw `Cookie` header, if any. The gateway never reads the session out of
/// it; it is passed through verbatim to the parking backend's session check so the
/// backend can resolve its own session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardedCookie(pub Option<String>);

impl ForwardedCookie {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// ForwardedCookie Extractor Implementation
///
/// Never rejects. A missing or non-UTF-8 header becomes `None`, and the guard's
/// session check then decides (fail-closed) what an anonymous caller may see.
impl<S> FromRequestParts<S> for ForwardedCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(ForwardedCookie(cookie))
    }
}
