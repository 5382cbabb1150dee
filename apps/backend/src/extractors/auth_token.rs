use actix_web::HttpRequest;

/// Header carrying the session credential. The game client sends its bearer
/// token in the nonstandard `X-Authorization` header, not `Authorization`.
pub const AUTH_HEADER: &str = "X-Authorization";

/// Extract the bearer token from the `X-Authorization` header, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTH_HEADER)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
