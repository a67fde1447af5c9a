//! HTTP Basic-auth verification for administrator endpoints.

use std::convert::Infallible;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use rollcall_core::store::RosterStore;

use crate::AppState;

/// Credentials accepted as the administrator for this server instance.
#[derive(Clone)]
pub struct AdminAuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Whether the request carried valid administrator credentials.
///
/// This extractor never rejects. Open endpoints can ignore it, and
/// privileged ones hand the flag to the operations that demand it; the 401
/// is produced where the privilege is actually exercised.
pub struct AdminClaim {
  pub is_admin: bool,
}

/// Verify Basic credentials from `headers` against `config`.
pub fn verify_admin(headers: &HeaderMap, config: &AdminAuthConfig) -> bool {
  let Some(header_val) = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };
  let Some(encoded) = header_val.strip_prefix("Basic ") else {
    return false;
  };
  let Ok(decoded) = B64.decode(encoded) else {
    return false;
  };
  let Ok(creds) = std::str::from_utf8(&decoded) else {
    return false;
  };
  let Some((username, password)) = creds.split_once(':') else {
    return false;
  };

  if username != config.username {
    return false;
  }
  let Ok(parsed_hash) = PasswordHash::new(&config.password_hash) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .is_ok()
}

impl<S> FromRequestParts<AppState<S>> for AdminClaim
where
  S: RosterStore + Clone + Send + Sync + 'static,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    Ok(Self {
      is_admin: verify_admin(&parts.headers, &state.auth),
    })
  }
}
