//! Password hashing and signed access tokens.
//!
//! Passwords are stored as PBKDF2-SHA256 PHC strings. Access tokens are
//! opaque bearer credentials: a base64url payload (`usuario_id.expiry`)
//! plus an HMAC-SHA256 signature over it, verified in constant time.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use pbkdf2::password_hash::rand_core::OsRng;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use sha2::Sha256;

use crate::errors::ServiceError;

type HmacSha256 = Hmac<Sha256>;

/// Hash a plaintext password with a fresh random salt.
pub fn hash_senha(senha: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Pbkdf2
        .hash_password(senha.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored PHC hash string.
/// An unparseable hash counts as a mismatch.
pub fn verificar_senha(senha: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Pbkdf2.verify_password(senha.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

/// Issues and verifies signed, expiring access tokens bound to a user id.
pub struct TokenSigner {
    secret: Vec<u8>,
    expiry_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            expiry_secs,
        }
    }

    fn mac_for(&self, payload: &[u8]) -> HmacSha256 {
        // HMAC accepts keys of any length.
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC key of any length");
        mac.update(payload);
        mac
    }

    /// Issue a token for the given user, expiring `expiry_secs` from now.
    pub fn issue(&self, usuario_id: i64) -> String {
        let expira_em = chrono::Utc::now().timestamp() + self.expiry_secs;
        let payload = format!("{usuario_id}.{expira_em}");
        let assinatura = self.mac_for(payload.as_bytes()).finalize().into_bytes();
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            URL_SAFE_NO_PAD.encode(assinatura)
        )
    }

    /// Verify a token and return the user id it is bound to.
    pub fn verify(&self, token: &str) -> Result<i64, ServiceError> {
        let invalido = || ServiceError::Authentication("Invalid or malformed token".into());

        let (payload_b64, assinatura_b64) = token.split_once('.').ok_or_else(invalido)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| invalido())?;
        let assinatura = URL_SAFE_NO_PAD
            .decode(assinatura_b64)
            .map_err(|_| invalido())?;

        self.mac_for(&payload)
            .verify_slice(&assinatura)
            .map_err(|_| invalido())?;

        let payload = String::from_utf8(payload).map_err(|_| invalido())?;
        let (usuario_id, expira_em) = payload.split_once('.').ok_or_else(invalido)?;
        let usuario_id: i64 = usuario_id.parse().map_err(|_| invalido())?;
        let expira_em: i64 = expira_em.parse().map_err(|_| invalido())?;

        if chrono::Utc::now().timestamp() >= expira_em {
            return Err(ServiceError::Authentication("Token expired".into()));
        }

        Ok(usuario_id)
    }
}
