//! File payload decryption
//!
//! Shared files arrive as base64 of `nonce || ciphertext`, sealed with
//! AES-256-GCM under a key derived from the application's private key with
//! HKDF-SHA256. The private key itself never leaves the process.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hkdf::Hkdf;
use sha2::Sha256;

use crate::auth::PrivateKey;
use crate::constants::envelope;
use crate::errors::{DecryptError, DecryptResult};

/// Decrypts file payloads for one private key
#[derive(Clone)]
pub struct FileDecryptor {
    cipher: Aes256Gcm,
}

impl FileDecryptor {
    /// Derive the file key from the private key
    ///
    /// # Errors
    ///
    /// Returns `DecryptError::KeyDerivation` if the key cannot be expanded
    pub fn new(private_key: &PrivateKey) -> DecryptResult<Self> {
        let hkdf = Hkdf::<Sha256>::new(None, private_key.as_bytes());
        let mut key = [0u8; envelope::KEY_LENGTH];
        hkdf.expand(envelope::KEY_INFO, &mut key)
            .map_err(|_| DecryptError::KeyDerivation)?;

        let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| DecryptError::KeyDerivation)?;
        Ok(Self { cipher })
    }

    /// Decode and decrypt a base64 payload
    pub fn decrypt_base64(&self, encoded: &str) -> DecryptResult<Vec<u8>> {
        let payload = STANDARD.decode(encoded.trim())?;
        self.decrypt(&payload)
    }

    /// Decrypt a raw `nonce || ciphertext` payload
    pub fn decrypt(&self, payload: &[u8]) -> DecryptResult<Vec<u8>> {
        if payload.len() < envelope::NONCE_LENGTH {
            return Err(DecryptError::Truncated {
                length: payload.len(),
            });
        }

        let (nonce, ciphertext) = payload.split_at(envelope::NONCE_LENGTH);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| DecryptError::Authentication)
    }

    /// Seal a payload the way the platform does, base64-encoded
    #[cfg(test)]
    pub(crate) fn seal_base64(
        &self,
        nonce: [u8; envelope::NONCE_LENGTH],
        plaintext: &[u8],
    ) -> String {
        let mut payload = nonce.to_vec();
        let ciphertext = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .unwrap();
        payload.extend_from_slice(&ciphertext);
        STANDARD.encode(payload)
    }
}
