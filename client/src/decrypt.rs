use std::collections::HashMap;
use std::sync::Arc;

use crate::cipher::BallotCipher;
use crate::error::ClientError;
use crate::types::VoteHandle;

/// Recovers plaintext choices for the owning session.
///
/// Possession of the session's shared secret is the decryption
/// authorization; a ciphertext from another owner fails. Results are
/// cached per handle so repeated requests within a session skip
/// re-authorization.
pub struct DecryptionAdapter {
    cipher: Arc<dyn BallotCipher>,
    cache: HashMap<VoteHandle, u32>,
}

impl DecryptionAdapter {
    pub fn new(cipher: Arc<dyn BallotCipher>) -> Self {
        Self {
            cipher,
            cache: HashMap::new(),
        }
    }

    /// Decrypts a batch of (handle, nonce) requests, returning the
    /// plaintext per handle. Fails on the zero handle - there is nothing
    /// to decrypt for a voter who never voted.
    pub fn decrypt(
        &mut self,
        requests: &[(VoteHandle, u128)],
    ) -> Result<HashMap<VoteHandle, u32>, ClientError> {
        let mut results = HashMap::new();
        for (handle, nonce) in requests {
            results.insert(*handle, self.decrypt_one(*handle, *nonce)?);
        }
        Ok(results)
    }

    /// Decrypts a single handle, consulting the cache first.
    pub fn decrypt_one(&mut self, handle: VoteHandle, nonce: u128) -> Result<u32, ClientError> {
        if handle.is_zero() {
            return Err(ClientError::ZeroHandle);
        }
        if let Some(cached) = self.cache.get(&handle) {
            return Ok(*cached);
        }
        let clear = self
            .cipher
            .decrypt(&handle.0, nonce)
            .map_err(ClientError::Decryption)?;
        self.cache.insert(handle, clear);
        Ok(clear)
    }

    /// The cached plaintext for a handle, if this session decrypted it.
    pub fn cached(&self, handle: &VoteHandle) -> Option<u32> {
        self.cache.get(handle).copied()
    }

    pub fn is_decrypted(&self, handle: &VoteHandle) -> bool {
        self.cache.contains_key(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{CipherError, InMemoryCipher};

    #[test]
    fn zero_handle_is_refused() {
        let mut adapter = DecryptionAdapter::new(Arc::new(InMemoryCipher::new(21)));

        let result = adapter.decrypt(&[(VoteHandle::ZERO, 0)]);

        assert!(matches!(result, Err(ClientError::ZeroHandle)));
    }

    #[test]
    fn owner_recovers_plaintext_and_result_is_cached() {
        let cipher = Arc::new(InMemoryCipher::new(22));
        let ciphertext = cipher.encrypt(3, 5).unwrap();
        let handle = VoteHandle(ciphertext);
        let mut adapter = DecryptionAdapter::new(cipher);

        let results = adapter.decrypt(&[(handle, 5)]).unwrap();

        assert_eq!(results.get(&handle), Some(&3));
        assert_eq!(adapter.cached(&handle), Some(3));
        assert!(adapter.is_decrypted(&handle));
    }

    #[test]
    fn foreign_ciphertext_is_unauthorized() {
        let alice = Arc::new(InMemoryCipher::new(23));
        let mallory = Arc::new(InMemoryCipher::new(24));
        let ciphertext = alice.encrypt(1, 9).unwrap();
        let mut adapter = DecryptionAdapter::new(mallory);

        let result = adapter.decrypt(&[(VoteHandle(ciphertext), 9)]);

        assert!(matches!(
            result,
            Err(ClientError::Decryption(CipherError::Unauthorized))
        ));
    }
}
