use std::sync::Arc;

use anchor_lang::prelude::Pubkey;

use crate::cipher::BallotCipher;
use crate::error::ClientError;
use crate::types::EncryptedChoice;

/// Builds encrypted inputs bound to one (program, voter) pair.
///
/// The ciphertext itself comes from the session cipher; the adapter adds
/// the per-ballot nonce and the binding, so the result can neither be
/// replayed against another program nor submitted for another voter.
#[derive(Clone)]
pub struct EncryptionAdapter {
    program_id: Pubkey,
    voter: Pubkey,
    cipher: Arc<dyn BallotCipher>,
}

impl EncryptionAdapter {
    pub fn new(program_id: Pubkey, voter: Pubkey, cipher: Arc<dyn BallotCipher>) -> Self {
        Self {
            program_id,
            voter,
            cipher,
        }
    }

    /// Encrypts a plaintext choice into a one-shot encrypted input.
    pub fn encrypt_choice(&self, choice: u32) -> Result<EncryptedChoice, ClientError> {
        let nonce: u128 = rand::random();
        let ciphertext = self
            .cipher
            .encrypt(choice, nonce)
            .map_err(ClientError::Encryption)?;

        Ok(EncryptedChoice {
            program_id: self.program_id,
            voter: self.voter,
            ciphertext,
            encryption_pubkey: self.cipher.public_key(),
            nonce,
        })
    }
}
