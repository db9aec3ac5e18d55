use thiserror::Error;

/// Errors from the shared-secret cipher session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// No active encryption session (no shared secret negotiated).
    #[error("no active encryption session")]
    NoSession,

    /// The ciphertext does not authenticate under this session's shared
    /// secret - it belongs to a different owner.
    #[error("ciphertext does not authenticate under this session's key")]
    Unauthorized,

    #[error("cipher failure: {0}")]
    Backend(String),
}

/// Seam to the external SDK's client cipher.
///
/// A session owns the x25519 shared secret negotiated with the cluster;
/// everything encrypted under it can only be recovered by the same
/// session. Possession of the shared secret is what authorizes
/// decryption, so `decrypt` doubles as the ownership check.
pub trait BallotCipher: Send + Sync {
    /// x25519 public key identifying this session's shared secret.
    fn public_key(&self) -> [u8; 32];

    /// Encrypts a plaintext choice under the session's shared secret.
    fn encrypt(&self, choice: u32, nonce: u128) -> Result<[u8; 32], CipherError>;

    /// Recovers a plaintext choice. Fails with [`CipherError::Unauthorized`]
    /// when the ciphertext was not produced under this session's secret.
    fn decrypt(&self, ciphertext: &[u8; 32], nonce: u128) -> Result<u32, CipherError>;
}

/// Deterministic stand-in for the SDK cipher, for local testing.
///
/// Not an encryption scheme: a keyed keystream with a 28-byte
/// authentication region, enough to make ciphertexts owner-bound and
/// non-zero. Plays the part the mock coprocessor plays in the source
/// project's local test setup.
pub struct InMemoryCipher {
    shared_secret: [u8; 32],
    public_key: [u8; 32],
}

impl InMemoryCipher {
    /// Derives a session deterministically from a seed, so tests can hand
    /// each voter their own keypair.
    pub fn new(seed: u64) -> Self {
        let shared_secret = expand(mix(seed ^ 0x5ec2_e75e_c2e7));
        let public_key = expand(mix(seed ^ 0x9ab1_1c9a_b11c));
        Self {
            shared_secret,
            public_key,
        }
    }

    fn keystream(&self, nonce: u128) -> [u8; 32] {
        let mut state = 0u64;
        for i in 0..4 {
            state = mix(state ^ lane(&self.shared_secret, i));
        }
        state = mix(state ^ nonce as u64);
        state = mix(state ^ (nonce >> 64) as u64);

        let mut out = [0u8; 32];
        for i in 0..4 {
            state = mix(state);
            out[i * 8..i * 8 + 8].copy_from_slice(&state.to_le_bytes());
        }
        out
    }
}

impl BallotCipher for InMemoryCipher {
    fn public_key(&self) -> [u8; 32] {
        self.public_key
    }

    fn encrypt(&self, choice: u32, nonce: u128) -> Result<[u8; 32], CipherError> {
        let mut ciphertext = self.keystream(nonce);
        let clear = choice.to_le_bytes();
        for i in 0..4 {
            ciphertext[i] ^= clear[i];
        }
        Ok(ciphertext)
    }

    fn decrypt(&self, ciphertext: &[u8; 32], nonce: u128) -> Result<u32, CipherError> {
        let keystream = self.keystream(nonce);
        if ciphertext[4..] != keystream[4..] {
            return Err(CipherError::Unauthorized);
        }
        let mut clear = [0u8; 4];
        for i in 0..4 {
            clear[i] = ciphertext[i] ^ keystream[i];
        }
        Ok(u32::from_le_bytes(clear))
    }
}

/// splitmix64 finalizer
fn mix(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn expand(seed: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut state = seed;
    for i in 0..4 {
        state = mix(state);
        out[i * 8..i * 8 + 8].copy_from_slice(&state.to_le_bytes());
    }
    out
}

fn lane(bytes: &[u8; 32], index: usize) -> u64 {
    let mut value = 0u64;
    for j in 0..8 {
        value |= (bytes[index * 8 + j] as u64) << (8 * j);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_round_trip() {
        let cipher = InMemoryCipher::new(1);
        let ciphertext = cipher.encrypt(3, 42).unwrap();
        assert_eq!(cipher.decrypt(&ciphertext, 42), Ok(3));
    }

    #[test]
    fn ciphertexts_are_never_the_zero_handle() {
        let cipher = InMemoryCipher::new(2);
        let ciphertext = cipher.encrypt(0, 0).unwrap();
        assert_ne!(ciphertext, [0u8; 32]);
    }

    #[test]
    fn other_sessions_cannot_decrypt() {
        let alice = InMemoryCipher::new(3);
        let mallory = InMemoryCipher::new(4);

        let ciphertext = alice.encrypt(2, 7).unwrap();

        assert_eq!(
            mallory.decrypt(&ciphertext, 7),
            Err(CipherError::Unauthorized)
        );
    }

    #[test]
    fn nonce_changes_the_ciphertext() {
        let cipher = InMemoryCipher::new(5);
        let first = cipher.encrypt(1, 1).unwrap();
        let second = cipher.encrypt(1, 2).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn sessions_are_deterministic_per_seed() {
        let a = InMemoryCipher::new(6);
        let b = InMemoryCipher::new(6);
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.encrypt(4, 9).unwrap(), b.encrypt(4, 9).unwrap());
    }
}
