use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};

/// Opaque reference to a stored encrypted choice.
///
/// The all-zero handle marks a voter who has never voted; every real
/// ciphertext is non-zero. Handles are safe to read and pass around
/// publicly, only the owning session can recover the plaintext.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteHandle(pub [u8; 32]);

impl VoteHandle {
    pub const ZERO: VoteHandle = VoteHandle([0u8; 32]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl Default for VoteHandle {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A transient encrypted input: one ciphertext plus the key material that
/// binds it to a specific (program, voter) pair.
///
/// Treated as uninterpreted bytes everywhere in this crate; produced by
/// the encryption adapter and consumed exactly once by cast_vote.
#[derive(Clone, Debug)]
pub struct EncryptedChoice {
    /// Program the input is bound to
    pub program_id: Pubkey,
    /// Voter the input is bound to
    pub voter: Pubkey,
    /// The encrypted choice, one 32-byte ciphertext
    pub ciphertext: [u8; 32],
    /// The voter's x25519 public key for the shared-secret encryption
    pub encryption_pubkey: [u8; 32],
    /// Cryptographic nonce for this encryption
    pub nonce: u128,
}

/// Read-side view of one voter's ballot account.
///
/// A voter without a ballot PDA reads as [`BallotSnapshot::absent`]: the
/// zero handle with `has_voted == false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BallotSnapshot {
    pub handle: VoteHandle,
    pub encryption_pubkey: [u8; 32],
    pub nonce: u128,
    pub has_voted: bool,
}

impl BallotSnapshot {
    /// The not-voted state: zero handle, flag unset.
    pub fn absent() -> Self {
        Self {
            handle: VoteHandle::ZERO,
            encryption_pubkey: [0u8; 32],
            nonce: 0,
            has_voted: false,
        }
    }
}

impl From<&ballot::Ballot> for BallotSnapshot {
    fn from(account: &ballot::Ballot) -> Self {
        Self {
            handle: VoteHandle(account.encrypted_choice),
            encryption_pubkey: account.encryption_pubkey,
            nonce: account.nonce,
            has_voted: account.has_voted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_handle_is_zero() {
        assert!(VoteHandle::ZERO.is_zero());
        assert!(!VoteHandle([1u8; 32]).is_zero());
    }

    #[test]
    fn absent_snapshot_reads_as_not_voted() {
        let snapshot = BallotSnapshot::absent();
        assert!(!snapshot.has_voted);
        assert!(snapshot.handle.is_zero());
    }

    #[test]
    fn snapshot_mirrors_account_state() {
        let account = ballot::Ballot {
            bump: 1,
            voter: Pubkey::new_unique(),
            encrypted_choice: [5u8; 32],
            encryption_pubkey: [6u8; 32],
            nonce: 77,
            has_voted: true,
        };

        let snapshot = BallotSnapshot::from(&account);

        assert_eq!(snapshot.handle, VoteHandle([5u8; 32]));
        assert_eq!(snapshot.nonce, 77);
        assert!(snapshot.has_voted);
    }
}
