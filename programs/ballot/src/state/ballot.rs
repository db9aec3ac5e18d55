use anchor_lang::prelude::*;

use crate::error::ErrorCode;

/// One voter's encrypted ballot, stored in a PDA seeded by the voter key.
///
/// A voter with no ballot PDA is in the not-voted state: reads treat the
/// missing account as the all-zero handle with `has_voted == false`.
#[account]
#[derive(InitSpace)]
pub struct Ballot {
    /// PDA bump seed
    pub bump: u8,
    /// The voter this ballot belongs to
    pub voter: Pubkey,
    /// The stored choice, a single 32-byte ciphertext
    pub encrypted_choice: [u8; 32],
    /// The voter's x25519 public key used for the shared-secret encryption
    pub encryption_pubkey: [u8; 32],
    /// Cryptographic nonce for the stored ciphertext
    pub nonce: u128,
    /// Flips exactly once, on this voter's first successful cast_vote
    pub has_voted: bool,
}

impl Ballot {
    /// Records the voter's encrypted choice.
    ///
    /// Fails with `AlreadyVoted` if this ballot was already cast; on
    /// success the flag and the stored handle flip together, so
    /// `has_voted` implies a non-zero ciphertext from this point on.
    pub fn record(
        &mut self,
        voter: Pubkey,
        encrypted_choice: [u8; 32],
        encryption_pubkey: [u8; 32],
        nonce: u128,
    ) -> Result<()> {
        require!(!self.has_voted, ErrorCode::AlreadyVoted);

        self.voter = voter;
        self.encrypted_choice = encrypted_choice;
        self.encryption_pubkey = encryption_pubkey;
        self.nonce = nonce;
        self.has_voted = true;

        Ok(())
    }

    /// Replaces the stored ciphertext with the sealed output of the MPC
    /// computation. Only meaningful after `record`.
    pub fn seal(
        &mut self,
        encrypted_choice: [u8; 32],
        encryption_pubkey: [u8; 32],
        nonce: u128,
    ) {
        self.encrypted_choice = encrypted_choice;
        self.encryption_pubkey = encryption_pubkey;
        self.nonce = nonce;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Ballot {
        Ballot {
            bump: 0,
            voter: Pubkey::default(),
            encrypted_choice: [0u8; 32],
            encryption_pubkey: [0u8; 32],
            nonce: 0,
            has_voted: false,
        }
    }

    #[test]
    fn fresh_ballot_is_unvoted_with_zero_handle() {
        let ballot = fresh();
        assert!(!ballot.has_voted);
        assert_eq!(ballot.encrypted_choice, [0u8; 32]);
    }

    #[test]
    fn record_sets_flag_and_handle_together() {
        let mut ballot = fresh();
        let voter = Pubkey::new_unique();

        ballot.record(voter, [7u8; 32], [9u8; 32], 42).unwrap();

        assert!(ballot.has_voted);
        assert_eq!(ballot.voter, voter);
        assert_eq!(ballot.encrypted_choice, [7u8; 32]);
        assert_eq!(ballot.encryption_pubkey, [9u8; 32]);
        assert_eq!(ballot.nonce, 42);
    }

    #[test]
    fn second_record_fails_and_leaves_first_ballot_intact() {
        let mut ballot = fresh();
        let voter = Pubkey::new_unique();
        ballot.record(voter, [7u8; 32], [9u8; 32], 42).unwrap();

        let result = ballot.record(voter, [8u8; 32], [10u8; 32], 43);

        assert_eq!(result, Err(ErrorCode::AlreadyVoted.into()));
        assert_eq!(ballot.encrypted_choice, [7u8; 32]);
        assert_eq!(ballot.nonce, 42);
    }

    #[test]
    fn ballots_of_distinct_voters_are_independent() {
        let mut alice = fresh();
        let mut bob = fresh();

        alice
            .record(Pubkey::new_unique(), [1u8; 32], [2u8; 32], 1)
            .unwrap();

        assert!(!bob.has_voted);
        assert_eq!(bob.encrypted_choice, [0u8; 32]);

        bob.record(Pubkey::new_unique(), [3u8; 32], [4u8; 32], 2)
            .unwrap();

        assert_eq!(alice.encrypted_choice, [1u8; 32]);
        assert_eq!(bob.encrypted_choice, [3u8; 32]);
    }

    #[test]
    fn seal_replaces_ciphertext_only_after_record() {
        let mut ballot = fresh();
        let voter = Pubkey::new_unique();
        ballot.record(voter, [7u8; 32], [9u8; 32], 42).unwrap();

        ballot.seal([11u8; 32], [12u8; 32], 99);

        assert!(ballot.has_voted);
        assert_eq!(ballot.voter, voter);
        assert_eq!(ballot.encrypted_choice, [11u8; 32]);
        assert_eq!(ballot.nonce, 99);
    }
}
