use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::types::{BallotSnapshot, EncryptedChoice};

/// Errors from the execution environment.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The program rejected the transaction (a revert). Carries the
    /// program's error message, e.g. "Already voted".
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// The program binding is missing on this network (not deployed, or
    /// its computation definition not registered).
    #[error("Program binding unavailable: {0}")]
    Unavailable(String),

    #[error("Confirmation failed: {0}")]
    Confirmation(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Receipt for a submitted vote transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TxSignature(pub [u8; 64]);

/// Outcome of the one-off program registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Address the program is registered under
    pub program: Pubkey,
    /// False when the registration already existed and the call was a no-op
    pub newly_created: bool,
}

/// Seam to the execution environment that serializes and persists
/// state-mutating calls.
///
/// A production binding would speak RPC to a cluster; the in-memory
/// implementation below enforces the same observable contract for
/// hermetic tests.
#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// One-off registration of the `seal_ballot` computation definition.
    /// Registering an already-registered program is a no-op.
    async fn register(&self) -> Result<Registration, LedgerError>;

    /// Submits an encrypted vote for inclusion.
    async fn submit_vote(&self, input: &EncryptedChoice) -> Result<TxSignature, LedgerError>;

    /// Waits until the given submission is final, i.e. the sealing
    /// callback has run.
    async fn confirm(&self, signature: TxSignature) -> Result<(), LedgerError>;

    /// Reads a voter's ballot account. `None` means the account does not
    /// exist - the zero handle / not-voted state.
    async fn fetch_ballot(&self, voter: Pubkey) -> Result<Option<BallotSnapshot>, LedgerError>;
}

/// In-memory execution environment for local testing.
///
/// Runs the real `Ballot` state transition against a map of accounts, so
/// the single-vote rule and the stored-handle semantics are exactly the
/// program's. Sealing is the identity here: the mock cluster hands back
/// the ciphertext it was given, which the submitting session can already
/// decrypt. This is the role the mock coprocessor plays in the source
/// project's test suite.
pub struct InMemoryLedger {
    ballots: Arc<RwLock<HashMap<Pubkey, ballot::Ballot>>>,
    confirmed: Arc<RwLock<HashSet<TxSignature>>>,
    registered: Arc<RwLock<bool>>,
    next_signature: Arc<RwLock<u64>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            ballots: Arc::new(RwLock::new(HashMap::new())),
            confirmed: Arc::new(RwLock::new(HashSet::new())),
            registered: Arc::new(RwLock::new(false)),
            next_signature: Arc::new(RwLock::new(0)),
        }
    }

    fn blank_ballot() -> ballot::Ballot {
        ballot::Ballot {
            bump: 0,
            voter: Pubkey::default(),
            encrypted_choice: [0u8; 32],
            encryption_pubkey: [0u8; 32],
            nonce: 0,
            has_voted: false,
        }
    }

    async fn mint_signature(&self) -> TxSignature {
        let mut counter = self.next_signature.write().await;
        *counter += 1;
        let mut bytes = [0u8; 64];
        bytes[..8].copy_from_slice(&counter.to_le_bytes());
        TxSignature(bytes)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoteLedger for InMemoryLedger {
    async fn register(&self) -> Result<Registration, LedgerError> {
        let mut registered = self.registered.write().await;
        let newly_created = !*registered;
        *registered = true;
        Ok(Registration {
            program: ballot::ID,
            newly_created,
        })
    }

    async fn submit_vote(&self, input: &EncryptedChoice) -> Result<TxSignature, LedgerError> {
        if !*self.registered.read().await {
            return Err(LedgerError::Unavailable(
                "computation definition not registered".into(),
            ));
        }
        if input.program_id != ballot::ID {
            return Err(LedgerError::Unavailable(format!(
                "unknown program {}",
                input.program_id
            )));
        }

        let mut ballots = self.ballots.write().await;
        let account = ballots.entry(input.voter).or_insert_with(Self::blank_ballot);
        account
            .record(
                input.voter,
                input.ciphertext,
                input.encryption_pubkey,
                input.nonce,
            )
            .map_err(|_| LedgerError::Rejected("Already voted".into()))?;
        drop(ballots);

        let signature = self.mint_signature().await;
        self.confirmed.write().await.insert(signature);
        Ok(signature)
    }

    async fn confirm(&self, signature: TxSignature) -> Result<(), LedgerError> {
        if self.confirmed.read().await.contains(&signature) {
            Ok(())
        } else {
            Err(LedgerError::Confirmation("unknown signature".into()))
        }
    }

    async fn fetch_ballot(&self, voter: Pubkey) -> Result<Option<BallotSnapshot>, LedgerError> {
        let ballots = self.ballots.read().await;
        Ok(ballots.get(&voter).map(BallotSnapshot::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_of_unknown_voter_is_none() {
        let ledger = InMemoryLedger::new();
        let snapshot = ledger.fetch_ballot(Pubkey::new_unique()).await.unwrap();
        assert_eq!(snapshot, None);
    }

    #[tokio::test]
    async fn registration_is_idempotent() {
        let ledger = InMemoryLedger::new();

        let first = ledger.register().await.unwrap();
        let second = ledger.register().await.unwrap();

        assert!(first.newly_created);
        assert!(!second.newly_created);
        assert_eq!(first.program, second.program);
    }

    #[tokio::test]
    async fn submission_requires_registration() {
        let ledger = InMemoryLedger::new();
        let input = EncryptedChoice {
            program_id: ballot::ID,
            voter: Pubkey::new_unique(),
            ciphertext: [1u8; 32],
            encryption_pubkey: [2u8; 32],
            nonce: 3,
        };

        let result = ledger.submit_vote(&input).await;

        assert!(matches!(result, Err(LedgerError::Unavailable(_))));
    }
}
