use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cipher::BallotCipher;
use crate::decrypt::DecryptionAdapter;
use crate::encrypt::EncryptionAdapter;
use crate::error::ClientError;
use crate::ledger::VoteLedger;
use crate::types::{BallotSnapshot, VoteHandle};

/// Phase of a vote attempt. One attempt is in flight at a time; every
/// failure path lands back in `Idle` carrying a status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotePhase {
    Idle,
    Encrypting,
    Submitting,
    Confirming,
    Refreshing,
}

struct Session {
    voter: Pubkey,
    cipher: Arc<dyn BallotCipher>,
    decryption: DecryptionAdapter,
}

/// Vote lifecycle orchestration.
///
/// Sequences connect -> encrypt -> submit -> confirm -> refresh ->
/// decrypt against the [`VoteLedger`] seam and exposes the derived UI
/// state: the current phase, a human-readable status message, and the
/// `can_vote` / `can_decrypt` affordances. All failures are caught here,
/// turned into the status message, and followed by a refetch so local
/// state tracks on-chain truth - the flow never stays processing.
pub struct VoteFlow {
    ledger: Arc<dyn VoteLedger>,
    binding: Option<Pubkey>,
    session: Option<Session>,
    phase: VotePhase,
    message: String,
    ballot: BallotSnapshot,
}

impl VoteFlow {
    /// `binding` is the ballot program's address on the current network;
    /// `None` disables the vote and decrypt affordances.
    pub fn new(ledger: Arc<dyn VoteLedger>, binding: Option<Pubkey>) -> Self {
        Self {
            ledger,
            binding,
            session: None,
            phase: VotePhase::Idle,
            message: String::new(),
            ballot: BallotSnapshot::absent(),
        }
    }

    /// Binds a voter key and its encryption session. Resets the status
    /// message and any state carried over from a previous account.
    pub fn connect(&mut self, voter: Pubkey, cipher: Arc<dyn BallotCipher>) {
        debug!(%voter, "session connected");
        self.session = Some(Session {
            voter,
            cipher: cipher.clone(),
            decryption: DecryptionAdapter::new(cipher),
        });
        self.message.clear();
        self.ballot = BallotSnapshot::absent();
    }

    pub fn disconnect(&mut self) {
        self.session = None;
        self.message.clear();
        self.ballot = BallotSnapshot::absent();
    }

    pub fn phase(&self) -> VotePhase {
        self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_processing(&self) -> bool {
        self.phase != VotePhase::Idle
    }

    pub fn voter(&self) -> Option<Pubkey> {
        self.session.as_ref().map(|session| session.voter)
    }

    /// The connected voter's stored handle, zero if never voted.
    pub fn handle(&self) -> VoteHandle {
        self.ballot.handle
    }

    pub fn has_voted(&self) -> bool {
        self.ballot.has_voted
    }

    /// The decrypted choice, if this session has decrypted its ballot.
    pub fn decrypted_choice(&self) -> Option<u32> {
        let session = self.session.as_ref()?;
        session.decryption.cached(&self.ballot.handle)
    }

    /// Connected, idle, not yet voted, and the program binding present.
    /// The encryption session comes with the connection, so "connected"
    /// covers the cipher availability too.
    pub fn can_vote(&self) -> bool {
        self.binding.is_some()
            && self.session.is_some()
            && !self.is_processing()
            && !self.ballot.has_voted
    }

    /// A non-zero handle exists and this session has not decrypted it yet.
    pub fn can_decrypt(&self) -> bool {
        match &self.session {
            Some(session) => {
                self.binding.is_some()
                    && !self.ballot.handle.is_zero()
                    && !session.decryption.is_decrypted(&self.ballot.handle)
            }
            None => false,
        }
    }

    /// Refetches the connected voter's ballot from the ledger.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let voter = match &self.session {
            Some(session) => session.voter,
            None => return self.refuse(ClientError::NotConnected),
        };

        self.phase = VotePhase::Refreshing;
        let result = self.ledger.fetch_ballot(voter).await;
        self.phase = VotePhase::Idle;

        match result {
            Ok(snapshot) => {
                self.ballot = snapshot.unwrap_or_else(BallotSnapshot::absent);
                Ok(())
            }
            Err(error) => {
                self.message = format!("refresh failed: {error}");
                Err(error.into())
            }
        }
    }

    /// Casts an encrypted vote for `choice`.
    ///
    /// Refuses to start while processing, disconnected, already voted, or
    /// for a non-positive choice id. After any failure the ballot is
    /// refetched so `has_voted` reflects on-chain truth.
    pub async fn cast_vote(&mut self, choice: u32) -> Result<(), ClientError> {
        if self.is_processing() {
            return self.refuse(ClientError::Busy);
        }
        let voter = match &self.session {
            Some(session) => session.voter,
            None => return self.refuse(ClientError::NotConnected),
        };
        if self.binding.is_none() {
            return self.refuse(ClientError::NoBinding);
        }
        if self.ballot.has_voted {
            return self.refuse(ClientError::AlreadyVoted);
        }
        if choice == 0 {
            return self.refuse(ClientError::InvalidChoice(choice));
        }

        self.message = format!("Starting vote({choice})...");
        let outcome = self.run_vote(voter, choice).await;
        self.phase = VotePhase::Idle;

        match &outcome {
            Ok(()) => {
                info!(%voter, choice, "vote confirmed");
                self.message = format!("Vote({choice}) completed");
            }
            Err(error) => {
                self.message = format!("vote failed: {error}");
                // reconcile with on-chain state; a failed submission must
                // not leave a stale local flag either way
                if let Ok(snapshot) = self.ledger.fetch_ballot(voter).await {
                    self.ballot = snapshot.unwrap_or_else(BallotSnapshot::absent);
                }
            }
        }
        outcome
    }

    async fn run_vote(&mut self, voter: Pubkey, choice: u32) -> Result<(), ClientError> {
        let program_id = self.binding.ok_or(ClientError::NoBinding)?;
        let cipher = match &self.session {
            Some(session) => session.cipher.clone(),
            None => return Err(ClientError::NotConnected),
        };

        self.phase = VotePhase::Encrypting;
        self.message = "Encrypting choice...".into();
        let encryption = EncryptionAdapter::new(program_id, voter, cipher);
        let input = encryption.encrypt_choice(choice)?;

        self.phase = VotePhase::Submitting;
        self.message = "Submitting transaction...".into();
        let signature = self.ledger.submit_vote(&input).await?;

        self.phase = VotePhase::Confirming;
        self.message = "Waiting for transaction...".into();
        self.ledger.confirm(signature).await?;

        self.phase = VotePhase::Refreshing;
        let snapshot = self.ledger.fetch_ballot(voter).await?;
        self.ballot = snapshot.unwrap_or_else(BallotSnapshot::absent);
        Ok(())
    }

    /// Decrypts the connected voter's own stored choice.
    pub async fn decrypt_my_vote(&mut self) -> Result<u32, ClientError> {
        let handle = self.ballot.handle;
        let nonce = self.ballot.nonce;
        let session = match &mut self.session {
            None => return Err(self.set_failure(ClientError::NotConnected)),
            Some(session) => session,
        };

        let result = session.decryption.decrypt_one(handle, nonce);
        match result {
            Ok(clear) => {
                self.message = format!("Decrypted vote: {clear}");
                Ok(clear)
            }
            Err(error) => Err(self.set_failure(error)),
        }
    }

    fn refuse(&mut self, error: ClientError) -> Result<(), ClientError> {
        self.message = error.to_string();
        Err(error)
    }

    fn set_failure(&mut self, error: ClientError) -> ClientError {
        self.message = format!("decrypt failed: {error}");
        error
    }
}
