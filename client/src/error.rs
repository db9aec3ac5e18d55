use thiserror::Error;

use crate::cipher::CipherError;
use crate::ledger::LedgerError;

/// Errors surfaced by the client adapters and the vote flow.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The connected voter's ballot is already cast.
    #[error("Already voted")]
    AlreadyVoted,

    /// A vote is already in flight for this session.
    #[error("A vote is already being processed")]
    Busy,

    /// No wallet session is connected.
    #[error("No wallet session connected")]
    NotConnected,

    /// The ballot program is not available on the current network.
    #[error("Ballot program unavailable on this network")]
    NoBinding,

    /// Choice ids must be positive.
    #[error("Invalid choice id: {0}")]
    InvalidChoice(u32),

    /// The zero handle marks a voter who never voted; there is nothing to
    /// decrypt.
    #[error("Nothing to decrypt: zero handle")]
    ZeroHandle,

    #[error("Encryption failed: {0}")]
    Encryption(#[source] CipherError),

    #[error("Decryption failed: {0}")]
    Decryption(#[source] CipherError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
