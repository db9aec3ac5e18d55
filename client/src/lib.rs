//! Off-chain client for the encrypted ballot program.
//!
//! Orchestrates the full vote flow:
//! 1. Connect - Bind a voter key and an encryption session
//! 2. Encrypt - Build an encrypted input bound to (program, voter)
//! 3. Submit - Send the cast_vote transaction
//! 4. Confirm - Wait for the sealing computation to land
//! 5. Refresh - Refetch the stored ballot
//! 6. Decrypt - Recover the caller's own choice, on request
//!
//! The cryptography and the chain itself live behind two narrow seams:
//! [`cipher::BallotCipher`] (the external SDK's shared-secret cipher) and
//! [`ledger::VoteLedger`] (the execution environment). In-memory
//! implementations of both ship here so the lifecycle and the program
//! rules can be exercised without a cluster, the same way the source
//! project tests against a mock coprocessor.

pub mod characters;
pub mod cipher;
pub mod config;
pub mod decrypt;
pub mod deploy;
pub mod encrypt;
pub mod error;
pub mod flow;
pub mod ledger;
pub mod types;

pub use ballot::ID as BALLOT_PROGRAM_ID;
pub use characters::Character;
pub use cipher::{BallotCipher, CipherError, InMemoryCipher};
pub use config::ClientConfig;
pub use decrypt::DecryptionAdapter;
pub use deploy::ensure_registered;
pub use encrypt::EncryptionAdapter;
pub use error::ClientError;
pub use flow::{VoteFlow, VotePhase};
pub use ledger::{InMemoryLedger, LedgerError, Registration, TxSignature, VoteLedger};
pub use types::{BallotSnapshot, EncryptedChoice, VoteHandle};
