use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Already voted")]
    AlreadyVoted,
    #[msg("The computation was aborted")]
    AbortedComputation,
    #[msg("Cluster not set")]
    ClusterNotSet,
}
