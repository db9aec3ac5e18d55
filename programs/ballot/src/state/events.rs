use anchor_lang::prelude::*;

#[event]
pub struct BallotCastEvent {
    /// The voter whose sealed ballot was stored
    pub voter: Pubkey,
    pub timestamp: i64,
}
