use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;
use arcium_client::idl::arcium::types::CallbackAccount;

use crate::{
    ballot::{CastVote, InitSealBallotCompDef, SealBallotCallback, SealBallotOutput},
    error::ErrorCode,
    state::BallotCastEvent,
};

/// One-off job to create computation definition for `seal_ballot` in encrypted-ixs/src/lib.rs.
///
/// This initializes the onchain computation definition account that registers the encrypted
/// instruction. Must be called once before using the `seal_ballot` encrypted instruction.
pub fn init_seal_ballot_comp_def(ctx: Context<InitSealBallotCompDef>) -> Result<()> {
    init_comp_def(ctx.accounts, None, None)?;
    Ok(())
}

/// Casts the caller's encrypted vote.
///
/// The choice arrives as a single ciphertext encrypted under the voter's shared secret
/// with the cluster (1 = Goku, 2 = Vegeta, 3 = Gohan, 4 = Frieza by client convention;
/// the value itself is never range-checked here). The precondition check and the state
/// write happen together in this instruction: a voter whose ballot is already cast is
/// rejected with "Already voted" and nothing changes.
///
/// On success the raw input ciphertext is stored right away and the `seal_ballot`
/// computation is queued; its callback replaces the stored bytes with the
/// cluster-validated ciphertext re-encrypted to the voter.
///
/// # Arguments
/// * `choice` - Encrypted choice, one 32-byte ciphertext
/// * `encryption_pubkey` - Voter's public key for encryption
/// * `nonce` - Cryptographic nonce for the choice encryption
pub fn cast_vote(
    ctx: Context<CastVote>,
    computation_offset: u64,
    choice: [u8; 32],
    encryption_pubkey: [u8; 32],
    nonce: u128,
) -> Result<()> {
    let voter = ctx.accounts.payer.key();

    ctx.accounts.ballot_account.bump = ctx.bumps.ballot_account;
    ctx.accounts
        .ballot_account
        .record(voter, choice, encryption_pubkey, nonce)?;

    let computation_args = ArgBuilder::new()
        .x25519_pubkey(encryption_pubkey)
        .plaintext_u128(nonce)
        .encrypted_u32(choice)
        .build();

    ctx.accounts.sign_pda_account.bump = ctx.bumps.sign_pda_account;

    queue_computation(
        ctx.accounts,
        computation_offset,
        computation_args,
        None,
        vec![SealBallotCallback::callback_ix(
            computation_offset,
            &ctx.accounts.mxe_account,
            &[CallbackAccount {
                pubkey: ctx.accounts.ballot_account.key(),
                is_writable: true,
            }],
        )?],
        1,
        0,
    )?;
    Ok(())
}

pub fn seal_ballot_callback(
    ctx: Context<SealBallotCallback>,
    output: ComputationOutputs<SealBallotOutput>,
) -> Result<()> {
    let sealed = match output {
        ComputationOutputs::Success(SealBallotOutput { field_0 }) => field_0,
        _ => return Err(ErrorCode::AbortedComputation.into()),
    };

    let ballot = &mut ctx.accounts.ballot_account;
    ballot.seal(sealed.ciphertexts[0], sealed.encryption_key, sealed.nonce);

    let clock = Clock::get()?;
    emit!(BallotCastEvent {
        voter: ballot.voter,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
