// Stops Rust Analyzer complaining about missing configs
// See https://solana.stackexchange.com/questions/17777
#![allow(unexpected_cfgs)]
// Fix warning: use of deprecated method `anchor_lang::prelude::AccountInfo::<'a>::realloc`: Use AccountInfo::resize() instead
// See https://solana.stackexchange.com/questions/22979
#![allow(deprecated)]

use anchor_lang::prelude::*;
use arcium_anchor::prelude::*;

pub mod constants;
pub mod error;
pub mod handlers;
pub mod state;

use constants::*;
pub use error::ErrorCode;
pub use state::Ballot;

declare_id!("769KaNryNeHg8EpNqboFBZNV7sfDdn4dcyXrh62of4Es");

#[arcium_program]
pub mod ballot {
    use super::*;

    pub fn init_seal_ballot_comp_def(ctx: Context<InitSealBallotCompDef>) -> Result<()> {
        handlers::cast_vote::init_seal_ballot_comp_def(ctx)
    }

    pub fn cast_vote(
        ctx: Context<CastVote>,
        computation_offset: u64,
        choice: [u8; 32],
        encryption_pubkey: [u8; 32],
        nonce: u128,
    ) -> Result<()> {
        handlers::cast_vote::cast_vote(ctx, computation_offset, choice, encryption_pubkey, nonce)
    }

    #[arcium_callback(encrypted_ix = "seal_ballot")]
    pub fn seal_ballot_callback(
        ctx: Context<SealBallotCallback>,
        output: ComputationOutputs<SealBallotOutput>,
    ) -> Result<()> {
        handlers::cast_vote::seal_ballot_callback(ctx, output)
    }

    // Account struct definitions - these need to be inside the arcium_program module
    // so they can access the generated SignerAccount type

    #[init_computation_definition_accounts("seal_ballot", payer)]
    #[derive(Accounts)]
    pub struct InitSealBallotCompDef<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            mut,
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Box<Account<'info, MXEAccount>>,

        #[account(mut)]
        /// CHECK: comp_def_account, checked by arcium program.
        /// Can't check it here as it's not initialized yet.
        pub comp_def_account: UncheckedAccount<'info>,

        pub arcium_program: Program<'info, Arcium>,

        pub system_program: Program<'info, System>,
    }

    #[queue_computation_accounts("seal_ballot", payer)]
    #[derive(Accounts)]
    #[instruction(computation_offset: u64)]
    pub struct CastVote<'info> {
        #[account(mut)]
        pub payer: Signer<'info>,

        #[account(
            init_if_needed,
            space = 9,
            payer = payer,
            seeds = [&SIGN_PDA_SEED],
            bump,
            address = derive_sign_pda!(),
        )]
        pub sign_pda_account: Account<'info, SignerAccount>,

        #[account(
            address = derive_mxe_pda!()
        )]
        pub mxe_account: Account<'info, MXEAccount>,

        #[account(
            mut,
            address = derive_mempool_pda!()
        )]
        /// CHECK: mempool_account, checked by the arcium program
        pub mempool_account: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_execpool_pda!()
        )]
        /// CHECK: executing_pool, checked by the arcium program
        pub executing_pool: UncheckedAccount<'info>,

        #[account(
            mut,
            address = derive_comp_pda!(computation_offset)
        )]
        /// CHECK: computation_account, checked by the arcium program.
        pub computation_account: UncheckedAccount<'info>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SEAL_BALLOT)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(
            mut,
            address = derive_cluster_pda!(mxe_account, ErrorCode::ClusterNotSet)
        )]
        pub cluster_account: Account<'info, Cluster>,

        #[account(
            mut,
            address = ARCIUM_FEE_POOL_ACCOUNT_ADDRESS,
        )]
        pub pool_account: Account<'info, FeePool>,

        #[account(
            address = ARCIUM_CLOCK_ACCOUNT_ADDRESS,
        )]
        pub clock_account: Account<'info, ClockAccount>,

        pub system_program: Program<'info, System>,

        pub arcium_program: Program<'info, Arcium>,

        #[account(
            init_if_needed,
            payer = payer,
            space = 8 + Ballot::INIT_SPACE,
            seeds = [b"ballot", payer.key().as_ref()],
            bump,
        )]
        pub ballot_account: Account<'info, Ballot>,
    }

    #[callback_accounts("seal_ballot")]
    #[derive(Accounts)]
    pub struct SealBallotCallback<'info> {
        pub arcium_program: Program<'info, Arcium>,

        #[account(
            address = derive_comp_def_pda!(COMP_DEF_OFFSET_SEAL_BALLOT)
        )]
        pub comp_def_account: Account<'info, ComputationDefinitionAccount>,

        #[account(address = ::anchor_lang::solana_program::sysvar::instructions::ID)]
        /// CHECK: instructions_sysvar, checked by the account constraint
        pub instructions_sysvar: AccountInfo<'info>,

        /// CHECK: ballot_account, checked by the callback account key passed in queue_computation
        #[account(mut)]
        pub ballot_account: Account<'info, Ballot>,
    }
}

pub use ballot::{CastVote, InitSealBallotCompDef, SealBallotCallback, SealBallotOutput};
