use anchor_lang::prelude::*;

use crate::constants::VOTING_ADAPTER_SEED;
use crate::state::VotingAdapter;

/// Creates an adapter instance. Backend program ids are fixed for the
/// adapter's lifetime; swapping backends means deploying a new adapter
/// and pointing the factory at it.
pub fn initialize_voting_adapter(
    ctx: Context<InitializeVotingAdapter>,
    seed: u64,
    voting_contract: Pubkey,
    snapshot_delegate_contract: Pubkey,
    delegation_contract: Pubkey,
) -> Result<()> {
    let adapter = &mut ctx.accounts.voting_adapter;
    adapter.voting_contract = voting_contract;
    adapter.snapshot_delegate_contract = snapshot_delegate_contract;
    adapter.delegation_contract = delegation_contract;
    adapter.owner = ctx.accounts.owner.key();
    adapter.pending_owner = Pubkey::default();
    adapter.seed = seed;

    emit!(VotingAdapterInitialized {
        voting_adapter: adapter.key(),
        voting_contract,
        snapshot_delegate_contract,
        delegation_contract,
        owner: adapter.owner,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct InitializeVotingAdapter<'info> {
    #[account(
        init,
        payer = owner,
        space = 8 + VotingAdapter::SIZE,
        seeds = [VOTING_ADAPTER_SEED, &seed.to_le_bytes()],
        bump
    )]
    pub voting_adapter: Account<'info, VotingAdapter>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct VotingAdapterInitialized {
    pub voting_adapter: Pubkey,
    pub voting_contract: Pubkey,
    pub snapshot_delegate_contract: Pubkey,
    pub delegation_contract: Pubkey,
    pub owner: Pubkey,
}
