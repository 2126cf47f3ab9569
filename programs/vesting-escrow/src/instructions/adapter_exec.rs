use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::invoke;

use crate::error::EscrowError;
use crate::state::{
    governance_instruction, pass_through_metas, GovernanceAction, VotingAdapter,
};

/// Direct adapter entrypoints: decode opaque calldata and execute it
/// against the matching backend on behalf of the calling signer. Used
/// by holders acting for their own balance, without an escrow in the
/// middle.
pub fn adapter_aragon_vote<'info>(
    ctx: Context<'_, '_, 'info, 'info, AdapterExec<'info>>,
    data: Vec<u8>,
) -> Result<()> {
    let action = GovernanceAction::decode(&data)?;
    require!(
        matches!(action, GovernanceAction::AragonVote { .. }),
        EscrowError::CalldataDecodeError
    );
    execute(ctx, &action)
}

pub fn adapter_delegate<'info>(
    ctx: Context<'_, '_, 'info, 'info, AdapterExec<'info>>,
    data: Vec<u8>,
) -> Result<()> {
    let action = GovernanceAction::decode(&data)?;
    require!(
        matches!(action, GovernanceAction::Delegate { .. }),
        EscrowError::CalldataDecodeError
    );
    execute(ctx, &action)
}

pub fn adapter_snapshot_set_delegate<'info>(
    ctx: Context<'_, '_, 'info, 'info, AdapterExec<'info>>,
    data: Vec<u8>,
) -> Result<()> {
    let action = GovernanceAction::decode(&data)?;
    require!(
        matches!(action, GovernanceAction::SnapshotSetDelegate { .. }),
        EscrowError::CalldataDecodeError
    );
    execute(ctx, &action)
}

fn execute<'info>(
    ctx: Context<'_, '_, 'info, 'info, AdapterExec<'info>>,
    action: &GovernanceAction,
) -> Result<()> {
    let adapter = &ctx.accounts.voting_adapter;
    let backend = adapter.backend_for(action)?;
    require_keys_eq!(
        ctx.accounts.governance_program.key(),
        backend,
        EscrowError::InvalidGovernanceProgram
    );

    let metas = pass_through_metas(ctx.remaining_accounts);
    let ix = governance_instruction(backend, ctx.accounts.caller.key(), action, &metas);

    let mut infos: Vec<AccountInfo<'info>> = Vec::with_capacity(ctx.remaining_accounts.len() + 2);
    infos.push(ctx.accounts.caller.to_account_info());
    infos.push(ctx.accounts.governance_program.to_account_info());
    infos.extend_from_slice(ctx.remaining_accounts);

    // the caller signed the transaction; their signature carries into the CPI
    invoke(&ix, &infos)?;

    emit!(AdapterActionExecuted {
        voting_adapter: adapter.key(),
        authority: ctx.accounts.caller.key(),
        action: *action,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AdapterExec<'info> {
    pub voting_adapter: Account<'info, VotingAdapter>,

    /// CHECK: checked against the adapter's configured backend.
    pub governance_program: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}

#[event]
pub struct AdapterActionExecuted {
    pub voting_adapter: Pubkey,
    pub authority: Pubkey,
    pub action: GovernanceAction,
}
