use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::invoke_signed;

use crate::constants::ESCROW_SEED;
use crate::error::EscrowError;
use crate::state::{
    governance_instruction, pass_through_metas, Factory, GovernanceAction, VestingEscrow,
    VotingAdapter,
};

/// Casts a vote on the classic voting system with the escrow's balance.
pub fn aragon_vote<'info>(
    ctx: Context<'_, '_, 'info, 'info, ForwardGovernance<'info>>,
    data: Vec<u8>,
) -> Result<()> {
    let action = GovernanceAction::decode(&data)?;
    require!(
        matches!(action, GovernanceAction::AragonVote { .. }),
        EscrowError::CalldataDecodeError
    );
    forward(ctx, &action)
}

/// Delegates the escrow's still-locked voting power through the
/// generic delegation contract.
pub fn delegate<'info>(
    ctx: Context<'_, '_, 'info, 'info, ForwardGovernance<'info>>,
    data: Vec<u8>,
) -> Result<()> {
    let action = GovernanceAction::decode(&data)?;
    require!(
        matches!(action, GovernanceAction::Delegate { .. }),
        EscrowError::CalldataDecodeError
    );
    forward(ctx, &action)
}

/// Registers an off-chain voting delegate in the delegate registry.
pub fn snapshot_set_delegate<'info>(
    ctx: Context<'_, '_, 'info, 'info, ForwardGovernance<'info>>,
    data: Vec<u8>,
) -> Result<()> {
    let action = GovernanceAction::decode(&data)?;
    require!(
        matches!(action, GovernanceAction::SnapshotSetDelegate { .. }),
        EscrowError::CalldataDecodeError
    );
    forward(ctx, &action)
}

fn forward<'info>(
    ctx: Context<'_, '_, 'info, 'info, ForwardGovernance<'info>>,
    action: &GovernanceAction,
) -> Result<()> {
    let escrow = &ctx.accounts.escrow;
    require_keys_eq!(
        ctx.accounts.recipient.key(),
        escrow.recipient,
        EscrowError::NotRecipient
    );
    require!(escrow.activated, EscrowError::NotActivated);

    forward_action(
        &ctx.accounts.factory,
        escrow,
        &ctx.accounts.voting_adapter,
        &ctx.accounts.governance_program.to_account_info(),
        ctx.bumps.escrow,
        action,
        ctx.remaining_accounts,
    )?;

    emit!(GovernanceActionForwarded {
        escrow: escrow.key(),
        voting_adapter: ctx.accounts.voting_adapter.key(),
        action: *action,
    });
    Ok(())
}

/// Resolves the adapter through the factory at call time (a factory
/// level adapter swap is immediately authoritative for every escrow),
/// then invokes the configured backend signed by the escrow PDA. Any
/// backend-specific accounts travel in `remaining`.
pub(crate) fn forward_action<'info>(
    factory: &Account<'info, Factory>,
    escrow: &Account<'info, VestingEscrow>,
    adapter: &Account<'info, VotingAdapter>,
    governance_program: &AccountInfo<'info>,
    escrow_bump: u8,
    action: &GovernanceAction,
    remaining: &[AccountInfo<'info>],
) -> Result<()> {
    require!(
        factory.voting_adapter != Pubkey::default(),
        EscrowError::VotingAdapterNotSet
    );
    require_keys_eq!(
        adapter.key(),
        factory.voting_adapter,
        EscrowError::AdapterMismatch
    );
    let backend = adapter.backend_for(action)?;
    require_keys_eq!(
        *governance_program.key,
        backend,
        EscrowError::InvalidGovernanceProgram
    );

    let metas = pass_through_metas(remaining);
    let ix = governance_instruction(backend, escrow.key(), action, &metas);

    let mut infos: Vec<AccountInfo<'info>> = Vec::with_capacity(remaining.len() + 2);
    infos.push(escrow.to_account_info());
    infos.push(governance_program.clone());
    infos.extend_from_slice(remaining);

    let factory_key = escrow.factory;
    let index_bytes = escrow.index.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        ESCROW_SEED,
        factory_key.as_ref(),
        &index_bytes,
        &[escrow_bump],
    ]];
    invoke_signed(&ix, &infos, signer_seeds)?;
    Ok(())
}

#[derive(Accounts)]
pub struct ForwardGovernance<'info> {
    pub factory: Account<'info, Factory>,

    #[account(
        seeds = [ESCROW_SEED, escrow.factory.as_ref(), &escrow.index.to_le_bytes()],
        bump,
        constraint = escrow.factory == factory.key() @ EscrowError::FactoryMismatch,
    )]
    pub escrow: Account<'info, VestingEscrow>,

    pub voting_adapter: Account<'info, VotingAdapter>,

    /// CHECK: checked against the adapter's configured backend.
    pub governance_program: UncheckedAccount<'info>,

    pub recipient: Signer<'info>,
}

#[event]
pub struct GovernanceActionForwarded {
    pub escrow: Pubkey,
    pub voting_adapter: Pubkey,
    pub action: GovernanceAction,
}
