use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{ESCROW_SEED, VAULT_SEED};
use crate::error::EscrowError;
use crate::instructions::governance::forward_action;
use crate::state::{Factory, GovernanceAction, VestingEscrow, VotingAdapter};

/// Funds a deployed escrow from the owner's token account and turns
/// claiming on. `delegate` other than the default key additionally
/// wires an initial voting delegate through the adapter.
pub fn activate_vesting_escrow<'info>(
    ctx: Context<'_, '_, 'info, 'info, ActivateVestingEscrow<'info>>,
    amount: u64,
    delegate: Pubkey,
) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ctx.accounts.factory.owner,
        EscrowError::NotOwner
    );

    let escrow = &mut ctx.accounts.escrow;
    require!(!escrow.activated, EscrowError::AlreadyActivated);
    require!(amount > 0, EscrowError::ZeroAmount);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.owner_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;
    ctx.accounts.vault.reload()?;

    let escrow = &mut ctx.accounts.escrow;
    require!(
        ctx.accounts.vault.amount >= escrow.total_locked,
        EscrowError::InsufficientFunds
    );
    escrow.activated = true;

    emit!(VestingEscrowActivated {
        escrow: escrow.key(),
        recipient: escrow.recipient,
        amount,
    });

    if delegate != Pubkey::default() {
        let escrow = &ctx.accounts.escrow;
        let adapter = ctx
            .accounts
            .voting_adapter
            .as_ref()
            .ok_or(EscrowError::VotingAdapterNotSet)?;
        let governance_program = ctx
            .accounts
            .governance_program
            .as_ref()
            .ok_or(EscrowError::InvalidGovernanceProgram)?;
        forward_action(
            &ctx.accounts.factory,
            escrow,
            adapter,
            &governance_program.to_account_info(),
            ctx.bumps.escrow,
            &GovernanceAction::Delegate { delegate },
            ctx.remaining_accounts,
        )?;
    }
    Ok(())
}

#[derive(Accounts)]
pub struct ActivateVestingEscrow<'info> {
    pub factory: Account<'info, Factory>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, escrow.factory.as_ref(), &escrow.index.to_le_bytes()],
        bump,
        constraint = escrow.factory == factory.key() @ EscrowError::FactoryMismatch,
    )]
    pub escrow: Account<'info, VestingEscrow>,

    #[account(
        mut,
        seeds = [VAULT_SEED, escrow.key().as_ref()],
        bump,
        constraint = vault.mint == escrow.token_mint @ EscrowError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    #[account(
        mut,
        constraint = owner_token_account.mint == escrow.token_mint @ EscrowError::InvalidTokenMint,
        constraint = owner_token_account.owner == owner.key() @ EscrowError::InvalidTokenAccount,
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    pub voting_adapter: Option<Account<'info, VotingAdapter>>,

    /// CHECK: checked against the adapter's configured backend.
    pub governance_program: Option<UncheckedAccount<'info>>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct VestingEscrowActivated {
    pub escrow: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
}
