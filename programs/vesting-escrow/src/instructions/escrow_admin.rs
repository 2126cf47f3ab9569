use anchor_lang::prelude::*;

use crate::constants::ESCROW_SEED;
use crate::error::EscrowError;
use crate::state::VestingEscrow;
use crate::utils::ownable::TwoStepOwned;

pub fn commit_transfer_ownership(ctx: Context<EscrowAdmin>, candidate: Pubkey) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    escrow.commit_transfer_ownership(ctx.accounts.caller.key(), candidate)?;
    emit!(OwnershipCommitted {
        account: escrow.key(),
        candidate,
    });
    Ok(())
}

pub fn apply_transfer_ownership(ctx: Context<EscrowAdmin>) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    escrow.apply_transfer_ownership(ctx.accounts.caller.key())?;
    emit!(OwnershipApplied {
        account: escrow.key(),
        new_owner: escrow.owner,
    });
    Ok(())
}

pub fn renounce_ownership(ctx: Context<EscrowAdmin>) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    escrow.renounce_ownership(ctx.accounts.caller.key())?;
    emit!(OwnershipRenounced {
        account: escrow.key(),
    });
    Ok(())
}

/// Owner-only, single step; the default key disables the role.
pub fn change_manager(ctx: Context<EscrowAdmin>, new_manager: Pubkey) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    require_keys_eq!(
        ctx.accounts.caller.key(),
        escrow.owner,
        EscrowError::NotOwner
    );
    let old_manager = escrow.manager;
    escrow.manager = new_manager;
    emit!(ManagerChanged {
        account: escrow.key(),
        old_manager,
        new_manager,
    });
    Ok(())
}

/// The recipient nominates a replacement for their own role; the same
/// two-step shape as ownership so a typo cannot strand the grant.
pub fn commit_transfer_recipient(ctx: Context<EscrowAdmin>, candidate: Pubkey) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    require_keys_eq!(
        ctx.accounts.caller.key(),
        escrow.recipient,
        EscrowError::NotRecipient
    );
    require!(candidate != Pubkey::default(), EscrowError::ZeroRecipient);
    escrow.pending_recipient = candidate;
    emit!(RecipientCommitted {
        escrow: escrow.key(),
        candidate,
    });
    Ok(())
}

pub fn apply_transfer_recipient(ctx: Context<EscrowAdmin>) -> Result<()> {
    let escrow = &mut ctx.accounts.escrow;
    let pending = escrow.pending_recipient;
    require!(
        pending != Pubkey::default() && ctx.accounts.caller.key() == pending,
        EscrowError::NotPendingRecipient
    );
    escrow.recipient = pending;
    escrow.pending_recipient = Pubkey::default();
    emit!(RecipientChanged {
        escrow: escrow.key(),
        new_recipient: pending,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct EscrowAdmin<'info> {
    #[account(
        mut,
        seeds = [ESCROW_SEED, escrow.factory.as_ref(), &escrow.index.to_le_bytes()],
        bump
    )]
    pub escrow: Account<'info, VestingEscrow>,

    pub caller: Signer<'info>,
}

#[event]
pub struct OwnershipCommitted {
    pub account: Pubkey,
    pub candidate: Pubkey,
}

#[event]
pub struct OwnershipApplied {
    pub account: Pubkey,
    pub new_owner: Pubkey,
}

#[event]
pub struct OwnershipRenounced {
    pub account: Pubkey,
}

#[event]
pub struct ManagerChanged {
    pub account: Pubkey,
    pub old_manager: Pubkey,
    pub new_manager: Pubkey,
}

#[event]
pub struct RecipientCommitted {
    pub escrow: Pubkey,
    pub candidate: Pubkey,
}

#[event]
pub struct RecipientChanged {
    pub escrow: Pubkey,
    pub new_recipient: Pubkey,
}
