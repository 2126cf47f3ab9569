use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{ESCROW_SEED, VAULT_SEED};
use crate::error::EscrowError;
use crate::state::VestingEscrow;

/// Claws back the still-locked remainder and freezes the vesting
/// ceiling at the current timestamp. Already-vested tokens stay with
/// the escrow for the recipient to claim (still behind the cliff).
pub fn revoke_unvested(ctx: Context<RevokeUnvested>) -> Result<()> {
    let escrow_ai = ctx.accounts.escrow.to_account_info();
    let escrow_bump = ctx.bumps.escrow;
    let vault_ai = ctx.accounts.vault.to_account_info();
    let beneficiary_ai = ctx.accounts.beneficiary_account.to_account_info();
    let token_program_ai = ctx.accounts.token_program.to_account_info();

    let now = Clock::get()?.unix_timestamp;
    let escrow = &mut ctx.accounts.escrow;
    let caller = ctx.accounts.admin.key();
    require!(
        caller == escrow.owner
            || (escrow.manager != Pubkey::default() && caller == escrow.manager),
        EscrowError::NotOwnerOrManager
    );

    let amount = escrow.revoke_unvested_at(now)?;
    if amount > 0 {
        let factory_key = escrow.factory;
        let index_bytes = escrow.index.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[
            ESCROW_SEED,
            factory_key.as_ref(),
            &index_bytes,
            &[escrow_bump],
        ]];
        token::transfer(
            CpiContext::new_with_signer(
                token_program_ai,
                Transfer {
                    from: vault_ai,
                    to: beneficiary_ai,
                    authority: escrow_ai,
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(UnvestedTokensRevoked {
        escrow: escrow.key(),
        beneficiary: ctx.accounts.beneficiary_account.key(),
        amount,
        disabled_at: escrow.disabled_at,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RevokeUnvested<'info> {
    #[account(
        mut,
        seeds = [ESCROW_SEED, escrow.factory.as_ref(), &escrow.index.to_le_bytes()],
        bump
    )]
    pub escrow: Account<'info, VestingEscrow>,

    #[account(
        mut,
        seeds = [VAULT_SEED, escrow.key().as_ref()],
        bump,
        constraint = vault.mint == escrow.token_mint @ EscrowError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Clawback destination; the owner's own account in the common case.
    #[account(
        mut,
        constraint = beneficiary_account.mint == escrow.token_mint @ EscrowError::InvalidTokenMint,
    )]
    pub beneficiary_account: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct UnvestedTokensRevoked {
    pub escrow: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub disabled_at: i64,
}
