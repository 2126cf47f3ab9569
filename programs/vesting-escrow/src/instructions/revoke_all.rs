use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{ESCROW_SEED, VAULT_SEED};
use crate::error::EscrowError;
use crate::state::VestingEscrow;

/// Forecloses the whole grant, vested-but-unclaimed tokens included.
/// Only fully revocable escrows accept this; afterwards the recipient
/// can never claim again.
pub fn revoke_all(ctx: Context<RevokeAll>) -> Result<()> {
    let escrow_ai = ctx.accounts.escrow.to_account_info();
    let escrow_bump = ctx.bumps.escrow;
    let vault_ai = ctx.accounts.vault.to_account_info();
    let beneficiary_ai = ctx.accounts.beneficiary_account.to_account_info();
    let token_program_ai = ctx.accounts.token_program.to_account_info();

    let now = Clock::get()?.unix_timestamp;
    let escrow = &mut ctx.accounts.escrow;
    require_keys_eq!(
        ctx.accounts.owner.key(),
        escrow.owner,
        EscrowError::NotOwner
    );

    let amount = escrow.revoke_all_at(now)?;
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

    emit!(VestingFullyRevoked {
        escrow: escrow.key(),
        beneficiary: ctx.accounts.beneficiary_account.key(),
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RevokeAll<'info> {
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

    #[account(
        mut,
        constraint = beneficiary_account.mint == escrow.token_mint @ EscrowError::InvalidTokenMint,
    )]
    pub beneficiary_account: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct VestingFullyRevoked {
    pub escrow: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
}
