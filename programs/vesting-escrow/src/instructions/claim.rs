use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{ESCROW_SEED, VAULT_SEED};
use crate::error::EscrowError;
use crate::state::VestingEscrow;

/// Pays out up to `amount` of the currently claimable balance to any
/// beneficiary account the recipient chooses (`CLAIM_ALL` takes
/// everything). Claiming zero is a silent no-op, so a replay at the
/// same timestamp moves nothing.
pub fn claim(ctx: Context<Claim>, amount: u64) -> Result<()> {
    let escrow_ai = ctx.accounts.escrow.to_account_info();
    let escrow_bump = ctx.bumps.escrow;
    let vault_ai = ctx.accounts.vault.to_account_info();
    let beneficiary_ai = ctx.accounts.beneficiary_account.to_account_info();
    let token_program_ai = ctx.accounts.token_program.to_account_info();

    let now = Clock::get()?.unix_timestamp;
    let escrow = &mut ctx.accounts.escrow;
    require_keys_eq!(
        ctx.accounts.recipient.key(),
        escrow.recipient,
        EscrowError::NotRecipient
    );
    require!(escrow.activated, EscrowError::NotActivated);

    let claimable = escrow.claimable_at(now, amount)?;
    if claimable > 0 {
        // state first, transfer last
        escrow.record_claim(claimable)?;

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
            claimable,
        )?;
    }

    emit!(Claimed {
        escrow: escrow.key(),
        beneficiary: ctx.accounts.beneficiary_account.key(),
        amount: claimable,
        total_claimed: escrow.total_claimed,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct Claim<'info> {
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

    pub recipient: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct Claimed {
    pub escrow: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub total_claimed: u64,
}
