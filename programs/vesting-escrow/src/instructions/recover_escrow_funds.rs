use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{ESCROW_SEED, VAULT_SEED};
use crate::error::EscrowError;
use crate::state::VestingEscrow;

/// Sweeps tokens that ended up on the escrow but are owed to nobody:
/// any foreign-mint account in full, the vesting vault only above the
/// locked + still-owed watermark. Clamped rather than failing, so a
/// too-large request degrades to a no-op.
pub fn recover_escrow_tokens(ctx: Context<RecoverEscrowTokens>, amount: u64) -> Result<()> {
    let escrow_ai = ctx.accounts.escrow.to_account_info();
    let escrow_bump = ctx.bumps.escrow;
    let stray_ai = ctx.accounts.stray_account.to_account_info();
    let beneficiary_ai = ctx.accounts.beneficiary_account.to_account_info();
    let token_program_ai = ctx.accounts.token_program.to_account_info();

    let now = Clock::get()?.unix_timestamp;
    let escrow = &ctx.accounts.escrow;
    require_keys_eq!(
        ctx.accounts.recipient.key(),
        escrow.recipient,
        EscrowError::NotRecipient
    );

    let stray = &ctx.accounts.stray_account;
    let recoverable = if stray.mint == escrow.token_mint {
        let (vault_pda, _) =
            Pubkey::find_program_address(&[VAULT_SEED, escrow.key().as_ref()], &crate::ID);
        if stray.key() == vault_pda {
            escrow.recoverable_at(now, stray.amount)?
        } else {
            stray.amount
        }
    } else {
        stray.amount
    };

    let amount = amount.min(recoverable);
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
                    from: stray_ai,
                    to: beneficiary_ai,
                    authority: escrow_ai,
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(EscrowTokensRecovered {
        escrow: escrow.key(),
        mint: stray.mint,
        amount,
    });
    Ok(())
}

/// Returns any lamports forced onto the escrow account (above its own
/// rent exemption) to the recipient. Anyone may trigger it; the
/// destination is fixed.
pub fn recover_escrow_lamports(ctx: Context<RecoverEscrowLamports>) -> Result<()> {
    let escrow_ai = ctx.accounts.escrow.to_account_info();
    let recipient_ai = ctx.accounts.recipient.to_account_info();

    let rent_min = Rent::get()?.minimum_balance(escrow_ai.data_len());
    let excess = escrow_ai.lamports().saturating_sub(rent_min);
    if excess > 0 {
        **escrow_ai.try_borrow_mut_lamports()? -= excess;
        **recipient_ai.try_borrow_mut_lamports()? += excess;
    }

    emit!(EscrowLamportsRecovered {
        escrow: ctx.accounts.escrow.key(),
        amount: excess,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RecoverEscrowTokens<'info> {
    #[account(
        seeds = [ESCROW_SEED, escrow.factory.as_ref(), &escrow.index.to_le_bytes()],
        bump
    )]
    pub escrow: Account<'info, VestingEscrow>,

    /// Token account held by the escrow: the vault itself or any
    /// foreign-mint account someone transferred to its authority.
    #[account(
        mut,
        constraint = stray_account.owner == escrow.key() @ EscrowError::InvalidTokenAccount,
    )]
    pub stray_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = beneficiary_account.mint == stray_account.mint @ EscrowError::InvalidTokenMint,
    )]
    pub beneficiary_account: Account<'info, TokenAccount>,

    pub recipient: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct RecoverEscrowLamports<'info> {
    #[account(
        mut,
        seeds = [ESCROW_SEED, escrow.factory.as_ref(), &escrow.index.to_le_bytes()],
        bump
    )]
    pub escrow: Account<'info, VestingEscrow>,

    /// Sweep destination, pinned to the escrow recipient.
    #[account(mut, address = escrow.recipient @ EscrowError::NotRecipient)]
    pub recipient: SystemAccount<'info>,
}

#[event]
pub struct EscrowTokensRecovered {
    pub escrow: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct EscrowLamportsRecovered {
    pub escrow: Pubkey,
    pub amount: u64,
}
