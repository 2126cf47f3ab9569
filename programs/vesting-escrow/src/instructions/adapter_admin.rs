use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::VOTING_ADAPTER_SEED;
use crate::error::EscrowError;
use crate::instructions::escrow_admin::{
    OwnershipApplied, OwnershipCommitted, OwnershipRenounced,
};
use crate::state::VotingAdapter;
use crate::utils::ownable::TwoStepOwned;

pub fn commit_adapter_ownership(ctx: Context<AdapterAdmin>, candidate: Pubkey) -> Result<()> {
    let adapter = &mut ctx.accounts.voting_adapter;
    adapter.commit_transfer_ownership(ctx.accounts.caller.key(), candidate)?;
    emit!(OwnershipCommitted {
        account: adapter.key(),
        candidate,
    });
    Ok(())
}

pub fn apply_adapter_ownership(ctx: Context<AdapterAdmin>) -> Result<()> {
    let adapter = &mut ctx.accounts.voting_adapter;
    adapter.apply_transfer_ownership(ctx.accounts.caller.key())?;
    emit!(OwnershipApplied {
        account: adapter.key(),
        new_owner: adapter.owner,
    });
    Ok(())
}

pub fn renounce_adapter_ownership(ctx: Context<AdapterAdmin>) -> Result<()> {
    let adapter = &mut ctx.accounts.voting_adapter;
    adapter.renounce_ownership(ctx.accounts.caller.key())?;
    emit!(OwnershipRenounced {
        account: adapter.key(),
    });
    Ok(())
}

/// Owner-only sweep of tokens stranded on the adapter.
pub fn recover_adapter_tokens(ctx: Context<RecoverAdapterTokens>, amount: u64) -> Result<()> {
    let adapter_ai = ctx.accounts.voting_adapter.to_account_info();
    let adapter_bump = ctx.bumps.voting_adapter;
    let adapter = &ctx.accounts.voting_adapter;
    require_keys_eq!(
        ctx.accounts.owner.key(),
        adapter.owner,
        EscrowError::NotOwner
    );

    let amount = amount.min(ctx.accounts.stray_account.amount);
    if amount > 0 {
        let seed_bytes = adapter.seed.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] =
            &[&[VOTING_ADAPTER_SEED, &seed_bytes, &[adapter_bump]]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.stray_account.to_account_info(),
                    to: ctx.accounts.owner_account.to_account_info(),
                    authority: adapter_ai,
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(AdapterTokensRecovered {
        voting_adapter: adapter.key(),
        mint: ctx.accounts.stray_account.mint,
        amount,
    });
    Ok(())
}

pub fn recover_adapter_lamports(ctx: Context<RecoverAdapterLamports>) -> Result<()> {
    let adapter_ai = ctx.accounts.voting_adapter.to_account_info();
    let owner_ai = ctx.accounts.owner.to_account_info();
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ctx.accounts.voting_adapter.owner,
        EscrowError::NotOwner
    );

    let rent_min = Rent::get()?.minimum_balance(adapter_ai.data_len());
    let excess = adapter_ai.lamports().saturating_sub(rent_min);
    if excess > 0 {
        **adapter_ai.try_borrow_mut_lamports()? -= excess;
        **owner_ai.try_borrow_mut_lamports()? += excess;
    }

    emit!(AdapterLamportsRecovered {
        voting_adapter: ctx.accounts.voting_adapter.key(),
        amount: excess,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct AdapterAdmin<'info> {
    #[account(mut)]
    pub voting_adapter: Account<'info, VotingAdapter>,

    pub caller: Signer<'info>,
}

#[derive(Accounts)]
pub struct RecoverAdapterTokens<'info> {
    #[account(
        seeds = [VOTING_ADAPTER_SEED, &voting_adapter.seed.to_le_bytes()],
        bump
    )]
    pub voting_adapter: Account<'info, VotingAdapter>,

    #[account(
        mut,
        constraint = stray_account.owner == voting_adapter.key() @ EscrowError::InvalidTokenAccount,
    )]
    pub stray_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = owner_account.mint == stray_account.mint @ EscrowError::InvalidTokenMint,
    )]
    pub owner_account: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct RecoverAdapterLamports<'info> {
    #[account(mut)]
    pub voting_adapter: Account<'info, VotingAdapter>,

    /// Sweep destination; must also sign, recovery is owner-only here.
    #[account(mut)]
    pub owner: Signer<'info>,
}

#[event]
pub struct AdapterTokensRecovered {
    pub voting_adapter: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct AdapterLamportsRecovered {
    pub voting_adapter: Pubkey,
    pub amount: u64,
}
