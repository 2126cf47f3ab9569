use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::FACTORY_SEED;
use crate::error::EscrowError;
use crate::instructions::escrow_admin::{
    ManagerChanged, OwnershipApplied, OwnershipCommitted, OwnershipRenounced,
};
use crate::state::Factory;
use crate::utils::ownable::TwoStepOwned;

/// Swaps the adapter every escrow of this factory resolves on its next
/// governance call. The default key unplugs governance entirely.
pub fn update_voting_adapter(ctx: Context<FactoryAdmin>, new_adapter: Pubkey) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    require_keys_eq!(
        ctx.accounts.caller.key(),
        factory.owner,
        EscrowError::NotOwner
    );
    let old_adapter = factory.voting_adapter;
    factory.voting_adapter = new_adapter;
    emit!(VotingAdapterUpgraded {
        factory: factory.key(),
        old_adapter,
        new_adapter,
    });
    Ok(())
}

pub fn commit_factory_ownership(ctx: Context<FactoryAdmin>, candidate: Pubkey) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.commit_transfer_ownership(ctx.accounts.caller.key(), candidate)?;
    emit!(OwnershipCommitted {
        account: factory.key(),
        candidate,
    });
    Ok(())
}

pub fn apply_factory_ownership(ctx: Context<FactoryAdmin>) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.apply_transfer_ownership(ctx.accounts.caller.key())?;
    emit!(OwnershipApplied {
        account: factory.key(),
        new_owner: factory.owner,
    });
    Ok(())
}

pub fn renounce_factory_ownership(ctx: Context<FactoryAdmin>) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.renounce_ownership(ctx.accounts.caller.key())?;
    emit!(OwnershipRenounced {
        account: factory.key(),
    });
    Ok(())
}

pub fn change_factory_manager(ctx: Context<FactoryAdmin>, new_manager: Pubkey) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    require_keys_eq!(
        ctx.accounts.caller.key(),
        factory.owner,
        EscrowError::NotOwner
    );
    let old_manager = factory.manager;
    factory.manager = new_manager;
    emit!(ManagerChanged {
        account: factory.key(),
        old_manager,
        new_manager,
    });
    Ok(())
}

/// The factory never holds locked funds, so the sweep is unconditioned
/// and anyone may trigger it; proceeds always land with the owner.
pub fn recover_factory_tokens(ctx: Context<RecoverFactoryTokens>, amount: u64) -> Result<()> {
    let factory_ai = ctx.accounts.factory.to_account_info();
    let factory_bump = ctx.bumps.factory;
    let factory = &ctx.accounts.factory;

    let amount = amount.min(ctx.accounts.stray_account.amount);
    if amount > 0 {
        let token_mint = factory.token_mint;
        let seed_bytes = factory.seed.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[
            FACTORY_SEED,
            token_mint.as_ref(),
            &seed_bytes,
            &[factory_bump],
        ]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.stray_account.to_account_info(),
                    to: ctx.accounts.owner_account.to_account_info(),
                    authority: factory_ai,
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(FactoryTokensRecovered {
        factory: factory.key(),
        mint: ctx.accounts.stray_account.mint,
        amount,
    });
    Ok(())
}

pub fn recover_factory_lamports(ctx: Context<RecoverFactoryLamports>) -> Result<()> {
    let factory_ai = ctx.accounts.factory.to_account_info();
    let owner_ai = ctx.accounts.owner.to_account_info();

    let rent_min = Rent::get()?.minimum_balance(factory_ai.data_len());
    let excess = factory_ai.lamports().saturating_sub(rent_min);
    if excess > 0 {
        **factory_ai.try_borrow_mut_lamports()? -= excess;
        **owner_ai.try_borrow_mut_lamports()? += excess;
    }

    emit!(FactoryLamportsRecovered {
        factory: ctx.accounts.factory.key(),
        amount: excess,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct FactoryAdmin<'info> {
    #[account(mut)]
    pub factory: Account<'info, Factory>,

    pub caller: Signer<'info>,
}

#[derive(Accounts)]
pub struct RecoverFactoryTokens<'info> {
    #[account(
        seeds = [FACTORY_SEED, factory.token_mint.as_ref(), &factory.seed.to_le_bytes()],
        bump
    )]
    pub factory: Account<'info, Factory>,

    #[account(
        mut,
        constraint = stray_account.owner == factory.key() @ EscrowError::InvalidTokenAccount,
    )]
    pub stray_account: Account<'info, TokenAccount>,

    /// Sweep destination, pinned to a token account of the owner.
    #[account(
        mut,
        constraint = owner_account.mint == stray_account.mint @ EscrowError::InvalidTokenMint,
        constraint = owner_account.owner == factory.owner @ EscrowError::InvalidTokenAccount,
    )]
    pub owner_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct RecoverFactoryLamports<'info> {
    #[account(mut)]
    pub factory: Account<'info, Factory>,

    /// Sweep destination, pinned to the factory owner.
    #[account(mut, address = factory.owner @ EscrowError::NotOwner)]
    pub owner: SystemAccount<'info>,
}

#[event]
pub struct VotingAdapterUpgraded {
    pub factory: Pubkey,
    pub old_adapter: Pubkey,
    pub new_adapter: Pubkey,
}

#[event]
pub struct FactoryTokensRecovered {
    pub factory: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

#[event]
pub struct FactoryLamportsRecovered {
    pub factory: Pubkey,
    pub amount: u64,
}
