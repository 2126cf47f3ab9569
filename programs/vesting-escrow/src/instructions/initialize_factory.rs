use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::FACTORY_SEED;
use crate::state::Factory;

pub fn initialize_factory(
    ctx: Context<InitializeFactory>,
    seed: u64,
    manager: Pubkey,
    voting_adapter: Pubkey,
) -> Result<()> {
    let factory = &mut ctx.accounts.factory;
    factory.token_mint = ctx.accounts.token_mint.key();
    factory.owner = ctx.accounts.owner.key();
    factory.pending_owner = Pubkey::default();
    factory.manager = manager;
    factory.voting_adapter = voting_adapter;
    factory.escrow_count = 0;
    factory.seed = seed;

    emit!(FactoryInitialized {
        factory: factory.key(),
        token_mint: factory.token_mint,
        owner: factory.owner,
        manager,
        voting_adapter,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct InitializeFactory<'info> {
    pub token_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = owner,
        space = 8 + Factory::SIZE,
        seeds = [FACTORY_SEED, token_mint.key().as_ref(), &seed.to_le_bytes()],
        bump
    )]
    pub factory: Account<'info, Factory>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct FactoryInitialized {
    pub factory: Pubkey,
    pub token_mint: Pubkey,
    pub owner: Pubkey,
    pub manager: Pubkey,
    pub voting_adapter: Pubkey,
}
