use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{ESCROW_SEED, VAULT_SEED};
use crate::error::EscrowError;
use crate::state::{Factory, RevocationMode, VestingEscrow};

/// Creates an unfunded escrow for one grant. Funding and activation
/// happen separately; until then claim/revoke/vote are all rejected.
pub fn deploy_vesting_escrow(
    ctx: Context<DeployVestingEscrow>,
    total_locked: u64,
    recipient: Pubkey,
    vesting_duration: i64,
    vesting_start: i64,
    cliff_length: i64,
    escrow_type: u8,
) -> Result<()> {
    require!(recipient != Pubkey::default(), EscrowError::ZeroRecipient);
    require!(total_locked > 0, EscrowError::ZeroAmount);
    require!(vesting_duration > 0, EscrowError::InvalidDuration);
    let revocation_mode = RevocationMode::from_flavor(escrow_type)?;

    let factory = &mut ctx.accounts.factory;
    let deployer = ctx.accounts.deployer.key();
    require!(
        deployer == factory.owner
            || (factory.manager != Pubkey::default() && deployer == factory.manager),
        EscrowError::NotOwnerOrManager
    );

    let now = Clock::get()?.unix_timestamp;
    let start_time = if vesting_start == 0 { now } else { vesting_start };
    let end_time = start_time
        .checked_add(vesting_duration)
        .ok_or(EscrowError::MathOverflow)?;
    VestingEscrow::validate_schedule(start_time, end_time, cliff_length)?;

    let escrow = &mut ctx.accounts.escrow;
    require!(!escrow.initialized, EscrowError::AlreadyInitialized);
    escrow.factory = factory.key();
    escrow.index = factory.escrow_count;
    escrow.token_mint = factory.token_mint;
    escrow.recipient = recipient;
    escrow.pending_recipient = Pubkey::default();
    escrow.owner = factory.owner;
    escrow.pending_owner = Pubkey::default();
    escrow.manager = factory.manager;
    escrow.total_locked = total_locked;
    escrow.start_time = start_time;
    escrow.end_time = end_time;
    escrow.cliff_length = cliff_length;
    escrow.disabled_at = end_time;
    escrow.total_claimed = 0;
    escrow.revocation_mode = revocation_mode;
    escrow.initialized = true;
    escrow.activated = false;
    escrow.fully_revoked = false;

    factory.escrow_count = factory
        .escrow_count
        .checked_add(1)
        .ok_or(EscrowError::MathOverflow)?;

    emit!(VestingEscrowCreated {
        factory: factory.key(),
        escrow: escrow.key(),
        index: escrow.index,
        recipient,
        total_locked,
        start_time,
        end_time,
        cliff_length,
        escrow_type,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct DeployVestingEscrow<'info> {
    #[account(mut)]
    pub factory: Account<'info, Factory>,

    #[account(
        init,
        payer = deployer,
        space = 8 + VestingEscrow::SIZE,
        seeds = [ESCROW_SEED, factory.key().as_ref(), &factory.escrow_count.to_le_bytes()],
        bump
    )]
    pub escrow: Account<'info, VestingEscrow>,

    #[account(
        init,
        payer = deployer,
        token::mint = token_mint,
        token::authority = escrow,
        seeds = [VAULT_SEED, escrow.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(address = factory.token_mint @ EscrowError::InvalidTokenMint)]
    pub token_mint: Account<'info, Mint>,

    #[account(mut)]
    pub deployer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingEscrowCreated {
    pub factory: Pubkey,
    pub escrow: Pubkey,
    pub index: u64,
    pub recipient: Pubkey,
    pub total_locked: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub cliff_length: i64,
    pub escrow_type: u8,
}
