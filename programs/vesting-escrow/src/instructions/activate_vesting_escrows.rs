use anchor_lang::prelude::*;
use anchor_lang::AccountsExit;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{MAX_BATCH_ACTIVATIONS, VAULT_SEED};
use crate::error::EscrowError;
use crate::instructions::activate_vesting_escrow::VestingEscrowActivated;
use crate::state::{Factory, VestingEscrow};

/// Batch funding: remaining accounts hold (escrow, vault) pairs, one
/// per entry of `amounts`. Runs inside one transaction, so a failing
/// entry rolls back every previously funded one.
pub fn activate_vesting_escrows<'info>(
    ctx: Context<'_, '_, 'info, 'info, ActivateVestingEscrows<'info>>,
    amounts: Vec<u64>,
) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.owner.key(),
        ctx.accounts.factory.owner,
        EscrowError::NotOwner
    );
    require!(!amounts.is_empty(), EscrowError::EmptyBatch);
    require!(
        amounts.len() <= MAX_BATCH_ACTIVATIONS,
        EscrowError::BatchTooLarge
    );
    require!(
        ctx.remaining_accounts.len() == amounts.len() * 2,
        EscrowError::BatchMismatch
    );

    for (pair, &amount) in ctx.remaining_accounts.chunks(2).zip(amounts.iter()) {
        let escrow_ai = &pair[0];
        let vault_ai = &pair[1];
        require!(amount > 0, EscrowError::ZeroAmount);

        let mut escrow: Account<'info, VestingEscrow> = Account::try_from(escrow_ai)?;
        require!(
            escrow.factory == ctx.accounts.factory.key(),
            EscrowError::FactoryMismatch
        );
        require!(!escrow.activated, EscrowError::AlreadyActivated);

        let (vault_pda, _) =
            Pubkey::find_program_address(&[VAULT_SEED, escrow_ai.key.as_ref()], &crate::ID);
        require_keys_eq!(*vault_ai.key, vault_pda, EscrowError::InvalidTokenAccount);

        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.owner_token_account.to_account_info(),
                    to: vault_ai.clone(),
                    authority: ctx.accounts.owner.to_account_info(),
                },
            ),
            amount,
        )?;

        let mut vault_data: &[u8] = &vault_ai.try_borrow_data()?;
        let vault = TokenAccount::try_deserialize(&mut vault_data)?;
        require!(
            vault.amount >= escrow.total_locked,
            EscrowError::InsufficientFunds
        );

        escrow.activated = true;
        escrow.exit(&crate::ID)?;

        emit!(VestingEscrowActivated {
            escrow: escrow.key(),
            recipient: escrow.recipient,
            amount,
        });
    }
    Ok(())
}

#[derive(Accounts)]
pub struct ActivateVestingEscrows<'info> {
    pub factory: Account<'info, Factory>,

    pub owner: Signer<'info>,

    #[account(
        mut,
        constraint = owner_token_account.mint == factory.token_mint @ EscrowError::InvalidTokenMint,
        constraint = owner_token_account.owner == owner.key() @ EscrowError::InvalidTokenAccount,
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}
