use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("Gb6V3HEK9aG9sDqmrzwGRX9KsCYVp5Zp65mpYKapNkHE");

#[program]
pub mod vesting_escrow {
    use super::*;

    // ---- factory ----

    pub fn initialize_factory(
        ctx: Context<InitializeFactory>,
        seed: u64,
        manager: Pubkey,
        voting_adapter: Pubkey,
    ) -> Result<()> {
        instructions::initialize_factory(ctx, seed, manager, voting_adapter)
    }

    pub fn deploy_vesting_escrow(
        ctx: Context<DeployVestingEscrow>,
        total_locked: u64,
        recipient: Pubkey,
        vesting_duration: i64,
        vesting_start: i64,
        cliff_length: i64,
        escrow_type: u8,
    ) -> Result<()> {
        instructions::deploy_vesting_escrow(
            ctx,
            total_locked,
            recipient,
            vesting_duration,
            vesting_start,
            cliff_length,
            escrow_type,
        )
    }

    pub fn activate_vesting_escrow<'info>(
        ctx: Context<'_, '_, 'info, 'info, ActivateVestingEscrow<'info>>,
        amount: u64,
        delegate: Pubkey,
    ) -> Result<()> {
        instructions::activate_vesting_escrow(ctx, amount, delegate)
    }

    pub fn activate_vesting_escrows<'info>(
        ctx: Context<'_, '_, 'info, 'info, ActivateVestingEscrows<'info>>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::activate_vesting_escrows(ctx, amounts)
    }

    pub fn update_voting_adapter(ctx: Context<FactoryAdmin>, new_adapter: Pubkey) -> Result<()> {
        instructions::update_voting_adapter(ctx, new_adapter)
    }

    pub fn commit_factory_ownership(ctx: Context<FactoryAdmin>, candidate: Pubkey) -> Result<()> {
        instructions::commit_factory_ownership(ctx, candidate)
    }

    pub fn apply_factory_ownership(ctx: Context<FactoryAdmin>) -> Result<()> {
        instructions::apply_factory_ownership(ctx)
    }

    pub fn renounce_factory_ownership(ctx: Context<FactoryAdmin>) -> Result<()> {
        instructions::renounce_factory_ownership(ctx)
    }

    pub fn change_factory_manager(ctx: Context<FactoryAdmin>, new_manager: Pubkey) -> Result<()> {
        instructions::change_factory_manager(ctx, new_manager)
    }

    pub fn recover_factory_tokens(ctx: Context<RecoverFactoryTokens>, amount: u64) -> Result<()> {
        instructions::recover_factory_tokens(ctx, amount)
    }

    pub fn recover_factory_lamports(ctx: Context<RecoverFactoryLamports>) -> Result<()> {
        instructions::recover_factory_lamports(ctx)
    }

    // ---- escrow ----

    pub fn claim(ctx: Context<Claim>, amount: u64) -> Result<()> {
        instructions::claim(ctx, amount)
    }

    pub fn revoke_unvested(ctx: Context<RevokeUnvested>) -> Result<()> {
        instructions::revoke_unvested(ctx)
    }

    pub fn revoke_all(ctx: Context<RevokeAll>) -> Result<()> {
        instructions::revoke_all(ctx)
    }

    pub fn recover_escrow_tokens(ctx: Context<RecoverEscrowTokens>, amount: u64) -> Result<()> {
        instructions::recover_escrow_tokens(ctx, amount)
    }

    pub fn recover_escrow_lamports(ctx: Context<RecoverEscrowLamports>) -> Result<()> {
        instructions::recover_escrow_lamports(ctx)
    }

    pub fn aragon_vote<'info>(
        ctx: Context<'_, '_, 'info, 'info, ForwardGovernance<'info>>,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::aragon_vote(ctx, data)
    }

    pub fn delegate<'info>(
        ctx: Context<'_, '_, 'info, 'info, ForwardGovernance<'info>>,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::delegate(ctx, data)
    }

    pub fn snapshot_set_delegate<'info>(
        ctx: Context<'_, '_, 'info, 'info, ForwardGovernance<'info>>,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::snapshot_set_delegate(ctx, data)
    }

    pub fn commit_transfer_ownership(ctx: Context<EscrowAdmin>, candidate: Pubkey) -> Result<()> {
        instructions::commit_transfer_ownership(ctx, candidate)
    }

    pub fn apply_transfer_ownership(ctx: Context<EscrowAdmin>) -> Result<()> {
        instructions::apply_transfer_ownership(ctx)
    }

    pub fn renounce_ownership(ctx: Context<EscrowAdmin>) -> Result<()> {
        instructions::renounce_ownership(ctx)
    }

    pub fn change_manager(ctx: Context<EscrowAdmin>, new_manager: Pubkey) -> Result<()> {
        instructions::change_manager(ctx, new_manager)
    }

    pub fn commit_transfer_recipient(ctx: Context<EscrowAdmin>, candidate: Pubkey) -> Result<()> {
        instructions::commit_transfer_recipient(ctx, candidate)
    }

    pub fn apply_transfer_recipient(ctx: Context<EscrowAdmin>) -> Result<()> {
        instructions::apply_transfer_recipient(ctx)
    }

    // ---- voting adapter ----

    pub fn initialize_voting_adapter(
        ctx: Context<InitializeVotingAdapter>,
        seed: u64,
        voting_contract: Pubkey,
        snapshot_delegate_contract: Pubkey,
        delegation_contract: Pubkey,
    ) -> Result<()> {
        instructions::initialize_voting_adapter(
            ctx,
            seed,
            voting_contract,
            snapshot_delegate_contract,
            delegation_contract,
        )
    }

    pub fn adapter_aragon_vote<'info>(
        ctx: Context<'_, '_, 'info, 'info, AdapterExec<'info>>,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::adapter_aragon_vote(ctx, data)
    }

    pub fn adapter_delegate<'info>(
        ctx: Context<'_, '_, 'info, 'info, AdapterExec<'info>>,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::adapter_delegate(ctx, data)
    }

    pub fn adapter_snapshot_set_delegate<'info>(
        ctx: Context<'_, '_, 'info, 'info, AdapterExec<'info>>,
        data: Vec<u8>,
    ) -> Result<()> {
        instructions::adapter_snapshot_set_delegate(ctx, data)
    }

    pub fn commit_adapter_ownership(ctx: Context<AdapterAdmin>, candidate: Pubkey) -> Result<()> {
        instructions::commit_adapter_ownership(ctx, candidate)
    }

    pub fn apply_adapter_ownership(ctx: Context<AdapterAdmin>) -> Result<()> {
        instructions::apply_adapter_ownership(ctx)
    }

    pub fn renounce_adapter_ownership(ctx: Context<AdapterAdmin>) -> Result<()> {
        instructions::renounce_adapter_ownership(ctx)
    }

    pub fn recover_adapter_tokens(ctx: Context<RecoverAdapterTokens>, amount: u64) -> Result<()> {
        instructions::recover_adapter_tokens(ctx, amount)
    }

    pub fn recover_adapter_lamports(ctx: Context<RecoverAdapterLamports>) -> Result<()> {
        instructions::recover_adapter_lamports(ctx)
    }
}
