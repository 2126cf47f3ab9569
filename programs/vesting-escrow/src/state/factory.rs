use anchor_lang::prelude::*;

use crate::utils::ownable::TwoStepOwned;

/// Organization-level deployer. Mints escrow PDAs, tracks the deploy
/// counter and holds the canonical voting adapter reference that every
/// escrow resolves at call time.
#[account]
pub struct Factory {
    /// Vesting token mint for every escrow deployed from here.
    pub token_mint: Pubkey,
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
    /// Secondary admin; default = disabled.
    pub manager: Pubkey,
    /// Current adapter account; default = no adapter wired.
    pub voting_adapter: Pubkey,
    /// Next escrow index; only ever increases.
    pub escrow_count: u64,
    /// Caller-chosen PDA seed; allows several factories per mint.
    pub seed: u64,
}

impl Factory {
    pub const SIZE: usize =
        32 + // token_mint
        32 + // owner
        32 + // pending_owner
        32 + // manager
        32 + // voting_adapter
        8 +  // escrow_count
        8;   // seed
}

impl TwoStepOwned for Factory {
    fn owner(&self) -> Pubkey {
        self.owner
    }
    fn set_owner(&mut self, key: Pubkey) {
        self.owner = key;
    }
    fn pending_owner(&self) -> Pubkey {
        self.pending_owner
    }
    fn set_pending_owner(&mut self, key: Pubkey) {
        self.pending_owner = key;
    }
}
