use anchor_lang::prelude::*;

use crate::constants::{ESCROW_TYPE_FULLY_REVOKABLE, ESCROW_TYPE_SIMPLE};
use crate::error::{EscrowError, EscrowResult};
use crate::utils::ownable::TwoStepOwned;

/// Revocation policy, fixed per escrow at deploy time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevocationMode {
    /// Neither revocation path is available.
    NonRevocable,
    /// Owner/manager may claw back still-locked tokens only.
    RevokeUnvestedOnly,
    /// Owner may additionally foreclose vested-but-unclaimed tokens.
    FullyRevocable,
}

impl RevocationMode {
    /// Maps a factory flavor tag to a mode. The factory currently mints
    /// two flavors; `NonRevocable` is representable state with no tag.
    pub fn from_flavor(tag: u8) -> EscrowResult<Self> {
        match tag {
            ESCROW_TYPE_SIMPLE => Ok(Self::RevokeUnvestedOnly),
            ESCROW_TYPE_FULLY_REVOKABLE => Ok(Self::FullyRevocable),
            _ => Err(EscrowError::InvalidFlavor),
        }
    }

    pub fn allows_revoke_unvested(self) -> bool {
        matches!(self, Self::RevokeUnvestedOnly | Self::FullyRevocable)
    }

    pub fn allows_revoke_all(self) -> bool {
        matches!(self, Self::FullyRevocable)
    }
}

/// One vesting grant. Created only by the factory's deploy instruction
/// (PDA of ["escrow", factory, index]); the vault PDA holding the
/// vested tokens has this account as its transfer authority.
#[account]
pub struct VestingEscrow {
    /// Factory this escrow was deployed from.
    pub factory: Pubkey,
    /// Per-factory deploy index, seeds the PDA.
    pub index: u64,
    /// Vesting token mint.
    pub token_mint: Pubkey,
    /// Grant beneficiary; two-step transferable.
    pub recipient: Pubkey,
    pub pending_recipient: Pubkey,
    /// Admin; two-step transferable.
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
    /// Secondary admin with revoke-unvested rights; default = disabled.
    pub manager: Pubkey,
    /// Grant size, fixed at deploy.
    pub total_locked: u64,
    /// Vesting window; end_time > start_time.
    pub start_time: i64,
    pub end_time: i64,
    /// Extra delay before anything becomes claimable.
    pub cliff_length: i64,
    /// Curve ceiling; starts at end_time, only ever moves earlier.
    pub disabled_at: i64,
    /// Sum of all claims; never exceeds total_locked.
    pub total_claimed: u64,
    pub revocation_mode: RevocationMode,
    pub initialized: bool,
    pub activated: bool,
    /// Set by revoke_all; forces unclaimed to zero forever.
    pub fully_revoked: bool,
}

impl VestingEscrow {
    pub const SIZE: usize =
        32 + // factory
        8 +  // index
        32 + // token_mint
        32 + // recipient
        32 + // pending_recipient
        32 + // owner
        32 + // pending_owner
        32 + // manager
        8 +  // total_locked
        8 +  // start_time
        8 +  // end_time
        8 +  // cliff_length
        8 +  // disabled_at
        8 +  // total_claimed
        1 +  // revocation_mode
        1 +  // initialized
        1 +  // activated
        1;   // fully_revoked

    /// Validates a vesting window before it is recorded.
    pub fn validate_schedule(
        start_time: i64,
        end_time: i64,
        cliff_length: i64,
    ) -> EscrowResult<()> {
        if end_time <= start_time {
            return Err(EscrowError::InvalidDuration);
        }
        if cliff_length < 0 {
            return Err(EscrowError::InvalidCliff);
        }
        let cliff_end = start_time
            .checked_add(cliff_length)
            .ok_or(EscrowError::MathOverflow)?;
        if cliff_end > end_time {
            return Err(EscrowError::InvalidCliff);
        }
        Ok(())
    }

    /// Linear vesting curve, capped by `disabled_at`. The cliff does not
    /// enter here; it only gates claimability in `unclaimed_at`.
    pub fn vested_at(&self, now: i64) -> EscrowResult<u64> {
        if !self.activated {
            return Ok(0);
        }
        let effective_end = now.min(self.disabled_at);
        if effective_end <= self.start_time {
            return Ok(0);
        }
        let elapsed = effective_end - self.start_time;
        let duration = self.end_time - self.start_time;
        let vested = (self.total_locked as u128)
            .checked_mul(elapsed as u128)
            .ok_or(EscrowError::MathOverflow)?
            / duration as u128;
        Ok(vested.min(self.total_locked as u128) as u64)
    }

    /// Tokens the recipient can take right now. Zero before activation,
    /// during the cliff, and after a full revocation.
    pub fn unclaimed_at(&self, now: i64) -> EscrowResult<u64> {
        if !self.activated || self.fully_revoked || now < self.cliff_end()? {
            return Ok(0);
        }
        self.vested_but_unclaimed_at(now)
    }

    /// Tokens still locked under the curve. Zero once `disabled_at` has
    /// passed: revocation freezes the ceiling and returns the remainder.
    pub fn locked_at(&self, now: i64) -> EscrowResult<u64> {
        if !self.activated || now >= self.disabled_at {
            return Ok(0);
        }
        self.total_locked
            .checked_sub(self.vested_at(now)?)
            .ok_or(EscrowError::MathOverflow)
    }

    /// Vested minus claimed, ignoring the cliff gate. Used where the
    /// recipient's entitlement matters even though it is not yet
    /// claimable (revocation accounting, over-funding recovery).
    fn vested_but_unclaimed_at(&self, now: i64) -> EscrowResult<u64> {
        self.vested_at(now)?
            .checked_sub(self.total_claimed)
            .ok_or(EscrowError::MathOverflow)
    }

    fn cliff_end(&self) -> EscrowResult<i64> {
        self.start_time
            .checked_add(self.cliff_length)
            .ok_or(EscrowError::MathOverflow)
    }

    /// Amount a claim of `requested` would move right now.
    pub fn claimable_at(&self, now: i64, requested: u64) -> EscrowResult<u64> {
        Ok(self.unclaimed_at(now)?.min(requested))
    }

    /// Records a claim already bounded by `claimable_at`.
    pub fn record_claim(&mut self, amount: u64) -> EscrowResult<()> {
        let claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(EscrowError::MathOverflow)?;
        if claimed > self.total_locked {
            return Err(EscrowError::MathOverflow);
        }
        self.total_claimed = claimed;
        Ok(())
    }

    /// Freezes the vesting ceiling at `now` and returns the still-locked
    /// remainder owed back to the grantor.
    pub fn revoke_unvested_at(&mut self, now: i64) -> EscrowResult<u64> {
        if !self.activated {
            return Err(EscrowError::NotActivated);
        }
        if !self.revocation_mode.allows_revoke_unvested() {
            return Err(EscrowError::NotRevocable);
        }
        if self.disabled_at <= now {
            return Err(EscrowError::AlreadyRevoked);
        }
        let remainder = self
            .total_locked
            .checked_sub(self.vested_at(now)?)
            .ok_or(EscrowError::MathOverflow)?;
        self.disabled_at = now;
        Ok(remainder)
    }

    /// Forecloses everything not yet claimed, vested or not, and returns
    /// the amount owed back to the grantor. Valid after a prior
    /// `revoke_unvested_at` (forecloses the frozen vested remainder).
    pub fn revoke_all_at(&mut self, now: i64) -> EscrowResult<u64> {
        if !self.activated {
            return Err(EscrowError::NotActivated);
        }
        if !self.revocation_mode.allows_revoke_all() {
            return Err(EscrowError::NotFullyRevocable);
        }
        if self.fully_revoked {
            return Err(EscrowError::AlreadyFullyRevoked);
        }
        let amount = self
            .vested_but_unclaimed_at(now)?
            .checked_add(self.locked_at(now)?)
            .ok_or(EscrowError::MathOverflow)?;
        self.fully_revoked = true;
        self.disabled_at = self.disabled_at.min(now);
        Ok(amount)
    }

    /// Portion of the vault balance not owed to anyone: over-funding
    /// beyond the locked remainder and the recipient's entitlement.
    pub fn recoverable_at(&self, now: i64, vault_balance: u64) -> EscrowResult<u64> {
        let owed = if self.fully_revoked {
            0
        } else {
            self.locked_at(now)?
                .checked_add(self.vested_but_unclaimed_at(now)?)
                .ok_or(EscrowError::MathOverflow)?
        };
        Ok(vault_balance.saturating_sub(owed))
    }
}

impl TwoStepOwned for VestingEscrow {
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

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_000_000;

    fn escrow(total: u64, duration: i64, cliff: i64) -> VestingEscrow {
        VestingEscrow {
            factory: Pubkey::new_unique(),
            index: 0,
            token_mint: Pubkey::new_unique(),
            recipient: Pubkey::new_unique(),
            pending_recipient: Pubkey::default(),
            owner: Pubkey::new_unique(),
            pending_owner: Pubkey::default(),
            manager: Pubkey::default(),
            total_locked: total,
            start_time: START,
            end_time: START + duration,
            cliff_length: cliff,
            disabled_at: START + duration,
            total_claimed: 0,
            revocation_mode: RevocationMode::FullyRevocable,
            initialized: true,
            activated: true,
            fully_revoked: false,
        }
    }

    #[test]
    fn nothing_vested_before_start() {
        let e = escrow(100, 300, 0);
        for now in [0, START - 100, START - 1, START] {
            assert_eq!(e.vested_at(now).unwrap(), 0);
            assert_eq!(e.unclaimed_at(now).unwrap(), 0);
        }
        assert_eq!(e.locked_at(START - 1).unwrap(), 100);
    }

    #[test]
    fn everything_vested_after_end() {
        let e = escrow(100, 300, 0);
        for now in [START + 300, START + 301, START + 10_000] {
            assert_eq!(e.vested_at(now).unwrap(), 100);
            assert_eq!(e.unclaimed_at(now).unwrap(), 100);
            assert_eq!(e.locked_at(now).unwrap(), 0);
        }
    }

    #[test]
    fn all_getters_zero_before_activation() {
        let mut e = escrow(100, 300, 0);
        e.activated = false;
        let now = START + 150;
        assert_eq!(e.vested_at(now).unwrap(), 0);
        assert_eq!(e.unclaimed_at(now).unwrap(), 0);
        assert_eq!(e.locked_at(now).unwrap(), 0);
    }

    #[test]
    fn midpoint_scenario() {
        // 100 tokens over 300 seconds, no cliff: half vested at T+150.
        let e = escrow(100, 300, 0);
        assert_eq!(e.unclaimed_at(START + 150).unwrap(), 50);
        assert_eq!(e.locked_at(START + 150).unwrap(), 50);
    }

    #[test]
    fn curve_floors_integer_division() {
        let e = escrow(100, 300, 0);
        assert_eq!(e.vested_at(START + 50).unwrap(), 16);
        assert_eq!(e.vested_at(START + 101).unwrap(), 33);
    }

    #[test]
    fn vested_is_monotonic_and_constant_after_disabled_at() {
        let mut e = escrow(997, 300, 0);
        e.disabled_at = START + 200;
        let mut last = 0;
        for now in (START - 10)..(START + 400) {
            let v = e.vested_at(now).unwrap();
            assert!(v >= last);
            last = v;
        }
        assert_eq!(e.vested_at(START + 200).unwrap(), last);
        assert_eq!(e.vested_at(START + 10_000).unwrap(), last);
    }

    #[test]
    fn cliff_gates_claimability_not_the_curve() {
        // cliff 100 out of 300: at T+50 the curve has vested ~16 but
        // nothing is claimable; just past the cliff ~33 is claimable.
        let e = escrow(100, 300, 100);
        assert_eq!(e.vested_at(START + 50).unwrap(), 16);
        assert_eq!(e.unclaimed_at(START + 50).unwrap(), 0);
        assert_eq!(e.unclaimed_at(START + 99).unwrap(), 0);
        assert_eq!(e.unclaimed_at(START + 101).unwrap(), 33);
    }

    #[test]
    fn claim_is_idempotent_at_fixed_timestamp() {
        let mut e = escrow(100, 300, 0);
        let now = START + 150;
        let first = e.claimable_at(now, u64::MAX).unwrap();
        assert_eq!(first, 50);
        e.record_claim(first).unwrap();
        assert_eq!(e.claimable_at(now, u64::MAX).unwrap(), 0);
    }

    #[test]
    fn partial_claim_is_bounded_by_request() {
        let mut e = escrow(100, 300, 0);
        let now = START + 150;
        assert_eq!(e.claimable_at(now, 20).unwrap(), 20);
        e.record_claim(20).unwrap();
        assert_eq!(e.claimable_at(now, u64::MAX).unwrap(), 30);
    }

    #[test]
    fn revoke_unvested_freezes_ceiling() {
        // Revoke mid-way on the 100/300 schedule: 50 goes back to the
        // owner, the other 50 stays claimable.
        let mut e = escrow(100, 300, 0);
        let now = START + 150;
        let returned = e.revoke_unvested_at(now).unwrap();
        assert_eq!(returned, 50);
        assert_eq!(e.locked_at(now).unwrap(), 0);
        assert_eq!(e.unclaimed_at(now).unwrap(), 50);
        assert_eq!(e.unclaimed_at(START + 10_000).unwrap(), 50);
    }

    #[test]
    fn revoke_unvested_before_start_returns_everything() {
        let mut e = escrow(100, 300, 0);
        let returned = e.revoke_unvested_at(START - 10).unwrap();
        assert_eq!(returned, 100);
        assert_eq!(e.unclaimed_at(START + 10_000).unwrap(), 0);
    }

    #[test]
    fn revoke_unvested_replay_fails() {
        let mut e = escrow(100, 300, 0);
        e.revoke_unvested_at(START + 150).unwrap();
        assert!(matches!(
            e.revoke_unvested_at(START + 160),
            Err(EscrowError::AlreadyRevoked)
        ));
    }

    #[test]
    fn revoke_unvested_after_disabled_at_fails() {
        let mut e = escrow(100, 300, 0);
        assert!(matches!(
            e.revoke_unvested_at(START + 300),
            Err(EscrowError::AlreadyRevoked)
        ));
    }

    #[test]
    fn revoke_unvested_requires_revocable_mode() {
        let mut e = escrow(100, 300, 0);
        e.revocation_mode = RevocationMode::NonRevocable;
        assert!(matches!(
            e.revoke_unvested_at(START + 150),
            Err(EscrowError::NotRevocable)
        ));
    }

    #[test]
    fn revoke_all_forecloses_unclaimed() {
        let mut e = escrow(100, 300, 0);
        let now = START + 150;
        e.record_claim(10).unwrap();
        let returned = e.revoke_all_at(now).unwrap();
        assert_eq!(returned, 90);
        assert_eq!(e.unclaimed_at(now).unwrap(), 0);
        assert_eq!(e.unclaimed_at(START + 10_000).unwrap(), 0);
        assert_eq!(e.locked_at(now).unwrap(), 0);
    }

    #[test]
    fn revoke_all_during_cliff_takes_vested_portion_too() {
        let mut e = escrow(100, 300, 100);
        let returned = e.revoke_all_at(START + 50).unwrap();
        assert_eq!(returned, 100);
    }

    #[test]
    fn revoke_all_after_revoke_unvested_takes_the_rest() {
        let mut e = escrow(100, 300, 0);
        let first = e.revoke_unvested_at(START + 150).unwrap();
        assert_eq!(first, 50);
        let second = e.revoke_all_at(START + 200).unwrap();
        assert_eq!(second, 50);
    }

    #[test]
    fn revoke_all_replay_fails() {
        let mut e = escrow(100, 300, 0);
        e.revoke_all_at(START + 150).unwrap();
        assert!(matches!(
            e.revoke_all_at(START + 150),
            Err(EscrowError::AlreadyFullyRevoked)
        ));
    }

    #[test]
    fn revoke_all_requires_fully_revocable_mode() {
        let mut e = escrow(100, 300, 0);
        e.revocation_mode = RevocationMode::RevokeUnvestedOnly;
        assert!(matches!(
            e.revoke_all_at(START + 150),
            Err(EscrowError::NotFullyRevocable)
        ));
    }

    #[test]
    fn conservation_across_claim_and_revocation() {
        // total_claimed + locked + unclaimed + returned == total_locked,
        // at every step of a claim/revoke/claim sequence.
        let mut e = escrow(100, 300, 0);
        let mut returned = 0u64;

        let check = |e: &VestingEscrow, returned: u64, now: i64| {
            let sum = e.total_claimed
                + e.locked_at(now).unwrap()
                + e.unclaimed_at(now).unwrap()
                + returned;
            assert_eq!(sum, e.total_locked);
        };

        check(&e, returned, START + 90);
        let claim = e.claimable_at(START + 90, u64::MAX).unwrap();
        e.record_claim(claim).unwrap();
        check(&e, returned, START + 90);

        returned += e.revoke_unvested_at(START + 150).unwrap();
        check(&e, returned, START + 150);
        check(&e, returned, START + 250);

        let claim = e.claimable_at(START + 250, u64::MAX).unwrap();
        e.record_claim(claim).unwrap();
        check(&e, returned, START + 250);

        returned += e.revoke_all_at(START + 260).unwrap();
        check(&e, returned, START + 260);
        check(&e, returned, START + 10_000);
    }

    #[test]
    fn recoverable_is_overfunding_only() {
        let e = escrow(100, 300, 0);
        // exactly funded: nothing to recover at any point
        assert_eq!(e.recoverable_at(START + 150, 100).unwrap(), 0);
        // 7 tokens of over-funding
        assert_eq!(e.recoverable_at(START + 150, 107).unwrap(), 7);
        // during a cliff the vested-but-gated portion is still owed
        let c = escrow(100, 300, 100);
        assert_eq!(c.recoverable_at(START + 50, 100).unwrap(), 0);
    }

    #[test]
    fn recoverable_after_end_leaves_unclaimed_owed() {
        let mut e = escrow(100, 300, 0);
        e.record_claim(40).unwrap();
        assert_eq!(e.recoverable_at(START + 400, 60).unwrap(), 0);
        assert_eq!(e.recoverable_at(START + 400, 65).unwrap(), 5);
    }

    #[test]
    fn schedule_validation() {
        assert!(VestingEscrow::validate_schedule(100, 400, 0).is_ok());
        assert!(VestingEscrow::validate_schedule(100, 400, 300).is_ok());
        assert!(matches!(
            VestingEscrow::validate_schedule(100, 100, 0),
            Err(EscrowError::InvalidDuration)
        ));
        assert!(matches!(
            VestingEscrow::validate_schedule(400, 100, 0),
            Err(EscrowError::InvalidDuration)
        ));
        assert!(matches!(
            VestingEscrow::validate_schedule(100, 400, 301),
            Err(EscrowError::InvalidCliff)
        ));
        assert!(matches!(
            VestingEscrow::validate_schedule(100, 400, -1),
            Err(EscrowError::InvalidCliff)
        ));
    }

    #[test]
    fn flavor_mapping() {
        assert_eq!(
            RevocationMode::from_flavor(0).unwrap(),
            RevocationMode::RevokeUnvestedOnly
        );
        assert_eq!(
            RevocationMode::from_flavor(1).unwrap(),
            RevocationMode::FullyRevocable
        );
        assert!(matches!(
            RevocationMode::from_flavor(2),
            Err(EscrowError::InvalidFlavor)
        ));
        assert!(matches!(
            RevocationMode::from_flavor(154),
            Err(EscrowError::InvalidFlavor)
        ));
    }
}
