//! Two-step ownership handover shared by the factory, escrow and
//! voting adapter accounts: the owner commits a candidate, the
//! candidate applies. A direct single-step transfer to an unreachable
//! key is not possible.

use anchor_lang::prelude::Pubkey;

use crate::error::EscrowError;

pub trait TwoStepOwned {
    fn owner(&self) -> Pubkey;
    fn set_owner(&mut self, key: Pubkey);
    fn pending_owner(&self) -> Pubkey;
    fn set_pending_owner(&mut self, key: Pubkey);

    /// Owner nominates a non-default candidate.
    fn commit_transfer_ownership(
        &mut self,
        caller: Pubkey,
        candidate: Pubkey,
    ) -> Result<(), EscrowError> {
        if caller != self.owner() {
            return Err(EscrowError::NotOwner);
        }
        if candidate == Pubkey::default() {
            return Err(EscrowError::ZeroAddress);
        }
        self.set_pending_owner(candidate);
        Ok(())
    }

    /// Candidate takes ownership; clears the nomination.
    fn apply_transfer_ownership(&mut self, caller: Pubkey) -> Result<(), EscrowError> {
        let pending = self.pending_owner();
        if pending == Pubkey::default() || caller != pending {
            return Err(EscrowError::NotPendingOwner);
        }
        self.set_owner(pending);
        self.set_pending_owner(Pubkey::default());
        Ok(())
    }

    /// Owner abandons the role; also drops any pending candidate.
    fn renounce_ownership(&mut self, caller: Pubkey) -> Result<(), EscrowError> {
        if caller != self.owner() {
            return Err(EscrowError::NotOwner);
        }
        self.set_owner(Pubkey::default());
        self.set_pending_owner(Pubkey::default());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owned {
        owner: Pubkey,
        pending_owner: Pubkey,
    }

    impl TwoStepOwned for Owned {
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

    fn owned() -> (Owned, Pubkey) {
        let owner = Pubkey::new_unique();
        (
            Owned {
                owner,
                pending_owner: Pubkey::default(),
            },
            owner,
        )
    }

    #[test]
    fn commit_then_apply() {
        let (mut o, owner) = owned();
        let candidate = Pubkey::new_unique();
        o.commit_transfer_ownership(owner, candidate).unwrap();
        assert_eq!(o.owner(), owner);
        assert_eq!(o.pending_owner(), candidate);
        o.apply_transfer_ownership(candidate).unwrap();
        assert_eq!(o.owner(), candidate);
        assert_eq!(o.pending_owner(), Pubkey::default());
    }

    #[test]
    fn commit_requires_owner() {
        let (mut o, _) = owned();
        let stranger = Pubkey::new_unique();
        assert!(matches!(
            o.commit_transfer_ownership(stranger, stranger),
            Err(EscrowError::NotOwner)
        ));
    }

    #[test]
    fn commit_rejects_default_candidate() {
        let (mut o, owner) = owned();
        assert!(matches!(
            o.commit_transfer_ownership(owner, Pubkey::default()),
            Err(EscrowError::ZeroAddress)
        ));
    }

    #[test]
    fn apply_requires_pending_candidate() {
        let (mut o, owner) = owned();
        assert!(matches!(
            o.apply_transfer_ownership(owner),
            Err(EscrowError::NotPendingOwner)
        ));
        let candidate = Pubkey::new_unique();
        o.commit_transfer_ownership(owner, candidate).unwrap();
        assert!(matches!(
            o.apply_transfer_ownership(owner),
            Err(EscrowError::NotPendingOwner)
        ));
    }

    #[test]
    fn renounce_clears_both() {
        let (mut o, owner) = owned();
        o.commit_transfer_ownership(owner, Pubkey::new_unique())
            .unwrap();
        o.renounce_ownership(owner).unwrap();
        assert_eq!(o.owner(), Pubkey::default());
        assert_eq!(o.pending_owner(), Pubkey::default());
        // nobody is owner anymore, commits are dead
        assert!(matches!(
            o.commit_transfer_ownership(owner, Pubkey::new_unique()),
            Err(EscrowError::NotOwner)
        ));
    }
}
