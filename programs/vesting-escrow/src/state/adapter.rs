use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};

use crate::error::{EscrowError, EscrowResult};
use crate::utils::ownable::TwoStepOwned;

/// Translation layer between opaque governance calldata and the
/// external governance programs. Holds no vesting state; escrows
/// resolve the authoritative adapter through their factory.
#[account]
pub struct VotingAdapter {
    /// Vote-casting backend (`vote(vote_id, support)`); default = unsupported.
    pub voting_contract: Pubkey,
    /// Delegate-registry backend (`set_delegate(delegate)`); default = unsupported.
    pub snapshot_delegate_contract: Pubkey,
    /// Generic delegation backend (`delegate(delegate)`); default = unsupported.
    pub delegation_contract: Pubkey,
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
    /// Caller-chosen PDA seed; allows several adapters side by side.
    pub seed: u64,
}

impl VotingAdapter {
    pub const SIZE: usize =
        32 + // voting_contract
        32 + // snapshot_delegate_contract
        32 + // delegation_contract
        32 + // owner
        32 + // pending_owner
        8;   // seed

    /// Backend program for an action, or `NotImplemented` when that
    /// backend was configured as the default key.
    pub fn backend_for(&self, action: &GovernanceAction) -> EscrowResult<Pubkey> {
        let backend = match action {
            GovernanceAction::Delegate { .. } => self.delegation_contract,
            GovernanceAction::AragonVote { .. } => self.voting_contract,
            GovernanceAction::SnapshotSetDelegate { .. } => self.snapshot_delegate_contract,
        };
        if backend == Pubkey::default() {
            return Err(EscrowError::NotImplemented);
        }
        Ok(backend)
    }
}

impl TwoStepOwned for VotingAdapter {
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

/// Supported governance backend calls, as a tagged union. The borsh
/// encoding of a value is the opaque calldata callers hand to the
/// escrow, and doubles as the instruction data forwarded to the
/// backend program.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GovernanceAction {
    /// Generic delegation-contract `delegate(delegate)`.
    Delegate { delegate: Pubkey },
    /// Classic voting-system `vote(vote_id, support)`.
    AragonVote { vote_id: u64, support: bool },
    /// Delegate-registry `set_delegate(delegate)`.
    SnapshotSetDelegate { delegate: Pubkey },
}

const TAG_DELEGATE: u8 = 0;
const TAG_ARAGON_VOTE: u8 = 1;
const TAG_SNAPSHOT_SET_DELEGATE: u8 = 2;

impl GovernanceAction {
    /// Strict decode: unknown tags, short payloads and trailing bytes
    /// are all rejected, and no funds can have moved by then.
    pub fn decode(data: &[u8]) -> EscrowResult<Self> {
        Self::try_from_slice(data).map_err(|_| EscrowError::CalldataDecodeError)
    }
}

/// Calldata encoders. Byte-for-byte the borsh layout of
/// `GovernanceAction`, assembled by hand so encoding is infallible.
pub fn encode_delegate_calldata(delegate: Pubkey) -> Vec<u8> {
    let mut data = Vec::with_capacity(33);
    data.push(TAG_DELEGATE);
    data.extend_from_slice(delegate.as_ref());
    data
}

pub fn encode_aragon_vote_calldata(vote_id: u64, support: bool) -> Vec<u8> {
    let mut data = Vec::with_capacity(10);
    data.push(TAG_ARAGON_VOTE);
    data.extend_from_slice(&vote_id.to_le_bytes());
    data.push(support as u8);
    data
}

pub fn encode_snapshot_set_delegate_calldata(delegate: Pubkey) -> Vec<u8> {
    let mut data = Vec::with_capacity(33);
    data.push(TAG_SNAPSHOT_SET_DELEGATE);
    data.extend_from_slice(delegate.as_ref());
    data
}

/// Builds the backend instruction: the acting authority (escrow PDA or
/// direct caller) leads as a readonly signer, any backend-specific
/// accounts are passed through untouched.
pub fn governance_instruction(
    backend: Pubkey,
    authority: Pubkey,
    action: &GovernanceAction,
    pass_through: &[AccountMeta],
) -> Instruction {
    let mut accounts = Vec::with_capacity(1 + pass_through.len());
    accounts.push(AccountMeta::new_readonly(authority, true));
    accounts.extend_from_slice(pass_through);
    Instruction {
        program_id: backend,
        accounts,
        data: match action {
            GovernanceAction::Delegate { delegate } => encode_delegate_calldata(*delegate),
            GovernanceAction::AragonVote { vote_id, support } => {
                encode_aragon_vote_calldata(*vote_id, *support)
            }
            GovernanceAction::SnapshotSetDelegate { delegate } => {
                encode_snapshot_set_delegate_calldata(*delegate)
            }
        },
    }
}

/// Forwards the caller-supplied account list to the backend verbatim.
pub fn pass_through_metas(accounts: &[AccountInfo]) -> Vec<AccountMeta> {
    accounts
        .iter()
        .map(|ai| AccountMeta {
            pubkey: *ai.key,
            is_signer: ai.is_signer,
            is_writable: ai.is_writable,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> VotingAdapter {
        VotingAdapter {
            voting_contract: Pubkey::new_unique(),
            snapshot_delegate_contract: Pubkey::new_unique(),
            delegation_contract: Pubkey::default(),
            owner: Pubkey::new_unique(),
            pending_owner: Pubkey::default(),
            seed: 0,
        }
    }

    #[test]
    fn encoders_match_borsh_layout() {
        let delegate = Pubkey::new_unique();
        assert_eq!(
            GovernanceAction::decode(&encode_delegate_calldata(delegate)).unwrap(),
            GovernanceAction::Delegate { delegate }
        );
        assert_eq!(
            GovernanceAction::decode(&encode_aragon_vote_calldata(154, true)).unwrap(),
            GovernanceAction::AragonVote {
                vote_id: 154,
                support: true
            }
        );
        assert_eq!(
            GovernanceAction::decode(&encode_snapshot_set_delegate_calldata(delegate)).unwrap(),
            GovernanceAction::SnapshotSetDelegate { delegate }
        );
    }

    #[test]
    fn decode_rejects_malformed_calldata() {
        let truncated = encode_delegate_calldata(Pubkey::new_unique());
        let mut trailing = encode_aragon_vote_calldata(1, false);
        trailing.push(0);
        // empty, unknown tag, truncated payload, trailing garbage
        for data in [&[][..], &[7u8][..], &truncated[..20], &trailing[..]] {
            assert!(matches!(
                GovernanceAction::decode(data),
                Err(EscrowError::CalldataDecodeError)
            ));
        }
    }

    #[test]
    fn backend_resolution() {
        let a = adapter();
        let vote = GovernanceAction::AragonVote {
            vote_id: 1,
            support: false,
        };
        assert_eq!(a.backend_for(&vote).unwrap(), a.voting_contract);

        let delegate = GovernanceAction::Delegate {
            delegate: Pubkey::new_unique(),
        };
        assert!(matches!(
            a.backend_for(&delegate),
            Err(EscrowError::NotImplemented)
        ));
    }

    #[test]
    fn instruction_leads_with_signing_authority() {
        let a = adapter();
        let authority = Pubkey::new_unique();
        let action = GovernanceAction::AragonVote {
            vote_id: 312,
            support: true,
        };
        let ix = governance_instruction(
            a.backend_for(&action).unwrap(),
            authority,
            &action,
            &[AccountMeta::new(Pubkey::new_unique(), false)],
        );
        assert_eq!(ix.program_id, a.voting_contract);
        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[0].pubkey, authority);
        assert!(ix.accounts[0].is_signer);
        assert!(!ix.accounts[0].is_writable);
        assert_eq!(ix.data, encode_aragon_vote_calldata(312, true));
    }
}
