//! Program-wide constants.

/// Seed prefix for factory PDAs: ["factory", token_mint, seed_le].
pub const FACTORY_SEED: &[u8] = b"factory";

/// Seed prefix for escrow account PDAs: ["escrow", factory, index_le].
pub const ESCROW_SEED: &[u8] = b"escrow";

/// Seed prefix for voting adapter PDAs: ["voting_adapter", seed_le].
pub const VOTING_ADAPTER_SEED: &[u8] = b"voting_adapter";

/// Seed prefix for escrow vault PDAs: ["vault", escrow].
pub const VAULT_SEED: &[u8] = b"vault";

/// Escrow flavor tag: revocation limited to unvested tokens.
pub const ESCROW_TYPE_SIMPLE: u8 = 0;

/// Escrow flavor tag: owner may additionally revoke vested-but-unclaimed tokens.
pub const ESCROW_TYPE_FULLY_REVOKABLE: u8 = 1;

/// Max escrows funded per `activate_vesting_escrows` call (transaction
/// account limit leaves no room for more escrow/vault pairs).
pub const MAX_BATCH_ACTIVATIONS: usize = 12;

/// Claim amount sentinel: claim everything currently available.
pub const CLAIM_ALL: u64 = u64::MAX;
