use anchor_lang::prelude::*;

/// Result of the pure state helpers; converts into the anchor error
/// type with `?` at the instruction boundary.
pub type EscrowResult<T> = core::result::Result<T, EscrowError>;

/// Custom error codes for the vesting escrow program.
#[error_code]
pub enum EscrowError {
    #[msg("can only initialize once")]
    AlreadyInitialized,

    #[msg("escrow already activated")]
    AlreadyActivated,

    #[msg("not activated")]
    NotActivated,

    #[msg("unauthorized: recipient signature required")]
    NotRecipient,

    #[msg("unauthorized: owner signature required")]
    NotOwner,

    #[msg("unauthorized: pending owner signature required")]
    NotPendingOwner,

    #[msg("unauthorized: pending recipient signature required")]
    NotPendingRecipient,

    #[msg("unauthorized: owner or manager signature required")]
    NotOwnerOrManager,

    #[msg("not allowed for non-revocable vesting")]
    NotRevocable,

    #[msg("not allowed for ordinary vesting")]
    NotFullyRevocable,

    #[msg("already revoked")]
    AlreadyRevoked,

    #[msg("already fully revoked")]
    AlreadyFullyRevoked,

    #[msg("incorrect vesting duration")]
    InvalidDuration,

    #[msg("incorrect vesting cliff")]
    InvalidCliff,

    #[msg("zero recipient address")]
    ZeroRecipient,

    #[msg("zero owner address")]
    ZeroAddress,

    #[msg("zero vesting amount")]
    ZeroAmount,

    #[msg("incorrect escrow type")]
    InvalidFlavor,

    #[msg("insufficient escrow funding")]
    InsufficientFunds,

    #[msg("voting backend not configured")]
    NotImplemented,

    #[msg("voting adapter not set")]
    VotingAdapterNotSet,

    #[msg("voting adapter does not match factory")]
    AdapterMismatch,

    #[msg("malformed governance calldata")]
    CalldataDecodeError,

    #[msg("escrow does not belong to this factory")]
    FactoryMismatch,

    #[msg("wrong governance program account")]
    InvalidGovernanceProgram,

    #[msg("empty batch")]
    EmptyBatch,

    #[msg("batch size too large")]
    BatchTooLarge,

    #[msg("batch accounts do not match amounts")]
    BatchMismatch,

    #[msg("invalid token mint")]
    InvalidTokenMint,

    #[msg("invalid token account")]
    InvalidTokenAccount,

    #[msg("math overflow")]
    MathOverflow,
}
