pub mod initialize_factory;
pub mod deploy_vesting_escrow;
pub mod activate_vesting_escrow;
pub mod activate_vesting_escrows;
pub mod claim;
pub mod revoke_unvested;
pub mod revoke_all;
pub mod recover_escrow_funds;
pub mod governance;
pub mod escrow_admin;
pub mod factory_admin;
pub mod initialize_voting_adapter;
pub mod adapter_exec;
pub mod adapter_admin;

pub use initialize_factory::*;
pub use deploy_vesting_escrow::*;
pub use activate_vesting_escrow::*;
pub use activate_vesting_escrows::*;
pub use claim::*;
pub use revoke_unvested::*;
pub use revoke_all::*;
pub use recover_escrow_funds::*;
pub use governance::*;
pub use escrow_admin::*;
pub use factory_admin::*;
pub use initialize_voting_adapter::*;
pub use adapter_exec::*;
pub use adapter_admin::*;
