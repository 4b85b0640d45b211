// crates/dascoin-daemon/src/genesis.rs
//
// Genesis state for the replay daemon.
//
// A genesis file names the chain's starting time and parameters, its
// accounts, the free cycles those accounts start with, which accounts hold
// the issuing authorities, an optional license catalogue, and a schedule of
// operations to replay at given block heights.
//
// Example:
//
//   initial_timestamp = "2017-07-14T00:00:00Z"
//
//   [initial_parameters]
//   enable_dascoin_queue = true
//   dascoin_reward_amount = 5000000
//
//   [authorities]
//   cycle_issuer = "cycle-issuer"
//   license_issuer = "license-issuer"
//
//   [[initial_accounts]]
//   name = "alice"
//   id = 10
//
//   [[initial_issued_cycles]]
//   owner_name = "alice"
//   amount = 200
//
//   [[operations]]
//   block = 2
//   [operations.operation]
//   op = "submit_cycles_to_queue"
//   account = 10
//   amount = 200

use std::collections::{BTreeMap, HashMap};
use std::fs;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use dascoin_core::{
    AccountId, BalanceLedger, ChainAuthorities, ChainParameters, DascoinError, LicenseType,
    ShareType, Timestamp,
};
use dascoin_economics::{ChainState, InMemoryLedger, InMemoryLicenseCatalog, Operation};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenesisAccount {
    pub name: String,
    pub id: AccountId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenesisCycles {
    pub owner_name: String,
    pub amount: ShareType,
}

/// Authority holders, by account name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenesisAuthorities {
    pub cycle_issuer: String,
    pub license_issuer: String,
}

/// An operation to apply in the block at `block` (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduledOperation {
    pub block: u64,
    pub operation: Operation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenesisConfig {
    #[serde(default = "default_initial_timestamp")]
    pub initial_timestamp: Timestamp,

    #[serde(default)]
    pub initial_parameters: ChainParameters,

    pub authorities: GenesisAuthorities,

    #[serde(default)]
    pub initial_accounts: Vec<GenesisAccount>,

    #[serde(default)]
    pub initial_issued_cycles: Vec<GenesisCycles>,

    /// License catalogue. The built-in catalogue is used when empty.
    #[serde(default)]
    pub license_types: Vec<LicenseType>,

    #[serde(default)]
    pub operations: Vec<ScheduledOperation>,
}

fn default_initial_timestamp() -> Timestamp {
    DateTime::<Utc>::UNIX_EPOCH
}

impl Default for GenesisConfig {
    /// Two authority accounts and nothing else.
    fn default() -> Self {
        Self {
            initial_timestamp: default_initial_timestamp(),
            initial_parameters: ChainParameters::default(),
            authorities: GenesisAuthorities {
                cycle_issuer: "cycle-issuer".to_string(),
                license_issuer: "license-issuer".to_string(),
            },
            initial_accounts: vec![
                GenesisAccount {
                    name: "cycle-issuer".to_string(),
                    id: AccountId(1),
                },
                GenesisAccount {
                    name: "license-issuer".to_string(),
                    id: AccountId(2),
                },
            ],
            initial_issued_cycles: Vec::new(),
            license_types: Vec::new(),
            operations: Vec::new(),
        }
    }
}

impl GenesisConfig {
    pub fn load(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let genesis: GenesisConfig = toml::from_str(&contents)?;
        Ok(genesis)
    }

    fn account_ids(&self) -> Result<HashMap<&str, AccountId>, DascoinError> {
        let mut ids = HashMap::with_capacity(self.initial_accounts.len());
        for account in &self.initial_accounts {
            if ids.insert(account.name.as_str(), account.id).is_some() {
                return Err(DascoinError::InvalidParameter(format!(
                    "duplicate genesis account name: {}",
                    account.name
                )));
            }
        }
        Ok(ids)
    }

    /// Build the chain state at the genesis timestamp.
    ///
    /// # Errors
    /// `NotFound` for an authority or cycle owner that names no genesis
    /// account, `InvalidParameter` for duplicate names or invalid parameters,
    /// and ledger errors from issuing the initial cycles.
    pub fn build_chain_state(&self) -> Result<ChainState, DascoinError> {
        let ids = self.account_ids()?;
        let resolve = |name: &str| {
            ids.get(name)
                .copied()
                .ok_or_else(|| DascoinError::NotFound(format!("genesis account {}", name)))
        };

        let authorities = ChainAuthorities {
            cycle_issuing_authority: resolve(&self.authorities.cycle_issuer)?,
            license_issuing_authority: resolve(&self.authorities.license_issuer)?,
        };

        let mut ledger = InMemoryLedger::new();
        for grant in &self.initial_issued_cycles {
            ledger.issue_cycles(resolve(&grant.owner_name)?, grant.amount)?;
        }

        let catalog = if self.license_types.is_empty() {
            InMemoryLicenseCatalog::with_defaults()
        } else {
            InMemoryLicenseCatalog::from_templates(self.license_types.iter().cloned())
        };

        tracing::info!(
            accounts = ids.len(),
            licenses = catalog.len(),
            scheduled = self.operations.len(),
            timestamp = %self.initial_timestamp,
            "genesis loaded"
        );

        ChainState::new(
            ledger,
            catalog,
            self.initial_parameters.clone(),
            authorities,
            self.initial_timestamp,
        )
    }

    /// Scheduled operations grouped by block height, each group in file order.
    pub fn schedule(&self) -> BTreeMap<u64, Vec<Operation>> {
        let mut schedule: BTreeMap<u64, Vec<Operation>> = BTreeMap::new();
        for scheduled in &self.operations {
            schedule
                .entry(scheduled.block)
                .or_default()
                .push(scheduled.operation.clone());
        }
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dascoin_core::DASCOIN_PRECISION;

    const GENESIS: &str = r#"
        initial_timestamp = "2017-07-14T00:00:00Z"

        [initial_parameters]
        enable_dascoin_queue = true
        dascoin_reward_amount = 5000000

        [authorities]
        cycle_issuer = "cycle-issuer"
        license_issuer = "license-issuer"

        [[initial_accounts]]
        name = "cycle-issuer"
        id = 1

        [[initial_accounts]]
        name = "license-issuer"
        id = 2

        [[initial_accounts]]
        name = "alice"
        id = 10

        [[initial_issued_cycles]]
        owner_name = "alice"
        amount = 200

        [[operations]]
        block = 2
        [operations.operation]
        op = "submit_cycles_to_queue"
        account = 10
        amount = 200

        [[operations]]
        block = 2
        [operations.operation]
        op = "issue_license"
        issuer = 2
        account = 10
        license = "standard-charter"
        bonus_percentage = 100

        [[operations]]
        block = 1
        [operations.operation]
        op = "submit_reserve_cycles_to_queue"
        issuer = 1
        account = 10
        amount = 400
        frequency_lock = 200
    "#;

    #[test]
    fn test_parse_genesis() {
        let genesis: GenesisConfig = toml::from_str(GENESIS).unwrap();
        assert_eq!(
            genesis.initial_timestamp,
            Utc.with_ymd_and_hms(2017, 7, 14, 0, 0, 0).unwrap()
        );
        assert!(genesis.initial_parameters.enable_dascoin_queue);
        assert_eq!(genesis.initial_parameters.dascoin_reward_amount, 500 * DASCOIN_PRECISION);
        assert_eq!(genesis.initial_parameters.reward_interval_time_seconds, 600);
        assert_eq!(genesis.initial_accounts.len(), 3);
        assert_eq!(genesis.operations.len(), 3);
    }

    #[test]
    fn test_build_chain_state() {
        let genesis: GenesisConfig = toml::from_str(GENESIS).unwrap();
        let chain = genesis.build_chain_state().unwrap();

        assert_eq!(chain.authorities().cycle_issuing_authority, AccountId(1));
        assert_eq!(chain.authorities().license_issuing_authority, AccountId(2));
        assert_eq!(chain.access().get_free_cycle_balance(AccountId(10)), 200);
        assert!(chain.access().get_license_type("standard-charter").is_some());
        assert_eq!(chain.current_ledger_time(), genesis.initial_timestamp);
        assert_eq!(
            chain.next_reward_time(),
            Some(genesis.initial_timestamp + chrono::Duration::seconds(600))
        );
    }

    #[test]
    fn test_schedule_groups_by_block() {
        let genesis: GenesisConfig = toml::from_str(GENESIS).unwrap();
        let schedule = genesis.schedule();
        let blocks: Vec<u64> = schedule.keys().copied().collect();
        assert_eq!(blocks, vec![1, 2]);
        let names: Vec<&str> = schedule[&2].iter().map(|op| op.name()).collect();
        assert_eq!(names, vec!["submit_cycles_to_queue", "issue_license"]);
    }

    #[test]
    fn test_unknown_owner_is_not_found() {
        let mut genesis: GenesisConfig = toml::from_str(GENESIS).unwrap();
        genesis.initial_issued_cycles.push(GenesisCycles {
            owner_name: "mallory".to_string(),
            amount: 1,
        });
        let err = genesis.build_chain_state().err().unwrap();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_unknown_authority_is_not_found() {
        let mut genesis = GenesisConfig::default();
        genesis.authorities.license_issuer = "nobody".to_string();
        assert_eq!(genesis.build_chain_state().err().unwrap().kind(), "not_found");
    }

    #[test]
    fn test_duplicate_account_name_rejected() {
        let mut genesis = GenesisConfig::default();
        genesis.initial_accounts.push(GenesisAccount {
            name: "cycle-issuer".to_string(),
            id: AccountId(3),
        });
        assert_eq!(
            genesis.build_chain_state().err().unwrap().kind(),
            "invalid_parameter"
        );
    }

    #[test]
    fn test_default_genesis_builds() {
        let chain = GenesisConfig::default().build_chain_state().unwrap();
        assert_eq!(chain.access().get_reward_queue_size(), 0);
        assert!(chain.next_reward_time().is_none());
    }

    #[test]
    fn test_custom_license_catalogue() {
        let mut genesis: GenesisConfig = toml::from_str(GENESIS).unwrap();
        genesis.license_types = toml::from_str::<HashMap<String, Vec<LicenseType>>>(
            r#"
            [[licenses]]
            id = 7
            name = "founder"
            kind = "chartered"
            amount = 9000
            frequency_lock = 300
            "#,
        )
        .unwrap()
        .remove("licenses")
        .unwrap();

        let chain = genesis.build_chain_state().unwrap();
        let founder = chain.access().get_license_type("founder").unwrap();
        assert_eq!(founder.amount, 9_000);
        assert_eq!(founder.bonus_percentage, 0);
        assert!(chain.access().get_license_type("standard-charter").is_none());
    }
}
