//! # Ledger Configuration
//!
//! Construction parameters for the ledger and its service host.
//!
//! ## Environment
//!
//! | Variable | Format | Default |
//! |----------|--------|---------|
//! | `LEDGER_OWNER` | hex address, optional `0x` | zero address |
//! | `LEDGER_CAP` | decimal integer, base units | 10^24 |
//! | `LEDGER_EVENT_CAPACITY` | decimal integer | 1000 |
//!
//! The zero-address owner default is for local use; `validate_for_production`
//! rejects it.

use ledger_bus::DEFAULT_CHANNEL_CAPACITY;
use ledger_types::{Address, AddressParseError, Amount};
use thiserror::Error;

/// Environment variable holding the owner address.
pub const ENV_OWNER: &str = "LEDGER_OWNER";
/// Environment variable holding the cap.
pub const ENV_CAP: &str = "LEDGER_CAP";
/// Environment variable holding the event channel capacity.
pub const ENV_EVENT_CAPACITY: &str = "LEDGER_EVENT_CAPACITY";

/// Decimal places of one whole unit.
pub const DECIMALS: usize = 18;

/// Default cap: one million whole units.
#[must_use]
pub fn default_cap() -> Amount {
    Amount::from(1_000_000u64) * Amount::exp10(DECIMALS)
}

/// Ledger construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Initial owner and first minter.
    pub owner: Address,
    /// Immutable supply cap, in base units.
    pub cap: Amount,
    /// Buffer size of the event broadcast channel.
    pub event_channel_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            owner: Address::ZERO,
            cap: default_cap(),
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl LedgerConfig {
    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, falling back to defaults.
    ///
    /// Unset variables keep their default; set but malformed ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(owner) = lookup(ENV_OWNER) {
            config.owner = Address::from_hex(owner.trim())?;
        }
        if let Some(cap) = lookup(ENV_CAP) {
            config.cap = Amount::from_dec_str(cap.trim()).map_err(|_| {
                ConfigError::InvalidNumber {
                    var: ENV_CAP,
                    value: cap.clone(),
                }
            })?;
        }
        if let Some(capacity) = lookup(ENV_EVENT_CAPACITY) {
            config.event_channel_capacity =
                capacity
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: ENV_EVENT_CAPACITY,
                        value: capacity.clone(),
                    })?;
        }

        Ok(config)
    }

    /// Check values the ledger and bus cannot be built with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cap.is_zero() {
            return Err(ConfigError::InvalidCap);
        }
        if self.event_channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }
        Ok(())
    }

    /// Stricter check for deployments: the owner must be set explicitly.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.owner.is_zero() {
            return Err(ConfigError::MissingOwner);
        }
        Ok(())
    }
}

/// Service host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Ledger parameters.
    pub ledger: LedgerConfig,
    /// Re-check the ledger invariants after every committed operation.
    pub check_invariants: bool,
}

impl ServiceConfig {
    /// Service config around `ledger` with invariant checks off.
    #[must_use]
    pub fn new(ledger: LedgerConfig) -> Self {
        Self {
            ledger,
            check_invariants: false,
        }
    }

    /// Enable or disable invariant checks.
    #[must_use]
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.check_invariants = enabled;
        self
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Cap is zero.
    #[error("Invalid cap: cap must be greater than zero")]
    InvalidCap,

    /// Event channel capacity is zero.
    #[error("Event channel capacity must be greater than zero")]
    ZeroChannelCapacity,

    /// Owner is not a valid address.
    #[error("Invalid owner address: {0}")]
    InvalidOwner(#[from] AddressParseError),

    /// A numeric variable did not parse.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// Owner left at the zero address.
    #[error("Owner is the zero address. Set LEDGER_OWNER.")]
    MissingOwner,
}
