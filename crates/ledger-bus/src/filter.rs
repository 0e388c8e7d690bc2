//! # Event Filters
//!
//! Subscription-side selection of ledger events by topic and by account.

use ledger_types::{Address, LedgerEvent, LedgerTopic};
use serde::{Deserialize, Serialize};

/// Selects which events a subscription receives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<LedgerTopic>,
    /// Accounts of interest. Empty means all accounts.
    pub accounts: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<LedgerTopic>) -> Self {
        Self {
            topics,
            accounts: Vec::new(),
        }
    }

    /// Create a filter for events touching specific accounts.
    #[must_use]
    pub fn accounts(accounts: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            accounts,
        }
    }

    /// Narrow an existing filter to the given accounts.
    #[must_use]
    pub fn with_accounts(mut self, accounts: Vec<Address>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        let topic_match = self.topics.is_empty() || self.topics.contains(&event.topic());

        let account_match =
            self.accounts.is_empty() || self.accounts.iter().any(|a| event.involves(a));

        topic_match && account_match
    }
}
