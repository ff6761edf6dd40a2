use soroban_sdk::{contracttype, Address, String};

// Per-account entries live in persistent storage, each with its own TTL
pub const DAY_IN_LEDGERS: u32 = 17_280; // ~5s ledgers
pub const ACCOUNT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const ACCOUNT_LIFETIME_THRESHOLD: u32 = ACCOUNT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allowance {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    pub decimal: u32,
    pub name: String,
    pub symbol: String,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    /// The only address allowed to issue new dION
    Minter,
    Metadata,
    TotalSupply,
    Initialized,
    // Persistent
    Balance(Address),
    Allowance(Address, Address), // (from, spender)
}
