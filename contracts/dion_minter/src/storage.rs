use crate::error::Error;

use soroban_sdk::{contracttype, Address, Env};

// Constants
pub const EXP_SCALE: i128 = 1_000_000_000_000_000_000; // 1e18, rates and prices
pub const BASIS_POINTS: u128 = 10_000; // 100% = 10,000 basis points

/// Strkeys of the all-zero account and contract; never valid identities
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
pub const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

/// Fraction of recognized value that converts into dION.
///
/// Invariant once stored: `denominator > 0` and `numerator <= denominator`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScaleFactor {
    pub numerator: u128,
    pub denominator: u128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenStatus {
    /// Never whitelisted
    Unregistered = 0,
    /// Eligible for mint
    Whitelisted = 1,
    /// Whitelisted once, then removed
    Removed = 2,
}

/// Every intermediate of one conversion. Computed per call, never stored.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionQuote {
    pub receipt_amount: i128,
    /// ionToken -> underlying rate (scaled 1e18)
    pub exchange_rate: i128,
    pub underlying_amount: i128,
    /// Price of the underlying (scaled 1e18)
    pub underlying_price: i128,
    /// Price of the reference asset itself (scaled 1e18)
    pub reference_price: i128,
    pub value_in_reference_units: i128,
    pub scale_factor: ScaleFactor,
    pub claim_amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Gateway,
    ReferenceAsset,
    ClaimToken,
    /// Present once a token has been whitelisted; false after removal
    Whitelisted(Address),
    /// Removed together with the whitelist flag
    ScaleFactor(Address),
    Initialized,
}

/// Address stored under `key` by `initialize` or an owner setter
pub fn read_address(env: &Env, key: &DataKey) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(Error::NotInitialized)
}
