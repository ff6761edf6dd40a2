use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Initialization errors
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // Balance errors
    InsufficientBalance = 4,
    InvalidAmount = 5,
    InsufficientAllowance = 6,
    /// Allowance expiration ledger already passed for a non-zero amount
    InvalidExpiration = 7,
    Overflow = 8,
}
