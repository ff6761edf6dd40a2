use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller is not the owner
    Unauthorized = 10,

    // ============================================
    // REGISTRY / VALIDATION ERRORS (20-29)
    // ============================================
    /// The zero account or contract was passed where an identity is required
    ZeroAddress = 20,
    /// Scale factor denominator is zero
    ZeroDenominator = 21,
    /// Scale factor numerator exceeds its denominator
    InvalidScaleFactorRange = 22,
    /// ionToken is not currently whitelisted
    IonTokenNotWhitelisted = 23,

    // ============================================
    // AMOUNT/BALANCE ERRORS (30-39)
    // ============================================
    /// Amount must be positive
    ZeroAmount = 30,
    /// Amount is negative
    InvalidAmount = 31,
    /// Withdrawal exceeds the custody balance
    InsufficientBalance = 32,
    /// Conversion floors to zero dION
    ZeroClaimAmount = 33,

    // ============================================
    // COLLABORATOR ERRORS (40-49)
    // ============================================
    /// An ionToken transfer failed
    TransferFailed = 40,
    /// Exchange rate, underlying or price query failed
    GatewayCallFailed = 41,
    /// Exchange rate or price is negative
    InvalidPrice = 42,
    /// Reference asset price is zero
    ZeroReferencePrice = 43,
    /// dION issuance failed
    ClaimMintFailed = 44,

    // ============================================
    // ARITHMETIC ERRORS (50-59)
    // ============================================
    /// Intermediate amount does not fit in i128
    Overflow = 50,
}
