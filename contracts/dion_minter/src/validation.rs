use crate::error::Error;
use crate::storage::{ZERO_ACCOUNT, ZERO_CONTRACT};

use soroban_sdk::{log, Address, Env, String};

/// True for the all-zero account or contract address
pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
        || *address == Address::from_string(&String::from_str(env, ZERO_CONTRACT))
}

pub fn require_non_zero(env: &Env, address: &Address) -> Result<(), Error> {
    if is_zero_address(env, address) {
        return Err(Error::ZeroAddress);
    }
    Ok(())
}

/// Validate a scale factor before it is stored
///
/// Rules:
/// - denominator > 0
/// - numerator <= denominator (never more than 100% recognition)
pub fn validate_scale_factor(env: &Env, numerator: u128, denominator: u128) -> Result<(), Error> {
    if denominator == 0 {
        return Err(Error::ZeroDenominator);
    }

    if numerator > denominator {
        // numerator, denominator, then the valid numerator bounds
        log!(
            env,
            "invalid scale factor range",
            numerator,
            denominator,
            0u128,
            denominator
        );
        return Err(Error::InvalidScaleFactorRange);
    }

    Ok(())
}

/// Amount must be strictly positive
pub fn validate_amount(amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Err(Error::ZeroAmount);
    }
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn test_zero_addresses_detected() {
        let env = Env::default();

        let zero_account = Address::from_string(&String::from_str(&env, ZERO_ACCOUNT));
        let zero_contract = Address::from_string(&String::from_str(&env, ZERO_CONTRACT));

        assert!(is_zero_address(&env, &zero_account));
        assert!(is_zero_address(&env, &zero_contract));
        assert!(!is_zero_address(&env, &Address::generate(&env)));
        assert_eq!(require_non_zero(&env, &zero_account), Err(Error::ZeroAddress));
    }

    #[test]
    fn test_zero_denominator_rejected_for_any_numerator() {
        let env = Env::default();

        for numerator in [0u128, 1, 1_000, u128::MAX] {
            assert_eq!(
                validate_scale_factor(&env, numerator, 0),
                Err(Error::ZeroDenominator)
            );
        }
    }

    #[test]
    fn test_numerator_above_denominator_rejected() {
        let env = Env::default();

        assert_eq!(
            validate_scale_factor(&env, 11, 10),
            Err(Error::InvalidScaleFactorRange)
        );
        assert_eq!(
            validate_scale_factor(&env, 1_001, 1_000),
            Err(Error::InvalidScaleFactorRange)
        );
    }

    #[test]
    fn test_valid_scale_factors() {
        let env = Env::default();

        assert_eq!(validate_scale_factor(&env, 0, 1), Ok(()));
        assert_eq!(validate_scale_factor(&env, 982, 1_000), Ok(()));
        assert_eq!(validate_scale_factor(&env, 10, 10), Ok(()));
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(1), Ok(()));
        assert_eq!(validate_amount(0), Err(Error::ZeroAmount));
        assert_eq!(validate_amount(-5), Err(Error::InvalidAmount));
    }
}
