use crate::error::Error;
use crate::gateway;
use crate::registry;
use crate::storage::{read_address, ConversionQuote, DataKey, ScaleFactor, BASIS_POINTS, EXP_SCALE};
use crate::validation::validate_amount;

use soroban_sdk::{Address, Env, U256};

/// floor(a × b / c) over 256-bit intermediates, narrowed back to i128
///
/// Callers guarantee `c > 0`.
fn mul_div_floor(env: &Env, a: u128, b: u128, c: u128) -> Result<i128, Error> {
    let product = U256::from_u128(env, a).mul(&U256::from_u128(env, b));
    let quotient = product.div(&U256::from_u128(env, c));

    quotient
        .to_u128()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or(Error::Overflow)
}

/// Convert an ionToken amount into underlying units
///
/// Formula: underlying = floor(amount × exchange_rate / 1e18)
///
/// Example:
/// - amount: 100 ionTokens
/// - exchange_rate: 2.0 (2e18)
/// - underlying: 200
pub fn to_underlying_amount(env: &Env, amount: i128, exchange_rate: i128) -> Result<i128, Error> {
    if amount < 0 || exchange_rate < 0 {
        return Err(Error::InvalidAmount);
    }

    mul_div_floor(env, amount as u128, exchange_rate as u128, EXP_SCALE as u128)
}

/// Re-denominate an underlying amount into reference-asset units
///
/// Formula: value = floor(underlying × underlying_price / reference_price)
///
/// Both prices are quoted in the same unit, so the ratio cancels it out.
pub fn to_reference_value(
    env: &Env,
    underlying_amount: i128,
    underlying_price: i128,
    reference_price: i128,
) -> Result<i128, Error> {
    if reference_price == 0 {
        return Err(Error::ZeroReferencePrice);
    }
    if underlying_amount < 0 || underlying_price < 0 || reference_price < 0 {
        return Err(Error::InvalidPrice);
    }

    mul_div_floor(
        env,
        underlying_amount as u128,
        underlying_price as u128,
        reference_price as u128,
    )
}

/// Haircut a reference value by the token's scale factor
///
/// Formula: claim = floor(value × numerator / denominator)
///
/// Example:
/// - value: 100
/// - scale factor: 982 / 1000
/// - claim: 98.2
pub fn apply_scale_factor(env: &Env, value: i128, scale_factor: &ScaleFactor) -> Result<i128, Error> {
    if scale_factor.denominator == 0 {
        return Err(Error::ZeroDenominator);
    }
    if value < 0 {
        return Err(Error::InvalidAmount);
    }

    mul_div_floor(
        env,
        value as u128,
        scale_factor.numerator,
        scale_factor.denominator,
    )
}

/// Scale factor as floor basis points, for display only
pub fn scale_factor_bps(env: &Env, scale_factor: &ScaleFactor) -> Result<u32, Error> {
    if scale_factor.denominator == 0 {
        return Err(Error::ZeroDenominator);
    }

    let bps = mul_div_floor(
        env,
        scale_factor.numerator,
        BASIS_POINTS,
        scale_factor.denominator,
    )?;
    u32::try_from(bps).map_err(|_| Error::Overflow)
}

/// Run the full conversion pipeline for `amount` of `ion_token`
///
/// Reads the registry and queries the gateway live on every call; the result
/// is never cached. Shared by the preview and the mint path.
pub fn quote(env: &Env, ion_token: &Address, amount: i128) -> Result<ConversionQuote, Error> {
    let scale_factor = registry::scale_factor(env, ion_token)?;
    validate_amount(amount)?;

    let gateway_address = read_address(env, &DataKey::Gateway)?;
    let reference_asset = read_address(env, &DataKey::ReferenceAsset)?;

    let exchange_rate = gateway::exchange_rate(env, ion_token)?;
    let underlying_amount = to_underlying_amount(env, amount, exchange_rate)?;

    let underlying_asset = gateway::underlying(env, ion_token)?;
    let underlying_price = gateway::price(env, &gateway_address, &underlying_asset)?;
    let reference_price = gateway::price(env, &gateway_address, &reference_asset)?;

    let value_in_reference_units =
        to_reference_value(env, underlying_amount, underlying_price, reference_price)?;

    let claim_amount = apply_scale_factor(env, value_in_reference_units, &scale_factor)?;

    Ok(ConversionQuote {
        receipt_amount: amount,
        exchange_rate,
        underlying_amount,
        underlying_price,
        reference_price,
        value_in_reference_units,
        scale_factor,
        claim_amount,
    })
}
