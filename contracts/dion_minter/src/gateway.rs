//! Read-only queries and token movements against external contracts.
//!
//! Every call goes through the generated `try_*` methods so that a trap or an
//! error in the collaborator surfaces as one of our own error codes.

use crate::error::Error;

use soroban_sdk::{contractclient, log, token, Address, Env};

/// Yield-bearing receipt token (ionToken)
#[contractclient(name = "IonTokenClient")]
pub trait IonToken {
    /// Receipt -> underlying exchange rate, scaled 1e18
    fn exchange_rate_current(env: Env) -> i128;
    fn underlying(env: Env) -> Address;
}

/// Price oracle quoting every asset in one common unit
#[contractclient(name = "PriceGatewayClient")]
pub trait PriceGateway {
    /// Price of `asset`, scaled 1e18
    fn price(env: Env, asset: Address) -> i128;
}

/// Issuance side of the dION token
#[contractclient(name = "ClaimTokenClient")]
pub trait ClaimToken {
    fn mint(env: Env, to: Address, amount: i128);
}

pub fn exchange_rate(env: &Env, ion_token: &Address) -> Result<i128, Error> {
    let rate = match IonTokenClient::new(env, ion_token).try_exchange_rate_current() {
        Ok(Ok(rate)) => rate,
        _ => {
            log!(env, "exchange rate query failed", ion_token.clone());
            return Err(Error::GatewayCallFailed);
        }
    };

    if rate < 0 {
        return Err(Error::InvalidPrice);
    }
    Ok(rate)
}

pub fn underlying(env: &Env, ion_token: &Address) -> Result<Address, Error> {
    match IonTokenClient::new(env, ion_token).try_underlying() {
        Ok(Ok(asset)) => Ok(asset),
        _ => {
            log!(env, "underlying query failed", ion_token.clone());
            Err(Error::GatewayCallFailed)
        }
    }
}

pub fn price(env: &Env, gateway: &Address, asset: &Address) -> Result<i128, Error> {
    let price = match PriceGatewayClient::new(env, gateway).try_price(asset) {
        Ok(Ok(price)) => price,
        _ => {
            log!(env, "price query failed", gateway.clone(), asset.clone());
            return Err(Error::GatewayCallFailed);
        }
    };

    if price < 0 {
        return Err(Error::InvalidPrice);
    }
    Ok(price)
}

/// Move `amount` of `token`; any failure becomes `TransferFailed`
pub fn transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    match token::Client::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            // token, from, to, amount
            log!(
                env,
                "transfer failed",
                token.clone(),
                from.clone(),
                to.clone(),
                amount
            );
            Err(Error::TransferFailed)
        }
    }
}

pub fn balance(env: &Env, token: &Address, id: &Address) -> Result<i128, Error> {
    match token::Client::new(env, token).try_balance(id) {
        Ok(Ok(balance)) => Ok(balance),
        _ => Err(Error::GatewayCallFailed),
    }
}

pub fn mint_claim(env: &Env, claim_token: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    match ClaimTokenClient::new(env, claim_token).try_mint(to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => {
            log!(env, "claim mint failed", to.clone(), amount);
            Err(Error::ClaimMintFailed)
        }
    }
}
