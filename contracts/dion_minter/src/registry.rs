//! ionToken whitelist and per-token scale factors.
//!
//! Callers are responsible for the owner check; nothing here touches custody
//! balances or dION supply.

use crate::error::Error;
use crate::storage::{DataKey, ScaleFactor, TokenStatus};

use soroban_sdk::{log, Address, Env};

pub fn status(env: &Env, token: &Address) -> TokenStatus {
    match env
        .storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Whitelisted(token.clone()))
    {
        None => TokenStatus::Unregistered,
        Some(true) => TokenStatus::Whitelisted,
        Some(false) => TokenStatus::Removed,
    }
}

pub fn is_whitelisted(env: &Env, token: &Address) -> bool {
    status(env, token) == TokenStatus::Whitelisted
}

pub fn require_whitelisted(env: &Env, token: &Address) -> Result<(), Error> {
    if !is_whitelisted(env, token) {
        log!(env, "ionToken not whitelisted", token.clone());
        return Err(Error::IonTokenNotWhitelisted);
    }
    Ok(())
}

/// Scale factor of a whitelisted token. Removed tokens are rejected even if a
/// factor is still present in storage.
pub fn scale_factor(env: &Env, token: &Address) -> Result<ScaleFactor, Error> {
    require_whitelisted(env, token)?;

    env.storage()
        .instance()
        .get(&DataKey::ScaleFactor(token.clone()))
        .ok_or(Error::IonTokenNotWhitelisted)
}

/// Mark `token` whitelisted with `scale_factor`, overwriting any prior entry
pub fn write(env: &Env, token: &Address, scale_factor: &ScaleFactor) {
    env.storage()
        .instance()
        .set(&DataKey::Whitelisted(token.clone()), &true);
    env.storage()
        .instance()
        .set(&DataKey::ScaleFactor(token.clone()), scale_factor);
}

/// Flip the flag to false (keeps the token distinguishable from one never
/// registered) and drop its scale factor
pub fn remove(env: &Env, token: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::Whitelisted(token.clone()), &false);
    env.storage()
        .instance()
        .remove(&DataKey::ScaleFactor(token.clone()));
}
