#![no_std]

mod conversion;
mod error;
mod events;
mod gateway;
mod registry;
mod storage;
mod validation;


pub use error::Error;
use events::*;
use storage::{read_address, ConversionQuote, DataKey, ScaleFactor, TokenStatus};
use validation::{require_non_zero, validate_scale_factor};

use soroban_sdk::{contract, contractimpl, log, Address, Env, Symbol};

/// dION minter
///
/// Holders of whitelisted ionTokens deposit them here and receive dION,
/// valued through the ionToken exchange rate, the gateway prices of the
/// underlying and the reference asset, and a per-token scale factor set by
/// the owner. Deposited ionTokens stay in custody until the owner withdraws
/// them.
#[contract]
pub struct DionMinter;

#[contractimpl]
impl DionMinter {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the minter
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `ZeroAddress`: Any address is the zero identity
    pub fn initialize(
        env: Env,
        owner: Address,
        gateway: Address,
        reference_asset: Address,
        claim_token: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        require_non_zero(&env, &owner)?;
        require_non_zero(&env, &gateway)?;
        require_non_zero(&env, &reference_asset)?;
        require_non_zero(&env, &claim_token)?;

        owner.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Gateway, &gateway);
        env.storage()
            .instance()
            .set(&DataKey::ReferenceAsset, &reference_asset);
        env.storage()
            .instance()
            .set(&DataKey::ClaimToken, &claim_token);

        Ok(())
    }

    /// Hand the owner role to `new_owner`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner
    /// - `ZeroAddress`: `new_owner` is the zero identity
    pub fn transfer_ownership(env: Env, owner: Address, new_owner: Address) -> Result<(), Error> {
        Self::require_owner(&env, &owner)?;
        require_non_zero(&env, &new_owner)?;

        env.storage().instance().set(&DataKey::Owner, &new_owner);

        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"),),
            AddressUpdatedEvent {
                previous: owner,
                current: new_owner,
            },
        );

        Ok(())
    }

    /// Point the minter at a new price gateway
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner
    /// - `ZeroAddress`: `gateway` is the zero identity
    pub fn update_gateway_address(env: Env, owner: Address, gateway: Address) -> Result<(), Error> {
        Self::require_owner(&env, &owner)?;
        require_non_zero(&env, &gateway)?;

        let previous = read_address(&env, &DataKey::Gateway)?;
        env.storage().instance().set(&DataKey::Gateway, &gateway);

        env.events().publish(
            (Symbol::new(&env, "gateway_updated"),),
            AddressUpdatedEvent {
                previous,
                current: gateway,
            },
        );

        Ok(())
    }

    /// Replace the reference asset used to normalize prices
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner
    /// - `ZeroAddress`: `reference_asset` is the zero identity
    pub fn update_reference_asset_address(
        env: Env,
        owner: Address,
        reference_asset: Address,
    ) -> Result<(), Error> {
        Self::require_owner(&env, &owner)?;
        require_non_zero(&env, &reference_asset)?;

        let previous = read_address(&env, &DataKey::ReferenceAsset)?;
        env.storage()
            .instance()
            .set(&DataKey::ReferenceAsset, &reference_asset);

        env.events().publish(
            (Symbol::new(&env, "reference_asset_updated"),),
            AddressUpdatedEvent {
                previous,
                current: reference_asset,
            },
        );

        Ok(())
    }

    // ============================================
    // REGISTRY: WHITELIST & SCALE FACTORS
    // ============================================

    /// Whitelist an ionToken with a scale factor of `numerator / denominator`
    ///
    /// Re-whitelisting overwrites the previous entry.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner
    /// - `ZeroAddress`: `token` is the zero identity
    /// - `ZeroDenominator`: `denominator` is zero
    /// - `InvalidScaleFactorRange`: `numerator > denominator`
    pub fn whitelist_ion_token(
        env: Env,
        owner: Address,
        token: Address,
        numerator: u128,
        denominator: u128,
    ) -> Result<(), Error> {
        Self::require_owner(&env, &owner)?;
        require_non_zero(&env, &token)?;
        validate_scale_factor(&env, numerator, denominator)?;

        registry::write(
            &env,
            &token,
            &ScaleFactor {
                numerator,
                denominator,
            },
        );

        env.events().publish(
            (Symbol::new(&env, "ion_token_whitelisted"), token.clone()),
            IonTokenWhitelistedEvent {
                token,
                numerator,
                denominator,
            },
        );

        Ok(())
    }

    /// Change the scale factor of an already whitelisted ionToken
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner
    /// - `IonTokenNotWhitelisted`: Token is not whitelisted
    /// - `ZeroDenominator`: `denominator` is zero
    /// - `InvalidScaleFactorRange`: `numerator > denominator`
    pub fn update_scale_factor(
        env: Env,
        owner: Address,
        token: Address,
        numerator: u128,
        denominator: u128,
    ) -> Result<(), Error> {
        Self::require_owner(&env, &owner)?;
        registry::require_whitelisted(&env, &token)?;
        validate_scale_factor(&env, numerator, denominator)?;

        registry::write(
            &env,
            &token,
            &ScaleFactor {
                numerator,
                denominator,
            },
        );

        env.events().publish(
            (Symbol::new(&env, "scale_factor_updated"), token.clone()),
            ScaleFactorUpdatedEvent {
                token,
                numerator,
                denominator,
            },
        );

        Ok(())
    }

    /// Remove an ionToken from the whitelist
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner
    /// - `IonTokenNotWhitelisted`: Token is not whitelisted
    pub fn remove_ion_token(env: Env, owner: Address, token: Address) -> Result<(), Error> {
        Self::require_owner(&env, &owner)?;
        registry::require_whitelisted(&env, &token)?;

        registry::remove(&env, &token);

        env.events().publish(
            (Symbol::new(&env, "ion_token_removed"), token.clone()),
            IonTokenRemovedEvent { token },
        );

        Ok(())
    }

    // ============================================
    // CONVERSION
    // ============================================

    /// dION that `amount` of `token` would mint right now
    ///
    /// # Errors
    /// - `IonTokenNotWhitelisted`: Token is not whitelisted
    /// - `ZeroAmount` / `InvalidAmount`: Amount is not positive
    /// - `GatewayCallFailed`: Exchange rate, underlying or price query failed
    /// - `InvalidPrice`: Negative rate or price
    /// - `ZeroReferencePrice`: Reference asset priced at zero
    /// - `Overflow`: Intermediate amount out of range
    pub fn preview_mint(env: Env, token: Address, amount: i128) -> Result<i128, Error> {
        Self::require_initialized(&env)?;
        Ok(conversion::quote(&env, &token, amount)?.claim_amount)
    }

    /// Same as `preview_mint`, with every intermediate of the conversion
    pub fn quote_mint(env: Env, token: Address, amount: i128) -> Result<ConversionQuote, Error> {
        Self::require_initialized(&env)?;
        conversion::quote(&env, &token, amount)
    }

    // ============================================
    // MINT / WITHDRAW
    // ============================================

    /// Deposit `amount` of a whitelisted ionToken and receive dION
    ///
    /// Returns the dION amount minted to `caller`.
    ///
    /// # Errors
    /// - Every `preview_mint` error
    /// - `ZeroClaimAmount`: Conversion floors to zero dION
    /// - `TransferFailed`: ionToken could not be pulled from `caller`
    /// - `ClaimMintFailed`: dION issuance failed
    pub fn mint(env: Env, caller: Address, token: Address, amount: i128) -> Result<i128, Error> {
        Self::require_initialized(&env)?;

        caller.require_auth();

        // Everything is computed before any value moves
        let quote = conversion::quote(&env, &token, amount)?;
        if quote.claim_amount == 0 {
            return Err(Error::ZeroClaimAmount);
        }

        let claim_token = read_address(&env, &DataKey::ClaimToken)?;

        gateway::transfer(
            &env,
            &token,
            &caller,
            &env.current_contract_address(),
            amount,
        )?;
        gateway::mint_claim(&env, &claim_token, &caller, quote.claim_amount)?;

        env.events().publish(
            (Symbol::new(&env, "tokens_minted"), caller.clone(), token.clone()),
            TokensMintedEvent {
                caller,
                token,
                amount,
                claim_amount: quote.claim_amount,
            },
        );

        Ok(quote.claim_amount)
    }

    /// Release custodied ionTokens to `recipient`
    ///
    /// An `amount` of zero withdraws the whole custody balance. Works for any
    /// token identity, whitelisted or not. Returns the amount withdrawn.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not the owner
    /// - `ZeroAddress`: `token` or `recipient` is the zero identity
    /// - `InvalidAmount`: Negative amount
    /// - `InsufficientBalance`: `amount` exceeds the custody balance
    /// - `TransferFailed`: ionToken transfer failed
    pub fn withdraw_ion_tokens(
        env: Env,
        owner: Address,
        token: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<i128, Error> {
        Self::require_owner(&env, &owner)?;
        require_non_zero(&env, &token)?;
        require_non_zero(&env, &recipient)?;

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        let custody = env.current_contract_address();
        let available = gateway::balance(&env, &token, &custody)?;

        let amount = if amount == 0 { available } else { amount };
        if amount > available {
            // token, requested, available
            log!(
                &env,
                "insufficient custody balance",
                token.clone(),
                amount,
                available
            );
            return Err(Error::InsufficientBalance);
        }
        // Empty custody withdraws nothing but still succeeds
        if amount > 0 {
            gateway::transfer(&env, &token, &custody, &recipient, amount)?;
        }

        env.events().publish(
            (Symbol::new(&env, "ion_tokens_withdrawn"), token.clone()),
            IonTokensWithdrawnEvent {
                token,
                recipient,
                amount,
            },
        );

        Ok(amount)
    }

    /// Withdraw the entire custody balance of `token`
    pub fn withdraw_all_ion_tokens(
        env: Env,
        owner: Address,
        token: Address,
        recipient: Address,
    ) -> Result<i128, Error> {
        Self::withdraw_ion_tokens(env, owner, token, 0, recipient)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn owner(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Owner)
    }

    pub fn gateway(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::Gateway)
    }

    pub fn reference_asset(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::ReferenceAsset)
    }

    pub fn claim_token(env: Env) -> Result<Address, Error> {
        read_address(&env, &DataKey::ClaimToken)
    }

    pub fn is_whitelisted(env: Env, token: Address) -> bool {
        registry::is_whitelisted(&env, &token)
    }

    pub fn token_status(env: Env, token: Address) -> TokenStatus {
        registry::status(&env, &token)
    }

    /// Scale factor of a whitelisted token
    pub fn scale_factor(env: Env, token: Address) -> Result<ScaleFactor, Error> {
        registry::scale_factor(&env, &token)
    }

    /// Scale factor in basis points (floor), derived on read
    pub fn scale_factor_bps(env: Env, token: Address) -> Result<u32, Error> {
        let scale_factor = registry::scale_factor(&env, &token)?;
        conversion::scale_factor_bps(&env, &scale_factor)
    }

    /// ionTokens of `token` held by this contract
    pub fn custody_balance(env: Env, token: Address) -> Result<i128, Error> {
        gateway::balance(&env, &token, &env.current_contract_address())
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    /// `caller` must be the stored owner and must have authorized the call
    fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
        let owner = read_address(env, &DataKey::Owner)?;
        if *caller != owner {
            return Err(Error::Unauthorized);
        }
        caller.require_auth();
        Ok(())
    }
}
