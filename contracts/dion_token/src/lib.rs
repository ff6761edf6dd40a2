#![no_std]

mod error;
mod events;
mod storage;

#[cfg(test)]
mod test;

pub use error::Error;
use events::{ApproveEvent, BurnEvent, MintEvent, MinterChangedEvent, TransferEvent};
use storage::{Allowance, DataKey, Metadata, ACCOUNT_BUMP_AMOUNT, ACCOUNT_LIFETIME_THRESHOLD};

use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol};

/// dION claim token.
///
/// A SEP-41 compatible fungible ledger. Supply only grows through `mint`,
/// which is restricted to the configured minter (the dION minter contract).
#[contract]
pub struct DionToken;

#[contractimpl]
impl DionToken {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the token contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        minter: Address,
        decimal: u32,
        name: String,
        symbol: String,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Minter, &minter);
        env.storage().instance().set(
            &DataKey::Metadata,
            &Metadata {
                decimal,
                name,
                symbol,
            },
        );
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);

        Ok(())
    }

    /// Replace the minter
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_minter(env: Env, new_minter: Address) -> Result<(), Error> {
        let admin = Self::read_admin(&env)?;
        admin.require_auth();

        let previous = Self::read_minter(&env)?;
        env.storage().instance().set(&DataKey::Minter, &new_minter);

        env.events().publish(
            (Symbol::new(&env, "set_minter"), admin),
            MinterChangedEvent {
                previous,
                minter: new_minter,
            },
        );

        Ok(())
    }

    /// Issue new tokens (minter only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `Overflow`: Balance or supply would overflow
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        let minter = Self::read_minter(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        minter.require_auth();

        let new_balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let new_supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        Self::write_balance(&env, &to, new_balance);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &new_supply);

        env.events().publish(
            (Symbol::new(&env, "mint"), to.clone()),
            MintEvent { minter, to, amount },
        );

        Ok(())
    }

    // ============================================
    // SEP-41 TOKEN INTERFACE
    // ============================================

    /// Remaining allowance; zero once the expiration ledger has passed
    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        match env
            .storage()
            .persistent()
            .get::<DataKey, Allowance>(&DataKey::Allowance(from, spender))
        {
            Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => {
                allowance.amount
            }
            _ => 0,
        }
    }

    /// Set the allowance of `spender` over the tokens of `from`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount < 0
    /// - `InvalidExpiration`: Non-zero amount with an already expired ledger
    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        if amount > 0 && expiration_ledger < env.ledger().sequence() {
            return Err(Error::InvalidExpiration);
        }

        Self::write_allowance(&env, &from, &spender, amount, expiration_ledger);

        env.events().publish(
            (Symbol::new(&env, "approve"), from.clone(), spender.clone()),
            ApproveEvent {
                from,
                spender,
                amount,
                expiration_ledger,
            },
        );

        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        let key = DataKey::Balance(id);
        match env.storage().persistent().get::<DataKey, i128>(&key) {
            Some(balance) => {
                env.storage().persistent().extend_ttl(
                    &key,
                    ACCOUNT_LIFETIME_THRESHOLD,
                    ACCOUNT_BUMP_AMOUNT,
                );
                balance
            }
            None => 0,
        }
    }

    /// Transfer tokens between accounts
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::require_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        Self::move_balance(&env, &from, &to, amount)
    }

    /// Transfer tokens on behalf of `from`, consuming the allowance of `spender`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientAllowance`: Allowance too low or expired
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        spender.require_auth();

        Self::spend_allowance(&env, &from, &spender, amount)?;
        Self::move_balance(&env, &from, &to, amount)
    }

    /// Burn tokens held by `from`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn burn(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        Self::require_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        Self::burn_balance(&env, &from, amount)
    }

    /// Burn tokens of `from`, consuming the allowance of `spender`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientAllowance`: Allowance too low or expired
    /// - `InsufficientBalance`: Not enough balance
    pub fn burn_from(env: Env, spender: Address, from: Address, amount: i128) -> Result<(), Error> {
        Self::require_initialized(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        spender.require_auth();

        Self::spend_allowance(&env, &from, &spender, amount)?;
        Self::burn_balance(&env, &from, amount)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        Ok(Self::read_metadata(&env)?.decimal)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(Self::read_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(Self::read_metadata(&env)?.symbol)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get::<DataKey, i128>(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Self::read_admin(&env)
    }

    pub fn minter(env: Env) -> Result<Address, Error> {
        Self::read_minter(&env)
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

    fn read_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn read_minter(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Minter)
            .ok_or(Error::NotInitialized)
    }

    fn read_metadata(env: &Env) -> Result<Metadata, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Metadata)
            .ok_or(Error::NotInitialized)
    }

    /// Zero balances are removed rather than stored
    fn write_balance(env: &Env, id: &Address, amount: i128) {
        let key = DataKey::Balance(id.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &amount);
            env.storage()
                .persistent()
                .extend_ttl(&key, ACCOUNT_LIFETIME_THRESHOLD, ACCOUNT_BUMP_AMOUNT);
        }
    }

    /// Zero allowances are removed rather than stored
    fn write_allowance(
        env: &Env,
        from: &Address,
        spender: &Address,
        amount: i128,
        expiration_ledger: u32,
    ) {
        let key = DataKey::Allowance(from.clone(), spender.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(
                &key,
                &Allowance {
                    amount,
                    expiration_ledger,
                },
            );
            env.storage()
                .persistent()
                .extend_ttl(&key, ACCOUNT_LIFETIME_THRESHOLD, ACCOUNT_BUMP_AMOUNT);
        }
    }

    fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        Self::write_balance(env, from, from_balance - amount);

        let to_balance = Self::balance(env.clone(), to.clone())
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        Self::write_balance(env, to, to_balance);

        env.events().publish(
            (Symbol::new(env, "transfer"), from.clone(), to.clone()),
            TransferEvent {
                from: from.clone(),
                to: to.clone(),
                amount,
            },
        );

        Ok(())
    }

    fn burn_balance(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
        let balance = Self::balance(env.clone(), from.clone());
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }

        Self::write_balance(env, from, balance - amount);

        let supply = Self::total_supply(env.clone());
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &(supply - amount));

        env.events().publish(
            (Symbol::new(env, "burn"), from.clone()),
            BurnEvent {
                from: from.clone(),
                amount,
            },
        );

        Ok(())
    }

    fn spend_allowance(
        env: &Env,
        from: &Address,
        spender: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        let allowance = env
            .storage()
            .persistent()
            .get::<DataKey, Allowance>(&DataKey::Allowance(from.clone(), spender.clone()))
            .ok_or(Error::InsufficientAllowance)?;

        if allowance.expiration_ledger < env.ledger().sequence() || allowance.amount < amount {
            return Err(Error::InsufficientAllowance);
        }

        Self::write_allowance(
            env,
            from,
            spender,
            allowance.amount - amount,
            allowance.expiration_ledger,
        );

        Ok(())
    }
}
