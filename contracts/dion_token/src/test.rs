extern crate std;

use super::*;
use crate::storage::{DataKey, ACCOUNT_BUMP_AMOUNT, ACCOUNT_LIFETIME_THRESHOLD};

use soroban_sdk::{
    symbol_short,
    testutils::{
        storage::Persistent, Address as _, AuthorizedFunction, AuthorizedInvocation, Ledger,
    },
    Address, Env, IntoVal, String,
};

const SCALE: i128 = 10_000_000;

fn setup(env: &Env) -> (DionTokenClient<'_>, Address, Address) {
    let contract_id = env.register(DionToken, ());
    let client = DionTokenClient::new(env, &contract_id);

    let admin = Address::generate(env);
    let minter = Address::generate(env);

    client.initialize(
        &admin,
        &minter,
        &7,
        &String::from_str(env, "dION"),
        &String::from_str(env, "DION"),
    );

    (client, admin, minter)
}

#[test]
fn test_initialize() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, admin, minter) = setup(&env);

    assert_eq!(client.admin(), admin);
    assert_eq!(client.minter(), minter);
    assert_eq!(client.decimals(), 7);
    assert_eq!(client.name(), String::from_str(&env, "dION"));
    assert_eq!(client.symbol(), String::from_str(&env, "DION"));
    assert_eq!(client.total_supply(), 0);

    let result = client.try_initialize(
        &admin,
        &minter,
        &7,
        &String::from_str(&env, "dION"),
        &String::from_str(&env, "DION"),
    );
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_uninitialized_calls_fail() {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(DionToken, ());
    let client = DionTokenClient::new(&env, &contract_id);
    let user = Address::generate(&env);

    assert_eq!(client.try_mint(&user, &SCALE), Err(Ok(Error::NotInitialized)));
    assert_eq!(client.try_decimals(), Err(Ok(Error::NotInitialized)));
    assert_eq!(
        client.try_transfer(&user, &Address::generate(&env), &SCALE),
        Err(Ok(Error::NotInitialized))
    );
}

#[test]
fn test_mint_requires_minter_auth() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, minter) = setup(&env);
    let user = Address::generate(&env);

    client.mint(&user, &(1000 * SCALE));

    assert_eq!(
        env.auths(),
        std::vec![(
            minter.clone(),
            AuthorizedInvocation {
                function: AuthorizedFunction::Contract((
                    client.address.clone(),
                    symbol_short!("mint"),
                    (user.clone(), 1000 * SCALE).into_val(&env),
                )),
                sub_invocations: std::vec![],
            }
        )]
    );

    assert_eq!(client.balance(&user), 1000 * SCALE);
    assert_eq!(client.total_supply(), 1000 * SCALE);
}

#[test]
#[should_panic]
fn test_mint_without_auth_panics() {
    let env = Env::default();
    let contract_id = env.register(DionToken, ());
    let client = DionTokenClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let minter = Address::generate(&env);
    let user = Address::generate(&env);

    env.mock_all_auths();
    client.initialize(
        &admin,
        &minter,
        &7,
        &String::from_str(&env, "dION"),
        &String::from_str(&env, "DION"),
    );

    env.set_auths(&[]);
    client.mint(&user, &SCALE);
}

#[test]
fn test_mint_invalid_amount() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, _minter) = setup(&env);
    let user = Address::generate(&env);

    assert_eq!(client.try_mint(&user, &0), Err(Ok(Error::InvalidAmount)));
    assert_eq!(client.try_mint(&user, &-1), Err(Ok(Error::InvalidAmount)));
}

#[test]
fn test_set_minter() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, _minter) = setup(&env);
    let new_minter = Address::generate(&env);

    client.set_minter(&new_minter);
    assert_eq!(client.minter(), new_minter);
}

#[test]
fn test_transfer() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, _minter) = setup(&env);
    let user1 = Address::generate(&env);
    let user2 = Address::generate(&env);

    client.mint(&user1, &(1000 * SCALE));
    client.transfer(&user1, &user2, &(500 * SCALE));

    assert_eq!(client.balance(&user1), 500 * SCALE);
    assert_eq!(client.balance(&user2), 500 * SCALE);
    assert_eq!(client.total_supply(), 1000 * SCALE);
}

#[test]
fn test_insufficient_balance_error() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, _minter) = setup(&env);
    let user1 = Address::generate(&env);
    let user2 = Address::generate(&env);

    client.mint(&user1, &(1000 * SCALE));

    let result = client.try_transfer(&user1, &user2, &(1500 * SCALE));
    assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
    assert_eq!(client.balance(&user1), 1000 * SCALE);
}

#[test]
fn test_approve_and_transfer_from() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, _minter) = setup(&env);
    let owner = Address::generate(&env);
    let spender = Address::generate(&env);
    let recipient = Address::generate(&env);

    client.mint(&owner, &(1000 * SCALE));
    client.approve(&owner, &spender, &(300 * SCALE), &100);
    assert_eq!(client.allowance(&owner, &spender), 300 * SCALE);

    client.transfer_from(&spender, &owner, &recipient, &(200 * SCALE));
    assert_eq!(client.allowance(&owner, &spender), 100 * SCALE);
    assert_eq!(client.balance(&owner), 800 * SCALE);
    assert_eq!(client.balance(&recipient), 200 * SCALE);

    let result = client.try_transfer_from(&spender, &owner, &recipient, &(200 * SCALE));
    assert_eq!(result, Err(Ok(Error::InsufficientAllowance)));
}

#[test]
fn test_allowance_expires() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, _minter) = setup(&env);
    let owner = Address::generate(&env);
    let spender = Address::generate(&env);

    client.mint(&owner, &(1000 * SCALE));
    client.approve(&owner, &spender, &(300 * SCALE), &100);

    env.ledger().with_mut(|li| li.sequence_number = 101);

    assert_eq!(client.allowance(&owner, &spender), 0);
    let result = client.try_burn_from(&spender, &owner, &SCALE);
    assert_eq!(result, Err(Ok(Error::InsufficientAllowance)));

    let result = client.try_approve(&owner, &spender, &SCALE, &100);
    assert_eq!(result, Err(Ok(Error::InvalidExpiration)));
}

#[test]
fn test_burn_reduces_supply() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, _minter) = setup(&env);
    let user = Address::generate(&env);

    client.mint(&user, &(1000 * SCALE));
    client.burn(&user, &(400 * SCALE));

    assert_eq!(client.balance(&user), 600 * SCALE);
    assert_eq!(client.total_supply(), 600 * SCALE);

    let result = client.try_burn(&user, &(601 * SCALE));
    assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
}

#[test]
fn test_account_entries_are_persistent() {
    let env = Env::default();
    env.mock_all_auths();

    let (client, _admin, _minter) = setup(&env);
    let owner = Address::generate(&env);
    let spender = Address::generate(&env);

    client.mint(&owner, &(1000 * SCALE));
    client.approve(&owner, &spender, &(300 * SCALE), &1_000);

    let balance_key = DataKey::Balance(owner.clone());
    let allowance_key = DataKey::Allowance(owner.clone(), spender.clone());

    env.as_contract(&client.address, || {
        assert!(!env.storage().instance().has(&balance_key));
        assert!(!env.storage().instance().has(&allowance_key));

        assert!(env.storage().persistent().has(&balance_key));
        assert!(env.storage().persistent().has(&allowance_key));

        let ttl = env.storage().persistent().get_ttl(&balance_key);
        assert!(ttl >= ACCOUNT_LIFETIME_THRESHOLD && ttl <= ACCOUNT_BUMP_AMOUNT);
        let ttl = env.storage().persistent().get_ttl(&allowance_key);
        assert!(ttl >= ACCOUNT_LIFETIME_THRESHOLD && ttl <= ACCOUNT_BUMP_AMOUNT);
    });

    // Spending the whole allowance and balance removes both entries
    client.transfer_from(&spender, &owner, &spender, &(300 * SCALE));
    client.burn(&owner, &(700 * SCALE));

    env.as_contract(&client.address, || {
        assert!(!env.storage().persistent().has(&balance_key));
        assert!(!env.storage().persistent().has(&allowance_key));
    });
    assert_eq!(client.balance(&owner), 0);
    assert_eq!(client.balance(&spender), 300 * SCALE);
}
