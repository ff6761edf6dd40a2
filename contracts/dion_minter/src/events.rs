use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IonTokenWhitelistedEvent {
    pub token: Address,
    pub numerator: u128,
    pub denominator: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScaleFactorUpdatedEvent {
    pub token: Address,
    pub numerator: u128,
    pub denominator: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IonTokenRemovedEvent {
    pub token: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensMintedEvent {
    pub caller: Address,
    pub token: Address,
    pub amount: i128,
    pub claim_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IonTokensWithdrawnEvent {
    pub token: Address,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddressUpdatedEvent {
    pub previous: Address,
    pub current: Address,
}
