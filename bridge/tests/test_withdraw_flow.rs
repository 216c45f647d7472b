//! Gas-token sweep (`withdrawcntm`) from the native token's allowance.

mod harness;

use common::{Address, AllowanceParam, Encode, BYTE_TRUE};

use cross_chain_bridge::msg::{ALLOWANCE, WITHDRAW_CNTM};
use cross_chain_bridge::{ContractError, InvokeTx};

use harness::{fund_gas_allowance, setup};

fn withdraw_tx(env: &harness::TestEnv, to: Address, signer: Address) -> InvokeTx {
    env.proxy_tx(WITHDRAW_CNTM, to.as_bytes().to_vec())
        .signed_by(signer)
}

#[test]
fn test_withdraw_sweeps_full_allowance() {
    let mut env = setup();
    let gas_token = env.config().gas_token;
    let native_token = env.config().native_token;
    let proxy = env.config().lock_proxy;
    let recipient = Address([0xD0; 20]);
    fund_gas_allowance(&mut env, 5000);

    let tx = withdraw_tx(&env, recipient, env.operator);
    let outcome = env.execute(tx).unwrap();
    assert_eq!(outcome.result.as_slice(), BYTE_TRUE);

    assert_eq!(env.balance(&gas_token, &recipient), 5000);
    assert_eq!(env.balance(&gas_token, &native_token), 0);

    let query = AllowanceParam {
        from: native_token,
        to: proxy,
    };
    let remaining = env.query_u64(gas_token, ALLOWANCE, query.to_bytes());
    assert_eq!(remaining, 0);

    let event = outcome.event("withdraw_cntm").unwrap();
    assert!(event
        .attributes
        .iter()
        .any(|a| a.key == "amount" && a.value == "5000"));
}

#[test]
fn test_withdraw_requires_operator() {
    let mut env = setup();
    let gas_token = env.config().gas_token;
    let recipient = Address([0xD0; 20]);
    fund_gas_allowance(&mut env, 5000);

    let tx = withdraw_tx(&env, recipient, env.user);
    assert_eq!(env.execute(tx).unwrap_err(), ContractError::NotOperator);
    assert_eq!(env.balance(&gas_token, &recipient), 0);
}

#[test]
fn test_withdraw_with_nothing_accrued() {
    let mut env = setup();
    let gas_token = env.config().gas_token;
    let recipient = Address([0xD0; 20]);

    let tx = withdraw_tx(&env, recipient, env.operator);
    let outcome = env.execute(tx).unwrap();
    assert_eq!(outcome.result.as_slice(), BYTE_TRUE);
    assert_eq!(env.balance(&gas_token, &recipient), 0);
}

#[test]
fn test_withdraw_rejects_short_address() {
    let mut env = setup();
    let tx = env
        .proxy_tx(WITHDRAW_CNTM, vec![0xD0; 19])
        .signed_by(env.operator);
    let err = env.execute(tx).unwrap_err();
    assert!(matches!(err, ContractError::Codec(_)));
}
