//! Operator-managed bindings on the lock proxy and the getters that read
//! them back.

mod harness;

use common::{Address, BYTE_TRUE};
use cosmwasm_std::testing::MockStorage;
use cosmwasm_std::Uint256;

use cross_chain_bridge::msg::{AssetChainQuery, GET_ASSET_HASH, GET_PROXY_HASH};
use cross_chain_bridge::{ContractError, InvokeTx, NativeRuntime};

use harness::{
    bare_env, neo_u64, setup, INITIAL_LIMIT, REMOTE_ASSET, REMOTE_CHAIN_ID, REMOTE_PROXY,
};

fn proxy_hash(env: &mut harness::TestEnv, chain_id: u64) -> Vec<u8> {
    let tx = env.proxy_tx(GET_PROXY_HASH, neo_u64(chain_id));
    env.execute(tx).unwrap().result.to_vec()
}

fn asset_hash(env: &mut harness::TestEnv, asset: Address, chain_id: u64) -> Vec<u8> {
    let query = AssetChainQuery {
        source_asset_hash: asset,
        to_chain_id: chain_id,
    };
    let tx = env.proxy_tx(GET_ASSET_HASH, common::Encode::to_bytes(&query));
    env.execute(tx).unwrap().result.to_vec()
}

// ============================================================================
// bindProxy
// ============================================================================

#[test]
fn test_bind_proxy_and_query() {
    let mut env = setup();
    assert_eq!(proxy_hash(&mut env, REMOTE_CHAIN_ID), REMOTE_PROXY.to_vec());
    assert!(proxy_hash(&mut env, 42).is_empty());

    // Rebinding overwrites
    let outcome = env.bind_proxy(REMOTE_CHAIN_ID, &[0x44; 32]).unwrap();
    assert_eq!(outcome.result.as_slice(), BYTE_TRUE);
    assert_eq!(proxy_hash(&mut env, REMOTE_CHAIN_ID), vec![0x44; 32]);
    assert!(outcome.event("bind_proxy").is_some());
}

#[test]
fn test_bind_proxy_requires_operator() {
    let mut env = setup();
    let params = common::BindProxyParam {
        target_chain_id: 9,
        target_hash: vec![0x09; 20].into(),
    };
    let tx = env
        .proxy_tx(
            cross_chain_bridge::msg::BIND_PROXY,
            common::Encode::to_bytes(&params),
        )
        .signed_by(env.user);

    let err = env.execute(tx).unwrap_err();
    assert_eq!(err, ContractError::NotOperator);
    assert!(proxy_hash(&mut env, 9).is_empty());
}

#[test]
fn test_bind_without_operator_role() {
    let runtime = NativeRuntime::with_defaults(Default::default());
    let mut env = bare_env(runtime);
    env.storage = MockStorage::new();

    let params = common::BindProxyParam {
        target_chain_id: 9,
        target_hash: vec![0x09; 20].into(),
    };
    let tx = InvokeTx::new(
        env.config().lock_proxy,
        cross_chain_bridge::msg::BIND_PROXY,
        common::Encode::to_bytes(&params),
    )
    .signed_by(env.operator);
    let err = env.execute(tx).unwrap_err();
    assert_eq!(err, ContractError::OperatorNotSet);
}

// ============================================================================
// bindAsset
// ============================================================================

#[test]
fn test_bind_asset_and_query() {
    let mut env = setup();
    let native_token = env.config().native_token;
    let gas_token = env.config().gas_token;

    assert_eq!(
        asset_hash(&mut env, native_token, REMOTE_CHAIN_ID),
        REMOTE_ASSET.to_vec()
    );
    assert!(asset_hash(&mut env, gas_token, REMOTE_CHAIN_ID).is_empty());
    assert_eq!(
        env.crossed_limit(native_token, REMOTE_CHAIN_ID),
        Uint256::from(INITIAL_LIMIT)
    );
    assert_eq!(
        env.crossed_amount(native_token, REMOTE_CHAIN_ID),
        Uint256::zero()
    );
}

#[test]
fn test_crossed_limit_only_increases() {
    let mut env = setup();
    let native_token = env.config().native_token;

    let err = env
        .bind_asset(native_token, REMOTE_CHAIN_ID, &REMOTE_ASSET, INITIAL_LIMIT, false)
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::LimitNotIncreasing {
            new_limit: Uint256::from(INITIAL_LIMIT),
            stored_limit: Uint256::from(INITIAL_LIMIT),
        }
    );

    let err = env
        .bind_asset(native_token, REMOTE_CHAIN_ID, &[0x33; 20], 1, false)
        .unwrap_err();
    assert!(matches!(err, ContractError::LimitNotIncreasing { .. }));
    // A rejected bind does not replace the target asset
    assert_eq!(
        asset_hash(&mut env, native_token, REMOTE_CHAIN_ID),
        REMOTE_ASSET.to_vec()
    );

    env.bind_asset(native_token, REMOTE_CHAIN_ID, &[0x33; 20], INITIAL_LIMIT * 2, false)
        .unwrap();
    assert_eq!(
        env.crossed_limit(native_token, REMOTE_CHAIN_ID),
        Uint256::from(INITIAL_LIMIT * 2)
    );
    assert_eq!(
        asset_hash(&mut env, native_token, REMOTE_CHAIN_ID),
        vec![0x33; 20]
    );
}

#[test]
fn test_zero_limit_on_fresh_binding_is_rejected() {
    let mut env = setup();
    let gas_token = env.config().gas_token;
    let err = env
        .bind_asset(gas_token, REMOTE_CHAIN_ID, &REMOTE_ASSET, 0, false)
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::LimitNotIncreasing {
            new_limit: Uint256::zero(),
            stored_limit: Uint256::zero(),
        }
    );
}

#[test]
fn test_target_chain_asset_credits_limit_increase() {
    let mut env = setup();
    let gas_token = env.config().gas_token;

    env.bind_asset(gas_token, REMOTE_CHAIN_ID, &[0x47; 20], 1000, true)
        .unwrap();
    assert_eq!(
        env.crossed_amount(gas_token, REMOTE_CHAIN_ID),
        Uint256::from(1000u64)
    );

    env.bind_asset(gas_token, REMOTE_CHAIN_ID, &[0x47; 20], 1500, true)
        .unwrap();
    assert_eq!(
        env.crossed_amount(gas_token, REMOTE_CHAIN_ID),
        Uint256::from(1500u64)
    );

    // The credited budget leaves no room to lock out
    let err = env.lock(gas_token, REMOTE_CHAIN_ID, 1).unwrap_err();
    assert!(matches!(err, ContractError::LimitExceeded { .. }));
}

#[test]
fn test_bind_asset_requires_operator() {
    let mut env = setup();
    let native_token = env.config().native_token;
    let params = common::BindAssetParam {
        source_asset_hash: native_token,
        target_chain_id: REMOTE_CHAIN_ID,
        target_asset_hash: vec![0x33; 20].into(),
        limit: Uint256::from(INITIAL_LIMIT * 10),
        is_target_chain_asset: false,
    };
    let tx = env
        .proxy_tx(
            cross_chain_bridge::msg::BIND_ASSET,
            common::Encode::to_bytes(&params),
        )
        .signed_by(env.user);

    assert_eq!(env.execute(tx).unwrap_err(), ContractError::NotOperator);
    assert_eq!(
        env.crossed_limit(native_token, REMOTE_CHAIN_ID),
        Uint256::from(INITIAL_LIMIT)
    );
}

#[test]
fn test_bind_asset_event() {
    let mut env = setup();
    let native_token = env.config().native_token;
    let outcome = env
        .bind_asset(native_token, 8, &[0x88; 20], 10, false)
        .unwrap();
    let event = outcome.event("bind_asset").unwrap();
    let limit = event
        .attributes
        .iter()
        .find(|a| a.key == "limit")
        .map(|a| a.value.clone());
    assert_eq!(limit, Some("10".to_string()));
}
