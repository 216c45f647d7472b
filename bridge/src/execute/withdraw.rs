//! Gas-token sweep (withdrawcntm).
//!
//! The native token contract accrues a gas-token allowance for the lock
//! proxy's holdings. The operator moves the whole allowance to a recipient.

use common::{codec::neo_bytes_to_u64, Address, AllowanceParam, Encode, TransferFrom, BYTE_TRUE};
use cosmwasm_std::{Binary, Event};

use crate::error::ContractError;
use crate::governance::require_operator;
use crate::msg::{ALLOWANCE, TRANSFER_FROM};
use crate::service::NativeService;

pub fn execute_withdraw_cntm(
    native: &mut NativeService<'_>,
    to_address: Address,
) -> Result<Binary, ContractError> {
    require_operator(native)?;

    let config = native.config();
    let proxy = native.current_contract();

    let query = AllowanceParam {
        from: config.native_token,
        to: proxy,
    };
    let raw = native.native_call(config.gas_token, ALLOWANCE, Binary::from(query.to_bytes()))?;
    let amount = neo_bytes_to_u64(&raw)?;

    let transfer = TransferFrom {
        sender: proxy,
        from: config.native_token,
        to: to_address,
        value: amount,
    };
    native.native_call(
        config.gas_token,
        TRANSFER_FROM,
        Binary::from(transfer.to_bytes()),
    )?;

    native.notify(
        Event::new("withdraw_cntm")
            .add_attribute("to_address", to_address.to_string())
            .add_attribute("amount", amount.to_string()),
    );

    Ok(Binary::from(BYTE_TRUE))
}
