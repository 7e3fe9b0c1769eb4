use gateway_test_fixtures::{
    approve_contract_call_params, command_batch, random_address, random_command_id, Command,
};
use pretty_assertions::assert_eq;
use weighted_gateway::events::{ContractCallEvent, GatewayEvent};
use weighted_gateway::gateway_encoding::hasher::keccak256;
use weighted_gateway::gateway_encoding::{Address, Bytes, B256};
use weighted_gateway::{Gateway, GatewayError};

use crate::{owner, setup};

const SOURCE_CHAIN: &str = "Ethereum";
const SOURCE_ADDRESS: &str = "0x4f4495243837681061c4743b74b3eedf548d56a5";

/// Gateway with one approved call to a fresh destination contract, together
/// with that contract's address, the command id and the payload hash.
fn approved_call() -> (Gateway, Address, [u8; 32], [u8; 32]) {
    let (mut gateway, operators) = setup();
    let contract_address = random_address();
    let command_id = random_command_id();
    let payload_hash = keccak256(b"cross-chain payload");
    let params =
        approve_contract_call_params(SOURCE_CHAIN, SOURCE_ADDRESS, contract_address, payload_hash);
    let data = command_batch(0, [Command::approve_contract_call(command_id, &params)]);

    let results = gateway
        .execute(&operators.execute_input(&data, &[0, 1, 2]))
        .unwrap();
    assert_eq!(results, vec![true]);
    gateway.take_events();

    (gateway, contract_address, command_id, payload_hash)
}

#[test_log::test]
fn approval_is_consumed_exactly_once() {
    // Setup
    let (mut gateway, contract_address, command_id, payload_hash) = approved_call();
    assert!(gateway.is_contract_call_approved(
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        contract_address,
        payload_hash
    ));

    // Action
    let consumed = gateway.validate_contract_call(
        contract_address,
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        payload_hash,
    );

    // Assert
    assert!(consumed);
    assert!(!gateway.is_contract_call_approved(
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        contract_address,
        payload_hash
    ));
    assert!(!gateway.validate_contract_call(
        contract_address,
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        payload_hash,
    ));

    let events = gateway.take_events();
    let [GatewayEvent::ContractCallExecuted(executed)] = events.as_slice() else {
        panic!("unexpected events {events:?}");
    };
    assert_eq!(executed.command_id, B256::from(command_id));
    assert_eq!(executed.contract_address, contract_address);
    assert_eq!(executed.payload_hash, B256::from(payload_hash));
}

#[test_log::test]
fn other_contracts_cannot_consume_the_approval() {
    let (mut gateway, contract_address, command_id, payload_hash) = approved_call();

    let consumed = gateway.validate_contract_call(
        random_address(),
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        payload_hash,
    );

    assert!(!consumed);
    assert!(gateway.is_contract_call_approved(
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        contract_address,
        payload_hash
    ));
    assert!(gateway.take_events().is_empty());
}

#[test_log::test]
fn approval_is_bound_to_every_field() {
    let (gateway, contract_address, command_id, payload_hash) = approved_call();

    assert!(!gateway.is_contract_call_approved(
        random_command_id(),
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        contract_address,
        payload_hash
    ));
    assert!(!gateway.is_contract_call_approved(
        command_id,
        "Polygon",
        SOURCE_ADDRESS,
        contract_address,
        payload_hash
    ));
    assert!(!gateway.is_contract_call_approved(
        command_id,
        SOURCE_CHAIN,
        "0x0000000000000000000000000000000000000001",
        contract_address,
        payload_hash
    ));
    assert!(!gateway.is_contract_call_approved(
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        contract_address,
        keccak256(b"another payload")
    ));
}

#[test_log::test]
fn call_contract_emits_outbound_event() {
    // Setup
    let (mut gateway, _) = setup();
    let caller = random_address();
    let payload = b"some payload".to_vec();

    // Action
    let event = gateway.call_contract(
        caller,
        "Polygon",
        "0x2f3a0c7d3b1e4bb4a4d2f1e0c9b8a7f6e5d4c3b2",
        &payload,
    );

    // Assert
    let expected = ContractCallEvent {
        address: caller,
        destination_chain: "Polygon".to_owned(),
        destination_contract_address: "0x2f3a0c7d3b1e4bb4a4d2f1e0c9b8a7f6e5d4c3b2".to_owned(),
        payload_hash: B256::from(keccak256(&payload)),
        payload: Bytes::from(payload),
    };
    assert_eq!(event, expected);
    assert_eq!(
        gateway.take_events(),
        vec![GatewayEvent::ContractCall(expected)]
    );
}

#[test_log::test]
fn call_contract_does_not_touch_state() {
    let (mut gateway, _) = setup();
    let before = gateway.state().clone();

    gateway.call_contract(random_address(), "Polygon", "0xdestination", &[]);

    assert_eq!(gateway.state(), &before);
}

#[test_log::test]
fn owner_can_approve_without_a_batch() {
    // Setup
    let (mut gateway, _) = setup();
    let contract_address = random_address();
    let command_id = random_command_id();
    let payload_hash = keccak256(b"owner approved payload");
    let params =
        approve_contract_call_params(SOURCE_CHAIN, SOURCE_ADDRESS, contract_address, payload_hash);

    // Action
    let approved = gateway
        .approve_contract_call(owner(), command_id, &params.encode())
        .unwrap();

    // Assert
    assert!(approved);
    assert!(!gateway.is_command_executed(&command_id));
    let events = gateway.take_events();
    let [GatewayEvent::ContractCallApproved(event)] = events.as_slice() else {
        panic!("unexpected events {events:?}");
    };
    assert_eq!(event.command_id, B256::from(command_id));
    assert_eq!(event.source_tx_hash, params.source_tx_hash);

    assert!(gateway.validate_contract_call(
        contract_address,
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        payload_hash,
    ));
    assert!(!gateway.validate_contract_call(
        contract_address,
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        payload_hash,
    ));
}

#[test_log::test]
fn only_owner_can_approve_without_a_batch() {
    let (mut gateway, _) = setup();
    let contract_address = random_address();
    let command_id = random_command_id();
    let payload_hash = keccak256(b"payload");
    let params =
        approve_contract_call_params(SOURCE_CHAIN, SOURCE_ADDRESS, contract_address, payload_hash);

    let err = gateway
        .approve_contract_call(random_address(), command_id, &params.encode())
        .unwrap_err();

    assert_eq!(err, GatewayError::NotOwner);
    assert!(!gateway.is_contract_call_approved(
        command_id,
        SOURCE_CHAIN,
        SOURCE_ADDRESS,
        contract_address,
        payload_hash
    ));
    assert!(gateway.take_events().is_empty());
}

#[test_log::test]
fn undecodable_direct_approval_fails_closed() {
    let (mut gateway, _) = setup();

    let err = gateway
        .approve_contract_call(owner(), random_command_id(), &[0xff; 7])
        .unwrap_err();

    assert!(matches!(err, GatewayError::Encoding(_)));
    assert!(gateway.state().approvals.is_empty());
}
