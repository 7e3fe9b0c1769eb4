use gateway_test_fixtures::{random_address, SigningOperatorSet};
use pretty_assertions::assert_eq;
use rstest::rstest;
use weighted_gateway::events::GatewayEvent;
use weighted_gateway::gateway_encoding::abi::WeightedOperators;
use weighted_gateway::gateway_encoding::{Address, B256, U256};
use weighted_gateway::GatewayError;

use crate::{owner, setup};

fn sorted_addresses(count: usize) -> Vec<Address> {
    let mut addresses = (0..count).map(|_| random_address()).collect::<Vec<_>>();
    addresses.sort();
    addresses
}

fn ones(count: usize) -> Vec<U256> {
    vec![U256::from(1_u8); count]
}

#[test_log::test]
fn rotation_advances_epoch_by_one() {
    // Setup
    let (mut gateway, _) = setup();
    let new_operators = SigningOperatorSet::new(4, 2);

    // Action
    let rotated = gateway
        .transfer_operatorship(owner(), &new_operators.encode())
        .unwrap();

    // Assert
    assert!(rotated);
    assert_eq!(gateway.current_epoch(), 2);
    assert_eq!(gateway.hash_for_epoch(2).unwrap(), new_operators.hash());
    assert_eq!(gateway.epoch_for_hash(&new_operators.hash()).unwrap(), 2);
}

#[test_log::test]
fn rotation_emits_operatorship_transferred() {
    let (mut gateway, _) = setup();
    let new_operators = SigningOperatorSet::new(2, 1);

    gateway
        .transfer_operatorship(owner(), &new_operators.encode())
        .unwrap();

    let events = gateway.take_events();
    let [GatewayEvent::OperatorshipTransferred(event)] = events.as_slice() else {
        panic!("unexpected events {events:?}");
    };
    let expected = new_operators.operators();
    assert_eq!(event.epoch, 2);
    assert_eq!(event.operators_hash, B256::from(new_operators.hash()));
    assert_eq!(event.new_operators, expected.operators);
    assert_eq!(event.new_weights, expected.weights);
    assert_eq!(event.new_threshold, expected.threshold);
}

#[test_log::test]
fn epoch_lookups_are_inverse() {
    let (mut gateway, first) = setup();
    let mut hashes = vec![first.hash()];
    for _ in 0..4 {
        let next = SigningOperatorSet::new(3, 2);
        gateway.transfer_operatorship(owner(), &next.encode()).unwrap();
        hashes.push(next.hash());
    }

    for epoch in 1..=gateway.current_epoch() {
        let hash = gateway.hash_for_epoch(epoch).unwrap();
        assert_eq!(hash, hashes[usize::try_from(epoch - 1).unwrap()]);
        assert_eq!(gateway.epoch_for_hash(&hash).unwrap(), epoch);
    }
    assert_eq!(
        gateway.hash_for_epoch(0).unwrap_err(),
        GatewayError::InvalidOperators
    );
    assert_eq!(
        gateway
            .hash_for_epoch(gateway.current_epoch() + 1)
            .unwrap_err(),
        GatewayError::InvalidOperators
    );
    assert_eq!(
        gateway.epoch_for_hash(&[0xff; 32]).unwrap_err(),
        GatewayError::InvalidOperators
    );
}

fn zero_address() -> WeightedOperators {
    let mut operators = sorted_addresses(3);
    operators[0] = Address::ZERO;
    WeightedOperators::new(operators, ones(3), U256::from(2_u8))
}

fn duplicate_address() -> WeightedOperators {
    let mut operators = sorted_addresses(3);
    operators[2] = operators[1];
    WeightedOperators::new(operators, ones(3), U256::from(2_u8))
}

fn unsorted_addresses() -> WeightedOperators {
    let mut operators = sorted_addresses(3);
    operators.reverse();
    WeightedOperators::new(operators, ones(3), U256::from(2_u8))
}

fn empty_operators() -> WeightedOperators {
    WeightedOperators::new(Vec::new(), Vec::new(), U256::from(1_u8))
}

fn zero_threshold() -> WeightedOperators {
    WeightedOperators::new(sorted_addresses(3), ones(3), U256::ZERO)
}

fn threshold_above_weight() -> WeightedOperators {
    WeightedOperators::new(sorted_addresses(3), ones(3), U256::from(4_u8))
}

fn mismatched_weights() -> WeightedOperators {
    WeightedOperators::new(sorted_addresses(3), ones(2), U256::from(2_u8))
}

#[rstest]
#[case::zero_address(zero_address(), GatewayError::InvalidOperators)]
#[case::duplicate_address(duplicate_address(), GatewayError::InvalidOperators)]
#[case::unsorted_addresses(unsorted_addresses(), GatewayError::InvalidOperators)]
#[case::empty_operators(empty_operators(), GatewayError::InvalidOperators)]
#[case::zero_threshold(zero_threshold(), GatewayError::InvalidThreshold)]
#[case::threshold_above_weight(threshold_above_weight(), GatewayError::InvalidThreshold)]
#[case::mismatched_weights(mismatched_weights(), GatewayError::InvalidWeights)]
fn invalid_operator_sets_are_rejected(
    #[case] operators: WeightedOperators,
    #[case] expected: GatewayError,
) {
    let (mut gateway, _) = setup();
    let before = gateway.state().clone();

    let err = gateway
        .transfer_operatorship(owner(), &operators.encode())
        .unwrap_err();

    assert_eq!(err, expected);
    assert_eq!(gateway.state(), &before);
    assert!(gateway.take_events().is_empty());
}

#[test_log::test]
fn registered_operator_sets_cannot_be_registered_again() {
    let (mut gateway, first) = setup();
    let second = SigningOperatorSet::new(3, 2);
    gateway
        .transfer_operatorship(owner(), &second.encode())
        .unwrap();

    for registered in [&first, &second] {
        assert_eq!(
            gateway
                .transfer_operatorship(owner(), &registered.encode())
                .unwrap_err(),
            GatewayError::DuplicateOperators
        );
    }
    assert_eq!(gateway.current_epoch(), 2);
}

#[test_log::test]
fn only_owner_can_rotate() {
    let (mut gateway, _) = setup();
    let new_operators = SigningOperatorSet::new(2, 2);

    let err = gateway
        .transfer_operatorship(random_address(), &new_operators.encode())
        .unwrap_err();

    assert_eq!(err, GatewayError::NotOwner);
    assert_eq!(gateway.current_epoch(), 1);
}

#[test_log::test]
fn undecodable_params_are_invalid_operators() {
    let (mut gateway, _) = setup();

    let err = gateway
        .transfer_operatorship(owner(), &[1, 2, 3])
        .unwrap_err();

    assert_eq!(err, GatewayError::InvalidOperators);
}
