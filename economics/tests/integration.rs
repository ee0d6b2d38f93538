use alliance_economics::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Native asset from the reference scenario: 1B supply fully staked,
/// 7% inflation, $1.30, weight 1, no LSD growth
fn reference_calculator() -> AllianceCalculator {
    let native = NativeInputs::with_supply(0.07, 1_000_000_000.0, 1.3, 1.0);
    AllianceCalculator::new(native, TakeRateSchedule::default()).with_native_label("LUNA")
}

fn amp_luna() -> AllianceInputs {
    AllianceInputs {
        lsd_annual_estimate: 0.08,
        asset_price: 1.4,
        alliance_reward_weight: 0.5,
        annualized_take_rate: 0.02,
        asset_staked_in_alliance: 10_000_000.0,
    }
}

fn assert_aggregate_consistent(calc: &AllianceCalculator) {
    let weight: f64 = calc.assets().map(|r| r.contribution().weight).sum();
    let value: f64 = calc.assets().map(|r| r.contribution().value).sum();
    let aggregate = calc.pool_aggregate();

    assert_eq!(calc.pool().len(), calc.assets().count());
    assert!(approx(aggregate.total_weight, weight), "weight {} != {}", aggregate.total_weight, weight);
    assert!(
        approx(aggregate.total_pool_value, value),
        "value {} != {}",
        aggregate.total_pool_value,
        value
    );
}

#[test]
fn test_native_only_pool() {
    let calc = reference_calculator();
    let derived = calc.native().derived();

    assert!(approx(derived.reward_pool_makeup, 70_000_000.0));
    assert!(approx(derived.value_including_lsd, 91_000_000.0));
    assert_eq!(derived.reward_pool_weight_share, 1.0);
    assert_eq!(derived.percentage_of_pool_value, 1.0);
    assert!(approx(derived.staking_reward_value, 91_000_000.0));
    assert!(approx(derived.staking_apr, 0.07), "APR was {}", derived.staking_apr);

    assert!(approx(calc.get_derived(AssetId::NATIVE, "rewardPoolOnChain").unwrap(), 70_000_000.0));
    assert!(approx(calc.get_derived(AssetId::NATIVE, "poolTotalValue").unwrap(), 91_000_000.0));
}

#[test]
fn test_equal_weights_split_pool_in_half() {
    let mut calc = reference_calculator();
    let id = calc.add_alliance_asset(
        "ampLUNA",
        AllianceInputs {
            alliance_reward_weight: 1.0,
            ..amp_luna()
        },
    );

    assert_eq!(calc.native().derived().reward_pool_weight_share, 0.5);
    assert_eq!(calc.get_derived(id, "rewardPoolWeightShare").unwrap(), 0.5);
    assert_eq!(calc.pool_aggregate().total_weight, 2.0);
}

#[test]
fn test_zero_price_gives_non_finite_apr_only_for_that_asset() {
    // Alone in the pool: (0 + 0 - 0) / 0
    let mut calc = reference_calculator();
    calc.set_input(AssetId::NATIVE, "assetPrice", 0.0).unwrap();
    assert!(calc.native().derived().staking_apr.is_nan());

    // With another asset in the pool the reward share is positive: x / 0
    let mut calc = reference_calculator();
    let id = calc.add_alliance_asset("ampLUNA", amp_luna());
    calc.set_input(id, "assetPrice", 0.0).unwrap();

    let apr = calc.get_derived(id, "stakingAPR").unwrap();
    assert!(!apr.is_finite());
    assert!(calc.native().derived().staking_apr.is_finite());
    assert_aggregate_consistent(&calc);
}

#[test]
fn test_zero_total_weight_gives_nan_share_everywhere() {
    let mut calc = reference_calculator();
    let id = calc.add_alliance_asset("ampLUNA", amp_luna());

    calc.set_input(AssetId::NATIVE, "allianceRewardWeight", 0.0).unwrap();
    calc.set_input(id, "allianceRewardWeight", 0.0).unwrap();

    assert_eq!(calc.pool_aggregate().total_weight, 0.0);
    for record in calc.assets() {
        assert!(
            record.derived().reward_pool_weight_share.is_nan(),
            "asset {} share should be NaN",
            record.id()
        );
    }
}

#[test]
fn test_set_input_is_idempotent() {
    let mut calc = reference_calculator();
    let id = calc.add_alliance_asset("ampLUNA", amp_luna());

    let first = calc.set_input(id, "annualizedTakeRate", 0.05).unwrap();
    let aggregate = calc.pool_aggregate();
    let second = calc.set_input(id, "annualizedTakeRate", 0.05).unwrap();

    assert_eq!(first, second);
    assert_eq!(aggregate, calc.pool_aggregate());
}

#[test]
fn test_remove_and_re_add_round_trip() {
    let mut calc = reference_calculator();
    calc.add_alliance_asset("stATOM", AllianceInputs {
        asset_price: 11.0,
        asset_staked_in_alliance: 500_000.0,
        annualized_take_rate: 0.01,
        ..AllianceInputs::default()
    });
    let id = calc.add_alliance_asset("ampLUNA", amp_luna());

    let native_before = *calc.native().derived();
    let asset_before = *calc.record(id).unwrap().derived();
    let aggregate_before = calc.pool_aggregate();

    let removed = calc.remove_alliance_asset(id).unwrap();
    assert_eq!(removed.label(), "ampLUNA");
    assert!(!calc.pool().is_registered(id));
    assert_aggregate_consistent(&calc);

    let re_added = calc.add_alliance_asset("ampLUNA", amp_luna());
    assert_ne!(re_added, id);
    assert_eq!(*calc.record(re_added).unwrap().derived(), asset_before);
    assert_eq!(*calc.native().derived(), native_before);
    assert_eq!(calc.pool_aggregate(), aggregate_before);
}

#[test]
fn test_remove_and_re_add_earlier_asset_round_trip() {
    let mut calc = AllianceCalculator::default();
    let first = calc.add_alliance_asset("A", AllianceInputs {
        asset_price: 1.7,
        lsd_annual_estimate: 0.13,
        annualized_take_rate: 0.03,
        asset_staked_in_alliance: 13_331.0,
        ..AllianceInputs::default()
    });
    calc.add_alliance_asset("B", AllianceInputs {
        asset_price: 2.9,
        lsd_annual_estimate: 0.07,
        annualized_take_rate: 0.017,
        asset_staked_in_alliance: 16_027.0,
        ..AllianceInputs::default()
    });

    let inputs = *calc.record(first).unwrap().inputs();
    let derived_before = *calc.record(first).unwrap().derived();
    let native_before = *calc.native().derived();
    let aggregate_before = calc.pool_aggregate();

    let removed = calc.remove_alliance_asset(first).unwrap();
    let alliance_inputs = match inputs {
        AssetInputs::Alliance(alliance) => alliance,
        AssetInputs::Native(_) => panic!("alliance record held native inputs"),
    };
    let re_added = calc.add_alliance_asset(removed.label(), alliance_inputs);

    assert_eq!(calc.pool_aggregate(), aggregate_before);
    assert_eq!(*calc.native().derived(), native_before);
    assert_eq!(*calc.record(re_added).unwrap().derived(), derived_before);
}

#[test]
fn test_aggregate_tracks_every_mutation() {
    let mut calc = reference_calculator();
    assert_aggregate_consistent(&calc);

    let a = calc.add_alliance_asset("ampLUNA", amp_luna());
    assert_aggregate_consistent(&calc);

    let b = calc.add_alliance_asset("bLUNA", AllianceInputs {
        asset_staked_in_alliance: 2_000_000.0,
        annualized_take_rate: 0.1,
        ..AllianceInputs::default()
    });
    assert_aggregate_consistent(&calc);

    calc.set_input(a, "lsdAnnualEstimate", 0.12).unwrap();
    assert_aggregate_consistent(&calc);

    calc.set_native_input(NativeInput::InflationRate, 0.05).unwrap();
    assert_aggregate_consistent(&calc);

    calc.set_alliance_input(b, AllianceInput::AllianceRewardWeight, 3.0).unwrap();
    assert_aggregate_consistent(&calc);
    assert_eq!(calc.pool_aggregate().total_weight, 1.0 + 0.5 + 3.0);

    calc.remove_alliance_asset(a).unwrap();
    assert_aggregate_consistent(&calc);
}

#[test]
fn test_other_assets_follow_pool_changes() {
    let mut calc = reference_calculator();
    let id = calc.add_alliance_asset("ampLUNA", amp_luna());
    let native_reward_before = calc.native().derived().staking_reward_value;

    // Raising the alliance stake grows the pool, so the native share of it grows too
    calc.set_input(id, "assetStakedInAlliance", 100_000_000.0).unwrap();

    let native = calc.native().derived();
    assert!(native.staking_reward_value > native_reward_before);
    assert!(approx(
        native.native_value(NativeOutput::PoolTotalValue),
        calc.pool_aggregate().total_pool_value
    ));
}

#[test]
fn test_own_contribution_is_part_of_the_pool_it_divides() {
    let mut calc = reference_calculator();
    let id = calc.add_alliance_asset("ampLUNA", amp_luna());

    let aggregate = calc.pool_aggregate();
    let own = calc.record(id).unwrap().derived();

    // 10M * 2% = 200k tokens at $1.40 with 8% LSD growth
    assert!(approx(own.value_including_lsd, 200_000.0 * 1.4 * 1.08));
    assert!(approx(aggregate.total_pool_value, 91_000_000.0 + own.value_including_lsd));

    // The reward is a weight share of a total that already includes this asset's inflow
    let share = 0.5 / 1.5;
    assert!(approx(own.reward_pool_weight_share, share));
    assert!(approx(own.staking_reward_value, share * aggregate.total_pool_value));
    assert!(approx(
        own.percentage_of_pool_value,
        own.value_including_lsd / aggregate.total_pool_value
    ));

    let entry_value = 10_000_000.0 * 1.4;
    assert!(approx(own.staking_apr, own.staking_reward_value / entry_value));
}

#[test]
fn test_unknown_fields_fail_without_mutation() {
    let mut calc = reference_calculator();
    let id = calc.add_alliance_asset("ampLUNA", amp_luna());
    let before = calc.snapshot();

    for (asset, name) in [
        (AssetId::NATIVE, "annualizedTakeRate"),
        (AssetId::NATIVE, "stakingAPR"),
        (id, "inflationRate"),
        (id, "totalTokenSupply"),
        (id, "bogus"),
    ] {
        let err = calc.set_input(asset, name, 1.0).unwrap_err();
        assert!(
            matches!(err, CalculatorError::UnknownField { ref field, .. } if field == name),
            "unexpected error {:?}",
            err
        );
    }

    assert!(calc.get_derived(id, "rewardPoolOnChain").is_err());
    assert!(calc.get_derived(AssetId::NATIVE, "takeRateIntervalMinutes").is_err());

    let after = calc.snapshot();
    assert_eq!(before.aggregate, after.aggregate);
    assert_eq!(before.assets, after.assets);
}

#[test]
fn test_take_rate_parameter_reported_for_alliance_assets() {
    let mut calc = reference_calculator();
    let id = calc.add_alliance_asset("ampLUNA", amp_luna());

    let schedule = calc.take_rate_schedule();
    assert_eq!(
        calc.get_derived(id, "takeRateIntervalMinutes").unwrap(),
        DEFAULT_TAKE_RATE_INTERVAL_MINUTES
    );
    assert_eq!(
        calc.get_derived(id, "takeRateParameter").unwrap(),
        schedule.parameter_for(0.02)
    );
}

#[test]
fn test_negative_inputs_propagate() {
    let mut calc = reference_calculator();
    let derived = calc.set_input(AssetId::NATIVE, "assetStakedInAlliance", -1.0).unwrap();

    assert_eq!(derived.principal_excluding_rewards, -1.0);
    assert!(derived.value_including_lsd < 0.0);
}
