//! 발전량/자가소비/배터리 계산 회귀 테스트.
use approx::assert_relative_eq;
use pv_yield_toolbox::{
    estimate, estimate_for_city, tilt_correction_factor, EstimationRequest, LocationEntry,
    LocationYieldTable, ValidationError,
};
use rstest::rstest;

fn reference_request() -> EstimationRequest {
    EstimationRequest {
        city: "Konstanz".into(),
        tilt_degrees: 30.0,
        yield_factor: 0.9,
        plant_size_kwp: 1000.0,
        self_consumption_share_pct: 40.0,
        battery_capacity_kwh: 0.0,
        battery_cycles_per_year: 250,
    }
}

#[test]
fn reference_plant_without_battery() {
    let res = estimate(&reference_request(), 1000.0).expect("valid request");
    assert_relative_eq!(res.tilt_factor, 1.0);
    assert_relative_eq!(res.adjusted_specific_yield, 900.0, max_relative = 1e-12);
    assert_relative_eq!(res.annual_generation_kwh, 900_000.0, max_relative = 1e-12);
    assert_relative_eq!(res.direct_self_consumption_kwh, 360_000.0, max_relative = 1e-12);
    assert_relative_eq!(res.surplus_before_storage_kwh, 540_000.0, max_relative = 1e-12);
    assert_eq!(res.max_shifted_energy_kwh, 0.0);
    assert_eq!(res.shifted_energy_kwh, 0.0);
    assert_eq!(res.self_consumption_with_storage_kwh, res.direct_self_consumption_kwh);
    assert_relative_eq!(res.autarky_without_storage_pct, 40.0, max_relative = 1e-12);
    assert_relative_eq!(res.autarky_with_storage_pct, 40.0, max_relative = 1e-12);
}

#[test]
fn reference_plant_with_battery() {
    let req = EstimationRequest {
        battery_capacity_kwh: 500.0,
        ..reference_request()
    };
    let res = estimate(&req, 1000.0).expect("valid request");
    assert_relative_eq!(res.max_shifted_energy_kwh, 125_000.0);
    assert_relative_eq!(res.shifted_energy_kwh, 125_000.0);
    assert_relative_eq!(res.self_consumption_with_storage_kwh, 485_000.0, max_relative = 1e-12);
    assert_relative_eq!(res.surplus_with_storage_kwh, 415_000.0, max_relative = 1e-12);
    assert_relative_eq!(res.autarky_with_storage_pct, 53.888_888_9, max_relative = 1e-8);
}

#[test]
fn battery_cannot_shift_more_than_surplus() {
    let req = EstimationRequest {
        self_consumption_share_pct: 90.0,
        battery_capacity_kwh: 10_000.0,
        ..reference_request()
    };
    let res = estimate(&req, 1000.0).expect("valid request");
    assert_relative_eq!(res.shifted_energy_kwh, res.surplus_before_storage_kwh);
    assert!(res.surplus_with_storage_kwh.abs() < 1e-6);
    assert_relative_eq!(res.autarky_with_storage_pct, 100.0, max_relative = 1e-12);
}

#[rstest]
#[case(30.0, 1.0)]
#[case(20.0, 0.98)]
#[case(40.0, 0.98)]
#[case(15.0, 0.97)]
#[case(0.0, 0.94)]
#[case(60.0, 0.94)]
#[case(90.0, 0.88)]
#[case(200.0, 0.85)]
#[case(-150.0, 0.85)]
fn tilt_factor_table(#[case] tilt: f64, #[case] expected: f64) {
    assert_relative_eq!(tilt_correction_factor(tilt), expected, max_relative = 1e-12);
}

#[rstest]
fn tilt_factor_symmetric_around_ideal(#[values(1.0, 5.0, 10.0, 17.0, 30.0)] d: f64) {
    assert_eq!(tilt_correction_factor(30.0 - d), tilt_correction_factor(30.0 + d));
}

#[test]
fn tilt_factor_always_within_bounds() {
    for step in -1800..=2700 {
        let f = tilt_correction_factor(f64::from(step) / 10.0);
        assert!((0.85..=1.05).contains(&f), "tilt {} -> {f}", f64::from(step) / 10.0);
    }
}

#[rstest]
#[case(0.0, 250)]
#[case(500.0, 0)]
#[case(0.0, 0)]
fn no_storage_effect_without_capacity_or_cycles(#[case] kwh: f64, #[case] cycles: u32) {
    let req = EstimationRequest {
        battery_capacity_kwh: kwh,
        battery_cycles_per_year: cycles,
        ..reference_request()
    };
    let res = estimate(&req, 1000.0).expect("valid request");
    assert_eq!(res.shifted_energy_kwh, 0.0);
    assert_eq!(res.self_consumption_with_storage_kwh, res.direct_self_consumption_kwh);
    assert_eq!(res.autarky_with_storage_pct, res.autarky_without_storage_pct);
}

#[test]
fn zero_plant_size_gives_zero_autarky() {
    let req = EstimationRequest {
        plant_size_kwp: 0.0,
        battery_capacity_kwh: 100.0,
        ..reference_request()
    };
    let res = estimate(&req, 1000.0).expect("zero plant size is allowed");
    assert_eq!(res.annual_generation_kwh, 0.0);
    assert_eq!(res.autarky_without_storage_pct, 0.0);
    assert_eq!(res.autarky_with_storage_pct, 0.0);
}

#[test]
fn invariants_hold_across_input_grid() {
    let table = LocationYieldTable::baden_wuerttemberg();
    for entry in table.all_entries() {
        for plant in [0.0, 10.0, 999.5, 50_000.0] {
            for tilt in [0.0, 12.5, 30.0, 47.0, 90.0] {
                for share in [0.0, 33.3, 40.0, 100.0] {
                    for (kwh, cycles) in [(0.0, 250), (5.0, 50), (500.0, 365), (1e7, 300)] {
                        let req = EstimationRequest {
                            city: entry.name.clone(),
                            tilt_degrees: tilt,
                            yield_factor: 0.95,
                            plant_size_kwp: plant,
                            self_consumption_share_pct: share,
                            battery_capacity_kwh: kwh,
                            battery_cycles_per_year: cycles,
                        };
                        let r = estimate_for_city(&table, &req).expect("valid request");
                        let eps = 1e-6 * r.annual_generation_kwh.max(1.0);
                        assert!(r.annual_generation_kwh >= 0.0);
                        assert!(r.direct_self_consumption_kwh <= r.annual_generation_kwh + eps);
                        assert!(
                            r.self_consumption_with_storage_kwh <= r.annual_generation_kwh + eps
                        );
                        assert!(r.shifted_energy_kwh <= kwh * f64::from(cycles));
                        assert!(r.shifted_energy_kwh <= r.surplus_before_storage_kwh);
                        assert!(r.surplus_with_storage_kwh >= 0.0);
                        assert!(r.autarky_with_storage_pct >= r.autarky_without_storage_pct);
                    }
                }
            }
        }
    }
}

#[test]
fn unknown_city_is_rejected_not_defaulted() {
    let table = LocationYieldTable::baden_wuerttemberg();
    let req = EstimationRequest {
        city: "Muenchen".into(),
        ..reference_request()
    };
    assert_eq!(
        estimate_for_city(&table, &req),
        Err(ValidationError::UnknownCity("Muenchen".into()))
    );
}

#[test]
fn city_lookup_feeds_base_yield() {
    let table = LocationYieldTable::new(vec![
        LocationEntry::new("Sunny", 1200.0),
        LocationEntry::new("Cloudy", 800.0),
    ])
    .expect("valid table");
    let req = EstimationRequest {
        city: "Sunny".into(),
        yield_factor: 1.0,
        ..reference_request()
    };
    let res = estimate_for_city(&table, &req).expect("known city");
    assert_relative_eq!(res.annual_generation_kwh, 1_200_000.0);
}

#[rstest]
#[case::negative_plant(EstimationRequest { plant_size_kwp: -1.0, ..reference_request() }, "plant_size_kwp")]
#[case::negative_battery(EstimationRequest { battery_capacity_kwh: -0.5, ..reference_request() }, "battery_capacity_kwh")]
#[case::share_above_100(EstimationRequest { self_consumption_share_pct: 100.5, ..reference_request() }, "self_consumption_share_pct")]
#[case::share_below_0(EstimationRequest { self_consumption_share_pct: -5.0, ..reference_request() }, "self_consumption_share_pct")]
#[case::tilt_above_90(EstimationRequest { tilt_degrees: 91.0, ..reference_request() }, "tilt_degrees")]
#[case::tilt_below_0(EstimationRequest { tilt_degrees: -1.0, ..reference_request() }, "tilt_degrees")]
#[case::yield_factor_overflows(EstimationRequest { yield_factor: 1e306, ..reference_request() }, "yield_factor")]
#[case::zero_yield_factor(EstimationRequest { yield_factor: 0.0, ..reference_request() }, "yield_factor")]
#[case::nan_plant(EstimationRequest { plant_size_kwp: f64::NAN, ..reference_request() }, "plant_size_kwp")]
#[case::generation_overflows(EstimationRequest { plant_size_kwp: 1e306, ..reference_request() }, "plant_size_kwp")]
#[case::battery_throughput_overflows(EstimationRequest { battery_capacity_kwh: 1e307, ..reference_request() }, "battery_capacity_kwh")]
fn out_of_domain_inputs_are_rejected(#[case] req: EstimationRequest, #[case] expected: &str) {
    match estimate(&req, 1000.0) {
        Err(ValidationError::OutOfRange { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected OutOfRange for {expected}, got {other:?}"),
    }
}

#[test]
fn non_positive_base_yield_is_rejected() {
    assert!(matches!(
        estimate(&reference_request(), 0.0),
        Err(ValidationError::OutOfRange { field: "base_yield", .. })
    ));
}
