use clap::Parser;
use pv_yield_toolbox::cli::{Cli, Command, OrientationArg, PlantArgs, RoofArg};
use pv_yield_toolbox::config::PlantInputs;
use pv_yield_toolbox::{Orientation, ValidationError};
use rstest::rstest;

#[test]
fn empty_flags_keep_defaults() {
    let defaults = PlantInputs::default();
    assert_eq!(PlantArgs::default().apply(&defaults), Ok(defaults.clone()));
}

#[rstest]
#[case(RoofArg::Flat, None, 15.0)]
#[case(RoofArg::House, None, 30.0)]
#[case(RoofArg::MonoPitch, None, 30.0)]
#[case(RoofArg::MonoPitch, Some(20), 20.0)]
#[case(RoofArg::MonoPitch, Some(40), 40.0)]
fn roof_presets_set_tilt(#[case] roof: RoofArg, #[case] pitch: Option<u8>, #[case] tilt: f64) {
    let args = PlantArgs {
        roof: Some(roof),
        pitch,
        ..PlantArgs::default()
    };
    let inputs = args.apply(&PlantInputs::default()).expect("valid preset");
    assert_eq!(inputs.tilt_degrees, tilt);
}

#[test]
fn unsupported_mono_pitch_is_rejected() {
    let args = PlantArgs {
        roof: Some(RoofArg::MonoPitch),
        pitch: Some(25),
        ..PlantArgs::default()
    };
    assert!(matches!(
        args.apply(&PlantInputs::default()),
        Err(ValidationError::OutOfRange { field: "pitch", .. })
    ));
}

#[test]
fn orientation_flags() {
    let defaults = PlantInputs::default();
    let east_west = PlantArgs {
        orientation: Some(OrientationArg::EastWest),
        south_quality: Some(70.0),
        ..PlantArgs::default()
    };
    assert_eq!(east_west.apply(&defaults).unwrap().orientation, Orientation::EastWest);

    let quality_only = PlantArgs {
        south_quality: Some(80.0),
        ..PlantArgs::default()
    };
    assert_eq!(
        quality_only.apply(&defaults).unwrap().orientation,
        Orientation::South { quality_pct: 80.0 }
    );

    let south_from_east_west = PlantArgs {
        orientation: Some(OrientationArg::South),
        ..PlantArgs::default()
    };
    let ew_defaults = PlantInputs {
        orientation: Orientation::EastWest,
        ..PlantInputs::default()
    };
    assert_eq!(
        south_from_east_west.apply(&ew_defaults).unwrap().orientation,
        Orientation::South { quality_pct: 90.0 }
    );

    let invalid = PlantArgs {
        south_quality: Some(120.0),
        ..PlantArgs::default()
    };
    assert!(invalid.apply(&defaults).is_err());
}

#[test]
fn parses_estimate_subcommand() {
    let cli = Cli::try_parse_from([
        "pv_yield_toolbox",
        "--lang",
        "en",
        "estimate",
        "--city",
        "Stuttgart",
        "--plant-kwp",
        "250",
        "--roof",
        "mono-pitch",
        "--pitch",
        "40",
        "--battery-kwh",
        "50",
        "--cycles",
        "300",
    ])
    .expect("valid arguments");
    assert_eq!(cli.lang.as_deref(), Some("en"));
    let Some(Command::Estimate(args)) = cli.command else {
        panic!("expected estimate subcommand");
    };
    let inputs = args.apply(&PlantInputs::default()).expect("valid inputs");
    assert_eq!(inputs.city, "Stuttgart");
    assert_eq!(inputs.plant_size_kwp, 250.0);
    assert_eq!(inputs.tilt_degrees, 40.0);
    assert_eq!(inputs.battery_capacity_kwh, 50.0);
    assert_eq!(inputs.battery_cycles_per_year, 300);
}

#[test]
fn tilt_and_roof_conflict() {
    let res = Cli::try_parse_from([
        "pv_yield_toolbox",
        "scenarios",
        "--tilt",
        "25",
        "--roof",
        "flat",
    ]);
    assert!(res.is_err());
}

#[test]
fn no_subcommand_means_interactive() {
    let cli = Cli::try_parse_from(["pv_yield_toolbox"]).expect("valid arguments");
    assert!(cli.command.is_none());
    assert!(!cli.verbose);
}
