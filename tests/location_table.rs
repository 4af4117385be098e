use pv_yield_toolbox::location::{LocationEntry, LocationYieldTable, TableError, DEFAULT_CITY};
use rstest::rstest;

#[test]
fn builtin_table_has_sixteen_positive_cities() {
    let table = LocationYieldTable::baden_wuerttemberg();
    assert_eq!(table.all_entries().len(), 16);
    assert!(table.all_entries().iter().all(|e| e.specific_yield > 0.0));
    assert!(table.lookup(DEFAULT_CITY).is_some());
}

#[rstest]
#[case("Konstanz", 1000.0)]
#[case("Freiburg im Breisgau", 1050.0)]
#[case("Villingen-Schwenningen", 960.0)]
#[case("Loerrach", 1050.0)]
#[case("stuttgart", 1000.0)]
#[case("  Ulm ", 980.0)]
fn lookup_known_cities(#[case] city: &str, #[case] expected: f64) {
    let table = LocationYieldTable::baden_wuerttemberg();
    assert_eq!(table.lookup(city), Some(expected));
}

#[test]
fn lookup_unknown_city_is_none() {
    let table = LocationYieldTable::baden_wuerttemberg();
    assert_eq!(table.lookup("Berlin"), None);
    assert_eq!(table.lookup(""), None);
}

#[test]
fn entries_keep_insertion_order_and_sorted_view_is_alphabetical() {
    let table = LocationYieldTable::baden_wuerttemberg();
    let first: Vec<&str> = table
        .all_entries()
        .iter()
        .take(3)
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(first, ["Konstanz", "Freiburg im Breisgau", "Stuttgart"]);

    let sorted = table.sorted_names();
    assert_eq!(sorted.first(), Some(&"Baden-Baden"));
    assert_eq!(sorted.last(), Some(&"Villingen-Schwenningen"));
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn custom_table_rejects_duplicates_ignoring_case() {
    let err = LocationYieldTable::new(vec![
        LocationEntry::new("Ulm", 980.0),
        LocationEntry::new("ULM", 990.0),
    ])
    .unwrap_err();
    assert_eq!(err, TableError::DuplicateCity("ULM".into()));
}

#[rstest]
#[case(0.0)]
#[case(-10.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn custom_table_rejects_non_positive_yield(#[case] value: f64) {
    let err = LocationYieldTable::new(vec![LocationEntry::new("Nowhere", value)]).unwrap_err();
    assert!(matches!(err, TableError::NonPositiveYield { ref city, .. } if city == "Nowhere"));
}

#[test]
fn custom_table_rejects_empty_list() {
    assert_eq!(LocationYieldTable::new(Vec::new()), Err(TableError::Empty));
}
