//! Walk → sample → read → forecast → write over a real directory tree.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ffi::OsStr;
use std::fs;
use stockcast_core::{
    read_price_table, sample_files, walk_exchanges, write_forecast, ForecastMethod,
    PREDICTION_HORIZON,
};

const MESSY: &str = "Date,Open,High,Low,Close,Adj Close,Volume,Note\n\
2024-02-01,\"10.00\",10.50,9.75,10.25,10.20,5000,\"earnings, beat\"\n\
2024-02-02, 10.25 ,10.90,10.10,10.80,10.74,6100,\n\
2024-02-05,10.80,11.20,10.60,11.05,10.99,5800,\"said \"\"hold\"\"\"\n";

#[test]
fn messy_rows_survive_unchanged() {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out");
    fs::create_dir_all(input.join("AMEX")).unwrap();
    fs::write(input.join("AMEX").join("XYZ.csv"), MESSY).unwrap();

    let exchanges: Vec<_> = walk_exchanges(&input).unwrap().map(Result::unwrap).collect();
    assert_eq!(exchanges.len(), 1);
    let exchange = &exchanges[0];

    let mut rng = StdRng::seed_from_u64(12);
    let picked = sample_files(&exchange.files, 2, &mut rng);
    assert_eq!(picked.len(), 1);

    let table = read_price_table(&picked[0]).unwrap();
    let forecaster = ForecastMethod::default().create();
    let values = forecaster.forecast(&table.closes(), table.close_precision(), &mut rng);
    let predicted = table.predicted_rows(&values);
    assert_eq!(predicted.len(), PREDICTION_HORIZON);

    let path =
        write_forecast(&output, exchange, OsStr::new("XYZ.csv"), &table, &predicted).unwrap();
    let written = fs::read_to_string(path).unwrap();
    assert!(written.starts_with(MESSY));

    let appended: Vec<&str> = written[MESSY.len()..].lines().collect();
    assert_eq!(appended.len(), 3);
    // Weekend gap in the history does not matter: predictions are calendar days.
    assert!(appended[0].starts_with("2024-02-06,11.05,"));
    assert!(appended[1].starts_with("2024-02-07,"));
    assert!(appended[2].starts_with("2024-02-08,"));
    // Volume and free-text columns are carried from the last row.
    for line in &appended {
        assert!(line.ends_with(",5800,\"said \"\"hold\"\"\""), "{line}");
    }
}
