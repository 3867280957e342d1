use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use tempfile::{tempdir, TempDir};

use dealership_etl::pipeline::{run, Config};

const HEADER: &str = "car_model,year_of_manufacture,price,fuel";

/// A scratch layout with the data directory separate from the output file,
/// so the output can never be picked up as a source.
fn scratch() -> Result<(TempDir, PathBuf, PathBuf)> {
    let dir = tempdir()?;
    let data_dir = dir.path().join("data");
    fs::create_dir(&data_dir)?;
    let output_file = dir.path().join("cars.csv");
    Ok((dir, data_dir, output_file))
}

fn config(data_dir: &Path, output_file: &Path, threshold: u64) -> Config {
    Config {
        data_dir: data_dir.to_path_buf(),
        output_file: output_file.to_path_buf(),
        threshold,
        delay: Duration::ZERO,
        quiet: true,
    }
}

#[test]
fn threshold_keeps_frequent_models_and_drops_rare_ones() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    fs::write(
        data.join("sales.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         Civic,2010,5000,gasoline\n\
         Civic,2012,7000.5,diesel\n\
         Focus,2014,9000,gasoline\n",
    )?;

    let summary = run(&config(&data, &out, 2))?;
    assert_eq!(summary.files_read, 1);
    assert_eq!(summary.records_read, 3);
    assert_eq!(summary.records_written, 2);

    let written = fs::read_to_string(&out)?;
    assert_eq!(
        written,
        format!("{HEADER}\nCivic,2010,5000.00,gasoline\nCivic,2012,7000.50,diesel\n")
    );
    Ok(())
}

#[test]
fn counts_sum_across_formats() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    // Two csv occurrences + one json occurrence of the same model name:
    // exactly at threshold 3 once all formats are counted together.
    fs::write(
        data.join("a.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         civic,2010,5000,gasoline\n\
         civic,2011,6000,gasoline\n",
    )?;
    fs::write(
        data.join("b.json"),
        "{\"car_model\":\"civic\",\"year_of_manufacture\":2012,\"price\":7000,\"fuel\":\"diesel\"}\n",
    )?;
    fs::write(
        data.join("c.xml"),
        "<root>\n\
         <row>\n\
         <car_model>outback</car_model>\n\
         <year>2013</year>\n\
         <price>8000</price>\n\
         <fuel>gasoline</fuel>\n\
         </row>\n\
         </root>\n",
    )?;

    let summary = run(&config(&data, &out, 3))?;
    assert_eq!(summary.files_read, 3);
    assert_eq!(summary.records_read, 4);
    assert_eq!(summary.records_written, 3);

    let written = fs::read_to_string(&out)?;
    // Output order follows ingestion order: csv group, then json, then xml;
    // the lone outback falls below threshold.
    assert_eq!(
        written,
        format!(
            "{HEADER}\n\
             Civic,2010,5000.00,gasoline\n\
             Civic,2011,6000.00,gasoline\n\
             Civic,2012,7000.00,diesel\n"
        )
    );
    Ok(())
}

#[test]
fn model_counting_is_case_sensitive() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    // Same model in different source casings counts as distinct keys.
    fs::write(
        data.join("sales.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         civic,2010,5000,gasoline\n\
         CIVIC,2011,6000,gasoline\n",
    )?;

    let summary = run(&config(&data, &out, 2))?;
    assert_eq!(summary.records_written, 0);
    Ok(())
}

#[test]
fn zero_retained_records_still_writes_header() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    fs::write(
        data.join("sales.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         Focus,2014,9000,gasoline\n",
    )?;

    let summary = run(&config(&data, &out, 3))?;
    assert_eq!(summary.records_written, 0);
    assert_eq!(fs::read_to_string(&out)?, format!("{HEADER}\n"));
    Ok(())
}

#[test]
fn empty_data_directory_is_a_successful_run() -> Result<()> {
    let (_dir, data, out) = scratch()?;

    let summary = run(&config(&data, &out, 3))?;
    assert_eq!(summary.files_read, 0);
    assert_eq!(summary.records_read, 0);
    assert_eq!(fs::read_to_string(&out)?, format!("{HEADER}\n"));
    Ok(())
}

#[test]
fn short_csv_rows_render_missing_fields_empty() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    fs::write(
        data.join("sales.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         civic hybrid,2010\n\
         civic hybrid,2011\n",
    )?;

    run(&config(&data, &out, 2))?;
    let written = fs::read_to_string(&out)?;
    // No price and no fuel on either row, and the model is title-cased.
    assert_eq!(
        written,
        format!("{HEADER}\nCivic Hybrid,2010,,\nCivic Hybrid,2011,,\n")
    );
    Ok(())
}

#[test]
fn files_within_a_format_are_ingested_in_sorted_order() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    fs::write(
        data.join("b.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         Golf,2002,2000,gasoline\n",
    )?;
    fs::write(
        data.join("a.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         Golf,2001,1000,gasoline\n",
    )?;

    run(&config(&data, &out, 2))?;
    let written = fs::read_to_string(&out)?;
    assert_eq!(
        written,
        format!("{HEADER}\nGolf,2001,1000.00,gasoline\nGolf,2002,2000.00,gasoline\n")
    );
    Ok(())
}

#[test]
fn malformed_json_aborts_the_run() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    fs::write(data.join("bad.json"), "{\"car_model\": \"Civic\"\n")?;

    assert!(run(&config(&data, &out, 1)).is_err());
    Ok(())
}

#[test]
fn non_numeric_price_aborts_the_run() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    fs::write(
        data.join("sales.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         Civic,2010,cheap,gasoline\n",
    )?;

    assert!(run(&config(&data, &out, 1)).is_err());
    Ok(())
}

#[test]
fn delay_does_not_change_output() -> Result<()> {
    let (_dir, data, out) = scratch()?;
    fs::write(
        data.join("sales.csv"),
        "car_model,year_of_manufacture,price,fuel\n\
         Civic,2010,5000,gasoline\n\
         Civic,2011,6000,diesel\n",
    )?;

    run(&config(&data, &out, 2))?;
    let fast = fs::read_to_string(&out)?;

    let mut slow_config = config(&data, &out, 2);
    slow_config.delay = Duration::from_millis(5);
    run(&slow_config)?;

    assert_eq!(fast, fs::read_to_string(&out)?);
    Ok(())
}
