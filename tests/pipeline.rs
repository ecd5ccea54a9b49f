use std::fs;
use std::path::Path;

use centrifugation_expt::analysis::{SheetSource, analyze_csv, analyze_workbook};
use centrifugation_expt::app::pipeline::{AnalysisConfig, OutputPaths, analyze_source};
use centrifugation_expt::app::run_with_config;
use centrifugation_expt::domain::{Cell, Source};
use centrifugation_expt::error::ErrorKind;
use centrifugation_expt::io::{CalamineWorkbook, write_result_workbook};
use centrifugation_expt::plot::PlotConfig;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

// Solvent concentration 0.5; each run uses 10 g of liquid and 1 g of cake, so
// the ratio is 0.2 everywhere.
const SINGLE_RUN_CSV: &str = "\
2024-01-01 08:00:00,1,6,11
2024-01-01 10:30:00,10,20,11
2024-01-01 14:00:00,10,20,11
";

fn write_sample_workbook(path: &Path) {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    let header = [
        "start_time", "v_ref", "v_lo", "v_hi", "time", "empty", "liquid", "dried",
    ];
    for (col, title) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    sheet.write_string(1, 0, "2024-01-01 08:00:00").unwrap();
    for (col, v) in [1.0, 6.0, 11.0].into_iter().enumerate() {
        sheet.write_number(1, col as u16 + 1, v).unwrap();
    }
    sheet.write_string(1, 4, "2024-01-01 10:30:00").unwrap();
    sheet.write_string(2, 4, "2024-01-01 14:00:00").unwrap();
    for row in 1..=2 {
        for (col, v) in [10.0, 20.0, 11.0].into_iter().enumerate() {
            sheet.write_number(row, col as u16 + 5, v).unwrap();
        }
    }
    // Incomplete run row: dropped.
    sheet.write_string(3, 4, "2024-01-01 18:00:00").unwrap();

    let sheet = workbook.add_worksheet();
    for (col, title) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }
    sheet.write_string(1, 0, "2024-02-01 09:00:00").unwrap();
    for (col, v) in [1.0, 6.0, 11.0].into_iter().enumerate() {
        sheet.write_number(1, col as u16 + 1, v).unwrap();
    }
    sheet.write_string(1, 4, "2024-02-01 10:00:00").unwrap();
    for (col, v) in [10.0, 20.0, 11.0].into_iter().enumerate() {
        sheet.write_number(1, col as u16 + 5, v).unwrap();
    }

    workbook.save(path).unwrap();
}

#[test]
fn csv_end_to_end_writes_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sample.csv");
    fs::write(&input, SINGLE_RUN_CSV).unwrap();

    let config = AnalysisConfig {
        source: Source::Csv(input.clone()),
        out_dir: dir.path().to_path_buf(),
        plot: None,
    };
    run_with_config(&config).unwrap();

    let paths = OutputPaths::new(&config.source, dir.path());
    let written = fs::read_to_string(&paths.table).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines, vec!["2.5,9000,0.2", "6,21600,0.2"]);
    assert!(!paths.plot.exists());
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.len() > PNG_SIGNATURE.len(), "{} is empty", path.display());
    assert_eq!(bytes[..8], PNG_SIGNATURE, "{} is not a PNG", path.display());
}

#[test]
fn csv_end_to_end_writes_table_and_plot() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sample.csv");
    fs::write(&input, SINGLE_RUN_CSV).unwrap();

    let config = AnalysisConfig {
        source: Source::Csv(input),
        out_dir: dir.path().to_path_buf(),
        plot: Some(PlotConfig::default()),
    };
    run_with_config(&config).unwrap();

    let paths = OutputPaths::new(&config.source, dir.path());
    assert!(paths.plot.ends_with("sample_analysis_csv.png"));
    assert!(fs::metadata(&paths.table).unwrap().len() > 0);
    assert_png(&paths.plot);
}

#[test]
fn workbook_end_to_end_writes_table_and_legend_plot() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("runs.xlsx");
    write_sample_workbook(&input);

    let config = AnalysisConfig {
        source: Source::Workbook(input),
        out_dir: dir.path().to_path_buf(),
        plot: Some(PlotConfig {
            width: 640,
            height: 480,
        }),
    };
    run_with_config(&config).unwrap();

    let paths = OutputPaths::new(&config.source, dir.path());
    assert!(paths.table.ends_with("runs_analysis.xlsx"));
    assert!(paths.plot.ends_with("runs_analysis_excel.png"));

    let written = CalamineWorkbook::open(&paths.table).unwrap();
    assert_eq!(written.sheet_count(), 2);
    assert_png(&paths.plot);
}

#[test]
fn workbook_sheets_become_blocks() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("runs.xlsx");
    write_sample_workbook(&input);

    let mut workbook = CalamineWorkbook::open(&input).unwrap();
    assert_eq!(workbook.sheet_count(), 2);

    let analysis = analyze_workbook(&mut workbook).unwrap();
    assert_eq!(analysis.table.column_count(), 6);
    assert_eq!(analysis.table.blocks()[0].len(), 2);
    assert_eq!(analysis.table.blocks()[1].len(), 1);

    assert_eq!(analysis.table.row(0), vec![
        Some(2.5),
        Some(9000.0),
        Some(0.2),
        Some(1.0),
        Some(3600.0),
        Some(0.2)
    ]);
    assert_eq!(analysis.table.cell(1, 0), Some(6.0));
    assert_eq!(analysis.table.cell(1, 3), None);
}

#[test]
fn workbook_result_reads_back_per_sheet() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("runs.xlsx");
    write_sample_workbook(&input);
    let analysis = analyze_source(&Source::Workbook(input)).unwrap();

    let output = dir.path().join("runs_analysis.xlsx");
    write_result_workbook(&output, &analysis.table).unwrap();

    let mut written = CalamineWorkbook::open(&output).unwrap();
    assert_eq!(written.sheet_names(), vec!["Sheet1", "Sheet2"]);

    let first = written.sheet(0).unwrap().unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first.get(0, 0), Some(&Cell::Number(2.5)));
    assert_eq!(first.get(1, 1), Some(&Cell::Number(21600.0)));

    let second = written.sheet(1).unwrap().unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second.get(0, 2), Some(&Cell::Number(0.2)));

    assert!(written.sheet(2).unwrap().is_none());
}

#[test]
fn missing_inputs_are_io_errors() {
    let dir = tempdir().unwrap();

    let err = analyze_csv(&dir.path().join("ghost.csv")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.exit_code(), 2);
    assert!(err.message().contains("ghost.csv"));

    let err = analyze_source(&Source::Workbook(dir.path().join("ghost.xlsx"))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.message().contains("ghost.xlsx"));
}

#[test]
fn short_solution_row_is_invalid_data() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "2024-01-01 08:00:00,1,6\n").unwrap();

    let err = analyze_csv(&input).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_eq!(err.exit_code(), 1);
}
