//! Tests de bout en bout : fichier d'entrée → fichier résultat + rapport

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use geotrans_cli::{cmd_convert, ConvertArgs, OperationArgs, RunStatus};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("geotrans-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn args(input: PathBuf, output: PathBuf, operation: OperationArgs) -> ConvertArgs {
    ConvertArgs {
        input,
        operation,
        model: None,
        dms: false,
        no_dms: false,
        header_lines: None,
        origin: None,
        four_quadrant: false,
        no_four_quadrant: false,
        output: Some(output),
        report: None,
        config: None,
        jobs: Some(2),
    }
}

const HEADER: &str = "Station file\nEpoch 2024.0\nUnits: deg, m\n---\n";

#[test]
fn test_pl1992_file() {
    let dir = temp_dir("pl1992");
    let input = dir.join("points.txt");
    let output = dir.join("out").join("result.txt");
    std::fs::write(&input, format!("{}52,19\n50.25,20.75,120.0\n\nnorth,19\n", HEADER)).unwrap();

    let mut a = args(
        input,
        output.clone(),
        OperationArgs {
            pl1992: true,
            ..Default::default()
        },
    );
    a.model = Some("GRS80".to_string());
    let report = cmd_convert(&a).unwrap();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "x[m], y[m]\n 459309.210, 500000.000\n 266221.512, 624724.859\n# line 8, field 1: cannot parse \"north\"\n"
    );
    assert_eq!(report.status, RunStatus::PartialSuccess);
    assert_eq!(report.records_read, 3);
    assert_eq!(report.records_converted, 2);
    assert_eq!(report.rejected[0].line, 8);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_rejected_record_keeps_its_row() {
    let dir = temp_dir("rows");
    let input = dir.join("points.txt");
    let output = dir.join("result.txt");
    std::fs::write(&input, "52,19\nbad,19\n50.25,20.75\n").unwrap();

    let mut a = args(
        input,
        output.clone(),
        OperationArgs {
            pl1992: true,
            ..Default::default()
        },
    );
    a.model = Some("grs80".to_string());
    a.header_lines = Some(0);
    let report = cmd_convert(&a).unwrap();
    assert_eq!(report.records_read, 3);

    let content = std::fs::read_to_string(&output).unwrap();
    let rows: Vec<&str> = content.lines().skip(1).collect();
    assert_eq!(
        rows,
        vec![
            " 459309.210, 500000.000",
            "# line 2, field 1: cannot parse \"bad\"",
            " 266221.512, 624724.859",
        ]
    );

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_xyz2plh_dms_with_report() {
    let dir = temp_dir("xyz2plh");
    let input = dir.join("points.txt");
    let output = dir.join("result.txt");
    let report_path = dir.join("report.json");
    std::fs::write(
        &input,
        format!("{}3664940.500,1409153.590,5009571.170\n0,1409153.590,5009571.170\n", HEADER),
    )
    .unwrap();

    let mut a = args(
        input,
        output.clone(),
        OperationArgs {
            xyz2plh: true,
            ..Default::default()
        },
    );
    a.dms = true;
    a.report = Some(report_path.clone());
    let report = cmd_convert(&a).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "phi[deg], lam[deg], h[m]");
    assert_eq!(lines[1], " 52°05'50.18\", 21°01'53.52\",141.399");
    assert!(lines[2].starts_with("# line 6: Degenerate input"), "{}", lines[2]);

    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, 6);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["operation"], "xyz2plh");
    assert_eq!(json["model"], "WGS84");
    assert_eq!(json["records_converted"], 1);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_xyz2neu_station_at_origin() {
    let dir = temp_dir("xyz2neu");
    let input = dir.join("points.txt");
    let output = dir.join("result.txt");
    std::fs::write(&input, "3664940.5,1409153.59,5009571.17\n").unwrap();

    let mut a = args(
        input,
        output.clone(),
        OperationArgs {
            xyz2neu: true,
            ..Default::default()
        },
    );
    a.header_lines = Some(0);
    a.origin = Some(geotrans::Cartesian::new(3664940.5, 1409153.59, 5009571.17));
    let report = cmd_convert(&a).unwrap();
    assert_eq!(report.status, RunStatus::Success);

    let content = std::fs::read_to_string(&output).unwrap();
    let values: Vec<f64> = content
        .lines()
        .nth(1)
        .unwrap()
        .split(',')
        .map(|v| v.trim().parse().unwrap())
        .collect();
    assert_eq!(values.len(), 3);
    for v in values {
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);
    }

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_krasowski_projection_is_fatal() {
    let dir = temp_dir("krasowski");
    let input = dir.join("points.txt");
    let output = dir.join("result.txt");
    std::fs::write(&input, format!("{}52,19\n", HEADER)).unwrap();

    let mut a = args(
        input,
        output.clone(),
        OperationArgs {
            pl2000: true,
            ..Default::default()
        },
    );
    a.model = Some("krasowski".to_string());

    let err = cmd_convert(&a).unwrap_err();
    assert!(err.to_string().contains("Krasowski"), "{}", err);
    assert!(!output.exists());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_unknown_model_and_missing_file() {
    let dir = temp_dir("errors");
    let mut a = args(
        dir.join("missing.txt"),
        dir.join("result.txt"),
        OperationArgs {
            plh2xyz: true,
            ..Default::default()
        },
    );
    assert!(cmd_convert(&a).is_err());

    a.model = Some("foo".to_string());
    let err = cmd_convert(&a).unwrap_err();
    assert!(err.to_string().contains("foo"), "{}", err);

    std::fs::remove_dir_all(dir).ok();
}
