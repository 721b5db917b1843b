use kroncanon::inspect::*;
use kroncanon::io::ConfigurablePrintTarget;
use kroncanon::model::Representation;

fn quick_settings(solve: bool) -> RunSettings {
    RunSettingsBuilder::default()
        .c_dims((1, 2))
        .solve(solve)
        .build()
        .unwrap()
}

#[test]
fn test_print_to_buffer() {
    let mut inspector = Inspector::new();
    inspector.print_to_buffer();
    inspector.banner("FIRST RUN ").unwrap();
    inspector.run(&quick_settings(true)).unwrap();
    let result = inspector.get_print_buffer().unwrap();

    let mut lines = result.lines();
    assert_eq!(lines.next().unwrap(), "-".repeat(80));
    assert_eq!(
        lines.next().unwrap(),
        format!("{}FIRST RUN {}", " ".repeat(35), " ".repeat(35))
    );
    assert_eq!(lines.next().unwrap(), "-".repeat(80));

    assert!(result.contains("Context for this run ..."));
    assert!(result.contains("\tshape of Variable  Z: (2, 2)"));
    assert!(result.contains("\tshape of Parameter C: (1, 2)"));
    assert!(result.contains("Solving with CLARABEL ..."));
    assert!(result.contains("\tProblem status: optimal"));
    assert!(result.contains("\tZ.value = ..."));
    assert!(result.contains("\n\t\t[["));
    assert!(result.contains("\tConstraint violation: "));
    assert!(result.contains("Examining CLARABEL problem data ..."));
    assert!(result.contains("\tThe matrix G in \"G x <= h\" is "));
    assert!(result.contains("\tThe vector h in \"G x <= h\" is "));
    assert!(result.contains("G: 12 x 4"));
}

#[test]
fn test_constant_description_and_no_solve() {
    let mut inspector = Inspector::buffered();
    let settings = quick_settings(false).with_representation(Representation::Constant);
    let report = inspector.run(&settings).unwrap();
    let result = inspector.get_print_buffer().unwrap();

    assert!(result.contains("\tshape of Constant  C: (1, 2)"));
    assert!(!result.contains("Solving with"));
    assert!(result.contains("Examining CLARABEL problem data ..."));
    assert!(report.status.is_none());
    assert!(report.z.is_none());
}

#[test]
fn test_compare_output() {
    let mut inspector = Inspector::buffered();
    let cmp = inspector.compare(&quick_settings(true)).unwrap();
    let result = inspector.get_print_buffer().unwrap();

    assert!(cmp.is_consistent());
    assert!(result.contains("Comparing representations of C (1, 2) with Z (2, 2) ..."));
    assert!(result.contains("\tconsistent"));
    assert!(!result.contains("DEFECT"));
}

#[test]
fn test_print_to_file() {
    use std::io::{Read, Seek};

    let mut inspector = Inspector::new();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    inspector.print_to_file(file.into_file());
    inspector.run(&quick_settings(false)).unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("Examining CLARABEL problem data ..."));
    assert!(inspector.get_print_buffer().is_err());
}

#[test]
fn test_print_to_stream() {
    use std::io::{Read, Seek};

    let mut inspector = Inspector::new();
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut file2 = file.reopen().unwrap();
    inspector.print_to_stream(Box::new(file.into_file()));
    inspector.banner("THIRD RUN ").unwrap();

    file2.seek(std::io::SeekFrom::Start(0)).unwrap();
    let mut result = String::new();
    file2.read_to_string(&mut result).unwrap();
    assert!(result.contains("THIRD RUN"));
}

#[test]
fn test_print_to_stdout() {
    let mut inspector = Inspector::buffered();
    inspector.print_to_stdout();
    inspector.run(&quick_settings(false)).unwrap();
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut settings = quick_settings(false);
    settings.tolerance = -1.0;
    let mut inspector = Inspector::buffered();
    assert!(inspector.run(&settings).is_err());
    assert_eq!(inspector.get_print_buffer().unwrap(), "");
}
