#![cfg(feature = "serde")]

use kroncanon::algebra::CscInspect;
use kroncanon::backend::Backend;
use kroncanon::canon::{ParamHandling, ProblemData};
use kroncanon::generator::{KronOrder, RandomProblem};
use kroncanon::inspect::RunSettings;
use kroncanon::model::Representation;
use std::io::{Seek, SeekFrom};

#[test]
fn test_problem_data_json_io() {
    let rp = RandomProblem::from_seed(
        0,
        (2, 2),
        (2, 3),
        Representation::Parameter,
        KronOrder::CoefficientFirst,
    )
    .unwrap();
    let settings = RunSettings::default();
    let data = rp
        .problem
        .get_problem_data(Backend::Clarabel, &settings.compile_options())
        .unwrap();
    assert_eq!(data.handling, ParamHandling::Symbolic);

    // write the data to a file
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file).unwrap();

    // read the data from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let data2 = ProblemData::read_from_file(&mut file).unwrap();

    assert_eq!(data2.handling, ParamHandling::Symbolic);
    assert_eq!(data2.G.max_entry_diff(&data.G).unwrap(), 0.0);
    assert_eq!(data2.G.colptr, data.G.colptr);
    assert_eq!(data2.h, data.h);
    assert_eq!(data2.c, data.c);
    assert_eq!(data2.var_map, data.var_map);
    assert_eq!(data2.summary(), data.summary());
    assert!(Backend::Clarabel.check_data(&data2).is_ok());
}

#[test]
fn test_run_settings_json() {
    let settings = kroncanon::inspect::RunSettingsBuilder::default()
        .seed(4)
        .c_dims((1, 2))
        .representation(Representation::Constant)
        .build()
        .unwrap();
    let mut solver = settings.solver.clone();
    // infinite limits have no JSON representation
    solver.time_limit = 100.0;
    let settings = RunSettings { solver, ..settings };

    let json = serde_json::to_string(&settings).unwrap();
    let back: RunSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, settings);

    // missing fields take their defaults
    let partial: RunSettings = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
    assert_eq!(partial.seed, 9);
    assert_eq!(partial.c_dims, RunSettings::default().c_dims);
}
