#![allow(non_snake_case)]

use kroncanon::inspect::*;
use kroncanon::model::Representation;

fn main() {
    let mut inspector = Inspector::new();

    let runs = [
        ("FIRST RUN ", Representation::Parameter),
        ("SECOND RUN ", Representation::Parameter),
        ("THIRD RUN ", Representation::Constant),
    ];

    for (title, representation) in runs {
        let settings = RunSettingsBuilder::default()
            .representation(representation)
            .build()
            .unwrap();

        inspector.banner(title).unwrap();
        if let Err(e) = inspector.run(&settings) {
            println!("\tRun failed: {}\n", e);
        }
    }

    // the coefficient shapes that have historically compiled differently
    for c_dims in [(2, 3), (1, 2)] {
        let settings = RunSettingsBuilder::default()
            .c_dims(c_dims)
            .build()
            .unwrap();

        inspector.banner("COMPARISON ").unwrap();
        if let Err(e) = inspector.compare(&settings) {
            println!("\tComparison failed: {}\n", e);
        }
    }
}
