#![allow(non_snake_case)]

use super::{ConeDims, ParamHandling, ProblemData, VariableMap};
use crate::algebra::CscMatrix;
use crate::KronError;

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::{fs::File, io::Read};

// CSC fields in plain form, since the solver's own matrix type is
// not serializable without its optional serde support.

#[derive(Serialize, Deserialize)]
struct JsonCscMatrix {
    m: usize,
    n: usize,
    colptr: Vec<usize>,
    rowval: Vec<usize>,
    nzval: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct JsonProblemData {
    c: Vec<f64>,
    offset: f64,
    G: JsonCscMatrix,
    h: Vec<f64>,
    dims: ConeDims,
    var_map: VariableMap,
    handling: ParamHandling,
}

impl ProblemData {
    /// Writes the compiled data to `file` as JSON.
    pub fn write_to_file(&self, file: &mut File) -> Result<(), KronError> {
        let json_data = JsonProblemData {
            c: self.c.clone(),
            offset: self.offset,
            G: JsonCscMatrix {
                m: self.G.m,
                n: self.G.n,
                colptr: self.G.colptr.clone(),
                rowval: self.G.rowval.clone(),
                nzval: self.G.nzval.clone(),
            },
            h: self.h.clone(),
            dims: self.dims,
            var_map: self.var_map.clone(),
            handling: self.handling,
        };

        let json = serde_json::to_string(&json_data)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Reads data written by [`write_to_file`](Self::write_to_file).
    pub fn read_from_file(file: &mut File) -> Result<Self, KronError> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let json_data: JsonProblemData = serde_json::from_str(&buffer)?;

        let G = json_data.G;
        Ok(ProblemData {
            c: json_data.c,
            offset: json_data.offset,
            G: CscMatrix::new(G.m, G.n, G.colptr, G.rowval, G.nzval),
            h: json_data.h,
            dims: json_data.dims,
            var_map: json_data.var_map,
            handling: json_data.handling,
        })
    }
}

#[test]
fn test_json_io() {
    use crate::canon::CompileOptions;
    use crate::model::{Expr, Objective, Problem, Variable};
    use std::io::{Seek, SeekFrom};

    let x = Variable::named("x", (2, 1)).unwrap();
    let cons = vec![Expr::from(&x).geq(1.0).unwrap()];
    let prob = Problem::new(Objective::Minimize(crate::model::sum(&x)), cons).unwrap();
    let data = prob
        .compile(&CompileOptions::default())
        .unwrap()
        .apply_parameters()
        .unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    data.write_to_file(&mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let data2 = ProblemData::read_from_file(&mut file).unwrap();
    assert_eq!(data.c, data2.c);
    assert_eq!(data.G, data2.G);
    assert_eq!(data.h, data2.h);
    assert_eq!(data.var_map, data2.var_map);
}
