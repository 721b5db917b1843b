use kroncanon::generator::KronOrder;
use kroncanon::inspect::*;

fn main() {
    println!("kroncanon v{}", kroncanon::version());
    println!("seed  C      order        status (const / param)   G rows  nnz (const / param)  defects");

    for c_dims in [(2, 3), (1, 2), (1, 1), (3, 1)] {
        for kron_order in [KronOrder::CoefficientFirst, KronOrder::VariableFirst] {
            for seed in 0..5 {
                let settings = RunSettingsBuilder::default()
                    .seed(seed)
                    .c_dims(c_dims)
                    .kron_order(kron_order)
                    .build()
                    .unwrap();

                let cmp = match compare_representations(&settings) {
                    Ok(cmp) => cmp,
                    Err(e) => {
                        println!("{:<5} {:?}  failed: {}", seed, c_dims, e);
                        continue;
                    }
                };

                let status = |r: &RunReport| r.status.map_or("-".to_string(), |s| s.to_string());
                println!(
                    "{:<5} {:?} {:<12} {:>9} / {:<9}   {:>6}  {:>6} / {:<6}        {}",
                    seed,
                    c_dims,
                    kron_order.to_string(),
                    status(&cmp.constant),
                    status(&cmp.parameter),
                    cmp.constant.summary.rows,
                    cmp.constant.summary.nnz,
                    cmp.parameter.summary.nnz,
                    cmp.defects().len()
                );
                for defect in cmp.defects() {
                    println!("      {}", defect);
                }
            }
        }
    }
}
