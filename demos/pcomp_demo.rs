use idlstat::{pcomp, Pcomp, PcompConfig};
use ndarray::Array2;

fn main() {
    env_logger::init();

    // Four observations of three variables; the third is nearly a copy of the first.
    let data = Array2::from_shape_vec(
        (4, 3),
        vec![1.0, 2.0, 1.1, 3.0, 1.0, 2.9, 5.0, 4.0, 5.2, 7.0, 3.0, 6.8],
    )
    .unwrap();

    let result = pcomp(&data, true).expect("pcomp failed");
    println!("Eigenvalues:       {:?}", result.eigenvalues());
    println!("Variance fraction: {:?}", result.variance());
    println!("Coefficients shape: {:?}", result.coefficients().dim());

    let config = PcompConfig::default().with_standardize(true);
    let standardized = Pcomp::compute(&data, &config).expect("standardized pcomp failed");
    println!("Correlation eigenvalues: {:?}", standardized.eigenvalues());
}
