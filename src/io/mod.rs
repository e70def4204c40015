pub mod coefficients;
pub mod literal;
pub mod vector;

pub use coefficients::{CoefficientRow, CoefficientTable};
pub use literal::{IntLiteral, parse_hex, parse_int};
pub use vector::{Sample, load_vector, parse_vector};
