/// Dense generic matrix over a field-like numeric type: construction, row and column
/// manipulation, reduced row echelon form, rank and nullity, determinant, Gauss-Jordan
/// inversion. The chemical balancer instantiates it with exact rationals so that pivot
/// decisions and integerization never suffer round-off.
/// # Examples
/// ```
/// use ChemBalance::LinAlg::matrix::Matrix;
/// use num_rational::BigRational;
/// use num_bigint::BigInt;
/// let r = |n: i64| BigRational::from_integer(BigInt::from(n));
/// let m = Matrix::from_vec(vec![vec![r(2), r(0), r(2)], vec![r(0), r(2), r(1)]]).unwrap();
/// assert_eq!(m.rank(), 2);
/// assert_eq!(m.nullity(), 1);
/// ```
pub mod matrix;
pub mod matrix_tests;
