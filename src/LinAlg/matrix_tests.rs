/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::LinAlg::matrix::{Matrix, MatrixError};
    use num_bigint::BigInt;
    use num_rational::BigRational;

    fn r(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn q(numerator: i64, denominator: i64) -> BigRational {
        BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
    }

    fn rational_matrix(grid: Vec<Vec<i64>>) -> Matrix<BigRational> {
        Matrix::from_vec(
            grid.into_iter()
                .map(|row| row.into_iter().map(r).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_construction_and_derived_shape() {
        let zero: Matrix<BigRational> = Matrix::new(3, 2);
        assert_eq!(zero.column_number(), 3);
        assert_eq!(zero.row_number(), 2);
        assert!(zero.to_flat_vec().iter().all(|v| v == &r(0)));

        let identity: Matrix<BigRational> = Matrix::identity(3);
        assert_eq!(identity[(0, 0)], r(1));
        assert_eq!(identity[(1, 0)], r(0));
        assert_eq!(identity[(2, 2)], r(1));

        let ones: Matrix<BigRational> = Matrix::ones(2, 2);
        assert!(ones.to_flat_vec().iter().all(|v| v == &r(1)));
    }

    #[test]
    fn test_from_vec_rejects_ragged_grid() {
        let ragged = Matrix::from_vec(vec![vec![r(1), r(2)], vec![r(3)]]);
        assert_eq!(
            ragged.unwrap_err(),
            MatrixError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_indexing_is_column_row() {
        // two rows, three columns; entry (column 2, row 0) is the end of the first row
        let m = rational_matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(m[(2, 0)], r(3));
        assert_eq!(m[(0, 1)], r(4));
        assert_eq!(m.get(2, 1), Some(&r(6)));
        assert_eq!(m.get(3, 0), None);
    }

    #[test]
    fn test_row_and_column_manipulation() {
        let mut m = rational_matrix(vec![vec![1, 2], vec![3, 4]]);

        m.add_row(1).unwrap();
        assert_eq!(m.row_number(), 3);
        assert_eq!(m[(0, 1)], r(0));

        let row = rational_matrix(vec![vec![7, 8]]);
        m.replace_row(1, &row).unwrap();
        assert_eq!(m[(1, 1)], r(8));

        m.remove_row(1).unwrap();
        assert_eq!(m, rational_matrix(vec![vec![1, 2], vec![3, 4]]));

        m.add_column(0).unwrap();
        assert_eq!(m.column_number(), 3);
        assert_eq!(m[(0, 0)], r(0));
        m.remove_column(0).unwrap();

        let column = rational_matrix(vec![vec![9], vec![10]]);
        m.add_column_from(2, &column).unwrap();
        assert_eq!(m[(2, 1)], r(10));

        let mismatched = rational_matrix(vec![vec![1, 2, 3, 4]]);
        assert!(m.replace_row(0, &mismatched).is_err());
        assert!(m.remove_row(5).is_err());
    }

    #[test]
    fn test_append_and_submatrix() {
        let mut m = rational_matrix(vec![vec![1, 2], vec![3, 4]]);
        m.append_rows(&rational_matrix(vec![vec![5, 6]])).unwrap();
        assert_eq!(m.row_number(), 3);

        m.append_columns(&rational_matrix(vec![vec![7], vec![8], vec![9]]))
            .unwrap();
        assert_eq!(m.column_number(), 3);
        assert_eq!(m[(2, 2)], r(9));

        let sub = m.submatrix(2, 2, 1, 1).unwrap();
        assert_eq!(sub, rational_matrix(vec![vec![4, 8], vec![6, 9]]));

        assert!(m.submatrix(4, 1, 0, 0).is_err());
        assert!(
            m.append_rows(&rational_matrix(vec![vec![1, 2, 3, 4]]))
                .is_err()
        );
    }

    #[test]
    fn test_transpose_and_flat_vec() {
        let m = rational_matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let t = m.transpose();
        assert_eq!(t.column_number(), 2);
        assert_eq!(t.row_number(), 3);
        assert_eq!(t[(1, 0)], r(4));
        assert_eq!(t.transpose(), m);

        assert_eq!(
            m.to_flat_vec(),
            vec![r(1), r(2), r(3), r(4), r(5), r(6)]
        );
    }

    #[test]
    fn test_elementary_row_operations() {
        let mut m = rational_matrix(vec![vec![1, 2], vec![3, 4]]);

        m.scale_row(&r(2), 0);
        assert_eq!(m, rational_matrix(vec![vec![2, 4], vec![3, 4]]));

        m.swap_rows(0, 1);
        assert_eq!(m, rational_matrix(vec![vec![3, 4], vec![2, 4]]));

        m.scale_and_add_row(&r(-2), 1, 0);
        assert_eq!(m, rational_matrix(vec![vec![-1, -4], vec![2, 4]]));
    }

    #[test]
    fn test_reduced_row_echelon_form() {
        // water equation columns H2, O2, H2O; rows H, O
        let m = rational_matrix(vec![vec![2, 0, 2], vec![0, 2, 1]]);
        let reduced = m.reduced_row_echelon_form();

        let expected = Matrix::from_vec(vec![
            vec![r(1), r(0), r(1)],
            vec![r(0), r(1), q(1, 2)],
        ])
        .unwrap();
        assert_eq!(reduced, expected);
        assert_eq!(m.rank(), 2);
        assert_eq!(m.nullity(), 1);
    }

    #[test]
    fn test_rref_drops_dependent_rows_to_zero() {
        // third row is the sum of the first two
        let m = rational_matrix(vec![vec![1, 0, 1], vec![0, 1, 1], vec![1, 1, 2]]);
        let reduced = m.reduced_row_echelon_form();
        assert!(
            reduced
                .get_row(2)
                .unwrap()
                .to_flat_vec()
                .iter()
                .all(|v| v == &r(0))
        );
        assert_eq!(m.rank(), 2);
        assert_eq!(m.nullity(), 1);
    }

    // Pins the inherited pivot-skip rule: the column is skipped because its entries sum
    // to zero, even though none of them is zero. The first column therefore stays
    // unreduced and the result is not a true reduced row echelon form.
    #[test]
    fn test_pivot_skip_on_sum_zero_column_with_nonzero_entries() {
        let m = rational_matrix(vec![vec![1, 1], vec![-1, 1]]);
        let reduced = m.reduced_row_echelon_form();
        assert_eq!(reduced, rational_matrix(vec![vec![1, 1], vec![-2, 0]]));
    }

    #[test]
    fn test_determinant() {
        assert_eq!(
            rational_matrix(vec![vec![2, 1], vec![1, 1]])
                .determinant()
                .unwrap(),
            r(1)
        );
        assert_eq!(
            rational_matrix(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]])
                .determinant()
                .unwrap(),
            r(0)
        );
        assert_eq!(
            rational_matrix(vec![vec![2, 0, 1], vec![1, 1, 0], vec![0, 3, 1]])
                .determinant()
                .unwrap(),
            r(5)
        );
        assert_eq!(
            rational_matrix(vec![vec![1, 2]]).determinant().unwrap_err(),
            MatrixError::NotSquare
        );
    }

    #[test]
    fn test_inverse() {
        let m = rational_matrix(vec![vec![2, 1], vec![1, 1]]);
        let inverse = m.inverse().unwrap();
        assert_eq!(inverse, rational_matrix(vec![vec![1, -1], vec![-1, 2]]));

        let upper = Matrix::from_vec(vec![
            vec![r(1), r(0), r(1)],
            vec![r(0), r(1), q(1, 2)],
            vec![r(0), r(0), r(1)],
        ])
        .unwrap();
        let expected = Matrix::from_vec(vec![
            vec![r(1), r(0), r(-1)],
            vec![r(0), r(1), q(-1, 2)],
            vec![r(0), r(0), r(1)],
        ])
        .unwrap();
        assert_eq!(upper.inverse().unwrap(), expected);
    }

    #[test]
    fn test_inverse_failure_modes() {
        let singular = rational_matrix(vec![vec![1, 2], vec![2, 4]]);
        assert_eq!(singular.inverse().unwrap_err(), MatrixError::Singular);
        assert!(!singular.is_invertible());

        let not_square = rational_matrix(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(not_square.inverse().unwrap_err(), MatrixError::NotSquare);
    }

    #[test]
    fn test_arithmetic_operators() {
        let a = rational_matrix(vec![vec![1, 2], vec![3, 4]]);
        let b = rational_matrix(vec![vec![4, 3], vec![2, 1]]);

        assert_eq!(
            a.clone() + b.clone(),
            rational_matrix(vec![vec![5, 5], vec![5, 5]])
        );
        assert_eq!(
            a.clone() - b.clone(),
            rational_matrix(vec![vec![-3, -1], vec![1, 3]])
        );
        assert_eq!(
            a.clone() * r(2),
            rational_matrix(vec![vec![2, 4], vec![6, 8]])
        );
        assert_eq!(
            (a.clone() * r(2)) / r(2),
            a.clone()
        );
        assert_eq!(-a, rational_matrix(vec![vec![-1, -2], vec![-3, -4]]));
    }

    #[test]
    fn test_display_prints_rows() {
        let m = rational_matrix(vec![vec![1, 2], vec![3, 4]]);
        let text = format!("{}", m);
        assert_eq!(text, "1\t2\n3\t4\n");

        let fractions = Matrix::from_vec(vec![vec![q(1, 2), r(1)]]).unwrap();
        assert_eq!(format!("{}", fractions), "1/2\t1\n");
    }
}
