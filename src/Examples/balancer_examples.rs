pub fn balancer_examples(task: usize) {
    //

    match task {
        0 => {
            // BALANCING SIMPLE EQUATIONS
            use crate::Balancer::equation_balancer::{BalanceOutcome, balance_equation};
            let equations = vec!["H2 + O2 → H2O", "Fe + O2 → Fe2O3", "Na + Cl2 → NaCl"];
            for equation in equations {
                let outcome = balance_equation(equation).unwrap();
                println!("{} balances to {:?}", equation, outcome);
            }

            let outcome = balance_equation("Fe+O2→Fe2O3").unwrap();
            assert_eq!(
                outcome,
                BalanceOutcome::Unique("4Fe + 3O2 → 2Fe2O3".to_string())
            );
        }
        1 => {
            // BALANCING A REDOX REACTION WITH IONIC CHARGES
            use crate::Balancer::equation_balancer::EquationBalancer;
            let mut balancer = EquationBalancer::new("Fe²⁺ + Cl2 → Fe³⁺ + Cl⁻");
            let outcome = balancer.solve().unwrap();
            println!("conserved symbols: {:?}", balancer.elements);
            balancer.pretty_print();
            println!("integer solutions: {:?}", balancer.solutions);
            println!("outcome: {:?}", outcome);
        }
        2 => {
            // Calculation of atomic composition, molar masses and matrix of atomic
            // composition
            use crate::Balancer::molmass::{
                calculate_molar_mass, calculate_molar_mass_of_vector_of_subs,
                create_elem_composition_matrix,
            };
            let formula = "C6H8O6";
            let (molar_mass, composition) = calculate_molar_mass(formula).unwrap();
            println!("Element counts: {:?}", composition.counts);
            println!("Molar mass: {:?} g/mol", molar_mass);

            let vec_of_formulae = vec!["H2O", "NaCl", "C6H8O6", "Ca(NO3)2"];
            let molar_masses =
                calculate_molar_mass_of_vector_of_subs(vec_of_formulae.clone()).unwrap();
            for (formula, molar_mass) in vec_of_formulae.iter().zip(molar_masses) {
                println!("molar mass of {}: {} g/mol", formula, molar_mass);
            }

            let (matrix, elements) =
                create_elem_composition_matrix(vec!["H2O", "NaCl", "C3H8", "CH4"]).unwrap();
            println!("elements: {:?}", elements);
            println!("{}", matrix);
        }
        3 => {
            // EXACT MATRIX ENGINE
            use crate::LinAlg::matrix::Matrix;
            use num_bigint::BigInt;
            use num_rational::BigRational;
            let r = |n: i64| BigRational::from_integer(BigInt::from(n));

            let matrix =
                Matrix::from_vec(vec![vec![r(2), r(0), r(2)], vec![r(0), r(2), r(1)]]).unwrap();
            let reduced = matrix.reduced_row_echelon_form();
            println!("reduced row echelon form:");
            reduced.pretty_print();
            println!("rank: {}, nullity: {}", matrix.rank(), matrix.nullity());

            let square = Matrix::from_vec(vec![vec![r(2), r(1)], vec![r(1), r(1)]]).unwrap();
            println!("determinant: {}", square.determinant().unwrap());
            println!("inverse:");
            square.inverse().unwrap().pretty_print();
        }
        _ => {
            println!("no such task");
        }
    }
}
