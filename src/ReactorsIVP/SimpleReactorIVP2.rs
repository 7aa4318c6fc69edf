//! # Pretty Printing Module for Reactor IVP Tasks
//!
//! Formatted output of the task data, the equation system and the solution.
//! All output is formatted using prettytable for clear tabular presentation.

use super::SimpleReactorIVP::SimpleReactorTask;
use prettytable::{Cell, Row, Table, row};

impl SimpleReactorTask {
    /// Displays a summary of the reactor task: settings, initial concentrations and reactions
    /// with their rate constants.
    pub fn pretty_print_task(&self) {
        println!("\n=== REACTOR TASK SUMMARY ===");

        println!("Problem Name: {:?}", self.problem_name);
        println!("Problem Description: {:?}", self.problem_description);

        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["Final time", format!("{}", self.config.t_final)]);
        table.add_row(row!["Output points", self.config.n_points]);
        table.add_row(row![
            "Steady-state tolerance",
            format!("{:.1e}", self.config.steady_state_tolerance)
        ]);
        table.add_row(row!["rtol", format!("{:.1e}", self.config.solver.rtol)]);
        table.add_row(row!["atol", format!("{:.1e}", self.config.solver.atol)]);
        table.add_row(row!["Chart file", self.config.output_path]);
        println!("\nSettings:");
        table.printstd();

        if !self.initial_concentrations.is_empty() {
            println!("\nInitial Concentrations:");
            let mut c_table = Table::new();
            c_table.add_row(row!["Substance", "C0"]);
            let mut keys: Vec<&String> = self.initial_concentrations.keys().collect();
            keys.sort();
            for key in keys {
                c_table.add_row(row![key, format!("{:.6}", self.initial_concentrations[key])]);
            }
            c_table.printstd();
        }

        if !self.kindata.substances.is_empty() {
            println!("\nSubstances ({}):", self.kindata.substances.len());
            for (i, substance) in self.kindata.substances.iter().enumerate() {
                println!("  {}: {}", i + 1, substance);
            }
        }

        println!("\nReactions ({}):", self.kindata.vec_of_equations.len());
        let mut r_table = Table::new();
        r_table.add_row(row!["#", "Reaction", "k"]);
        for (i, equation) in self.kindata.vec_of_equations.iter().enumerate() {
            let k = self
                .rate_constants
                .get(i)
                .map(|k| format!("{:.4e}", k))
                .unwrap_or_else(|| "-".to_string());
            r_table.add_row(row![i + 1, equation, k]);
        }
        r_table.printstd();

        println!("\n=== END TASK SUMMARY ===\n");
    }

    /// Displays the system of differential equations in tabular format.
    pub fn pretty_print_equations(&self) {
        println!("____________________EQUATIONS_________________________");
        let mut table = Table::new();
        table.add_row(row!["Unknown Var", "Equation"]);
        for (substance, equation) in &self.map_of_equations {
            table.add_row(Row::new(vec![
                Cell::new(&format!("d{}/dt", substance)),
                Cell::new(equation),
            ]));
        }
        table.printstd();
    }

    /// Initial and final concentrations, concentrations at the steady-state time and solver statistics
    pub fn pretty_print_result(&self) {
        println!("____________________RESULT_________________________");
        let (t, y) = match self.solver.solution_and_mesh() {
            Ok(result) => result,
            Err(e) => {
                println!("{}", e);
                return;
            }
        };
        let t_steady = self.steady_state_time().unwrap_or(self.config.t_final);
        let j_steady = t.iter().position(|ti| *ti >= t_steady).unwrap_or(t.len() - 1);
        let last = y.nrows() - 1;

        let mut table = Table::new();
        table.add_row(row![
            "Substance",
            "C(0)",
            format!("C({:.4})", t_steady),
            format!("C({})", t[last])
        ]);
        for (i, substance) in self.solver.unknowns.iter().enumerate() {
            table.add_row(row![
                substance,
                format!("{:.6}", y[(0, i)]),
                format!("{:.6}", y[(j_steady, i)]),
                format!("{:.6}", y[(last, i)])
            ]);
        }
        table.printstd();
        println!("steady-state time: {}", t_steady);
        println!(
            "steps accepted: {}, rejected: {}, function evaluations: {}",
            self.solver.stats.n_accepted, self.solver.stats.n_rejected, self.solver.stats.n_fev
        );
    }
}
