use super::SimpleReactorIVP::SimpleReactorTask;
use super::reactor_IVP_utils::ReactorError;
use crate::Utils::plots::{ChartRenderer, ChartRequest, PlottersRenderer};
use log::info;
use std::collections::HashMap;

impl SimpleReactorTask {
    ////////////////////////////////////////////////I/O/////////////////////////////////////////////////////
    /// Chart of all concentrations, the time axis ends at the steady-state time
    pub fn chart_request(&self) -> Result<ChartRequest, ReactorError> {
        let (t, y) = self.solver.solution_and_mesh()?;
        let x_max = self.steady_state_time().unwrap_or(self.config.t_final);
        let series = self
            .solver
            .unknowns
            .iter()
            .enumerate()
            .map(|(i, substance)| (substance.clone(), y.column(i).iter().copied().collect()))
            .collect();
        Ok(ChartRequest {
            time: t.iter().copied().collect(),
            series,
            x_max,
            title: self.config.title.clone(),
            xlabel: "Time".to_string(),
            ylabel: "Concentration".to_string(),
        })
    }

    pub fn plot_with(&self, renderer: &dyn ChartRenderer) -> Result<(), ReactorError> {
        let request = self.chart_request()?;
        renderer.render(&request)
    }

    /// draw the chart into `config.output_path`
    pub fn plot(&self) -> Result<(), ReactorError> {
        self.plot_with(&PlottersRenderer::new(&self.config.output_path))
    }

    /// Save the solution as CSV: header `t,<substances>`, one row per output point
    pub fn save_result(&self, filename: &str) -> Result<(), ReactorError> {
        let (t, y) = self.solver.solution_and_mesh()?;
        let mut csv = String::new();
        csv.push_str(&self.solver.arg_name);
        for substance in &self.solver.unknowns {
            csv.push(',');
            csv.push_str(substance);
        }
        csv.push('\n');
        for (j, tj) in t.iter().enumerate() {
            let row: Vec<String> = std::iter::once(tj.to_string())
                .chain(y.row(j).iter().map(|c| c.to_string()))
                .collect();
            csv.push_str(&row.join(","));
            csv.push('\n');
        }
        std::fs::write(filename, csv)?;
        info!("result saved to {}", filename);
        Ok(())
    }

    /// concentrations at the end of the time interval
    pub fn final_concentrations(&self) -> Result<HashMap<String, f64>, ReactorError> {
        let (_, y) = self.solver.solution_and_mesh()?;
        let last = y.nrows() - 1;
        Ok(self
            .solver
            .unknowns
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), y[(last, i)]))
            .collect())
    }

    /// Largest deviation of `Σ wᵢ·Cᵢ(t)` from its initial value over the whole trajectory.
    /// Substances absent from `weights` get zero weight.
    ///
    /// For a weight vector orthogonal to every reaction (e.g. the number of A units in A+B=C,
    /// B+C=D: `A + C + D`) the result is the mass-balance error of the integration.
    pub fn conservation_error(&self, weights: &HashMap<String, f64>) -> Result<f64, ReactorError> {
        let (_, y) = self.solver.solution_and_mesh()?;
        let w: Vec<f64> = self
            .solver
            .unknowns
            .iter()
            .map(|s| weights.get(s).copied().unwrap_or(0.0))
            .collect();
        let weighted = |j: usize| -> f64 { w.iter().enumerate().map(|(i, wi)| wi * y[(j, i)]).sum() };
        let initial = weighted(0);
        Ok((0..y.nrows())
            .map(|j| (weighted(j) - initial).abs())
            .fold(0.0, f64::max))
    }
}
