/// task documents: a "KINETICS" (or "REACTIONS") header followed by the task as a JSON object
pub mod load_from_file;
/// concentration charts: the `ChartRenderer` seam and its `plotters` implementation
pub mod plots;
