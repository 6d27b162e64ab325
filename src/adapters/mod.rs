// Adapters layer: concrete collaborators around the assignment core (input parsing, reports).

pub mod csv_input;
pub mod report;
