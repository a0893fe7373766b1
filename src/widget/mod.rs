//! Terminal widgets for the selection overlay

pub mod readout;

pub use readout::SelectionReadout;
