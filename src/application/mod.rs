pub mod claim;
pub mod scan;
pub mod stats;
pub mod view;
