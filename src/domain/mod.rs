// Domain layer - price series, ranges and trend colouring
pub mod outcome;
pub mod range;
pub mod series;
pub mod trend;
