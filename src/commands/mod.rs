pub mod example;
pub mod quote;
pub mod reconstruct;
pub mod trades;
