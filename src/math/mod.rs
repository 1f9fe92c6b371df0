pub mod black_scholes;
pub mod fixed;

pub use fixed::{
    format_units, from_fixed, from_parts, parse_units, scaled_div, scaled_mul, to_fixed, units,
};
