pub mod check;
pub mod render;
pub mod repr_types;

#[cfg(test)]
mod render_tests;
#[cfg(test)]
mod repr_types_tests;
