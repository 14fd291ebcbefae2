pub mod arming;
pub mod commands;
pub mod count;
pub mod diamond;
pub mod outs;
pub mod stats;

#[cfg(test)]
mod tests;
