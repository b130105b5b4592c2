pub mod commands;
pub mod contract;
pub mod price;
mod purchase;
pub mod state;
mod withdraw;
#[cfg(test)]
mod testing;

#[cfg(not(target_arch = "wasm32"))]
pub mod mock;
