#[cfg(not(target_arch = "wasm32"))]
pub mod collection;
#[cfg(not(target_arch = "wasm32"))]
pub mod distribution;
#[cfg(not(target_arch = "wasm32"))]
pub mod mock;
#[cfg(not(target_arch = "wasm32"))]
pub mod mock_builder;
#[cfg(not(target_arch = "wasm32"))]
pub mod mock_contract;

#[cfg(not(target_arch = "wasm32"))]
pub use collection::MockCollection;
#[cfg(not(target_arch = "wasm32"))]
pub use distribution::MockDistributionFactory;
#[cfg(not(target_arch = "wasm32"))]
pub use mock::MockSales;
#[cfg(not(target_arch = "wasm32"))]
pub use mock_contract::MockContract;
