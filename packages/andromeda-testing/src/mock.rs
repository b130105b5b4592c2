#![cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;

use cosmwasm_std::{coin, Addr, Coin};
use cw_multi_test::{
    App, AppBuilder, BankKeeper, Executor, MockApiBech32, SimpleAddressGenerator, WasmKeeper,
};

pub const ADMIN_USERNAME: &str = "am";

pub type MockApp = App<BankKeeper, MockApiBech32>;

pub fn mock_app(denoms: Option<Vec<&str>>) -> MockApp {
    let denoms = denoms.unwrap_or(vec!["uandr", "uusd"]);
    AppBuilder::new()
        .with_api(MockApiBech32::new("andr"))
        .with_wasm(WasmKeeper::new().with_address_generator(SimpleAddressGenerator))
        .build(|router, _api, storage| {
            router
                .bank
                .init_balance(
                    storage,
                    &Addr::unchecked("bank"),
                    denoms
                        .iter()
                        .map(|d| coin(u128::MAX, *d))
                        .collect::<Vec<Coin>>(),
                )
                .unwrap();
        })
}

pub fn init_balances(app: &mut MockApp, balances: Vec<(Addr, &[Coin])>) {
    for (addr, coins) in balances {
        app.send_tokens(Addr::unchecked("bank"), addr, coins)
            .unwrap();
    }
}

/// Wallets and stored code ids of a mock deployment.
pub struct MockSales {
    pub admin_address: Addr,
    pub wallets: HashMap<String, Addr>,
    pub code_ids: HashMap<String, u64>,
}

impl MockSales {
    pub fn new(app: &mut MockApp, admin_name: &str) -> MockSales {
        let mut wallets = HashMap::new();
        let admin_address = app.api().addr_make(admin_name);
        wallets.insert(admin_name.to_string(), admin_address.clone());

        MockSales {
            admin_address,
            wallets,
            code_ids: HashMap::new(),
        }
    }

    pub fn add_wallet(&mut self, router: &mut MockApp, name: &str) -> Addr {
        let addr = router.api().addr_make(name);
        self.wallets
            .entry(name.to_string())
            .and_modify(|_| {
                panic!("Wallet already exists");
            })
            .or_insert(addr.clone());
        addr
    }

    pub fn get_wallet(&self, name: &str) -> &Addr {
        self.wallets
            .get(name)
            .unwrap_or_else(|| panic!("Wallet not found: {name}"))
    }

    pub fn store_code_id(&mut self, key: &str, code_id: u64) {
        self.code_ids.insert(key.to_string(), code_id);
    }

    pub fn get_code_id(&self, key: &str) -> u64 {
        *self
            .code_ids
            .get(key)
            .unwrap_or_else(|| panic!("Code id not found: {key}"))
    }
}
