use cosmwasm_std::{Addr, Coin, Empty};
use cw_multi_test::{Contract, Executor};

use crate::mock::{MockApp, MockSales};

pub struct MockSalesBuilder {
    sales: MockSales,
    wallets: Vec<(String, Vec<Coin>)>,
    contracts: Vec<(String, Box<dyn Contract<Empty>>)>,
}

impl MockSalesBuilder {
    pub fn new(app: &mut MockApp, admin_name: &str) -> Self {
        Self {
            sales: MockSales::new(app, admin_name),
            wallets: vec![],
            contracts: vec![],
        }
    }

    pub fn with_wallets(self, wallets: Vec<(&str, Vec<Coin>)>) -> Self {
        Self {
            wallets: wallets
                .into_iter()
                .map(|(name, coins)| (name.to_string(), coins))
                .collect(),
            ..self
        }
    }

    pub fn with_contracts(self, contracts: Vec<(&str, Box<dyn Contract<Empty>>)>) -> Self {
        Self {
            contracts: contracts
                .into_iter()
                .map(|(key, contract)| (key.to_string(), contract))
                .collect(),
            ..self
        }
    }

    pub fn build(self, app: &mut MockApp) -> MockSales {
        let Self {
            mut sales,
            wallets,
            contracts,
        } = self;

        for (name, coins) in wallets {
            let addr = sales.add_wallet(app, &name);
            if !coins.is_empty() {
                app.send_tokens(Addr::unchecked("bank"), addr, &coins)
                    .unwrap();
            }
        }

        for (key, contract) in contracts {
            let code_id = app.store_code(contract);
            sales.store_code_id(&key, code_id);
        }

        sales
    }
}
