//! Built-in instrument table.
//!
//! Pip sizes, contract sizes, and lot ranges follow common retail broker
//! conventions: standard forex lots of 100 000 units, 100 oz gold
//! contracts, 5 000 oz silver contracts, 1 000 barrel oil contracts.

use rust_decimal_macros::dec;

use super::{AssetClass, Instrument};

pub(super) fn builtin_instruments() -> Vec<Instrument> {
    vec![
        Instrument {
            symbol: "EURUSD".to_string(),
            name: "Euro / US Dollar".to_string(),
            asset_class: AssetClass::Forex,
            pip_size: dec!(0.0001),
            contract_size: dec!(100000),
            quote_currency: "USD".to_string(),
            min_lot: dec!(0.01),
            max_lot: dec!(100),
            lot_step: dec!(0.01),
        },
        Instrument {
            symbol: "GBPUSD".to_string(),
            name: "British Pound / US Dollar".to_string(),
            asset_class: AssetClass::Forex,
            pip_size: dec!(0.0001),
            contract_size: dec!(100000),
            quote_currency: "USD".to_string(),
            min_lot: dec!(0.01),
            max_lot: dec!(100),
            lot_step: dec!(0.01),
        },
        Instrument {
            symbol: "USDJPY".to_string(),
            name: "US Dollar / Japanese Yen".to_string(),
            asset_class: AssetClass::Forex,
            // JPY pairs quote two decimals; one pip is 0.01.
            pip_size: dec!(0.01),
            contract_size: dec!(100000),
            quote_currency: "JPY".to_string(),
            min_lot: dec!(0.01),
            max_lot: dec!(100),
            lot_step: dec!(0.01),
        },
        Instrument {
            symbol: "XAUUSD".to_string(),
            name: "Gold / US Dollar".to_string(),
            asset_class: AssetClass::Metals,
            pip_size: dec!(0.1),
            contract_size: dec!(100),
            quote_currency: "USD".to_string(),
            min_lot: dec!(0.01),
            max_lot: dec!(50),
            lot_step: dec!(0.01),
        },
        Instrument {
            symbol: "XAGUSD".to_string(),
            name: "Silver / US Dollar".to_string(),
            asset_class: AssetClass::Metals,
            pip_size: dec!(0.001),
            contract_size: dec!(5000),
            quote_currency: "USD".to_string(),
            min_lot: dec!(0.01),
            max_lot: dec!(30),
            lot_step: dec!(0.01),
        },
        Instrument {
            symbol: "BTCUSD".to_string(),
            name: "Bitcoin / US Dollar".to_string(),
            asset_class: AssetClass::Crypto,
            pip_size: dec!(1),
            contract_size: dec!(1),
            quote_currency: "USD".to_string(),
            min_lot: dec!(0.001),
            max_lot: dec!(10),
            lot_step: dec!(0.001),
        },
        Instrument {
            symbol: "ETHUSD".to_string(),
            name: "Ethereum / US Dollar".to_string(),
            asset_class: AssetClass::Crypto,
            pip_size: dec!(0.1),
            contract_size: dec!(1),
            quote_currency: "USD".to_string(),
            min_lot: dec!(0.01),
            max_lot: dec!(50),
            lot_step: dec!(0.01),
        },
        Instrument {
            symbol: "SPX500".to_string(),
            name: "S&P 500 Index".to_string(),
            asset_class: AssetClass::Indices,
            pip_size: dec!(0.1),
            contract_size: dec!(10),
            quote_currency: "USD".to_string(),
            min_lot: dec!(0.1),
            max_lot: dec!(100),
            lot_step: dec!(0.1),
        },
        Instrument {
            symbol: "USOIL".to_string(),
            name: "US Crude Oil".to_string(),
            asset_class: AssetClass::Commodities,
            pip_size: dec!(0.01),
            contract_size: dec!(1000),
            quote_currency: "USD".to_string(),
            min_lot: dec!(0.01),
            max_lot: dec!(20),
            lot_step: dec!(0.01),
        },
    ]
}
