//! Commerce Config

use clap::Args;
use trolley_app::domain::{
    carts::{CartsConfig, data::DEFAULT_PAYMENT_OPTION},
    checkout::CheckoutConfig,
    users::records::DEFAULT_ADDRESS,
};

/// Defaults applied to carts and checked at checkout.
#[derive(Debug, Args)]
pub(crate) struct CommerceConfig {
    /// Payment option stamped on newly created carts
    #[arg(long, env = "DEFAULT_PAYMENT_OPTION", default_value = DEFAULT_PAYMENT_OPTION, global = true)]
    pub default_payment_option: String,

    /// Address value that means a user has not set shipping details
    #[arg(long, env = "DEFAULT_ADDRESS", default_value = DEFAULT_ADDRESS, global = true)]
    pub default_address: String,
}

impl CommerceConfig {
    pub(crate) fn carts(&self) -> CartsConfig {
        CartsConfig {
            default_payment_option: self.default_payment_option.clone(),
        }
    }

    pub(crate) fn checkout(&self) -> CheckoutConfig {
        CheckoutConfig {
            default_address: self.default_address.clone(),
        }
    }
}
