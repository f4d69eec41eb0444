use std::collections::HashMap;

use crate::browser::Session;
use crate::error::SmokeResult;
use crate::profile::StoreProfile;

pub mod catalog;

/// Carried-state key for the email registered during the run.
pub const REGISTERED_EMAIL: &str = "registered-email";
/// Carried-state key for the password registered during the run.
pub const REGISTERED_PASSWORD: &str = "registered-password";

/// Values produced by one scenario and consumed by a later one within the
/// same run.
#[derive(Debug, Clone, Default)]
pub struct CarriedState {
    values: HashMap<String, String>,
}

impl CarriedState {
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Fixed test-account credentials for the plain login scenario.
#[derive(Debug, Clone)]
pub struct TestAccount {
    pub email: String,
    pub password: String,
}

/// Everything the runner hands a scenario besides the browser session.
///
/// Passed explicitly into every invocation; there is no module-level driver
/// or state, so multiple runs can coexist in one process.
#[derive(Debug)]
pub struct ScenarioCtx {
    pub profile: StoreProfile,
    pub account: TestAccount,
    pub verbose: bool,
    pub carried: CarriedState,
}

/// One fixed, named UI interaction flow plus its success predicate.
#[async_trait::async_trait]
pub trait StoreScenario: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()>;
}

pub fn get_scenario(name: &str) -> Option<Box<dyn StoreScenario>> {
    match name.to_lowercase().as_str() {
        "homepage" | "home" => Some(Box::new(catalog::HomepageLoad)),
        "listing" | "products" => Some(Box::new(catalog::ListingAccessibility)),
        "login-success" | "login" => Some(Box::new(catalog::LoginSuccess)),
        "login-failure" => Some(Box::new(catalog::LoginFailure)),
        "search" | "product-search" => Some(Box::new(catalog::ProductSearch)),
        "add-to-cart" => Some(Box::new(catalog::AddToCart)),
        "cart-removal" => Some(Box::new(catalog::CartRemoval)),
        "checkout" | "checkout-initiation" => Some(Box::new(catalog::CheckoutInitiation)),
        "registration" | "register" => Some(Box::new(catalog::UserRegistration)),
        "registered-login" => Some(Box::new(catalog::RegisteredLogin)),
        "footer-links" | "footer" => Some(Box::new(catalog::FooterLinks)),
        _ => None,
    }
}

/// The full suite in registration order. `registered-login` follows
/// `registration` so the carried credentials exist when it runs.
pub fn default_keys() -> Vec<String> {
    [
        "homepage",
        "listing",
        "login-success",
        "login-failure",
        "search",
        "add-to-cart",
        "cart-removal",
        "checkout",
        "registration",
        "registered-login",
        "footer-links",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("homepage", "Homepage Load"),
        ("listing", "Product Listing Accessibility"),
        ("login-success", "Login Success"),
        ("login-failure", "Login Failure"),
        ("search", "Product Search"),
        ("add-to-cart", "Add to Cart"),
        ("cart-removal", "Cart Removal"),
        ("checkout", "Checkout Initiation"),
        ("registration", "User Registration"),
        ("registered-login", "Registered Login"),
        ("footer-links", "Footer Links"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ProfileKind, StoreProfile};

    pub(crate) fn base_ctx() -> ScenarioCtx {
        ScenarioCtx {
            profile: StoreProfile::for_kind(ProfileKind::Classic),
            account: TestAccount {
                email: "testuser@example.com".to_string(),
                password: "password123".to_string(),
            },
            verbose: false,
            carried: CarriedState::default(),
        }
    }

    #[test]
    fn every_listed_key_resolves() {
        for (key, _) in list_scenarios() {
            assert!(get_scenario(key).is_some(), "unresolvable key {key}");
        }
    }

    #[test]
    fn default_keys_cover_the_whole_catalog_in_order() {
        let keys = default_keys();
        assert_eq!(keys.len(), list_scenarios().len());
        let registration = keys.iter().position(|k| k == "registration").unwrap();
        let chained = keys.iter().position(|k| k == "registered-login").unwrap();
        assert!(registration < chained);
    }

    #[test]
    fn lookup_is_case_insensitive_and_rejects_unknown() {
        assert!(get_scenario("HOMEPAGE").is_some());
        assert!(get_scenario("warp-drive").is_none());
    }

    #[test]
    fn carried_state_round_trips() {
        let mut ctx = base_ctx();
        assert!(ctx.carried.get(REGISTERED_EMAIL).is_none());
        ctx.carried.set(REGISTERED_EMAIL, "a@example.com");
        assert_eq!(ctx.carried.get(REGISTERED_EMAIL), Some("a@example.com"));
    }

    #[test]
    fn scenario_names_are_unique() {
        let mut names: Vec<&str> = list_scenarios()
            .into_iter()
            .map(|(key, _)| get_scenario(key).unwrap().name())
            .collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }
}
