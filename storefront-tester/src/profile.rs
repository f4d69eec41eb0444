use clap::ValueEnum;

use crate::browser::Locator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileKind {
    /// Storefront builds keyed by the class/id markers of the reference shop
    Classic,
    /// Storefront builds keyed by container tags and button-text matches
    Generic,
}

/// Paths and UI markers of one target storefront build.
///
/// The markers are the contract between the tester and the application;
/// scenario bodies only ever read a profile, so a markup change is fixed in
/// one place.
#[derive(Debug, Clone)]
pub struct StoreProfile {
    pub products_path: &'static str,
    pub login_path: &'static str,
    pub register_path: &'static str,
    pub cart_path: &'static str,

    pub root_marker: Locator,
    pub listing_container: Locator,
    pub email_field: Locator,
    pub password_field: Locator,
    pub login_button: Locator,
    pub welcome_marker: Locator,
    pub error_banner: Locator,
    pub search_field: Locator,
    pub search_button: Locator,
    pub add_to_cart_button: Locator,
    pub cart_count: Locator,
    pub remove_item_button: Locator,
    pub checkout_button: Locator,
    pub checkout_form: Locator,
    pub register_button: Locator,
    pub success_banner: Locator,
    pub footer_link: Locator,

    result_tag: &'static str,
}

impl StoreProfile {
    #[must_use]
    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Classic => Self::classic(),
            ProfileKind::Generic => Self::generic(),
        }
    }

    /// The reference shop front-end: React-style class and id markers.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            products_path: "/products",
            login_path: "/login",
            register_path: "/register",
            cart_path: "/cart",

            root_marker: Locator::css("#root, body"),
            listing_container: Locator::class("product-list"),
            email_field: Locator::id("email"),
            password_field: Locator::id("password"),
            login_button: Locator::id("login-btn"),
            welcome_marker: Locator::class("welcome-message"),
            error_banner: Locator::class("error-message"),
            search_field: Locator::id("search-bar"),
            search_button: Locator::id("search-btn"),
            add_to_cart_button: Locator::class("add-to-cart-btn"),
            cart_count: Locator::id("cart-count"),
            remove_item_button: Locator::class("remove-item-btn"),
            checkout_button: Locator::id("checkout-btn"),
            checkout_form: Locator::class("checkout-page"),
            register_button: Locator::id("register-btn"),
            success_banner: Locator::class("success-message"),
            footer_link: Locator::class("footer-link"),

            result_tag: "div",
        }
    }

    /// Storefront builds without stable class hooks: container tags, input
    /// types, and button-text matches.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            products_path: "/shop",
            login_path: "/login",
            register_path: "/signup",
            cart_path: "/cart",

            root_marker: Locator::tag("body"),
            listing_container: Locator::tag("main"),
            email_field: Locator::css("input[type='email']"),
            password_field: Locator::css("input[type='password']"),
            login_button: Locator::text_contains("button", "Login"),
            welcome_marker: Locator::text_contains("*", "Welcome"),
            error_banner: Locator::css("[role='alert']"),
            search_field: Locator::css("input[type='search']"),
            search_button: Locator::text_contains("button", "Search"),
            add_to_cart_button: Locator::text_contains("button", "Add to Cart"),
            cart_count: Locator::css("[data-cart-count]"),
            remove_item_button: Locator::text_contains("button", "Remove"),
            checkout_button: Locator::text_contains("button", "Checkout"),
            checkout_form: Locator::tag("form"),
            register_button: Locator::text_contains("button", "Register"),
            success_banner: Locator::css("[role='status']"),
            footer_link: Locator::css("footer a"),

            result_tag: "article",
        }
    }

    /// Locator for a listing entry whose text contains `query`.
    #[must_use]
    pub fn search_result(&self, query: &str) -> Locator {
        Locator::text_contains(self.result_tag, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_kind_dispatches_both_adapters() {
        let classic = StoreProfile::for_kind(ProfileKind::Classic);
        assert_eq!(classic.products_path, "/products");
        assert_eq!(classic.listing_container, Locator::class("product-list"));

        let generic = StoreProfile::for_kind(ProfileKind::Generic);
        assert_eq!(generic.products_path, "/shop");
        assert_eq!(generic.listing_container, Locator::tag("main"));
    }

    #[test]
    fn classic_markers_match_reference_shop_markup() {
        let profile = StoreProfile::classic();
        assert_eq!(profile.email_field, Locator::id("email"));
        assert_eq!(profile.login_button, Locator::id("login-btn"));
        assert_eq!(profile.cart_count, Locator::id("cart-count"));
        assert_eq!(profile.error_banner, Locator::class("error-message"));
        assert_eq!(profile.success_banner, Locator::class("success-message"));
    }

    #[test]
    fn search_result_embeds_the_query() {
        let profile = StoreProfile::classic();
        assert_eq!(
            profile.search_result("shirt"),
            Locator::XPath("//div[contains(text(), 'shirt')]".to_string())
        );

        let generic = StoreProfile::generic();
        assert_eq!(
            generic.search_result("shirt"),
            Locator::XPath("//article[contains(text(), 'shirt')]".to_string())
        );
    }

    #[test]
    fn generic_adapter_uses_no_class_markers() {
        let profile = StoreProfile::generic();
        for locator in [
            &profile.root_marker,
            &profile.listing_container,
            &profile.login_button,
            &profile.cart_count,
            &profile.footer_link,
        ] {
            assert!(!matches!(locator, Locator::Class(_)), "{locator}");
        }
    }
}
