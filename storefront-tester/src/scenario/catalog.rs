use crate::browser::Session;
use crate::error::{SmokeError, SmokeResult};
use crate::profile::StoreProfile;
use crate::scenario::{ScenarioCtx, StoreScenario, REGISTERED_EMAIL, REGISTERED_PASSWORD};
use crate::util::unique_email;

const SEARCH_QUERY: &str = "shirt";
const INVALID_EMAIL: &str = "invalid@example.com";
const INVALID_PASSWORD: &str = "wrongpass";
const REGISTRATION_PASSWORD: &str = "newpass123";

/// Substring the error banner must carry after a rejected login.
const INVALID_CREDENTIALS_INDICATOR: &str = "invalid";
/// Substring the success banner must carry after a completed registration.
const REGISTRATION_SUCCESS_INDICATOR: &str = "successful";

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn parse_count(text: &str) -> SmokeResult<i64> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| SmokeError::CounterParse(text.to_string()))
}

fn expect_counter_positive(text: &str) -> SmokeResult<()> {
    let count = parse_count(text)?;
    if count > 0 {
        Ok(())
    } else {
        Err(SmokeError::assertion(format!(
            "cart count should be > 0, got {count}"
        )))
    }
}

fn expect_counter_emptied(text: &str) -> SmokeResult<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let count = parse_count(text)?;
    if count == 0 {
        Ok(())
    } else {
        Err(SmokeError::assertion(format!(
            "cart count should be empty or 0 after removal, got {count}"
        )))
    }
}

/// Fills the login form and submits it. The caller waits for whichever
/// post-submit marker its flow expects.
async fn submit_login(
    session: &Session,
    profile: &StoreProfile,
    email: &str,
    password: &str,
) -> SmokeResult<()> {
    session.open(profile.login_path).await?;
    let email_field = session.wait_for(&profile.email_field).await?;
    session.type_into(&email_field, email).await?;
    let password_field = session.find(&profile.password_field).await?;
    session.type_into(&password_field, password).await?;
    let submit = session.find(&profile.login_button).await?;
    session.click(&submit).await?;
    Ok(())
}

/// Puts one product in the cart from the listing page.
async fn add_item_to_cart(session: &Session, profile: &StoreProfile) -> SmokeResult<()> {
    session.open(profile.products_path).await?;
    let add = session.wait_for(&profile.add_to_cart_button).await?;
    session.click(&add).await?;
    Ok(())
}

pub struct HomepageLoad;

#[async_trait::async_trait]
impl StoreScenario for HomepageLoad {
    fn name(&self) -> &'static str {
        "Homepage Load"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        session.open("/").await?;
        session.wait_for(&ctx.profile.root_marker).await?;
        Ok(())
    }
}

pub struct ListingAccessibility;

#[async_trait::async_trait]
impl StoreScenario for ListingAccessibility {
    fn name(&self) -> &'static str {
        "Product Listing Accessibility"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        session.open(ctx.profile.products_path).await?;
        session.wait_for(&ctx.profile.listing_container).await?;
        Ok(())
    }
}

pub struct LoginSuccess;

#[async_trait::async_trait]
impl StoreScenario for LoginSuccess {
    fn name(&self) -> &'static str {
        "Login Success"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        let email = ctx.account.email.clone();
        let password = ctx.account.password.clone();
        submit_login(session, &ctx.profile, &email, &password).await?;
        session.wait_for(&ctx.profile.welcome_marker).await?;
        if ctx.verbose {
            println!("  🔐 Logged in as {email}");
        }
        Ok(())
    }
}

pub struct LoginFailure;

#[async_trait::async_trait]
impl StoreScenario for LoginFailure {
    fn name(&self) -> &'static str {
        "Login Failure"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        submit_login(session, &ctx.profile, INVALID_EMAIL, INVALID_PASSWORD).await?;
        let banner = session.wait_for(&ctx.profile.error_banner).await?;
        let text = session.text_of(&banner).await?;
        if contains_ci(&text, INVALID_CREDENTIALS_INDICATOR) {
            Ok(())
        } else {
            Err(SmokeError::assertion(format!(
                "error banner should mention invalid credentials, got {text:?}"
            )))
        }
    }
}

pub struct ProductSearch;

#[async_trait::async_trait]
impl StoreScenario for ProductSearch {
    fn name(&self) -> &'static str {
        "Product Search"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        session.open(ctx.profile.products_path).await?;
        let field = session.wait_for(&ctx.profile.search_field).await?;
        session.type_into(&field, SEARCH_QUERY).await?;
        let submit = session.find(&ctx.profile.search_button).await?;
        session.click(&submit).await?;
        session
            .wait_for(&ctx.profile.search_result(SEARCH_QUERY))
            .await?;
        if ctx.verbose {
            println!("  🔎 Found a result for {SEARCH_QUERY:?}");
        }
        Ok(())
    }
}

pub struct AddToCart;

#[async_trait::async_trait]
impl StoreScenario for AddToCart {
    fn name(&self) -> &'static str {
        "Add to Cart"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        add_item_to_cart(session, &ctx.profile).await?;
        let counter = session.wait_for(&ctx.profile.cart_count).await?;
        let text = session.text_of(&counter).await?;
        expect_counter_positive(&text)
    }
}

pub struct CartRemoval;

#[async_trait::async_trait]
impl StoreScenario for CartRemoval {
    fn name(&self) -> &'static str {
        "Cart Removal"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        add_item_to_cart(session, &ctx.profile).await?;
        session.open(ctx.profile.cart_path).await?;
        let remove = session.wait_for(&ctx.profile.remove_item_button).await?;
        session.click(&remove).await?;
        let counter = session.find(&ctx.profile.cart_count).await?;
        let text = session.text_of(&counter).await?;
        expect_counter_emptied(&text)
    }
}

pub struct CheckoutInitiation;

#[async_trait::async_trait]
impl StoreScenario for CheckoutInitiation {
    fn name(&self) -> &'static str {
        "Checkout Initiation"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        add_item_to_cart(session, &ctx.profile).await?;
        session.open(ctx.profile.cart_path).await?;
        let checkout = session.wait_for(&ctx.profile.checkout_button).await?;
        session.click(&checkout).await?;
        session.wait_for(&ctx.profile.checkout_form).await?;
        Ok(())
    }
}

pub struct UserRegistration;

#[async_trait::async_trait]
impl StoreScenario for UserRegistration {
    fn name(&self) -> &'static str {
        "User Registration"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        let email = unique_email();

        session.open(ctx.profile.register_path).await?;
        let email_field = session.wait_for(&ctx.profile.email_field).await?;
        session.type_into(&email_field, &email).await?;
        let password_field = session.find(&ctx.profile.password_field).await?;
        session.type_into(&password_field, REGISTRATION_PASSWORD).await?;
        let submit = session.find(&ctx.profile.register_button).await?;
        session.click(&submit).await?;

        let banner = session.wait_for(&ctx.profile.success_banner).await?;
        let text = session.text_of(&banner).await?;
        if !contains_ci(&text, REGISTRATION_SUCCESS_INDICATOR) {
            return Err(SmokeError::assertion(format!(
                "success banner should confirm the registration, got {text:?}"
            )));
        }

        if ctx.verbose {
            println!("  📝 Registered {email}");
        }
        ctx.carried.set(REGISTERED_EMAIL, email);
        ctx.carried.set(REGISTERED_PASSWORD, REGISTRATION_PASSWORD);
        Ok(())
    }
}

/// Login with the account the registration scenario created earlier in the
/// run. Without that carried state the flow is not attempted at all.
pub struct RegisteredLogin;

#[async_trait::async_trait]
impl StoreScenario for RegisteredLogin {
    fn name(&self) -> &'static str {
        "Registered Login"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        let email = ctx
            .carried
            .get(REGISTERED_EMAIL)
            .ok_or(SmokeError::MissingCarriedState(REGISTERED_EMAIL))?
            .to_string();
        let password = ctx
            .carried
            .get(REGISTERED_PASSWORD)
            .ok_or(SmokeError::MissingCarriedState(REGISTERED_PASSWORD))?
            .to_string();

        submit_login(session, &ctx.profile, &email, &password).await?;
        session.wait_for(&ctx.profile.welcome_marker).await?;
        Ok(())
    }
}

pub struct FooterLinks;

#[async_trait::async_trait]
impl StoreScenario for FooterLinks {
    fn name(&self) -> &'static str {
        "Footer Links"
    }

    async fn run(&self, session: &Session, ctx: &mut ScenarioCtx) -> SmokeResult<()> {
        session.open("/").await?;
        let link = session.wait_for_clickable(&ctx.profile.footer_link).await?;
        session.click(&link).await?;
        Ok(())
    }
}
