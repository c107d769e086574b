use super::*;

fn service_form() -> ServiceForm {
    ServiceForm {
        name: "GitHub".into(),
        category: "Development".into(),
        website_url: "https://github.com".into(),
        description: "Code hosting".into(),
        ..ServiceForm::create()
    }
}

fn subscription_form() -> SubscriptionForm {
    SubscriptionForm {
        service_id: "3".into(),
        plan: "Pro".into(),
        price: "4.00".into(),
        next_billing_date: "2025-07-01".into(),
        ..SubscriptionForm::default()
    }
}

// =============================================================
// URL / email
// =============================================================

#[test]
fn url_requires_scheme_and_host() {
    assert!(is_valid_url("https://example.com"));
    assert!(is_valid_url("http://localhost:8000/path?q=1"));
    assert!(!is_valid_url("example.com"));
    assert!(!is_valid_url("https://"));
    assert!(!is_valid_url("ftp://example.com"));
    assert!(!is_valid_url("https://exa mple.com"));
}

#[test]
fn email_shape() {
    assert!(is_valid_email("test@example.com"));
    assert!(!is_valid_email("test@localhost"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("test example.com"));
}

// =============================================================
// ServiceForm
// =============================================================

#[test]
fn create_requires_every_field() {
    let errors = ServiceForm::create().validate();
    let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["category", "description", "name", "website_url"]);
    assert_eq!(errors["website_url"], vec!["Website is required"]);
}

#[test]
fn edit_allows_blank_optional_fields() {
    let form = ServiceForm {
        mode: FormMode::Edit,
        website_url: String::new(),
        description: String::new(),
        ..service_form()
    };
    assert!(form.validate().is_empty());
    let input = form.to_input().unwrap();
    assert_eq!(input.website_url, None);
    assert_eq!(input.description, None);
}

#[test]
fn bad_url_message_depends_on_mode() {
    let create = ServiceForm { website_url: "github".into(), ..service_form() };
    assert_eq!(create.validate()["website_url"], vec!["Invalid URL format"]);
    let edit = ServiceForm { mode: FormMode::Edit, ..create };
    assert_eq!(edit.validate()["website_url"], vec!["Please enter a valid URL"]);
}

#[test]
fn service_input_is_trimmed() {
    let form = ServiceForm { name: "  GitHub ".into(), ..service_form() };
    assert_eq!(form.to_input().unwrap().name, "GitHub");
}

// =============================================================
// SubscriptionForm
// =============================================================

#[test]
fn valid_subscription_form_builds_input() {
    let input = SubscriptionForm { currency: "eur".into(), ..subscription_form() }.to_input().unwrap();
    assert_eq!(input.service_id, 3);
    assert!((input.price - 4.0).abs() < f64::EPSILON);
    assert_eq!(input.currency, "EUR");
    assert_eq!(input.billing_cycle, BillingCycle::Monthly);
    assert_eq!(input.status, SubscriptionStatus::Active);
    assert_eq!(input.next_billing_date, "2025-07-01");
}

#[test]
fn price_must_be_positive() {
    for price in ["0", "-3", "abc", ""] {
        let form = SubscriptionForm { price: price.into(), ..subscription_form() };
        assert_eq!(form.validate()["price"], vec!["Price must be greater than 0"], "price {price:?}");
    }
}

#[test]
fn next_billing_date_required_and_well_formed() {
    let missing = SubscriptionForm { next_billing_date: String::new(), ..subscription_form() };
    assert_eq!(missing.validate()["next_billing_date"], vec!["Next billing date is required"]);
    let malformed = SubscriptionForm { next_billing_date: "07/01/2025".into(), ..subscription_form() };
    assert!(malformed.to_input().unwrap_err().contains_key("next_billing_date"));
}

#[test]
fn missing_service_and_plan() {
    let form = SubscriptionForm { service_id: String::new(), plan: " ".into(), ..subscription_form() };
    let errors = form.validate();
    assert_eq!(errors["service_id"], vec!["Service is required"]);
    assert_eq!(errors["plan"], vec!["Plan is required"]);
}

// =============================================================
// Account forms
// =============================================================

#[test]
fn password_change_rules() {
    let form = PasswordForm {
        current_password: "old-password".into(),
        new_password: "short".into(),
        confirm_password: "shorter".into(),
    };
    let errors = form.validate();
    assert_eq!(errors["new_password"], vec!["Password must be at least 8 characters"]);
    assert_eq!(errors["confirm_password"], vec!["Passwords do not match"]);

    let ok = PasswordForm {
        current_password: "old-password".into(),
        new_password: "new-password".into(),
        confirm_password: "new-password".into(),
    };
    assert_eq!(ok.to_change().unwrap().new_password_confirmation, "new-password");
}

#[test]
fn register_confirmation_must_match() {
    let form = RegisterForm {
        name: "Test".into(),
        email: "test@example.com".into(),
        password: "password1".into(),
        password_confirmation: "password2".into(),
    };
    assert_eq!(form.validate().keys().collect::<Vec<_>>(), vec!["password_confirmation"]);
}

#[test]
fn login_requires_both_fields() {
    assert_eq!(validate_login("", "").len(), 2);
    assert!(validate_login("test@example.com", "secret").is_empty());
}

#[test]
fn profile_update_is_trimmed() {
    let form = ProfileForm { name: " Test ".into(), email: "test@example.com ".into() };
    assert_eq!(
        form.to_update().unwrap(),
        ProfileUpdate { name: "Test".into(), email: "test@example.com".into() }
    );
}
