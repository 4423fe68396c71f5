//! HTML page templates
//!
//! Templates are compiled into the binary and rendered with minijinja.
//! Names ending in `.html` are auto-escaped.

use std::sync::Arc;

use minijinja::Environment;
use serde::Serialize;

pub const CUSTOMERS: &str = "customers.html";
pub const ADD_CUSTOMER: &str = "add_customer.html";
pub const INVALID_NAME: &str = "invalid_name.html";
pub const DUPLICATE: &str = "duplicate.html";
pub const LOG_MESSAGES: &str = "log_messages.html";
pub const INVOICES: &str = "invoices.html";

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    (CUSTOMERS, include_str!("../templates/customers.html")),
    (ADD_CUSTOMER, include_str!("../templates/add_customer.html")),
    (INVALID_NAME, include_str!("../templates/invalid_name.html")),
    (DUPLICATE, include_str!("../templates/duplicate.html")),
    (LOG_MESSAGES, include_str!("../templates/log_messages.html")),
    (INVOICES, include_str!("../templates/invoices.html")),
];

#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        let views = Views::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(views.env.get_template(name).is_ok(), "{} should load", name);
        }
    }

    #[test]
    fn test_names_are_escaped() {
        let views = Views::new().unwrap();
        let html = views
            .render(INVALID_NAME, context! { name => "<script>x</script>" })
            .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>x"));
    }

    #[test]
    fn test_add_customer_renders_without_context() {
        let views = Views::new().unwrap();
        let html = views.render(ADD_CUSTOMER, context! {}).unwrap();
        assert!(html.contains(r#"name="name""#));
        assert!(!html.contains("class=\"messages\""));
    }

    #[test]
    fn test_add_customer_shows_messages() {
        let views = Views::new().unwrap();
        let html = views
            .render(
                ADD_CUSTOMER,
                context! { messages => vec!["Unexpected exception: boom"], name => "Alice" },
            )
            .unwrap();
        assert!(html.contains("Unexpected exception: boom"));
        assert!(html.contains(r#"value="Alice""#));
    }
}
