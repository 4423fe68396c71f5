use serde::Deserialize;

/// Form body for POST /customers/addCustomer
#[derive(Debug, Clone, Deserialize)]
pub struct AddCustomerForm {
    // A missing field is treated as an empty (and therefore invalid) name
    #[serde(default)]
    pub name: String,
}
