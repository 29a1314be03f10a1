//! Customer-related types
//!
//! A customer is an individual identified by a tax ID. Registration input
//! arrives as raw text in [`NewCustomer`]; [`Customer::register`] validates it
//! and normalizes the tax ID so that "123.456.789-00" and "12345678900" are the
//! same person.

use super::error::BankError;
use super::transaction::AccountNumber;
use chrono::NaiveDate;
use std::fmt;

/// Normalized tax ID (digits only)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxId(String);

impl TaxId {
    /// Strip every non-digit character from a raw tax ID
    pub fn normalize(raw: &str) -> Self {
        TaxId(raw.chars().filter(char::is_ascii_digit).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registration fields for a new customer
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub birth_date: NaiveDate,
    /// Raw tax ID as typed; normalized during registration
    pub tax_id: String,
    pub address: String,
}

/// A registered customer
///
/// Never mutated after creation except for its list of owned accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    name: String,
    birth_date: NaiveDate,
    tax_id: TaxId,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl Customer {
    /// Validate registration fields and build a customer with no accounts
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name or address is blank, or if the tax
    /// ID contains no digits.
    pub fn register(fields: NewCustomer) -> Result<Self, BankError> {
        let tax_id = TaxId::normalize(&fields.tax_id);
        if tax_id.is_empty() {
            return Err(BankError::invalid_input("tax ID", &fields.tax_id));
        }

        let name = fields.name.trim();
        if name.is_empty() {
            return Err(BankError::invalid_input("name", &fields.name));
        }

        let address = fields.address.trim();
        if address.is_empty() {
            return Err(BankError::invalid_input("address", &fields.address));
        }

        Ok(Customer {
            name: name.to_string(),
            birth_date: fields.birth_date,
            tax_id,
            address: address.to_string(),
            accounts: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Numbers of the accounts owned by this customer, in opening order
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub(crate) fn link_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }
}
