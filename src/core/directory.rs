//! Customer and account directory
//!
//! This module provides the `Directory` struct which owns every customer and
//! every account of a bank session.
//!
//! The Directory is responsible for:
//! - Registering customers, rejecting duplicate tax IDs
//! - Opening accounts for existing customers
//! - Assigning account numbers (sequential from 1, never reused)
//! - Lookups by tax ID and account number
//! - Searching accounts by holder name and tax ID

use crate::types::{
    Account, AccountNumber, BankError, Customer, NewCustomer, TaxId, WithdrawalPolicy,
};
use std::collections::BTreeMap;

/// Criteria for searching accounts
///
/// Both criteria are optional and combined with AND. An empty filter matches
/// every account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    /// Case-insensitive substring of the holder's name
    pub name: Option<String>,
    /// Tax ID, compared after normalization
    pub tax_id: Option<String>,
}

impl AccountFilter {
    /// Build a filter from raw text, treating blank values as "any"
    pub fn from_input(name: &str, tax_id: &str) -> Self {
        let non_blank = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        AccountFilter {
            name: non_blank(name),
            tax_id: non_blank(tax_id),
        }
    }

    /// Whether the customer satisfies every criterion present
    pub fn matches(&self, customer: &Customer) -> bool {
        let name_ok = self.name.as_ref().is_none_or(|needle| {
            customer
                .name()
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });

        let tax_id_ok = self
            .tax_id
            .as_ref()
            .is_none_or(|raw| &TaxId::normalize(raw) == customer.tax_id());

        name_ok && tax_id_ok
    }
}

/// Owns all customers and accounts
///
/// Customers are kept in registration order and accounts in number order.
#[derive(Debug, Clone)]
pub struct Directory {
    customers: Vec<Customer>,
    accounts: BTreeMap<AccountNumber, Account>,
    next_account_number: AccountNumber,
}

impl Directory {
    /// Create an empty directory; the first account opened gets number 1
    pub fn new() -> Self {
        Directory {
            customers: Vec::new(),
            accounts: BTreeMap::new(),
            next_account_number: 1,
        }
    }

    /// Register a new customer
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the fields fail validation
    /// - `DuplicateIdentity` if a customer with the same normalized tax ID exists
    pub fn register_customer(&mut self, fields: NewCustomer) -> Result<&Customer, BankError> {
        let customer = Customer::register(fields)?;

        if self.position_of(customer.tax_id()).is_some() {
            return Err(BankError::duplicate_identity(customer.tax_id().as_str()));
        }

        let index = self.customers.len();
        self.customers.push(customer);
        Ok(&self.customers[index])
    }

    /// Open a checking account for the customer with the given tax ID
    ///
    /// The account receives the next sequential number and is linked into
    /// both the customer's account list and the account directory. A failed
    /// call consumes no number.
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` if no customer has the tax ID.
    pub fn open_account(
        &mut self,
        tax_id: &str,
        branch: &str,
        policy: WithdrawalPolicy,
    ) -> Result<&Account, BankError> {
        let key = TaxId::normalize(tax_id);
        let index = self
            .position_of(&key)
            .ok_or_else(|| BankError::customer_not_found(tax_id))?;

        let number = self.next_account_number;
        self.next_account_number = number
            .checked_add(1)
            .ok_or_else(|| BankError::arithmetic_overflow("open_account", number))?;

        self.customers[index].link_account(number);
        let account = self
            .accounts
            .entry(number)
            .or_insert_with(|| Account::open(number, branch, key, policy));

        Ok(account)
    }

    /// Look up a customer by tax ID (normalized before comparison)
    pub fn find_customer(&self, tax_id: &str) -> Result<&Customer, BankError> {
        let key = TaxId::normalize(tax_id);
        self.position_of(&key)
            .map(|index| &self.customers[index])
            .ok_or_else(|| BankError::customer_not_found(tax_id))
    }

    /// Look up an account by number
    pub fn find_account(&self, number: AccountNumber) -> Result<&Account, BankError> {
        self.accounts
            .get(&number)
            .ok_or_else(|| BankError::account_not_found(number))
    }

    /// Look up an account by number for a balance-changing operation
    pub fn find_account_mut(&mut self, number: AccountNumber) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(&number)
            .ok_or_else(|| BankError::account_not_found(number))
    }

    /// The customer owning an account
    pub fn owner_of(&self, account: &Account) -> Option<&Customer> {
        self.position_of(account.owner())
            .map(|index| &self.customers[index])
    }

    /// Accounts whose holder satisfies the filter, in number order
    pub fn search(&self, filter: &AccountFilter) -> Vec<&Account> {
        self.accounts
            .values()
            .filter(|account| {
                self.owner_of(account)
                    .is_some_and(|customer| filter.matches(customer))
            })
            .collect()
    }

    /// All customers in registration order
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    /// All accounts in number order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    fn position_of(&self, tax_id: &TaxId) -> Option<usize> {
        self.customers
            .iter()
            .position(|customer| customer.tax_id() == tax_id)
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_BRANCH;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn fields(name: &str, tax_id: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 7, 1).unwrap(),
            tax_id: tax_id.to_string(),
            address: "Rua das Flores, 12 - Centro - Recife/PE".to_string(),
        }
    }

    fn open(directory: &mut Directory, tax_id: &str) -> Result<AccountNumber, BankError> {
        directory
            .open_account(tax_id, DEFAULT_BRANCH, WithdrawalPolicy::default())
            .map(|account| account.number())
    }

    fn populated() -> Directory {
        let mut directory = Directory::new();
        directory
            .register_customer(fields("Ana Souza", "111.111.111-11"))
            .unwrap();
        directory
            .register_customer(fields("Bruno Lima", "22222222222"))
            .unwrap();
        directory
            .register_customer(fields("Anabela Costa", "33333333333"))
            .unwrap();
        open(&mut directory, "11111111111").unwrap();
        open(&mut directory, "22222222222").unwrap();
        open(&mut directory, "33333333333").unwrap();
        open(&mut directory, "11111111111").unwrap();
        directory
    }

    #[test]
    fn test_new_creates_empty_directory() {
        let directory = Directory::new();
        assert_eq!(directory.customers().count(), 0);
        assert_eq!(directory.accounts().count(), 0);
    }

    #[test]
    fn test_register_customer_stores_normalized_tax_id() {
        let mut directory = Directory::new();

        let customer = directory
            .register_customer(fields("Ana", "123.456.789-00"))
            .unwrap();

        assert_eq!(customer.tax_id().as_str(), "12345678900");
        assert!(directory.find_customer("12345678900").is_ok());
        assert!(directory.find_customer("123-456-789.00").is_ok());
    }

    #[rstest]
    #[case::identical("12345678900")]
    #[case::formatted_differently("123.456.789-00")]
    fn test_register_duplicate_tax_id_fails(#[case] second: &str) {
        let mut directory = Directory::new();
        directory
            .register_customer(fields("Ana", "12345678900"))
            .unwrap();

        let err = directory
            .register_customer(fields("Outra Ana", second))
            .unwrap_err();

        assert_eq!(err, BankError::duplicate_identity("12345678900"));
        assert_eq!(directory.customers().count(), 1);
        assert_eq!(
            directory.find_customer("12345678900").unwrap().name(),
            "Ana"
        );
    }

    #[test]
    fn test_open_account_assigns_sequential_numbers() {
        let mut directory = Directory::new();
        directory.register_customer(fields("Ana", "1")).unwrap();
        directory.register_customer(fields("Bruno", "2")).unwrap();

        assert_eq!(open(&mut directory, "1").unwrap(), 1);
        assert_eq!(open(&mut directory, "2").unwrap(), 2);
        assert_eq!(open(&mut directory, "1").unwrap(), 3);

        assert_eq!(directory.find_customer("1").unwrap().accounts(), &[1, 3]);
        assert_eq!(directory.find_customer("2").unwrap().accounts(), &[2]);
        assert_eq!(directory.find_account(2).unwrap().owner().as_str(), "2");
    }

    #[test]
    fn test_open_account_for_unknown_customer_creates_nothing() {
        let mut directory = Directory::new();
        directory.register_customer(fields("Ana", "1")).unwrap();

        let err = open(&mut directory, "999").unwrap_err();

        assert_eq!(err, BankError::customer_not_found("999"));
        assert_eq!(directory.accounts().count(), 0);

        // The failed attempt did not consume a number
        assert_eq!(open(&mut directory, "1").unwrap(), 1);
    }

    #[test]
    fn test_find_account_not_found() {
        let directory = populated();
        assert_eq!(
            directory.find_account(99).unwrap_err(),
            BankError::account_not_found(99)
        );
        assert!(directory.find_customer("000").is_err());
    }

    #[test]
    fn test_owner_of_resolves_customer() {
        let directory = populated();
        let account = directory.find_account(2).unwrap();
        assert_eq!(directory.owner_of(account).unwrap().name(), "Bruno Lima");
    }

    #[rstest]
    #[case::empty_filter("", "", vec![1, 2, 3, 4])]
    #[case::name_substring("ana", "", vec![1, 3, 4])]
    #[case::name_case_insensitive("LIMA", "", vec![2])]
    #[case::tax_id_normalized("", "111.111.111-11", vec![1, 4])]
    #[case::name_and_tax_id("ana", "33333333333", vec![3])]
    #[case::name_and_tax_id_disagree("bruno", "33333333333", vec![])]
    #[case::no_match("zelia", "", vec![])]
    fn test_search(
        #[case] name: &str,
        #[case] tax_id: &str,
        #[case] expected: Vec<AccountNumber>,
    ) {
        let directory = populated();
        let filter = AccountFilter::from_input(name, tax_id);

        let numbers: Vec<AccountNumber> = directory
            .search(&filter)
            .iter()
            .map(|account| account.number())
            .collect();

        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_filter_from_input_treats_blank_as_any() {
        let filter = AccountFilter::from_input("   ", "\t");
        assert_eq!(filter, AccountFilter::default());
    }
}
