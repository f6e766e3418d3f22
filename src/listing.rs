// 📋 List View Controller - search + pagination over the customer sheet
//
// The full list is loaded once; every read derives the filtered page from
// (customers, committed search term, page). Pages are 1-based.

use serde::Serialize;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::entities::Customer;
use crate::fetcher::SheetSource;
use crate::loader::load_customers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// One rendered page of the list
#[derive(Debug, Clone, Serialize)]
pub struct CustomerPage {
    pub items: Vec<Customer>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub page_size: usize,
    pub search: String,
}

pub struct ListView {
    customers: Vec<Customer>,
    /// What is typed in the search box right now
    search_input: String,
    /// What the list is actually filtered by
    search_term: String,
    page: usize,
    page_size: usize,
    status: LoadStatus,
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            customers: Vec::new(),
            search_input: String::new(),
            search_term: String::new(),
            page: 1,
            page_size: page_size.max(1),
            status: LoadStatus::Loading,
        }
    }

    /// View over an already loaded list
    pub fn with_customers(customers: Vec<Customer>, page_size: usize) -> Self {
        let mut view = Self::new(page_size);
        view.set_customers(customers);
        view
    }

    /// Fetch and parse the customer sheet.
    ///
    /// On failure the error is logged, the list is left empty and the status
    /// carries the message.
    pub async fn load<S: SheetSource + ?Sized>(&mut self, source: &S) {
        self.status = LoadStatus::Loading;

        match load_customers(source).await {
            Ok(customers) => {
                tracing::info!(count = customers.len(), "Customers loaded");
                self.set_customers(customers);
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Failed to load customers");
                self.customers.clear();
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
    }

    pub fn set_customers(&mut self, customers: Vec<Customer>) {
        self.customers = customers;
        self.status = LoadStatus::Ready;
        self.page = 1;
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_input(&mut self, text: &str) {
        self.search_input = text.to_string();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
    }

    /// Make the search box text the active filter and go back to page 1
    pub fn commit_search(&mut self) {
        self.search_term = self.search_input.clone();
        self.page = 1;
    }

    /// Type and commit in one go
    pub fn search(&mut self, term: &str) {
        self.set_search_input(term);
        self.commit_search();
    }

    /// Customers matching the committed term, in sheet order
    pub fn filtered(&self) -> Vec<&Customer> {
        self.customers
            .iter()
            .filter(|customer| customer.matches_search(&self.search_term))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------------

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// ceil(matches / page size); 0 when nothing matches
    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size)
    }

    /// The current page's slice of the filtered list
    pub fn visible(&self) -> Vec<&Customer> {
        let start = (self.page - 1) * self.page_size;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    fn last_page_number(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.last_page_number());
    }

    pub fn first_page(&mut self) {
        self.page = 1;
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page + 1);
    }

    pub fn last_page(&mut self) {
        self.page = self.last_page_number();
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page >= self.last_page_number()
    }

    /// Owned snapshot of the current page
    pub fn current_page(&self) -> CustomerPage {
        CustomerPage {
            items: self.visible().into_iter().cloned().collect(),
            page: self.page,
            total_pages: self.total_pages(),
            total_matches: self.filtered().len(),
            page_size: self.page_size,
            search: self.search_term.clone(),
        }
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
