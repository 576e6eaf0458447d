//! List Presenter
//!
//! Derives the visible page of an expense list from four independent inputs:
//! a description filter, a search term, a sort order and a page number. The
//! derivation always runs filter, then search, then sort, then paginate, and
//! only ever borrows the underlying collection.

use crate::api::Expense;
use crate::import::parse_date;
use std::cmp::Ordering;

/// Column an expense list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Description,
    Amount,
    Date,
}

impl SortField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "description" | "descricao" => Some(Self::Description),
            "amount" | "valor" => Some(Self::Amount),
            "date" | "data" => Some(Self::Date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Exact-match filter on the expense description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DescriptionFilter {
    #[default]
    All,
    Exact(String),
}

impl DescriptionFilter {
    fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::Exact(description) => expense.description == *description,
        }
    }
}

/// One derived page of the list
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<'a> {
    pub items: Vec<&'a Expense>,
    /// 1-based page actually shown, after clamping
    pub page: usize,
    /// `ceil(total_items / page_size)`; zero for an empty result
    pub total_pages: usize,
    /// Expenses left after filter and search
    pub total_items: usize,
}

/// Filter, search, sort and pagination state of an expense list
#[derive(Debug, Clone)]
pub struct ListPresenter {
    filter: DescriptionFilter,
    search: String,
    sort: Option<SortState>,
    page: usize,
    page_size: usize,
}

impl ListPresenter {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: DescriptionFilter::All,
            search: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn filter(&self) -> &DescriptionFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: DescriptionFilter) {
        self.filter = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Click on a column header: the same field flips direction, a new
    /// field starts ascending
    pub fn select_sort(&mut self, field: SortField) {
        self.sort = Some(match self.sort {
            Some(current) if current.field == field => SortState {
                field,
                direction: current.direction.toggled(),
            },
            _ => SortState {
                field,
                direction: SortDirection::Asc,
            },
        });
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Filter, search and sort, without paginating
    pub fn arrange<'a>(&self, items: &'a [Expense]) -> Vec<&'a Expense> {
        let needle = self.search.trim().to_lowercase();

        let mut rows: Vec<&Expense> = items
            .iter()
            .filter(|e| self.filter.matches(e))
            .filter(|e| needle.is_empty() || matches_search(e, &needle))
            .collect();

        if let Some(sort) = self.sort {
            // Vec::sort_by is stable
            rows.sort_by(|a, b| {
                let ord = compare(a, b, sort.field);
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        rows
    }

    /// Derive the current page
    pub fn view<'a>(&self, items: &'a [Expense]) -> ListView<'a> {
        let rows = self.arrange(items);
        let total_items = rows.len();
        let total_pages = total_items.div_ceil(self.page_size);
        let page = self.page.clamp(1, total_pages.max(1));

        let items = rows
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();

        ListView {
            items,
            page,
            total_pages,
            total_items,
        }
    }

    /// Store the clamped page; call after the collection, filter or search
    /// changes
    pub fn clamp(&mut self, items: &[Expense]) {
        self.page = self.view(items).page;
    }
}

fn matches_search(expense: &Expense, needle: &str) -> bool {
    expense.description.to_lowercase().contains(needle)
        || expense.amount.to_string().contains(needle)
        || expense.date.to_lowercase().contains(needle)
}

fn compare(a: &Expense, b: &Expense, field: SortField) -> Ordering {
    match field {
        SortField::Description => a.description.cmp(&b.description),
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::Date => match (parse_date(&a.date).ok(), parse_date(&b.date).ok()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => a.date.cmp(&b.date),
        },
    }
}
