use crate::domain::{Category, ExpenseRecord};

/// Summed amount for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: u64,
}

/// Category totals that remember the order in which each category first
/// appeared in the record stream.
///
/// Bounded by the size of the category set, so lookups scan a short vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: Category, amount: u64) {
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.amount = entry.amount.saturating_add(amount),
            None => self.entries.push(CategoryTotal { category, amount }),
        }
    }

    /// Total for `category`; absent categories total zero.
    pub fn get(&self, category: Category) -> u64 {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map_or(0, |e| e.amount)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    /// Strictly positive totals in the canonical category order.
    pub fn canonical(&self) -> impl Iterator<Item = CategoryTotal> + '_ {
        Category::ALL
            .into_iter()
            .map(|category| CategoryTotal {
                category,
                amount: self.get(category),
            })
            .filter(|total| total.amount > 0)
    }

    pub fn sum(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.amount))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(Category, u64)> for CategoryTotals {
    fn from_iter<I: IntoIterator<Item = (Category, u64)>>(iter: I) -> Self {
        let mut totals = CategoryTotals::new();
        for (category, amount) in iter {
            totals.add(category, amount);
        }
        totals
    }
}

/// Per-category totals plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub totals: CategoryTotals,
    pub grand_total: u64,
}

impl Aggregate {
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Reduces records into category totals and a grand total in one pass.
pub fn aggregate(records: &[ExpenseRecord]) -> Aggregate {
    let mut result = Aggregate::default();
    for record in records {
        result.totals.add(record.category, record.amount);
        result.grand_total = result.grand_total.saturating_add(record.amount);
    }
    result
}
