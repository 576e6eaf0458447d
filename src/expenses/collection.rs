//! In-memory expense collection for the current session.
//! Ids are unique at all times.

use crate::api::Expense;

#[derive(Debug, Clone, Default)]
pub struct ExpenseCollection {
    items: Vec<Expense>,
}

impl ExpenseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly fetched list.
    /// A repeated id keeps the later record, at the earlier position.
    pub fn replace(&mut self, expenses: Vec<Expense>) {
        self.items.clear();
        for expense in expenses {
            self.upsert(expense);
        }
    }

    /// Add a newly created expense
    pub fn append(&mut self, expense: Expense) {
        self.upsert(expense);
    }

    fn upsert(&mut self, expense: Expense) {
        match self.items.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense,
            None => self.items.push(expense),
        }
    }

    /// Remove exactly the expense with this id
    pub fn remove(&mut self, id: &str) -> Option<Expense> {
        let idx = self.items.iter().position(|e| e.id == id)?;
        Some(self.items.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.items.iter().find(|e| e.id == id)
    }

    pub fn as_slice(&self) -> &[Expense] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, description: &str) -> Expense {
        Expense {
            id: id.to_string(),
            description: description.to_string(),
            amount: 1.0,
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_remove_only_that_id() {
        let mut collection = ExpenseCollection::new();
        collection.replace(vec![
            expense("1", "Internet"),
            expense("2", "Outros"),
            expense("3", "Internet"),
        ]);

        let removed = collection.remove("2").unwrap();
        assert_eq!(removed.id, "2");

        let ids: Vec<&str> = collection.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert!(collection.remove("2").is_none());
    }

    #[test]
    fn test_ids_stay_unique() {
        let mut collection = ExpenseCollection::new();
        collection.replace(vec![expense("1", "old"), expense("1", "new")]);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("1").unwrap().description, "new");

        collection.append(expense("2", "Luz"));
        collection.append(expense("2", "Luz corrigida"));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("2").unwrap().description, "Luz corrigida");
    }

    #[test]
    fn test_replace_discards_previous() {
        let mut collection = ExpenseCollection::new();
        collection.append(expense("9", "stale"));
        collection.replace(vec![expense("1", "fresh")]);

        assert!(collection.get("9").is_none());
        assert_eq!(collection.len(), 1);
    }
}
