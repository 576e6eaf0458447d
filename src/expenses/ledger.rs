//! Expense Ledger
//!
//! Keeps the session's [`ExpenseCollection`] in step with the backend. The
//! collection only changes after a backend call completes, and a CSV import
//! always ends with a re-fetch because the server, not the local list, is the
//! source of truth.

use super::collection::ExpenseCollection;
use crate::api::{ClientResult, Expense, ExpenseApi, NewExpense};
use crate::import::{ImportError, ImportPipeline, ImportResult};

pub struct ExpenseLedger<A> {
    api: A,
    collection: ExpenseCollection,
    pipeline: ImportPipeline,
}

impl<A: ExpenseApi> ExpenseLedger<A> {
    /// Create an empty ledger; call [`refresh`](Self::refresh) to load it
    pub fn new(api: A) -> Self {
        Self {
            api,
            collection: ExpenseCollection::new(),
            pipeline: ImportPipeline::new(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: ImportPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn expenses(&self) -> &ExpenseCollection {
        &self.collection
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replace the collection with the backend's list
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let expenses = self.api.fetch_expenses().await?;
        tracing::debug!(count = expenses.len(), "Expense collection refreshed");
        self.collection.replace(expenses);
        Ok(())
    }

    pub async fn create(&mut self, expense: NewExpense) -> ClientResult<Expense> {
        let created = self.api.create_expense(&expense).await?;
        self.collection.append(created.clone());
        Ok(created)
    }

    /// Delete on the backend, then drop it locally
    pub async fn delete(&mut self, id: &str) -> ClientResult<Option<Expense>> {
        self.api.delete_expense(id).await?;
        Ok(self.collection.remove(id))
    }

    /// Import a CSV document and reload the collection.
    /// Returns how many expenses were created.
    pub async fn import_csv(&mut self, text: &str) -> ImportResult<usize> {
        match self.pipeline.run(&self.api, text).await {
            Ok(created) => {
                let created = created.len();
                if created > 0 {
                    self.refresh()
                        .await
                        .map_err(|source| ImportError::Refresh { created, source })?;
                }
                tracing::info!(created, "CSV import complete");
                Ok(created)
            }
            Err(err) => {
                if let ImportError::Submit { succeeded, .. } = &err {
                    if *succeeded > 0 {
                        if let Err(e) = self.refresh().await {
                            tracing::warn!(error = %e, "Refresh after partial import failed");
                        }
                    }
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory backend; `reject` makes creates for that description fail
    #[derive(Default)]
    struct FakeBackend {
        stored: Mutex<Vec<Expense>>,
        next_id: Mutex<u32>,
        reject: Option<&'static str>,
        fail_fetch: bool,
        fetches: Mutex<u32>,
    }

    impl FakeBackend {
        fn with(expenses: Vec<Expense>) -> Self {
            Self {
                stored: Mutex::new(expenses),
                next_id: Mutex::new(100),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ExpenseApi for FakeBackend {
        async fn fetch_expenses(&self) -> ClientResult<Vec<Expense>> {
            *self.fetches.lock().unwrap() += 1;
            if self.fail_fetch {
                return Err(ClientError::Unavailable);
            }
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn create_expense(&self, expense: &NewExpense) -> ClientResult<Expense> {
            if self.reject == Some(expense.description.as_str()) {
                return Err(ClientError::Status {
                    status: 400,
                    message: "rejected".to_string(),
                });
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let created = Expense {
                id: next_id.to_string(),
                description: expense.description.clone(),
                amount: expense.amount,
                date: expense.date.clone(),
            };
            self.stored.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn delete_expense(&self, id: &str) -> ClientResult<()> {
            let mut stored = self.stored.lock().unwrap();
            let before = stored.len();
            stored.retain(|e| e.id != id);
            if stored.len() == before {
                return Err(ClientError::Status {
                    status: 404,
                    message: "not found".to_string(),
                });
            }
            Ok(())
        }
    }

    fn existing() -> Expense {
        Expense {
            id: "1".to_string(),
            description: "Condomínio".to_string(),
            amount: 450.0,
            date: "2024-01-05T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_refresh_create_delete() {
        let mut ledger = ExpenseLedger::new(FakeBackend::with(vec![existing()]));
        ledger.refresh().await.unwrap();
        assert_eq!(ledger.expenses().len(), 1);

        let created = ledger
            .create(NewExpense {
                description: "Internet".into(),
                amount: 99.9,
                date: "2024-01-10T00:00:00.000Z".into(),
            })
            .await
            .unwrap();
        assert_eq!(ledger.expenses().len(), 2);

        let removed = ledger.delete(&created.id).await.unwrap();
        assert_eq!(removed.unwrap().id, created.id);
        assert_eq!(ledger.expenses().len(), 1);
        assert!(ledger.expenses().get("1").is_some());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_local_copy() {
        let mut ledger = ExpenseLedger::new(FakeBackend::with(vec![existing()]));
        ledger.refresh().await.unwrap();

        assert!(ledger.delete("999").await.is_err());
        assert_eq!(ledger.expenses().len(), 1);
    }

    #[tokio::test]
    async fn test_import_refetches_authoritative_list() {
        let mut ledger = ExpenseLedger::new(FakeBackend::with(vec![existing()]));

        let created = ledger
            .import_csv("description,amount,date\nInternet,\"R$ 99,90\",2024-01-10\nOutros,5,2024-01-11")
            .await
            .unwrap();

        assert_eq!(created, 2);
        // The pre-existing server record arrives through the re-fetch
        assert_eq!(ledger.expenses().len(), 3);
        assert_eq!(*ledger.api().fetches.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_partial_import_still_refreshes() {
        let backend = FakeBackend {
            reject: Some("Outros"),
            ..FakeBackend::with(Vec::new())
        };
        let mut ledger = ExpenseLedger::new(backend);

        let err = ledger
            .import_csv("description,amount,date\nInternet,10,2024-01-10\nOutros,5,2024-01-11\nLuz,1,2024-01-12")
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Submit { succeeded: 1, index: 1, .. }));
        // First row stays created and is visible after the re-fetch
        assert_eq!(ledger.expenses().len(), 1);
        assert_eq!(ledger.expenses().as_slice()[0].description, "Internet");
        assert_eq!(*ledger.api().fetches.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_created_count() {
        let backend = FakeBackend {
            fail_fetch: true,
            ..FakeBackend::with(Vec::new())
        };
        let mut ledger = ExpenseLedger::new(backend);

        let err = ledger
            .import_csv("description,amount,date\nInternet,10,2024-01-10\nLuz,1,2024-01-12")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ImportError::Refresh {
                created: 2,
                source: ClientError::Unavailable
            }
        ));
        assert_eq!(ledger.api().stored.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_csv_touches_nothing() {
        let mut ledger = ExpenseLedger::new(FakeBackend::with(Vec::new()));

        let err = ledger
            .import_csv("description,amount,date\nInternet,abc,2024-01-10")
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::InvalidAmount { row: 0, .. }));
        assert!(ledger.api().stored.lock().unwrap().is_empty());
        assert_eq!(*ledger.api().fetches.lock().unwrap(), 0);
    }
}
