//! In-process row store.
//!
//! Behaves like the hosted backend for the two operations the site uses:
//! equality filters, single-column ordering with nulls last, and appends.
//! Failures can be scripted so callers can exercise their error paths.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{RemoteTable, Select, TableError};
use crate::schema::{TableRow, tables};

#[derive(Debug, Default)]
struct Store {
    rows: HashMap<String, Vec<Value>>,
    insert_calls: usize,
    select_calls: usize,
    fail_inserts: Option<String>,
    fail_selects: Option<String>,
}

/// A [`RemoteTable`] that keeps rows in memory.
#[derive(Debug, Default)]
pub struct MemoryTable {
    store: Mutex<Store>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the lectures shown when no backend is configured.
    pub fn preview() -> Self {
        let table = Self::new();
        table.seed_values(tables::SPECIAL_LECTURES, preview_lectures());
        table
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append typed rows without counting an insert call.
    pub fn seed<R: TableRow>(&self, rows: &[R]) -> Result<(), TableError> {
        let values = rows
            .iter()
            .map(|row| {
                serde_json::to_value(row).map_err(|source| TableError::Encode {
                    table: R::TABLE.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.seed_values(R::TABLE, values);
        Ok(())
    }

    /// Append raw rows without counting an insert call.
    pub fn seed_values(&self, table: &str, rows: Vec<Value>) {
        self.store()
            .rows
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Every row currently stored in `table`, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.store().rows.get(table).cloned().unwrap_or_default()
    }

    /// Number of `insert` calls received, including failed ones.
    pub fn insert_calls(&self) -> usize {
        self.store().insert_calls
    }

    /// Number of `select` calls received, including failed ones.
    pub fn select_calls(&self) -> usize {
        self.store().select_calls
    }

    /// Make every following insert fail with a 503 carrying `message`.
    pub fn fail_inserts(&self, message: impl Into<String>) {
        self.store().fail_inserts = Some(message.into());
    }

    /// Make every following select fail with a 503 carrying `message`.
    pub fn fail_selects(&self, message: impl Into<String>) {
        self.store().fail_selects = Some(message.into());
    }

    /// Stop failing.
    pub fn recover(&self) {
        let mut store = self.store();
        store.fail_inserts = None;
        store.fail_selects = None;
    }
}

fn unavailable(message: &str) -> TableError {
    TableError::Status {
        status: 503,
        message: message.to_string(),
    }
}

/// Ascending comparison of two column values; nulls and missing values sort last.
fn compare_columns(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[async_trait(?Send)]
impl RemoteTable for MemoryTable {
    async fn select(&self, query: &Select) -> Result<Vec<Value>, TableError> {
        let mut store = self.store();
        store.select_calls += 1;
        if let Some(message) = &store.fail_selects {
            return Err(unavailable(message));
        }
        let mut rows: Vec<Value> = store
            .rows
            .get(query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|filter| row.get(filter.column).is_some_and(|v| filter.value.matches(v)))
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = query.order {
            // stable sort keeps insertion order for ties
            rows.sort_by(|a, b| {
                let ordering = compare_columns(a.get(order.column), b.get(order.column));
                let nulls_last = matches!(a.get(order.column), None | Some(Value::Null))
                    || matches!(b.get(order.column), None | Some(Value::Null));
                if order.ascending || nulls_last {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> Result<(), TableError> {
        let mut store = self.store();
        store.insert_calls += 1;
        if let Some(message) = &store.fail_inserts {
            return Err(unavailable(message));
        }
        store.rows.entry(table.to_string()).or_default().extend(rows);
        Ok(())
    }
}

fn preview_lectures() -> Vec<Value> {
    vec![
        json!({
            "id": "preview-rrb-ntpc",
            "expert_name": "Shri Arvind Kulkarni",
            "expert_title": "Retd. Divisional Railway Manager",
            "expert_credentials": "32 years with Indian Railways, former RRB interview panelist",
            "expert_image_url": null,
            "topic": "Inside the RRB NTPC Selection Process",
            "description": "How railway recruitment boards shortlist candidates and what interview panels actually look for.",
            "key_takeaways": [
                "Stage-wise cut-off trends",
                "Document verification pitfalls",
                "Answering situational questions",
                "Choosing the right zone preference"
            ],
            "lecture_date": "2026-11-08T12:30:00+00:00",
            "duration_minutes": 90,
            "is_upcoming": true,
            "is_featured": true,
            "available_online": true,
            "registration_url": null
        }),
        json!({
            "id": "preview-ssc-cgl",
            "expert_name": "Dr. Meera Nair",
            "expert_title": "Former Assistant Commissioner, Income Tax",
            "expert_credentials": "SSC CGL All India Rank 14",
            "expert_image_url": null,
            "topic": "SSC CGL: From Tier 1 to Posting",
            "description": "A candid walk through preparation, post preferences and the first year in service.",
            "key_takeaways": [
                "Building a 6-month plan",
                "Quant shortcuts that survive exam pressure",
                "Post preference strategy"
            ],
            "lecture_date": "2026-11-22T10:30:00+00:00",
            "duration_minutes": 75,
            "is_upcoming": true,
            "is_featured": true,
            "available_online": false,
            "registration_url": null
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::columns;
    use crate::table::fetch_rows;
    use crate::schema::SpecialLecture;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime")
            .block_on(future)
    }

    #[test]
    fn preview_rows_decode_as_lectures() {
        let table = MemoryTable::preview();
        let query = Select::rows::<SpecialLecture>()
            .eq(columns::IS_FEATURED, true)
            .order_by(columns::LECTURE_DATE, true);
        let lectures: Vec<SpecialLecture> = block_on(fetch_rows(&table, &query)).unwrap();
        assert_eq!(lectures.len(), 2);
        assert_eq!(lectures[0].id, "preview-rrb-ntpc");
    }

    #[test]
    fn ordering_puts_nulls_last_both_ways() {
        let table = MemoryTable::new();
        table.seed_values(
            "t",
            vec![json!({"k": null, "n": 0}), json!({"k": 2, "n": 1}), json!({"k": 1, "n": 2})],
        );
        let asc = block_on(table.select(&Select { table: "t", filters: vec![], order: None }.order_by("k", true))).unwrap();
        let desc = block_on(table.select(&Select { table: "t", filters: vec![], order: None }.order_by("k", false))).unwrap();
        let ids = |rows: &[Value]| rows.iter().map(|r| r["n"].as_i64().unwrap()).collect::<Vec<_>>();
        assert_eq!(ids(&asc), vec![2, 1, 0]);
        assert_eq!(ids(&desc), vec![1, 2, 0]);
    }

    #[test]
    fn scripted_failures_still_count_calls() {
        let table = MemoryTable::new();
        table.fail_inserts("down");
        let result = block_on(table.insert("t", vec![json!({})]));
        assert!(matches!(result, Err(TableError::Status { status: 503, .. })));
        assert_eq!(table.insert_calls(), 1);
        assert!(table.rows("t").is_empty());

        table.recover();
        block_on(table.insert("t", vec![json!({})])).unwrap();
        assert_eq!(table.rows("t").len(), 1);
    }
}
