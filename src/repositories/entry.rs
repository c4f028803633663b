//! # Entry Repository
//!
//! Entries are append-only; the list operations keep the chart series
//! ascending by timestamp while the "recent" view reads the tail in
//! descending order.

use crate::error::RepositoryError;
use crate::models::entry::{
    ActiveModel as EntryActiveModel, Column, Entity as Entry, Model as EntryModel,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// How many entries the "recent" view shows.
pub const RECENT_ENTRY_LIMIT: u64 = 10;

/// Request data for creating a new entry
#[derive(Debug, Clone)]
pub struct CreateEntryRequest {
    pub organisation_id: Uuid,
    pub metric_id: Uuid,
    /// Midnight UTC of the day the value was recorded for
    pub ts: DateTimeWithTimeZone,
    pub value: f64,
    pub notes: Option<String>,
}

/// Repository for Entry database operations
pub struct EntryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EntryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new entry for a metric
    pub async fn create(&self, request: CreateEntryRequest) -> Result<EntryModel, RepositoryError> {
        if !request.value.is_finite() {
            return Err(RepositoryError::validation_error(
                "Entry value must be a finite number",
            ));
        }

        let notes = request
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        let entry = EntryActiveModel {
            id: NotSet,
            organisation_id: Set(request.organisation_id),
            metric_id: Set(request.metric_id),
            ts: Set(request.ts),
            value: Set(request.value),
            notes: Set(notes),
        };

        entry
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List all entries for a metric, ascending by timestamp
    pub async fn list_for_metric(
        &self,
        metric_id: Uuid,
    ) -> Result<Vec<EntryModel>, RepositoryError> {
        Entry::find()
            .filter(Column::MetricId.eq(metric_id))
            .order_by_asc(Column::Ts)
            .order_by_asc(Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// The last ten entries for a metric, newest first
    pub async fn recent_for_metric(
        &self,
        metric_id: Uuid,
    ) -> Result<Vec<EntryModel>, RepositoryError> {
        Entry::find()
            .filter(Column::MetricId.eq(metric_id))
            .order_by_desc(Column::Ts)
            .order_by_desc(Column::Id)
            .limit(RECENT_ENTRY_LIMIT)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        CreateMetricRequest, CreateOrganisationRequest, MetricDefinitionRepository,
        OrganisationRepository,
    };
    use chrono::{TimeZone, Utc};
    use migration::MigratorTrait;
    use sea_orm::Database;

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn create_metric(db: &DatabaseConnection) -> (Uuid, Uuid) {
        let org = OrganisationRepository::new(db)
            .create(CreateOrganisationRequest {
                name: "Acme".to_string(),
                owner_user_id: "user_1".to_string(),
            })
            .await
            .unwrap()
            .id;
        let metric = MetricDefinitionRepository::new(db)
            .create(CreateMetricRequest {
                organisation_id: org,
                name: "Revenue".to_string(),
                unit: None,
            })
            .await
            .unwrap()
            .id;
        (org, metric)
    }

    fn day(day: u32) -> DateTimeWithTimeZone {
        Utc.with_ymd_and_hms(2026, 5, day, 0, 0, 0).unwrap().into()
    }

    #[tokio::test]
    async fn non_finite_value_is_rejected_before_insert() {
        let db = setup_test_db().await;
        let (org, metric) = create_metric(&db).await;
        let repo = EntryRepository::new(&db);

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = repo
                .create(CreateEntryRequest {
                    organisation_id: org,
                    metric_id: metric,
                    ts: day(1),
                    value: bad,
                    notes: None,
                })
                .await;
            assert!(matches!(result, Err(RepositoryError::Validation(_))));
        }

        assert!(repo.list_for_metric(metric).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_stays_ascending_regardless_of_insert_order() {
        let db = setup_test_db().await;
        let (org, metric) = create_metric(&db).await;
        let repo = EntryRepository::new(&db);

        for d in [12, 3, 25, 7] {
            repo.create(CreateEntryRequest {
                organisation_id: org,
                metric_id: metric,
                ts: day(d),
                value: d as f64,
                notes: None,
            })
            .await
            .unwrap();
        }

        let listed = repo.list_for_metric(metric).await.unwrap();
        let timestamps: Vec<_> = listed.iter().map(|entry| entry.ts).collect();
        let mut sorted = timestamps.clone();
        sorted.sort();
        assert_eq!(timestamps, sorted);
    }

    #[tokio::test]
    async fn recent_returns_last_ten_descending() {
        let db = setup_test_db().await;
        let (org, metric) = create_metric(&db).await;
        let repo = EntryRepository::new(&db);

        for d in 1..=12 {
            repo.create(CreateEntryRequest {
                organisation_id: org,
                metric_id: metric,
                ts: day(d),
                value: d as f64,
                notes: None,
            })
            .await
            .unwrap();
        }

        let recent = repo.recent_for_metric(metric).await.unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].ts, day(12));
        assert_eq!(recent[9].ts, day(3));
    }

    #[tokio::test]
    async fn blank_notes_are_stored_as_null() {
        let db = setup_test_db().await;
        let (org, metric) = create_metric(&db).await;
        let repo = EntryRepository::new(&db);

        let entry = repo
            .create(CreateEntryRequest {
                organisation_id: org,
                metric_id: metric,
                ts: day(1),
                value: 10.0,
                notes: Some("  ".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(entry.notes, None);
    }
}
