//! Overlap counting and approval classification for room applications.
//!
//! Everything here depends only on [`ApplicationCounter`], so the storage
//! behind it can be Postgres in production and a `Vec` in tests.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::room::{approval_descriptor, StatusDescriptor};
use crate::models::ApplicationStatus;
use crate::window::TimeWindow;

#[async_trait]
pub trait ApplicationCounter: Send + Sync {
    /// Applications of `room_id` with `status` whose span overlaps `window`.
    /// A room with no rows, or no such room at all, counts 0.
    async fn count_overlapping(
        &self,
        room_id: i32,
        window: TimeWindow,
        status: ApplicationStatus,
    ) -> AppResult<i64>;
}

/// Pending applications queued for the room over the window.
pub async fn queue_count<C>(counter: &C, room_id: i32, window: TimeWindow) -> AppResult<i64>
where
    C: ApplicationCounter + ?Sized,
{
    counter.count_overlapping(room_id, window, ApplicationStatus::Pending).await
}

/// "assigned" once any approved application overlaps the window.
pub async fn approval_status<C>(counter: &C, room_id: i32, window: TimeWindow) -> AppResult<StatusDescriptor>
where
    C: ApplicationCounter + ?Sized,
{
    let approved = counter
        .count_overlapping(room_id, window, ApplicationStatus::Approved)
        .await?;
    Ok(approval_descriptor(approved))
}

#[derive(Debug, Clone, Serialize)]
pub struct Occupancy {
    pub room_id: i32,
    pub window: TimeWindow,
    pub queue_count: i64,
    pub approval: StatusDescriptor,
}

/// Both views of a room over one window.
pub async fn occupancy<C>(counter: &C, room_id: i32, window: TimeWindow) -> AppResult<Occupancy>
where
    C: ApplicationCounter + ?Sized,
{
    let queue_count = queue_count(counter, room_id, window).await?;
    let approval = approval_status(counter, room_id, window).await?;
    tracing::debug!(
        "Room {} over [{}, {}) ({}s): {} queued, {}",
        room_id,
        window.start,
        window.end,
        window.duration_secs(),
        queue_count,
        approval.label
    );
    Ok(Occupancy {
        room_id,
        window,
        queue_count,
        approval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::room::StatusStyle;
    use crate::models::Application;
    use std::sync::Mutex;

    /// In-memory stand-in for the applications table.
    #[derive(Default)]
    struct FakeApplications {
        rows: Mutex<Vec<Application>>,
    }

    impl FakeApplications {
        fn insert(&self, room_id: i32, start_time: i64, end_time: i64, status: ApplicationStatus) {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i32 + 1;
            rows.push(Application {
                id,
                room_id,
                start_time,
                end_time,
                status: status.code(),
            });
        }
    }

    #[async_trait]
    impl ApplicationCounter for FakeApplications {
        async fn count_overlapping(
            &self,
            room_id: i32,
            window: TimeWindow,
            status: ApplicationStatus,
        ) -> AppResult<i64> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|a| a.room_id == room_id && a.status == status.code())
                .filter(|a| TimeWindow::new(a.start_time, a.end_time).overlaps(&window))
                .count() as i64)
        }
    }

    struct FailingCounter;

    #[async_trait]
    impl ApplicationCounter for FailingCounter {
        async fn count_overlapping(&self, _: i32, _: TimeWindow, _: ApplicationStatus) -> AppResult<i64> {
            Err(AppError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_unknown_room_counts_zero() {
        let store = FakeApplications::default();
        store.insert(1, 100, 200, ApplicationStatus::Pending);
        assert_eq!(queue_count(&store, 99, TimeWindow::new(100, 200)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_monotonicity() {
        let store = FakeApplications::default();
        let window = TimeWindow::new(1000, 2000);
        store.insert(1, 1200, 1300, ApplicationStatus::Pending);
        let before = queue_count(&store, 1, window).await.unwrap();
        assert_eq!(before, 1);

        // Disjoint and touching applications leave the count alone.
        store.insert(1, 2000, 2500, ApplicationStatus::Pending);
        store.insert(1, 500, 1000, ApplicationStatus::Pending);
        assert_eq!(queue_count(&store, 1, window).await.unwrap(), before);

        // One more overlapping pending application adds exactly one.
        store.insert(1, 1900, 2100, ApplicationStatus::Pending);
        assert_eq!(queue_count(&store, 1, window).await.unwrap(), before + 1);
    }

    #[tokio::test]
    async fn test_status_filter_isolation() {
        let store = FakeApplications::default();
        let window = TimeWindow::new(100, 200);
        store.insert(1, 150, 250, ApplicationStatus::Pending);

        assert_eq!(queue_count(&store, 1, window).await.unwrap(), 1);
        assert_eq!(approval_status(&store, 1, window).await.unwrap().label, "unassigned");

        store.insert(1, 50, 120, ApplicationStatus::Approved);
        assert_eq!(queue_count(&store, 1, window).await.unwrap(), 1);
        assert_eq!(approval_status(&store, 1, window).await.unwrap().label, "assigned");
    }

    #[tokio::test]
    async fn test_approval_status_threshold() {
        let store = FakeApplications::default();
        let window = TimeWindow::new(100, 200);

        let status = approval_status(&store, 1, window).await.unwrap();
        assert_eq!(status.label, "unassigned");
        assert_eq!(status.style, StatusStyle::Success);

        store.insert(1, 200, 300, ApplicationStatus::Approved);
        assert_eq!(approval_status(&store, 1, window).await.unwrap().label, "unassigned");

        store.insert(1, 199, 300, ApplicationStatus::Approved);
        let status = approval_status(&store, 1, window).await.unwrap();
        assert_eq!(status.label, "assigned");
        assert_eq!(status.style, StatusStyle::Danger);
    }

    #[tokio::test]
    async fn test_unknown_status_codes_are_ignored() {
        let store = FakeApplications::default();
        store.rows.lock().unwrap().push(Application {
            id: 1,
            room_id: 1,
            start_time: 100,
            end_time: 200,
            status: 9,
        });
        let result = occupancy(&store, 1, TimeWindow::new(100, 200)).await.unwrap();
        assert_eq!(result.queue_count, 0);
        assert_eq!(result.approval.label, "unassigned");
    }

    #[tokio::test]
    async fn test_occupancy_combines_both_counts() {
        let store = FakeApplications::default();
        store.insert(3, 100, 200, ApplicationStatus::Pending);
        store.insert(3, 150, 180, ApplicationStatus::Pending);
        store.insert(3, 160, 170, ApplicationStatus::Approved);
        store.insert(4, 100, 200, ApplicationStatus::Approved);

        let result = occupancy(&store, 3, TimeWindow::new(120, 190)).await.unwrap();
        assert_eq!(result.room_id, 3);
        assert_eq!(result.queue_count, 2);
        assert_eq!(result.approval.label, "assigned");
    }

    #[tokio::test]
    async fn test_datastore_errors_propagate() {
        let err = approval_status(&FailingCounter, 1, TimeWindow::new(0, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(queue_count(&FailingCounter, 1, TimeWindow::new(0, 1)).await.is_err());
    }
}
