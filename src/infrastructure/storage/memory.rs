//! In-memory repository implementations backed by `DashMap`.
//!
//! Used by unit tests and available as a storage backend for ephemeral
//! deployments. Ordering contracts match the SQL implementations: plots
//! sort by plot number ascending, layouts and bookings newest first.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::layout::{Layout, LayoutRepository};
use crate::domain::plot::{Plot, PlotRepository, PlotSearch, PlotStatusCounts};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainResult, RepositoryProvider};

/// All four aggregate stores over shared concurrent maps.
#[derive(Default)]
pub struct InMemoryRepositories {
    layouts: DashMap<String, Layout>,
    plots: DashMap<String, Plot>,
    bookings: DashMap<String, Booking>,
    users: DashMap<String, User>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl RepositoryProvider for InMemoryRepositories {
    fn layouts(&self) -> &dyn LayoutRepository {
        self
    }

    fn plots(&self) -> &dyn PlotRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }
}

#[async_trait]
impl LayoutRepository for InMemoryRepositories {
    async fn save(&self, layout: Layout) -> DomainResult<()> {
        self.layouts.insert(layout.id.clone(), layout);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Layout>> {
        Ok(self.layouts.get(id).map(|l| l.clone()))
    }

    async fn find_active(&self) -> DomainResult<Vec<Layout>> {
        let mut out: Vec<Layout> = self
            .layouts
            .iter()
            .filter(|l| l.is_active)
            .map(|l| l.clone())
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn update(&self, layout: Layout) -> DomainResult<()> {
        self.layouts.insert(layout.id.clone(), layout);
        Ok(())
    }
}

#[async_trait]
impl PlotRepository for InMemoryRepositories {
    async fn save(&self, plot: Plot) -> DomainResult<()> {
        self.plots.insert(plot.id.clone(), plot);
        Ok(())
    }

    async fn save_batch(&self, plots: Vec<Plot>) -> DomainResult<()> {
        for plot in plots {
            self.plots.insert(plot.id.clone(), plot);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Plot>> {
        Ok(self.plots.get(id).map(|p| p.clone()))
    }

    async fn find_by_layout(&self, layout_id: &str) -> DomainResult<Vec<Plot>> {
        let mut out: Vec<Plot> = self
            .plots
            .iter()
            .filter(|p| p.layout_id == layout_id)
            .map(|p| p.clone())
            .collect();
        out.sort_by(|a, b| a.plot_number.cmp(&b.plot_number));
        Ok(out)
    }

    async fn find_by_layout_and_number(
        &self,
        layout_id: &str,
        plot_number: &str,
    ) -> DomainResult<Option<Plot>> {
        Ok(self
            .plots
            .iter()
            .find(|p| {
                p.layout_id == layout_id && p.plot_number.eq_ignore_ascii_case(plot_number)
            })
            .map(|p| p.clone()))
    }

    async fn update(&self, plot: Plot) -> DomainResult<()> {
        self.plots.insert(plot.id.clone(), plot);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.plots.remove(id);
        Ok(())
    }

    async fn search(&self, filter: PlotSearch) -> DomainResult<Vec<Plot>> {
        let query = filter.query.as_deref().map(str::to_lowercase);
        let mut out: Vec<Plot> = self
            .plots
            .iter()
            .filter(|p| {
                filter
                    .layout_id
                    .as_deref()
                    .map_or(true, |l| p.layout_id == l)
                    && query
                        .as_deref()
                        .map_or(true, |q| p.plot_number.to_lowercase().contains(q))
            })
            .map(|p| p.clone())
            .collect();
        out.sort_by(|a, b| a.plot_number.cmp(&b.plot_number));
        Ok(out)
    }

    async fn count_by_status(&self, layout_id: &str) -> DomainResult<PlotStatusCounts> {
        let mut counts = PlotStatusCounts::default();
        for p in self.plots.iter().filter(|p| p.layout_id == layout_id) {
            counts.add(p.status);
        }
        Ok(counts)
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepositories {
    async fn save(&self, booking: Booking) -> DomainResult<()> {
        self.bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|b| b.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut out: Vec<Booking> = self.bookings.iter().map(|b| b.clone()).collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn find_by_plot(&self, plot_id: &str) -> DomainResult<Vec<Booking>> {
        let mut out: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.plot_id == plot_id)
            .map(|b| b.clone())
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn find_active_for_plot(&self, plot_id: &str) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .find(|b| b.plot_id == plot_id && b.status != BookingStatus::Cancelled)
            .map(|b| b.clone()))
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        self.bookings.insert(booking.id.clone(), booking);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.bookings.remove(id);
        Ok(())
    }

    async fn delete_by_plot(&self, plot_id: &str) -> DomainResult<()> {
        self.bookings.retain(|_, b| b.plot_id != plot_id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepositories {
    async fn save(&self, user: User) -> DomainResult<()> {
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == login || u.email.eq_ignore_ascii_case(login))
            .map(|u| u.clone()))
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Rect;
    use crate::domain::plot::PlotStatus;

    fn plot(layout_id: &str, number: &str) -> Plot {
        Plot::new(
            layout_id,
            number,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            None,
            PlotStatus::Available,
            None,
            None,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn plots_order_by_number_within_layout() {
        let repos = InMemoryRepositories::new();
        for n in ["103", "101", "102"] {
            PlotRepository::save(&repos, plot("L1", n)).await.unwrap();
        }
        PlotRepository::save(&repos, plot("L2", "100")).await.unwrap();

        let plots = repos.plots().find_by_layout("L1").await.unwrap();
        let numbers: Vec<&str> = plots.iter().map(|p| p.plot_number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "102", "103"]);
    }

    #[tokio::test]
    async fn lookup_by_number_ignores_case() {
        let repos = InMemoryRepositories::new();
        PlotRepository::save(&repos, plot("L1", "A-10")).await.unwrap();

        let found = repos
            .plots()
            .find_by_layout_and_number("L1", "a-10")
            .await
            .unwrap();
        assert!(found.is_some());
        assert!(repos
            .plots()
            .find_by_layout_and_number("L2", "a-10")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_by_plot_removes_all_history() {
        let repos = InMemoryRepositories::new();
        let p = plot("L1", "101");
        let client = crate::domain::booking::ClientInfo {
            name: "A".into(),
            email: None,
            phone: "1".into(),
            address: None,
        };
        let mut first = Booking::new(&p.id, client.clone(), None);
        first.cancel();
        BookingRepository::save(&repos, first).await.unwrap();
        BookingRepository::save(&repos, Booking::new(&p.id, client, None))
            .await
            .unwrap();

        assert_eq!(repos.bookings().find_by_plot(&p.id).await.unwrap().len(), 2);
        repos.bookings().delete_by_plot(&p.id).await.unwrap();
        assert!(repos.bookings().find_by_plot(&p.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn login_lookup_matches_username_or_email() {
        let repos = InMemoryRepositories::new();
        let user = User::new("admin", "admin@example.com", "hash", crate::domain::UserRole::Admin);
        UserRepository::save(&repos, user).await.unwrap();

        assert!(repos.users().find_by_login("admin").await.unwrap().is_some());
        assert!(repos
            .users()
            .find_by_login("ADMIN@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(repos.users().find_by_login("nobody").await.unwrap().is_none());
        assert_eq!(repos.users().count().await.unwrap(), 1);
    }
}
