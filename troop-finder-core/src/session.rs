//! Per-session browsing state.
//!
//! A [`SessionContext`] owns the loaded troops together with the search,
//! sort and home-location state a user builds up while comparing them. All
//! changes go through explicit transitions; nothing is global.

use std::collections::BTreeMap;

use geo::Coord;

use crate::search::{filter_troops, parse_search_query};
use crate::sorting::{SortColumn, SortState};
use crate::troop::{Troop, TroopId};

/// The family's geocoded home.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeLocation {
    /// Address as entered.
    pub address: String,
    /// Geocoded position (`x` = longitude, `y` = latitude).
    pub position: Coord<f64>,
}

/// Troops plus the view state applied to them.
///
/// # Examples
/// ```
/// use troop_finder_core::{SessionContext, SortColumn, Troop};
///
/// let mut session = SessionContext::new(vec![Troop::new("36"), Troop::new("6")]);
/// session.sort_by(SortColumn::Troop);
/// let ids: Vec<_> = session.visible_troops().iter().map(|t| t.troop.as_str()).collect();
/// assert_eq!(ids, ["6", "36"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    troops: Vec<Troop>,
    sort: SortState,
    search_terms: Vec<String>,
    home: Option<HomeLocation>,
}

impl SessionContext {
    /// Start a session over `troops` with no search, sort or home set.
    #[must_use]
    pub fn new(troops: Vec<Troop>) -> Self {
        Self {
            troops,
            ..Self::default()
        }
    }

    /// Every loaded troop in dataset order.
    #[must_use]
    pub fn troops(&self) -> &[Troop] {
        &self.troops
    }

    /// Mutable access for workflows that fill in distances directly.
    pub fn troops_mut(&mut self) -> &mut [Troop] {
        &mut self.troops
    }

    /// Active search terms.
    #[must_use]
    pub fn search_terms(&self) -> &[String] {
        &self.search_terms
    }

    /// Current sort selection.
    #[must_use]
    pub const fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Geocoded home, once set.
    #[must_use]
    pub const fn home(&self) -> Option<&HomeLocation> {
        self.home.as_ref()
    }

    /// Replace the search with the terms parsed from `query`.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_terms = parse_search_query(query);
        log::debug!("search terms set to {:?}", self.search_terms);
    }

    /// Drop the active search.
    pub fn clear_search(&mut self) {
        self.search_terms.clear();
    }

    /// Select a sort column; selecting the same column again flips the
    /// direction.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort.toggle(column);
    }

    /// Replace the sort selection outright.
    pub const fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Record the family's home.
    ///
    /// Distances computed from a previous home no longer apply and are
    /// cleared.
    pub fn set_home_location(&mut self, address: impl Into<String>, position: Coord<f64>) {
        let address = address.into();
        let moved = self
            .home
            .as_ref()
            .is_some_and(|home| home.address != address || home.position != position);
        if moved {
            for troop in &mut self.troops {
                troop.distance = None;
            }
        }
        self.home = Some(HomeLocation { address, position });
    }

    /// Copy known distances onto the matching troops.
    ///
    /// Returns how many troops were updated. Ids with no matching troop are
    /// ignored.
    pub fn apply_distances(&mut self, distances: &BTreeMap<TroopId, f64>) -> usize {
        let mut updated = 0;
        for troop in &mut self.troops {
            if let Some(miles) = distances.get(&troop.troop) {
                troop.distance = Some(*miles);
                updated += 1;
            }
        }
        updated
    }

    /// Distances currently known, keyed by troop id.
    #[must_use]
    pub fn distances(&self) -> BTreeMap<TroopId, f64> {
        self.troops
            .iter()
            .filter_map(|troop| troop.distance.map(|miles| (troop.troop.clone(), miles)))
            .collect()
    }

    /// Report whether any troop has a known distance.
    #[must_use]
    pub fn has_distances(&self) -> bool {
        self.troops.iter().any(|troop| troop.distance.is_some())
    }

    /// Troops matching the search, in the selected sort order.
    #[must_use]
    pub fn visible_troops(&self) -> Vec<&Troop> {
        let mut visible = filter_troops(&self.troops, &self.search_terms);
        self.sort.apply(&mut visible);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MeetingDay, SortDirection};
    use rstest::{fixture, rstest};

    #[fixture]
    fn session() -> SessionContext {
        let mut monday = Troop::new("6");
        monday.meeting_day = Some(MeetingDay::Monday);
        monday.notes = Some("Backpacking heavy".into());
        let mut friday = Troop::new("36");
        friday.meeting_day = Some(MeetingDay::Friday);
        friday.notes = Some("Sea Scouts and backpacking".into());
        let mut tuesday = Troop::new("12");
        tuesday.meeting_day = Some(MeetingDay::Tuesday);
        SessionContext::new(vec![monday, friday, tuesday])
    }

    fn visible_ids(session: &SessionContext) -> Vec<&str> {
        session
            .visible_troops()
            .into_iter()
            .map(|troop| troop.troop.as_str())
            .collect()
    }

    #[rstest]
    fn fresh_sessions_show_everything_in_dataset_order(session: SessionContext) {
        assert_eq!(visible_ids(&session), ["6", "36", "12"]);
    }

    #[rstest]
    fn search_and_sort_compose(mut session: SessionContext) {
        session.set_search_query("backpacking");
        session.sort_by(SortColumn::Troop);
        session.sort_by(SortColumn::Troop);
        assert_eq!(session.sort_state().direction(), SortDirection::Descending);
        assert_eq!(visible_ids(&session), ["36", "6"]);

        session.clear_search();
        assert_eq!(visible_ids(&session), ["36", "12", "6"]);
    }

    #[rstest]
    fn distances_apply_by_id(mut session: SessionContext) {
        let distances = BTreeMap::from([
            (TroopId::from("6"), 3.5),
            (TroopId::from("99"), 1.0),
        ]);
        assert_eq!(session.apply_distances(&distances), 1);
        assert!(session.has_distances());
        assert_eq!(session.distances(), BTreeMap::from([(TroopId::from("6"), 3.5)]));
    }

    #[rstest]
    fn moving_home_clears_distances(mut session: SessionContext) {
        let home = Coord { x: -121.97, y: 37.78 };
        session.set_home_location("1 Main St", home);
        session.apply_distances(&BTreeMap::from([(TroopId::from("36"), 2.0)]));

        session.set_home_location("1 Main St", home);
        assert!(session.has_distances());

        session.set_home_location("9 Elm St", Coord { x: -122.0, y: 37.7 });
        assert!(!session.has_distances());
        assert_eq!(
            session.home().map(|home| home.address.as_str()),
            Some("9 Elm St")
        );
    }
}
