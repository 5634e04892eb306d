//! Filter → sort pipeline producing the rows the table renders.

use std::any::Any;
use std::cmp::{Ordering, Reverse};

use roster_states::{Compute, ComputeDeps, Dep, Updater, assign_impl};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::users::{UserEntity, UsersState, ViewControls};

/// Case-insensitive substring match of `filter` against the user's country.
pub fn matches_country_filter(user: &UserEntity, filter: Option<&str>) -> bool {
    match filter {
        None | Some("") => true,
        Some(filter) => user
            .country
            .to_lowercase()
            .contains(&filter.to_lowercase()),
    }
}

/// Sort key approximating a locale-aware collation.
///
/// Letters compare first without accents or case, then accents break the tie
/// (unaccented first), then case (lower first).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    base: String,
    accented: String,
    cased: Reverse<String>,
}

impl CollationKey {
    fn new(text: &str) -> Self {
        Self {
            base: text
                .nfd()
                .filter(|c| !is_combining_mark(*c))
                .flat_map(char::to_lowercase)
                .collect(),
            accented: text.to_lowercase(),
            cased: Reverse(text.to_owned()),
        }
    }
}

pub fn compare_countries(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Filter, then optionally sort by country.
///
/// The sort is stable: users from the same country keep their WorkingSet order.
pub fn derive_users(working: &[UserEntity], controls: &ViewControls) -> Vec<UserEntity> {
    let filter = controls.active_filter();
    let filtered = working
        .iter()
        .filter(|user| matches_country_filter(user, filter))
        .cloned();

    if !controls.sort_by_country() {
        return filtered.collect();
    }

    let mut keyed: Vec<(CollationKey, UserEntity)> = filtered
        .map(|user| (CollationKey::new(&user.country), user))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, user)| user).collect()
}

/// Everything the derived rows depend on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveKey {
    pub working_version: u64,
    pub filter_country: Option<String>,
    pub sort_by_country: bool,
}

impl DeriveKey {
    fn new(users: &UsersState, controls: &ViewControls) -> Self {
        Self {
            working_version: users.version(),
            filter_country: controls.active_filter().map(str::to_owned),
            sort_by_country: controls.sort_by_country(),
        }
    }
}

/// The derived sequence, memoized by [`DeriveKey`].
///
/// Runs only when `UsersState` or `ViewControls` is dirty, and even then skips
/// the work if the key did not change (e.g. the same filter typed again).
#[derive(Debug, Default)]
pub struct DerivedUsersCompute {
    rows: Vec<UserEntity>,
    key: Option<DeriveKey>,
    generation: u64,
}

impl DerivedUsersCompute {
    pub fn rows(&self) -> &[UserEntity] {
        &self.rows
    }

    pub fn key(&self) -> Option<&DeriveKey> {
        self.key.as_ref()
    }

    /// Number of times the rows were actually recomputed.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Compute for DerivedUsersCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
            .state::<UsersState>()
            .state::<ViewControls>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let users = deps.state::<UsersState>();
        let controls = deps.state::<ViewControls>();

        let key = DeriveKey::new(users, controls);
        if self.key.as_ref() == Some(&key) {
            return;
        }

        updater.set(Self {
            rows: derive_users(users.working(), controls),
            key: Some(key),
            generation: self.generation + 1,
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, country: &str) -> UserEntity {
        UserEntity::new(id, "First", "Last", country, "https://example.com/p.jpg")
    }

    fn countries(users: &[UserEntity]) -> Vec<&str> {
        users.iter().map(|user| user.country.as_str()).collect()
    }

    fn ids(users: &[UserEntity]) -> Vec<&str> {
        users.iter().map(|user| user.id.as_str()).collect()
    }

    fn controls(filter: Option<&str>, sort: bool) -> ViewControls {
        let mut controls = ViewControls::default();
        if let Some(filter) = filter {
            controls.set_filter_country(filter);
        }
        if sort {
            controls.toggle_sort_by_country();
        }
        controls
    }

    fn working() -> Vec<UserEntity> {
        vec![
            user("1", "Spain"),
            user("2", "France"),
            user("3", "Chile"),
            user("4", "España"),
            user("5", "chile"),
            user("6", "Chile"),
        ]
    }

    #[test]
    fn filter_matches_case_insensitive_substring() {
        let rows = derive_users(&working(), &controls(Some("SPA"), false));
        assert_eq!(countries(&rows), vec!["Spain", "España"]);

        let rows = derive_users(&working(), &controls(Some("il"), false));
        assert_eq!(ids(&rows), vec!["3", "5", "6"]);
    }

    #[test]
    fn empty_or_missing_filter_keeps_everything_in_order() {
        let all = working();
        assert_eq!(derive_users(&all, &controls(None, false)), all);
        assert_eq!(derive_users(&all, &controls(Some(""), false)), all);
    }

    #[test]
    fn filter_is_not_trimmed() {
        let rows = derive_users(&working(), &controls(Some(" spain"), false));
        assert!(rows.is_empty());
    }

    #[test]
    fn filter_result_is_exactly_the_matching_users() {
        let all = working();
        for filter in ["", "a", "CH", "ñ", "xyz", "e"] {
            let rows = derive_users(&all, &controls(Some(filter), false));
            let expected: Vec<UserEntity> = all
                .iter()
                .filter(|user| {
                    user.country
                        .to_lowercase()
                        .contains(&filter.to_lowercase())
                })
                .cloned()
                .collect();
            assert_eq!(rows, expected, "filter {filter:?}");
        }
    }

    #[test]
    fn sort_is_stable_for_equal_countries() {
        let working = vec![user("f", "France"), user("c1", "Chile"), user("c2", "Chile")];
        let rows = derive_users(&working, &controls(None, true));

        assert_eq!(countries(&rows), vec!["Chile", "Chile", "France"]);
        assert_eq!(ids(&rows), vec!["c1", "c2", "f"]);
    }

    #[test]
    fn sort_ignores_accents_and_case_for_primary_order() {
        let working = vec![
            user("1", "Österreich"),
            user("2", "Norway"),
            user("3", "Poland"),
            user("4", "Éire"),
            user("5", "Denmark"),
        ];
        let rows = derive_users(&working, &controls(None, true));
        assert_eq!(
            countries(&rows),
            vec!["Denmark", "Éire", "Norway", "Österreich", "Poland"]
        );
    }

    #[test]
    fn collation_tie_breaks() {
        assert_eq!(compare_countries("Chile", "Chile"), Ordering::Equal);
        assert_eq!(compare_countries("chile", "Chile"), Ordering::Less);
        assert_eq!(compare_countries("Espana", "España"), Ordering::Less);
        assert_eq!(compare_countries("España", "Estonia"), Ordering::Less);
    }

    #[test]
    fn filter_then_sort() {
        let rows = derive_users(&working(), &controls(Some("a"), true));
        assert_eq!(countries(&rows), vec!["España", "France", "Spain"]);
    }

    #[test]
    fn derivation_does_not_touch_input() {
        let all = working();
        let before = all.clone();
        let _rows = derive_users(&all, &controls(Some("ch"), true));
        assert_eq!(all, before);
    }
}
