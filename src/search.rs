use crate::app::AppState;
use crate::model::User;
use crate::store::{UserId, UserRecord};

/// Case-insensitive substring match on first name, last name or username.
/// `needle` must already be lowercased.
pub fn matches_query(user: &User, needle: &str) -> bool {
    needle.is_empty()
        || user.first_name.to_lowercase().contains(needle)
        || user.last_name.to_lowercase().contains(needle)
        || user.username.to_lowercase().contains(needle)
}

/// Ids of the records matching `query`, in canonical order.
///
/// # Arguments
///
/// * `records` - The canonical list.
/// * `query` - Raw search text. Matching ignores case; an empty query matches
///   everything.
///
/// # Returns
///
/// The matching ids. `records` is not modified.
pub fn filter_users(records: &[UserRecord], query: &str) -> Vec<UserId> {
    let q = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_query(&r.user, &q))
        .map(|r| r.id)
        .collect()
}

/// Re-derive the filtered view from the canonical list and the active query,
/// keeping the selection on the same record when it is still visible.
///
/// Called after every fetch, search and mutation so that `app.visible` never
/// drifts from `app.store`. When the selected record is gone the index is
/// clamped to the new view.
///
/// # Arguments
///
/// * `app` - The application state to update in place.
pub fn apply_search(app: &mut AppState) {
    let previous = app.selected_id();
    app.visible = filter_users(app.store.records(), &app.active_query);
    app.selected_index = previous
        .and_then(|id| app.visible.iter().position(|v| *v == id))
        .unwrap_or_else(|| app.selected_index.min(app.visible.len().saturating_sub(1)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::UserStore;

    fn mk_user(first: &str, last: &str, username: &str) -> User {
        User {
            first_name: first.to_string(),
            last_name: last.to_string(),
            username: username.to_string(),
            ..User::default()
        }
    }

    fn mk_app(users: Vec<User>) -> AppState {
        let mut app = AppState::default();
        app.store = UserStore::from_users(users);
        apply_search(&mut app);
        app
    }

    #[test]
    fn search_filters_by_each_name_field() {
        let app = mk_app(vec![
            mk_user("Ann", "Lee", "alee"),
            mk_user("Bob", "Stone", "bstone"),
            mk_user("Cara", "Mills", "leeway"),
        ]);
        let records = app.store.records();
        assert_eq!(filter_users(records, "bOb").len(), 1);
        assert_eq!(filter_users(records, "STONE").len(), 1);
        let lee = filter_users(records, "lee");
        assert_eq!(lee, vec![records[0].id, records[2].id]);
    }

    #[test]
    fn empty_query_is_identity() {
        let app = mk_app(vec![mk_user("Ann", "Lee", "alee"), mk_user("Bob", "Stone", "bs")]);
        let all: Vec<_> = app.store.records().iter().map(|r| r.id).collect();
        assert_eq!(filter_users(app.store.records(), ""), all);
        assert_eq!(app.visible, all);
    }

    #[test]
    fn selection_follows_record_across_filters() {
        let mut app = mk_app(vec![
            mk_user("Ann", "Lee", "alee"),
            mk_user("Bob", "Stone", "bs"),
            mk_user("Cid", "Lee", "clee"),
        ]);
        app.selected_index = 2;
        let cid = app.selected_id().unwrap();
        app.active_query = "lee".to_string();
        apply_search(&mut app);
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.selected_id(), Some(cid));

        app.active_query = "zzz".to_string();
        apply_search(&mut app);
        assert!(app.visible.is_empty());
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.selected_id(), None);
    }
}
