use crate::model::config::UserConfig;
use crate::model::item::UserRef;

/// Source of assignable users
pub trait UserDirectory {
    /// Look up a user by id
    fn resolve(&self, id: &str) -> Option<UserRef>;
    /// Users matching a free-text query. An empty query matches everyone.
    fn search(&self, query: &str) -> Vec<UserRef>;
}

/// Directory backed by the `[[users]]` entries of the config
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    users: Vec<UserRef>,
}

impl StaticDirectory {
    pub fn new(users: Vec<UserRef>) -> Self {
        StaticDirectory { users }
    }

    pub fn from_config(users: &[UserConfig]) -> Self {
        StaticDirectory::new(
            users
                .iter()
                .map(|u| UserRef::new(u.id.clone(), u.name.clone()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for StaticDirectory {
    fn resolve(&self, id: &str) -> Option<UserRef> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    fn search(&self, query: &str) -> Vec<UserRef> {
        let query = query.trim().to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                query.is_empty()
                    || u.id.to_lowercase().contains(&query)
                    || u.display_name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StaticDirectory {
        StaticDirectory::new(vec![
            UserRef::new("ana", "Ana Lima"),
            UserRef::new("bo", "Bo Svensson"),
            UserRef::new("carla", "Carla Diaz"),
        ])
    }

    #[test]
    fn test_resolve() {
        let dir = directory();
        assert_eq!(dir.resolve("bo").unwrap().display_name, "Bo Svensson");
        assert_eq!(dir.resolve("nobody"), None);
    }

    #[test]
    fn test_search_empty_query_returns_all_in_order() {
        let ids: Vec<String> = directory().search("").into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["ana", "bo", "carla"]);
    }

    #[test]
    fn test_search_matches_name_case_insensitive() {
        let ids: Vec<String> = directory()
            .search("DIAZ")
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["carla"]);
    }

    #[test]
    fn test_search_matches_id_or_name() {
        // "a" appears in every entry
        assert_eq!(directory().search("a").len(), 3);
        assert!(directory().search("zz").is_empty());
    }

    #[test]
    fn test_from_config() {
        let dir = StaticDirectory::from_config(&[UserConfig {
            id: "x".into(),
            name: "Xavier".into(),
        }]);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.resolve("x"), Some(UserRef::new("x", "Xavier")));
    }
}
