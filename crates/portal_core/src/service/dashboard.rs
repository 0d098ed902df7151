//! Admin dashboard summary.

use crate::model::app::AppPortal;

const RECENT_APPS_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_apps: usize,
    pub active_apps: usize,
    /// Sum of member list lengths; a person in two apps counts twice.
    pub total_members: usize,
    /// Most recently updated apps, newest first.
    pub recent: Vec<AppPortal>,
}

pub fn summarize(apps: &[AppPortal]) -> DashboardSummary {
    let mut recent: Vec<AppPortal> = apps.to_vec();
    recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    recent.truncate(RECENT_APPS_LIMIT);

    DashboardSummary {
        total_apps: apps.len(),
        active_apps: apps.iter().filter(|app| app.is_active).count(),
        total_members: apps.iter().map(|app| app.users.len()).sum(),
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::store::app_store::AppCollection;

    #[test]
    fn summarizes_default_dataset() {
        let summary = summarize(&AppCollection::defaults().apps);
        assert_eq!(summary.total_apps, 2);
        assert_eq!(summary.active_apps, 2);
        assert_eq!(summary.total_members, 4);
        let order: Vec<&str> = summary.recent.iter().map(|app| app.id.as_str()).collect();
        assert_eq!(order, vec!["1", "2"]);
    }

    #[test]
    fn recent_list_is_capped() {
        let mut apps = AppCollection::defaults().apps;
        let template = apps[0].clone();
        for n in 0..3 {
            let mut extra = template.clone();
            extra.id = format!("extra-{n}");
            extra.is_active = false;
            extra.touch();
            apps.push(extra);
        }
        let summary = summarize(&apps);
        assert_eq!(summary.recent.len(), 3);
        assert_eq!(summary.active_apps, 2);
        assert!(summary.recent.iter().all(|app| app.id.starts_with("extra-")));
    }
}
