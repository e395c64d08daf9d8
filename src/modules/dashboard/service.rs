use bims_models::{Identity, UserRole};

use super::model::{DashboardIndexResponse, DashboardResponse};

pub struct DashboardService;

impl DashboardService {
    pub fn index(viewer: Identity) -> DashboardIndexResponse {
        let available = UserRole::ALL
            .into_iter()
            .filter(|dashboard| viewer.role.at_least(*dashboard))
            .collect();

        DashboardIndexResponse { viewer, available }
    }

    pub fn dashboard(dashboard: UserRole, viewer: Identity) -> DashboardResponse {
        DashboardResponse {
            dashboard,
            viewer,
            sections: sections_for(dashboard)
                .iter()
                .map(|section| section.to_string())
                .collect(),
        }
    }
}

fn sections_for(dashboard: UserRole) -> &'static [&'static str] {
    match dashboard {
        UserRole::Client => &["policies", "claims", "renewals", "documents"],
        UserRole::Broker => &["clients", "quotes", "placements", "commissions"],
        UserRole::Admin => &["users", "insurers", "audit"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bims_models::UserId;
    use chrono::Utc;

    fn viewer(role: UserRole) -> Identity {
        let now = Utc::now();
        Identity {
            id: UserId::new(),
            first_name: "Tunde".into(),
            last_name: "Okafor".into(),
            email: "tunde@bims.test".into(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_index_follows_role_hierarchy() {
        assert_eq!(
            DashboardService::index(viewer(UserRole::Client)).available,
            vec![UserRole::Client]
        );
        assert_eq!(
            DashboardService::index(viewer(UserRole::Broker)).available,
            vec![UserRole::Client, UserRole::Broker]
        );
        assert_eq!(
            DashboardService::index(viewer(UserRole::Admin)).available,
            UserRole::ALL.to_vec()
        );
    }

    #[test]
    fn test_dashboard_sections() {
        let response = DashboardService::dashboard(UserRole::Broker, viewer(UserRole::Admin));

        assert_eq!(response.dashboard, UserRole::Broker);
        assert_eq!(response.viewer.role, UserRole::Admin);
        assert!(response.sections.contains(&"quotes".to_string()));
    }
}
