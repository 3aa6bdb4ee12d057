//! Enterprise Administration (EAM) settings, rendered into `EAM_*` variables.

use crate::ignition::network::push_opt;

/// Role the gateway takes in an EAM deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EamRole {
    Agent,
    Controller,
}

impl EamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Controller => "Controller",
        }
    }
}

impl std::fmt::Display for EamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit for the controller's archive retention window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetentionUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl RetentionUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "Days",
            Self::Weeks => "Weeks",
            Self::Months => "Months",
            Self::Years => "Years",
        }
    }
}

impl std::fmt::Display for RetentionUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// EAM configuration block.
///
/// Agent settings only matter for [`EamRole::Agent`] and archive settings only
/// for [`EamRole::Controller`]; the gateway ignores the others, so they are
/// passed through as set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EamConfig {
    pub role: EamRole,
    /// Gateway name of the controller this agent reports to.
    pub controller_server_name: Option<String>,
    /// Seconds between statistics reports.
    pub send_stats_interval: Option<u32>,
    /// Megabytes.
    pub download_threshold_size: Option<u32>,
    pub archive_path: Option<String>,
    pub archive_retention_units: Option<RetentionUnit>,
    pub archive_retention_value: Option<u32>,
}

impl EamConfig {
    /// Agent reporting to the named controller gateway.
    pub fn agent(controller_server_name: impl Into<String>) -> Self {
        Self {
            controller_server_name: Some(controller_server_name.into()),
            ..Self::new(EamRole::Agent)
        }
    }

    pub fn controller() -> Self {
        Self::new(EamRole::Controller)
    }

    fn new(role: EamRole) -> Self {
        Self {
            role,
            controller_server_name: None,
            send_stats_interval: None,
            download_threshold_size: None,
            archive_path: None,
            archive_retention_units: None,
            archive_retention_value: None,
        }
    }

    pub fn with_send_stats_interval(mut self, seconds: u32) -> Self {
        self.send_stats_interval = Some(seconds);
        self
    }

    pub fn with_download_threshold_size(mut self, megabytes: u32) -> Self {
        self.download_threshold_size = Some(megabytes);
        self
    }

    pub fn with_archive_path(mut self, path: impl Into<String>) -> Self {
        self.archive_path = Some(path.into());
        self
    }

    pub fn with_archive_retention(mut self, value: u32, units: RetentionUnit) -> Self {
        self.archive_retention_value = Some(value);
        self.archive_retention_units = Some(units);
        self
    }

    pub(crate) fn env_vars(&self) -> Vec<(String, String)> {
        let mut env = vec![(
            "EAM_SETUP_INSTALLSELECTION".to_string(),
            self.role.to_string(),
        )];
        push_opt(
            &mut env,
            "EAM_AGENT_CONTROLLERSERVERNAME",
            self.controller_server_name.as_ref(),
        );
        push_opt(
            &mut env,
            "EAM_AGENT_SENDSTATSINTERVAL",
            self.send_stats_interval,
        );
        push_opt(
            &mut env,
            "EAM_AGENT_DOWNLOADTHRESHOLDSIZE",
            self.download_threshold_size,
        );
        push_opt(
            &mut env,
            "EAM_CONTROLLER_ARCHIVEPATH",
            self.archive_path.as_ref(),
        );
        push_opt(
            &mut env,
            "EAM_CONTROLLER_ARCHIVERETENTIONUNITS",
            self.archive_retention_units,
        );
        push_opt(
            &mut env,
            "EAM_CONTROLLER_ARCHIVERETENTIONVALUE",
            self.archive_retention_value,
        );
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_block() {
        let env = EamConfig::agent("controller-gw")
            .with_send_stats_interval(30)
            .env_vars();

        assert_eq!(
            env,
            vec![
                ("EAM_SETUP_INSTALLSELECTION".to_string(), "Agent".to_string()),
                (
                    "EAM_AGENT_CONTROLLERSERVERNAME".to_string(),
                    "controller-gw".to_string()
                ),
                ("EAM_AGENT_SENDSTATSINTERVAL".to_string(), "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_controller_block() {
        let env = EamConfig::controller()
            .with_archive_path("/archive")
            .with_archive_retention(6, RetentionUnit::Months)
            .env_vars();

        assert_eq!(env.len(), 4);
        assert!(env.contains(&(
            "EAM_SETUP_INSTALLSELECTION".to_string(),
            "Controller".to_string()
        )));
        assert!(env.contains(&(
            "EAM_CONTROLLER_ARCHIVERETENTIONUNITS".to_string(),
            "Months".to_string()
        )));
        assert!(env.contains(&(
            "EAM_CONTROLLER_ARCHIVERETENTIONVALUE".to_string(),
            "6".to_string()
        )));
    }
}
