//! Translation of a [`LaunchConfiguration`] into what the container runtime
//! consumes: environment variables, entrypoint arguments, files to copy in
//! and ports to expose.

use std::collections::BTreeMap;
use std::path::PathBuf;

use secrecy::ExposeSecret;

use crate::ignition::config::LaunchConfiguration;
use crate::ignition::module::{GatewayModule, join_identifiers};
use crate::ignition::network::push_opt;

/// Gateway HTTP port inside the container.
pub const GATEWAY_PORT: u16 = 8088;
/// Gateway HTTPS port inside the container.
pub const GATEWAY_SSL_PORT: u16 = 8043;
/// Gateway network port inside the container.
pub const GAN_PORT: u16 = 8060;
/// OPC UA server port, exposed when the OPC UA module is enabled.
pub const OPCUA_PORT: u16 = 62541;
/// JVM debugger port, exposed in debug mode.
pub const DEBUG_PORT: u16 = 8000;

/// Where a gateway backup lands inside the container.
pub const RESTORE_PATH: &str = "/restore.gwbk";
/// Directory the image loads third-party modules from.
pub const MODULES_DIR: &str = "/usr/local/bin/ignition/user-lib/modules";

/// A host file copied into the container before start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub source: PathBuf,
    pub target: String,
}

/// Serialized form of a launch configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Environment variables. Unset optional fields have no key at all.
    pub env: BTreeMap<String, String>,
    /// Entrypoint arguments, one token per element.
    pub args: Vec<String>,
    pub files: Vec<StagedFile>,
    /// Container ports to expose, without duplicates.
    pub exposed_ports: Vec<u16>,
}

impl LaunchPlan {
    pub fn from_config(config: &LaunchConfiguration) -> Self {
        Self {
            env: env_vars(config),
            args: args(config),
            files: staged_files(config),
            exposed_ports: exposed_ports(config),
        }
    }

    /// Look up a single environment variable.
    pub fn env(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }

    /// The arguments as one line, tokens separated by single spaces.
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

fn env_vars(config: &LaunchConfiguration) -> BTreeMap<String, String> {
    let mut env: Vec<(String, String)> = Vec::new();

    if config.license_accepted() {
        env.push(("ACCEPT_IGNITION_EULA".to_string(), "Y".to_string()));
    }
    env.push((
        "DISABLE_QUICKSTART".to_string(),
        (!config.quick_start()).to_string(),
    ));
    env.push((
        "GATEWAY_ADMIN_USERNAME".to_string(),
        config.username().to_string(),
    ));
    env.push((
        "GATEWAY_ADMIN_PASSWORD".to_string(),
        config.password().expose_secret().to_string(),
    ));

    push_opt(&mut env, "GATEWAY_HTTP_PORT", config.http_port());
    push_opt(&mut env, "GATEWAY_HTTPS_PORT", config.https_port());
    push_opt(&mut env, "GATEWAY_GAN_PORT", config.gan_port());

    if config.gateway_backup().is_some() {
        env.push((
            "GATEWAY_RESTORE_DISABLED".to_string(),
            config.restore_disabled().to_string(),
        ));
    }
    if !config.modules().is_empty() {
        env.push((
            "GATEWAY_MODULES_ENABLED".to_string(),
            join_identifiers(config.modules()),
        ));
    }
    if let Some(network) = config.gateway_network() {
        env.extend(network.env_vars());
    }

    env.push((
        "IGNITION_EDITION".to_string(),
        config.edition().to_string(),
    ));
    push_opt(&mut env, "IGNITION_UID", config.uid());
    push_opt(&mut env, "IGNITION_GID", config.gid());
    push_opt(
        &mut env,
        "IGNITION_ACTIVATION_TOKEN",
        config.activation_token().map(|t| t.expose_secret()),
    );
    push_opt(
        &mut env,
        "IGNITION_LICENSE_KEY",
        config.license_key().map(|k| k.expose_secret()),
    );

    if let Some(eam) = config.eam() {
        env.extend(eam.env_vars());
    }

    env.push(("TZ".to_string(), config.timezone().to_string()));

    env.into_iter().filter(|(_, value)| !value.is_empty()).collect()
}

fn args(config: &LaunchConfiguration) -> Vec<String> {
    let mut args = Vec::new();
    if config.debug_mode() {
        args.push("-d".to_string());
    }
    if let Some(max_memory) = config.max_memory() {
        args.push("-m".to_string());
        args.push(max_memory.to_string());
    }
    if let Some(name) = config.gateway_name() {
        args.push("-n".to_string());
        args.push(name.to_string());
    }
    if config.gateway_backup().is_some() {
        args.push("-r".to_string());
        args.push(RESTORE_PATH.to_string());
    }
    if !config.additional_args().is_empty() {
        args.push("--".to_string());
        args.extend(config.additional_args().iter().cloned());
    }
    args
}

fn staged_files(config: &LaunchConfiguration) -> Vec<StagedFile> {
    let mut files = Vec::new();
    if let Some(backup) = config.gateway_backup() {
        files.push(StagedFile {
            source: backup.to_path_buf(),
            target: RESTORE_PATH.to_string(),
        });
    }
    for module in config.third_party_modules() {
        // Setters reject paths without a file name.
        if let Some(file_name) = module.file_name() {
            files.push(StagedFile {
                source: module.clone(),
                target: format!("{}/{}", MODULES_DIR, file_name.to_string_lossy()),
            });
        }
    }
    files
}

fn exposed_ports(config: &LaunchConfiguration) -> Vec<u16> {
    let mut candidates = vec![
        config.http_port().unwrap_or(GATEWAY_PORT),
        config.https_port().unwrap_or(GATEWAY_SSL_PORT),
        config.gan_port().unwrap_or(GAN_PORT),
    ];
    if config.debug_mode() {
        candidates.push(DEBUG_PORT);
    }
    if config.modules().contains(&GatewayModule::OpcUa) {
        candidates.push(OPCUA_PORT);
    }
    candidates.extend_from_slice(config.additional_exposed_ports());

    let mut ports = Vec::with_capacity(candidates.len());
    for port in candidates {
        if !ports.contains(&port) {
            ports.push(port);
        }
    }
    ports
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ignition::edition::GatewayEdition;

    #[test]
    fn test_default_plan() {
        let plan = LaunchConfiguration::new().plan();

        let expected: BTreeMap<String, String> = [
            ("DISABLE_QUICKSTART", "true"),
            ("GATEWAY_ADMIN_USERNAME", "admin"),
            ("GATEWAY_ADMIN_PASSWORD", "password"),
            ("IGNITION_EDITION", "standard"),
            ("TZ", "Etc/UTC"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        assert_eq!(plan.env, expected);
        assert!(plan.args.is_empty());
        assert!(plan.files.is_empty());
        assert_eq!(plan.exposed_ports, vec![GATEWAY_PORT, GATEWAY_SSL_PORT, GAN_PORT]);
    }

    #[test]
    fn test_licensing_keys() {
        let mut config = LaunchConfiguration::new();
        config
            .accept_license()
            .unwrap()
            .with_license_key("ABCD-1234")
            .unwrap()
            .with_activation_token("token-xyz")
            .unwrap();
        let plan = config.plan();

        assert_eq!(plan.env("ACCEPT_IGNITION_EULA"), Some("Y"));
        assert_eq!(plan.env("IGNITION_LICENSE_KEY"), Some("ABCD-1234"));
        assert_eq!(plan.env("IGNITION_ACTIVATION_TOKEN"), Some("token-xyz"));
    }

    #[test]
    fn test_argument_order() {
        let mut config = LaunchConfiguration::new();
        config
            .with_additional_args(["wrapper.java.initmemory=512"])
            .unwrap()
            .with_gateway_name("plant-gateway")
            .unwrap()
            .with_max_memory("2048")
            .unwrap()
            .with_debug_mode(true)
            .unwrap();

        assert_eq!(
            config.plan().args,
            vec![
                "-d",
                "-m",
                "2048",
                "-n",
                "plant-gateway",
                "--",
                "wrapper.java.initmemory=512"
            ]
        );
    }

    #[test]
    fn test_conditional_ports() {
        let mut config = LaunchConfiguration::new();
        config
            .with_http_port(9080)
            .unwrap()
            .with_debug_mode(true)
            .unwrap()
            .with_module(GatewayModule::OpcUa)
            .unwrap()
            .with_additional_exposed_port(9080)
            .unwrap()
            .with_additional_exposed_port(5005)
            .unwrap();

        assert_eq!(
            config.plan().exposed_ports,
            vec![9080, GATEWAY_SSL_PORT, GAN_PORT, DEBUG_PORT, OPCUA_PORT, 5005]
        );
    }

    #[test]
    fn test_third_party_modules_keep_their_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("Embr-EventStream-0.4.0.modl");
        std::fs::write(&module, b"modl").unwrap();

        let mut config = LaunchConfiguration::new();
        config.with_third_party_module(&module).unwrap();

        assert_eq!(
            config.plan().files,
            vec![StagedFile {
                source: module,
                target: "/usr/local/bin/ignition/user-lib/modules/Embr-EventStream-0.4.0.modl"
                    .to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_values_are_not_emitted() {
        let mut config = LaunchConfiguration::new();
        config
            .with_timezone("")
            .unwrap()
            .with_license_key("")
            .unwrap()
            .with_gateway_network(
                crate::ignition::network::GatewayNetworkConfig::new().with_whitelist([""]),
            )
            .unwrap();
        let plan = config.plan();

        assert_eq!(plan.env("TZ"), None);
        assert_eq!(plan.env("IGNITION_LICENSE_KEY"), None);
        assert_eq!(plan.env("GATEWAY_NETWORK_WHITELIST"), None);
        assert!(plan.env.values().all(|v| !v.is_empty()));
    }

    #[test]
    fn test_edition_is_always_emitted() {
        let mut config = LaunchConfiguration::new();
        config.with_edition(GatewayEdition::Edge).unwrap();
        assert_eq!(config.plan().env("IGNITION_EDITION"), Some("edge"));
    }
}
